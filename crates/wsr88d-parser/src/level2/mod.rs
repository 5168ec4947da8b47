//! Level II (RDA) message decoders.
//!
//! Radial data arrives either as the fixed-layout Digital Radar Data
//! message (type 1) or the pointer-addressed Generic Digital Radar Data
//! message (type 31). Both expose their moments through [`RadialMoments`].
//! The remaining modules decode RDA status, VCP, adaptation, performance and
//! clutter filter map messages.

pub mod clutter_filter;
pub mod generic;
pub mod legacy;
pub mod moment;
pub mod performance;
pub mod rda_adaptation;
pub mod rda_status;
pub mod vcp;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use clutter_filter::{ClutterFilterBypassMap, ClutterFilterMap, OpCode, RangeZone};
pub use generic::{DigitalRadarDataGeneric, ElevationDataBlock, RadialDataBlock, VolumeDataBlock};
pub use legacy::DigitalRadarData;
pub use moment::{GateValues, MomentDataBlock};
pub use performance::PerformanceMaintenanceData;
pub use rda_adaptation::RdaAdaptationData;
pub use rda_status::RdaStatusData;
pub use vcp::{ElevationCut, VolumeCoveragePatternData, WaveformType};

/// Radar moment carried by a moment data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MomentKind {
    Reflectivity,
    Velocity,
    SpectrumWidth,
    DifferentialReflectivity,
    DifferentialPhase,
    CorrelationCoefficient,
    ClutterFilterPower,
}

impl MomentKind {
    pub const ALL: [MomentKind; 7] = [
        MomentKind::Reflectivity,
        MomentKind::Velocity,
        MomentKind::SpectrumWidth,
        MomentKind::DifferentialReflectivity,
        MomentKind::DifferentialPhase,
        MomentKind::CorrelationCoefficient,
        MomentKind::ClutterFilterPower,
    ];

    /// Three-character block name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            MomentKind::Reflectivity => "REF",
            MomentKind::Velocity => "VEL",
            MomentKind::SpectrumWidth => "SW ",
            MomentKind::DifferentialReflectivity => "ZDR",
            MomentKind::DifferentialPhase => "PHI",
            MomentKind::CorrelationCoefficient => "RHO",
            MomentKind::ClutterFilterPower => "CFP",
        }
    }
}

/// Data block tag of a generic radial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataBlockType {
    Volume,
    Elevation,
    Radial,
    Moment(MomentKind),
}

impl DataBlockType {
    /// Resolves a 3-character block name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "VOL" => Some(DataBlockType::Volume),
            "ELV" => Some(DataBlockType::Elevation),
            "RAD" => Some(DataBlockType::Radial),
            _ => MomentKind::ALL
                .into_iter()
                .find(|k| k.name() == name)
                .map(DataBlockType::Moment),
        }
    }
}

/// Common read access to a radial, regardless of which message carried it.
pub trait RadialMoments {
    /// Azimuth angle, degrees
    fn azimuth_angle(&self) -> f32;

    fn azimuth_number(&self) -> u16;

    /// Elevation angle, degrees
    fn elevation_angle(&self) -> f32;

    fn elevation_number(&self) -> u16;

    fn collection_time(&self) -> Option<DateTime<Utc>>;

    fn moment(&self, kind: MomentKind) -> Option<&MomentDataBlock>;

    /// Moments present in this radial, in [`MomentKind`] order.
    fn available_moments(&self) -> Vec<MomentKind> {
        MomentKind::ALL
            .into_iter()
            .filter(|k| self.moment(*k).is_some())
            .collect()
    }
}
