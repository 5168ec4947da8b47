//! Volume Coverage Pattern Data (message type 5).
//!
//! A 22-byte pattern header followed by one 46-byte record per elevation
//! cut. Angles and rates are coded integers; bitfield accessors decode the
//! sequencing and supplemental words.

use serde::Serialize;
use tracing::{trace, warn};

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

/// Coded angle to degrees.
pub const ANGLE_DATA_SCALE: f64 = 0.005493125;
/// Coded azimuth/elevation rate to degrees per second.
pub const AZ_EL_RATE_DATA_SCALE: f64 = 0.001373291015625;

const VCP_HEADER_SIZE: usize = 22;
const ELEVATION_CUT_SIZE: usize = 46;

const MIN_MESSAGE_SIZE: u16 = 34;
const MAX_MESSAGE_SIZE: u16 = 747;
const MAX_ELEVATION_CUTS: u16 = 32;

/// Thresholds are transmitted in 0.125 dB units.
const THRESHOLD_SCALE: f32 = 0.125;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WaveformType {
    ContiguousSurveillance,
    ContiguousDopplerWithAmbiguityResolution,
    ContiguousDopplerWithoutAmbiguityResolution,
    Batch,
    StaggeredPulsePair,
    Unknown,
}

impl WaveformType {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => WaveformType::ContiguousSurveillance,
            2 => WaveformType::ContiguousDopplerWithAmbiguityResolution,
            3 => WaveformType::ContiguousDopplerWithoutAmbiguityResolution,
            4 => WaveformType::Batch,
            5 => WaveformType::StaggeredPulsePair,
            _ => WaveformType::Unknown,
        }
    }
}

/// Doppler PRF sector of an elevation cut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrfSector {
    pub edge_angle_raw: u16,
    pub doppler_prf_number: u16,
    pub doppler_prf_pulse_count: u16,
}

impl PrfSector {
    fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        Ok(Self {
            edge_angle_raw: c.read_u16()?,
            doppler_prf_number: c.read_u16()?,
            doppler_prf_pulse_count: c.read_u16()?,
        })
    }

    pub fn edge_angle(&self) -> f64 {
        f64::from(self.edge_angle_raw) * ANGLE_DATA_SCALE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElevationCut {
    pub elevation_angle_raw: u16,
    pub channel_configuration: u8,
    pub waveform_type_raw: u8,
    pub super_resolution_control: u8,
    pub surveillance_prf_number: u8,
    pub surveillance_prf_pulse_count: u16,
    pub azimuth_rate_raw: u16,
    pub reflectivity_threshold_raw: u16,
    pub velocity_threshold_raw: u16,
    pub spectrum_width_threshold_raw: u16,
    pub differential_reflectivity_threshold_raw: u16,
    pub differential_phase_threshold_raw: u16,
    pub correlation_coefficient_threshold_raw: u16,
    pub sectors: [PrfSector; 3],
    pub supplemental_data: u16,
    pub ebc_angle_raw: u16,
}

impl ElevationCut {
    fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let elevation_angle_raw = c.read_u16()?;
        let channel_configuration = c.read_u8()?;
        let waveform_type_raw = c.read_u8()?;
        let super_resolution_control = c.read_u8()?;
        let surveillance_prf_number = c.read_u8()?;
        let surveillance_prf_pulse_count = c.read_u16()?;
        let azimuth_rate_raw = c.read_u16()?;
        let reflectivity_threshold_raw = c.read_u16()?;
        let velocity_threshold_raw = c.read_u16()?;
        let spectrum_width_threshold_raw = c.read_u16()?;
        let differential_reflectivity_threshold_raw = c.read_u16()?;
        let differential_phase_threshold_raw = c.read_u16()?;
        let correlation_coefficient_threshold_raw = c.read_u16()?;
        let sector1 = PrfSector::parse(c)?;
        let supplemental_data = c.read_u16()?;
        let sector2 = PrfSector::parse(c)?;
        let ebc_angle_raw = c.read_u16()?;
        let sector3 = PrfSector::parse(c)?;
        c.skip(2)?;

        Ok(Self {
            elevation_angle_raw,
            channel_configuration,
            waveform_type_raw,
            super_resolution_control,
            surveillance_prf_number,
            surveillance_prf_pulse_count,
            azimuth_rate_raw,
            reflectivity_threshold_raw,
            velocity_threshold_raw,
            spectrum_width_threshold_raw,
            differential_reflectivity_threshold_raw,
            differential_phase_threshold_raw,
            correlation_coefficient_threshold_raw,
            sectors: [sector1, sector2, sector3],
            supplemental_data,
            ebc_angle_raw,
        })
    }

    /// Elevation angle, degrees
    pub fn elevation_angle(&self) -> f64 {
        f64::from(self.elevation_angle_raw) * ANGLE_DATA_SCALE
    }

    /// Azimuth rate, degrees per second
    pub fn azimuth_rate(&self) -> f64 {
        f64::from(self.azimuth_rate_raw) * AZ_EL_RATE_DATA_SCALE
    }

    pub fn ebc_angle(&self) -> f64 {
        f64::from(self.ebc_angle_raw) * ANGLE_DATA_SCALE
    }

    pub fn waveform_type(&self) -> WaveformType {
        WaveformType::from_code(self.waveform_type_raw)
    }

    pub fn reflectivity_threshold(&self) -> f32 {
        f32::from(self.reflectivity_threshold_raw) * THRESHOLD_SCALE
    }

    pub fn velocity_threshold(&self) -> f32 {
        f32::from(self.velocity_threshold_raw) * THRESHOLD_SCALE
    }

    pub fn spectrum_width_threshold(&self) -> f32 {
        f32::from(self.spectrum_width_threshold_raw) * THRESHOLD_SCALE
    }

    pub fn differential_reflectivity_threshold(&self) -> f32 {
        f32::from(self.differential_reflectivity_threshold_raw) * THRESHOLD_SCALE
    }

    pub fn differential_phase_threshold(&self) -> f32 {
        f32::from(self.differential_phase_threshold_raw) * THRESHOLD_SCALE
    }

    pub fn correlation_coefficient_threshold(&self) -> f32 {
        f32::from(self.correlation_coefficient_threshold_raw) * THRESHOLD_SCALE
    }

    pub fn half_degree_azimuth(&self) -> bool {
        self.super_resolution_control & 0x01 != 0
    }

    pub fn quarter_km_reflectivity(&self) -> bool {
        self.super_resolution_control & 0x02 != 0
    }

    pub fn doppler_to_300km(&self) -> bool {
        self.super_resolution_control & 0x04 != 0
    }

    pub fn dual_polarization_to_300km(&self) -> bool {
        self.super_resolution_control & 0x08 != 0
    }

    pub fn sails_cut(&self) -> bool {
        self.supplemental_data & 0x0001 != 0
    }

    pub fn sails_sequence_number(&self) -> u8 {
        ((self.supplemental_data & 0x000E) >> 1) as u8
    }

    pub fn mrle_cut(&self) -> bool {
        self.supplemental_data & 0x0010 != 0
    }

    pub fn mrle_sequence_number(&self) -> u8 {
        ((self.supplemental_data & 0x00E0) >> 5) as u8
    }

    pub fn mpda_cut(&self) -> bool {
        self.supplemental_data & 0x0200 != 0
    }

    pub fn base_tilt_cut(&self) -> bool {
        self.supplemental_data & 0x0400 != 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeCoveragePatternData {
    /// Size of the pattern in halfwords
    pub message_size: u16,
    pub pattern_type: u16,
    pub pattern_number: u16,
    pub number_of_elevation_cuts: u16,
    pub version: u8,
    pub clutter_map_group_number: u8,
    pub doppler_velocity_resolution_raw: u8,
    pub pulse_width_raw: u8,
    pub vcp_sequencing: u16,
    pub vcp_supplemental_data: u16,
    pub elevation_cuts: Vec<ElevationCut>,
}

impl VolumeCoveragePatternData {
    /// Parses a pattern. With `strict_size` a disagreement between the
    /// size field and the cuts read is an error; otherwise it is logged.
    pub fn parse(c: &mut Cursor, strict_size: bool) -> DecodeResult<Self> {
        let start = c.position();

        let message_size = c.read_u16()?;
        let pattern_type = c.read_u16()?;
        let pattern_number = c.read_u16()?;
        let number_of_elevation_cuts = c.read_u16()?;
        let version = c.read_u8()?;
        let clutter_map_group_number = c.read_u8()?;
        let doppler_velocity_resolution_raw = c.read_u8()?;
        let pulse_width_raw = c.read_u8()?;
        c.skip(4)?;
        let vcp_sequencing = c.read_u16()?;
        let vcp_supplemental_data = c.read_u16()?;
        c.skip(2)?;

        if !(MIN_MESSAGE_SIZE..=MAX_MESSAGE_SIZE).contains(&message_size) {
            warn!(message_size, "Invalid VCP message size");
            return Err(DecodeError::invalid_field("VCP message size", message_size));
        }
        if !(1..=MAX_ELEVATION_CUTS).contains(&number_of_elevation_cuts) {
            warn!(cuts = number_of_elevation_cuts, "Invalid number of elevation cuts");
            return Err(DecodeError::invalid_field(
                "number of elevation cuts",
                number_of_elevation_cuts,
            ));
        }

        let elevation_cuts = (0..number_of_elevation_cuts)
            .map(|_| ElevationCut::parse(c))
            .collect::<DecodeResult<Vec<_>>>()?;

        let consumed = c.position() - start;
        let declared = usize::from(message_size) * 2;
        if consumed != declared {
            warn!(
                declared,
                consumed,
                pattern = pattern_number,
                "VCP size does not match elevation cuts"
            );
            if strict_size {
                return Err(DecodeError::SizeMismatch { declared, consumed });
            }
        }

        trace!(
            pattern = pattern_number,
            cuts = elevation_cuts.len(),
            "Parsed volume coverage pattern"
        );

        Ok(Self {
            message_size,
            pattern_type,
            pattern_number,
            number_of_elevation_cuts,
            version,
            clutter_map_group_number,
            doppler_velocity_resolution_raw,
            pulse_width_raw,
            vcp_sequencing,
            vcp_supplemental_data,
            elevation_cuts,
        })
    }

    /// Encoded size of a pattern with `cuts` elevation cuts, bytes.
    pub fn encoded_len(cuts: usize) -> usize {
        VCP_HEADER_SIZE + cuts * ELEVATION_CUT_SIZE
    }

    /// Doppler velocity resolution in m/s, or `None` for unknown codes.
    pub fn doppler_velocity_resolution(&self) -> Option<f32> {
        match self.doppler_velocity_resolution_raw {
            2 => Some(0.5),
            4 => Some(1.0),
            _ => None,
        }
    }

    pub fn is_long_pulse(&self) -> bool {
        self.pulse_width_raw == 4
    }

    pub fn number_of_elevations(&self) -> u8 {
        (self.vcp_sequencing & 0x001F) as u8
    }

    pub fn maximum_sails_cuts(&self) -> u8 {
        ((self.vcp_sequencing & 0x0060) >> 5) as u8
    }

    pub fn sequence_active(&self) -> bool {
        self.vcp_sequencing & 0x2000 != 0
    }

    pub fn truncated_vcp(&self) -> bool {
        self.vcp_sequencing & 0x4000 != 0
    }

    pub fn sails_vcp(&self) -> bool {
        self.vcp_supplemental_data & 0x0001 != 0
    }

    pub fn number_of_sails_cuts(&self) -> u8 {
        ((self.vcp_supplemental_data & 0x000E) >> 1) as u8
    }

    pub fn mrle_vcp(&self) -> bool {
        self.vcp_supplemental_data & 0x0010 != 0
    }

    pub fn number_of_mrle_cuts(&self) -> u8 {
        ((self.vcp_supplemental_data & 0x00E0) >> 5) as u8
    }

    pub fn mpda_vcp(&self) -> bool {
        self.vcp_supplemental_data & 0x0800 != 0
    }

    pub fn base_tilt_vcp(&self) -> bool {
        self.vcp_supplemental_data & 0x1000 != 0
    }

    pub fn number_of_base_tilts(&self) -> u8 {
        ((self.vcp_supplemental_data & 0xE000) >> 13) as u8
    }
}
