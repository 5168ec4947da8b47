//! Generic Digital Radar Data (message type 31).
//!
//! A 32-byte radial header is followed by a table of 32-bit pointers, each
//! giving the offset (from the start of the message body) of a named data
//! block. Blocks are parsed by seeking to each pointer in turn.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{trace, warn};

use super::moment::MomentDataBlock;
use super::{DataBlockType, MomentKind, RadialMoments};
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::header::julian_to_datetime;

/// Size of the fixed radial header preceding the pointer table.
pub const GENERIC_RADIAL_HEADER_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeDataBlock {
    pub lrtup: u16,
    pub version_number_major: u8,
    pub version_number_minor: u8,
    pub latitude: f32,
    pub longitude: f32,
    /// Site height above sea level, meters
    pub site_height: i16,
    /// Feedhorn height above ground, meters
    pub feedhorn_height: u16,
    pub calibration_constant: f32,
    pub horizontal_shv_tx_power: f32,
    pub vertical_shv_tx_power: f32,
    pub system_differential_reflectivity: f32,
    pub initial_system_differential_phase: f32,
    pub volume_coverage_pattern_number: u16,
    pub processing_status: u16,
}

impl VolumeDataBlock {
    fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        Ok(Self {
            lrtup: c.read_u16()?,
            version_number_major: c.read_u8()?,
            version_number_minor: c.read_u8()?,
            latitude: c.read_f32()?,
            longitude: c.read_f32()?,
            site_height: c.read_i16()?,
            feedhorn_height: c.read_u16()?,
            calibration_constant: c.read_f32()?,
            horizontal_shv_tx_power: c.read_f32()?,
            vertical_shv_tx_power: c.read_f32()?,
            system_differential_reflectivity: c.read_f32()?,
            initial_system_differential_phase: c.read_f32()?,
            volume_coverage_pattern_number: c.read_u16()?,
            processing_status: c.read_u16()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElevationDataBlock {
    pub lrtup: u16,
    /// Atmospheric attenuation, 0.001 dB/km
    pub atmos: i16,
    pub calibration_constant: f32,
}

impl ElevationDataBlock {
    fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        Ok(Self {
            lrtup: c.read_u16()?,
            atmos: c.read_i16()?,
            calibration_constant: c.read_f32()?,
        })
    }

    pub fn atmos_db_per_km(&self) -> f32 {
        f32::from(self.atmos) * 0.001
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialDataBlock {
    pub lrtup: u16,
    /// Unambiguous range, 0.1 km
    pub unambiguous_range: u16,
    pub noise_level_horizontal: f32,
    pub noise_level_vertical: f32,
    /// Nyquist velocity, 0.01 m/s
    pub nyquist_velocity: u16,
    pub radial_flags: u16,
    pub calibration_constant_horizontal: f32,
    pub calibration_constant_vertical: f32,
}

impl RadialDataBlock {
    fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        Ok(Self {
            lrtup: c.read_u16()?,
            unambiguous_range: c.read_u16()?,
            noise_level_horizontal: c.read_f32()?,
            noise_level_vertical: c.read_f32()?,
            nyquist_velocity: c.read_u16()?,
            radial_flags: c.read_u16()?,
            calibration_constant_horizontal: c.read_f32()?,
            calibration_constant_vertical: c.read_f32()?,
        })
    }

    pub fn unambiguous_range_km(&self) -> f32 {
        f32::from(self.unambiguous_range) * 0.1
    }

    pub fn nyquist_velocity_ms(&self) -> f32 {
        f32::from(self.nyquist_velocity) * 0.01
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigitalRadarDataGeneric {
    pub radar_identifier: String,
    /// Milliseconds past midnight
    pub collection_time: u32,
    pub modified_julian_date: u16,
    pub azimuth_number: u16,
    pub azimuth_angle: f32,
    pub compression_indicator: u8,
    pub radial_length: u16,
    pub azimuth_resolution_spacing: u8,
    pub radial_status: u8,
    pub elevation_number: u8,
    pub cut_sector_number: u8,
    pub elevation_angle: f32,
    pub radial_spot_blanking_status: u8,
    pub azimuth_indexing_mode: u8,
    pub data_block_count: u16,
    pub data_block_pointers: Vec<u32>,
    pub volume: Option<VolumeDataBlock>,
    pub elevation: Option<ElevationDataBlock>,
    pub radial: Option<RadialDataBlock>,
    pub moments: BTreeMap<MomentKind, MomentDataBlock>,
}

impl DigitalRadarDataGeneric {
    /// Parses a generic radial from a cursor positioned at the start of the
    /// message body. On return the cursor sits at the end of the furthest
    /// block read.
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let start = c.position();

        let radar_identifier = c.read_string(4)?;
        let collection_time = c.read_u32()?;
        let modified_julian_date = c.read_u16()?;
        let azimuth_number = c.read_u16()?;
        let azimuth_angle = c.read_f32()?;
        let compression_indicator = c.read_u8()?;
        c.skip(1)?;
        let radial_length = c.read_u16()?;
        let azimuth_resolution_spacing = c.read_u8()?;
        let radial_status = c.read_u8()?;
        let elevation_number = c.read_u8()?;
        let cut_sector_number = c.read_u8()?;
        let elevation_angle = c.read_f32()?;
        let radial_spot_blanking_status = c.read_u8()?;
        let azimuth_indexing_mode = c.read_u8()?;
        let data_block_count = c.read_u16()?;

        if !(1..=720).contains(&azimuth_number) {
            warn!(azimuth_number, "Invalid azimuth number");
            return Err(DecodeError::invalid_field("azimuth number", azimuth_number));
        }
        if !(1..=32).contains(&elevation_number) {
            warn!(elevation_number, "Invalid elevation number");
            return Err(DecodeError::invalid_field("elevation number", elevation_number));
        }
        if !(4..=10).contains(&data_block_count) {
            warn!(data_block_count, "Invalid number of data blocks");
            return Err(DecodeError::invalid_field("data block count", data_block_count));
        }
        if compression_indicator != 0 {
            warn!(compression_indicator, "Compression not supported");
            return Err(DecodeError::unsupported(format!(
                "generic radial compression indicator {}",
                compression_indicator
            )));
        }

        let data_block_pointers = c.read_u32_array(usize::from(data_block_count))?;

        let mut message = Self {
            radar_identifier,
            collection_time,
            modified_julian_date,
            azimuth_number,
            azimuth_angle,
            compression_indicator,
            radial_length,
            azimuth_resolution_spacing,
            radial_status,
            elevation_number,
            cut_sector_number,
            elevation_angle,
            radial_spot_blanking_status,
            azimuth_indexing_mode,
            data_block_count,
            data_block_pointers: Vec::new(),
            volume: None,
            elevation: None,
            radial: None,
            moments: BTreeMap::new(),
        };

        let mut end = c.position();
        for &pointer in &data_block_pointers {
            c.seek(start + pointer as usize)?;
            let _block_type = c.read_u8()?;
            let name = c.read_string(3)?;

            match DataBlockType::from_name(&name) {
                Some(DataBlockType::Volume) => {
                    message.volume = Some(VolumeDataBlock::parse(c)?);
                }
                Some(DataBlockType::Elevation) => {
                    message.elevation = Some(ElevationDataBlock::parse(c)?);
                }
                Some(DataBlockType::Radial) => {
                    message.radial = Some(RadialDataBlock::parse(c)?);
                }
                Some(DataBlockType::Moment(kind)) => {
                    let block = MomentDataBlock::parse(c, kind)?;
                    if message.moments.insert(kind, block).is_some() {
                        warn!(moment = kind.name(), pointer, "Duplicate moment block replaced");
                    }
                }
                None => {
                    warn!(name = %name, pointer, "Unknown data block");
                }
            }
            end = end.max(c.position());
        }
        c.seek(end)?;

        message.data_block_pointers = data_block_pointers;
        trace!(
            radar = %message.radar_identifier,
            azimuth = message.azimuth_angle,
            elevation = message.elevation_number,
            moments = message.moments.len(),
            "Parsed generic radial"
        );
        Ok(message)
    }

    /// Azimuth spacing in degrees (0.5 or 1.0), or `None` for unknown codes.
    pub fn azimuth_resolution(&self) -> Option<f32> {
        match self.azimuth_resolution_spacing {
            1 => Some(0.5),
            2 => Some(1.0),
            _ => None,
        }
    }

    /// Volume coverage pattern number from the volume block, if present.
    pub fn volume_coverage_pattern_number(&self) -> Option<u16> {
        self.volume.as_ref().map(|v| v.volume_coverage_pattern_number)
    }
}

impl RadialMoments for DigitalRadarDataGeneric {
    fn azimuth_angle(&self) -> f32 {
        self.azimuth_angle
    }

    fn azimuth_number(&self) -> u16 {
        self.azimuth_number
    }

    fn elevation_angle(&self) -> f32 {
        self.elevation_angle
    }

    fn elevation_number(&self) -> u16 {
        u16::from(self.elevation_number)
    }

    fn collection_time(&self) -> Option<DateTime<Utc>> {
        julian_to_datetime(self.modified_julian_date, self.collection_time)
    }

    fn moment(&self, kind: MomentKind) -> Option<&MomentDataBlock> {
        self.moments.get(&kind)
    }
}
