//! General Status Message (message code 2).
//!
//! A fixed 182-byte block following the message header that reports RDA and
//! RPG state, the current VCP and its elevation angles.

use serde::Serialize;
use tracing::{trace, warn};

use super::header::Level3MessageHeader;
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

pub const GENERAL_STATUS_MESSAGE_CODE: i16 = 2;

/// Length of the block in bytes.
pub const GENERAL_STATUS_BLOCK_SIZE: usize = 182;

/// Elevation slots in the block: twenty in the first group, five appended
/// after the build version.
pub const MAX_ELEVATION_CUTS: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneralStatusMessage {
    pub header: Level3MessageHeader,
    pub block_divider: i16,
    pub length_of_block: u16,
    pub mode_of_operation: u16,
    pub rda_operability_status: u16,
    pub volume_coverage_pattern: u16,
    pub number_of_elevation_cuts: u16,
    /// Elevation angles, 0.1 degrees
    pub elevation: [i16; MAX_ELEVATION_CUTS],
    pub rda_status: u16,
    pub rda_alarms: u16,
    pub data_transmission_enabled: u16,
    pub rpg_operability_status: u16,
    pub rpg_alarms: u16,
    pub rpg_status: u16,
    pub rpg_narrowband_status: u16,
    /// 0.25 dB
    pub horizontal_reflectivity_calibration_correction: i16,
    pub product_availability: u16,
    /// Bit per elevation cut
    pub super_resolution_elevation_cuts: u16,
    pub clutter_mitigation_decision_status: u16,
    /// 0.25 dB
    pub vertical_reflectivity_calibration_correction: i16,
    pub rda_build_number: u16,
    pub rda_channel_number: u16,
    pub build_version: u16,
    pub vcp_supplemental_data: u16,
    pub supplemental_cut_map: u32,
}

impl GeneralStatusMessage {
    /// Parses the status block. The cursor must sit just past `header`.
    pub fn parse(c: &mut Cursor, header: Level3MessageHeader) -> DecodeResult<Self> {
        let start = c.position();

        let block_divider = c.read_i16()?;
        if block_divider != -1 {
            warn!(divider = block_divider, "Invalid general status block divider");
            return Err(DecodeError::invalid_field("general status block divider", block_divider));
        }
        let length_of_block = c.read_u16()?;
        let mode_of_operation = c.read_u16()?;
        let rda_operability_status = c.read_u16()?;
        let volume_coverage_pattern = c.read_u16()?;
        let number_of_elevation_cuts = c.read_u16()?;

        let mut elevation = [0i16; MAX_ELEVATION_CUTS];
        for e in elevation.iter_mut().take(20) {
            *e = c.read_i16()?;
        }

        let rda_status = c.read_u16()?;
        let rda_alarms = c.read_u16()?;
        let data_transmission_enabled = c.read_u16()?;
        let rpg_operability_status = c.read_u16()?;
        let rpg_alarms = c.read_u16()?;
        let rpg_status = c.read_u16()?;
        let rpg_narrowband_status = c.read_u16()?;
        let horizontal_reflectivity_calibration_correction = c.read_i16()?;
        let product_availability = c.read_u16()?;
        let super_resolution_elevation_cuts = c.read_u16()?;
        let clutter_mitigation_decision_status = c.read_u16()?;
        let vertical_reflectivity_calibration_correction = c.read_i16()?;
        let rda_build_number = c.read_u16()?;
        let rda_channel_number = c.read_u16()?;
        c.skip(4)?;
        let build_version = c.read_u16()?;
        for e in elevation.iter_mut().skip(20) {
            *e = c.read_i16()?;
        }
        let vcp_supplemental_data = c.read_u16()?;
        let supplemental_cut_map = c.read_u32()?;
        c.skip(80)?;

        if usize::from(number_of_elevation_cuts) > MAX_ELEVATION_CUTS {
            warn!(cuts = number_of_elevation_cuts, "Elevation cut count exceeds the block");
        }
        trace!(
            vcp = volume_coverage_pattern,
            cuts = number_of_elevation_cuts,
            size = c.position() - start,
            "Parsed general status message"
        );

        Ok(Self {
            header,
            block_divider,
            length_of_block,
            mode_of_operation,
            rda_operability_status,
            volume_coverage_pattern,
            number_of_elevation_cuts,
            elevation,
            rda_status,
            rda_alarms,
            data_transmission_enabled,
            rpg_operability_status,
            rpg_alarms,
            rpg_status,
            rpg_narrowband_status,
            horizontal_reflectivity_calibration_correction,
            product_availability,
            super_resolution_elevation_cuts,
            clutter_mitigation_decision_status,
            vertical_reflectivity_calibration_correction,
            rda_build_number,
            rda_channel_number,
            build_version,
            vcp_supplemental_data,
            supplemental_cut_map,
        })
    }

    /// Elevation angles of the cuts in use, degrees.
    pub fn elevation_angles(&self) -> Vec<f32> {
        let count = usize::from(self.number_of_elevation_cuts).min(MAX_ELEVATION_CUTS);
        self.elevation[..count]
            .iter()
            .map(|&e| f32::from(e) * 0.1)
            .collect()
    }

    pub fn horizontal_reflectivity_calibration_correction_db(&self) -> f32 {
        f32::from(self.horizontal_reflectivity_calibration_correction) * 0.25
    }

    pub fn vertical_reflectivity_calibration_correction_db(&self) -> f32 {
        f32::from(self.vertical_reflectivity_calibration_correction) * 0.25
    }

    /// Whether the 1-based elevation cut is a super-resolution cut.
    pub fn is_super_resolution_cut(&self, cut: u16) -> bool {
        (1..=16).contains(&cut) && self.super_resolution_elevation_cuts & (1 << (cut - 1)) != 0
    }
}
