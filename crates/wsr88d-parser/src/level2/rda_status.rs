//! RDA Status Data (message type 2).
//!
//! Sixty halfwords describing the RDA's operating state. Status words are
//! bit sets and are kept raw; calibration corrections are signed hundredths
//! of a dB.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::trace;

use crate::cursor::Cursor;
use crate::error::DecodeResult;
use crate::header::julian_to_datetime;

/// Length of the record in bytes.
pub const RDA_STATUS_DATA_SIZE: usize = 120;

pub const NUM_ALARM_CODES: usize = 14;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RdaStatusData {
    pub rda_status: u16,
    pub operability_status: u16,
    pub control_status: u16,
    pub auxiliary_power_generator_state: u16,
    /// Watts
    pub average_transmitter_power: u16,
    /// 0.01 dB
    pub horizontal_reflectivity_calibration_correction: i16,
    pub data_transmission_enabled: u16,
    /// Negative when the pattern is a local one
    pub volume_coverage_pattern_number: i16,
    pub rda_control_authorization: u16,
    pub rda_build_number: u16,
    pub operational_mode: u16,
    pub super_resolution_status: u16,
    pub clutter_mitigation_decision_status: u16,
    pub avset_ebc_rda_log_data_status: u16,
    pub rda_alarm_summary: u16,
    pub command_acknowledgement: u16,
    pub channel_control_status: u16,
    pub spot_blanking_status: u16,
    pub bypass_map_generation_date: u16,
    /// Minutes past midnight
    pub bypass_map_generation_time: u16,
    pub clutter_filter_map_generation_date: u16,
    /// Minutes past midnight
    pub clutter_filter_map_generation_time: u16,
    /// 0.01 dB
    pub vertical_reflectivity_calibration_correction: i16,
    pub transition_power_source_status: u16,
    pub rms_control_status: u16,
    pub performance_check_status: u16,
    pub alarm_codes: [u16; NUM_ALARM_CODES],
    pub signal_processing_options: u16,
    pub status_version: u16,
}

impl RdaStatusData {
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let start = c.position();
        let mut d = Self {
            rda_status: c.read_u16()?,
            operability_status: c.read_u16()?,
            control_status: c.read_u16()?,
            auxiliary_power_generator_state: c.read_u16()?,
            average_transmitter_power: c.read_u16()?,
            horizontal_reflectivity_calibration_correction: c.read_i16()?,
            data_transmission_enabled: c.read_u16()?,
            volume_coverage_pattern_number: c.read_i16()?,
            rda_control_authorization: c.read_u16()?,
            rda_build_number: c.read_u16()?,
            operational_mode: c.read_u16()?,
            super_resolution_status: c.read_u16()?,
            clutter_mitigation_decision_status: c.read_u16()?,
            avset_ebc_rda_log_data_status: c.read_u16()?,
            rda_alarm_summary: c.read_u16()?,
            command_acknowledgement: c.read_u16()?,
            channel_control_status: c.read_u16()?,
            spot_blanking_status: c.read_u16()?,
            bypass_map_generation_date: c.read_u16()?,
            bypass_map_generation_time: c.read_u16()?,
            clutter_filter_map_generation_date: c.read_u16()?,
            clutter_filter_map_generation_time: c.read_u16()?,
            vertical_reflectivity_calibration_correction: c.read_i16()?,
            transition_power_source_status: c.read_u16()?,
            rms_control_status: c.read_u16()?,
            performance_check_status: c.read_u16()?,
            ..Self::default()
        };
        for code in d.alarm_codes.iter_mut() {
            *code = c.read_u16()?;
        }
        d.signal_processing_options = c.read_u16()?;
        c.skip(36)?;
        d.status_version = c.read_u16()?;

        trace!(
            status = d.rda_status,
            vcp = d.volume_coverage_pattern_number,
            size = c.position() - start,
            "Parsed RDA status data"
        );
        Ok(d)
    }

    pub fn horizontal_reflectivity_calibration_correction_db(&self) -> f32 {
        f32::from(self.horizontal_reflectivity_calibration_correction) * 0.01
    }

    pub fn vertical_reflectivity_calibration_correction_db(&self) -> f32 {
        f32::from(self.vertical_reflectivity_calibration_correction) * 0.01
    }

    /// Alarm codes that are set, in message order.
    pub fn active_alarms(&self) -> impl Iterator<Item = u16> + '_ {
        self.alarm_codes.iter().copied().filter(|&code| code != 0)
    }

    pub fn bypass_map_generation(&self) -> Option<DateTime<Utc>> {
        map_generation_time(self.bypass_map_generation_date, self.bypass_map_generation_time)
    }

    pub fn clutter_filter_map_generation(&self) -> Option<DateTime<Utc>> {
        map_generation_time(
            self.clutter_filter_map_generation_date,
            self.clutter_filter_map_generation_time,
        )
    }
}

/// Julian date and minutes past midnight, as used by clutter map stamps.
pub(crate) fn map_generation_time(date: u16, minutes: u16) -> Option<DateTime<Utc>> {
    if date == 0 {
        return None;
    }
    julian_to_datetime(date, u32::from(minutes) * 60_000)
}
