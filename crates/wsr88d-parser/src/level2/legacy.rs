//! Digital Radar Data (message type 1).
//!
//! The pre-dual-polarization radial format: a fixed 100-byte header with
//! byte pointers to up to three 8-bit arrays (reflectivity, velocity,
//! spectrum width).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{trace, warn};

use super::moment::MomentDataBlock;
use super::{MomentKind, RadialMoments};
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::header::julian_to_datetime;

/// Size of the fixed radial header in bytes.
pub const LEGACY_RADIAL_HEADER_SIZE: usize = 100;

/// Coded angle to degrees.
const CODED_ANGLE_SCALE: f32 = 180.0 / 32768.0;

const MAX_SURVEILLANCE_BINS: u16 = 460;
const MAX_DOPPLER_BINS: u16 = 920;

const REFLECTIVITY_SCALE: f32 = 2.0;
const REFLECTIVITY_OFFSET: f32 = 66.0;
const DOPPLER_OFFSET: f32 = 129.0;
const SPECTRUM_WIDTH_SCALE: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigitalRadarData {
    /// Milliseconds past midnight
    pub collection_time: u32,
    pub modified_julian_date: u16,
    /// Unambiguous range, 0.1 km
    pub unambiguous_range: u16,
    pub azimuth_angle_raw: u16,
    pub azimuth_number: u16,
    pub radial_status: u16,
    pub elevation_angle_raw: u16,
    pub elevation_number: u16,
    /// Range to the first surveillance gate, meters
    pub surveillance_range: i16,
    /// Range to the first Doppler gate, meters
    pub doppler_range: i16,
    /// Surveillance gate spacing, meters
    pub surveillance_interval: u16,
    /// Doppler gate spacing, meters
    pub doppler_interval: u16,
    pub number_of_surveillance_bins: u16,
    pub number_of_doppler_bins: u16,
    pub cut_sector_number: u16,
    pub calibration_constant: f32,
    pub surveillance_pointer: u16,
    pub velocity_pointer: u16,
    pub spectrum_width_pointer: u16,
    /// 2 = 0.5 m/s, 4 = 1.0 m/s
    pub doppler_velocity_resolution: u16,
    pub volume_coverage_pattern_number: u16,
    /// Nyquist velocity, 0.01 m/s
    pub nyquist_velocity: u16,
    /// Atmospheric attenuation, 0.001 dB/km
    pub atmos: i16,
    /// Threshold parameter, 0.1 dB
    pub tover: u16,
    pub radial_spot_blanking_status: u16,
    pub moments: BTreeMap<MomentKind, MomentDataBlock>,
}

fn check_pointer(field: &'static str, pointer: u16, max: u16) -> DecodeResult<()> {
    if pointer != 0 && !(100..=max).contains(&pointer) {
        warn!(field, pointer, "Invalid data pointer");
        return Err(DecodeError::invalid_field(field, pointer));
    }
    Ok(())
}

impl DigitalRadarData {
    /// Parses a legacy radial from a cursor positioned at the start of the
    /// message body.
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let start = c.position();

        let collection_time = c.read_u32()?;
        let modified_julian_date = c.read_u16()?;
        let unambiguous_range = c.read_u16()?;
        let azimuth_angle_raw = c.read_u16()?;
        let azimuth_number = c.read_u16()?;
        let radial_status = c.read_u16()?;
        let elevation_angle_raw = c.read_u16()?;
        let elevation_number = c.read_u16()?;
        let surveillance_range = c.read_i16()?;
        let doppler_range = c.read_i16()?;
        let surveillance_interval = c.read_u16()?;
        let doppler_interval = c.read_u16()?;
        let number_of_surveillance_bins = c.read_u16()?;
        let number_of_doppler_bins = c.read_u16()?;
        let cut_sector_number = c.read_u16()?;
        let calibration_constant = c.read_f32()?;
        let surveillance_pointer = c.read_u16()?;
        let velocity_pointer = c.read_u16()?;
        let spectrum_width_pointer = c.read_u16()?;
        let doppler_velocity_resolution = c.read_u16()?;
        let volume_coverage_pattern_number = c.read_u16()?;
        // Spare words and archive playback pointers
        c.skip(46)?;
        let nyquist_velocity = c.read_u16()?;
        let atmos = c.read_i16()?;
        let tover = c.read_u16()?;
        let radial_spot_blanking_status = c.read_u16()?;

        if !(1..=400).contains(&azimuth_number) {
            warn!(azimuth_number, "Invalid azimuth number");
            return Err(DecodeError::invalid_field("azimuth number", azimuth_number));
        }
        if !(1..=25).contains(&elevation_number) {
            warn!(elevation_number, "Invalid elevation number");
            return Err(DecodeError::invalid_field("elevation number", elevation_number));
        }
        if number_of_surveillance_bins > MAX_SURVEILLANCE_BINS {
            warn!(bins = number_of_surveillance_bins, "Invalid number of surveillance bins");
            return Err(DecodeError::invalid_field(
                "number of surveillance bins",
                number_of_surveillance_bins,
            ));
        }
        if number_of_doppler_bins > MAX_DOPPLER_BINS {
            warn!(bins = number_of_doppler_bins, "Invalid number of doppler bins");
            return Err(DecodeError::invalid_field(
                "number of doppler bins",
                number_of_doppler_bins,
            ));
        }
        check_pointer("surveillance pointer", surveillance_pointer, 560)?;
        check_pointer("velocity pointer", velocity_pointer, 1480)?;
        check_pointer("spectrum width pointer", spectrum_width_pointer, 1480)?;

        let velocity_scale = match doppler_velocity_resolution {
            2 => 2.0,
            4 => 1.0,
            other => {
                if velocity_pointer != 0 {
                    warn!(resolution = other, "Invalid doppler velocity resolution");
                    return Err(DecodeError::invalid_discriminator(
                        "doppler velocity resolution",
                        other,
                    ));
                }
                2.0
            }
        };

        let mut moments = BTreeMap::new();
        let mut end = c.position();

        let arrays = [
            (
                MomentKind::Reflectivity,
                surveillance_pointer,
                number_of_surveillance_bins,
                surveillance_range,
                surveillance_interval,
                REFLECTIVITY_SCALE,
                REFLECTIVITY_OFFSET,
            ),
            (
                MomentKind::Velocity,
                velocity_pointer,
                number_of_doppler_bins,
                doppler_range,
                doppler_interval,
                velocity_scale,
                DOPPLER_OFFSET,
            ),
            (
                MomentKind::SpectrumWidth,
                spectrum_width_pointer,
                number_of_doppler_bins,
                doppler_range,
                doppler_interval,
                SPECTRUM_WIDTH_SCALE,
                DOPPLER_OFFSET,
            ),
        ];

        for (kind, pointer, bins, range, interval, scale, offset) in arrays {
            if pointer == 0 {
                continue;
            }
            c.seek(start + usize::from(pointer))?;
            let raw = c.read_bytes(usize::from(bins))?.to_vec();
            moments.insert(
                kind,
                MomentDataBlock::from_legacy(kind, range, interval, raw, scale, offset),
            );
            end = end.max(c.position());
        }
        c.seek(end)?;

        trace!(
            azimuth = azimuth_number,
            elevation = elevation_number,
            moments = moments.len(),
            "Parsed digital radar data"
        );

        Ok(Self {
            collection_time,
            modified_julian_date,
            unambiguous_range,
            azimuth_angle_raw,
            azimuth_number,
            radial_status,
            elevation_angle_raw,
            elevation_number,
            surveillance_range,
            doppler_range,
            surveillance_interval,
            doppler_interval,
            number_of_surveillance_bins,
            number_of_doppler_bins,
            cut_sector_number,
            calibration_constant,
            surveillance_pointer,
            velocity_pointer,
            spectrum_width_pointer,
            doppler_velocity_resolution,
            volume_coverage_pattern_number,
            nyquist_velocity,
            atmos,
            tover,
            radial_spot_blanking_status,
            moments,
        })
    }

    pub fn unambiguous_range_km(&self) -> f32 {
        f32::from(self.unambiguous_range) * 0.1
    }

    pub fn nyquist_velocity_ms(&self) -> f32 {
        f32::from(self.nyquist_velocity) * 0.01
    }

    pub fn atmos_db_per_km(&self) -> f32 {
        f32::from(self.atmos) * 0.001
    }
}

impl RadialMoments for DigitalRadarData {
    fn azimuth_angle(&self) -> f32 {
        f32::from(self.azimuth_angle_raw) * CODED_ANGLE_SCALE
    }

    fn azimuth_number(&self) -> u16 {
        self.azimuth_number
    }

    fn elevation_angle(&self) -> f32 {
        f32::from(self.elevation_angle_raw) * CODED_ANGLE_SCALE
    }

    fn elevation_number(&self) -> u16 {
        self.elevation_number
    }

    fn collection_time(&self) -> Option<DateTime<Utc>> {
        julian_to_datetime(self.modified_julian_date, self.collection_time)
    }

    fn moment(&self, kind: MomentKind) -> Option<&MomentDataBlock> {
        self.moments.get(&kind)
    }
}
