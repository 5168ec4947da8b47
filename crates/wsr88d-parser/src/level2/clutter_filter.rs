//! Clutter Filter Bypass Map (message type 13) and Clutter Filter Map
//! (message type 15).
//!
//! Both start with a generation date and time and a count of elevation
//! segments (1..=5). The bypass map then holds one bit per range bin for
//! each of 360 radials; the filter map holds, for each of 360 azimuth
//! segments, a list of range zones with an operator-select code. Both are
//! normally sent as segmented messages.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{trace, warn};

use super::rda_status::map_generation_time;
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

pub const NUM_RADIALS: usize = 360;
pub const NUM_RANGE_BINS: usize = 512;
/// Range bins are packed sixteen to a halfword, first bin in the high bit.
pub const NUM_CODED_RANGE_BINS: usize = NUM_RANGE_BINS / 16;
pub const NUM_AZIMUTH_SEGMENTS: usize = 360;

const MAX_ELEVATION_SEGMENTS: u16 = 5;
const MAX_RANGE_ZONES: u16 = 20;
const MAX_END_RANGE: u16 = 511;
const MINUTES_PER_DAY: u16 = 1440;

/// Reads and checks the date, time and segment count shared by both maps.
fn parse_map_header(c: &mut Cursor, map: &'static str) -> DecodeResult<(u16, u16, u16)> {
    let date = c.read_u16()?;
    let time = c.read_u16()?;
    let segments = c.read_u16()?;

    if date < 1 {
        warn!(map, date, "Invalid map generation date");
        return Err(DecodeError::invalid_field("map generation date", date));
    }
    if time > MINUTES_PER_DAY {
        warn!(map, time, "Invalid map generation time");
        return Err(DecodeError::invalid_field("map generation time", time));
    }
    if !(1..=MAX_ELEVATION_SEGMENTS).contains(&segments) {
        warn!(map, segments, "Invalid number of elevation segments");
        return Err(DecodeError::invalid_field("number of elevation segments", segments));
    }
    Ok((date, time, segments))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BypassMapSegment {
    pub segment_number: u16,
    /// `NUM_RADIALS` radials of `NUM_CODED_RANGE_BINS` halfwords
    pub range_bins: Vec<[u16; NUM_CODED_RANGE_BINS]>,
}

impl BypassMapSegment {
    /// Whether clutter filtering is bypassed (bit set) for a range bin.
    pub fn is_bypassed(&self, radial: usize, bin: usize) -> Option<bool> {
        if bin >= NUM_RANGE_BINS {
            return None;
        }
        let word = self.range_bins.get(radial)?[bin / 16];
        Some(word & (0x8000 >> (bin % 16)) != 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClutterFilterBypassMap {
    /// Julian date
    pub map_generation_date: u16,
    /// Minutes past midnight
    pub map_generation_time: u16,
    pub segments: Vec<BypassMapSegment>,
}

impl ClutterFilterBypassMap {
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let (map_generation_date, map_generation_time, count) =
            parse_map_header(c, "clutter filter bypass map")?;

        let mut segments = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            let segment_number = c.read_u16()?;
            let mut range_bins = Vec::with_capacity(NUM_RADIALS);
            for _ in 0..NUM_RADIALS {
                let mut radial = [0u16; NUM_CODED_RANGE_BINS];
                for word in radial.iter_mut() {
                    *word = c.read_u16()?;
                }
                range_bins.push(radial);
            }
            segments.push(BypassMapSegment {
                segment_number,
                range_bins,
            });
        }

        trace!(segments = segments.len(), "Parsed clutter filter bypass map");
        Ok(Self {
            map_generation_date,
            map_generation_time,
            segments,
        })
    }

    pub fn number_of_elevation_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn generation_time(&self) -> Option<DateTime<Utc>> {
        map_generation_time(self.map_generation_date, self.map_generation_time)
    }
}

/// Clutter filter selection for a range zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpCode {
    BypassFilterForced,
    BypassMapInControl,
    ClutterFilteringForced,
}

impl OpCode {
    fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(OpCode::BypassFilterForced),
            1 => Some(OpCode::BypassMapInControl),
            2 => Some(OpCode::ClutterFilteringForced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeZone {
    pub op_code: OpCode,
    /// Kilometers
    pub end_range: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClutterFilterMap {
    /// Julian date
    pub map_generation_date: u16,
    /// Minutes past midnight
    pub map_generation_time: u16,
    /// Per elevation segment, `NUM_AZIMUTH_SEGMENTS` lists of range zones
    pub range_zones: Vec<Vec<Vec<RangeZone>>>,
}

impl ClutterFilterMap {
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let (map_generation_date, map_generation_time, count) =
            parse_map_header(c, "clutter filter map")?;

        let mut range_zones = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            let mut azimuths = Vec::with_capacity(NUM_AZIMUTH_SEGMENTS);
            for _ in 0..NUM_AZIMUTH_SEGMENTS {
                let zone_count = c.read_u16()?;
                if !(1..=MAX_RANGE_ZONES).contains(&zone_count) {
                    warn!(zones = zone_count, "Invalid number of range zones");
                    return Err(DecodeError::invalid_field("number of range zones", zone_count));
                }

                let mut zones = Vec::with_capacity(usize::from(zone_count));
                for _ in 0..zone_count {
                    let code = c.read_u16()?;
                    let end_range = c.read_u16()?;
                    let Some(op_code) = OpCode::from_code(code) else {
                        warn!(op_code = code, "Invalid op code");
                        return Err(DecodeError::invalid_discriminator("op code", code));
                    };
                    if end_range > MAX_END_RANGE {
                        warn!(end_range, "Invalid end range");
                        return Err(DecodeError::invalid_field("end range", end_range));
                    }
                    zones.push(RangeZone { op_code, end_range });
                }
                azimuths.push(zones);
            }
            range_zones.push(azimuths);
        }

        trace!(segments = range_zones.len(), "Parsed clutter filter map");
        Ok(Self {
            map_generation_date,
            map_generation_time,
            range_zones,
        })
    }

    pub fn number_of_elevation_segments(&self) -> usize {
        self.range_zones.len()
    }

    pub fn generation_time(&self) -> Option<DateTime<Utc>> {
        map_generation_time(self.map_generation_date, self.map_generation_time)
    }

    /// Range zones of one elevation segment and azimuth segment.
    pub fn zones(&self, segment: usize, azimuth: usize) -> Option<&[RangeZone]> {
        self.range_zones.get(segment)?.get(azimuth).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bypass_bits_are_msb_first() {
        let mut radial = [0u16; NUM_CODED_RANGE_BINS];
        radial[0] = 0x8001;
        radial[31] = 0x0001;
        let segment = BypassMapSegment {
            segment_number: 1,
            range_bins: vec![radial],
        };

        assert_eq!(segment.is_bypassed(0, 0), Some(true));
        assert_eq!(segment.is_bypassed(0, 15), Some(true));
        assert_eq!(segment.is_bypassed(0, 14), Some(false));
        assert_eq!(segment.is_bypassed(0, 511), Some(true));
        assert_eq!(segment.is_bypassed(1, 0), None);
    }

    #[test]
    fn test_op_codes() {
        assert_eq!(OpCode::from_code(0), Some(OpCode::BypassFilterForced));
        assert_eq!(OpCode::from_code(1), Some(OpCode::BypassMapInControl));
        assert_eq!(OpCode::from_code(2), Some(OpCode::ClutterFilteringForced));
        assert_eq!(OpCode::from_code(3), None);
    }

    #[test]
    fn test_map_header_limits() {
        let header = |date: u16, time: u16, segments: u16| {
            let mut v = Vec::new();
            for word in [date, time, segments] {
                v.extend_from_slice(&word.to_be_bytes());
            }
            let mut c = Cursor::new(bytes::Bytes::from(v));
            parse_map_header(&mut c, "test map")
        };

        assert_eq!(header(19_000, 1440, 5).unwrap(), (19_000, 1440, 5));
        assert!(header(0, 60, 1).is_err());
        assert!(header(1, 1441, 1).is_err());
        assert!(header(1, 60, 0).is_err());
        assert!(header(1, 60, 6).is_err());
    }
}
