//! Product Description Block.
//!
//! Follows the Level III message header in every graphic product. Besides
//! radar and scan metadata it carries ten product-dependent parameters and
//! sixteen "data level" halfwords (halfwords 31-46 of the message) whose
//! meaning depends on the product code. All interpretation goes through the
//! rule resolved by [`product_rule`].

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::warn;

use super::tables::{
    coded_level, decode_coded_value, decode_custom_float, hydrometeor_class, product_rule,
    supports_compression, CodeRule, DataLevelCode, LevelsRule, ProductRule, ScaleRule, Threshold,
};
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::header::julian_to_datetime;

/// Size of the product description block in bytes.
pub const PRODUCT_DESCRIPTION_BLOCK_SIZE: usize = 102;

/// Message halfword holding the first data-level threshold.
const FIRST_DATA_LEVEL_HALFWORD: usize = 31;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDescriptionBlock {
    pub block_divider: i16,
    /// Radar latitude, 0.001 degrees
    pub latitude_of_radar: i32,
    /// Radar longitude, 0.001 degrees
    pub longitude_of_radar: i32,
    /// Radar height above sea level, feet
    pub height_of_radar: i16,
    pub product_code: i16,
    pub operational_mode: u16,
    pub volume_coverage_pattern: u16,
    pub sequence_number: i16,
    pub volume_scan_number: u16,
    pub volume_scan_date: u16,
    /// Seconds past midnight
    pub volume_scan_start_time: u32,
    pub generation_date_of_product: u16,
    /// Seconds past midnight
    pub generation_time_of_product: u32,
    pub elevation_number: u16,
    /// Product-dependent parameters 1-10
    pub parameters: [u16; 10],
    /// Product-dependent halfwords 31-46
    pub data_level_halfwords: [u16; 16],
    pub version: u8,
    pub spot_blank: u8,
    /// Halfword offsets from the start of the message
    pub offset_to_symbology: u32,
    pub offset_to_graphic: u32,
    pub offset_to_tabular: u32,
}

impl ProductDescriptionBlock {
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let block_divider = c.read_i16()?;
        let latitude_of_radar = c.read_i32()?;
        let longitude_of_radar = c.read_i32()?;
        let height_of_radar = c.read_i16()?;
        let product_code = c.read_i16()?;
        let operational_mode = c.read_u16()?;
        let volume_coverage_pattern = c.read_u16()?;
        let sequence_number = c.read_i16()?;
        let volume_scan_number = c.read_u16()?;
        let volume_scan_date = c.read_u16()?;
        let volume_scan_start_time = c.read_u32()?;
        let generation_date_of_product = c.read_u16()?;
        let generation_time_of_product = c.read_u32()?;

        let mut parameters = [0u16; 10];
        parameters[0] = c.read_u16()?;
        parameters[1] = c.read_u16()?;
        let elevation_number = c.read_u16()?;
        parameters[2] = c.read_u16()?;

        let mut data_level_halfwords = [0u16; 16];
        for hw in data_level_halfwords.iter_mut() {
            *hw = c.read_u16()?;
        }
        for p in parameters.iter_mut().skip(3) {
            *p = c.read_u16()?;
        }

        let version = c.read_u8()?;
        let spot_blank = c.read_u8()?;
        let offset_to_symbology = c.read_u32()?;
        let offset_to_graphic = c.read_u32()?;
        let offset_to_tabular = c.read_u32()?;

        if block_divider != -1 {
            warn!(divider = block_divider, "Invalid product description block divider");
            return Err(DecodeError::invalid_field("block divider", block_divider));
        }
        if !is_valid_product_code(product_code) {
            warn!(product_code, "Invalid product code");
            return Err(DecodeError::invalid_discriminator("product code", product_code));
        }

        Ok(Self {
            block_divider,
            latitude_of_radar,
            longitude_of_radar,
            height_of_radar,
            product_code,
            operational_mode,
            volume_coverage_pattern,
            sequence_number,
            volume_scan_number,
            volume_scan_date,
            volume_scan_start_time,
            generation_date_of_product,
            generation_time_of_product,
            elevation_number,
            parameters,
            data_level_halfwords,
            version,
            spot_blank,
            offset_to_symbology,
            offset_to_graphic,
            offset_to_tabular,
        })
    }

    fn rule(&self) -> &'static ProductRule {
        product_rule(self.product_code)
    }

    pub fn latitude(&self) -> f32 {
        self.latitude_of_radar as f32 * 0.001
    }

    pub fn longitude(&self) -> f32 {
        self.longitude_of_radar as f32 * 0.001
    }

    pub fn volume_scan_start(&self) -> Option<DateTime<Utc>> {
        let midnight = julian_to_datetime(self.volume_scan_date, 0)?;
        midnight.checked_add_signed(Duration::seconds(i64::from(self.volume_scan_start_time)))
    }

    pub fn generation_time(&self) -> Option<DateTime<Utc>> {
        let midnight = julian_to_datetime(self.generation_date_of_product, 0)?;
        midnight.checked_add_signed(Duration::seconds(i64::from(
            self.generation_time_of_product,
        )))
    }

    /// Product-dependent halfword by its message halfword number (31..=46).
    pub fn halfword(&self, number: usize) -> Option<u16> {
        number
            .checked_sub(FIRST_DATA_LEVEL_HALFWORD)
            .and_then(|i| self.data_level_halfwords.get(i).copied())
    }

    /// Raw data-level threshold halfword `i` (0..16).
    pub fn data_level_threshold(&self, i: usize) -> Option<u16> {
        self.data_level_halfwords.get(i).copied()
    }

    fn hw(&self, number: usize) -> u16 {
        self.halfword(number).unwrap_or(0)
    }

    fn hw_f32(&self, first: usize) -> f32 {
        f32::from_bits((u32::from(self.hw(first)) << 16) | u32::from(self.hw(first + 1)))
    }

    /// Elevation angle in degrees for elevation-based products (parameter 3).
    pub fn elevation(&self) -> f32 {
        f32::from(self.parameters[2] as i16) * 0.1
    }

    /// Lowest data level carrying a physical value. Dual-polarization
    /// products carry it in the message (the count of leading flag levels).
    pub fn threshold(&self) -> u16 {
        match self.rule().threshold {
            Threshold::Fixed(n) => n,
            Threshold::Halfword(number) => self.hw(number),
        }
    }

    pub fn number_of_levels(&self) -> u16 {
        match self.rule().levels {
            LevelsRule::Fixed(n) => n,
            LevelsRule::Halfword(number) => self.hw(number),
        }
    }

    pub fn scale(&self) -> f32 {
        match self.rule().scale {
            ScaleRule::MinIncrement { factor } => f32::from(self.hw(32) as i16) * factor,
            ScaleRule::FloatScaleOffset => self.hw_f32(31),
            ScaleRule::LinearLog => decode_custom_float(self.hw(31)),
            ScaleRule::EchoTops => f32::from(self.hw(32)),
            ScaleRule::Coded | ScaleRule::None => 1.0,
        }
    }

    pub fn offset(&self) -> f32 {
        match self.rule().scale {
            ScaleRule::MinIncrement { factor } => f32::from(self.hw(31) as i16) * factor,
            ScaleRule::FloatScaleOffset => self.hw_f32(33),
            ScaleRule::LinearLog => decode_custom_float(self.hw(32)),
            ScaleRule::EchoTops => f32::from(self.hw(33)),
            ScaleRule::Coded | ScaleRule::None => 0.0,
        }
    }

    /// First level of the logarithmic range (digital VIL only).
    pub fn log_start(&self) -> Option<u16> {
        (self.rule().scale == ScaleRule::LinearLog).then(|| self.hw(33))
    }

    pub fn log_scale(&self) -> Option<f32> {
        (self.rule().scale == ScaleRule::LinearLog).then(|| decode_custom_float(self.hw(34)))
    }

    pub fn log_offset(&self) -> Option<f32> {
        (self.rule().scale == ScaleRule::LinearLog).then(|| decode_custom_float(self.hw(35)))
    }

    /// Named meaning of a data level, or `None` if the level is numeric.
    pub fn data_level_code(&self, level: u16) -> Option<DataLevelCode> {
        match self.rule().codes {
            CodeRule::Ladder => match level {
                0 => Some(DataLevelCode::BelowThreshold),
                1 if self.threshold() > 1 => Some(DataLevelCode::RangeFolded),
                _ => None,
            },
            CodeRule::Hydrometeor => hydrometeor_class(level),
            CodeRule::Coded => {
                let hw = self.data_level_threshold(usize::from(level))?;
                (hw & 0x8000 != 0).then(|| coded_level((hw & 0x00FF) as u8))
            }
            CodeRule::None => None,
        }
    }

    /// Physical value of a data level. `None` below the threshold, for coded
    /// levels, and for products without numeric levels.
    pub fn data_value(&self, level: u16) -> Option<f32> {
        if level < self.threshold() {
            return None;
        }
        let level_f = f32::from(level);
        match self.rule().scale {
            ScaleRule::None => None,
            ScaleRule::Coded => {
                let hw = self.data_level_threshold(usize::from(level))?;
                if hw & 0x8000 != 0 {
                    None
                } else {
                    Some(decode_coded_value(hw))
                }
            }
            ScaleRule::MinIncrement { .. } => {
                Some(self.offset() + f32::from(level - self.threshold()) * self.scale())
            }
            ScaleRule::FloatScaleOffset => {
                let scale = self.scale();
                if scale == 0.0 {
                    None
                } else {
                    Some((level_f - self.offset()) / scale)
                }
            }
            ScaleRule::LinearLog => {
                let log_start = self.hw(33);
                if level < log_start {
                    let scale = self.scale();
                    (scale != 0.0).then(|| (level_f - self.offset()) / scale)
                } else {
                    let log_scale = decode_custom_float(self.hw(34));
                    let log_offset = decode_custom_float(self.hw(35));
                    (log_scale != 0.0).then(|| ((level_f - log_offset) / log_scale).exp())
                }
            }
            ScaleRule::EchoTops => {
                let scale = self.scale();
                if scale == 0.0 {
                    None
                } else {
                    let masked = f32::from(level & self.hw(31));
                    Some(masked / scale - self.offset())
                }
            }
        }
    }

    /// Whether the symbology block is bzip2-compressed.
    pub fn is_compression_enabled(&self) -> bool {
        supports_compression(self.product_code) && self.parameters[7] == 1
    }

    pub fn has_symbology(&self) -> bool {
        self.offset_to_symbology != 0
    }

    pub fn has_graphic(&self) -> bool {
        self.offset_to_graphic != 0
    }

    pub fn has_tabular(&self) -> bool {
        self.offset_to_tabular != 0
    }
}

/// Product codes are `[-299, -16]` or `[16, 299]`.
pub fn is_valid_product_code(code: i16) -> bool {
    (16..=299).contains(&code.unsigned_abs())
}
