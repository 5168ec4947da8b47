//! Product-code dependent decode rules for Level III products.
//!
//! Threshold, level count, scale/offset encoding and data-level coding all
//! depend on the product code. They are resolved once, from
//! [`product_rule`], instead of being switched on in every accessor.

use serde::Serialize;

/// Where a product's lowest valued data level comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    Fixed(u16),
    /// Read from the given product-dependent halfword (31..=46)
    Halfword(usize),
}

/// Where a product's number of data levels comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelsRule {
    Fixed(u16),
    /// Read from the given product-dependent halfword (31..=46)
    Halfword(usize),
}

/// How raw data levels map to physical values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleRule {
    /// No numeric value (classification products, unknown products)
    None,
    /// Each level's halfword encodes its own value or code
    Coded,
    /// Halfword 31 is the minimum value and halfword 32 the increment,
    /// both signed and multiplied by `factor`
    MinIncrement { factor: f32 },
    /// Halfwords 31-32 hold a float scale, 33-34 a float offset
    FloatScaleOffset,
    /// Digital VIL: linear below the `logStart` level, exponential above
    LinearLog,
    /// Enhanced echo tops: halfword 31 data mask, 32 scale, 33 offset
    EchoTops,
}

/// How raw data levels map to named codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRule {
    /// Level 0 below threshold, level 1 range folded when the threshold is 2
    Ladder,
    /// Hydrometeor classes at exact multiples of ten
    Hydrometeor,
    /// Bit 15 of the level's halfword selects a code in the low byte
    Coded,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductRule {
    pub threshold: Threshold,
    pub levels: LevelsRule,
    pub scale: ScaleRule,
    pub codes: CodeRule,
}

/// Named meaning of a data level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataLevelCode {
    Blank,
    BelowThreshold,
    NoData,
    RangeFolded,
    Biological,
    GroundClutter,
    IceCrystals,
    Graupel,
    WetSnow,
    DrySnow,
    LightRain,
    HeavyRain,
    BigDrops,
    Hail,
    LargeHail,
    GiantHail,
    Unknown,
}

const DIGITAL_REFLECTIVITY: ProductRule = ProductRule {
    threshold: Threshold::Fixed(2),
    levels: LevelsRule::Fixed(256),
    scale: ScaleRule::MinIncrement { factor: 0.1 },
    codes: CodeRule::Ladder,
};

/// Halfword 37 holds the number of leading flag levels.
const DUAL_POL_MOMENT: ProductRule = ProductRule {
    threshold: Threshold::Halfword(37),
    levels: LevelsRule::Fixed(256),
    scale: ScaleRule::FloatScaleOffset,
    codes: CodeRule::Ladder,
};

const DUAL_POL_ACCUMULATION: ProductRule = ProductRule {
    threshold: Threshold::Halfword(37),
    levels: LevelsRule::Fixed(256),
    scale: ScaleRule::FloatScaleOffset,
    codes: CodeRule::Ladder,
};

const STORM_TOTAL_PRECIPITATION: ProductRule = ProductRule {
    threshold: Threshold::Fixed(1),
    levels: LevelsRule::Halfword(33),
    scale: ScaleRule::MinIncrement { factor: 0.01 },
    codes: CodeRule::Ladder,
};

const DIGITAL_VIL: ProductRule = ProductRule {
    threshold: Threshold::Fixed(2),
    levels: LevelsRule::Fixed(256),
    scale: ScaleRule::LinearLog,
    codes: CodeRule::Ladder,
};

const ENHANCED_ECHO_TOPS: ProductRule = ProductRule {
    threshold: Threshold::Fixed(2),
    levels: LevelsRule::Fixed(71),
    scale: ScaleRule::EchoTops,
    codes: CodeRule::Ladder,
};

const HYDROMETEOR_CLASSIFICATION: ProductRule = ProductRule {
    threshold: Threshold::Fixed(0),
    levels: LevelsRule::Fixed(160),
    scale: ScaleRule::None,
    codes: CodeRule::Hydrometeor,
};

const HYBRID_HYDROMETEOR_CLASSIFICATION: ProductRule = ProductRule {
    levels: LevelsRule::Fixed(200),
    ..HYDROMETEOR_CLASSIFICATION
};

const CODED_16: ProductRule = ProductRule {
    threshold: Threshold::Fixed(0),
    levels: LevelsRule::Fixed(16),
    scale: ScaleRule::Coded,
    codes: CodeRule::Coded,
};

const CODED_13: ProductRule = ProductRule {
    levels: LevelsRule::Fixed(13),
    ..CODED_16
};

const CODED_12: ProductRule = ProductRule {
    levels: LevelsRule::Fixed(12),
    ..CODED_16
};

const CODED_11: ProductRule = ProductRule {
    levels: LevelsRule::Fixed(11),
    ..CODED_16
};

const CODED_8: ProductRule = ProductRule {
    threshold: Threshold::Fixed(0),
    levels: LevelsRule::Fixed(8),
    scale: ScaleRule::Coded,
    codes: CodeRule::Coded,
};

const UNKNOWN_PRODUCT: ProductRule = ProductRule {
    threshold: Threshold::Fixed(0),
    levels: LevelsRule::Fixed(0),
    scale: ScaleRule::None,
    codes: CodeRule::None,
};

/// Decode rules for a product code.
pub fn product_rule(product_code: i16) -> &'static ProductRule {
    match product_code {
        32 | 93 | 94 | 99 | 153 | 154 | 155 | 180 | 182 | 186 | 195 => &DIGITAL_REFLECTIVITY,
        159 | 161 | 163 | 167 | 168 => &DUAL_POL_MOMENT,
        170 | 172 | 173 | 174 | 175 | 178 | 179 => &DUAL_POL_ACCUMULATION,
        138 => &STORM_TOTAL_PRECIPITATION,
        134 => &DIGITAL_VIL,
        135 => &ENHANCED_ECHO_TOPS,
        165 => &HYDROMETEOR_CLASSIFICATION,
        177 => &HYBRID_HYDROMETEOR_CLASSIFICATION,
        113 => &CODED_13,
        132 | 133 => &CODED_12,
        34 => &CODED_11,
        30 | 36 | 65 | 66 | 90 => &CODED_8,
        16..=29 | 31 | 33 | 35 | 37..=57 | 78..=80 | 84 | 86 | 97 | 98 | 137 | 144..=147
        | 150 | 151 | 169 | 171 => &CODED_16,
        _ => &UNKNOWN_PRODUCT,
    }
}

/// Product codes whose symbology may be bzip2-compressed (parameter 8 == 1).
pub fn supports_compression(product_code: i16) -> bool {
    matches!(
        product_code,
        32 | 94
            | 99
            | 134
            | 135
            | 138
            | 149
            | 152
            | 153
            | 154
            | 155
            | 159
            | 161
            | 163
            | 165
            | 167
            | 168
            | 170
            | 172..=180
            | 182
            | 186
            | 193
            | 195
            | 202
    )
}

/// Named code carried in the low byte of a coded data-level halfword.
pub fn coded_level(lsb: u8) -> DataLevelCode {
    match lsb {
        0 => DataLevelCode::Blank,
        1 => DataLevelCode::BelowThreshold,
        2 => DataLevelCode::NoData,
        3 => DataLevelCode::RangeFolded,
        4 => DataLevelCode::Biological,
        5 => DataLevelCode::GroundClutter,
        6 => DataLevelCode::IceCrystals,
        7 => DataLevelCode::Graupel,
        8 => DataLevelCode::WetSnow,
        9 => DataLevelCode::DrySnow,
        10 => DataLevelCode::LightRain,
        11 => DataLevelCode::HeavyRain,
        12 => DataLevelCode::BigDrops,
        13 => DataLevelCode::Hail,
        _ => DataLevelCode::Unknown,
    }
}

/// Hydrometeor class of a classification level. Only exact class levels
/// map; levels between classes have no code.
pub fn hydrometeor_class(level: u16) -> Option<DataLevelCode> {
    match level {
        0 => Some(DataLevelCode::BelowThreshold),
        10 => Some(DataLevelCode::Biological),
        20 => Some(DataLevelCode::GroundClutter),
        30 => Some(DataLevelCode::IceCrystals),
        40 => Some(DataLevelCode::DrySnow),
        50 => Some(DataLevelCode::WetSnow),
        60 => Some(DataLevelCode::LightRain),
        70 => Some(DataLevelCode::HeavyRain),
        80 => Some(DataLevelCode::BigDrops),
        90 => Some(DataLevelCode::Graupel),
        100 => Some(DataLevelCode::Hail),
        110 => Some(DataLevelCode::LargeHail),
        120 => Some(DataLevelCode::GiantHail),
        140 => Some(DataLevelCode::Unknown),
        150 => Some(DataLevelCode::RangeFolded),
        _ => None,
    }
}

/// Decodes the 16-bit float used by digital VIL: sign in bit 15, exponent
/// in bits 14-10, fraction in bits 9-0.
pub fn decode_custom_float(value: u16) -> f32 {
    let sign = if value & 0x8000 != 0 { -1.0 } else { 1.0 };
    let exponent = i32::from((value & 0x7C00) >> 10);
    let fraction = f32::from(value & 0x03FF) / 1024.0;
    if exponent == 0 {
        sign * 2.0 * fraction
    } else {
        sign * 2f32.powi(exponent - 16) * (1.0 + fraction)
    }
}

/// Decodes a numeric (bit 15 clear) data-level halfword.
pub fn decode_coded_value(halfword: u16) -> f32 {
    let magnitude = f32::from(halfword & 0x00FF);
    let scaled = if halfword & 0x4000 != 0 {
        magnitude * 0.01
    } else if halfword & 0x2000 != 0 {
        magnitude * 0.05
    } else if halfword & 0x1000 != 0 {
        magnitude * 0.1
    } else {
        magnitude
    };
    if halfword & 0x0100 != 0 {
        -scaled
    } else {
        scaled
    }
}
