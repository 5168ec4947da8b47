//! WSR-88D (NEXRAD) message decoder.
//!
//! Decodes the big-endian binary messages produced by the WSR-88D radar
//! network into typed Rust values:
//!
//! - Level II (RDA) messages: digital radar data (types 1 and 31), RDA
//!   status, volume coverage patterns, RDA adaptation data,
//!   performance/maintenance data and the clutter filter maps
//! - Level III (RPG) products: graphic product messages, the storm tracking
//!   information product, general status, standalone tabular products and
//!   radar coded messages
//!
//! Single messages are decoded with [`decode`] and [`decode_level3`]. A
//! [`MessageFactory`] additionally reassembles multi-segment Level II
//! messages. Whole files are read with [`Level2File`] (AR2V archives) and
//! [`Level3File`] (WMO-headed product files).
//!
//! ```ignore
//! use wsr88d_parser::{DecoderConfig, Level2File};
//!
//! let file = Level2File::open("KTLX20220107_010000_V06", &DecoderConfig::default())?;
//! for radial in file.radials() {
//!     println!("{:.2} {:?}", radial.azimuth_angle(), radial.available_moments());
//! }
//! ```

pub mod archive;
pub mod codec;
pub mod config;
pub mod cursor;
pub mod error;
pub mod factory;
pub mod header;
pub mod level2;
pub mod level3;
pub mod message;
pub mod segments;

pub use archive::{Level2File, Level2Record, VolumeHeader};
pub use config::DecoderConfig;
pub use cursor::Cursor;
pub use error::{DecodeError, DecodeResult};
pub use factory::{decode, decode_level3, Level2MessageInfo, MessageFactory};
pub use header::MessageHeader;
pub use level2::{
    DataBlockType, DigitalRadarData, DigitalRadarDataGeneric, MomentDataBlock, MomentKind,
    PerformanceMaintenanceData, RadialMoments, RdaAdaptationData, RdaStatusData,
    VolumeCoveragePatternData,
};
pub use level3::{
    GeneralStatusMessage, GraphicProductMessage, Level3File, Level3MessageHeader,
    ProductDescriptionBlock, RadarCodedMessage, StormTrackingInformationMessage,
    TabularProductMessage,
};
pub use message::{Message, MessageFamily, UnrecognizedMessage};
