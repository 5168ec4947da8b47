//! Level III (RPG) product decoders.
//!
//! Every product starts with an 18-byte [`Level3MessageHeader`]; graphic
//! products follow it with a [`ProductDescriptionBlock`] and offset-addressed
//! symbology, graphic and tabular blocks. General status, standalone
//! tabular and radar coded messages have their own layouts.

pub mod alphanumeric;
pub mod description;
pub mod file;
pub mod general_status;
pub mod graphic;
pub mod header;
pub mod radar_coded;
pub mod storm_tracking;
pub mod symbology;
pub mod tables;
pub mod tabular_product;
pub mod wmo;

pub use alphanumeric::{
    GraphicAlphanumericBlock, GraphicPacket, GraphicPage, TabularAlphanumericBlock, TextPacket,
};
pub use description::ProductDescriptionBlock;
pub use file::Level3File;
pub use general_status::GeneralStatusMessage;
pub use graphic::GraphicProductMessage;
pub use header::Level3MessageHeader;
pub use radar_coded::RadarCodedMessage;
pub use storm_tracking::{
    StiAdaptationParameters, StiPosition, StiRecord, StormTrackingInformationMessage,
};
pub use symbology::{ProductSymbologyBlock, SymbologyLayer};
pub use tables::DataLevelCode;
pub use tabular_product::TabularProductMessage;
pub use wmo::{CcbHeader, WmoHeader};

/// Message codes decoded as graphic product messages.
pub fn is_graphic_product(message_code: i16) -> bool {
    matches!(
        message_code,
        19 | 20
            | 27
            | 30
            | 31
            | 32
            | 37
            | 38
            | 41
            | 48..=51
            | 56..=59
            | 61
            | 65..=67
            | 78..=81
            | 84
            | 86
            | 90
            | 93
            | 94
            | 97..=102
            | 104
            | 105
            | 107..=111
            | 113
            | 132..=135
            | 137
            | 138
            | 140
            | 141
            | 143..=147
            | 149..=155
            | 159
            | 161
            | 163
            | 165..=179
            | 193
            | 195
            | 196
            | 202
    )
}
