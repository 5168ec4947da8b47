//! Radar Coded Message (message code 74).
//!
//! After the product description block the message names the PUP site, the
//! product category and the RDA site; the coded text that follows is not
//! interpreted.

use serde::Serialize;
use tracing::trace;

use super::description::ProductDescriptionBlock;
use super::header::Level3MessageHeader;
use crate::cursor::Cursor;
use crate::error::DecodeResult;

pub const RADAR_CODED_MESSAGE_CODE: i16 = 74;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadarCodedMessage {
    pub header: Level3MessageHeader,
    pub description: ProductDescriptionBlock,
    pub pup_site_identifier: String,
    pub product_category: String,
    pub rda_site_identifier: String,
}

impl RadarCodedMessage {
    pub fn parse(c: &mut Cursor, header: Level3MessageHeader) -> DecodeResult<Self> {
        let description = ProductDescriptionBlock::parse(c)?;

        let pup_site_identifier = c.read_string(4)?;
        c.skip(1)?;
        let product_category = c.read_string(5)?;
        c.skip(1)?;
        let rda_site_identifier = c.read_string(4)?;

        trace!(
            pup = %pup_site_identifier,
            category = %product_category,
            rda = %rda_site_identifier,
            "Parsed radar coded message"
        );

        Ok(Self {
            header,
            description,
            pup_site_identifier,
            product_category,
            rda_site_identifier,
        })
    }
}
