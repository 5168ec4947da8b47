//! Graphic Product Message.
//!
//! A product description block followed by up to three blocks (symbology,
//! graphic alphanumeric, tabular alphanumeric), each located by a halfword
//! offset from the start of the message.

use serde::Serialize;
use tracing::{debug, warn};

use super::alphanumeric::{GraphicAlphanumericBlock, TabularAlphanumericBlock};
use super::description::{ProductDescriptionBlock, PRODUCT_DESCRIPTION_BLOCK_SIZE};
use super::header::{Level3MessageHeader, LEVEL3_MESSAGE_HEADER_SIZE};
use super::symbology::ProductSymbologyBlock;
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

/// Smallest valid block offset, in bytes from the message start.
const OFFSET_BASE: usize = LEVEL3_MESSAGE_HEADER_SIZE + PRODUCT_DESCRIPTION_BLOCK_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphicProductMessage {
    pub header: Level3MessageHeader,
    pub description: ProductDescriptionBlock,
    pub symbology: Option<ProductSymbologyBlock>,
    pub graphic: Option<GraphicAlphanumericBlock>,
    pub tabular: Option<TabularAlphanumericBlock>,
}

impl GraphicProductMessage {
    /// Parses the message body. The cursor must sit just past `header`,
    /// which itself starts the message.
    pub fn parse(c: &mut Cursor, header: Level3MessageHeader) -> DecodeResult<Self> {
        let message_start = c
            .position()
            .checked_sub(LEVEL3_MESSAGE_HEADER_SIZE)
            .ok_or_else(|| DecodeError::invalid_field("message start", c.position()))?;

        let description = ProductDescriptionBlock::parse(c)?;

        if description.is_compression_enabled() {
            warn!(
                product_code = description.product_code,
                "Compressed product data not supported"
            );
            return Err(DecodeError::unsupported(format!(
                "bzip2-compressed symbology for product {}",
                description.product_code
            )));
        }

        let mut end = c.position();

        let symbology = match block_position(message_start, description.offset_to_symbology) {
            Some(pos) => {
                c.seek(pos)?;
                let block = ProductSymbologyBlock::parse(c)?;
                debug!(layers = block.layers.len(), "Product symbology block valid");
                end = end.max(c.position());
                Some(block)
            }
            None => None,
        };

        let graphic = match block_position(message_start, description.offset_to_graphic) {
            Some(pos) => {
                c.seek(pos)?;
                let block = GraphicAlphanumericBlock::parse(c)?;
                debug!(pages = block.pages.len(), "Graphic alphanumeric block valid");
                end = end.max(c.position());
                Some(block)
            }
            None => None,
        };

        let tabular = match block_position(message_start, description.offset_to_tabular) {
            Some(pos) => {
                c.seek(pos)?;
                let block = TabularAlphanumericBlock::parse(c)?;
                debug!(pages = block.pages.len(), "Tabular alphanumeric block valid");
                end = end.max(c.position());
                Some(block)
            }
            None => None,
        };

        c.seek(end)?;

        Ok(Self {
            header,
            description,
            symbology,
            graphic,
            tabular,
        })
    }

    pub fn product_code(&self) -> i16 {
        self.description.product_code
    }
}

/// Absolute position of a block given its halfword offset. Offsets that
/// point into the header or description block mean the block is absent.
pub(crate) fn block_position(message_start: usize, offset_halfwords: u32) -> Option<usize> {
    let offset = offset_halfwords as usize * 2;
    if offset < OFFSET_BASE {
        if offset != 0 {
            debug!(offset, "Ignoring block offset inside the message prefix");
        }
        return None;
    }
    Some(message_start + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_position() {
        assert_eq!(block_position(0, 0), None);
        assert_eq!(block_position(0, 30), None);
        assert_eq!(block_position(0, 60), Some(120));
        assert_eq!(block_position(40, 60), Some(160));
    }
}
