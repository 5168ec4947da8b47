//! Standalone tabular products (message codes 62, 75, 77 and 82).
//!
//! A product description block whose symbology offset points at a tabular
//! block. Unlike the tabular block of a graphic product, it has no first
//! divider, block id, header or description copy: it starts at the second
//! divider.

use serde::Serialize;
use tracing::debug;

use super::alphanumeric::read_tabular_pages;
use super::description::ProductDescriptionBlock;
use super::graphic::block_position;
use super::header::{Level3MessageHeader, LEVEL3_MESSAGE_HEADER_SIZE};
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

pub fn is_tabular_product(message_code: i16) -> bool {
    matches!(message_code, 62 | 75 | 77 | 82)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabularProductMessage {
    pub header: Level3MessageHeader,
    pub description: ProductDescriptionBlock,
    /// Text lines per page; `None` when the offset points inside the prefix
    pub pages: Option<Vec<Vec<String>>>,
}

impl TabularProductMessage {
    /// Parses the message body. The cursor must sit just past `header`.
    pub fn parse(c: &mut Cursor, header: Level3MessageHeader) -> DecodeResult<Self> {
        let message_start = c
            .position()
            .checked_sub(LEVEL3_MESSAGE_HEADER_SIZE)
            .ok_or_else(|| DecodeError::invalid_field("message start", c.position()))?;

        let description = ProductDescriptionBlock::parse(c)?;

        let pages = match block_position(message_start, description.offset_to_symbology) {
            Some(pos) => {
                c.seek(pos)?;
                let pages = read_tabular_pages(c)?;
                debug!(pages = pages.len(), "Tabular product block valid");
                Some(pages)
            }
            None => None,
        };

        Ok(Self {
            header,
            description,
            pages,
        })
    }

    pub fn product_code(&self) -> i16 {
        self.description.product_code
    }

    /// All lines of all pages, in page order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flatten()
            .flatten()
            .map(String::as_str)
    }
}
