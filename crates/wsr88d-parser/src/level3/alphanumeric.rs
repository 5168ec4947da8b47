//! Graphic (block id 2) and tabular (block id 3) alphanumeric blocks.
//!
//! Graphic pages are sequences of packets; text packets (codes 1, 2 and 8)
//! are decoded into positioned strings and everything else is kept opaque.
//! Tabular pages are lists of fixed-width lines terminated by a -1 word.

use bytes::Bytes;
use serde::Serialize;
use tracing::{trace, warn};

use super::description::ProductDescriptionBlock;
use super::header::Level3MessageHeader;
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

pub const GRAPHIC_BLOCK_ID: i16 = 2;
pub const TABULAR_BLOCK_ID: i16 = 3;

const MAX_PAGES: u16 = 48;
const MAX_LINE_CHARACTERS: u16 = 80;
const MIN_BLOCK_LENGTH: u32 = 10;
const END_OF_PAGE: i16 = -1;
const BLOCK_DIVIDER: i16 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextPacket {
    pub packet_code: u16,
    /// Color value, packet 8 only
    pub value_of_text: Option<u16>,
    pub start_i: i16,
    pub start_j: i16,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GraphicPacket {
    Text(TextPacket),
    Other {
        packet_code: u16,
        #[serde(skip)]
        data: Bytes,
    },
}

impl GraphicPacket {
    pub fn packet_code(&self) -> u16 {
        match self {
            GraphicPacket::Text(t) => t.packet_code,
            GraphicPacket::Other { packet_code, .. } => *packet_code,
        }
    }

    /// Reads one packet and returns it with its encoded length.
    fn parse(c: &mut Cursor) -> DecodeResult<(Self, usize)> {
        let start = c.position();
        let packet_code = c.read_u16()?;
        let packet = match packet_code {
            1 | 2 | 8 => {
                let length = usize::from(c.read_u16()?);
                let value_of_text = if packet_code == 8 {
                    Some(c.read_u16()?)
                } else {
                    None
                };
                let header_len = if value_of_text.is_some() { 6 } else { 4 };
                if length < header_len {
                    warn!(packet_code, length, "Text packet too short");
                    return Err(DecodeError::invalid_field("text packet length", length));
                }
                let start_i = c.read_i16()?;
                let start_j = c.read_i16()?;
                let text = c.read_string(length - header_len)?;
                GraphicPacket::Text(TextPacket {
                    packet_code,
                    value_of_text,
                    start_i,
                    start_j,
                    text,
                })
            }
            // Generic data packets carry a reserved word and a 32-bit length
            28 | 29 => {
                c.skip(2)?;
                let length = c.read_u32()? as usize;
                GraphicPacket::Other {
                    packet_code,
                    data: c.read_bytes(length)?,
                }
            }
            0xAF1F | 0xBA07 | 0xBA0F | 16 | 17 | 18 => {
                warn!(packet_code, "Data array packet in alphanumeric page");
                return Err(DecodeError::invalid_discriminator("graphic packet code", packet_code));
            }
            _ => {
                let length = usize::from(c.read_u16()?);
                GraphicPacket::Other {
                    packet_code,
                    data: c.read_bytes(length)?,
                }
            }
        };
        Ok((packet, c.position() - start))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphicPage {
    pub page_number: u16,
    pub length_of_page: u16,
    pub packets: Vec<GraphicPacket>,
}

impl GraphicPage {
    /// Text packets on the page, in packet order.
    pub fn text_packets(&self) -> impl Iterator<Item = &TextPacket> {
        self.packets.iter().filter_map(|p| match p {
            GraphicPacket::Text(t) => Some(t),
            GraphicPacket::Other { .. } => None,
        })
    }

    pub fn lines(&self) -> Vec<&str> {
        self.text_packets().map(|t| t.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphicAlphanumericBlock {
    pub block_divider: i16,
    pub block_id: i16,
    pub length_of_block: u32,
    pub number_of_pages: u16,
    pub pages: Vec<GraphicPage>,
}

impl GraphicAlphanumericBlock {
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let block_divider = c.read_i16()?;
        let block_id = c.read_i16()?;
        let length_of_block = c.read_u32()?;
        let number_of_pages = c.read_u16()?;

        if block_divider != -1 {
            warn!(divider = block_divider, "Invalid graphic block divider");
            return Err(DecodeError::invalid_field("graphic block divider", block_divider));
        }
        if block_id != GRAPHIC_BLOCK_ID {
            warn!(block_id, "Invalid graphic block ID");
            return Err(DecodeError::invalid_discriminator("graphic block id", block_id));
        }
        if length_of_block < MIN_BLOCK_LENGTH {
            warn!(length = length_of_block, "Invalid graphic block length");
            return Err(DecodeError::invalid_field("graphic block length", length_of_block));
        }
        if !(1..=MAX_PAGES).contains(&number_of_pages) {
            warn!(pages = number_of_pages, "Invalid number of pages");
            return Err(DecodeError::invalid_field("number of pages", number_of_pages));
        }

        let mut pages = Vec::with_capacity(usize::from(number_of_pages));
        for i in 1..=number_of_pages {
            let page_number = c.read_u16()?;
            let length_of_page = c.read_u16()?;
            if page_number != i {
                warn!(expected = i, found = page_number, "Page out of order");
            }

            let mut packets = Vec::new();
            let mut bytes_read = 0usize;
            while bytes_read < usize::from(length_of_page) {
                let (packet, len) = GraphicPacket::parse(c)?;
                packets.push(packet);
                bytes_read += len;
            }
            if bytes_read > usize::from(length_of_page) {
                warn!(bytes_read, length_of_page, "Page bytes read larger than size");
                return Err(DecodeError::SizeMismatch {
                    declared: usize::from(length_of_page),
                    consumed: bytes_read,
                });
            }
            trace!(page = page_number, packets = packets.len(), "Read graphic page");

            pages.push(GraphicPage {
                page_number,
                length_of_page,
                packets,
            });
        }

        Ok(Self {
            block_divider,
            block_id,
            length_of_block,
            number_of_pages,
            pages,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabularAlphanumericBlock {
    pub block_divider1: i16,
    pub block_id: i16,
    pub length_of_block: u32,
    pub message_header: Level3MessageHeader,
    pub description_block: ProductDescriptionBlock,
    pub block_divider2: i16,
    pub number_of_pages: u16,
    pub pages: Vec<Vec<String>>,
}

impl TabularAlphanumericBlock {
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let block_divider1 = c.read_i16()?;
        let block_id = c.read_i16()?;
        let length_of_block = c.read_u32()?;

        if block_divider1 != -1 {
            warn!(divider = block_divider1, "Invalid first tabular block divider");
            return Err(DecodeError::invalid_field("tabular block divider", block_divider1));
        }
        if block_id != TABULAR_BLOCK_ID {
            warn!(block_id, "Invalid tabular block ID");
            return Err(DecodeError::invalid_discriminator("tabular block id", block_id));
        }
        if length_of_block < MIN_BLOCK_LENGTH {
            warn!(length = length_of_block, "Invalid tabular block length");
            return Err(DecodeError::invalid_field("tabular block length", length_of_block));
        }

        let message_header = Level3MessageHeader::parse(c)?;
        let description_block = ProductDescriptionBlock::parse(c)?;

        let pages = read_tabular_pages(c)?;

        Ok(Self {
            block_divider1,
            block_id,
            length_of_block,
            message_header,
            description_block,
            block_divider2: BLOCK_DIVIDER,
            number_of_pages: pages.len() as u16,
            pages,
        })
    }
}

/// Reads the page list of a tabular block: a -1 divider, the page count,
/// then each page. Standalone tabular products start their block here.
pub(crate) fn read_tabular_pages(c: &mut Cursor) -> DecodeResult<Vec<Vec<String>>> {
    let block_divider = c.read_i16()?;
    let number_of_pages = c.read_u16()?;
    if block_divider != BLOCK_DIVIDER {
        warn!(divider = block_divider, "Invalid second tabular block divider");
        return Err(DecodeError::invalid_field("tabular block divider", block_divider));
    }
    if !(1..=MAX_PAGES).contains(&number_of_pages) {
        warn!(pages = number_of_pages, "Invalid number of pages");
        return Err(DecodeError::invalid_field("number of pages", number_of_pages));
    }

    let mut pages = Vec::with_capacity(usize::from(number_of_pages));
    for page in 1..=number_of_pages {
        pages.push(read_tabular_page(c, page)?);
    }
    Ok(pages)
}

fn read_tabular_page(c: &mut Cursor, page: u16) -> DecodeResult<Vec<String>> {
    let mut lines = Vec::new();
    loop {
        let number_of_characters = c.read_i16()?;
        if number_of_characters == END_OF_PAGE {
            break;
        }
        let count = number_of_characters as u16;
        if count > MAX_LINE_CHARACTERS {
            warn!(characters = number_of_characters, page, "Invalid number of characters");
            return Err(DecodeError::invalid_field("number of characters", number_of_characters));
        }
        lines.push(c.read_string(usize::from(count))?);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_packet(code: u16, i: i16, j: i16, text: &str) -> Vec<u8> {
        let mut v = Vec::new();
        v.extend_from_slice(&code.to_be_bytes());
        let extra = if code == 8 { 6 } else { 4 };
        v.extend_from_slice(&((text.len() + extra) as u16).to_be_bytes());
        if code == 8 {
            v.extend_from_slice(&3u16.to_be_bytes());
        }
        v.extend_from_slice(&i.to_be_bytes());
        v.extend_from_slice(&j.to_be_bytes());
        v.extend_from_slice(text.as_bytes());
        v
    }

    fn graphic_block(pages: &[Vec<u8>]) -> Bytes {
        let mut body = Vec::new();
        for (n, page) in pages.iter().enumerate() {
            body.extend_from_slice(&((n + 1) as u16).to_be_bytes());
            body.extend_from_slice(&(page.len() as u16).to_be_bytes());
            body.extend_from_slice(page);
        }
        let mut v = Vec::new();
        v.extend_from_slice(&(-1i16).to_be_bytes());
        v.extend_from_slice(&2i16.to_be_bytes());
        v.extend_from_slice(&((10 + body.len()) as u32).to_be_bytes());
        v.extend_from_slice(&(pages.len() as u16).to_be_bytes());
        v.extend_from_slice(&body);
        Bytes::from(v)
    }

    #[test]
    fn test_graphic_text_packets() {
        let mut page = text_packet(8, 0, 1, "STORM ID   D7");
        page.extend(text_packet(1, 0, 11, "AZ/RAN   233/ 95"));
        // Unlinked vector packet, opaque
        page.extend_from_slice(&[0, 10, 0, 4, 0, 1, 0, 2]);

        let data = graphic_block(&[page]);
        let len = data.len();
        let mut c = Cursor::new(data);
        let block = GraphicAlphanumericBlock::parse(&mut c).unwrap();
        assert_eq!(c.position(), len);
        assert_eq!(block.pages.len(), 1);
        let page = &block.pages[0];
        assert_eq!(page.lines(), vec!["STORM ID   D7", "AZ/RAN   233/ 95"]);
        assert_eq!(page.packets[2].packet_code(), 10);
        let first = page.text_packets().next().unwrap();
        assert_eq!(first.value_of_text, Some(3));
        assert_eq!(first.start_j, 1);
    }

    #[test]
    fn test_graphic_page_overrun() {
        let packet = text_packet(1, 0, 0, "ABCDEF");
        let mut v = graphic_block(&[packet]).to_vec();
        // Shrink the declared page length below the packet size
        v[12] = 0;
        v[13] = 4;
        assert!(matches!(
            GraphicAlphanumericBlock::parse(&mut Cursor::new(Bytes::from(v))),
            Err(DecodeError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_graphic_rejects_bad_page_count() {
        let mut v = graphic_block(&[text_packet(1, 0, 0, "A")]).to_vec();
        v[8] = 0;
        v[9] = 49;
        assert!(matches!(
            GraphicAlphanumericBlock::parse(&mut Cursor::new(Bytes::from(v))),
            Err(DecodeError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_tabular_page_lines() {
        let mut v = Vec::new();
        for line in ["FIRST LINE", "SECOND"] {
            v.extend_from_slice(&(line.len() as i16).to_be_bytes());
            v.extend_from_slice(line.as_bytes());
        }
        v.extend_from_slice(&(-1i16).to_be_bytes());
        let lines = read_tabular_page(&mut Cursor::new(Bytes::from(v)), 1).unwrap();
        assert_eq!(lines, vec!["FIRST LINE", "SECOND"]);
    }

    #[test]
    fn test_tabular_pages_need_divider() {
        let mut v = Vec::new();
        v.extend_from_slice(&0i16.to_be_bytes());
        v.extend_from_slice(&1u16.to_be_bytes());
        v.extend_from_slice(&(-1i16).to_be_bytes());
        assert!(matches!(
            read_tabular_pages(&mut Cursor::new(Bytes::from(v.clone()))),
            Err(DecodeError::InvalidField { .. })
        ));

        v[0..2].copy_from_slice(&(-1i16).to_be_bytes());
        let pages = read_tabular_pages(&mut Cursor::new(Bytes::from(v))).unwrap();
        assert_eq!(pages, vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_tabular_line_too_long() {
        let mut v = Vec::new();
        v.extend_from_slice(&81i16.to_be_bytes());
        v.extend_from_slice(&[b' '; 81]);
        assert!(matches!(
            read_tabular_page(&mut Cursor::new(Bytes::from(v)), 1),
            Err(DecodeError::InvalidField { .. })
        ));
    }
}
