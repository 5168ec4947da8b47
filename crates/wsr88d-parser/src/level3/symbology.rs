//! Product Symbology Block (block id 1).
//!
//! Layers are kept as opaque packet bytes; only the block and layer framing
//! is validated here.

use bytes::Bytes;
use serde::Serialize;
use tracing::{trace, warn};

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

pub const SYMBOLOGY_BLOCK_ID: i16 = 1;
const MAX_LAYERS: u16 = 18;
/// Divider, id, length and layer count
const BLOCK_HEADER_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbologyLayer {
    pub layer_divider: i16,
    pub length_of_layer: u32,
    #[serde(skip)]
    pub data: Bytes,
}

impl SymbologyLayer {
    /// Packet code of the first packet in the layer.
    pub fn first_packet_code(&self) -> Option<u16> {
        (self.data.len() >= 2).then(|| u16::from_be_bytes([self.data[0], self.data[1]]))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSymbologyBlock {
    pub block_divider: i16,
    pub block_id: i16,
    /// Block length in bytes, including the block header
    pub length_of_block: u32,
    pub number_of_layers: u16,
    pub layers: Vec<SymbologyLayer>,
}

impl ProductSymbologyBlock {
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let block_divider = c.read_i16()?;
        let block_id = c.read_i16()?;
        let length_of_block = c.read_u32()?;
        let number_of_layers = c.read_u16()?;

        if block_divider != -1 {
            warn!(divider = block_divider, "Invalid symbology block divider");
            return Err(DecodeError::invalid_field("symbology block divider", block_divider));
        }
        if block_id != SYMBOLOGY_BLOCK_ID {
            warn!(block_id, "Invalid symbology block ID");
            return Err(DecodeError::invalid_discriminator("symbology block id", block_id));
        }
        if length_of_block < BLOCK_HEADER_SIZE {
            warn!(length = length_of_block, "Invalid symbology block length");
            return Err(DecodeError::invalid_field("symbology block length", length_of_block));
        }
        if !(1..=MAX_LAYERS).contains(&number_of_layers) {
            warn!(layers = number_of_layers, "Invalid number of layers");
            return Err(DecodeError::invalid_field("number of layers", number_of_layers));
        }

        let mut layers = Vec::with_capacity(usize::from(number_of_layers));
        for i in 0..number_of_layers {
            let layer_divider = c.read_i16()?;
            let length_of_layer = c.read_u32()?;
            let data = c.read_bytes(length_of_layer as usize)?;
            trace!(layer = i, length = length_of_layer, "Read symbology layer");
            layers.push(SymbologyLayer {
                layer_divider,
                length_of_layer,
                data,
            });
        }

        Ok(Self {
            block_divider,
            block_id,
            length_of_block,
            number_of_layers,
            layers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: i16, layers: &[&[u8]]) -> Bytes {
        let body: usize = layers.iter().map(|l| 6 + l.len()).sum();
        let mut v = Vec::new();
        v.extend_from_slice(&(-1i16).to_be_bytes());
        v.extend_from_slice(&id.to_be_bytes());
        v.extend_from_slice(&((10 + body) as u32).to_be_bytes());
        v.extend_from_slice(&(layers.len() as u16).to_be_bytes());
        for layer in layers {
            v.extend_from_slice(&(-1i16).to_be_bytes());
            v.extend_from_slice(&(layer.len() as u32).to_be_bytes());
            v.extend_from_slice(layer);
        }
        Bytes::from(v)
    }

    #[test]
    fn test_parse_layers() {
        let data = block(1, &[&[0xAF, 0x1F, 0, 0], &[0, 8, 0, 0, 0, 0]]);
        let len = data.len();
        let mut c = Cursor::new(data);
        let b = ProductSymbologyBlock::parse(&mut c).unwrap();
        assert_eq!(b.layers.len(), 2);
        assert_eq!(b.layers[0].first_packet_code(), Some(0xAF1F));
        assert_eq!(b.layers[1].first_packet_code(), Some(8));
        assert_eq!(c.position(), len);
    }

    #[test]
    fn test_rejects_bad_framing() {
        assert!(matches!(
            ProductSymbologyBlock::parse(&mut Cursor::new(block(2, &[&[0, 1]]))),
            Err(DecodeError::InvalidDiscriminator { .. })
        ));
        assert!(matches!(
            ProductSymbologyBlock::parse(&mut Cursor::new(block(1, &[]))),
            Err(DecodeError::InvalidField { .. })
        ));
        let layer: &[u8] = &[0, 1];
        let many = vec![layer; 19];
        assert!(matches!(
            ProductSymbologyBlock::parse(&mut Cursor::new(block(1, &many))),
            Err(DecodeError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_truncated_layer() {
        let data = block(1, &[&[1, 2, 3, 4, 5, 6]]);
        let short = data.slice(..data.len() - 2);
        let err = ProductSymbologyBlock::parse(&mut Cursor::new(short)).unwrap_err();
        assert!(err.is_truncation());
    }
}
