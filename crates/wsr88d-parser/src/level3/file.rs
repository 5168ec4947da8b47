//! Level III product files.
//!
//! A file is a WMO header followed either by the product itself or by one
//! or more concatenated zlib streams. The inflated payload starts with a
//! CCB header and a second WMO header before the product.

use std::io::Read;
use std::path::Path;

use bytes::Bytes;
use flate2::bufread::ZlibDecoder;
use serde::Serialize;
use tracing::{debug, trace, warn};

use super::wmo::{CcbHeader, WmoHeader};
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::factory::decode_level3;
use crate::message::Message;

/// First byte of a zlib stream with the default window size.
const ZLIB_HEADER_BYTE: u8 = 0x78;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level3File {
    pub wmo_header: WmoHeader,
    pub ccb_header: Option<CcbHeader>,
    pub inner_header: Option<WmoHeader>,
    pub message: Message,
}

impl Level3File {
    pub fn open(path: impl AsRef<Path>) -> DecodeResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading Level III file");
        let data = std::fs::read(path)?;
        Self::from_bytes(Bytes::from(data))
    }

    pub fn from_bytes(data: Bytes) -> DecodeResult<Self> {
        let mut c = Cursor::new(data);
        let wmo_header = WmoHeader::parse(&mut c)?;

        if c.peek_u8() == Some(ZLIB_HEADER_BYTE) {
            let inflated = inflate_streams(&c.rest())?;
            let mut inner = Cursor::new(Bytes::from(inflated));
            let ccb_header = CcbHeader::parse(&mut inner)?;
            let inner_header = WmoHeader::parse(&mut inner)?;
            let message = decode_level3(inner.rest())?;
            Ok(Self {
                wmo_header,
                ccb_header: Some(ccb_header),
                inner_header: Some(inner_header),
                message,
            })
        } else {
            let message = decode_level3(c.rest())?;
            Ok(Self {
                wmo_header,
                ccb_header: None,
                inner_header: None,
                message,
            })
        }
    }

    pub fn product_code(&self) -> Option<i16> {
        self.message.product_description().map(|d| d.product_code)
    }
}

/// Inflates back-to-back zlib streams until the input no longer starts
/// with a zlib header.
fn inflate_streams(input: &[u8]) -> DecodeResult<Vec<u8>> {
    let mut output = Vec::new();
    let mut offset = 0usize;

    while input.get(offset) == Some(&ZLIB_HEADER_BYTE) {
        let mut decoder = ZlibDecoder::new(&input[offset..]);
        decoder.read_to_end(&mut output).map_err(|e| {
            warn!(error = %e, offset, "Error decompressing data");
            DecodeError::Decompression(e.to_string())
        })?;
        let consumed = decoder.total_in() as usize;
        trace!(offset, consumed, total_out = output.len(), "Inflated zlib stream");
        if consumed == 0 {
            break;
        }
        offset += consumed;
    }

    debug!(compressed = offset, decompressed = output.len(), "Decompressed product");
    Ok(output)
}
