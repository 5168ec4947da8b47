//! WMO transmission framing around Level III products.
//!
//! ```text
//! [SOH]\r\r\n
//! nnn \r\r\n                      (sequence number, optional with SOH)
//! SDUS54 KOUN 071200 [BBB]\r\r\n  (T1T2A1A2ii CCCC YYGGgg)
//! N0QTLX\r\r\n                    (AWIPS NNNxxx)
//! ```
//!
//! Compressed products additionally carry a CCB header and a second WMO
//! header inside the zlib payload.

use serde::Serialize;
use tracing::debug;

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

const SOH: u8 = 0x01;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WmoHeader {
    pub sequence_number: Option<String>,
    /// T1T2
    pub data_type: String,
    /// A1A2
    pub geographic_designator: String,
    /// ii
    pub bulletin_id: String,
    pub icao: String,
    /// YYGGgg
    pub date_time: String,
    pub bbb_indicator: Option<String>,
    /// NNN
    pub product_category: String,
    /// xxx
    pub product_designator: String,
}

impl WmoHeader {
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let mut sequence_number = None;
        if c.peek_u8() == Some(SOH) {
            read_line(c)?;
            let line = read_line(c)?;
            let line = line.trim_end();
            if !line.is_empty() {
                sequence_number = Some(line.to_string());
            }
        }

        let wmo_line = read_line(c)?;
        let awips_line = read_line(c)?;

        let tokens: Vec<&str> = wmo_line.split_whitespace().collect();
        if !(3..=4).contains(&tokens.len()) {
            debug!(line = %wmo_line, "Invalid number of WMO tokens");
            return Err(DecodeError::invalid_field("wmo heading", &wmo_line));
        }
        if !tokens[0].is_ascii() || tokens[0].len() != 6 {
            debug!(identifier = tokens[0], "WMO identifier malformed");
            return Err(DecodeError::invalid_field("wmo identifier", tokens[0]));
        }
        if tokens[1].len() != 4 {
            debug!(icao = tokens[1], "ICAO malformed");
            return Err(DecodeError::invalid_field("wmo icao", tokens[1]));
        }
        if tokens[2].len() != 6 {
            debug!(date_time = tokens[2], "Date/time malformed");
            return Err(DecodeError::invalid_field("wmo date/time", tokens[2]));
        }
        if tokens.len() == 4 && tokens[3].len() != 3 {
            debug!(bbb = tokens[3], "BBB indicator malformed");
            return Err(DecodeError::invalid_field("wmo bbb indicator", tokens[3]));
        }

        let awips = awips_line.trim_end();
        if !awips.is_ascii() || awips.len() != 6 {
            debug!(line = %awips_line, "AWIPS identifier line bad size");
            return Err(DecodeError::invalid_field("awips identifier", awips));
        }

        let header = Self {
            sequence_number,
            data_type: tokens[0][0..2].to_string(),
            geographic_designator: tokens[0][2..4].to_string(),
            bulletin_id: tokens[0][4..6].to_string(),
            icao: tokens[1].to_string(),
            date_time: tokens[2].to_string(),
            bbb_indicator: tokens.get(3).map(|s| s.to_string()),
            product_category: awips[0..3].to_string(),
            product_designator: awips[3..6].to_string(),
        };
        debug!(
            data_type = %header.data_type,
            icao = %header.icao,
            date_time = %header.date_time,
            category = %header.product_category,
            "Parsed WMO header"
        );
        Ok(header)
    }

    /// AWIPS identifier, e.g. `N0QTLX`.
    pub fn awips_id(&self) -> String {
        format!("{}{}", self.product_category, self.product_designator)
    }
}

/// Reads one line, stripping the `\n` terminator and any preceding `\r`s.
fn read_line(c: &mut Cursor) -> DecodeResult<String> {
    let rest = c.rest();
    let Some(end) = rest.iter().position(|&b| b == b'\n') else {
        return Err(DecodeError::truncated(rest.len() + 1, rest.len()));
    };
    let line = c.read_string(end)?;
    c.skip(1)?;
    Ok(line.trim_end_matches('\r').to_string())
}

/// Communications Control Block preceding the inner WMO header of a
/// zlib-compressed product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CcbHeader {
    pub ff: u8,
    /// CCB length in halfwords
    pub ccb_length: u16,
    pub mode: u8,
    pub submode: u8,
    pub precedence: char,
    pub classification: char,
    pub message_originator: String,
    pub category: u8,
    pub subcategory: u8,
    pub user_defined: u16,
    pub year: u8,
    pub month: u8,
    pub tor_day: u8,
    pub tor_hour: u8,
    pub tor_minute: u8,
    pub message_destinations: Vec<String>,
}

impl CcbHeader {
    /// Parses the block and leaves the cursor at the end of the length it
    /// declares.
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let start = c.position();
        let word = c.read_u16()?;
        let mode = c.read_u8()?;
        let submode = c.read_u8()?;
        let precedence = char::from(c.read_u8()?);
        let classification = char::from(c.read_u8()?);
        let message_originator = c.read_string(4)?;
        let category = c.read_u8()?;
        let subcategory = c.read_u8()?;
        let user_defined = c.read_u16()?;
        let year = c.read_u8()?;
        let month = c.read_u8()?;
        let tor_day = c.read_u8()?;
        let tor_hour = c.read_u8()?;
        let tor_minute = c.read_u8()?;
        let number_of_destinations = c.read_u8()?;

        let mut message_destinations = Vec::with_capacity(usize::from(number_of_destinations));
        for _ in 0..number_of_destinations {
            message_destinations.push(c.read_string(4)?);
        }

        let ccb_length = word & 0x3FFF;
        let consumed = c.position() - start;
        let declared = usize::from(ccb_length) * 2;
        if declared > consumed {
            c.skip(declared - consumed)?;
        }

        Ok(Self {
            ff: (word >> 14) as u8,
            ccb_length,
            mode,
            submode,
            precedence,
            classification,
            message_originator,
            category,
            subcategory,
            user_defined,
            year,
            month,
            tor_day,
            tor_hour,
            tor_minute,
            message_destinations,
        })
    }
}
