//! Level III message header (18 bytes).

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::warn;

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::header::julian_to_datetime;

/// Size of the Level III message header in bytes.
pub const LEVEL3_MESSAGE_HEADER_SIZE: usize = 18;

const MAX_MESSAGE_LENGTH: u32 = 1_329_270;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level3MessageHeader {
    pub message_code: i16,
    pub date_of_message: u16,
    /// Seconds past midnight
    pub time_of_message: u32,
    /// Message length in bytes, including this header
    pub length_of_message: u32,
    pub source_id: u16,
    pub destination_id: u16,
    pub number_of_blocks: u16,
}

impl Level3MessageHeader {
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let header = Self {
            message_code: c.read_i16()?,
            date_of_message: c.read_u16()?,
            time_of_message: c.read_u32()?,
            length_of_message: c.read_u32()?,
            source_id: c.read_u16()?,
            destination_id: c.read_u16()?,
            number_of_blocks: c.read_u16()?,
        };
        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> DecodeResult<()> {
        let code = self.message_code;
        if code < -131 || (code > -16 && code < 0) || code > 211 {
            warn!(message_code = code, "Invalid message code");
            return Err(DecodeError::invalid_discriminator("message code", code));
        }
        if !(1..=32767).contains(&self.date_of_message) {
            warn!(date = self.date_of_message, "Invalid date");
            return Err(DecodeError::invalid_field("date of message", self.date_of_message));
        }
        if self.time_of_message > 86399 {
            warn!(time = self.time_of_message, "Invalid time");
            return Err(DecodeError::invalid_field("time of message", self.time_of_message));
        }
        if !(LEVEL3_MESSAGE_HEADER_SIZE as u32..=MAX_MESSAGE_LENGTH).contains(&self.length_of_message) {
            warn!(length = self.length_of_message, "Invalid length");
            return Err(DecodeError::invalid_field(
                "length of message",
                self.length_of_message,
            ));
        }
        if self.source_id > 999 {
            warn!(source_id = self.source_id, "Invalid source ID");
            return Err(DecodeError::invalid_field("source id", self.source_id));
        }
        if self.destination_id > 999 {
            warn!(destination_id = self.destination_id, "Invalid destination ID");
            return Err(DecodeError::invalid_field("destination id", self.destination_id));
        }
        if !(1..=51).contains(&self.number_of_blocks) {
            warn!(blocks = self.number_of_blocks, "Invalid block count");
            return Err(DecodeError::invalid_field("number of blocks", self.number_of_blocks));
        }
        Ok(())
    }

    pub fn message_code(&self) -> i16 {
        self.message_code
    }

    pub fn message_time(&self) -> Option<DateTime<Utc>> {
        let midnight = julian_to_datetime(self.date_of_message, 0)?;
        midnight.checked_add_signed(Duration::seconds(i64::from(self.time_of_message)))
    }
}
