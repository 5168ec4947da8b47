//! Level II message header (16 bytes).
//!
//! Every RDA message starts with this header. The message type byte is the
//! discriminator used by [`crate::MessageFactory`] to choose a decoder.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::warn;

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

/// Size of the Level II message header in bytes.
pub const MESSAGE_HEADER_SIZE: usize = 16;

/// Size field value signalling that the segment fields carry the message size in bytes.
pub const LARGE_MESSAGE_SIZE_FLAG: u16 = 65535;

const MAX_MILLISECONDS_OF_DAY: u32 = 86_399_999;

/// Converts a modified Julian date (day 1 = 1 January 1970) and an offset
/// past midnight to a UTC timestamp.
pub fn julian_to_datetime(julian_date: u16, milliseconds_of_day: u32) -> Option<DateTime<Utc>> {
    let epoch = DateTime::<Utc>::from_timestamp(0, 0)?;
    epoch.checked_add_signed(
        Duration::days(i64::from(julian_date) - 1)
            + Duration::milliseconds(i64::from(milliseconds_of_day)),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageHeader {
    /// Message size in halfwords, including this header
    pub message_size: u16,
    pub rda_redundant_channel: u8,
    pub message_type: u8,
    pub id_sequence_number: u16,
    pub julian_date: u16,
    pub milliseconds_of_day: u32,
    pub number_of_message_segments: u16,
    pub message_segment_number: u16,
}

impl MessageHeader {
    /// Reads and validates a header at the cursor position.
    pub fn parse(cursor: &mut Cursor) -> DecodeResult<Self> {
        let header = Self {
            message_size: cursor.read_u16()?,
            rda_redundant_channel: cursor.read_u8()?,
            message_type: cursor.read_u8()?,
            id_sequence_number: cursor.read_u16()?,
            julian_date: cursor.read_u16()?,
            milliseconds_of_day: cursor.read_u32()?,
            number_of_message_segments: cursor.read_u16()?,
            message_segment_number: cursor.read_u16()?,
        };
        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> DecodeResult<()> {
        if self.message_size < 9 {
            warn!(message_size = self.message_size, "Invalid message size");
            return Err(DecodeError::invalid_field("message size", self.message_size));
        }
        if self.julian_date < 1 {
            warn!(julian_date = self.julian_date, "Invalid date");
            return Err(DecodeError::invalid_field("julian date", self.julian_date));
        }
        if self.milliseconds_of_day > MAX_MILLISECONDS_OF_DAY {
            warn!(
                milliseconds = self.milliseconds_of_day,
                "Invalid milliseconds"
            );
            return Err(DecodeError::invalid_field(
                "milliseconds of day",
                self.milliseconds_of_day,
            ));
        }
        if !self.is_large_message() && self.message_segment_number > self.number_of_message_segments
        {
            warn!(
                segment = self.message_segment_number,
                total = self.number_of_message_segments,
                "Invalid segment"
            );
            return Err(DecodeError::invalid_field(
                "message segment",
                format!(
                    "{}/{}",
                    self.message_segment_number, self.number_of_message_segments
                ),
            ));
        }
        Ok(())
    }

    /// The message type discriminator.
    pub fn message_type(&self) -> u8 {
        self.message_type
    }

    fn is_large_message(&self) -> bool {
        self.message_size == LARGE_MESSAGE_SIZE_FLAG
    }

    /// Total message size in bytes, including the header.
    pub fn message_size_bytes(&self) -> usize {
        if self.is_large_message() {
            (usize::from(self.number_of_message_segments) << 16)
                | usize::from(self.message_segment_number)
        } else {
            usize::from(self.message_size) * 2
        }
    }

    /// Size of the message body following the header, in bytes.
    pub fn data_size(&self) -> usize {
        self.message_size_bytes().saturating_sub(MESSAGE_HEADER_SIZE)
    }

    pub fn segment_count(&self) -> u16 {
        if self.is_large_message() {
            1
        } else {
            self.number_of_message_segments.max(1)
        }
    }

    pub fn segment_number(&self) -> u16 {
        if self.is_large_message() {
            1
        } else {
            self.message_segment_number.max(1)
        }
    }

    pub fn is_segmented(&self) -> bool {
        self.segment_count() > 1
    }

    pub fn generation_time(&self) -> Option<DateTime<Utc>> {
        julian_to_datetime(self.julian_date, self.milliseconds_of_day)
    }
}
