//! Message dispatch.
//!
//! [`MessageFactory`] reads a message header, picks the decoder for the
//! message type, and checks the bytes the decoder consumed against the size
//! the header declared. It owns the segment buffer used to reassemble
//! multi-segment Level II messages, so one factory should be used per
//! stream of messages.

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::DecoderConfig;
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::header::{MessageHeader, MESSAGE_HEADER_SIZE};
use crate::level2::{
    ClutterFilterBypassMap, ClutterFilterMap, DigitalRadarData, DigitalRadarDataGeneric,
    PerformanceMaintenanceData, RdaAdaptationData, RdaStatusData, VolumeCoveragePatternData,
};
use crate::level3::general_status::GENERAL_STATUS_MESSAGE_CODE;
use crate::level3::radar_coded::RADAR_CODED_MESSAGE_CODE;
use crate::level3::storm_tracking::STORM_TRACKING_PRODUCT_CODE;
use crate::level3::tabular_product::is_tabular_product;
use crate::level3::{
    is_graphic_product, GeneralStatusMessage, GraphicProductMessage, Level3MessageHeader,
    RadarCodedMessage, StormTrackingInformationMessage, TabularProductMessage,
};
use crate::message::{Message, MessageFamily, UnrecognizedMessage};
use crate::segments::{SegmentAssembler, SegmentOutcome};

/// Level II message types.
pub mod message_type {
    pub const DIGITAL_RADAR_DATA: u8 = 1;
    pub const RDA_STATUS_DATA: u8 = 2;
    pub const PERFORMANCE_MAINTENANCE_DATA: u8 = 3;
    pub const VOLUME_COVERAGE_PATTERN: u8 = 5;
    pub const CLUTTER_FILTER_BYPASS_MAP: u8 = 13;
    pub const CLUTTER_FILTER_MAP: u8 = 15;
    pub const RDA_ADAPTATION_DATA: u8 = 18;
    pub const DIGITAL_RADAR_DATA_GENERIC: u8 = 31;
}

/// Result of feeding one Level II message to the factory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level2MessageInfo {
    pub header: MessageHeader,
    /// `None` while a segmented message is still being reassembled
    pub message: Option<Message>,
    /// Bytes occupied by this message, header included
    pub bytes_consumed: usize,
}

#[derive(Debug)]
pub struct MessageFactory {
    config: DecoderConfig,
    assembler: SegmentAssembler,
}

impl Default for MessageFactory {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

impl MessageFactory {
    pub fn new(config: DecoderConfig) -> Self {
        let assembler = SegmentAssembler::new(config.max_reassembly_bytes, config.max_segments);
        Self { config, assembler }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Drops any partially reassembled message.
    pub fn reset(&mut self) {
        self.assembler.reset();
    }

    /// Decodes the Level II message at the start of `data`. Trailing bytes
    /// beyond the declared message size are ignored.
    pub fn decode_level2(&mut self, data: Bytes) -> DecodeResult<Level2MessageInfo> {
        let mut c = Cursor::new(data.clone());
        let header = MessageHeader::parse(&mut c)?;
        let size = header.message_size_bytes();
        if data.len() < size {
            warn!(
                message_type = header.message_type(),
                declared = size,
                available = data.len(),
                "Message extends past end of input"
            );
            return Err(DecodeError::truncated(size, data.len()));
        }

        trace!(
            message_type = header.message_type(),
            size,
            segment = header.segment_number(),
            segments = header.segment_count(),
            "Found message"
        );

        let message = if header.is_segmented() {
            let payload = data.slice(MESSAGE_HEADER_SIZE..size.max(MESSAGE_HEADER_SIZE));
            match self.assembler.push(&header, payload)? {
                SegmentOutcome::Pending => None,
                SegmentOutcome::Complete(body) => {
                    let declared = body.len();
                    debug!(
                        message_type = header.message_type(),
                        size = declared,
                        "Reassembled segmented message"
                    );
                    let mut body = Cursor::new(body);
                    Some(self.decode_level2_body(&header, &mut body, declared)?)
                }
            }
        } else {
            Some(self.decode_level2_body(&header, &mut c, header.data_size())?)
        };

        Ok(Level2MessageInfo {
            header,
            message,
            bytes_consumed: size,
        })
    }

    /// Runs the decoder for the header's message type with the cursor at the
    /// start of the body, then checks consumption against `declared`.
    fn decode_level2_body(
        &self,
        header: &MessageHeader,
        c: &mut Cursor,
        declared: usize,
    ) -> DecodeResult<Message> {
        let start = c.position();

        let message = match header.message_type() {
            message_type::DIGITAL_RADAR_DATA => {
                Message::DigitalRadarData(DigitalRadarData::parse(c)?)
            }
            message_type::DIGITAL_RADAR_DATA_GENERIC => {
                Message::DigitalRadarDataGeneric(DigitalRadarDataGeneric::parse(c)?)
            }
            message_type::VOLUME_COVERAGE_PATTERN => Message::VolumeCoveragePattern(
                VolumeCoveragePatternData::parse(c, self.config.strict_vcp_size)?,
            ),
            message_type::RDA_ADAPTATION_DATA => {
                Message::RdaAdaptation(Box::new(RdaAdaptationData::parse(c)?))
            }
            message_type::PERFORMANCE_MAINTENANCE_DATA => {
                Message::PerformanceMaintenance(Box::new(PerformanceMaintenanceData::parse(c)?))
            }
            message_type::RDA_STATUS_DATA => Message::RdaStatus(RdaStatusData::parse(c)?),
            message_type::CLUTTER_FILTER_BYPASS_MAP => {
                Message::ClutterFilterBypassMap(Box::new(ClutterFilterBypassMap::parse(c)?))
            }
            message_type::CLUTTER_FILTER_MAP => {
                Message::ClutterFilterMap(Box::new(ClutterFilterMap::parse(c)?))
            }
            other => {
                trace!(message_type = other, payload = declared, "Unrecognized message type");
                return Ok(Message::Unrecognized(UnrecognizedMessage {
                    family: MessageFamily::Level2,
                    message_type: i16::from(other),
                    payload_len: declared,
                }));
            }
        };

        check_consumed(header.message_type().into(), c.position() - start, declared)?;
        Ok(message)
    }

    /// Decodes one Level III message at the start of `data`.
    pub fn decode_level3(&self, data: Bytes) -> DecodeResult<Message> {
        decode_level3(data)
    }
}

fn check_consumed(message_type: i64, consumed: usize, declared: usize) -> DecodeResult<()> {
    if consumed > declared {
        warn!(message_type, consumed, declared, "Decoder read past declared message size");
        return Err(DecodeError::SizeMismatch { declared, consumed });
    }
    if consumed < declared {
        trace!(message_type, consumed, declared, "Message shorter than declared size");
    }
    Ok(())
}

/// Decodes a single, self-contained Level II message.
///
/// A segment of a multi-segment message cannot be decoded on its own and
/// yields [`DecodeError::IncompleteMessage`]; use a [`MessageFactory`] to
/// reassemble those.
pub fn decode(data: Bytes) -> DecodeResult<Message> {
    let header = MessageHeader::parse(&mut Cursor::new(data.clone()))?;
    if header.is_segmented() {
        return Err(DecodeError::IncompleteMessage {
            received: header.segment_number(),
            total: header.segment_count(),
        });
    }
    let info = MessageFactory::default().decode_level2(data)?;
    info.message.ok_or(DecodeError::IncompleteMessage {
        received: header.segment_number(),
        total: header.segment_count(),
    })
}

/// Decodes one Level III message: header, then the product decoder for
/// its message code.
pub fn decode_level3(data: Bytes) -> DecodeResult<Message> {
    let mut c = Cursor::new(data.clone());
    let header = Level3MessageHeader::parse(&mut c)?;
    let length = header.length_of_message as usize;
    if data.len() < length {
        warn!(
            message_code = header.message_code(),
            declared = length,
            available = data.len(),
            "Message extends past end of input"
        );
        return Err(DecodeError::truncated(length, data.len()));
    }

    let code = header.message_code();
    let start = c.position();
    let declared = length - start;
    debug!(message_code = code, length, "Found Level III message");

    let message = if code == GENERAL_STATUS_MESSAGE_CODE {
        Message::GeneralStatus(Box::new(GeneralStatusMessage::parse(&mut c, header)?))
    } else if code == RADAR_CODED_MESSAGE_CODE {
        Message::RadarCoded(RadarCodedMessage::parse(&mut c, header)?)
    } else if is_tabular_product(code) {
        Message::TabularProduct(TabularProductMessage::parse(&mut c, header)?)
    } else if code == STORM_TRACKING_PRODUCT_CODE {
        Message::StormTrackingInformation(StormTrackingInformationMessage::parse(&mut c, header)?)
    } else if is_graphic_product(code) {
        Message::GraphicProduct(GraphicProductMessage::parse(&mut c, header)?)
    } else {
        debug!(message_code = code, "Unknown Level III message code");
        return Ok(Message::Unrecognized(UnrecognizedMessage {
            family: MessageFamily::Level3,
            message_type: code,
            payload_len: declared,
        }));
    };

    check_consumed(code.into(), c.position() - start, declared)?;
    Ok(message)
}
