//! Reassembly of multi-segment Level II messages.
//!
//! Messages larger than one frame (RDA adaptation data, clutter maps) are
//! split into segments, each carrying its own [`MessageHeader`]. The
//! assembler concatenates segment payloads in order and hands back the full
//! body once the last segment arrives.

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace, warn};

use crate::error::{DecodeError, DecodeResult};
use crate::header::MessageHeader;

/// Result of feeding one segment to the assembler.
#[derive(Debug)]
pub enum SegmentOutcome {
    /// More segments are required
    Pending,
    /// The final segment arrived; holds the concatenated message body
    Complete(Bytes),
}

#[derive(Debug)]
pub struct SegmentAssembler {
    buffer: BytesMut,
    message_type: Option<u8>,
    expected_segments: u16,
    next_segment: u16,
    max_bytes: usize,
    max_segments: u16,
}

impl SegmentAssembler {
    pub fn new(max_bytes: usize, max_segments: u16) -> Self {
        Self {
            buffer: BytesMut::new(),
            message_type: None,
            expected_segments: 0,
            next_segment: 1,
            max_bytes,
            max_segments,
        }
    }

    /// Discards any partially buffered message.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.message_type = None;
        self.expected_segments = 0;
        self.next_segment = 1;
    }

    pub fn is_idle(&self) -> bool {
        self.message_type.is_none()
    }

    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Adds one segment's payload (the bytes following its header).
    pub fn push(&mut self, header: &MessageHeader, payload: Bytes) -> DecodeResult<SegmentOutcome> {
        let segment = header.segment_number();
        let total = header.segment_count();

        trace!(
            message_type = header.message_type(),
            segment,
            total,
            "Found message segment"
        );

        if total > self.max_segments {
            warn!(total, max = self.max_segments, "Too many message segments");
            self.reset();
            return Err(DecodeError::invalid_field("number of message segments", total));
        }

        if segment == 1 {
            if !self.is_idle() {
                debug!(
                    buffered = self.buffer.len(),
                    "Discarding incomplete segmented message"
                );
            }
            self.reset();
            self.message_type = Some(header.message_type());
            self.expected_segments = total;
            self.buffer.reserve(payload.len().saturating_mul(usize::from(total)).min(self.max_bytes));
        } else if self.message_type != Some(header.message_type())
            || segment != self.next_segment
            || total != self.expected_segments
        {
            warn!(
                message_type = header.message_type(),
                segment,
                expected = self.next_segment,
                total,
                "Out of sequence message segment"
            );
            self.reset();
            return Err(DecodeError::invalid_field(
                "message segment",
                format!("{}/{}", segment, total),
            ));
        }

        if self.buffer.len() + payload.len() > self.max_bytes {
            warn!(
                buffered = self.buffer.len(),
                incoming = payload.len(),
                max = self.max_bytes,
                "Reassembled message exceeds size limit"
            );
            self.reset();
            return Err(DecodeError::invalid_field(
                "reassembled message size",
                self.max_bytes,
            ));
        }

        self.buffer.extend_from_slice(&payload);
        self.next_segment += 1;

        if segment == total {
            let body = self.buffer.split().freeze();
            self.reset();
            Ok(SegmentOutcome::Complete(body))
        } else {
            Ok(SegmentOutcome::Pending)
        }
    }
}
