//! Level II Archive (AR2V) files.
//!
//! A 24-byte volume header record is followed by message records. Each
//! record starts with 12 bytes inserted by the communications manager; the
//! messages within are separated by zero padding. Records compressed by LDM
//! (a control word followed by a bzip2 stream) are not supported.

use std::collections::BTreeMap;
use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::DecoderConfig;
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::factory::MessageFactory;
use crate::header::{julian_to_datetime, MessageHeader, MESSAGE_HEADER_SIZE};
use crate::level2::{RadialMoments, RdaAdaptationData, RdaStatusData, VolumeCoveragePatternData};
use crate::message::Message;

pub const VOLUME_HEADER_SIZE: usize = 24;
const CTM_HEADER_SIZE: usize = 12;
const TAPE_FILENAME_PREFIX: &str = "AR2V";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeHeader {
    /// e.g. `AR2V0006.`
    pub tape_filename: String,
    pub extension_number: String,
    pub julian_date: u32,
    pub milliseconds: u32,
    pub icao: String,
}

impl VolumeHeader {
    pub fn parse(c: &mut Cursor) -> DecodeResult<Self> {
        let header = Self {
            tape_filename: c.read_string(9)?,
            extension_number: c.read_string(3)?,
            julian_date: c.read_u32()?,
            milliseconds: c.read_u32()?,
            icao: c.read_string(4)?,
        };
        if !header.tape_filename.starts_with(TAPE_FILENAME_PREFIX) {
            warn!(filename = %header.tape_filename, "Invalid volume header");
            return Err(DecodeError::invalid_field("tape filename", &header.tape_filename));
        }
        debug!(
            filename = %header.tape_filename,
            extension = %header.extension_number,
            date = header.julian_date,
            time = header.milliseconds,
            icao = %header.icao,
            "Parsed volume header"
        );
        Ok(header)
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        julian_to_datetime(u16::try_from(self.julian_date).ok()?, self.milliseconds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level2Record {
    pub header: MessageHeader,
    pub message: Message,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level2File {
    pub volume_header: VolumeHeader,
    pub records: Vec<Level2Record>,
}

impl Level2File {
    pub fn open(path: impl AsRef<Path>, config: &DecoderConfig) -> DecodeResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading archive file");
        let data = std::fs::read(path)?;
        Self::from_bytes(Bytes::from(data), config)
    }

    pub fn from_bytes(data: Bytes, config: &DecoderConfig) -> DecodeResult<Self> {
        let mut c = Cursor::new(data);
        let volume_header = VolumeHeader::parse(&mut c)?;

        let rest = c.rest();
        if rest.len() >= 6 && &rest[4..6] == b"BZ" {
            warn!("LDM record compression not supported");
            return Err(DecodeError::unsupported("bzip2-compressed LDM records"));
        }

        let records = read_messages(&mut c, config)?;
        debug!(messages = records.len(), "Parsed archive messages");

        Ok(Self {
            volume_header,
            records,
        })
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.records.iter().map(|r| &r.message)
    }

    pub fn radials(&self) -> impl Iterator<Item = &dyn RadialMoments> {
        self.messages().filter_map(Message::as_radial)
    }

    /// Radials grouped by elevation number, in arrival order.
    pub fn elevation_scans(&self) -> BTreeMap<u16, Vec<&dyn RadialMoments>> {
        let mut scans: BTreeMap<u16, Vec<&dyn RadialMoments>> = BTreeMap::new();
        for radial in self.radials() {
            scans.entry(radial.elevation_number()).or_default().push(radial);
        }
        scans
    }

    pub fn volume_coverage_pattern(&self) -> Option<&VolumeCoveragePatternData> {
        self.messages().find_map(|m| match m {
            Message::VolumeCoveragePattern(v) => Some(v),
            _ => None,
        })
    }

    pub fn rda_adaptation(&self) -> Option<&RdaAdaptationData> {
        self.messages().find_map(|m| match m {
            Message::RdaAdaptation(r) => Some(r.as_ref()),
            _ => None,
        })
    }

    /// Latest RDA status reported in the volume.
    pub fn rda_status(&self) -> Option<&RdaStatusData> {
        self.messages()
            .filter_map(|m| match m {
                Message::RdaStatus(s) => Some(s),
                _ => None,
            })
            .last()
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.volume_header.start_time()
    }

    /// Collection time of the last radial.
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.radials().last().and_then(|r| r.collection_time())
    }
}

/// Reads the messages of one uncompressed record through a single factory,
/// so segmented messages are reassembled across the record.
fn read_messages(c: &mut Cursor, config: &DecoderConfig) -> DecodeResult<Vec<Level2Record>> {
    let mut factory = MessageFactory::new(config.clone());
    let mut records = Vec::new();

    if c.remaining() < CTM_HEADER_SIZE {
        return Ok(records);
    }
    c.skip(CTM_HEADER_SIZE)?;

    loop {
        let mut padding = 0usize;
        while c.peek_u16() == Some(0) {
            c.skip(2)?;
            padding += 2;
        }
        if padding > 0 {
            trace!(padding, "Next message offset by padding");
        }
        if c.remaining() < MESSAGE_HEADER_SIZE {
            break;
        }

        let rest = c.rest();
        let header = match MessageHeader::parse(&mut Cursor::new(rest.clone())) {
            Ok(h) => h,
            Err(e) => {
                warn!(error = %e, offset = c.position(), "Invalid message header");
                break;
            }
        };
        let size = header.message_size_bytes().max(MESSAGE_HEADER_SIZE);

        match factory.decode_level2(rest) {
            Ok(info) => match info.message {
                Some(message) if config.skip_unrecognized && message.is_unrecognized() => {}
                Some(message) => records.push(Level2Record {
                    header: info.header,
                    message,
                }),
                None => {}
            },
            Err(e) => {
                warn!(
                    error = %e,
                    message_type = header.message_type(),
                    "Skipping invalid message"
                );
            }
        }

        c.skip(size.min(c.remaining()))?;
    }

    Ok(records)
}
