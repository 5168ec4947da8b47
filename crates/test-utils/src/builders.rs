//! Builders for synthetic WSR-88D messages.
//!
//! Every builder writes big-endian wire bytes laid out the way the RDA and
//! RPG transmit them, so decoder tests can state their inputs field by
//! field instead of embedding opaque byte dumps. Dates and times default to
//! [`crate::fixtures::time`] and the site to [`crate::fixtures::site`].

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::fixtures::{site, time};

/// Appends big-endian fields to a byte buffer.
#[derive(Debug, Default, Clone)]
pub struct BigEndianWriter {
    buf: Vec<u8>,
}

impl BigEndianWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn i16(&mut self, v: i16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn bytes(&mut self, v: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(v);
        self
    }

    /// Writes `s` into a fixed-width field, NUL padded or truncated.
    pub fn text(&mut self, s: &str, width: usize) -> &mut Self {
        let mut field = s.as_bytes().to_vec();
        field.resize(width, 0);
        self.buf.extend_from_slice(&field);
        self
    }

    pub fn zeros(&mut self, n: usize) -> &mut Self {
        self.buf.resize(self.buf.len() + n, 0);
        self
    }

    /// Pads with one zero byte if the length is odd.
    pub fn pad_to_halfword(&mut self) -> &mut Self {
        if self.buf.len() % 2 == 1 {
            self.buf.push(0);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// ============================================================================
// Level II
// ============================================================================

pub const LEVEL2_HEADER_SIZE: usize = 16;

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

/// Writes a 16-byte Level II message header.
///
/// # Arguments
///
/// * `message_type` - Message type byte
/// * `size_halfwords` - Message size in halfwords, header included
/// * `segments` - Number of message segments
/// * `segment` - Segment number of this message
pub fn level2_header(message_type: u8, size_halfwords: u16, segments: u16, segment: u16) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.u16(size_halfwords)
        .u8(8)
        .u8(message_type)
        .u16(1)
        .u16(time::JULIAN_DATE)
        .u32(time::MILLISECONDS)
        .u16(segments)
        .u16(segment);
    w.into_bytes()
}

/// Wraps `body` in a single-segment Level II message. Odd-length bodies
/// are padded to a halfword boundary.
pub fn level2_message(message_type: u8, body: &[u8]) -> Vec<u8> {
    let mut body = body.to_vec();
    if body.len() % 2 == 1 {
        body.push(0);
    }
    let size = ((LEVEL2_HEADER_SIZE + body.len()) / 2) as u16;
    let mut message = level2_header(message_type, size, 1, 1);
    message.extend_from_slice(&body);
    message
}

/// Splits `body` into segments of at most `segment_payload` bytes, each
/// with its own header.
pub fn segmented_level2_message(
    message_type: u8,
    body: &[u8],
    segment_payload: usize,
) -> Vec<Vec<u8>> {
    assert!(segment_payload % 2 == 0, "segment payload must be whole halfwords");
    let chunks: Vec<&[u8]> = body.chunks(segment_payload).collect();
    let total = chunks.len() as u16;
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut chunk = chunk.to_vec();
            if chunk.len() % 2 == 1 {
                chunk.push(0);
            }
            let size = ((LEVEL2_HEADER_SIZE + chunk.len()) / 2) as u16;
            let mut message = level2_header(message_type, size, total, i as u16 + 1);
            message.extend_from_slice(&chunk);
            message
        })
        .collect()
}

/// Message 1 radial: a 100-byte header and up to three 8-bit moment arrays.
#[derive(Debug, Clone)]
pub struct LegacyRadial {
    pub azimuth_number: u16,
    pub azimuth_angle_raw: u16,
    pub elevation_number: u16,
    pub elevation_angle_raw: u16,
    /// 2 for 0.5 m/s, 4 for 1.0 m/s
    pub velocity_resolution: u16,
    pub reflectivity: Vec<u8>,
    pub velocity: Vec<u8>,
    pub spectrum_width: Vec<u8>,
}

impl Default for LegacyRadial {
    fn default() -> Self {
        Self {
            azimuth_number: 1,
            azimuth_angle_raw: 0,
            elevation_number: 1,
            elevation_angle_raw: 0,
            velocity_resolution: 2,
            reflectivity: Vec::new(),
            velocity: Vec::new(),
            spectrum_width: Vec::new(),
        }
    }
}

impl LegacyRadial {
    pub const HEADER_SIZE: u16 = 100;

    /// Message body. Arrays follow the header in REF, VEL, SW order; empty
    /// arrays get a zero pointer.
    pub fn encode_body(&self) -> Vec<u8> {
        let pointer = |offset: usize, data: &[u8]| -> u16 {
            if data.is_empty() {
                0
            } else {
                offset as u16
            }
        };
        let ref_ptr = pointer(usize::from(Self::HEADER_SIZE), &self.reflectivity);
        let vel_off = usize::from(Self::HEADER_SIZE) + self.reflectivity.len();
        let vel_ptr = pointer(vel_off, &self.velocity);
        let sw_ptr = pointer(vel_off + self.velocity.len(), &self.spectrum_width);
        let doppler_bins = self.velocity.len().max(self.spectrum_width.len());

        let mut w = BigEndianWriter::new();
        w.u32(time::MILLISECONDS)
            .u16(time::JULIAN_DATE)
            .u16(1_175) // unambiguous range, 0.1 km
            .u16(self.azimuth_angle_raw)
            .u16(self.azimuth_number)
            .u16(1) // radial status
            .u16(self.elevation_angle_raw)
            .u16(self.elevation_number)
            .i16(0) // surveillance range
            .i16(-375) // doppler range
            .u16(1_000)
            .u16(250)
            .u16(self.reflectivity.len() as u16)
            .u16(doppler_bins as u16)
            .u16(1) // cut sector
            .f32(-33.0)
            .u16(ref_ptr)
            .u16(vel_ptr)
            .u16(sw_ptr)
            .u16(self.velocity_resolution)
            .u16(12)
            .zeros(46)
            .u16(2_800) // nyquist, 0.01 m/s
            .i16(-12)
            .u16(0)
            .u16(0);
        w.bytes(&self.reflectivity)
            .bytes(&self.velocity)
            .bytes(&self.spectrum_width);
        w.into_bytes()
    }

    pub fn encode(&self) -> Vec<u8> {
        level2_message(message_type::DIGITAL_RADAR_DATA, &self.encode_body())
    }
}

/// Volume data block (`VOL`), 44 bytes.
pub fn volume_block(vcp: u16) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.u8(b'R')
        .bytes(b"VOL")
        .u16(44)
        .u8(2)
        .u8(0)
        .f32(site::LATITUDE)
        .f32(site::LONGITUDE)
        .i16(389)
        .u16(20)
        .f32(-44.5)
        .f32(700.0)
        .f32(700.0)
        .f32(0.25)
        .f32(60.0)
        .u16(vcp)
        .u16(0);
    w.into_bytes()
}

/// Elevation data block (`ELV`), 12 bytes.
pub fn elevation_block(atmos: i16) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.u8(b'R').bytes(b"ELV").u16(12).i16(atmos).f32(-44.5);
    w.into_bytes()
}

/// Radial data block (`RAD`), 28 bytes.
pub fn radial_block(unambiguous_range: u16, nyquist_velocity: u16) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.u8(b'R')
        .bytes(b"RAD")
        .u16(28)
        .u16(unambiguous_range)
        .f32(-82.0)
        .f32(-82.5)
        .u16(nyquist_velocity)
        .u16(0)
        .f32(-44.5)
        .f32(-44.8);
    w.into_bytes()
}

/// Moment data block. `name` is the 3-character block name (`"SW "` has
/// a trailing space); gates are written at `word_size` bits.
pub fn moment_block(name: &str, word_size: u8, gates: &[u16], scale: f32, offset: f32) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.u8(b'D')
        .text(name, 3)
        .u32(0)
        .u16(gates.len() as u16)
        .u16(2_125)
        .u16(250)
        .u16(16)
        .i16(16)
        .u8(0)
        .u8(word_size)
        .f32(scale)
        .f32(offset);
    for &g in gates {
        if word_size == 16 {
            w.u16(g);
        } else {
            w.u8(g as u8);
        }
    }
    w.pad_to_halfword();
    w.into_bytes()
}

/// Message 31 radial: a 32-byte header, block pointers, then the blocks in
/// order.
#[derive(Debug, Clone)]
pub struct GenericRadial {
    pub radar_identifier: String,
    pub azimuth_number: u16,
    pub azimuth_angle: f32,
    pub compression_indicator: u8,
    pub azimuth_resolution_spacing: u8,
    pub elevation_number: u8,
    pub elevation_angle: f32,
    pub blocks: Vec<Vec<u8>>,
}

impl Default for GenericRadial {
    fn default() -> Self {
        Self {
            radar_identifier: site::ICAO.to_string(),
            azimuth_number: 1,
            azimuth_angle: 0.25,
            compression_indicator: 0,
            azimuth_resolution_spacing: 1,
            elevation_number: 1,
            elevation_angle: 0.48,
            blocks: Vec::new(),
        }
    }
}

impl GenericRadial {
    pub const HEADER_SIZE: usize = 32;

    /// A radial carrying `VOL`, `ELV`, `RAD` and the given moment blocks.
    pub fn with_moments(moments: Vec<Vec<u8>>) -> Self {
        let mut blocks = vec![volume_block(212), elevation_block(-12), radial_block(1_175, 2_800)];
        blocks.extend(moments);
        Self {
            blocks,
            ..Default::default()
        }
    }

    pub fn encode_body(&self) -> Vec<u8> {
        let count = self.blocks.len();
        let mut offset = Self::HEADER_SIZE + 4 * count;
        let radial_length: usize = offset + self.blocks.iter().map(Vec::len).sum::<usize>();

        let mut w = BigEndianWriter::new();
        w.text(&self.radar_identifier, 4)
            .u32(time::MILLISECONDS)
            .u16(time::JULIAN_DATE)
            .u16(self.azimuth_number)
            .f32(self.azimuth_angle)
            .u8(self.compression_indicator)
            .u8(0)
            .u16(radial_length as u16)
            .u8(self.azimuth_resolution_spacing)
            .u8(0)
            .u8(self.elevation_number)
            .u8(1)
            .f32(self.elevation_angle)
            .u8(0)
            .u8(0)
            .u16(count as u16);
        for block in &self.blocks {
            w.u32(offset as u32);
            offset += block.len();
        }
        for block in &self.blocks {
            w.bytes(block);
        }
        w.into_bytes()
    }

    pub fn encode(&self) -> Vec<u8> {
        level2_message(message_type::DIGITAL_RADAR_DATA_GENERIC, &self.encode_body())
    }
}

/// One VCP elevation cut.
#[derive(Debug, Clone, Default)]
pub struct ElevationCutSpec {
    pub elevation_angle_raw: u16,
    pub waveform_type: u8,
    pub super_resolution: u8,
    pub supplemental_data: u16,
}

/// Volume coverage pattern (message 5).
#[derive(Debug, Clone)]
pub struct VcpSpec {
    pub pattern_number: u16,
    pub sequencing: u16,
    pub supplemental: u16,
    pub cuts: Vec<ElevationCutSpec>,
    /// Overrides the pattern size field, in halfwords
    pub size_override: Option<u16>,
}

impl Default for VcpSpec {
    fn default() -> Self {
        Self {
            pattern_number: 212,
            sequencing: 0,
            supplemental: 0,
            cuts: vec![ElevationCutSpec::default()],
            size_override: None,
        }
    }
}

impl VcpSpec {
    pub const HEADER_SIZE: usize = 22;
    pub const CUT_SIZE: usize = 46;

    pub fn encode_body(&self) -> Vec<u8> {
        let size = (Self::HEADER_SIZE + self.cuts.len() * Self::CUT_SIZE) / 2;
        let mut w = BigEndianWriter::new();
        w.u16(self.size_override.unwrap_or(size as u16))
            .u16(2)
            .u16(self.pattern_number)
            .u16(self.cuts.len() as u16)
            .u8(1)
            .u8(1)
            .u8(2)
            .u8(2)
            .zeros(4)
            .u16(self.sequencing)
            .u16(self.supplemental)
            .zeros(2);
        for cut in &self.cuts {
            w.u16(cut.elevation_angle_raw)
                .u8(1)
                .u8(cut.waveform_type)
                .u8(cut.super_resolution)
                .u8(1)
                .u16(28)
                .u16(0x2A00)
                .u16(16)
                .u16(28)
                .u16(28)
                .u16(28)
                .u16(28)
                .u16(28);
            // Sector 1, supplemental word, sector 2, EBC angle, sector 3
            w.u16(0).u16(5).u16(50);
            w.u16(cut.supplemental_data);
            w.u16(0).u16(5).u16(50);
            w.u16(0);
            w.u16(0).u16(5).u16(50);
            w.zeros(2);
        }
        w.into_bytes()
    }

    pub fn encode(&self) -> Vec<u8> {
        level2_message(message_type::VOLUME_COVERAGE_PATTERN, &self.encode_body())
    }
}

pub const RDA_ADAPTATION_DATA_SIZE: usize = 9468;
pub const PERFORMANCE_MAINTENANCE_DATA_SIZE: usize = 960;

/// RDA adaptation data body: zeros apart from the adaptation file name,
/// format and revision strings.
pub fn rda_adaptation_body(file_name: &str) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.text(file_name, 12)
        .text("RDA", 4)
        .text("1.2", 4)
        .zeros(RDA_ADAPTATION_DATA_SIZE - 20);
    w.into_bytes()
}

/// Performance/maintenance body: zeros apart from the loop-back status
/// (second halfword) and the trailing version word.
pub fn performance_body(loop_back_set_status: u16, version: u16) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.u16(0)
        .u16(loop_back_set_status)
        .zeros(PERFORMANCE_MAINTENANCE_DATA_SIZE - 6)
        .u16(version);
    w.into_bytes()
}

pub const RDA_STATUS_DATA_SIZE: usize = 120;

/// RDA status body: operational values in halfwords 1-26, then alarm codes,
/// signal processing options, 36 reserved bytes and the status version.
pub fn rda_status_body(vcp: i16, alarm_codes: &[u16]) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.u16(2) // operate
        .u16(2)
        .u16(2)
        .u16(0)
        .u16(700)
        .i16(-125) // -1.25 dB
        .u16(6)
        .i16(vcp)
        .u16(0)
        .u16(2_300)
        .u16(4)
        .u16(0)
        .u16(1)
        .u16(0)
        .u16(0)
        .u16(0)
        .u16(0)
        .u16(0)
        .u16(time::JULIAN_DATE)
        .u16(60)
        .u16(time::JULIAN_DATE)
        .u16(90)
        .i16(50) // 0.5 dB
        .u16(0)
        .u16(0)
        .u16(0);
    for i in 0..14 {
        w.u16(alarm_codes.get(i).copied().unwrap_or(0));
    }
    w.u16(0).zeros(36).u16(1);
    w.into_bytes()
}

/// Clutter filter bypass map body with `segments` elevation segments. Each
/// `(segment, radial, bin)` in `bypassed` has its bit set.
pub fn bypass_map_body(segments: u16, bypassed: &[(usize, usize, usize)]) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.u16(time::JULIAN_DATE).u16(60).u16(segments);
    for segment in 0..usize::from(segments) {
        w.u16(segment as u16 + 1);
        for radial in 0..360 {
            for word in 0..32 {
                let mut value = 0u16;
                for &(s, r, bin) in bypassed {
                    if s == segment && r == radial && bin / 16 == word {
                        value |= 0x8000 >> (bin % 16);
                    }
                }
                w.u16(value);
            }
        }
    }
    w.into_bytes()
}

/// Clutter filter map body: every azimuth segment of every elevation
/// segment carries the same `(op_code, end_range)` zones.
pub fn clutter_filter_map_body(segments: u16, zones: &[(u16, u16)]) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.u16(time::JULIAN_DATE).u16(90).u16(segments);
    for _ in 0..segments {
        for _ in 0..360 {
            w.u16(zones.len() as u16);
            for &(op_code, end_range) in zones {
                w.u16(op_code).u16(end_range);
            }
        }
    }
    w.into_bytes()
}

// ============================================================================
// Level II archive
// ============================================================================

/// 24-byte AR2V volume header.
pub fn archive_volume_header(icao: &str) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.text("AR2V0006.", 9)
        .text("001", 3)
        .u32(u32::from(time::JULIAN_DATE))
        .u32(time::MILLISECONDS)
        .text(icao, 4);
    w.into_bytes()
}

/// An uncompressed archive: volume header, then each message preceded by
/// a zeroed 12-byte CTM header.
pub fn archive_file(messages: &[Vec<u8>]) -> Vec<u8> {
    let mut out = archive_volume_header(site::ICAO);
    for message in messages {
        out.extend_from_slice(&[0u8; 12]);
        out.extend_from_slice(message);
    }
    out
}

// ============================================================================
// Level III
// ============================================================================

pub const LEVEL3_HEADER_SIZE: usize = 18;
pub const DESCRIPTION_BLOCK_SIZE: usize = 102;

/// Writes an 18-byte Level III message header.
pub fn level3_header(message_code: i16, length: u32, blocks: u16) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.i16(message_code)
        .u16(time::JULIAN_DATE)
        .u32(time::SECONDS)
        .u32(length)
        .u16(470)
        .u16(0)
        .u16(blocks);
    w.into_bytes()
}

/// Product description block fields that tests vary.
#[derive(Debug, Clone)]
pub struct DescriptionSpec {
    pub product_code: i16,
    pub elevation_number: u16,
    /// Product dependent parameters 1-10
    pub parameters: [u16; 10],
    /// Data level threshold halfwords 31-46
    pub data_level_halfwords: [u16; 16],
    /// Block offsets in halfwords from the message start
    pub offsets: [u32; 3],
}

impl DescriptionSpec {
    pub fn new(product_code: i16) -> Self {
        Self {
            product_code,
            elevation_number: 1,
            parameters: [0; 10],
            data_level_halfwords: [0; 16],
            offsets: [0; 3],
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let p = &self.parameters;
        let mut w = BigEndianWriter::new();
        w.i16(-1)
            .i32(site::LATITUDE_MILLIDEG)
            .i32(site::LONGITUDE_MILLIDEG)
            .i16(site::HEIGHT_FT)
            .i16(self.product_code)
            .u16(2)
            .u16(212)
            .i16(1)
            .u16(3)
            .u16(time::JULIAN_DATE)
            .u32(time::SECONDS)
            .u16(time::JULIAN_DATE)
            .u32(time::SECONDS + 30)
            .u16(p[0])
            .u16(p[1])
            .u16(self.elevation_number)
            .u16(p[2]);
        for &hw in &self.data_level_halfwords {
            w.u16(hw);
        }
        for &param in &p[3..] {
            w.u16(param);
        }
        w.u8(1).u8(0);
        for &offset in &self.offsets {
            w.u32(offset);
        }
        w.into_bytes()
    }
}

/// Product symbology block with one layer per entry.
pub fn symbology_block(layers: &[&[u8]]) -> Vec<u8> {
    let body: usize = layers.iter().map(|l| 6 + l.len()).sum();
    let mut w = BigEndianWriter::new();
    w.i16(-1)
        .i16(1)
        .u32((10 + body) as u32)
        .u16(layers.len() as u16);
    for layer in layers {
        w.i16(-1).u32(layer.len() as u32).bytes(layer);
    }
    w.pad_to_halfword();
    w.into_bytes()
}

/// Text packet (codes 1 and 2 plain, code 8 with a color value).
pub fn text_packet(code: u16, i: i16, j: i16, text: &str) -> Vec<u8> {
    let header = if code == 8 { 6 } else { 4 };
    let mut w = BigEndianWriter::new();
    w.u16(code).u16((text.len() + header) as u16);
    if code == 8 {
        w.u16(3);
    }
    w.i16(i).i16(j).bytes(text.as_bytes());
    w.into_bytes()
}

/// One graphic page of text packets, one line per packet, 10 pixels apart.
pub fn graphic_text_page(lines: &[&str]) -> Vec<u8> {
    lines
        .iter()
        .enumerate()
        .flat_map(|(n, line)| text_packet(8, 0, (n * 10) as i16, line))
        .collect()
}

/// Graphic alphanumeric block from page bodies (packet bytes).
pub fn graphic_block(pages: &[Vec<u8>]) -> Vec<u8> {
    let mut body = BigEndianWriter::new();
    for (n, page) in pages.iter().enumerate() {
        body.u16(n as u16 + 1).u16(page.len() as u16).bytes(page);
    }
    let body = body.into_bytes();

    let mut w = BigEndianWriter::new();
    w.i16(-1)
        .i16(2)
        .u32((10 + body.len()) as u32)
        .u16(pages.len() as u16)
        .bytes(&body);
    w.pad_to_halfword();
    w.into_bytes()
}

/// Tabular alphanumeric block with its embedded header and description
/// block for `product_code`.
pub fn tabular_block(product_code: i16, pages: &[&[&str]]) -> Vec<u8> {
    let mut body = BigEndianWriter::new();
    body.bytes(&level3_header(
        product_code,
        (LEVEL3_HEADER_SIZE + DESCRIPTION_BLOCK_SIZE) as u32,
        3,
    ))
    .bytes(&DescriptionSpec::new(product_code).encode())
    .i16(-1)
    .u16(pages.len() as u16);
    for page in pages {
        for line in page.iter() {
            body.i16(line.len() as i16).bytes(line.as_bytes());
        }
        body.i16(-1);
    }
    let body = body.into_bytes();

    let mut w = BigEndianWriter::new();
    w.i16(-1).i16(3).u32((8 + body.len()) as u32).bytes(&body);
    w.pad_to_halfword();
    w.into_bytes()
}

/// Graphic product message. Blocks are appended after the description
/// block in symbology, graphic, tabular order and their offsets filled in.
#[derive(Debug, Clone)]
pub struct GraphicProductBuilder {
    pub message_code: i16,
    pub description: DescriptionSpec,
    pub symbology: Option<Vec<u8>>,
    pub graphic: Option<Vec<u8>>,
    pub tabular: Option<Vec<u8>>,
}

impl GraphicProductBuilder {
    pub fn new(product_code: i16) -> Self {
        Self {
            message_code: product_code,
            description: DescriptionSpec::new(product_code),
            symbology: None,
            graphic: None,
            tabular: None,
        }
    }

    pub fn halfwords(mut self, halfwords: [u16; 16]) -> Self {
        self.description.data_level_halfwords = halfwords;
        self
    }

    /// Sets product dependent parameter `n` (1-based).
    pub fn parameter(mut self, n: usize, value: u16) -> Self {
        self.description.parameters[n - 1] = value;
        self
    }

    pub fn symbology(mut self, layers: &[&[u8]]) -> Self {
        self.symbology = Some(symbology_block(layers));
        self
    }

    pub fn graphic(mut self, pages: &[Vec<u8>]) -> Self {
        self.graphic = Some(graphic_block(pages));
        self
    }

    pub fn tabular(mut self, pages: &[&[&str]]) -> Self {
        self.tabular = Some(tabular_block(self.description.product_code, pages));
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        let mut offset = LEVEL3_HEADER_SIZE + DESCRIPTION_BLOCK_SIZE;
        let mut blocks = Vec::new();
        let mut count = 2u16;
        for (slot, block) in [&self.symbology, &self.graphic, &self.tabular]
            .into_iter()
            .enumerate()
        {
            if let Some(block) = block {
                self.description.offsets[slot] = (offset / 2) as u32;
                offset += block.len();
                blocks.extend_from_slice(block);
                count += 1;
            }
        }

        let mut out = level3_header(self.message_code, offset as u32, count);
        out.extend_from_slice(&self.description.encode());
        out.extend_from_slice(&blocks);
        out
    }
}

pub const GENERAL_STATUS_BLOCK_SIZE: usize = 182;

/// General status message (code 2): header and the 182-byte status block.
/// Elevations beyond the twentieth go to the trailing group of five.
pub fn general_status_message(vcp: u16, elevations: &[i16]) -> Vec<u8> {
    let elevation = |i: usize| elevations.get(i).copied().unwrap_or(0);

    let mut w = BigEndianWriter::new();
    w.i16(-1)
        .u16(GENERAL_STATUS_BLOCK_SIZE as u16)
        .u16(4)
        .u16(0)
        .u16(vcp)
        .u16(elevations.len() as u16);
    for i in 0..20 {
        w.i16(elevation(i));
    }
    w.u16(2)
        .u16(0)
        .u16(6)
        .u16(0)
        .u16(0)
        .u16(0)
        .u16(0)
        .i16(-6) // -1.5 dB
        .u16(0)
        .u16(0b101)
        .u16(1)
        .i16(2) // 0.5 dB
        .u16(2_300)
        .u16(1)
        .zeros(4)
        .u16(19);
    for i in 20..25 {
        w.i16(elevation(i));
    }
    w.u16(0).u32(0).zeros(80);

    let block = w.into_bytes();
    let mut out = level3_header(2, (LEVEL3_HEADER_SIZE + block.len()) as u32, 1);
    out.extend_from_slice(&block);
    out
}

/// Standalone tabular product (codes 62, 75, 77, 82): description block,
/// then pages at the symbology offset, starting at the page divider.
#[derive(Debug, Clone)]
pub struct TabularProductBuilder {
    pub description: DescriptionSpec,
    pub pages: Vec<Vec<String>>,
}

impl TabularProductBuilder {
    pub fn new(product_code: i16) -> Self {
        Self {
            description: DescriptionSpec::new(product_code),
            pages: Vec::new(),
        }
    }

    pub fn pages(mut self, pages: &[&[&str]]) -> Self {
        self.pages = pages
            .iter()
            .map(|page| page.iter().map(|l| l.to_string()).collect())
            .collect();
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        let mut block = BigEndianWriter::new();
        block.i16(-1).u16(self.pages.len() as u16);
        for page in &self.pages {
            for line in page {
                block.i16(line.len() as i16).bytes(line.as_bytes());
            }
            block.i16(-1);
        }
        block.pad_to_halfword();
        let block = block.into_bytes();

        let offset = LEVEL3_HEADER_SIZE + DESCRIPTION_BLOCK_SIZE;
        self.description.offsets[0] = (offset / 2) as u32;
        let mut out = level3_header(
            self.description.product_code,
            (offset + block.len()) as u32,
            2,
        );
        out.extend_from_slice(&self.description.encode());
        out.extend_from_slice(&block);
        out
    }
}

/// Radar coded message (code 74): description block, PUP site, category and
/// RDA site, each separated by one byte.
pub fn radar_coded_message(pup_site: &str, category: &str, rda_site: &str) -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.bytes(&DescriptionSpec::new(74).encode())
        .text(pup_site, 4)
        .u8(b' ')
        .text(category, 5)
        .u8(b' ')
        .text(rda_site, 4);
    let body = w.into_bytes();

    let mut out = level3_header(74, (LEVEL3_HEADER_SIZE + body.len()) as u32, 2);
    out.extend_from_slice(&body);
    out
}

/// WMO heading plus AWIPS line, `\r\r\n` terminated.
pub fn wmo_header(awips_id: &str) -> Vec<u8> {
    format!(
        "SDUS54 KOUN {}\r\r\n{}\r\r\n",
        time::WMO_DATE_TIME,
        awips_id
    )
    .into_bytes()
}

/// 24-byte communications control block with one destination.
pub fn ccb_header() -> Vec<u8> {
    let mut w = BigEndianWriter::new();
    w.u16((1 << 14) | 12)
        .u8(2)
        .u8(1)
        .u8(b'4')
        .u8(b'U')
        .text("KOUN", 4)
        .u8(3)
        .u8(4)
        .u16(0)
        .u8(22)
        .u8(1)
        .u8(7)
        .u8(1)
        .u8(0)
        .u8(1)
        .text("KWBC", 4);
    w.into_bytes()
}

pub fn zlib_compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("Failed to compress test data");
    encoder.finish().expect("Failed to compress test data")
}

/// A Level III file as distributed uncompressed: WMO header, then the
/// product.
pub fn level3_file(awips_id: &str, product: &[u8]) -> Vec<u8> {
    let mut out = wmo_header(awips_id);
    out.extend_from_slice(product);
    out
}

/// A zlib-compressed Level III file. The payload (CCB header, inner WMO
/// header, product) is split across `streams` zlib streams.
pub fn compressed_level3_file(awips_id: &str, product: &[u8], streams: usize) -> Vec<u8> {
    let mut payload = ccb_header();
    payload.extend_from_slice(&wmo_header(awips_id));
    payload.extend_from_slice(product);

    let mut out = wmo_header(awips_id);
    let chunk = payload.len().div_ceil(streams.max(1));
    for part in payload.chunks(chunk.max(1)) {
        out.extend_from_slice(&zlib_compress(part));
    }
    out
}
