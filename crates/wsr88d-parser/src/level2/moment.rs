//! Moment data blocks (REF, VEL, SW, ZDR, PHI, RHO, CFP).

use serde::Serialize;
use tracing::warn;

use super::MomentKind;
use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};

/// Maximum number of gates in one moment block.
pub const MAX_DATA_MOMENT_GATES: u16 = 1840;

/// Raw gate values, stored at the width the block declares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GateValues {
    Eight(Vec<u8>),
    Sixteen(Vec<u16>),
}

impl GateValues {
    pub fn len(&self) -> usize {
        match self {
            GateValues::Eight(v) => v.len(),
            GateValues::Sixteen(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw value of one gate, widened to 16 bits.
    pub fn get(&self, gate: usize) -> Option<u16> {
        match self {
            GateValues::Eight(v) => v.get(gate).map(|&g| u16::from(g)),
            GateValues::Sixteen(v) => v.get(gate).copied(),
        }
    }
}

/// One moment of a radial: header fields plus `number_of_gates` raw values.
///
/// Physical values are `(raw - offset) / scale`. Raw 0 means below
/// threshold and raw 1 means range folded; neither has a physical value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentDataBlock {
    pub kind: MomentKind,
    pub number_of_gates: u16,
    /// Range to the center of the first gate, meters
    pub range_to_first_gate: i32,
    /// Gate spacing, meters
    pub gate_interval: u16,
    pub tover: u16,
    pub snr_threshold: i16,
    pub control_flags: u8,
    pub word_size: u8,
    pub scale: f32,
    pub offset: f32,
    pub gates: GateValues,
}

impl MomentDataBlock {
    /// Parses a generic moment block. The cursor must sit just past the
    /// 4-byte block type and name.
    pub fn parse(c: &mut Cursor, kind: MomentKind) -> DecodeResult<Self> {
        c.skip(4)?;
        let number_of_gates = c.read_u16()?;
        let range_to_first_gate = i32::from(c.read_u16()?);
        let gate_interval = c.read_u16()?;
        let tover = c.read_u16()?;
        let snr_threshold = c.read_i16()?;
        let control_flags = c.read_u8()?;
        let word_size = c.read_u8()?;
        let scale = c.read_f32()?;
        let offset = c.read_f32()?;

        if number_of_gates > MAX_DATA_MOMENT_GATES {
            warn!(
                moment = kind.name(),
                gates = number_of_gates,
                "Invalid number of data moment gates"
            );
            return Err(DecodeError::invalid_field(
                "number of data moment gates",
                number_of_gates,
            ));
        }

        let count = usize::from(number_of_gates);
        let gates = match word_size {
            8 => GateValues::Eight(c.read_bytes(count)?.to_vec()),
            16 => GateValues::Sixteen(c.read_u16_array(count)?),
            other => {
                warn!(moment = kind.name(), word_size = other, "Invalid data word size");
                return Err(DecodeError::invalid_discriminator("data word size", other));
            }
        };

        Ok(Self {
            kind,
            number_of_gates,
            range_to_first_gate,
            gate_interval,
            tover,
            snr_threshold,
            control_flags,
            word_size,
            scale,
            offset,
            gates,
        })
    }

    /// Builds an 8-bit block from a fixed-layout (message type 1) radial.
    pub fn from_legacy(
        kind: MomentKind,
        range_to_first_gate: i16,
        gate_interval: u16,
        raw: Vec<u8>,
        scale: f32,
        offset: f32,
    ) -> Self {
        Self {
            kind,
            number_of_gates: raw.len() as u16,
            range_to_first_gate: i32::from(range_to_first_gate),
            gate_interval,
            tover: 0,
            snr_threshold: 0,
            control_flags: 0,
            word_size: 8,
            scale,
            offset,
            gates: GateValues::Eight(raw),
        }
    }

    pub fn gate_values(&self) -> &GateValues {
        &self.gates
    }

    /// 8-bit gates; empty for 16-bit blocks.
    pub fn gates_8(&self) -> &[u8] {
        match &self.gates {
            GateValues::Eight(v) => v,
            GateValues::Sixteen(_) => &[],
        }
    }

    /// 16-bit gates; empty for 8-bit blocks.
    pub fn gates_16(&self) -> &[u16] {
        match &self.gates {
            GateValues::Sixteen(v) => v,
            GateValues::Eight(_) => &[],
        }
    }

    /// Physical value at a gate, or `None` for below-threshold, range-folded
    /// or out-of-range gates.
    pub fn value(&self, gate: usize) -> Option<f32> {
        let raw = self.gates.get(gate)?;
        if raw < 2 {
            return None;
        }
        if self.scale == 0.0 {
            return Some(f32::from(raw));
        }
        Some((f32::from(raw) - self.offset) / self.scale)
    }

    pub fn is_range_folded(&self, gate: usize) -> bool {
        self.gates.get(gate) == Some(1)
    }

    pub fn range_to_first_gate_km(&self) -> f32 {
        self.range_to_first_gate as f32 * 0.001
    }

    pub fn gate_interval_km(&self) -> f32 {
        f32::from(self.gate_interval) * 0.001
    }

    /// Range to the center of a gate, kilometers.
    pub fn gate_range_km(&self, gate: usize) -> f32 {
        self.range_to_first_gate_km() + gate as f32 * self.gate_interval_km()
    }

    pub fn tover_db(&self) -> f32 {
        f32::from(self.tover) * 0.1
    }

    pub fn snr_threshold_db(&self) -> f32 {
        f32::from(self.snr_threshold) * 0.125
    }

    /// Bytes this block occupies on the wire in a generic radial.
    pub fn encoded_len(&self) -> usize {
        28 + usize::from(self.number_of_gates) * usize::from(self.word_size / 8)
    }
}
