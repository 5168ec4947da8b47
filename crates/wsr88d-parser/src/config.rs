//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// Tunables for [`crate::MessageFactory`] and the file readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Reject VCP messages whose internal size field disagrees with the cuts read
    pub strict_vcp_size: bool,

    /// Upper bound on a reassembled multi-segment message, in bytes
    pub max_reassembly_bytes: usize,

    /// Upper bound on the segment count a header may announce
    pub max_segments: u16,

    /// Drop unrecognized messages from file reader output
    pub skip_unrecognized: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strict_vcp_size: false,
            max_reassembly_bytes: 4 * 1024 * 1024,
            max_segments: 1024,
            skip_unrecognized: true,
        }
    }
}

fn parse_bool(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}

impl DecoderConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("WSR88D_STRICT_VCP_SIZE") {
            config.strict_vcp_size = parse_bool(&val);
        }

        if let Ok(val) = std::env::var("WSR88D_MAX_REASSEMBLY_BYTES") {
            if let Ok(v) = val.parse() {
                config.max_reassembly_bytes = v;
            }
        }

        if let Ok(val) = std::env::var("WSR88D_MAX_SEGMENTS") {
            if let Ok(v) = val.parse() {
                config.max_segments = v;
            }
        }

        if let Ok(val) = std::env::var("WSR88D_SKIP_UNRECOGNIZED") {
            config.skip_unrecognized = parse_bool(&val);
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_reassembly_bytes == 0 {
            return Err("max_reassembly_bytes must be greater than 0".to_string());
        }
        if self.max_segments < 2 {
            return Err("max_segments must be at least 2".to_string());
        }
        Ok(())
    }
}
