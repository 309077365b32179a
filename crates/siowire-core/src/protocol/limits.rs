//! Decode limits for untrusted inbound packets.

use serde::Deserialize;

use crate::error::{Result, SioWireError};

/// Bounds applied while decoding a packet. Embedders can deserialize this
/// from their own config; the defaults are safe for typical traffic.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeLimits {
    /// Maximum payload nesting accepted during reconstruction.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum attachment count a header may declare.
    #[serde(default = "default_max_attachments")]
    pub max_attachments: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_attachments: default_max_attachments(),
        }
    }
}

impl DecodeLimits {
    pub fn validate(&self) -> Result<()> {
        if !(1..=512).contains(&self.max_depth) {
            return Err(SioWireError::InvalidLimits(
                "max_depth must be between 1 and 512".into(),
            ));
        }
        if self.max_attachments > 4096 {
            return Err(SioWireError::InvalidLimits(
                "max_attachments must be at most 4096".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_depth() -> usize {
    64
}
fn default_max_attachments() -> usize {
    255
}
