//! Shared error type across sioWire crates.

use thiserror::Error;

/// Stable decode error codes (used by vector tests and embedders).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeCode {
    /// Header or body does not match the packet grammar.
    MalformedPacket,
    /// Type digit outside the known packet-type set.
    UnknownPacketType,
    /// Placeholder references an attachment index past the received list.
    PlaceholderOutOfRange,
    /// Payload nesting beyond the configured bound.
    DepthExceeded,
    /// Header declares more attachments than the configured bound.
    TooManyAttachments,
    /// Payload could not be rendered as JSON.
    Serialization,
    /// Decode limits outside their supported ranges.
    InvalidLimits,
}

impl DecodeCode {
    /// String representation used in test vectors and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            DecodeCode::MalformedPacket => "MALFORMED_PACKET",
            DecodeCode::UnknownPacketType => "UNKNOWN_PACKET_TYPE",
            DecodeCode::PlaceholderOutOfRange => "PLACEHOLDER_OUT_OF_RANGE",
            DecodeCode::DepthExceeded => "DEPTH_EXCEEDED",
            DecodeCode::TooManyAttachments => "TOO_MANY_ATTACHMENTS",
            DecodeCode::Serialization => "SERIALIZATION",
            DecodeCode::InvalidLimits => "INVALID_LIMITS",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SioWireError>;

/// Unified error type for packet encode/decode.
#[derive(Debug, Error)]
pub enum SioWireError {
    #[error("malformed packet: {0}")]
    MalformedPacket(String),
    #[error("unknown packet type digit: {0}")]
    UnknownPacketType(char),
    #[error("placeholder num {num} out of range (have {have} attachments)")]
    PlaceholderOutOfRange { num: usize, have: usize },
    #[error("payload nesting exceeds max depth {max}")]
    DepthExceeded { max: usize },
    #[error("header declares {declared} attachments, max is {max}")]
    TooManyAttachments { declared: usize, max: usize },
    #[error("payload not representable as JSON: {0}")]
    Serialization(String),
    #[error("invalid decode limits: {0}")]
    InvalidLimits(String),
}

impl SioWireError {
    /// Map to a stable decode code.
    pub fn decode_code(&self) -> DecodeCode {
        match self {
            SioWireError::MalformedPacket(_) => DecodeCode::MalformedPacket,
            SioWireError::UnknownPacketType(_) => DecodeCode::UnknownPacketType,
            SioWireError::PlaceholderOutOfRange { .. } => DecodeCode::PlaceholderOutOfRange,
            SioWireError::DepthExceeded { .. } => DecodeCode::DepthExceeded,
            SioWireError::TooManyAttachments { .. } => DecodeCode::TooManyAttachments,
            SioWireError::Serialization(_) => DecodeCode::Serialization,
            SioWireError::InvalidLimits(_) => DecodeCode::InvalidLimits,
        }
    }
}
