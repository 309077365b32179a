//! Packet-string grammar (panic-free).
//!
//! ```text
//! <typeDigit>[<count>-][<nsp>,][<ackId>]<jsonBody>
//! ```
//!
//! Parsing rules:
//! - Never index into the string; advance by matched prefixes only.
//! - The attachment count appears iff the type digit is a binary type.
//! - A namespace starts with `/` and runs to the first `,` (or end of input).
//! - The ack id is the longest run of leading decimal digits before the body.
//! - An empty body means an empty payload; a non-array body (the CONNECT
//!   handshake object) becomes a one-element payload.

use crate::error::{Result, SioWireError};
use crate::protocol::packet::PacketType;
use crate::value::Value;

/// Parsed packet string, prior to attachment accumulation.
#[derive(Debug, Clone)]
pub struct Header {
    /// Packet type from the leading digit.
    pub packet_type: PacketType,
    /// Declared attachment count (0 for non-binary types).
    pub attachments: usize,
    /// Target namespace, default `/`.
    pub nsp: String,
    /// Ack id; `None` when absent.
    pub ack_id: Option<u64>,
    /// Payload parsed from the JSON body (placeholders unresolved).
    pub payload: Vec<Value>,
}

impl Header {
    /// Parse a full packet string.
    pub fn parse(raw: &str) -> Result<Header> {
        let first = raw
            .chars()
            .next()
            .ok_or_else(|| malformed("empty packet string"))?;
        let packet_type = PacketType::from_digit(first)?;
        let mut rest = &raw[first.len_utf8()..];

        // Attachment count, binary types only, terminated by '-'.
        let mut attachments = 0usize;
        if packet_type.is_binary() {
            let dash = rest
                .find('-')
                .ok_or_else(|| malformed("missing attachment count separator"))?;
            let digits = &rest[..dash];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed("attachment count is not a decimal number"));
            }
            attachments = digits
                .parse()
                .map_err(|_| malformed("attachment count out of range"))?;
            rest = &rest[dash + 1..];
        }

        // Namespace, '/'-leading, runs to the first ',' or the end of input.
        let mut nsp = String::from("/");
        if rest.starts_with('/') {
            match rest.find(',') {
                Some(comma) => {
                    nsp = rest[..comma].to_owned();
                    rest = &rest[comma + 1..];
                }
                None => {
                    nsp = rest.to_owned();
                    rest = "";
                }
            }
        }

        // Ack id: leading decimal digits before the JSON body.
        let digit_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let ack_id = if digit_len > 0 {
            let id = rest[..digit_len]
                .parse()
                .map_err(|_| malformed("ack id out of range"))?;
            rest = &rest[digit_len..];
            Some(id)
        } else {
            None
        };

        let payload = parse_body(rest)?;

        Ok(Header {
            packet_type,
            attachments,
            nsp,
            ack_id,
            payload,
        })
    }
}

fn parse_body(body: &str) -> Result<Vec<Value>> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| malformed(&format!("invalid body json: {e}")))?;
    Ok(match value {
        Value::List(items) => items,
        other => vec![other],
    })
}

fn malformed(msg: &str) -> SioWireError {
    SioWireError::MalformedPacket(msg.to_owned())
}
