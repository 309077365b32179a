//! The packet: construction, string encoding, attachment accumulation.

use bytes::Bytes;

use crate::error::{Result, SioWireError};
use crate::protocol::binary;
use crate::protocol::header::Header;
use crate::protocol::limits::DecodeLimits;
use crate::value::Value;

/// Packet type, carried as a single decimal digit on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    Connect,
    Disconnect,
    Event,
    Ack,
    Error,
    BinaryEvent,
    BinaryAck,
}

impl PacketType {
    /// Wire digit.
    pub fn digit(self) -> char {
        match self {
            PacketType::Connect => '0',
            PacketType::Disconnect => '1',
            PacketType::Event => '2',
            PacketType::Ack => '3',
            PacketType::Error => '4',
            PacketType::BinaryEvent => '5',
            PacketType::BinaryAck => '6',
        }
    }

    /// Parse a wire digit.
    pub fn from_digit(c: char) -> Result<Self> {
        match c {
            '0' => Ok(PacketType::Connect),
            '1' => Ok(PacketType::Disconnect),
            '2' => Ok(PacketType::Event),
            '3' => Ok(PacketType::Ack),
            '4' => Ok(PacketType::Error),
            '5' => Ok(PacketType::BinaryEvent),
            '6' => Ok(PacketType::BinaryAck),
            other => Err(SioWireError::UnknownPacketType(other)),
        }
    }

    /// True for types that declare binary attachments.
    pub fn is_binary(self) -> bool {
        matches!(self, PacketType::BinaryEvent | PacketType::BinaryAck)
    }

    /// True for types whose first payload element is the event name.
    pub fn is_event(self) -> bool {
        matches!(self, PacketType::Event | PacketType::BinaryEvent)
    }
}

/// Pick the event/ack packet type for a payload carrying `binary_count`
/// attachments.
pub fn classify(binary_count: usize, is_ack: bool) -> PacketType {
    match (binary_count, is_ack) {
        (0, false) => PacketType::Event,
        (0, true) => PacketType::Ack,
        (_, false) => PacketType::BinaryEvent,
        (_, true) => PacketType::BinaryAck,
    }
}

/// One application-level message.
///
/// Outbound packets are built with [`Packet::from_emit`], which shreds the
/// payload once; the placeholder tree goes into the JSON body and the blobs
/// are exposed via [`Packet::attachments`] for separate transmission.
/// Inbound packets are built with [`Packet::from_header`] and fed frames via
/// [`Packet::add_attachment`] until complete. Callers must serialize
/// `add_attachment` on an instance; distinct packets are independent.
#[derive(Debug, Clone)]
pub struct Packet {
    packet_type: PacketType,
    nsp: String,
    ack_id: Option<u64>,
    payload: Vec<Value>,
    expected_attachments: usize,
    attachments: Vec<Bytes>,
    limits: DecodeLimits,
}

impl Packet {
    /// Build an outbound packet from an emit request.
    ///
    /// Binary leaves anywhere in `payload` are extracted into the attachment
    /// list and the type is classified from what was found.
    pub fn from_emit(
        payload: Vec<Value>,
        ack_id: Option<u64>,
        nsp: impl Into<String>,
        is_ack: bool,
    ) -> Packet {
        let mut attachments = Vec::new();
        let payload = payload
            .into_iter()
            .map(|item| binary::deconstruct(item, &mut attachments))
            .collect();
        let packet_type = classify(attachments.len(), is_ack);
        Packet {
            packet_type,
            nsp: nsp.into(),
            ack_id,
            payload,
            expected_attachments: attachments.len(),
            attachments,
            limits: DecodeLimits::default(),
        }
    }

    /// Build an inbound packet awaiting `header.attachments` binary frames.
    pub fn from_header(header: Header, limits: DecodeLimits) -> Result<Packet> {
        limits.validate()?;
        if header.attachments > limits.max_attachments {
            return Err(SioWireError::TooManyAttachments {
                declared: header.attachments,
                max: limits.max_attachments,
            });
        }
        if header.packet_type.is_binary() && header.attachments == 0 {
            return Err(SioWireError::MalformedPacket(
                "binary packet type declares zero attachments".into(),
            ));
        }
        // The parsed body is untrusted; bound its nesting up front, not just
        // during reconstruction (which non-binary packets never run).
        for item in &header.payload {
            binary::check_depth(item, limits.max_depth)?;
        }
        Ok(Packet {
            packet_type: header.packet_type,
            nsp: header.nsp,
            ack_id: header.ack_id,
            payload: header.payload,
            expected_attachments: header.attachments,
            attachments: Vec::new(),
            limits,
        })
    }

    /// Parse a packet string and build the awaiting-attachments packet.
    pub fn parse(raw: &str, limits: DecodeLimits) -> Result<Packet> {
        Packet::from_header(Header::parse(raw)?, limits)
    }

    /// Deliver one binary frame; returns whether the packet is now complete.
    ///
    /// Idempotent past completion: late or duplicate frames are absorbed
    /// without appending. The completing call splices the attachments over
    /// the placeholder tree; a bad placeholder index surfaces there and
    /// leaves the payload untouched.
    pub fn add_attachment(&mut self, blob: Bytes) -> Result<bool> {
        if self.attachments.len() == self.expected_attachments {
            return Ok(true);
        }
        self.attachments.push(blob);
        if self.attachments.len() < self.expected_attachments {
            return Ok(false);
        }
        let mut filled = Vec::with_capacity(self.payload.len());
        for item in self.payload.iter().cloned() {
            filled.push(binary::reconstruct(
                item,
                &self.attachments,
                self.limits.max_depth,
            )?);
        }
        self.payload = filled;
        Ok(true)
    }

    /// Whether every declared attachment has arrived.
    pub fn is_complete(&self) -> bool {
        self.attachments.len() == self.expected_attachments
    }

    /// Encode the single-line packet string.
    ///
    /// `<typeDigit>[<count>-][<nsp>,][<ackId>]<jsonBody>`; the body is `[]`
    /// for an empty payload, and a payload that cannot be rendered as JSON
    /// degrades to `[]` rather than failing the send path.
    pub fn packet_string(&self) -> String {
        let mut out = String::new();
        out.push(self.packet_type.digit());
        if self.packet_type.is_binary() {
            out.push_str(&self.attachments.len().to_string());
            out.push('-');
        }
        if self.nsp != "/" {
            out.push_str(&self.nsp);
            out.push(',');
        }
        if let Some(id) = self.ack_id {
            out.push_str(&id.to_string());
        }
        out.push_str(&self.body_string());
        out
    }

    /// Render the payload as its JSON body text.
    pub fn body_json(&self) -> Result<String> {
        if self.payload.is_empty() {
            return Ok(String::from("[]"));
        }
        serde_json::to_string(&self.payload)
            .map_err(|e| SioWireError::Serialization(e.to_string()))
    }

    fn body_string(&self) -> String {
        match self.body_json() {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, nsp = %self.nsp, "payload not JSON-serializable, sending empty body");
                String::from("[]")
            }
        }
    }

    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    pub fn nsp(&self) -> &str {
        &self.nsp
    }

    pub fn ack_id(&self) -> Option<u64> {
        self.ack_id
    }

    pub fn payload(&self) -> &[Value] {
        &self.payload
    }

    /// Ordered attachment list (extracted blobs outbound, received inbound).
    pub fn attachments(&self) -> &[Bytes] {
        &self.attachments
    }

    /// Declared attachment count.
    pub fn expected_attachments(&self) -> usize {
        self.expected_attachments
    }

    /// Event arguments: the payload minus the leading event name, for event
    /// types with a non-empty payload; the whole payload otherwise.
    pub fn args(&self) -> &[Value] {
        match self.payload.split_first() {
            Some((_, rest)) if self.packet_type.is_event() => rest,
            _ => &self.payload,
        }
    }

    /// Event name, when this is an event packet with a string head.
    pub fn event(&self) -> Option<&str> {
        if !self.packet_type.is_event() {
            return None;
        }
        self.payload.first().and_then(Value::as_str)
    }
}
