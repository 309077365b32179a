//! Top-level facade crate for sioWire.
//!
//! Re-exports the codec core so users can depend on a single crate.

pub mod core {
    pub use siowire_core::*;
}

pub use siowire_core::protocol::header::Header;
pub use siowire_core::protocol::limits::DecodeLimits;
pub use siowire_core::protocol::packet::{classify, Packet, PacketType};
pub use siowire_core::value::Value;
pub use siowire_core::{Result, SioWireError};
