//! sioWire core: Socket.IO packet wire codec.
//!
//! This crate turns structured payloads (possibly holding raw binary blobs
//! nested arbitrarily deep in lists/maps) into the textual packet string plus
//! an ordered list of binary attachments, and reconstructs the payload from a
//! parsed header as attachments arrive. It intentionally carries no transport
//! or runtime dependencies; connection lifecycle, event routing, and the
//! engine-layer framing are the caller's business.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `SioWireError`/`Result` so hostile or
//! truncated wire input never crashes the consumer.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;
pub mod value;

/// Shared result type.
pub use error::{Result, SioWireError};
