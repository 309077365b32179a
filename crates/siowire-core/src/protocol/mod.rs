//! Packet wire format (header string + JSON body + binary attachments).
//!
//! This module hosts the two halves of the codec:
//! - `header`: the single-line packet-string grammar
//!   `<typeDigit>[<count>-][<nsp>,][<ackId>]<jsonBody>`.
//! - `binary`: placeholder extraction (outbound) and reinsertion (inbound)
//!   for binary blobs carried as separate attachments.
//! - `packet`: the packet itself, with its constructors, string encoding,
//!   and incremental attachment accumulation.
//!
//! All parsers are panic-free: malformed input is reported as `SioWireError`
//! instead of panicking or indexing raw strings, keeping consumers resilient
//! to hostile traffic.

pub mod binary;
pub mod header;
pub mod limits;
pub mod packet;
