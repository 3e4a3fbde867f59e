//! echo-core
//!
//! Core primitives for the echo client:
//! - Length-prefixed instruction payload codec (bit-exact wire format)
//! - Echo program instruction set
//! - Explicit client configuration objects
//!
//! Nothing in this crate performs I/O. Ledger access lives in
//! `echo-solana-client`.

pub mod codec;
pub mod config;
pub mod errors;
pub mod instruction;

pub use crate::errors::{CodecError, CodecResult};

/// Size of the frame header: 1-byte discriminant + 4-byte little-endian length.
pub const FRAME_HEADER_LEN: usize = 5;

/// Largest body a frame can describe with its 4-byte length prefix.
pub const MAX_BODY_LEN: u64 = u32::MAX as u64;

/// Convenience re-exports.
pub mod prelude {
    pub use crate::codec::{decode, decode_frame, encode, Frame};
    pub use crate::config::{validate_config, ClientConfig, CommitmentLevel};
    pub use crate::instruction::{EchoInstruction, ECHO_DISCRIMINANT};
    pub use crate::{CodecError, CodecResult};
}
