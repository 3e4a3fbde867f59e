//! Instruction payload codec.
//!
//! Wire layout of an encoded payload:
//!
//! ```text
//! +--------------+------------------------+-----------------+
//! | discriminant | body length (u32, LE)  | body            |
//! | 1 byte       | 4 bytes                | `length` bytes  |
//! +--------------+------------------------+-----------------+
//! ```
//!
//! The counterpart program reads this layout byte-for-byte, so the length
//! prefix is always little-endian regardless of the host, and a zero-length
//! body still carries its four zero bytes.
//!
//! Account payloads read back from the ledger are *not* framed: the program
//! stores the echoed body verbatim, so [`decode`] is a plain text projection.

use crate::errors::{CodecError, CodecResult};
use crate::{FRAME_HEADER_LEN, MAX_BODY_LEN};

/// A decoded payload frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub discriminant: u8,
    pub body: Vec<u8>,
}

/// Encode `body` behind a discriminant byte and a little-endian `u32` length.
pub fn encode(discriminant: u8, body: &[u8]) -> CodecResult<Vec<u8>> {
    let len = body_len(body.len())?;

    let mut out = Vec::with_capacity(FRAME_HEADER_LEN + body.len());
    out.push(discriminant);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(body);
    Ok(out)
}

/// Length prefix for a body of `len` bytes.
fn body_len(len: usize) -> CodecResult<u32> {
    u32::try_from(len).map_err(|_| {
        CodecError::invalid_input(format!(
            "body length {len} exceeds maximum of {MAX_BODY_LEN} bytes"
        ))
    })
}

/// Decode a frame produced by [`encode`].
///
/// The input must contain exactly one frame: a short header, a declared length
/// running past the end, or trailing bytes after the body are all rejected.
pub fn decode_frame(bytes: &[u8]) -> CodecResult<Frame> {
    if bytes.len() < FRAME_HEADER_LEN {
        return Err(CodecError::Truncated {
            need: FRAME_HEADER_LEN,
            got: bytes.len(),
        });
    }

    let discriminant = bytes[0];
    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&bytes[1..FRAME_HEADER_LEN]);
    let declared = u32::from_le_bytes(len_bytes) as u64;

    let rest = &bytes[FRAME_HEADER_LEN..];
    if declared != rest.len() as u64 {
        return Err(CodecError::LengthMismatch {
            declared,
            available: rest.len(),
        });
    }

    Ok(Frame {
        discriminant,
        body: rest.to_vec(),
    })
}

/// Project raw account bytes as text for display and comparison.
///
/// Never fails: invalid UTF-8 sequences are replaced with U+FFFD.
pub fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
