//! Echo program instruction set.
//!
//! Instructions are Borsh-encoded: a one-byte variant tag followed by the
//! fields in declaration order. `Vec<u8>` fields are a little-endian `u32`
//! length plus raw bytes, which makes `Echo { data }` identical to
//! `codec::encode(ECHO_DISCRIMINANT, &data)`.
//!
//! Variant order is part of the wire format. Do not reorder.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::errors::{CodecError, CodecResult};

/// Tag of [`EchoInstruction::Echo`].
pub const ECHO_DISCRIMINANT: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum EchoInstruction {
    /// Copy `data` verbatim into the (program-owned) echo buffer.
    Echo { data: Vec<u8> },

    /// Create a PDA echo buffer owned by an authority.
    InitializeAuthorizedEcho { buffer_seed: u64, buffer_size: u64 },

    /// Echo into an authorized buffer; the authority must sign.
    AuthorizedEcho { data: Vec<u8> },

    /// Create a vending-machine buffer that charges `price` per echo.
    InitializeVendingMachineEcho { price: u64, buffer_size: u64 },

    /// Echo into a vending-machine buffer, paying with a token.
    VendingMachineEcho { data: Vec<u8> },
}

impl EchoInstruction {
    pub fn echo(data: impl Into<Vec<u8>>) -> Self {
        Self::Echo { data: data.into() }
    }

    /// Wire tag of this variant.
    pub fn discriminant(&self) -> u8 {
        match self {
            Self::Echo { .. } => 0,
            Self::InitializeAuthorizedEcho { .. } => 1,
            Self::AuthorizedEcho { .. } => 2,
            Self::InitializeVendingMachineEcho { .. } => 3,
            Self::VendingMachineEcho { .. } => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Echo { .. } => "Echo",
            Self::InitializeAuthorizedEcho { .. } => "InitializeAuthorizedEcho",
            Self::AuthorizedEcho { .. } => "AuthorizedEcho",
            Self::InitializeVendingMachineEcho { .. } => "InitializeVendingMachineEcho",
            Self::VendingMachineEcho { .. } => "VendingMachineEcho",
        }
    }

    /// Serialize into instruction data.
    pub fn pack(&self) -> CodecResult<Vec<u8>> {
        borsh::to_vec(self).map_err(|e| CodecError::invalid_input(format!("{}: {e}", self.name())))
    }

    /// Parse instruction data. The whole slice must be consumed.
    pub fn unpack(data: &[u8]) -> CodecResult<Self> {
        Self::try_from_slice(data)
            .map_err(|e| CodecError::invalid_input(format!("invalid echo instruction data: {e}")))
    }
}
