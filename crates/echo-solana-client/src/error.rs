//! Error types for the echo client.

use echo_core::CodecError;
use solana_program::pubkey::Pubkey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EchoError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EchoError {
    /// Arguments that cannot be encoded
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Empty or malformed instruction set, or a signing failure
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// A required signer has no keypair; raised before anything is broadcast
    #[error("Missing signature for required signer {0}")]
    MissingSigner(Pubkey),

    /// Transport or RPC failure (transient)
    #[error("Network error: {0}")]
    Network(String),

    /// The transaction landed and the program rejected it (terminal)
    #[error("Program execution failed for {signature}: {detail}")]
    ProgramExecutionFailed { signature: String, detail: String },

    /// Confirmation not observed in time; the transaction may still land
    #[error("Timed out after {waited_ms} ms waiting for {signature}")]
    TimedOut { signature: String, waited_ms: u128 },

    /// Read-back of an account that does not exist (yet)
    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    /// Read-back text differs from what was sent
    #[error("Verification mismatch: expected {expected:?}, found {found:?}")]
    VerificationMismatch { expected: String, found: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EchoError {
    /// Only network errors may be retried, and only by the polling loop.
    pub fn is_transient(&self) -> bool {
        matches!(self, EchoError::Network(_))
    }
}

impl From<CodecError> for EchoError {
    fn from(err: CodecError) -> Self {
        EchoError::InvalidInput(err.to_string())
    }
}

impl From<solana_client::client_error::ClientError> for EchoError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        EchoError::Network(err.to_string())
    }
}
