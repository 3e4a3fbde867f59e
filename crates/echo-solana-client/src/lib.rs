//! echo-solana-client
//!
//! A small, focused Rust client that drives the echo program on a Solana
//! cluster: it allocates a buffer account, asks the program to echo a message
//! into it, waits for confirmation, and reads the buffer back.
//!
//! It includes:
//! - instruction builders (system `CreateAccount`, echo invoke)
//! - a pure transaction assembler
//! - the `LedgerRpc` seam and its RPC-backed implementation
//! - a signer/submitter with an explicit confirmation state machine
//! - a read-back verifier and the end-to-end pipeline
//!
//! The echo program id is always supplied by the caller.

pub mod constants;
pub mod error;
pub mod instruction;
pub mod ledger;
pub mod pipeline;
pub mod submit;
pub mod transaction;
pub mod verify;

#[cfg(test)]
pub(crate) mod testing;

pub use constants::*;
pub use error::{EchoError, Result};
pub use instruction::*;
pub use ledger::{LedgerRpc, LedgerStatus, SolanaLedger};
pub use pipeline::{EchoOutcome, EchoPipeline};
pub use submit::{ConfirmationResult, ConfirmationStatus, SubmissionState, Submitter};
pub use transaction::{assemble, UnsignedTransaction};
pub use verify::{fetch_and_decode, verify_echo};
