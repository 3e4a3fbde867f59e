//! Read-back of echo buffers.
//!
//! Only call these after a `Confirmed` result: an account that has not
//! propagated yet is reported as `AccountNotFound`. Nothing here retries.

use echo_core::codec;
use solana_program::pubkey::Pubkey;

use crate::error::{EchoError, Result};
use crate::ledger::LedgerRpc;

/// Fetch `address` and project its raw data as text.
pub async fn fetch_and_decode(ledger: &dyn LedgerRpc, address: &Pubkey) -> Result<String> {
    let data = ledger
        .account_data(address)
        .await?
        .ok_or(EchoError::AccountNotFound(*address))?;
    Ok(codec::decode(&data))
}

/// Fetch `address` and require its text to equal `expected`.
pub async fn verify_echo(
    ledger: &dyn LedgerRpc,
    address: &Pubkey,
    expected: &str,
) -> Result<String> {
    let found = fetch_and_decode(ledger, address).await?;
    if found != expected {
        return Err(EchoError::VerificationMismatch {
            expected: expected.to_string(),
            found,
        });
    }
    tracing::debug!(%address, bytes = found.len(), "echo buffer verified");
    Ok(found)
}
