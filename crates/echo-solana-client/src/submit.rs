//! Signing, broadcasting, and confirmation polling.
//!
//! A submission moves through
//!
//! ```text
//! Built -> Signed -> Submitted -> { Confirmed | Failed | TimedOut }
//! ```
//!
//! The transaction is broadcast exactly once. Transient network errors while
//! polling are retried against the same signature until the deadline; a
//! program failure is terminal and handed back as-is, because resubmitting
//! would repeat non-idempotent effects such as account creation. A timeout is
//! reported separately from a failure since the transaction may still land.

use std::sync::Arc;
use std::time::Duration;

use echo_core::config::{ClientConfig, CommitmentLevel};
use solana_program::pubkey::Pubkey;
use solana_sdk::hash::Hash;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use tokio::time::Instant;

use crate::error::{EchoError, Result};
use crate::ledger::{LedgerRpc, LedgerStatus};
use crate::transaction::UnsignedTransaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Built,
    Signed,
    Submitted,
    Confirmed,
    Failed,
    TimedOut,
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed | Self::TimedOut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Pending,
    Confirmed,
    Failed,
    TimedOut,
}

impl From<ConfirmationStatus> for SubmissionState {
    fn from(status: ConfirmationStatus) -> Self {
        match status {
            ConfirmationStatus::Pending => SubmissionState::Submitted,
            ConfirmationStatus::Confirmed => SubmissionState::Confirmed,
            ConfirmationStatus::Failed => SubmissionState::Failed,
            ConfirmationStatus::TimedOut => SubmissionState::TimedOut,
        }
    }
}

/// Outcome of waiting on one signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationResult {
    pub signature: Signature,
    pub status: ConfirmationStatus,
    /// Program error detail when `status` is `Failed`.
    pub error: Option<String>,
    pub elapsed: Duration,
    /// Status queries issued, including ones that hit a network error.
    pub polls: u32,
    /// Where the submission ended up; always terminal once polling returns.
    pub state: SubmissionState,
}

impl ConfirmationResult {
    fn new(signature: Signature) -> Self {
        Self {
            signature,
            status: ConfirmationStatus::Pending,
            error: None,
            elapsed: Duration::ZERO,
            polls: 0,
            state: SubmissionState::Submitted,
        }
    }

    fn finish(mut self, status: ConfirmationStatus, started: Instant) -> Self {
        self.status = status;
        self.state = status.into();
        self.elapsed = started.elapsed();
        self
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == ConfirmationStatus::Confirmed
    }

    /// Turn a non-confirmed result into the matching error.
    pub fn into_confirmed(self) -> Result<Signature> {
        match self.status {
            ConfirmationStatus::Confirmed => Ok(self.signature),
            ConfirmationStatus::Failed => Err(EchoError::ProgramExecutionFailed {
                signature: self.signature.to_string(),
                detail: self.error.unwrap_or_else(|| "unknown error".to_string()),
            }),
            ConfirmationStatus::TimedOut | ConfirmationStatus::Pending => Err(EchoError::TimedOut {
                signature: self.signature.to_string(),
                waited_ms: self.elapsed.as_millis(),
            }),
        }
    }
}

/// Signs, broadcasts, and confirms transactions against one ledger.
#[derive(Clone)]
pub struct Submitter {
    ledger: Arc<dyn LedgerRpc>,
    confirm_timeout: Duration,
    poll_interval: Duration,
}

impl Submitter {
    pub fn new(ledger: Arc<dyn LedgerRpc>, config: &ClientConfig) -> Self {
        Self {
            ledger,
            confirm_timeout: config.confirm_timeout,
            poll_interval: config.poll_interval,
        }
    }

    /// Sign `unsigned` with the keypairs matching its required signers.
    ///
    /// Keypairs for addresses that are not required signers are ignored. A
    /// required signer without a keypair is an error.
    pub fn sign(
        &self,
        unsigned: &UnsignedTransaction,
        keypairs: &[&Keypair],
        recent_blockhash: Hash,
    ) -> Result<Transaction> {
        let signers = select_signers(unsigned.required_signers(), keypairs)?;
        let mut tx = unsigned.to_transaction();
        tx.try_sign(signers.as_slice(), recent_blockhash)
            .map_err(|e| EchoError::InvalidTransaction(format!("signing failed: {e}")))?;
        if !tx.is_signed() {
            return Err(EchoError::InvalidTransaction(
                "transaction is not fully signed".to_string(),
            ));
        }
        Ok(tx)
    }

    /// Sign, broadcast once, and wait for `commitment`.
    ///
    /// Errors before broadcast (missing signer, blockhash fetch, broadcast
    /// itself) are returned as `Err`. Once broadcast, the outcome is reported
    /// through [`ConfirmationResult::status`].
    pub async fn submit(
        &self,
        unsigned: &UnsignedTransaction,
        keypairs: &[&Keypair],
        commitment: CommitmentLevel,
    ) -> Result<ConfirmationResult> {
        let mut state = SubmissionState::Built;

        // Fail on a missing signer before any network call.
        select_signers(unsigned.required_signers(), keypairs)?;

        let blockhash = self.ledger.recent_blockhash().await?;
        let tx = self.sign(unsigned, keypairs, blockhash)?;
        transition(&mut state, SubmissionState::Signed, &tx.signatures[0]);

        let signature = self.ledger.broadcast(&tx).await?;
        transition(&mut state, SubmissionState::Submitted, &signature);

        let result = self.poll(signature, commitment).await?;
        transition(&mut state, result.state, &signature);
        Ok(result)
    }

    /// Wait for a signature this client did not necessarily build.
    pub async fn await_signature(
        &self,
        signature: Signature,
        commitment: CommitmentLevel,
    ) -> Result<ConfirmationResult> {
        self.poll(signature, commitment).await
    }

    async fn poll(
        &self,
        signature: Signature,
        commitment: CommitmentLevel,
    ) -> Result<ConfirmationResult> {
        let started = Instant::now();
        let deadline = started + self.confirm_timeout;
        let mut result = ConfirmationResult::new(signature);

        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }

            result.polls += 1;
            let query = self.ledger.transaction_status(&signature, commitment);
            match tokio::time::timeout(deadline - now, query).await {
                Ok(Ok(LedgerStatus::Reached)) => {
                    return Ok(result.finish(ConfirmationStatus::Confirmed, started));
                }
                Ok(Ok(LedgerStatus::Failed(detail))) => {
                    tracing::warn!(%signature, %detail, "transaction failed");
                    result.error = Some(detail);
                    return Ok(result.finish(ConfirmationStatus::Failed, started));
                }
                Ok(Ok(LedgerStatus::Pending)) => {
                    tracing::trace!(%signature, polls = result.polls, "pending");
                }
                Ok(Err(e)) if e.is_transient() => {
                    tracing::warn!(%signature, error = %e, "status query failed, retrying");
                }
                Ok(Err(e)) => return Err(e),
                Err(_) => break,
            }

            let now = Instant::now();
            if now >= deadline {
                break;
            }
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }

        let result = result.finish(ConfirmationStatus::TimedOut, started);
        tracing::warn!(
            %signature,
            waited_ms = result.elapsed.as_millis() as u64,
            "confirmation timed out"
        );
        Ok(result)
    }
}

fn transition(state: &mut SubmissionState, next: SubmissionState, signature: &Signature) {
    tracing::debug!(
        %signature,
        from = ?state,
        to = ?next,
        terminal = next.is_terminal(),
        "submission state"
    );
    *state = next;
}

fn select_signers<'a>(required: &[Pubkey], keypairs: &[&'a Keypair]) -> Result<Vec<&'a Keypair>> {
    required
        .iter()
        .map(|address| {
            keypairs
                .iter()
                .copied()
                .find(|kp| kp.pubkey() == *address)
                .ok_or(EchoError::MissingSigner(*address))
        })
        .collect()
}
