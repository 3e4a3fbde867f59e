//! Ledger RPC seam.
//!
//! The pipeline talks to the cluster only through [`LedgerRpc`]. The
//! production implementation wraps the nonblocking Solana `RpcClient`; tests
//! substitute an in-memory ledger.

use async_trait::async_trait;
use echo_core::config::{validate_config, ClientConfig, CommitmentLevel};
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_program::hash::Hash;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use solana_transaction_status::TransactionStatus;

use crate::error::{EchoError, Result};

/// Status of a broadcast transaction as seen by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerStatus {
    /// Unknown to the node yet, or below the requested commitment.
    Pending,
    /// Executed successfully at (or beyond) the requested commitment.
    Reached,
    /// Executed and rejected; carries the program's error detail.
    Failed(String),
}

/// Operations the echo client needs from a ledger node.
///
/// Implementations must be safe to share between concurrent submissions.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Ask the cluster to fund `address`. Returns the funding transaction's signature.
    async fn request_funding(&self, address: &Pubkey, lamports: u64) -> Result<Signature>;

    /// Minimum balance for a rent-exempt account of `byte_size` bytes.
    async fn min_balance_for_size(&self, byte_size: usize) -> Result<u64>;

    async fn recent_blockhash(&self) -> Result<Hash>;

    /// Send a signed transaction once. Never retried by the client.
    async fn broadcast(&self, transaction: &Transaction) -> Result<Signature>;

    async fn transaction_status(
        &self,
        signature: &Signature,
        commitment: CommitmentLevel,
    ) -> Result<LedgerStatus>;

    /// Raw account data, or `None` if the account does not exist.
    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>>;
}

pub fn commitment_config(level: CommitmentLevel) -> CommitmentConfig {
    match level {
        CommitmentLevel::Processed => CommitmentConfig::processed(),
        CommitmentLevel::Confirmed => CommitmentConfig::confirmed(),
        CommitmentLevel::Finalized => CommitmentConfig::finalized(),
    }
}

/// Map a node's signature status onto [`LedgerStatus`].
///
/// An execution error wins over the commitment check: a failed transaction is
/// reported as failed even before it reaches `commitment`.
pub fn classify(status: Option<TransactionStatus>, commitment: CommitmentLevel) -> LedgerStatus {
    let Some(status) = status else {
        return LedgerStatus::Pending;
    };
    if let Some(err) = status.err.as_ref() {
        return LedgerStatus::Failed(err.to_string());
    }
    if status.satisfies_commitment(commitment_config(commitment)) {
        LedgerStatus::Reached
    } else {
        LedgerStatus::Pending
    }
}

/// Map a failed `sendTransaction` call onto [`EchoError`].
///
/// A transaction error here means preflight simulation ran the program and it
/// failed; anything else is a transport problem.
pub fn broadcast_error(err: ClientError, transaction: &Transaction) -> EchoError {
    match err.get_transaction_error() {
        Some(tx_err) => EchoError::ProgramExecutionFailed {
            signature: transaction
                .signatures
                .first()
                .map(|s| s.to_string())
                .unwrap_or_default(),
            detail: tx_err.to_string(),
        },
        None => err.into(),
    }
}

/// [`LedgerRpc`] over a Solana JSON-RPC endpoint.
pub struct SolanaLedger {
    rpc: RpcClient,
    config: ClientConfig,
}

impl SolanaLedger {
    pub fn new(config: ClientConfig) -> Result<Self> {
        validate_config(&config).map_err(|e| EchoError::Config(e.to_string()))?;
        let rpc = RpcClient::new_with_timeout_and_commitment(
            config.rpc_url.clone(),
            config.confirm_timeout,
            commitment_config(config.commitment),
        );
        Ok(Self { rpc, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl LedgerRpc for SolanaLedger {
    async fn request_funding(&self, address: &Pubkey, lamports: u64) -> Result<Signature> {
        tracing::debug!(%address, lamports, "requesting airdrop");
        Ok(self.rpc.request_airdrop(address, lamports).await?)
    }

    async fn min_balance_for_size(&self, byte_size: usize) -> Result<u64> {
        Ok(self.rpc.get_minimum_balance_for_rent_exemption(byte_size).await?)
    }

    async fn recent_blockhash(&self) -> Result<Hash> {
        Ok(self.rpc.get_latest_blockhash().await?)
    }

    async fn broadcast(&self, transaction: &Transaction) -> Result<Signature> {
        let send_config = RpcSendTransactionConfig {
            skip_preflight: self.config.skip_preflight,
            preflight_commitment: Some(commitment_config(self.config.commitment).commitment),
            ..RpcSendTransactionConfig::default()
        };

        self.rpc
            .send_transaction_with_config(transaction, send_config)
            .await
            .map_err(|err| broadcast_error(err, transaction))
    }

    async fn transaction_status(
        &self,
        signature: &Signature,
        commitment: CommitmentLevel,
    ) -> Result<LedgerStatus> {
        let response = self.rpc.get_signature_statuses(&[*signature]).await?;
        Ok(classify(response.value.into_iter().next().flatten(), commitment))
    }

    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, commitment_config(self.config.commitment))
            .await?;
        Ok(response.value.map(|account| account.data))
    }
}
