//! Configuration structures for the echo client.
//!
//! Configuration is an explicit object handed to the ledger client and the
//! submitter at construction time. This crate never reads environment
//! variables; the CLI maps its arguments into a [`ClientConfig`].

use std::time::Duration;

use crate::errors::{CodecError, CodecResult};

/// Public devnet RPC endpoint.
pub const DEVNET_URL: &str = "https://api.devnet.solana.com/";

/// 2 SOL, enough for rent on any echo buffer plus fees.
pub const DEFAULT_AIRDROP_LAMPORTS: u64 = 2_000_000_000;

/// Network and confirmation settings for one client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientConfig {
    pub rpc_url: String,
    /// Cluster name used for explorer links (`devnet`, `testnet`, ...).
    pub cluster: String,
    pub commitment: CommitmentLevel,
    /// Upper bound on how long the polling loop waits for confirmation.
    pub confirm_timeout: Duration,
    pub poll_interval: Duration,
    /// Skip the RPC node's preflight simulation when broadcasting.
    pub skip_preflight: bool,
    pub airdrop_lamports: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEVNET_URL.to_string(),
            cluster: "devnet".to_string(),
            commitment: CommitmentLevel::Confirmed,
            confirm_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
            skip_preflight: true,
            airdrop_lamports: DEFAULT_AIRDROP_LAMPORTS,
        }
    }
}

impl ClientConfig {
    pub fn devnet() -> Self {
        Self::default()
    }

    /// Local test validator.
    pub fn localnet() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8899".to_string(),
            cluster: "custom".to_string(),
            ..Self::default()
        }
    }
}

/// Confirmation depth a submission must reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CommitmentLevel {
    Processed,
    Confirmed,
    Finalized,
}

impl CommitmentLevel {
    pub fn parse(s: &str) -> CodecResult<Self> {
        match s {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            _ => Err(CodecError::invalid_input(format!(
                "unsupported commitment level: {s}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

impl std::fmt::Display for CommitmentLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ClientConfig) -> CodecResult<()> {
    if cfg.rpc_url.trim().is_empty() {
        return Err(CodecError::invalid_input("rpc_url must not be empty"));
    }

    if cfg.cluster.trim().is_empty() {
        return Err(CodecError::invalid_input("cluster must not be empty"));
    }

    if cfg.poll_interval.is_zero() {
        return Err(CodecError::invalid_input(
            "poll_interval must be greater than zero",
        ));
    }

    if cfg.confirm_timeout < cfg.poll_interval {
        return Err(CodecError::invalid_input(
            "confirm_timeout must not be shorter than poll_interval",
        ));
    }

    Ok(())
}
