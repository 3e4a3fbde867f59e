use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use echo_core::config::{
    validate_config, ClientConfig, CommitmentLevel, DEFAULT_AIRDROP_LAMPORTS, DEVNET_URL,
};
use solana_sdk::pubkey::Pubkey;
use url::Url;

#[derive(Parser, Debug, Clone)]
#[command(name = "echo", version, about = "Echo a message through an on-chain echo program")]
pub struct Cli {
    /// Echo program address (base58).
    #[arg(value_parser = parse_pubkey)]
    pub program_id: Pubkey,

    /// Message to store in the echo buffer.
    #[arg(allow_hyphen_values = true)]
    pub message: String,

    /// RPC endpoint.
    #[arg(long, default_value = DEVNET_URL)]
    pub url: String,

    /// Cluster name used in explorer links.
    #[arg(long, default_value = "devnet")]
    pub cluster: String,

    /// Commitment to wait for: processed|confirmed|finalized
    #[arg(long, default_value = "confirmed", value_parser = parse_commitment)]
    pub commitment: CommitmentLevel,

    /// Give up waiting for confirmation after this many seconds.
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Delay between confirmation status queries, in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub poll_interval_ms: u64,

    /// Lamports to airdrop to the generated fee payer.
    #[arg(long, default_value_t = DEFAULT_AIRDROP_LAMPORTS)]
    pub airdrop_lamports: u64,

    /// Run the node's preflight simulation before broadcasting (skipped by default).
    #[arg(long)]
    pub preflight: bool,

    /// Emit JSON output on stdout.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn to_config(&self) -> Result<ClientConfig> {
        let url = Url::parse(&self.url).map_err(|e| anyhow!("invalid --url {}: {e}", self.url))?;
        let cfg = ClientConfig {
            rpc_url: url.to_string(),
            cluster: self.cluster.clone(),
            commitment: self.commitment,
            confirm_timeout: Duration::from_secs(self.timeout_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            skip_preflight: !self.preflight,
            airdrop_lamports: self.airdrop_lamports,
        };
        validate_config(&cfg)?;
        Ok(cfg)
    }
}

fn parse_pubkey(s: &str) -> std::result::Result<Pubkey, String> {
    Pubkey::from_str(s).map_err(|e| format!("invalid program address {s}: {e}"))
}

fn parse_commitment(s: &str) -> std::result::Result<CommitmentLevel, String> {
    CommitmentLevel::parse(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

    #[test]
    fn positional_arguments_and_defaults() {
        let cli = Cli::try_parse_from(["echo", PROGRAM, "hello"]).unwrap();
        assert_eq!(cli.program_id.to_string(), PROGRAM);
        assert_eq!(cli.message, "hello");

        let cfg = cli.to_config().unwrap();
        assert_eq!(cfg.rpc_url, DEVNET_URL);
        assert_eq!(cfg.commitment, CommitmentLevel::Confirmed);
        assert!(cfg.skip_preflight);
        assert_eq!(cfg.confirm_timeout, Duration::from_secs(60));
    }

    #[test]
    fn options_map_into_config() {
        let cli = Cli::try_parse_from([
            "echo",
            PROGRAM,
            "",
            "--url",
            "http://127.0.0.1:8899",
            "--cluster",
            "custom",
            "--commitment",
            "finalized",
            "--timeout-secs",
            "5",
            "--preflight",
        ])
        .unwrap();
        let cfg = cli.to_config().unwrap();
        assert_eq!(cfg.rpc_url, "http://127.0.0.1:8899/");
        assert_eq!(cfg.commitment, CommitmentLevel::Finalized);
        assert!(!cfg.skip_preflight);
        assert_eq!(cli.message, "");
    }

    #[test]
    fn bad_program_id_is_rejected() {
        assert!(Cli::try_parse_from(["echo", "not-an-address!", "hello"]).is_err());
    }

    #[test]
    fn message_is_required() {
        assert!(Cli::try_parse_from(["echo", PROGRAM]).is_err());
    }

    #[test]
    fn bad_url_is_rejected() {
        let cli = Cli::try_parse_from(["echo", PROGRAM, "hi", "--url", "not a url"]).unwrap();
        assert!(cli.to_config().is_err());
    }
}
