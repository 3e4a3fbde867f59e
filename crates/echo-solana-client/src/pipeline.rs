//! End-to-end echo flow.
//!
//! fund payer -> query rent -> build [create buffer, echo] -> submit -> read back
//!
//! Any failure aborts at the step where it happened. Nothing is compensated:
//! a funded payer or a half-used buffer is simply left behind.

use std::sync::Arc;

use echo_core::config::{validate_config, ClientConfig};
use serde::Serialize;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};

use crate::constants::explorer_url;
use crate::error::{EchoError, Result};
use crate::instruction::{build_create_account_instruction, build_echo_instruction};
use crate::ledger::{LedgerRpc, SolanaLedger};
use crate::submit::Submitter;
use crate::transaction::assemble;
use crate::verify::verify_echo;

#[derive(Debug, Clone, Serialize)]
pub struct EchoOutcome {
    pub signature: String,
    pub explorer_url: String,
    pub echo_buffer: String,
    pub space: u64,
    pub rent_lamports: u64,
    pub echoed: String,
}

pub struct EchoPipeline {
    ledger: Arc<dyn LedgerRpc>,
    submitter: Submitter,
    config: ClientConfig,
}

impl EchoPipeline {
    pub fn new(ledger: Arc<dyn LedgerRpc>, config: ClientConfig) -> Result<Self> {
        validate_config(&config).map_err(|e| EchoError::Config(e.to_string()))?;
        let submitter = Submitter::new(ledger.clone(), &config);
        Ok(Self { ledger, submitter, config })
    }

    /// Pipeline over the RPC endpoint named in `config`.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let ledger = SolanaLedger::new(config.clone())?;
        Self::new(Arc::new(ledger), config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Echo `message` through `program_id` using freshly generated keys.
    pub async fn run(&self, program_id: &Pubkey, message: &str) -> Result<EchoOutcome> {
        let fee_payer = Keypair::new();
        let echo_buffer = Keypair::new();

        self.fund(&fee_payer.pubkey()).await?;
        self.echo(program_id, message, &fee_payer, &echo_buffer).await
    }

    /// Airdrop the configured amount to `address` and wait for it to land.
    pub async fn fund(&self, address: &Pubkey) -> Result<Signature> {
        tracing::info!(%address, lamports = self.config.airdrop_lamports, "requesting airdrop");
        let signature = self
            .ledger
            .request_funding(address, self.config.airdrop_lamports)
            .await?;
        let signature = self
            .submitter
            .await_signature(signature, self.config.commitment)
            .await?
            .into_confirmed()?;
        tracing::info!(%signature, "airdrop received");
        Ok(signature)
    }

    /// Allocate a buffer sized to `message`, echo into it, and verify.
    ///
    /// `fee_payer` must already hold enough lamports for rent and fees.
    pub async fn echo(
        &self,
        program_id: &Pubkey,
        message: &str,
        fee_payer: &Keypair,
        echo_buffer: &Keypair,
    ) -> Result<EchoOutcome> {
        let body = message.as_bytes();
        let space = body.len() as u64;
        let rent_lamports = self.ledger.min_balance_for_size(body.len()).await?;

        let instructions = vec![
            build_create_account_instruction(
                &fee_payer.pubkey(),
                &echo_buffer.pubkey(),
                program_id,
                space,
                rent_lamports,
            ),
            build_echo_instruction(program_id, &echo_buffer.pubkey(), body)?,
        ];
        let tx = assemble(&fee_payer.pubkey(), instructions)?;

        tracing::info!(
            buffer = %echo_buffer.pubkey(),
            space,
            rent_lamports,
            "submitting echo transaction"
        );
        let signature = self
            .submitter
            .submit(&tx, &[fee_payer, echo_buffer], self.config.commitment)
            .await?
            .into_confirmed()?
            .to_string();

        let echoed = verify_echo(self.ledger.as_ref(), &echo_buffer.pubkey(), message).await?;

        Ok(EchoOutcome {
            explorer_url: explorer_url(&signature, &self.config.cluster, &self.config.rpc_url),
            signature,
            echo_buffer: echo_buffer.pubkey().to_string(),
            space,
            rent_lamports,
            echoed,
        })
    }
}
