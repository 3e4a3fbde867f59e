//! In-memory ledger for unit tests.
//!
//! Executes the two instructions the echo flow uses (System `CreateAccount`
//! and `Echo`) atomically per transaction, and lets tests script status
//! responses, hang status queries, or fail broadcasts.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use echo_core::codec::decode_frame;
use echo_core::config::CommitmentLevel;
use echo_core::instruction::ECHO_DISCRIMINANT;
use solana_program::hash::Hash;
use solana_program::pubkey::Pubkey;
use solana_program::system_instruction::SystemInstruction;
use solana_program::system_program;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use crate::error::{EchoError, Result};
use crate::ledger::{LedgerRpc, LedgerStatus};

#[derive(Default)]
struct State {
    accounts: HashMap<Pubkey, Vec<u8>>,
    outcomes: HashMap<Signature, LedgerStatus>,
    status_script: VecDeque<Result<LedgerStatus>>,
    broadcasts: Vec<Transaction>,
    broadcast_attempts: usize,
    status_queries: Vec<Signature>,
    funding: Vec<(Pubkey, u64)>,
    blockhash_requests: usize,
    account_reads: usize,
}

#[derive(Default)]
pub(crate) struct FakeLedger {
    state: Mutex<State>,
    never_confirm: bool,
    hang_status: bool,
    broadcast_error: Option<String>,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every status query reports `Pending`.
    pub fn never_confirm(mut self) -> Self {
        self.never_confirm = true;
        self
    }

    /// Status queries never return.
    pub fn hang_status_queries(mut self) -> Self {
        self.hang_status = true;
        self
    }

    /// Answer the first status queries from `script`, then fall back to the
    /// executed outcome.
    pub fn with_status_script(self, script: Vec<Result<LedgerStatus>>) -> Self {
        self.state.lock().unwrap().status_script = script.into();
        self
    }

    pub fn fail_broadcast(mut self, msg: &str) -> Self {
        self.broadcast_error = Some(msg.to_string());
        self
    }

    pub fn set_account(&self, address: Pubkey, data: Vec<u8>) {
        self.state.lock().unwrap().accounts.insert(address, data);
    }

    pub fn broadcasts(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().broadcasts.clone()
    }

    pub fn broadcast_attempts(&self) -> usize {
        self.state.lock().unwrap().broadcast_attempts
    }

    pub fn status_queries(&self) -> Vec<Signature> {
        self.state.lock().unwrap().status_queries.clone()
    }

    pub fn funding_requests(&self) -> Vec<(Pubkey, u64)> {
        self.state.lock().unwrap().funding.clone()
    }

    pub fn blockhash_requests(&self) -> usize {
        self.state.lock().unwrap().blockhash_requests
    }

    pub fn account_reads(&self) -> usize {
        self.state.lock().unwrap().account_reads
    }
}

#[async_trait]
impl LedgerRpc for FakeLedger {
    async fn request_funding(&self, address: &Pubkey, lamports: u64) -> Result<Signature> {
        let mut st = self.state.lock().unwrap();
        st.funding.push((*address, lamports));
        let signature = Signature::new_unique();
        st.outcomes.insert(signature, LedgerStatus::Reached);
        Ok(signature)
    }

    async fn min_balance_for_size(&self, byte_size: usize) -> Result<u64> {
        // Shape of the real rent formula: (128 + size) * 3480 * 2.
        Ok((128 + byte_size as u64) * 6_960)
    }

    async fn recent_blockhash(&self) -> Result<Hash> {
        self.state.lock().unwrap().blockhash_requests += 1;
        Ok(Hash::new_unique())
    }

    async fn broadcast(&self, transaction: &Transaction) -> Result<Signature> {
        let mut st = self.state.lock().unwrap();
        st.broadcast_attempts += 1;
        if let Some(msg) = &self.broadcast_error {
            return Err(EchoError::Network(msg.clone()));
        }
        if !transaction.is_signed() {
            return Err(EchoError::InvalidTransaction("unsigned transaction".to_string()));
        }

        let signature = transaction.signatures[0];
        let outcome = execute(&mut st.accounts, transaction);
        st.outcomes.insert(signature, outcome);
        st.broadcasts.push(transaction.clone());
        Ok(signature)
    }

    async fn transaction_status(
        &self,
        signature: &Signature,
        _commitment: CommitmentLevel,
    ) -> Result<LedgerStatus> {
        {
            let mut st = self.state.lock().unwrap();
            st.status_queries.push(*signature);
            if !self.hang_status {
                if let Some(scripted) = st.status_script.pop_front() {
                    return scripted;
                }
                if self.never_confirm {
                    return Ok(LedgerStatus::Pending);
                }
                return Ok(st.outcomes.get(signature).cloned().unwrap_or(LedgerStatus::Pending));
            }
        }
        std::future::pending().await
    }

    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        let mut st = self.state.lock().unwrap();
        st.account_reads += 1;
        Ok(st.accounts.get(address).cloned())
    }
}

fn execute(accounts: &mut HashMap<Pubkey, Vec<u8>>, tx: &Transaction) -> LedgerStatus {
    let keys = &tx.message.account_keys;
    let mut staged = accounts.clone();

    for (index, ix) in tx.message.instructions.iter().enumerate() {
        let program_id = keys[ix.program_id_index as usize];
        let outcome = if program_id == system_program::id() {
            create_account(&mut staged, keys, &ix.accounts, &ix.data)
        } else {
            echo(&mut staged, keys, &ix.accounts, &ix.data)
        };
        if let Err(detail) = outcome {
            return LedgerStatus::Failed(format!("Error processing Instruction {index}: {detail}"));
        }
    }

    *accounts = staged;
    LedgerStatus::Reached
}

fn create_account(
    accounts: &mut HashMap<Pubkey, Vec<u8>>,
    keys: &[Pubkey],
    indices: &[u8],
    data: &[u8],
) -> std::result::Result<(), String> {
    let space = match bincode::deserialize::<SystemInstruction>(data) {
        Ok(SystemInstruction::CreateAccount { space, .. }) => space,
        _ => return Err("invalid instruction data".to_string()),
    };
    let new_account = keys[indices[1] as usize];
    if accounts.contains_key(&new_account) {
        return Err("account already in use".to_string());
    }
    accounts.insert(new_account, vec![0; space as usize]);
    Ok(())
}

fn echo(
    accounts: &mut HashMap<Pubkey, Vec<u8>>,
    keys: &[Pubkey],
    indices: &[u8],
    data: &[u8],
) -> std::result::Result<(), String> {
    let frame = decode_frame(data).map_err(|_| "invalid instruction data".to_string())?;
    if frame.discriminant != ECHO_DISCRIMINANT {
        return Err("invalid instruction data".to_string());
    }
    let target = keys[indices[0] as usize];
    let buffer = accounts
        .get_mut(&target)
        .ok_or_else(|| "account not found".to_string())?;
    if frame.body.len() > buffer.len() {
        return Err("account data too small for instruction".to_string());
    }
    buffer[..frame.body.len()].copy_from_slice(&frame.body);
    Ok(())
}
