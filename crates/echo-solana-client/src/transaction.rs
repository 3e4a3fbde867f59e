//! Transaction assembly.
//!
//! Assembly is a pure function of the fee payer and an ordered instruction
//! list. The blockhash stays at its default placeholder until the submitter
//! fetches a fresh one immediately before signing.

use solana_program::hash::Hash;
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;

use crate::error::{EchoError, Result};

/// A compiled, unsigned transaction plus the instructions it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    fee_payer: Pubkey,
    instructions: Vec<Instruction>,
    transaction: Transaction,
}

/// Assemble `instructions` into a transaction paid for by `fee_payer`.
///
/// Instructions keep the exact order given; nothing is reordered or
/// deduplicated.
pub fn assemble(fee_payer: &Pubkey, instructions: Vec<Instruction>) -> Result<UnsignedTransaction> {
    if instructions.is_empty() {
        return Err(EchoError::InvalidTransaction(
            "transaction has no instructions".to_string(),
        ));
    }
    let transaction = Transaction::new_with_payer(&instructions, Some(fee_payer));
    Ok(UnsignedTransaction {
        fee_payer: *fee_payer,
        instructions,
        transaction,
    })
}

impl UnsignedTransaction {
    pub fn fee_payer(&self) -> &Pubkey {
        &self.fee_payer
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Addresses that must sign, in message order. The fee payer is first.
    pub fn required_signers(&self) -> &[Pubkey] {
        let n = self.transaction.message.header.num_required_signatures as usize;
        &self.transaction.message.account_keys[..n]
    }

    pub fn recent_blockhash(&self) -> &Hash {
        &self.transaction.message.recent_blockhash
    }

    /// A copy of the compiled transaction, ready for signing.
    pub fn to_transaction(&self) -> Transaction {
        self.transaction.clone()
    }
}
