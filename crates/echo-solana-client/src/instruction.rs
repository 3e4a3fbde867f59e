//! Instruction builders for the echo flow.
//!
//! Two instructions make up an echo transaction:
//! - a System Program `CreateAccount` that allocates the echo buffer and hands
//!   ownership to the echo program
//! - an echo program invoke whose data is an encoded payload
//!
//! The buffer size is taken from the caller. If it is smaller than the body
//! later echoed into it, the program's write fails on chain and the failure
//! only shows up at confirmation time.

use echo_core::instruction::EchoInstruction;
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_program::system_instruction::{self, SystemInstruction};
use solana_program::system_program;

use crate::error::Result;

/// System Program `CreateAccount`.
///
/// `payer` and `new_account` are both writable signers: the payer is debited
/// and the new account co-signs its own creation. `program_owner` is not an
/// account reference, it is embedded in the instruction data.
pub fn build_create_account_instruction(
    payer: &Pubkey,
    new_account: &Pubkey,
    program_owner: &Pubkey,
    byte_size: u64,
    rent_exempt_balance: u64,
) -> Instruction {
    system_instruction::create_account(
        payer,
        new_account,
        rent_exempt_balance,
        byte_size,
        program_owner,
    )
}

/// Invoke `program_id` with an already-encoded payload.
///
/// The target account is writable but does not sign; the program owns it and
/// authorizes its own writes.
pub fn build_invoke_instruction(
    program_id: &Pubkey,
    target_account: &Pubkey,
    payload: Vec<u8>,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::new(*target_account, false)],
        data: payload,
    }
}

/// Build the `Echo` invoke for `message`.
pub fn build_echo_instruction(
    program_id: &Pubkey,
    echo_buffer: &Pubkey,
    message: &[u8],
) -> Result<Instruction> {
    let payload = echo_core::codec::encode(echo_core::instruction::ECHO_DISCRIMINANT, message)?;
    Ok(build_invoke_instruction(program_id, echo_buffer, payload))
}

/// Build any echo program instruction against a single writable buffer.
pub fn build_program_instruction(
    program_id: &Pubkey,
    echo_buffer: &Pubkey,
    ix: &EchoInstruction,
) -> Result<Instruction> {
    Ok(build_invoke_instruction(program_id, echo_buffer, ix.pack()?))
}

/// Space requested by a System Program `CreateAccount`, if `ix` is one.
pub fn requested_space(ix: &Instruction) -> Option<u64> {
    if ix.program_id != system_program::id() {
        return None;
    }
    match bincode::deserialize::<SystemInstruction>(&ix.data).ok()? {
        SystemInstruction::CreateAccount { space, .. } => Some(space),
        _ => None,
    }
}
