//! # EVM Gas Metering
//!
//! Gas constants and the dynamic gas functions of every gas-variable
//! instruction family. Each function composes memory expansion cost with
//! instruction-specific operands and constants; every intermediate sum and
//! product is overflow-checked.

use crate::domain::value_objects::{Address, StorageKey, StorageValue};
use crate::errors::GasError;
use crate::evm::math::{checked_add, checked_mul, u256_to_u64, word_size};
use crate::evm::memory::{expansion_cost, MemoryAccessor};
use crate::evm::stack::Stack;
use crate::ports::outbound::CallContext;

// =============================================================================
// BASE GAS COSTS
// =============================================================================

/// Gas costs shared by the instruction table and the dynamic functions.
pub mod costs {
    /// Zero gas.
    pub const ZERO: u64 = 0;
    /// Base cost (e.g., for `ADDRESS`).
    pub const BASE: u64 = 2;
    /// Very low cost (e.g., for `ADD`).
    pub const VERY_LOW: u64 = 3;
    /// Low cost (e.g., for `MUL`).
    pub const LOW: u64 = 5;
    /// Mid cost.
    pub const MID: u64 = 8;
    /// High cost.
    pub const HIGH: u64 = 10;
    /// Ext cost.
    pub const EXT: u64 = 20;
    /// Jump destination cost.
    pub const JUMPDEST: u64 = 1;

    // Memory costs
    /// Divisor of the quadratic memory term.
    pub const QUAD_COEFF_DIV: u64 = 512;
    /// Linear memory cost per word.
    pub const MEMORY_GAS_PER_WORD: u64 = 3;
    /// Gas per word for memory copy.
    pub const COPY: u64 = 3;

    // Account and storage reads
    /// SLOAD cost.
    pub const SLOAD: u64 = 200;
    /// BALANCE cost.
    pub const BALANCE: u64 = 400;
    /// EXTCODESIZE cost.
    pub const EXTCODESIZE: u64 = 700;
    /// EXTCODECOPY base cost (copy cost is added per word).
    pub const EXTCODECOPY: u64 = 700;
    /// EXTCODEHASH cost.
    pub const EXTCODEHASH: u64 = 400;
    /// BLOCKHASH cost.
    pub const BLOCKHASH: u64 = 20;

    // SSTORE costs
    /// SSTORE when setting zero to non-zero.
    pub const SSTORE_SET: u64 = 20_000;
    /// SSTORE when changing a non-zero value to another non-zero value.
    pub const SSTORE_RESET: u64 = 5000;
    /// SSTORE when setting non-zero to zero (gives refund).
    pub const SSTORE_CLEAR: u64 = 5000;
    /// SSTORE writing the value already stored.
    pub const SSTORE_NOOP: u64 = 200;
    /// SSTORE refund for clearing storage.
    pub const SSTORE_CLEAR_REFUND: u64 = 15_000;

    // Call costs
    /// Base call cost, also the DELEGATECALL/STATICCALL surcharge.
    pub const CALL: u64 = 700;
    /// Cost for value transfer.
    pub const CALL_VALUE: u64 = 9000;
    /// Cost for creating new account.
    pub const CALL_NEW_ACCOUNT: u64 = 25_000;
    /// Stipend given to called contract when value > 0.
    pub const CALL_STIPEND: u64 = 2300;

    // Create costs
    /// CREATE opcode base cost.
    pub const CREATE: u64 = 32_000;
    /// CREATE2 init code hash cost per word.
    pub const CREATE2_WORD: u64 = 6;

    // Log costs
    /// LOG base cost.
    pub const LOG: u64 = 375;
    /// LOG cost per topic.
    pub const LOG_TOPIC: u64 = 375;
    /// LOG cost per byte of data.
    pub const LOG_DATA: u64 = 8;

    // Other
    /// SHA3 base cost.
    pub const SHA3: u64 = 30;
    /// SHA3 cost per word of input.
    pub const SHA3_WORD: u64 = 6;
    /// EXP base cost.
    pub const EXP: u64 = 10;
    /// EXP cost per byte of exponent.
    pub const EXP_BYTE: u64 = 50;
    /// SELFDESTRUCT base cost.
    pub const SELFDESTRUCT: u64 = 5000;
    /// SELFDESTRUCT to new account.
    pub const SELFDESTRUCT_NEW_ACCOUNT: u64 = 25_000;
    /// SELFDESTRUCT refund.
    pub const SELFDESTRUCT_REFUND: u64 = 24_000;
}

// =============================================================================
// DYNAMIC GAS DISPATCH
// =============================================================================

/// Dynamic gas function attached to an instruction table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DynamicGas {
    /// MLOAD, MSTORE, MSTORE8, RETURN, REVERT, CREATE.
    Memory,
    /// SHA3.
    Sha3,
    /// CALLDATACOPY.
    CallDataCopy,
    /// CODECOPY.
    CodeCopy,
    /// RETURNDATACOPY.
    ReturnDataCopy,
    /// EXTCODECOPY.
    ExtCodeCopy,
    /// CREATE2.
    Create2,
    /// LOG0..LOG4 with the number of topics.
    Log(u8),
    /// EXP.
    Exp,
    /// CALL.
    Call,
    /// CALLCODE.
    CallCode,
    /// DELEGATECALL.
    DelegateCall,
    /// STATICCALL.
    StaticCall,
    /// SSTORE.
    SStore,
    /// SELFDESTRUCT.
    SelfDestruct,
}

/// Runs `function` for the instruction about to execute.
///
/// `memory_size` is the extent already resolved for this instruction.
///
/// # Errors
///
/// Returns `ArithmeticOverflow` on any overflow and propagates
/// `StackUnderflow` from operand reads.
pub fn dynamic_gas<C: CallContext + ?Sized>(
    function: DynamicGas,
    ctx: &C,
    address: Address,
    stack: &Stack,
    mem: &mut MemoryAccessor,
    memory_size: u64,
) -> Result<u64, GasError> {
    match function {
        DynamicGas::Memory => gas_memory(mem, memory_size),
        DynamicGas::Sha3 => gas_sha3(stack, mem, memory_size),
        DynamicGas::CallDataCopy | DynamicGas::CodeCopy | DynamicGas::ReturnDataCopy => {
            gas_copy(stack, mem, memory_size)
        }
        DynamicGas::ExtCodeCopy => gas_ext_code_copy(stack, mem, memory_size),
        DynamicGas::Create2 => gas_create2(stack, mem, memory_size),
        DynamicGas::Log(topics) => gas_log(topics, stack, mem, memory_size),
        DynamicGas::Exp => gas_exp(stack),
        DynamicGas::Call => gas_call(ctx, stack, mem, memory_size),
        DynamicGas::CallCode => gas_call_code(stack, mem, memory_size),
        DynamicGas::DelegateCall | DynamicGas::StaticCall => {
            gas_delegate_or_static_call(mem, memory_size)
        }
        DynamicGas::SStore => gas_sstore(ctx, address, stack, mem),
        DynamicGas::SelfDestruct => gas_selfdestruct(ctx, stack, mem),
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn add(x: u64, y: u64) -> Result<u64, GasError> {
    match checked_add(x, y) {
        (sum, false) => Ok(sum),
        (_, true) => Err(GasError::ArithmeticOverflow),
    }
}

fn mul(x: u64, y: u64) -> Result<u64, GasError> {
    match checked_mul(x, y) {
        (product, false) => Ok(product),
        (_, true) => Err(GasError::ArithmeticOverflow),
    }
}

/// Operand at `depth` narrowed to 64 bits.
fn operand_u64(stack: &Stack, depth: usize) -> Result<u64, GasError> {
    match u256_to_u64(stack.peek_uint(depth)?) {
        (value, false) => Ok(value),
        (_, true) => Err(GasError::ArithmeticOverflow),
    }
}

/// Memory expansion plus `per_word` for every word of the length at `length_depth`.
fn memory_copier_gas(
    stack: &Stack,
    mem: &mut MemoryAccessor,
    memory_size: u64,
    length_depth: usize,
    per_word: u64,
) -> Result<u64, GasError> {
    let gas = expansion_cost(mem, memory_size)?;
    let words = word_size(operand_u64(stack, length_depth)?);
    add(gas, mul(words, per_word)?)
}

// =============================================================================
// GAS FUNCTIONS
// =============================================================================

/// MLOAD, MSTORE, MSTORE8, RETURN, REVERT, CREATE: memory expansion only.
///
/// # Errors
///
/// Returns `ArithmeticOverflow` past the memory ceiling.
pub fn gas_memory(mem: &mut MemoryAccessor, memory_size: u64) -> Result<u64, GasError> {
    expansion_cost(mem, memory_size)
}

/// DELEGATECALL / STATICCALL: memory expansion plus the call surcharge.
///
/// # Errors
///
/// Returns `ArithmeticOverflow` on overflow.
pub fn gas_delegate_or_static_call(
    mem: &mut MemoryAccessor,
    memory_size: u64,
) -> Result<u64, GasError> {
    add(expansion_cost(mem, memory_size)?, costs::CALL)
}

/// SHA3: memory expansion plus 6 per word hashed (length at depth 1).
///
/// # Errors
///
/// Returns `ArithmeticOverflow` on overflow.
pub fn gas_sha3(stack: &Stack, mem: &mut MemoryAccessor, memory_size: u64) -> Result<u64, GasError> {
    memory_copier_gas(stack, mem, memory_size, 1, costs::SHA3_WORD)
}

/// CALLDATACOPY, CODECOPY, RETURNDATACOPY: 3 per word copied (length at depth 2).
///
/// # Errors
///
/// Returns `ArithmeticOverflow` on overflow.
pub fn gas_copy(stack: &Stack, mem: &mut MemoryAccessor, memory_size: u64) -> Result<u64, GasError> {
    memory_copier_gas(stack, mem, memory_size, 2, costs::COPY)
}

/// EXTCODECOPY: 3 per word copied (length at depth 3).
///
/// # Errors
///
/// Returns `ArithmeticOverflow` on overflow.
pub fn gas_ext_code_copy(
    stack: &Stack,
    mem: &mut MemoryAccessor,
    memory_size: u64,
) -> Result<u64, GasError> {
    memory_copier_gas(stack, mem, memory_size, 3, costs::COPY)
}

/// CREATE2: 6 per word of init code hashed (length at depth 2).
///
/// # Errors
///
/// Returns `ArithmeticOverflow` on overflow.
pub fn gas_create2(stack: &Stack, mem: &mut MemoryAccessor, memory_size: u64) -> Result<u64, GasError> {
    memory_copier_gas(stack, mem, memory_size, 2, costs::CREATE2_WORD)
}

/// LOG0..LOG4: base, per topic and per data byte (length at depth 1).
///
/// # Errors
///
/// Returns `ArithmeticOverflow` on overflow.
pub fn gas_log(
    topics: u8,
    stack: &Stack,
    mem: &mut MemoryAccessor,
    memory_size: u64,
) -> Result<u64, GasError> {
    let data_length = operand_u64(stack, 1)?;

    let mut gas = expansion_cost(mem, memory_size)?;
    gas = add(gas, costs::LOG)?;
    gas = add(gas, mul(u64::from(topics), costs::LOG_TOPIC)?)?;
    add(gas, mul(data_length, costs::LOG_DATA)?)
}

/// EXP: base plus 50 per significant byte of the exponent (depth 1).
///
/// # Errors
///
/// Returns `ArithmeticOverflow` on overflow and `StackUnderflow` if the
/// exponent is missing.
pub fn gas_exp(stack: &Stack) -> Result<u64, GasError> {
    let exponent = stack.peek_uint(1)?;
    if exponent.is_zero() {
        return Ok(costs::EXP);
    }

    // Count bytes in exponent
    let byte_size = (256 - u64::from(exponent.leading_zeros())).div_ceil(8);
    add(costs::EXP, mul(byte_size, costs::EXP_BYTE)?)
}

/// CALL: base, value transfer and new-account surcharges.
///
/// The new-account surcharge applies whenever the target (depth 1) does not
/// exist, independent of the value (depth 2).
///
/// # Errors
///
/// Returns `ArithmeticOverflow` on overflow.
pub fn gas_call<C: CallContext + ?Sized>(
    ctx: &C,
    stack: &Stack,
    mem: &mut MemoryAccessor,
    memory_size: u64,
) -> Result<u64, GasError> {
    let target = Address::from_word(&stack.peek_word(1)?);
    let transfers_value = !stack.peek_uint(2)?.is_zero();

    let mut gas = add(expansion_cost(mem, memory_size)?, costs::CALL)?;
    if transfers_value {
        gas = add(gas, costs::CALL_VALUE)?;
    }
    if !ctx.account_exists(target) {
        gas = add(gas, costs::CALL_NEW_ACCOUNT)?;
    }
    Ok(gas)
}

/// CALLCODE: like CALL but never creates an account.
///
/// # Errors
///
/// Returns `ArithmeticOverflow` on overflow.
pub fn gas_call_code(
    stack: &Stack,
    mem: &mut MemoryAccessor,
    memory_size: u64,
) -> Result<u64, GasError> {
    let transfers_value = !stack.peek_uint(2)?.is_zero();

    let mut gas = add(expansion_cost(mem, memory_size)?, costs::CALL)?;
    if transfers_value {
        gas = add(gas, costs::CALL_VALUE)?;
    }
    Ok(gas)
}

/// SSTORE: set / clear / no-op / reset tiers against the current value.
///
/// The zero transitions are decided first; equality is only checked once
/// both are ruled out.
///
/// # Errors
///
/// Returns `ArithmeticOverflow` if the refund ledger overflows.
pub fn gas_sstore<C: CallContext + ?Sized>(
    ctx: &C,
    address: Address,
    stack: &Stack,
    mem: &mut MemoryAccessor,
) -> Result<u64, GasError> {
    let key = StorageKey::new(stack.peek_word(0)?);
    let new = StorageValue::new(stack.peek_word(1)?);
    let current = ctx.get_storage(address, key);

    if current.is_zero() && !new.is_zero() {
        Ok(costs::SSTORE_SET)
    } else if !current.is_zero() && new.is_zero() {
        mem.add_refund(costs::SSTORE_CLEAR_REFUND)?;
        Ok(costs::SSTORE_CLEAR)
    } else if current == new {
        Ok(costs::SSTORE_NOOP)
    } else {
        Ok(costs::SSTORE_RESET)
    }
}

/// SELFDESTRUCT: base plus new-account surcharge; always credits the refund.
///
/// # Errors
///
/// Returns `ArithmeticOverflow` if the refund ledger overflows.
pub fn gas_selfdestruct<C: CallContext + ?Sized>(
    ctx: &C,
    stack: &Stack,
    mem: &mut MemoryAccessor,
) -> Result<u64, GasError> {
    let beneficiary = Address::from_word(&stack.peek_word(0)?);

    let mut gas = costs::SELFDESTRUCT;
    if !ctx.account_exists(beneficiary) {
        gas = add(gas, costs::SELFDESTRUCT_NEW_ACCOUNT)?;
    }
    mem.add_refund(costs::SELFDESTRUCT_REFUND)?;
    Ok(gas)
}

// =============================================================================
// CALL GAS & REFUND
// =============================================================================

/// Calculate gas to pass to a subcall (all but one 64th of what is left).
#[must_use]
pub fn calculate_call_gas(available_gas: u64, requested_gas: u64, has_value: bool) -> u64 {
    let max_gas = available_gas - (available_gas / 64);
    let mut gas = requested_gas.min(max_gas);

    if has_value {
        gas = gas.saturating_add(costs::CALL_STIPEND);
    }

    gas
}

/// Calculate effective refund, capped at `gas_used / quotient`.
///
/// A zero quotient applies no refund.
#[must_use]
pub fn calculate_refund(gas_used: u64, refund: u64, quotient: u64) -> u64 {
    match gas_used.checked_div(quotient) {
        Some(max_refund) => refund.min(max_refund),
        None => 0,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryContext;
    use crate::domain::value_objects::U256;
    use crate::evm::memory::memory_gas_cost;

    fn stack(top_first: &[u64]) -> Stack {
        Stack::from_top(top_first.iter().map(|v| U256::from(*v))).unwrap()
    }

    fn addr(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    fn addr_word(byte: u8) -> U256 {
        U256::from_big_endian(addr(byte).as_bytes())
    }

    #[test]
    fn test_gas_memory() {
        let mut mem = MemoryAccessor::new();
        assert_eq!(gas_memory(&mut mem, 32), Ok(3));
        assert_eq!(gas_memory(&mut mem, 0), Ok(0));
    }

    #[test]
    fn test_gas_sha3() {
        let mut mem = MemoryAccessor::new();
        // offset 0, length 64
        let s = stack(&[0, 64]);
        assert_eq!(
            gas_sha3(&s, &mut mem, 64),
            Ok(memory_gas_cost(2) + 2 * costs::SHA3_WORD)
        );
    }

    #[test]
    fn test_gas_copy() {
        let mut mem = MemoryAccessor::new();
        // memOffset 0, dataOffset 0, length 33
        let s = stack(&[0, 0, 33]);
        assert_eq!(gas_copy(&s, &mut mem, 33), Ok(memory_gas_cost(2) + 2 * costs::COPY));

        // Zero length copies cost nothing beyond memory
        let s = stack(&[0, 0, 0]);
        assert_eq!(gas_copy(&s, &mut mem, 0), Ok(0));
    }

    #[test]
    fn test_gas_copy_huge_length() {
        let mut mem = MemoryAccessor::new();
        // Saturated word count is priced, never wrapped to something cheap.
        let s = stack(&[0, 0, u64::MAX]);
        assert_eq!(gas_copy(&s, &mut mem, 0), Ok(3 * (u64::MAX / 32 + 1)));

        let s = Stack::from_top([U256::zero(), U256::zero(), U256::MAX]).unwrap();
        assert_eq!(gas_copy(&s, &mut mem, 0), Err(GasError::ArithmeticOverflow));
    }

    #[test]
    fn test_per_word_gas_just_below_saturation() {
        let mut mem = MemoryAccessor::new();
        let words = u64::MAX / 32;

        let s = stack(&[0, 0, u64::MAX - 31]);
        assert_eq!(gas_copy(&s, &mut mem, 0), Ok(3 * words));

        let s = stack(&[0, u64::MAX - 31]);
        assert_eq!(gas_sha3(&s, &mut mem, 0), Ok(6 * words));
    }

    #[test]
    fn test_gas_ext_code_copy_reads_fourth_operand() {
        let mut mem = MemoryAccessor::new();
        // address, memOffset 0, codeOffset 0, length 96
        let s = stack(&[0xdead, 0, 0, 96]);
        assert_eq!(
            gas_ext_code_copy(&s, &mut mem, 96),
            Ok(memory_gas_cost(3) + 3 * costs::COPY)
        );
    }

    #[test]
    fn test_gas_create2() {
        let mut mem = MemoryAccessor::new();
        // value, offset 0, length 100, salt
        let s = stack(&[0, 0, 100, 1]);
        assert_eq!(
            gas_create2(&s, &mut mem, 100),
            Ok(memory_gas_cost(4) + 4 * costs::CREATE2_WORD)
        );
    }

    #[test]
    fn test_gas_log() {
        // LOG0 with 32 bytes data
        let mut mem = MemoryAccessor::new();
        let s = stack(&[0, 32]);
        assert_eq!(
            gas_log(0, &s, &mut mem, 32),
            Ok(memory_gas_cost(1) + costs::LOG + costs::LOG_DATA * 32)
        );

        // LOG2 with 64 bytes data, first word already paid for
        let s = stack(&[0, 64, 1, 2]);
        assert_eq!(
            gas_log(2, &s, &mut mem, 64),
            Ok(3 + costs::LOG + costs::LOG_TOPIC * 2 + costs::LOG_DATA * 64)
        );
    }

    #[test]
    fn test_gas_log_data_overflow() {
        let mut mem = MemoryAccessor::new();
        let s = stack(&[0, u64::MAX / 4]);
        assert_eq!(gas_log(1, &s, &mut mem, 0), Err(GasError::ArithmeticOverflow));
    }

    #[test]
    fn test_gas_exp() {
        let exp = |e: U256| gas_exp(&Stack::from_top([U256::from(2), e]).unwrap());
        assert_eq!(exp(U256::zero()), Ok(costs::EXP));
        assert_eq!(exp(U256::from(1)), Ok(costs::EXP + costs::EXP_BYTE));
        assert_eq!(exp(U256::from(255)), Ok(costs::EXP + costs::EXP_BYTE));
        assert_eq!(exp(U256::from(256)), Ok(costs::EXP + costs::EXP_BYTE * 2));
        assert_eq!(exp(U256::MAX), Ok(costs::EXP + costs::EXP_BYTE * 32));
    }

    #[test]
    fn test_gas_call_surcharges() {
        let mut ctx = InMemoryContext::new();
        let target = addr(0xAA);
        // gas, addr, value, inOff, inSize, retOff, retSize
        let call = |value: u64| {
            Stack::from_top([
                U256::from(50_000),
                addr_word(0xAA),
                U256::from(value),
                U256::zero(),
                U256::zero(),
                U256::zero(),
                U256::zero(),
            ])
            .unwrap()
        };

        let mut mem = MemoryAccessor::new();
        assert_eq!(
            gas_call(&ctx, &call(1), &mut mem, 0),
            Ok(costs::CALL + costs::CALL_VALUE + costs::CALL_NEW_ACCOUNT)
        );
        assert_eq!(
            gas_call_code(&call(1), &mut mem, 0),
            Ok(costs::CALL + costs::CALL_VALUE)
        );

        ctx.create_account(target);
        assert_eq!(
            gas_call(&ctx, &call(1), &mut mem, 0),
            Ok(costs::CALL + costs::CALL_VALUE)
        );
        assert_eq!(gas_call(&ctx, &call(0), &mut mem, 0), Ok(costs::CALL));
        assert_eq!(gas_call_code(&call(0), &mut mem, 0), Ok(costs::CALL));
    }

    #[test]
    fn test_gas_delegate_or_static_call() {
        let mut mem = MemoryAccessor::new();
        assert_eq!(gas_delegate_or_static_call(&mut mem, 0), Ok(costs::CALL));
        assert_eq!(
            gas_delegate_or_static_call(&mut mem, 64),
            Ok(costs::CALL + memory_gas_cost(2))
        );
    }

    #[test]
    fn test_gas_sstore_tiers() {
        let mut ctx = InMemoryContext::new();
        let contract = addr(0x01);
        let key = StorageKey::from_u256(U256::from(7));
        let mut mem = MemoryAccessor::new();
        let sstore = |value: u64| stack(&[7, value]);

        // zero -> non-zero
        assert_eq!(gas_sstore(&ctx, contract, &sstore(1), &mut mem), Ok(costs::SSTORE_SET));
        assert_eq!(mem.refund(), 0);

        // zero -> zero is a no-op
        assert_eq!(gas_sstore(&ctx, contract, &sstore(0), &mut mem), Ok(costs::SSTORE_NOOP));

        ctx.set_storage_value(contract, key, StorageValue::from_u256(U256::from(1)));

        // non-zero -> zero
        assert_eq!(gas_sstore(&ctx, contract, &sstore(0), &mut mem), Ok(costs::SSTORE_CLEAR));
        assert_eq!(mem.refund(), costs::SSTORE_CLEAR_REFUND);

        // same value
        assert_eq!(gas_sstore(&ctx, contract, &sstore(1), &mut mem), Ok(costs::SSTORE_NOOP));

        // different non-zero value
        assert_eq!(gas_sstore(&ctx, contract, &sstore(2), &mut mem), Ok(costs::SSTORE_RESET));
        assert_eq!(mem.refund(), costs::SSTORE_CLEAR_REFUND);
    }

    #[test]
    fn test_gas_selfdestruct() {
        let mut ctx = InMemoryContext::new();
        let mut mem = MemoryAccessor::new();
        let s = Stack::from_top([addr_word(0xBB)]).unwrap();

        assert_eq!(
            gas_selfdestruct(&ctx, &s, &mut mem),
            Ok(costs::SELFDESTRUCT + costs::SELFDESTRUCT_NEW_ACCOUNT)
        );
        assert_eq!(mem.refund(), costs::SELFDESTRUCT_REFUND);

        ctx.create_account(addr(0xBB));
        assert_eq!(gas_selfdestruct(&ctx, &s, &mut mem), Ok(costs::SELFDESTRUCT));
        assert_eq!(mem.refund(), 2 * costs::SELFDESTRUCT_REFUND);
    }

    #[test]
    fn test_gas_selfdestruct_refund_overflow() {
        let ctx = InMemoryContext::new();
        let mut mem = MemoryAccessor::new();
        mem.add_refund(u64::MAX - 1).unwrap();
        let s = Stack::from_top([addr_word(0xBB)]).unwrap();
        assert_eq!(
            gas_selfdestruct(&ctx, &s, &mut mem),
            Err(GasError::ArithmeticOverflow)
        );
        assert_eq!(mem.refund(), u64::MAX - 1);
    }

    #[test]
    fn test_dynamic_gas_dispatch() {
        let ctx = InMemoryContext::new();
        let mut mem = MemoryAccessor::new();
        let s = stack(&[0, 0, 64]);
        assert_eq!(
            dynamic_gas(DynamicGas::ReturnDataCopy, &ctx, Address::ZERO, &s, &mut mem, 64),
            Ok(memory_gas_cost(2) + 2 * costs::COPY)
        );
        assert_eq!(
            dynamic_gas(DynamicGas::StaticCall, &ctx, Address::ZERO, &s, &mut mem, 64),
            Ok(costs::CALL)
        );
    }

    #[test]
    fn test_calculate_call_gas() {
        // Without value, 63/64 rule
        assert_eq!(calculate_call_gas(64_000, 100_000, false), 63_000);
        assert_eq!(calculate_call_gas(64_000, 50_000, false), 50_000);

        // With value, add stipend
        assert_eq!(calculate_call_gas(64_000, 50_000, true), 52_300);
    }

    #[test]
    fn test_calculate_refund() {
        // Refund capped at 50%
        assert_eq!(calculate_refund(1000, 600, 2), 500);
        assert_eq!(calculate_refund(1000, 400, 2), 400);
        assert_eq!(calculate_refund(1000, 500, 2), 500);
        // 20% cap
        assert_eq!(calculate_refund(1000, 500, 5), 200);
        assert_eq!(calculate_refund(1000, 500, 0), 0);
    }
}
