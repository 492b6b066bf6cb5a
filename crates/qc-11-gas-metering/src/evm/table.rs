//! # Instruction Cost Table
//!
//! Static gas, dynamic gas function and memory shape for every defined
//! opcode, indexed by opcode byte. Built at compile time; undefined bytes
//! have no entry.

use crate::evm::gas::{costs, DynamicGas};
use crate::evm::memory_size::MemoryShape;
use crate::evm::opcodes::Opcode;

/// Cost record of one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionCost {
    /// Fixed cost, 0 if purely dynamic.
    pub static_gas: u64,
    /// Operand- or memory-dependent part, if any.
    pub dynamic_gas: Option<DynamicGas>,
    /// Stack slots that size the memory footprint.
    pub mem_shape: MemoryShape,
}

impl InstructionCost {
    const fn fixed(static_gas: u64) -> Self {
        Self {
            static_gas,
            dynamic_gas: None,
            mem_shape: MemoryShape::None,
        }
    }

    const fn dynamic(static_gas: u64, dynamic_gas: DynamicGas, mem_shape: MemoryShape) -> Self {
        Self {
            static_gas,
            dynamic_gas: Some(dynamic_gas),
            mem_shape,
        }
    }
}

#[allow(clippy::enum_glob_use)]
const fn cost_of(op: Opcode) -> InstructionCost {
    use InstructionCost as C;
    use Opcode::*;

    match op {
        Stop | Invalid => C::fixed(costs::ZERO),
        Return | Revert => C::dynamic(costs::ZERO, DynamicGas::Memory, MemoryShape::Return),
        JumpDest => C::fixed(costs::JUMPDEST),

        Address | Origin | Caller | CallValue | CallDataSize | CodeSize | GasPrice
        | ReturnDataSize | Coinbase | Timestamp | Number | Difficulty | GasLimit | Pop | Pc
        | MSize | Gas => C::fixed(costs::BASE),

        Add | Sub | Lt | Gt | SLt | SGt | Eq | IsZero | And | Or | Xor | Not | Byte | Shl | Shr
        | Sar | CallDataLoad => C::fixed(costs::VERY_LOW),

        Mul | Div | SDiv | Mod | SMod | SignExtend => C::fixed(costs::LOW),
        AddMod | MulMod | Jump => C::fixed(costs::MID),
        JumpI => C::fixed(costs::HIGH),
        BlockHash => C::fixed(costs::BLOCKHASH),

        Balance => C::fixed(costs::BALANCE),
        ExtCodeSize => C::fixed(costs::EXTCODESIZE),
        ExtCodeHash => C::fixed(costs::EXTCODEHASH),
        SLoad => C::fixed(costs::SLOAD),

        Exp => C::dynamic(costs::ZERO, DynamicGas::Exp, MemoryShape::None),
        Sha3 => C::dynamic(costs::SHA3, DynamicGas::Sha3, MemoryShape::Sha3),

        CallDataCopy => C::dynamic(costs::VERY_LOW, DynamicGas::CallDataCopy, MemoryShape::CallDataCopy),
        CodeCopy => C::dynamic(costs::VERY_LOW, DynamicGas::CodeCopy, MemoryShape::CodeCopy),
        ReturnDataCopy => C::dynamic(costs::VERY_LOW, DynamicGas::ReturnDataCopy, MemoryShape::CodeCopy),
        ExtCodeCopy => C::dynamic(costs::EXTCODECOPY, DynamicGas::ExtCodeCopy, MemoryShape::ExtCodeCopy),

        MLoad | MStore => C::dynamic(costs::VERY_LOW, DynamicGas::Memory, MemoryShape::Word),
        MStore8 => C::dynamic(costs::VERY_LOW, DynamicGas::Memory, MemoryShape::Byte),
        SStore => C::dynamic(costs::ZERO, DynamicGas::SStore, MemoryShape::None),

        Log0 => C::dynamic(costs::ZERO, DynamicGas::Log(0), MemoryShape::Log),
        Log1 => C::dynamic(costs::ZERO, DynamicGas::Log(1), MemoryShape::Log),
        Log2 => C::dynamic(costs::ZERO, DynamicGas::Log(2), MemoryShape::Log),
        Log3 => C::dynamic(costs::ZERO, DynamicGas::Log(3), MemoryShape::Log),
        Log4 => C::dynamic(costs::ZERO, DynamicGas::Log(4), MemoryShape::Log),

        Create => C::dynamic(costs::CREATE, DynamicGas::Memory, MemoryShape::Create),
        Create2 => C::dynamic(costs::CREATE, DynamicGas::Create2, MemoryShape::Create2),
        Call => C::dynamic(costs::ZERO, DynamicGas::Call, MemoryShape::Call),
        CallCode => C::dynamic(costs::ZERO, DynamicGas::CallCode, MemoryShape::Call),
        DelegateCall => C::dynamic(costs::ZERO, DynamicGas::DelegateCall, MemoryShape::DelegateCall),
        StaticCall => C::dynamic(costs::ZERO, DynamicGas::StaticCall, MemoryShape::DelegateCall),
        SelfDestruct => C::dynamic(costs::ZERO, DynamicGas::SelfDestruct, MemoryShape::None),

        // PUSH1-32, DUP1-16, SWAP1-16
        _ => C::fixed(costs::VERY_LOW),
    }
}

/// Cost records indexed by opcode byte.
pub static INSTRUCTION_TABLE: [Option<InstructionCost>; 256] = {
    let mut table = [None; 256];
    let mut byte = 0;
    while byte < 256 {
        if let Some(op) = Opcode::from_byte(byte as u8) {
            table[byte] = Some(cost_of(op));
        }
        byte += 1;
    }
    table
};

/// Cost record for `opcode`, `None` for undefined opcodes.
#[must_use]
pub fn lookup(opcode: u8) -> Option<&'static InstructionCost> {
    INSTRUCTION_TABLE[usize::from(opcode)].as_ref()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(op: Opcode) -> InstructionCost {
        *lookup(op.as_byte()).unwrap()
    }

    #[test]
    fn test_static_tiers() {
        assert_eq!(entry(Opcode::Stop).static_gas, 0);
        assert_eq!(entry(Opcode::Address).static_gas, costs::BASE);
        assert_eq!(entry(Opcode::Add).static_gas, costs::VERY_LOW);
        assert_eq!(entry(Opcode::Mul).static_gas, costs::LOW);
        assert_eq!(entry(Opcode::AddMod).static_gas, costs::MID);
        assert_eq!(entry(Opcode::JumpI).static_gas, costs::HIGH);
        assert_eq!(entry(Opcode::BlockHash).static_gas, costs::EXT);
        assert_eq!(entry(Opcode::Push1).static_gas, costs::VERY_LOW);
        assert_eq!(entry(Opcode::Push32).static_gas, costs::VERY_LOW);
        assert_eq!(entry(Opcode::Dup16).static_gas, costs::VERY_LOW);
        assert_eq!(entry(Opcode::Swap1).static_gas, costs::VERY_LOW);
        assert_eq!(entry(Opcode::JumpDest).static_gas, costs::JUMPDEST);
    }

    #[test]
    fn test_fixed_entries_have_no_memory() {
        for byte in 0..=u8::MAX {
            if let Some(cost) = lookup(byte) {
                if cost.dynamic_gas.is_none() {
                    assert_eq!(cost.mem_shape, MemoryShape::None, "opcode 0x{byte:02X}");
                }
            }
        }
    }

    #[test]
    fn test_dynamic_entries() {
        let sha3 = entry(Opcode::Sha3);
        assert_eq!(sha3.static_gas, costs::SHA3);
        assert_eq!(sha3.dynamic_gas, Some(DynamicGas::Sha3));
        assert_eq!(sha3.mem_shape, MemoryShape::Sha3);

        let log3 = entry(Opcode::Log3);
        assert_eq!(log3.static_gas, 0);
        assert_eq!(log3.dynamic_gas, Some(DynamicGas::Log(3)));
        assert_eq!(log3.mem_shape, MemoryShape::Log);

        assert_eq!(entry(Opcode::MStore8).mem_shape, MemoryShape::Byte);
        assert_eq!(entry(Opcode::ReturnDataCopy).mem_shape, MemoryShape::CodeCopy);
        assert_eq!(entry(Opcode::StaticCall).mem_shape, MemoryShape::DelegateCall);
        assert_eq!(entry(Opcode::Create2).static_gas, costs::CREATE);
        assert_eq!(entry(Opcode::SStore).dynamic_gas, Some(DynamicGas::SStore));
        assert_eq!(entry(Opcode::SelfDestruct).mem_shape, MemoryShape::None);
    }

    #[test]
    fn test_undefined_opcodes_absent() {
        assert!(lookup(0x0C).is_none());
        assert!(lookup(0x21).is_none());
        assert!(lookup(0x5F).is_none());
        assert!(lookup(0xEF).is_none());
        assert_eq!(INSTRUCTION_TABLE.iter().filter(|c| c.is_some()).count(), 140);
    }
}
