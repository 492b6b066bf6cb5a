//! # EVM Opcodes
//!
//! Instruction set priced by the cost table (Constantinople). Bytes without
//! an `Opcode` are undefined and rejected before pricing.

macro_rules! opcodes {
    ($($name:ident = $byte:literal => $mnemonic:literal,)+) => {
        /// EVM Opcode enumeration.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum Opcode {
            $(
                #[doc = $mnemonic]
                $name = $byte,
            )+
        }

        impl Opcode {
            /// Decodes an opcode byte, `None` if undefined.
            #[must_use]
            pub const fn from_byte(byte: u8) -> Option<Self> {
                match byte {
                    $($byte => Some(Self::$name),)+
                    _ => None,
                }
            }

            /// Assembly mnemonic.
            #[must_use]
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $(Self::$name => $mnemonic,)+
                }
            }
        }
    };
}

#[rustfmt::skip]
opcodes! {
    // Stop and arithmetic
    Stop = 0x00 => "STOP", Add = 0x01 => "ADD", Mul = 0x02 => "MUL", Sub = 0x03 => "SUB",
    Div = 0x04 => "DIV", SDiv = 0x05 => "SDIV", Mod = 0x06 => "MOD", SMod = 0x07 => "SMOD",
    AddMod = 0x08 => "ADDMOD", MulMod = 0x09 => "MULMOD", Exp = 0x0A => "EXP",
    SignExtend = 0x0B => "SIGNEXTEND",

    // Comparison and bitwise
    Lt = 0x10 => "LT", Gt = 0x11 => "GT", SLt = 0x12 => "SLT", SGt = 0x13 => "SGT",
    Eq = 0x14 => "EQ", IsZero = 0x15 => "ISZERO", And = 0x16 => "AND", Or = 0x17 => "OR",
    Xor = 0x18 => "XOR", Not = 0x19 => "NOT", Byte = 0x1A => "BYTE", Shl = 0x1B => "SHL",
    Shr = 0x1C => "SHR", Sar = 0x1D => "SAR",

    Sha3 = 0x20 => "SHA3",

    // Environment
    Address = 0x30 => "ADDRESS", Balance = 0x31 => "BALANCE", Origin = 0x32 => "ORIGIN",
    Caller = 0x33 => "CALLER", CallValue = 0x34 => "CALLVALUE",
    CallDataLoad = 0x35 => "CALLDATALOAD", CallDataSize = 0x36 => "CALLDATASIZE",
    CallDataCopy = 0x37 => "CALLDATACOPY", CodeSize = 0x38 => "CODESIZE",
    CodeCopy = 0x39 => "CODECOPY", GasPrice = 0x3A => "GASPRICE",
    ExtCodeSize = 0x3B => "EXTCODESIZE", ExtCodeCopy = 0x3C => "EXTCODECOPY",
    ReturnDataSize = 0x3D => "RETURNDATASIZE", ReturnDataCopy = 0x3E => "RETURNDATACOPY",
    ExtCodeHash = 0x3F => "EXTCODEHASH",

    // Block information
    BlockHash = 0x40 => "BLOCKHASH", Coinbase = 0x41 => "COINBASE",
    Timestamp = 0x42 => "TIMESTAMP", Number = 0x43 => "NUMBER",
    Difficulty = 0x44 => "DIFFICULTY", GasLimit = 0x45 => "GASLIMIT",

    // Stack, memory, storage and flow
    Pop = 0x50 => "POP", MLoad = 0x51 => "MLOAD", MStore = 0x52 => "MSTORE",
    MStore8 = 0x53 => "MSTORE8", SLoad = 0x54 => "SLOAD", SStore = 0x55 => "SSTORE",
    Jump = 0x56 => "JUMP", JumpI = 0x57 => "JUMPI", Pc = 0x58 => "PC", MSize = 0x59 => "MSIZE",
    Gas = 0x5A => "GAS", JumpDest = 0x5B => "JUMPDEST",

    Push1 = 0x60 => "PUSH1", Push2 = 0x61 => "PUSH2", Push3 = 0x62 => "PUSH3",
    Push4 = 0x63 => "PUSH4", Push5 = 0x64 => "PUSH5", Push6 = 0x65 => "PUSH6",
    Push7 = 0x66 => "PUSH7", Push8 = 0x67 => "PUSH8", Push9 = 0x68 => "PUSH9",
    Push10 = 0x69 => "PUSH10", Push11 = 0x6A => "PUSH11", Push12 = 0x6B => "PUSH12",
    Push13 = 0x6C => "PUSH13", Push14 = 0x6D => "PUSH14", Push15 = 0x6E => "PUSH15",
    Push16 = 0x6F => "PUSH16", Push17 = 0x70 => "PUSH17", Push18 = 0x71 => "PUSH18",
    Push19 = 0x72 => "PUSH19", Push20 = 0x73 => "PUSH20", Push21 = 0x74 => "PUSH21",
    Push22 = 0x75 => "PUSH22", Push23 = 0x76 => "PUSH23", Push24 = 0x77 => "PUSH24",
    Push25 = 0x78 => "PUSH25", Push26 = 0x79 => "PUSH26", Push27 = 0x7A => "PUSH27",
    Push28 = 0x7B => "PUSH28", Push29 = 0x7C => "PUSH29", Push30 = 0x7D => "PUSH30",
    Push31 = 0x7E => "PUSH31", Push32 = 0x7F => "PUSH32",

    Dup1 = 0x80 => "DUP1", Dup2 = 0x81 => "DUP2", Dup3 = 0x82 => "DUP3", Dup4 = 0x83 => "DUP4",
    Dup5 = 0x84 => "DUP5", Dup6 = 0x85 => "DUP6", Dup7 = 0x86 => "DUP7", Dup8 = 0x87 => "DUP8",
    Dup9 = 0x88 => "DUP9", Dup10 = 0x89 => "DUP10", Dup11 = 0x8A => "DUP11",
    Dup12 = 0x8B => "DUP12", Dup13 = 0x8C => "DUP13", Dup14 = 0x8D => "DUP14",
    Dup15 = 0x8E => "DUP15", Dup16 = 0x8F => "DUP16",

    Swap1 = 0x90 => "SWAP1", Swap2 = 0x91 => "SWAP2", Swap3 = 0x92 => "SWAP3",
    Swap4 = 0x93 => "SWAP4", Swap5 = 0x94 => "SWAP5", Swap6 = 0x95 => "SWAP6",
    Swap7 = 0x96 => "SWAP7", Swap8 = 0x97 => "SWAP8", Swap9 = 0x98 => "SWAP9",
    Swap10 = 0x99 => "SWAP10", Swap11 = 0x9A => "SWAP11", Swap12 = 0x9B => "SWAP12",
    Swap13 = 0x9C => "SWAP13", Swap14 = 0x9D => "SWAP14", Swap15 = 0x9E => "SWAP15",
    Swap16 = 0x9F => "SWAP16",

    Log0 = 0xA0 => "LOG0", Log1 = 0xA1 => "LOG1", Log2 = 0xA2 => "LOG2",
    Log3 = 0xA3 => "LOG3", Log4 = 0xA4 => "LOG4",

    // System
    Create = 0xF0 => "CREATE", Call = 0xF1 => "CALL", CallCode = 0xF2 => "CALLCODE",
    Return = 0xF3 => "RETURN", DelegateCall = 0xF4 => "DELEGATECALL",
    Create2 = 0xF5 => "CREATE2", StaticCall = 0xFA => "STATICCALL", Revert = 0xFD => "REVERT",
    Invalid = 0xFE => "INVALID", SelfDestruct = 0xFF => "SELFDESTRUCT",
}

impl Opcode {
    /// Raw opcode byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_from_byte() {
        assert_eq!(Opcode::from_byte(0x00), Some(Opcode::Stop));
        assert_eq!(Opcode::from_byte(0x01), Some(Opcode::Add));
        assert_eq!(Opcode::from_byte(0x20), Some(Opcode::Sha3));
        assert_eq!(Opcode::from_byte(0x60), Some(Opcode::Push1));
        assert_eq!(Opcode::from_byte(0x7F), Some(Opcode::Push32));
        assert_eq!(Opcode::from_byte(0x80), Some(Opcode::Dup1));
        assert_eq!(Opcode::from_byte(0x90), Some(Opcode::Swap1));
        assert_eq!(Opcode::from_byte(0xF1), Some(Opcode::Call));
        assert_eq!(Opcode::from_byte(0x0C), None); // Invalid
        assert_eq!(Opcode::from_byte(0x46), None); // CHAINID is not priced
        assert_eq!(Opcode::from_byte(0x5F), None); // nor PUSH0
    }

    #[test]
    fn test_round_trip_byte() {
        let mut defined = 0;
        for byte in 0..=u8::MAX {
            if let Some(op) = Opcode::from_byte(byte) {
                assert_eq!(op.as_byte(), byte);
                defined += 1;
            }
        }
        assert_eq!(defined, 140);
    }

    #[test]
    fn test_mnemonic() {
        assert_eq!(Opcode::ExtCodeCopy.to_string(), "EXTCODECOPY");
        assert_eq!(Opcode::Push32.mnemonic(), "PUSH32");
    }
}
