//! # Gas Meter
//!
//! Per-call-frame gas budget. Prices an instruction in one step: table
//! lookup, memory sizing, dynamic gas, deduction, then memory growth. The
//! instruction's semantics run only after `charge_instruction` succeeds.

use crate::domain::config::MeterConfig;
use crate::domain::value_objects::Address;
use crate::errors::GasError;
use crate::evm::gas::{calculate_refund, dynamic_gas};
use crate::evm::math::checked_add;
use crate::evm::memory::MemoryAccessor;
use crate::evm::memory_size::{required_memory_size, MemoryShape};
use crate::evm::stack::Stack;
use crate::evm::table::lookup;
use crate::ports::outbound::CallContext;
use tracing::{debug, trace};

/// Outcome of a finished call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// Gas consumed before the refund is applied.
    pub gas_used: u64,
    /// Refund granted after the cap.
    pub refund: u64,
}

impl Settlement {
    /// Gas consumed after the refund.
    #[must_use]
    pub fn net_gas_used(&self) -> u64 {
        self.gas_used.saturating_sub(self.refund)
    }
}

/// Gas budget of one call frame.
///
/// The first failed charge aborts the call: all gas is consumed, the
/// failing instruction leaves no trace in the memory bookkeeping, and every
/// later charge is refused with `CallAborted`.
#[derive(Clone, Debug)]
pub struct GasMeter {
    config: MeterConfig,
    remaining: u64,
    aborted: bool,
}

impl GasMeter {
    /// Creates a meter with the full budget of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: MeterConfig) -> Result<Self, GasError> {
        config.validate()?;
        Ok(Self {
            remaining: config.gas_limit,
            config,
            aborted: false,
        })
    }

    /// Gas budget of the call.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.config.gas_limit
    }

    /// Gas left.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Gas consumed so far.
    #[must_use]
    pub fn gas_used(&self) -> u64 {
        self.config.gas_limit - self.remaining
    }

    /// Returns true once a charge has failed.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Deducts `amount`. On failure the call is aborted.
    ///
    /// # Errors
    ///
    /// Returns `OutOfGas` if `amount` exceeds what is left and
    /// `CallAborted` if the call already failed.
    pub fn consume(&mut self, amount: u64) -> Result<(), GasError> {
        if self.aborted {
            return Err(GasError::CallAborted);
        }
        if amount > self.remaining {
            let remaining = self.remaining;
            self.abort();
            return Err(GasError::OutOfGas {
                required: amount,
                remaining,
            });
        }
        self.remaining -= amount;
        Ok(())
    }

    fn abort(&mut self) {
        self.remaining = 0;
        self.aborted = true;
    }

    /// Charges the instruction `opcode` against the budget.
    ///
    /// On success memory has been grown to the size the instruction needs
    /// and the charged amount is returned.
    ///
    /// # Errors
    ///
    /// `InvalidOpcode` for undefined opcodes, `ArithmeticOverflow`,
    /// `StackUnderflow`, `OutOfGas` and `MemoryLimitExceeded`. Any error
    /// aborts the call and rolls back refunds and memory cost credited by
    /// the failing instruction. `CallAborted` once the call has failed.
    pub fn charge_instruction<C: CallContext + ?Sized>(
        &mut self,
        opcode: u8,
        ctx: &C,
        address: Address,
        stack: &Stack,
        mem: &mut MemoryAccessor,
    ) -> Result<u64, GasError> {
        if self.aborted {
            return Err(GasError::CallAborted);
        }
        let checkpoint = mem.checkpoint();
        let result = self.price(opcode, ctx, address, stack, mem);
        if let Err(err) = &result {
            mem.revert_to(checkpoint);
            self.abort();
            debug!(opcode = format_args!("0x{opcode:02X}"), error = %err, "instruction rejected");
        }
        result
    }

    fn price<C: CallContext + ?Sized>(
        &mut self,
        opcode: u8,
        ctx: &C,
        address: Address,
        stack: &Stack,
        mem: &mut MemoryAccessor,
    ) -> Result<u64, GasError> {
        let cost = lookup(opcode).ok_or(GasError::InvalidOpcode(opcode))?;

        let memory_size = if cost.mem_shape == MemoryShape::None {
            0
        } else {
            match required_memory_size(cost.mem_shape, stack)? {
                (size, false) => size,
                (_, true) => return Err(GasError::ArithmeticOverflow),
            }
        };

        let dynamic = match cost.dynamic_gas {
            Some(function) => dynamic_gas(function, ctx, address, stack, mem, memory_size)?,
            None => 0,
        };

        let total = match checked_add(cost.static_gas, dynamic) {
            (total, false) => total,
            (_, true) => return Err(GasError::ArithmeticOverflow),
        };
        self.consume(total)?;

        if memory_size > 0 {
            mem.memory_mut()
                .resize(memory_size, self.config.max_memory_size)?;
        }

        trace!(
            opcode = format_args!("0x{opcode:02X}"),
            static_gas = cost.static_gas,
            dynamic_gas = dynamic,
            remaining = self.remaining,
            "charged instruction"
        );
        Ok(total)
    }

    /// Closes the call, reading the refund ledger once.
    ///
    /// An aborted call earns no refund.
    #[must_use]
    pub fn settle(&self, mem: &MemoryAccessor) -> Settlement {
        let gas_used = self.gas_used();
        let refund = if self.aborted {
            0
        } else {
            calculate_refund(gas_used, mem.refund(), self.config.max_refund_quotient)
        };
        debug!(gas_used, refund, accrued = mem.refund(), aborted = self.aborted, "call settled");
        Settlement { gas_used, refund }
    }
}

// =============================================================================
// TESTS
// =============================================================================
