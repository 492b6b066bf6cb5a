//! # Meter Configuration
//!
//! Per-call-frame knobs for the gas meter. The gas schedule itself is not
//! configurable: constants and the instruction table are process-wide.

use crate::errors::GasError;
use serde::{Deserialize, Serialize};

/// Gas meter configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    /// Gas budget of the call frame (default: block gas limit).
    pub gas_limit: u64,
    /// Refund is capped at `gas_used / max_refund_quotient` on settlement.
    pub max_refund_quotient: u64,
    /// Largest linear memory buffer the meter will grow to, in bytes.
    pub max_memory_size: u64,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            gas_limit: Self::BLOCK_GAS_LIMIT,
            max_refund_quotient: 2,
            max_memory_size: 16 * 1024 * 1024, // 16 MB
        }
    }
}

impl MeterConfig {
    /// Block gas limit (30 million).
    pub const BLOCK_GAS_LIMIT: u64 = 30_000_000;

    /// Creates a default configuration with the given gas budget.
    #[must_use]
    pub fn with_gas_limit(gas_limit: u64) -> Self {
        Self {
            gas_limit,
            ..Self::default()
        }
    }

    /// Checks the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` for a zero refund quotient, since the
    /// refund cap would divide by zero.
    pub fn validate(&self) -> Result<(), GasError> {
        if self.max_refund_quotient == 0 {
            return Err(GasError::ArithmeticOverflow);
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MeterConfig::default();
        assert_eq!(config.gas_limit, 30_000_000);
        assert_eq!(config.max_refund_quotient, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_quotient_rejected() {
        let config = MeterConfig {
            max_refund_quotient: 0,
            ..MeterConfig::default()
        };
        assert_eq!(config.validate(), Err(GasError::ArithmeticOverflow));
    }

    #[test]
    fn test_config_json_partial() {
        let config: MeterConfig = serde_json::from_str(r#"{"gas_limit": 100000}"#).unwrap();
        assert_eq!(config, MeterConfig::with_gas_limit(100_000));

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("max_memory_size"));
    }
}
