//! Random code generation

use rand::{rngs::OsRng, RngCore};

use crate::errors::{LifecycleError, LifecycleResult};

/// Source of one-time codes
pub trait CodeGenerator: Send + Sync {
    /// Produce a fresh code, unpredictable from earlier outputs
    fn generate(&self) -> LifecycleResult<String>;
}

/// Digits-only codes drawn from `OsRng`
#[derive(Debug, Clone)]
pub struct NumericCodeGenerator {
    length: usize,
}

impl NumericCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl CodeGenerator for NumericCodeGenerator {
    fn generate(&self) -> LifecycleResult<String> {
        let mut code = String::with_capacity(self.length);
        let mut buffer = [0u8; 32];

        while code.len() < self.length {
            OsRng.try_fill_bytes(&mut buffer).map_err(|e| {
                tracing::error!(error = %e, event = "randomness_unavailable", "OS entropy source failed");
                LifecycleError::RandomnessUnavailable
            })?;

            // Bytes >= 250 would bias the low digits
            for byte in buffer.iter().filter(|b| **b < 250) {
                if code.len() == self.length {
                    break;
                }
                code.push(char::from(b'0' + byte % 10));
            }
        }

        Ok(code)
    }
}
