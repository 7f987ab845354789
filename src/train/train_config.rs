use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};

/// Stopping rules for a `train_loop` run.
///
/// # Fields
/// - `max_epochs`        — hard cap on completed epochs
/// - `precision_digits`  — decimal digits of percent accuracy that must stay
///                         unchanged across the window to count as converged
/// - `convergence_range` — width of the accuracy window, in epochs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub max_epochs: usize,
    pub precision_digits: u32,
    pub convergence_range: usize,
}

impl TrainConfig {
    pub fn new(max_epochs: usize, precision_digits: u32, convergence_range: usize) -> Self {
        TrainConfig { max_epochs, precision_digits, convergence_range }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_epochs == 0 {
            return Err(NetError::invalid("maxEpoch must be greater than 0"));
        }
        if self.convergence_range < 2 {
            return Err(NetError::invalid("convergence range must be greater than 1"));
        }
        self.precision().map(|_| ())
    }

    /// `10^precision_digits`.
    pub fn precision(&self) -> Result<i64> {
        10i64.checked_pow(self.precision_digits).ok_or_else(|| {
            NetError::invalid(format!(
                "convergence precision of {} digits is too large",
                self.precision_digits
            ))
        })
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(1000, 2, 32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = TrainConfig::default();
        c.validate().unwrap();
        assert_eq!(c.precision().unwrap(), 100);
    }

    #[test]
    fn zero_digits_means_whole_percent() {
        assert_eq!(TrainConfig::new(10, 0, 2).precision().unwrap(), 1);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(TrainConfig::new(0, 2, 32).validate().is_err());
        assert!(TrainConfig::new(10, 2, 1).validate().is_err());
        assert!(TrainConfig::new(10, 19, 32).validate().is_err());
    }
}
