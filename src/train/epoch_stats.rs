use serde::{Deserialize, Serialize};

/// Per-epoch training statistics handed to every `TrainingObserver` once an
/// epoch is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 0-based epoch index.
    pub epoch: usize,
    /// Training examples the network already got right, i.e. needed no correction.
    pub correct: usize,
    /// Size of the training set.
    pub total: usize,
    /// Wall-clock duration of this epoch in milliseconds.
    pub elapsed_ms: u64,
}

impl EpochStats {
    /// Accuracy as a fraction in [0, 1].
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}
