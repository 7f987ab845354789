use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::network::Network;
use crate::symbols::LabeledExample;

/// Outcome of a forward-only pass over a held-out set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialReport {
    pub correct: usize,
    pub total: usize,
}

impl TrialReport {
    /// `correct / total`, or 0 for an empty set.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

impl std::fmt::Display for TrialReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} = {:.2}%", self.correct, self.total, 100.0 * self.ratio())
    }
}

/// Counts the examples whose decoded output equals the desired output,
/// symbol for symbol. Weights are never modified; the activation buffer is.
pub fn evaluate(network: &mut Network, examples: &[LabeledExample]) -> Result<TrialReport> {
    let mut correct = 0;
    for example in examples {
        if example.matches(&network.forward(&example.input)?) {
            correct += 1;
        }
    }
    Ok(TrialReport { correct, total: examples.len() })
}
