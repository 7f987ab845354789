use serde::{Deserialize, Serialize};

use crate::symbols::Symbol;

/// One row of training or trial data: an input symbol vector and the output
/// symbol vector the network should produce for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub input: Vec<Symbol>,
    pub output: Vec<Symbol>,
}

impl LabeledExample {
    pub fn new(input: impl Into<Vec<Symbol>>, output: impl Into<Vec<Symbol>>) -> Self {
        LabeledExample { input: input.into(), output: output.into() }
    }

    /// Exact symbol-wise equality against a decoded network output.
    pub fn matches(&self, produced: &[Symbol]) -> bool {
        self.output.as_slice() == produced
    }
}

impl std::fmt::Display for LabeledExample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |s: &[Symbol]| {
            s.iter().map(|&b| (b as char).to_string()).collect::<Vec<_>>().join(", ")
        };
        write!(f, "input: {}  output: {}", join(&self.input), join(&self.output))
    }
}
