use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};

/// Shape of a network: input width plus the node count of every layer.
/// The last layer is the output layer. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    input_len: usize,
    layer_sizes: Vec<usize>,
}

impl Topology {
    pub fn new(input_len: usize, layer_sizes: Vec<usize>) -> Result<Topology> {
        if input_len == 0 {
            return Err(NetError::invalid("length of input vector must be greater than 0"));
        }
        if layer_sizes.is_empty() {
            return Err(NetError::invalid("number of layers must be greater than 0"));
        }
        if let Some(l) = layer_sizes.iter().position(|&n| n == 0) {
            return Err(NetError::invalid(format!("layer {l} must contain at least 1 node")));
        }
        Ok(Topology { input_len, layer_sizes })
    }

    /// Default layer sizes when none are given: the first layer as wide as
    /// the input, the last as wide as the output, and every interior layer
    /// the integer midpoint of its enclosing pair, filled recursively.
    pub fn interpolated(input_len: usize, output_len: usize, layer_count: usize) -> Result<Topology> {
        if layer_count == 0 {
            return Err(NetError::invalid("number of layers must be greater than 0"));
        }
        let mut sizes = vec![0; layer_count];
        sizes[0] = input_len;
        sizes[layer_count - 1] = output_len;
        fill_midpoints(&mut sizes, 0, layer_count - 1);
        Topology::new(input_len, sizes)
    }

    pub fn input_len(&self) -> usize {
        self.input_len
    }

    pub fn output_len(&self) -> usize {
        // non-empty by construction
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    pub fn layer_count(&self) -> usize {
        self.layer_sizes.len()
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// Number of activations feeding each node of `layer`.
    pub fn fan_in(&self, layer: usize) -> usize {
        if layer == 0 {
            self.input_len
        } else {
            self.layer_sizes[layer - 1]
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        Topology::new(self.input_len, self.layer_sizes.clone()).map(|_| ())
    }
}

fn fill_midpoints(sizes: &mut [usize], start: usize, end: usize) {
    if start + 1 >= end {
        return;
    }
    let mid = (start + end) / 2;
    sizes[mid] = (sizes[start] + sizes[end]) / 2;
    fill_midpoints(sizes, start, mid);
    fill_midpoints(sizes, mid, end);
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: Vec<String> = self.layer_sizes.iter().map(|n| n.to_string()).collect();
        write!(
            f,
            "{} layers, input length {}, node counts [{}], output length {}",
            self.layer_count(),
            self.input_len,
            counts.join(", "),
            self.output_len()
        )
    }
}
