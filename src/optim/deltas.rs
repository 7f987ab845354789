use crate::activation::sigmoid_slope;
use crate::error::{try_with_capacity, NetError, Result};
use crate::network::Network;
use crate::symbols::Symbol;

/// Per-node error terms for one example, indexed `[layer][node]`.
///
/// Computing them only reads the network, so every delta in a set is taken
/// against the same weights: the ones the forward pass just used.
#[derive(Debug, Clone, PartialEq)]
pub struct Deltas {
    layers: Vec<Vec<f64>>,
}

impl Deltas {
    /// Phase one of a correction. Expects `network`'s activation buffer to
    /// hold the forward pass of the example whose desired output is `desired`.
    ///
    /// Output node: `a(1-a)(target - a)`, with the target taken from that
    /// output's translator. Hidden node `n` of layer `l`:
    /// `a(1-a) Σ_m delta[l+1][m] · w[l+1][m][n+1]` (edge 0 is the bias).
    pub fn compute(network: &Network, desired: &[Symbol]) -> Result<Deltas> {
        let topology = network.topology();
        if desired.len() != topology.output_len() {
            return Err(NetError::invalid(format!(
                "desired output has {} symbols, network produces {}",
                desired.len(),
                topology.output_len()
            )));
        }

        let count = topology.layer_count();
        let mut layers: Vec<Vec<f64>> = try_with_capacity(count, || "delta layers".into())?;
        for (l, &size) in topology.layer_sizes().iter().enumerate() {
            let mut nodes = try_with_capacity(size, || format!("deltas of layer {l}"))?;
            nodes.resize(size, 0.0);
            layers.push(nodes);
        }

        let acts = network.activations();
        let last = count - 1;

        for (n, delta) in layers[last].iter_mut().enumerate() {
            let target = network.translators()[n].encode(desired[n], n)?;
            let a = acts.output()[n];
            *delta = sigmoid_slope(a) * (target - a);
        }

        for l in (0..last).rev() {
            let (current, above) = layers.split_at_mut(l + 1);
            let next_weights = network.weights().layer(l + 1);
            for (n, delta) in current[l].iter_mut().enumerate() {
                let downstream: f64 = above[0]
                    .iter()
                    .zip(next_weights)
                    .map(|(d, w)| d * w[n + 1])
                    .sum();
                *delta = sigmoid_slope(acts.layer(l)[n]) * downstream;
            }
        }

        Ok(Deltas { layers })
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, layer: usize) -> &[f64] {
        &self.layers[layer]
    }
}
