use crate::error::Result;
use crate::network::{ActivationBuffer, Network, WeightStore};
use crate::optim::deltas::Deltas;
use crate::symbols::{encode_input, LabeledExample, Symbol};

/// Plain online gradient step with a fixed learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Corrects `network` towards `example`'s desired output.
    ///
    /// The forward pass for `example.input` must be the most recent one run
    /// on `network`. All deltas are computed before any weight changes; if
    /// that fails the weights are left untouched.
    pub fn correct(&self, network: &mut Network, example: &LabeledExample) -> Result<()> {
        let deltas = Deltas::compute(network, &example.output)?;
        self.step(network, &example.input, &deltas);
        Ok(())
    }

    /// Phase two: `w[l][n][i] += rate · source(l, i) · delta[l][n]`, where
    /// `source(l, 0)` is the constant bias input 1.0.
    pub fn step(&self, network: &mut Network, input: &[Symbol], deltas: &Deltas) {
        let encoded: Vec<f64> = input.iter().map(|&s| encode_input(s)).collect();
        let (weights, acts) = network.weights_and_activations_mut();
        for l in 0..deltas.layer_count() {
            self.step_layer(weights, acts, &encoded, deltas, l);
        }
    }

    pub(crate) fn step_layer(
        &self,
        weights: &mut WeightStore,
        acts: &ActivationBuffer,
        encoded_input: &[f64],
        deltas: &Deltas,
        layer: usize,
    ) {
        let sources = if layer == 0 { encoded_input } else { acts.layer(layer - 1) };
        for (n, &delta) in deltas.layer(layer).iter().enumerate() {
            let scaled = self.learning_rate * delta;
            let node = weights.node_mut(layer, n);
            node[0] += scaled;
            for (w, x) in node[1..].iter_mut().zip(sources) {
                *w += scaled * x;
            }
        }
    }
}
