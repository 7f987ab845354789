use crate::error::{try_with_capacity, Result};
use crate::network::topology::Topology;

/// Per-layer, per-node scratch space for the outputs of the most recent
/// forward pass. Contents are meaningless before the first pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivationBuffer {
    layers: Vec<Vec<f64>>,
}

impl ActivationBuffer {
    pub fn for_topology(topology: &Topology) -> Result<ActivationBuffer> {
        let mut layers = try_with_capacity(topology.layer_count(), || "activation layers".into())?;
        for (l, &size) in topology.layer_sizes().iter().enumerate() {
            let mut nodes = try_with_capacity(size, || format!("activations of layer {l}"))?;
            nodes.resize(size, 0.0);
            layers.push(nodes);
        }
        Ok(ActivationBuffer { layers })
    }

    /// Whether this buffer has one slot per node of `topology`.
    pub fn fits(&self, topology: &Topology) -> bool {
        self.layers.len() == topology.layer_count()
            && self.layers.iter().zip(topology.layer_sizes()).all(|(l, &n)| l.len() == n)
    }

    pub fn layer(&self, layer: usize) -> &[f64] {
        &self.layers[layer]
    }

    pub fn output(&self) -> &[f64] {
        &self.layers[self.layers.len() - 1]
    }

    /// Splits the buffer at `layer`, returning the finished layers below it
    /// and the layer being written.
    pub(crate) fn split_at_layer(&mut self, layer: usize) -> (&[Vec<f64>], &mut Vec<f64>) {
        let (done, rest) = self.layers.split_at_mut(layer);
        (done, &mut rest[0])
    }
}
