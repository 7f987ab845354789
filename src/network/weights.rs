use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{try_with_capacity, NetError, Result};
use crate::network::topology::Topology;

/// Ragged weight tensor indexed `[layer][node][edge]`.
///
/// Edge 0 of every node is its bias; edge `i > 0` weights the i-th incoming
/// activation, so each node vector has `fan_in + 1` entries. The shape is
/// fixed at construction; updates happen in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightStore {
    layers: Vec<Vec<Vec<f64>>>,
}

impl WeightStore {
    /// Allocates the tensor for `topology` and fills it with samples from
    /// uniform[-1, 1], drawn from a `StdRng` seeded with `seed`.
    pub fn random(topology: &Topology, seed: u64) -> Result<WeightStore> {
        let mut rng = StdRng::seed_from_u64(seed);
        WeightStore::from_fn(topology, |_, _, _| rng.gen_range(-1.0..=1.0))
    }

    /// Allocates the tensor for `topology`, taking each weight from
    /// `init(layer, node, edge)`.
    pub fn from_fn<F>(topology: &Topology, mut init: F) -> Result<WeightStore>
    where
        F: FnMut(usize, usize, usize) -> f64,
    {
        let mut layers = try_with_capacity(topology.layer_count(), || "weight layers".into())?;
        for (l, &size) in topology.layer_sizes().iter().enumerate() {
            let width = topology.fan_in(l) + 1;
            let mut nodes = try_with_capacity(size, || format!("weights of layer {l}"))?;
            for n in 0..size {
                let mut edges = try_with_capacity(width, || format!("weights of layer {l} node {n}"))?;
                edges.extend((0..width).map(|w| init(l, n, w)));
                nodes.push(edges);
            }
            layers.push(nodes);
        }
        Ok(WeightStore { layers })
    }

    /// Verifies that every node vector is `fan_in + 1` long.
    pub fn check_shape(&self, topology: &Topology) -> Result<()> {
        if self.layers.len() != topology.layer_count() {
            return Err(NetError::invalid(format!(
                "weight store has {} layers, topology has {}",
                self.layers.len(),
                topology.layer_count()
            )));
        }
        for (l, nodes) in self.layers.iter().enumerate() {
            if nodes.len() != topology.layer_sizes()[l] {
                return Err(NetError::invalid(format!(
                    "layer {l} has {} weight vectors, expected {}",
                    nodes.len(),
                    topology.layer_sizes()[l]
                )));
            }
            let width = topology.fan_in(l) + 1;
            if let Some(n) = nodes.iter().position(|edges| edges.len() != width) {
                return Err(NetError::invalid(format!(
                    "layer {l} node {n} has {} weights, expected {width}",
                    nodes[n].len()
                )));
            }
        }
        Ok(())
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// All weight vectors of `layer`, one per node.
    pub fn layer(&self, layer: usize) -> &[Vec<f64>] {
        &self.layers[layer]
    }

    pub fn node(&self, layer: usize, node: usize) -> &[f64] {
        &self.layers[layer][node]
    }

    /// Mutable access to one node's weights. The slice cannot be resized.
    pub fn node_mut(&mut self, layer: usize, node: usize) -> &mut [f64] {
        &mut self.layers[layer][node]
    }

    /// Writes the human-readable dump: a `LAYER l` header per layer and one
    /// `NODE n:` line per node listing its weights, bias first.
    pub fn write_dump<W: Write + ?Sized>(&self, out: &mut W) -> std::io::Result<()> {
        for (l, nodes) in self.layers.iter().enumerate() {
            write!(out, "LAYER {l}")?;
            for (n, edges) in nodes.iter().enumerate() {
                write!(out, "\nNODE {n:2}:")?;
                for &w in edges {
                    // positive values get an extra space so columns line up with '-'
                    let pad = if w > 0.0 { " " } else { "" };
                    write!(out, " {pad}{w:.2}")?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
