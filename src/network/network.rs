use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::network::activations::ActivationBuffer;
use crate::network::forward::propagate;
use crate::network::topology::Topology;
use crate::network::weights::WeightStore;
use crate::symbols::{LabeledExample, Symbol, SymbolTranslator};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 0x5EED;

/// A fully connected sigmoid network together with the translators that
/// turn its output activations into symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    topology: Topology,
    weights: WeightStore,
    translators: Vec<SymbolTranslator>,
    #[serde(skip)]
    activations: ActivationBuffer,
}

impl Network {
    /// Builds a network for `topology`, deriving one translator per output
    /// node from `training` and drawing initial weights from `seed`.
    pub fn new(topology: Topology, training: &[LabeledExample], seed: u64) -> Result<Network> {
        check_examples(&topology, training)?;
        let translators = SymbolTranslator::build_all(topology.output_len(), training)?;
        let weights = WeightStore::random(&topology, seed)?;
        Network::from_parts(topology, weights, translators)
    }

    /// Assembles a network from existing pieces, checking that they agree.
    pub fn from_parts(
        topology: Topology,
        weights: WeightStore,
        translators: Vec<SymbolTranslator>,
    ) -> Result<Network> {
        topology.validate()?;
        weights.check_shape(&topology)?;
        if translators.len() != topology.output_len() {
            return Err(NetError::invalid(format!(
                "{} translators supplied for {} output nodes",
                translators.len(),
                topology.output_len()
            )));
        }
        if let Some(i) = translators.iter().position(|t| t.count() == 0) {
            return Err(NetError::invalid(format!("translator {i} has no entries")));
        }
        let activations = ActivationBuffer::for_topology(&topology)?;
        Ok(Network { topology, weights, translators, activations })
    }

    /// Runs `input` forward, overwriting the network's activation buffer,
    /// and returns the decoded output symbols.
    pub fn forward(&mut self, input: &[Symbol]) -> Result<Vec<Symbol>> {
        propagate(&self.topology, &self.weights, &self.translators, &mut self.activations, input)
    }

    /// Same as [`Network::forward`] but writes into a caller-owned buffer,
    /// so the network itself is only borrowed.
    pub fn forward_into(&self, scratch: &mut ActivationBuffer, input: &[Symbol]) -> Result<Vec<Symbol>> {
        propagate(&self.topology, &self.weights, &self.translators, scratch, input)
    }

    /// A fresh scratch buffer shaped for this network.
    pub fn scratch(&self) -> Result<ActivationBuffer> {
        ActivationBuffer::for_topology(&self.topology)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn weights(&self) -> &WeightStore {
        &self.weights
    }

    pub fn translators(&self) -> &[SymbolTranslator] {
        &self.translators
    }

    /// Outputs of the most recent forward pass.
    pub fn activations(&self) -> &ActivationBuffer {
        &self.activations
    }

    pub(crate) fn weights_and_activations_mut(&mut self) -> (&mut WeightStore, &ActivationBuffer) {
        (&mut self.weights, &self.activations)
    }

    /// Serializes topology, weights and translators to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| NetError::file(path, e))?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Loads a network written by `save_json`, re-validating its shape.
    pub fn load_json(path: &str) -> Result<Network> {
        let file = std::fs::File::open(path).map_err(|e| NetError::file(path, e))?;
        let reader = std::io::BufReader::new(file);
        let raw: Network = serde_json::from_reader(reader)?;
        Network::from_parts(raw.topology, raw.weights, raw.translators)
    }
}

fn check_examples(topology: &Topology, examples: &[LabeledExample]) -> Result<()> {
    for (i, ex) in examples.iter().enumerate() {
        if ex.input.len() != topology.input_len() || ex.output.len() != topology.output_len() {
            return Err(NetError::invalid(format!(
                "example {i} has shape {}→{}, topology expects {}→{}",
                ex.input.len(),
                ex.output.len(),
                topology.input_len(),
                topology.output_len()
            )));
        }
    }
    Ok(())
}
