use crate::activation::sigmoid;
use crate::error::{NetError, Result};
use crate::network::activations::ActivationBuffer;
use crate::network::topology::Topology;
use crate::network::weights::WeightStore;
use crate::symbols::{encode_input, Symbol, SymbolTranslator};

/// One forward pass of `input` through the network described by `topology`
/// and `weights`, writing every node's output into `scratch` and returning
/// the decoded output symbols.
///
/// Layer 0 reads the encoded input symbols; every later layer reads the
/// activations just written for the layer below it.
pub fn propagate(
    topology: &Topology,
    weights: &WeightStore,
    translators: &[SymbolTranslator],
    scratch: &mut ActivationBuffer,
    input: &[Symbol],
) -> Result<Vec<Symbol>> {
    if input.len() != topology.input_len() {
        return Err(NetError::invalid(format!(
            "input vector has {} symbols, network expects {}",
            input.len(),
            topology.input_len()
        )));
    }
    if !scratch.fits(topology) {
        return Err(NetError::invalid("activation buffer does not match the network topology"));
    }
    let encoded: Vec<f64> = input.iter().map(|&s| encode_input(s)).collect();

    for l in 0..topology.layer_count() {
        let (below, current) = scratch.split_at_layer(l);
        let sources: &[f64] = if l == 0 { &encoded } else { &below[l - 1] };

        for (out, node) in current.iter_mut().zip(weights.layer(l)) {
            let (bias, edges) = (node[0], &node[1..]);
            let sum: f64 = bias + edges.iter().zip(sources).map(|(w, x)| w * x).sum::<f64>();
            *out = sigmoid(sum);
        }
    }

    Ok(scratch
        .output()
        .iter()
        .zip(translators)
        .map(|(&a, tr)| tr.decode(a))
        .collect())
}
