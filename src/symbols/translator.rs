use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::symbols::{LabeledExample, Symbol};

/// Bijection between the symbols observed at one output position and
/// equal-width buckets of the sigmoid range.
///
/// With `count` distinct symbols, the symbol at ordinal `t` owns the bucket
/// `[t / count, (t + 1) / count)` and is encoded as the bucket centre.
/// Entries are kept in ascending byte order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTranslator {
    entries: Vec<Symbol>,
}

impl SymbolTranslator {
    /// Collects the distinct symbols found at `output_dim` across `examples`.
    pub fn build(output_dim: usize, examples: &[LabeledExample]) -> Result<SymbolTranslator> {
        if examples.is_empty() {
            return Err(NetError::invalid("cannot build a translator from an empty training set"));
        }

        let mut seen = [false; 256];
        for (i, ex) in examples.iter().enumerate() {
            let symbol = ex.output.get(output_dim).ok_or_else(|| {
                NetError::invalid(format!(
                    "example {i} has {} output symbols, output {output_dim} requested",
                    ex.output.len()
                ))
            })?;
            seen[*symbol as usize] = true;
        }

        let entries = (0..=u8::MAX).filter(|&b| seen[b as usize]).collect();
        Ok(SymbolTranslator { entries })
    }

    /// One translator per output position, in output order.
    pub fn build_all(output_len: usize, examples: &[LabeledExample]) -> Result<Vec<SymbolTranslator>> {
        (0..output_len).map(|dim| SymbolTranslator::build(dim, examples)).collect()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Symbol] {
        &self.entries
    }

    /// Target activation for `symbol`. `output` only labels the error.
    pub fn encode(&self, symbol: Symbol, output: usize) -> Result<f64> {
        let t = self
            .entries
            .iter()
            .position(|&e| e == symbol)
            .ok_or(NetError::UnknownSymbol { output, symbol })?;
        Ok((t as f64 + 0.5) / self.count() as f64)
    }

    /// Symbol whose bucket contains `activation`. Total: out-of-range and
    /// non-finite values clamp to the first or last entry.
    pub fn decode(&self, activation: f64) -> Symbol {
        let last = self.count() - 1;
        let scaled = (activation * self.count() as f64).floor();
        // `as usize` saturates negatives and NaN to 0
        let idx = (scaled as usize).min(last);
        self.entries[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn examples(outputs: &[&[u8]]) -> Vec<LabeledExample> {
        outputs.iter().map(|o| LabeledExample::new(vec![b'a'], o.to_vec())).collect()
    }

    #[test]
    fn build_collects_distinct_symbols_in_byte_order() {
        let ex = examples(&[b"zb", b"ab", b"zc", b"mb"]);
        let first = SymbolTranslator::build(0, &ex).unwrap();
        let second = SymbolTranslator::build(1, &ex).unwrap();
        assert_eq!(first.entries(), b"amz");
        assert_eq!(second.entries(), b"bc");
    }

    #[test]
    fn encode_returns_bucket_centres() {
        let tr = SymbolTranslator::build(0, &examples(&[b"x", b"y", b"z", b"w"])).unwrap();
        assert_abs_diff_eq!(tr.encode(b'w', 0).unwrap(), 0.125);
        assert_abs_diff_eq!(tr.encode(b'x', 0).unwrap(), 0.375);
        assert_abs_diff_eq!(tr.encode(b'z', 0).unwrap(), 0.875);
    }

    #[test]
    fn round_trip_for_every_observed_symbol() {
        let ex = examples(&[b"0", b"7", b"A", b"!", b"~", b"7"]);
        let tr = SymbolTranslator::build(0, &ex).unwrap();
        for &s in tr.entries() {
            assert_eq!(tr.decode(tr.encode(s, 0).unwrap()), s);
        }
    }

    #[test]
    fn decode_clamps_out_of_range_activations() {
        let tr = SymbolTranslator::build(0, &examples(&[b"a", b"b", b"c"])).unwrap();
        assert_eq!(tr.decode(-0.5), b'a');
        assert_eq!(tr.decode(1.0), b'c');
        assert_eq!(tr.decode(7.0), b'c');
        assert_eq!(tr.decode(f64::NAN), b'a');
        assert_eq!(tr.decode(0.34), b'b');
    }

    #[test]
    fn unknown_symbol_is_reported_with_its_output() {
        let tr = SymbolTranslator::build(0, &examples(&[b"a"])).unwrap();
        match tr.encode(b'q', 3) {
            Err(NetError::UnknownSymbol { output, symbol }) => {
                assert_eq!(output, 3);
                assert_eq!(symbol, b'q');
            }
            other => panic!("expected UnknownSymbol, got {other:?}"),
        }
    }

    #[test]
    fn build_rejects_empty_sets_and_missing_dimensions() {
        assert!(matches!(SymbolTranslator::build(0, &[]), Err(NetError::InvalidParameter(_))));
        let ex = examples(&[b"a"]);
        assert!(matches!(SymbolTranslator::build(1, &ex), Err(NetError::InvalidParameter(_))));
    }
}
