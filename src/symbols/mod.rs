pub mod example;
pub mod translator;

pub use example::LabeledExample;
pub use translator::SymbolTranslator;

/// The atomic unit of every input and output vector: one raw byte.
pub type Symbol = u8;

/// Fixed input-side encoding, `byte / 256`. Never learned, never rebuilt.
pub fn encode_input(symbol: Symbol) -> f64 {
    symbol as f64 / 256.0
}
