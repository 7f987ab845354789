pub mod activation;
pub mod cli;
pub mod data;
pub mod error;
pub mod network;
pub mod optim;
pub mod symbols;
pub mod train;

// Convenience re-exports
pub use error::{NetError, Result};
pub use network::{Network, Topology, WeightStore, DEFAULT_SEED};
pub use optim::{Deltas, Sgd};
pub use symbols::{LabeledExample, Symbol, SymbolTranslator};
pub use train::{evaluate, train_loop, TrainConfig, TrainReport, TrainingObserver, TrainingOutcome, TrialReport};
