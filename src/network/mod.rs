pub mod activations;
pub mod forward;
pub mod network;
pub mod topology;
pub mod weights;

pub use activations::ActivationBuffer;
pub use network::{Network, DEFAULT_SEED};
pub use topology::Topology;
pub use weights::WeightStore;
