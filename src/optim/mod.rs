pub mod deltas;
pub mod sgd;

pub use deltas::Deltas;
pub use sgd::Sgd;
