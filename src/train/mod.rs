pub mod convergence;
pub mod epoch_stats;
pub mod loop_fn;
pub mod observer;
pub mod train_config;
pub mod trainer;
pub mod trial;

pub use convergence::AccuracyWindow;
pub use epoch_stats::EpochStats;
pub use loop_fn::{train_loop, TrainReport, TrainingOutcome};
pub use observer::{EpochLogger, TrainingObserver, WeightDump};
pub use train_config::TrainConfig;
pub use trainer::train_epoch;
pub use trial::{evaluate, TrialReport};
