use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::{NetError, Result};
use crate::network::Network;
use crate::optim::sgd::Sgd;
use crate::symbols::LabeledExample;
use crate::train::convergence::AccuracyWindow;
use crate::train::epoch_stats::EpochStats;
use crate::train::observer::TrainingObserver;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_epoch;

/// How a run that did not fail came to a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingOutcome {
    /// Accuracy stopped moving across the convergence window.
    Converged,
    /// `max_epochs` epochs ran without converging.
    EpochLimitReached,
}

/// Summary of a finished `train_loop` run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub outcome: TrainingOutcome,
    /// Number of completed epochs.
    pub epochs: usize,
    /// Correct count of every epoch, in order.
    pub accuracy_history: Vec<usize>,
    pub elapsed: Duration,
}

/// Trains `network` on `training` until its accuracy plateaus or the epoch
/// cap is hit.
///
/// Every epoch walks the training set in order (see [`train_epoch`]); the
/// observer then receives the epoch's [`EpochStats`]. The epoch cap is tested
/// before convergence. Any error (an unknown desired symbol, a failed
/// allocation, a failing observer) ends the run immediately and is returned;
/// nothing is retried.
pub fn train_loop<O: TrainingObserver + ?Sized>(
    network: &mut Network,
    training: &[LabeledExample],
    optimizer: &Sgd,
    config: &TrainConfig,
    observer: &mut O,
) -> Result<TrainReport> {
    config.validate()?;
    let precision = config.precision()?;
    if training.is_empty() {
        return Err(NetError::invalid("training set must not be empty"));
    }
    if !(optimizer.learning_rate > 0.0 && optimizer.learning_rate.is_finite()) {
        return Err(NetError::invalid(format!(
            "learningRate must be greater than 0, got {}",
            optimizer.learning_rate
        )));
    }

    let started = Instant::now();
    let mut window = AccuracyWindow::new(config.convergence_range);
    let mut history = Vec::with_capacity(config.max_epochs.min(4096));

    let outcome = loop {
        let epoch = window.epochs_recorded();
        let t_start = Instant::now();

        let correct = train_epoch(network, training, optimizer, epoch, observer).map_err(|e| {
            log::error!("training failed in epoch {epoch}: {e}");
            e
        })?;

        window.record(correct);
        history.push(correct);

        let stats = EpochStats {
            epoch,
            correct,
            total: training.len(),
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        observer.after_epoch(&stats)?;

        if window.epochs_recorded() >= config.max_epochs {
            break TrainingOutcome::EpochLimitReached;
        }
        if window.has_plateaued(training.len(), precision) {
            break TrainingOutcome::Converged;
        }
    };

    let report = TrainReport {
        outcome,
        epochs: window.epochs_recorded(),
        accuracy_history: history,
        elapsed: started.elapsed(),
    };
    log::debug!("training stopped after {} epochs: {:?}", report.epochs, report.outcome);
    Ok(report)
}
