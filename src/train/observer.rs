use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use crate::error::{NetError, Result};
use crate::network::WeightStore;
use crate::train::epoch_stats::EpochStats;

/// Hooks the training loop calls at fixed points, so that reporting stays
/// out of the algorithm itself. Both hooks default to doing nothing; an
/// error from either aborts training.
pub trait TrainingObserver {
    /// Called after a corrective update, with the weights it produced.
    fn after_correction(&mut self, _epoch: usize, _example: usize, _weights: &WeightStore) -> Result<()> {
        Ok(())
    }

    /// Called once an epoch has been fully processed.
    fn after_epoch(&mut self, _stats: &EpochStats) -> Result<()> {
        Ok(())
    }
}

impl TrainingObserver for () {}

impl<T: TrainingObserver + ?Sized> TrainingObserver for &mut T {
    fn after_correction(&mut self, epoch: usize, example: usize, weights: &WeightStore) -> Result<()> {
        (**self).after_correction(epoch, example, weights)
    }

    fn after_epoch(&mut self, stats: &EpochStats) -> Result<()> {
        (**self).after_epoch(stats)
    }
}

impl<A: TrainingObserver, B: TrainingObserver> TrainingObserver for (A, B) {
    fn after_correction(&mut self, epoch: usize, example: usize, weights: &WeightStore) -> Result<()> {
        self.0.after_correction(epoch, example, weights)?;
        self.1.after_correction(epoch, example, weights)
    }

    fn after_epoch(&mut self, stats: &EpochStats) -> Result<()> {
        self.0.after_epoch(stats)?;
        self.1.after_epoch(stats)
    }
}

impl<T: TrainingObserver> TrainingObserver for Option<T> {
    fn after_correction(&mut self, epoch: usize, example: usize, weights: &WeightStore) -> Result<()> {
        match self {
            Some(inner) => inner.after_correction(epoch, example, weights),
            None => Ok(()),
        }
    }

    fn after_epoch(&mut self, stats: &EpochStats) -> Result<()> {
        match self {
            Some(inner) => inner.after_epoch(stats),
            None => Ok(()),
        }
    }
}

/// Publishes each epoch's stats on a channel. A dropped receiver only
/// stops the publishing; training carries on.
impl TrainingObserver for mpsc::Sender<EpochStats> {
    fn after_epoch(&mut self, stats: &EpochStats) -> Result<()> {
        if self.send(stats.clone()).is_err() {
            log::debug!("epoch stats receiver dropped");
        }
        Ok(())
    }
}

/// Appends a full weight dump after every correction.
pub struct WeightDump<W: Write> {
    out: W,
    target: PathBuf,
}

impl WeightDump<BufWriter<File>> {
    /// Creates (truncating) the dump file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| NetError::file(path, e))?;
        Ok(WeightDump::new(BufWriter::new(file), path))
    }
}

impl<W: Write> WeightDump<W> {
    /// Wraps any writer; `target` names it in error messages.
    pub fn new(out: W, target: impl Into<PathBuf>) -> Self {
        WeightDump { out, target: target.into() }
    }

    /// Flushes and returns the writer.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush().map_err(|e| NetError::file(&self.target, e))?;
        Ok(self.out)
    }
}

impl<W: Write> TrainingObserver for WeightDump<W> {
    fn after_correction(&mut self, _epoch: usize, _example: usize, weights: &WeightStore) -> Result<()> {
        weights.write_dump(&mut self.out).map_err(|e| NetError::file(&self.target, e))
    }
}

/// Logs one accuracy line per epoch at `info`.
#[derive(Debug, Default)]
pub struct EpochLogger;

impl TrainingObserver for EpochLogger {
    fn after_epoch(&mut self, stats: &EpochStats) -> Result<()> {
        log::info!(
            "Epoch {:3} accuracy: {:4} / {} = {:.2}%",
            stats.epoch,
            stats.correct,
            stats.total,
            100.0 * stats.accuracy()
        );
        Ok(())
    }
}
