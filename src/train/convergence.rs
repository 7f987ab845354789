/// Ring buffer of the last `range` epochs' correct counts.
///
/// After `n` epochs, the newest count sits in slot `(n - 1) % range` and the
/// slot `n % range` still holds the count from `range` epochs back, which the
/// next epoch will overwrite. A plateau is declared when the two agree to
/// within the requested precision.
#[derive(Debug, Clone)]
pub struct AccuracyWindow {
    slots: Vec<Option<usize>>,
    recorded: usize,
}

impl AccuracyWindow {
    pub fn new(range: usize) -> AccuracyWindow {
        AccuracyWindow { slots: vec![None; range], recorded: 0 }
    }

    pub fn record(&mut self, correct: usize) {
        let range = self.slots.len();
        self.slots[self.recorded % range] = Some(correct);
        self.recorded += 1;
    }

    pub fn epochs_recorded(&self) -> usize {
        self.recorded
    }

    /// `trunc(100 · precision · (older - newest) / training_count) == 0`,
    /// in integer arithmetic.
    ///
    /// Until the window has filled once there is no older count to compare
    /// with, and the answer is always `false`.
    pub fn has_plateaued(&self, training_count: usize, precision: i64) -> bool {
        let range = self.slots.len();
        let n = self.recorded;
        if n == 0 || training_count == 0 {
            return false;
        }
        let (Some(newest), Some(older)) = (self.slots[(n - 1) % range], self.slots[n % range]) else {
            return false;
        };
        let diff = older as i128 - newest as i128;
        100 * precision as i128 * diff / training_count as i128 == 0
    }
}
