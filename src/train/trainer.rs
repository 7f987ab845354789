use crate::error::Result;
use crate::network::Network;
use crate::optim::sgd::Sgd;
use crate::symbols::LabeledExample;
use crate::train::observer::TrainingObserver;

/// Runs one epoch of online training over `examples`, in order, and returns
/// how many of them the network already answered correctly.
///
/// Each miss is corrected immediately, so the next example sees the updated
/// weights. The observer gets the weights after every correction.
pub fn train_epoch<O: TrainingObserver + ?Sized>(
    network: &mut Network,
    examples: &[LabeledExample],
    optimizer: &Sgd,
    epoch: usize,
    observer: &mut O,
) -> Result<usize> {
    let mut correct = 0;

    for (i, example) in examples.iter().enumerate() {
        let produced = network.forward(&example.input)?;

        if example.matches(&produced) {
            correct += 1;
            continue;
        }

        optimizer.correct(network, example)?;
        observer.after_correction(epoch, i, network.weights())?;
    }

    Ok(correct)
}
