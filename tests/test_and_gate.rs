use symnet::{evaluate, train_loop, LabeledExample, Network, Sgd, Topology, TrainConfig, TrainingOutcome, DEFAULT_SEED};

const LOW: u8 = 0x00;
const HIGH: u8 = 0xFF;

/// Logical AND over the two extreme byte values, answered with '0' / '1'.
fn and_table() -> Vec<LabeledExample> {
    vec![
        LabeledExample::new([LOW, LOW], *b"0"),
        LabeledExample::new([LOW, HIGH], *b"0"),
        LabeledExample::new([HIGH, LOW], *b"0"),
        LabeledExample::new([HIGH, HIGH], *b"1"),
    ]
}

#[test]
fn single_layer_learns_and_well_before_the_epoch_limit() {
    let data = and_table();
    for seed in [DEFAULT_SEED, 1, 2, 3] {
        let topology = Topology::new(2, vec![1]).unwrap();
        let mut net = Network::new(topology, &data, seed).unwrap();

        let report = train_loop(&mut net, &data, &Sgd::new(0.5), &TrainConfig::new(5000, 2, 100), &mut ()).unwrap();

        assert_eq!(report.outcome, TrainingOutcome::Converged, "seed {seed}");
        assert!(report.epochs < 1000, "seed {seed}: {} epochs", report.epochs);
        assert_eq!(*report.accuracy_history.last().unwrap(), data.len());

        let trial = evaluate(&mut net, &data).unwrap();
        assert_eq!(trial.ratio(), 1.0, "seed {seed}");
    }
}

#[test]
fn convergence_is_never_declared_inside_the_first_window() {
    let data = and_table();
    let mut net = Network::new(Topology::new(2, vec![1]).unwrap(), &data, DEFAULT_SEED).unwrap();
    let report = train_loop(&mut net, &data, &Sgd::new(0.5), &TrainConfig::new(5000, 2, 100), &mut ()).unwrap();
    assert!(report.epochs >= 100);
    assert_eq!(report.accuracy_history.len(), report.epochs);
}

#[test]
fn training_is_reproducible_for_a_fixed_seed() {
    let data = and_table();
    let train = || {
        let mut net = Network::new(Topology::new(2, vec![3, 1]).unwrap(), &data, 1234).unwrap();
        let report = train_loop(&mut net, &data, &Sgd::new(0.5), &TrainConfig::new(300, 2, 20), &mut ()).unwrap();
        (net.weights().clone(), report.accuracy_history)
    };
    assert_eq!(train(), train());
}
