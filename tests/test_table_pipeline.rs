use std::fs;
use std::path::PathBuf;

use symnet::data::{partition, read_table};
use symnet::train::WeightDump;
use symnet::{evaluate, train_loop, NetError, Network, Sgd, Topology, TrainConfig};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("symnet-{}-{name}", std::process::id()))
}

/// Two outputs (case, parity) for every letter, one input column.
fn letters_table() -> Vec<u8> {
    let mut text = b"case,parity,letter\n".to_vec();
    for (i, c) in (b'a'..=b'z').enumerate() {
        let case = if c < b'n' { b'l' } else { b'h' };
        let parity = if i % 2 == 0 { b'e' } else { b'o' };
        text.extend_from_slice(&[case, b',', parity, b',', c, b'\n']);
    }
    text
}

#[test]
fn table_to_trial_end_to_end() {
    let table_path = temp_path("letters.csv");
    let dump_path = temp_path("letters.dump");
    fs::write(&table_path, letters_table()).unwrap();

    let table = read_table(&table_path, 2).unwrap();
    assert_eq!(table.input_len, 1);
    assert_eq!(table.examples.len(), 26);

    let (training, trial) = partition(&table.examples, 0.8).unwrap();
    assert_eq!(training.len(), 20);
    assert_eq!(trial.len(), 6);

    let topology = Topology::new(table.input_len, vec![4, 2]).unwrap();
    let mut net = Network::new(topology, training, 17).unwrap();
    let mut dump = Some(WeightDump::create(&dump_path).unwrap());

    let config = TrainConfig::new(40, 2, 8);
    let report = train_loop(&mut net, training, &Sgd::new(0.3), &config, &mut dump).unwrap();
    dump.take().unwrap().finish().unwrap();

    assert!(report.epochs <= 40);
    assert_eq!(report.accuracy_history.len(), report.epochs);
    assert!(report.accuracy_history.iter().all(|&c| c <= training.len()));

    let trial_report = evaluate(&mut net, trial).unwrap();
    assert_eq!(trial_report.total, 6);
    assert!(trial_report.ratio() >= 0.0 && trial_report.ratio() <= 1.0);

    let misses: usize = report.accuracy_history.iter().map(|c| training.len() - c).sum();
    let dumped = fs::read_to_string(&dump_path).unwrap();
    assert_eq!(dumped.matches("LAYER 0").count(), misses);
    assert_eq!(dumped.matches("LAYER 1").count(), misses);

    fs::remove_file(&table_path).ok();
    fs::remove_file(&dump_path).ok();
}

#[test]
fn trial_symbols_missing_from_training_never_match() {
    let rows = read_table(
        temp_file("unseen.csv", b"out,in\nx,a\nx,b\nx,c\ny,d\n"),
        1,
    )
    .unwrap()
    .examples;
    let (training, trial) = partition(&rows, 0.75).unwrap();
    let mut net = Network::new(Topology::new(1, vec![1]).unwrap(), training, 0).unwrap();

    assert_eq!(net.translators()[0].entries(), b"x");
    let report = evaluate(&mut net, trial).unwrap();
    assert_eq!(report.correct, 0);
}

#[test]
fn training_on_a_row_with_an_unseen_output_fails_with_unknown_symbol() {
    let rows = read_table(temp_file("bad.csv", b"out,in\nx,a\nx,b\ny,c\n"), 1).unwrap().examples;
    let mut net = Network::new(Topology::new(1, vec![1]).unwrap(), &rows[..2], 0).unwrap();
    let before = net.weights().clone();

    let err = train_loop(&mut net, &rows, &Sgd::new(0.1), &TrainConfig::default(), &mut ()).unwrap_err();

    assert!(matches!(err, NetError::UnknownSymbol { output: 0, symbol: b'y' }));
    assert_eq!(net.weights(), &before);
}

fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let path = temp_path(name);
    fs::write(&path, contents).unwrap();
    path
}
