use symnet::train::EpochLogger;
use symnet::{evaluate, train_loop, LabeledExample, Network, Sgd, Topology, TrainConfig};

fn main() -> symnet::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let examples = vec![
        LabeledExample::new([0x00u8, 0x00], *b"F"),
        LabeledExample::new([0x00u8, 0xFF], *b"F"),
        LabeledExample::new([0xFFu8, 0x00], *b"F"),
        LabeledExample::new([0xFFu8, 0xFF], *b"T"),
    ];

    let mut network = Network::new(Topology::new(2, vec![1])?, &examples, symnet::DEFAULT_SEED)?;
    let report = train_loop(
        &mut network,
        &examples,
        &Sgd::new(0.5),
        &TrainConfig::new(5000, 2, 100),
        &mut EpochLogger,
    )?;
    println!("{:?} after {} epochs", report.outcome, report.epochs);

    for ex in &examples {
        let out = network.forward(&ex.input)?;
        println!(
            "Input: {:02X?} -> Output: {} ({:.4})",
            ex.input,
            out[0] as char,
            network.activations().output()[0]
        );
    }
    println!("Accuracy: {}", evaluate(&mut network, &examples)?);
    Ok(())
}
