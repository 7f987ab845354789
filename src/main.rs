use std::io::Write;
use std::process::ExitCode;

use symnet::cli::{parse_args, Command, RunArgs, USAGE};
use symnet::data::{partition, read_table};
use symnet::train::{evaluate, train_loop, EpochLogger, WeightDump};
use symnet::{NetError, Network, Result, SymbolTranslator};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &RunArgs) -> Result<()> {
    log::info!(
        "table: {}  learning rate: {}  training partition: {}",
        args.table.display(),
        args.learning_rate,
        args.training_ratio
    );
    log::info!(
        "max epochs: {}  convergence precision: {}  convergence range: {}  seed: {}",
        args.max_epochs,
        args.precision_digits,
        args.convergence_range,
        args.seed
    );

    let table = read_table(&args.table, args.output_len)?;
    let (training, trial) = partition(&table.examples, args.training_ratio)?;
    log::info!("{} training rows, {} trial rows", training.len(), trial.len());

    let topology = args.topology(table.input_len)?;
    if topology.output_len() != args.output_len {
        return Err(NetError::InvalidParameter(format!(
            "output layer has {} nodes, output length is {}",
            topology.output_len(),
            args.output_len
        )));
    }
    log::info!("building network: {topology}");

    let mut network = Network::new(topology, training, args.seed)?;
    for (i, tr) in network.translators().iter().enumerate() {
        log::debug!("output {i} symbols: {:?}", String::from_utf8_lossy(tr.entries()));
    }

    if args.print_weights {
        print_weights("Pre training weights:", &network)?;
    }

    let mut dump = match &args.dump_file {
        Some(path) => Some(WeightDump::create(path)?),
        None => None,
    };

    log::info!("training...");
    let report = train_loop(
        &mut network,
        training,
        &args.optimizer(),
        &args.train_config(),
        &mut (&mut dump, EpochLogger),
    )?;
    if let Some(dump) = dump {
        dump.finish()?;
    }
    log::info!("stopped after {} epochs: {:?}", report.epochs, report.outcome);

    if args.print_weights {
        print_weights("Post training weights:", &network)?;
    }

    log::info!("testing...");
    let trial_report = evaluate(&mut network, trial)?;
    println!("Trial accuracy: {trial_report}");
    println!("Time spent training: {:.2}s", report.elapsed.as_secs_f64());

    if let Some(path) = &args.save_model {
        let path = path.to_string_lossy();
        network.save_json(&path)?;
        log::info!("saved network to {path}");
    }

    Ok(())
}

fn print_weights(title: &str, network: &Network) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "\n{title}")
        .and_then(|_| network.weights().write_dump(&mut out))
        .map_err(|e| NetError::FileAccessFailure { path: "<stdout>".into(), source: e })
}
