use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{NetError, Result};
use crate::network::{Topology, DEFAULT_SEED};
use crate::optim::Sgd;
use crate::train::TrainConfig;

pub const USAGE: &str = "\
usage: symnet [flags] <table-file>

  -o N        length of the output vector (default 1)
  -l N        number of layers, output layer included (default input length / 7)
  -n N N ..   node count of every layer; requires -l, last must equal -o
  -r F        learning rate, > 0 (default 0.1)
  -e N        maximum number of epochs, > 0 (default 1000)
  -t F        fraction of rows used for training, in (0, 1) (default 0.8)
  -d PATH     dump the weights to PATH after every correction
  -b          print the weights before and after training
  -p N        digits of percent accuracy that must hold steady to converge (default 2)
  -c N        number of epochs compared for convergence, > 1 (default 32)
  -s N        seed for the initial weights (default 24301)
  -w PATH     save the trained network as JSON
  -h          show this help";

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(RunArgs),
    Help,
}

/// Fully validated settings of one training run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    pub table: PathBuf,
    pub output_len: usize,
    pub layer_count: Option<usize>,
    pub node_counts: Option<Vec<usize>>,
    pub learning_rate: f64,
    pub max_epochs: usize,
    pub training_ratio: f64,
    pub dump_file: Option<PathBuf>,
    pub print_weights: bool,
    pub precision_digits: u32,
    pub convergence_range: usize,
    pub seed: u64,
    pub save_model: Option<PathBuf>,
}

impl RunArgs {
    fn with_table(table: PathBuf) -> RunArgs {
        RunArgs {
            table,
            output_len: 1,
            layer_count: None,
            node_counts: None,
            learning_rate: 0.1,
            max_epochs: 1000,
            training_ratio: 0.80,
            dump_file: None,
            print_weights: false,
            precision_digits: 2,
            convergence_range: 32,
            seed: DEFAULT_SEED,
            save_model: None,
        }
    }

    /// Layer layout for a table whose rows carry `input_len` input symbols.
    pub fn topology(&self, input_len: usize) -> Result<Topology> {
        match &self.node_counts {
            Some(counts) => Topology::new(input_len, counts.clone()),
            None => {
                let layers = self.layer_count.unwrap_or((input_len / 7).max(1));
                Topology::interpolated(input_len, self.output_len, layers)
            }
        }
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig::new(self.max_epochs, self.precision_digits, self.convergence_range)
    }

    pub fn optimizer(&self) -> Sgd {
        Sgd::new(self.learning_rate)
    }
}

/// Parses the arguments that follow the program name.
pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut table = None;
    let mut run = RunArgs::with_table(PathBuf::new());
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];
        i += 1;

        let Some(flag) = flag_char(arg) else {
            if table.is_some() {
                return Err(NetError::invalid(format!("unexpected argument \"{arg}\"")));
            }
            table = Some(PathBuf::from(arg));
            continue;
        };

        match flag {
            'h' => return Ok(Command::Help),
            'b' => run.print_weights = true,
            'n' => {
                let mut counts = Vec::new();
                while let Some(n) = args.get(i).and_then(|a| a.parse::<i64>().ok()) {
                    if n < 1 {
                        return Err(NetError::invalid("-n: no layer may contain less than 1 node"));
                    }
                    counts.push(n as usize);
                    i += 1;
                }
                if counts.is_empty() {
                    return Err(NetError::invalid("-n expects at least one node count"));
                }
                run.node_counts = Some(counts);
            }
            _ => {
                let value = args
                    .get(i)
                    .ok_or_else(|| NetError::invalid(format!("-{flag} expects a value")))?;
                i += 1;
                apply_valued_flag(&mut run, flag, value)?;
            }
        }
    }

    run.table = table.ok_or_else(|| NetError::invalid(format!("missing table file\n{USAGE}")))?;
    check_layers(&run)?;
    Ok(Command::Run(run))
}

fn apply_valued_flag(run: &mut RunArgs, flag: char, value: &str) -> Result<()> {
    match flag {
        'o' => {
            run.output_len = positive(flag, value, "length of final output vector")?;
        }
        'l' => {
            run.layer_count = Some(positive(flag, value, "number of layers")?);
        }
        'r' => {
            let rate: f64 = number(flag, value)?;
            if !(rate > 0.0 && rate.is_finite()) {
                return Err(NetError::invalid("-r: learningRate must be greater than 0"));
            }
            run.learning_rate = rate;
        }
        'e' => {
            run.max_epochs = positive(flag, value, "maxEpoch")?;
        }
        't' => {
            let ratio: f64 = number(flag, value)?;
            if !(ratio > 0.0 && ratio < 1.0) {
                return Err(NetError::invalid(
                    "-t: trainingPartitionRatio must be between 0 and 1 (exclusive)",
                ));
            }
            run.training_ratio = ratio;
        }
        'd' => run.dump_file = Some(PathBuf::from(value)),
        'w' => run.save_model = Some(PathBuf::from(value)),
        'p' => {
            let digits: i64 = number(flag, value)?;
            if digits < 0 {
                return Err(NetError::invalid("-p: convergence precision must be at least 0"));
            }
            run.precision_digits = u32::try_from(digits)
                .map_err(|_| NetError::invalid("-p: convergence precision is too large"))?;
        }
        'c' => {
            let range: usize = number(flag, value)?;
            if range < 2 {
                return Err(NetError::invalid("-c: convergence range must be greater than 1"));
            }
            run.convergence_range = range;
        }
        's' => run.seed = number(flag, value)?,
        other => return Err(NetError::invalid(format!("unknown flag -{other}\n{USAGE}"))),
    }
    Ok(())
}

fn check_layers(run: &RunArgs) -> Result<()> {
    let Some(counts) = &run.node_counts else {
        return Ok(());
    };
    let Some(layers) = run.layer_count else {
        return Err(NetError::invalid(
            "flag -n should not be used without specifying layerCount via flag -l",
        ));
    };
    if counts.len() != layers {
        return Err(NetError::invalid(format!(
            "number of nodeCounts ({}) must match number of layers ({layers})",
            counts.len()
        )));
    }
    if counts[counts.len() - 1] != run.output_len {
        return Err(NetError::invalid(
            "number of nodes in output layer (final layer) must match outputLen",
        ));
    }
    Ok(())
}

fn flag_char(arg: &str) -> Option<char> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some('-'), Some(c)) if !c.is_ascii_digit() => Some(c),
        _ => None,
    }
}

fn number<T: FromStr>(flag: char, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| NetError::invalid(format!("-{flag}: \"{value}\" is not a valid number")))
}

fn positive(flag: char, value: &str, what: &str) -> Result<usize> {
    let n: i64 = number(flag, value)?;
    if n < 1 {
        return Err(NetError::invalid(format!("-{flag}: {what} must be greater than 0")));
    }
    Ok(n as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> RunArgs {
        match parse_args(args.iter().copied()).unwrap() {
            Command::Run(r) => r,
            Command::Help => panic!("unexpected help"),
        }
    }

    fn rejects(args: &[&str], needle: &str) {
        let err = parse_args(args.iter().copied()).unwrap_err();
        assert!(matches!(err, NetError::InvalidParameter(_)));
        assert!(err.to_string().contains(needle), "{err}");
    }

    #[test]
    fn defaults_apply_when_only_the_table_is_given() {
        let r = run(&["data.csv"]);
        assert_eq!(r.table, PathBuf::from("data.csv"));
        assert_eq!(r.output_len, 1);
        assert_eq!(r.learning_rate, 0.1);
        assert_eq!(r.max_epochs, 1000);
        assert_eq!(r.training_ratio, 0.8);
        assert_eq!(r.precision_digits, 2);
        assert_eq!(r.convergence_range, 32);
        assert_eq!(r.seed, DEFAULT_SEED);
        assert!(!r.print_weights);
        assert_eq!(r.train_config(), TrainConfig::default());
    }

    #[test]
    fn flags_may_surround_the_table() {
        let r = run(&["-o", "2", "-r", "0.5", "in.csv", "-e", "50", "-b", "-d", "dump.txt", "-s", "7"]);
        assert_eq!(r.table, PathBuf::from("in.csv"));
        assert_eq!(r.output_len, 2);
        assert_eq!(r.learning_rate, 0.5);
        assert_eq!(r.max_epochs, 50);
        assert!(r.print_weights);
        assert_eq!(r.dump_file, Some(PathBuf::from("dump.txt")));
        assert_eq!(r.seed, 7);
    }

    #[test]
    fn node_counts_consume_only_numbers() {
        let r = run(&["-o", "2", "-l", "3", "-n", "8", "4", "2", "table.csv"]);
        assert_eq!(r.node_counts, Some(vec![8, 4, 2]));
        assert_eq!(r.table, PathBuf::from("table.csv"));
        assert_eq!(r.topology(10).unwrap().layer_sizes(), &[8, 4, 2]);
    }

    #[test]
    fn default_layout_is_interpolated_from_the_input_width() {
        let r = run(&["t.csv", "-o", "2"]);
        assert_eq!(r.topology(21).unwrap().layer_sizes(), &[21, 11, 2]);
        assert_eq!(r.topology(3).unwrap().layer_sizes(), &[2]);
    }

    #[test]
    fn node_counts_must_agree_with_layers_and_output() {
        rejects(&["-n", "3", "1", "t.csv"], "-l");
        rejects(&["-l", "3", "-n", "3", "1", "t.csv"], "must match number of layers");
        rejects(&["-l", "2", "-n", "3", "2", "t.csv"], "outputLen");
        rejects(&["-l", "2", "-n", "3", "0", "t.csv"], "less than 1 node");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        rejects(&["-r", "0", "t.csv"], "learningRate");
        rejects(&["-e", "0", "t.csv"], "maxEpoch");
        rejects(&["-t", "1", "t.csv"], "between 0 and 1");
        rejects(&["-c", "1", "t.csv"], "greater than 1");
        rejects(&["-p", "-1", "t.csv"], "at least 0");
        rejects(&["-o", "x", "t.csv"], "not a valid number");
        rejects(&["-q", "1", "t.csv"], "unknown flag");
        rejects(&["t.csv", "-e"], "expects a value");
    }

    #[test]
    fn table_is_required_and_unique() {
        rejects(&["-o", "1"], "missing table");
        rejects(&["a.csv", "b.csv"], "unexpected argument");
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse_args(["-h", "-r", "nope"]).unwrap(), Command::Help);
    }
}
