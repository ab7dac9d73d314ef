//! Interactive front end: builds the network from a JSON spec and/or flags,
//! then reads menu commands from stdin until quit or end of input.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use doubler_nn::network::dump;
use doubler_nn::train::{RoundStats, SampleReport};
use doubler_nn::{BackPropNetwork, Command, NetworkSpec, Session, SessionConfig};

#[derive(Parser)]
#[command(name = "doubler")]
#[command(version)]
#[command(about = "Back-propagation network that learns to double a byte")]
struct Cli {
    /// Network spec file (JSON); defaults to 8-16-8, rate 0.5, margin 0.10
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fixed weight-initialisation seed, overrides the spec file
    #[arg(long)]
    seed: Option<u64>,

    /// Whether testing passes also train on the samples they visit
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    learn_during_tests: bool,

    /// Auto-train stops after this many rounds
    #[arg(long, default_value_t = 10_000_000)]
    round_cap: u64,

    /// Print auto-train rounds as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut spec = match &cli.config {
        Some(path) => {
            let path_str = path.to_str().context("config path is not valid UTF-8")?;
            NetworkSpec::load_json(path_str)
                .with_context(|| format!("failed to load network spec from {}", path.display()))?
        }
        None => NetworkSpec::default(),
    };
    if let Some(seed) = cli.seed {
        spec.seed = Some(seed);
    }

    let network = BackPropNetwork::new(&spec).context("failed to initialise network")?;
    let config = SessionConfig {
        learn_during_tests: cli.learn_during_tests,
        auto_train_round_cap: cli.round_cap,
        ..Default::default()
    };
    let mut session = Session::new(network, config)?;

    let t = spec.topology;
    println!("\nDoubler: I={} J={} K={}", t.inputs, t.hidden, t.outputs);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\n{}", doubler_nn::command::MENU);
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line.context("failed to read command")?;
        println!();

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                warn!("{e}");
                println!("{e}");
                continue;
            }
        };

        if let Err(e) = execute(&mut session, command, cli.json) {
            error!("{e:#}");
            return Err(e);
        }
        if command == Command::Quit {
            break;
        }
    }

    Ok(())
}

fn execute(session: &mut Session, command: Command, json: bool) -> Result<()> {
    match command {
        Command::Quit => {}
        Command::Train(rounds) => {
            for report in session.run_training(rounds)? {
                println!("{}", format_report("Train Run", &report));
            }
            println!(
                "\nTrain accuracy = {:.6}% after {} training round(s).",
                session.training_accuracy(),
                session.rounds()
            );
        }
        Command::Test { errors_only } => {
            let reports = session.run_tests()?;
            for report in reports.iter().filter(|r| !(errors_only && r.is_correct())) {
                println!("{}", format_report("Test Run", report));
            }
            println!(
                "\nTesting accuracy (letter avg) of size {} = {:.6}%.",
                reports.len(),
                session.testing_accuracy()
            );
        }
        Command::AutoTrain => {
            let outcome = session.auto_train(|stats| print_round(stats, json))?;
            println!("{outcome:?}");
        }
        Command::Debug => {
            print!("{}", dump(session.network()));
            println!();
            println!("{}", session.summary());
        }
        Command::Reset => session.reset(),
    }
    Ok(())
}

fn print_round(stats: &RoundStats, json: bool) {
    if json {
        match serde_json::to_string(stats) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!("failed to serialise round stats: {e}"),
        }
    } else {
        println!(
            "Round {:7}, Accuracy: Training={:7.3}%, Testing={:7.3}%, Zero case={:5.3}",
            stats.round, stats.training_accuracy, stats.testing_accuracy, stats.zero_case_accuracy
        );
    }
}

fn format_report(label: &str, r: &SampleReport) -> String {
    let bits: String = r.activations.iter()
        .zip(doubler_nn::encode_byte(r.desired))
        .map(|(o, d)| format!("{o:5.3}:{} ", d as u8))
        .collect();
    format!(
        "{label}: Input={:3}, Desired={:3}, Output={:3} ( {bits}) Error={:3}, Accuracy={:5.3}",
        r.input, r.desired, r.output, r.error(), r.accuracy
    )
}
