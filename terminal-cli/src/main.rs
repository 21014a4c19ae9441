use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::tty::IsTty;
use fairdice_execution::{OsRandom, RoundOutcome, TurnSequencer};
use fairdice_types::{DiceSet, USAGE_EXAMPLE};
use tracing::{info, Level};

mod config;
mod console;

use config::{FileConfig, Overrides, Settings};
use console::StdConsole;

/// CLI flags (override the config file)
#[derive(Parser, Debug)]
#[command(
    name = "fairdice",
    about = "Provably fair non-transitive dice against the computer",
    after_help = format!("Example: {USAGE_EXAMPLE}")
)]
struct Args {
    /// YAML file with `dice`, `log_level` and `color`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tracing level written to stderr (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Print without terminal colors
    #[arg(long)]
    no_color: bool,

    /// Dice as six comma-separated integer faces each
    #[arg(value_name = "DIE", allow_hyphen_values = true)]
    dice: Vec<String>,
}

fn settings(args: Args) -> Result<Settings> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    Settings::resolve(
        Overrides {
            dice: args.dice,
            log_level: args.log_level,
            no_color: args.no_color,
        },
        file,
    )
}

fn init_tracing(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn play<R: BufRead, W: Write>(
    dice: DiceSet,
    console: &mut StdConsole<R, W>,
) -> Result<RoundOutcome> {
    let mut sequencer = TurnSequencer::new(dice, OsRandom);
    let outcome = sequencer.run(console).context("round aborted")?;
    console.finish().context("could not write to the terminal")?;
    match &outcome {
        RoundOutcome::Resolved(throw) => info!(winner = ?throw.winner, "game over"),
        RoundOutcome::Exited => info!("game exited by player"),
    }
    Ok(outcome)
}

/// Print a configuration error followed by the usage example.
fn report_config_error(err: &anyhow::Error, out: &mut impl Write) -> ExitCode {
    let _ = writeln!(out, "Error: {err:#}");
    let _ = writeln!(out, "Example: {USAGE_EXAMPLE}");
    ExitCode::FAILURE
}

/// Exit status for a finished round. Faults are printed to `out`.
fn report_outcome(result: &Result<RoundOutcome>, out: &mut impl Write) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(out, "An error occurred: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    // Parse args
    let args = Args::parse();

    let settings = match settings(args) {
        Ok(settings) => settings,
        Err(err) => return report_config_error(&err, &mut io::stderr()),
    };

    // Setup logging
    init_tracing(settings.level);

    let color = settings.color && io::stdout().is_tty();
    let mut console = StdConsole::stdio(color);
    let result = play(settings.dice, &mut console);
    report_outcome(&result, &mut io::stderr())
}
