use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    check::{self, CheckArgs},
    verify::{self, VerifyArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod catalog;
mod commands;
mod render;

#[derive(Parser, Debug)]
#[command(name = "qed", about = "Symbolic proof obligation verifier")]
struct Cli {
    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify the built-in catalog or a YAML catalog and print a report.
    Verify(VerifyArgs),
    /// Verify a single claim given on the command line.
    Check(CheckArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).without_time().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    qed_engine::quiet_attempt_panics();
    match cli.command {
        Command::Verify(args) => verify::run(&args),
        Command::Check(args) => check::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
