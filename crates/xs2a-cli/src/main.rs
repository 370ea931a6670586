//! # xs2a CLI entry point
//!
//! Parses command-line arguments, sets up logging from the verbosity flag
//! and dispatches to the subcommand handlers in `xs2a_cli`.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use xs2a_cli::access::{run_access, AccessArgs};
use xs2a_cli::profile::{run_profile, ProfileArgs};
use xs2a_cli::transition::{run_transition, TransitionArgs};

/// Operator tooling for the XS2A SCA authorisation engine.
#[derive(Parser, Debug)]
#[command(name = "xs2a", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check an ASPSP profile file and print the effective settings.
    Profile(ProfileArgs),

    /// Query the SCA status state machine.
    Transition(TransitionArgs),

    /// Evaluate the update endpoint accessibility decision.
    Access(AccessArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "xs2a CLI starting");

    let result = match cli.command {
        Commands::Profile(args) => run_profile(&args),
        Commands::Transition(args) => run_transition(&args),
        Commands::Access(args) => run_access(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
