// collabwrite CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod exit_code;
mod output;

use exit_code::ExitCode;

/// Log filter env var; falls back to `warn` so command output stays clean.
const LOG_ENV: &str = "COLLABWRITE_LOG";

#[derive(Parser)]
#[command(name = "collabwrite", about = "Branching document editor with writing suggestions")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match commands::run(cli.command) {
        Ok(()) => ExitCode::Success.into(),
        Err(error) => ExitCode::from_error(&error).into(),
    }
}
