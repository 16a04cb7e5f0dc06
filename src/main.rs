use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use phpantom_signatures::report::{self, FileReport};
use phpantom_signatures::{Config, Result};

/// Print the function signatures of PHP files as JSON.
#[derive(Parser, Debug)]
#[command(name = "phpantom-signatures", version, about)]
struct Cli {
    /// Files or directories to scan.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Config file to use instead of the discovered one.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("phpantom-signatures: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = Config::discover(cli.config.as_deref(), &working_dir)?;
    config.pretty |= cli.pretty;

    let reports = report::collect_files(&cli.paths, &config)?
        .iter()
        .map(|path| report::describe_file(path, &config))
        .collect::<Result<Vec<FileReport>>>()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if config.pretty {
        serde_json::to_writer_pretty(&mut out, &reports)?;
    } else {
        serde_json::to_writer(&mut out, &reports)?;
    }
    // A closed stdout (e.g. piped into `head`) is not worth an error.
    let _ = writeln!(out);
    Ok(())
}
