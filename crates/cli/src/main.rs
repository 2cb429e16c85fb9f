/// Entry point for the abiprobe CLI.
///
/// Parses command-line arguments, installs logging, resolves the configuration and dispatches
/// to the subcommands that derive selectors and check bytecode or deployed contracts against
/// an ABI.
mod commands;

use abiprobe_core::ProbeConfig;
use clap::Parser;
use commands::{Cmd, Command, Context, ScanArg};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Command-line interface for abiprobe.
///
/// `check` and `address` exit with 0 when every function is dispatched, 1 when one is missing
/// and 2 on input or network errors.
#[derive(Parser)]
#[command(name = "abiprobe", version)]
#[command(about = "abiprobe: check EVM bytecode against a function ABI")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log scan decisions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Selector comparisons to examine, overrides the config file
    #[arg(long, global = true, value_enum)]
    scan: Option<ScanArg>,
}

impl Cli {
    fn context(&self) -> Result<Context, Box<dyn Error + Send + Sync>> {
        let mut config = match &self.config {
            Some(path) => ProbeConfig::from_file(path)?,
            None => ProbeConfig::default(),
        };
        if let Some(scan) = self.scan {
            config.scan = scan.into();
        }
        Ok(Context { config })
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.context() {
        Ok(ctx) => cli.command.execute(&ctx).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
