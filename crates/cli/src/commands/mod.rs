use abiprobe_core::{Abi, ProbeConfig, ScanStrategy, decoder::input_to_hex};
use async_trait::async_trait;
use clap::{Subcommand, ValueEnum};
use std::error::Error;
use std::fs;
use std::process::ExitCode;

pub mod address;
pub mod check;
pub mod selector;
pub mod signature;

#[derive(Subcommand)]
pub enum Cmd {
    /// Print the canonical signature of every function in an ABI
    Signature(signature::SignatureArgs),

    /// Print the 4-byte selector and signature of every function in an ABI
    Selector(selector::SelectorArgs),

    /// Check that bytecode dispatches every function of an ABI
    Check(check::CheckArgs),

    /// Check the code deployed at an address over JSON-RPC
    Address(address::AddressArgs),
}

/// Settings resolved from the config file and global flags.
#[derive(Debug, Default)]
pub struct Context {
    pub config: ProbeConfig,
}

#[async_trait]
pub trait Command {
    async fn execute(self, ctx: &Context) -> Result<ExitCode, Box<dyn Error + Send + Sync>>;
}

#[async_trait]
impl Command for Cmd {
    async fn execute(self, ctx: &Context) -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
        match self {
            Self::Signature(args) => args.execute(ctx).await,
            Self::Selector(args) => args.execute(ctx).await,
            Self::Check(args) => args.execute(ctx).await,
            Self::Address(args) => args.execute(ctx).await,
        }
    }
}

/// `--scan` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScanArg {
    /// Examine only the first selector comparison
    First,
    /// Examine every selector comparison
    All,
}

impl From<ScanArg> for ScanStrategy {
    fn from(arg: ScanArg) -> Self {
        match arg {
            ScanArg::First => Self::FirstOccurrence,
            ScanArg::All => Self::AllOccurrences,
        }
    }
}

/// Loads an ABI given inline as JSON or as `@path` to a JSON file.
pub fn load_abi(input: &str) -> Result<Abi, Box<dyn Error + Send + Sync>> {
    let json = match input.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("could not read ABI file '{path}': {e}"))?,
        None => input.to_string(),
    };
    Ok(Abi::from_json_str(&json)?)
}

/// Loads bytecode given inline as hex or as `@path` to a hex file.
pub fn load_bytecode(input: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let hex = match input.strip_prefix('@') {
        Some(path) => input_to_hex(path, true)?,
        None => input_to_hex(input, false)?,
    };
    Ok(hex)
}

/// Exit status for a satisfaction verdict.
pub fn verdict(satisfied: bool) -> ExitCode {
    if satisfied {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
