use super::{Command, Context, load_abi, load_bytecode, verdict};
use abiprobe_core::{
    Abi, FunctionMatch, ScanStrategy,
    satisfy::{bytecode_satisfies_with, check_functions},
};
use async_trait::async_trait;
use clap::Args;
use std::error::Error;
use std::process::ExitCode;

#[derive(Args)]
pub struct CheckArgs {
    /// ABI as inline JSON or @path to a JSON file
    #[arg(long)]
    abi: String,

    /// Runtime bytecode as hex (0x...) or @path to a hex file
    bytecode: String,

    /// Print one line per function with its match status
    #[arg(long)]
    report: bool,
}

/// Scans `bytecode` once. The per-function outcome is only kept when `report` is set.
fn evaluate(
    bytecode: &str,
    abi: &Abi,
    scan: ScanStrategy,
    report: bool,
) -> Result<(bool, Vec<FunctionMatch>), Box<dyn Error + Send + Sync>> {
    if report {
        let functions = check_functions(bytecode, abi, scan)?;
        Ok((functions.iter().all(|f| f.matched), functions))
    } else {
        Ok((bytecode_satisfies_with(bytecode, abi, scan)?, Vec::new()))
    }
}

#[async_trait]
impl Command for CheckArgs {
    async fn execute(self, ctx: &Context) -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
        let abi = load_abi(&self.abi)?;
        let bytecode = load_bytecode(&self.bytecode)?;

        let (satisfied, functions) = evaluate(&bytecode, &abi, ctx.config.scan, self.report)?;
        for function in &functions {
            let mark = if function.matched { "found" } else { "missing" };
            println!("0x{}  {}  {mark}", function.selector, function.signature);
        }

        tracing::info!("{} function(s) checked, satisfied: {}", abi.len(), satisfied);
        println!("{satisfied}");
        Ok(verdict(satisfied))
    }
}
