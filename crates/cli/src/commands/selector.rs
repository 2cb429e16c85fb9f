use super::{Command, Context, load_abi};
use abiprobe_core::Abi;
use async_trait::async_trait;
use clap::Args;
use std::error::Error;
use std::process::ExitCode;

#[derive(Args)]
pub struct SelectorArgs {
    /// ABI as inline JSON or @path to a JSON file
    #[arg(long)]
    abi: String,
}

/// `0x<selector>  <signature>` per declared function.
pub fn render(abi: &Abi) -> Vec<String> {
    abi.iter()
        .map(|spec| format!("0x{}  {}", spec.selector(), spec.signature()))
        .collect()
}

#[async_trait]
impl Command for SelectorArgs {
    async fn execute(self, _ctx: &Context) -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
        let abi = load_abi(&self.abi)?;
        for line in render(&abi) {
            println!("{line}");
        }
        Ok(ExitCode::SUCCESS)
    }
}
