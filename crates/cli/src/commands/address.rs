use super::{Command, Context, load_abi, verdict};
use abiprobe_core::{JsonRpcProvider, address_satisfies_with};
use async_trait::async_trait;
use clap::Args;
use std::error::Error;
use std::process::ExitCode;

#[derive(Args)]
pub struct AddressArgs {
    /// ABI as inline JSON or @path to a JSON file
    #[arg(long)]
    abi: String,

    /// JSON-RPC endpoint, overrides the config file
    #[arg(long, env = "ABIPROBE_RPC_URL")]
    rpc_url: Option<String>,

    /// Contract address (0x followed by 40 hex digits)
    address: String,
}

#[async_trait]
impl Command for AddressArgs {
    async fn execute(self, ctx: &Context) -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
        let abi = load_abi(&self.abi)?;

        let mut rpc = ctx.config.rpc.clone();
        if let Some(endpoint) = self.rpc_url {
            rpc.endpoint = endpoint;
        }
        tracing::info!("resolving {} via {}", self.address, rpc.endpoint);

        let provider = JsonRpcProvider::new(rpc)?;
        let satisfied =
            address_satisfies_with(&provider, &self.address, &abi, ctx.config.scan).await?;
        println!("{satisfied}");
        Ok(verdict(satisfied))
    }
}
