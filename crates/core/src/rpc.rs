//! JSON-RPC code provider for Ethereum nodes.

use crate::address::Address;
use crate::config::RpcConfig;
use crate::resolver::CodeProvider;
use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider, ProviderError};
use ethers::types::{BlockId, BlockNumber};
use std::time::Duration;
use thiserror::Error;

/// Errors from talking to a JSON-RPC node.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The configured endpoint is not a URL.
    #[error("invalid rpc endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    /// The configured block tag is neither a named tag nor a block number.
    #[error("invalid block tag '{0}'")]
    InvalidBlockTag(String),
    /// The node did not answer in time.
    #[error("rpc request timed out after {0:?}")]
    Timeout(Duration),
    /// Transport, decoding or JSON-RPC error reported by the provider.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Fetches deployed code over HTTP JSON-RPC.
#[derive(Debug)]
pub struct JsonRpcProvider {
    provider: Provider<Http>,
    block: BlockId,
    config: RpcConfig,
}

impl JsonRpcProvider {
    /// Creates a provider for the configured endpoint and block tag.
    pub fn new(config: RpcConfig) -> Result<Self, RpcError> {
        let provider = Provider::<Http>::try_from(config.endpoint.as_str()).map_err(|e| {
            RpcError::InvalidEndpoint {
                endpoint: config.endpoint.clone(),
                reason: e.to_string(),
            }
        })?;
        let block: BlockNumber = config
            .block_tag
            .parse()
            .map_err(|_| RpcError::InvalidBlockTag(config.block_tag.clone()))?;

        Ok(Self {
            provider,
            block: block.into(),
            config,
        })
    }

    /// The configuration this provider was built with.
    pub const fn config(&self) -> &RpcConfig {
        &self.config
    }
}

#[async_trait]
impl CodeProvider for JsonRpcProvider {
    type Error = RpcError;

    async fn get_code(&self, address: &Address) -> Result<String, RpcError> {
        tracing::debug!("eth_getCode {:?} -> {}", address, self.config.endpoint);
        let timeout = self.config.timeout();
        let code = tokio::time::timeout(timeout, self.provider.get_code(*address, Some(self.block)))
            .await
            .map_err(|_| RpcError::Timeout(timeout))??;
        Ok(format!("0x{}", hex::encode(code)))
    }
}
