//! Checks deployed contracts by address.
//!
//! The network is reached through a [`CodeProvider`]; this module validates the address,
//! fetches the code once, strips the `0x` prefix nodes put on it and hands it to the
//! bytecode satisfier.

use crate::address::{Address, parse_address};
use crate::decoder::strip_hex_prefix;
use crate::detection::ScanStrategy;
use crate::satisfy::bytecode_satisfies_with;
use crate::selector::Abi;
use abiprobe_utils::errors::ResolveError;
use async_trait::async_trait;

/// Source of deployed contract code.
#[async_trait]
pub trait CodeProvider: Send + Sync {
    /// Error produced by the transport.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the deployed code at `address` as hex text, usually `0x`-prefixed.
    async fn get_code(&self, address: &Address) -> Result<String, Self::Error>;
}

#[async_trait]
impl<P: CodeProvider + ?Sized> CodeProvider for &P {
    type Error = P::Error;

    async fn get_code(&self, address: &Address) -> Result<String, Self::Error> {
        (**self).get_code(address).await
    }
}

/// Tells whether the contract deployed at `address` dispatches every function of `abi`.
///
/// # Errors
/// - [`ResolveError::Satisfy`] with `InvalidAddress` when `address` is malformed; the
///   provider is not called.
/// - [`ResolveError::Provider`] with the provider's own error when the fetch fails.
/// - [`ResolveError::Satisfy`] with `MissingInput` when no code is deployed there.
pub async fn address_satisfies<P>(
    provider: &P,
    address: &str,
    abi: &Abi,
) -> Result<bool, ResolveError<P::Error>>
where
    P: CodeProvider + ?Sized,
{
    address_satisfies_with(provider, address, abi, ScanStrategy::default()).await
}

/// [`address_satisfies`] with an explicit scan strategy.
pub async fn address_satisfies_with<P>(
    provider: &P,
    address: &str,
    abi: &Abi,
    strategy: ScanStrategy,
) -> Result<bool, ResolveError<P::Error>>
where
    P: CodeProvider + ?Sized,
{
    let address = parse_address(address)?;
    let code = provider
        .get_code(&address)
        .await
        .map_err(ResolveError::Provider)?;

    let stream = strip_hex_prefix(code.trim()).to_ascii_lowercase();
    tracing::debug!("fetched {} bytes of code at {:?}", stream.len() / 2, address);

    Ok(bytecode_satisfies_with(&stream, abi, strategy)?)
}
