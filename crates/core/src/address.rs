//! Contract addresses accepted by the resolver.
//!
//! Validation follows the usual wallet rules: 40 hex digits with an optional `0x`; digits
//! that are all lowercase or all uppercase are accepted as-is, mixed case must carry a valid
//! EIP-55 checksum.

use crate::decoder::strip_hex_prefix;
use abiprobe_utils::errors::SatisfyError;
use ethers::utils::to_checksum;

pub use ethers::types::Address;

/// Parses and validates a contract address.
///
/// # Errors
/// [`SatisfyError::InvalidAddress`] carrying `input` when it is malformed or its mixed-case
/// checksum is wrong.
pub fn parse_address(input: &str) -> Result<Address, SatisfyError> {
    let invalid = || SatisfyError::InvalidAddress(input.to_string());
    let digits = strip_hex_prefix(input);

    if digits.len() != 40 {
        return Err(invalid());
    }
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes).map_err(|_| invalid())?;
    let address = Address::from(bytes);

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper && checksummed(&address)[2..] != *digits {
        return Err(invalid());
    }

    Ok(address)
}

/// Tells whether `input` is a well-formed address.
pub fn is_address(input: &str) -> bool {
    parse_address(input).is_ok()
}

/// EIP-55 mixed-case rendering with a `0x` prefix.
pub fn checksummed(address: &Address) -> String {
    to_checksum(address, None)
}
