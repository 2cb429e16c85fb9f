//! Hex normalization and hashing helpers shared by the probe's input boundaries.
//!
//! The dispatch scanner works on lowercase hex text without a `0x` prefix. Callers that
//! accept bytecode from users or nodes run it through [`normalize_hex_string`] first.

use abiprobe_utils::errors::DecodeError;
use std::{fs, path::Path};
use tiny_keccak::{Hasher, Keccak};

/// Computes the Keccak-256 hash of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut keccak = Keccak::v256();
    keccak.update(data);
    let mut hash = [0u8; 32];
    keccak.finalize(&mut hash);
    hash
}

/// Removes a leading `0x` or `0X`, if any.
pub fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Normalizes hex strings by removing whitespace and the 0x prefix, then lowercasing.
///
/// Fails on non-hex characters and on odd length, since the scanner reads the stream one
/// byte (two characters) at a time.
pub fn normalize_hex_string(input: &str) -> Result<String, DecodeError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let clean = strip_hex_prefix(&compact);

    if let Some((index, c)) = clean.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(DecodeError::HexDecode(
            hex::FromHexError::InvalidHexCharacter { c, index },
        ));
    }

    if clean.len() % 2 == 1 {
        return Err(DecodeError::OddLength(clean.len()));
    }

    Ok(clean.to_ascii_lowercase())
}

/// Normalizes input into scanner-ready hex from a literal hex string or a file.
pub fn input_to_hex(input: &str, is_file: bool) -> Result<String, DecodeError> {
    if is_file {
        let path = Path::new(input);
        let file_content = fs::read_to_string(path).map_err(|e| DecodeError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        normalize_hex_string(&file_content)
    } else {
        normalize_hex_string(input)
    }
}
