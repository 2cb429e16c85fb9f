//! Checks that a bytecode dispatches every function of an ABI.
//!
//! This tells whether the bytecode *supports* each declared function, not whether it
//! implements exactly that ABI: extra functions in the bytecode are ignored, and handler
//! behavior is never inspected.

use crate::detection::{ScanStrategy, matches_with};
use crate::selector::{Abi, Selector};
use abiprobe_utils::errors::{MissingInput, SatisfyError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of the dispatch check for one declared function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMatch {
    /// Canonical signature, e.g. `transfer(address,uint256)`.
    pub signature: String,
    /// Selector rendered as 8 lowercase hex characters.
    pub selector: String,
    /// Whether a dispatch check for the selector was found.
    pub matched: bool,
}

/// Tells whether `bytecode` dispatches every function declared in `abi`.
///
/// `bytecode` is lowercase hex without a `0x` prefix. An empty ABI is satisfied by any
/// bytecode.
///
/// # Errors
/// [`SatisfyError::MissingInput`] when `bytecode` is empty.
///
/// # Examples
/// ```rust
/// use abiprobe_core::{Abi, FunctionSpec, satisfy::bytecode_satisfies};
///
/// let abi = Abi::from(FunctionSpec::new("transfer", ["address", "uint256"]).unwrap());
/// assert!(bytecode_satisfies("63a9059cbb14604557", &abi).unwrap());
/// assert!(!bytecode_satisfies("63a9059cbb11604557", &abi).unwrap());
/// ```
pub fn bytecode_satisfies(bytecode: &str, abi: &Abi) -> Result<bool, SatisfyError> {
    bytecode_satisfies_with(bytecode, abi, ScanStrategy::default())
}

/// [`bytecode_satisfies`] with an explicit scan strategy.
pub fn bytecode_satisfies_with(
    bytecode: &str,
    abi: &Abi,
    strategy: ScanStrategy,
) -> Result<bool, SatisfyError> {
    if bytecode.is_empty() {
        return Err(SatisfyError::MissingInput(MissingInput::Bytecode));
    }

    if abi.is_empty() {
        tracing::debug!("empty ABI is satisfied by any bytecode");
        return Ok(true);
    }

    Ok(abi.iter().all(|spec| {
        let selector = spec.selector();
        let matched = matches_with(bytecode, selector, strategy);
        if !matched {
            tracing::debug!("{} (0x{}) is not dispatched", spec.signature(), selector);
        }
        matched
    }))
}

/// [`bytecode_satisfies`] for an ABI given as JSON.
///
/// `null` means no ABI was provided; a single function object is promoted to a one-element
/// ABI. Bytecode is checked first, so an absent bytecode is reported even when the ABI is
/// also missing.
pub fn bytecode_satisfies_json(bytecode: &str, abi: &Value) -> Result<bool, SatisfyError> {
    if bytecode.is_empty() {
        return Err(SatisfyError::MissingInput(MissingInput::Bytecode));
    }
    let abi = Abi::from_json(abi)?;
    bytecode_satisfies(bytecode, &abi)
}

/// Checks every function of `abi` without stopping at the first miss.
///
/// Used for reports; the overall verdict is the conjunction of the `matched` flags.
pub fn check_functions(
    bytecode: &str,
    abi: &Abi,
    strategy: ScanStrategy,
) -> Result<Vec<FunctionMatch>, SatisfyError> {
    if bytecode.is_empty() {
        return Err(SatisfyError::MissingInput(MissingInput::Bytecode));
    }

    Ok(abi
        .iter()
        .map(|spec| {
            let selector: Selector = spec.selector();
            FunctionMatch {
                signature: spec.signature(),
                selector: selector.to_string(),
                matched: matches_with(bytecode, selector, strategy),
            }
        })
        .collect())
}
