/// Module for detecting function dispatch logic in EVM runtime bytecode.
///
/// Solidity dispatchers route a call by comparing its selector against every public function
/// and branching to the matching handler. This module recognizes that comparison directly in
/// the hex text of the bytecode, without disassembling it.
///
/// # Usage
/// ```rust
/// use abiprobe_core::{FunctionSpec, detection::{encode_selector_check, matches}};
///
/// let transfer = FunctionSpec::new("transfer", ["address", "uint256"]).unwrap();
/// let runtime = encode_selector_check(transfer.selector(), &[0x00, 0x45]).unwrap();
/// assert!(matches(&runtime, transfer.selector()));
/// ```
pub mod dispatcher;

pub use dispatcher::{
    ScanStrategy, encode_selector_check, matches, matches_with, selector_probe,
};
