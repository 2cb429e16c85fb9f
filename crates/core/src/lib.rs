//! Checks whether EVM runtime bytecode dispatches the functions declared in an ABI.
//!
//! ```rust
//! use abiprobe_core::{Abi, satisfy::bytecode_satisfies};
//!
//! let abi = Abi::from_json_str(
//!     r#"[{"name": "transfer", "inputs": [{"type": "address"}, {"type": "uint256"}]}]"#,
//! )
//! .unwrap();
//! assert!(bytecode_satisfies("6080604052348063a9059cbb1461004557", &abi).unwrap());
//! ```

pub mod address;
pub mod config;
pub mod decoder;
pub mod detection;
pub mod opcode;
pub mod resolver;
pub mod rpc;
pub mod satisfy;
pub mod selector;

pub use address::{Address, checksummed, is_address, parse_address};
pub use config::{ProbeConfig, RpcConfig};
pub use detection::ScanStrategy;
pub use opcode::Opcode;
pub use resolver::{CodeProvider, address_satisfies, address_satisfies_with};
pub use rpc::{JsonRpcProvider, RpcError};
pub use satisfy::{
    FunctionMatch, bytecode_satisfies, bytecode_satisfies_json, bytecode_satisfies_with,
    check_functions,
};
pub use selector::{Abi, FunctionSpec, Param, Selector, selector, signature};
