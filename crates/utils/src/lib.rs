//! Shared error types for the abiprobe workspace.

pub mod errors;
