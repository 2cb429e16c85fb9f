use std::fmt;
use thiserror::Error;

/// Guidance appended to every specification error, describing the ABI shape the
/// probe expects.
pub const ABI_SHAPE_HINT: &str = r#"Please provide an ABI matching the following structure:
[
  {
    "name": "fn1",
    "inputs": [{ "name": "arg1", "type": "type1" },...]
  },
  {
    "name": "fn2",
    "inputs": [{ "name": "arg1", "type": "type1" },...]
  },
  ...
]"#;

/// Which input of a satisfaction check was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    /// No bytecode (or an empty instruction stream) was supplied.
    Bytecode,
    /// No ABI was supplied.
    Abi,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytecode => write!(f, "cannot assess contract ABI without a bytecode"),
            Self::Abi => write!(
                f,
                "cannot assess contract ABI without an ABI, please provide one"
            ),
        }
    }
}

/// Errors raised by selector derivation and bytecode satisfaction checks.
///
/// A `false` satisfaction result is never reported through this type; these are
/// contract violations detected before any scanning happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SatisfyError {
    /// A function specification lacks a name or a well-formed list of inputs.
    #[error("invalid function specification: {reason}\n{hint}", hint = ABI_SHAPE_HINT)]
    InvalidSpecification { reason: String },

    /// Bytecode or ABI was not provided.
    #[error("{0}")]
    MissingInput(MissingInput),

    /// The address handed to the resolver is malformed.
    #[error("cannot assess contract ABI with an invalid address: {0}")]
    InvalidAddress(String),
}

impl SatisfyError {
    /// Shorthand for an [`SatisfyError::InvalidSpecification`] with the given reason.
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpecification {
            reason: reason.into(),
        }
    }
}

/// Errors from checking an on-chain address.
///
/// Failures of the code provider are carried as-is in [`ResolveError::Provider`].
#[derive(Debug, Error)]
pub enum ResolveError<E: std::error::Error + 'static> {
    /// Input validation or satisfaction failed.
    #[error(transparent)]
    Satisfy(#[from] SatisfyError),
    /// The code provider failed to fetch the deployed code.
    #[error("code provider failed: {0}")]
    Provider(#[source] E),
}

/// Custom error type for hex normalization at the input boundaries.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("hex decode failed: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("hex string has odd length: {0}")]
    OddLength(usize),

    #[error("could not read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File read error.
    #[error("could not read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON parse error.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
