//! Function specifications, canonical signatures and 4-byte selectors.
//!
//! A [`FunctionSpec`] can only exist in a valid state: the name is non-empty and every input
//! carries a type. Signature and selector derivation are therefore infallible; malformed
//! declarations are rejected with [`SatisfyError::InvalidSpecification`] when they are built.

use crate::decoder::{keccak256, strip_hex_prefix};
use abiprobe_utils::errors::{MissingInput, SatisfyError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

/// One input parameter of a function. Only `type` takes part in the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Param {
    /// Creates an unnamed parameter of the given type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
        }
    }

    /// Creates a named parameter of the given type.
    pub fn named(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: Some(name.into()),
        }
    }

    /// The type descriptor, e.g. `uint256` or `address[3]`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The parameter name, if the declaration had one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A callable entry point: a name and its ordered parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct FunctionSpec {
    name: String,
    inputs: Vec<Param>,
}

impl FunctionSpec {
    /// Builds a spec from a name and its parameter types.
    ///
    /// # Examples
    /// ```rust
    /// use abiprobe_core::FunctionSpec;
    ///
    /// let spec = FunctionSpec::new("transfer", ["address", "uint256"]).unwrap();
    /// assert_eq!(spec.signature(), "transfer(address,uint256)");
    /// assert_eq!(spec.selector().to_string(), "a9059cbb");
    /// ```
    pub fn new<I, T>(name: impl Into<String>, inputs: I) -> Result<Self, SatisfyError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::with_params(name, inputs.into_iter().map(Param::new).collect())
    }

    /// Builds a spec from already constructed parameters.
    pub fn with_params(name: impl Into<String>, inputs: Vec<Param>) -> Result<Self, SatisfyError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SatisfyError::invalid_spec("function name is missing"));
        }
        Ok(Self { name, inputs })
    }

    /// Parses one JSON ABI entry of the form `{"name": .., "inputs": [{"type": ..}, ..]}`.
    ///
    /// Unknown keys are ignored.
    pub fn from_json(value: &Value) -> Result<Self, SatisfyError> {
        let entry = value
            .as_object()
            .ok_or_else(|| SatisfyError::invalid_spec("function specification must be an object"))?;

        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| SatisfyError::invalid_spec("function name is missing"))?;

        let inputs = entry
            .get("inputs")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                SatisfyError::invalid_spec(format!("function `{name}` has no inputs list"))
            })?;

        let params = inputs
            .iter()
            .enumerate()
            .map(|(i, input)| {
                let kind = input.get("type").and_then(Value::as_str).ok_or_else(|| {
                    SatisfyError::invalid_spec(format!("input {i} of `{name}` has no type"))
                })?;
                Ok::<_, SatisfyError>(Param {
                    kind: kind.to_string(),
                    name: input
                        .get("name")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::with_params(name, params)
    }

    /// The function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered input parameters.
    pub fn inputs(&self) -> &[Param] {
        &self.inputs
    }

    /// Canonical signature, see [`signature`].
    pub fn signature(&self) -> String {
        signature(self)
    }

    /// 4-byte selector, see [`selector`].
    pub fn selector(&self) -> Selector {
        selector(self)
    }
}

impl TryFrom<Value> for FunctionSpec {
    type Error = SatisfyError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

/// Tells the canonical signature of a function, e.g. `fn(uint256,address)`.
pub fn signature(spec: &FunctionSpec) -> String {
    let types: Vec<&str> = spec.inputs.iter().map(Param::kind).collect();
    format!("{}({})", spec.name, types.join(","))
}

/// First 4 bytes of `keccak256(signature(spec))`.
pub fn selector(spec: &FunctionSpec) -> Selector {
    let hash = keccak256(signature(spec).as_bytes());
    Selector([hash[0], hash[1], hash[2], hash[3]])
}

/// A 4-byte function selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector([u8; 4]);

impl Selector {
    /// Wraps raw selector bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// The raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Big-endian integer view, as dispatchers compare it.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl From<u32> for Selector {
    fn from(value: u32) -> Self {
        Self(value.to_be_bytes())
    }
}

/// Renders 8 lowercase hex characters without a prefix.
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Selector {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 4];
        hex::decode_to_slice(strip_hex_prefix(s), &mut bytes)?;
        Ok(Self(bytes))
    }
}

/// An ordered list of function declarations to look for.
///
/// Duplicate entries are kept and checked independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Abi(Vec<FunctionSpec>);

impl Abi {
    /// Creates an ABI from its function declarations.
    pub const fn new(functions: Vec<FunctionSpec>) -> Self {
        Self(functions)
    }

    /// Parses an ABI from JSON.
    ///
    /// Accepts a single function object (promoted to a one-element ABI) or an array. Array
    /// entries whose `type` is present and not `"function"` (constructors, events, errors,
    /// fallback and receive) are skipped because they never appear in a dispatcher. `null`
    /// means no ABI was provided.
    pub fn from_json(value: &Value) -> Result<Self, SatisfyError> {
        match value {
            Value::Null => Err(SatisfyError::MissingInput(MissingInput::Abi)),
            Value::Object(_) => Ok(Self(vec![FunctionSpec::from_json(value)?])),
            Value::Array(entries) => entries
                .iter()
                .filter(|entry| is_function_entry(entry))
                .map(FunctionSpec::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            _ => Err(SatisfyError::invalid_spec(
                "ABI must be a function object or an array of them",
            )),
        }
    }

    /// Parses an ABI from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SatisfyError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| SatisfyError::invalid_spec(format!("ABI is not valid JSON: {e}")))?;
        Self::from_json(&value)
    }

    /// Number of declared functions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no function is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the declarations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FunctionSpec> {
        self.0.iter()
    }

    /// Appends every declaration of `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

fn is_function_entry(entry: &Value) -> bool {
    match entry.get("type") {
        None => true,
        Some(kind) => kind.as_str() == Some("function"),
    }
}

impl From<FunctionSpec> for Abi {
    fn from(spec: FunctionSpec) -> Self {
        Self(vec![spec])
    }
}

impl From<Vec<FunctionSpec>> for Abi {
    fn from(functions: Vec<FunctionSpec>) -> Self {
        Self(functions)
    }
}

impl FromIterator<FunctionSpec> for Abi {
    fn from_iter<I: IntoIterator<Item = FunctionSpec>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Abi {
    type Item = &'a FunctionSpec;
    type IntoIter = std::slice::Iter<'a, FunctionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<Value> for Abi {
    type Error = SatisfyError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}
