//! Chain access seam.
//!
//! The inspector reads contracts through the [`ChainReader`] trait: one
//! method for plain view calls, one for ERC725Y schema-key reads. The
//! transport (JSON-RPC client, wallet relay, test double) decodes raw return
//! data into [`CallValue`] before it crosses this boundary, so the engine
//! only ever deals in shaped values and a small error taxonomy.

use async_trait::async_trait;
use primitive_types::{H160, U256};
use serde::Serialize;
use thiserror::Error;

/// EVM account address.
pub type Address = H160;

/// EVM chain identifier.
pub type ChainId = u64;

/// Outcome of a single contract read.
pub type FieldResult<T> = Result<T, ReadError>;

/// A view function the inspector calls, carrying the canonical signature
/// and the 4-byte selector derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSig {
    pub signature: String,
    pub selector: [u8; 4],
}

impl FunctionSig {
    /// Build a signature entry, deriving the selector from the canonical form.
    pub fn new(signature: impl Into<String>) -> Self {
        let signature = signature.into();
        let selector = assay_common::selector(&signature);
        Self { signature, selector }
    }

    /// Function name without the argument list.
    pub fn name(&self) -> &str {
        self.signature.split('(').next().unwrap_or(&self.signature)
    }
}

/// An ERC725Y data key, derived from its LSP2 key name.
///
/// Array keys keep the `[]` suffix in the hashed name (`LSP4Creators[]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaKey {
    pub name: String,
    pub key: [u8; 32],
}

impl SchemaKey {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = assay_common::lsp2_data_key(&name);
        Self { name, key }
    }
}

/// Argument to a contract call.
///
/// The inspector itself only ever passes `InterfaceId`; the other variants
/// are vocabulary for [`ChainReader`] implementations that serve richer
/// calls over the same interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    /// A 4-byte interface identifier (ERC-165 probes).
    InterfaceId([u8; 4]),
    /// An account or contract address, for `balanceOf(address)`-shaped reads.
    Address(Address),
    /// A plain unsigned integer, for indexed or amount-taking reads.
    Uint(U256),
}

/// A decoded value returned from the chain.
///
/// `Null` is an ERC725Y key that exists but holds no value, which is a
/// successful read of an unset slot rather than a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum CallValue {
    Bool(bool),
    Uint(U256),
    Text(String),
    Json(serde_json::Value),
    AddressList(Vec<Address>),
    Null,
}

impl CallValue {
    /// Variant name for shape diagnostics.
    fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Uint(_) => "uint",
            Self::Text(_) => "text",
            Self::Json(_) => "json",
            Self::AddressList(_) => "address list",
            Self::Null => "null",
        }
    }

    /// Expect a boolean, as returned by `supportsInterface`.
    pub fn into_bool(self) -> FieldResult<bool> {
        match self {
            Self::Bool(b) => Ok(b),
            other => Err(ReadError::shape("bool", other.kind())),
        }
    }

    /// Expect an unsigned integer.
    pub fn into_uint(self) -> FieldResult<U256> {
        match self {
            Self::Uint(v) => Ok(v),
            other => Err(ReadError::shape("uint", other.kind())),
        }
    }

    /// Expect an unsigned integer; an unset key is absent.
    pub fn into_uint_or_null(self) -> FieldResult<Option<U256>> {
        match self {
            Self::Uint(v) => Ok(Some(v)),
            Self::Null => Ok(None),
            other => Err(ReadError::shape("uint", other.kind())),
        }
    }

    /// Expect an integer narrow enough for a decimals count.
    pub fn into_decimals(self) -> FieldResult<u8> {
        let v = self.into_uint()?;
        if v > U256::from(u8::MAX) {
            return Err(ReadError::shape("uint8", "oversized uint"));
        }
        Ok(v.low_u32() as u8)
    }

    /// Expect text; an unset key is absent.
    pub fn into_text(self) -> FieldResult<Option<String>> {
        match self {
            Self::Text(s) => Ok(Some(s)),
            Self::Null => Ok(None),
            other => Err(ReadError::shape("text", other.kind())),
        }
    }

    /// Expect a JSON document; an unset key is absent.
    pub fn into_json(self) -> FieldResult<Option<serde_json::Value>> {
        match self {
            Self::Json(v) => Ok(Some(v)),
            Self::Null => Ok(None),
            other => Err(ReadError::shape("json", other.kind())),
        }
    }

    /// Expect an address list; an unset key is absent.
    pub fn into_address_list(self) -> FieldResult<Option<Vec<Address>>> {
        match self {
            Self::AddressList(a) => Ok(Some(a)),
            Self::Null => Ok(None),
            other => Err(ReadError::shape("address list", other.kind())),
        }
    }
}

/// Why a contract read failed.
///
/// `Reverted` and `Unsupported` are the expected negative signals while
/// probing capabilities. `Transport` aborts a probe; anywhere else it is a
/// field-level failure. `Shape` marks a value that decoded fine but does
/// not match what the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ReadError {
    /// The contract rejected the call.
    #[error("call reverted")]
    Reverted,
    /// The contract does not expose the requested function or key.
    #[error("function or key not supported")]
    Unsupported,
    /// The chain could not be reached or answered out of protocol.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The call returned a value of an unexpected shape.
    #[error("unexpected value shape: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },
}

impl ReadError {
    pub fn shape(expected: &str, actual: &str) -> Self {
        Self::Shape {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// True for the negative signals a probe maps to "interface absent".
    pub fn is_negative_signal(&self) -> bool {
        matches!(self, Self::Reverted | Self::Unsupported)
    }
}

/// Read-only access to contracts across EVM chains.
///
/// Implementations own transport policy (endpoints, retries, timeouts);
/// the inspector layers no retry of its own on top.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Call a view function and decode its return value.
    async fn call_contract(
        &self,
        chain_id: ChainId,
        contract: Address,
        function: &FunctionSig,
        args: &[CallArg],
    ) -> FieldResult<CallValue>;

    /// Read an ERC725Y data key through the contract's LSP2 schema.
    async fn fetch_schema_key(
        &self,
        chain_id: ChainId,
        contract: Address,
        key: &SchemaKey,
    ) -> FieldResult<CallValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_sig_derives_selector() {
        let sig = FunctionSig::new("decimals()");
        assert_eq!(hex::encode(sig.selector), "313ce567");
        assert_eq!(sig.name(), "decimals");
    }

    #[test]
    fn test_schema_key_derives_lsp2_hash() {
        let key = SchemaKey::new("LSP4TokenName");
        assert_eq!(key.key, assay_common::keccak256(b"LSP4TokenName"));
    }

    #[test]
    fn test_into_bool_rejects_other_shapes() {
        let err = CallValue::Text("yes".into()).into_bool().unwrap_err();
        assert_eq!(err, ReadError::shape("bool", "text"));
    }

    #[test]
    fn test_into_text_treats_null_as_absent() {
        assert_eq!(CallValue::Null.into_text().unwrap(), None);
        assert_eq!(
            CallValue::Text("LYX".into()).into_text().unwrap(),
            Some("LYX".to_string())
        );
    }

    #[test]
    fn test_into_decimals_bounds() {
        assert_eq!(CallValue::Uint(U256::from(18u64)).into_decimals().unwrap(), 18);
        assert!(CallValue::Uint(U256::from(256u64)).into_decimals().is_err());
        assert!(CallValue::Null.into_decimals().is_err());
    }

    #[test]
    fn test_negative_signals() {
        assert!(ReadError::Reverted.is_negative_signal());
        assert!(ReadError::Unsupported.is_negative_signal());
        assert!(!ReadError::Transport("timeout".into()).is_negative_signal());
        assert!(!ReadError::shape("bool", "text").is_negative_signal());
    }
}
