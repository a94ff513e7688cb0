//! Inspection results.
//!
//! [`TokenRecord`] is what one pass produces for a `(chain, contract)` key.
//! Classification is all-or-nothing: `standard` is only set when every
//! required field of that standard fetched cleanly. The per-standard field
//! structs are best-effort and keep whatever did fetch, so "some fields
//! present" never implies "classified".

use primitive_types::U256;
use serde::Serialize;
use serde_json::Value;

use crate::reader::{Address, ChainId, ReadError};

/// Which token standard a contract was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenStandard {
    Erc20,
    Lsp7,
}

/// LSP4 token type, decoded from the raw on-chain value.
///
/// The raw `U256` stays on the record untouched; this mapping exists for
/// display layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Lsp7TokenKind {
    Token,
    Nft,
    Collection,
    /// A value beyond the three defined types, preserved as-is.
    Custom(U256),
}

impl Lsp7TokenKind {
    /// Map the raw LSP4TokenType value: 0 token, 1 NFT, 2 collection.
    pub fn from_raw(raw: U256) -> Self {
        if raw == U256::zero() {
            Self::Token
        } else if raw == U256::one() {
            Self::Nft
        } else if raw == U256::from(2u64) {
            Self::Collection
        } else {
            Self::Custom(raw)
        }
    }
}

/// Fields read over the ERC-20 surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Erc20Fields {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub errors: Erc20FieldErrors,
}

/// Per-field failures on the ERC-20 path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Erc20FieldErrors {
    pub decimals: Option<ReadError>,
    pub total_supply: Option<ReadError>,
    pub name: Option<ReadError>,
    pub symbol: Option<ReadError>,
}

impl Erc20FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.decimals.is_none()
            && self.total_supply.is_none()
            && self.name.is_none()
            && self.symbol.is_none()
    }
}

/// Fields read over the LSP7 surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Lsp7Fields {
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    /// Raw LSP4TokenType value, kept lossless.
    pub token_type: Option<U256>,
    pub metadata: Option<Value>,
    pub creators: Option<Vec<Address>>,
    pub errors: Lsp7FieldErrors,
}

impl Lsp7Fields {
    /// Decoded view of `token_type`.
    pub fn token_kind(&self) -> Option<Lsp7TokenKind> {
        self.token_type.map(Lsp7TokenKind::from_raw)
    }
}

/// Per-field failures on the LSP7 path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Lsp7FieldErrors {
    pub decimals: Option<ReadError>,
    pub total_supply: Option<ReadError>,
    pub token_name: Option<ReadError>,
    pub token_symbol: Option<ReadError>,
    pub token_type: Option<ReadError>,
    pub metadata: Option<ReadError>,
    pub creators: Option<ReadError>,
}

impl Lsp7FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.decimals.is_none()
            && self.total_supply.is_none()
            && self.token_name.is_none()
            && self.token_symbol.is_none()
            && self.token_type.is_none()
            && self.metadata.is_none()
            && self.creators.is_none()
    }
}

/// One pass's view of a contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenRecord {
    pub chain_id: ChainId,
    pub contract: Address,
    /// `None` means unclassified.
    pub standard: Option<TokenStandard>,
    /// Whether the contract answered the ERC-165 introspection probe.
    pub supports_introspection: bool,
    pub decimals: Option<u8>,
    pub total_supply: Option<U256>,
    /// Present iff the ERC-20 resolver ran.
    pub erc20: Option<Erc20Fields>,
    /// Present iff the LSP7 resolver ran.
    pub lsp7: Option<Lsp7Fields>,
    /// True while a pass is still running for this key.
    pub is_fetching: bool,
    /// Set when probing failed before any resolver could run.
    pub top_level_error: Option<ReadError>,
}

impl TokenRecord {
    /// Blank record for a pass that is about to run.
    pub fn pending(chain_id: ChainId, contract: Address) -> Self {
        Self {
            chain_id,
            contract,
            is_fetching: true,
            ..Self::default()
        }
    }

    /// Record for a pass that failed before any resolver could run.
    pub fn failed(chain_id: ChainId, contract: Address, error: ReadError) -> Self {
        Self {
            chain_id,
            contract,
            top_level_error: Some(error),
            ..Self::default()
        }
    }

    /// Name to display, whichever surface produced one.
    pub fn display_name(&self) -> Option<&str> {
        let lsp7_name = self.lsp7.as_ref().and_then(|f| f.token_name.as_deref());
        let erc20_name = self.erc20.as_ref().and_then(|f| f.name.as_deref());
        match self.standard {
            Some(TokenStandard::Lsp7) => lsp7_name,
            Some(TokenStandard::Erc20) => erc20_name,
            None => lsp7_name.or(erc20_name),
        }
    }

    /// Symbol to display, whichever surface produced one.
    pub fn display_symbol(&self) -> Option<&str> {
        let lsp7_symbol = self.lsp7.as_ref().and_then(|f| f.token_symbol.as_deref());
        let erc20_symbol = self.erc20.as_ref().and_then(|f| f.symbol.as_deref());
        match self.standard {
            Some(TokenStandard::Lsp7) => lsp7_symbol,
            Some(TokenStandard::Erc20) => erc20_symbol,
            None => lsp7_symbol.or(erc20_symbol),
        }
    }

    /// Whole-unit rendering of the total supply, when both parts are known.
    pub fn formatted_supply(&self) -> Option<String> {
        let supply = self.total_supply?;
        let decimals = self.decimals?;
        Some(assay_common::format_units(supply, decimals))
    }

    /// True when either resolver recorded a field-level failure.
    pub fn has_field_errors(&self) -> bool {
        self.erc20.as_ref().is_some_and(|f| !f.errors.is_empty())
            || self.lsp7.as_ref().is_some_and(|f| !f.errors.is_empty())
    }
}
