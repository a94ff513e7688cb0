//! Interface and schema registry.
//!
//! One explicit bundle of everything the inspector asks a contract about:
//! ERC-165 interface ids, view-function signatures, and LSP4 schema keys.
//! The registry is built once by the composition root and passed by
//! reference, so tests and alternate deployments can substitute their own
//! ids and keys instead of relying on module-level singletons.

use crate::reader::{FunctionSig, SchemaKey};

/// ERC-165 `supportsInterface` interface id.
pub const ERC165_INTERFACE_ID: [u8; 4] = [0x01, 0xff, 0xc9, 0xa7];

/// LSP7 Digital Asset interface id (current release).
pub const LSP7_INTERFACE_ID: [u8; 4] = [0xc5, 0x2d, 0x60, 0x08];

/// LSP7 interface id shipped with v0.14.0 contracts.
pub const LSP7_INTERFACE_ID_V0_14_0: [u8; 4] = [0xb3, 0xc4, 0x92, 0x8f];

/// LSP7 interface id shipped with v0.12.0 contracts.
pub const LSP7_INTERFACE_ID_V0_12_0: [u8; 4] = [0xda, 0x1f, 0x85, 0xe4];

/// ERC-20 interface id (XOR of the standard's function selectors).
pub const ERC20_INTERFACE_ID: [u8; 4] = [0x36, 0x37, 0x2b, 0x07];

/// The interface ids probed during capability detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceIds {
    pub erc165: [u8; 4],
    pub lsp7_current: [u8; 4],
    pub lsp7_v0_14_0: [u8; 4],
    pub lsp7_v0_12_0: [u8; 4],
    pub erc20: [u8; 4],
}

impl Default for InterfaceIds {
    fn default() -> Self {
        Self {
            erc165: ERC165_INTERFACE_ID,
            lsp7_current: LSP7_INTERFACE_ID,
            lsp7_v0_14_0: LSP7_INTERFACE_ID_V0_14_0,
            lsp7_v0_12_0: LSP7_INTERFACE_ID_V0_12_0,
            erc20: ERC20_INTERFACE_ID,
        }
    }
}

/// Everything the inspector reads from a contract, resolved up front.
///
/// Selectors and data keys are derived once at construction; nothing in the
/// hot path hashes signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRegistry {
    pub interface_ids: InterfaceIds,

    pub supports_interface: FunctionSig,
    pub decimals: FunctionSig,
    pub total_supply: FunctionSig,
    pub name: FunctionSig,
    pub symbol: FunctionSig,

    pub lsp4_token_name: SchemaKey,
    pub lsp4_token_symbol: SchemaKey,
    pub lsp4_token_type: SchemaKey,
    pub lsp4_metadata: SchemaKey,
    pub lsp4_creators: SchemaKey,
}

impl InterfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the probed interface ids, keeping functions and keys.
    pub fn with_interface_ids(mut self, ids: InterfaceIds) -> Self {
        self.interface_ids = ids;
        self
    }
}

impl Default for InterfaceRegistry {
    fn default() -> Self {
        Self {
            interface_ids: InterfaceIds::default(),
            supports_interface: FunctionSig::new("supportsInterface(bytes4)"),
            decimals: FunctionSig::new("decimals()"),
            total_supply: FunctionSig::new("totalSupply()"),
            name: FunctionSig::new("name()"),
            symbol: FunctionSig::new("symbol()"),
            lsp4_token_name: SchemaKey::new("LSP4TokenName"),
            lsp4_token_symbol: SchemaKey::new("LSP4TokenSymbol"),
            lsp4_token_type: SchemaKey::new("LSP4TokenType"),
            lsp4_metadata: SchemaKey::new("LSP4Metadata"),
            lsp4_creators: SchemaKey::new("LSP4Creators[]"),
        }
    }
}
