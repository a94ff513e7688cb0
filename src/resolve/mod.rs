//! Standard-specific field resolvers.
//!
//! Exactly one resolver runs per pass, picked from the probe outcome: any
//! LSP7 interface flag routes to the LSP7 resolver, everything else falls
//! through to ERC-20. Each resolver settles its whole batch of reads,
//! records per-field failures, and decides classification all-or-nothing.

pub mod erc20;
pub mod lsp7;

use primitive_types::U256;

use crate::record::{Erc20Fields, Lsp7Fields, TokenStandard};

pub use erc20::resolve_erc20;
pub use lsp7::resolve_lsp7;

/// What a resolver contributes to the final record.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Set only when every required field of the standard fetched cleanly.
    pub standard: Option<TokenStandard>,
    pub decimals: Option<u8>,
    pub total_supply: Option<U256>,
    pub erc20: Option<Erc20Fields>,
    pub lsp7: Option<Lsp7Fields>,
}
