//! ERC-20 resolver.
//!
//! Four view calls make up the ERC-20 surface: `decimals()`,
//! `totalSupply()`, `name()`, `symbol()`. All four must fulfill for the
//! contract to classify. Many pre-metadata contracts return empty strings
//! for name or symbol; those still classify, the field is just absent.

use crate::reader::{Address, CallValue, ChainId, ChainReader};
use crate::record::{Erc20FieldErrors, Erc20Fields, TokenStandard};
use crate::registry::InterfaceRegistry;
use crate::resolve::Resolution;
use crate::settle::settle_all;

/// Resolve a contract over the ERC-20 surface.
pub async fn resolve_erc20(
    reader: &dyn ChainReader,
    registry: &InterfaceRegistry,
    chain_id: ChainId,
    contract: Address,
) -> Resolution {
    let [decimals, total_supply, name, symbol] = settle_all([
        reader.call_contract(chain_id, contract, &registry.decimals, &[]),
        reader.call_contract(chain_id, contract, &registry.total_supply, &[]),
        reader.call_contract(chain_id, contract, &registry.name, &[]),
        reader.call_contract(chain_id, contract, &registry.symbol, &[]),
    ])
    .await;

    let decimals = decimals.and_then(CallValue::into_decimals);
    let total_supply = total_supply.and_then(CallValue::into_uint);
    let name = name.and_then(CallValue::into_text);
    let symbol = symbol.and_then(CallValue::into_text);

    let classified =
        decimals.is_ok() && total_supply.is_ok() && name.is_ok() && symbol.is_ok();

    let errors = Erc20FieldErrors {
        decimals: decimals.as_ref().err().cloned(),
        total_supply: total_supply.as_ref().err().cloned(),
        name: name.as_ref().err().cloned(),
        symbol: symbol.as_ref().err().cloned(),
    };
    if !errors.is_empty() {
        tracing::debug!(
            target: "assay::resolve::erc20",
            contract = %assay_common::to_checksum(&contract),
            chain_id,
            ?errors,
            "Some ERC-20 reads failed"
        );
    }

    let fields = Erc20Fields {
        // Empty strings are how absent metadata shows up on this surface
        name: name.ok().flatten().filter(|s| !s.is_empty()),
        symbol: symbol.ok().flatten().filter(|s| !s.is_empty()),
        errors,
    };

    let standard = classified.then_some(TokenStandard::Erc20);
    if standard.is_some() {
        tracing::debug!(
            target: "assay::resolve::erc20",
            contract = %assay_common::to_checksum(&contract),
            chain_id,
            name = fields.name.as_deref().unwrap_or(""),
            symbol = fields.symbol.as_deref().unwrap_or(""),
            "Classified as ERC-20"
        );
    }

    Resolution {
        standard,
        decimals: decimals.ok(),
        total_supply: total_supply.ok(),
        erc20: Some(fields),
        lsp7: None,
    }
}

