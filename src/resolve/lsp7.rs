//! LSP7 resolver.
//!
//! Seven reads make up the LSP7 surface: `decimals()` and `totalSupply()`
//! as plain calls, plus the five LSP4 schema keys (name, symbol, token
//! type, metadata document, creators list) through the contract's ERC725Y
//! store. All seven must fulfill for the contract to classify. A key that
//! fulfills unset is still a clean read; the raw token type value is kept
//! lossless so unknown extensions survive aggregation.

use crate::reader::{Address, CallValue, ChainId, ChainReader};
use crate::record::{Lsp7FieldErrors, Lsp7Fields, TokenStandard};
use crate::registry::InterfaceRegistry;
use crate::resolve::Resolution;
use crate::settle::settle_all;

/// Resolve a contract over the LSP7 surface.
pub async fn resolve_lsp7(
    reader: &dyn ChainReader,
    registry: &InterfaceRegistry,
    chain_id: ChainId,
    contract: Address,
) -> Resolution {
    let [decimals, total_supply, token_name, token_symbol, token_type, metadata, creators] =
        settle_all([
            reader.call_contract(chain_id, contract, &registry.decimals, &[]),
            reader.call_contract(chain_id, contract, &registry.total_supply, &[]),
            reader.fetch_schema_key(chain_id, contract, &registry.lsp4_token_name),
            reader.fetch_schema_key(chain_id, contract, &registry.lsp4_token_symbol),
            reader.fetch_schema_key(chain_id, contract, &registry.lsp4_token_type),
            reader.fetch_schema_key(chain_id, contract, &registry.lsp4_metadata),
            reader.fetch_schema_key(chain_id, contract, &registry.lsp4_creators),
        ])
        .await;

    let decimals = decimals.and_then(CallValue::into_decimals);
    let total_supply = total_supply.and_then(CallValue::into_uint);
    let token_name = token_name.and_then(CallValue::into_text);
    let token_symbol = token_symbol.and_then(CallValue::into_text);
    let token_type = token_type.and_then(CallValue::into_uint_or_null);
    let metadata = metadata.and_then(CallValue::into_json);
    let creators = creators.and_then(CallValue::into_address_list);

    let classified = decimals.is_ok()
        && total_supply.is_ok()
        && token_name.is_ok()
        && token_symbol.is_ok()
        && token_type.is_ok()
        && metadata.is_ok()
        && creators.is_ok();

    let errors = Lsp7FieldErrors {
        decimals: decimals.as_ref().err().cloned(),
        total_supply: total_supply.as_ref().err().cloned(),
        token_name: token_name.as_ref().err().cloned(),
        token_symbol: token_symbol.as_ref().err().cloned(),
        token_type: token_type.as_ref().err().cloned(),
        metadata: metadata.as_ref().err().cloned(),
        creators: creators.as_ref().err().cloned(),
    };
    if !errors.is_empty() {
        tracing::debug!(
            target: "assay::resolve::lsp7",
            contract = %assay_common::to_checksum(&contract),
            chain_id,
            ?errors,
            "Some LSP7 reads failed"
        );
    }

    let fields = Lsp7Fields {
        token_name: token_name.ok().flatten(),
        token_symbol: token_symbol.ok().flatten(),
        token_type: token_type.ok().flatten(),
        metadata: metadata.ok().flatten(),
        creators: creators.ok().flatten(),
        errors,
    };

    let standard = classified.then_some(TokenStandard::Lsp7);
    if standard.is_some() {
        tracing::debug!(
            target: "assay::resolve::lsp7",
            contract = %assay_common::to_checksum(&contract),
            chain_id,
            name = fields.token_name.as_deref().unwrap_or(""),
            token_type = ?fields.token_type,
            "Classified as LSP7"
        );
    }

    Resolution {
        standard,
        decimals: decimals.ok(),
        total_supply: total_supply.ok(),
        erc20: None,
        lsp7: Some(fields),
    }
}

