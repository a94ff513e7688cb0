//! Example: inspecting contracts with a scripted chain reader.
//!
//! Wires a [`TokenInspector`] composition root against the scripted reader
//! from `assay-test-utils`, so the full probe, resolve and aggregate flow
//! runs without a live RPC endpoint:
//! 1. An LSP7 Digital Asset on LUKSO mainnet, found through ERC-165
//! 2. A classic ERC-20 that answers no introspection at all
//! 3. Invalidation bumping the key's generation
//!
//! # Running
//!
//! ```bash
//! cargo run --example inspect_contract
//! ```

use std::sync::Arc;

use anyhow::Result;
use primitive_types::U256;

use assay::{TokenInspector, LUKSO_MAINNET};
use assay_test_utils::MockChainReader;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let lsp7_asset = assay_common::parse_address("0x86e817172b5c07f7036bf8aa46e2db9063743a83")?;
    let erc20_token = assay_common::parse_address("0x2db41674f2b882889e5e1bd09a3f3613952bc472")?;

    // Script the two contracts the way a live chain would answer
    let reader = Arc::new(MockChainReader::new());
    reader.stub_lsp7_token(
        LUKSO_MAINNET,
        lsp7_asset,
        "Chillwhales",
        "CHILL",
        1,
        0,
        U256::from(10_000u64),
    );
    reader.stub_erc20_token(
        LUKSO_MAINNET,
        erc20_token,
        "Wrapped LYX",
        "WLYX",
        18,
        U256::from(1_000_000_000_000_000_000_000u128),
    );

    let inspector = TokenInspector::new(reader);

    for contract in [lsp7_asset, erc20_token] {
        let record = inspector.inspect(LUKSO_MAINNET, contract).await;
        tracing::info!(
            contract = %assay_common::to_checksum(&contract),
            standard = ?record.standard,
            name = record.display_name().unwrap_or("<none>"),
            symbol = record.display_symbol().unwrap_or("<none>"),
            supply = record.formatted_supply().as_deref().unwrap_or("<unknown>"),
            "Inspected contract"
        );
        println!("{}", serde_json::to_string_pretty(&record)?);
    }

    // A metadata change on chain would be picked up by invalidating the key
    inspector.invalidate(LUKSO_MAINNET, lsp7_asset).await;
    tracing::info!(
        contract = %assay_common::short_address(&lsp7_asset),
        generation = inspector.generation(LUKSO_MAINNET, lsp7_asset).await,
        cached = inspector.latest(LUKSO_MAINNET, lsp7_asset).await.is_some(),
        "Invalidated"
    );

    Ok(())
}
