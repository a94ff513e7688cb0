//! Common EVM helpers for the assay contract inspector.
//!
//! Provides keccak-256 hashing with selector and ERC725Y data-key
//! derivation, address parsing and display formatting, and token amount
//! formatting.

pub mod hash;
pub mod units;

use anyhow::{bail, Context, Result};
use primitive_types::H160;

pub use hash::{keccak256, lsp2_data_key, selector};
pub use units::format_units;

// ===== Address helpers =====

/// Parse a `0x`-prefixed 20-byte hex string into an address.
pub fn parse_address(input: &str) -> Result<H160> {
    let hex_part = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .context("address must start with 0x")?;
    if hex_part.len() != 40 {
        bail!("address must be 40 hex chars, got {}", hex_part.len());
    }
    let bytes = hex::decode(hex_part).context("address is not valid hex")?;
    Ok(H160::from_slice(&bytes))
}

/// EIP-55 mixed-case checksum encoding of an address.
pub fn to_checksum(address: &H160) -> String {
    let hex_addr = hex::encode(address.as_bytes());
    let hash = keccak256(hex_addr.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in hex_addr.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            (hash[i / 2] >> 4) & 0x0f
        } else {
            hash[i / 2] & 0x0f
        };
        if nibble >= 8 {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Truncate an address for display (`0x5aAe...eAed`).
pub fn short_address(address: &H160) -> String {
    let full = to_checksum(address);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
