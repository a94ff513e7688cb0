//! Chain naming.

use std::collections::HashMap;

use serde::Deserialize;

use crate::reader::ChainId;

/// LUKSO mainnet chain id.
pub const LUKSO_MAINNET: ChainId = 42;

/// LUKSO testnet chain id.
pub const LUKSO_TESTNET: ChainId = 4201;

/// Human-readable names for the chains the inspector talks to.
///
/// Deserializable so deployments can ship their own map; the default
/// carries the LUKSO networks.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ChainDirectory {
    chains: HashMap<ChainId, String>,
}

impl Default for ChainDirectory {
    fn default() -> Self {
        let mut chains = HashMap::new();
        chains.insert(LUKSO_MAINNET, "LUKSO".to_string());
        chains.insert(LUKSO_TESTNET, "LUKSO Testnet".to_string());
        Self { chains }
    }
}

impl ChainDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or rename a chain.
    pub fn with_chain(mut self, chain_id: ChainId, name: impl Into<String>) -> Self {
        self.chains.insert(chain_id, name.into());
        self
    }

    /// Name for a chain id, falling back to `"unknown chain"`.
    pub fn name_of(&self, chain_id: ChainId) -> &str {
        self.chains
            .get(&chain_id)
            .map_or("unknown chain", String::as_str)
    }
}
