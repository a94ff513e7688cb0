//! Token inspection service.
//!
//! One inspector owns the pass lifecycle for every `(chain, contract)` key:
//! running a pass, deduplicating concurrent requests onto the in-flight
//! one, caching the latest record, and invalidating. Each key carries a
//! generation counter; a pass may only publish while the generation it
//! started under is still current, so results of superseded passes are
//! discarded instead of overwriting newer state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;

use crate::chains::ChainDirectory;
use crate::probe::probe;
use crate::reader::{Address, ChainId, ChainReader};
use crate::record::TokenRecord;
use crate::registry::InterfaceRegistry;
use crate::resolve::{resolve_erc20, resolve_lsp7};

/// Key for one inspected contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct InspectKey {
    chain_id: ChainId,
    contract: Address,
}

/// A pass currently running for a key.
///
/// The watch channel starts with the pending placeholder and receives the
/// finished record exactly once. A cancelled pass drops the sender without
/// publishing, which wakes joiners so they can start over.
struct InflightPass {
    generation: u64,
    cancel: CancellationToken,
    done: watch::Receiver<TokenRecord>,
}

/// Per-key bookkeeping.
#[derive(Default)]
struct KeyState {
    generation: u64,
    latest: Option<TokenRecord>,
    inflight: Option<InflightPass>,
}

/// Detects token standards and aggregates their metadata.
///
/// The inspector is cheap to share behind an `Arc`; all state lives in a
/// per-key map guarded by one async mutex.
pub struct TokenInspector {
    reader: Arc<dyn ChainReader>,
    registry: Arc<InterfaceRegistry>,
    chains: Arc<ChainDirectory>,
    keys: Arc<Mutex<HashMap<InspectKey, KeyState>>>,
}

impl TokenInspector {
    pub fn new(reader: Arc<dyn ChainReader>) -> Self {
        Self {
            reader,
            registry: Arc::new(InterfaceRegistry::default()),
            chains: Arc::new(ChainDirectory::default()),
            keys: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Substitute the interface registry.
    pub fn with_registry(mut self, registry: InterfaceRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Substitute the chain directory.
    pub fn with_chains(mut self, chains: ChainDirectory) -> Self {
        self.chains = Arc::new(chains);
        self
    }

    /// Inspect a contract, joining the in-flight pass if one is running.
    ///
    /// Concurrent calls for the same key share a single batch of reads.
    /// When a pass is invalidated mid-run its joiners transparently start
    /// over at the new generation, so the returned record is always the
    /// product of a pass that was current when it finished.
    pub async fn inspect(&self, chain_id: ChainId, contract: Address) -> TokenRecord {
        let key = InspectKey { chain_id, contract };
        loop {
            let mut done = {
                let mut keys = self.keys.lock().await;
                let state = keys.entry(key).or_default();
                if let Some(pass) = &state.inflight {
                    pass.done.clone()
                } else {
                    let pass = self.spawn_pass(key, state.generation);
                    let done = pass.done.clone();
                    state.latest = Some(TokenRecord::pending(chain_id, contract));
                    state.inflight = Some(pass);
                    done
                }
            };

            // Bound so the watch read guard drops before `done` does
            let settled = done.wait_for(|record| !record.is_fetching).await;
            match settled {
                Ok(record) => return record.clone(),
                // The pass was cancelled and never published; go again
                Err(_) => continue,
            }
        }
    }

    /// Latest known record for a key, including the pending placeholder of
    /// a pass still running. `None` when the key was never inspected or
    /// has been invalidated.
    pub async fn latest(&self, chain_id: ChainId, contract: Address) -> Option<TokenRecord> {
        let keys = self.keys.lock().await;
        keys.get(&InspectKey { chain_id, contract })
            .and_then(|state| state.latest.clone())
    }

    /// Drop a key's cached record and cancel its in-flight pass.
    ///
    /// Bumps the key's generation so a pass that already ran past its
    /// cancellation checks still cannot publish.
    pub async fn invalidate(&self, chain_id: ChainId, contract: Address) {
        let key = InspectKey { chain_id, contract };
        let mut keys = self.keys.lock().await;
        let Some(state) = keys.get_mut(&key) else {
            return;
        };
        state.generation += 1;
        state.latest = None;
        if let Some(pass) = state.inflight.take() {
            pass.cancel.cancel();
            tracing::debug!(
                target: "assay::inspector",
                contract = %assay_common::to_checksum(&contract),
                chain = self.chains.name_of(chain_id),
                generation = pass.generation,
                "Cancelled in-flight pass"
            );
        }
    }

    /// Current generation for a key. Starts at zero and bumps on every
    /// invalidation.
    pub async fn generation(&self, chain_id: ChainId, contract: Address) -> u64 {
        let keys = self.keys.lock().await;
        keys.get(&InspectKey { chain_id, contract })
            .map_or(0, |state| state.generation)
    }

    fn spawn_pass(&self, key: InspectKey, generation: u64) -> InflightPass {
        let (tx, rx) = watch::channel(TokenRecord::pending(key.chain_id, key.contract));
        let cancel = CancellationToken::new();

        let reader = self.reader.clone();
        let registry = self.registry.clone();
        let chains = self.chains.clone();
        let keys = self.keys.clone();
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            let record = run_pass(&*reader, &registry, &chains, key, &task_cancel).await;

            let Some(record) = record else {
                tracing::debug!(
                    target: "assay::inspector",
                    contract = %assay_common::to_checksum(&key.contract),
                    chain = chains.name_of(key.chain_id),
                    generation,
                    "Pass cancelled before completion"
                );
                return;
            };

            let mut keys = keys.lock().await;
            let state = keys.entry(key).or_default();
            if state.generation == generation {
                state.latest = Some(record.clone());
                state.inflight = None;
                let _ = tx.send(record);
            } else {
                tracing::debug!(
                    target: "assay::inspector",
                    contract = %assay_common::to_checksum(&key.contract),
                    chain = chains.name_of(key.chain_id),
                    generation,
                    current = state.generation,
                    "Discarding stale pass result"
                );
            }
        });

        InflightPass {
            generation,
            cancel,
            done: rx,
        }
    }
}

/// Execute one pass: probe, branch, resolve, merge.
///
/// Returns `None` when the pass notices cancellation between stages.
async fn run_pass(
    reader: &dyn ChainReader,
    registry: &InterfaceRegistry,
    chains: &ChainDirectory,
    key: InspectKey,
    cancel: &CancellationToken,
) -> Option<TokenRecord> {
    let InspectKey { chain_id, contract } = key;

    tracing::debug!(
        target: "assay::inspector",
        contract = %assay_common::to_checksum(&contract),
        chain = chains.name_of(chain_id),
        "Inspecting contract"
    );

    let probed = match probe(reader, registry, chain_id, contract).await {
        Ok(probed) => probed,
        Err(e) => {
            tracing::warn!(
                target: "assay::inspector",
                contract = %assay_common::to_checksum(&contract),
                chain = chains.name_of(chain_id),
                error = %e,
                "Probing failed, contract left unclassified"
            );
            return Some(TokenRecord::failed(chain_id, contract, e));
        }
    };

    if cancel.is_cancelled() {
        return None;
    }

    let resolution = if probed.is_lsp7() {
        resolve_lsp7(reader, registry, chain_id, contract).await
    } else {
        // ERC-20 is the universal fallback, probed flag or not
        resolve_erc20(reader, registry, chain_id, contract).await
    };

    if cancel.is_cancelled() {
        return None;
    }

    Some(TokenRecord {
        chain_id,
        contract,
        standard: resolution.standard,
        supports_introspection: probed.supports_introspection,
        decimals: resolution.decimals,
        total_supply: resolution.total_supply,
        erc20: resolution.erc20,
        lsp7: resolution.lsp7,
        is_fetching: false,
        top_level_error: None,
    })
}

