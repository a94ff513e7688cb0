//! Capability probing via ERC-165 introspection.
//!
//! A probe is the first stage of every pass: one gate call to
//! `supportsInterface` with the ERC-165 id itself, then four parallel
//! probes for the interfaces the inspector can resolve. Contracts that
//! revert, lack the function, or answer with a non-boolean are simply not
//! introspectable; only transport failures abort, since nothing can be
//! concluded about a contract when the chain is unreachable.

use futures::FutureExt;
use serde::Serialize;

use crate::reader::{Address, CallArg, ChainId, ChainReader, FieldResult};
use crate::registry::InterfaceRegistry;
use crate::settle::settle_all;

/// Which LSP7 interface versions a contract claims.
///
/// The interface id changed across contract releases, so a probe checks the
/// current id and the two historical ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Lsp7InterfaceFlags {
    pub current: bool,
    pub v0_14_0: bool,
    pub v0_12_0: bool,
}

/// What capability probing learned about a contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    /// Whether the contract answered ERC-165 introspection at all.
    pub supports_introspection: bool,
    pub lsp7: Lsp7InterfaceFlags,
    pub erc20_interface: bool,
}

impl ProbeResult {
    /// True when any LSP7 interface version matched.
    pub fn is_lsp7(&self) -> bool {
        self.lsp7.current || self.lsp7.v0_14_0 || self.lsp7.v0_12_0
    }
}

/// Probe a contract's capabilities.
///
/// Returns a result with every flag false for contracts that do not answer
/// introspection; the caller falls through to the ERC-20 path for those.
pub async fn probe(
    reader: &dyn ChainReader,
    registry: &InterfaceRegistry,
    chain_id: ChainId,
    contract: Address,
) -> FieldResult<ProbeResult> {
    let ids = &registry.interface_ids;

    let introspectable =
        probe_interface(reader, registry, chain_id, contract, ids.erc165).await?;
    if !introspectable {
        tracing::debug!(
            target: "assay::probe",
            contract = %assay_common::to_checksum(&contract),
            chain_id,
            "Contract does not answer ERC-165 introspection"
        );
        return Ok(ProbeResult::default());
    }

    let [current, v0_14_0, v0_12_0, erc20_interface] = settle_all([
        probe_interface(reader, registry, chain_id, contract, ids.lsp7_current).boxed(),
        probe_interface(reader, registry, chain_id, contract, ids.lsp7_v0_14_0).boxed(),
        probe_interface(reader, registry, chain_id, contract, ids.lsp7_v0_12_0).boxed(),
        probe_interface(reader, registry, chain_id, contract, ids.erc20).boxed(),
    ])
    .await;

    let result = ProbeResult {
        supports_introspection: true,
        lsp7: Lsp7InterfaceFlags {
            current: current?,
            v0_14_0: v0_14_0?,
            v0_12_0: v0_12_0?,
        },
        erc20_interface: erc20_interface?,
    };

    tracing::debug!(
        target: "assay::probe",
        contract = %assay_common::to_checksum(&contract),
        chain_id,
        is_lsp7 = result.is_lsp7(),
        erc20_interface = result.erc20_interface,
        "Probed contract interfaces"
    );

    Ok(result)
}

/// Ask `supportsInterface(id)`, mapping negative signals to `false`.
async fn probe_interface(
    reader: &dyn ChainReader,
    registry: &InterfaceRegistry,
    chain_id: ChainId,
    contract: Address,
    interface_id: [u8; 4],
) -> FieldResult<bool> {
    let outcome = reader
        .call_contract(
            chain_id,
            contract,
            &registry.supports_interface,
            &[CallArg::InterfaceId(interface_id)],
        )
        .await;

    match outcome {
        Ok(value) => match value.into_bool() {
            Ok(supported) => Ok(supported),
            Err(e) => {
                tracing::debug!(
                    target: "assay::probe",
                    contract = %assay_common::to_checksum(&contract),
                    interface_id = %hex::encode(interface_id),
                    error = %e,
                    "Probe answered with a non-boolean, treating as unsupported"
                );
                Ok(false)
            }
        },
        Err(e) if e.is_negative_signal() => {
            tracing::trace!(
                target: "assay::probe",
                contract = %assay_common::to_checksum(&contract),
                interface_id = %hex::encode(interface_id),
                "Interface probe answered negative"
            );
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
