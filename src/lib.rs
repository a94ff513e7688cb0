//! Assay - Token standard detection and metadata aggregation.
//!
//! Given a contract address and a chain id, the [`TokenInspector`] probes
//! ERC-165 introspection, distinguishes LSP7 Digital Assets (current and
//! legacy interface ids) from classic ERC-20 tokens, fans out the field
//! reads of the matched standard, and aggregates everything into a
//! [`TokenRecord`]. Classification is all-or-nothing while field data is
//! best-effort, so callers always see as much as could be read even when a
//! contract does not fully satisfy a standard.
//!
//! Chain access goes through the [`ChainReader`] trait; the inspector
//! never speaks a wire protocol itself. Concurrent inspections of the same
//! `(chain, contract)` key share one in-flight pass, and
//! [`TokenInspector::invalidate`] cancels and supersedes a running pass.

pub mod chains;
pub mod inspector;
pub mod probe;
pub mod reader;
pub mod record;
pub mod registry;
pub mod resolve;
pub mod settle;

// Re-export commonly used types for reader implementors and callers
pub use async_trait::async_trait;

pub use chains::{ChainDirectory, LUKSO_MAINNET, LUKSO_TESTNET};
pub use inspector::TokenInspector;
pub use probe::{probe, Lsp7InterfaceFlags, ProbeResult};
pub use reader::{
    Address, CallArg, CallValue, ChainId, ChainReader, FieldResult, FunctionSig, ReadError,
    SchemaKey,
};
pub use record::{
    Erc20FieldErrors, Erc20Fields, Lsp7FieldErrors, Lsp7Fields, Lsp7TokenKind, TokenRecord,
    TokenStandard,
};
pub use registry::{InterfaceIds, InterfaceRegistry};
pub use settle::settle_all;
