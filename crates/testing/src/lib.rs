//! Test utilities for the assay inspector.
//!
//! [`MockChainReader`] scripts per-contract answers for view calls,
//! `supportsInterface` probes, and schema-key reads, counts every read it
//! serves, and can delay answers to let tests race passes against
//! invalidation. Anything not scripted answers `Unsupported`, which is how
//! a contract without the function looks through a real transport.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use primitive_types::U256;
use serde_json::json;

use assay::registry::{ERC165_INTERFACE_ID, LSP7_INTERFACE_ID};
use assay::{
    Address, CallArg, CallValue, ChainId, ChainReader, FieldResult, FunctionSig, ReadError,
    SchemaKey,
};

type ReadKey = (ChainId, Address, String);

/// A scripted [`ChainReader`].
///
/// Reads are keyed by canonical signature (`decimals()`), by schema key
/// name (`LSP4TokenName`), and for interface probes by signature plus the
/// probed id (`supportsInterface(bytes4):c52d6008`), matching the default
/// registry's canonical forms.
pub struct MockChainReader {
    responses: Mutex<HashMap<ReadKey, FieldResult<CallValue>>>,
    unreachable: Mutex<HashSet<(ChainId, Address)>>,
    counts: Mutex<HashMap<ReadKey, u32>>,
    latency: Mutex<Option<Duration>>,
}

impl MockChainReader {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            unreachable: Mutex::new(HashSet::new()),
            counts: Mutex::new(HashMap::new()),
            latency: Mutex::new(None),
        }
    }

    /// Script a plain view call by canonical signature.
    pub fn stub_call(
        &self,
        chain_id: ChainId,
        contract: Address,
        signature: &str,
        outcome: FieldResult<CallValue>,
    ) {
        self.responses
            .lock()
            .unwrap()
            .insert((chain_id, contract, signature.to_string()), outcome);
    }

    /// Script a schema-key read by LSP2 key name.
    pub fn stub_schema(
        &self,
        chain_id: ChainId,
        contract: Address,
        key_name: &str,
        outcome: FieldResult<CallValue>,
    ) {
        self.responses
            .lock()
            .unwrap()
            .insert((chain_id, contract, key_name.to_string()), outcome);
    }

    /// Script the answer to a single `supportsInterface` probe.
    pub fn stub_interface_answer(
        &self,
        chain_id: ChainId,
        contract: Address,
        interface_id: [u8; 4],
        outcome: FieldResult<CallValue>,
    ) {
        let key = format!("supportsInterface(bytes4):{}", hex::encode(interface_id));
        self.responses
            .lock()
            .unwrap()
            .insert((chain_id, contract, key), outcome);
    }

    /// Make the contract introspectable, answering true for the given ids.
    ///
    /// Probes for any other id fall back to the unscripted default, which
    /// the prober treats as "interface absent".
    pub fn stub_introspection(
        &self,
        chain_id: ChainId,
        contract: Address,
        supported: &[[u8; 4]],
    ) {
        self.stub_interface_answer(
            chain_id,
            contract,
            ERC165_INTERFACE_ID,
            Ok(CallValue::Bool(true)),
        );
        for id in supported {
            self.stub_interface_answer(chain_id, contract, *id, Ok(CallValue::Bool(true)));
        }
    }

    /// Fail every read against this contract with a transport error.
    pub fn stub_transport_failure(&self, chain_id: ChainId, contract: Address) {
        self.unreachable.lock().unwrap().insert((chain_id, contract));
    }

    /// Script a contract that answers the classic ERC-20 surface and
    /// nothing else (in particular, no introspection).
    pub fn stub_erc20_token(
        &self,
        chain_id: ChainId,
        contract: Address,
        name: &str,
        symbol: &str,
        decimals: u8,
        total_supply: U256,
    ) {
        self.stub_call(
            chain_id,
            contract,
            "decimals()",
            Ok(CallValue::Uint(U256::from(decimals))),
        );
        self.stub_call(
            chain_id,
            contract,
            "totalSupply()",
            Ok(CallValue::Uint(total_supply)),
        );
        self.stub_call(
            chain_id,
            contract,
            "name()",
            Ok(CallValue::Text(name.to_string())),
        );
        self.stub_call(
            chain_id,
            contract,
            "symbol()",
            Ok(CallValue::Text(symbol.to_string())),
        );
    }

    /// Script a fully populated LSP7 asset, introspection included.
    pub fn stub_lsp7_token(
        &self,
        chain_id: ChainId,
        contract: Address,
        name: &str,
        symbol: &str,
        token_type: u64,
        decimals: u8,
        total_supply: U256,
    ) {
        self.stub_introspection(chain_id, contract, &[LSP7_INTERFACE_ID]);
        self.stub_call(
            chain_id,
            contract,
            "decimals()",
            Ok(CallValue::Uint(U256::from(decimals))),
        );
        self.stub_call(
            chain_id,
            contract,
            "totalSupply()",
            Ok(CallValue::Uint(total_supply)),
        );
        self.stub_schema(
            chain_id,
            contract,
            "LSP4TokenName",
            Ok(CallValue::Text(name.to_string())),
        );
        self.stub_schema(
            chain_id,
            contract,
            "LSP4TokenSymbol",
            Ok(CallValue::Text(symbol.to_string())),
        );
        self.stub_schema(
            chain_id,
            contract,
            "LSP4TokenType",
            Ok(CallValue::Uint(U256::from(token_type))),
        );
        self.stub_schema(
            chain_id,
            contract,
            "LSP4Metadata",
            Ok(CallValue::Json(json!({
                "LSP4Metadata": { "description": format!("{name} test asset"), "links": [] }
            }))),
        );
        self.stub_schema(
            chain_id,
            contract,
            "LSP4Creators[]",
            Ok(CallValue::AddressList(vec![Address::repeat_byte(0xc0)])),
        );
    }

    /// Delay every read, for tests that race passes against invalidation.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    /// How many times a read was served, keyed the same way stubs are.
    pub fn read_count(&self, chain_id: ChainId, contract: Address, read: &str) -> u32 {
        self.counts
            .lock()
            .unwrap()
            .get(&(chain_id, contract, read.to_string()))
            .copied()
            .unwrap_or(0)
    }

    async fn read(
        &self,
        chain_id: ChainId,
        contract: Address,
        key: String,
    ) -> FieldResult<CallValue> {
        let latency = *self.latency.lock().unwrap();
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }

        *self
            .counts
            .lock()
            .unwrap()
            .entry((chain_id, contract, key.clone()))
            .or_insert(0) += 1;

        if self.unreachable.lock().unwrap().contains(&(chain_id, contract)) {
            return Err(ReadError::Transport("connection refused".to_string()));
        }

        self.responses
            .lock()
            .unwrap()
            .get(&(chain_id, contract, key))
            .cloned()
            .unwrap_or(Err(ReadError::Unsupported))
    }
}

impl Default for MockChainReader {
    fn default() -> Self {
        Self::new()
    }
}

fn call_key(function: &FunctionSig, args: &[CallArg]) -> String {
    match args.first() {
        Some(CallArg::InterfaceId(id)) => format!("{}:{}", function.signature, hex::encode(id)),
        _ => function.signature.clone(),
    }
}

#[async_trait]
impl ChainReader for MockChainReader {
    async fn call_contract(
        &self,
        chain_id: ChainId,
        contract: Address,
        function: &FunctionSig,
        args: &[CallArg],
    ) -> FieldResult<CallValue> {
        self.read(chain_id, contract, call_key(function, args)).await
    }

    async fn fetch_schema_key(
        &self,
        chain_id: ChainId,
        contract: Address,
        key: &SchemaKey,
    ) -> FieldResult<CallValue> {
        self.read(chain_id, contract, key.name.clone()).await
    }
}
