use primitive_types::U256;

use assay::resolve::{resolve_erc20, resolve_lsp7};
use assay::{
    Address, CallValue, ChainId, InterfaceRegistry, Lsp7TokenKind, ReadError, TokenStandard,
};
use assay_test_utils::MockChainReader;

const CHAIN: ChainId = 42;

fn erc20_contract() -> Address {
    Address::repeat_byte(0x22)
}

fn lsp7_contract() -> Address {
    Address::repeat_byte(0x33)
}

#[tokio::test]
async fn test_resolves_full_erc20() {
    let reader = MockChainReader::new();
    reader.stub_erc20_token(
        CHAIN,
        erc20_contract(),
        "Wrapped Ether",
        "WETH",
        18,
        U256::from(1_000_000u64),
    );
    let registry = InterfaceRegistry::default();

    let resolution = resolve_erc20(&reader, &registry, CHAIN, erc20_contract()).await;

    assert_eq!(resolution.standard, Some(TokenStandard::Erc20));
    assert_eq!(resolution.decimals, Some(18));
    assert_eq!(resolution.total_supply, Some(U256::from(1_000_000u64)));
    let fields = resolution.erc20.unwrap();
    assert_eq!(fields.name.as_deref(), Some("Wrapped Ether"));
    assert_eq!(fields.symbol.as_deref(), Some("WETH"));
    assert!(fields.errors.is_empty());
    assert!(resolution.lsp7.is_none());
}

#[tokio::test]
async fn test_empty_name_still_classifies() {
    let reader = MockChainReader::new();
    reader.stub_erc20_token(CHAIN, erc20_contract(), "", "OLD", 8, U256::from(21_000u64));
    let registry = InterfaceRegistry::default();

    let resolution = resolve_erc20(&reader, &registry, CHAIN, erc20_contract()).await;

    // The read fulfilled, so the gate passes; the empty value is absent
    assert_eq!(resolution.standard, Some(TokenStandard::Erc20));
    let fields = resolution.erc20.unwrap();
    assert_eq!(fields.name, None);
    assert_eq!(fields.symbol.as_deref(), Some("OLD"));
}

#[tokio::test]
async fn test_rejected_field_blocks_classification() {
    let reader = MockChainReader::new();
    reader.stub_erc20_token(CHAIN, erc20_contract(), "Token", "TOK", 18, U256::from(9u64));
    reader.stub_call(CHAIN, erc20_contract(), "symbol()", Err(ReadError::Reverted));
    let registry = InterfaceRegistry::default();

    let resolution = resolve_erc20(&reader, &registry, CHAIN, erc20_contract()).await;

    assert_eq!(resolution.standard, None);
    // Everything that did fetch is still populated
    assert_eq!(resolution.decimals, Some(18));
    assert_eq!(resolution.total_supply, Some(U256::from(9u64)));
    let fields = resolution.erc20.unwrap();
    assert_eq!(fields.name.as_deref(), Some("Token"));
    assert_eq!(fields.symbol, None);
    assert_eq!(fields.errors.symbol, Some(ReadError::Reverted));
    assert_eq!(fields.errors.name, None);
}

#[tokio::test]
async fn test_oversized_decimals_is_a_shape_failure() {
    let reader = MockChainReader::new();
    reader.stub_erc20_token(CHAIN, erc20_contract(), "Token", "TOK", 18, U256::from(9u64));
    reader.stub_call(
        CHAIN,
        erc20_contract(),
        "decimals()",
        Ok(CallValue::Uint(U256::from(300u64))),
    );
    let registry = InterfaceRegistry::default();

    let resolution = resolve_erc20(&reader, &registry, CHAIN, erc20_contract()).await;

    assert_eq!(resolution.standard, None);
    assert_eq!(resolution.decimals, None);
    let fields = resolution.erc20.unwrap();
    assert!(matches!(fields.errors.decimals, Some(ReadError::Shape { .. })));
}

#[tokio::test]
async fn test_resolves_full_lsp7() {
    let reader = MockChainReader::new();
    reader.stub_lsp7_token(
        CHAIN,
        lsp7_contract(),
        "Chillwhale",
        "CHILL",
        0,
        18,
        U256::from(5_000u64),
    );
    let registry = InterfaceRegistry::default();

    let resolution = resolve_lsp7(&reader, &registry, CHAIN, lsp7_contract()).await;

    assert_eq!(resolution.standard, Some(TokenStandard::Lsp7));
    assert_eq!(resolution.decimals, Some(18));
    assert_eq!(resolution.total_supply, Some(U256::from(5_000u64)));
    let fields = resolution.lsp7.unwrap();
    assert_eq!(fields.token_name.as_deref(), Some("Chillwhale"));
    assert_eq!(fields.token_symbol.as_deref(), Some("CHILL"));
    assert_eq!(fields.token_kind(), Some(Lsp7TokenKind::Token));
    assert!(fields.metadata.is_some());
    assert!(fields.errors.is_empty());
    assert!(resolution.erc20.is_none());
}

#[tokio::test]
async fn test_one_failed_read_blocks_classification_but_keeps_fields() {
    let reader = MockChainReader::new();
    reader.stub_lsp7_token(CHAIN, lsp7_contract(), "Asset", "AST", 0, 18, U256::from(7u64));
    reader.stub_schema(CHAIN, lsp7_contract(), "LSP4Creators[]", Err(ReadError::Reverted));
    let registry = InterfaceRegistry::default();

    let resolution = resolve_lsp7(&reader, &registry, CHAIN, lsp7_contract()).await;

    assert_eq!(resolution.standard, None);
    assert_eq!(resolution.decimals, Some(18));
    assert_eq!(resolution.total_supply, Some(U256::from(7u64)));
    let fields = resolution.lsp7.unwrap();
    assert_eq!(fields.token_name.as_deref(), Some("Asset"));
    assert_eq!(fields.token_symbol.as_deref(), Some("AST"));
    assert!(fields.metadata.is_some());
    assert_eq!(fields.creators, None);
    assert_eq!(fields.errors.creators, Some(ReadError::Reverted));
    assert_eq!(fields.errors.token_name, None);
}

#[tokio::test]
async fn test_unset_token_type_still_classifies() {
    let reader = MockChainReader::new();
    reader.stub_lsp7_token(CHAIN, lsp7_contract(), "Asset", "AST", 0, 18, U256::from(7u64));
    reader.stub_schema(CHAIN, lsp7_contract(), "LSP4TokenType", Ok(CallValue::Null));
    let registry = InterfaceRegistry::default();

    let resolution = resolve_lsp7(&reader, &registry, CHAIN, lsp7_contract()).await;

    assert_eq!(resolution.standard, Some(TokenStandard::Lsp7));
    let fields = resolution.lsp7.unwrap();
    assert_eq!(fields.token_type, None);
    assert_eq!(fields.token_kind(), None);
}

#[tokio::test]
async fn test_unknown_token_type_is_preserved_lossless() {
    let reader = MockChainReader::new();
    reader.stub_lsp7_token(CHAIN, lsp7_contract(), "Odd", "ODD", 5, 0, U256::from(1u64));
    let registry = InterfaceRegistry::default();

    let resolution = resolve_lsp7(&reader, &registry, CHAIN, lsp7_contract()).await;

    assert_eq!(resolution.standard, Some(TokenStandard::Lsp7));
    let fields = resolution.lsp7.unwrap();
    assert_eq!(fields.token_type, Some(U256::from(5u64)));
    assert_eq!(fields.token_kind(), Some(Lsp7TokenKind::Custom(U256::from(5u64))));
}

#[tokio::test]
async fn test_empty_schema_strings_are_kept_verbatim() {
    let reader = MockChainReader::new();
    reader.stub_lsp7_token(CHAIN, lsp7_contract(), "", "AST", 0, 18, U256::from(7u64));
    let registry = InterfaceRegistry::default();

    let resolution = resolve_lsp7(&reader, &registry, CHAIN, lsp7_contract()).await;

    // Unlike the ERC-20 surface, schema reads keep empty strings as-is
    assert_eq!(resolution.standard, Some(TokenStandard::Lsp7));
    let fields = resolution.lsp7.unwrap();
    assert_eq!(fields.token_name.as_deref(), Some(""));
}

#[tokio::test]
async fn test_malformed_metadata_shape_blocks_classification() {
    let reader = MockChainReader::new();
    reader.stub_lsp7_token(CHAIN, lsp7_contract(), "Asset", "AST", 0, 18, U256::from(7u64));
    reader.stub_schema(
        CHAIN,
        lsp7_contract(),
        "LSP4Metadata",
        Ok(CallValue::Text("not json".into())),
    );
    let registry = InterfaceRegistry::default();

    let resolution = resolve_lsp7(&reader, &registry, CHAIN, lsp7_contract()).await;

    assert_eq!(resolution.standard, None);
    let fields = resolution.lsp7.unwrap();
    assert_eq!(fields.metadata, None);
    assert!(matches!(fields.errors.metadata, Some(ReadError::Shape { .. })));
}

#[tokio::test]
async fn test_creator_order_is_preserved() {
    let first = Address::repeat_byte(0xaa);
    let second = Address::repeat_byte(0xbb);
    let reader = MockChainReader::new();
    reader.stub_lsp7_token(CHAIN, lsp7_contract(), "Asset", "AST", 1, 0, U256::from(10u64));
    reader.stub_schema(
        CHAIN,
        lsp7_contract(),
        "LSP4Creators[]",
        Ok(CallValue::AddressList(vec![first, second])),
    );
    let registry = InterfaceRegistry::default();

    let resolution = resolve_lsp7(&reader, &registry, CHAIN, lsp7_contract()).await;

    let fields = resolution.lsp7.unwrap();
    assert_eq!(fields.creators, Some(vec![first, second]));
}
