//! Keccak-256 hashing and EVM identifier derivation.
//!
//! Function selectors are the first four bytes of the keccak-256 hash of a
//! canonical signature. ERC725Y data keys follow LSP2: the full 32-byte hash
//! of the key name (array keys keep their `[]` suffix in the hashed name).

use tiny_keccak::{Hasher, Keccak};

/// keccak-256 of arbitrary bytes.
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(input);
    let mut hash = [0u8; 32];
    hasher.finalize(&mut hash);
    hash
}

/// 4-byte function selector from a canonical signature such as `decimals()`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// 32-byte ERC725Y data key from an LSP2 key name.
pub fn lsp2_data_key(name: &str) -> [u8; 32] {
    keccak256(name.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_known_vectors() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(
            hex::encode(keccak256(b"abc")),
            "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }

    #[test]
    fn test_selector_known_functions() {
        assert_eq!(hex::encode(selector("name()")), "06fdde03");
        assert_eq!(hex::encode(selector("symbol()")), "95d89b41");
        assert_eq!(hex::encode(selector("decimals()")), "313ce567");
        assert_eq!(hex::encode(selector("totalSupply()")), "18160ddd");
        assert_eq!(hex::encode(selector("supportsInterface(bytes4)")), "01ffc9a7");
    }

    #[test]
    fn test_lsp2_data_key_is_full_hash_of_name() {
        let key = lsp2_data_key("LSP4TokenName");
        assert_eq!(key, keccak256(b"LSP4TokenName"));
    }

    #[test]
    fn test_lsp2_array_key_hashes_bracket_suffix() {
        // The `[]` suffix is part of the hashed name, so the array key and a
        // hypothetical singleton of the same base name must differ.
        assert_ne!(lsp2_data_key("LSP4Creators[]"), lsp2_data_key("LSP4Creators"));
    }
}
