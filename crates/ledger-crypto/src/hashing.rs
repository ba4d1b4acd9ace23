use alloy_primitives::keccak256;
use ledger_types::TransactionHash;
use sha2::{Digest, Sha384};

/// Hash the network assigns a submitted transaction: SHA-384 over the signed
/// transaction bytes.
pub fn transaction_hash(signed_transaction_bytes: &[u8]) -> TransactionHash {
    let digest = Sha384::digest(signed_transaction_bytes);
    let mut out = [0u8; 48];
    out.copy_from_slice(&digest);
    TransactionHash::new(out)
}

pub(crate) fn keccak_prehash(message: &[u8]) -> [u8; 32] {
    keccak256(message).0
}

#[cfg(test)]
mod tests {
    use super::transaction_hash;

    #[test]
    fn hash_is_deterministic_and_input_sensitive() {
        let a = transaction_hash(b"signed-a");
        assert_eq!(a, transaction_hash(b"signed-a"));
        assert_ne!(a, transaction_hash(b"signed-b"));
    }
}
