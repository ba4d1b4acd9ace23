//! Golden vectors for hashing and key derivation.

use ledger_crypto::{transaction_hash, PrivateKey};

#[test]
fn sha384_vector() {
    assert_eq!(
        hex::encode(transaction_hash(b"abc").as_bytes()),
        "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
         8086072ba1e7cc2358baeca134c825a7"
    );
}

#[test]
fn ed25519_public_key_from_rfc8032_seed() {
    // RFC 8032 section 7.1, test 1.
    let seed = hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60")
        .unwrap();
    let key = PrivateKey::from_bytes_ed25519(&seed).unwrap();
    assert_eq!(
        hex::encode(key.public_key().to_bytes_raw()),
        "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
    );
    let signature = key.sign(b"").unwrap();
    assert_eq!(
        hex::encode(signature),
        "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
         5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
    );
}
