//! Private keys for the two signature schemes the ledger accepts, and transaction hashing.

pub mod hashing;
pub mod private_key;

pub use hashing::transaction_hash;
pub use private_key::{verify, PrivateKey};
