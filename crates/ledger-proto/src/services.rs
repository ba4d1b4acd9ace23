//! Ledger wire messages, written against the published service field numbers.
//!
//! Everything is flattened into one namespace the way generated code would be.

mod basic;
mod crypto;
mod node;
mod queries;
mod token;
mod transaction;

pub use basic::*;
pub use crypto::*;
pub use node::*;
pub use queries::*;
pub use token::*;
pub use transaction::*;
