pub mod entity_id;
pub mod error;
pub mod hbar;
pub mod ids;
pub mod key;
pub mod ledger;
pub mod traits;

pub use entity_id::{AccountId, EntityForm, EntityId};
pub use error::{IdError, KeyError, ValidationError};
pub use hbar::Hbar;
pub use ids::{ContractId, EvmAddress, FileId, NftId, ScheduleId, TokenId, TopicId, TransactionHash};
pub use key::{Key, PublicKey};
pub use ledger::{Checksum, LedgerId};
pub use traits::{Signer, ValidateChecksums};
