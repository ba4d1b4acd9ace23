//! Closed set of transaction kinds, for parsing bytes of unknown kind.

use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{Hbar, IdError, LedgerId, ValidateChecksums};

use super::{
    AccountAllowanceApproveData, AccountAllowanceDeleteData, AccountCreateData,
    AccountUpdateData, NodeCreateData, NodeDeleteData, NodeUpdateData, TokenAirdropData,
    TokenBurnData, TokenCancelAirdropData, TokenClaimAirdropData, TokenFeeScheduleUpdateData,
    TokenMintData, TokenRejectData, TokenUpdateData, Transaction, TransactionData, TransferData,
};
use crate::{error::TransactionError, transport::Method};

/// Recovers a kind from [`AnyTransactionData`]; fails when the kinds differ.
pub trait FromAnyTransactionData: Sized {
    fn from_any(data: AnyTransactionData) -> Result<Self, TransactionError>;
}

pub type AnyTransaction = Transaction<AnyTransactionData>;

macro_rules! any_transaction_data {
    ($($variant:ident($data:ty) <= $body:ident),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AnyTransactionData {
            $($variant($data),)*
        }

        impl AnyTransactionData {
            pub fn kind(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)*
                }
            }

            pub(crate) fn from_body_data(data: Data) -> Result<Self, TransactionError> {
                match data {
                    $(Data::$body(body) => Ok(Self::$variant(<$data>::try_from(body)?)),)*
                    Data::CryptoAddLiveHash(_) | Data::CryptoDeleteLiveHash(_) => {
                        Err(TransactionError::UnsupportedOperation(
                            "live hash transactions are no longer supported".to_owned(),
                        ))
                    }
                }
            }
        }

        impl ValidateChecksums for AnyTransactionData {
            fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
                match self {
                    $(Self::$variant(data) => data.validate_checksums(ledger),)*
                }
            }
        }

        impl TransactionData for AnyTransactionData {
            fn method(&self) -> Method {
                match self {
                    $(Self::$variant(data) => data.method(),)*
                }
            }

            fn to_body_data(&self) -> proto::transaction_body::Data {
                match self {
                    $(Self::$variant(data) => data.to_body_data(),)*
                }
            }

            fn check_freeze(&self) -> Result<(), TransactionError> {
                match self {
                    $(Self::$variant(data) => data.check_freeze(),)*
                }
            }

            fn default_max_transaction_fee(&self) -> Hbar {
                match self {
                    $(Self::$variant(data) => data.default_max_transaction_fee(),)*
                }
            }
        }

        $(
            impl From<$data> for AnyTransactionData {
                fn from(value: $data) -> Self {
                    Self::$variant(value)
                }
            }

            impl FromAnyTransactionData for $data {
                fn from_any(data: AnyTransactionData) -> Result<Self, TransactionError> {
                    match data {
                        AnyTransactionData::$variant(data) => Ok(data),
                        #[allow(unreachable_patterns)]
                        other => Err(TransactionError::invalid_argument(format!(
                            "expected a {} transaction, found {}",
                            stringify!($variant),
                            other.kind()
                        ))),
                    }
                }
            }
        )*
    };
}

any_transaction_data! {
    AccountCreate(AccountCreateData) <= CryptoCreateAccount,
    AccountUpdate(AccountUpdateData) <= CryptoUpdateAccount,
    AccountAllowanceApprove(AccountAllowanceApproveData) <= CryptoApproveAllowance,
    AccountAllowanceDelete(AccountAllowanceDeleteData) <= CryptoDeleteAllowance,
    Transfer(TransferData) <= CryptoTransfer,
    TokenAirdrop(TokenAirdropData) <= TokenAirdrop,
    TokenClaimAirdrop(TokenClaimAirdropData) <= TokenClaimAirdrop,
    TokenCancelAirdrop(TokenCancelAirdropData) <= TokenCancelAirdrop,
    TokenReject(TokenRejectData) <= TokenReject,
    TokenUpdate(TokenUpdateData) <= TokenUpdate,
    TokenMint(TokenMintData) <= TokenMint,
    TokenBurn(TokenBurnData) <= TokenBurn,
    TokenFeeScheduleUpdate(TokenFeeScheduleUpdateData) <= TokenFeeScheduleUpdate,
    NodeCreate(NodeCreateData) <= NodeCreate,
    NodeUpdate(NodeUpdateData) <= NodeUpdate,
    NodeDelete(NodeDeleteData) <= NodeDelete,
}

impl FromAnyTransactionData for AnyTransactionData {
    fn from_any(data: AnyTransactionData) -> Result<Self, TransactionError> {
        Ok(data)
    }
}

impl<D: Into<AnyTransactionData>> Transaction<D> {
    /// Erases the kind, keeping frozen state and signatures.
    pub fn into_any(self) -> AnyTransaction {
        Transaction {
            data: self.data.into(),
            transaction_id: self.transaction_id,
            node_account_ids: self.node_account_ids,
            max_transaction_fee: self.max_transaction_fee,
            valid_duration: self.valid_duration,
            memo: self.memo,
            frozen: self.frozen,
            signatures: self.signatures,
        }
    }
}

impl AnyTransaction {
    pub fn data_kind(&self) -> &'static str {
        self.data().kind()
    }

    /// Recovers the typed transaction; fails with `InvalidArgument` for another kind.
    pub fn downcast<D: FromAnyTransactionData>(self) -> Result<Transaction<D>, TransactionError> {
        Ok(Transaction {
            data: D::from_any(self.data)?,
            transaction_id: self.transaction_id,
            node_account_ids: self.node_account_ids,
            max_transaction_fee: self.max_transaction_fee,
            valid_duration: self.valid_duration,
            memo: self.memo,
            frozen: self.frozen,
            signatures: self.signatures,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use ledger_proto::services as proto;
    use ledger_types::AccountId;
    use prost::Message;

    use super::AnyTransaction;
    use crate::{
        error::TransactionError,
        transaction::{NodeDeleteData, NodeDeleteTransaction, TransferTransaction},
        transaction_id::TransactionId,
    };

    fn envelope(data: proto::transaction_body::Data) -> Vec<u8> {
        let body = proto::TransactionBody {
            transaction_id: Some(
                TransactionId::with_valid_start(
                    AccountId::from_num(2),
                    UNIX_EPOCH + Duration::from_secs(1_000),
                )
                .into(),
            ),
            node_account_id: Some(AccountId::from_num(3).into()),
            data: Some(data),
            ..Default::default()
        };
        let signed = proto::SignedTransaction {
            body_bytes: body.encode_to_vec(),
            sig_map: None,
        };
        proto::TransactionList {
            transaction_list: vec![proto::Transaction {
                signed_transaction_bytes: signed.encode_to_vec(),
            }],
        }
        .encode_to_vec()
    }

    #[test]
    fn parses_bytes_of_unknown_kind() {
        let bytes = envelope(proto::transaction_body::Data::NodeDelete(
            proto::NodeDeleteTransactionBody { node_id: 4 },
        ));
        let any = AnyTransaction::from_bytes(&bytes).unwrap();
        assert_eq!(any.data_kind(), "NodeDelete");
        assert!(!any.is_frozen());

        let typed = any.downcast::<NodeDeleteData>().unwrap();
        assert_eq!(typed.node_id(), Some(4));
    }

    #[test]
    fn wrong_kind_is_an_invalid_argument() {
        let bytes = envelope(proto::transaction_body::Data::NodeDelete(
            proto::NodeDeleteTransactionBody { node_id: 4 },
        ));
        let err = TransferTransaction::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, TransactionError::InvalidArgument(_)));
    }

    #[test]
    fn live_hash_bodies_are_unsupported() {
        let bytes = envelope(proto::transaction_body::Data::CryptoAddLiveHash(
            proto::CryptoAddLiveHashTransactionBody {
                live_hash: vec![1, 2, 3],
            },
        ));
        let err = AnyTransaction::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, TransactionError::UnsupportedOperation(_)));
    }

    #[test]
    fn typed_transactions_erase_and_recover() {
        let mut tx = NodeDeleteTransaction::new();
        tx.set_node_id(9).unwrap();
        let any = tx.into_any();
        assert_eq!(any.data_kind(), "NodeDelete");
        let back: NodeDeleteTransaction = any.downcast().unwrap();
        assert_eq!(back.node_id(), Some(9));
    }
}
