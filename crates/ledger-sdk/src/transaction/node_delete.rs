use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{IdError, LedgerId, ValidateChecksums};

use super::{Transaction, TransactionData};
use crate::{error::TransactionError, transport::Method};

/// Removes a node from the address book.
pub type NodeDeleteTransaction = Transaction<NodeDeleteData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeDeleteData {
    node_id: Option<u64>,
}

impl NodeDeleteTransaction {
    pub fn node_id(&self) -> Option<u64> {
        self.data().node_id
    }

    pub fn set_node_id(&mut self, node_id: u64) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.node_id = Some(node_id);
        Ok(self)
    }
}

impl ValidateChecksums for NodeDeleteData {
    fn validate_checksums(&self, _ledger: &LedgerId) -> Result<(), IdError> {
        Ok(())
    }
}

impl TransactionData for NodeDeleteData {
    fn method(&self) -> Method {
        Method::address_book("deleteNode")
    }

    fn to_body_data(&self) -> Data {
        Data::NodeDelete(proto::NodeDeleteTransactionBody {
            node_id: self.node_id.unwrap_or_default(),
        })
    }

    fn check_freeze(&self) -> Result<(), TransactionError> {
        if self.node_id.is_none() {
            return Err(TransactionError::invalid_state(
                "node id must be set before a node delete can be frozen",
            ));
        }
        Ok(())
    }
}

impl TryFrom<proto::NodeDeleteTransactionBody> for NodeDeleteData {
    type Error = TransactionError;

    fn try_from(body: proto::NodeDeleteTransactionBody) -> Result<Self, Self::Error> {
        Ok(Self {
            node_id: Some(body.node_id),
        })
    }
}
