use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{AccountId, IdError, Key, LedgerId, ValidateChecksums};

use super::{
    check_max_bytes, check_max_len,
    node_create::{
        endpoints_from_wire, MAX_DESCRIPTION_BYTES, MAX_GOSSIP_ENDPOINTS, MAX_SERVICE_ENDPOINTS,
    },
    push_bounded, Transaction, TransactionData,
};
use crate::{endpoint::Endpoint, error::TransactionError, patch::Patch, transport::Method};

/// Changes an address book entry. Empty endpoint lists leave the node's endpoints
/// unchanged.
pub type NodeUpdateTransaction = Transaction<NodeUpdateData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeUpdateData {
    node_id: Option<u64>,
    account_id: Option<AccountId>,
    description: Patch<String>,
    gossip_endpoints: Vec<Endpoint>,
    service_endpoints: Vec<Endpoint>,
    gossip_ca_certificate: Option<Vec<u8>>,
    grpc_certificate_hash: Patch<Vec<u8>>,
    admin_key: Option<Key>,
    decline_reward: Option<bool>,
    grpc_web_proxy_endpoint: Patch<Endpoint>,
}

impl NodeUpdateTransaction {
    pub fn node_id(&self) -> Option<u64> {
        self.data().node_id
    }

    pub fn set_node_id(&mut self, node_id: u64) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.node_id = Some(node_id);
        Ok(self)
    }

    pub fn account_id(&self) -> Option<AccountId> {
        self.data().account_id
    }

    pub fn set_account_id(&mut self, account_id: AccountId) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.account_id = Some(account_id);
        Ok(self)
    }

    pub fn description(&self) -> Patch<&String> {
        self.data().description.as_ref()
    }

    pub fn set_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let description = description.into();
        check_max_bytes(&description, MAX_DESCRIPTION_BYTES, "node description")?;
        self.data_mut()?.description = Patch::set_or_reset(description, String::is_empty);
        Ok(self)
    }

    pub fn clear_description(&mut self) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.description = Patch::Cleared;
        Ok(self)
    }

    pub fn gossip_endpoints(&self) -> &[Endpoint] {
        &self.data().gossip_endpoints
    }

    pub fn add_gossip_endpoint(&mut self, endpoint: Endpoint) -> Result<&mut Self, TransactionError> {
        push_bounded(
            &mut self.data_mut()?.gossip_endpoints,
            endpoint,
            MAX_GOSSIP_ENDPOINTS,
            "gossip endpoints",
        )?;
        Ok(self)
    }

    pub fn set_gossip_endpoints(
        &mut self,
        endpoints: Vec<Endpoint>,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        check_max_len(endpoints.len(), MAX_GOSSIP_ENDPOINTS, "gossip endpoints")?;
        self.data_mut()?.gossip_endpoints = endpoints;
        Ok(self)
    }

    pub fn service_endpoints(&self) -> &[Endpoint] {
        &self.data().service_endpoints
    }

    pub fn add_service_endpoint(
        &mut self,
        endpoint: Endpoint,
    ) -> Result<&mut Self, TransactionError> {
        push_bounded(
            &mut self.data_mut()?.service_endpoints,
            endpoint,
            MAX_SERVICE_ENDPOINTS,
            "service endpoints",
        )?;
        Ok(self)
    }

    pub fn set_service_endpoints(
        &mut self,
        endpoints: Vec<Endpoint>,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        check_max_len(endpoints.len(), MAX_SERVICE_ENDPOINTS, "service endpoints")?;
        self.data_mut()?.service_endpoints = endpoints;
        Ok(self)
    }

    pub fn gossip_ca_certificate(&self) -> Option<&[u8]> {
        self.data().gossip_ca_certificate.as_deref()
    }

    pub fn set_gossip_ca_certificate(
        &mut self,
        certificate: Vec<u8>,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.gossip_ca_certificate = Some(certificate);
        Ok(self)
    }

    pub fn grpc_certificate_hash(&self) -> Patch<&Vec<u8>> {
        self.data().grpc_certificate_hash.as_ref()
    }

    pub fn set_grpc_certificate_hash(&mut self, hash: Vec<u8>) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.grpc_certificate_hash = Patch::set_or_reset(hash, Vec::is_empty);
        Ok(self)
    }

    pub fn clear_grpc_certificate_hash(&mut self) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.grpc_certificate_hash = Patch::Cleared;
        Ok(self)
    }

    pub fn admin_key(&self) -> Option<&Key> {
        self.data().admin_key.as_ref()
    }

    pub fn set_admin_key(&mut self, key: impl Into<Key>) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.admin_key = Some(key.into());
        Ok(self)
    }

    pub fn decline_reward(&self) -> Option<bool> {
        self.data().decline_reward
    }

    pub fn set_decline_reward(&mut self, decline: bool) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.decline_reward = Some(decline);
        Ok(self)
    }

    pub fn grpc_web_proxy_endpoint(&self) -> Patch<&Endpoint> {
        self.data().grpc_web_proxy_endpoint.as_ref()
    }

    pub fn set_grpc_web_proxy_endpoint(
        &mut self,
        endpoint: Endpoint,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.grpc_web_proxy_endpoint = Patch::Set(endpoint);
        Ok(self)
    }

    /// Removes the node's gRPC-web proxy.
    pub fn clear_grpc_web_proxy_endpoint(&mut self) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.grpc_web_proxy_endpoint = Patch::Cleared;
        Ok(self)
    }
}

impl ValidateChecksums for NodeUpdateData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.account_id.validate_checksums(ledger)
    }
}

impl TransactionData for NodeUpdateData {
    fn method(&self) -> Method {
        Method::address_book("updateNode")
    }

    fn to_body_data(&self) -> Data {
        Data::NodeUpdate(proto::NodeUpdateTransactionBody {
            node_id: self.node_id.unwrap_or_default(),
            account_id: self.account_id.map(Into::into),
            description: self.description.encode(
                || proto::StringValue { value: String::new() },
                |description| proto::StringValue {
                    value: description.clone(),
                },
            ),
            gossip_endpoint: self.gossip_endpoints.iter().map(Into::into).collect(),
            service_endpoint: self.service_endpoints.iter().map(Into::into).collect(),
            gossip_ca_certificate: self
                .gossip_ca_certificate
                .clone()
                .map(|value| proto::BytesValue { value }),
            grpc_certificate_hash: self.grpc_certificate_hash.encode(
                || proto::BytesValue { value: Vec::new() },
                |hash| proto::BytesValue { value: hash.clone() },
            ),
            admin_key: self.admin_key.as_ref().map(Into::into),
            decline_reward: self.decline_reward.map(|value| proto::BoolValue { value }),
            grpc_proxy_endpoint: self
                .grpc_web_proxy_endpoint
                .encode(proto::ServiceEndpoint::default, |endpoint| endpoint.into()),
        })
    }

    fn check_freeze(&self) -> Result<(), TransactionError> {
        if self.node_id.is_none() {
            return Err(TransactionError::invalid_state(
                "node id must be set before a node update can be frozen",
            ));
        }
        Ok(())
    }
}

impl TryFrom<proto::NodeUpdateTransactionBody> for NodeUpdateData {
    type Error = TransactionError;

    fn try_from(body: proto::NodeUpdateTransactionBody) -> Result<Self, Self::Error> {
        let grpc_web_proxy_endpoint = match body.grpc_proxy_endpoint {
            None => Patch::Unset,
            Some(endpoint) if endpoint == proto::ServiceEndpoint::default() => Patch::Cleared,
            Some(endpoint) => Patch::Set(Endpoint::try_from(endpoint)?),
        };
        Ok(Self {
            node_id: Some(body.node_id),
            account_id: body.account_id.map(AccountId::try_from).transpose()?,
            description: Patch::decode(body.description.map(|v| v.value), String::is_empty),
            gossip_endpoints: endpoints_from_wire(
                body.gossip_endpoint,
                MAX_GOSSIP_ENDPOINTS,
                "gossip endpoints",
            )?,
            service_endpoints: endpoints_from_wire(
                body.service_endpoint,
                MAX_SERVICE_ENDPOINTS,
                "service endpoints",
            )?,
            gossip_ca_certificate: body.gossip_ca_certificate.map(|v| v.value),
            grpc_certificate_hash: Patch::decode(
                body.grpc_certificate_hash.map(|v| v.value),
                Vec::is_empty,
            ),
            admin_key: body.admin_key.map(Key::try_from).transpose()?,
            decline_reward: body.decline_reward.map(|v| v.value),
            grpc_web_proxy_endpoint,
        })
    }
}
