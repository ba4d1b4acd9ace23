use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{AccountId, IdError, Key, LedgerId, ValidateChecksums};

use super::{check_max_bytes, check_max_len, push_bounded, Transaction, TransactionData};
use crate::{endpoint::Endpoint, error::TransactionError, transport::Method};

pub(crate) const MAX_GOSSIP_ENDPOINTS: usize = 10;
pub(crate) const MAX_SERVICE_ENDPOINTS: usize = 8;
pub(crate) const MAX_DESCRIPTION_BYTES: usize = 100;

/// Adds a consensus node to the address book.
pub type NodeCreateTransaction = Transaction<NodeCreateData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeCreateData {
    account_id: Option<AccountId>,
    description: String,
    gossip_endpoints: Vec<Endpoint>,
    service_endpoints: Vec<Endpoint>,
    gossip_ca_certificate: Vec<u8>,
    grpc_certificate_hash: Vec<u8>,
    admin_key: Option<Key>,
    decline_reward: bool,
    grpc_web_proxy_endpoint: Option<Endpoint>,
}

impl NodeCreateTransaction {
    pub fn account_id(&self) -> Option<AccountId> {
        self.data().account_id
    }

    pub fn set_account_id(&mut self, account_id: AccountId) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.account_id = Some(account_id);
        Ok(self)
    }

    pub fn description(&self) -> &str {
        &self.data().description
    }

    pub fn set_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let description = description.into();
        check_max_bytes(&description, MAX_DESCRIPTION_BYTES, "node description")?;
        self.data_mut()?.description = description;
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

    /// DER-encoded certificate the node presents to its gossip peers.
    pub fn gossip_ca_certificate(&self) -> &[u8] {
        &self.data().gossip_ca_certificate
    }

    pub fn set_gossip_ca_certificate(
        &mut self,
        certificate: Vec<u8>,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.gossip_ca_certificate = certificate;
        Ok(self)
    }

    /// SHA-384 of the node's gRPC TLS certificate.
    pub fn grpc_certificate_hash(&self) -> &[u8] {
        &self.data().grpc_certificate_hash
    }

    pub fn set_grpc_certificate_hash(&mut self, hash: Vec<u8>) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.grpc_certificate_hash = hash;
        Ok(self)
    }

    pub fn admin_key(&self) -> Option<&Key> {
        self.data().admin_key.as_ref()
    }

    pub fn set_admin_key(&mut self, key: impl Into<Key>) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.admin_key = Some(key.into());
        Ok(self)
    }

    pub fn decline_reward(&self) -> bool {
        self.data().decline_reward
    }

    pub fn set_decline_reward(&mut self, decline: bool) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.decline_reward = decline;
        Ok(self)
    }

    pub fn grpc_web_proxy_endpoint(&self) -> Option<&Endpoint> {
        self.data().grpc_web_proxy_endpoint.as_ref()
    }

    pub fn set_grpc_web_proxy_endpoint(
        &mut self,
        endpoint: Endpoint,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.grpc_web_proxy_endpoint = Some(endpoint);
        Ok(self)
    }
}

impl ValidateChecksums for NodeCreateData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.account_id.validate_checksums(ledger)
    }
}

impl TransactionData for NodeCreateData {
    fn method(&self) -> Method {
        Method::address_book("createNode")
    }

    fn to_body_data(&self) -> Data {
        Data::NodeCreate(proto::NodeCreateTransactionBody {
            account_id: self.account_id.map(Into::into),
            description: self.description.clone(),
            gossip_endpoint: self.gossip_endpoints.iter().map(Into::into).collect(),
            service_endpoint: self.service_endpoints.iter().map(Into::into).collect(),
            gossip_ca_certificate: self.gossip_ca_certificate.clone(),
            grpc_certificate_hash: self.grpc_certificate_hash.clone(),
            admin_key: self.admin_key.as_ref().map(Into::into),
            decline_reward: self.decline_reward,
            grpc_proxy_endpoint: self.grpc_web_proxy_endpoint.as_ref().map(Into::into),
        })
    }
}

pub(crate) fn endpoints_from_wire(
    endpoints: Vec<proto::ServiceEndpoint>,
    max: usize,
    field: &str,
) -> Result<Vec<Endpoint>, TransactionError> {
    check_max_len(endpoints.len(), max, field)?;
    endpoints.into_iter().map(Endpoint::try_from).collect()
}

impl TryFrom<proto::NodeCreateTransactionBody> for NodeCreateData {
    type Error = TransactionError;

    fn try_from(body: proto::NodeCreateTransactionBody) -> Result<Self, Self::Error> {
        check_max_bytes(&body.description, MAX_DESCRIPTION_BYTES, "node description")?;
        Ok(Self {
            account_id: body.account_id.map(AccountId::try_from).transpose()?,
            description: body.description,
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
            gossip_ca_certificate: body.gossip_ca_certificate,
            grpc_certificate_hash: body.grpc_certificate_hash,
            admin_key: body.admin_key.map(Key::try_from).transpose()?,
            decline_reward: body.decline_reward,
            grpc_web_proxy_endpoint: body.grpc_proxy_endpoint.map(Endpoint::try_from).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use ledger_proto::services::transaction_body::Data;
    use ledger_types::AccountId;

    use super::{NodeCreateData, NodeCreateTransaction};
    use crate::{endpoint::Endpoint, error::TransactionError, transaction::TransactionData};

    fn endpoint(port: u16) -> Endpoint {
        Endpoint::ip(Ipv4Addr::new(10, 0, 0, 1), port)
    }

    #[test]
    fn service_endpoints_are_capped_at_eight() {
        let mut tx = NodeCreateTransaction::new();
        tx.set_service_endpoints((0..8).map(endpoint).collect()).unwrap();
        let err = tx.add_service_endpoint(endpoint(9)).unwrap_err();
        assert!(matches!(err, TransactionError::InvalidArgument(_)));
        assert_eq!(tx.service_endpoints().len(), 8);
    }

    #[test]
    fn description_is_limited_to_one_hundred_bytes() {
        let mut tx = NodeCreateTransaction::new();
        tx.set_description("n".repeat(100)).unwrap();
        let err = tx.set_description("ü".repeat(51)).unwrap_err();
        assert!(matches!(err, TransactionError::InvalidArgument(_)));
        assert_eq!(tx.description().len(), 100);
    }

    #[test]
    fn body_round_trips() {
        let mut tx = NodeCreateTransaction::new();
        tx.set_account_id(AccountId::from_num(7))
            .unwrap()
            .add_gossip_endpoint(endpoint(50111))
            .unwrap()
            .add_service_endpoint(Endpoint::domain("node7.example.com", 50211).unwrap())
            .unwrap()
            .set_gossip_ca_certificate(vec![0x30, 0x82])
            .unwrap()
            .set_grpc_web_proxy_endpoint(Endpoint::domain("proxy.example.com", 443).unwrap())
            .unwrap();
        let Data::NodeCreate(body) = tx.data().to_body_data() else {
            panic!("expected a node create body");
        };
        assert_eq!(&NodeCreateData::try_from(body).unwrap(), tx.data());
    }
}
