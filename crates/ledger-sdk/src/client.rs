//! Client: the network context transactions are frozen and executed against.

use std::{collections::BTreeMap, fmt, sync::Arc, time::Duration};

use ledger_crypto::PrivateKey;
use ledger_types::{AccountId, Hbar, LedgerId, Signer};
use serde::{Deserialize, Serialize};

use crate::{error::ClientError, transaction::DEFAULT_VALID_DURATION, transport::RetryPolicy};

/// Operator entry of a [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorConfig {
    pub account_id: AccountId,
    /// `ed25519:<hex>`, `ecdsa:<hex>` or bare Ed25519 hex.
    pub private_key: String,
}

/// Serializable client settings, e.g. loaded from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// `mainnet`, `testnet`, `previewnet`, or a hex ledger id.
    pub ledger: String,
    /// `host:port` of each node mapped to its node account.
    pub nodes: BTreeMap<String, AccountId>,
    pub operator: Option<OperatorConfig>,
    pub default_max_transaction_fee_tinybars: Option<i64>,
    pub transaction_valid_duration_secs: u64,
    pub auto_validate_checksums: bool,
    pub request_timeout_ms: u64,
    /// Retries of a single submit or query call on timeouts and unavailable nodes.
    pub request_retry: RetryPolicy,
    /// Polling of receipts and records while the network has no final status.
    pub receipt_retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ledger: "testnet".to_owned(),
            nodes: BTreeMap::new(),
            operator: None,
            default_max_transaction_fee_tinybars: None,
            transaction_valid_duration_secs: DEFAULT_VALID_DURATION.as_secs(),
            auto_validate_checksums: false,
            request_timeout_ms: 10_000,
            request_retry: RetryPolicy::default(),
            receipt_retry: RetryPolicy {
                max_retries: 10,
                initial_backoff_ms: 250,
                max_backoff_ms: 8_000,
                jitter_ms: 50,
            },
        }
    }
}

impl ClientConfig {
    pub fn from_json(text: &str) -> Result<Self, ClientError> {
        serde_json::from_str(text).map_err(|err| ClientError::Config(err.to_string()))
    }
}

#[derive(Clone)]
struct Operator {
    account_id: AccountId,
    signer: Arc<dyn Signer>,
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("account_id", &self.account_id)
            .field("public_key", &self.signer.public_key())
            .finish()
    }
}

/// Ledger identity, node address book, operator, and transaction defaults.
///
/// Nothing here performs I/O; transports are supplied separately at execution.
#[derive(Debug, Clone)]
pub struct Client {
    ledger_id: LedgerId,
    network: BTreeMap<String, AccountId>,
    operator: Option<Operator>,
    default_max_transaction_fee: Option<Hbar>,
    default_valid_duration: Duration,
    auto_validate_checksums: bool,
    request_timeout: Duration,
    request_retry: RetryPolicy,
    receipt_retry: RetryPolicy,
}

impl Client {
    /// Client for `ledger_id` with an empty network; see [`Client::set_network`].
    pub fn for_ledger(ledger_id: LedgerId) -> Self {
        let defaults = ClientConfig::default();
        Self {
            ledger_id,
            network: BTreeMap::new(),
            operator: None,
            default_max_transaction_fee: None,
            default_valid_duration: Duration::from_secs(defaults.transaction_valid_duration_secs),
            auto_validate_checksums: defaults.auto_validate_checksums,
            request_timeout: Duration::from_millis(defaults.request_timeout_ms),
            request_retry: defaults.request_retry,
            receipt_retry: defaults.receipt_retry,
        }
    }

    pub fn for_mainnet() -> Self {
        Self::for_ledger(LedgerId::mainnet())
    }

    pub fn for_testnet() -> Self {
        Self::for_ledger(LedgerId::testnet())
    }

    pub fn for_previewnet() -> Self {
        Self::for_ledger(LedgerId::previewnet())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let ledger_id = config
            .ledger
            .parse()
            .map_err(|err| ClientError::Config(format!("ledger: {err}")))?;
        let mut client = Self::for_ledger(ledger_id);
        client.network = config.nodes.clone();
        client.default_max_transaction_fee = config
            .default_max_transaction_fee_tinybars
            .map(Hbar::from_tinybars);
        client.default_valid_duration = Duration::from_secs(config.transaction_valid_duration_secs);
        client.auto_validate_checksums = config.auto_validate_checksums;
        client.request_timeout = Duration::from_millis(config.request_timeout_ms);
        client.request_retry = config.request_retry.clone();
        client.receipt_retry = config.receipt_retry.clone();
        if let Some(operator) = &config.operator {
            let key: PrivateKey = operator
                .private_key
                .parse()
                .map_err(|err| ClientError::Config(format!("operator key: {err}")))?;
            client.set_operator(operator.account_id, key);
        }
        Ok(client)
    }

    pub fn ledger_id(&self) -> &LedgerId {
        &self.ledger_id
    }

    pub fn network(&self) -> &BTreeMap<String, AccountId> {
        &self.network
    }

    pub fn set_network(
        &mut self,
        nodes: impl IntoIterator<Item = (String, AccountId)>,
    ) -> &mut Self {
        self.network = nodes.into_iter().collect();
        self
    }

    /// Distinct node accounts in ascending order.
    pub fn node_account_ids(&self) -> Vec<AccountId> {
        let mut ids: Vec<_> = self.network.values().copied().collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// First endpoint registered for `node_account_id`.
    pub fn endpoint_for(&self, node_account_id: AccountId) -> Option<&str> {
        self.network
            .iter()
            .find(|(_, id)| **id == node_account_id)
            .map(|(endpoint, _)| endpoint.as_str())
    }

    /// Account paying for transactions, and the key that signs for it.
    pub fn set_operator(
        &mut self,
        account_id: AccountId,
        signer: impl Signer + 'static,
    ) -> &mut Self {
        self.operator = Some(Operator {
            account_id,
            signer: Arc::new(signer),
        });
        self
    }

    pub fn operator_account_id(&self) -> Option<AccountId> {
        self.operator.as_ref().map(|operator| operator.account_id)
    }

    pub(crate) fn operator_signer(&self) -> Option<&dyn Signer> {
        self.operator.as_ref().map(|operator| operator.signer.as_ref())
    }

    pub fn default_max_transaction_fee(&self) -> Option<Hbar> {
        self.default_max_transaction_fee
    }

    pub fn set_default_max_transaction_fee(&mut self, fee: Hbar) -> &mut Self {
        self.default_max_transaction_fee = Some(fee);
        self
    }

    pub fn default_valid_duration(&self) -> Duration {
        self.default_valid_duration
    }

    pub fn set_default_valid_duration(&mut self, duration: Duration) -> &mut Self {
        self.default_valid_duration = duration;
        self
    }

    pub fn auto_validate_checksums(&self) -> bool {
        self.auto_validate_checksums
    }

    pub fn set_auto_validate_checksums(&mut self, enabled: bool) -> &mut Self {
        self.auto_validate_checksums = enabled;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn request_retry(&self) -> &RetryPolicy {
        &self.request_retry
    }

    pub fn set_request_retry(&mut self, policy: RetryPolicy) -> &mut Self {
        self.request_retry = policy;
        self
    }

    pub fn receipt_retry(&self) -> &RetryPolicy {
        &self.receipt_retry
    }

    pub fn set_receipt_retry(&mut self, policy: RetryPolicy) -> &mut Self {
        self.receipt_retry = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use ledger_crypto::PrivateKey;
    use ledger_types::{AccountId, LedgerId};

    use super::{Client, ClientConfig};
    use crate::{error::ClientError, transport::RetryPolicy};

    #[test]
    fn loads_config_from_json() {
        let config = ClientConfig::from_json(
            r#"{
                "ledger": "previewnet",
                "nodes": {"127.0.0.1:50211": "0.0.3", "127.0.0.1:50212": "0.0.4"},
                "operator": {
                    "account_id": "0.0.1001",
                    "private_key": "ed25519:0101010101010101010101010101010101010101010101010101010101010101"
                },
                "auto_validate_checksums": true,
                "request_retry": {"max_retries": 5, "initial_backoff_ms": 10}
            }"#,
        )
        .unwrap();
        let client = Client::from_config(&config).unwrap();
        assert_eq!(client.ledger_id(), &LedgerId::previewnet());
        assert_eq!(
            client.node_account_ids(),
            vec![AccountId::from_num(3), AccountId::from_num(4)]
        );
        assert_eq!(client.operator_account_id(), Some(AccountId::from_num(1001)));
        assert!(client.auto_validate_checksums());
        assert_eq!(client.request_retry().max_retries, 5);
        assert_eq!(client.request_retry().initial_backoff_ms, 10);
        assert_eq!(client.request_retry().max_backoff_ms, RetryPolicy::default().max_backoff_ms);
        assert_eq!(client.endpoint_for(AccountId::from_num(4)), Some("127.0.0.1:50212"));
    }

    #[test]
    fn rejects_unknown_ledger_and_bad_json() {
        let config = ClientConfig {
            ledger: "nowhere".to_owned(),
            ..ClientConfig::default()
        };
        assert!(matches!(Client::from_config(&config), Err(ClientError::Config(_))));
        assert!(matches!(ClientConfig::from_json("{"), Err(ClientError::Config(_))));
    }

    #[test]
    fn constructors_start_without_nodes_or_operator() {
        let mut client = Client::for_testnet();
        assert!(client.node_account_ids().is_empty());
        assert_eq!(client.operator_account_id(), None);

        client.set_operator(AccountId::from_num(2), PrivateKey::generate_ed25519());
        assert_eq!(client.operator_account_id(), Some(AccountId::from_num(2)));
    }
}
