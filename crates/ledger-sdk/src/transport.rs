use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant, SystemTime},
};

use async_trait::async_trait;
use http::uri::PathAndQuery;
use ledger_proto::services::{self as proto, ResponseCodeEnum};
use prost::Message;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonic::{codec::ProstCodec, transport::Channel};

pub const CRYPTO_SERVICE: &str = "CryptoService";
pub const TOKEN_SERVICE: &str = "TokenService";
pub const ADDRESS_BOOK_SERVICE: &str = "AddressBookService";

/// Remote method a transaction or query is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Method {
    pub service: &'static str,
    pub name: &'static str,
}

impl Method {
    pub const fn new(service: &'static str, name: &'static str) -> Self {
        Self { service, name }
    }

    pub const fn crypto(name: &'static str) -> Self {
        Self::new(CRYPTO_SERVICE, name)
    }

    pub const fn token(name: &'static str) -> Self {
        Self::new(TOKEN_SERVICE, name)
    }

    pub const fn address_book(name: &'static str) -> Self {
        Self::new(ADDRESS_BOOK_SERVICE, name)
    }

    /// gRPC path, e.g. `/proto.CryptoService/cryptoTransfer`.
    pub fn path(&self) -> String {
        format!("/proto.{}/{}", self.service, self.name)
    }
}

pub const GET_RECEIPT: Method = Method::crypto("getTransactionReceipts");
pub const GET_RECORD: Method = Method::crypto("getTxRecordByTxID");

/// Retry behavior for transport operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub jitter_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff_ms: 50,
            max_backoff_ms: 500,
            jitter_ms: 20,
        }
    }
}

/// Error model for transport operations.
#[derive(Debug, Error, Clone)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("node unavailable: {0}")]
    Unavailable(String),
    #[error("request rejected: code={code}, message={message}")]
    Rejected { code: i32, message: String },
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("internal transport error: {0}")]
    Internal(String),
}

impl TransportError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Unavailable(_))
    }
}

impl From<tonic::Status> for TransportError {
    fn from(status: tonic::Status) -> Self {
        match status.code() {
            tonic::Code::DeadlineExceeded => Self::Timeout,
            tonic::Code::Unavailable | tonic::Code::ResourceExhausted => {
                Self::Unavailable(status.message().to_owned())
            }
            tonic::Code::Internal => Self::Internal(status.message().to_owned()),
            code => Self::Rejected {
                code: code as i32,
                message: status.message().to_owned(),
            },
        }
    }
}

/// Node transport interface. Implementations may be in-memory mocks or gRPC.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn submit(
        &self,
        method: Method,
        transaction: proto::Transaction,
    ) -> Result<proto::TransactionResponse, TransportError>;

    async fn query(
        &self,
        method: Method,
        query: proto::Query,
    ) -> Result<proto::Response, TransportError>;
}

#[derive(Debug)]
struct MockState {
    submissions: Vec<(Method, proto::Transaction)>,
    precheck: ResponseCodeEnum,
    receipt: proto::TransactionReceipt,
    pending_polls: u32,
    unavailable_submits: u32,
    queries: usize,
}

/// In-memory transport for tests and the demo binary.
///
/// Accepts every submission with the configured precheck code and answers
/// receipt queries for submitted transactions with the configured receipt.
#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                submissions: Vec::new(),
                precheck: ResponseCodeEnum::Ok,
                receipt: proto::TransactionReceipt {
                    status: ResponseCodeEnum::Success as i32,
                    ..Default::default()
                },
                pending_polls: 0,
                unavailable_submits: 0,
                queries: 0,
            })),
        }
    }

    pub fn with_precheck(self, code: ResponseCodeEnum) -> Self {
        self.update(|state| state.precheck = code);
        self
    }

    pub fn with_receipt(self, receipt: proto::TransactionReceipt) -> Self {
        self.update(|state| state.receipt = receipt);
        self
    }

    /// Answers the first `polls` receipt queries with status `UNKNOWN`.
    pub fn with_pending_receipt_polls(self, polls: u32) -> Self {
        self.update(|state| state.pending_polls = polls);
        self
    }

    /// Fails the first `submits` submissions as if the node were unreachable.
    pub fn with_unavailable_submits(self, submits: u32) -> Self {
        self.update(|state| state.unavailable_submits = submits);
        self
    }

    pub fn submissions(&self) -> Vec<(Method, proto::Transaction)> {
        self.with_state(|state| state.submissions.clone())
            .unwrap_or_default()
    }

    pub fn query_count(&self) -> usize {
        self.with_state(|state| state.queries).unwrap_or_default()
    }

    fn update(&self, f: impl FnOnce(&mut MockState)) {
        // A poisoned lock only happens after a panic elsewhere in a test.
        let _ = self.with_state(f);
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> Result<R, TransportError> {
        let mut lock = self
            .state
            .lock()
            .map_err(|_| TransportError::Unavailable("mutex poisoned".to_string()))?;
        Ok(f(&mut lock))
    }
}

fn submitted_body(transaction: &proto::Transaction) -> Option<proto::TransactionBody> {
    let signed =
        proto::SignedTransaction::decode(transaction.signed_transaction_bytes.as_slice()).ok()?;
    proto::TransactionBody::decode(signed.body_bytes.as_slice()).ok()
}

impl MockState {
    fn find(
        &self,
        transaction_id: &Option<proto::TransactionId>,
    ) -> Option<(proto::TransactionBody, &proto::Transaction)> {
        self.submissions.iter().rev().find_map(|(_, transaction)| {
            let body = submitted_body(transaction)?;
            (body.transaction_id == *transaction_id).then_some((body, transaction))
        })
    }

    fn answer(&mut self, query: proto::Query) -> Result<proto::Response, TransportError> {
        self.queries += 1;
        let header = |code: ResponseCodeEnum| {
            Some(proto::ResponseHeader {
                node_transaction_precheck_code: code as i32,
                ..Default::default()
            })
        };
        match query.query {
            Some(proto::query::Query::TransactionGetReceipt(query)) => {
                if self.find(&query.transaction_id).is_none() {
                    return Ok(receipt_response(header(ResponseCodeEnum::ReceiptNotFound), None));
                }
                let receipt = if self.pending_polls > 0 {
                    self.pending_polls -= 1;
                    proto::TransactionReceipt {
                        status: ResponseCodeEnum::Unknown as i32,
                        ..Default::default()
                    }
                } else {
                    self.receipt.clone()
                };
                Ok(receipt_response(header(ResponseCodeEnum::Ok), Some(receipt)))
            }
            Some(proto::query::Query::TransactionGetRecord(query)) => {
                let Some((body, transaction)) = self.find(&query.transaction_id) else {
                    return Ok(record_response(header(ResponseCodeEnum::RecordNotFound), None));
                };
                let transaction_hash = ledger_crypto::transaction_hash(&transaction.encode_to_vec());
                let (transfer_list, token_transfer_lists) = match body.data {
                    Some(proto::transaction_body::Data::CryptoTransfer(transfer)) => {
                        (transfer.transfers, transfer.token_transfers)
                    }
                    _ => (None, Vec::new()),
                };
                let record = proto::TransactionRecord {
                    receipt: Some(self.receipt.clone()),
                    transaction_hash: transaction_hash.as_bytes().to_vec(),
                    consensus_timestamp: Some(SystemTime::now().into()),
                    transaction_id: body.transaction_id,
                    memo: body.memo,
                    transaction_fee: body.transaction_fee,
                    transfer_list,
                    token_transfer_lists,
                    new_pending_airdrops: Vec::new(),
                };
                Ok(record_response(header(ResponseCodeEnum::Ok), Some(record)))
            }
            None => Err(TransportError::Validation("query has no body".to_owned())),
        }
    }
}

fn receipt_response(
    header: Option<proto::ResponseHeader>,
    receipt: Option<proto::TransactionReceipt>,
) -> proto::Response {
    proto::Response {
        response: Some(proto::response::Response::TransactionGetReceipt(
            proto::TransactionGetReceiptResponse { header, receipt },
        )),
    }
}

fn record_response(
    header: Option<proto::ResponseHeader>,
    transaction_record: Option<proto::TransactionRecord>,
) -> proto::Response {
    proto::Response {
        response: Some(proto::response::Response::TransactionGetRecord(
            proto::TransactionGetRecordResponse {
                header,
                transaction_record,
            },
        )),
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn submit(
        &self,
        method: Method,
        transaction: proto::Transaction,
    ) -> Result<proto::TransactionResponse, TransportError> {
        self.with_state(|state| {
            if state.unavailable_submits > 0 {
                state.unavailable_submits -= 1;
                return Err(TransportError::Unavailable("mock node offline".to_owned()));
            }
            state.submissions.push((method, transaction));
            Ok(proto::TransactionResponse {
                node_transaction_precheck_code: state.precheck as i32,
                cost: 0,
            })
        })?
    }

    async fn query(
        &self,
        _method: Method,
        query: proto::Query,
    ) -> Result<proto::Response, TransportError> {
        self.with_state(|state| state.answer(query))?
    }
}

/// Plain-text gRPC transport to a single node.
#[derive(Debug, Clone)]
pub struct GrpcTransport {
    channel: Channel,
    request_timeout: Duration,
}

impl GrpcTransport {
    /// Connects on first use; `endpoint` is `host:port`.
    pub fn connect_lazy(endpoint: &str, request_timeout: Duration) -> Result<Self, TransportError> {
        let channel = Channel::from_shared(format!("http://{endpoint}"))
            .map_err(|err| TransportError::Validation(err.to_string()))?
            .connect_lazy();
        Ok(Self {
            channel,
            request_timeout,
        })
    }

    async fn unary<Req, Resp>(&self, method: Method, request: Req) -> Result<Resp, TransportError>
    where
        Req: Message + Send + Sync + 'static,
        Resp: Message + Default + Send + Sync + 'static,
    {
        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        grpc.ready()
            .await
            .map_err(|err| TransportError::Unavailable(err.to_string()))?;
        let path = PathAndQuery::try_from(method.path())
            .map_err(|err| TransportError::Validation(err.to_string()))?;
        let call = grpc.unary(
            tonic::Request::new(request),
            path,
            ProstCodec::<Req, Resp>::default(),
        );
        match tokio::time::timeout(self.request_timeout, call).await {
            Err(_) => Err(TransportError::Timeout),
            Ok(result) => Ok(result?.into_inner()),
        }
    }
}

#[async_trait]
impl Transport for GrpcTransport {
    async fn submit(
        &self,
        method: Method,
        transaction: proto::Transaction,
    ) -> Result<proto::TransactionResponse, TransportError> {
        self.unary(method, transaction).await
    }

    async fn query(
        &self,
        method: Method,
        query: proto::Query,
    ) -> Result<proto::Response, TransportError> {
        self.unary(method, query).await
    }
}

/// Runs `op` until it succeeds, fails with a non-retryable error, runs out of
/// retries, or would overrun `timeout`.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    timeout: Duration,
    mut op: F,
) -> Result<T, TransportError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, TransportError>>,
{
    let deadline = Instant::now() + timeout;
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retryable() || attempt >= policy.max_retries {
                    return Err(err);
                }
                let now = Instant::now();
                if now >= deadline {
                    return Err(TransportError::Timeout);
                }

                let delay = backoff_delay_ms(attempt, policy);
                attempt += 1;
                let remaining = deadline.saturating_duration_since(now).as_millis() as u64;
                if delay > remaining {
                    return Err(TransportError::Timeout);
                }
                tracing::debug!(attempt, delay_ms = delay, error = %err, "retrying transport call");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }
    }
}

pub(crate) fn backoff_delay_ms(attempt: u32, policy: &RetryPolicy) -> u64 {
    let exp = policy
        .initial_backoff_ms
        .saturating_mul(2u64.saturating_pow(attempt));
    let capped = exp.min(policy.max_backoff_ms);
    let jitter = if policy.jitter_ms == 0 {
        0
    } else {
        rand::thread_rng().gen_range(0..=policy.jitter_ms)
    };
    capped.saturating_add(jitter)
}
