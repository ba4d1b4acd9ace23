//! Handle returned by a successful submission, used to wait for consensus.

use std::time::Duration;

use ledger_proto::services::{self as proto, ResponseCodeEnum};
use ledger_types::{AccountId, TransactionHash};
use tracing::debug;

use crate::{
    client::Client,
    error::ClientError,
    receipt::{Status, TransactionReceipt, TransactionRecord},
    transaction_id::TransactionId,
    transport::{backoff_delay_ms, retry_with_backoff, Method, Transport, GET_RECEIPT, GET_RECORD},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionResponse {
    pub node_account_id: AccountId,
    pub transaction_id: TransactionId,
    pub transaction_hash: TransactionHash,
}

/// One answer of a receipt or record query, split into the node's precheck and
/// the payload it carried.
struct Answer<R> {
    precheck: Status,
    payload: Option<R>,
}

impl TransactionResponse {
    /// Polls until the receipt is final, then fails unless its status is `SUCCESS`.
    pub async fn get_receipt<T: Transport + ?Sized>(
        &self,
        client: &Client,
        transport: &T,
    ) -> Result<TransactionReceipt, ClientError> {
        let receipt = self
            .poll(client, transport, GET_RECEIPT, self.receipt_query(), receipt_answer, |receipt| {
                receipt.status
            })
            .await?;
        let receipt = TransactionReceipt::try_from(receipt)?;
        receipt.validate_status(self.transaction_id)?;
        Ok(receipt)
    }

    /// Waits for a successful receipt, then fetches the full record.
    pub async fn get_record<T: Transport + ?Sized>(
        &self,
        client: &Client,
        transport: &T,
    ) -> Result<TransactionRecord, ClientError> {
        self.get_receipt(client, transport).await?;
        let record = self
            .poll(client, transport, GET_RECORD, self.record_query(), record_answer, |record| {
                record
                    .receipt
                    .as_ref()
                    .map_or(ResponseCodeEnum::Unknown as i32, |receipt| receipt.status)
            })
            .await?;
        let record = TransactionRecord::try_from(record)?;
        record.receipt.validate_status(self.transaction_id)?;
        Ok(record)
    }

    fn receipt_query(&self) -> proto::Query {
        proto::Query {
            query: Some(proto::query::Query::TransactionGetReceipt(
                proto::TransactionGetReceiptQuery {
                    transaction_id: Some(self.transaction_id.into()),
                    ..Default::default()
                },
            )),
        }
    }

    fn record_query(&self) -> proto::Query {
        proto::Query {
            query: Some(proto::query::Query::TransactionGetRecord(
                proto::TransactionGetRecordQuery {
                    transaction_id: Some(self.transaction_id.into()),
                    ..Default::default()
                },
            )),
        }
    }

    /// Repeats `query` while either the precheck or the payload status says the
    /// answer is not final, backing off per the client's receipt policy.
    async fn poll<T, R>(
        &self,
        client: &Client,
        transport: &T,
        method: Method,
        query: proto::Query,
        parse: impl Fn(proto::Response) -> Option<Answer<R>>,
        status_code: impl Fn(&R) -> i32,
    ) -> Result<R, ClientError>
    where
        T: Transport + ?Sized,
    {
        let policy = client.receipt_retry();
        let mut attempt = 0u32;
        loop {
            let response =
                retry_with_backoff(client.request_retry(), client.request_timeout(), || {
                    transport.query(method, query.clone())
                })
                .await?;
            let answer = parse(response)
                .ok_or(ClientError::UnexpectedResponse("answer does not match the query"))?;
            let status = match (&answer.precheck, &answer.payload) {
                (Status::Known(ResponseCodeEnum::Ok), Some(payload)) => {
                    Status::from_code(status_code(payload))
                }
                _ => answer.precheck,
            };

            if status.is_retryable_for_receipt() && attempt < policy.max_retries {
                let delay = backoff_delay_ms(attempt, policy);
                attempt += 1;
                debug!(
                    transaction_id = %self.transaction_id,
                    %status,
                    attempt,
                    delay_ms = delay,
                    "consensus outcome not final yet"
                );
                tokio::time::sleep(Duration::from_millis(delay)).await;
                continue;
            }

            if answer.precheck != Status::Known(ResponseCodeEnum::Ok) {
                return Err(ClientError::Precheck {
                    status: answer.precheck,
                    transaction_id: self.transaction_id,
                });
            }
            return answer
                .payload
                .ok_or(ClientError::UnexpectedResponse("answer carries no payload"));
        }
    }
}

fn precheck_of(header: Option<proto::ResponseHeader>) -> Status {
    header.map_or(Status::Known(ResponseCodeEnum::Ok), |header| {
        Status::from_code(header.node_transaction_precheck_code)
    })
}

fn receipt_answer(response: proto::Response) -> Option<Answer<proto::TransactionReceipt>> {
    match response.response? {
        proto::response::Response::TransactionGetReceipt(answer) => Some(Answer {
            precheck: precheck_of(answer.header),
            payload: answer.receipt,
        }),
        _ => None,
    }
}

fn record_answer(response: proto::Response) -> Option<Answer<proto::TransactionRecord>> {
    match response.response? {
        proto::response::Response::TransactionGetRecord(answer) => Some(Answer {
            precheck: precheck_of(answer.header),
            payload: answer.transaction_record,
        }),
        _ => None,
    }
}
