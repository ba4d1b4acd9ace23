use ledger_proto::services::ResponseCodeEnum;
use tracing::{debug, info, warn};

use super::{Transaction, TransactionData};
use crate::{
    client::Client,
    error::{ClientError, TransactionError},
    receipt::Status,
    response::TransactionResponse,
    transport::{retry_with_backoff, Transport},
};

impl<D: TransactionData> Transaction<D> {
    /// Freezes with `client` defaults, signs as the operator and submits the
    /// envelope for the first node through `transport`.
    ///
    /// Only the precheck is awaited; see [`TransactionResponse::get_receipt`] for
    /// the consensus outcome.
    pub async fn execute<T: Transport + ?Sized>(
        &mut self,
        client: &Client,
        transport: &T,
    ) -> Result<TransactionResponse, ClientError> {
        let signer = client.operator_signer().ok_or(ClientError::MissingOperator)?;
        self.freeze_with(client)?;
        self.sign(signer)?;

        let transaction_id = self
            .transaction_id
            .ok_or_else(|| TransactionError::invalid_state("frozen transaction has no id"))?;
        let node_account_id = self
            .node_account_ids()
            .and_then(|ids| ids.first().copied())
            .ok_or_else(|| TransactionError::invalid_state("frozen transaction has no nodes"))?;
        let envelope = self
            .to_wire()
            .into_iter()
            .next()
            .ok_or_else(|| TransactionError::invalid_state("transaction has no node bodies"))?;
        let transaction_hash = self.transaction_hash()?;
        let method = self.method();

        debug!(
            %transaction_id,
            %node_account_id,
            method = %method.path(),
            "submitting transaction"
        );
        let response = retry_with_backoff(client.request_retry(), client.request_timeout(), || {
            transport.submit(method, envelope.clone())
        })
        .await?;

        let precheck = Status::from_code(response.node_transaction_precheck_code);
        if precheck != Status::Known(ResponseCodeEnum::Ok) {
            warn!(%transaction_id, %precheck, "transaction failed precheck");
            return Err(ClientError::Precheck {
                status: precheck,
                transaction_id,
            });
        }

        info!(%transaction_id, %node_account_id, hash = %transaction_hash, "transaction accepted");
        Ok(TransactionResponse {
            node_account_id,
            transaction_id,
            transaction_hash,
        })
    }
}
