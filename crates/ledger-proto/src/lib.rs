//! Wire messages for the ledger's public API and conversions to domain types.

pub mod convert;
pub mod services;

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::services as proto;

    fn account(num: i64) -> proto::AccountId {
        proto::AccountId {
            shard_num: 0,
            realm_num: 0,
            account: Some(proto::account_id::Account::AccountNum(num)),
        }
    }

    #[test]
    fn transaction_body_round_trip() {
        let body = proto::TransactionBody {
            transaction_id: Some(proto::TransactionId {
                transaction_valid_start: Some(proto::Timestamp {
                    seconds: 1_700_000_000,
                    nanos: 42,
                }),
                account_id: Some(account(1001)),
                scheduled: false,
                nonce: 0,
            }),
            node_account_id: Some(account(3)),
            transaction_fee: 100_000_000,
            transaction_valid_duration: Some(proto::Duration { seconds: 120 }),
            memo: "round trip".to_string(),
            data: Some(proto::transaction_body::Data::CryptoTransfer(
                proto::CryptoTransferTransactionBody {
                    transfers: Some(proto::TransferList {
                        account_amounts: vec![
                            proto::AccountAmount {
                                account_id: Some(account(1001)),
                                amount: -5,
                                is_approval: false,
                            },
                            proto::AccountAmount {
                                account_id: Some(account(1002)),
                                amount: 5,
                                is_approval: false,
                            },
                        ],
                    }),
                    token_transfers: Vec::new(),
                },
            )),
        };

        let encoded = body.encode_to_vec();
        let decoded =
            proto::TransactionBody::decode(encoded.as_slice()).expect("decode should succeed");
        assert_eq!(body, decoded);
    }

    #[test]
    fn unset_wrappers_are_not_encoded() {
        let body = proto::CryptoUpdateTransactionBody {
            account_id_to_update: Some(account(1001)),
            memo: Some(proto::StringValue {
                value: String::new(),
            }),
            ..Default::default()
        };
        let decoded = proto::CryptoUpdateTransactionBody::decode(body.encode_to_vec().as_slice())
            .expect("decode should succeed");
        // An empty memo wrapper survives; absent wrappers stay absent.
        assert_eq!(decoded.memo, Some(proto::StringValue::default()));
        assert!(decoded.max_automatic_token_associations.is_none());
        assert!(decoded.receiver_sig_required_wrapper.is_none());
    }

    #[test]
    fn receipt_response_round_trip() {
        let response = proto::Response {
            response: Some(proto::response::Response::TransactionGetReceipt(
                proto::TransactionGetReceiptResponse {
                    header: Some(proto::ResponseHeader::default()),
                    receipt: Some(proto::TransactionReceipt {
                        status: proto::ResponseCodeEnum::Success as i32,
                        serial_numbers: vec![1, 2, 3],
                        ..Default::default()
                    }),
                },
            )),
        };
        let decoded = proto::Response::decode(response.encode_to_vec().as_slice())
            .expect("decode should succeed");
        assert_eq!(response, decoded);
    }
}
