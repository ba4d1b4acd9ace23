//! Integration tests for execute, receipt and record flows against the mock transport.

use ledger_proto::services::{self as proto, ResponseCodeEnum};
use ledger_sdk::{
    AccountId, Client, ClientError, Hbar, MockTransport, PrivateKey, RetryPolicy, Status,
    TokenMintTransaction, TokenId, TransferTransaction, TransportError,
};
use prost::Message;

const OPERATOR: AccountId = AccountId::from_num(1001);
const RECIPIENT: AccountId = AccountId::from_num(1002);

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        initial_backoff_ms: 1,
        max_backoff_ms: 2,
        jitter_ms: 0,
    }
}

fn client(key: PrivateKey) -> Client {
    let mut client = Client::for_testnet();
    client
        .set_network([
            ("127.0.0.1:50211".to_owned(), AccountId::from_num(3)),
            ("127.0.0.1:50212".to_owned(), AccountId::from_num(4)),
        ])
        .set_operator(OPERATOR, key)
        .set_receipt_retry(fast_retry(5));
    client
}

fn transfer() -> TransferTransaction {
    let mut tx = TransferTransaction::new();
    tx.hbar_transfer(OPERATOR, Hbar::new(-2))
        .unwrap()
        .hbar_transfer(RECIPIENT, Hbar::new(2))
        .unwrap();
    tx
}

#[tokio::test]
async fn transfer_executes_and_reaches_success() {
    let key = PrivateKey::generate_ed25519();
    let client = client(key.clone());
    let transport = MockTransport::new();

    let mut tx = transfer();
    let response = tx.execute(&client, &transport).await.unwrap();
    assert_eq!(response.node_account_id, AccountId::from_num(3));
    assert_eq!(response.transaction_id.account_id, OPERATOR);
    assert_eq!(response.transaction_hash, tx.transaction_hash().unwrap());
    assert!(tx.is_frozen());
    assert_eq!(tx.signers(), vec![key.public_key()]);

    let submissions = transport.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].0.path(), "/proto.CryptoService/cryptoTransfer");

    let signed = proto::SignedTransaction::decode(
        submissions[0].1.signed_transaction_bytes.as_slice(),
    )
    .unwrap();
    let pair = &signed.sig_map.unwrap().sig_pair[0];
    let Some(proto::signature_pair::Signature::Ed25519(signature)) = &pair.signature else {
        panic!("expected an ed25519 signature");
    };
    ledger_crypto::verify(&key.public_key(), &signed.body_bytes, signature).unwrap();

    let receipt = response.get_receipt(&client, &transport).await.unwrap();
    assert!(receipt.status.is_success());
}

#[tokio::test]
async fn receipt_polling_waits_out_unknown_status() {
    let client = client(PrivateKey::generate_ecdsa());
    let transport = MockTransport::new().with_pending_receipt_polls(2);

    let response = transfer().execute(&client, &transport).await.unwrap();
    let receipt = response.get_receipt(&client, &transport).await.unwrap();
    assert!(receipt.status.is_success());
    assert_eq!(transport.query_count(), 3);
}

#[tokio::test]
async fn exhausted_receipt_polling_reports_the_last_status() {
    let mut client = client(PrivateKey::generate_ed25519());
    client.set_receipt_retry(fast_retry(1));
    let transport = MockTransport::new().with_pending_receipt_polls(5);

    let response = transfer().execute(&client, &transport).await.unwrap();
    let err = response.get_receipt(&client, &transport).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::ReceiptStatus {
            status: Status::Known(ResponseCodeEnum::Unknown),
            ..
        }
    ));
    assert_eq!(transport.query_count(), 2);
}

#[tokio::test]
async fn failed_precheck_surfaces_the_code() {
    let client = client(PrivateKey::generate_ed25519());
    let transport = MockTransport::new().with_precheck(ResponseCodeEnum::InsufficientPayerBalance);

    let err = transfer().execute(&client, &transport).await.unwrap_err();
    match err {
        ClientError::Precheck {
            status,
            transaction_id,
        } => {
            assert_eq!(status, Status::Known(ResponseCodeEnum::InsufficientPayerBalance));
            assert_eq!(transaction_id.account_id, OPERATOR);
        }
        other => panic!("expected a precheck failure, got {other:?}"),
    }
}

#[tokio::test]
async fn submit_retries_follow_the_client_policy() {
    let mut client = client(PrivateKey::generate_ed25519());
    client.set_request_retry(fast_retry(0));
    let transport = MockTransport::new().with_unavailable_submits(1);
    let err = transfer().execute(&client, &transport).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(TransportError::Unavailable(_))));
    assert!(transport.submissions().is_empty());

    client.set_request_retry(fast_retry(1));
    let transport = MockTransport::new().with_unavailable_submits(1);
    let response = transfer().execute(&client, &transport).await.unwrap();
    assert_eq!(transport.submissions().len(), 1);
    assert_eq!(response.transaction_id.account_id, OPERATOR);
}

#[tokio::test]
async fn failed_receipt_status_is_an_error() {
    let client = client(PrivateKey::generate_ed25519());
    let transport = MockTransport::new().with_receipt(proto::TransactionReceipt {
        status: ResponseCodeEnum::InvalidSignature as i32,
        ..Default::default()
    });

    let response = transfer().execute(&client, &transport).await.unwrap();
    let err = response.get_receipt(&client, &transport).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::ReceiptStatus {
            status: Status::Known(ResponseCodeEnum::InvalidSignature),
            ..
        }
    ));
}

#[tokio::test]
async fn record_carries_the_submitted_transfers() {
    let client = client(PrivateKey::generate_ed25519());
    let transport = MockTransport::new();

    let mut tx = transfer();
    tx.set_transaction_memo("lunch").unwrap();
    let response = tx.execute(&client, &transport).await.unwrap();
    let record = response.get_record(&client, &transport).await.unwrap();

    assert_eq!(record.memo, "lunch");
    assert_eq!(record.transaction_id, Some(response.transaction_id));
    assert_eq!(record.transaction_hash, response.transaction_hash);
    assert_eq!(record.hbar_transfers.len(), 2);
    assert!(record
        .hbar_transfers
        .iter()
        .any(|transfer| transfer.account_id == RECIPIENT && transfer.amount == Hbar::new(2)));
}

#[tokio::test]
async fn execute_without_operator_fails_before_submitting() {
    let mut client = Client::for_testnet();
    client.set_network([("127.0.0.1:50211".to_owned(), AccountId::from_num(3))]);
    let transport = MockTransport::new();

    let mut tx = TokenMintTransaction::new();
    tx.set_token_id(TokenId::from_num(9)).unwrap().set_amount(100).unwrap();
    let err = tx.execute(&client, &transport).await.unwrap_err();
    assert!(matches!(err, ClientError::MissingOperator));
    assert!(!tx.is_frozen());
    assert!(transport.submissions().is_empty());
}

#[tokio::test]
async fn mint_receipt_reports_new_supply() {
    let client = client(PrivateKey::generate_ed25519());
    let transport = MockTransport::new().with_receipt(proto::TransactionReceipt {
        status: ResponseCodeEnum::Success as i32,
        new_total_supply: 1_100,
        ..Default::default()
    });

    let mut tx = TokenMintTransaction::new();
    tx.set_token_id(TokenId::from_num(9)).unwrap().set_amount(100).unwrap();
    let response = tx.execute(&client, &transport).await.unwrap();
    assert_eq!(transport.submissions()[0].0.path(), "/proto.TokenService/mintToken");

    let receipt = response.get_receipt(&client, &transport).await.unwrap();
    assert_eq!(receipt.total_supply, 1_100);
}
