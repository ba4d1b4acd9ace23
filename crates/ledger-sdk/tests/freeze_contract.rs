//! Freeze, build and parse behavior shared by every transaction kind.

use std::{
    net::Ipv4Addr,
    time::{Duration, UNIX_EPOCH},
};

use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_sdk::{
    AccountCreateTransaction, AccountId, AccountUpdateTransaction, AnyTransaction, Client,
    Endpoint, Hbar, LedgerId, NodeCreateTransaction, NodeDeleteTransaction,
    NodeUpdateTransaction, Patch, PrivateKey, TokenId, TransactionError, TransactionId,
    TransferTransaction,
};
use ledger_types::KeyError;
use prost::Message;

fn fixed_id() -> TransactionId {
    TransactionId::with_valid_start(
        AccountId::from_num(1001),
        UNIX_EPOCH + Duration::from_secs(1_700_000_000),
    )
}

fn gossip(port: u16) -> Endpoint {
    Endpoint::ip(Ipv4Addr::new(10, 0, 0, 7), port)
}

#[test]
fn frozen_transaction_rejects_setters_and_builds_identically() {
    let mut tx = TransferTransaction::new();
    tx.hbar_transfer(AccountId::from_num(1001), Hbar::new(-3))
        .unwrap()
        .hbar_transfer(AccountId::from_num(1002), Hbar::new(3))
        .unwrap()
        .set_transaction_memo("rent")
        .unwrap()
        .set_transaction_id(fixed_id())
        .unwrap()
        .set_node_account_ids([AccountId::from_num(3)])
        .unwrap()
        .freeze()
        .unwrap();

    assert!(matches!(
        tx.hbar_transfer(AccountId::from_num(1003), Hbar::new(1)),
        Err(TransactionError::FrozenTransaction)
    ));
    assert!(matches!(
        tx.set_transaction_memo("other"),
        Err(TransactionError::FrozenTransaction)
    ));
    assert!(matches!(
        tx.set_max_transaction_fee(Hbar::new(5)),
        Err(TransactionError::FrozenTransaction)
    ));
    assert_eq!(tx.transaction_memo(), "rent");

    let first = tx.build().encode_to_vec();
    let second = tx.build().encode_to_vec();
    assert_eq!(first, second);
    assert_eq!(tx.to_bytes(), tx.to_bytes());
}

#[test]
fn frozen_error_message_names_both_causes() {
    let err = TransactionError::FrozenTransaction;
    assert_eq!(
        err.to_string(),
        "transaction is immutable; it has at least one signature or has been explicitly frozen"
    );
}

#[test]
fn frozen_transaction_reports_frozen_before_checking_arguments() {
    let mut update = AccountUpdateTransaction::new();
    update
        .set_account_id(AccountId::from_num(1001))
        .unwrap()
        .set_transaction_id(fixed_id())
        .unwrap()
        .set_node_account_ids([AccountId::from_num(3)])
        .unwrap()
        .freeze()
        .unwrap();
    let bytes = update.to_bytes();

    assert!(matches!(
        update.set_account_memo("m".repeat(101)),
        Err(TransactionError::FrozenTransaction)
    ));
    assert!(matches!(
        update.set_max_automatic_token_associations(-5),
        Err(TransactionError::FrozenTransaction)
    ));
    assert!(matches!(
        update.set_max_transaction_fee(Hbar::new(-1)),
        Err(TransactionError::FrozenTransaction)
    ));
    assert_eq!(update.to_bytes(), bytes);

    let mut create = AccountCreateTransaction::new();
    create
        .set_transaction_id(fixed_id())
        .unwrap()
        .set_node_account_ids([AccountId::from_num(3)])
        .unwrap()
        .freeze()
        .unwrap();
    assert!(matches!(
        create.set_initial_balance(Hbar::new(-1)),
        Err(TransactionError::FrozenTransaction)
    ));
    assert!(matches!(
        create.set_ecdsa_key_with_alias(&PrivateKey::generate_ed25519()),
        Err(TransactionError::FrozenTransaction)
    ));

    let mut node = NodeCreateTransaction::new();
    node.set_account_id(AccountId::from_num(4))
        .unwrap()
        .set_transaction_id(fixed_id())
        .unwrap()
        .set_node_account_ids([AccountId::from_num(3)])
        .unwrap()
        .freeze()
        .unwrap();
    assert!(matches!(
        node.set_gossip_endpoints((0..11).map(|port| gossip(50_000 + port)).collect()),
        Err(TransactionError::FrozenTransaction)
    ));
}

#[test]
fn first_signature_freezes_a_transaction_parsed_from_bytes() {
    let key = PrivateKey::generate_ed25519();
    let mut tx = TransferTransaction::new();
    tx.hbar_transfer(AccountId::from_num(1001), Hbar::new(-1))
        .unwrap()
        .hbar_transfer(AccountId::from_num(1002), Hbar::new(1))
        .unwrap()
        .set_transaction_id(fixed_id())
        .unwrap()
        .set_node_account_ids([AccountId::from_num(3)])
        .unwrap()
        .freeze()
        .unwrap();

    let mut parsed = TransferTransaction::from_bytes(&tx.to_bytes()).unwrap();
    assert!(!parsed.is_frozen());
    assert_eq!(parsed.build(), tx.build());

    parsed.freeze().unwrap().sign(&key).unwrap();
    assert!(matches!(
        parsed.set_transaction_memo("late"),
        Err(TransactionError::FrozenTransaction)
    ));
}

#[test]
fn memo_only_account_update_omits_every_other_field() {
    let mut tx = AccountUpdateTransaction::new();
    tx.set_account_memo("new memo").unwrap();
    let Some(Data::CryptoUpdateAccount(body)) = tx.build().data else {
        panic!("expected an account update body");
    };
    assert_eq!(
        body,
        proto::CryptoUpdateTransactionBody {
            memo: Some(proto::StringValue {
                value: "new memo".to_owned()
            }),
            ..Default::default()
        }
    );
    assert_eq!(body.max_automatic_token_associations, None);
    assert_eq!(body.receiver_sig_required_wrapper, None);
    assert_eq!(body.staked_id, None);
    assert_eq!(tx.account_memo(), Patch::Set(&"new memo".to_owned()));
}

#[test]
fn eleventh_gossip_endpoint_is_rejected_without_partial_append() {
    let mut tx = NodeCreateTransaction::new();
    for port in 0..10 {
        tx.add_gossip_endpoint(gossip(50_000 + port)).unwrap();
    }
    let err = tx.add_gossip_endpoint(gossip(50_010)).unwrap_err();
    assert!(matches!(err, TransactionError::InvalidArgument(_)));
    assert_eq!(tx.gossip_endpoints().len(), 10);
    assert_eq!(tx.gossip_endpoints()[9], gossip(50_009));

    let err = tx
        .set_gossip_endpoints((0..11).map(gossip).collect())
        .unwrap_err();
    assert!(matches!(err, TransactionError::InvalidArgument(_)));
    assert_eq!(tx.gossip_endpoints().len(), 10);
}

#[test]
fn node_kinds_need_a_node_id_to_freeze() {
    let mut client = Client::for_testnet();
    client
        .set_network([("127.0.0.1:50211".to_owned(), AccountId::from_num(3))])
        .set_operator(AccountId::from_num(1001), PrivateKey::generate_ed25519());

    let mut update = NodeUpdateTransaction::new();
    update.set_description("rack 4").unwrap();
    assert!(matches!(
        update.freeze_with(&client),
        Err(TransactionError::InvalidState(_))
    ));
    assert!(!update.is_frozen());
    update.set_node_id(2).unwrap().freeze_with(&client).unwrap();

    let mut delete = NodeDeleteTransaction::new();
    assert!(matches!(
        delete.freeze_with(&client),
        Err(TransactionError::InvalidState(_))
    ));
    delete.set_node_id(2).unwrap().freeze_with(&client).unwrap();
    assert!(delete.is_frozen());
}

#[test]
fn alias_from_ed25519_key_is_a_bad_key() {
    let mut tx = AccountCreateTransaction::new();
    let err = tx
        .set_ecdsa_key_with_alias(&PrivateKey::generate_ed25519())
        .unwrap_err();
    assert!(matches!(
        err,
        TransactionError::Key(KeyError::BadKey("Private key is not ECDSA"))
    ));
    assert_eq!(err.to_string(), "Private key is not ECDSA");
}

#[test]
fn live_hash_bytes_cannot_be_parsed() {
    let body = proto::TransactionBody {
        transaction_id: Some(fixed_id().into()),
        node_account_id: Some(AccountId::from_num(3).into()),
        data: Some(Data::CryptoDeleteLiveHash(
            proto::CryptoDeleteLiveHashTransactionBody::default(),
        )),
        ..Default::default()
    };
    let signed = proto::SignedTransaction {
        body_bytes: body.encode_to_vec(),
        sig_map: None,
    };
    let bytes = proto::TransactionList {
        transaction_list: vec![proto::Transaction {
            signed_transaction_bytes: signed.encode_to_vec(),
        }],
    }
    .encode_to_vec();

    assert!(matches!(
        AnyTransaction::from_bytes(&bytes),
        Err(TransactionError::UnsupportedOperation(_))
    ));
}

#[test]
fn freeze_with_validates_checksums_when_enabled() {
    let mut client = Client::for_ledger(LedgerId::mainnet());
    client
        .set_network([("127.0.0.1:50211".to_owned(), AccountId::from_num(3))])
        .set_operator(AccountId::from_num(1001), PrivateKey::generate_ed25519())
        .set_auto_validate_checksums(true);

    let wrong_ledger: TokenId = TokenId::from_num(77)
        .to_string_with_checksum(&LedgerId::testnet())
        .parse()
        .unwrap();
    let mut tx = TransferTransaction::new();
    tx.token_transfer(wrong_ledger, AccountId::from_num(1001), -1)
        .unwrap()
        .token_transfer(wrong_ledger, AccountId::from_num(1002), 1)
        .unwrap();
    assert!(matches!(tx.freeze_with(&client), Err(TransactionError::Id(_))));
    assert!(!tx.is_frozen());
}
