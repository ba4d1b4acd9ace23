//! Allowance approval, spending and revocation as seen on the wire.

use std::time::{Duration, UNIX_EPOCH};

use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_sdk::{
    AccountAllowanceApproveTransaction, AccountId, AllowanceAction, AllowanceGrant,
    AllowanceIndex, AllowanceResource, Hbar, NftSerials, TokenId, TransactionId,
    TransferTransaction,
};

const OWNER: AccountId = AccountId::from_num(1001);
const SPENDER: AccountId = AccountId::from_num(1002);
const RECIPIENT: AccountId = AccountId::from_num(1003);

fn token() -> TokenId {
    TokenId::from_num(5005)
}

fn approve_body(tx: &AccountAllowanceApproveTransaction) -> proto::CryptoApproveAllowanceTransactionBody {
    match tx.build().data {
        Some(Data::CryptoApproveAllowance(body)) => body,
        other => panic!("expected an approve allowance body, got {other:?}"),
    }
}

#[test]
fn spender_moves_owner_hbar_without_touching_its_own_balance() {
    let mut approve = AccountAllowanceApproveTransaction::new();
    approve
        .approve_hbar_allowance(Some(OWNER), SPENDER, Hbar::new(10))
        .unwrap();
    let body = approve_body(&approve);
    assert_eq!(body.crypto_allowances.len(), 1);
    assert_eq!(body.crypto_allowances[0].owner, Some(OWNER.into()));
    assert_eq!(body.crypto_allowances[0].spender, Some(SPENDER.into()));
    assert_eq!(body.crypto_allowances[0].amount, Hbar::new(10).to_tinybars());

    let mut transfer = TransferTransaction::new();
    transfer
        .approved_hbar_transfer(OWNER, Hbar::new(-5))
        .unwrap()
        .hbar_transfer(RECIPIENT, Hbar::new(5))
        .unwrap()
        .set_transaction_id(TransactionId::with_valid_start(
            SPENDER,
            UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        ))
        .unwrap()
        .set_node_account_ids([AccountId::from_num(3)])
        .unwrap()
        .freeze()
        .unwrap();

    let Some(Data::CryptoTransfer(body)) = transfer.build().data else {
        panic!("expected a transfer body");
    };
    let amounts = body.transfers.unwrap_or_default().account_amounts;
    assert_eq!(
        amounts,
        vec![
            proto::AccountAmount {
                account_id: Some(OWNER.into()),
                amount: Hbar::new(-5).to_tinybars(),
                is_approval: true,
            },
            proto::AccountAmount {
                account_id: Some(RECIPIENT.into()),
                amount: Hbar::new(5).to_tinybars(),
                is_approval: false,
            },
        ]
    );
    assert!(amounts
        .iter()
        .all(|entry| entry.account_id != Some(SPENDER.into())));
}

#[test]
fn serial_grants_for_one_tuple_share_an_accumulator() {
    let mut approve = AccountAllowanceApproveTransaction::new();
    approve
        .approve_token_nft_allowance(token().nft(1), Some(OWNER), SPENDER)
        .unwrap()
        .approve_token_nft_allowance(token().nft(2), Some(OWNER), SPENDER)
        .unwrap();

    assert_eq!(
        approve.allowances(),
        vec![AllowanceGrant {
            action: AllowanceAction::Approve,
            owner: Some(OWNER),
            spender: Some(SPENDER),
            delegating_spender: None,
            resource: AllowanceResource::Nft {
                token_id: token(),
                serials: NftSerials::Serials(vec![1, 2]),
            },
        }]
    );
    let body = approve_body(&approve);
    assert_eq!(body.nft_allowances.len(), 1);
    assert_eq!(body.nft_allowances[0].serial_numbers, vec![1, 2]);
}

#[test]
fn all_serials_grants_are_recorded_once_per_call() {
    let mut approve = AccountAllowanceApproveTransaction::new();
    approve
        .approve_token_nft_allowance_all_serials(token(), Some(OWNER), SPENDER)
        .unwrap()
        .approve_token_nft_allowance_all_serials(token(), Some(OWNER), SPENDER)
        .unwrap();

    let grants = approve.allowances();
    assert_eq!(grants.len(), 2);
    assert!(grants.iter().all(|grant| matches!(
        grant.resource,
        AllowanceResource::Nft {
            serials: NftSerials::AllSerials(true),
            ..
        }
    )));
    assert_eq!(approve_body(&approve).nft_allowances.len(), 2);
}

#[test]
fn single_serial_revocation_stays_apart_from_an_all_serials_grant() {
    let mut index = AllowanceIndex::new();
    index.grant_all_serials(Some(OWNER), SPENDER, token(), true);
    index.revoke_serial(Some(OWNER), Some(SPENDER), token().nft(3));
    index.revoke_serial(Some(OWNER), Some(SPENDER), token().nft(4));

    let grants = index.snapshot();
    assert_eq!(grants.len(), 2);
    assert_eq!(grants[0].action, AllowanceAction::Approve);
    assert_eq!(
        grants[0].resource,
        AllowanceResource::Nft {
            token_id: token(),
            serials: NftSerials::AllSerials(true),
        }
    );
    assert_eq!(grants[1].action, AllowanceAction::Revoke);
    assert_eq!(
        grants[1].resource,
        AllowanceResource::Nft {
            token_id: token(),
            serials: NftSerials::Serials(vec![3, 4]),
        }
    );
}

#[test]
fn fee_payer_grants_accumulate_apart_from_explicit_owner_grants() {
    let mut approve = AccountAllowanceApproveTransaction::new();
    approve
        .approve_token_nft_allowance(token().nft(1), None, SPENDER)
        .unwrap()
        .approve_token_nft_allowance(token().nft(2), Some(OWNER), SPENDER)
        .unwrap()
        .approve_token_nft_allowance(token().nft(3), None, SPENDER)
        .unwrap()
        .approve_hbar_allowance(None, SPENDER, Hbar::new(1))
        .unwrap();

    let grants = approve.allowances();
    assert_eq!(grants.len(), 3);
    assert_eq!(grants[0].owner, None);
    assert_eq!(
        grants[0].resource,
        AllowanceResource::Nft {
            token_id: token(),
            serials: NftSerials::Serials(vec![1, 3]),
        }
    );
    assert_eq!(grants[1].owner, Some(OWNER));
    assert_eq!(
        grants[1].resource,
        AllowanceResource::Nft {
            token_id: token(),
            serials: NftSerials::Serials(vec![2]),
        }
    );

    let body = approve_body(&approve);
    assert_eq!(body.nft_allowances.len(), 2);
    assert_eq!(body.nft_allowances[0].owner, None);
    assert_eq!(body.nft_allowances[0].serial_numbers, vec![1, 3]);
    assert_eq!(body.crypto_allowances[0].owner, None);
}
