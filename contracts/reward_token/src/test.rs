extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address, Bytes, Env};

use crate::{ContractError, RewardTokenContract, RewardTokenContractClient, MAX_METADATA_LEN};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, RewardTokenContractClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(RewardTokenContract, ());
    let client = RewardTokenContractClient::new(&env, &contract_id);

    (env, client)
}

fn metadata(env: &Env, content: &[u8]) -> Bytes {
    Bytes::from_slice(env, content)
}

/// Copy a soroban String into a std String for assertions.
fn to_std_string(s: &soroban_sdk::String) -> std::string::String {
    let mut buf = std::vec![0u8; s.len() as usize];
    s.copy_into_slice(&mut buf);
    std::string::String::from_utf8(buf).unwrap()
}

// ── Balances ──────────────────────────────────────────────────────────────────

#[test]
fn test_balance_zero_for_unminted_token() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    assert_eq!(client.balance_of(&holder, &1), 0);
}

#[test]
fn test_mint_updates_balance_and_metadata() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    client.mint(&holder, &1, &10, &metadata(&env, b"metadata"));

    assert_eq!(client.balance_of(&holder, &1), 10);
    assert_eq!(client.token_metadata(&1), metadata(&env, b"metadata"));
}

#[test]
fn test_mint_accumulates_on_same_id() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    client.mint(&holder, &1, &10, &metadata(&env, b"first"));
    client.mint(&holder, &1, &5, &metadata(&env, b"second"));

    assert_eq!(client.balance_of(&holder, &1), 15);
    // Metadata follows the latest mint.
    assert_eq!(client.token_metadata(&1), metadata(&env, b"second"));
}

#[test]
fn test_mint_zero_fails() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    let result = client.try_mint(&holder, &1, &0, &metadata(&env, b"m"));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_mint_oversized_metadata_fails() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    let blob = Bytes::from_slice(&env, &[b'x'; (MAX_METADATA_LEN + 1) as usize]);
    let result = client.try_mint(&holder, &1, &1, &blob);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::MetadataTooLarge),
        _ => unreachable!("Expected MetadataTooLarge error"),
    }
}

// ── Batch operations ──────────────────────────────────────────────────────────

#[test]
fn test_mint_batch_updates_balances_and_metadata() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    client.mint_batch(
        &holder,
        &vec![&env, 1u64, 2u64],
        &vec![&env, 10i128, 20i128],
        &vec![&env, metadata(&env, b"metadata1"), metadata(&env, b"metadata2")],
    );

    assert_eq!(client.balance_of(&holder, &1), 10);
    assert_eq!(client.balance_of(&holder, &2), 20);
    assert_eq!(client.token_metadata(&1), metadata(&env, b"metadata1"));
    assert_eq!(client.token_metadata(&2), metadata(&env, b"metadata2"));
}

#[test]
fn test_mint_batch_length_mismatch_fails() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    let result = client.try_mint_batch(
        &holder,
        &vec![&env, 1u64, 2u64],
        &vec![&env, 10i128],
        &vec![&env, metadata(&env, b"m")],
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::LengthMismatch),
        _ => unreachable!("Expected LengthMismatch error"),
    }
}

#[test]
fn test_balance_of_batch() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    client.mint(&holder, &1, &10, &metadata(&env, b"m1"));
    client.mint(&holder, &2, &20, &metadata(&env, b"m2"));

    let balances = client.balance_of_batch(
        &vec![&env, holder.clone(), holder.clone()],
        &vec![&env, 1u64, 2u64],
    );
    assert_eq!(balances, vec![&env, 10i128, 20i128]);
}

// ── Operator approval ─────────────────────────────────────────────────────────

#[test]
fn test_set_approval_for_all() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    let operator = Address::generate(&env);

    assert!(!client.is_approved_for_all(&holder, &operator));

    client.set_approval_for_all(&holder, &operator, &true);
    assert!(client.is_approved_for_all(&holder, &operator));

    client.set_approval_for_all(&holder, &operator, &false);
    assert!(!client.is_approved_for_all(&holder, &operator));
}

// ── Transfers ─────────────────────────────────────────────────────────────────

#[test]
fn test_holder_can_transfer_own_tokens() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    let recipient = Address::generate(&env);
    client.mint(&holder, &1, &10, &metadata(&env, b"m"));

    client.transfer(&holder, &holder, &recipient, &1, &4);

    assert_eq!(client.balance_of(&holder, &1), 6);
    assert_eq!(client.balance_of(&recipient, &1), 4);
}

#[test]
fn test_approved_operator_can_transfer() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    let operator = Address::generate(&env);
    client.mint(&holder, &1, &10, &metadata(&env, b"m"));
    client.set_approval_for_all(&holder, &operator, &true);

    client.transfer(&operator, &holder, &operator, &1, &5);

    assert_eq!(client.balance_of(&holder, &1), 5);
    assert_eq!(client.balance_of(&operator, &1), 5);
}

#[test]
fn test_unapproved_operator_cannot_transfer() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    let intruder = Address::generate(&env);
    client.mint(&holder, &1, &10, &metadata(&env, b"m"));

    let result = client.try_transfer(&intruder, &holder, &intruder, &1, &5);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotApproved),
        _ => unreachable!("Expected NotApproved error"),
    }
    assert_eq!(client.balance_of(&holder, &1), 10);
}

#[test]
fn test_transfer_exceeding_balance_fails() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    let recipient = Address::generate(&env);
    client.mint(&holder, &1, &10, &metadata(&env, b"m"));

    let result = client.try_transfer(&holder, &holder, &recipient, &1, &11);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientBalance),
        _ => unreachable!("Expected InsufficientBalance error"),
    }
    assert_eq!(client.balance_of(&holder, &1), 10);
    assert_eq!(client.balance_of(&recipient, &1), 0);
}

// ── URI ───────────────────────────────────────────────────────────────────────

#[test]
fn test_uri_has_json_base64_prefix() {
    let (env, client) = setup();

    let holder = Address::generate(&env);
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><rect width="100" height="100" fill="#0000FF"/></svg>"##;
    client.mint(&holder, &1, &10, &metadata(&env, svg));

    let uri = to_std_string(&client.uri(&1));
    assert!(uri.starts_with("data:application/json;base64,"));
}

#[test]
fn test_uri_unknown_token_fails() {
    let (_env, client) = setup();

    let result = client.try_uri(&99);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::TokenNotFound),
        _ => unreachable!("Expected TokenNotFound error"),
    }
}
