#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired for every minted token id (batch mints fire one per id).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintedEvent {
    pub to: Address,
    pub token_id: u64,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when balance moves between holders.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferredEvent {
    pub operator: Address,
    pub from: Address,
    pub to: Address,
    pub token_id: u64,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a holder grants or revokes an operator.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalSetEvent {
    pub owner: Address,
    pub operator: Address,
    pub approved: bool,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_minted(env: &Env, to: Address, token_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("MINTED"), to.clone()),
        MintedEvent {
            to,
            token_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_transferred(
    env: &Env,
    operator: Address,
    from: Address,
    to: Address,
    token_id: u64,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("XFER"), from.clone(), to.clone()),
        TransferredEvent {
            operator,
            from,
            to,
            token_id,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_approval_set(env: &Env, owner: Address, operator: Address, approved: bool) {
    env.events().publish(
        (symbol_short!("APPROVAL"), owner.clone()),
        ApprovalSetEvent {
            owner,
            operator,
            approved,
            timestamp: env.ledger().timestamp(),
        },
    );
}
