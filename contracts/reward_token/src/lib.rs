#![no_std]

pub mod events;
pub mod uri;

use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, Bytes, Env, String, Symbol, Vec,
};

// ── Storage key constants ────────────────────────────────────────────────────

// Per-token persistent storage uses tuple keys:
//   (BAL, token_id, owner)      → i128
//   (META, token_id)            → Bytes
//   (OPR, owner, operator)      → bool
const BALANCE: Symbol = symbol_short!("BAL");
const METADATA: Symbol = symbol_short!("META");
const OPERATOR: Symbol = symbol_short!("OPR");

/// Upper bound on a metadata blob. Keeps `uri` output inside its render
/// buffer: base64 expansion of the blob plus the JSON envelope stays well
/// under `uri::MAX_URI_LEN`.
pub const MAX_METADATA_LEN: u32 = 4_096;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    InvalidInput = 1,
    LengthMismatch = 2,
    NotApproved = 3,
    InsufficientBalance = 4,
    TokenNotFound = 5,
    MetadataTooLarge = 6,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Multi-token issuance registry.
///
/// Balances are tracked per `(token_id, holder)` pair; each token id carries
/// one opaque metadata blob set on first mint. Minting is open — the staking
/// pool (or anyone else) issues new ids freely, mirroring the reward-badge
/// semantics of the original deployment.
#[contract]
pub struct RewardTokenContract;

#[contractimpl]
impl RewardTokenContract {
    // ── Issuance ────────────────────────────────────────────────────────────

    /// Mint `amount` units of `token_id` to `to`, attaching `metadata`.
    ///
    /// Re-minting an existing id adds to balances and overwrites the stored
    /// metadata, as the original contract does.
    pub fn mint(
        env: Env,
        to: Address,
        token_id: u64,
        amount: i128,
        metadata: Bytes,
    ) -> Result<(), ContractError> {
        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        if metadata.len() > MAX_METADATA_LEN {
            return Err(ContractError::MetadataTooLarge);
        }

        let key = (BALANCE, token_id, to.clone());
        let prev: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        env.storage()
            .persistent()
            .set(&key, &prev.saturating_add(amount));

        env.storage()
            .persistent()
            .set(&(METADATA, token_id), &metadata);

        events::publish_minted(&env, to, token_id, amount);

        Ok(())
    }

    /// Element-wise batch mint. All three vectors must have equal length.
    pub fn mint_batch(
        env: Env,
        to: Address,
        token_ids: Vec<u64>,
        amounts: Vec<i128>,
        metadatas: Vec<Bytes>,
    ) -> Result<(), ContractError> {
        if token_ids.len() != amounts.len() || token_ids.len() != metadatas.len() {
            return Err(ContractError::LengthMismatch);
        }

        for i in 0..token_ids.len() {
            Self::mint(
                env.clone(),
                to.clone(),
                token_ids.get_unchecked(i),
                amounts.get_unchecked(i),
                metadatas.get_unchecked(i),
            )?;
        }

        Ok(())
    }

    // ── Balances ────────────────────────────────────────────────────────────

    /// Balance of `token_id` held by `owner`; 0 for unminted ids.
    pub fn balance_of(env: Env, owner: Address, token_id: u64) -> i128 {
        env.storage()
            .persistent()
            .get(&(BALANCE, token_id, owner))
            .unwrap_or(0)
    }

    /// Pairwise balances for `(owners[i], token_ids[i])`.
    pub fn balance_of_batch(
        env: Env,
        owners: Vec<Address>,
        token_ids: Vec<u64>,
    ) -> Result<Vec<i128>, ContractError> {
        if owners.len() != token_ids.len() {
            return Err(ContractError::LengthMismatch);
        }

        let mut balances = Vec::new(&env);
        for i in 0..owners.len() {
            balances.push_back(Self::balance_of(
                env.clone(),
                owners.get_unchecked(i),
                token_ids.get_unchecked(i),
            ));
        }

        Ok(balances)
    }

    // ── Operator approval ───────────────────────────────────────────────────

    /// Grant or revoke `operator`'s right to move all of `owner`'s tokens.
    pub fn set_approval_for_all(env: Env, owner: Address, operator: Address, approved: bool) {
        owner.require_auth();

        let key = (OPERATOR, owner.clone(), operator.clone());
        if approved {
            env.storage().persistent().set(&key, &true);
        } else {
            env.storage().persistent().remove(&key);
        }

        events::publish_approval_set(&env, owner, operator, approved);
    }

    pub fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool {
        env.storage()
            .persistent()
            .get(&(OPERATOR, owner, operator))
            .unwrap_or(false)
    }

    // ── Transfers ───────────────────────────────────────────────────────────

    /// Move `amount` of `token_id` from `from` to `to`.
    ///
    /// `operator` must authenticate and be either the holder or an approved
    /// operator of the holder.
    pub fn transfer(
        env: Env,
        operator: Address,
        from: Address,
        to: Address,
        token_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        operator.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        if operator != from
            && !Self::is_approved_for_all(env.clone(), from.clone(), operator.clone())
        {
            return Err(ContractError::NotApproved);
        }

        let from_key = (BALANCE, token_id, from.clone());
        let from_balance: i128 = env.storage().persistent().get(&from_key).unwrap_or(0);
        if from_balance < amount {
            return Err(ContractError::InsufficientBalance);
        }

        env.storage()
            .persistent()
            .set(&from_key, &from_balance.saturating_sub(amount));

        let to_key = (BALANCE, token_id, to.clone());
        let to_balance: i128 = env.storage().persistent().get(&to_key).unwrap_or(0);
        env.storage()
            .persistent()
            .set(&to_key, &to_balance.saturating_add(amount));

        events::publish_transferred(&env, operator, from, to, token_id, amount);

        Ok(())
    }

    // ── Metadata ────────────────────────────────────────────────────────────

    /// Raw metadata blob attached to `token_id`.
    pub fn token_metadata(env: Env, token_id: u64) -> Result<Bytes, ContractError> {
        env.storage()
            .persistent()
            .get(&(METADATA, token_id))
            .ok_or(ContractError::TokenNotFound)
    }

    /// Base64 JSON data URI embedding the token's metadata blob.
    pub fn uri(env: Env, token_id: u64) -> Result<String, ContractError> {
        let metadata = Self::token_metadata(env.clone(), token_id)?;
        Ok(uri::render(&env, token_id, &metadata))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test;
