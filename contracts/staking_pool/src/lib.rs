#![no_std]

pub mod accrual;
pub mod events;

use soroban_sdk::{
    contract, contractclient, contractimpl, contracttype, symbol_short, token, Address, Bytes,
    Env, Symbol,
};

pub use accrual::{PRECISION, TIME_UNIT_SECS};

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const TOKEN_COUNTER: Symbol = symbol_short!("TOK_CTR");

// Pools and positions use persistent tuple keys:
//   (POOL, pool_id)           → Pool
//   (POS, pool_id, staker)    → StakePosition
const POOL: Symbol = symbol_short!("POOL");
const POSITION: Symbol = symbol_short!("POS");

/// SVG badge attached to every reward mint. The minter wraps it into a
/// base64 JSON data URI on `uri` queries.
const REWARD_BADGE_SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><rect width="100" height="100" fill="#0000FF"/></svg>"##;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotOwner = 3,
    PoolNotFound = 4,
    InvalidInput = 5,
    InsufficientStake = 6,
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// A reward pool: one staking asset paired with one emission rate.
///
/// Immutable after `add_pool` except for `total_staked`, which the contract
/// alone mutates on stake/withdraw.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub staking_asset: Address,
    pub reward_rate: i128,
    pub total_staked: i128,
}

/// A staker's balance and accrual checkpoint within one pool.
///
/// `unclaimed` carries reward settled on stake/withdraw so that topping up
/// a position never forfeits what was already accrued.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub amount: i128,
    pub unclaimed: i128,
    pub last_checkpoint: u64,
}

// ── Reward minter interface ──────────────────────────────────────────────────

/// Client for the multi-token reward minter the pool issues claims through.
/// Must match the `reward_token` contract's `mint` export.
#[contractclient(name = "RewardMinterClient")]
pub trait RewardMinter {
    fn mint(env: Env, to: Address, token_id: u64, amount: i128, metadata: Bytes);
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPoolContract;

#[contractimpl]
impl StakingPoolContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `owner`        – the only identity allowed to register pools.
    /// * `reward_token` – address of the multi-token minter used for claims.
    pub fn initialize(env: Env, owner: Address, reward_token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        // POOL_COUNT and TOKEN_COUNTER start at zero; unwrap_or(0) handles
        // absent keys, so no explicit init needed.

        events::publish_initialized(&env, owner, reward_token);

        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Register a new reward pool and return its id.
    ///
    /// Ids are sequential starting at 1; id 0 is never allocated. Pools are
    /// immutable after creation and never deleted. Only the owner may call.
    pub fn add_pool(
        env: Env,
        caller: Address,
        staking_asset: Address,
        reward_rate: i128,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if reward_rate < 0 {
            return Err(ContractError::InvalidInput);
        }

        let count: u32 = env.storage().instance().get(&POOL_COUNT).unwrap_or(0);
        let pool_id = count.saturating_add(1);

        let pool = Pool {
            staking_asset: staking_asset.clone(),
            reward_rate,
            total_staked: 0,
        };
        env.storage().persistent().set(&(POOL, pool_id), &pool);
        env.storage().instance().set(&POOL_COUNT, &pool_id);

        events::publish_pool_added(&env, pool_id, staking_asset, reward_rate);

        Ok(pool_id)
    }

    /// Return a pool's configuration and total staked balance.
    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        env.storage()
            .persistent()
            .get(&(POOL, pool_id))
            .ok_or(ContractError::PoolNotFound)
    }

    /// Number of pools registered so far (also the highest valid pool id).
    pub fn get_pool_count(env: Env) -> u32 {
        env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the pool's staking asset.
    ///
    /// Reward accrued up to now is settled into the position's `unclaimed`
    /// accumulator before the balance changes, so a top-up never forfeits
    /// pending reward.
    pub fn stake(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        // Pool lookup happens before any transfer: a stake against an
        // unknown pool leaves no ledger mutation at all.
        let mut pool = Self::get_pool(env.clone(), pool_id)?;

        // 1. Settle pending reward at the current balance, reset checkpoint.
        let mut position = Self::load_position(&env, pool_id, &staker);
        Self::settle(&env, &mut position, pool.reward_rate);

        // 2. Pull tokens from the staker into the contract. A failed
        //    transfer traps and rolls back the whole invocation.
        token::Client::new(&env, &pool.staking_asset).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        // 3. Increase the position's balance and the pool total.
        position.amount = position.amount.saturating_add(amount);
        pool.total_staked = pool.total_staked.saturating_add(amount);

        Self::store_position(&env, pool_id, &staker, &position);
        env.storage().persistent().set(&(POOL, pool_id), &pool);

        events::publish_staked(&env, staker, pool_id, amount);

        Ok(())
    }

    /// Withdraw `amount` staked tokens back to the staker.
    ///
    /// Fails with `InsufficientStake` if the position holds less than
    /// `amount`, leaving all state unchanged.
    pub fn withdraw(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut pool = Self::get_pool(env.clone(), pool_id)?;
        let mut position = Self::load_position(&env, pool_id, &staker);

        if position.amount < amount {
            return Err(ContractError::InsufficientStake);
        }

        // Settle reward at the pre-withdrawal balance, then reduce it.
        Self::settle(&env, &mut position, pool.reward_rate);

        position.amount = position.amount.saturating_sub(amount);
        pool.total_staked = pool.total_staked.saturating_sub(amount);

        // Store state before the outbound transfer (checks-effects-interactions).
        Self::store_position(&env, pool_id, &staker, &position);
        env.storage().persistent().set(&(POOL, pool_id), &pool);

        token::Client::new(&env, &pool.staking_asset).transfer(
            &env.current_contract_address(),
            &staker,
            &amount,
        );

        events::publish_withdrawn(&env, staker, pool_id, amount);

        Ok(())
    }

    /// Return the staker's current balance in a pool. Unknown pools and
    /// untouched positions both read as zero.
    pub fn get_staked_balance(env: Env, pool_id: u32, staker: Address) -> i128 {
        Self::load_position(&env, pool_id, &staker).amount
    }

    // ── Reward accrual ──────────────────────────────────────────────────────

    /// Compute the reward claimable right now, without mutating state.
    ///
    /// Idempotent under repeated calls while the ledger timestamp and the
    /// position stay unchanged.
    pub fn calculate_reward(env: Env, pool_id: u32, staker: Address) -> Result<i128, ContractError> {
        let pool = Self::get_pool(env.clone(), pool_id)?;
        let position = Self::load_position(&env, pool_id, &staker);

        let elapsed = env
            .ledger()
            .timestamp()
            .saturating_sub(position.last_checkpoint);

        Ok(position
            .unclaimed
            .saturating_add(accrual::accrued(position.amount, pool.reward_rate, elapsed)))
    }

    /// Claim all pending reward for the caller's position in `pool_id`.
    ///
    /// A zero reward is a valid no-op returning 0. Otherwise the checkpoint
    /// is reset and the reward amount is minted to the staker as a fresh
    /// multi-token id drawn from a global counter (first claim mints id 1).
    /// Returns the claimed amount.
    pub fn claim_reward(env: Env, staker: Address, pool_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let pool = Self::get_pool(env.clone(), pool_id)?;
        let mut position = Self::load_position(&env, pool_id, &staker);

        Self::settle(&env, &mut position, pool.reward_rate);
        let reward = position.unclaimed;

        if reward <= 0 {
            // Nothing accrued yet — return without reverting.
            return Ok(0);
        }

        position.unclaimed = 0;
        Self::store_position(&env, pool_id, &staker, &position);

        // Global monotonic token id, shared across all pools and stakers.
        let prev: u64 = env.storage().instance().get(&TOKEN_COUNTER).unwrap_or(0);
        let token_id = prev.saturating_add(1);
        env.storage().instance().set(&TOKEN_COUNTER, &token_id);

        let minter: Address = env
            .storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        let badge = Bytes::from_slice(&env, REWARD_BADGE_SVG);
        RewardMinterClient::new(&env, &minter).mint(&staker, &token_id, &reward, &badge);

        events::publish_reward_claimed(&env, staker, token_id, reward);

        Ok(reward)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)
    }

    /// Address of the reward minter configured at initialisation.
    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the registry owner.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != owner {
            return Err(ContractError::NotOwner);
        }
        Ok(())
    }

    /// Load a position, defaulting to an empty one checkpointed at now so a
    /// first touch never accrues retroactively.
    fn load_position(env: &Env, pool_id: u32, staker: &Address) -> StakePosition {
        env.storage()
            .persistent()
            .get(&(POSITION, pool_id, staker.clone()))
            .unwrap_or(StakePosition {
                amount: 0,
                unclaimed: 0,
                last_checkpoint: env.ledger().timestamp(),
            })
    }

    fn store_position(env: &Env, pool_id: u32, staker: &Address, position: &StakePosition) {
        env.storage()
            .persistent()
            .set(&(POSITION, pool_id, staker.clone()), position);
    }

    /// Fold reward accrued since the last checkpoint into `unclaimed` and
    /// reset the checkpoint to now. Every accrual-affecting mutation (stake,
    /// withdraw, claim) calls this first so no interval is double-counted.
    fn settle(env: &Env, position: &mut StakePosition, reward_rate: i128) {
        let now = env.ledger().timestamp();
        let elapsed = now.saturating_sub(position.last_checkpoint);

        position.unclaimed = position
            .unclaimed
            .saturating_add(accrual::accrued(position.amount, reward_rate, elapsed));
        position.last_checkpoint = now;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
