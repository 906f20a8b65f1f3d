/// Fixed-point scaling factor.
///
/// Staked amounts and reward rates are 18-decimal fixed-point values, so a
/// `reward_rate` of `PRECISION` means one reward unit per staked unit per
/// time unit.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

/// The accrual time unit, in seconds.
///
/// A pool's `reward_rate` is expressed per staked unit **per hour**: staking
/// 100 units at rate `1 × PRECISION` for one hour accrues exactly 100 reward
/// units.
pub const TIME_UNIT_SECS: u64 = 3_600;

// ── Core accrual math ───────────────────────────────────────────────────────

/// Reward accrued by a single position over `elapsed` seconds.
///
/// ```text
/// accrued = amount × reward_rate / PRECISION × elapsed / TIME_UNIT_SECS
/// ```
///
/// Both divisions truncate toward zero; sub-unit remainders are never
/// rounded up. Returns 0 when nothing is staked or no time has passed.
///
/// # Arguments
/// * `amount`      – position's staked balance (18-decimal fixed point)
/// * `reward_rate` – pool rate, reward units per staked unit per time unit
/// * `elapsed`     – seconds since the position's last checkpoint
#[allow(clippy::arithmetic_side_effects)]
pub fn accrued(amount: i128, reward_rate: i128, elapsed: u64) -> i128 {
    if amount <= 0 || reward_rate <= 0 || elapsed == 0 {
        return 0;
    }

    let per_time_unit = mul_scaled(amount, reward_rate);

    per_time_unit.saturating_mul(elapsed as i128) / TIME_UNIT_SECS as i128
}

/// Exact `⌊a × b / PRECISION⌋` for non-negative operands.
///
/// The naive product of two 18-decimal values is a 36-decimal number that
/// overflows i128 beyond ~170 whole units, so split both operands at the
/// scale boundary first:
///
/// ```text
/// a = qa·P + ra,  b = qb·P + rb
/// ⌊a·b / P⌋ = qa·b + ra·qb + ⌊ra·rb / P⌋
/// ```
///
/// Every term fits i128 for realistic balances; saturating_mul clamps the
/// pathological rest instead of trapping the invocation (overflow-checks
/// are on in the release profile).
#[allow(clippy::arithmetic_side_effects)]
fn mul_scaled(a: i128, b: i128) -> i128 {
    let (qa, ra) = (a / PRECISION, a % PRECISION);
    let (qb, rb) = (b / PRECISION, b % PRECISION);

    qa.saturating_mul(b)
        .saturating_add(ra.saturating_mul(qb))
        .saturating_add(ra * rb / PRECISION)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.
