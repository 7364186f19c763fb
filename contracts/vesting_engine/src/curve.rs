use soroban_sdk::{Env, U256};

use crate::types::{VestingSchedule, VestingType};

/// Calculates the vested amount for a given schedule, at a given timestamp.
///
/// Never fails: returns 0 before the schedule starts and `total_amount` once it
/// has fully unlocked. A revoked schedule is evaluated at its revocation time,
/// so its vested amount is frozen.
pub fn vested_amount(env: &Env, schedule: &VestingSchedule, mut reference_timestamp: u64) -> i128 {
    if schedule.revoked && reference_timestamp > schedule.revoked_at {
        reference_timestamp = schedule.revoked_at;
    }

    let start = schedule.start_time;
    let end = start.saturating_add(schedule.duration);
    let cliff_end = start.saturating_add(schedule.cliff_duration);

    match schedule.vesting_type {
        VestingType::Linear => {
            if reference_timestamp < start {
                0
            } else if reference_timestamp >= end {
                schedule.total_amount
            } else {
                pro_rata(
                    env,
                    schedule.total_amount,
                    reference_timestamp - start,
                    schedule.duration,
                )
            }
        }
        VestingType::Cliff => {
            if reference_timestamp < cliff_end {
                0
            } else {
                schedule.total_amount
            }
        }
        VestingType::Hybrid => {
            if reference_timestamp < cliff_end {
                0
            } else if reference_timestamp >= end {
                schedule.total_amount
            } else {
                pro_rata(
                    env,
                    schedule.total_amount,
                    reference_timestamp - cliff_end,
                    schedule.duration - schedule.cliff_duration,
                )
            }
        }
        VestingType::Milestone => {
            if schedule.milestone_count == 0 {
                return 0;
            }
            pro_rata(
                env,
                schedule.total_amount,
                schedule.milestones_reached.into(),
                schedule.milestone_count.into(),
            )
        }
    }
}

/// Vested amount not yet paid out. Always 0 for a revoked schedule.
pub fn releasable_amount(env: &Env, schedule: &VestingSchedule, now: u64) -> i128 {
    if schedule.revoked {
        return 0;
    }

    vested_amount(env, schedule, now)
        .checked_sub(schedule.released)
        .unwrap_or(0)
        .max(0)
}

/// Amount paid when the next milestone of `schedule` is confirmed.
///
/// Every milestone pays `total_amount / milestone_count`, except the last one
/// which pays whatever is left so the grant is always fully distributed.
pub fn next_milestone_payout(schedule: &VestingSchedule) -> i128 {
    if schedule.milestone_count == 0 || schedule.milestones_reached >= schedule.milestone_count {
        return 0;
    }

    if schedule.milestones_reached + 1 == schedule.milestone_count {
        schedule.total_amount - schedule.released
    } else {
        schedule.total_amount / i128::from(schedule.milestone_count)
    }
}

/// `amount * elapsed / window`, truncated. The product is taken in 256 bits.
fn pro_rata(env: &Env, amount: i128, elapsed: u64, window: u64) -> i128 {
    if window == 0 || amount <= 0 {
        return 0;
    }

    let vested = U256::from_u128(env, amount as u128)
        .mul(&U256::from_u128(env, elapsed.into()))
        .div(&U256::from_u128(env, window.into()));

    // elapsed <= window keeps the quotient within `amount`.
    match vested.to_u128() {
        Some(v) if v <= amount as u128 => v as i128,
        _ => amount,
    }
}
