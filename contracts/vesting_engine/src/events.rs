use soroban_sdk::{symbol_short, Address, BytesN, Env, Symbol};

use crate::types::VestingType;

/// Constants for events.

const SCHEDULE_CREATED: Symbol = symbol_short!("created");
const SCHEDULE_RELEASED: Symbol = symbol_short!("released");
const SCHEDULE_REVOKED: Symbol = symbol_short!("revoked");
const MILESTONE_COMPLETED: Symbol = symbol_short!("milestone");
const BENEFICIARY_TRANSFERRED: Symbol = symbol_short!("transfer");
const PAUSED: Symbol = symbol_short!("paused");
const UNPAUSED: Symbol = symbol_short!("unpaused");
const ADMIN_ACCESS_SET: Symbol = symbol_short!("admin");
const TREASURY_SET: Symbol = symbol_short!("treasury");

pub fn schedule_created(
    env: &Env,
    id: &BytesN<32>,
    beneficiary: &Address,
    total_amount: i128,
    vesting_type: VestingType,
    start_time: u64,
    duration: u64,
) {
    env.events().publish(
        (SCHEDULE_CREATED, id.clone()),
        (beneficiary.clone(), total_amount, vesting_type, start_time, duration),
    );
}

pub fn schedule_released(env: &Env, id: &BytesN<32>, beneficiary: &Address, amount: i128) {
    env.events().publish(
        (SCHEDULE_RELEASED, id.clone()),
        (beneficiary.clone(), amount),
    );
}

pub fn schedule_revoked(
    env: &Env,
    id: &BytesN<32>,
    to_beneficiary: i128,
    to_treasury: i128,
) {
    env.events().publish(
        (SCHEDULE_REVOKED, id.clone()),
        (to_beneficiary, to_treasury),
    );
}

pub fn milestone_completed(
    env: &Env,
    id: &BytesN<32>,
    milestones_reached: u32,
    amount: i128,
) {
    env.events().publish(
        (MILESTONE_COMPLETED, id.clone()),
        (milestones_reached, amount),
    );
}

pub fn beneficiary_transferred(env: &Env, id: &BytesN<32>, from: &Address, to: &Address) {
    env.events().publish(
        (BENEFICIARY_TRANSFERRED, id.clone()),
        (from.clone(), to.clone()),
    );
}

pub fn paused(env: &Env, by: &Address) {
    env.events().publish((PAUSED,), by.clone());
}

pub fn unpaused(env: &Env, by: &Address) {
    env.events().publish((UNPAUSED,), by.clone());
}

pub fn admin_access_set(env: &Env, admin: &Address, enabled: bool) {
    env.events().publish((ADMIN_ACCESS_SET, admin.clone()), enabled);
}

pub fn treasury_set(env: &Env, treasury: &Address) {
    env.events().publish((TREASURY_SET,), treasury.clone());
}
