use soroban_sdk::{Address, BytesN, Env, Vec};

use crate::error::VestingError;
use crate::types::{
    DataKey, VestingSchedule, INSTANCE_EXTENSION_AMOUNT, INSTANCE_LIFETIME_THRESHOLD,
    SCHEDULE_EXTENSION_AMOUNT, SCHEDULE_LIFETIME_THRESHOLD,
};

/// Schedule records, the per-beneficiary index and the schedule counter.
///
/// Each beneficiary list is kept compact with swap-and-pop. Every id remembers
/// its position in the list of its current owner, so removal is O(1) and a list
/// never holds a schedule its beneficiary no longer owns.
pub struct ScheduleStore;

impl ScheduleStore {
    /// Extends the TTL for the contract instance
    pub fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_EXTENSION_AMOUNT);
    }

    fn extend_persistent_ttl(env: &Env, key: &DataKey) {
        env.storage().persistent().extend_ttl(
            key,
            SCHEDULE_LIFETIME_THRESHOLD,
            SCHEDULE_EXTENSION_AMOUNT,
        );
    }

    pub fn has(env: &Env, id: &BytesN<32>) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Schedule(id.clone()))
    }

    pub fn get(env: &Env, id: &BytesN<32>) -> Option<VestingSchedule> {
        env.storage()
            .persistent()
            .get(&DataKey::Schedule(id.clone()))
    }

    pub fn load(env: &Env, id: &BytesN<32>) -> Result<VestingSchedule, VestingError> {
        Self::get(env, id).ok_or(VestingError::ScheduleNotFound)
    }

    pub fn save(env: &Env, id: &BytesN<32>, schedule: &VestingSchedule) {
        let key = DataKey::Schedule(id.clone());
        env.storage().persistent().set(&key, schedule);
        Self::extend_persistent_ttl(env, &key);
    }

    pub fn count(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::ScheduleCount)
            .unwrap_or(0)
    }

    pub fn increment_count(env: &Env) -> Result<u64, VestingError> {
        let count = Self::count(env)
            .checked_add(1)
            .ok_or(VestingError::MathOverflow)?;
        env.storage().instance().set(&DataKey::ScheduleCount, &count);
        Ok(count)
    }

    pub fn beneficiary_schedules(env: &Env, beneficiary: &Address) -> Vec<BytesN<32>> {
        env.storage()
            .persistent()
            .get(&DataKey::BeneficiarySchedules(beneficiary.clone()))
            .unwrap_or(Vec::new(env))
    }

    pub fn add_to_index(env: &Env, beneficiary: &Address, id: &BytesN<32>) {
        let key = DataKey::BeneficiarySchedules(beneficiary.clone());
        let mut ids = Self::beneficiary_schedules(env, beneficiary);

        let slot_key = DataKey::Slot(id.clone());
        env.storage().persistent().set(&slot_key, &ids.len());
        Self::extend_persistent_ttl(env, &slot_key);

        ids.push_back(id.clone());
        env.storage().persistent().set(&key, &ids);
        Self::extend_persistent_ttl(env, &key);
    }

    pub fn remove_from_index(env: &Env, beneficiary: &Address, id: &BytesN<32>) {
        let key = DataKey::BeneficiarySchedules(beneficiary.clone());
        let slot_key = DataKey::Slot(id.clone());
        let mut ids = Self::beneficiary_schedules(env, beneficiary);

        let slot: u32 = match env.storage().persistent().get(&slot_key) {
            Some(slot) => slot,
            None => return,
        };
        if ids.get(slot).as_ref() != Some(id) {
            return;
        }

        let last = ids.len() - 1;
        if slot != last {
            if let Some(moved) = ids.get(last) {
                ids.set(slot, moved.clone());
                let moved_key = DataKey::Slot(moved);
                env.storage().persistent().set(&moved_key, &slot);
                Self::extend_persistent_ttl(env, &moved_key);
            }
        }
        ids.pop_back();
        env.storage().persistent().remove(&slot_key);

        env.storage().persistent().set(&key, &ids);
        Self::extend_persistent_ttl(env, &key);
    }

    pub fn tokens_reserved(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TokensReserved)
            .unwrap_or(0)
    }

    pub fn reserve(env: &Env, amount: i128) -> Result<(), VestingError> {
        let reserved = Self::tokens_reserved(env)
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        env.storage()
            .instance()
            .set(&DataKey::TokensReserved, &reserved);
        Ok(())
    }

    pub fn unreserve(env: &Env, amount: i128) -> Result<(), VestingError> {
        let reserved = Self::tokens_reserved(env)
            .checked_sub(amount)
            .filter(|r| *r >= 0)
            .ok_or(VestingError::MathOverflow)?;
        env.storage()
            .instance()
            .set(&DataKey::TokensReserved, &reserved);
        Ok(())
    }
}
