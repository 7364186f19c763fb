use soroban_sdk::{BytesN, Env};

use crate::error::VestingError;
use crate::types::DataKey;

/// Marks a schedule as busy while its outbound transfers are in flight.
///
/// Accounting is always persisted before the guard is taken, so a call that
/// reaches the engine again during the transfer sees the updated record and is
/// turned away with `ScheduleBusy`.
pub struct ScheduleGuard {
    id: BytesN<32>,
}

impl ScheduleGuard {
    pub fn acquire(env: &Env, id: &BytesN<32>) -> Result<Self, VestingError> {
        let key = DataKey::Busy(id.clone());
        if env.storage().temporary().has(&key) {
            return Err(VestingError::ScheduleBusy);
        }
        env.storage().temporary().set(&key, &true);
        Ok(Self { id: id.clone() })
    }

    pub fn is_held(env: &Env, id: &BytesN<32>) -> bool {
        env.storage()
            .temporary()
            .has(&DataKey::Busy(id.clone()))
    }

    pub fn ensure_idle(env: &Env, id: &BytesN<32>) -> Result<(), VestingError> {
        if Self::is_held(env, id) {
            return Err(VestingError::ScheduleBusy);
        }
        Ok(())
    }

    pub fn release(self, env: &Env) {
        env.storage().temporary().remove(&DataKey::Busy(self.id));
    }
}
