use soroban_sdk::{Address, Env, Map};

use crate::error::VestingError;
use crate::types::DataKey;

/// Administrator set and pause switch.
pub struct AccessControl;

impl AccessControl {
    fn admins(env: &Env) -> Map<Address, bool> {
        env.storage()
            .instance()
            .get(&DataKey::Admins)
            .unwrap_or(Map::new(env))
    }

    pub fn is_admin(env: &Env, address: &Address) -> bool {
        Self::admins(env).get(address.clone()).unwrap_or(false)
    }

    pub fn admin_count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::AdminCount)
            .unwrap_or(0)
    }

    /// Authenticates `caller` and checks it holds the administrator capability.
    pub fn require_admin(env: &Env, caller: &Address) -> Result<(), VestingError> {
        caller.require_auth();
        if !Self::is_admin(env, caller) {
            return Err(VestingError::Unauthorized);
        }
        Ok(())
    }

    /// Grants or withdraws the administrator capability.
    ///
    /// The last remaining administrator cannot be removed.
    pub fn set_admin(env: &Env, admin: &Address, is_enabled: bool) -> Result<(), VestingError> {
        let mut admins = Self::admins(env);

        if admins.get(admin.clone()).unwrap_or(false) == is_enabled {
            return Err(VestingError::AdminFlagAlreadySet);
        }

        let admin_count = Self::admin_count(env);
        let new_admin_count = if is_enabled {
            admin_count + 1
        } else {
            if admin_count <= 1 {
                return Err(VestingError::LastAdmin);
            }
            admin_count - 1
        };

        if is_enabled {
            admins.set(admin.clone(), true);
        } else {
            admins.remove(admin.clone());
        }

        env.storage().instance().set(&DataKey::Admins, &admins);
        env.storage()
            .instance()
            .set(&DataKey::AdminCount, &new_admin_count);
        Ok(())
    }

    pub fn is_paused(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Paused)
            .unwrap_or(false)
    }

    pub fn set_paused(env: &Env, paused: bool) {
        env.storage().instance().set(&DataKey::Paused, &paused);
    }

    /// Gate consulted before every mutating lifecycle operation.
    pub fn require_not_paused(env: &Env) -> Result<(), VestingError> {
        if Self::is_paused(env) {
            return Err(VestingError::Paused);
        }
        Ok(())
    }
}
