use soroban_sdk::{token, Address, Env};

use crate::error::VestingError;
use crate::types::DataKey;

/// Moves the vested token in and out of the engine's own balance.
pub struct Custody;

impl Custody {
    pub fn token_address(env: &Env) -> Result<Address, VestingError> {
        env.storage()
            .instance()
            .get(&DataKey::TokenAddress)
            .ok_or(VestingError::NotInitialized)
    }

    /// Escrows `amount` from `from` into the engine.
    pub fn transfer_in(env: &Env, from: &Address, amount: i128) -> Result<(), VestingError> {
        Self::transfer(env, from, &env.current_contract_address(), amount)
    }

    /// Pays `amount` out of escrow to `to`.
    pub fn transfer_out(env: &Env, to: &Address, amount: i128) -> Result<(), VestingError> {
        Self::transfer(env, &env.current_contract_address(), to, amount)
    }

    fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), VestingError> {
        let token_address = Self::token_address(env)?;
        let client = token::Client::new(env, &token_address);

        match client.try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(VestingError::CustodyFailure),
        }
    }
}
