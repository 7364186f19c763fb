#![no_std]
use soroban_sdk::{contract, contractimpl, log, panic_with_error, Address, BytesN, Env, Vec};

mod admin;
mod curve;
mod custody;
mod error;
mod events;
mod guard;
mod id;
mod storage;
mod types;

use crate::admin::AccessControl;
use crate::custody::Custody;
use crate::guard::ScheduleGuard;
use crate::storage::ScheduleStore;
use crate::types::DataKey;

pub use crate::error::{ErrorKind, VestingError};
pub use crate::types::{ScheduleParams, VestingSchedule, VestingType, MAX_VESTING_DURATION};

#[contract]
pub struct VestingEngine;

#[contractimpl]
impl VestingEngine {
    /// Initialization function.
    ///
    /// Sets the token held in escrow, the treasury that receives unvested funds
    /// on revocation and the first administrator.
    pub fn init(
        env: Env,
        admin: Address,
        token_address: Address,
        treasury: Address,
    ) -> Result<(), VestingError> {
        if env.storage().instance().has(&DataKey::TokenAddress) {
            return Err(VestingError::AlreadyInitialized);
        }

        env.storage()
            .instance()
            .set(&DataKey::TokenAddress, &token_address);
        env.storage().instance().set(&DataKey::Treasury, &treasury);
        env.storage().instance().set(&DataKey::ScheduleCount, &0u64);
        env.storage()
            .instance()
            .set(&DataKey::TokensReserved, &0i128);
        AccessControl::set_paused(&env, false);
        AccessControl::set_admin(&env, &admin, true)?;

        ScheduleStore::extend_instance_ttl(&env);
        Ok(())
    }

    /// Adds a new admin or removes an existing one.
    pub fn set_admin(
        env: Env,
        caller: Address,
        admin: Address,
        is_enabled: bool,
    ) -> Result<(), VestingError> {
        Self::require_initialized(&env)?;
        AccessControl::require_admin(&env, &caller)?;

        AccessControl::set_admin(&env, &admin, is_enabled)?;

        events::admin_access_set(&env, &admin, is_enabled);
        Ok(())
    }

    /// Updates the address receiving unvested funds of revoked schedules.
    pub fn set_treasury(env: Env, caller: Address, treasury: Address) -> Result<(), VestingError> {
        Self::require_initialized(&env)?;
        AccessControl::require_admin(&env, &caller)?;

        env.storage().instance().set(&DataKey::Treasury, &treasury);

        events::treasury_set(&env, &treasury);
        Ok(())
    }

    /// Engages the pause switch. Every lifecycle operation fails while it is set.
    pub fn pause(env: Env, caller: Address) -> Result<(), VestingError> {
        Self::require_initialized(&env)?;
        AccessControl::require_admin(&env, &caller)?;

        AccessControl::set_paused(&env, true);

        events::paused(&env, &caller);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), VestingError> {
        Self::require_initialized(&env)?;
        AccessControl::require_admin(&env, &caller)?;

        AccessControl::set_paused(&env, false);

        events::unpaused(&env, &caller);
        Ok(())
    }

    /// Creates a vesting schedule and escrows its `total_amount` from `caller`.
    ///
    /// Returns the identifier of the new schedule.
    pub fn create_schedule(
        env: Env,
        caller: Address,
        params: ScheduleParams,
    ) -> Result<BytesN<32>, VestingError> {
        Self::require_mutable(&env)?;
        AccessControl::require_admin(&env, &caller)?;

        Self::create(&env, &caller, params)
    }

    /// Creates several schedules at once. Either every schedule is created or none is.
    pub fn create_schedule_batch(
        env: Env,
        caller: Address,
        params: Vec<ScheduleParams>,
    ) -> Result<Vec<BytesN<32>>, VestingError> {
        Self::require_mutable(&env)?;
        AccessControl::require_admin(&env, &caller)?;

        if params.is_empty() {
            return Err(VestingError::InvalidRange);
        }

        let mut ids = Vec::new(&env);
        for p in params.iter() {
            ids.push_back(Self::create(&env, &caller, p)?);
        }

        Ok(ids)
    }

    /// Pays the currently releasable amount to the schedule's beneficiary.
    ///
    /// `caller` is either the beneficiary or an administrator acting on its
    /// behalf. Returns the amount paid.
    pub fn release(env: Env, caller: Address, schedule_id: BytesN<32>) -> Result<i128, VestingError> {
        Self::require_mutable(&env)?;
        caller.require_auth();

        let mut schedule = ScheduleStore::load(&env, &schedule_id)?;

        if caller != schedule.beneficiary && !AccessControl::is_admin(&env, &caller) {
            return Err(VestingError::Unauthorized);
        }
        if schedule.revoked {
            return Err(VestingError::AlreadyRevoked);
        }

        let releasable = curve::releasable_amount(&env, &schedule, env.ledger().timestamp());
        if releasable <= 0 {
            return Err(VestingError::NothingDue);
        }

        let guard = ScheduleGuard::acquire(&env, &schedule_id)?;

        schedule.released = schedule
            .released
            .checked_add(releasable)
            .ok_or(VestingError::MathOverflow)?;
        ScheduleStore::save(&env, &schedule_id, &schedule);
        ScheduleStore::unreserve(&env, releasable)?;

        Custody::transfer_out(&env, &schedule.beneficiary, releasable)?;
        guard.release(&env);

        events::schedule_released(&env, &schedule_id, &schedule.beneficiary, releasable);
        log!(&env, "Released {} from schedule {}", releasable, schedule_id);

        Ok(releasable)
    }

    /// Revokes a schedule.
    ///
    /// The vested but unclaimed part goes to the beneficiary, the rest to the
    /// treasury. Returns `(to_beneficiary, to_treasury)`.
    pub fn revoke(
        env: Env,
        caller: Address,
        schedule_id: BytesN<32>,
    ) -> Result<(i128, i128), VestingError> {
        Self::require_mutable(&env)?;
        AccessControl::require_admin(&env, &caller)?;

        let mut schedule = ScheduleStore::load(&env, &schedule_id)?;

        if !schedule.revocable {
            return Err(VestingError::NotRevocable);
        }
        if schedule.revoked {
            return Err(VestingError::AlreadyRevoked);
        }

        let treasury = Self::treasury(&env)?;
        let guard = ScheduleGuard::acquire(&env, &schedule_id)?;

        let now = env.ledger().timestamp();
        let to_beneficiary = curve::releasable_amount(&env, &schedule, now);
        schedule.released = schedule
            .released
            .checked_add(to_beneficiary)
            .ok_or(VestingError::MathOverflow)?;
        let to_treasury = schedule.total_amount - schedule.released;

        schedule.revoked = true;
        schedule.revoked_at = now;
        ScheduleStore::save(&env, &schedule_id, &schedule);
        ScheduleStore::unreserve(&env, to_beneficiary + to_treasury)?;

        if to_beneficiary > 0 {
            Custody::transfer_out(&env, &schedule.beneficiary, to_beneficiary)?;
        }
        if to_treasury > 0 {
            Custody::transfer_out(&env, &treasury, to_treasury)?;
        }
        guard.release(&env);

        events::schedule_revoked(&env, &schedule_id, to_beneficiary, to_treasury);
        log!(
            &env,
            "Schedule {} revoked: {} to beneficiary, {} to treasury",
            schedule_id,
            to_beneficiary,
            to_treasury
        );

        Ok((to_beneficiary, to_treasury))
    }

    /// Confirms the next milestone of a milestone schedule and pays its share.
    ///
    /// Returns the amount paid.
    pub fn complete_milestone(
        env: Env,
        caller: Address,
        schedule_id: BytesN<32>,
    ) -> Result<i128, VestingError> {
        Self::require_mutable(&env)?;
        AccessControl::require_admin(&env, &caller)?;

        let mut schedule = ScheduleStore::load(&env, &schedule_id)?;

        if schedule.vesting_type != VestingType::Milestone {
            return Err(VestingError::NotMilestoneSchedule);
        }
        if schedule.revoked {
            return Err(VestingError::AlreadyRevoked);
        }
        if schedule.milestones_reached >= schedule.milestone_count {
            return Err(VestingError::AllMilestonesReached);
        }

        let guard = ScheduleGuard::acquire(&env, &schedule_id)?;

        let payout = curve::next_milestone_payout(&schedule);
        schedule.milestones_reached += 1;
        schedule.released = schedule
            .released
            .checked_add(payout)
            .ok_or(VestingError::MathOverflow)?;
        ScheduleStore::save(&env, &schedule_id, &schedule);
        ScheduleStore::unreserve(&env, payout)?;

        if payout > 0 {
            Custody::transfer_out(&env, &schedule.beneficiary, payout)?;
        }
        guard.release(&env);

        events::milestone_completed(&env, &schedule_id, schedule.milestones_reached, payout);
        log!(
            &env,
            "Milestone {} of {} reached on schedule {}",
            schedule.milestones_reached,
            schedule.milestone_count,
            schedule_id
        );

        Ok(payout)
    }

    /// Hands a schedule over to `new_beneficiary`. Only the current beneficiary may do so.
    pub fn transfer_beneficiary(
        env: Env,
        caller: Address,
        schedule_id: BytesN<32>,
        new_beneficiary: Address,
    ) -> Result<(), VestingError> {
        Self::require_mutable(&env)?;
        caller.require_auth();

        let mut schedule = ScheduleStore::load(&env, &schedule_id)?;

        if caller != schedule.beneficiary {
            return Err(VestingError::Unauthorized);
        }
        if schedule.revoked {
            return Err(VestingError::AlreadyRevoked);
        }
        if new_beneficiary == env.current_contract_address()
            || new_beneficiary == schedule.beneficiary
        {
            return Err(VestingError::InvalidBeneficiary);
        }
        ScheduleGuard::ensure_idle(&env, &schedule_id)?;

        let previous = schedule.beneficiary.clone();
        schedule.beneficiary = new_beneficiary.clone();
        ScheduleStore::save(&env, &schedule_id, &schedule);
        ScheduleStore::remove_from_index(&env, &previous, &schedule_id);
        ScheduleStore::add_to_index(&env, &new_beneficiary, &schedule_id);

        events::beneficiary_transferred(&env, &schedule_id, &previous, &new_beneficiary);
        log!(&env, "Schedule {} transferred", schedule_id);

        Ok(())
    }

    /// Retrieves a schedule by identifier.
    pub fn get_schedule(env: Env, schedule_id: BytesN<32>) -> Result<VestingSchedule, VestingError> {
        ScheduleStore::load(&env, &schedule_id)
    }

    /// Amount unlocked so far, claimed or not.
    pub fn vested_amount(env: Env, schedule_id: BytesN<32>) -> Result<i128, VestingError> {
        let schedule = ScheduleStore::load(&env, &schedule_id)?;
        Ok(curve::vested_amount(&env, &schedule, env.ledger().timestamp()))
    }

    /// Amount a `release` would pay right now.
    pub fn releasable_amount(env: Env, schedule_id: BytesN<32>) -> Result<i128, VestingError> {
        let schedule = ScheduleStore::load(&env, &schedule_id)?;
        Ok(curve::releasable_amount(&env, &schedule, env.ledger().timestamp()))
    }

    /// Returns the identifiers of the schedules currently owned by `beneficiary`.
    pub fn get_beneficiary_schedules(env: Env, beneficiary: Address) -> Vec<BytesN<32>> {
        ScheduleStore::beneficiary_schedules(&env, &beneficiary)
    }

    /// Returns the schedules of `beneficiary` in a specific range, `from` being inclusive and
    /// `to` being exclusive.
    pub fn get_beneficiary_schedules_page(
        env: Env,
        beneficiary: Address,
        from: u32,
        to: u32,
    ) -> Result<Vec<BytesN<32>>, VestingError> {
        let ids = ScheduleStore::beneficiary_schedules(&env, &beneficiary);
        if from > to || to > ids.len() {
            return Err(VestingError::InvalidRange);
        }

        Ok(ids.slice(from..to))
    }

    pub fn get_beneficiary_schedules_len(env: Env, beneficiary: Address) -> u32 {
        ScheduleStore::beneficiary_schedules(&env, &beneficiary).len()
    }

    /// Checks if a given address currently owns at least one schedule.
    pub fn is_beneficiary(env: Env, beneficiary: Address) -> bool {
        !ScheduleStore::beneficiary_schedules(&env, &beneficiary).is_empty()
    }

    /// Number of schedules ever created.
    pub fn schedule_count(env: Env) -> u64 {
        ScheduleStore::count(&env)
    }

    /// Returns the amount of token still held in escrow for all schedules.
    pub fn get_tokens_reserved(env: Env) -> i128 {
        ScheduleStore::tokens_reserved(&env)
    }

    pub fn get_token_address(env: Env) -> Result<Address, VestingError> {
        Custody::token_address(&env)
    }

    pub fn get_treasury(env: Env) -> Result<Address, VestingError> {
        Self::treasury(&env)
    }

    pub fn is_admin(env: Env, address: Address) -> bool {
        AccessControl::is_admin(&env, &address)
    }

    pub fn get_admins_count(env: Env) -> u32 {
        AccessControl::admin_count(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        AccessControl::is_paused(&env)
    }
}

impl VestingEngine {
    fn require_initialized(env: &Env) -> Result<(), VestingError> {
        if !env.storage().instance().has(&DataKey::TokenAddress) {
            return Err(VestingError::NotInitialized);
        }
        ScheduleStore::extend_instance_ttl(env);
        Ok(())
    }

    fn require_mutable(env: &Env) -> Result<(), VestingError> {
        Self::require_initialized(env)?;
        AccessControl::require_not_paused(env)
    }

    fn treasury(env: &Env) -> Result<Address, VestingError> {
        env.storage()
            .instance()
            .get(&DataKey::Treasury)
            .ok_or(VestingError::NotInitialized)
    }

    fn create(env: &Env, caller: &Address, params: ScheduleParams) -> Result<BytesN<32>, VestingError> {
        let schedule = Self::validate(env, params, env.ledger().timestamp())?;

        let schedule_id = id::schedule_id(
            env,
            &schedule.beneficiary,
            schedule.total_amount,
            schedule.start_time,
            schedule.duration,
            schedule.cliff_duration,
            schedule.vesting_type,
            ScheduleStore::count(env),
        );
        if ScheduleStore::has(env, &schedule_id) {
            panic_with_error!(env, VestingError::ScheduleIdCollision);
        }

        ScheduleStore::save(env, &schedule_id, &schedule);
        ScheduleStore::add_to_index(env, &schedule.beneficiary, &schedule_id);
        ScheduleStore::increment_count(env)?;
        ScheduleStore::reserve(env, schedule.total_amount)?;

        Custody::transfer_in(env, caller, schedule.total_amount)?;

        events::schedule_created(
            env,
            &schedule_id,
            &schedule.beneficiary,
            schedule.total_amount,
            schedule.vesting_type,
            schedule.start_time,
            schedule.duration,
        );
        log!(env, "Vesting schedule created with ID: {}", schedule_id);

        Ok(schedule_id)
    }

    /// Checks a creation request and turns it into a fresh record.
    fn validate(env: &Env, params: ScheduleParams, now: u64) -> Result<VestingSchedule, VestingError> {
        if params.beneficiary == env.current_contract_address() {
            return Err(VestingError::InvalidBeneficiary);
        }
        if params.total_amount <= 0 {
            return Err(VestingError::InvalidAmount);
        }
        if params.duration == 0 || params.duration > MAX_VESTING_DURATION {
            return Err(VestingError::InvalidDuration);
        }

        let start_time = match params.start_time {
            0 => now,
            t if t < now => return Err(VestingError::InvalidStartTime),
            t => t,
        };
        start_time
            .checked_add(params.duration)
            .ok_or(VestingError::InvalidDuration)?;

        if params.vesting_type != VestingType::Milestone && params.milestone_count != 0 {
            return Err(VestingError::InvalidMilestoneCount);
        }

        let (cliff_duration, milestone_count) = match params.vesting_type {
            VestingType::Linear => {
                if params.cliff_duration != 0 {
                    return Err(VestingError::InvalidCliff);
                }
                (0, 0)
            }
            VestingType::Cliff => {
                if params.cliff_duration != 0 && params.cliff_duration != params.duration {
                    return Err(VestingError::InvalidCliff);
                }
                (params.duration, 0)
            }
            VestingType::Hybrid => {
                if params.cliff_duration >= params.duration {
                    return Err(VestingError::InvalidCliff);
                }
                (params.cliff_duration, 0)
            }
            VestingType::Milestone => {
                if params.milestone_count == 0 {
                    return Err(VestingError::InvalidMilestoneCount);
                }
                if params.cliff_duration != 0 {
                    return Err(VestingError::InvalidCliff);
                }
                (0, params.milestone_count)
            }
        };

        Ok(VestingSchedule {
            beneficiary: params.beneficiary,
            total_amount: params.total_amount,
            released: 0,
            start_time,
            duration: params.duration,
            cliff_duration,
            milestone_count,
            milestones_reached: 0,
            revocable: params.revocable,
            revoked: false,
            revoked_at: 0,
            vesting_type: params.vesting_type,
            metadata: params.metadata,
        })
    }
}
