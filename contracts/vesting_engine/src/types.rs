use soroban_sdk::{contracttype, Address, BytesN};

/// Longest unlock window a schedule may declare: 10 years.
pub const MAX_VESTING_DURATION: u64 = 10 * 365 * 24 * 60 * 60;

// Minimum TTL before extending the instance lifetime: 20 days in 5 seconds ledger time
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = 345_600;
// Extension amount for the instance lifetime: 30 days in 5 seconds ledger time
pub const INSTANCE_EXTENSION_AMOUNT: u32 = 518_400;

// Schedules stay queryable for audit, so their entries are bumped further out.
pub const SCHEDULE_LIFETIME_THRESHOLD: u32 = 518_400;
pub const SCHEDULE_EXTENSION_AMOUNT: u32 = 3_110_400;

/// Unlock policy of a schedule.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VestingType {
    Linear = 0,
    Cliff = 1,
    Hybrid = 2,
    Milestone = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingSchedule {
    pub beneficiary: Address,
    pub total_amount: i128,
    pub released: i128,
    pub start_time: u64,
    pub duration: u64,
    pub cliff_duration: u64,
    pub milestone_count: u32,
    pub milestones_reached: u32,
    pub revocable: bool,
    pub revoked: bool,
    pub revoked_at: u64,
    pub vesting_type: VestingType,
    pub metadata: BytesN<32>,
}

/// Creation request for a single schedule.
///
/// A `start_time` of 0 means "the current ledger timestamp".
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleParams {
    pub beneficiary: Address,
    pub total_amount: i128,
    pub start_time: u64,
    pub duration: u64,
    pub cliff_duration: u64,
    pub milestone_count: u32,
    pub revocable: bool,
    pub vesting_type: VestingType,
    pub metadata: BytesN<32>,
}

/// Storage keys.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // Instance storage.
    Admins,
    AdminCount,
    TokenAddress,
    Treasury,
    Paused,
    ScheduleCount,
    TokensReserved,
    // Persistent storage.
    Schedule(BytesN<32>),
    BeneficiarySchedules(Address),
    Slot(BytesN<32>),
    // Temporary storage.
    Busy(BytesN<32>),
}
