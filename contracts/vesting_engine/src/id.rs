use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::types::VestingType;

/// Derives the identifier of a new schedule.
///
/// The running schedule count is part of the preimage, so two creations with
/// otherwise identical parameters still get distinct ids.
pub fn schedule_id(
    env: &Env,
    beneficiary: &Address,
    total_amount: i128,
    start_time: u64,
    duration: u64,
    cliff_duration: u64,
    vesting_type: VestingType,
    schedule_count: u64,
) -> BytesN<32> {
    let mut data = Bytes::new(env);

    data.append(&beneficiary.clone().to_xdr(env));
    data.extend_from_array(&total_amount.to_be_bytes());
    data.extend_from_array(&start_time.to_be_bytes());
    data.extend_from_array(&duration.to_be_bytes());
    data.extend_from_array(&cliff_duration.to_be_bytes());
    data.extend_from_array(&(vesting_type as u32).to_be_bytes());
    data.extend_from_array(&schedule_count.to_be_bytes());

    env.crypto().sha256(&data).into()
}
