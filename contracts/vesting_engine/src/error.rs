use soroban_sdk::contracterror;

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VestingError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidBeneficiary = 3,
    InvalidAmount = 4,
    InvalidDuration = 5,
    InvalidCliff = 6,
    InvalidMilestoneCount = 7,
    InvalidStartTime = 8,
    InvalidRange = 9,
    ScheduleNotFound = 10,
    Unauthorized = 11,
    AlreadyRevoked = 12,
    NotRevocable = 13,
    AllMilestonesReached = 14,
    NotMilestoneSchedule = 15,
    NothingDue = 16,
    CustodyFailure = 17,
    Paused = 18,
    ScheduleBusy = 19,
    AdminFlagAlreadySet = 20,
    LastAdmin = 21,
    ScheduleIdCollision = 22,
    MathOverflow = 23,
}

/// Broad failure class of a [`VestingError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Unauthorized,
    InvalidState,
    NothingDue,
    CustodyFailure,
    Internal,
}

impl VestingError {
    pub fn kind(&self) -> ErrorKind {
        use VestingError::*;

        match self {
            InvalidBeneficiary | InvalidAmount | InvalidDuration | InvalidCliff
            | InvalidMilestoneCount | InvalidStartTime | InvalidRange => ErrorKind::InvalidArgument,
            ScheduleNotFound => ErrorKind::NotFound,
            Unauthorized => ErrorKind::Unauthorized,
            AlreadyRevoked | NotRevocable | AllMilestonesReached | NotMilestoneSchedule | Paused
            | ScheduleBusy | AlreadyInitialized | NotInitialized | AdminFlagAlreadySet
            | LastAdmin => ErrorKind::InvalidState,
            NothingDue => ErrorKind::NothingDue,
            CustodyFailure => ErrorKind::CustodyFailure,
            ScheduleIdCollision | MathOverflow => ErrorKind::Internal,
        }
    }
}
