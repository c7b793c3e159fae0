use soroban_sdk::contracterror;

/// Error codes shared by every platform contract.
///
/// Codes are part of the public interface: indexers and clients match on the
/// numeric value, and errors returned by a nested contract are forwarded
/// unchanged, so values are never reused or renumbered.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Caller lacks the owner/admin role required by the operation
    Unauthorized = 3,
    /// Caller is not the registered owner of the child registry
    NotOwner = 4,
    NotFounder = 5,
    NotAnApplicant = 6,
    NotApproved = 7,
    /// Creation rejected: the application deadline is not in the future
    DeadlineExpired = 8,
    /// Application rejected: the application deadline has passed
    DeadlinePassed = 9,
    InvalidValueSent = 10,
    InsufficientBalance = 11,
    InsufficientAllowance = 12,
    BelowMinimum = 13,
    ZeroAmount = 14,
    /// Negative amount, or arithmetic overflow on a tracked balance
    InvalidAmount = 15,
    AlreadyApproved = 16,
    AlreadyFinalized = 17,
    NothingToRelease = 18,
    InvalidImplementation = 19,
    InvalidWasmHash = 20,
    UnsupportedOperation = 21,
    /// A logic module returned an outcome that breaks the custody rules
    InvalidTransition = 22,
    InsufficientFunds = 23,
    InvalidAsset = 24,
    LogicCallFailed = 25,
    ReentrantCall = 26,
}
