//! Error type definitions for the ledger components.

use std::sync::PoisonError;

use thiserror::Error;

use crate::{access::Operation, tokens::Tokens};

/// All errors returned by the model registry, the reward token and the reputation ledger.
///
/// Every operation that returns one of these leaves the component state untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// A malformed argument was passed to an operation.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    /// Tried to burn more tokens than the account holds.
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// The amount that was requested to be burnt.
        requested: Tokens,
        /// The balance of the account at the time of the request.
        available: Tokens,
    },
    /// Applying the operation would leave the range of the underlying integer.
    #[error("Overflow: cannot apply {requested} to {current}")]
    Overflow {
        /// The value before the operation.
        current: u64,
        /// The amount that was requested.
        requested: u64,
    },
    /// The caller is not allowed to perform the operation.
    #[error("Caller is not allowed to {operation}")]
    Unauthorized {
        /// The operation that was rejected.
        operation: Operation,
    },
    /// Tried to obtain a lock on a piece of data that was poisoned by a panicking writer.
    #[error("Tried to obtain a lock on poisoned data")]
    PoisonedLock,
}

/// Reasons for rejecting an argument as malformed
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    /// Token and reputation amounts must be strictly positive
    #[error("amount must be greater than zero")]
    ZeroAmount,
    /// Models must be registered with a content identifier
    #[error("content identifier must not be empty")]
    EmptyContentId,
    /// A single reputation adjustment exceeded the configured bound
    #[error("adjustment of {amount} exceeds the limit of {limit}")]
    AdjustmentAboveLimit {
        /// The requested adjustment
        amount: u64,
        /// The configured maximum adjustment
        limit: u64,
    },
}

impl<T> From<PoisonError<T>> for LedgerError {
    fn from(_value: PoisonError<T>) -> Self {
        LedgerError::PoisonedLock
    }
}

/// Result type for the ledger components.
pub type LedgerResult<T> = Result<T, LedgerError>;
