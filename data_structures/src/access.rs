//! Explicit permission checks for mutating ledger operations.
//!
//! Callers identify themselves on every mutating call; each component holds an
//! `AccessPolicy` that decides whether that identity may perform the operation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::{LedgerError, LedgerResult};

/// Mutating operations subject to an `AccessPolicy`
#[derive(Clone, Copy, Debug, Display, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    /// Append a model to the registry
    RegisterModel,
    /// Create tokens
    Mint,
    /// Destroy tokens
    Burn,
    /// Pay out an incentive
    Reward,
    /// Increase a reputation score
    AddReputation,
    /// Decrease a reputation score
    ReduceReputation,
}

/// Which callers are allowed to mutate a component
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum AccessPolicy<K: Ord> {
    /// Any caller is allowed
    Open,
    /// Only the listed callers are allowed
    Restricted(BTreeSet<K>),
}

impl<K: Ord> Default for AccessPolicy<K> {
    fn default() -> Self {
        AccessPolicy::Open
    }
}

impl<K: Ord> AccessPolicy<K> {
    /// Build a policy from a list of allowed callers. An empty list means open access.
    pub fn from_allowed<I>(allowed: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let allowed: BTreeSet<K> = allowed.into_iter().collect();
        if allowed.is_empty() {
            AccessPolicy::Open
        } else {
            AccessPolicy::Restricted(allowed)
        }
    }

    /// Whether `caller` is allowed by this policy
    pub fn allows(&self, caller: &K) -> bool {
        match self {
            AccessPolicy::Open => true,
            AccessPolicy::Restricted(allowed) => allowed.contains(caller),
        }
    }

    /// Fail with `LedgerError::Unauthorized` unless `caller` is allowed to run `operation`
    pub fn check(&self, caller: &K, operation: Operation) -> LedgerResult<()> {
        if self.allows(caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized { operation })
        }
    }
}
