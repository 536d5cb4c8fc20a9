//! Reputation Ledger

use std::{
    collections::BTreeMap,
    fmt::Debug,
    sync::{PoisonError, RwLock},
};

use serde::{de::DeserializeOwned, Serialize};

use polyscale_data_structures::{
    AccessPolicy, InvalidInput, LedgerError, LedgerResult, Operation,
};
use polyscale_storage::{
    storage::{from_bytes, prefixed_key, to_bytes},
    Storage, WriteBatch,
};

/// Reputation score of one identity
pub type Score = u64;

/// Storage key prefix of the reputation table
pub const REPUTATION_PREFIX: &[u8] = b"reputation-";

/// Reputation Ledger
///
/// This data structure keeps track of a non-negative reputation score for every
/// identity `K`. Identities that were never adjusted have a score of zero.
///
/// The method `add_reputation(caller, id, amount)` increases the score of `id`.
///
/// The method `reduce_reputation(caller, id, amount)` decreases it, clamping at zero:
/// a penalty larger than the current score leaves a score of exactly zero and still
/// succeeds. Token burns, in contrast, fail when the balance is insufficient.
///
/// Every mutation is serialized by a single write lock, so concurrent adjustments of
/// the same identity never lose updates.
#[derive(Debug)]
pub struct ReputationLedger<K>
where
    K: Ord,
{
    // <identity: score>, only identities that were ever adjusted are present
    scores: RwLock<BTreeMap<K, Score>>,
    policy: AccessPolicy<K>,
    max_adjustment: Option<Score>,
}

impl<K> Default for ReputationLedger<K>
where
    K: Clone + Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ReputationLedger<K>
where
    K: Clone + Debug + Ord,
{
    /// Builds a new empty ledger that any caller can adjust
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyscale_reputation::ReputationLedger;
    /// let ledger: ReputationLedger<&str> = ReputationLedger::new();
    /// ledger.add_reputation(&"coordinator", &"alice", 10).unwrap();
    /// ledger.reduce_reputation(&"coordinator", &"alice", 15).unwrap();
    /// assert_eq!(ledger.get_reputation(&"alice"), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_policy(AccessPolicy::Open)
    }

    /// Builds a new empty ledger that only callers allowed by `policy` can adjust
    pub fn with_policy(policy: AccessPolicy<K>) -> Self {
        Self {
            scores: RwLock::new(BTreeMap::new()),
            policy,
            max_adjustment: None,
        }
    }

    /// Reject single adjustments larger than `limit`
    pub fn with_max_adjustment(mut self, limit: Score) -> Self {
        self.max_adjustment = Some(limit);
        self
    }

    /// Increase the score of `who` by `amount`, returning the new score
    pub fn add_reputation(&self, caller: &K, who: &K, amount: Score) -> LedgerResult<Score> {
        let result = self
            .validate(caller, amount, Operation::AddReputation)
            .and_then(|()| {
                let mut scores = self.scores.write()?;
                let current = scores.get(who).copied().unwrap_or_default();
                let updated = current.checked_add(amount).ok_or(LedgerError::Overflow {
                    current,
                    requested: amount,
                })?;
                scores.insert(who.clone(), updated);

                Ok(updated)
            });

        match &result {
            Ok(score) => log::debug!("Reputation of {:?} increased to {}", who, score),
            Err(e) => log::warn!("Rejected reputation increase for {:?}: {}", who, e),
        }

        result
    }

    /// Decrease the score of `who` by `amount`, clamping at zero, returning the new score
    pub fn reduce_reputation(&self, caller: &K, who: &K, amount: Score) -> LedgerResult<Score> {
        let result = self
            .validate(caller, amount, Operation::ReduceReputation)
            .and_then(|()| {
                let mut scores = self.scores.write()?;
                let score = scores.entry(who.clone()).or_default();
                *score = score.saturating_sub(amount);

                Ok(*score)
            });

        match &result {
            Ok(score) => log::debug!("Reputation of {:?} reduced to {}", who, score),
            Err(e) => log::warn!("Rejected reputation reduction for {:?}: {}", who, e),
        }

        result
    }

    /// Current score of `who`, zero for identities that were never adjusted
    pub fn get_reputation(&self, who: &K) -> Score {
        self.scores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(who)
            .copied()
            .unwrap_or_default()
    }

    /// Number of identities that were ever adjusted
    pub fn participants(&self) -> usize {
        self.scores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Copy of all the scores, ordered by identity
    pub fn scores(&self) -> Vec<(K, Score)> {
        self.scores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }

    fn validate(&self, caller: &K, amount: Score, operation: Operation) -> LedgerResult<()> {
        self.policy.check(caller, operation)?;
        if amount == 0 {
            return Err(InvalidInput::ZeroAmount.into());
        }
        if let Some(limit) = self.max_adjustment {
            if amount > limit {
                return Err(InvalidInput::AdjustmentAboveLimit { amount, limit }.into());
            }
        }

        Ok(())
    }
}

impl<K> ReputationLedger<K>
where
    K: Clone + Debug + Ord + Serialize + DeserializeOwned,
{
    /// Write every score into `storage`, in a single atomic batch
    pub fn persist(&self, storage: &dyn Storage) -> polyscale_storage::Result<()> {
        let snapshot = self.scores();

        let mut batch = WriteBatch::default();
        for (who, score) in &snapshot {
            batch.put_t(prefixed_key(REPUTATION_PREFIX, &to_bytes(who)?), score)?;
        }
        storage.write(batch)?;
        log::debug!("Persisted {} reputation scores", snapshot.len());

        Ok(())
    }

    /// Rebuild a ledger from the scores previously written by `persist`
    pub fn restore(
        storage: &dyn Storage,
        policy: AccessPolicy<K>,
    ) -> polyscale_storage::Result<Self> {
        let mut scores = BTreeMap::new();
        for (key, value) in storage.prefix_iterator(REPUTATION_PREFIX)? {
            let who: K = from_bytes(&key[REPUTATION_PREFIX.len()..])?;
            let score: Score = from_bytes(&value)?;
            scores.insert(who, score);
        }
        log::debug!("Restored {} reputation scores", scores.len());

        Ok(Self {
            scores: RwLock::new(scores),
            policy,
            max_adjustment: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyscale_storage::backends::btreemap::Backend;
    use std::sync::Arc;

    const OWNER: &str = "owner";

    #[test]
    fn add_and_reduce_reputation() {
        let ledger = ReputationLedger::new();
        let addr1 = "addr1".to_string();
        let owner = OWNER.to_string();

        assert_eq!(ledger.add_reputation(&owner, &addr1, 10), Ok(10));
        assert_eq!(ledger.get_reputation(&addr1), 10);

        assert_eq!(ledger.reduce_reputation(&owner, &addr1, 5), Ok(5));
        assert_eq!(ledger.get_reputation(&addr1), 5);
    }

    #[test]
    fn reduce_does_not_go_below_zero() {
        let ledger = ReputationLedger::new();

        // Fresh identity, clamp from zero
        assert_eq!(ledger.reduce_reputation(&OWNER, &"addr1", 10), Ok(0));
        assert_eq!(ledger.get_reputation(&"addr1"), 0);

        // Penalty larger than the current score
        ledger.add_reputation(&OWNER, &"addr2", 3).unwrap();
        assert_eq!(ledger.reduce_reputation(&OWNER, &"addr2", 4), Ok(0));
        assert_eq!(ledger.get_reputation(&"addr2"), 0);
    }

    #[test]
    fn unseen_identity_has_zero_reputation() {
        let ledger: ReputationLedger<&str> = ReputationLedger::new();
        assert_eq!(ledger.get_reputation(&"nobody"), 0);
        assert_eq!(ledger.participants(), 0);
    }

    #[test]
    fn zero_amounts_are_rejected() {
        let ledger = ReputationLedger::new();
        ledger.add_reputation(&OWNER, &"addr1", 7).unwrap();

        assert_eq!(
            ledger.add_reputation(&OWNER, &"addr1", 0),
            Err(LedgerError::InvalidInput(InvalidInput::ZeroAmount))
        );
        assert_eq!(
            ledger.reduce_reputation(&OWNER, &"addr1", 0),
            Err(LedgerError::InvalidInput(InvalidInput::ZeroAmount))
        );
        assert_eq!(ledger.get_reputation(&"addr1"), 7);
    }

    #[test]
    fn overflow_is_rejected() {
        let ledger = ReputationLedger::new();
        ledger.add_reputation(&OWNER, &"addr1", Score::MAX).unwrap();

        assert_eq!(
            ledger.add_reputation(&OWNER, &"addr1", 1),
            Err(LedgerError::Overflow {
                current: Score::MAX,
                requested: 1
            })
        );
        assert_eq!(ledger.get_reputation(&"addr1"), Score::MAX);
    }

    #[test]
    fn max_adjustment() {
        let ledger = ReputationLedger::new().with_max_adjustment(100);

        assert_eq!(ledger.add_reputation(&OWNER, &"addr1", 100), Ok(100));
        assert_eq!(
            ledger.add_reputation(&OWNER, &"addr1", 101),
            Err(LedgerError::InvalidInput(
                InvalidInput::AdjustmentAboveLimit {
                    amount: 101,
                    limit: 100
                }
            ))
        );
        assert_eq!(
            ledger.reduce_reputation(&OWNER, &"addr1", 1_000),
            Err(LedgerError::InvalidInput(
                InvalidInput::AdjustmentAboveLimit {
                    amount: 1_000,
                    limit: 100
                }
            ))
        );
        assert_eq!(ledger.get_reputation(&"addr1"), 100);
    }

    #[test]
    fn restricted_policy() {
        let ledger = ReputationLedger::with_policy(AccessPolicy::from_allowed(vec![OWNER]));

        assert_eq!(
            ledger.add_reputation(&"mallory", &"mallory", 10),
            Err(LedgerError::Unauthorized {
                operation: Operation::AddReputation
            })
        );
        assert_eq!(
            ledger.reduce_reputation(&"mallory", &"addr1", 10),
            Err(LedgerError::Unauthorized {
                operation: Operation::ReduceReputation
            })
        );
        assert_eq!(ledger.participants(), 0);

        assert_eq!(ledger.add_reputation(&OWNER, &"addr1", 10), Ok(10));
    }

    #[test]
    fn concurrent_adjustments_are_not_lost() {
        let ledger = Arc::new(ReputationLedger::new());
        ledger.add_reputation(&OWNER, &"addr1", 1_000).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        if i % 2 == 0 {
                            ledger.add_reputation(&OWNER, &"addr1", 2).unwrap();
                        } else {
                            ledger.reduce_reputation(&OWNER, &"addr1", 1).unwrap();
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // 4 threads added 200 each, 4 threads removed 100 each
        assert_eq!(ledger.get_reputation(&"addr1"), 1_000 + 800 - 400);
    }

    #[test]
    fn persist_and_restore() {
        let storage = Backend::default();
        let ledger = ReputationLedger::new();
        ledger
            .add_reputation(&OWNER.to_string(), &"alice".to_string(), 10)
            .unwrap();
        ledger
            .reduce_reputation(&OWNER.to_string(), &"bob".to_string(), 5)
            .unwrap();
        ledger.persist(&storage).unwrap();

        let restored: ReputationLedger<String> =
            ReputationLedger::restore(&storage, AccessPolicy::Open).unwrap();
        assert_eq!(restored.scores(), ledger.scores());
        assert_eq!(restored.get_reputation(&"alice".to_string()), 10);
        assert_eq!(restored.participants(), 2);
    }
}
