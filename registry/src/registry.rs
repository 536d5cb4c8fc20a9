//! Model Registry
//!
//! Every submission becomes a `ModelEntry` with the next sequential id. Entries are
//! stored in an arena where the entry with id `n` lives at position `n - 1`, plus a
//! `round -> ids` index. There is no update or delete operation.

use std::{
    collections::BTreeMap,
    fmt::Debug,
    sync::{PoisonError, RwLock},
};

use serde::{de::DeserializeOwned, Serialize};

use polyscale_data_structures::{
    AccessPolicy, InvalidInput, LedgerError, LedgerResult, ModelEntry, ModelId, Operation, Round,
};
use polyscale_storage::{
    error::{StorageError, StorageErrorKind},
    storage::{from_bytes, prefixed_key},
    Storage, WriteBatch,
};
use polyscale_util::timestamp::get_timestamp;

/// Storage key prefix of the models table
pub const MODEL_PREFIX: &[u8] = b"model-";

#[derive(Debug)]
struct Models<K> {
    entries: Vec<ModelEntry<K>>,
    by_round: BTreeMap<Round, Vec<ModelId>>,
}

impl<K> Models<K> {
    fn push(&mut self, entry: ModelEntry<K>) {
        self.by_round.entry(entry.round).or_default().push(entry.id);
        self.entries.push(entry);
    }

    fn get(&self, id: ModelId) -> Option<&ModelEntry<K>> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.entries.get(index)
    }
}

/// Append-only catalog of submitted models
#[derive(Debug)]
pub struct ModelRegistry<K>
where
    K: Ord,
{
    models: RwLock<Models<K>>,
    policy: AccessPolicy<K>,
}

impl<K> Default for ModelRegistry<K>
where
    K: Clone + Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ModelRegistry<K>
where
    K: Clone + Debug + Ord,
{
    /// Builds an empty registry that accepts submissions from any caller
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyscale_registry::ModelRegistry;
    /// let registry = ModelRegistry::new();
    /// let entry = registry
    ///     .register_model(&"client_0", 1, "QmTestCID123", "")
    ///     .unwrap();
    /// assert_eq!(entry.id, 1);
    /// assert_eq!(registry.total_models(), 1);
    /// ```
    pub fn new() -> Self {
        Self::with_policy(AccessPolicy::Open)
    }

    /// Builds an empty registry that only accepts submissions from callers allowed by `policy`
    pub fn with_policy(policy: AccessPolicy<K>) -> Self {
        Self {
            models: RwLock::new(Models {
                entries: vec![],
                by_round: BTreeMap::new(),
            }),
            policy,
        }
    }

    /// Append a new model submitted by `caller`, returning the stored entry.
    ///
    /// Fails with `InvalidInput::EmptyContentId` if `content_id` is empty. The round is not
    /// checked against previous rounds, and `metadata` may be empty.
    pub fn register_model(
        &self,
        caller: &K,
        round: Round,
        content_id: &str,
        metadata: &str,
    ) -> LedgerResult<ModelEntry<K>> {
        let result = self.append(caller, round, content_id, metadata);

        match &result {
            Ok(entry) => log::debug!(
                "Registered model #{} (round {}, cid {}) from {:?}",
                entry.id,
                entry.round,
                entry.content_id,
                caller
            ),
            Err(e) => log::warn!("Rejected model {:?} from {:?}: {}", content_id, caller, e),
        }

        result
    }

    /// All the registered models, in registration order
    pub fn get_models(&self) -> Vec<ModelEntry<K>> {
        self.read_models(|models| models.entries.clone())
    }

    /// Number of models ever registered
    pub fn total_models(&self) -> u64 {
        self.read_models(|models| models.entries.len() as u64)
    }

    /// The model registered with `id`, if any
    pub fn get_model(&self, id: ModelId) -> Option<ModelEntry<K>> {
        self.read_models(|models| models.get(id).cloned())
    }

    /// The models registered for `round`, in registration order
    pub fn models_in_round(&self, round: Round) -> Vec<ModelEntry<K>> {
        self.read_models(|models| {
            models
                .by_round
                .get(&round)
                .into_iter()
                .flatten()
                .filter_map(|id| models.get(*id).cloned())
                .collect()
        })
    }

    fn read_models<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&Models<K>) -> T,
    {
        f(&self.models.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn append(
        &self,
        caller: &K,
        round: Round,
        content_id: &str,
        metadata: &str,
    ) -> LedgerResult<ModelEntry<K>> {
        self.policy.check(caller, Operation::RegisterModel)?;
        if content_id.is_empty() {
            return Err(InvalidInput::EmptyContentId.into());
        }

        let mut models = self.models.write()?;
        let registered = models.entries.len() as u64;
        let id = registered.checked_add(1).ok_or(LedgerError::Overflow {
            current: registered,
            requested: 1,
        })?;
        let entry = ModelEntry {
            id,
            round,
            content_id: content_id.to_string(),
            metadata: metadata.to_string(),
            submitter: caller.clone(),
            // Read under the lock so that timestamps never decrease along ids
            timestamp: get_timestamp(),
        };
        models.push(entry.clone());

        Ok(entry)
    }
}

impl<K> ModelRegistry<K>
where
    K: Clone + Debug + Ord + Serialize + DeserializeOwned,
{
    /// Write every entry into `storage`, in a single atomic batch.
    ///
    /// Entries are immutable, so rewriting an entry that was already persisted is a no-op.
    pub fn persist(&self, storage: &dyn Storage) -> polyscale_storage::Result<()> {
        let entries = self.get_models();

        let mut batch = WriteBatch::default();
        for entry in &entries {
            batch.put_t(prefixed_key(MODEL_PREFIX, &entry.id.to_be_bytes()), entry)?;
        }
        storage.write(batch)?;
        log::debug!("Persisted {} models", entries.len());

        Ok(())
    }

    /// Rebuild a registry from the entries previously written by `persist`.
    ///
    /// Fails if the stored ids are not exactly `1..=n`.
    pub fn restore(
        storage: &dyn Storage,
        policy: AccessPolicy<K>,
    ) -> polyscale_storage::Result<Self> {
        let mut models = Models {
            entries: vec![],
            by_round: BTreeMap::new(),
        };
        // Keys are big endian ids, so the iterator yields them in id order
        for (_key, value) in storage.prefix_iterator(MODEL_PREFIX)? {
            let entry: ModelEntry<K> = from_bytes(&value)?;
            let expected = models.entries.len() as u64 + 1;
            if entry.id != expected {
                return Err(StorageError::new(
                    StorageErrorKind::Corrupted,
                    "models".to_string(),
                    format!("expected model #{}, found #{}", expected, entry.id),
                )
                .into());
            }
            models.push(entry);
        }
        log::debug!("Restored {} models", models.entries.len());

        Ok(Self {
            models: RwLock::new(models),
            policy,
        })
    }
}
