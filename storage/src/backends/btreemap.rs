//! # BTreeMap storage backend
//!
//! Storage backend that keeps data in a heap-allocated BTreeMap. The whole map can be
//! exported with `entries` and loaded back with `from_entries`, which is how snapshot files
//! are written and read.
use std::{
    collections::BTreeMap,
    ops::Bound,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{
    error::{StorageError, StorageErrorKind},
    storage::{Result, Storage, StorageIterator, WriteBatch, WriteBatchItem},
};

/// Raw contents of a BTreeMap backend
pub type Entries = BTreeMap<Vec<u8>, Vec<u8>>;

/// BTreeMap backend
#[derive(Debug, Default)]
pub struct Backend {
    map: RwLock<Entries>,
}

impl Backend {
    /// Create a backend pre-populated with `entries`
    pub fn from_entries(entries: Entries) -> Self {
        Self {
            map: RwLock::new(entries),
        }
    }

    /// Copy of all the entries currently stored
    pub fn entries(&self) -> Result<Entries> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Entries>> {
        self.map.read().map_err(|e| lock_error(e.to_string()))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, Entries>> {
        self.map.write().map_err(|e| lock_error(e.to_string()))
    }
}

fn lock_error(msg: String) -> failure::Error {
    StorageError::new(StorageErrorKind::Lock, "btreemap".to_string(), msg).into()
}

impl Storage for Backend {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn put(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        self.write_lock()?.insert(key, value);
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.write_lock()?.remove(key);
        Ok(())
    }

    fn prefix_iterator<'a, 'b: 'a>(&'a self, prefix: &'b [u8]) -> Result<StorageIterator<'a>> {
        // Copy the matching range so that the read lock is not held while iterating
        let matching: Vec<(Vec<u8>, Vec<u8>)> = self
            .read()?
            .range::<[u8], _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(k, _v)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Box::new(matching.into_iter()))
    }

    fn write(&self, batch: WriteBatch) -> Result<()> {
        let mut map = self.write_lock()?;

        for item in batch.batch {
            match item {
                WriteBatchItem::Put(key, value) => {
                    map.insert(key, value);
                }
                WriteBatchItem::Delete(key) => {
                    map.remove(&key);
                }
            }
        }

        Ok(())
    }
}
