//! Module containing a `Storage` generic trait that can be implemented for different specific
//! storage backends, and helpers to encode typed values into the raw bytes the backends work on.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{StorageError, StorageErrorKind};

/// Result type for the Storage module.
/// This is the only return type acceptable for any public method in a storage backend.
pub type Result<T> = std::result::Result<T, failure::Error>;

/// Iterator over the key/value pairs sharing a prefix
pub type StorageIterator<'a> = Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;

/// This is a generic trait that exposes a very simple key/value CRUD API for data storage.
/// This trait can be easily implemented for any specific storage backend solution (databases,
/// volatile memory, flat files, etc.)
///
/// All methods take `&self`: backends are expected to synchronize internally.
pub trait Storage {
    /// Retrieve an entry from the storage, identified by its key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Create / update entries in the storage, identified by a key.
    fn put(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()>;

    /// Delete an entry from the storage, identified by its key.
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Iterate, in key order, over all the entries whose key starts with `prefix`.
    fn prefix_iterator<'a, 'b: 'a>(&'a self, prefix: &'b [u8]) -> Result<StorageIterator<'a>>;

    /// Atomically write a batch of operations
    fn write(&self, batch: WriteBatch) -> Result<()>;
}

/// Operations that can be applied atomically with `Storage::write`
#[derive(Debug, Default)]
pub struct WriteBatch {
    pub(crate) batch: Vec<WriteBatchItem>,
}

#[derive(Debug)]
pub(crate) enum WriteBatchItem {
    Put(Vec<u8>, Vec<u8>),
    Delete(Vec<u8>),
}

impl WriteBatch {
    /// Queue a raw put
    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.batch.push(WriteBatchItem::Put(key, value));
    }

    /// Queue a delete
    pub fn delete(&mut self, key: Vec<u8>) {
        self.batch.push(WriteBatchItem::Delete(key));
    }

    /// Queue a put of a value encoded with `to_bytes`
    pub fn put_t<T: Serialize>(&mut self, key: Vec<u8>, value: &T) -> Result<()> {
        let value = to_bytes(value)?;
        self.put(key, value);

        Ok(())
    }

    /// Number of queued operations
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    /// Whether no operation has been queued
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }
}

/// Convert a value into the bytes stored by the backends
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| {
        StorageError::new(
            StorageErrorKind::Encode,
            "Error when encoding value".to_string(),
            format!("{}", e),
        )
        .into()
    })
}

/// Create a value from the bytes stored by the backends
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    bincode::deserialize(bytes).map_err(|e| {
        StorageError::new(
            StorageErrorKind::Decode,
            "Error when decoding value".to_string(),
            format!("{}", e),
        )
        .into()
    })
}

/// Get an element from the storage, decoded with `from_bytes`.
///
/// It is the caller's responsibility to make sure that the type signature is correct,
/// as trying to get a value of an incorrect type may lead to unexpected behaviour.
pub fn get_t<T: DeserializeOwned>(storage: &dyn Storage, key: &[u8]) -> Result<Option<T>> {
    match storage.get(key)? {
        Some(bytes) => from_bytes(&bytes).map(Some),
        None => Ok(None),
    }
}

/// Build a storage key by appending `suffix` to a table `prefix`
pub fn prefixed_key(prefix: &[u8], suffix: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + suffix.len());
    key.extend_from_slice(prefix);
    key.extend_from_slice(suffix);

    key
}
