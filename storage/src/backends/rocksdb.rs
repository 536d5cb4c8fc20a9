//! # Rocksdb storage backend
//!
//! Storage backend that persists data in the file system using a RocksDB database.
use std::path::Path;

use failure::Fail;

use crate::storage::{Result, Storage, StorageIterator, WriteBatch, WriteBatchItem};

/// Rocksdb backend
pub struct Backend {
    db: rocksdb::DB,
}

#[derive(Debug, Fail)]
#[fail(display = "RocksDB error: {}", _0)]
struct Error(#[fail(cause)] rocksdb::Error);

impl Backend {
    /// Open (or create) the database stored at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = rocksdb::DB::open_default(path).map_err(Error)?;

        Ok(Self { db })
    }
}

impl Storage for Backend {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let result = self
            .db
            .get(key)
            .map(|opt| opt.map(|dbvec| dbvec.to_vec()))
            .map_err(Error)?;
        Ok(result)
    }

    fn put(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        self.db.put(key, value).map_err(Error)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.db.delete(key).map_err(Error)?;
        Ok(())
    }

    fn prefix_iterator<'a, 'b: 'a>(&'a self, prefix: &'b [u8]) -> Result<StorageIterator<'a>> {
        Ok(Box::new(
            self.db
                .iterator(rocksdb::IteratorMode::From(
                    prefix,
                    rocksdb::Direction::Forward,
                ))
                .take_while(move |(k, _v)| k.starts_with(prefix))
                .map(|(k, v)| (k.into(), v.into())),
        ))
    }

    fn write(&self, batch: WriteBatch) -> Result<()> {
        let mut rocksdb_batch = rocksdb::WriteBatch::default();

        for item in batch.batch {
            match item {
                WriteBatchItem::Put(key, value) => {
                    rocksdb_batch.put(key, value).map_err(Error)?;
                }
                WriteBatchItem::Delete(key) => {
                    rocksdb_batch.delete(key).map_err(Error)?;
                }
            }
        }

        self.db.write(rocksdb_batch).map_err(Error)?;

        Ok(())
    }
}
