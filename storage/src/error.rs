//! Error type definitions for the Storage module.

use failure::Fail;
use std::fmt;

/// Storage Error
#[derive(Debug, Fail)]
#[fail(display = "{} : at \"{}\", msg {}", kind, info, msg)]
pub struct StorageError {
    /// Operation kind
    kind: StorageErrorKind,
    /// Operation parameter
    info: String,
    /// Error message
    msg: String,
}

impl StorageError {
    /// Create a storage error based on operation kind and related info.
    pub fn new(kind: StorageErrorKind, info: String, msg: String) -> Self {
        Self { kind, info, msg }
    }

    /// Operation kind that failed
    pub fn kind(&self) -> &StorageErrorKind {
        &self.kind
    }
}

/// Storage Errors while operating on a backend
#[derive(Debug, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// Errors when a backend lock was poisoned by a panicking writer
    Lock,
    /// Errors when converting a value into bytes
    Encode,
    /// Errors when creating a value from bytes
    Decode,
    /// Errors when the stored data breaks an invariant of the component that wrote it
    Corrupted,
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageError::{:?}", self)
    }
}
