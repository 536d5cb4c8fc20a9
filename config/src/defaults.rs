//! # Default values
//!
//! Values used for every param that does not appear in the loaded configuration.
use std::path::PathBuf;

use crate::{config::StorageBackend, dirs};

/// Trait defining all the configuration params that have a suitable default value
pub trait Defaults {
    /// Default log level: `info`
    fn log_level(&self) -> log::LevelFilter {
        log::LevelFilter::Info
    }

    /// Default storage backend: a snapshot file
    fn storage_backend(&self) -> StorageBackend {
        StorageBackend::File
    }

    /// Default path for the ledger state
    fn storage_db_path(&self) -> PathBuf;

    /// Default token symbol: `PSFL`
    fn token_symbol(&self) -> String {
        "PSFL".to_string()
    }

    /// Default token decimals: `18`
    fn token_decimals(&self) -> u8 {
        18
    }

    /// Default bound of a single reputation adjustment: none
    fn reputation_max_adjustment(&self) -> Option<u64> {
        None
    }
}

/// Defaults of a ledger kept in the data directory of the current user
pub struct Local;

impl Defaults for Local {
    fn storage_db_path(&self) -> PathBuf {
        dirs::data_dir()
    }
}
