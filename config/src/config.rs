//! # Config
//!
//! This module contains the `Config` struct, which holds all the configuration params of a
//! ledger. The `Config` struct in this module is __total__: unlike the
//! [PartialConfig](crate::partial::PartialConfig) returned by the loaders, every field has a
//! value.
//!
//! ```
//! use polyscale_config::{Config, PartialConfig};
//!
//! let config = Config::from_partial(&PartialConfig::default());
//! assert_eq!(config, Config::default());
//! assert_eq!(config.token.symbol, "PSFL");
//! ```
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use polyscale_data_structures::{AccessPolicy, Address};

use crate::defaults::{Defaults, Local};
use crate::partial::{
    PartialConfig, PartialLog, PartialRegistry, PartialReputation, PartialStorage, PartialToken,
};

/// The total configuration object that contains all other, more specific, configuration
/// objects (log, storage, token, etc).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Log-related configuration
    pub log: Log,
    /// Storage-related configuration
    pub storage: Storage,
    /// Reward token configuration
    pub token: Token,
    /// Reputation ledger configuration
    pub reputation: Reputation,
    /// Model registry configuration
    pub registry: Registry,
}

/// Log-specific configuration
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Log {
    /// Level for the `polyscale` modules
    pub level: log::LevelFilter,
}

/// Available storage backends
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Whole ledger kept in memory and saved into a single snapshot file
    #[serde(rename = "file")]
    File,
    /// RocksDB database
    #[serde(rename = "rocksdb")]
    RocksDb,
}

/// Storage-specific configuration
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Storage {
    /// Storage backend to use
    pub backend: StorageBackend,
    /// Directory that will contain the snapshot file or the database
    pub db_path: PathBuf,
}

/// Token-specific configuration
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Token {
    /// Ticker shown next to amounts
    pub symbol: String,
    /// Number of decimals used to display amounts
    pub decimals: u8,
    /// Accounts allowed to mint, burn and reward. Empty means anyone.
    pub minters: Vec<Address>,
}

/// Reputation-specific configuration
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Reputation {
    /// Accounts allowed to adjust reputation. Empty means anyone.
    pub managers: Vec<Address>,
    /// Upper bound of a single adjustment
    pub max_adjustment: Option<u64>,
}

/// Registry-specific configuration
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Registry {
    /// Accounts allowed to register models. Empty means anyone.
    pub submitters: Vec<Address>,
}

impl Config {
    pub fn from_partial(config: &PartialConfig) -> Self {
        let defaults: &dyn Defaults = &Local;

        Config {
            log: Log::from_partial(&config.log, defaults),
            storage: Storage::from_partial(&config.storage, defaults),
            token: Token::from_partial(&config.token, defaults),
            reputation: Reputation::from_partial(&config.reputation, defaults),
            registry: Registry::from_partial(&config.registry, defaults),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_partial(&PartialConfig::default())
    }
}

impl Log {
    pub fn from_partial(config: &PartialLog, defaults: &dyn Defaults) -> Self {
        Log {
            level: config.level.unwrap_or_else(|| defaults.log_level()),
        }
    }
}

impl Storage {
    pub fn from_partial(config: &PartialStorage, defaults: &dyn Defaults) -> Self {
        Storage {
            backend: config
                .backend
                .unwrap_or_else(|| defaults.storage_backend()),
            db_path: config
                .db_path
                .to_owned()
                .unwrap_or_else(|| defaults.storage_db_path()),
        }
    }
}

impl Token {
    pub fn from_partial(config: &PartialToken, defaults: &dyn Defaults) -> Self {
        Token {
            symbol: config
                .symbol
                .to_owned()
                .unwrap_or_else(|| defaults.token_symbol()),
            decimals: config
                .decimals
                .unwrap_or_else(|| defaults.token_decimals()),
            minters: config.minters.clone(),
        }
    }

    /// Who can mint, burn and reward
    pub fn policy(&self) -> AccessPolicy<Address> {
        AccessPolicy::from_allowed(self.minters.iter().copied())
    }
}

impl Reputation {
    pub fn from_partial(config: &PartialReputation, defaults: &dyn Defaults) -> Self {
        Reputation {
            managers: config.managers.clone(),
            max_adjustment: config
                .max_adjustment
                .or_else(|| defaults.reputation_max_adjustment()),
        }
    }

    /// Who can adjust reputation
    pub fn policy(&self) -> AccessPolicy<Address> {
        AccessPolicy::from_allowed(self.managers.iter().copied())
    }
}

impl Registry {
    pub fn from_partial(config: &PartialRegistry, _defaults: &dyn Defaults) -> Self {
        Registry {
            submitters: config.submitters.clone(),
        }
    }

    /// Who can register models
    pub fn policy(&self) -> AccessPolicy<Address> {
        AccessPolicy::from_allowed(self.submitters.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn storage_from_partial() {
        let partial = PartialStorage {
            backend: Some(StorageBackend::RocksDb),
            db_path: Some(PathBuf::from("other")),
        };
        let config = Storage::from_partial(&partial, &Local);

        assert_eq!(config.backend, StorageBackend::RocksDb);
        assert_eq!(config.db_path, PathBuf::from("other"));
    }

    #[test]
    fn storage_default_from_partial() {
        let config = Storage::from_partial(&PartialStorage::default(), &Local);

        assert_eq!(config.backend, Local.storage_backend());
        assert_eq!(config.db_path, Local.storage_db_path());
    }

    #[test]
    fn token_from_partial() {
        let partial = PartialToken {
            symbol: Some("FLT".to_string()),
            decimals: None,
            minters: vec![],
        };
        let config = Token::from_partial(&partial, &Local);

        assert_eq!(config.symbol, "FLT");
        assert_eq!(config.decimals, 18);
        assert_eq!(config.policy(), AccessPolicy::Open);
    }

    #[test]
    fn restricted_policies() {
        let manager = Address::from_str("0x00000000000000000000000000000000000000aa").unwrap();
        let stranger = Address::from_str("0x00000000000000000000000000000000000000bb").unwrap();
        let partial = PartialReputation {
            managers: vec![manager],
            max_adjustment: Some(10),
        };
        let config = Reputation::from_partial(&partial, &Local);

        assert_eq!(config.max_adjustment, Some(10));
        assert!(config.policy().allows(&manager));
        assert!(!config.policy().allows(&stranger));
    }
}
