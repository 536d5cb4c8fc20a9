//! # Partial Config
//!
//! All loaders in the `loaders` module transform the loaded configuration into an instance of
//! this struct. Params that do not appear in the source are `None`, and the `config` module
//! fills them in from the `defaults`.
use std::path::PathBuf;

use serde::Deserialize;

use polyscale_data_structures::Address;

use crate::config::StorageBackend;

/// The partial configuration object that contains all other, more specific, configuration
/// objects (log, storage, token, etc).
#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    /// Log-related configuration
    #[serde(default)]
    pub log: PartialLog,

    /// Storage-related configuration
    #[serde(default)]
    pub storage: PartialStorage,

    /// Reward token configuration
    #[serde(default)]
    pub token: PartialToken,

    /// Reputation ledger configuration
    #[serde(default)]
    pub reputation: PartialReputation,

    /// Model registry configuration
    #[serde(default)]
    pub registry: PartialRegistry,
}

/// Log-specific partial configuration
#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialLog {
    /// Level for the `polyscale` modules
    pub level: Option<log::LevelFilter>,
}

/// Storage-specific partial configuration
#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialStorage {
    /// Storage backend to use
    pub backend: Option<StorageBackend>,
    /// Directory holding the ledger state
    pub db_path: Option<PathBuf>,
}

/// Token-specific partial configuration
#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialToken {
    /// Ticker shown next to amounts
    pub symbol: Option<String>,
    /// Number of decimals used to display amounts
    pub decimals: Option<u8>,
    /// Accounts allowed to mint, burn and reward
    #[serde(default)]
    pub minters: Vec<Address>,
}

/// Reputation-specific partial configuration
#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialReputation {
    /// Accounts allowed to adjust reputation
    #[serde(default)]
    pub managers: Vec<Address>,
    /// Upper bound of a single adjustment
    pub max_adjustment: Option<u64>,
}

/// Registry-specific partial configuration
#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialRegistry {
    /// Accounts allowed to register models
    #[serde(default)]
    pub submitters: Vec<Address>,
}
