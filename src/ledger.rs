//! The three ledger components wired to a configuration and a storage backend.

use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
};

use fs2::FileExt;

use polyscale_config::{
    config::{Storage as StorageConfig, StorageBackend},
    Config,
};
use polyscale_data_structures::Address;
use polyscale_registry::ModelRegistry;
use polyscale_reputation::ReputationLedger;
use polyscale_storage::{backends::btreemap, Storage};
use polyscale_token::RewardToken;
use polyscale_util::files::{deserialize_from_file, serialize_to_file};

/// Name of the snapshot file written by the `file` backend, inside `db_path`
pub const SNAPSHOT_FILE: &str = "ledger.bin";

/// Registry, token and reputation ledger of one deployment
#[derive(Debug)]
pub struct Ledger {
    pub registry: ModelRegistry<Address>,
    pub token: RewardToken<Address>,
    pub reputation: ReputationLedger<Address>,
}

impl Ledger {
    /// Empty ledger using the access policies and limits of `config`
    pub fn new(config: &Config) -> Self {
        let mut reputation = ReputationLedger::with_policy(config.reputation.policy());
        if let Some(limit) = config.reputation.max_adjustment {
            reputation = reputation.with_max_adjustment(limit);
        }

        Self {
            registry: ModelRegistry::with_policy(config.registry.policy()),
            token: RewardToken::with_policy(config.token.policy()),
            reputation,
        }
    }

    /// Load every component from `storage`. Components missing from `storage` start empty.
    pub fn restore(storage: &dyn Storage, config: &Config) -> Result<Self, failure::Error> {
        let registry = ModelRegistry::restore(storage, config.registry.policy())?;
        let token = RewardToken::restore(storage, config.token.policy())?;
        let mut reputation = ReputationLedger::restore(storage, config.reputation.policy())?;
        if let Some(limit) = config.reputation.max_adjustment {
            reputation = reputation.with_max_adjustment(limit);
        }
        log::debug!(
            "Loaded ledger: {} models, {} token holders, {} reputation participants",
            registry.total_models(),
            token.holders(),
            reputation.participants()
        );

        Ok(Self {
            registry,
            token,
            reputation,
        })
    }

    /// Write every component into `storage`
    pub fn persist(&self, storage: &dyn Storage) -> Result<(), failure::Error> {
        self.registry.persist(storage)?;
        self.token.persist(storage)?;
        self.reputation.persist(storage)?;

        Ok(())
    }
}

/// Storage backend selected by the configuration
pub enum Store {
    /// In-memory map loaded from and saved into a snapshot file.
    ///
    /// An exclusive lock on the sibling `.lock` file is held until the store is dropped, so
    /// only one store at a time can load, modify and save the snapshot.
    File {
        path: PathBuf,
        backend: btreemap::Backend,
        _lock: File,
    },
    #[cfg(feature = "rocksdb-backend")]
    RocksDb(polyscale_storage::backends::rocksdb::Backend),
}

impl Store {
    /// Open the backend described by `config`, creating it if it does not exist yet
    pub fn open(config: &StorageConfig) -> Result<Self, failure::Error> {
        match config.backend {
            StorageBackend::File => Self::open_file(&config.db_path.join(SNAPSHOT_FILE)),
            StorageBackend::RocksDb => Self::open_rocksdb(&config.db_path),
        }
    }

    /// Load the snapshot file at `path`, or start an empty one.
    ///
    /// Blocks while another store holds the snapshot.
    pub fn open_file(path: &Path) -> Result<Self, failure::Error> {
        let lock = lock_exclusive(&path.with_extension("lock"))?;
        let entries = if path.exists() {
            log::debug!("Loading ledger snapshot from {}", path.display());
            deserialize_from_file(path)?
        } else {
            log::debug!("No ledger snapshot at {}, starting empty", path.display());
            btreemap::Entries::new()
        };

        Ok(Store::File {
            path: path.to_path_buf(),
            backend: btreemap::Backend::from_entries(entries),
            _lock: lock,
        })
    }

    #[cfg(feature = "rocksdb-backend")]
    fn open_rocksdb(path: &Path) -> Result<Self, failure::Error> {
        log::debug!("Opening RocksDB database at {}", path.display());
        let backend = polyscale_storage::backends::rocksdb::Backend::open(path)?;

        Ok(Store::RocksDb(backend))
    }

    #[cfg(not(feature = "rocksdb-backend"))]
    fn open_rocksdb(_path: &Path) -> Result<Self, failure::Error> {
        Err(failure::format_err!(
            "The rocksdb storage backend is not available: build with the \"rocksdb-backend\" feature"
        ))
    }

    /// The key/value storage the components read from and write into
    pub fn storage(&self) -> &dyn Storage {
        match self {
            Store::File { backend, .. } => backend,
            #[cfg(feature = "rocksdb-backend")]
            Store::RocksDb(backend) => backend,
        }
    }

    /// Make every write durable. The file backend rewrites its snapshot file.
    pub fn flush(&self) -> Result<(), failure::Error> {
        match self {
            Store::File { path, backend, .. } => {
                let entries = backend.entries()?;
                serialize_to_file(&entries, path)?;
                log::debug!("Saved {} entries into {}", entries.len(), path.display());

                Ok(())
            }
            #[cfg(feature = "rocksdb-backend")]
            Store::RocksDb(_) => Ok(()),
        }
    }
}

fn lock_exclusive(path: &Path) -> Result<File, failure::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)?;
    if file.try_lock_exclusive().is_err() {
        log::info!("Waiting for another process to release {}", path.display());
        file.lock_exclusive()?;
    }

    Ok(file)
}
