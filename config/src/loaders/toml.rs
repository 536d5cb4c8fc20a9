//! Load the configuration from a file or a `String` written in [Toml format](https://en.wikipedia.org/wiki/TOML)

use std::{fs, io, path::Path};

use thiserror::Error;

use crate::PartialConfig;

/// Errors this module can fail with. Parsing the configuration might fail with a
/// `toml::de::Error`, but loading it from a file might also fail with a `std::io::Error`.
#[derive(Debug, Error)]
pub enum Error {
    /// Error when trying to load the configuration from a file
    #[error("Could not read configuration file: {0}")]
    IOError(#[from] io::Error),
    /// Error when trying to build a `PartialConfig` out of the given Toml string
    #[error("Invalid configuration: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Just like `std::result::Result` but with the error param fixed to `Error` type in this module.
pub type Result<T> = std::result::Result<T, Error>;

/// Load configuration from a file written in Toml format.
pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<PartialConfig> {
    let contents = fs::read_to_string(filename)?;
    from_str(&contents)
}

/// Load configuration from a string written in Toml format.
pub fn from_str(contents: &str) -> Result<PartialConfig> {
    Ok(toml::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;

    #[test]
    fn test_load_empty_config() {
        let config = from_str("").unwrap();

        assert_eq!(config, PartialConfig::default());
    }

    #[test]
    fn test_load_non_empty_config() {
        let config = from_str(
            r"
[log]
level = 'debug'

[storage]
backend = 'rocksdb'
db_path = 'other-path'

[token]
decimals = 6
minters = ['0x00000000000000000000000000000000000000aa']
",
        )
        .unwrap();

        assert_eq!(config.log.level, Some(log::LevelFilter::Debug));
        assert_eq!(config.storage.backend, Some(StorageBackend::RocksDb));
        assert_eq!(config.token.decimals, Some(6));
        assert_eq!(config.token.symbol, None);
        assert_eq!(config.token.minters.len(), 1);
        assert!(config.registry.submitters.is_empty());
    }

    #[test]
    fn test_load_incorrect_config() {
        let config = from_str(
            r"
[token]
decimals = 'not a number'
",
        );

        assert!(matches!(config, Err(Error::ParseError(_))));
    }

    #[test]
    fn test_load_invalid_address() {
        let config = from_str(
            r"
[registry]
submitters = ['0x1234']
",
        );

        assert!(config.is_err());
    }

    #[test]
    fn test_load_unknown_backend() {
        assert!(from_str("[storage]\nbackend = 'hashmap'\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let config = from_file("/this/file/does/not/exist.toml");

        assert!(matches!(config, Err(Error::IOError(_))));
    }
}
