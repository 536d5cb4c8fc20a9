//! Platform-specific application paths.

use std::env;
use std::path::PathBuf;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "polyscale.toml";

/// Find a configuration from standard paths.
///
/// In GNU/Linux:
///     current directory | $XDG_CONFIG_HOME/polyscale | /etc/polyscale
///
/// In MacOS:
///     current directory | $HOME/Library/Application Support/polyscale
///
/// In Windows:
///     current directory | C:\Users\Alice\AppData\Roaming\polyscale\config
pub fn find_config() -> Option<PathBuf> {
    let mut config_dirs = Vec::with_capacity(3);

    if let Ok(dir) = env::current_dir() {
        config_dirs.push(dir);
    }

    if let Some(dir) = project_dirs() {
        config_dirs.push(dir.config_dir().into());
    }

    if cfg!(unix) {
        config_dirs.push("/etc/polyscale".into());
    }

    config_dirs
        .into_iter()
        .map(|path| path.join(CONFIG_FILE))
        .find(|path| path.exists())
}

/// Returns a platform-specific path for storing the ledger state.
///
/// In GNU/Linux:
///     $XDG_DATA_HOME/polyscale
///
/// In MacOS:
///     $HOME/Library/Application Support/polyscale
///
/// In Windows:
///     C:\Users\Alice\AppData\Local\polyscale\data
///
/// Defaults to `polyscale` under the current directory.
pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|dir| dir.data_local_dir().into())
        .unwrap_or_else(|| {
            env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("polyscale")
        })
}

fn project_dirs() -> Option<directories_next::ProjectDirs> {
    directories_next::ProjectDirs::from("", "", "polyscale")
}
