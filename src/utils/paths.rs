use dirs::home_dir;
use std::{env, fs, io, path::Path, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".masjid_core";
const DOCUMENTS_DIR: &str = "documents";
const BACKUP_DIR: &str = "backups";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const CONFIG_BACKUP_DIR: &str = "config_backups";

/// Returns the application-specific data directory, defaulting to `~/.masjid_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("MASJID_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the managed JSON documents.
pub fn documents_dir_in(base: &Path) -> PathBuf {
    base.join(DOCUMENTS_DIR)
}

/// Base directory for document backup snapshots.
pub fn backups_dir_in(base: &Path) -> PathBuf {
    base.join(BACKUP_DIR)
}

/// Directory holding the active configuration file.
pub fn config_dir_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR)
}

/// Path to the active configuration file.
pub fn config_file_in(base: &Path) -> PathBuf {
    config_dir_in(base).join(CONFIG_FILE)
}

/// Directory holding configuration backups.
pub fn config_backups_dir_in(base: &Path) -> PathBuf {
    base.join(CONFIG_BACKUP_DIR)
}

/// Creates the directory (and parents) when missing.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}
