use std::sync::Mutex;

use masjid_core::{config::ConfigManager, storage::DocumentStore};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated document store and config manager backed by a
/// unique directory for each test.
pub fn setup_test_env() -> (DocumentStore, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let store =
        DocumentStore::new(Some(base.join("documents")), Some(3)).expect("create document store");
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");

    (store, config_manager)
}
