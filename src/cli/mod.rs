mod commands;
mod info;
mod update;

pub use commands::Commands;
pub use info::run_info;
pub use update::run_update;

use std::fs;
use std::path::Path;

use crate::store::{SqliteStore, Store};

/// Open the store at `db_path`, creating the file and its tables if needed.
pub fn open_store(db_path: &Path) -> anyhow::Result<SqliteStore> {
    if let Some(parent) = db_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let store = SqliteStore::new(db_path)?;
    store.initialize()?;
    Ok(store)
}

/// Open an existing store, checking it exists
pub fn init_store(db_path: &Path) -> anyhow::Result<SqliteStore> {
    if !db_path.exists() {
        anyhow::bail!(
            "Database not found at {}. Run 'vcdb update' first.",
            db_path.display()
        );
    }

    SqliteStore::new(db_path).map_err(Into::into)
}
