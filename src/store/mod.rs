mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
///
/// Writes between [`Store::begin_batch`] and [`Store::commit_batch`] become
/// visible to other readers all at once or, after
/// [`Store::rollback_batch`], not at all.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Repository operations
    fn create_repository(&self, uri: &str) -> Result<Repository>;
    fn get_repository(&self, repository_id: i64) -> Result<Option<Repository>>;
    fn list_repositories_by_uri(&self, uri: &str) -> Result<Vec<Repository>>;
    fn list_repositories(&self) -> Result<Vec<Repository>>;
    fn update_repository_last_change(&self, repository_id: i64, change_id: &str) -> Result<()>;

    // Change operations
    fn upsert_change(&self, change: &Change) -> Result<()>;
    fn get_change(&self, change_id: &str) -> Result<Option<Change>>;
    fn list_changes(&self, repository_id: i64) -> Result<Vec<Change>>;
    fn count_changes(&self, repository_id: i64) -> Result<i64>;

    // Path operations
    fn upsert_path(&self, path: &Path) -> Result<()>;
    /// Deletes a path row only if it is stored as a deletion.
    fn delete_deleted_path(&self, repository_id: i64, change_id: &str, path: &str) -> Result<bool>;
    fn list_paths(&self, repository_id: i64) -> Result<Vec<Path>>;
    fn list_change_paths(&self, change_id: &str) -> Result<Vec<Path>>;
    fn count_paths(&self, repository_id: i64) -> Result<i64>;

    // Batch operations
    fn begin_batch(&self) -> Result<()>;
    fn commit_batch(&self) -> Result<()>;
    fn rollback_batch(&self) -> Result<()>;

    fn close(&self) -> Result<()>;
}
