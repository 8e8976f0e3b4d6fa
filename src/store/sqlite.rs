use std::path::Path as FsPath;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<FsPath>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }
}

fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn invalid_code(column: usize, code: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        format!("unknown code {code:?}").into(),
    )
}

const REPOSITORY_COLUMNS: &str = "repository_id, uri, last_change_id";

fn repository_from_row(row: &Row<'_>) -> rusqlite::Result<Repository> {
    Ok(Repository {
        repository_id: row.get(0)?,
        uri: row.get(1)?,
        last_change_id: row.get(2)?,
    })
}

const CHANGE_COLUMNS: &str =
    "change_id, commit_id, author, commit_message, commit_time, repository_id";

fn change_from_row(row: &Row<'_>) -> rusqlite::Result<Change> {
    Ok(Change {
        change_id: row.get(0)?,
        commit_id: row.get(1)?,
        author: row.get(2)?,
        commit_message: row.get(3)?,
        commit_time: parse_datetime(&row.get::<_, String>(4)?)?,
        repository_id: row.get(5)?,
    })
}

const PATH_COLUMNS: &str =
    "repository_id, change_id, path, kind, action, base_change_id, base_path";

fn path_from_row(row: &Row<'_>) -> rusqlite::Result<Path> {
    let kind: String = row.get(3)?;
    let action: String = row.get(4)?;
    Ok(Path {
        repository_id: row.get(0)?,
        change_id: row.get(1)?,
        path: row.get(2)?,
        kind: PathKind::from_code(&kind).ok_or_else(|| invalid_code(3, kind))?,
        action: PathAction::from_code(&action).ok_or_else(|| invalid_code(4, action))?,
        base_change_id: row.get(5)?,
        base_path: row.get(6)?,
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Repository operations

    fn create_repository(&self, uri: &str) -> Result<Repository> {
        let conn = self.conn();
        conn.execute("INSERT INTO repositories (uri) VALUES (?1)", params![uri])?;
        Ok(Repository {
            repository_id: conn.last_insert_rowid(),
            uri: uri.to_string(),
            last_change_id: None,
        })
    }

    fn get_repository(&self, repository_id: i64) -> Result<Option<Repository>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {REPOSITORY_COLUMNS} FROM repositories WHERE repository_id = ?1"),
            params![repository_id],
            repository_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_repositories_by_uri(&self, uri: &str) -> Result<Vec<Repository>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {REPOSITORY_COLUMNS} FROM repositories WHERE uri = ?1 ORDER BY repository_id"
        ))?;

        let rows = stmt.query_map(params![uri], repository_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_repositories(&self) -> Result<Vec<Repository>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {REPOSITORY_COLUMNS} FROM repositories ORDER BY repository_id"
        ))?;

        let rows = stmt.query_map([], repository_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_repository_last_change(&self, repository_id: i64, change_id: &str) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE repositories SET last_change_id = ?1 WHERE repository_id = ?2",
            params![change_id, repository_id],
        )?;

        if rows == 0 {
            return Err(Error::Database(rusqlite::Error::QueryReturnedNoRows));
        }
        Ok(())
    }

    // Change operations

    fn upsert_change(&self, change: &Change) -> Result<()> {
        self.conn().execute(
            "INSERT INTO changes (change_id, commit_id, author, commit_message, commit_time, repository_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (change_id) DO UPDATE SET
                commit_id = excluded.commit_id,
                author = excluded.author,
                commit_message = excluded.commit_message,
                commit_time = excluded.commit_time,
                repository_id = excluded.repository_id",
            params![
                change.change_id,
                change.commit_id,
                change.author,
                change.commit_message,
                format_datetime(&change.commit_time),
                change.repository_id,
            ],
        )?;
        Ok(())
    }

    fn get_change(&self, change_id: &str) -> Result<Option<Change>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {CHANGE_COLUMNS} FROM changes WHERE change_id = ?1"),
            params![change_id],
            change_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_changes(&self, repository_id: i64) -> Result<Vec<Change>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {CHANGE_COLUMNS} FROM changes WHERE repository_id = ?1
             ORDER BY commit_time, change_id"
        ))?;

        let rows = stmt.query_map(params![repository_id], change_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn count_changes(&self, repository_id: i64) -> Result<i64> {
        self.conn()
            .query_row(
                "SELECT COUNT(*) FROM changes WHERE repository_id = ?1",
                params![repository_id],
                |row| row.get(0),
            )
            .map_err(Error::from)
    }

    // Path operations

    fn upsert_path(&self, path: &Path) -> Result<()> {
        self.conn().execute(
            "INSERT INTO paths (repository_id, change_id, path, kind, action, base_change_id, base_path)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT (repository_id, change_id, path) DO UPDATE SET
                kind = excluded.kind,
                action = excluded.action,
                base_change_id = excluded.base_change_id,
                base_path = excluded.base_path",
            params![
                path.repository_id,
                path.change_id,
                path.path,
                path.kind.code(),
                path.action.code(),
                path.base_change_id,
                path.base_path,
            ],
        )?;
        Ok(())
    }

    fn delete_deleted_path(&self, repository_id: i64, change_id: &str, path: &str) -> Result<bool> {
        let rows = self.conn().execute(
            "DELETE FROM paths
             WHERE repository_id = ?1 AND change_id = ?2 AND path = ?3 AND action = ?4",
            params![repository_id, change_id, path, PathAction::Deleted.code()],
        )?;
        Ok(rows > 0)
    }

    fn list_paths(&self, repository_id: i64) -> Result<Vec<Path>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PATH_COLUMNS} FROM paths WHERE repository_id = ?1 ORDER BY change_id, path"
        ))?;

        let rows = stmt.query_map(params![repository_id], path_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_change_paths(&self, change_id: &str) -> Result<Vec<Path>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PATH_COLUMNS} FROM paths WHERE change_id = ?1 ORDER BY path"
        ))?;

        let rows = stmt.query_map(params![change_id], path_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn count_paths(&self, repository_id: i64) -> Result<i64> {
        self.conn()
            .query_row(
                "SELECT COUNT(*) FROM paths WHERE repository_id = ?1",
                params![repository_id],
                |row| row.get(0),
            )
            .map_err(Error::from)
    }

    // Batch operations

    fn begin_batch(&self) -> Result<()> {
        self.conn().execute_batch("BEGIN IMMEDIATE")?;
        Ok(())
    }

    fn commit_batch(&self) -> Result<()> {
        self.conn().execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback_batch(&self) -> Result<()> {
        self.conn().execute_batch("ROLLBACK")?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.conn().execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")?;
        Ok(())
    }
}
