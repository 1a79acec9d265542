use std::path::{Path, PathBuf};

use rusqlite::{Connection, params, params_from_iter};
use tasker_core::{Category, NewTask, Task};
use tracing::{debug, info, instrument};

use crate::codec::{decode_completed, encode_completed};
use crate::connection::{self, ConnectionConfig, ConnectionPool};
use crate::criteria::{Criterion, where_clause};
use crate::errors::{Result, StoreError};
use crate::schema;

/// Category-scoped CRUD over SQLite.
///
/// Cheap to clone; clones share the same pool. Opened once at startup and
/// handed to the router.
#[derive(Clone)]
pub struct TaskStore {
    pool: ConnectionPool,
    path: PathBuf,
}

impl TaskStore {
    /// Open or create a database at the given path.
    pub fn open(path: &Path, config: &ConnectionConfig) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("create dir {}: {e}", parent.display())))?;
        }

        let pool = connection::new_file(path, config)?;
        pool.get()?.execute_batch(&schema::create_tables())?;

        info!(path = %path.display(), "task store opened");
        Ok(Self {
            pool,
            path: path.to_owned(),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn in_memory() -> Result<Self> {
        let pool = connection::new_in_memory()?;
        pool.get()?.execute_batch(&schema::create_tables())?;
        Ok(Self {
            pool,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whitelist membership test.
    pub fn is_valid_category(category: &str) -> bool {
        Category::is_valid(category)
    }

    /// Run a closure against a pooled connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.pool.get()?;
        f(&conn)
    }

    /// All tasks in the category, in rowid order.
    #[instrument(skip(self))]
    pub fn list(&self, category: &str) -> Result<Vec<Task>> {
        let table = resolve(category)?.table_name();
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT rowid AS id, lastUpdated, name, completed FROM {table} ORDER BY rowid"
            ))?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.into_iter()
                .map(|(id, last_updated, name, completed)| {
                    Ok(Task {
                        id,
                        last_updated,
                        name,
                        completed: decode_completed(completed, table)?,
                    })
                })
                .collect()
        })
    }

    /// Overwrite the row with `task.id`. Returns `false` when no such row
    /// exists in the category.
    #[instrument(skip(self, task), fields(id = task.id))]
    pub fn update(&self, category: &str, task: &Task) -> Result<bool> {
        let table = resolve(category)?.table_name();
        let changed = self.with_conn(|conn| {
            Ok(conn.execute(
                &format!(
                    "UPDATE {table} SET lastUpdated = ?1, name = ?2, completed = ?3 WHERE rowid = ?4"
                ),
                params![
                    task.last_updated,
                    task.name,
                    encode_completed(task.completed),
                    task.id
                ],
            )?)
        })?;
        debug!(changed, "update applied");
        Ok(changed > 0)
    }

    /// Insert a task and return its store-assigned id.
    #[instrument(skip(self, task))]
    pub fn insert(&self, category: &str, task: &NewTask) -> Result<i64> {
        let table = resolve(category)?.table_name();
        let id = self.with_conn(|conn| {
            let _ = conn.execute(
                &format!("INSERT INTO {table} (lastUpdated, name, completed) VALUES (?1, ?2, ?3)"),
                params![task.last_updated, task.name, encode_completed(task.completed)],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        debug!(id, "task inserted");
        Ok(id)
    }

    /// Delete every row matching all of `criteria`. Returns `true` when at
    /// least one row was removed. Empty criteria are refused outright.
    #[instrument(skip(self))]
    pub fn delete(&self, category: &str, criteria: &[Criterion]) -> Result<bool> {
        let table = resolve(category)?.table_name();
        if criteria.is_empty() {
            return Err(StoreError::SafetyViolation(format!(
                "refusing unconditional delete on {table}"
            )));
        }

        let (clause, values) = where_clause(criteria);
        let removed = self.with_conn(|conn| {
            Ok(conn.execute(
                &format!("DELETE FROM {table} WHERE {clause}"),
                params_from_iter(values),
            )?)
        })?;
        debug!(removed, "delete applied");
        Ok(removed > 0)
    }

    /// Execute a caller-written statement. Values must be passed through
    /// `params`; the statement text itself must not contain request data.
    #[instrument(skip(self, params))]
    pub fn raw_operation<P: rusqlite::Params>(&self, statement: &str, params: P) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute(statement, params)?))
    }
}

fn resolve(category: &str) -> Result<Category> {
    Category::parse(category).ok_or_else(|| StoreError::InvalidCategory(category.to_owned()))
}
