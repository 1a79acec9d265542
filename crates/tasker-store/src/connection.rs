//! `r2d2` pool of `rusqlite` connections.
//!
//! Pragmas run on every acquired connection so a fresh pool member behaves
//! like the first one.

use std::path::Path;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::errors::Result;
use crate::schema;

pub type ConnectionPool = Pool<SqliteConnectionManager>;

pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Pool tuning.
#[derive(Clone, Debug)]
pub struct ConnectionConfig {
    /// Maximum pool size (default: 8).
    pub pool_size: u32,
    /// Busy timeout in milliseconds (default: 5000).
    pub busy_timeout_ms: u32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            pool_size: 8,
            busy_timeout_ms: 5_000,
        }
    }
}

#[derive(Debug)]
struct PragmaCustomizer {
    busy_timeout_ms: u32,
    wal: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        if self.wal {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch(&format!("PRAGMA busy_timeout = {};", self.busy_timeout_ms))?;
        conn.execute_batch(schema::PRAGMAS)
    }
}

/// File-backed pool.
pub fn new_file(path: &Path, config: &ConnectionConfig) -> Result<ConnectionPool> {
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(Duration::from_secs(5))
        .connection_customizer(Box::new(PragmaCustomizer {
            busy_timeout_ms: config.busy_timeout_ms,
            wal: true,
        }))
        .build(SqliteConnectionManager::file(path))?;
    Ok(pool)
}

/// In-memory pool. Each SQLite in-memory connection is its own database,
/// so the pool is pinned to a single connection.
pub fn new_in_memory() -> Result<ConnectionPool> {
    let pool = Pool::builder()
        .max_size(1)
        .connection_timeout(Duration::from_secs(5))
        .connection_customizer(Box::new(PragmaCustomizer {
            busy_timeout_ms: ConnectionConfig::default().busy_timeout_ms,
            wal: false,
        }))
        .build(SqliteConnectionManager::memory())?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn journal_mode(conn: &Connection) -> String {
        conn.query_row("PRAGMA journal_mode", [], |row| row.get(0)).unwrap()
    }

    #[test]
    fn in_memory_pool_single_connection() {
        let pool = new_in_memory().unwrap();
        assert_eq!(pool.max_size(), 1);
        let conn = pool.get().unwrap();
        assert_eq!(journal_mode(&conn), "memory");
    }

    #[test]
    fn file_pool_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let pool = new_file(&dir.path().join("t.sqlite"), &ConnectionConfig::default()).unwrap();
        let conn = pool.get().unwrap();
        assert_eq!(journal_mode(&conn), "wal");
    }

    #[test]
    fn custom_pool_size() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConnectionConfig {
            pool_size: 2,
            ..Default::default()
        };
        let pool = new_file(&dir.path().join("t.sqlite"), &config).unwrap();
        assert_eq!(pool.max_size(), 2);
    }
}
