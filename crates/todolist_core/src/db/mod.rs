//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the relational backend.
//! - Apply schema migrations in deterministic order before handing out a
//!   usable connection.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Returned connections have `foreign_keys=ON`, so list deletion
//!   cascades to the owned todo rows.

use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

pub mod migrations;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Opens a SQLite database file and applies all pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    info!(
        "event=db_open module=db mode=file path={}",
        path.as_ref().display()
    );
    let mut conn = Connection::open(path)?;
    bootstrap_connection(&mut conn)?;
    Ok(conn)
}

/// Opens an in-memory SQLite database and applies all pending migrations.
///
/// Used by tests and by deployments that want relational semantics without
/// a database file.
pub fn open_db_in_memory() -> DbResult<Connection> {
    info!("event=db_open module=db mode=memory");
    let mut conn = Connection::open_in_memory()?;
    bootstrap_connection(&mut conn)?;
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    migrations::apply_migrations(conn)?;
    Ok(())
}
