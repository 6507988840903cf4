//! Database Connection and Setup
//!
//! Manages the SQLite connection and schema.

use rusqlite::{Connection, ErrorCode};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{SqliteItemRepository, SqliteListRepository, SqliteReservationRepository};
use crate::domain::{DomainError, DomainResult};
use crate::repository::Registry;

pub(super) type SharedConnection = Arc<Mutex<Connection>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    conn: SharedConnection,
}

impl DbState {
    /// Repositories sharing this connection
    pub fn registry(&self) -> Registry {
        Registry {
            lists: Box::new(SqliteListRepository::new(self.conn.clone())),
            items: Box::new(SqliteItemRepository::new(self.conn.clone())),
            reservations: Box::new(SqliteReservationRepository::new(self.conn.clone())),
        }
    }
}

/// Map constraint violations to `Conflict`, everything else to `Backend`
pub(super) fn map_write_error(e: rusqlite::Error, what: &str) -> DomainError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
            DomainError::Conflict(format!("{} violates a storage constraint", what))
        }
        _ => DomainError::from(e),
    }
}

/// Open (or create) the database file and bring the schema up to date
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(db_path)?;
    log::info!("Opened registry database at {}", db_path.display());
    prepare(conn).await
}

/// Fresh private in-memory database
pub async fn init_in_memory() -> DomainResult<DbState> {
    prepare(Connection::open_in_memory()?).await
}

async fn prepare(conn: Connection) -> DomainResult<DbState> {
    // Deleting a list cascades to its items and their reservations
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    run_migrations(&conn)?;

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
    })
}

fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS gift_lists (
            id BLOB PRIMARY KEY NOT NULL,
            user_id BLOB NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            theme_color TEXT NOT NULL DEFAULT '#fbbf24',
            cover_image TEXT,
            event_date TEXT,
            slug TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS gift_items (
            id BLOB PRIMARY KEY NOT NULL,
            list_id BLOB NOT NULL REFERENCES gift_lists(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            description TEXT,
            link TEXT,
            image_url TEXT,
            quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity > 0),
            reserved_count INTEGER NOT NULL DEFAULT 0
                CHECK (reserved_count >= 0 AND reserved_count <= quantity),
            priority INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS reservations (
            id BLOB PRIMARY KEY NOT NULL,
            item_id BLOB NOT NULL REFERENCES gift_items(id) ON DELETE CASCADE,
            reserver_name TEXT NOT NULL,
            reserver_email TEXT,
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            message TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_lists_user ON gift_lists(user_id);
        CREATE INDEX IF NOT EXISTS idx_items_list ON gift_items(list_id);
        CREATE INDEX IF NOT EXISTS idx_reservations_item ON reservations(item_id);",
    )?;
    Ok(())
}
