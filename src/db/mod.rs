use std::path::Path;
use tokio::sync::{Mutex, MutexGuard};
use turso::{Builder, Connection};

pub mod app_state;

pub use app_state::{delete_app_state, get_app_state, load_theme, save_theme, set_app_state};

// Custom error type for database operations
pub(crate) type DbResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Local preference database.
///
/// The connection sits behind a mutex to serialize access; turso's page cache
/// is not safe under concurrent use of one connection.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (creating if needed) the database file and its tables
    pub async fn open(db_path: &Path) -> DbResult<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let path = db_path
            .to_str()
            .ok_or_else(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
        Self::open_path(path).await
    }

    /// Throwaway database, used when no data directory is configured
    pub async fn open_in_memory() -> DbResult<Self> {
        Self::open_path(":memory:").await
    }

    async fn open_path(path: &str) -> DbResult<Self> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        conn.execute_batch(app_state::get_table_sql()).await?;

        log::debug!("Opened local database at {}", path);
        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) async fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().await
    }
}
