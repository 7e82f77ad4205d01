use super::{Database, DbResult};
use crate::store::Theme;

const THEME_KEY: &str = "theme";

/// Get SQL for creating app_state table
pub fn get_table_sql() -> &'static str {
    "
    CREATE TABLE IF NOT EXISTS app_state (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "
}

// ============ App State Functions ============

/// Get app state value
pub async fn get_app_state(db: &Database, key: &str) -> DbResult<Option<String>> {
    let conn = db.connection().await;
    let mut rows = conn
        .query("SELECT value FROM app_state WHERE key = ?1", turso::params![key])
        .await?;

    if let Some(row) = rows.next().await? {
        Ok(Some(row.get(0)?))
    } else {
        Ok(None)
    }
}

/// Set app state value
pub async fn set_app_state(db: &Database, key: &str, value: &str) -> DbResult<()> {
    let conn = db.connection().await;
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, ?2)
         ON CONFLICT (key) DO UPDATE SET value = ?2",
        turso::params![key, value],
    )
    .await?;
    Ok(())
}

/// Delete app state value
pub async fn delete_app_state(db: &Database, key: &str) -> DbResult<()> {
    let conn = db.connection().await;
    conn.execute("DELETE FROM app_state WHERE key = ?1", turso::params![key])
        .await?;
    Ok(())
}

// ============ Theme ============

/// Stored theme, `Theme::Default` when unset or unrecognised
pub async fn load_theme(db: &Database) -> DbResult<Theme> {
    let stored = get_app_state(db, THEME_KEY).await?;
    Ok(Theme::parse_or_default(stored.as_deref()))
}

pub async fn save_theme(db: &Database, theme: Theme) -> DbResult<()> {
    set_app_state(db, THEME_KEY, theme.as_str()).await
}
