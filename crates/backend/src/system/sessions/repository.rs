use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

/// Tracked browser session, keyed by the X-Session-ID header value
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub ip_address: String,
    pub created_at: String,
    pub last_activity: String,
    pub request_count: i64,
    pub is_blocked: bool,
}

fn row_to_session(row: &sea_orm::QueryResult) -> Result<Session> {
    Ok(Session {
        id: row.try_get("", "id")?,
        ip_address: row.try_get("", "ip_address")?,
        created_at: row.try_get("", "created_at")?,
        last_activity: row.try_get("", "last_activity")?,
        request_count: row.try_get("", "request_count")?,
        is_blocked: row.try_get::<i32>("", "is_blocked")? != 0,
    })
}

/// Get session by ID
pub async fn get_by_id(id: &str) -> Result<Option<Session>> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, ip_address, created_at, last_activity, request_count, is_blocked
             FROM sessions WHERE id = ?",
            [id.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(row_to_session(&row)?)),
        None => Ok(None),
    }
}

/// Create a fresh session row
pub async fn create(id: &str, ip_address: &str) -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();
    let now = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sessions (id, ip_address, created_at, last_activity, request_count, is_blocked)
         VALUES (?, ?, ?, ?, 1, 0)",
        [
            id.to_string().into(),
            ip_address.to_string().into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await
    .context("Failed to insert session")?;

    Ok(())
}

/// Bump activity timestamp and request counter
pub async fn touch(id: &str) -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();
    let now = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sessions SET last_activity = ?, request_count = request_count + 1 WHERE id = ?",
        [now.into(), id.to_string().into()],
    ))
    .await
    .context("Failed to touch session")?;

    Ok(())
}

/// Block a session permanently
pub async fn block(id: &str) -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sessions SET is_blocked = 1 WHERE id = ?",
        [id.to_string().into()],
    ))
    .await
    .context("Failed to block session")?;

    Ok(())
}
