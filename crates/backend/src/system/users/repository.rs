use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

/// Account row as stored in the users table
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub credits: i64,
    pub credits_used: i64,
    pub created_at: String,
}

fn row_to_user(row: &sea_orm::QueryResult) -> Result<User> {
    Ok(User {
        id: row.try_get("", "id")?,
        email: row.try_get("", "email")?,
        credits: row.try_get("", "credits")?,
        credits_used: row.try_get("", "credits_used")?,
        created_at: row.try_get("", "created_at")?,
    })
}

/// Create user with password hash
pub async fn create_with_password(user: &User, password_hash: &str) -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO users (id, email, password_hash, credits, credits_used, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
        [
            user.id.clone().into(),
            user.email.clone().into(),
            password_hash.to_string().into(),
            user.credits.into(),
            user.credits_used.into(),
            user.created_at.clone().into(),
        ],
    ))
    .await
    .context("Failed to insert user")?;

    Ok(())
}

/// Get user by ID
pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, email, credits, credits_used, created_at FROM users WHERE id = ?",
            [id.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(row_to_user(&row)?)),
        None => Ok(None),
    }
}

/// Get user by email
pub async fn get_by_email(email: &str) -> Result<Option<User>> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, email, credits, credits_used, created_at FROM users WHERE email = ?",
            [email.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(row_to_user(&row)?)),
        None => Ok(None),
    }
}

/// Get password hash for user
pub async fn get_password_hash(user_id: &str) -> Result<Option<String>> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT password_hash FROM users WHERE id = ?",
            [user_id.into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let hash: String = row.try_get("", "password_hash")?;
            Ok(Some(hash))
        }
        None => Ok(None),
    }
}

/// Deduct credits. Fails when the balance would go negative; the WHERE
/// guard makes the check atomic on the sqlite side.
pub async fn spend_credits(user_id: &str, amount: i64) -> Result<bool> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE users SET credits = credits - ?, credits_used = credits_used + ?
             WHERE id = ? AND credits >= ?",
            [amount.into(), amount.into(), user_id.into(), amount.into()],
        ))
        .await
        .context("Failed to spend credits")?;

    Ok(result.rows_affected() > 0)
}

/// Add purchased or granted credits to the balance
pub async fn add_credits(user_id: &str, amount: i64) -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE users SET credits = credits + ? WHERE id = ?",
        [amount.into(), user_id.into()],
    ))
    .await
    .context("Failed to add credits")?;

    Ok(())
}
