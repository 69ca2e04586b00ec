use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use contracts::generation::{TaskKind, TaskRecord, TaskStatus};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

fn parse_ts(value: Option<String>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn row_to_record(row: &sea_orm::QueryResult) -> Result<TaskRecord> {
    let kind: String = row.try_get("", "kind")?;
    let status: String = row.try_get("", "status")?;
    Ok(TaskRecord {
        task_id: row.try_get("", "task_id")?,
        kind: TaskKind::parse(&kind).map_err(|e| anyhow::anyhow!(e))?,
        prompt: row.try_get("", "prompt")?,
        status: TaskStatus::parse(&status).map_err(|e| anyhow::anyhow!(e))?,
        model_url: row.try_get("", "model_url")?,
        texture_url: row.try_get("", "texture_url")?,
        created_at: parse_ts(row.try_get("", "created_at")?),
        updated_at: parse_ts(row.try_get("", "updated_at")?),
    })
}

/// Record a newly accepted vendor task for a session
pub async fn insert(
    task_id: &str,
    session_id: &str,
    kind: TaskKind,
    prompt: Option<&str>,
    preview_task_id: Option<&str>,
) -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();
    let now = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO generation_tasks
            (task_id, session_id, kind, prompt, status, preview_task_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, 'PENDING', ?, ?, ?)",
        [
            task_id.to_string().into(),
            session_id.to_string().into(),
            kind.as_str().into(),
            prompt.map(str::to_string).into(),
            preview_task_id.map(str::to_string).into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await
    .context("Failed to insert generation task")?;

    Ok(())
}

/// Sync the stored row with what the vendor last reported
pub async fn update_status(
    task_id: &str,
    status: TaskStatus,
    model_url: Option<&str>,
    texture_url: Option<&str>,
) -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();
    let now = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE generation_tasks
         SET status = ?,
             model_url = COALESCE(?, model_url),
             texture_url = COALESCE(?, texture_url),
             updated_at = ?
         WHERE task_id = ?",
        [
            status.as_str().into(),
            model_url.map(str::to_string).into(),
            texture_url.map(str::to_string).into(),
            now.into(),
            task_id.to_string().into(),
        ],
    ))
    .await
    .context("Failed to update generation task")?;

    Ok(())
}

/// Row offset for a 1-based page. Computed in i64 so any u32 page_num
/// stays in range of the sqlite bind parameter.
fn page_offset(page_num: u32, page_size: u32) -> i64 {
    (i64::from(page_num) - 1).max(0) * i64::from(page_size)
}

/// Task history for one session, newest first
pub async fn list_by_session(
    session_id: &str,
    page_num: u32,
    page_size: u32,
) -> Result<Vec<TaskRecord>> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();
    let offset = page_offset(page_num, page_size);

    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT task_id, kind, prompt, status, model_url, texture_url, created_at, updated_at
             FROM generation_tasks
             WHERE session_id = ?
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?",
            [
                session_id.to_string().into(),
                (page_size as i64).into(),
                offset.into(),
            ],
        ))
        .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        records.push(row_to_record(&row)?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_offset_is_zero_based_from_page_one() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(3, 20), 40);
    }

    #[test]
    fn page_offset_tolerates_page_zero() {
        assert_eq!(page_offset(0, 20), 0);
    }

    #[test]
    fn page_offset_handles_the_full_u32_range() {
        assert_eq!(
            page_offset(u32::MAX, 50),
            (u32::MAX as i64 - 1) * 50
        );
    }
}
