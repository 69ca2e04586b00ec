use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name=?;",
            [name.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

async fn create_table(conn: &DatabaseConnection, name: &str, ddl: &str) -> anyhow::Result<()> {
    if !table_exists(conn, name).await? {
        tracing::info!("Creating {} table", name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await?;
    }
    Ok(())
}

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/dreamforge.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    create_table(
        &conn,
        "sessions",
        r#"
        CREATE TABLE sessions (
            id TEXT PRIMARY KEY NOT NULL,
            ip_address TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            last_activity TEXT NOT NULL,
            request_count INTEGER NOT NULL DEFAULT 0,
            is_blocked INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    create_table(
        &conn,
        "generation_tasks",
        r#"
        CREATE TABLE generation_tasks (
            task_id TEXT PRIMARY KEY NOT NULL,
            session_id TEXT NOT NULL,
            kind TEXT NOT NULL,
            prompt TEXT,
            status TEXT NOT NULL DEFAULT 'PENDING',
            model_url TEXT,
            texture_url TEXT,
            preview_task_id TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    "#,
    )
    .await?;

    create_table(
        &conn,
        "users",
        r#"
        CREATE TABLE users (
            id TEXT PRIMARY KEY NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            credits INTEGER NOT NULL DEFAULT 0,
            credits_used INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .await?;

    create_table(
        &conn,
        "sys_settings",
        r#"
        CREATE TABLE sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT,
            updated_at TEXT
        );
    "#,
    )
    .await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
