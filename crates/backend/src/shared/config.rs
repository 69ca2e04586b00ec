use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub meshy: MeshyConfig,
    pub slant3d: Slant3dConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MeshyConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Slant3dConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    pub requests_per_window: u32,
    pub window_minutes: i64,
    pub session_timeout_minutes: i64,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/dreamforge.db"

[meshy]
base_url = "https://api.meshy.ai/openapi/v2"

[slant3d]
base_url = "https://www.slant3dapi.com/api"

[limits]
requests_per_window = 100
window_minutes = 15
session_timeout_minutes = 30
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Initialize the process-wide config. Call once at startup.
pub fn init() -> anyhow::Result<()> {
    let config = load_config()?;
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Config already initialized"))?;
    Ok(())
}

pub fn get() -> &'static Config {
    CONFIG.get().expect("Config has not been initialized")
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}

/// Secrets are read from the environment so they never land in config.toml.
pub mod env {
    pub fn meshy_api_key() -> String {
        std::env::var("MESHY_API_KEY").unwrap_or_default()
    }

    pub fn slant3d_api_key() -> String {
        std::env::var("SLANT3D_API_KEY").unwrap_or_default()
    }

    pub fn stripe_secret_key() -> String {
        std::env::var("STRIPE_SECRET_KEY").unwrap_or_default()
    }

    pub fn openai_api_key() -> String {
        std::env::var("OPENAI_API_KEY").unwrap_or_default()
    }

    pub fn frontend_url() -> String {
        std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/dreamforge.db");
        assert_eq!(config.meshy.base_url, "https://api.meshy.ai/openapi/v2");
        assert_eq!(config.limits.requests_per_window, 100);
        assert_eq!(config.limits.session_timeout_minutes, 30);
    }
}
