use std::collections::HashMap;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::AppError;

/// Runtime settings, read from the process environment.
///
/// Required env vars:
/// - `MONGO_URL`: MongoDB connection string
/// - `DB_NAME`: database name
///
/// Optional: `HOST` (default `0.0.0.0`), `PORT` (default `8001`),
/// `SEED_ON_STARTUP` (default `true`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub mongo_url: String,
    pub db_name: String,
    pub host: String,
    pub port: u16,
    pub seed_on_startup: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::load(Environment::default())
    }

    /// Build from an explicit variable map instead of the process
    /// environment (useful for testing).
    pub fn from_map(vars: HashMap<String, String>) -> Result<Self, AppError> {
        Self::load(Environment::default().source(Some(vars)))
    }

    fn load(environment: Environment) -> Result<Self, AppError> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8001)?
            .set_default("seed_on_startup", true)?
            .add_source(environment.try_parsing(true))
            .build()?;

        let settings: Settings = settings.try_deserialize()?;

        if settings.mongo_url.trim().is_empty() {
            return Err(AppError::Config("MONGO_URL must not be empty".into()));
        }
        if settings.db_name.trim().is_empty() {
            return Err(AppError::Config("DB_NAME must not be empty".into()));
        }

        Ok(settings)
    }

    /// The `host:port` pair the HTTP server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
