//! Application settings loaded from `settings.toml`.

use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
}

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level filter for the tracing subscriber ("info", "debug", ...).
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub database: Database,
    /// Bind address; defaults to 127.0.0.1.
    pub bind: Option<String>,
    pub port: u16,
}

/// Database backing the engine.
///
/// In `settings.toml` either `database = "memory"` or
/// `database = { sqlite = "./preventivo.db" }`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("app.level", "info")?
            .add_source(File::with_name("settings"))
            .build()?;

        config.try_deserialize()
    }
}
