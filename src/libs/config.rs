//! Application configuration.
//!
//! Settings are resolved in three layers, later layers winning:
//!
//! 1. `config.json` in the per-user data directory (see [`DataStorage`]),
//!    or built-in defaults when the file does not exist.
//! 2. Environment variables (`TODO_HOST`, `PORT`, `TODO_DB_PATH`), which may
//!    come from a `.env` file loaded at startup.
//! 3. Command-line flags of the `serve` command.
//!
//! ```json
//! {
//!   "server": { "host": "127.0.0.1", "port": 5000, "cors_allow_any": true },
//!   "storage": { "db_path": "/var/lib/todos/todos.db" }
//! }
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::messages::Message;
use crate::msg_warning;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_HOST: &str = "TODO_HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DB_PATH: &str = "TODO_DB_PATH";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub host: String,

    /// TCP port, 5000 unless configured.
    pub port: u16,

    /// Allow cross-origin requests from any origin. The browser client is
    /// usually served from a different port than the API.
    #[serde(default = "default_cors_allow_any")]
    pub cors_allow_any: bool,
}

fn default_cors_allow_any() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors_allow_any: true,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct StorageConfig {
    /// Database file; defaults to `todos.db` in the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,
}

impl Config {
    /// Reads `config.json`, falling back to defaults when it does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Reads the file and applies environment overrides on top.
    pub fn load() -> Result<Config> {
        Ok(Self::read()?.with_env_overrides())
    }

    pub fn with_env_overrides(mut self) -> Self {
        let mut server = self.server();

        if let Ok(host) = std::env::var(ENV_HOST) {
            server.host = host;
        }
        if let Ok(port) = std::env::var(ENV_PORT) {
            match port.trim().parse() {
                Ok(port) => server.port = port,
                Err(_) => msg_warning!(Message::ConfigInvalidEnvPort(port)),
            }
        }
        self.server = Some(server);

        if let Ok(path) = std::env::var(ENV_DB_PATH) {
            self.storage = Some(StorageConfig {
                db_path: Some(PathBuf::from(path)),
            });
        }

        self
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    /// Resolved database path, creating the data directory when the default
    /// location is used.
    pub fn db_path(&self) -> Result<PathBuf> {
        match self.storage.as_ref().and_then(|s| s.db_path.clone()) {
            Some(path) => Ok(path),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }
}
