//! TOML configuration with environment overrides.
//!
//! The file is optional: when it does not exist the server starts from
//! [`Config::minimal`] (no database). `PORT`, `DATABASE_URL`, and
//! `DATABASE_NAME` are applied on top, once, at startup.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub db: Option<DbConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub name: Option<String>,
}

impl DbConfig {
    /// Configured name, or the database file stem.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "kollny".to_string())
        })
    }
}

impl Config {
    /// Defaults only: bind `0.0.0.0:8000`, no database.
    pub fn minimal() -> Self {
        Self {
            server: ServerConfig::default(),
            db: None,
        }
    }

    /// Apply `PORT`, `DATABASE_URL`, and `DATABASE_NAME` from `lookup`.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a closure.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: '{}'", port))?;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            let path = PathBuf::from(strip_sqlite_scheme(url.trim()));
            match &mut self.db {
                Some(db) => db.path = path,
                None => self.db = Some(DbConfig { path, name: None }),
            }
        }

        if let Some(name) = lookup("DATABASE_NAME") {
            if let Some(db) = &mut self.db {
                db.name = Some(name);
            }
        }

        validate(&self)?;
        Ok(self)
    }
}

fn strip_sqlite_scheme(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

fn validate(config: &Config) -> Result<()> {
    if let Some(db) = &config.db {
        if db.path.as_os_str().is_empty() {
            anyhow::bail!("db.path must not be empty");
        }
    }
    if config.server.host.trim().is_empty() {
        anyhow::bail!("server.host must not be empty");
    }
    Ok(())
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;

    Ok(config)
}

/// Load `path` if it exists (otherwise [`Config::minimal`]) and apply
/// process environment overrides.
pub fn resolve_config(path: &Path) -> Result<Config> {
    let base = if path.exists() {
        load_config(path)?
    } else {
        Config::minimal()
    };
    base.with_env_overrides(|key| std::env::var(key).ok())
}
