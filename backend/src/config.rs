//! # Configuration
//!
//! Settings come from an optional YAML file, then environment overrides.
//!
//! ```yaml
//! database_url: "sqlite:address_book.db"
//! bind_address: "127.0.0.1:3000"
//! schema: with_children       # or: flat
//! static_dir: "./static"
//! cors_origin: "http://localhost:8080"
//! log_level: info
//! ```
//!
//! The file is read from `$ADDRESS_BOOK_CONFIG` when set, otherwise from
//! `address-book.yaml` in the working directory if it exists.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::storage::{SchemaVariant, DEFAULT_DATABASE_URL};

pub const CONFIG_PATH_ENV: &str = "ADDRESS_BOOK_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "address-book.yaml";

pub const DATABASE_URL_ENV: &str = "ADDRESS_BOOK_DATABASE_URL";
pub const BIND_ENV: &str = "ADDRESS_BOOK_BIND";
pub const SCHEMA_ENV: &str = "ADDRESS_BOOK_SCHEMA";
pub const STATIC_DIR_ENV: &str = "ADDRESS_BOOK_STATIC_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    /// Whether hobbies and pets are stored alongside contacts
    pub schema: SchemaVariant,
    /// Directory of browser pages served for unmatched routes
    pub static_dir: Option<PathBuf>,
    pub cors_origin: String,
    /// Used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: "127.0.0.1:3000".to_string(),
            schema: SchemaVariant::default(),
            static_dir: None,
            cors_origin: "http://localhost:8080".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the config file (if any) and the process environment
    pub fn load() -> Result<Self> {
        let path = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        };

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.socket_addr()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&yaml).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply `ADDRESS_BOOK_*` overrides looked up through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.database_url = url;
        }
        if let Some(bind) = lookup(BIND_ENV) {
            self.bind_address = bind;
        }
        if let Some(schema) = lookup(SCHEMA_ENV) {
            self.schema = schema
                .parse()
                .with_context(|| format!("Invalid value for {}", SCHEMA_ENV))?;
        }
        if let Some(dir) = lookup(STATIC_DIR_ENV) {
            self.static_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Invalid bind_address '{}'", self.bind_address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.database_url, "sqlite:address_book.db");
        assert_eq!(config.schema, SchemaVariant::WithChildren);
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = AppConfig::from_yaml("schema: flat\nbind_address: \"0.0.0.0:8000\"\n").unwrap();
        assert_eq!(config.schema, SchemaVariant::Flat);
        assert_eq!(config.bind_address, "0.0.0.0:8000");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_from_yaml_empty_is_default() {
        assert_eq!(AppConfig::from_yaml("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_from_yaml_rejects_unknown_schema_and_keys() {
        assert!(AppConfig::from_yaml("schema: nested\n").is_err());
        assert!(AppConfig::from_yaml("database: x\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_url: \"sqlite:/tmp/contacts.db\"").unwrap();
        writeln!(file, "static_dir: \"./static\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database_url, "sqlite:/tmp/contacts.db");
        assert_eq!(config.static_dir, Some(PathBuf::from("./static")));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::from_file(&dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (DATABASE_URL_ENV, "sqlite:other.db"),
            (SCHEMA_ENV, "flat"),
            (STATIC_DIR_ENV, "/srv/pages"),
        ]);

        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.database_url, "sqlite:other.db");
        assert_eq!(config.schema, SchemaVariant::Flat);
        assert_eq!(config.static_dir, Some(PathBuf::from("/srv/pages")));
        assert_eq!(config.bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn test_apply_overrides_invalid_schema() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| (key == SCHEMA_ENV).then(|| "tree".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_bind_address() {
        let config = AppConfig {
            bind_address: "not an address".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
