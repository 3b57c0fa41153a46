use std::{fs, path::Path, str::FromStr, time::Duration};

use devblog_lib::{db::SurrealDBConnection, models::admin::AdminTokens};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::constants::*;
use crate::utils::get_env;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Surreal,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "surreal" => Ok(StoreKind::Surreal),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub address: String,
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub database: String,
    pub timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_DB_ADDRESS.into(),
            username: String::from("root"),
            password: String::from("root"),
            namespace: DEFAULT_DB_NAMESPACE.into(),
            database: DEFAULT_DB_NAME.into(),
            timeout_secs: DEFAULT_DB_TIMEOUT_SECS,
        }
    }
}

impl From<&DbConfig> for SurrealDBConnection {
    fn from(db: &DbConfig) -> Self {
        SurrealDBConnection {
            address: db.address.clone(),
            username: db.username.clone(),
            password: db.password.clone(),
            namespace: db.namespace.clone(),
            database: db.database.clone(),
            timeout: Duration::from_secs(db.timeout_secs),
        }
    }
}

/// Process-wide settings, read once at start.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub store: StoreKind,
    /// JSON array of posts loaded into the `memory` store at start.
    pub seed_file: Option<String>,
    pub db: DbConfig,
    pub edit_token: Option<String>,
    pub delete_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.into(),
            store: StoreKind::Surreal,
            seed_file: None,
            db: DbConfig::default(),
            edit_token: None,
            delete_token: None,
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origin", &self.cors_origin)
            .field("store", &self.store)
            .field("seed_file", &self.seed_file)
            .field("db_address", &self.db.address)
            .field("tokens", &self.admin_tokens())
            .finish()
    }
}

impl ApiConfig {
    /// Config file named by `DEVBLOG_CONFIG` (if any), then the environment on top.
    #[instrument]
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match get_env(DEVBLOG_CONFIG) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env(get_env)?;
        debug!("loaded config: {:?}", config);

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(DEVBLOG_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(DEVBLOG_PORT) {
            self.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: DEVBLOG_PORT,
                value: port,
            })?;
        }
        if let Some(origin) = lookup(DEVBLOG_CORS_ORIGIN) {
            self.cors_origin = origin;
        }
        if let Some(store) = lookup(DEVBLOG_STORE) {
            self.store = store.parse().map_err(|_| ConfigError::InvalidValue {
                key: DEVBLOG_STORE,
                value: store,
            })?;
        }
        if let Some(seed) = lookup(DEVBLOG_SEED_FILE) {
            self.seed_file = Some(seed);
        }

        if let Some(address) = lookup(DEVBLOG_DB_ADDRESS) {
            self.db.address = address;
        }
        if let Some(user) = lookup(DEVBLOG_DB_USER) {
            self.db.username = user;
        }
        if let Some(pswd) = lookup(DEVBLOG_DB_PSWD) {
            self.db.password = pswd;
        }
        if let Some(ns) = lookup(DEVBLOG_DB_NAMESPACE) {
            self.db.namespace = ns;
        }
        if let Some(name) = lookup(DEVBLOG_DB_NAME) {
            self.db.database = name;
        }
        if let Some(secs) = lookup(DEVBLOG_DB_TIMEOUT_SECS) {
            self.db.timeout_secs = secs.parse().map_err(|_| ConfigError::InvalidValue {
                key: DEVBLOG_DB_TIMEOUT_SECS,
                value: secs,
            })?;
        }

        if let Some(token) = lookup(EDIT_TOKEN) {
            self.edit_token = Some(token);
        }
        if let Some(token) = lookup(DELETE_TOKEN) {
            self.delete_token = Some(token);
        }

        Ok(())
    }

    pub fn admin_tokens(&self) -> AdminTokens {
        AdminTokens::new(self.edit_token.clone(), self.delete_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_leave_tokens_unset() {
        let config = ApiConfig::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.store, StoreKind::Surreal);
        assert!(config.admin_tokens().edit.is_none());
        assert!(config.admin_tokens().delete.is_none());
    }

    #[test]
    fn toml_file_fills_partial_config() {
        let config = ApiConfig::from_toml(
            r#"
                port = 8080
                store = "memory"
                seed_file = "posts.json"

                [db]
                address = "ws://db:8000"
                timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.seed_file.as_deref(), Some("posts.json"));
        assert_eq!(config.db.address, "ws://db:8000");
        assert_eq!(config.db.namespace, DEFAULT_DB_NAMESPACE);

        let conn = SurrealDBConnection::from(&config.db);
        assert_eq!(conn.timeout, Duration::from_secs(3));
    }

    #[test]
    fn environment_overrides_file() {
        let mut config = ApiConfig::from_toml("port = 8080\nedit_token = \"from-file\"").unwrap();

        config
            .apply_env(lookup_from(&[
                (DEVBLOG_PORT, "9090"),
                (EDIT_TOKEN, "from-env"),
                (DELETE_TOKEN, "delete-me"),
                (DEVBLOG_STORE, "Memory"),
                (DEVBLOG_SEED_FILE, "/srv/seed.json"),
            ]))
            .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.seed_file.as_deref(), Some("/srv/seed.json"));
        assert_eq!(config.admin_tokens().edit.as_deref(), Some("from-env"));
        assert_eq!(config.admin_tokens().delete.as_deref(), Some("delete-me"));
    }

    #[test]
    fn bad_numbers_are_reported_by_key() {
        let mut config = ApiConfig::default();
        let err = config
            .apply_env(lookup_from(&[(DEVBLOG_PORT, "not-a-port")]))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: DEVBLOG_PORT,
                ..
            }
        ));
    }

    #[test]
    fn debug_output_keeps_secrets_out() {
        let mut config = ApiConfig::default();
        config.edit_token = Some(String::from("hunter2"));
        config.db.password = String::from("db-secret");

        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("db-secret"));
    }
}
