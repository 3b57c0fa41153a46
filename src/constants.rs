// environment keys
pub const DEVBLOG_CONFIG: &str = "DEVBLOG_CONFIG";
pub const DEVBLOG_HOST: &str = "DEVBLOG_HOST";
pub const DEVBLOG_PORT: &str = "DEVBLOG_PORT";
pub const DEVBLOG_CORS_ORIGIN: &str = "DEVBLOG_CORS_ORIGIN";
pub const DEVBLOG_STORE: &str = "DEVBLOG_STORE";
pub const DEVBLOG_SEED_FILE: &str = "DEVBLOG_SEED_FILE";

pub const DEVBLOG_DB_ADDRESS: &str = "DEVBLOG_DB_ADDRESS";
pub const DEVBLOG_DB_USER: &str = "DEVBLOG_DB_USER";
pub const DEVBLOG_DB_PSWD: &str = "DEVBLOG_DB_PSWD";
pub const DEVBLOG_DB_NAMESPACE: &str = "DEVBLOG_DB_NAMESPACE";
pub const DEVBLOG_DB_NAME: &str = "DEVBLOG_DB_NAME";
pub const DEVBLOG_DB_TIMEOUT_SECS: &str = "DEVBLOG_DB_TIMEOUT_SECS";

pub const EDIT_TOKEN: &str = "EDIT_TOKEN";
pub const DELETE_TOKEN: &str = "DELETE_TOKEN";

// defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 52001;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:9000";
pub const DEFAULT_DB_ADDRESS: &str = "ws://127.0.0.1:52000";
pub const DEFAULT_DB_NAMESPACE: &str = "devblog";
pub const DEFAULT_DB_NAME: &str = "devblog";
pub const DEFAULT_DB_TIMEOUT_SECS: u64 = 10;
