pub mod content_db;

use std::time::Duration;

/// Where and how to reach the content store.
#[derive(Debug, Clone)]
pub struct SurrealDBConnection {
    pub address: String,
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub database: String,
    pub timeout: Duration,
}
