use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

// === query argument models === //

#[derive(Debug, Serialize)]
pub struct SelectBySlugArgs {
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct SelectByIdArgs {
    pub id: Thing,
}

#[derive(Debug, Serialize)]
pub struct PatchPostArgs {
    pub id: Thing,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

// === query result models === //

#[derive(Debug, Deserialize)]
pub struct IdContainer {
    pub id: Thing,
}
