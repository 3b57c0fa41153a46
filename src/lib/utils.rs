use std::str::FromStr;

use surrealdb::sql::{Id, Thing};
use tracing::{debug, instrument};
use ulid::Ulid;

use crate::constants::BLOG_TABLE;
use crate::errors::StoreError;

/// Creates the record id of a post from its bare id.
///
/// Accepts either the bare ULID or the full `blog:<ULID>` form. Anything
/// else is rejected, as is a `table:` prefix other than the blog table.
#[instrument]
pub fn post_thing(post_id: &str) -> Result<Thing, StoreError> {
    debug!("converting {} into thing", post_id);

    let key = match post_id.split_once(':') {
        Some((table, key)) if table == BLOG_TABLE => key,
        Some(_) => return Err(StoreError::InvalidId(post_id.to_string())),
        None => post_id,
    };

    let ulid = Ulid::from_str(key).map_err(|_| StoreError::InvalidId(post_id.to_string()))?;

    Ok(Thing::from((String::from(BLOG_TABLE), ulid.to_string())))
}

/// The bare id callers see for a record id.
pub fn post_id_from_thing(thing: &Thing) -> String {
    match &thing.id {
        Id::String(s) => s.clone(),
        other => other.to_raw(),
    }
}
