use tracing::{error, info, instrument, warn};

use crate::constants::{
    MSG_DELETED, MSG_DELETE_FAILED, MSG_FETCH_FAILED, MSG_FIELD_REQUIRED, MSG_SLUG_REQUIRED,
    MSG_UPDATED, MSG_UPDATE_FAILED,
};
use crate::errors::GatewayError;
use crate::models::admin::AdminTokens;
use crate::models::post::{
    non_empty, DeletePostArgs, DeletePostResponse, Post, PostSummary, UpdatePostArgs,
    UpdatePostResponse,
};
use crate::repos::r_posts::PostsStore;

/// Resolves a slug to the id of the one post carrying it.
#[instrument(skip(store))]
pub async fn resolve_slug(
    store: &dyn PostsStore,
    slug: &str,
    failure: &'static str,
) -> Result<String, GatewayError> {
    match store.select_post_id_by_slug(slug).await {
        Ok(Some(id)) => Ok(id),
        Ok(None) => Err(GatewayError::NotFound),
        Err(e) => {
            error!(error = %e, "slug resolution failed");
            Err(GatewayError::from_store(e, failure))
        }
    }
}

/// Runs the shared admin checks and hands back the slug to act on.
///
/// Order matters: slug, then token presence, then the server secret, then the
/// token value. The store is never touched here.
fn authorize(
    slug: &Option<String>,
    admin_token: &Option<String>,
    secret: &Option<String>,
    secret_name: &'static str,
) -> Result<String, GatewayError> {
    let slug = non_empty(slug).ok_or(GatewayError::BadRequest(MSG_SLUG_REQUIRED))?;
    let admin_token = non_empty(admin_token).ok_or(GatewayError::Unauthorized)?;

    let Some(secret) = secret else {
        error!("{} not configured", secret_name);
        return Err(GatewayError::ServerMisconfigured(secret_name));
    };

    // plain equality, no constant-time comparison
    if admin_token != *secret {
        warn!("rejected admin token");
        return Err(GatewayError::Forbidden);
    }

    Ok(slug)
}

#[instrument(skip(store, tokens, args), fields(slug = ?args.slug))]
pub async fn update_post(
    store: &dyn PostsStore,
    tokens: &AdminTokens,
    args: UpdatePostArgs,
) -> Result<UpdatePostResponse, GatewayError> {
    let slug = authorize(&args.slug, &args.admin_token, &tokens.edit, "EDIT_TOKEN")?;

    let patch = args.patch();
    if patch.is_empty() {
        return Err(GatewayError::BadRequest(MSG_FIELD_REQUIRED));
    }

    let post_id = resolve_slug(store, &slug, MSG_UPDATE_FAILED).await?;

    let post = store.patch_post(&post_id, patch).await.map_err(|e| {
        error!(error = %e, post_id = %post_id, "updating blog post failed");
        GatewayError::from_store(e, MSG_UPDATE_FAILED)
    })?;

    info!(post_id = %post_id, "blog post updated");

    Ok(UpdatePostResponse {
        message: MSG_UPDATED.to_string(),
        post,
    })
}

#[instrument(skip(store, tokens, args), fields(slug = ?args.slug))]
pub async fn delete_post(
    store: &dyn PostsStore,
    tokens: &AdminTokens,
    args: DeletePostArgs,
) -> Result<DeletePostResponse, GatewayError> {
    let slug = authorize(&args.slug, &args.admin_token, &tokens.delete, "DELETE_TOKEN")?;

    let post_id = resolve_slug(store, &slug, MSG_DELETE_FAILED).await?;

    store.delete_post(&post_id).await.map_err(|e| {
        error!(error = %e, post_id = %post_id, "deleting blog post failed");
        GatewayError::from_store(e, MSG_DELETE_FAILED)
    })?;

    info!(post_id = %post_id, "blog post deleted");

    Ok(DeletePostResponse {
        message: MSG_DELETED.to_string(),
        deleted_id: post_id,
    })
}

/// Gets the listing of every post, newest first.
pub async fn get_posts(store: &dyn PostsStore) -> Result<Vec<PostSummary>, GatewayError> {
    store.select_posts().await.map_err(|e| {
        error!(error = %e, "listing blog posts failed");
        GatewayError::from_store(e, MSG_FETCH_FAILED)
    })
}

pub async fn get_post(store: &dyn PostsStore, slug: &str) -> Result<Post, GatewayError> {
    match store.select_post_by_slug(slug).await {
        Ok(Some(post)) => Ok(post),
        Ok(None) => Err(GatewayError::NotFound),
        Err(e) => {
            error!(error = %e, slug = %slug, "fetching blog post failed");
            Err(GatewayError::from_store(e, MSG_FETCH_FAILED))
        }
    }
}

pub async fn get_slugs(store: &dyn PostsStore) -> Result<Vec<String>, GatewayError> {
    store.select_slugs().await.map_err(|e| {
        error!(error = %e, "listing blog slugs failed");
        GatewayError::from_store(e, MSG_FETCH_FAILED)
    })
}
