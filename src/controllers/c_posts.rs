use axum::{
    extract::{Path, State},
    Json,
};
use devblog_lib::{
    models::post::{Post, PostSummary},
    services::s_posts,
};
use tracing::{debug, instrument};

use crate::{errors::DevblogWebError, state::AppState};

#[instrument(skip(state))]
pub async fn get_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostSummary>>, DevblogWebError> {
    let posts = s_posts::get_posts(state.store.as_ref()).await?;

    debug!("c: {} posts", posts.len());

    Ok(Json(posts))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, DevblogWebError> {
    let post = s_posts::get_post(state.store.as_ref(), &slug).await?;
    Ok(Json(post))
}

#[instrument(skip(state))]
pub async fn get_slugs(State(state): State<AppState>) -> Result<Json<Vec<String>>, DevblogWebError> {
    Ok(Json(s_posts::get_slugs(state.store.as_ref()).await?))
}
