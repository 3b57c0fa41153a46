use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use devblog_lib::{
    errors::GatewayError,
    models::post::{DeletePostArgs, DeletePostResponse, UpdatePostArgs, UpdatePostResponse},
    services::s_posts,
};
use tracing::instrument;

use crate::{errors::DevblogWebError, state::AppState};

#[instrument(skip_all)]
pub async fn update_blog(
    State(state): State<AppState>,
    args: Result<Json<UpdatePostArgs>, JsonRejection>,
) -> Result<Json<UpdatePostResponse>, DevblogWebError> {
    let Json(args) = args.map_err(DevblogWebError::invalid_body)?;

    let res = s_posts::update_post(state.store.as_ref(), &state.tokens, args).await?;
    Ok(Json(res))
}

#[instrument(skip_all)]
pub async fn delete_blog(
    State(state): State<AppState>,
    args: Result<Json<DeletePostArgs>, JsonRejection>,
) -> Result<Json<DeletePostResponse>, DevblogWebError> {
    let Json(args) = args.map_err(DevblogWebError::invalid_body)?;

    let res = s_posts::delete_post(state.store.as_ref(), &state.tokens, args).await?;
    Ok(Json(res))
}

/// Answers any verb the mutation routes do not accept.
pub async fn method_not_allowed() -> DevblogWebError {
    GatewayError::MethodNotAllowed.into()
}
