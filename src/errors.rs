use std::{
    convert::Infallible,
    fmt::{Debug, Display},
};

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, IntoResponseParts},
    Json,
};
use devblog_lib::{constants::MSG_INVALID_BODY, errors::GatewayError};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum DevblogWebErrorId {
    MethodNotAllowed,
    BadRequest,
    Unauthorized,
    Forbidden,
    ServerMisconfigured,
    NotFound,
    UpstreamFailure,
}

impl DevblogWebErrorId {
    pub fn status(&self) -> StatusCode {
        match self {
            DevblogWebErrorId::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            DevblogWebErrorId::BadRequest => StatusCode::BAD_REQUEST,
            DevblogWebErrorId::Unauthorized => StatusCode::UNAUTHORIZED,
            DevblogWebErrorId::Forbidden => StatusCode::FORBIDDEN,
            DevblogWebErrorId::ServerMisconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            DevblogWebErrorId::NotFound => StatusCode::NOT_FOUND,
            DevblogWebErrorId::UpstreamFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for DevblogWebErrorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:#?}", self))
    }
}

// lets middleware see which kind of failure a response carries
impl IntoResponseParts for DevblogWebErrorId {
    type Error = Infallible;

    fn into_response_parts(
        self,
        mut res: axum::response::ResponseParts,
    ) -> Result<axum::response::ResponseParts, Self::Error> {
        res.extensions_mut().insert(self);
        Ok(res)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
pub struct DevblogWebError {
    pub id: DevblogWebErrorId,
    pub message: String,
}

impl DevblogWebError {
    pub fn invalid_body(rejection: JsonRejection) -> Self {
        debug!("rejected request body: {}", rejection.body_text());

        Self {
            id: DevblogWebErrorId::BadRequest,
            message: MSG_INVALID_BODY.into(),
        }
    }
}

impl From<GatewayError> for DevblogWebError {
    fn from(e: GatewayError) -> Self {
        let id = match &e {
            GatewayError::MethodNotAllowed => DevblogWebErrorId::MethodNotAllowed,
            GatewayError::BadRequest(_) => DevblogWebErrorId::BadRequest,
            GatewayError::Unauthorized => DevblogWebErrorId::Unauthorized,
            GatewayError::Forbidden => DevblogWebErrorId::Forbidden,
            GatewayError::ServerMisconfigured(_) => DevblogWebErrorId::ServerMisconfigured,
            GatewayError::NotFound => DevblogWebErrorId::NotFound,
            GatewayError::UpstreamFailure { .. } => DevblogWebErrorId::UpstreamFailure,
        };

        Self {
            id,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for DevblogWebError {
    fn into_response(self) -> axum::response::Response {
        (
            self.id.status(),
            self.id,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
