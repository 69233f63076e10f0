use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::MessageResponse;
use crate::persistence::StoreError;

/// Failure of a note API request.
///
/// Every variant renders as a JSON `{ "message": ... }` body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No note carries the requested id.
    #[error("Note not found")]
    NotFound,

    /// The collection could not be loaded or saved.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body was not the JSON the route expects.
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidBody(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Note request failed");
        }
        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
