//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"erro": "<message>"}` with a status
//! derived from the underlying [`CatalogError`].

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::catalog::CatalogError;

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request was syntactically valid but missing a required value.
    #[error("{0}")]
    BadRequest(String),

    /// Request body could not be parsed.
    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),

    /// Query string could not be parsed.
    #[error("invalid query string: {0}")]
    Query(#[from] QueryRejection),

    /// Path parameter did not name a record.
    #[error("no book at position '{0}'")]
    UnknownIndex(String),

    /// Engine failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ApiError {
    /// Creates a `BadRequest` for a missing or blank field.
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::BadRequest(format!("'{field}' is required"))
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Body(_) | Self::Query(_) => StatusCode::BAD_REQUEST,
            Self::UnknownIndex(_) => StatusCode::NOT_FOUND,
            Self::Catalog(err) => match err {
                CatalogError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                CatalogError::DuplicateRecord { .. } => StatusCode::CONFLICT,
                CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
                CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "erro": self.to_string() }))).into_response()
    }
}
