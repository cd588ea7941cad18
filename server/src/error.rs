use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::pages::errors::server_error_page;

/// Failures that end a request. Validation problems and unknown ids are not
/// errors; handlers deal with those inline by re-rendering or redirecting.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("database connection unavailable: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, server_error_page()).into_response()
    }
}
