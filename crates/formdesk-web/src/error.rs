//! Error type and axum `IntoResponse` implementation.
//!
//! Validation failures never reach this type; they are rendered by the
//! handlers as a 400 form page.

use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    tracing::error!(error = %self, "request failed");
    match self {
      Error::Store(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, Html(views::error_page())).into_response()
      }
    }
  }
}
