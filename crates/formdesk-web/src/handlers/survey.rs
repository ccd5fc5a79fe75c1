//! Handlers for `/questionario`. Nothing here touches the store.

use axum::{
  Form,
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use formdesk_core::{
  survey::validate_survey,
  validate::{FormData, FormState},
};

use crate::views;

/// `GET /questionario`
pub async fn new_form() -> Html<String> {
  Html(views::survey::form_page(&FormState::default()))
}

/// `POST /questionario`
pub async fn submit(Form(pairs): Form<Vec<(String, String)>>) -> Response {
  match validate_survey(&FormData::new(pairs)) {
    Ok(response) => Html(views::survey::success_page(&response)).into_response(),
    Err(rejected) => {
      tracing::debug!(errors = rejected.errors.len(), "survey submission rejected");
      (StatusCode::BAD_REQUEST, Html(views::survey::form_page(&rejected))).into_response()
    }
  }
}
