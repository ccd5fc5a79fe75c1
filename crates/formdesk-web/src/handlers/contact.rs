//! Handlers for the `/contato` routes.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/contato` | Empty form |
//! | `POST` | `/contato` | 400 + form on rejection, confirmation page on success |
//! | `GET`  | `/contato/lista` | Newest first |
//! | `POST` | `/contato/{id}/delete` | Always redirects to the listing |
//! | `GET`  | `/contato/{id}/edit` | Redirects to the listing if the id is bad or missing |
//! | `POST` | `/contato/{id}/edit` | 400 + form on rejection, redirect on success |

use axum::{
  Form,
  extract::{Path, State},
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use formdesk_core::{
  contact::{ContactForm, validate_contact},
  store::ContactStore,
  validate::{FormData, FormState},
};

use crate::{
  AppState,
  error::Error,
  handlers::{parse_id, to_list},
  views,
};

/// Raw urlencoded pairs; repeated keys are kept.
type Pairs = Form<Vec<(String, String)>>;

// ─── Create ───────────────────────────────────────────────────────────────────

/// `GET /contato`
pub async fn new_form() -> Html<String> {
  Html(views::contact::form_page(&FormState::default()))
}

/// `POST /contato`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Form(pairs): Pairs,
) -> Result<Response, Error>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let (details, echo) = match validate_contact(&FormData::new(pairs)) {
    Ok(accepted) => accepted,
    Err(rejected) => {
      tracing::debug!(errors = rejected.errors.len(), "contact submission rejected");
      return Ok(bad_request(&rejected));
    }
  };

  let contact = state
    .store
    .create_contact(details)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  tracing::info!(id = contact.id, "contact created");

  Ok(Html(views::contact::success_page(&echo)).into_response())
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contato/lista`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let contacts = state
    .store
    .list_contacts()
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Html(views::contact::list_page(&contacts)))
}

// ─── Edit ─────────────────────────────────────────────────────────────────────

/// `GET /contato/{id}/edit`
pub async fn edit_form<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Response, Error>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let Some(id) = parse_id(&raw_id) else {
    tracing::debug!(raw_id = %raw_id, "edit requested with a malformed id");
    return Ok(to_list().into_response());
  };

  let contact = state
    .store
    .get_contact(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  let Some(contact) = contact else {
    tracing::debug!(id, "edit requested for a missing contact");
    return Ok(to_list().into_response());
  };

  let form = FormState { data: ContactForm::from_contact(&contact), errors: Default::default() };
  Ok(Html(views::contact::form_page(&form)).into_response())
}

/// `POST /contato/{id}/edit`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
  Form(pairs): Pairs,
) -> Result<Response, Error>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let Some(id) = parse_id(&raw_id) else {
    tracing::debug!(raw_id = %raw_id, "update submitted with a malformed id");
    return Ok(to_list().into_response());
  };

  let details = match validate_contact(&FormData::new(pairs)) {
    Ok((details, _)) => details,
    Err(rejected) => {
      tracing::debug!(id, errors = rejected.errors.len(), "contact update rejected");
      let rejected = FormState { data: rejected.data.with_id(id), errors: rejected.errors };
      return Ok(bad_request(&rejected));
    }
  };

  let matched = state
    .store
    .update_contact(id, details)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  tracing::info!(id, matched, "contact updated");

  Ok(to_list().into_response())
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `POST /contato/{id}/delete`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Response, Error>
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  let Some(id) = parse_id(&raw_id) else {
    tracing::debug!(raw_id = %raw_id, "delete requested with a malformed id");
    return Ok(to_list().into_response());
  };

  let removed = state
    .store
    .delete_contact(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  tracing::info!(id, removed, "contact deleted");

  Ok(to_list().into_response())
}

fn bad_request(state: &FormState<ContactForm>) -> Response {
  (StatusCode::BAD_REQUEST, Html(views::contact::form_page(state))).into_response()
}
