//! HTTP layer for formdesk.
//!
//! Exposes an axum [`Router`] serving the contact form, the contact listing
//! with edit and delete, and the football questionnaire, backed by any
//! [`ContactStore`].

pub mod error;
pub mod handlers;
pub mod views;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  response::Redirect,
  routing::{get, post},
};
use formdesk_core::store::ContactStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{contact, survey};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `FORMDESK_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: ContactStore> {
  pub store: Arc<S>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application [`Router`].
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ContactStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/",                    get(|| async { Redirect::to("/contato") }))
    .route("/contato",             get(contact::new_form).post(contact::create::<S>))
    .route("/contato/lista",       get(contact::list::<S>))
    .route("/contato/{id}/edit",   get(contact::edit_form::<S>).post(contact::update::<S>))
    .route("/contato/{id}/delete", post(contact::delete::<S>))
    .route("/questionario",        get(survey::new_form).post(survey::submit))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use formdesk_core::contact::{ContactDetails, Gender, Interest};
  use formdesk_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState { store: Arc::new(store) }
  }

  async fn get_req(state: AppState<SqliteStore>, uri: &str) -> Response {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn post_form(state: AppState<SqliteStore>, uri: &str, body: &str) -> Response {
    let req = Request::builder()
      .method("POST")
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(Body::from(body.to_string()))
      .unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn location(resp: &Response) -> &str {
    resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
  }

  fn details(name: &str) -> ContactDetails {
    ContactDetails {
      name:      name.to_string(),
      email:     "ana@x.com".to_string(),
      age:       Some(30),
      gender:    Gender::Feminine,
      interests: vec![Interest::Node],
      message:   "Mensagem de teste".to_string(),
      consent:   true,
    }
  }

  const VALID: &str = "nome=Ana+Silva&email=ana%40x.com&idade=&genero=\
                       &mensagem=Ol%C3%A1%2C+mundo%21%21&aceite=on";

  // ── Root ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_redirects_to_contact_form() {
    let resp = get_req(make_state().await, "/").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/contato");
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn contact_form_renders_empty() {
    let resp = get_req(make_state().await, "/contato").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Formulário de Contato"));
    assert!(!html.contains(r#"class="error""#));
  }

  #[tokio::test]
  async fn valid_submission_is_stored() {
    let state = make_state().await;
    let resp = post_form(state.clone(), "/contato", VALID).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Enviado com sucesso"));
    assert!(html.contains("Ana Silva"));

    let rows = state.store.list_contacts().await.unwrap();
    assert_eq!(rows.len(), 1);
    let d = &rows[0].details;
    assert_eq!(d.name, "Ana Silva");
    assert_eq!(d.email, "ana@x.com");
    assert_eq!(d.age, None);
    assert_eq!(d.gender, Gender::Unspecified);
    assert!(d.interests.is_empty());
    assert!(d.consent);
  }

  #[tokio::test]
  async fn short_name_is_rejected_without_insert() {
    let state = make_state().await;
    let body = VALID.replace("Ana+Silva", "Al");
    let resp = post_form(state.clone(), "/contato", &body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = body_text(resp).await;
    assert!(html.contains("Nome deve ter entre 3 e 60 caracteres."));
    assert!(html.contains(r#"value="Al""#));
    assert!(state.store.list_contacts().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn missing_consent_is_rejected() {
    let state = make_state().await;
    let body = VALID.replace("&aceite=on", "");
    let resp = post_form(state.clone(), "/contato", &body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = body_text(resp).await;
    assert!(html.contains("Você deve aceitar os termos para continuar."));
    assert!(state.store.list_contacts().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn repeated_interests_are_all_kept() {
    let state = make_state().await;
    let body = format!("{VALID}&interesses=node&interesses=backend");
    let resp = post_form(state.clone(), "/contato", &body).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rows = state.store.list_contacts().await.unwrap();
    assert_eq!(rows[0].details.interests, vec![Interest::Node, Interest::Backend]);
  }

  #[tokio::test]
  async fn unknown_interest_is_rejected() {
    let state = make_state().await;
    let body = format!("{VALID}&interesses=node&interesses=cobol");
    let resp = post_form(state.clone(), "/contato", &body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("Interesse inválido."));
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn listing_shows_rows_newest_first() {
    let state = make_state().await;
    state.store.create_contact(details("Primeira Pessoa")).await.unwrap();
    state.store.create_contact(details("Segunda Pessoa")).await.unwrap();

    let resp = get_req(state, "/contato/lista").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    let first = html.find("Primeira Pessoa").unwrap();
    let second = html.find("Segunda Pessoa").unwrap();
    assert!(second < first, "newest row should come first");
  }

  #[tokio::test]
  async fn empty_listing_has_placeholder() {
    let html = body_text(get_req(make_state().await, "/contato/lista").await).await;
    assert!(html.contains("Nenhum contato cadastrado"));
  }

  // ── Edit ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn edit_form_is_prefilled() {
    let state = make_state().await;
    let mut d = details("Ana Silva");
    d.interests = vec![Interest::Node, Interest::Frontend];
    let contact = state.store.create_contact(d).await.unwrap();

    let resp = get_req(state, &format!("/contato/{}/edit", contact.id)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains(&format!(r#"action="/contato/{}/edit""#, contact.id)));
    assert!(html.contains(r#"value="Ana Silva""#));
    assert!(html.contains(r#"value="30""#));
    assert!(html.contains(r#"<option value="feminino" selected>"#));
    assert!(html.contains(r#"value="node" checked"#));
    assert!(html.contains(r#"value="frontend" checked"#));
    assert!(!html.contains(r#"value="express" checked"#));
    assert!(html.contains(r#"name="aceite" value="on" checked"#));
  }

  #[tokio::test]
  async fn edit_of_missing_row_redirects() {
    let resp = get_req(make_state().await, "/contato/999/edit").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/contato/lista");
  }

  #[tokio::test]
  async fn edit_with_malformed_id_redirects() {
    let resp = get_req(make_state().await, "/contato/abc/edit").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/contato/lista");
  }

  #[tokio::test]
  async fn update_overwrites_and_redirects() {
    let state = make_state().await;
    let contact = state.store.create_contact(details("Ana Silva")).await.unwrap();

    let body = VALID.replace("Ana+Silva", "Ana+Souza");
    let resp = post_form(state.clone(), &format!("/contato/{}/edit", contact.id), &body).await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/contato/lista");

    let stored = state.store.get_contact(contact.id).await.unwrap().unwrap();
    assert_eq!(stored.details.name, "Ana Souza");
    assert_eq!(stored.details.age, None);
    assert!(stored.details.interests.is_empty());
    assert_eq!(stored.created_at, contact.created_at);
  }

  #[tokio::test]
  async fn rejected_update_keeps_edit_action() {
    let state = make_state().await;
    let contact = state.store.create_contact(details("Ana Silva")).await.unwrap();

    let body = VALID.replace("ana%40x.com", "nao-e-email");
    let uri = format!("/contato/{}/edit", contact.id);
    let resp = post_form(state.clone(), &uri, &body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = body_text(resp).await;
    assert!(html.contains("E-mail inválido."));
    assert!(html.contains(&format!(r#"action="{uri}""#)));

    let stored = state.store.get_contact(contact.id).await.unwrap().unwrap();
    assert_eq!(stored.details.email, "ana@x.com");
  }

  #[tokio::test]
  async fn update_with_malformed_id_changes_nothing() {
    let state = make_state().await;
    let contact = state.store.create_contact(details("Ana Silva")).await.unwrap();

    let resp = post_form(state.clone(), "/contato/abc/edit", VALID).await;
    assert!(resp.status().is_redirection());

    let stored = state.store.get_contact(contact.id).await.unwrap().unwrap();
    assert_eq!(stored.details, contact.details);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_removes_exactly_one_row() {
    let state = make_state().await;
    let keep = state.store.create_contact(details("Fica Aqui")).await.unwrap();
    let gone = state.store.create_contact(details("Vai Embora")).await.unwrap();

    let resp = post_form(state.clone(), &format!("/contato/{}/delete", gone.id), "").await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/contato/lista");

    let rows = state.store.list_contacts().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, keep.id);
  }

  #[tokio::test]
  async fn delete_of_missing_or_malformed_id_redirects() {
    let state = make_state().await;
    state.store.create_contact(details("Ana Silva")).await.unwrap();

    for uri in ["/contato/999/delete", "/contato/abc/delete"] {
      let resp = post_form(state.clone(), uri, "").await;
      assert!(resp.status().is_redirection(), "{uri}");
      assert_eq!(location(&resp), "/contato/lista");
    }
    assert_eq!(state.store.list_contacts().await.unwrap().len(), 1);
  }

  // ── Questionnaire ───────────────────────────────────────────────────────────

  const SURVEY: &str = "nome=Marta&time_favorito=Santos&jogava=sim&posicao=atacante\
                        &camisa_numero=10&estadio_visitado=Vila+Belmiro\
                        &melhor_jogador=Pel%C3%A9&comp_torce=copa-do-mundo\
                        &tecnicos_gostados=tite&tecnicos_gostados=guardiola\
                        &comentario=Futebol+%C3%A9+arte";

  #[tokio::test]
  async fn survey_form_renders() {
    let resp = get_req(make_state().await, "/questionario").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Questionário sobre Futebol"));
  }

  #[tokio::test]
  async fn valid_survey_shows_summary() {
    let resp = post_form(make_state().await, "/questionario", SURVEY).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Questionário enviado!"));
    assert!(html.contains("Tite, Pep Guardiola"));
  }

  #[tokio::test]
  async fn invalid_survey_is_rejected() {
    let body = SURVEY.replace("camisa_numero=10", "camisa_numero=100");
    let resp = post_form(make_state().await, "/questionario", &body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = body_text(resp).await;
    assert!(html.contains("Número da camisa deve estar entre 1 e 99."));
    assert!(html.contains(r#"value="100""#));
  }
}
