//! [`SqliteStore`], the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use rusqlite::OptionalExtension as _;

use formdesk_core::{
  contact::{Contact, ContactDetails},
  store::ContactStore,
};

use crate::{
  Result,
  encode::{
    CONTACT_COLUMNS, RawContact, encode_consent, encode_dt, encode_gender, encode_interests,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact table backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Owned column values for an INSERT or UPDATE, ready to move into the
/// connection thread.
struct ContactParams {
  nome:       String,
  email:      String,
  idade:      Option<i64>,
  genero:     Option<&'static str>,
  interesses: String,
  mensagem:   String,
  aceite:     i64,
}

impl ContactParams {
  fn new(d: &ContactDetails) -> Self {
    Self {
      nome:       d.name.clone(),
      email:      d.email.clone(),
      idade:      d.age.map(i64::from),
      genero:     encode_gender(d.gender),
      interesses: encode_interests(&d.interests),
      mensagem:   d.message.clone(),
      aceite:     encode_consent(d.consent),
    }
  }
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn conn_for_tests(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn create_contact(&self, details: ContactDetails) -> Result<Contact> {
    // Stored at microsecond precision; truncate so the returned row matches.
    let created_at = Utc::now().trunc_subsecs(6);
    let at_str = encode_dt(created_at);
    let p = ContactParams::new(&details);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contatos (
             nome, email, idade, genero, interesses, mensagem, aceite, criado_em
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            p.nome,
            p.email,
            p.idade,
            p.genero,
            p.interesses,
            p.mensagem,
            p.aceite,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Contact { id, created_at, details })
  }

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTACT_COLUMNS} FROM contatos ORDER BY criado_em DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn get_contact(&self, id: i64) -> Result<Option<Contact>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTACT_COLUMNS} FROM contatos WHERE id = ?1"),
              rusqlite::params![id],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn update_contact(&self, id: i64, details: ContactDetails) -> Result<bool> {
    let p = ContactParams::new(&details);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE contatos
           SET nome = ?1,
               email = ?2,
               idade = ?3,
               genero = ?4,
               interesses = ?5,
               mensagem = ?6,
               aceite = ?7
           WHERE id = ?8",
          rusqlite::params![
            p.nome,
            p.email,
            p.idade,
            p.genero,
            p.interesses,
            p.mensagem,
            p.aceite,
            id,
          ],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete_contact(&self, id: i64) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM contatos WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(changed > 0)
  }
}
