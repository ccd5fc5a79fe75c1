//! Encoding and decoding helpers between domain types and the plain values
//! stored in `contatos` columns.
//!
//! Timestamps are fixed-width RFC 3339 strings so lexical order matches
//! chronological order. Interests are comma-joined tags, gender is a tag or
//! NULL, consent is 0/1.

use chrono::{DateTime, SecondsFormat, Utc};
use formdesk_core::contact::{Contact, ContactDetails, Gender, Interest};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Gender ──────────────────────────────────────────────────────────────────

pub fn encode_gender(g: Gender) -> Option<&'static str> {
  match g {
    Gender::Unspecified => None,
    other => Some(other.as_str()),
  }
}

pub fn decode_gender(s: Option<&str>) -> Result<Gender> {
  match s {
    None | Some("") => Ok(Gender::Unspecified),
    Some(tag) => Ok(tag.parse::<Gender>()?),
  }
}

// ─── Interests ───────────────────────────────────────────────────────────────

pub fn encode_interests(interests: &[Interest]) -> String {
  interests
    .iter()
    .map(|i| i.as_str())
    .collect::<Vec<_>>()
    .join(",")
}

pub fn decode_interests(s: &str) -> Result<Vec<Interest>> {
  s.split(',')
    .filter(|tag| !tag.is_empty())
    .map(|tag| Ok(tag.parse::<Interest>()?))
    .collect()
}

// ─── Consent ─────────────────────────────────────────────────────────────────

pub fn encode_consent(consent: bool) -> i64 { i64::from(consent) }

pub fn decode_consent(v: i64) -> bool { v == 1 }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawContact::from_row`].
pub const CONTACT_COLUMNS: &str =
  "id, nome, email, idade, genero, interesses, mensagem, aceite, criado_em";

/// Raw values read directly from a `contatos` row.
pub struct RawContact {
  pub id:         i64,
  pub nome:       String,
  pub email:      String,
  pub idade:      Option<i64>,
  pub genero:     Option<String>,
  pub interesses: String,
  pub mensagem:   String,
  pub aceite:     i64,
  pub criado_em:  String,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      nome:       row.get(1)?,
      email:      row.get(2)?,
      idade:      row.get(3)?,
      genero:     row.get(4)?,
      interesses: row.get(5)?,
      mensagem:   row.get(6)?,
      aceite:     row.get(7)?,
      criado_em:  row.get(8)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    let age = self
      .idade
      .map(|n| u8::try_from(n).map_err(|_| Error::OutOfRange(n)))
      .transpose()?;

    Ok(Contact {
      id:         self.id,
      created_at: decode_dt(&self.criado_em)?,
      details:    ContactDetails {
        name: self.nome,
        email: self.email,
        age,
        gender: decode_gender(self.genero.as_deref())?,
        interests: decode_interests(&self.interesses)?,
        message: self.mensagem,
        consent: decode_consent(self.aceite),
      },
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn interests_join_and_split() {
    let tags = [Interest::Node, Interest::Ejs, Interest::Backend];
    let joined = encode_interests(&tags);
    assert_eq!(joined, "node,ejs,backend");
    assert_eq!(decode_interests(&joined).unwrap(), tags);
    assert!(decode_interests("").unwrap().is_empty());
    assert!(decode_interests("node,cobol").is_err());
  }

  #[test]
  fn blank_gender_is_null() {
    assert_eq!(encode_gender(Gender::Unspecified), None);
    assert_eq!(encode_gender(Gender::Masculine), Some("masculino"));
    assert_eq!(decode_gender(None).unwrap(), Gender::Unspecified);
    assert_eq!(decode_gender(Some("")).unwrap(), Gender::Unspecified);
  }

  #[test]
  fn timestamps_are_fixed_width() {
    let a = encode_dt(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
    let b = encode_dt(DateTime::from_timestamp(1_700_000_000, 120_000_000).unwrap());
    assert_eq!(a.len(), b.len());
    assert!(a < b);
    assert_eq!(decode_dt(&b).unwrap().timestamp_subsec_micros(), 120_000);
  }
}
