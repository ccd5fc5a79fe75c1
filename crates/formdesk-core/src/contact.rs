//! The contact entity, its form rules, and the echo view-model.

use std::{str::FromStr, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::{
  Error, Result,
  validate::{FieldRule, FormData, FormState, Validation, Value, validate},
};

// ─── Vocabularies ────────────────────────────────────────────────────────────

/// Self-declared gender; the empty tag means the field was left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
  #[default]
  Unspecified,
  Feminine,
  Masculine,
  NonBinary,
  PreferNotToSay,
}

impl Gender {
  pub const ALL: [Gender; 5] = [
    Gender::Unspecified,
    Gender::Feminine,
    Gender::Masculine,
    Gender::NonBinary,
    Gender::PreferNotToSay,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Gender::Unspecified    => "",
      Gender::Feminine       => "feminino",
      Gender::Masculine      => "masculino",
      Gender::NonBinary      => "nao-binario",
      Gender::PreferNotToSay => "prefiro-nao-informar",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Gender::Unspecified    => "Selecione",
      Gender::Feminine       => "Feminino",
      Gender::Masculine      => "Masculino",
      Gender::NonBinary      => "Não-binário",
      Gender::PreferNotToSay => "Prefiro não informar",
    }
  }
}

impl FromStr for Gender {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Gender::ALL
      .into_iter()
      .find(|g| g.as_str() == s)
      .ok_or_else(|| Error::UnknownGender(s.to_owned()))
  }
}

/// A topic the contact is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interest {
  Node,
  Express,
  Ejs,
  Frontend,
  Backend,
}

impl Interest {
  pub const ALL: [Interest; 5] = [
    Interest::Node,
    Interest::Express,
    Interest::Ejs,
    Interest::Frontend,
    Interest::Backend,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Interest::Node     => "node",
      Interest::Express  => "express",
      Interest::Ejs      => "ejs",
      Interest::Frontend => "frontend",
      Interest::Backend  => "backend",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Interest::Node     => "Node.js",
      Interest::Express  => "Express",
      Interest::Ejs      => "EJS",
      Interest::Frontend => "Front-end",
      Interest::Backend  => "Back-end",
    }
  }
}

impl FromStr for Interest {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Interest::ALL
      .into_iter()
      .find(|i| i.as_str() == s)
      .ok_or_else(|| Error::UnknownInterest(s.to_owned()))
  }
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// The writable part of a contact: everything a form submission sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
  /// HTML-escaped display name.
  pub name:      String,
  /// Normalized address.
  pub email:     String,
  pub age:       Option<u8>,
  pub gender:    Gender,
  pub interests: Vec<Interest>,
  /// HTML-escaped free text.
  pub message:   String,
  pub consent:   bool,
}

/// A persisted contact row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
  pub id:         i64,
  pub created_at: DateTime<Utc>,
  pub details:    ContactDetails,
}

// ─── Rules ───────────────────────────────────────────────────────────────────

pub const NAME_LENGTH_MESSAGE: &str = "Nome deve ter entre 3 e 60 caracteres.";
pub const NAME_CHARS_MESSAGE: &str = "Nome contém caracteres inválidos.";
pub const EMAIL_MESSAGE: &str = "E-mail inválido.";
pub const AGE_MESSAGE: &str = "Idade deve ser um inteiro entre 1 e 120.";
pub const GENDER_MESSAGE: &str = "Gênero inválido.";
pub const INTEREST_MESSAGE: &str = "Interesse inválido.";
pub const MESSAGE_LENGTH_MESSAGE: &str = "Mensagem deve ter entre 10 e 500 caracteres.";
pub const CONSENT_MESSAGE: &str = "Você deve aceitar os termos para continuar.";

const GENDER_TAGS: &[&str] = &["", "feminino", "masculino", "nao-binario", "prefiro-nao-informar"];
const INTEREST_TAGS: &[&str] = &["node", "express", "ejs", "frontend", "backend"];

static NAME_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ' -]+$").expect("name pattern"));

/// Rule chains for the contact form, shared by create and edit.
pub static CONTACT_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
  vec![
    FieldRule::new("nome")
      .trim()
      .length(3, Some(60), NAME_LENGTH_MESSAGE)
      .matches(&NAME_PATTERN, NAME_CHARS_MESSAGE)
      .escape(),
    FieldRule::new("email")
      .trim()
      .email(EMAIL_MESSAGE)
      .normalize_email(),
    FieldRule::new("idade")
      .trim()
      .optional()
      .int_range(1, 120, AGE_MESSAGE)
      .to_int(),
    FieldRule::new("genero").one_of(GENDER_TAGS, GENDER_MESSAGE),
    FieldRule::new("interesses")
      .optional()
      .to_list()
      .every_in(INTEREST_TAGS, INTEREST_MESSAGE),
    FieldRule::new("mensagem")
      .trim()
      .length(10, Some(500), MESSAGE_LENGTH_MESSAGE)
      .escape(),
    FieldRule::new("aceite").equals("on", CONSENT_MESSAGE),
  ]
});

// ─── Echo view-model ─────────────────────────────────────────────────────────

/// Values shown back in the contact form, as strings ready for inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
  /// Set when editing an existing row.
  pub id:        Option<i64>,
  pub name:      String,
  pub email:     String,
  pub age:       String,
  pub gender:    String,
  pub interests: Vec<String>,
  pub message:   String,
  pub consent:   bool,
}

impl ContactForm {
  fn from_validation(v: &Validation) -> Self {
    Self {
      id:        None,
      name:      v.echo("nome"),
      email:     v.echo("email"),
      age:       v.echo("idade"),
      gender:    v.echo("genero"),
      interests: v.echo_list("interesses"),
      message:   v.echo("mensagem"),
      consent:   v.echo("aceite") == "on",
    }
  }

  /// Prefill an edit form from a stored row.
  pub fn from_contact(contact: &Contact) -> Self {
    let d = &contact.details;
    Self {
      id:        Some(contact.id),
      name:      d.name.clone(),
      email:     d.email.clone(),
      age:       d.age.map(|a| a.to_string()).unwrap_or_default(),
      gender:    d.gender.as_str().to_owned(),
      interests: d.interests.iter().map(|i| i.as_str().to_owned()).collect(),
      message:   d.message.clone(),
      consent:   d.consent,
    }
  }

  pub fn has_interest(&self, interest: Interest) -> bool {
    self.interests.iter().any(|i| i == interest.as_str())
  }

  pub fn with_id(mut self, id: i64) -> Self {
    self.id = Some(id);
    self
  }
}

impl TryFrom<&Validation> for ContactDetails {
  type Error = Error;

  fn try_from(v: &Validation) -> Result<Self> {
    let age = match v.value("idade") {
      Value::Int(n) => Some(u8::try_from(*n).map_err(|_| Error::InvalidField {
        field: "idade",
        value: n.to_string(),
      })?),
      other if other.is_falsy() => None,
      other => {
        return Err(Error::InvalidField { field: "idade", value: other.to_echo() });
      }
    };

    let interests = v
      .echo_list("interesses")
      .iter()
      .map(|s| s.parse())
      .collect::<Result<Vec<Interest>>>()?;

    Ok(Self {
      name: v.echo("nome"),
      email: v.echo("email"),
      age,
      gender: v.echo("genero").parse()?,
      interests,
      message: v.echo("mensagem"),
      consent: v.echo("aceite") == "on",
    })
  }
}

/// Validate a contact submission.
///
/// On success returns the typed details to persist together with the echo
/// for the confirmation page. On failure returns the form state to render
/// again.
pub fn validate_contact(
  form: &FormData,
) -> std::result::Result<(ContactDetails, ContactForm), FormState<ContactForm>> {
  let outcome = validate(&CONTACT_RULES, form);
  let data = ContactForm::from_validation(&outcome);

  if !outcome.is_valid() {
    return Err(FormState { data, errors: outcome.errors });
  }

  match ContactDetails::try_from(&outcome) {
    Ok(details) => Ok((details, data)),
    Err(e) => {
      let mut errors = outcome.errors;
      let field = match &e {
        Error::InvalidField { field, .. } => *field,
        Error::UnknownGender(_) => "genero",
        Error::UnknownInterest(_) => "interesses",
      };
      errors.insert(field, "Valor inválido.");
      Err(FormState { data, errors })
    }
  }
}
