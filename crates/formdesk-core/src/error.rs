//! Error types for `formdesk-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown gender tag: {0:?}")]
  UnknownGender(String),

  #[error("unknown interest tag: {0:?}")]
  UnknownInterest(String),

  /// A field that passed validation could not be converted to its typed
  /// form. Indicates a rule list out of step with the domain types.
  #[error("field {field} has an unexpected value: {value:?}")]
  InvalidField { field: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
