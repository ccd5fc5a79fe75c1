//! Error type for `formdesk-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] formdesk_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored `idade` outside the range an age can take.
  #[error("stored age out of range: {0}")]
  OutOfRange(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
