//! The `ContactStore` trait.
//!
//! Implemented by storage backends (e.g. `formdesk-store-sqlite`). The web
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::contact::{Contact, ContactDetails};

/// Abstraction over a contact table.
///
/// Every method is a single statement against the backend; callers get
/// single-statement atomicity and nothing more. All methods return `Send`
/// futures so the trait can be used from axum handlers.
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a new row. The store assigns `id` and `created_at`.
  fn create_contact(
    &self,
    details: ContactDetails,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Every row, most recently created first.
  fn list_contacts(&self) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a row by id. Returns `None` if not found.
  fn get_contact(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Overwrite every writable field of row `id`. Returns `false` when no row
  /// matched; that is not an error.
  fn update_contact(
    &self,
    id: i64,
    details: ContactDetails,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete row `id` if it exists. Returns whether a row was removed.
  fn delete_contact(&self, id: i64) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
