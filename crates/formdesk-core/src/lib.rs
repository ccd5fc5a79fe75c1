//! Core types for formdesk: the contact and survey domain, the field
//! validation pipeline, and the [`store::ContactStore`] abstraction.
//!
//! This crate is free of HTTP and database dependencies.

// Native `async fn` in traits; `Send` bounds are spelled out on the store trait.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod sanitize;
pub mod store;
pub mod survey;
pub mod validate;

pub use error::{Error, Result};
