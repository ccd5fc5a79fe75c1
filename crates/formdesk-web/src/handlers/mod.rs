pub mod contact;
pub mod survey;

use axum::response::Redirect;
use formdesk_core::sanitize::parse_leading_int;

pub(super) const LIST_PATH: &str = "/contato/lista";

pub(super) fn to_list() -> Redirect { Redirect::to(LIST_PATH) }

/// Parse a path identifier leniently: leading digits count and anything
/// after them is ignored.
pub(super) fn parse_id(raw: &str) -> Option<i64> { parse_leading_int(raw) }
