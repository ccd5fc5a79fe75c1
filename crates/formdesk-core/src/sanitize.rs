//! String sanitizers and syntax checks used by the validation pipeline.
//!
//! These are plain functions over `&str`; [`crate::validate`] wires them into
//! per-field rule chains.

use std::sync::LazyLock;

use regex::Regex;

// ─── HTML escaping ───────────────────────────────────────────────────────────

/// Replace the characters that are unsafe inside HTML text or attributes with
/// their entity equivalents.
pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&'  => out.push_str("&amp;"),
      '"'  => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      '<'  => out.push_str("&lt;"),
      '>'  => out.push_str("&gt;"),
      '/'  => out.push_str("&#x2F;"),
      '\\' => out.push_str("&#x5C;"),
      '`'  => out.push_str("&#96;"),
      other => out.push(other),
    }
  }
  out
}

// ─── Email ───────────────────────────────────────────────────────────────────

static LOCAL_PART: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
    .expect("local-part pattern")
});

static DOMAIN_LABEL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?i)^[a-z0-9\x{a1}-\x{ffff}](?:[a-z0-9\x{a1}-\x{ffff}-]*[a-z0-9\x{a1}-\x{ffff}])?$",
  )
  .expect("domain-label pattern")
});

static TLD: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)^(?:[a-z\x{a1}-\x{ffff}]{2,}|xn--[a-z0-9-]{2,})$").expect("tld pattern")
});

/// Syntax check for an email address: `local@domain.tld`.
pub fn is_email(s: &str) -> bool {
  if s.len() > 254 || s.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = s.rsplit_once('@') else {
    return false;
  };
  if local.is_empty() || local.len() > 64 || !LOCAL_PART.is_match(local) {
    return false;
  }

  let labels: Vec<&str> = domain.split('.').collect();
  if labels.len() < 2 {
    return false;
  }
  let Some((tld, rest)) = labels.split_last() else {
    return false;
  };
  TLD.is_match(tld)
    && rest
      .iter()
      .all(|label| label.len() <= 63 && DOMAIN_LABEL.is_match(label))
}

const GMAIL_DOMAINS: &[&str] = &["gmail.com", "googlemail.com"];

const OUTLOOK_DOMAINS: &[&str] = &[
  "hotmail.com",
  "hotmail.co.uk",
  "hotmail.com.br",
  "live.com",
  "live.co.uk",
  "msn.com",
  "outlook.com",
  "outlook.com.br",
  "passport.com",
];

const YAHOO_DOMAINS: &[&str] = &[
  "rocketmail.com",
  "yahoo.co.uk",
  "yahoo.com",
  "yahoo.com.br",
  "ymail.com",
];

const ICLOUD_DOMAINS: &[&str] = &["icloud.com", "mac.com", "me.com"];

/// Canonicalise an email address.
///
/// Domains are lowercased, and so is the local part. Provider-specific
/// sub-addressing is dropped (`+tag` for Gmail, Outlook and iCloud, `-tag` for
/// Yahoo) and Gmail dots are removed, with `googlemail.com` folded into
/// `gmail.com`. Input that fails [`is_email`] is returned unchanged.
pub fn normalize_email(s: &str) -> String {
  if !is_email(s) {
    return s.to_owned();
  }
  let Some((local, domain)) = s.rsplit_once('@') else {
    return s.to_owned();
  };

  let mut domain = domain.to_lowercase();
  let mut local = local.to_lowercase();

  if GMAIL_DOMAINS.contains(&domain.as_str()) {
    local = strip_tag(&local, '+').replace('.', "");
    domain = "gmail.com".to_owned();
  } else if OUTLOOK_DOMAINS.contains(&domain.as_str())
    || ICLOUD_DOMAINS.contains(&domain.as_str())
  {
    local = strip_tag(&local, '+').to_owned();
  } else if YAHOO_DOMAINS.contains(&domain.as_str()) {
    local = match local.rsplit_once('-') {
      Some((head, _)) => head.to_owned(),
      None => local,
    };
  }

  if local.is_empty() {
    return s.to_owned();
  }
  format!("{local}@{domain}")
}

fn strip_tag(local: &str, sep: char) -> &str {
  local.split(sep).next().unwrap_or(local)
}

// ─── Integers ────────────────────────────────────────────────────────────────

static INT: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("int pattern"));

/// Whole-string integer check: an optional sign followed by digits.
pub fn is_int(s: &str) -> bool { INT.is_match(s) }

/// Parse the leading integer of `s`, ignoring anything after the digits.
///
/// Leading whitespace and a single sign are accepted, so `" 42abc"` yields
/// `Some(42)` while `"abc"` yields `None`.
pub fn parse_leading_int(s: &str) -> Option<i64> {
  let s = s.trim_start();
  let (negative, rest) = match s.as_bytes().first() {
    Some(b'-') => (true, &s[1..]),
    Some(b'+') => (false, &s[1..]),
    _ => (false, s),
  };
  let end = rest
    .bytes()
    .position(|b| !b.is_ascii_digit())
    .unwrap_or(rest.len());
  if end == 0 {
    return None;
  }
  let magnitude: i64 = rest[..end].parse().ok()?;
  Some(if negative { -magnitude } else { magnitude })
}
