//! Declarative per-field validation.
//!
//! A form is described as a list of [`FieldRule`]s. Each rule is an ordered
//! chain of checks and sanitizers applied to one submitted field. Running
//! [`validate`] over a [`FormData`] applies every rule, collects at most one
//! message per failing field into [`FieldErrors`], and returns the sanitized
//! values for echoing or conversion into domain types.
//!
//! ```rust,ignore
//! let rules = vec![
//!   FieldRule::new("nome").trim().length(3, Some(60), "too short or long").escape(),
//!   FieldRule::new("idade").trim().optional().int_range(1, 120, "bad age").to_int(),
//! ];
//! let outcome = validate(&rules, &form);
//! ```

use std::collections::BTreeMap;

use regex::Regex;

use crate::sanitize::{escape_html, is_email, is_int, normalize_email};

// ─── Input ───────────────────────────────────────────────────────────────────

/// Decoded `application/x-www-form-urlencoded` pairs, in submission order.
///
/// Keys may repeat; multi-select inputs submit one pair per checked option.
#[derive(Debug, Clone, Default)]
pub struct FormData {
  pairs: Vec<(String, String)>,
}

impl FormData {
  pub fn new(pairs: Vec<(String, String)>) -> Self { Self { pairs } }

  /// The submitted value for `name`: absent, a single string, or a list when
  /// the key was sent more than once.
  pub fn get(&self, name: &str) -> Value {
    let mut found: Vec<String> = self
      .pairs
      .iter()
      .filter(|(k, _)| k == name)
      .map(|(_, v)| v.clone())
      .collect();
    match found.len() {
      0 => Value::Absent,
      1 => Value::Text(found.remove(0)),
      _ => Value::List(found),
    }
  }
}

impl FromIterator<(String, String)> for FormData {
  fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}

// ─── Values ──────────────────────────────────────────────────────────────────

/// The in-flight value of a single field while its rule chain runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
  #[default]
  Absent,
  Text(String),
  List(Vec<String>),
  Int(i64),
}

impl Value {
  /// Absent, empty text, or an empty list.
  pub fn is_falsy(&self) -> bool {
    match self {
      Value::Absent => true,
      Value::Text(s) => s.is_empty(),
      Value::List(items) => items.is_empty(),
      Value::Int(_) => false,
    }
  }

  /// Render the value for echoing into a single-valued form input.
  pub fn to_echo(&self) -> String {
    match self {
      Value::Absent => String::new(),
      Value::Text(s) => s.clone(),
      Value::Int(i) => i.to_string(),
      Value::List(items) => items.first().cloned().unwrap_or_default(),
    }
  }

  /// Render the value for echoing into a multi-select input.
  pub fn to_echo_list(&self) -> Vec<String> {
    match self {
      Value::Absent => Vec::new(),
      Value::Text(s) if s.is_empty() => Vec::new(),
      Value::Text(s) => vec![s.clone()],
      Value::Int(i) => vec![i.to_string()],
      Value::List(items) => items.clone(),
    }
  }

  fn map_text(self, f: impl Fn(&str) -> String) -> Value {
    match self {
      Value::Text(s) => Value::Text(f(&s)),
      Value::List(items) => Value::List(items.iter().map(|s| f(s)).collect()),
      other => other,
    }
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Field name → human-readable message, one entry per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
  /// Record `message` for `field` unless the field already has one.
  pub fn insert(&mut self, field: &str, message: impl Into<String>) {
    self
      .0
      .entry(field.to_owned())
      .or_insert_with(|| message.into());
  }

  pub fn get(&self, field: &str) -> Option<&str> { self.0.get(field).map(String::as_str) }

  pub fn contains(&self, field: &str) -> bool { self.0.contains_key(field) }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}

/// What a form renderer needs: the echoed data plus the error map.
#[derive(Debug, Clone, Default)]
pub struct FormState<T> {
  pub data:   T,
  pub errors: FieldErrors,
}

// ─── Rules ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Check {
  Length { min: usize, max: Option<usize> },
  Matches(&'static Regex),
  Email,
  IntRange { min: i64, max: i64 },
  OneOf(&'static [&'static str]),
  Equals(&'static str),
  EveryIn(&'static [&'static str]),
}

impl Check {
  fn passes(&self, value: &Value) -> bool {
    if let Check::EveryIn(vocab) = self {
      return match value {
        Value::Absent => true,
        Value::Text(s) => vocab.contains(&s.as_str()),
        Value::List(items) => items.iter().all(|s| vocab.contains(&s.as_str())),
        Value::Int(_) => false,
      };
    }
    match value {
      Value::Absent => self.passes_str(""),
      Value::Text(s) => self.passes_str(s),
      Value::Int(i) => self.passes_str(&i.to_string()),
      Value::List(items) => items.iter().all(|s| self.passes_str(s)),
    }
  }

  fn passes_str(&self, s: &str) -> bool {
    match self {
      Check::Length { min, max } => {
        let len = s.chars().count();
        len >= *min && max.is_none_or(|max| len <= max)
      }
      Check::Matches(re) => re.is_match(s),
      Check::Email => is_email(s),
      Check::IntRange { min, max } => {
        is_int(s) && s.parse::<i64>().is_ok_and(|n| (*min..=*max).contains(&n))
      }
      Check::OneOf(vocab) | Check::EveryIn(vocab) => vocab.contains(&s),
      Check::Equals(expected) => s == *expected,
    }
  }
}

#[derive(Debug, Clone, Copy)]
enum Sanitizer {
  Trim,
  Escape,
  NormalizeEmail,
  ToInt,
  ToList,
}

impl Sanitizer {
  fn apply(self, value: Value) -> Value {
    match self {
      Sanitizer::Trim => value.map_text(|s| s.trim().to_owned()),
      Sanitizer::Escape => value.map_text(escape_html),
      Sanitizer::NormalizeEmail => value.map_text(normalize_email),
      Sanitizer::ToInt => match value {
        Value::Text(s) if is_int(&s) => match s.parse() {
          Ok(n) => Value::Int(n),
          Err(_) => Value::Text(s),
        },
        other => other,
      },
      Sanitizer::ToList => Value::List(value.to_echo_list()),
    }
  }
}

#[derive(Debug, Clone)]
enum Step {
  Check(Check, &'static str),
  Sanitize(Sanitizer),
}

/// The ordered rule chain for one form field.
#[derive(Debug, Clone)]
pub struct FieldRule {
  field:    &'static str,
  optional: bool,
  steps:    Vec<Step>,
}

impl FieldRule {
  pub fn new(field: &'static str) -> Self {
    Self { field, optional: false, steps: Vec::new() }
  }

  pub fn field(&self) -> &'static str { self.field }

  /// Skip every check while the current value is falsy (absent, empty text
  /// or empty list). Sanitizers still run.
  pub fn optional(mut self) -> Self {
    self.optional = true;
    self
  }

  fn check(mut self, check: Check, message: &'static str) -> Self {
    self.steps.push(Step::Check(check, message));
    self
  }

  fn sanitize(mut self, sanitizer: Sanitizer) -> Self {
    self.steps.push(Step::Sanitize(sanitizer));
    self
  }

  /// Character count within `min..=max`; `None` leaves it unbounded above.
  pub fn length(self, min: usize, max: Option<usize>, message: &'static str) -> Self {
    self.check(Check::Length { min, max }, message)
  }

  pub fn matches(self, pattern: &'static Regex, message: &'static str) -> Self {
    self.check(Check::Matches(pattern), message)
  }

  pub fn email(self, message: &'static str) -> Self { self.check(Check::Email, message) }

  /// Whole-string integer within `min..=max`.
  pub fn int_range(self, min: i64, max: i64, message: &'static str) -> Self {
    self.check(Check::IntRange { min, max }, message)
  }

  pub fn one_of(self, vocab: &'static [&'static str], message: &'static str) -> Self {
    self.check(Check::OneOf(vocab), message)
  }

  pub fn equals(self, expected: &'static str, message: &'static str) -> Self {
    self.check(Check::Equals(expected), message)
  }

  /// Every element of a list value must be in `vocab`; one stray element
  /// rejects the whole field.
  pub fn every_in(self, vocab: &'static [&'static str], message: &'static str) -> Self {
    self.check(Check::EveryIn(vocab), message)
  }

  pub fn trim(self) -> Self { self.sanitize(Sanitizer::Trim) }

  pub fn escape(self) -> Self { self.sanitize(Sanitizer::Escape) }

  pub fn normalize_email(self) -> Self { self.sanitize(Sanitizer::NormalizeEmail) }

  pub fn to_int(self) -> Self { self.sanitize(Sanitizer::ToInt) }

  /// Coerce a single value into a one-element list and absence into `[]`.
  pub fn to_list(self) -> Self { self.sanitize(Sanitizer::ToList) }

  /// Run the chain. Returns the sanitized value and the first failing
  /// check's message, if any.
  fn run(&self, form: &FormData) -> (Value, Option<&'static str>) {
    let mut value = form.get(self.field);
    let mut failure = None;

    for step in &self.steps {
      match step {
        Step::Sanitize(sanitizer) => value = sanitizer.apply(value),
        Step::Check(check, message) => {
          if failure.is_some() || (self.optional && value.is_falsy()) {
            continue;
          }
          if !check.passes(&value) {
            failure = Some(*message);
          }
        }
      }
    }

    (value, failure)
  }
}

// ─── Running ─────────────────────────────────────────────────────────────────

/// Sanitized values and collected errors for one submission.
#[derive(Debug, Clone, Default)]
pub struct Validation {
  values:     BTreeMap<&'static str, Value>,
  pub errors: FieldErrors,
}

static ABSENT: Value = Value::Absent;

impl Validation {
  pub fn is_valid(&self) -> bool { self.errors.is_empty() }

  pub fn value(&self, field: &str) -> &Value { self.values.get(field).unwrap_or(&ABSENT) }

  pub fn echo(&self, field: &str) -> String { self.value(field).to_echo() }

  pub fn echo_list(&self, field: &str) -> Vec<String> { self.value(field).to_echo_list() }
}

/// Apply every rule in `rules` to `form`. Failures in one field never stop
/// the others from being checked.
pub fn validate(rules: &[FieldRule], form: &FormData) -> Validation {
  let mut outcome = Validation::default();
  for rule in rules {
    let (value, failure) = rule.run(form);
    if let Some(message) = failure {
      outcome.errors.insert(rule.field, message);
    }
    outcome.values.insert(rule.field, value);
  }
  outcome
}
