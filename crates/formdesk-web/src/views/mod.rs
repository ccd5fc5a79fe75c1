//! Server-rendered HTML pages.
//!
//! Pages are plain `format!` templates around a shared [`layout`]. Every
//! interpolated value goes through [`escape_text`].

pub mod contact;
pub mod survey;

use std::sync::LazyLock;

use formdesk_core::validate::FieldErrors;
use regex::Regex;

static CHAR_REF: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").expect("char-ref pattern")
});

/// Escape `s` for HTML text and quoted attributes without double-escaping.
///
/// An `&` that already starts a character reference is kept as-is, so values
/// the validation pipeline escaped render as the user typed them.
pub fn escape_text(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for (i, c) in s.char_indices() {
    match c {
      '&' if CHAR_REF.is_match(&s[i..]) => out.push('&'),
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      other => out.push(other),
    }
  }
  out
}

/// Wrap `body` in the site chrome.
pub fn layout(title: &str, body: &str) -> String {
  format!(
    r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <nav>
        <a href="/contato">Contato</a>
        <a href="/contato/lista">Lista de Contatos</a>
        <a href="/questionario">Questionário</a>
    </nav>
    <main>
        <h1>{title}</h1>
{body}
    </main>
</body>
</html>"#,
    title = escape_text(title),
    css = CSS,
    body = body,
  )
}

/// Plain page shown when a request fails outside validation.
pub fn error_page() -> String {
  layout(
    "Erro interno",
    "<p>Não foi possível concluir a operação. Tente novamente mais tarde.</p>",
  )
}

/// The error paragraph for `field`, or nothing when it passed.
pub(crate) fn field_error(errors: &FieldErrors, field: &str) -> String {
  match errors.get(field) {
    Some(message) => format!(r#"<p class="error">{}</p>"#, escape_text(message)),
    None => String::new(),
  }
}

pub(crate) fn checked(on: bool) -> &'static str { if on { " checked" } else { "" } }

pub(crate) fn selected(on: bool) -> &'static str { if on { " selected" } else { "" } }

/// A labelled `<input>` with its error line.
pub(crate) fn input(
  errors: &FieldErrors,
  kind: &str,
  name: &str,
  label: &str,
  value: &str,
) -> String {
  format!(
    r#"        <div class="field">
            <label for="{name}">{label}</label>
            <input type="{kind}" id="{name}" name="{name}" value="{value}">
            {error}
        </div>
"#,
    value = escape_text(value),
    error = field_error(errors, name),
  )
}

/// A labelled `<textarea>` with its error line.
pub(crate) fn textarea(errors: &FieldErrors, name: &str, label: &str, value: &str) -> String {
  format!(
    r#"        <div class="field">
            <label for="{name}">{label}</label>
            <textarea id="{name}" name="{name}" rows="4">{value}</textarea>
            {error}
        </div>
"#,
    value = escape_text(value),
    error = field_error(errors, name),
  )
}

/// A `<dt>/<dd>` pair for confirmation pages.
pub(crate) fn entry(label: &str, value: &str) -> String {
  format!(
    "            <dt>{label}</dt><dd>{}</dd>\n",
    escape_text(value)
  )
}

const CSS: &str = r#"
        body { font-family: system-ui, sans-serif; margin: 0; background: #f6f7f9; color: #1d232b; }
        nav { background: #1d232b; padding: 0.75rem 1.5rem; }
        nav a { color: #fff; margin-right: 1.25rem; text-decoration: none; }
        main { max-width: 760px; margin: 2rem auto; background: #fff; padding: 1.5rem 2rem; border-radius: 8px; }
        .field { margin-bottom: 1rem; }
        .field label { display: block; font-weight: 600; margin-bottom: 0.25rem; }
        input[type=text], input[type=email], input[type=number], select, textarea { width: 100%; padding: 0.45rem; box-sizing: border-box; }
        .choices label { font-weight: normal; display: inline; margin-right: 1rem; }
        .error { color: #b3261e; margin: 0.25rem 0 0; font-size: 0.9rem; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 0.4rem; border-bottom: 1px solid #e2e5e9; vertical-align: top; }
        td form { display: inline; }
        dt { font-weight: 600; margin-top: 0.5rem; }
        button { padding: 0.45rem 1rem; cursor: pointer; }
"#;
