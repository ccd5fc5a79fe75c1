//! SQL schema for the formdesk SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contatos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    nome        TEXT    NOT NULL,
    email       TEXT    NOT NULL,
    idade       INTEGER,                       -- NULL when not given
    genero      TEXT,                          -- NULL when left blank
    interesses  TEXT    NOT NULL DEFAULT '',   -- comma-joined tags
    mensagem    TEXT    NOT NULL,
    aceite      INTEGER NOT NULL CHECK (aceite IN (0, 1)),
    criado_em   TEXT    NOT NULL               -- RFC 3339 UTC, microseconds
);

CREATE INDEX IF NOT EXISTS contatos_criado_em_idx ON contatos(criado_em);

PRAGMA user_version = 1;
";
