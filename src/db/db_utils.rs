//! Small helpers shared by the table modules.

use crate::errors::AppError;
use rusqlite::types::{Type, Value};

pub fn opt_real(v: Option<f64>) -> Value {
    v.map_or(Value::Null, Value::Real)
}

pub fn opt_int(v: Option<i64>) -> Value {
    v.map_or(Value::Null, Value::Integer)
}

pub fn opt_text<S: AsRef<str>>(v: Option<S>) -> Value {
    v.map_or(Value::Null, |s| Value::Text(s.as_ref().to_string()))
}

pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

/// `%term%`, lowercased, for `LOWER(col) LIKE ?`.
pub fn like_pattern(term: &str) -> String {
    format!("%{}%", term.trim().to_lowercase())
}

/// Wrap an unreadable column value the way rusqlite reports conversion errors.
pub fn conversion_error(column: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

/// `Some(t)` unless the search term is blank.
pub fn search_term(search: &Option<String>) -> Option<&str> {
    search.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
