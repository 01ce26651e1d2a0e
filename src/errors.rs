//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::fmt;
use std::io;
use thiserror::Error;

/// A single failed check produced by a form's `validate()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Material '{0}' already exists")]
    DuplicateMaterial(String),

    // ---------------------------
    // Parsing / input errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid shift: {0} (use day or night)")]
    InvalidShift(String),

    #[error("Invalid paper type: {0}")]
    InvalidPaperType(String),

    #[error("Invalid profile: {0} (use 1..5)")]
    InvalidProfile(String),

    #[error("Invalid assignment '{0}': expected field=value")]
    InvalidAssignment(String),

    #[error("Invalid material usage '{0}': expected id=amount[:brand[:note]]")]
    InvalidUsage(String),

    #[error("Invalid sort key '{0}'")]
    InvalidSort(String),

    #[error("Validation failed: {}", join_validation(.0))]
    Validation(Vec<ValidationError>),

    // ---------------------------
    // Chart configuration errors
    // ---------------------------
    #[error("Unknown {kind} field '{field}' in chart manifest")]
    UnknownField { kind: &'static str, field: String },

    #[error("Invalid chart manifest: {0}")]
    InvalidManifest(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
