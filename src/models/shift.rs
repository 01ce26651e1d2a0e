use serde::{Deserialize, Serialize};

/// Production period a paper sample was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Day,
    Night,
}

impl Shift {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Shift::Day => "day",
            Shift::Night => "night",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "day" => Some(Shift::Day),
            "night" => Some(Shift::Night),
            _ => None,
        }
    }

    /// Helper: accept CLI input in any case, plus the D/N shorthands
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "d" | "day" => Some(Shift::Day),
            "n" | "night" => Some(Shift::Night),
            _ => None,
        }
    }
}
