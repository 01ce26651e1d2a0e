//! In-memory shape of a paper record's material usage.
//!
//! The string form only exists at the storage boundary, see `core::usage`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Amount, brand and free-text note recorded for one material on one roll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageEntry {
    pub amount: Option<f64>,
    pub brand: String,
    pub note: String,
}

impl UsageEntry {
    pub fn new(amount: Option<f64>, brand: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            amount,
            brand: brand.into(),
            note: note.into(),
        }
    }

    pub fn with_amount(amount: f64) -> Self {
        Self::new(Some(amount), "", "")
    }
}

/// material id → usage entry. Ids are kept even when no catalog entry exists.
pub type MaterialUsage = BTreeMap<String, UsageEntry>;
