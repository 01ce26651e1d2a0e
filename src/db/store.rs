//! Record store: list/get/create/update/delete per entity.
//!
//! `RecordStore` is the seam the CRUD and report logic work against;
//! `DbPool` implements it on top of the SQLite tables.

use crate::db::pool::DbPool;
use crate::db::{log, materials, papers, pulps};
use crate::errors::{AppError, AppResult};
use crate::models::material::Material;
use crate::models::paper::PaperRecord;
use crate::models::paper_type::PaperType;
use crate::models::pulp::PulpRecord;
use crate::models::shift::Shift;
use serde::Serialize;

/// One page of results plus the number of rows matching the filter.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Listing<T> {
    pub results: Vec<T>,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PaperFilter {
    /// Case-insensitive match on roll number, responsible person or date.
    pub search: Option<String>,
    pub shift: Option<Shift>,
    pub paper_type: Option<PaperType>,
    /// Column name, `-` prefix for descending. Defaults to `-created_at`.
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct PulpFilter {
    /// Case-insensitive match on roll number.
    pub search: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

/// Validated `ORDER BY` clause built from a whitelisted sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub column: &'static str,
    pub descending: bool,
}

impl SortOrder {
    pub fn parse(key: Option<&str>, allowed: &[&'static str], default: &str) -> AppResult<Self> {
        let raw = key.map(str::trim).filter(|k| !k.is_empty()).unwrap_or(default);
        let (descending, name) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let column = allowed
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| AppError::InvalidSort(raw.to_string()))?;
        Ok(Self {
            column,
            descending,
        })
    }

    /// `ORDER BY` body; `id` breaks ties so equal keys keep insertion order.
    pub fn to_sql(&self) -> String {
        let dir = if self.descending { "DESC" } else { "ASC" };
        format!("{} {dir}, id {dir}", self.column)
    }
}

pub trait RecordStore {
    fn list_papers(&self, filter: &PaperFilter) -> AppResult<Listing<PaperRecord>>;
    fn get_paper(&self, id: i64) -> AppResult<PaperRecord>;
    fn create_paper(&mut self, paper: &PaperRecord) -> AppResult<PaperRecord>;
    fn update_paper(&mut self, paper: &PaperRecord) -> AppResult<PaperRecord>;
    fn delete_paper(&mut self, id: i64) -> AppResult<()>;
    /// Ids of other papers already using `roll`.
    fn papers_with_roll(&self, roll: &str, except: Option<i64>) -> AppResult<Vec<i64>>;

    fn list_pulps(&self, filter: &PulpFilter) -> AppResult<Listing<PulpRecord>>;
    fn get_pulp(&self, id: i64) -> AppResult<PulpRecord>;
    fn create_pulp(&mut self, pulp: &PulpRecord) -> AppResult<PulpRecord>;
    fn update_pulp(&mut self, pulp: &PulpRecord) -> AppResult<PulpRecord>;
    fn delete_pulp(&mut self, id: i64) -> AppResult<()>;

    /// Every material, ordered by name.
    fn list_materials(&self) -> AppResult<Vec<Material>>;
    fn get_material(&self, id: i64) -> AppResult<Material>;
    fn create_material(&mut self, material: &Material) -> AppResult<Material>;
    fn update_material(&mut self, material: &Material) -> AppResult<Material>;
    fn delete_material(&mut self, id: i64) -> AppResult<()>;

    /// Append a line to the audit log.
    fn record_action(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()>;
}

impl RecordStore for DbPool {
    fn list_papers(&self, filter: &PaperFilter) -> AppResult<Listing<PaperRecord>> {
        papers::list_papers(&self.conn, filter)
    }

    fn get_paper(&self, id: i64) -> AppResult<PaperRecord> {
        papers::get_paper(&self.conn, id)
    }

    fn create_paper(&mut self, paper: &PaperRecord) -> AppResult<PaperRecord> {
        let id = papers::insert_paper(&self.conn, paper)?;
        papers::get_paper(&self.conn, id)
    }

    fn update_paper(&mut self, paper: &PaperRecord) -> AppResult<PaperRecord> {
        papers::update_paper(&self.conn, paper)?;
        papers::get_paper(&self.conn, paper.id)
    }

    fn delete_paper(&mut self, id: i64) -> AppResult<()> {
        papers::delete_paper(&self.conn, id)
    }

    fn papers_with_roll(&self, roll: &str, except: Option<i64>) -> AppResult<Vec<i64>> {
        papers::ids_with_roll(&self.conn, roll, except)
    }

    fn list_pulps(&self, filter: &PulpFilter) -> AppResult<Listing<PulpRecord>> {
        pulps::list_pulps(&self.conn, filter)
    }

    fn get_pulp(&self, id: i64) -> AppResult<PulpRecord> {
        pulps::get_pulp(&self.conn, id)
    }

    fn create_pulp(&mut self, pulp: &PulpRecord) -> AppResult<PulpRecord> {
        let id = pulps::insert_pulp(&self.conn, pulp)?;
        pulps::get_pulp(&self.conn, id)
    }

    fn update_pulp(&mut self, pulp: &PulpRecord) -> AppResult<PulpRecord> {
        pulps::update_pulp(&self.conn, pulp)?;
        pulps::get_pulp(&self.conn, pulp.id)
    }

    fn delete_pulp(&mut self, id: i64) -> AppResult<()> {
        pulps::delete_pulp(&self.conn, id)
    }

    fn list_materials(&self) -> AppResult<Vec<Material>> {
        materials::list_materials(&self.conn)
    }

    fn get_material(&self, id: i64) -> AppResult<Material> {
        materials::get_material(&self.conn, id)
    }

    fn create_material(&mut self, material: &Material) -> AppResult<Material> {
        let id = materials::insert_material(&self.conn, material)?;
        materials::get_material(&self.conn, id)
    }

    fn update_material(&mut self, material: &Material) -> AppResult<Material> {
        materials::update_material(&self.conn, material)?;
        materials::get_material(&self.conn, material.id)
    }

    fn delete_material(&mut self, id: i64) -> AppResult<()> {
        materials::delete_material(&self.conn, id)
    }

    fn record_action(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        log::audit(&self.conn, operation, target, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_are_whitelisted() {
        let allowed = &["created_at", "roll_number"];
        let s = SortOrder::parse(Some("-created_at"), allowed, "created_at").unwrap();
        assert_eq!(s.to_sql(), "created_at DESC, id DESC");

        let s = SortOrder::parse(None, allowed, "roll_number").unwrap();
        assert!(!s.descending);

        assert!(matches!(
            SortOrder::parse(Some("id; DROP TABLE papers"), allowed, "created_at"),
            Err(AppError::InvalidSort(_))
        ));
    }
}
