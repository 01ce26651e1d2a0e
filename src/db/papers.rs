//! `papers` table. Numeric columns are named after `PaperField`, so the
//! field registry drives both the write and the read mapping.

use crate::core::usage;
use crate::db::db_utils::{
    conversion_error, like_pattern, opt_int, opt_real, opt_text, search_term, text,
};
use crate::db::store::{Listing, PaperFilter, SortOrder};
use crate::errors::{AppError, AppResult};
use crate::models::paper::{PaperField, PaperRecord};
use crate::models::paper_type::{PaperType, Profile};
use crate::models::shift::Shift;
use crate::utils::date::now_rfc3339;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

pub const SORT_KEYS: &[&str] = &[
    "created_at",
    "last_updated",
    "date",
    "roll_number",
    "responsible_person",
    "id",
];

fn stored_fields() -> impl Iterator<Item = PaperField> {
    PaperField::ALL.into_iter().filter(|f| !f.is_derived())
}

/// Column/value pairs for every column except `id` and the timestamps.
fn paper_values(p: &PaperRecord) -> Vec<(&'static str, Value)> {
    let mut values = vec![
        ("date", text(p.date.trim())),
        ("sampling_start_time", text(&p.sampling_start_time)),
        ("sampling_end_time", text(&p.sampling_end_time)),
        ("roll_number", text(p.roll_number.trim())),
        ("responsible_person", text(p.responsible_person.trim())),
        ("shift", opt_text(p.shift.map(|s| s.to_db_str()))),
        ("paper_type", opt_text(p.paper_type.map(|t| t.to_db_str()))),
        ("profile", opt_text(p.profile.map(|pr| pr.to_db_str()))),
        ("burst_test", text(&p.burst_test)),
        ("tearing_time", text(&p.tearing_time)),
        ("calender_applied", Value::Integer(i64::from(p.calender_applied))),
        (
            "material_usage",
            Value::Text(usage::encode_for_save(&p.material_usage)),
        ),
    ];

    for f in stored_fields() {
        let v = if f.is_integer() {
            opt_int(p.value(f).map(|x| x as i64))
        } else {
            opt_real(p.value(f))
        };
        values.push((f.name(), v));
    }

    values
}

pub fn insert_paper(conn: &Connection, p: &PaperRecord) -> AppResult<i64> {
    let now = now_rfc3339();
    let mut values = paper_values(p);
    values.push(("created_at", text(&now)));
    values.push(("last_updated", text(&now)));

    let columns: Vec<&str> = values.iter().map(|(c, _)| *c).collect();
    let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO papers ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    );

    conn.execute(&sql, params_from_iter(values.into_iter().map(|(_, v)| v)))?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite every stored column of `p.id`. `created_at` is left alone.
pub fn update_paper(conn: &Connection, p: &PaperRecord) -> AppResult<()> {
    let mut values = paper_values(p);
    values.push(("last_updated", text(&now_rfc3339())));

    let assignments: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, (c, _))| format!("{c} = ?{}", i + 1))
        .collect();
    let sql = format!(
        "UPDATE papers SET {} WHERE id = ?{}",
        assignments.join(", "),
        values.len() + 1
    );

    let mut params: Vec<Value> = values.into_iter().map(|(_, v)| v).collect();
    params.push(Value::Integer(p.id));

    let changed = conn.execute(&sql, params_from_iter(params))?;
    if changed == 0 {
        return Err(AppError::NotFound {
            entity: "paper",
            id: p.id,
        });
    }
    Ok(())
}

pub fn delete_paper(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM papers WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound { entity: "paper", id });
    }
    Ok(())
}

pub fn get_paper(conn: &Connection, id: i64) -> AppResult<PaperRecord> {
    conn.query_row("SELECT * FROM papers WHERE id = ?1", [id], map_row)
        .optional()?
        .ok_or(AppError::NotFound { entity: "paper", id })
}

pub fn ids_with_roll(conn: &Connection, roll: &str, except: Option<i64>) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id FROM papers
         WHERE TRIM(roll_number) = ?1 AND (?2 IS NULL OR id != ?2)
         ORDER BY id",
    )?;
    let rows = stmt.query_map(params![roll.trim(), except], |r| r.get(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_papers(conn: &Connection, filter: &PaperFilter) -> AppResult<Listing<PaperRecord>> {
    let order = SortOrder::parse(filter.sort.as_deref(), SORT_KEYS, "-created_at")?;

    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(term) = search_term(&filter.search) {
        params.push(Value::Text(like_pattern(term)));
        let n = params.len();
        clauses.push(format!(
            "(LOWER(roll_number) LIKE ?{n} OR LOWER(responsible_person) LIKE ?{n} \
             OR date LIKE ?{n})"
        ));
    }
    if let Some(shift) = filter.shift {
        params.push(text(shift.to_db_str()));
        clauses.push(format!("shift = ?{}", params.len()));
    }
    if let Some(paper_type) = filter.paper_type {
        params.push(text(paper_type.to_db_str()));
        clauses.push(format!("paper_type = ?{}", params.len()));
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM papers{where_sql}"),
        params_from_iter(params.iter()),
        |r| r.get(0),
    )?;

    let mut sql = format!("SELECT * FROM papers{where_sql} ORDER BY {}", order.to_sql());
    if let Some(limit) = filter.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), map_row)?;

    let mut results = Vec::new();
    for r in rows {
        results.push(r?);
    }

    Ok(Listing {
        results,
        count: count as usize,
    })
}

fn map_row(row: &Row) -> rusqlite::Result<PaperRecord> {
    let shift = match row.get::<_, Option<String>>("shift")? {
        Some(s) => Some(
            Shift::from_db_str(&s).ok_or_else(|| conversion_error(0, AppError::InvalidShift(s)))?,
        ),
        None => None,
    };
    let paper_type = match row.get::<_, Option<String>>("paper_type")? {
        Some(s) => Some(
            PaperType::from_db_str(&s)
                .ok_or_else(|| conversion_error(0, AppError::InvalidPaperType(s)))?,
        ),
        None => None,
    };
    let profile = match row.get::<_, Option<String>>("profile")? {
        Some(s) => Some(
            Profile::from_db_str(&s)
                .ok_or_else(|| conversion_error(0, AppError::InvalidProfile(s)))?,
        ),
        None => None,
    };

    let raw_usage: Option<String> = row.get("material_usage")?;

    let mut paper = PaperRecord {
        id: row.get("id")?,
        date: row.get("date")?,
        sampling_start_time: row.get("sampling_start_time")?,
        sampling_end_time: row.get("sampling_end_time")?,
        roll_number: row.get("roll_number")?,
        responsible_person: row.get("responsible_person")?,
        shift,
        paper_type,
        profile,
        burst_test: row.get("burst_test")?,
        tearing_time: row.get("tearing_time")?,
        calender_applied: row.get::<_, i64>("calender_applied")? != 0,
        material_usage: usage::decode(raw_usage.as_deref()),
        created_at: row.get("created_at")?,
        last_updated: row.get("last_updated")?,
        ..Default::default()
    };

    for f in stored_fields() {
        let v = if f.is_integer() {
            row.get::<_, Option<i64>>(f.name())?.map(|x| x as f64)
        } else {
            row.get::<_, Option<f64>>(f.name())?
        };
        paper.set_value(f, v).map_err(|e| conversion_error(0, e))?;
    }

    Ok(paper)
}
