//! `pulps` table. Like papers, the numeric columns follow `PulpField` names.

use crate::db::db_utils::{
    conversion_error, like_pattern, opt_real, opt_text, search_term, text,
};
use crate::db::store::{Listing, PulpFilter, SortOrder};
use crate::errors::{AppError, AppResult};
use crate::models::pulp::{PulpField, PulpRecord};
use crate::utils::date::now_rfc3339;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params_from_iter};

pub const SORT_KEYS: &[&str] = &["created_at", "last_updated", "roll_number", "id"];

fn stored_fields() -> impl Iterator<Item = PulpField> {
    PulpField::ALL.into_iter().filter(|f| !f.is_derived())
}

fn pulp_values(p: &PulpRecord) -> Vec<(&'static str, Value)> {
    let mut values = vec![
        ("roll_number", opt_text(p.roll())),
        ("lower_sampling_time", text(&p.lower_sampling_time)),
    ];
    for f in stored_fields() {
        values.push((f.name(), opt_real(p.value(f))));
    }
    values
}

pub fn insert_pulp(conn: &Connection, p: &PulpRecord) -> AppResult<i64> {
    let now = now_rfc3339();
    let mut values = pulp_values(p);
    values.push(("created_at", text(&now)));
    values.push(("last_updated", text(&now)));

    let columns: Vec<&str> = values.iter().map(|(c, _)| *c).collect();
    let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO pulps ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    );

    conn.execute(&sql, params_from_iter(values.into_iter().map(|(_, v)| v)))?;
    Ok(conn.last_insert_rowid())
}

pub fn update_pulp(conn: &Connection, p: &PulpRecord) -> AppResult<()> {
    let mut values = pulp_values(p);
    values.push(("last_updated", text(&now_rfc3339())));

    let assignments: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, (c, _))| format!("{c} = ?{}", i + 1))
        .collect();
    let sql = format!(
        "UPDATE pulps SET {} WHERE id = ?{}",
        assignments.join(", "),
        values.len() + 1
    );

    let mut params: Vec<Value> = values.into_iter().map(|(_, v)| v).collect();
    params.push(Value::Integer(p.id));

    if conn.execute(&sql, params_from_iter(params))? == 0 {
        return Err(AppError::NotFound {
            entity: "pulp",
            id: p.id,
        });
    }
    Ok(())
}

pub fn delete_pulp(conn: &Connection, id: i64) -> AppResult<()> {
    if conn.execute("DELETE FROM pulps WHERE id = ?1", [id])? == 0 {
        return Err(AppError::NotFound { entity: "pulp", id });
    }
    Ok(())
}

pub fn get_pulp(conn: &Connection, id: i64) -> AppResult<PulpRecord> {
    conn.query_row("SELECT * FROM pulps WHERE id = ?1", [id], map_row)
        .optional()?
        .ok_or(AppError::NotFound { entity: "pulp", id })
}

pub fn list_pulps(conn: &Connection, filter: &PulpFilter) -> AppResult<Listing<PulpRecord>> {
    let order = SortOrder::parse(filter.sort.as_deref(), SORT_KEYS, "-created_at")?;

    let mut params: Vec<Value> = Vec::new();
    let mut where_sql = String::new();
    if let Some(term) = search_term(&filter.search) {
        params.push(Value::Text(like_pattern(term)));
        where_sql = " WHERE LOWER(roll_number) LIKE ?1".to_string();
    }

    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM pulps{where_sql}"),
        params_from_iter(params.iter()),
        |r| r.get(0),
    )?;

    let mut sql = format!("SELECT * FROM pulps{where_sql} ORDER BY {}", order.to_sql());
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

fn map_row(row: &Row) -> rusqlite::Result<PulpRecord> {
    let mut pulp = PulpRecord {
        id: row.get("id")?,
        roll_number: row.get("roll_number")?,
        lower_sampling_time: row.get("lower_sampling_time")?,
        created_at: row.get("created_at")?,
        last_updated: row.get("last_updated")?,
        ..Default::default()
    };

    for f in stored_fields() {
        let v: Option<f64> = row.get(f.name())?;
        pulp.set_value(f, v).map_err(|e| conversion_error(0, e))?;
    }

    Ok(pulp)
}
