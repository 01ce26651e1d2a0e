//! `materials` table. Names are unique regardless of case.

use crate::errors::{AppError, AppResult};
use crate::models::material::Material;
use crate::utils::date::now_rfc3339;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn name_taken(conn: &Connection, name: &str, except: Option<i64>) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM materials
         WHERE name = ?1 COLLATE NOCASE AND (?2 IS NULL OR id != ?2)
         LIMIT 1",
    )?;
    Ok(stmt
        .query_row(params![name, except], |_| Ok(()))
        .optional()?
        .is_some())
}

pub fn insert_material(conn: &Connection, m: &Material) -> AppResult<i64> {
    let name = m.name.trim();
    if name_taken(conn, name, None)? {
        return Err(AppError::DuplicateMaterial(name.to_string()));
    }

    let now = now_rfc3339();
    conn.execute(
        "INSERT INTO materials (name, description, created_at, last_updated)
         VALUES (?1, ?2, ?3, ?3)",
        params![name, m.description, now],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_material(conn: &Connection, m: &Material) -> AppResult<()> {
    let name = m.name.trim();
    if name_taken(conn, name, Some(m.id))? {
        return Err(AppError::DuplicateMaterial(name.to_string()));
    }

    let changed = conn.execute(
        "UPDATE materials SET name = ?1, description = ?2, last_updated = ?3 WHERE id = ?4",
        params![name, m.description, now_rfc3339(), m.id],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound {
            entity: "material",
            id: m.id,
        });
    }
    Ok(())
}

pub fn delete_material(conn: &Connection, id: i64) -> AppResult<()> {
    if conn.execute("DELETE FROM materials WHERE id = ?1", [id])? == 0 {
        return Err(AppError::NotFound {
            entity: "material",
            id,
        });
    }
    Ok(())
}

pub fn get_material(conn: &Connection, id: i64) -> AppResult<Material> {
    conn.query_row("SELECT * FROM materials WHERE id = ?1", [id], map_row)
        .optional()?
        .ok_or(AppError::NotFound {
            entity: "material",
            id,
        })
}

pub fn list_materials(conn: &Connection) -> AppResult<Vec<Material>> {
    let mut stmt = conn.prepare("SELECT * FROM materials ORDER BY name COLLATE NOCASE, id")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_row(row: &Row) -> rusqlite::Result<Material> {
    Ok(Material {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        last_updated: row.get("last_updated")?,
    })
}
