// src/export/logic.rs

use crate::db::store::{PaperFilter, PulpFilter, RecordStore};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{PaperExport, PulpExport};
use crate::export::{ExportEntity, ExportFormat};
use crate::ui::messages::warning;
use crate::utils::path::{expand_tilde, is_absolute};
use serde::Serialize;
use std::io;
use std::path::Path;

/// High-level export of one record table to a file.
pub struct ExportLogic;

fn write_rows<T: Serialize>(rows: &[T], format: ExportFormat, path: &Path) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
    }
}

impl ExportLogic {
    /// Export every record of `entity`, oldest first.
    ///
    /// `file` must be an absolute path. An existing file is only replaced
    /// with `force` or after confirmation.
    pub fn export<S: RecordStore>(
        store: &mut S,
        entity: ExportEntity,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        if !is_absolute(file) {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        let path_buf = expand_tilde(file);
        let path = path_buf.as_path();
        ensure_writable(path, force)?;

        let count = match entity {
            ExportEntity::Paper => {
                let rows: Vec<PaperExport> = store
                    .list_papers(&PaperFilter {
                        sort: Some("created_at".into()),
                        ..Default::default()
                    })?
                    .results
                    .iter()
                    .map(PaperExport::from)
                    .collect();
                if !rows.is_empty() {
                    write_rows(&rows, format, path)?;
                }
                rows.len()
            }
            ExportEntity::Pulp => {
                let rows: Vec<PulpExport> = store
                    .list_pulps(&PulpFilter {
                        sort: Some("created_at".into()),
                        ..Default::default()
                    })?
                    .results
                    .iter()
                    .map(PulpExport::from)
                    .collect();
                if !rows.is_empty() {
                    write_rows(&rows, format, path)?;
                }
                rows.len()
            }
            ExportEntity::Material => {
                let rows = store.list_materials()?;
                if !rows.is_empty() {
                    write_rows(&rows, format, path)?;
                }
                rows.len()
            }
        };

        if count == 0 {
            warning(format!("No {} records to export.", entity.as_str()));
            return Ok(());
        }

        store.record_action(
            "export",
            entity.as_str(),
            &format!(
                "{count} row(s) exported as {} to {}",
                format.as_str(),
                path.display()
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::pool::DbPool;
    use crate::models::material::Material;
    use std::env;
    use std::fs;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_pending_migrations(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn relative_path_is_rejected() {
        let mut pool = pool();
        let res = ExportLogic::export(
            &mut pool,
            ExportEntity::Material,
            ExportFormat::Csv,
            "materials.csv",
            true,
        );
        assert!(matches!(res, Err(AppError::Io(_))));
    }

    #[test]
    fn empty_table_writes_nothing() {
        let mut pool = pool();
        let path = env::temp_dir().join(format!("paperlab_empty_{}.json", std::process::id()));
        let _ = fs::remove_file(&path);

        ExportLogic::export(
            &mut pool,
            ExportEntity::Pulp,
            ExportFormat::Json,
            path.to_str().unwrap(),
            true,
        )
        .unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn materials_export_to_csv_with_header() {
        let mut pool = pool();
        pool.create_material(&Material::new("Starch", None)).unwrap();

        let path = env::temp_dir().join(format!("paperlab_mat_{}.csv", std::process::id()));
        ExportLogic::export(
            &mut pool,
            ExportEntity::Material,
            ExportFormat::Csv,
            path.to_str().unwrap(),
            true,
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert!(content.starts_with("id,name,description,created_at,last_updated\n"));
        assert!(content.contains(",Starch,"));
    }
}
