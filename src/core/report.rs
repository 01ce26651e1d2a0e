//! Chart reports: pick a manifest, load the records in the requested time
//! window, build the aligned series and render them.

use crate::core::chart::{Manifest, build_chart_series};
use crate::db::store::{PaperFilter, PulpFilter, RecordStore};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::models::chart::ChartData;
use crate::models::material::MaterialCatalog;
use crate::models::paper::PaperRecord;
use crate::models::pulp::PulpRecord;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::{parse_timestamp, window_start};
use crate::utils::formatting::format_opt;
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;
use chrono::{DateTime, Local};
use clap::ValueEnum;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Json,
    Csv,
}

/// Trailing window over `created_at`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportWindow {
    Daily,
    Weekly,
    Monthly,
}

impl ReportWindow {
    pub fn days(&self) -> i64 {
        match self {
            ReportWindow::Daily => 1,
            ReportWindow::Weekly => 7,
            ReportWindow::Monthly => 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// `summary`, `technical`, `materials` or a path to a YAML manifest
    pub manifest: String,
    pub group: Option<String>,
    pub format: ReportFormat,
    pub window: Option<ReportWindow>,
    pub file: Option<String>,
    pub force: bool,
}

pub struct ReportLogic;

/// Resolve a built-in manifest name or a YAML file path.
pub fn resolve_manifest(name: &str, papers: &[PaperRecord]) -> AppResult<Manifest> {
    match name.trim().to_lowercase().as_str() {
        "summary" => Ok(Manifest::summary()),
        "technical" => Ok(Manifest::technical()),
        "materials" => Ok(Manifest::materials(papers)),
        _ => {
            let path = expand_tilde(name.trim());
            if !path.exists() {
                return Err(AppError::InvalidManifest(format!(
                    "'{}' is neither a built-in manifest (summary, technical, materials) \
                     nor a file",
                    name
                )));
            }
            Manifest::from_file(&path)
        }
    }
}

fn in_window(created_at: &str, since: Option<DateTime<Local>>) -> bool {
    match since {
        None => true,
        Some(since) => parse_timestamp(created_at).is_some_and(|t| t >= since),
    }
}

/// Load every paper and pulp record, oldest first so that the most recent
/// record wins when a roll number repeats.
pub fn load_records<S: RecordStore>(
    store: &S,
    window: Option<ReportWindow>,
    now: DateTime<Local>,
) -> AppResult<(Vec<PaperRecord>, Vec<PulpRecord>)> {
    let since = window.map(|w| window_start(now, w.days()));

    let papers = store
        .list_papers(&PaperFilter {
            sort: Some("created_at".into()),
            ..Default::default()
        })?
        .results
        .into_iter()
        .filter(|p| in_window(&p.created_at, since))
        .collect();

    let pulps = store
        .list_pulps(&PulpFilter {
            sort: Some("created_at".into()),
            ..Default::default()
        })?
        .results
        .into_iter()
        .filter(|p| in_window(&p.created_at, since))
        .collect();

    Ok((papers, pulps))
}

/// Roll numbers down the side, one column per series.
pub fn render_table(chart: &ChartData) -> String {
    let mut headers = vec!["Roll"];
    headers.extend(chart.series.iter().map(|s| s.name.as_str()));

    let mut table = Table::with_headers(&headers);
    for (i, roll) in chart.roll_numbers.iter().enumerate() {
        let mut row = vec![roll.clone()];
        row.extend(
            chart
                .series
                .iter()
                .map(|s| format_opt(s.data.get(i).and_then(|p| p.value))),
        );
        table.add_row(row);
    }
    table.fit().render()
}

pub fn render_json(chart: &ChartData) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(chart)?)
}

/// Same layout as the table; gaps are empty cells.
pub fn render_csv(chart: &ChartData) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let mut head = vec!["roll_number".to_string()];
    head.extend(chart.series.iter().map(|s| s.name.clone()));
    wtr.write_record(&head)
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;

    for (i, roll) in chart.roll_numbers.iter().enumerate() {
        let mut row = vec![roll.clone()];
        row.extend(chart.series.iter().map(|s| {
            s.data
                .get(i)
                .and_then(|p| p.value)
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        wtr.write_record(&row)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

impl ReportLogic {
    /// Build the chart for `req` without rendering it.
    pub fn build<S: RecordStore>(
        store: &S,
        req: &ReportRequest,
        palette: &[String],
        now: DateTime<Local>,
    ) -> AppResult<ChartData> {
        let (papers, pulps) = load_records(store, req.window, now)?;
        let catalog = MaterialCatalog::from_materials(&store.list_materials()?);
        let manifest = resolve_manifest(&req.manifest, &papers)?.or_palette(palette);

        let chart = build_chart_series(&papers, &pulps, &catalog, &manifest)?;

        match &req.group {
            None => Ok(chart),
            Some(name) => {
                let group = manifest.group(name).ok_or_else(|| {
                    let known: Vec<&str> =
                        manifest.groups.iter().map(|g| g.name.as_str()).collect();
                    AppError::InvalidManifest(format!(
                        "manifest '{}' has no group '{}' (groups: {})",
                        manifest.name,
                        name,
                        if known.is_empty() { "none".to_string() } else { known.join(", ") }
                    ))
                })?;
                Ok(chart.select(&group.series))
            }
        }
    }

    pub fn run<S: RecordStore>(
        store: &S,
        req: &ReportRequest,
        palette: &[String],
    ) -> AppResult<()> {
        let chart = Self::build(store, req, palette, Local::now())?;
        // json/csv on stdout stay machine-readable
        let quiet = req.file.is_none() && req.format != ReportFormat::Table;

        if chart.roll_numbers.is_empty() && !quiet {
            warning("No records with a roll number in the selected window.");
        }

        let output = match req.format {
            ReportFormat::Table => render_table(&chart),
            ReportFormat::Json => render_json(&chart)?,
            ReportFormat::Csv => render_csv(&chart)?,
        };

        match &req.file {
            None => print!("{}", output),
            Some(file) => {
                let path = Path::new(file);
                ensure_writable(path, req.force)?;
                fs::write(path, output)?;
                success(format!("Report written to {}", path.display()));
            }
        }

        if !quiet {
            info(format!(
                "{} series over {} roll(s), {} point(s).",
                chart.series.len(),
                chart.roll_numbers.len(),
                chart.total_points
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::pool::DbPool;
    use crate::models::chart::{ChartDataPoint, ChartSeries, RecordKind};
    use chrono::Duration;

    fn chart() -> ChartData {
        let point = |roll: &str, v: Option<f64>| ChartDataPoint {
            value: v,
            ..ChartDataPoint::gap(roll, RecordKind::Paper)
        };
        ChartData::new(
            vec![ChartSeries {
                name: "Humidity".into(),
                color: "#000".into(),
                data: vec![point("1", Some(7.5)), point("2", None)],
            }],
            vec!["1".into(), "2".into()],
        )
    }

    #[test]
    fn csv_leaves_gaps_empty() {
        let csv = render_csv(&chart()).unwrap();
        assert_eq!(csv, "roll_number,Humidity\n1,7.5\n2,\n");
    }

    #[test]
    fn json_uses_camel_case_and_null_gaps() {
        let json = render_json(&chart()).unwrap();
        assert!(json.contains("\"rollNumber\": \"2\""));
        assert!(json.contains("\"value\": null"));
        assert!(json.contains("\"totalPoints\": 2"));
    }

    #[test]
    fn unknown_manifest_name_is_rejected() {
        assert!(matches!(
            resolve_manifest("weekly-special", &[]),
            Err(AppError::InvalidManifest(_))
        ));
        assert_eq!(resolve_manifest("TECHNICAL", &[]).unwrap().name, "technical");
    }

    #[test]
    fn window_keeps_recent_records_only() {
        let pool = DbPool::in_memory().unwrap();
        run_pending_migrations(&pool.conn).unwrap();

        let old = (Local::now() - Duration::days(10)).to_rfc3339();
        let recent = Local::now().to_rfc3339();
        for (roll, created) in [("1", &old), ("2", &recent)] {
            pool.conn
                .execute(
                    "INSERT INTO papers (date, sampling_start_time, sampling_end_time, roll_number,
                                         responsible_person, created_at, last_updated)
                     VALUES ('1403-01-01', '08:00', '09:00', ?1, 'A', ?2, ?2)",
                    rusqlite::params![roll, created],
                )
                .unwrap();
        }

        let (all, _) = load_records(&pool, None, Local::now()).unwrap();
        assert_eq!(all.len(), 2);
        let (weekly, _) = load_records(&pool, Some(ReportWindow::Weekly), Local::now()).unwrap();
        assert_eq!(weekly.len(), 1);
        assert_eq!(weekly[0].roll_number, "2");
    }

    #[test]
    fn group_selection_and_unknown_group() {
        let pool = DbPool::in_memory().unwrap();
        run_pending_migrations(&pool.conn).unwrap();

        let mut req = ReportRequest {
            manifest: "technical".into(),
            group: Some("tensile".into()),
            format: ReportFormat::Json,
            window: None,
            file: None,
            force: false,
        };
        let chart = ReportLogic::build(&pool, &req, &[], Local::now()).unwrap();
        assert_eq!(chart.series.len(), 5);

        req.group = Some("nope".into());
        assert!(matches!(
            ReportLogic::build(&pool, &req, &[], Local::now()),
            Err(AppError::InvalidManifest(_))
        ));
    }
}
