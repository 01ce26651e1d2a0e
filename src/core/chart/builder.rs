use super::axis::roll_axis;
use super::manifest::{Manifest, SeriesSource, SeriesSpec};
use crate::errors::{AppError, AppResult};
use crate::models::chart::{ChartData, ChartDataPoint, ChartSeries, RecordKind};
use crate::models::material::MaterialCatalog;
use crate::models::paper::{PaperField, PaperRecord};
use crate::models::pulp::{PulpField, PulpRecord};
use std::collections::{HashMap, HashSet};

/// What a manifest entry reads, resolved before any point is built.
enum Extractor<'m> {
    Paper(PaperField),
    Pulp(PulpField),
    Material(&'m str),
}

fn resolve(spec: &SeriesSpec) -> AppResult<Extractor<'_>> {
    match spec.source {
        SeriesSource::Paper => PaperField::from_name(&spec.field)
            .map(Extractor::Paper)
            .ok_or_else(|| AppError::UnknownField {
                kind: "paper",
                field: spec.field.clone(),
            }),
        SeriesSource::Pulp => PulpField::from_name(&spec.field)
            .map(Extractor::Pulp)
            .ok_or_else(|| AppError::UnknownField {
                kind: "pulp",
                field: spec.field.clone(),
            }),
        SeriesSource::Material => {
            let id = spec.field.trim();
            if id.is_empty() {
                return Err(AppError::InvalidManifest(
                    "material series without a material id".into(),
                ));
            }
            Ok(Extractor::Material(id))
        }
    }
}

/// Index records by roll number. A later record with the same roll replaces
/// an earlier one, so callers pass records oldest first.
fn index_by_roll<'r, T, F>(records: &'r [T], roll_of: F) -> HashMap<&'r str, &'r T>
where
    F: Fn(&'r T) -> Option<&'r str>,
{
    let mut index = HashMap::new();
    for rec in records {
        if let Some(roll) = roll_of(rec) {
            index.insert(roll, rec);
        }
    }
    index
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn paper_roll(p: &PaperRecord) -> Option<&str> {
    Some(p.roll_number.trim()).filter(|r| !r.is_empty())
}

/// Build every series of `manifest` over one shared roll-number axis.
///
/// Each series has exactly one point per axis position; a missing record or
/// an absent field yields a `None` value. Unknown field names fail before
/// anything is built.
pub fn build_chart_series(
    papers: &[PaperRecord],
    pulps: &[PulpRecord],
    catalog: &MaterialCatalog,
    manifest: &Manifest,
) -> AppResult<ChartData> {
    let extractors = manifest
        .series
        .iter()
        .map(resolve)
        .collect::<AppResult<Vec<_>>>()?;

    let axis = roll_axis(
        papers
            .iter()
            .filter_map(paper_roll)
            .chain(pulps.iter().filter_map(PulpRecord::roll)),
    );

    let paper_by_roll = index_by_roll(papers, paper_roll);
    let pulp_by_roll = index_by_roll(pulps, PulpRecord::roll);

    let mut series = Vec::with_capacity(extractors.len());
    let mut names = HashSet::new();

    for (i, (spec, extractor)) in manifest.series.iter().zip(&extractors).enumerate() {
        let name = match (extractor, spec.name.trim()) {
            (Extractor::Material(id), "") => catalog.display_name(id),
            (_, n) => n.to_string(),
        };
        if !names.insert(name.clone()) {
            return Err(AppError::InvalidManifest(format!(
                "series name '{}' is used twice",
                name
            )));
        }

        let data = axis
            .iter()
            .map(|roll| {
                let roll = roll.as_str();
                match extractor {
                    Extractor::Paper(field) => paper_point(
                        roll,
                        paper_by_roll.get(roll).copied(),
                        |p| p.value(*field),
                        spec,
                    ),
                    Extractor::Material(id) => paper_point(
                        roll,
                        paper_by_roll.get(roll).copied(),
                        |p| p.material_usage.get(*id).and_then(|e| e.amount),
                        spec,
                    ),
                    Extractor::Pulp(field) => pulp_point(
                        roll,
                        pulp_by_roll.get(roll).copied(),
                        paper_by_roll.get(roll).copied(),
                        *field,
                        spec,
                    ),
                }
            })
            .collect();

        series.push(ChartSeries {
            name,
            color: manifest.color_for(i),
            data,
        });
    }

    for group in &manifest.groups {
        if let Some(missing) = group.series.iter().find(|n| !names.contains(*n)) {
            return Err(AppError::InvalidManifest(format!(
                "group '{}' refers to unknown series '{}'",
                group.name, missing
            )));
        }
    }

    Ok(ChartData::new(series, axis))
}

fn paper_point<F>(
    roll: &str,
    paper: Option<&PaperRecord>,
    read: F,
    spec: &SeriesSpec,
) -> ChartDataPoint
where
    F: Fn(&PaperRecord) -> Option<f64>,
{
    let Some(paper) = paper else {
        return ChartDataPoint::gap(roll, RecordKind::Paper);
    };
    match read(paper) {
        Some(v) => ChartDataPoint {
            roll_number: roll.to_string(),
            value: Some(spec.transform.apply(v)),
            date: non_empty(&paper.date),
            sampling_time: non_empty(&paper.sampling_start_time),
            kind: RecordKind::Paper,
        },
        None => ChartDataPoint::gap(roll, RecordKind::Paper),
    }
}

/// Pulp samples carry no calendar date; the paper on the same roll supplies it.
fn pulp_point(
    roll: &str,
    pulp: Option<&PulpRecord>,
    paper: Option<&PaperRecord>,
    field: PulpField,
    spec: &SeriesSpec,
) -> ChartDataPoint {
    match pulp.and_then(|p| p.value(field).map(|v| (p, v))) {
        Some((pulp, v)) => ChartDataPoint {
            roll_number: roll.to_string(),
            value: Some(spec.transform.apply(v)),
            date: paper.and_then(|p| non_empty(&p.date)),
            sampling_time: non_empty(&pulp.lower_sampling_time),
            kind: RecordKind::Pulp,
        },
        None => ChartDataPoint::gap(roll, RecordKind::Pulp),
    }
}
