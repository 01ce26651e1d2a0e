//! Chart manifests: which series to draw, from which record field, and how
//! to rescale them onto a shared y-axis.

use crate::errors::{AppError, AppResult};
use crate::models::paper::PaperRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const DEFAULT_PALETTE: [&str; 9] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#06B6D4", "#F97316", "#84CC16",
    "#EC4899",
];

pub fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesSource {
    Paper,
    Pulp,
    /// `field` holds a material id; values come from the paper's usage amounts
    Material,
}

/// Value transform applied before a point is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    #[default]
    Identity,
    Scale(f64),
    Offset(f64),
}

impl Transform {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Transform::Identity => value,
            Transform::Scale(f) => value * f,
            Transform::Offset(d) => value + d,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Display name. May be empty for material series: the catalog name is used.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    pub source: SeriesSource,
    pub field: String,
    #[serde(default)]
    pub transform: Transform,
}

impl SeriesSpec {
    pub fn new(name: &str, source: SeriesSource, field: &str) -> Self {
        Self {
            name: name.to_string(),
            color: None,
            source,
            field: field.to_string(),
            transform: Transform::Identity,
        }
    }

    pub fn paper(name: &str, field: &str) -> Self {
        Self::new(name, SeriesSource::Paper, field)
    }

    pub fn pulp(name: &str, field: &str) -> Self {
        Self::new(name, SeriesSource::Pulp, field)
    }

    pub fn material(material_id: &str) -> Self {
        Self::new("", SeriesSource::Material, material_id)
    }

    pub fn scaled(mut self, factor: f64) -> Self {
        self.transform = Transform::Scale(factor);
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

/// Named subset of a manifest's series drawn as its own panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGroup {
    pub name: String,
    pub series: Vec<String>,
}

impl ChartGroup {
    fn new(name: &str, series: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            series: series.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub series: Vec<SeriesSpec>,
    #[serde(default)]
    pub groups: Vec<ChartGroup>,
    /// Colours for series that do not set one, assigned by position.
    /// Empty until the manifest or the caller provides one.
    #[serde(default)]
    pub palette: Vec<String>,
}

impl Manifest {
    pub fn new(name: &str, series: Vec<SeriesSpec>) -> Self {
        Self {
            name: name.to_string(),
            series,
            groups: Vec::new(),
            palette: Vec::new(),
        }
    }

    pub fn with_groups(mut self, groups: Vec<ChartGroup>) -> Self {
        self.groups = groups;
        self
    }

    /// Use `palette` unless the manifest declares its own.
    pub fn or_palette(mut self, palette: &[String]) -> Self {
        if self.palette.is_empty() {
            self.palette = palette.to_vec();
        }
        self
    }

    pub fn group(&self, name: &str) -> Option<&ChartGroup> {
        self.groups.iter().find(|g| g.name.eq_ignore_ascii_case(name))
    }

    pub fn color_for(&self, index: usize) -> String {
        match self.series.get(index).and_then(|s| s.color.clone()) {
            Some(c) => c,
            None if self.palette.is_empty() => {
                DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].into()
            }
            None => self.palette[index % self.palette.len()].clone(),
        }
    }

    /// Load a manifest from a YAML file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let manifest: Manifest = serde_yaml::from_str(&content)?;
        if manifest.series.is_empty() {
            return Err(AppError::InvalidManifest(format!(
                "{} declares no series",
                path.display()
            )));
        }
        Ok(manifest)
    }

    /// Overview chart: one series per quality type, scaled to share one axis.
    pub fn summary() -> Self {
        Manifest::new(
            "summary",
            vec![
                SeriesSpec::pulp("pH", "ph_avg").scaled(25.0),
                SeriesSpec::paper("Moisture", "humidity").scaled(25.0),
                SeriesSpec::paper("Burst", "burst"),
                SeriesSpec::paper("RCT", "rct_avg"),
                SeriesSpec::paper("CCT", "cct_avg"),
                SeriesSpec::paper("MD", "tensile_strength_md").scaled(3.0),
                SeriesSpec::paper("CD", "tensile_strength_cd").scaled(5.0),
                SeriesSpec::paper("GMS", "real_grammage").scaled(2.0),
                SeriesSpec::paper("CUB", "cub"),
            ],
        )
    }

    /// Technical report: paper quality plus upper/lower headbox readings.
    pub fn technical() -> Self {
        Manifest::new(
            "technical",
            vec![
                SeriesSpec::paper("Burst test", "burst"),
                SeriesSpec::paper("Grammage", "real_grammage"),
                SeriesSpec::paper("Moisture", "humidity").scaled(10.0),
                SeriesSpec::pulp("Upper headbox consistency", "upper_headbox_consistency")
                    .scaled(100.0),
                SeriesSpec::pulp("Upper water filter", "upper_water_filter").scaled(100.0),
                SeriesSpec::pulp("Upper pH", "upper_ph").scaled(10.0),
                SeriesSpec::pulp("Upper pulp temperature", "upper_pulp_temperature"),
                SeriesSpec::pulp("Lower pulp consistency", "down_pulp_count").scaled(100.0),
                SeriesSpec::pulp("Lower water filter", "lower_water_filter").scaled(100.0),
                SeriesSpec::pulp("Lower pH", "lower_ph").scaled(10.0),
                SeriesSpec::pulp("Lower pulp temperature", "lower_pulp_temperature"),
                SeriesSpec::paper("MD", "tensile_strength_md"),
                SeriesSpec::paper("CD", "tensile_strength_cd"),
                SeriesSpec::pulp("Upper headbox consistency ×100", "upper_headbox_consistency")
                    .scaled(100.0),
                SeriesSpec::pulp("Lower pulp consistency ×100", "down_pulp_count").scaled(100.0),
                SeriesSpec::pulp("Pond 8 consistency", "pond8_consistency"),
                SeriesSpec::pulp("Curtain", "curtain_consistency"),
                SeriesSpec::pulp("Thickener", "thickener_consistency"),
            ],
        )
        .with_groups(vec![
            ChartGroup::new("paper", &["Burst test", "Grammage", "Moisture"]),
            ChartGroup::new(
                "top-headbox",
                &[
                    "Upper headbox consistency",
                    "Upper water filter",
                    "Upper pH",
                    "Upper pulp temperature",
                ],
            ),
            ChartGroup::new(
                "bottom-headbox",
                &[
                    "Lower pulp consistency",
                    "Lower water filter",
                    "Lower pH",
                    "Lower pulp temperature",
                ],
            ),
            ChartGroup::new(
                "tensile",
                &[
                    "Grammage",
                    "MD",
                    "CD",
                    "Upper headbox consistency ×100",
                    "Lower pulp consistency ×100",
                ],
            ),
            ChartGroup::new(
                "consistency",
                &["Pond 8 consistency", "Curtain", "Thickener"],
            ),
        ])
    }

    /// One amount-over-rolls series per material used by any paper, in id
    /// order. Series are named from the catalog at build time.
    pub fn materials(papers: &[PaperRecord]) -> Self {
        let ids: BTreeSet<&str> = papers
            .iter()
            .flat_map(|p| p.material_usage.keys().map(String::as_str))
            .collect();

        let mut ids: Vec<&str> = ids.into_iter().collect();
        // numeric ids in numeric order
        ids.sort_by_key(|id| (id.parse::<i64>().unwrap_or(i64::MAX), id.to_string()));

        Manifest::new(
            "materials",
            ids.into_iter().map(SeriesSpec::material).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usage::UsageEntry;

    #[test]
    fn transforms_rescale_values() {
        assert!((Transform::Scale(100.0).apply(0.035) - 3.5).abs() < 1e-9);
        assert_eq!(Transform::Offset(-2.0).apply(5.0), 3.0);
        assert_eq!(Transform::Identity.apply(7.5), 7.5);
    }

    #[test]
    fn yaml_manifest_parses_with_defaults() {
        let yaml = r##"
name: custom
series:
  - name: Humidity
    source: paper
    field: humidity
  - name: Headbox
    source: pulp
    field: upper_headbox_consistency
    transform: !scale 100.0
    color: "#000000"
groups:
  - name: both
    series: [Humidity, Headbox]
"##;
        let m: Manifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(m.series.len(), 2);
        assert_eq!(m.series[0].transform, Transform::Identity);
        assert_eq!(m.series[1].transform, Transform::Scale(100.0));
        assert_eq!(m.color_for(1), "#000000");
        assert_eq!(m.color_for(0), DEFAULT_PALETTE[0]);
        assert_eq!(m.group("BOTH").map(|g| g.series.len()), Some(2));
    }

    #[test]
    fn declared_palette_wins_over_caller_palette() {
        let caller = vec!["#aaaaaa".to_string()];

        let own: Manifest =
            serde_yaml::from_str("name: own\npalette: ['#000001']\nseries: []\n").unwrap();
        assert_eq!(own.or_palette(&caller).palette, vec!["#000001".to_string()]);

        let bare = Manifest::new("bare", vec![SeriesSpec::paper("H", "humidity")]);
        assert_eq!(bare.or_palette(&caller).color_for(0), "#aaaaaa");
    }

    #[test]
    fn technical_groups_only_name_declared_series() {
        let m = Manifest::technical();
        for g in &m.groups {
            for name in &g.series {
                assert!(m.series.iter().any(|s| &s.name == name), "{name}");
            }
        }
    }

    #[test]
    fn material_manifest_lists_each_used_id_once() {
        let mut a = PaperRecord::default();
        a.material_usage.insert("10".into(), UsageEntry::with_amount(1.0));
        a.material_usage.insert("2".into(), UsageEntry::with_amount(1.0));
        let mut b = PaperRecord::default();
        b.material_usage.insert("2".into(), UsageEntry::with_amount(3.0));

        let m = Manifest::materials(&[a, b]);
        let fields: Vec<&str> = m.series.iter().map(|s| s.field.as_str()).collect();
        assert_eq!(fields, vec!["2", "10"]);
        assert!(m.series.iter().all(|s| s.source == SeriesSource::Material));
    }
}
