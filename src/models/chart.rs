//! Chart output model. Derived on demand, never persisted.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Paper,
    Pulp,
}

/// One category-axis position of a series. `value` is `None` for a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    pub roll_number: String,
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_time: Option<String>,
    pub kind: RecordKind,
}

impl ChartDataPoint {
    pub fn gap(roll_number: &str, kind: RecordKind) -> Self {
        Self {
            roll_number: roll_number.to_string(),
            value: None,
            date: None,
            sampling_time: None,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub color: String,
    pub data: Vec<ChartDataPoint>,
}

impl ChartSeries {
    pub fn values(&self) -> Vec<Option<f64>> {
        self.data.iter().map(|p| p.value).collect()
    }

    pub fn present_count(&self) -> usize {
        self.data.iter().filter(|p| p.value.is_some()).count()
    }
}

/// Every series of one chart, aligned on `roll_numbers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub series: Vec<ChartSeries>,
    pub roll_numbers: Vec<String>,
    pub total_points: usize,
}

impl ChartData {
    pub fn new(series: Vec<ChartSeries>, roll_numbers: Vec<String>) -> Self {
        let total_points = series.iter().map(|s| s.data.len()).sum();
        Self {
            series,
            roll_numbers,
            total_points,
        }
    }

    pub fn series_named(&self, name: &str) -> Option<&ChartSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Sub-chart holding only the named series, in the order given, on the
    /// same axis. Names with no matching series are skipped.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> ChartData {
        let series = names
            .iter()
            .filter_map(|n| self.series_named(n.as_ref()).cloned())
            .collect();
        ChartData::new(series, self.roll_numbers.clone())
    }
}
