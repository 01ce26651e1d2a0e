//! Chart series construction: roll-number axis, manifests and the builder
//! that aligns paper, pulp and material readings on one axis.

pub mod axis;
pub mod builder;
pub mod manifest;

pub use axis::roll_axis;
pub use builder::build_chart_series;
pub use manifest::{ChartGroup, Manifest, SeriesSource, SeriesSpec, Transform};
