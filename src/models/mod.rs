pub mod chart;
pub mod material;
pub mod paper;
pub mod paper_type;
pub mod pulp;
pub mod shift;
pub mod usage;
