pub mod add;
pub mod chart;
pub mod del;
pub mod edit;
pub mod form;
pub mod list;
pub mod log;
pub mod report;
pub mod suggest;
pub mod usage;
