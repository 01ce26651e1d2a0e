pub mod config;
pub mod export;
pub mod init;
pub mod log;
pub mod material;
pub mod paper;
pub mod pulp;
pub mod report;
pub mod suggest;

use crate::errors::AppResult;

/// Parse every raw argument, stopping at the first invalid one.
pub(crate) fn parse_each<T>(raws: &[String], parse: fn(&str) -> AppResult<T>) -> AppResult<Vec<T>> {
    raws.iter().map(|r| parse(r)).collect()
}
