pub mod db_utils;
pub mod initialize;
pub mod log;
pub mod materials;
pub mod migrate;
pub mod papers;
pub mod pool;
pub mod pulps;
pub mod store;

use crate::errors::AppResult;
use pool::DbPool;

/// Open the database at `path` and bring its schema up to date.
pub fn open(path: &str) -> AppResult<DbPool> {
    let pool = DbPool::new(path)?;
    migrate::run_pending_migrations_verbose(&pool.conn)?;
    Ok(pool)
}
