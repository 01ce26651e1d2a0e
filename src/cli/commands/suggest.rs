use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::suggest::SuggestLogic;
use crate::db;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Suggest { json } = cmd {
        let pool = db::open(&cfg.database)?;
        SuggestLogic::print(&pool, *json)?;
    }
    Ok(())
}
