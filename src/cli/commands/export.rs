use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        entity,
        format,
        file,
        force,
    } = cmd
    {
        let mut pool = db::open(&cfg.database)?;
        ExportLogic::export(&mut pool, *entity, *format, file, *force)?;
    }
    Ok(())
}
