use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{ReportLogic, ReportRequest};
use crate::db;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        manifest,
        group,
        format,
        window,
        file,
        force,
    } = cmd
    {
        let req = ReportRequest {
            manifest: manifest
                .clone()
                .unwrap_or_else(|| cfg.default_manifest.clone()),
            group: group.clone(),
            format: *format,
            window: *window,
            file: file.clone(),
            force: *force,
        };

        let pool = db::open(&cfg.database)?;
        ReportLogic::run(&pool, &req, &cfg.palette)?;
    }
    Ok(())
}
