use crate::cli::commands::parse_each;
use crate::cli::parser::{Commands, PulpAction, PulpArgs};
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::del::DeleteLogic;
use crate::core::edit::EditLogic;
use crate::core::form::{PulpForm, parse_assignment};
use crate::core::list::ListLogic;
use crate::db;
use crate::db::store::PulpFilter;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info};

fn pulp_form(args: &PulpArgs) -> AppResult<PulpForm> {
    Ok(PulpForm {
        roll_number: args.roll.clone(),
        lower_sampling_time: args.time.clone(),
        readings: parse_each(&args.set, parse_assignment)?,
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Pulp { action } = cmd {
        let mut pool = db::open(&cfg.database)?;

        match action {
            PulpAction::Add { fields } => {
                AddLogic::pulp(&mut pool, &pulp_form(fields)?)?;
            }
            PulpAction::Edit { id, fields } => {
                EditLogic::pulp(&mut pool, *id, &pulp_form(fields)?)?;
            }
            PulpAction::Show { id } => ListLogic::show_pulp(&pool, *id)?,
            PulpAction::List {
                search,
                sort,
                limit,
            } => {
                let filter = PulpFilter {
                    search: search.clone(),
                    sort: sort.clone(),
                    limit: *limit,
                };
                ListLogic::pulps(&pool, &filter)?;
            }
            PulpAction::Del { id, yes } => {
                let prompt = format!("Delete pulp sample #{}? This action is irreversible.", id);
                if !*yes && !confirm(&prompt) {
                    info("Operation cancelled.");
                    return Ok(());
                }
                DeleteLogic::pulp(&mut pool, *id)?;
            }
        }
    }
    Ok(())
}
