use crate::cli::commands::parse_each;
use crate::cli::parser::{Commands, PaperAction, PaperArgs};
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::del::DeleteLogic;
use crate::core::edit::EditLogic;
use crate::core::form::{PaperForm, parse_assignment, parse_usage};
use crate::core::list::ListLogic;
use crate::db;
use crate::db::store::PaperFilter;
use crate::errors::{AppError, AppResult};
use crate::models::paper_type::PaperType;
use crate::models::shift::Shift;
use crate::ui::messages::{confirm, info};

fn paper_form(args: &PaperArgs) -> AppResult<PaperForm> {
    Ok(PaperForm {
        date: args.date.clone(),
        sampling_start_time: args.start.clone(),
        sampling_end_time: args.end.clone(),
        roll_number: args.roll.clone(),
        responsible_person: args.person.clone(),
        shift: args.shift.clone(),
        paper_type: args.paper_type.clone(),
        profile: args.profile.clone(),
        burst_test: args.burst.clone(),
        tearing_time: args.tearing_time.clone(),
        calender_applied: args.calender,
        readings: parse_each(&args.set, parse_assignment)?,
        usage: parse_each(&args.usage, parse_usage)?,
        drop_usage: Vec::new(),
    })
}

fn list_filter(
    search: &Option<String>,
    shift: &Option<String>,
    paper_type: &Option<String>,
    sort: &Option<String>,
    limit: &Option<usize>,
) -> AppResult<PaperFilter> {
    let shift = match shift {
        None => None,
        Some(s) => Some(Shift::from_code(s).ok_or_else(|| AppError::InvalidShift(s.clone()))?),
    };
    let paper_type = match paper_type {
        None => None,
        Some(t) => Some(
            PaperType::from_code(t).ok_or_else(|| AppError::InvalidPaperType(t.clone()))?,
        ),
    };

    Ok(PaperFilter {
        search: search.clone(),
        shift,
        paper_type,
        sort: sort.clone(),
        limit: *limit,
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Paper { action } = cmd {
        let mut pool = db::open(&cfg.database)?;

        match action {
            PaperAction::Add { fields } => {
                let mut form = paper_form(fields)?;
                if form.responsible_person.is_none() {
                    form.responsible_person = cfg.default_responsible_person.clone();
                }
                AddLogic::paper(&mut pool, &form)?;
            }
            PaperAction::Edit {
                id,
                fields,
                drop_usage,
            } => {
                let form = PaperForm {
                    drop_usage: drop_usage.clone(),
                    ..paper_form(fields)?
                };
                EditLogic::paper(&mut pool, *id, &form)?;
            }
            PaperAction::Show { id } => ListLogic::show_paper(&pool, *id)?,
            PaperAction::List {
                search,
                shift,
                paper_type,
                sort,
                limit,
            } => {
                let filter = list_filter(search, shift, paper_type, sort, limit)?;
                ListLogic::papers(&pool, &filter)?;
            }
            PaperAction::Del { id, yes } => {
                let prompt = format!("Delete paper #{}? This action is irreversible.", id);
                if !*yes && !confirm(&prompt) {
                    info("Operation cancelled.");
                    return Ok(());
                }
                DeleteLogic::paper(&mut pool, *id)?;
            }
        }
    }
    Ok(())
}
