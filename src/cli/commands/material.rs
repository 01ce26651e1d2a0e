use crate::cli::parser::{Commands, MaterialAction};
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::del::DeleteLogic;
use crate::core::edit::EditLogic;
use crate::core::form::MaterialForm;
use crate::core::list::ListLogic;
use crate::db;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Material { action } = cmd {
        let mut pool = db::open(&cfg.database)?;

        match action {
            MaterialAction::Add { name, description } => {
                let form = MaterialForm {
                    name: Some(name.clone()),
                    description: description.clone(),
                };
                AddLogic::material(&mut pool, &form)?;
            }
            MaterialAction::Edit {
                id,
                name,
                description,
            } => {
                let form = MaterialForm {
                    name: name.clone(),
                    description: description.clone(),
                };
                EditLogic::material(&mut pool, *id, &form)?;
            }
            MaterialAction::List => ListLogic::materials(&pool)?,
            MaterialAction::Del { id, yes } => {
                let prompt = format!(
                    "Delete material #{}? Papers that used it will show it as 'Material {}'.",
                    id, id
                );
                if !*yes && !confirm(&prompt) {
                    info("Operation cancelled.");
                    return Ok(());
                }
                DeleteLogic::material(&mut pool, *id)?;
            }
        }
    }
    Ok(())
}
