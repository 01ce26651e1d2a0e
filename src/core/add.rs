use crate::core::form::{MaterialForm, PaperForm, PulpForm};
use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::material::{Material, MaterialCatalog};
use crate::models::paper::PaperRecord;
use crate::models::pulp::PulpRecord;
use crate::ui::messages::{success, warning};

/// High-level business logic for the `add` commands.
pub struct AddLogic;

/// Roll numbers are expected to be unique; a repeat is allowed but flagged,
/// since charts keep only the most recent record per roll.
pub(crate) fn warn_duplicate_roll<S: RecordStore>(
    store: &S,
    roll: &str,
    except: Option<i64>,
) -> AppResult<()> {
    let others = store.papers_with_roll(roll, except)?;
    if !others.is_empty() {
        let ids: Vec<String> = others.iter().map(|id| format!("#{id}")).collect();
        warning(format!(
            "Roll number {} is already used by paper {}",
            roll,
            ids.join(", ")
        ));
    }
    Ok(())
}

/// Usage entries may name materials that no longer exist; they are kept and
/// shown as `Material {id}`.
pub(crate) fn warn_unknown_materials<S: RecordStore>(
    store: &S,
    paper: &PaperRecord,
) -> AppResult<()> {
    if paper.material_usage.is_empty() {
        return Ok(());
    }
    let catalog = MaterialCatalog::from_materials(&store.list_materials()?);
    for id in paper.material_usage.keys() {
        if !catalog.contains(id) {
            warning(format!("Material id {} is not in the material list", id));
        }
    }
    Ok(())
}

impl AddLogic {
    pub fn paper<S: RecordStore>(store: &mut S, form: &PaperForm) -> AppResult<PaperRecord> {
        let paper = form.validate().map_err(AppError::Validation)?;

        warn_duplicate_roll(store, &paper.roll_number, None)?;
        warn_unknown_materials(store, &paper)?;

        let saved = store.create_paper(&paper)?;
        store.record_action(
            "add",
            &format!("paper #{}", saved.id),
            &format!("roll {} on {}", saved.roll_number, saved.date),
        )?;

        success(format!(
            "Added paper #{} (roll {}, {}).",
            saved.id, saved.roll_number, saved.date
        ));
        Ok(saved)
    }

    pub fn pulp<S: RecordStore>(store: &mut S, form: &PulpForm) -> AppResult<PulpRecord> {
        let pulp = form.validate().map_err(AppError::Validation)?;

        if let Some(roll) = pulp.roll()
            && store.papers_with_roll(roll, None)?.is_empty()
        {
            warning(format!("No paper record has roll number {} yet", roll));
        }

        let saved = store.create_pulp(&pulp)?;
        store.record_action(
            "add",
            &format!("pulp #{}", saved.id),
            &format!("roll {}", saved.roll().unwrap_or("-")),
        )?;

        success(format!("Added pulp sample #{}.", saved.id));
        Ok(saved)
    }

    pub fn material<S: RecordStore>(store: &mut S, form: &MaterialForm) -> AppResult<Material> {
        let material = form.validate().map_err(AppError::Validation)?;

        let saved = store.create_material(&material)?;
        store.record_action("add", &format!("material #{}", saved.id), &saved.name)?;

        success(format!("Added material #{} '{}'.", saved.id, saved.name));
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::pool::DbPool;
    use crate::models::usage::UsageEntry;

    fn store() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_pending_migrations(&pool.conn).unwrap();
        pool
    }

    fn form(roll: &str) -> PaperForm {
        PaperForm {
            date: Some("1403-02-01".into()),
            sampling_start_time: Some("10:00".into()),
            sampling_end_time: Some("10:20".into()),
            roll_number: Some(roll.into()),
            responsible_person: Some("Ali".into()),
            ..Default::default()
        }
    }

    #[test]
    fn duplicate_roll_is_saved_and_audited() {
        let mut pool = store();
        let a = AddLogic::paper(&mut pool, &form("501")).unwrap();
        let b = AddLogic::paper(&mut pool, &form("501")).unwrap();
        assert_ne!(a.id, b.id);

        let adds: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM log WHERE operation = 'add'", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(adds, 2);
    }

    #[test]
    fn invalid_form_is_rejected_before_storage() {
        let mut pool = store();
        let mut bad = form("1");
        bad.date = Some("someday".into());

        let err = AddLogic::paper(&mut pool, &bad).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref v) if v[0].field == "date"));
        assert_eq!(pool.list_papers(&Default::default()).unwrap().count, 0);
    }

    #[test]
    fn unknown_material_ids_are_kept() {
        let mut pool = store();
        let mut f = form("9");
        f.usage = vec![("77".into(), UsageEntry::with_amount(1.0))];
        let saved = AddLogic::paper(&mut pool, &f).unwrap();
        assert!(saved.material_usage.contains_key("77"));
    }

    #[test]
    fn material_names_must_be_unique() {
        let mut pool = store();
        let f = MaterialForm {
            name: Some("Starch".into()),
            description: None,
        };
        AddLogic::material(&mut pool, &f).unwrap();
        assert!(matches!(
            AddLogic::material(&mut pool, &f),
            Err(AppError::DuplicateMaterial(_))
        ));
    }
}
