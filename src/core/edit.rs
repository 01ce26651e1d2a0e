use crate::core::add::{warn_duplicate_roll, warn_unknown_materials};
use crate::core::form::{MaterialForm, PaperForm, PulpForm};
use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::material::Material;
use crate::models::paper::PaperRecord;
use crate::models::pulp::PulpRecord;
use crate::ui::messages::success;

/// Edits load the stored record, apply only the fields given, validate the
/// merged result and write it back. Last write wins.
pub struct EditLogic;

impl EditLogic {
    pub fn paper<S: RecordStore>(
        store: &mut S,
        id: i64,
        form: &PaperForm,
    ) -> AppResult<PaperRecord> {
        let current = store.get_paper(id)?;
        let old_roll = current.roll_number.clone();

        let paper = form.apply_to(current).map_err(AppError::Validation)?;

        if paper.roll_number != old_roll {
            warn_duplicate_roll(store, &paper.roll_number, Some(id))?;
        }
        warn_unknown_materials(store, &paper)?;

        let saved = store.update_paper(&paper)?;
        store.record_action(
            "edit",
            &format!("paper #{}", id),
            &format!("roll {} on {}", saved.roll_number, saved.date),
        )?;

        success(format!("Updated paper #{}.", id));
        Ok(saved)
    }

    pub fn pulp<S: RecordStore>(store: &mut S, id: i64, form: &PulpForm) -> AppResult<PulpRecord> {
        let current = store.get_pulp(id)?;
        let pulp = form.apply_to(current).map_err(AppError::Validation)?;

        let saved = store.update_pulp(&pulp)?;
        store.record_action(
            "edit",
            &format!("pulp #{}", id),
            &format!("roll {}", saved.roll().unwrap_or("-")),
        )?;

        success(format!("Updated pulp sample #{}.", id));
        Ok(saved)
    }

    pub fn material<S: RecordStore>(
        store: &mut S,
        id: i64,
        form: &MaterialForm,
    ) -> AppResult<Material> {
        let current = store.get_material(id)?;
        let old_name = current.name.clone();
        let material = form.apply_to(current).map_err(AppError::Validation)?;

        let saved = store.update_material(&material)?;
        let message = if old_name == saved.name {
            saved.name.clone()
        } else {
            format!("{} → {}", old_name, saved.name)
        };
        store.record_action("edit", &format!("material #{}", id), &message)?;

        success(format!("Updated material #{}.", id));
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::add::AddLogic;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::pool::DbPool;

    fn store() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_pending_migrations(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn edit_changes_only_given_fields() {
        let mut pool = store();
        let created = AddLogic::paper(
            &mut pool,
            &PaperForm {
                date: Some("1403-02-01".into()),
                sampling_start_time: Some("10:00".into()),
                sampling_end_time: Some("10:20".into()),
                roll_number: Some("12".into()),
                responsible_person: Some("Ali".into()),
                readings: vec![("humidity".into(), "7".into())],
                ..Default::default()
            },
        )
        .unwrap();

        let edited = EditLogic::paper(
            &mut pool,
            created.id,
            &PaperForm {
                readings: vec![("cub".into(), "1.3".into())],
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(edited.humidity, Some(7.0));
        assert_eq!(edited.cub, Some(1.3));
        assert_eq!(edited.created_at, created.created_at);
    }

    #[test]
    fn editing_a_missing_record_is_not_found() {
        let mut pool = store();
        assert!(matches!(
            EditLogic::pulp(&mut pool, 3, &PulpForm::default()),
            Err(AppError::NotFound { entity: "pulp", id: 3 })
        ));
    }
}
