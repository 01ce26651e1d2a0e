use crate::db::store::RecordStore;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub struct DeleteLogic;

impl DeleteLogic {
    pub fn paper<S: RecordStore>(store: &mut S, id: i64) -> AppResult<()> {
        let paper = store.get_paper(id)?;
        store.delete_paper(id)?;
        store.record_action(
            "del",
            &format!("paper #{}", id),
            &format!("roll {} on {}", paper.roll_number, paper.date),
        )?;
        success(format!("Paper #{} (roll {}) has been deleted.", id, paper.roll_number));
        Ok(())
    }

    pub fn pulp<S: RecordStore>(store: &mut S, id: i64) -> AppResult<()> {
        let pulp = store.get_pulp(id)?;
        store.delete_pulp(id)?;
        store.record_action(
            "del",
            &format!("pulp #{}", id),
            &format!("roll {}", pulp.roll().unwrap_or("-")),
        )?;
        success(format!("Pulp sample #{} has been deleted.", id));
        Ok(())
    }

    /// Papers that used the material keep their usage entry; it is shown as
    /// `Material {id}` from then on.
    pub fn material<S: RecordStore>(store: &mut S, id: i64) -> AppResult<()> {
        let material = store.get_material(id)?;
        store.delete_material(id)?;
        store.record_action("del", &format!("material #{}", id), &material.name)?;
        success(format!("Material #{} '{}' has been deleted.", id, material.name));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::add::AddLogic;
    use crate::core::form::MaterialForm;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::pool::DbPool;
    use crate::errors::AppError;

    #[test]
    fn delete_removes_and_second_delete_is_not_found() {
        let mut pool = DbPool::in_memory().unwrap();
        run_pending_migrations(&pool.conn).unwrap();

        let m = AddLogic::material(
            &mut pool,
            &MaterialForm {
                name: Some("Alum".into()),
                description: None,
            },
        )
        .unwrap();

        DeleteLogic::material(&mut pool, m.id).unwrap();
        assert!(pool.list_materials().unwrap().is_empty());
        assert!(matches!(
            DeleteLogic::material(&mut pool, m.id),
            Err(AppError::NotFound { entity: "material", .. })
        ));
    }
}
