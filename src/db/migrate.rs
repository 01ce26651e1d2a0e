use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::now_rfc3339;
use rusqlite::{Connection, OptionalExtension, params};

/// A schema step, applied once and recorded in `log` as `migration_applied`.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_materials",
        description: "Created materials table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS materials (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL,
            description  TEXT,
            created_at   TEXT NOT NULL,
            last_updated TEXT NOT NULL
        );
        CREATE UNIQUE INDEX IF NOT EXISTS idx_materials_name ON materials(name COLLATE NOCASE);
        "#,
    },
    Migration {
        version: "20250301_0002_create_papers",
        description: "Created papers table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS papers (
            id                                INTEGER PRIMARY KEY AUTOINCREMENT,
            date                              TEXT NOT NULL,
            sampling_start_time               TEXT NOT NULL,
            sampling_end_time                 TEXT NOT NULL,
            roll_number                       TEXT NOT NULL,
            responsible_person                TEXT NOT NULL,
            shift                             TEXT CHECK(shift IN ('day','night')),
            paper_size                        INTEGER,
            number_of_tears                   INTEGER,
            real_grammage                     REAL,
            humidity                          REAL,
            ash_percentage                    REAL,
            cub                               REAL,
            density_valve                     REAL,
            diluting_valve                    REAL,
            cylinder_temperature_before_press REAL,
            cylinder_temperature_after_press  REAL,
            burst_test                        TEXT NOT NULL DEFAULT '',
            tensile_strength_md               REAL,
            tensile_strength_cd               REAL,
            cct1 REAL, cct2 REAL, cct3 REAL, cct4 REAL, cct5 REAL,
            rct1 REAL, rct2 REAL, rct3 REAL, rct4 REAL, rct5 REAL,
            tearing_time                      TEXT NOT NULL DEFAULT '',
            calender_applied                  INTEGER NOT NULL DEFAULT 0,
            machine_speed                     REAL,
            material_usage                    TEXT NOT NULL DEFAULT '{}',
            created_at                        TEXT NOT NULL,
            last_updated                      TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_papers_roll ON papers(roll_number);
        CREATE INDEX IF NOT EXISTS idx_papers_created ON papers(created_at);
        "#,
    },
    Migration {
        version: "20250301_0003_create_pulps",
        description: "Created pulps table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS pulps (
            id                        INTEGER PRIMARY KEY AUTOINCREMENT,
            roll_number               TEXT,
            lower_sampling_time       TEXT NOT NULL DEFAULT '',
            down_pulp_count           REAL,
            down_pulp_freeness        REAL,
            lower_headbox_freeness    REAL,
            lower_ph                  REAL,
            lower_pulp_temperature    REAL,
            lower_water_filter        REAL,
            upper_headbox_consistency REAL,
            upper_headbox_freeness    REAL,
            upper_ph                  REAL,
            upper_pulp_temperature    REAL,
            upper_water_filter        REAL,
            pond8_consistency         REAL,
            curtain_consistency       REAL,
            thickener_consistency     REAL,
            created_at                TEXT NOT NULL,
            last_updated              TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_pulps_roll ON pulps(roll_number);
        "#,
    },
    Migration {
        version: "20250412_0004_add_paper_type_profile",
        description: "Added paper_type and profile to papers",
        sql: r#"
        ALTER TABLE papers ADD COLUMN paper_type TEXT;
        ALTER TABLE papers ADD COLUMN profile TEXT;
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![now_rfc3339(), m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Public entry point: run all pending migrations, oldest first.
/// Returns the versions applied by this call.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied.push(m.version);
    }
    Ok(applied)
}

/// Like `run_pending_migrations`, announcing each applied version.
pub fn run_pending_migrations_verbose(conn: &Connection) -> AppResult<()> {
    for version in run_pending_migrations(conn)? {
        success(format!("Migration applied: {}", version));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_apply_once() {
        let conn = Connection::open_in_memory().unwrap();

        let first = run_pending_migrations(&conn).unwrap();
        assert_eq!(first.len(), MIGRATIONS.len());
        assert!(run_pending_migrations(&conn).unwrap().is_empty());

        let recorded: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(recorded as usize, MIGRATIONS.len());

        // columns added by a later step are present
        conn.execute(
            "INSERT INTO papers (date, sampling_start_time, sampling_end_time, roll_number,
                                 responsible_person, paper_type, profile, created_at, last_updated)
             VALUES ('1403-01-01', '08:00', '09:00', '1', 'A', 'float', '3', 'x', 'x')",
            [],
        )
        .unwrap();
    }
}
