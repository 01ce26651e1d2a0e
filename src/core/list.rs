//! Listing and detail views for the terminal.

use crate::core::usage::format_usage;
use crate::db::store::{Listing, PaperFilter, PulpFilter, RecordStore};
use crate::errors::AppResult;
use crate::models::material::{Material, MaterialCatalog};
use crate::models::paper::{PaperField, PaperRecord};
use crate::models::pulp::{PulpField, PulpRecord};
use crate::ui::messages::{header, info};
use crate::utils::colors::colorize_shift;
use crate::utils::formatting::{bold, format_number, format_opt, pad_right, truncate};
use crate::utils::table::Table;

pub struct ListLogic;

fn footer<T>(listing: &Listing<T>) -> String {
    format!("Showing {} of {} record(s).", listing.results.len(), listing.count)
}

pub fn paper_table(papers: &[PaperRecord], catalog: &MaterialCatalog) -> Table {
    let mut table = Table::with_headers(&[
        "ID", "Date", "Shift", "Roll", "Person", "GSM", "Humidity", "Burst", "CCT", "RCT",
        "Materials",
    ]);
    for p in papers {
        table.add_row(vec![
            p.id.to_string(),
            p.date.clone(),
            p.shift.map(|s| s.to_db_str()).unwrap_or("-").to_string(),
            p.roll_number.clone(),
            truncate(&p.responsible_person, 16),
            format_opt(p.real_grammage),
            format_opt(p.humidity),
            format_opt(p.value(PaperField::Burst)),
            format_opt(p.value(PaperField::CctAvg)),
            format_opt(p.value(PaperField::RctAvg)),
            truncate(&format_usage(&p.material_usage, catalog), 40),
        ]);
    }
    table.fit()
}

pub fn pulp_table(pulps: &[PulpRecord]) -> Table {
    let mut table = Table::with_headers(&[
        "ID", "Roll", "Sampled", "Lower pH", "Upper pH", "Headbox", "Lower temp", "Upper temp",
    ]);
    for p in pulps {
        table.add_row(vec![
            p.id.to_string(),
            p.roll().unwrap_or("-").to_string(),
            p.lower_sampling_time.clone(),
            format_opt(p.lower_ph),
            format_opt(p.upper_ph),
            format_opt(p.upper_headbox_consistency),
            format_opt(p.lower_pulp_temperature),
            format_opt(p.upper_pulp_temperature),
        ]);
    }
    table.fit()
}

pub fn material_table(materials: &[Material]) -> Table {
    let mut table = Table::with_headers(&["ID", "Name", "Description"]);
    for m in materials {
        table.add_row(vec![
            m.id.to_string(),
            m.name.clone(),
            truncate(m.description.as_deref().unwrap_or("-"), 50),
        ]);
    }
    table.fit()
}

fn line(label: &str, value: &str) {
    println!("{} {}", bold(&pad_right(label, 36)), value);
}

impl ListLogic {
    pub fn papers<S: RecordStore>(store: &S, filter: &PaperFilter) -> AppResult<()> {
        let listing = store.list_papers(filter)?;
        if listing.results.is_empty() {
            info("No paper records found.");
            return Ok(());
        }
        let catalog = MaterialCatalog::from_materials(&store.list_materials()?);

        print!("{}", paper_table(&listing.results, &catalog).render());
        println!("\n{}", footer(&listing));
        Ok(())
    }

    pub fn pulps<S: RecordStore>(store: &S, filter: &PulpFilter) -> AppResult<()> {
        let listing = store.list_pulps(filter)?;
        if listing.results.is_empty() {
            info("No pulp samples found.");
            return Ok(());
        }

        print!("{}", pulp_table(&listing.results).render());
        println!("\n{}", footer(&listing));
        Ok(())
    }

    pub fn materials<S: RecordStore>(store: &S) -> AppResult<()> {
        let materials = store.list_materials()?;
        if materials.is_empty() {
            info("No materials defined. Add one with `material add`.");
            return Ok(());
        }

        print!("{}", material_table(&materials).render());
        Ok(())
    }

    pub fn show_paper<S: RecordStore>(store: &S, id: i64) -> AppResult<()> {
        let p = store.get_paper(id)?;
        let catalog = MaterialCatalog::from_materials(&store.list_materials()?);

        header(format!("Paper #{} (roll {})", p.id, p.roll_number));
        line("date", &p.date);
        line(
            "sampling",
            &format!("{} → {}", p.sampling_start_time, p.sampling_end_time),
        );
        line("responsible_person", &p.responsible_person);
        line(
            "shift",
            &colorize_shift(p.shift.map(|s| s.to_db_str()).unwrap_or("-")),
        );
        line(
            "paper_type",
            p.paper_type.map(|t| t.label()).unwrap_or("-"),
        );
        line(
            "profile",
            &p.profile.map(|pr| pr.label()).unwrap_or_else(|| "-".into()),
        );
        line("burst_test", &p.burst_test);
        line("tearing_time", &p.tearing_time);
        line("calender_applied", if p.calender_applied { "yes" } else { "no" });

        for f in PaperField::ALL {
            line(f.name(), &format_opt(p.value(f)));
        }

        println!();
        if p.material_usage.is_empty() {
            line("materials", "-");
        }
        for (id, entry) in &p.material_usage {
            let mut detail = format_number(entry.amount.unwrap_or(0.0));
            if !entry.brand.is_empty() {
                detail.push_str(&format!("  brand: {}", entry.brand));
            }
            if !entry.note.is_empty() {
                detail.push_str(&format!("  note: {}", entry.note));
            }
            line(&catalog.display_name(id), &detail);
        }

        println!();
        line("created_at", &p.created_at);
        line("last_updated", &p.last_updated);
        Ok(())
    }

    pub fn show_pulp<S: RecordStore>(store: &S, id: i64) -> AppResult<()> {
        let p = store.get_pulp(id)?;

        header(format!("Pulp sample #{}", p.id));
        line("roll_number", p.roll().unwrap_or("-"));
        line("lower_sampling_time", &p.lower_sampling_time);
        for f in PulpField::ALL {
            line(f.name(), &format_opt(p.value(f)));
        }

        println!();
        line("created_at", &p.created_at);
        line("last_updated", &p.last_updated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usage::UsageEntry;

    #[test]
    fn paper_rows_show_gaps_and_usage_summary() {
        let mut p = PaperRecord {
            id: 7,
            roll_number: "1201".into(),
            burst_test: "3.4 kPa".into(),
            ..Default::default()
        };
        p.material_usage
            .insert("1".into(), UsageEntry::with_amount(3.5));
        let catalog: MaterialCatalog = [("1".to_string(), "Starch".to_string())]
            .into_iter()
            .collect();

        let table = paper_table(&[p], &catalog);
        let row = &table.rows[0];
        assert_eq!(row[3], "1201");
        assert_eq!(row[5], "-");
        assert_eq!(row[7], "3.4");
        assert_eq!(row[10], "Starch: 3.5");
    }
}
