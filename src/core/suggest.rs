//! Autocomplete values drawn from existing records.

use crate::core::usage::{self, UsageSuggestion};
use crate::db::store::{PaperFilter, RecordStore};
use crate::errors::AppResult;
use crate::models::material::MaterialCatalog;
use crate::models::paper::PaperRecord;
use crate::ui::messages::{header, info};
use crate::utils::formatting::{bold, format_number};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, Serialize)]
pub struct Suggestions {
    pub responsible_persons: Vec<String>,
    pub material_usage: BTreeMap<String, UsageSuggestion>,
}

impl Suggestions {
    pub fn from_papers(papers: &[PaperRecord]) -> Self {
        let persons: BTreeSet<String> = papers
            .iter()
            .map(|p| p.responsible_person.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            responsible_persons: persons.into_iter().collect(),
            material_usage: usage::suggestions(papers.iter().map(|p| &p.material_usage)),
        }
    }
}

pub struct SuggestLogic;

impl SuggestLogic {
    pub fn collect<S: RecordStore>(store: &S) -> AppResult<Suggestions> {
        let papers = store.list_papers(&PaperFilter::default())?.results;
        Ok(Suggestions::from_papers(&papers))
    }

    pub fn print<S: RecordStore>(store: &S, json: bool) -> AppResult<()> {
        let s = Self::collect(store)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&s)?);
            return Ok(());
        }

        if s.responsible_persons.is_empty() && s.material_usage.is_empty() {
            info("Nothing to suggest yet: no paper records.");
            return Ok(());
        }

        let catalog = MaterialCatalog::from_materials(&store.list_materials()?);

        header("Responsible persons");
        for p in &s.responsible_persons {
            println!("  {}", p);
        }

        println!();
        header("Material usage");
        for (id, m) in &s.material_usage {
            let amounts: Vec<String> = m.amounts.iter().map(|a| format_number(*a)).collect();
            println!(
                "  {} amounts: [{}] brands: [{}]",
                bold(&catalog.display_name(id)),
                amounts.join(", "),
                m.brands.join(", ")
            );
        }
        Ok(())
    }
}
