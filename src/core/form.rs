//! Form value objects for paper, pulp and material input.
//!
//! A form only holds what the operator typed. `validate()` turns it into a
//! record (or the list of everything wrong with it) without touching storage;
//! `apply_to()` does the same on top of an existing record for edits, where
//! only the fields given are changed.

use crate::core::usage;
use crate::errors::{AppError, AppResult, ValidationError};
use crate::models::material::Material;
use crate::models::paper::{PaperField, PaperRecord};
use crate::models::paper_type::{PaperType, Profile};
use crate::models::pulp::{PulpField, PulpRecord};
use crate::models::shift::Shift;
use crate::models::usage::UsageEntry;
use crate::utils::date::is_lab_date;
use crate::utils::time::normalize_time;

/// Parse a `field=value` argument. The value may be empty (clears the field).
pub fn parse_assignment(raw: &str) -> AppResult<(String, String)> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(AppError::InvalidAssignment(raw.to_string())),
    }
}

/// Parse `id=amount[:brand[:note]]`. An empty amount selects the material
/// without a value.
pub fn parse_usage(raw: &str) -> AppResult<(String, UsageEntry)> {
    let invalid = || AppError::InvalidUsage(raw.to_string());

    let (id, rest) = raw.split_once('=').ok_or_else(invalid)?;
    let id = id.trim();
    if id.is_empty() {
        return Err(invalid());
    }

    let mut parts = rest.splitn(3, ':');
    let amount = match parts.next().map(str::trim).unwrap_or_default() {
        "" => None,
        a => Some(a.parse::<f64>().map_err(|_| invalid())?),
    };
    if amount.is_some_and(|a| !a.is_finite()) {
        return Err(invalid());
    }
    let brand = parts.next().map(str::trim).unwrap_or_default();
    let note = parts.next().map(str::trim).unwrap_or_default();

    Ok((id.to_string(), UsageEntry::new(amount, brand, note)))
}

fn parse_reading(raw: &str) -> Result<Option<f64>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(format!("'{}' is not a number", raw)),
    }
}

fn required(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "is required"));
    }
}

fn check_time(errors: &mut Vec<ValidationError>, field: &'static str, value: &mut String) {
    if value.trim().is_empty() {
        return;
    }
    match normalize_time(value) {
        Some(t) => *value = t,
        None => errors.push(ValidationError::new(field, format!("'{}' is not HH:MM", value))),
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaperForm {
    pub date: Option<String>,
    pub sampling_start_time: Option<String>,
    pub sampling_end_time: Option<String>,
    pub roll_number: Option<String>,
    pub responsible_person: Option<String>,
    /// `day`/`night`; an empty string clears it
    pub shift: Option<String>,
    pub paper_type: Option<String>,
    pub profile: Option<String>,
    pub burst_test: Option<String>,
    pub tearing_time: Option<String>,
    pub calender_applied: Option<bool>,
    /// `field=value` readings, see `PaperField`
    pub readings: Vec<(String, String)>,
    pub usage: Vec<(String, UsageEntry)>,
    pub drop_usage: Vec<String>,
}

impl PaperForm {
    pub fn validate(&self) -> Result<PaperRecord, Vec<ValidationError>> {
        self.apply_to(PaperRecord::default())
    }

    pub fn apply_to(&self, mut paper: PaperRecord) -> Result<PaperRecord, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let texts = [
            (&self.date, &mut paper.date),
            (&self.sampling_start_time, &mut paper.sampling_start_time),
            (&self.sampling_end_time, &mut paper.sampling_end_time),
            (&self.roll_number, &mut paper.roll_number),
            (&self.responsible_person, &mut paper.responsible_person),
            (&self.burst_test, &mut paper.burst_test),
            (&self.tearing_time, &mut paper.tearing_time),
        ];
        for (given, slot) in texts {
            if let Some(v) = given {
                *slot = v.trim().to_string();
            }
        }

        if let Some(raw) = &self.shift {
            paper.shift = match raw.trim() {
                "" => None,
                s => match Shift::from_code(s) {
                    Some(shift) => Some(shift),
                    None => {
                        errors.push(ValidationError::new(
                            "shift",
                            format!("'{}' is not day or night", s),
                        ));
                        paper.shift
                    }
                },
            };
        }
        if let Some(raw) = &self.paper_type {
            paper.paper_type = match raw.trim() {
                "" => None,
                s => match PaperType::from_code(s) {
                    Some(t) => Some(t),
                    None => {
                        errors.push(ValidationError::new(
                            "paper_type",
                            format!("unknown type '{}'", s),
                        ));
                        paper.paper_type
                    }
                },
            };
        }
        if let Some(raw) = &self.profile {
            paper.profile = match raw.trim() {
                "" => None,
                s => match Profile::from_db_str(s) {
                    Some(p) => Some(p),
                    None => {
                        errors.push(ValidationError::new(
                            "profile",
                            format!("'{}' is not 1..5", s),
                        ));
                        paper.profile
                    }
                },
            };
        }
        if let Some(calendered) = self.calender_applied {
            paper.calender_applied = calendered;
        }

        for (name, raw) in &self.readings {
            let Some(field) = PaperField::from_name(name) else {
                errors.push(ValidationError::new(
                    "readings",
                    format!("unknown paper field '{}'", name),
                ));
                continue;
            };
            match parse_reading(raw) {
                Ok(v) => {
                    if let Err(e) = paper.set_value(field, v) {
                        errors.push(ValidationError::new("readings", e.to_string()));
                    }
                }
                Err(msg) => errors.push(ValidationError::new(
                    "readings",
                    format!("{}: {}", name, msg),
                )),
            }
        }

        for (id, entry) in &self.usage {
            paper.material_usage.insert(id.clone(), entry.clone());
        }
        for id in &self.drop_usage {
            paper.material_usage.remove(id.trim());
        }
        paper.material_usage = usage::build_for_save(&paper.material_usage);

        // checks on the merged record
        required(&mut errors, "roll_number", &paper.roll_number);
        required(&mut errors, "responsible_person", &paper.responsible_person);
        required(&mut errors, "date", &paper.date);
        if !paper.date.is_empty() && !is_lab_date(&paper.date) {
            errors.push(ValidationError::new(
                "date",
                format!("'{}' is not YYYY-MM-DD", paper.date),
            ));
        }
        required(&mut errors, "sampling_start_time", &paper.sampling_start_time);
        required(&mut errors, "sampling_end_time", &paper.sampling_end_time);
        check_time(&mut errors, "sampling_start_time", &mut paper.sampling_start_time);
        check_time(&mut errors, "sampling_end_time", &mut paper.sampling_end_time);

        if errors.is_empty() { Ok(paper) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PulpForm {
    /// An empty string detaches the sample from any roll.
    pub roll_number: Option<String>,
    pub lower_sampling_time: Option<String>,
    pub readings: Vec<(String, String)>,
}

impl PulpForm {
    pub fn validate(&self) -> Result<PulpRecord, Vec<ValidationError>> {
        self.apply_to(PulpRecord::default())
    }

    pub fn apply_to(&self, mut pulp: PulpRecord) -> Result<PulpRecord, Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(roll) = &self.roll_number {
            let roll = roll.trim();
            pulp.roll_number = (!roll.is_empty()).then(|| roll.to_string());
        }
        if let Some(t) = &self.lower_sampling_time {
            pulp.lower_sampling_time = t.trim().to_string();
        }

        for (name, raw) in &self.readings {
            let Some(field) = PulpField::from_name(name) else {
                errors.push(ValidationError::new(
                    "readings",
                    format!("unknown pulp field '{}'", name),
                ));
                continue;
            };
            match parse_reading(raw) {
                Ok(v) => {
                    if let Err(e) = pulp.set_value(field, v) {
                        errors.push(ValidationError::new("readings", e.to_string()));
                    }
                }
                Err(msg) => errors.push(ValidationError::new(
                    "readings",
                    format!("{}: {}", name, msg),
                )),
            }
        }

        required(&mut errors, "lower_sampling_time", &pulp.lower_sampling_time);
        check_time(&mut errors, "lower_sampling_time", &mut pulp.lower_sampling_time);

        if errors.is_empty() { Ok(pulp) } else { Err(errors) }
    }
}

pub const MATERIAL_NAME_MAX: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct MaterialForm {
    pub name: Option<String>,
    /// An empty string removes the description.
    pub description: Option<String>,
}

impl MaterialForm {
    pub fn validate(&self) -> Result<Material, Vec<ValidationError>> {
        self.apply_to(Material::default())
    }

    pub fn apply_to(&self, mut material: Material) -> Result<Material, Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(name) = &self.name {
            material.name = name.trim().to_string();
        }
        if let Some(desc) = &self.description {
            let desc = desc.trim();
            material.description = (!desc.is_empty()).then(|| desc.to_string());
        }

        required(&mut errors, "name", &material.name);
        if material.name.chars().count() > MATERIAL_NAME_MAX {
            errors.push(ValidationError::new(
                "name",
                format!("longer than {} characters", MATERIAL_NAME_MAX),
            ));
        }

        if errors.is_empty() { Ok(material) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_paper() -> PaperForm {
        PaperForm {
            date: Some("1403-05-12".into()),
            sampling_start_time: Some("8:00".into()),
            sampling_end_time: Some("08:45".into()),
            roll_number: Some(" 1201 ".into()),
            responsible_person: Some("Sara".into()),
            ..Default::default()
        }
    }

    #[test]
    fn assignments_and_usage_arguments_parse() {
        assert_eq!(
            parse_assignment("humidity=7.5").unwrap(),
            ("humidity".to_string(), "7.5".to_string())
        );
        assert_eq!(parse_assignment("cub=").unwrap().1, "");
        assert!(matches!(parse_assignment("=3"), Err(AppError::InvalidAssignment(_))));
        assert!(parse_assignment("humidity").is_err());

        let (id, e) = parse_usage("12=3.5:Acme:night: batch").unwrap();
        assert_eq!(id, "12");
        assert_eq!(e, UsageEntry::new(Some(3.5), "Acme", "night: batch"));

        let (_, e) = parse_usage("4=").unwrap();
        assert_eq!(e.amount, None);

        assert!(matches!(parse_usage("4=lots"), Err(AppError::InvalidUsage(_))));
        assert!(parse_usage("=2").is_err());
        assert!(parse_usage("4=inf").is_err());
    }

    #[test]
    fn valid_paper_is_normalised() {
        let mut form = minimal_paper();
        form.shift = Some("N".into());
        form.paper_type = Some("wt".into());
        form.profile = Some("2".into());
        form.readings = vec![
            ("humidity".into(), "7.2".into()),
            ("paper_size".into(), "250".into()),
        ];
        form.usage = vec![
            ("3".into(), UsageEntry::with_amount(0.0)),
            ("4".into(), UsageEntry::default()),
        ];

        let paper = form.validate().unwrap();
        assert_eq!(paper.roll_number, "1201");
        assert_eq!(paper.sampling_start_time, "08:00");
        assert_eq!(paper.shift, Some(Shift::Night));
        assert_eq!(paper.paper_type, Some(PaperType::WhiteTopTestLiner));
        assert_eq!(paper.profile.map(|p| p.level()), Some(2));
        assert_eq!(paper.humidity, Some(7.2));
        assert_eq!(paper.paper_size, Some(250));
        // zero is kept, no-amount selections are dropped
        assert_eq!(paper.material_usage.len(), 1);
        assert_eq!(paper.material_usage["3"].amount, Some(0.0));
    }

    #[test]
    fn every_problem_is_reported_at_once() {
        let form = PaperForm {
            date: Some("1403-13-40".into()),
            sampling_start_time: Some("25:00".into()),
            shift: Some("evening".into()),
            readings: vec![
                ("moisture".into(), "7".into()),
                ("cub".into(), "abc".into()),
                ("cct_avg".into(), "3".into()),
                ("number_of_tears".into(), "1.5".into()),
            ],
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        for expected in [
            "shift",
            "readings",
            "roll_number",
            "responsible_person",
            "date",
            "sampling_start_time",
            "sampling_end_time",
        ] {
            assert!(fields.contains(&expected), "missing {expected}: {fields:?}");
        }
        assert_eq!(fields.iter().filter(|f| **f == "readings").count(), 4);
    }

    #[test]
    fn edit_only_touches_given_fields() {
        let mut base = minimal_paper().validate().unwrap();
        base.humidity = Some(6.0);
        base.cub = Some(1.4);
        base.shift = Some(Shift::Day);
        base.material_usage
            .insert("1".into(), UsageEntry::with_amount(2.0));

        let edit = PaperForm {
            readings: vec![("cub".into(), "".into())],
            shift: Some("".into()),
            drop_usage: vec!["1".into()],
            usage: vec![("2".into(), UsageEntry::with_amount(5.0))],
            ..Default::default()
        };
        let edited = edit.apply_to(base.clone()).unwrap();

        assert_eq!(edited.humidity, Some(6.0));
        assert_eq!(edited.cub, None);
        assert_eq!(edited.shift, None);
        assert_eq!(edited.roll_number, base.roll_number);
        assert!(!edited.material_usage.contains_key("1"));
        assert_eq!(edited.material_usage["2"].amount, Some(5.0));
    }

    #[test]
    fn pulp_requires_sampling_time_and_known_fields() {
        let ok = PulpForm {
            roll_number: Some("  ".into()),
            lower_sampling_time: Some("9:30".into()),
            readings: vec![("lower_ph".into(), "7.1".into())],
        }
        .validate()
        .unwrap();
        assert_eq!(ok.roll_number, None);
        assert_eq!(ok.lower_sampling_time, "09:30");
        assert_eq!(ok.lower_ph, Some(7.1));

        let errors = PulpForm {
            readings: vec![
                ("humidity".into(), "1".into()),
                ("ph_avg".into(), "7".into()),
            ],
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn material_name_is_required_and_bounded() {
        assert!(MaterialForm::default().validate().is_err());
        let long = MaterialForm {
            name: Some("x".repeat(MATERIAL_NAME_MAX + 1)),
            ..Default::default()
        };
        assert!(long.validate().is_err());

        let m = MaterialForm {
            name: Some(" Starch ".into()),
            description: Some("".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(m.name, "Starch");
        assert_eq!(m.description, None);
    }
}
