use super::{
    paper_type::{PaperType, Profile},
    shift::Shift,
    usage::MaterialUsage,
};
use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)").expect("static regex"));

/// One quality-control sample of a produced paper roll.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaperRecord {
    pub id: i64,
    pub date: String,                // ⇔ papers.date (TEXT "YYYY-MM-DD", usually Shamsi)
    pub sampling_start_time: String, // ⇔ papers.sampling_start_time (TEXT "HH:MM")
    pub sampling_end_time: String,   // ⇔ papers.sampling_end_time (TEXT "HH:MM")
    pub roll_number: String,
    pub responsible_person: String,
    pub shift: Option<Shift>,
    pub paper_type: Option<PaperType>,
    pub profile: Option<Profile>,

    pub paper_size: Option<i64>,
    pub number_of_tears: Option<i64>,
    pub real_grammage: Option<f64>,
    pub humidity: Option<f64>,
    pub ash_percentage: Option<f64>,
    pub cub: Option<f64>,

    pub density_valve: Option<f64>,
    pub diluting_valve: Option<f64>,
    pub cylinder_temperature_before_press: Option<f64>,
    pub cylinder_temperature_after_press: Option<f64>,

    pub burst_test: String,
    pub tensile_strength_md: Option<f64>,
    pub tensile_strength_cd: Option<f64>,
    pub cct: [Option<f64>; 5],
    pub rct: [Option<f64>; 5],

    pub tearing_time: String,
    pub calender_applied: bool,
    pub machine_speed: Option<f64>,

    pub material_usage: MaterialUsage,

    pub created_at: String,
    pub last_updated: String,
}

/// Every numeric quantity that can be read off a paper record by name.
///
/// The last three are derived: the CCT/RCT averages and the first number
/// found in the free-text burst test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperField {
    PaperSize,
    NumberOfTears,
    RealGrammage,
    Humidity,
    AshPercentage,
    Cub,
    DensityValve,
    DilutingValve,
    CylinderTemperatureBeforePress,
    CylinderTemperatureAfterPress,
    TensileStrengthMd,
    TensileStrengthCd,
    Cct1,
    Cct2,
    Cct3,
    Cct4,
    Cct5,
    Rct1,
    Rct2,
    Rct3,
    Rct4,
    Rct5,
    MachineSpeed,
    CctAvg,
    RctAvg,
    Burst,
}

impl PaperField {
    pub const ALL: [PaperField; 26] = [
        PaperField::PaperSize,
        PaperField::NumberOfTears,
        PaperField::RealGrammage,
        PaperField::Humidity,
        PaperField::AshPercentage,
        PaperField::Cub,
        PaperField::DensityValve,
        PaperField::DilutingValve,
        PaperField::CylinderTemperatureBeforePress,
        PaperField::CylinderTemperatureAfterPress,
        PaperField::TensileStrengthMd,
        PaperField::TensileStrengthCd,
        PaperField::Cct1,
        PaperField::Cct2,
        PaperField::Cct3,
        PaperField::Cct4,
        PaperField::Cct5,
        PaperField::Rct1,
        PaperField::Rct2,
        PaperField::Rct3,
        PaperField::Rct4,
        PaperField::Rct5,
        PaperField::MachineSpeed,
        PaperField::CctAvg,
        PaperField::RctAvg,
        PaperField::Burst,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PaperField::PaperSize => "paper_size",
            PaperField::NumberOfTears => "number_of_tears",
            PaperField::RealGrammage => "real_grammage",
            PaperField::Humidity => "humidity",
            PaperField::AshPercentage => "ash_percentage",
            PaperField::Cub => "cub",
            PaperField::DensityValve => "density_valve",
            PaperField::DilutingValve => "diluting_valve",
            PaperField::CylinderTemperatureBeforePress => "cylinder_temperature_before_press",
            PaperField::CylinderTemperatureAfterPress => "cylinder_temperature_after_press",
            PaperField::TensileStrengthMd => "tensile_strength_md",
            PaperField::TensileStrengthCd => "tensile_strength_cd",
            PaperField::Cct1 => "cct1",
            PaperField::Cct2 => "cct2",
            PaperField::Cct3 => "cct3",
            PaperField::Cct4 => "cct4",
            PaperField::Cct5 => "cct5",
            PaperField::Rct1 => "rct1",
            PaperField::Rct2 => "rct2",
            PaperField::Rct3 => "rct3",
            PaperField::Rct4 => "rct4",
            PaperField::Rct5 => "rct5",
            PaperField::MachineSpeed => "machine_speed",
            PaperField::CctAvg => "cct_avg",
            PaperField::RctAvg => "rct_avg",
            PaperField::Burst => "burst",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        PaperField::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Derived fields can be charted but not assigned.
    pub fn is_derived(&self) -> bool {
        matches!(
            self,
            PaperField::CctAvg | PaperField::RctAvg | PaperField::Burst
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, PaperField::PaperSize | PaperField::NumberOfTears)
    }
}

/// Mean of the present readings, rounded to two decimals.
pub(crate) fn mean_of(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    let avg = present.iter().sum::<f64>() / present.len() as f64;
    Some((avg * 100.0).round() / 100.0)
}

/// First number embedded in a free-text value such as `"3.2 kPa"`.
pub fn leading_number(text: &str) -> Option<f64> {
    FIRST_NUMBER
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

impl PaperRecord {
    pub fn value(&self, field: PaperField) -> Option<f64> {
        match field {
            PaperField::PaperSize => self.paper_size.map(|v| v as f64),
            PaperField::NumberOfTears => self.number_of_tears.map(|v| v as f64),
            PaperField::RealGrammage => self.real_grammage,
            PaperField::Humidity => self.humidity,
            PaperField::AshPercentage => self.ash_percentage,
            PaperField::Cub => self.cub,
            PaperField::DensityValve => self.density_valve,
            PaperField::DilutingValve => self.diluting_valve,
            PaperField::CylinderTemperatureBeforePress => self.cylinder_temperature_before_press,
            PaperField::CylinderTemperatureAfterPress => self.cylinder_temperature_after_press,
            PaperField::TensileStrengthMd => self.tensile_strength_md,
            PaperField::TensileStrengthCd => self.tensile_strength_cd,
            PaperField::Cct1 => self.cct[0],
            PaperField::Cct2 => self.cct[1],
            PaperField::Cct3 => self.cct[2],
            PaperField::Cct4 => self.cct[3],
            PaperField::Cct5 => self.cct[4],
            PaperField::Rct1 => self.rct[0],
            PaperField::Rct2 => self.rct[1],
            PaperField::Rct3 => self.rct[2],
            PaperField::Rct4 => self.rct[3],
            PaperField::Rct5 => self.rct[4],
            PaperField::MachineSpeed => self.machine_speed,
            PaperField::CctAvg => mean_of(&self.cct),
            PaperField::RctAvg => mean_of(&self.rct),
            PaperField::Burst => leading_number(&self.burst_test),
        }
    }

    /// Assign (or clear, with `None`) a stored numeric field.
    pub fn set_value(&mut self, field: PaperField, value: Option<f64>) -> AppResult<()> {
        if field.is_derived() {
            return Err(AppError::InvalidAssignment(format!(
                "{} is computed and cannot be set",
                field.name()
            )));
        }

        if field.is_integer() {
            let int = match value {
                Some(v) if v.fract() != 0.0 => {
                    return Err(AppError::InvalidAssignment(format!(
                        "{}={} (whole number expected)",
                        field.name(),
                        v
                    )));
                }
                Some(v) => Some(v as i64),
                None => None,
            };
            match field {
                PaperField::PaperSize => self.paper_size = int,
                _ => self.number_of_tears = int,
            }
            return Ok(());
        }

        let slot = match field {
            PaperField::RealGrammage => &mut self.real_grammage,
            PaperField::Humidity => &mut self.humidity,
            PaperField::AshPercentage => &mut self.ash_percentage,
            PaperField::Cub => &mut self.cub,
            PaperField::DensityValve => &mut self.density_valve,
            PaperField::DilutingValve => &mut self.diluting_valve,
            PaperField::CylinderTemperatureBeforePress => {
                &mut self.cylinder_temperature_before_press
            }
            PaperField::CylinderTemperatureAfterPress => &mut self.cylinder_temperature_after_press,
            PaperField::TensileStrengthMd => &mut self.tensile_strength_md,
            PaperField::TensileStrengthCd => &mut self.tensile_strength_cd,
            PaperField::Cct1 => &mut self.cct[0],
            PaperField::Cct2 => &mut self.cct[1],
            PaperField::Cct3 => &mut self.cct[2],
            PaperField::Cct4 => &mut self.cct[3],
            PaperField::Cct5 => &mut self.cct[4],
            PaperField::Rct1 => &mut self.rct[0],
            PaperField::Rct2 => &mut self.rct[1],
            PaperField::Rct3 => &mut self.rct[2],
            PaperField::Rct4 => &mut self.rct[3],
            PaperField::Rct5 => &mut self.rct[4],
            PaperField::MachineSpeed => &mut self.machine_speed,
            // integer and derived fields are handled above
            _ => return Err(AppError::InvalidAssignment(field.name().to_string())),
        };
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_name_resolves_back() {
        for f in PaperField::ALL {
            assert_eq!(PaperField::from_name(f.name()), Some(f));
        }
        assert_eq!(PaperField::from_name("HUMIDITY"), Some(PaperField::Humidity));
        assert_eq!(PaperField::from_name("moisture"), None);
    }

    #[test]
    fn averages_skip_missing_readings() {
        let paper = PaperRecord {
            cct: [Some(1.0), None, Some(2.0), None, Some(2.5)],
            ..Default::default()
        };
        assert_eq!(paper.value(PaperField::CctAvg), Some(1.83));
        assert_eq!(paper.value(PaperField::RctAvg), None);
    }

    #[test]
    fn burst_reads_first_number_in_text() {
        let mut paper = PaperRecord {
            burst_test: "approx 3.25 kPa (retest 3.4)".into(),
            ..Default::default()
        };
        assert_eq!(paper.value(PaperField::Burst), Some(3.25));

        paper.burst_test = "not measured".into();
        assert_eq!(paper.value(PaperField::Burst), None);
    }

    #[test]
    fn set_value_rejects_derived_and_fractional_integers() {
        let mut paper = PaperRecord::default();
        assert!(paper.set_value(PaperField::CctAvg, Some(1.0)).is_err());
        assert!(paper.set_value(PaperField::PaperSize, Some(2.5)).is_err());

        paper.set_value(PaperField::PaperSize, Some(250.0)).unwrap();
        paper.set_value(PaperField::Rct3, Some(1.2)).unwrap();
        assert_eq!(paper.paper_size, Some(250));
        assert_eq!(paper.value(PaperField::Rct3), Some(1.2));

        paper.set_value(PaperField::Rct3, None).unwrap();
        assert_eq!(paper.rct[2], None);
    }
}
