use super::paper::mean_of;
use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// One pulp-stream sample.
///
/// `roll_number` is a by-value association with a paper record, not a key:
/// nothing guarantees a paper with the same roll exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PulpRecord {
    pub id: i64,
    pub roll_number: Option<String>,
    pub lower_sampling_time: String,

    // lower section
    pub down_pulp_count: Option<f64>,
    pub down_pulp_freeness: Option<f64>,
    pub lower_headbox_freeness: Option<f64>,
    pub lower_ph: Option<f64>,
    pub lower_pulp_temperature: Option<f64>,
    pub lower_water_filter: Option<f64>,

    // upper section
    pub upper_headbox_consistency: Option<f64>,
    pub upper_headbox_freeness: Option<f64>,
    pub upper_ph: Option<f64>,
    pub upper_pulp_temperature: Option<f64>,
    pub upper_water_filter: Option<f64>,

    pub pond8_consistency: Option<f64>,
    pub curtain_consistency: Option<f64>,
    pub thickener_consistency: Option<f64>,

    pub created_at: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PulpField {
    DownPulpCount,
    DownPulpFreeness,
    LowerHeadboxFreeness,
    LowerPh,
    LowerPulpTemperature,
    LowerWaterFilter,
    UpperHeadboxConsistency,
    UpperHeadboxFreeness,
    UpperPh,
    UpperPulpTemperature,
    UpperWaterFilter,
    Pond8Consistency,
    CurtainConsistency,
    ThickenerConsistency,
    /// mean of lower and upper pH
    PhAvg,
}

impl PulpField {
    pub const ALL: [PulpField; 15] = [
        PulpField::DownPulpCount,
        PulpField::DownPulpFreeness,
        PulpField::LowerHeadboxFreeness,
        PulpField::LowerPh,
        PulpField::LowerPulpTemperature,
        PulpField::LowerWaterFilter,
        PulpField::UpperHeadboxConsistency,
        PulpField::UpperHeadboxFreeness,
        PulpField::UpperPh,
        PulpField::UpperPulpTemperature,
        PulpField::UpperWaterFilter,
        PulpField::Pond8Consistency,
        PulpField::CurtainConsistency,
        PulpField::ThickenerConsistency,
        PulpField::PhAvg,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PulpField::DownPulpCount => "down_pulp_count",
            PulpField::DownPulpFreeness => "down_pulp_freeness",
            PulpField::LowerHeadboxFreeness => "lower_headbox_freeness",
            PulpField::LowerPh => "lower_ph",
            PulpField::LowerPulpTemperature => "lower_pulp_temperature",
            PulpField::LowerWaterFilter => "lower_water_filter",
            PulpField::UpperHeadboxConsistency => "upper_headbox_consistency",
            PulpField::UpperHeadboxFreeness => "upper_headbox_freeness",
            PulpField::UpperPh => "upper_ph",
            PulpField::UpperPulpTemperature => "upper_pulp_temperature",
            PulpField::UpperWaterFilter => "upper_water_filter",
            PulpField::Pond8Consistency => "pond8_consistency",
            PulpField::CurtainConsistency => "curtain_consistency",
            PulpField::ThickenerConsistency => "thickener_consistency",
            PulpField::PhAvg => "ph_avg",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        PulpField::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, PulpField::PhAvg)
    }
}

impl PulpRecord {
    /// Roll number with surrounding whitespace removed; `None` when blank.
    pub fn roll(&self) -> Option<&str> {
        self.roll_number
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    pub fn value(&self, field: PulpField) -> Option<f64> {
        match field {
            PulpField::DownPulpCount => self.down_pulp_count,
            PulpField::DownPulpFreeness => self.down_pulp_freeness,
            PulpField::LowerHeadboxFreeness => self.lower_headbox_freeness,
            PulpField::LowerPh => self.lower_ph,
            PulpField::LowerPulpTemperature => self.lower_pulp_temperature,
            PulpField::LowerWaterFilter => self.lower_water_filter,
            PulpField::UpperHeadboxConsistency => self.upper_headbox_consistency,
            PulpField::UpperHeadboxFreeness => self.upper_headbox_freeness,
            PulpField::UpperPh => self.upper_ph,
            PulpField::UpperPulpTemperature => self.upper_pulp_temperature,
            PulpField::UpperWaterFilter => self.upper_water_filter,
            PulpField::Pond8Consistency => self.pond8_consistency,
            PulpField::CurtainConsistency => self.curtain_consistency,
            PulpField::ThickenerConsistency => self.thickener_consistency,
            PulpField::PhAvg => mean_of(&[self.lower_ph, self.upper_ph]),
        }
    }

    pub fn set_value(&mut self, field: PulpField, value: Option<f64>) -> AppResult<()> {
        let slot = match field {
            PulpField::DownPulpCount => &mut self.down_pulp_count,
            PulpField::DownPulpFreeness => &mut self.down_pulp_freeness,
            PulpField::LowerHeadboxFreeness => &mut self.lower_headbox_freeness,
            PulpField::LowerPh => &mut self.lower_ph,
            PulpField::LowerPulpTemperature => &mut self.lower_pulp_temperature,
            PulpField::LowerWaterFilter => &mut self.lower_water_filter,
            PulpField::UpperHeadboxConsistency => &mut self.upper_headbox_consistency,
            PulpField::UpperHeadboxFreeness => &mut self.upper_headbox_freeness,
            PulpField::UpperPh => &mut self.upper_ph,
            PulpField::UpperPulpTemperature => &mut self.upper_pulp_temperature,
            PulpField::UpperWaterFilter => &mut self.upper_water_filter,
            PulpField::Pond8Consistency => &mut self.pond8_consistency,
            PulpField::CurtainConsistency => &mut self.curtain_consistency,
            PulpField::ThickenerConsistency => &mut self.thickener_consistency,
            PulpField::PhAvg => {
                return Err(AppError::InvalidAssignment(format!(
                    "{} is computed and cannot be set",
                    field.name()
                )));
            }
        };
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ph_average_uses_whichever_sections_are_present() {
        let mut pulp = PulpRecord {
            lower_ph: Some(7.0),
            ..Default::default()
        };
        assert_eq!(pulp.value(PulpField::PhAvg), Some(7.0));

        pulp.upper_ph = Some(7.5);
        assert_eq!(pulp.value(PulpField::PhAvg), Some(7.25));
    }

    #[test]
    fn blank_roll_is_no_roll() {
        let pulp = PulpRecord {
            roll_number: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(pulp.roll(), None);
    }
}
