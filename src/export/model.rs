// src/export/model.rs

use crate::core::usage;
use crate::models::paper::{PaperField, PaperRecord};
use crate::models::pulp::{PulpField, PulpRecord};
use serde::Serialize;

/// Flat paper row for CSV / JSON. `material_usage` carries the stored JSON
/// string so a row can be re-imported as-is.
#[derive(Serialize, Clone, Debug)]
pub struct PaperExport {
    pub id: i64,
    pub date: String,
    pub sampling_start_time: String,
    pub sampling_end_time: String,
    pub roll_number: String,
    pub responsible_person: String,
    pub shift: Option<&'static str>,
    pub paper_type: Option<&'static str>,
    pub profile: Option<u8>,
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
    pub cct1: Option<f64>,
    pub cct2: Option<f64>,
    pub cct3: Option<f64>,
    pub cct4: Option<f64>,
    pub cct5: Option<f64>,
    pub cct_avg: Option<f64>,
    pub rct1: Option<f64>,
    pub rct2: Option<f64>,
    pub rct3: Option<f64>,
    pub rct4: Option<f64>,
    pub rct5: Option<f64>,
    pub rct_avg: Option<f64>,
    pub tearing_time: String,
    pub calender_applied: bool,
    pub machine_speed: Option<f64>,
    pub material_usage: String,
    pub created_at: String,
    pub last_updated: String,
}

impl From<&PaperRecord> for PaperExport {
    fn from(p: &PaperRecord) -> Self {
        let [cct1, cct2, cct3, cct4, cct5] = p.cct;
        let [rct1, rct2, rct3, rct4, rct5] = p.rct;
        Self {
            id: p.id,
            date: p.date.clone(),
            sampling_start_time: p.sampling_start_time.clone(),
            sampling_end_time: p.sampling_end_time.clone(),
            roll_number: p.roll_number.clone(),
            responsible_person: p.responsible_person.clone(),
            shift: p.shift.map(|s| s.to_db_str()),
            paper_type: p.paper_type.map(|t| t.to_db_str()),
            profile: p.profile.map(|pr| pr.level()),
            paper_size: p.paper_size,
            number_of_tears: p.number_of_tears,
            real_grammage: p.real_grammage,
            humidity: p.humidity,
            ash_percentage: p.ash_percentage,
            cub: p.cub,
            density_valve: p.density_valve,
            diluting_valve: p.diluting_valve,
            cylinder_temperature_before_press: p.cylinder_temperature_before_press,
            cylinder_temperature_after_press: p.cylinder_temperature_after_press,
            burst_test: p.burst_test.clone(),
            tensile_strength_md: p.tensile_strength_md,
            tensile_strength_cd: p.tensile_strength_cd,
            cct1,
            cct2,
            cct3,
            cct4,
            cct5,
            cct_avg: p.value(PaperField::CctAvg),
            rct1,
            rct2,
            rct3,
            rct4,
            rct5,
            rct_avg: p.value(PaperField::RctAvg),
            tearing_time: p.tearing_time.clone(),
            calender_applied: p.calender_applied,
            machine_speed: p.machine_speed,
            material_usage: usage::encode_for_save(&p.material_usage),
            created_at: p.created_at.clone(),
            last_updated: p.last_updated.clone(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct PulpExport {
    pub id: i64,
    pub roll_number: Option<String>,
    pub lower_sampling_time: String,
    pub down_pulp_count: Option<f64>,
    pub down_pulp_freeness: Option<f64>,
    pub lower_headbox_freeness: Option<f64>,
    pub lower_ph: Option<f64>,
    pub lower_pulp_temperature: Option<f64>,
    pub lower_water_filter: Option<f64>,
    pub upper_headbox_consistency: Option<f64>,
    pub upper_headbox_freeness: Option<f64>,
    pub upper_ph: Option<f64>,
    pub upper_pulp_temperature: Option<f64>,
    pub upper_water_filter: Option<f64>,
    pub pond8_consistency: Option<f64>,
    pub curtain_consistency: Option<f64>,
    pub thickener_consistency: Option<f64>,
    pub ph_avg: Option<f64>,
    pub created_at: String,
    pub last_updated: String,
}

impl From<&PulpRecord> for PulpExport {
    fn from(p: &PulpRecord) -> Self {
        Self {
            id: p.id,
            roll_number: p.roll().map(str::to_string),
            lower_sampling_time: p.lower_sampling_time.clone(),
            down_pulp_count: p.down_pulp_count,
            down_pulp_freeness: p.down_pulp_freeness,
            lower_headbox_freeness: p.lower_headbox_freeness,
            lower_ph: p.lower_ph,
            lower_pulp_temperature: p.lower_pulp_temperature,
            lower_water_filter: p.lower_water_filter,
            upper_headbox_consistency: p.upper_headbox_consistency,
            upper_headbox_freeness: p.upper_headbox_freeness,
            upper_ph: p.upper_ph,
            upper_pulp_temperature: p.upper_pulp_temperature,
            upper_water_filter: p.upper_water_filter,
            pond8_consistency: p.pond8_consistency,
            curtain_consistency: p.curtain_consistency,
            thickener_consistency: p.thickener_consistency,
            ph_avg: p.value(PulpField::PhAvg),
            created_at: p.created_at.clone(),
            last_updated: p.last_updated.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usage::UsageEntry;

    #[test]
    fn paper_row_flattens_readings_and_encodes_usage() {
        let mut p = PaperRecord {
            cct: [Some(2.0), Some(4.0), None, None, None],
            ..Default::default()
        };
        p.material_usage
            .insert("5".into(), UsageEntry::with_amount(1.0));
        p.material_usage.insert("6".into(), UsageEntry::default());

        let row = PaperExport::from(&p);
        assert_eq!(row.cct2, Some(4.0));
        assert_eq!(row.cct_avg, Some(3.0));
        assert_eq!(row.material_usage, r#"{"5":{"brand":"","text":"","val":1.0}}"#);
    }
}
