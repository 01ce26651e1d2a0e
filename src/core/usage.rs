//! Material-usage codec.
//!
//! Stored form is a JSON object keyed by material id:
//! `{"12":{"val":3.5,"brand":"Acme","text":"night batch"}}`.
//! Older rows hold the legacy `id:amount,id:amount` form, which is still read.

use crate::models::material::MaterialCatalog;
use crate::models::usage::{MaterialUsage, UsageEntry};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Encode every entry, including the ones without an amount (`val` omitted).
pub fn encode(usage: &MaterialUsage) -> String {
    let mut root = Map::new();

    for (id, entry) in usage {
        let mut obj = Map::new();
        if let Some(n) = entry.amount.and_then(Number::from_f64) {
            obj.insert("val".into(), Value::Number(n));
        }
        obj.insert("brand".into(), Value::String(entry.brand.clone()));
        obj.insert("text".into(), Value::String(entry.note.clone()));
        root.insert(id.clone(), Value::Object(obj));
    }

    Value::Object(root).to_string()
}

/// Keep only the entries that carry an amount. `0` counts as an amount.
pub fn build_for_save(usage: &MaterialUsage) -> MaterialUsage {
    usage
        .iter()
        .filter(|(_, e)| e.amount.is_some())
        .map(|(id, e)| (id.clone(), e.clone()))
        .collect()
}

/// The form written to storage.
pub fn encode_for_save(usage: &MaterialUsage) -> String {
    encode(&build_for_save(usage))
}

/// Decode a stored value. Never fails: anything unreadable becomes an empty map.
pub fn decode(raw: Option<&str>) -> MaterialUsage {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return MaterialUsage::new(),
    };

    decode_json(raw).unwrap_or_else(|| decode_legacy(raw))
}

fn decode_json(raw: &str) -> Option<MaterialUsage> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let root = value.as_object()?;

    let mut out = MaterialUsage::new();
    for (id, data) in root {
        let obj = data.as_object()?;
        let amount = match obj.get("val") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        let text_of = |key: &str| {
            obj.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let id = id.trim();
        if id.is_empty() {
            continue;
        }
        out.insert(
            id.to_string(),
            UsageEntry::new(amount, text_of("brand"), text_of("text")),
        );
    }
    Some(out)
}

fn decode_legacy(raw: &str) -> MaterialUsage {
    let mut out = MaterialUsage::new();

    for pair in raw.split(',') {
        let mut parts = pair.split(':');
        let id = parts.next().map(str::trim).unwrap_or_default();
        let amount = parts.next().map(str::trim).unwrap_or_default();

        if id.is_empty() || amount.is_empty() {
            continue;
        }
        if let Ok(v) = amount.parse::<f64>() {
            out.insert(id.to_string(), UsageEntry::with_amount(v));
        }
    }

    out
}

/// One-line summary used by list views: `Starch: 3.5, Material 77: 0`.
pub fn format_usage(usage: &MaterialUsage, catalog: &MaterialCatalog) -> String {
    usage
        .iter()
        .map(|(id, e)| {
            format!(
                "{}: {}",
                catalog.display_name(id),
                crate::utils::formatting::format_number(e.amount.unwrap_or(0.0))
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Distinct amounts and brands already used for a material.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageSuggestion {
    pub amounts: Vec<f64>,
    pub brands: Vec<String>,
}

/// Collect per-material autocomplete values from existing records.
pub fn suggestions<'a, I>(usages: I) -> BTreeMap<String, UsageSuggestion>
where
    I: IntoIterator<Item = &'a MaterialUsage>,
{
    let mut out: BTreeMap<String, UsageSuggestion> = BTreeMap::new();

    for usage in usages {
        for (id, entry) in usage {
            let slot = out.entry(id.clone()).or_default();
            if let Some(a) = entry.amount {
                slot.amounts.push(a);
            }
            let brand = entry.brand.trim();
            if !brand.is_empty() {
                slot.brands.push(brand.to_string());
            }
        }
    }

    for s in out.values_mut() {
        s.amounts.sort_by(f64::total_cmp);
        s.amounts.dedup();
        s.brands.sort();
        s.brands.dedup();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(entries: &[(&str, Option<f64>, &str, &str)]) -> MaterialUsage {
        entries
            .iter()
            .map(|(id, a, b, n)| (id.to_string(), UsageEntry::new(*a, *b, *n)))
            .collect()
    }

    #[test]
    fn round_trip_keeps_amount_brand_and_note() {
        let m = usage(&[
            ("1", Some(3.5), "Acme", "night batch"),
            ("12", Some(0.0), "", ""),
            ("7", Some(-1.25), "Ümlaut, \"quoted\"", "a:b,c"),
        ]);
        assert_eq!(decode(Some(&encode(&m))), m);
    }

    #[test]
    fn round_trip_is_exact_for_full_precision_amounts() {
        // xorshift64, fixed seed
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        let mut amounts = vec![971.9863718547629, 1.0715660391465826e-75, 0.1 + 0.2];
        for _ in 0..20_000 {
            let bits = next();
            amounts.push((bits >> 11) as f64 / (1u64 << 53) as f64 * 1000.0);
            let raw = f64::from_bits(next());
            if raw.is_finite() {
                amounts.push(raw);
            }
        }

        for chunk in amounts.chunks(50) {
            let m: MaterialUsage = chunk
                .iter()
                .enumerate()
                .map(|(i, a)| (i.to_string(), UsageEntry::with_amount(*a)))
                .collect();
            let back = decode(Some(&encode(&m)));
            for (id, entry) in &m {
                assert_eq!(
                    back[id].amount.map(f64::to_bits),
                    entry.amount.map(f64::to_bits),
                    "{:?}",
                    entry.amount
                );
            }
        }
    }

    #[test]
    fn json_keys_are_trimmed() {
        let decoded = decode(Some(r#"{" 3 ":{"val":1.5}}"#));
        assert_eq!(decoded.keys().collect::<Vec<_>>(), vec!["3"]);
    }

    #[test]
    fn wire_format_uses_val_brand_text() {
        let m = usage(&[("4", Some(2.0), "B", "T")]);
        assert_eq!(encode(&m), r#"{"4":{"brand":"B","text":"T","val":2.0}}"#);
    }

    #[test]
    fn empty_mapping_encodes_to_empty_object() {
        assert_eq!(encode(&MaterialUsage::new()), "{}");
    }

    #[test]
    fn null_amounts_are_dropped_before_save() {
        let selected = usage(&[("m1", None, "x", "")]);
        assert_eq!(encode(&selected), r#"{"m1":{"brand":"x","text":""}}"#);
        assert_eq!(encode_for_save(&selected), "{}");
    }

    #[test]
    fn zero_amount_survives_save_filtering() {
        let selected = usage(&[("m1", Some(0.0), "", ""), ("m2", None, "", "")]);
        let saved = build_for_save(&selected);
        assert_eq!(saved.len(), 1);
        assert_eq!(saved["m1"].amount, Some(0.0));
    }

    #[test]
    fn legacy_pairs_are_read() {
        let decoded = decode(Some("matA:3.5,matB:2"));
        assert_eq!(
            decoded,
            usage(&[("matA", Some(3.5), "", ""), ("matB", Some(2.0), "", "")])
        );
    }

    #[test]
    fn empty_and_garbage_decode_to_empty() {
        assert!(decode(Some("")).is_empty());
        assert!(decode(None).is_empty());
        assert!(decode(Some("not json, not pairs either")).is_empty());
        assert!(decode(Some("{broken")).is_empty());
    }

    #[test]
    fn non_object_entry_falls_back_to_legacy() {
        // valid JSON, but an entry is not an object
        assert!(decode(Some(r#"{"1":5}"#)).is_empty());
        assert!(decode(Some("[1,2]")).is_empty());
    }

    #[test]
    fn json_entry_with_missing_or_null_val_has_no_amount() {
        let decoded = decode(Some(r#"{"3":{"val":null,"brand":"X"},"4":{"text":"n"}}"#));
        assert_eq!(decoded["3"], UsageEntry::new(None, "X", ""));
        assert_eq!(decoded["4"], UsageEntry::new(None, "", "n"));
    }

    #[test]
    fn summary_names_unknown_materials() {
        let catalog: MaterialCatalog = [("1".to_string(), "Starch".to_string())]
            .into_iter()
            .collect();
        let m = usage(&[("1", Some(3.5), "", ""), ("77", None, "", "")]);
        assert_eq!(format_usage(&m, &catalog), "Starch: 3.5, Material 77: 0");
    }

    #[test]
    fn suggestions_are_distinct_and_sorted() {
        let a = usage(&[("1", Some(2.0), " Acme ", "")]);
        let b = usage(&[("1", Some(1.5), "Acme", ""), ("2", None, "", "")]);
        let c = usage(&[("1", Some(2.0), "Zeta", "")]);

        let s = suggestions([&a, &b, &c]);
        assert_eq!(s["1"].amounts, vec![1.5, 2.0]);
        assert_eq!(s["1"].brands, vec!["Acme".to_string(), "Zeta".to_string()]);
        assert!(s["2"].amounts.is_empty());
    }
}
