//! JSON exchange format for datasets.
//!
//! ```json
//! { "entries": [ { "label": "...", "category": "...", "power": 0.5, "valence": 0.1 } ],
//!   "associations": [ { "src": "...", "dst": "...", "relation": "affirms", "weight": 0.8 } ] }
//! ```
//!
//! `associations` is optional; `entries` must be present and an array.

use std::collections::BTreeSet;

use rand::Rng;
use serde_json::Value;

use crate::category::Category;
use crate::error::{FormatError, Result};
use crate::model::{Association, Dataset, Entry, Relation};

const SAMPLE_JSON: &str = include_str!("../data/sample.json");

/// Parse and validate a dataset.
pub fn import_json(json: &str) -> Result<Dataset> {
    let mut value: Value = serde_json::from_str(json)?;

    if !matches!(value.get("entries"), Some(Value::Array(_))) {
        return Err(FormatError::MissingEntries);
    }
    // `null` associations mean the same as a missing field.
    if let Some(obj) = value.as_object_mut()
        && obj.get("associations").is_some_and(Value::is_null)
    {
        obj.remove("associations");
    }

    Ok(serde_json::from_value(value)?)
}

/// Relation names in `json` that decode to the `associates_with` fallback.
/// Unparseable input yields an empty set.
pub fn unknown_relations(json: &str) -> BTreeSet<String> {
    let Ok(value) = serde_json::from_str::<Value>(json) else {
        return BTreeSet::new();
    };
    value
        .get("associations")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|a| a.get("relation")?.as_str())
        .filter(|name| Relation::from_name(name).is_none())
        .map(str::to_string)
        .collect()
}

/// Pretty-printed JSON.
pub fn export_json(dataset: &Dataset) -> Result<String> {
    Ok(serde_json::to_string_pretty(dataset)?)
}

/// JSON Schema describing the exchange format.
pub fn dataset_schema() -> Value {
    schemars::schema_for!(Dataset).into()
}

/// Built-in demo dataset.
pub fn sample_dataset() -> Result<Dataset> {
    import_json(SAMPLE_JSON)
}

/// Random dataset with `n` entries and roughly `n` associations, for demos
/// and benchmarks. Attribute values are rounded to two decimals.
pub fn synthetic_dataset(n: usize, rng: &mut impl Rng) -> Dataset {
    let round2 = |v: f64| (v * 100.0).round() / 100.0;

    let entries: Vec<Entry> = (0..n)
        .map(|i| {
            let category = Category::ALL[rng.random_range(0..Category::ALL.len())];
            Entry::new(
                &format!("Entry {:03}", i + 1),
                category,
                round2(rng.random_range(0.0..=1.0)),
                round2(rng.random_range(-1.0..=1.0)),
            )
        })
        .collect();

    let mut associations = Vec::new();
    if n >= 2 {
        for _ in 0..n {
            let src = rng.random_range(0..n);
            let dst = rng.random_range(0..n);
            if src == dst {
                continue;
            }
            let relation = Relation::ALL[rng.random_range(0..Relation::ALL.len())];
            associations.push(Association::new(
                &entries[src].label,
                &entries[dst].label,
                relation,
                round2(rng.random_range(0.1..=1.0)),
            ));
        }
    }

    Dataset::new(entries, associations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_import_minimal() {
        let ds = import_json(
            r#"{"entries":[{"label":"Work","category":"Accomplishments","power":0.8,"valence":0.5}]}"#,
        )
        .unwrap();
        assert_eq!(ds.entries.len(), 1);
        assert!(ds.associations.is_empty());
        assert_eq!(ds.entries[0].category, Category::Accomplishments);
    }

    #[test]
    fn test_import_null_associations() {
        let ds = import_json(r#"{"entries":[],"associations":null}"#).unwrap();
        assert!(ds.associations.is_empty());
    }

    #[test]
    fn test_import_missing_entries() {
        assert_eq!(
            import_json(r#"{"associations":[]}"#),
            Err(FormatError::MissingEntries)
        );
        assert_eq!(
            import_json(r#"{"entries":{"label":"x"}}"#),
            Err(FormatError::MissingEntries)
        );
        assert_eq!(import_json("[]"), Err(FormatError::MissingEntries));
    }

    #[test]
    fn test_import_malformed() {
        assert!(matches!(import_json("{"), Err(FormatError::InvalidJson(_))));
        assert!(matches!(
            import_json(r#"{"entries":[{"label":"x","category":"People"}]}"#),
            Err(FormatError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_unknown_relation_kept_as_associates_with() {
        let json = r#"{"entries":[],"associations":[
            {"src":"a","dst":"b","relation":"loves"},
            {"src":"a","dst":"c","relation":"affirms"},
            {"src":"b","dst":"c","relation":"loves"},
            {"src":"c","dst":"a"}]}"#;
        let ds = import_json(json).unwrap();
        assert_eq!(ds.associations.len(), 4);
        assert_eq!(ds.associations[0].relation, Relation::AssociatesWith);
        assert_eq!(ds.associations[1].relation, Relation::Affirms);
        assert_eq!(unknown_relations(json), BTreeSet::from(["loves".to_string()]));
        assert!(unknown_relations("{").is_empty());
    }

    #[test]
    fn test_unknown_category_becomes_other() {
        let ds = import_json(
            r#"{"entries":[{"label":"x","category":"Dreams","power":0.1,"valence":0.1}]}"#,
        )
        .unwrap();
        assert_eq!(ds.entries[0].category, Category::Other);
    }

    #[test]
    fn test_export_reimport() {
        let ds = sample_dataset().unwrap();
        let json = export_json(&ds).unwrap();
        assert_eq!(import_json(&json).unwrap(), ds);
    }

    #[test]
    fn test_sample_is_consistent() {
        let ds = sample_dataset().unwrap();
        assert!(!ds.entries.is_empty());
        for assoc in &ds.associations {
            assert!(ds.entry(&assoc.src).is_some(), "unknown src {}", assoc.src);
            assert!(ds.entry(&assoc.dst).is_some(), "unknown dst {}", assoc.dst);
        }
        for category in Category::ALL {
            assert!(ds.entries.iter().any(|e| e.category == category));
        }
    }

    #[test]
    fn test_synthetic_seeded() {
        let a = synthetic_dataset(25, &mut SmallRng::seed_from_u64(42));
        let b = synthetic_dataset(25, &mut SmallRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.entries.len(), 25);
        assert!(a.associations.len() <= 25);
        for e in &a.entries {
            assert!((0.0..=1.0).contains(&e.power));
            assert!((-1.0..=1.0).contains(&e.valence));
        }
        for assoc in &a.associations {
            assert_ne!(assoc.src, assoc.dst);
        }
    }

    #[test]
    fn test_synthetic_tiny() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert!(synthetic_dataset(0, &mut rng).entries.is_empty());
        assert!(synthetic_dataset(1, &mut rng).associations.is_empty());
    }

    #[test]
    fn test_schema_mentions_fields() {
        let schema = dataset_schema().to_string();
        assert!(schema.contains("entries"));
        assert!(schema.contains("associations"));
        assert!(schema.contains("Life Story"));
    }
}
