//! Flattening — reduces a nested policy record to a sorted map of dotted leaf paths.
//!
//! Only nested objects are descended into. A sequence is a single leaf whose
//! value is its compact JSON rendering, so `{"drivers": [{"age": 30}]}` yields
//! one path `drivers` and never `drivers[0].age`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Number, Value};

/// A structured policy document. The top level is always a JSON object.
pub type Record = Map<String, Value>;

/// Dotted path → leaf, ordered by path so every emitted list is reproducible.
pub type FlatRecord = BTreeMap<String, Leaf>;

/// A single leaf of a flattened record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Leaf {
    /// String, number, boolean or null. Never an object or array.
    Scalar(Value),
    /// Compact JSON rendering of a sequence, e.g. `["auto","home"]`.
    Sequence(String),
}

impl Leaf {
    /// Numeric view of the leaf. Booleans and numeric-looking strings are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Leaf::Scalar(Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// The underlying JSON number, keeping integer precision.
    pub fn as_json_number(&self) -> Option<&Number> {
        match self {
            Leaf::Scalar(Value::Number(n)) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Scalar(Value::String(s)) => f.write_str(s),
            Leaf::Scalar(value) => write!(f, "{value}"),
            Leaf::Sequence(rendered) => f.write_str(rendered),
        }
    }
}

/// Flattens `record` into dotted leaf paths.
pub fn flatten(record: &Record) -> FlatRecord {
    let mut flat = FlatRecord::new();
    flatten_into(record, "", &mut flat);
    flat
}

fn flatten_into(map: &Record, prefix: &str, out: &mut FlatRecord) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            Value::Object(nested) => flatten_into(nested, &path, out),
            Value::Array(items) => {
                out.insert(path, Leaf::Sequence(render_sequence(items)));
            }
            scalar => {
                out.insert(path, Leaf::Scalar(scalar.clone()));
            }
        }
    }
}

fn render_sequence(items: &[Value]) -> String {
    Value::Array(items.to_vec()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn test_scalar_leaves_get_dotted_paths() {
        let flat = flatten(&record(json!({
            "policy_number": "PA-1001",
            "insured": {
                "name": "Jane Roe",
                "address": { "state": "OH", "zip": "43004" }
            },
            "premium": 1250.5,
            "active": true,
            "agent": null
        })));

        let paths: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(
            paths,
            vec![
                "active",
                "agent",
                "insured.address.state",
                "insured.address.zip",
                "insured.name",
                "policy_number",
                "premium",
            ]
        );
        assert_eq!(flat["insured.address.state"], Leaf::Scalar(json!("OH")));
        assert_eq!(flat["premium"], Leaf::Scalar(json!(1250.5)));
        assert_eq!(flat["active"], Leaf::Scalar(json!(true)));
        assert_eq!(flat["agent"], Leaf::Scalar(Value::Null));
    }

    #[test]
    fn test_sequence_is_a_single_leaf() {
        let flat = flatten(&record(json!({
            "coverages": {
                "lines": ["auto", "umbrella"],
                "drivers": [{ "name": "A", "vehicles": [1, 2] }, { "name": "B" }]
            }
        })));

        assert_eq!(flat.len(), 2);
        assert_eq!(
            flat["coverages.lines"],
            Leaf::Sequence(r#"["auto","umbrella"]"#.to_string())
        );
        assert_eq!(
            flat["coverages.drivers"],
            Leaf::Sequence(r#"[{"name":"A","vehicles":[1,2]},{"name":"B"}]"#.to_string())
        );
    }

    #[test]
    fn test_empty_sequence_still_produces_a_path() {
        let flat = flatten(&record(json!({ "endorsements": [] })));
        assert_eq!(flat["endorsements"], Leaf::Sequence("[]".to_string()));
    }

    #[test]
    fn test_empty_nested_object_contributes_no_paths() {
        let flat = flatten(&record(json!({ "a": {}, "b": { "c": {} }, "d": 1 })));
        assert_eq!(flat.len(), 1);
        assert!(flat.contains_key("d"));
    }

    #[test]
    fn test_empty_record_flattens_to_nothing() {
        assert!(flatten(&Record::new()).is_empty());
    }

    #[test]
    fn test_as_number_ignores_bools_and_strings() {
        assert_eq!(Leaf::Scalar(json!(42)).as_number(), Some(42.0));
        assert_eq!(Leaf::Scalar(json!(-0.5)).as_number(), Some(-0.5));
        assert_eq!(Leaf::Scalar(json!(true)).as_number(), None);
        assert_eq!(Leaf::Scalar(json!("42")).as_number(), None);
        assert_eq!(Leaf::Sequence("[1]".to_string()).as_number(), None);
    }

    #[test]
    fn test_display_strips_string_quotes() {
        assert_eq!(Leaf::Scalar(json!("OH")).to_string(), "OH");
        assert_eq!(Leaf::Scalar(json!(1000)).to_string(), "1000");
        assert_eq!(Leaf::Scalar(Value::Null).to_string(), "null");
        assert_eq!(Leaf::Sequence("[1,2]".to_string()).to_string(), "[1,2]");
    }

    #[test]
    fn test_leaf_serializes_untagged() {
        let scalar = serde_json::to_value(Leaf::Scalar(json!(7))).unwrap();
        let sequence = serde_json::to_value(Leaf::Sequence("[7]".to_string())).unwrap();
        assert_eq!(scalar, json!(7));
        assert_eq!(sequence, json!("[7]"));
    }
}
