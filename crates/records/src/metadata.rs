use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::record::{Field, MetadataDefault, RawRecord};

/// Fields copied into metadata, in this order
pub const METADATA_FIELDS: [Field; 5] = [
    Field::Name,
    Field::Category,
    Field::Rating,
    Field::ReviewsCount,
    Field::PriceRange,
];

/// Scalar metadata value
///
/// Lists, objects and nulls have no variant, so they cannot reach storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// Field name -> scalar value
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Coerce any JSON value into a storable scalar
///
/// Missing or null becomes an empty string, scalars pass through, and
/// lists or objects are stored as their JSON text.
pub fn clean_metadata_value(value: Option<&Value>) -> MetadataValue {
    match value {
        None | Some(Value::Null) => MetadataValue::Text(String::new()),
        Some(Value::Bool(b)) => MetadataValue::Bool(*b),
        Some(Value::Number(n)) => MetadataValue::Number(n.clone()),
        Some(Value::String(s)) => MetadataValue::Text(s.clone()),
        Some(other @ (Value::Array(_) | Value::Object(_))) => {
            MetadataValue::Text(other.to_string())
        }
    }
}

pub(crate) fn build_metadata(record: &RawRecord) -> Metadata {
    METADATA_FIELDS
        .iter()
        .map(|&field| {
            let value = match field.metadata_default() {
                MetadataDefault::Zero if !record.has_key(field) => MetadataValue::from(0),
                _ => clean_metadata_value(record.get(field)),
            };
            (field.key().to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn is_scalar(value: &MetadataValue) -> bool {
        let json = serde_json::to_value(value).unwrap();
        json.is_string() || json.is_number() || json.is_boolean()
    }

    #[test]
    fn test_missing_becomes_empty_string() {
        assert_eq!(clean_metadata_value(None), MetadataValue::Text(String::new()));
        assert_eq!(
            clean_metadata_value(Some(&Value::Null)),
            MetadataValue::Text(String::new())
        );
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(clean_metadata_value(Some(&json!("$$"))), MetadataValue::from("$$"));
        assert_eq!(clean_metadata_value(Some(&json!(120))), MetadataValue::from(120));
        assert_eq!(clean_metadata_value(Some(&json!(true))), MetadataValue::Bool(true));
        assert_eq!(
            clean_metadata_value(Some(&json!(4.5))),
            MetadataValue::Number(Number::from_f64(4.5).unwrap())
        );
    }

    #[test]
    fn test_collections_become_json_text() {
        assert_eq!(
            clean_metadata_value(Some(&json!(["Dine-in", "Takeaway"]))),
            MetadataValue::from(r#"["Dine-in","Takeaway"]"#)
        );
        assert_eq!(
            clean_metadata_value(Some(&json!({"Monday": "9-5"}))),
            MetadataValue::from(r#"{"Monday":"9-5"}"#)
        );
    }

    #[test]
    fn test_every_output_is_scalar() {
        let inputs = [
            json!(null),
            json!("x"),
            json!(-3),
            json!(1.25),
            json!(false),
            json!([1, [2, 3]]),
            json!({"a": {"b": null}}),
        ];
        for input in &inputs {
            assert!(is_scalar(&clean_metadata_value(Some(input))), "{}", input);
        }
    }

    #[test]
    fn test_build_metadata_defaults() {
        let record: RawRecord = serde_json::from_value(json!({"name": "Som Tam Corner"})).unwrap();
        let metadata = build_metadata(&record);

        assert_eq!(metadata.len(), 5);
        assert_eq!(metadata["name"], MetadataValue::from("Som Tam Corner"));
        assert_eq!(metadata["category"], MetadataValue::from(""));
        assert_eq!(metadata["rating"], MetadataValue::from(0));
        assert_eq!(metadata["reviews_count"], MetadataValue::from(0));
        assert_eq!(metadata["price_range"], MetadataValue::from(""));
    }

    #[test]
    fn test_explicit_null_rating_is_empty_not_zero() {
        let record: RawRecord = serde_json::from_value(json!({
            "name": "Krua Apsorn", "rating": null, "reviews_count": null
        }))
        .unwrap();
        let metadata = build_metadata(&record);

        assert_eq!(metadata["rating"], MetadataValue::from(""));
        assert_eq!(metadata["reviews_count"], MetadataValue::from(""));
    }

    #[test]
    fn test_metadata_round_trips_through_json() {
        let record: RawRecord = serde_json::from_value(json!({
            "name": "Baan Suan", "rating": 4.2, "reviews_count": 87, "price_range": "$"
        }))
        .unwrap();
        let metadata = build_metadata(&record);
        let text = serde_json::to_string(&metadata).unwrap();
        let back: Metadata = serde_json::from_str(&text).unwrap();
        assert_eq!(back, metadata);
    }
}
