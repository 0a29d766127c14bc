use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metadata::{build_metadata, Metadata};
use crate::record::{Field, RawRecord, TextDefault};

/// Placeholder shown for missing values
pub const NOT_AVAILABLE: &str = "N/A";

/// Display text plus storable metadata derived from one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    /// Multi-line human-readable description, never empty
    pub text: String,

    /// Scalar metadata for the fixed metadata fields
    pub metadata: Metadata,
}

/// Normalize a raw record. Missing fields never fail, they render as `N/A`.
pub fn to_document(record: &RawRecord) -> NormalizedDocument {
    let field = |f: Field| display_field(record, f);

    let mut lines = vec![
        format!("Name: {}", field(Field::Name)),
        format!("Category: {}", field(Field::Category)),
        format!("Address: {}", field(Field::Address)),
        format!(
            "Rating: {} ({} reviews)",
            field(Field::Rating),
            field(Field::ReviewsCount)
        ),
        "Opening Hours:".to_string(),
    ];
    lines.extend(opening_hours(record));
    lines.extend([
        format!("Current Status: {}", field(Field::OpenHoursUpdated)),
        format!("Phone: {}", field(Field::PhoneNumber)),
        format!("Website: {}", field(Field::Website)),
        format!("Price Range: {}", field(Field::PriceRange)),
        format!("Services: {}", field(Field::Services)),
        format!(
            "Location: Lat {}, Lon {}",
            field(Field::Latitude),
            field(Field::Longitude)
        ),
    ]);

    NormalizedDocument {
        text: lines.join("\n"),
        metadata: build_metadata(record),
    }
}

fn display_field(record: &RawRecord, field: Field) -> String {
    match record.get(field) {
        Some(value) => display_value(value),
        None => match field.text_default() {
            TextDefault::NotAvailable => NOT_AVAILABLE.to_string(),
            TextDefault::Zero => "0".to_string(),
            TextDefault::Omitted => String::new(),
        },
    }
}

/// One `day: hours` line per schedule entry; nothing when there is no schedule
fn opening_hours(record: &RawRecord) -> Vec<String> {
    match record.get(Field::OpenHours) {
        Some(Value::Object(days)) => days
            .iter()
            .map(|(day, hours)| format!("{}: {}", day, display_value(hours)))
            .collect(),
        Some(other) => {
            let rendered = display_value(other);
            if rendered.is_empty() {
                Vec::new()
            } else {
                vec![rendered]
            }
        }
        None => Vec::new(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => NOT_AVAILABLE.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataValue;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_thai_spice_scenario() {
        let doc = to_document(&record(json!({
            "name": "Thai Spice",
            "category": "Thai",
            "rating": 4.5,
            "reviews_count": 120,
            "price_range": "$$"
        })));

        assert!(doc.text.contains("Thai Spice"));
        assert!(doc.text.contains("4.5"));
        assert!(doc.text.contains("Rating: 4.5 (120 reviews)"));

        let expected: Metadata = [
            ("name", MetadataValue::from("Thai Spice")),
            ("category", MetadataValue::from("Thai")),
            ("rating", serde_json::from_value(json!(4.5)).unwrap()),
            ("reviews_count", MetadataValue::from(120)),
            ("price_range", MetadataValue::from("$$")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        assert_eq!(doc.metadata, expected);
    }

    #[test]
    fn test_empty_record_renders_placeholders() {
        let doc = to_document(&RawRecord::default());

        assert!(!doc.text.is_empty());
        assert!(doc.text.starts_with("Name: N/A\n"));
        assert!(doc.text.contains("Rating: N/A (0 reviews)"));
        assert!(doc.text.contains("Opening Hours:\nCurrent Status: N/A"));
        assert!(doc.text.ends_with("Location: Lat N/A, Lon N/A"));
    }

    #[test]
    fn test_opening_hours_keep_source_order() {
        let doc = to_document(&record(json!({
            "name": "Jay Fai",
            "open_hours": {
                "Wednesday": "9AM-7PM",
                "Monday": "Closed",
                "Saturday": ["9AM-12PM", "1PM-7PM"]
            }
        })));

        assert!(doc.text.contains(
            "Opening Hours:\nWednesday: 9AM-7PM\nMonday: Closed\nSaturday: 9AM-12PM, 1PM-7PM\nCurrent Status:"
        ));
    }

    #[test]
    fn test_lists_and_coordinates() {
        let doc = to_document(&record(json!({
            "name": "Raan Jay Fai",
            "services_provided": ["Dine-in", "Takeaway"],
            "lat": 13.7527,
            "lon": 100.5045,
            "phone_number": "+66 2 039 0010"
        })));

        assert!(doc.text.contains("Services: Dine-in, Takeaway"));
        assert!(doc.text.contains("Location: Lat 13.7527, Lon 100.5045"));
        assert!(doc.text.contains("Phone: +66 2 039 0010"));
    }

    #[test]
    fn test_non_string_name_is_still_rendered() {
        let doc = to_document(&record(json!({"name": 7, "category": ["Thai", "Seafood"]})));
        assert!(doc.text.contains("Name: 7"));
        assert_eq!(doc.metadata["name"], MetadataValue::from(7));
        assert_eq!(doc.metadata["category"], MetadataValue::from(r#"["Thai","Seafood"]"#));
    }
}
