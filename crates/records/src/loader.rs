use dineroute_common::{DineRouteError, Result};
use serde_json::Value;
use std::path::Path;
use tracing::info;

use crate::record::RawRecord;

/// Read the restaurant dataset: a single JSON array of objects
///
/// A missing or unreadable file is a data source error; anything that is
/// not an array of objects is a data format error.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    info!("Loading restaurant data from: {}", path.display());

    let data = std::fs::read_to_string(path).map_err(|e| {
        DineRouteError::data_source(format!(
            "Could not read restaurant data file {}: {}",
            path.display(),
            e
        ))
    })?;

    let records = parse_records(&data)?;
    info!("Loaded {} restaurant records", records.len());
    Ok(records)
}

/// Parse dataset text already in memory
pub fn parse_records(data: &str) -> Result<Vec<RawRecord>> {
    let value: Value = serde_json::from_str(data).map_err(|e| {
        DineRouteError::data_format(format!("Invalid JSON in restaurant data: {}", e))
    })?;

    let Value::Array(items) = value else {
        return Err(DineRouteError::data_format(
            "Restaurant data must be a JSON array",
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(fields) => Ok(RawRecord::new(fields)),
            other => Err(DineRouteError::data_format(format!(
                "Restaurant entry {} is not an object: {}",
                i, other
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;
    use std::io::Write;

    #[test]
    fn test_load_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name":"Thai Spice"}},{{"name":"Krua Apsorn","rating":4.6}}]"#).unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1].get(Field::Name).and_then(|v| v.as_str()),
            Some("Krua Apsorn")
        );
    }

    #[test]
    fn test_missing_file_is_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DineRouteError::DataSource(_)));
    }

    #[test]
    fn test_malformed_json_is_data_format_error() {
        let err = parse_records("this is not json").unwrap_err();
        assert!(matches!(err, DineRouteError::DataFormat(_)));
    }

    #[test]
    fn test_non_array_top_level_is_data_format_error() {
        let err = parse_records(r#"{"name":"Thai Spice"}"#).unwrap_err();
        assert!(matches!(err, DineRouteError::DataFormat(_)));
    }

    #[test]
    fn test_non_object_entry_is_data_format_error() {
        let err = parse_records(r#"[{"name":"ok"}, 42]"#).unwrap_err();
        assert!(matches!(err, DineRouteError::DataFormat(_)));
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }
}
