use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DataShapeError;

/// Reads the round number of a raw record.
///
/// The round is the grouping key for everything downstream, so a missing or
/// mistyped `event` is reported as a structural error.
pub fn read_event(index: usize, record: &Value) -> Result<u32, DataShapeError> {
    let raw = record
        .get("event")
        .filter(|v| !v.is_null())
        .ok_or(DataShapeError::MissingField {
            index,
            field: "event",
        })?;

    raw.as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| DataShapeError::InvalidField {
            index,
            field: "event",
            message: format!("expected a non-negative round number, got {raw}"),
        })
}

/// Decodes one raw record into its typed wire form.
pub fn decode_record<T: DeserializeOwned>(index: usize, record: Value) -> Result<T, DataShapeError> {
    serde_json::from_value(record).map_err(|e| DataShapeError::InvalidField {
        index,
        field: "record",
        message: e.to_string(),
    })
}

/// Unwraps a required field of an already decoded record.
pub fn require<T>(index: usize, field: &'static str, value: Option<T>) -> Result<T, DataShapeError> {
    value.ok_or(DataShapeError::MissingField { index, field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_read_event_valid() {
        assert_eq!(read_event(0, &json!({"event": 7})), Ok(7));
    }

    #[test]
    fn test_read_event_missing_is_structural() {
        let err = read_event(2, &json!({"finished": true})).unwrap_err();
        assert_eq!(err, DataShapeError::MissingField { index: 2, field: "event" });
        assert!(err.is_structural());

        let err = read_event(2, &json!({"event": null})).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_read_event_wrong_type_is_structural() {
        for bad in [json!({"event": "3"}), json!({"event": -1}), json!({"event": 1.5})] {
            let err = read_event(0, &bad).unwrap_err();
            assert!(matches!(err, DataShapeError::InvalidField { field: "event", .. }));
            assert!(err.is_structural());
        }
    }

    #[test]
    fn test_decode_record_type_mismatch_is_not_structural() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Wire {
            points: Option<i64>,
        }

        let err = decode_record::<Wire>(5, json!({"points": "lots"})).unwrap_err();
        assert!(matches!(err, DataShapeError::InvalidField { index: 5, field: "record", .. }));
        assert!(!err.is_structural());
    }

    #[test]
    fn test_require() {
        assert_eq!(require(0, "x", Some(3)), Ok(3));
        assert_eq!(
            require::<i64>(1, "x", None),
            Err(DataShapeError::MissingField { index: 1, field: "x" })
        );
    }
}
