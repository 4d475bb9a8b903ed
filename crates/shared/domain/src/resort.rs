//! Resort domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{FIELD_CREATED_AT, FIELD_ID};
use crate::error::{DomainError, DomainResult};
use crate::Payload;

/// Resort document as read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resort {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub fields: Payload,
}

/// Resort creation input, stamped with its insertion time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResort {
    fields: Payload,
    created_at: DateTime<Utc>,
}

impl NewResort {
    /// Validate a raw request body and stamp it with the current time.
    pub fn new(payload: Payload) -> DomainResult<Self> {
        Self::stamped(payload, Utc::now())
    }

    /// Validate a raw request body and stamp it with `created_at`.
    ///
    /// Caller-supplied `_id` and `createdAt` are discarded; what remains must be non-empty.
    pub fn stamped(mut payload: Payload, created_at: DateTime<Utc>) -> DomainResult<Self> {
        payload.remove(FIELD_ID);
        payload.remove(FIELD_CREATED_AT);

        if payload.is_empty() {
            return Err(DomainError::validation("Resort data is required"));
        }

        Ok(Self {
            fields: payload,
            created_at,
        })
    }

    pub fn fields(&self) -> &Payload {
        &self.fields
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn test_empty_resort_rejected() {
        let result = NewResort::new(Payload::new());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_only_service_owned_fields_counts_as_empty() {
        let result = NewResort::new(payload(json!({ "createdAt": "yesterday", "_id": 1 })));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_caller_timestamp_replaced() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        let resort = NewResort::stamped(
            payload(json!({ "name": "Peak", "createdAt": "1999-01-01T00:00:00Z" })),
            at,
        )
        .unwrap();

        assert_eq!(resort.created_at(), at);
        assert_eq!(resort.fields().get("name"), Some(&json!("Peak")));
        assert!(!resort.fields().contains_key(FIELD_CREATED_AT));
    }

    #[test]
    fn test_resort_deserializes_timestamp() {
        let resort: Resort = serde_json::from_value(json!({
            "_id": "65f0c0ffee",
            "name": "Peak",
            "createdAt": "2024-01-15T09:30:00Z"
        }))
        .unwrap();

        assert_eq!(
            resort.created_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap())
        );
        assert_eq!(resort.fields.len(), 1);
    }
}
