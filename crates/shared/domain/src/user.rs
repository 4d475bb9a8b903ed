//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{
    FIELD_AGE, FIELD_EMAIL, FIELD_ID, FIELD_ID_NUMBER, FIELD_IS_ADMIN, FIELD_NAME,
    FIELD_SECURITY_DEPOSIT,
};
use crate::error::{DomainError, DomainResult};
use crate::{non_empty_str, Payload};

/// User document as read back from the store.
///
/// Only `email` is structurally required. Descriptive fields are stored as given,
/// so they stay untyped; unknown fields survive in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_deposit: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(flatten)]
    pub extra: Payload,
}

/// Validated user creation input.
///
/// Holds the caller's document minus the fields the service owns
/// (`_id`, `isAdmin`).
#[derive(Debug, Clone, PartialEq)]
pub struct CreateUser {
    email: String,
    document: Payload,
}

impl CreateUser {
    /// Validate a raw request body. Both `name` and `email` must be non-empty strings.
    pub fn from_payload(mut payload: Payload) -> DomainResult<Self> {
        let email = non_empty_str(payload.get(FIELD_EMAIL)).map(str::to_owned);
        let has_name = non_empty_str(payload.get(FIELD_NAME)).is_some();

        let (Some(email), true) = (email, has_name) else {
            return Err(DomainError::validation("Name and email are required"));
        };

        payload.remove(FIELD_ID);
        payload.remove(FIELD_IS_ADMIN);

        Ok(Self {
            email,
            document: payload,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Document to insert, verbatim apart from the stripped service-owned fields
    pub fn document(&self) -> &Payload {
        &self.document
    }
}

/// Profile fields settable through the profile update.
///
/// Absent (or `null`) fields are left untouched in the store.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub security_deposit: Option<Value>,
    #[serde(default)]
    pub id_number: Option<Value>,
}

impl UpdateProfile {
    /// True when no field would be written
    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.security_deposit.is_none() && self.id_number.is_none()
    }

    /// The present fields keyed by their stored names.
    pub fn fields(&self) -> Payload {
        [
            (FIELD_AGE, &self.age),
            (FIELD_SECURITY_DEPOSIT, &self.security_deposit),
            (FIELD_ID_NUMBER, &self.id_number),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key.to_string(), v)))
        .collect()
    }
}

/// Result of an in-place update against a single document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    /// A document with the target email exists
    pub matched: bool,
    /// The stored value actually changed
    pub modified: bool,
}

impl UpdateOutcome {
    pub fn unmatched() -> Self {
        Self::default()
    }

    pub fn new(matched: u64, modified: u64) -> Self {
        Self {
            matched: matched > 0,
            modified: modified > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn test_create_user_requires_name_and_email() {
        let missing_email = CreateUser::from_payload(payload(json!({ "name": "A" })));
        assert!(matches!(missing_email, Err(DomainError::Validation(_))));

        let missing_name = CreateUser::from_payload(payload(json!({ "email": "a@x.com" })));
        assert!(matches!(missing_name, Err(DomainError::Validation(_))));

        let empty_email =
            CreateUser::from_payload(payload(json!({ "name": "A", "email": "" })));
        assert!(matches!(empty_email, Err(DomainError::Validation(_))));

        let non_string =
            CreateUser::from_payload(payload(json!({ "name": "A", "email": 42 })));
        assert!(matches!(non_string, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_create_user_keeps_descriptive_fields() {
        let input = CreateUser::from_payload(payload(json!({
            "name": "A",
            "email": "a@x.com",
            "telephone": "555-0100",
            "membership": { "tier": "gold" }
        })))
        .unwrap();

        assert_eq!(input.email(), "a@x.com");
        assert_eq!(input.document().get("name"), Some(&json!("A")));
        assert_eq!(input.document().get("telephone"), Some(&json!("555-0100")));
        assert_eq!(input.document().len(), 4);
    }

    #[test]
    fn test_create_user_strips_service_owned_fields() {
        let input = CreateUser::from_payload(payload(json!({
            "_id": "forged",
            "name": "A",
            "email": "a@x.com",
            "isAdmin": true
        })))
        .unwrap();

        assert!(!input.document().contains_key(FIELD_IS_ADMIN));
        assert!(!input.document().contains_key(FIELD_ID));
    }

    #[test]
    fn test_user_round_trips_unknown_fields() {
        let user: User = serde_json::from_value(json!({
            "_id": "65f0c0ffee",
            "email": "a@x.com",
            "name": "A",
            "securityDeposit": 200,
            "favouriteRun": "Black Diamond"
        }))
        .unwrap();

        assert_eq!(user.id.as_deref(), Some("65f0c0ffee"));
        assert_eq!(user.security_deposit, Some(json!(200)));
        assert_eq!(user.is_admin, None);
        assert_eq!(user.extra.get("favouriteRun"), Some(&json!("Black Diamond")));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["favouriteRun"], json!("Black Diamond"));
        assert!(back.get("isAdmin").is_none());
    }

    #[test]
    fn test_update_profile_fields_skip_absent() {
        let update: UpdateProfile =
            serde_json::from_value(json!({ "age": 31, "idNumber": null })).unwrap();

        let fields = update.fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get(FIELD_AGE), Some(&json!(31)));
        assert!(!update.is_empty());
        assert!(UpdateProfile::default().is_empty());
    }

    #[test]
    fn test_update_outcome_from_counts() {
        assert_eq!(
            UpdateOutcome::new(1, 0),
            UpdateOutcome {
                matched: true,
                modified: false
            }
        );
        assert_eq!(UpdateOutcome::new(0, 0), UpdateOutcome::unmatched());
    }
}
