//! Conversions between stored BSON documents and the JSON shapes the API serves.

use mongodb::bson::{self, Bson, Document};
use mongodb::error::{ErrorKind, WriteError, WriteFailure};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use common::{AppError, AppResult};
use domain::Payload;

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Decode a stored document into a domain type.
///
/// Object ids become hex strings and dates become RFC 3339 strings.
pub(crate) fn decode<T: DeserializeOwned>(doc: Document) -> AppResult<T> {
    let json = Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    );
    serde_json::from_value(json).map_err(|e| AppError::internal(format!("malformed document: {e}")))
}

/// Decode a listing, skipping documents that do not fit `T`.
pub(crate) fn decode_all<T: DeserializeOwned>(docs: Vec<Document>, collection: &str) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| {
            let id = doc.get("_id").cloned();
            match decode(doc) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(collection, id = ?id, error = %e, "Skipping malformed document");
                    None
                }
            }
        })
        .collect()
}

/// Encode a caller payload as a document to insert or `$set`.
pub(crate) fn encode(payload: &Payload) -> AppResult<Document> {
    bson::to_document(payload).map_err(|e| AppError::internal(format!("unencodable payload: {e}")))
}

/// Identifier string of an inserted document.
pub(crate) fn inserted_id(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

/// Store error from an insert, with a unique index violation reported as `Conflict`.
pub(crate) fn insert_error(err: mongodb::error::Error, entity: &str) -> AppError {
    if is_duplicate_key(&err) {
        AppError::conflict(entity)
    } else {
        err.into()
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(WriteError {
            code: DUPLICATE_KEY,
            ..
        }))
    )
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::from(dt.timestamp_millis())),
        Bson::Document(doc) => Value::Object(
            doc.into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{doc, oid::ObjectId, DateTime};
    use serde_json::json;

    use domain::{Resort, User};

    use super::*;

    #[test]
    fn test_decode_user_flattens_object_id() {
        let oid = ObjectId::new();
        let user: User = decode(doc! {
            "_id": oid,
            "email": "a@x.com",
            "name": "A",
            "age": 31,
            "isAdmin": true,
        })
        .unwrap();

        assert_eq!(user.id, Some(oid.to_hex()));
        assert_eq!(user.age, Some(json!(31)));
        assert_eq!(user.is_admin, Some(true));
    }

    #[test]
    fn test_decode_resort_reads_stored_date() {
        let stamp = DateTime::from_millis(1_705_311_000_000);
        let resort: Resort = decode(doc! {
            "_id": ObjectId::new(),
            "name": "Peak",
            "lifts": ["Gondola", "T-bar"],
            "createdAt": stamp,
        })
        .unwrap();

        assert_eq!(
            resort.created_at.map(|at| at.timestamp_millis()),
            Some(1_705_311_000_000)
        );
        assert_eq!(resort.fields.get("lifts"), Some(&json!(["Gondola", "T-bar"])));
    }

    #[test]
    fn test_decode_malformed_document_is_internal() {
        let result: AppResult<User> = decode(doc! { "email": 42 });
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_decode_all_skips_malformed() {
        let users: Vec<User> = decode_all(
            vec![
                doc! { "email": "a@x.com", "name": "A" },
                doc! { "email": "b@x.com", "name": { "first": "B" } },
                doc! { "email": 7 },
            ],
            "users",
        );

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "a@x.com");
    }

    fn write_error(code: i32) -> mongodb::error::Error {
        let write_error: WriteError = bson::from_document(doc! {
            "code": code,
            "codeName": "DuplicateKey",
            "errmsg": "E11000 duplicate key error collection: resortDB.users index: email_unique",
        })
        .unwrap();
        ErrorKind::Write(WriteFailure::WriteError(write_error)).into()
    }

    #[test]
    fn test_duplicate_key_is_conflict() {
        let err = insert_error(write_error(11000), "User");

        assert!(matches!(err, AppError::Conflict(ref entity) if entity == "User"));
    }

    #[test]
    fn test_other_write_error_is_database() {
        let err = insert_error(write_error(121), "User");

        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_encode_keeps_nested_values() {
        let payload = match json!({ "name": "Peak", "trails": { "green": 4 } }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let doc = encode(&payload).unwrap();
        assert_eq!(doc.get_str("name").unwrap(), "Peak");
        assert!(doc.get_document("trails").is_ok());
    }

    #[test]
    fn test_inserted_id_hex() {
        let oid = ObjectId::new();
        assert_eq!(inserted_id(Bson::ObjectId(oid)), oid.to_hex());
        assert_eq!(inserted_id(Bson::String("custom".into())), "custom");
    }
}
