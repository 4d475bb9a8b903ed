//! Domain layer - Users and Resorts as stored documents.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Documents are schema-less: the types here pin the fields the service
//! reasons about and carry everything else through untouched.

pub mod constants;
pub mod error;
pub mod resort;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use resort::{NewResort, Resort};
pub use user::{CreateUser, UpdateOutcome, UpdateProfile, User};

/// A JSON object as supplied by a caller or read back from the store.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Whether a JSON value counts as "present" for a required string field.
pub(crate) fn non_empty_str(value: Option<&serde_json::Value>) -> Option<&str> {
    value
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}
