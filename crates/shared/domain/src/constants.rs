//! Domain-level constants.
//!
//! Collection names and document field names shared by the store and the HTTP layer.

// =============================================================================
// Collections
// =============================================================================

/// Default database name
pub const DEFAULT_DATABASE: &str = "resortDB";

/// Collection holding user documents
pub const USERS_COLLECTION: &str = "users";

/// Collection holding resort documents
pub const RESORTS_COLLECTION: &str = "AllResorts";

// =============================================================================
// Document fields
// =============================================================================

/// Store-generated document identifier
pub const FIELD_ID: &str = "_id";

/// Unique key of a user document
pub const FIELD_EMAIL: &str = "email";

pub const FIELD_NAME: &str = "name";

/// Role flag, written only by the admin update
pub const FIELD_IS_ADMIN: &str = "isAdmin";

pub const FIELD_AGE: &str = "age";

pub const FIELD_SECURITY_DEPOSIT: &str = "securityDeposit";

pub const FIELD_ID_NUMBER: &str = "idNumber";

/// Server-side insertion timestamp of a resort
pub const FIELD_CREATED_AT: &str = "createdAt";
