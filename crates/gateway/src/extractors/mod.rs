//! Request extractors.

mod json_body;
mod request_parts;
mod validated_json;

pub use json_body::JsonBody;
pub use request_parts::{PathParam, QueryParams};
pub use validated_json::ValidatedJson;
