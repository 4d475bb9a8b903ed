//! Validated JSON extractor.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use validator::{Validate, ValidationErrors};

use common::AppError;

use super::JsonBody;

/// [`JsonBody`] whose payload must also pass its `validator` rules.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate,
    JsonBody<T>: FromRequest<S, Rejection = AppError>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|e| AppError::validation(first_message(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Message of the first failed rule, in field name order.
fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().collect();
    fields.sort();

    fields
        .into_iter()
        .filter_map(|field| field_errors.get(field)?.first())
        .find_map(|error| error.message.as_ref())
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| "Validation failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct AdminFlag {
        #[validate(required(message = "isAdmin must be a boolean"))]
        is_admin: Option<bool>,
        #[validate(required(message = "Email is required"))]
        email: Option<String>,
    }

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn test_first_message_is_deterministic() {
        let errors = AdminFlag {
            is_admin: None,
            email: None,
        }
        .validate()
        .unwrap_err();

        assert_eq!(first_message(&errors), "Email is required");
    }

    #[test]
    fn test_first_message_fallback() {
        let errors = Named {
            name: String::new(),
        }
        .validate()
        .unwrap_err();

        assert_eq!(first_message(&errors), "Validation failed");
    }
}
