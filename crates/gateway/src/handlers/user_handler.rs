//! User handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, patch},
    Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use common::{AppError, AppResult};
use domain::{CreateUser, Payload, UpdateOutcome, UpdateProfile, User};

use crate::extractors::{JsonBody, PathParam, QueryParams, ValidatedJson};
use crate::handlers::route_not_found;
use crate::state::AppState;

/// Optional `?email=` filter on the users collection
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// Admin flag update request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    #[validate(
        required(message = "Email is required"),
        length(min = 1, message = "Email is required")
    )]
    pub email: Option<String>,
    #[validate(required(message = "isAdmin must be a boolean"))]
    pub is_admin: Option<bool>,
}

/// Profile update request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(
        required(message = "Email is required"),
        length(min = 1, message = "Email is required")
    )]
    pub email: Option<String>,
    #[serde(flatten)]
    pub profile: UpdateProfile,
}

/// Response to a successful user creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreatedResponse {
    pub message: &'static str,
    pub user_id: String,
}

/// Response to an update; `modified` is false when the stored value already matched
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub message: &'static str,
    pub modified: bool,
}

impl UpdateResponse {
    fn from_outcome(outcome: UpdateOutcome, updated: &'static str, unchanged: &'static str) -> Self {
        Self {
            message: if outcome.modified { updated } else { unchanged },
            modified: outcome.modified,
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/all-users", get(list_users).fallback(route_not_found))
        .route(
            "/users",
            get(find_users).post(create_user).fallback(route_not_found),
        )
        .route("/users/", get(missing_email).fallback(route_not_found))
        .route("/users/:email", get(get_user).fallback(route_not_found))
        .route(
            "/update-user",
            patch(update_admin_flag).fallback(route_not_found),
        )
        .route(
            "/update-user-info",
            patch(update_profile).fallback(route_not_found),
        )
}

/// List all users
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    state.store_ready().await?;
    let users = state.users.list_users().await?;
    Ok(Json(users))
}

/// List all users, or look one up when `?email=` is given
pub async fn find_users(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<EmailQuery>,
) -> AppResult<Response> {
    match query.email {
        Some(email) => Ok(lookup(&state, &email).await?.into_response()),
        None => Ok(list_users(State(state)).await?.into_response()),
    }
}

/// Get user by email
pub async fn get_user(
    State(state): State<AppState>,
    PathParam(email): PathParam<String>,
) -> AppResult<Json<User>> {
    lookup(&state, &email).await
}

/// `/users/` with the email segment left empty
pub async fn missing_email() -> AppError {
    AppError::validation("Email is required")
}

async fn lookup(state: &AppState, email: &str) -> AppResult<Json<User>> {
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    state.store_ready().await?;
    let user = state.users.get_user_by_email(email).await?;
    Ok(Json(user))
}

/// Create a user from an arbitrary JSON object carrying `name` and `email`
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Payload>,
) -> AppResult<(StatusCode, Json<UserCreatedResponse>)> {
    let input = CreateUser::from_payload(payload)?;

    state.store_ready().await?;
    let user_id = state.users.create_user(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            message: "User created successfully",
            user_id,
        }),
    ))
}

/// Set or clear the admin flag
pub async fn update_admin_flag(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateAdminRequest>,
) -> AppResult<Json<UpdateResponse>> {
    let email = payload.email.unwrap_or_default();
    let is_admin = payload.is_admin.unwrap_or_default();

    state.store_ready().await?;
    let outcome = state.users.update_admin_flag(&email, is_admin).await?;

    Ok(Json(UpdateResponse::from_outcome(
        outcome,
        "User role updated successfully",
        "User role already up to date",
    )))
}

/// Set age, security deposit and id number
pub async fn update_profile(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UpdateResponse>> {
    let email = payload.email.unwrap_or_default();

    state.store_ready().await?;
    let outcome = state.users.update_profile(&email, payload.profile).await?;

    Ok(Json(UpdateResponse::from_outcome(
        outcome,
        "User information updated successfully",
        "User information already up to date",
    )))
}
