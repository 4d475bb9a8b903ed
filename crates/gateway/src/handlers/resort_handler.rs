//! Resort handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use common::AppResult;
use domain::{NewResort, Payload, Resort};

use crate::extractors::JsonBody;
use crate::handlers::route_not_found;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResortCreatedResponse {
    pub message: &'static str,
    pub resort_id: String,
}

/// Create resort routes
pub fn resort_routes() -> Router<AppState> {
    Router::new()
        .route("/add-resort", post(add_resort).fallback(route_not_found))
        .route("/resort-data", get(list_resorts).fallback(route_not_found))
}

/// Store a resort; `createdAt` is set by the server
pub async fn add_resort(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Payload>,
) -> AppResult<(StatusCode, Json<ResortCreatedResponse>)> {
    let resort = NewResort::new(payload)?;

    state.store_ready().await?;
    let resort_id = state.resorts.create_resort(resort).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResortCreatedResponse {
            message: "Resort added successfully",
            resort_id,
        }),
    ))
}

/// List all resorts
pub async fn list_resorts(State(state): State<AppState>) -> AppResult<Json<Vec<Resort>>> {
    state.store_ready().await?;
    let resorts = state.resorts.list_resorts().await?;
    Ok(Json(resorts))
}
