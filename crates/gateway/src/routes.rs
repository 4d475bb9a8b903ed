//! Route configuration.

use axum::Router;

use crate::handlers::{health_routes, resort_routes, route_not_found, user_routes};
use crate::state::AppState;

/// Create the main router with all routes.
///
/// Unknown paths fall through to [`route_not_found`]; each route also answers
/// unsupported methods with it, so dispatch never leaks a 405.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(resort_routes())
        .fallback(route_not_found)
        .with_state(state)
}
