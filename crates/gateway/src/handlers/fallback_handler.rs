//! Default route.

use axum::http::{Method, Uri};
use tracing::debug;

use common::AppError;

/// Answer any unmatched method or path. Never touches the store.
pub async fn route_not_found(method: Method, uri: Uri) -> AppError {
    debug!(%method, %uri, "No route matched");
    AppError::RouteNotFound
}
