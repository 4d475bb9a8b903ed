//! HTTP handlers.

pub mod fallback_handler;
pub mod health_handler;
pub mod resort_handler;
pub mod user_handler;

pub use fallback_handler::route_not_found;
pub use health_handler::health_routes;
pub use resort_handler::resort_routes;
pub use user_handler::user_routes;
