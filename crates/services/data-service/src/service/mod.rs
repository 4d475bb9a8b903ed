//! Service layer - business rules over the repositories.

mod resort_service;
mod user_service;

pub use resort_service::{ResortManager, ResortService};
pub use user_service::{UserManager, UserService};
