//! Repository layer for data access.

mod document;
mod resort_repository;
mod user_repository;

pub use resort_repository::{ResortRepository, ResortStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use resort_repository::MockResortRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
