//! Resort service - resort use cases.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use common::AppResult;
use domain::{NewResort, Resort};

use crate::repository::ResortRepository;

/// Resort service trait for dependency injection.
#[async_trait]
pub trait ResortService: Send + Sync {
    /// List all resorts
    async fn list_resorts(&self) -> AppResult<Vec<Resort>>;

    /// Store a stamped resort. Returns the generated id.
    async fn create_resort(&self, resort: NewResort) -> AppResult<String>;
}

/// Concrete implementation of ResortService using repository.
pub struct ResortManager {
    repo: Arc<dyn ResortRepository>,
}

impl ResortManager {
    pub fn new(repo: Arc<dyn ResortRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ResortService for ResortManager {
    async fn list_resorts(&self) -> AppResult<Vec<Resort>> {
        self.repo.list().await
    }

    async fn create_resort(&self, resort: NewResort) -> AppResult<String> {
        let id = self.repo.insert(&resort).await?;
        info!(resort_id = %id, "Resort added");
        Ok(id)
    }
}
