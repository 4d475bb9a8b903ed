//! User service - validation and uniqueness rules for users.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{CreateUser, UpdateOutcome, UpdateProfile, User};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by email
    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    /// Create a user, rejecting a taken email. Returns the generated id.
    async fn create_user(&self, input: CreateUser) -> AppResult<String>;

    /// Set the admin flag. `NotFound` only when no user has this email.
    async fn update_admin_flag(&self, email: &str, is_admin: bool) -> AppResult<UpdateOutcome>;

    /// Set profile fields. `NotFound` only when no user has this email.
    async fn update_profile(&self, email: &str, profile: UpdateProfile) -> AppResult<UpdateOutcome>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

fn require_email(email: &str) -> AppResult<()> {
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    Ok(())
}

fn require_match(outcome: UpdateOutcome) -> AppResult<UpdateOutcome> {
    if !outcome.matched {
        return Err(AppError::not_found("User"));
    }
    Ok(outcome)
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        require_email(email)?;
        self.repo
            .find_by_email(email)
            .await?
            .ok_or_not_found("User")
    }

    async fn create_user(&self, input: CreateUser) -> AppResult<String> {
        // Fast path; the unique index catches writers racing past this check.
        if self.repo.find_by_email(input.email()).await?.is_some() {
            warn!(email = %input.email(), "Rejected duplicate user");
            return Err(AppError::conflict("User"));
        }

        let id = self.repo.insert(&input).await?;
        info!(user_id = %id, "User created");
        Ok(id)
    }

    async fn update_admin_flag(&self, email: &str, is_admin: bool) -> AppResult<UpdateOutcome> {
        require_email(email)?;
        let outcome = require_match(self.repo.set_admin_flag(email, is_admin).await?)?;
        info!(email, is_admin, modified = outcome.modified, "Admin flag updated");
        Ok(outcome)
    }

    async fn update_profile(&self, email: &str, profile: UpdateProfile) -> AppResult<UpdateOutcome> {
        require_email(email)?;
        require_match(self.repo.set_profile(email, &profile).await?)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use serde_json::{json, Value};

    use super::*;
    use crate::repository::MockUserRepository;

    fn new_user(value: Value) -> CreateUser {
        match value {
            Value::Object(map) => CreateUser::from_payload(map).unwrap(),
            _ => panic!("test payload must be an object"),
        }
    }

    fn stored_user(email: &str) -> User {
        serde_json::from_value(json!({ "_id": "65f0c0ffee", "email": email, "name": "A" }))
            .unwrap()
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("a@x.com"))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|input| {
                input.email() == "a@x.com" && input.document().get("name") == Some(&json!("A"))
            })
            .times(1)
            .returning(|_| Ok("65f0c0ffee".to_string()));

        let id = service(repo)
            .create_user(new_user(json!({ "name": "A", "email": "a@x.com" })))
            .await
            .unwrap();

        assert_eq!(id, "65f0c0ffee");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_skips_insert() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(email))));
        repo.expect_insert().never();

        let result = service(repo)
            .create_user(new_user(json!({ "name": "A", "email": "a@x.com" })))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_user_store_level_duplicate_is_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|_| Err(AppError::conflict("User")));

        let result = service(repo)
            .create_user(new_user(json!({ "name": "A", "email": "a@x.com" })))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_user_by_email_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let result = service(repo).get_user_by_email("ghost@x.com").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_user_by_empty_email_is_validation() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();

        let result = service(repo).get_user_by_email("").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_users_passes_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Ok(vec![stored_user("a@x.com"), stored_user("b@x.com")]));

        let users = service(repo).list_users().await.unwrap();

        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_update_admin_flag_unmatched_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_admin_flag()
            .with(eq("ghost@x.com"), eq(true))
            .returning(|_, _| Ok(UpdateOutcome::unmatched()));

        let result = service(repo).update_admin_flag("ghost@x.com", true).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_admin_flag_same_value_is_noop_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_admin_flag()
            .returning(|_, _| Ok(UpdateOutcome::new(1, 0)));

        let outcome = service(repo)
            .update_admin_flag("a@x.com", true)
            .await
            .unwrap();

        assert!(outcome.matched);
        assert!(!outcome.modified);
    }

    #[tokio::test]
    async fn test_update_admin_flag_requires_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_admin_flag().never();

        let result = service(repo).update_admin_flag("", true).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_profile_forwards_fields() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_profile()
            .withf(|email, profile| {
                email == "a@x.com" && profile.age == Some(json!(31)) && profile.id_number.is_none()
            })
            .returning(|_, _| Ok(UpdateOutcome::new(1, 1)));

        let profile = UpdateProfile {
            age: Some(json!(31)),
            ..Default::default()
        };
        let outcome = service(repo).update_profile("a@x.com", profile).await.unwrap();

        assert!(outcome.modified);
    }

    #[tokio::test]
    async fn test_update_profile_unmatched_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_profile()
            .returning(|_, _| Ok(UpdateOutcome::unmatched()));

        let result = service(repo)
            .update_profile("ghost@x.com", UpdateProfile::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
