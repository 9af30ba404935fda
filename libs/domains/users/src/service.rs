use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserRequest, sanitize, validate};
use crate::repository::UserRepository;

/// Service layer for users: sanitizes and validates requests, then delegates
/// storage and the uniqueness check to the repository.
#[derive(Clone)]
pub struct UserDirectory<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserDirectory<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Snapshot of all users
    #[instrument(skip(self))]
    pub async fn list(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Sanitize, validate, and store a new user under a fresh id
    #[instrument(skip_all)]
    pub async fn create(&self, request: UserRequest) -> UserResult<User> {
        let input = validate(sanitize(&request))?;
        self.repository.create(input).await
    }

    /// Replace every field of an existing user; the id is kept
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: UserRequest) -> UserResult<User> {
        // Missing users are reported before any validation problem
        self.get(id).await?;

        let input = validate(sanitize(&request))?;
        self.repository.update(id, input).await
    }

    /// Delete a user by ID
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> UserResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}
