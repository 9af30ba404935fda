use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
///
/// `create` and `update` own the email-uniqueness check so that the check and
/// the write happen as one step from the caller's point of view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Snapshot of every stored user, ordered by id
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Get a user by ID
    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Store a new user under the next id.
    /// Fails with `Conflict` if the email is taken, ignoring case.
    async fn create(&self, input: NewUser) -> UserResult<User>;

    /// Replace the user at `id`, keeping the id.
    /// Fails with `NotFound` if absent, `Conflict` if another user holds the email.
    async fn update(&self, id: i64, input: NewUser) -> UserResult<User>;

    /// Delete a user by ID; `false` when nothing was stored there
    async fn delete(&self, id: i64) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository.
///
/// Clones share the same table and id counter. Ids start at 1 and are never
/// handed out twice, even after deletes.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn email_in_use(users: &HashMap<i64, User>, email: &str, exclude: Option<i64>) -> bool {
    let email = email.to_lowercase();
    users
        .values()
        .any(|u| Some(u.id) != exclude && u.email.to_lowercase() == email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by_key(|u| u.id);

        Ok(result)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, input: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        if email_in_use(&users, &input.email, None) {
            return Err(UserError::Conflict(input.email));
        }

        // Only advanced under the write lock, after the conflict check
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User::new(id, input);
        users.insert(id, user.clone());

        tracing::info!(user_id = id, "Created user");
        Ok(user)
    }

    async fn update(&self, id: i64, input: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&id) {
            return Err(UserError::NotFound(id));
        }

        if email_in_use(&users, &input.email, Some(id)) {
            return Err(UserError::Conflict(input.email));
        }

        let user = User::new(id, input);
        users.insert(id, user.clone());

        tracing::info!(user_id = id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
