//! In-memory user directory

use async_trait::async_trait;
use parking_lot::RwLock;

use huddle_core::{DomainError, Snowflake, StoreResult, User, UserDirectory};

/// User directory backed by an insertion-ordered in-memory list.
///
/// `list()` order is the order users joined the workspace, which the roster
/// view relies on.
#[derive(Default)]
pub struct MemoryUserDirectory {
    users: RwLock<Vec<User>>,
}

impl MemoryUserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        Ok(self
            .users
            .read()
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn create(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::EmailAlreadyExists);
        }
        tracing::debug!(user_id = %user.id, "User added to directory");
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(user.id)),
        }
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().clone())
    }
}
