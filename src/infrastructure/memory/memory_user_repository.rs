//! In-memory implementation of the user repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Accounts keyed by username, kept for the lifetime of the process.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.username) {
            return Err(AppError::conflict(
                "User already exists",
                json!({ "username": user.username }),
            ));
        }

        let stored = User {
            username: user.username,
            password_hash: user.password_hash,
        };
        users.insert(stored.username.clone(), stored.clone());

        Ok(stored)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.users.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            password_hash: "salt$hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MemoryUserRepository::new();

        let created = repo.insert(new_user("alice")).await.unwrap();
        assert_eq!(created.username, "alice");

        let found = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "salt$hash");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let repo = MemoryUserRepository::new();
        repo.insert(new_user("alice")).await.unwrap();

        let err = repo.insert(new_user("alice")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let repo = MemoryUserRepository::new();
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }
}
