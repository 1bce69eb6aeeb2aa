//! In-memory implementation of the token repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::repositories::TokenRepository;
use crate::error::AppError;

/// Token hash → username map.
///
/// Tokens never expire; the map is dropped with the process.
#[derive(Default)]
pub struct MemoryTokenRepository {
    tokens: RwLock<HashMap<String, String>>,
}

impl MemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn insert(&self, token_hash: &str, username: &str) -> Result<(), AppError> {
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(token_hash) {
            return Err(AppError::conflict("Token already issued", json!({})));
        }

        tokens.insert(token_hash.to_string(), username.to_string());
        Ok(())
    }

    async fn find_username(&self, token_hash: &str) -> Result<Option<String>, AppError> {
        Ok(self.tokens.read().await.get(token_hash).cloned())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.tokens.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let repo = MemoryTokenRepository::new();
        repo.insert("hash-1", "alice").await.unwrap();

        assert_eq!(
            repo.find_username("hash-1").await.unwrap().as_deref(),
            Some("alice")
        );
        assert!(repo.find_username("hash-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_same_user_many_tokens() {
        let repo = MemoryTokenRepository::new();
        repo.insert("hash-1", "alice").await.unwrap();
        repo.insert("hash-2", "alice").await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_hash_rejected() {
        let repo = MemoryTokenRepository::new();
        repo.insert("hash-1", "alice").await.unwrap();

        let err = repo.insert("hash-1", "bob").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(
            repo.find_username("hash-1").await.unwrap().as_deref(),
            Some("alice")
        );
    }
}
