//! Test doubles for [`UserStore`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::users::repo::{StoreError, UserStore};
use crate::users::repo_types::{NewUser, User};

/// Map keyed by lowercased email, mirroring the `lower(email)` unique index.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
    inserts: AtomicUsize,
    /// When set, `email_exists` always answers `false`, as if another request
    /// inserted the row between our check and our insert.
    stale_reads: bool,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stale_reads() -> Self {
        Self {
            stale_reads: true,
            ..Self::default()
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.read().await.get(&email.to_lowercase()).cloned()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Insert attempts, successful or not.
    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        if self.stale_reads {
            return Ok(false);
        }
        Ok(self.users.read().await.contains_key(&email.to_lowercase()))
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.write().await;
        let key = user.email.to_lowercase();
        if users.contains_key(&key) {
            return Err(StoreError::DuplicateEmail);
        }
        let row = User {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            social_login: user.social_login,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(key, row.clone());
        Ok(row)
    }
}

/// Every call fails as if the pool could not reach the database.
#[derive(Debug, Default)]
pub struct UnreachableUserStore {
    inserts: AtomicUsize,
}

impl UnreachableUserStore {
    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for UnreachableUserStore {
    async fn email_exists(&self, _email: &str) -> Result<bool, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _user: NewUser) -> Result<User, StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Reads succeed and report no match, every insert fails.
#[derive(Debug, Default)]
pub struct FailingInsertUserStore;

#[async_trait]
impl UserStore for FailingInsertUserStore {
    async fn email_exists(&self, _email: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn insert(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(StoreError::Database(sqlx::Error::RowNotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: email.into(),
            password_hash: "hash".into(),
            social_login: false,
        }
    }

    #[tokio::test]
    async fn insert_then_lookup_ignores_case() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("a@ex.com")).await.unwrap();

        assert!(store.email_exists("A@EX.COM").await.unwrap());
        assert!(!store.email_exists("b@ex.com").await.unwrap());
        assert!(store.find_by_email("a@Ex.com").await.is_some());
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("a@ex.com")).await.unwrap();

        let err = store.insert(new_user("A@ex.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.len().await, 1);
        assert_eq!(store.insert_calls(), 2);
    }

    #[tokio::test]
    async fn stale_reads_hide_existing_rows() {
        let store = InMemoryUserStore::with_stale_reads();
        store.insert(new_user("a@ex.com")).await.unwrap();
        assert!(!store.email_exists("a@ex.com").await.unwrap());
    }
}
