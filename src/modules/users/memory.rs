//! In-memory [`UserRepository`] for tests and local experiments.
//!
//! Counts lookups so tests can assert on memoization, and can be switched into
//! a failing mode to simulate an unreachable user store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use gatehouse_models::{User, UserId};

use super::repository::{LookupError, UserRepository};

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
    failing: AtomicBool,
    lookups: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::new();
        for user in users {
            repo.insert(user);
        }
        repo
    }

    pub fn insert(&self, user: User) {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.id, user);
    }

    /// While failing, every lookup returns [`LookupError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of lookups served so far, failed ones included.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn begin_lookup(&self) -> Result<(), LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable("in-memory store set to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find(&self, id: UserId) -> Result<User, LookupError> {
        self.begin_lookup()?;
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(LookupError::NotFound(id))
    }

    async fn find_by_username_or_uid(&self, key: &str) -> Result<Option<User>, LookupError> {
        self.begin_lookup()?;
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);

        let by_username = users.values().find(|u| u.username == key);
        Ok(by_username
            .or_else(|| users.values().find(|u| u.uid == key))
            .cloned())
    }
}
