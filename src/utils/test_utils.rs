//! Test utilities for the user service.

#![cfg(test)]

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use crate::app::AppState;
use crate::db::store::UserStore;
use crate::db::users::{NewUser, User};
use crate::utils::errors::ServiceError;

/// In-memory `UserStore` used to exercise handlers and the registration flow
/// without a database. `failing()` builds a store whose every operation
/// errors, for testing error propagation.
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI32,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        MemoryStore {
            fail: true,
            ..MemoryStore::new()
        }
    }

    /// Inserts a user directly, bypassing validation.
    pub fn seed(&self, name: &str, login: &str) -> User {
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: name.to_string(),
            login: login.to_string(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), ServiceError> {
        if self.fail {
            return Err(ServiceError::database("simulated store failure"));
        }
        Ok(())
    }
}

impl UserStore for MemoryStore {
    fn refresh(&self, user: &mut User) -> Result<(), ServiceError> {
        self.check()?;
        let users = self.users.lock().unwrap();
        let fresh = users
            .iter()
            .find(|u| u.id == user.id)
            .cloned()
            .ok_or_else(|| ServiceError::database("Failed to refresh user"))?;
        *user = fresh;
        Ok(())
    }

    fn list_all(&self) -> Result<Option<Vec<User>>, ServiceError> {
        self.check()?;
        let users = self.users.lock().unwrap();
        if users.is_empty() {
            Ok(None)
        } else {
            Ok(Some(users.clone()))
        }
    }

    fn contains_login(&self, login: &str) -> Result<bool, ServiceError> {
        self.check()?;
        Ok(self.users.lock().unwrap().iter().any(|u| u.login == login))
    }

    fn add(&self, new_user: NewUser) -> Result<User, ServiceError> {
        self.check()?;
        Ok(self.seed(&new_user.name, &new_user.login))
    }

    fn find(&self, login: &str) -> Result<Option<User>, ServiceError> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.login == login)
            .cloned())
    }
}

/// Builds an `AppState` around an in-memory store.
pub fn state_with_store(store: MemoryStore) -> AppState {
    AppState::new(Arc::new(store))
}
