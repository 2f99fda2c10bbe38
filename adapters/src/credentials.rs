//! In-process implementation of [`CredentialStore`].
//!
//! Users are supplied once at construction (normally from configuration).
//! Usernames match case-insensitively; passwords are compared in constant time
//! and the lookup does the same amount of work whether or not the username is
//! known.

use async_trait::async_trait;
use subtle::ConstantTimeEq;

use crate::errors::{AdapterError, AdapterResult};
use crate::models::User;
use crate::CredentialStore;

pub struct MemoryCredentialStore {
    users: Vec<User>,
}

impl MemoryCredentialStore {
    pub fn new(users: Vec<User>) -> AdapterResult<Self> {
        for user in &users {
            if user.username.trim().is_empty() {
                return Err(AdapterError::InvalidCredential("empty username".into()));
            }
            if user.role.trim().is_empty() {
                return Err(AdapterError::InvalidCredential(format!(
                    "user '{}' has no role",
                    user.username
                )));
            }
        }
        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn authenticate(&self, username: &str, password: &str) -> AdapterResult<Option<User>> {
        let wanted = username.to_lowercase();
        let mut found = None;
        for user in &self.users {
            let name_ok = user.username.to_lowercase() == wanted;
            let pass_ok: bool = user.password.as_bytes().ct_eq(password.as_bytes()).into();
            if name_ok && pass_ok && found.is_none() {
                found = Some(user.clone());
            }
        }
        Ok(found)
    }
}
