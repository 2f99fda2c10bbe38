//! Shared application state handed to every handler.

use std::sync::Arc;

use adapters::{CredentialStore, PersonStore};

use crate::auth::{KeySet, TokenService};
use crate::services::PersonRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: PersonRegistry,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PersonStore>,
        credentials: Arc<dyn CredentialStore>,
        keys: KeySet,
    ) -> Self {
        Self {
            registry: PersonRegistry::new(store),
            tokens: TokenService::new(keys, credentials),
        }
    }
}
