//! Core `adapters` crate for abstracting the persons service's collaborators.
//!
//! This crate defines the [`PersonStore`] and [`CredentialStore`] traits, which
//! describe what the service needs from a record store and from a user
//! directory, and provides in-memory implementations of both.

pub mod credentials;
pub mod errors;
pub mod memory;
pub mod models;

use async_trait::async_trait;

pub use credentials::MemoryCredentialStore;
pub use errors::{AdapterError, AdapterResult};
pub use memory::MemoryPersonStore;
pub use models::{Person, User, Versioned, WriteOutcome};

/// Record store with unique-key lookup and optimistic-concurrency replace.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// All records in ascending id order.
    async fn all(&self) -> AdapterResult<Vec<Person>>;

    async fn fetch(&self, id: i64) -> AdapterResult<Option<Versioned<Person>>>;

    async fn exists(&self, id: i64) -> AdapterResult<bool>;

    /// Stores a new record under a freshly assigned id and returns it.
    async fn insert(&self, person: Person) -> AdapterResult<Person>;

    /// Replaces the record with `person.id` only if it is still at `expected_version`.
    async fn replace(&self, person: Person, expected_version: u64) -> AdapterResult<WriteOutcome>;

    async fn remove(&self, id: i64) -> AdapterResult<Option<Person>>;
}

/// User directory consulted at login.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the user only when both halves of the pair match.
    async fn authenticate(&self, username: &str, password: &str) -> AdapterResult<Option<User>>;
}
