//! CRUD over person records.
//!
//! The registry owns the business rules (create-time validation, identifier
//! consistency, conflict handling on update) and delegates storage to any
//! [`PersonStore`].

use std::sync::Arc;

use adapters::{AdapterError, Person, PersonStore, WriteOutcome};
use thiserror::Error;
use tracing::{debug, warn};

use super::cpf;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Path id {path} does not match payload id {payload}")]
    IdentifierMismatch { path: i64, payload: i64 },
    #[error("Person {0} not found")]
    NotFound(i64),
    #[error("Person {0} was modified concurrently; re-fetch and resubmit")]
    Conflict(i64),
    #[error(transparent)]
    Store(#[from] AdapterError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Clone)]
pub struct PersonRegistry {
    store: Arc<dyn PersonStore>,
}

impl PersonRegistry {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> RegistryResult<Vec<Person>> {
        Ok(self.store.all().await?)
    }

    pub async fn list_by_region(&self, region: &str) -> RegistryResult<Vec<Person>> {
        let all = self.store.all().await?;
        Ok(all.into_iter().filter(|p| p.in_region(region)).collect())
    }

    pub async fn get(&self, id: i64) -> RegistryResult<Person> {
        self.store
            .fetch(id)
            .await?
            .map(|v| v.value)
            .ok_or(RegistryError::NotFound(id))
    }

    pub async fn create(&self, person: Person) -> RegistryResult<Person> {
        validate_new(&person)?;
        let created = self.store.insert(person).await?;
        debug!(id = created.id, "person created");
        Ok(created)
    }

    /// Replaces the whole record at `id`.
    ///
    /// A lost race against another writer surfaces as [`RegistryError::Conflict`];
    /// the caller has to re-fetch and resubmit.
    pub async fn update(&self, id: i64, person: Person) -> RegistryResult<Person> {
        if id != person.id {
            return Err(RegistryError::IdentifierMismatch {
                path: id,
                payload: person.id,
            });
        }

        let current = self
            .store
            .fetch(id)
            .await?
            .ok_or(RegistryError::NotFound(id))?;

        match self.store.replace(person, current.version).await? {
            WriteOutcome::Updated(updated) => {
                debug!(id, "person updated");
                Ok(updated)
            }
            WriteOutcome::NotFound | WriteOutcome::Conflict => {
                if self.store.exists(id).await? {
                    warn!(id, "concurrent modification on update");
                    Err(RegistryError::Conflict(id))
                } else {
                    Err(RegistryError::NotFound(id))
                }
            }
        }
    }

    pub async fn delete(&self, id: i64) -> RegistryResult<Person> {
        let removed = self
            .store
            .remove(id)
            .await?
            .ok_or(RegistryError::NotFound(id))?;
        debug!(id, "person deleted");
        Ok(removed)
    }
}

/// Create-time checks, in order.
///
/// The emptiness guard only fires when name, region and birth date are all
/// missing; any one of them being present is enough to move on.
fn validate_new(person: &Person) -> RegistryResult<()> {
    if person.name.is_none() && person.region.is_none() && person.birth_date.is_none() {
        return Err(RegistryError::Validation(
            "name, region and birthDate are all missing".into(),
        ));
    }
    if person.national_id.len() != cpf::CPF_LEN {
        return Err(RegistryError::Validation(format!(
            "nationalId must be {} characters long",
            cpf::CPF_LEN
        )));
    }
    if !cpf::validate(&person.national_id) {
        return Err(RegistryError::Validation("nationalId failed checksum".into()));
    }
    Ok(())
}
