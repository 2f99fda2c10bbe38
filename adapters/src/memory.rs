//! In-process implementation of [`PersonStore`].
//!
//! Records live in a `BTreeMap` keyed by id, so listing is always in ascending
//! id order. Every successful write bumps the record's version; `replace` checks
//! the expected version under the write lock, which makes the
//! compare-and-swap atomic per record.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;

use crate::errors::{AdapterError, AdapterResult};
use crate::models::{Person, Versioned, WriteOutcome};
use crate::PersonStore;

pub struct MemoryPersonStore {
    records: RwLock<BTreeMap<i64, Versioned<Person>>>,
    next_id: AtomicI64,
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn allocate_id(&self) -> AdapterResult<i64> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if id <= 0 {
            return Err(AdapterError::IdExhausted);
        }
        Ok(id)
    }
}

impl Default for MemoryPersonStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonStore for MemoryPersonStore {
    async fn all(&self) -> AdapterResult<Vec<Person>> {
        let records = self.records.read().await;
        Ok(records.values().map(|v| v.value.clone()).collect())
    }

    async fn fetch(&self, id: i64) -> AdapterResult<Option<Versioned<Person>>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> AdapterResult<bool> {
        Ok(self.records.read().await.contains_key(&id))
    }

    async fn insert(&self, mut person: Person) -> AdapterResult<Person> {
        let id = self.allocate_id()?;
        person.id = id;
        self.records.write().await.insert(
            id,
            Versioned {
                version: 1,
                value: person.clone(),
            },
        );
        trace!(id, "inserted person");
        Ok(person)
    }

    async fn replace(&self, person: Person, expected_version: u64) -> AdapterResult<WriteOutcome> {
        let mut records = self.records.write().await;
        let Some(slot) = records.get_mut(&person.id) else {
            return Ok(WriteOutcome::NotFound);
        };
        if slot.version != expected_version {
            trace!(
                id = person.id,
                expected_version,
                actual = slot.version,
                "version mismatch on replace"
            );
            return Ok(WriteOutcome::Conflict);
        }
        slot.version += 1;
        slot.value = person.clone();
        Ok(WriteOutcome::Updated(person))
    }

    async fn remove(&self, id: i64) -> AdapterResult<Option<Person>> {
        Ok(self.records.write().await.remove(&id).map(|v| v.value))
    }
}
