//! Module for core business logic services.
//!
//! This module encapsulates the services that carry the service's business
//! rules: the CPF checksum and the person registry that consumes it.

pub mod cpf;
pub mod person_registry;

pub use person_registry::{PersonRegistry, RegistryError};
