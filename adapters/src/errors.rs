//! Custom error types specific to the `adapters` crate.
//!
//! Store implementations report faults through [`AdapterError`]. Expected
//! outcomes such as a missing record or a write conflict are not errors; they
//! travel as `Option` or [`crate::WriteOutcome`] values instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Identifier space exhausted")]
    IdExhausted,
    #[error("Invalid credential entry: {0}")]
    InvalidCredential(String),
}

pub type AdapterResult<T> = Result<T, AdapterError>;
