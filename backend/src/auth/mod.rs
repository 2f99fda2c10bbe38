//! Authentication module for credential checks, token issuance and access control.
//!
//! This module provides the public interface for logging in, verifying bearer
//! tokens and guarding routes behind that verification.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use middleware::*;
pub use models::*;
pub use routes::*;
pub use service::*;
