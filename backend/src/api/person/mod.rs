//! Module for the person registry API.
//!
//! Exposes the registry's CRUD operations under `/persons`.

pub mod handlers;
pub mod routes;
