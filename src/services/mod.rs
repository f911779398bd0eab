//! Service layer for business logic
//!
//! Shared between the HTTP handlers and the offline CLI.

mod convert_service;

pub use convert_service::*;
