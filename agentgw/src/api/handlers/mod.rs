//! HTTP request handlers for all API endpoints.
//!
//! Each handler is responsible for:
//! - Request validation and deserialization
//! - Business logic execution via the storage / agent runtime seams
//! - Response serialization
//!
//! # Handler Modules
//!
//! - [`presign`]: upload grant issuance
//! - [`chat`]: agent relay
//! - [`static_assets`]: frontend asset serving and SPA routing
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`] which automatically converts to
//! appropriate HTTP status codes and the uniform `{ok:false, error, kind}`
//! JSON error body.

pub mod chat;
pub mod presign;
pub mod static_assets;
