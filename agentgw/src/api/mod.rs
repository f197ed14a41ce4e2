//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Upload grants** (`POST /api/presign`): scoped, time-boxed upload authorizations
//! - **Agent relay** (`POST /api/chat`): chat message relay to the agent runtime
//! - **Static assets** (`GET /*`): embedded frontend bundle with SPA fallback
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`; the
//! rendered reference is served at `/docs`.

pub mod handlers;
pub mod models;
