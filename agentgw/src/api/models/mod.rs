//! API request/response models.
//!
//! All wire formats are camelCase JSON, matching the frontend bundle this
//! service ships with.

pub mod chat;
pub mod presign;
