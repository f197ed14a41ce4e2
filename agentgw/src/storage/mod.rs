//! Upload store abstraction and object key construction.
//!
//! This module defines the [`UploadStore`] trait which abstracts time-boxed write
//! authorizations (presigned PUT URLs) across storage backends, plus the key
//! derivation used to namespace uploads.
//!
//! # Key Layout
//!
//! Every generated key has the form
//! `<prefix><sanitized-user>/<unix-millis>_<uuid><lowercased-ext>`:
//!
//! - the user segment is reduced to `[A-Za-z0-9_-]` so client-supplied
//!   identifiers can never escape their namespace or smuggle path separators;
//! - the timestamp + random identifier make keys unique per request and
//!   non-enumerable;
//! - the extension is carried over from the declared filename so downstream
//!   consumers can sniff content without a HEAD request.

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

pub mod s3;

pub use s3::S3UploadStore;

/// How long an issued upload URL stays valid.
///
/// Short by design: the URL is handed straight back to the browser, which is
/// expected to start the PUT immediately. Expiry bounds the exposure of a
/// leaked URL.
pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(60);

/// Result type for upload store operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while obtaining an upload authorization
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to presign upload: {0}")]
    Presign(String),
}

/// A time-boxed write authorization for one object key.
#[derive(Debug, Clone)]
pub struct UploadGrant {
    /// Bucket that will receive the upload
    pub bucket: String,
    /// Exact object key the authorization is scoped to
    pub key: String,
    /// Presigned PUT URL, valid for [`UPLOAD_URL_TTL`] and only for the
    /// declared content type
    pub upload_url: String,
}

/// Abstract upload store interface.
///
/// Implementors issue scoped write authorizations against a storage backend
/// (S3 or an S3-compatible service).
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Issue a write authorization scoped to `key` and `content_type`.
    ///
    /// The returned grant permits exactly one kind of operation: a PUT of the
    /// declared content type to the given key, until [`UPLOAD_URL_TTL`] elapses.
    async fn presign_put(&self, key: &str, content_type: &str) -> Result<UploadGrant>;
}

/// Reduce a client-supplied user identifier to a storage-safe key segment.
///
/// Keeps alphanumerics, `_` and `-`; everything else is dropped. Falls back to
/// `fallback` when the identifier is absent or nothing survives sanitization,
/// so the segment is never empty.
pub fn sanitize_user_segment(user_id: Option<&str>, fallback: &str) -> String {
    let sanitized: String = user_id
        .unwrap_or(fallback)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if sanitized.is_empty() { fallback.to_string() } else { sanitized }
}

/// Extract the lowercased extension (including the dot) from a filename.
///
/// Returns an empty string when the filename has no extension.
pub fn file_extension(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// Derive a unique, namespaced object key for one upload request.
pub fn build_object_key(prefix: &str, user_segment: &str, filename: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let id = Uuid::new_v4();
    let ext = file_extension(filename);
    format!("{prefix}{user_segment}/{millis}_{id}{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_user_segment(Some("alice_01-x"), "demo"), "alice_01-x");
    }

    #[test]
    fn test_sanitize_strips_path_separators() {
        assert_eq!(sanitize_user_segment(Some("../../etc/passwd"), "demo"), "etcpasswd");
        assert_eq!(sanitize_user_segment(Some("a/b\\c"), "demo"), "abc");
    }

    #[test]
    fn test_sanitize_defaults_to_fallback() {
        assert_eq!(sanitize_user_segment(None, "demo"), "demo");
        // Nothing survives sanitization -> fallback, never an empty segment
        assert_eq!(sanitize_user_segment(Some("!!!"), "demo"), "demo");
    }

    #[test]
    fn test_file_extension_lowercased() {
        assert_eq!(file_extension("photo.PNG"), ".png");
        assert_eq!(file_extension("archive.tar.GZ"), ".gz");
        assert_eq!(file_extension("README"), "");
        assert_eq!(file_extension(".bashrc"), "");
    }

    #[test]
    fn test_key_shape() {
        let key = build_object_key("chat_uploads/", "alice", "cat.JPG");
        assert!(key.starts_with("chat_uploads/alice/"), "unexpected key: {key}");
        assert!(key.ends_with(".jpg"), "unexpected key: {key}");

        // The part between the user segment and the extension is <millis>_<uuid>
        let rest = key
            .strip_prefix("chat_uploads/alice/")
            .and_then(|r| r.strip_suffix(".jpg"))
            .unwrap();
        let (millis, id) = rest.split_once('_').expect("timestamp and id separated by underscore");
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        assert!(Uuid::parse_str(id).is_ok(), "random component is a uuid: {id}");
    }

    #[test]
    fn test_keys_are_unique_per_request() {
        let a = build_object_key("chat_uploads/", "demo", "a.png");
        let b = build_object_key("chat_uploads/", "demo", "a.png");
        assert_ne!(a, b, "identical input must still produce distinct keys");
    }
}
