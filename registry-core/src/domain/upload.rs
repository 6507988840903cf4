//! Cover Image Upload Rules
//!
//! Validation runs before any storage call.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult};

/// Uploads of this size or larger are rejected (5 MiB)
pub const MAX_COVER_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CoverUpload {
    pub fn validate(&self) -> DomainResult<()> {
        validate_image(&self.content_type, self.bytes.len())
    }
}

/// Accept only `image/*` content under the size ceiling
pub fn validate_image(content_type: &str, size: usize) -> DomainResult<()> {
    if !content_type.starts_with("image/") {
        return Err(DomainError::InvalidInput("Please choose an image file".to_string()));
    }
    if size >= MAX_COVER_BYTES {
        return Err(DomainError::InvalidInput("The image must be smaller than 5MB".to_string()));
    }
    Ok(())
}

/// Storage path for a list cover: `{prefix}/{list_id}-{millis}.{ext}`
pub fn cover_object_path(
    prefix: &str,
    list_id: Uuid,
    unix_millis: i64,
    file_name: &str,
    content_type: &str,
) -> String {
    let ext = file_extension(file_name, content_type);
    format!("{}/{}-{}.{}", prefix.trim_matches('/'), list_id, unix_millis, ext)
}

fn file_extension(file_name: &str, content_type: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
        _ => mime_guess::get_mime_extensions_str(content_type)
            .and_then(|exts| exts.first())
            .map(|ext| ext.to_string())
            .unwrap_or_else(|| "bin".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_images() {
        assert!(validate_image("application/pdf", 10).is_err());
        assert!(validate_image("text/plain", 10).is_err());
        assert!(validate_image("image/png", 10).is_ok());
    }

    #[test]
    fn test_size_ceiling() {
        assert!(validate_image("image/jpeg", MAX_COVER_BYTES - 1).is_ok());
        assert!(validate_image("image/jpeg", MAX_COVER_BYTES).is_err());
        assert!(validate_image("image/jpeg", MAX_COVER_BYTES + 1).is_err());
    }

    #[test]
    fn test_object_path() {
        let id = Uuid::nil();
        assert_eq!(
            cover_object_path("list-covers", id, 1700000000000, "Beach.JPG", "image/jpeg"),
            format!("list-covers/{}-1700000000000.jpg", id)
        );
    }

    #[test]
    fn test_object_path_without_extension() {
        let path = cover_object_path("list-covers/", Uuid::nil(), 1, "cover", "image/png");
        assert!(path.ends_with("-1.png"));
        assert!(path.starts_with("list-covers/"));
        assert!(cover_object_path("c", Uuid::nil(), 1, "cover", "image/x-unknown").ends_with(".bin"));
    }
}
