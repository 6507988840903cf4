//! Backend Configuration
//!
//! Where the hosted backend lives and how its storage is laid out.
//! Loaded from the `[backend]` table of a TOML file.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

fn default_storage_bucket() -> String {
    "public-images".to_string()
}

fn default_cover_prefix() -> String {
    "list-covers".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Public (anonymous) API key
    pub anon_key: String,
    #[serde(default = "default_storage_bucket")]
    pub storage_bucket: String,
    /// Folder inside the bucket for list covers
    #[serde(default = "default_cover_prefix")]
    pub cover_prefix: String,
}

#[derive(Deserialize)]
struct ConfigFile {
    backend: BackendConfig,
}

impl BackendConfig {
    pub fn new(url: &str, anon_key: &str) -> Self {
        Self {
            url: url.to_string(),
            anon_key: anon_key.to_string(),
            storage_bucket: default_storage_bucket(),
            cover_prefix: default_cover_prefix(),
        }
    }

    /// Parse the `[backend]` table of a TOML document
    pub fn from_toml_str(source: &str) -> DomainResult<Self> {
        let file: ConfigFile = toml::from_str(source)
            .map_err(|e| DomainError::InvalidInput(format!("Invalid backend config: {}", e)))?;
        Ok(file.backend)
    }

    /// Replace the URL and key when overrides are present and non-empty
    pub fn with_overrides(mut self, url: Option<&str>, anon_key: Option<&str>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.url = url.trim().to_string();
        }
        if let Some(key) = anon_key.filter(|k| !k.trim().is_empty()) {
            self.anon_key = key.trim().to_string();
        }
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.url.trim().is_empty() {
            return Err(DomainError::InvalidInput("Backend URL is not configured".to_string()));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(DomainError::InvalidInput(format!(
                "Backend URL must start with http:// or https://, got {}",
                self.url
            )));
        }
        if self.anon_key.trim().is_empty() {
            return Err(DomainError::InvalidInput("Backend API key is not configured".to_string()));
        }
        Ok(())
    }

    /// Join a service path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_with_defaults() {
        let config = BackendConfig::from_toml_str(
            r#"
            [backend]
            url = "https://demo.supabase.co"
            anon_key = "anon"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage_bucket, "public-images");
        assert_eq!(config.cover_prefix, "list-covers");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_table_is_invalid() {
        assert!(matches!(
            BackendConfig::from_toml_str("url = 'x'"),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = BackendConfig::new("https://a.example", "k1")
            .with_overrides(Some("https://b.example"), Some("  "));
        assert_eq!(config.url, "https://b.example");
        assert_eq!(config.anon_key, "k1");
    }

    #[test]
    fn test_validate() {
        assert!(BackendConfig::new("", "k").validate().is_err());
        assert!(BackendConfig::new("ftp://x", "k").validate().is_err());
        assert!(BackendConfig::new("https://x", "").validate().is_err());
    }

    #[test]
    fn test_endpoint() {
        let config = BackendConfig::new("https://demo.supabase.co/", "k");
        assert_eq!(config.endpoint("/rest/v1/gift_lists"), "https://demo.supabase.co/rest/v1/gift_lists");
    }
}
