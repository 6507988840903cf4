//! Hosted Object Storage
//!
//! Uploads into a public bucket; objects are served from the bucket's
//! public URL prefix.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Method;

use super::rest::check;
use crate::config::BackendConfig;
use crate::domain::DomainResult;
use crate::repository::ObjectStore;

/// Characters escaped inside one path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn encode_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

pub struct HostedStorage {
    http: reqwest::Client,
    config: BackendConfig,
    bearer: String,
}

impl HostedStorage {
    pub fn new(http: reqwest::Client, config: BackendConfig, bearer: String) -> Self {
        Self { http, config, bearer }
    }
}

#[async_trait(?Send)]
impl ObjectStore for HostedStorage {
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> DomainResult<()> {
        let url = self.config.endpoint(&format!(
            "storage/v1/object/{}/{}",
            self.config.storage_bucket,
            encode_path(path)
        ));
        let response = self
            .http
            .request(Method::POST, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.bearer)
            .header("Content-Type", content_type)
            .header("Cache-Control", "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes.to_vec())
            .send()
            .await?;
        check(response).await?;
        log::info!("Uploaded {} ({} bytes)", path, bytes.len());
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        self.config.endpoint(&format!(
            "storage/v1/object/public/{}/{}",
            self.config.storage_bucket,
            encode_path(path)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url() {
        let storage = HostedStorage::new(
            reqwest::Client::new(),
            BackendConfig::new("https://demo.supabase.co", "anon"),
            "anon".into(),
        );
        assert_eq!(
            storage.public_url("list-covers/my cover.png"),
            "https://demo.supabase.co/storage/v1/object/public/public-images/list-covers/my%20cover.png"
        );
    }
}
