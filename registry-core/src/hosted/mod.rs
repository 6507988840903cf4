//! Hosted Backend
//!
//! HTTP implementations of the repository traits against a
//! Supabase-compatible project: table API, auth and object storage.
//! Row-level policies on the server decide what each bearer may see.

mod auth;
mod rest;
mod storage;
mod tables;

pub use auth::HostedAuth;
pub use rest::{status_error, RestClient, TableQuery};
pub use storage::HostedStorage;
pub use tables::{HostedItemRepository, HostedListRepository, HostedReservationRepository};

use crate::config::BackendConfig;
use crate::domain::{DomainResult, Session};
use crate::repository::Registry;

#[derive(Clone)]
pub struct HostedBackend {
    config: BackendConfig,
    http: reqwest::Client,
}

impl HostedBackend {
    pub fn new(config: BackendConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            http: reqwest::Client::new(),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn bearer(&self, session: Option<&Session>) -> String {
        session
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    /// Repositories acting as the session's user, or anonymously
    pub fn registry(&self, session: Option<&Session>) -> Registry {
        let rest = RestClient::new(self.http.clone(), self.config.clone(), self.bearer(session));
        Registry {
            lists: Box::new(HostedListRepository::new(rest.clone())),
            items: Box::new(HostedItemRepository::new(rest.clone())),
            reservations: Box::new(HostedReservationRepository::new(rest)),
        }
    }

    pub fn identity(&self) -> HostedAuth {
        HostedAuth::new(self.http.clone(), self.config.clone())
    }

    pub fn storage(&self, session: &Session) -> HostedStorage {
        HostedStorage::new(self.http.clone(), self.config.clone(), self.bearer(Some(session)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unconfigured_backend() {
        assert!(HostedBackend::new(BackendConfig::new("", "")).is_err());
        assert!(HostedBackend::new(BackendConfig::new("https://demo.supabase.co", "anon")).is_ok());
    }
}
