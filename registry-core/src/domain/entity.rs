//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all persisted records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Every variant resolves to a visible message in the UI; none is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum DomainError {
    /// No session, or the session was rejected by the identity provider
    #[error("Not signed in")]
    Unauthenticated,
    /// The record exists but belongs to someone else
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// A form field failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Not enough availability left to satisfy a reservation
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Network or database failure
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Failures that should send the user back to the login page
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, DomainError::Unauthenticated)
    }

    /// Failures that should send the user away from a record they cannot see
    pub fn is_access_failure(&self) -> bool {
        matches!(self, DomainError::Forbidden(_) | DomainError::NotFound(_))
    }

    /// Message for inline form errors, without the variant prefix
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Unauthenticated => self.to_string(),
            DomainError::Forbidden(msg)
            | DomainError::NotFound(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Conflict(msg)
            | DomainError::Backend(msg)
            | DomainError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Internal(format!("Failed to decode payload: {}", e))
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::Backend(e.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Backend(e.to_string())
    }
}

#[cfg(feature = "local")]
impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Backend(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(DomainError::Unauthenticated.is_auth_failure());
        assert!(DomainError::Forbidden("list".into()).is_access_failure());
        assert!(DomainError::NotFound("list".into()).is_access_failure());
        assert!(!DomainError::Conflict("x".into()).is_access_failure());
        assert!(!DomainError::Backend("x".into()).is_auth_failure());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidInput("Title is required".into());
        assert_eq!(err.to_string(), "Invalid input: Title is required");
        assert_eq!(err.user_message(), "Title is required");
    }
}
