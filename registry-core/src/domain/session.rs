//! Identity and Session Types
//!
//! A `Session` is handed explicitly to every authenticated operation;
//! nothing in the crate keeps one in ambient state.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult};
use super::fields::{optional_text, required_text};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Refresh this long before the access token actually expires
const EXPIRY_MARGIN_SECS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

impl Session {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn normalized(self) -> DomainResult<Self> {
        let email = required_text("Email", &self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::InvalidInput("Password is required".to_string()));
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub repeat_password: String,
    /// Where the confirmation email sends the user back to
    #[serde(default)]
    pub email_redirect_to: Option<String>,
}

impl SignUpForm {
    /// Password confirmation and length are checked before the provider is called
    pub fn normalized(self) -> DomainResult<Self> {
        let email = required_text("Email", &self.email)?;
        if self.password != self.repeat_password {
            return Err(DomainError::InvalidInput("Passwords do not match".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::InvalidInput(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(Self {
            full_name: self.full_name.trim().to_string(),
            email,
            password: self.password,
            repeat_password: self.repeat_password,
            email_redirect_to: optional_text(self.email_redirect_to),
        })
    }
}

/// Result of a sign-up. Providers that require email confirmation return no session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpOutcome {
    pub user: User,
    pub session: Option<Session>,
}

impl SignUpOutcome {
    pub fn needs_confirmation(&self) -> bool {
        self.session.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, repeat: &str) -> SignUpForm {
        SignUpForm {
            full_name: " Ana ".into(),
            email: "ana@example.com".into(),
            password: password.into(),
            repeat_password: repeat.into(),
            email_redirect_to: Some("  ".into()),
        }
    }

    #[test]
    fn test_sign_up_validation() {
        assert_eq!(
            form("secret1", "secret2").normalized(),
            Err(DomainError::InvalidInput("Passwords do not match".into()))
        );
        assert!(matches!(form("abc", "abc").normalized(), Err(DomainError::InvalidInput(_))));
        let ok = form("secret", "secret").normalized().unwrap();
        assert_eq!(ok.full_name, "Ana");
        assert_eq!(ok.email_redirect_to, None);
    }

    #[test]
    fn test_credentials_required() {
        assert!(Credentials::default().normalized().is_err());
        let missing_password = Credentials {
            email: "ana@example.com".into(),
            password: String::new(),
        };
        assert!(missing_password.normalized().is_err());
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = Session {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: now + Duration::minutes(10),
            user: User {
                id: Uuid::new_v4(),
                email: None,
                full_name: None,
            },
        };
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::minutes(10)));
        assert!(session.is_expired(now + Duration::seconds(590)));
    }
}
