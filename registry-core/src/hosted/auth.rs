//! Hosted Identity Provider
//!
//! GoTrue-style endpoints: sign-up, password grant, refresh grant,
//! current user and logout.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::rest::{check, encode, read_json};
use crate::config::BackendConfig;
use crate::domain::{Credentials, DomainResult, Session, SignUpForm, SignUpOutcome, User};
use crate::repository::IdentityProvider;

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: Uuid,
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

impl From<AuthUser> for User {
    fn from(user: AuthUser) -> Self {
        User {
            id: user.id,
            email: user.email,
            full_name: user.user_metadata.and_then(|m| m.full_name),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    /// Absolute expiry in unix seconds, when the server provides it
    expires_at: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(|| now + Duration::seconds(self.expires_in));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into(),
        }
    }
}

#[derive(Serialize)]
struct SignUpMetadata<'a> {
    full_name: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

/// Sign-up answers with a session when email confirmation is off,
/// and with the bare user when it is on.
fn decode_sign_up(value: Value, now: DateTime<Utc>) -> DomainResult<SignUpOutcome> {
    if value.get("access_token").is_some() {
        let token: TokenResponse = serde_json::from_value(value)?;
        let session = token.into_session(now);
        return Ok(SignUpOutcome {
            user: session.user.clone(),
            session: Some(session),
        });
    }
    let user: AuthUser = serde_json::from_value(value)?;
    Ok(SignUpOutcome {
        user: user.into(),
        session: None,
    })
}

/// Sign-up path, carrying the confirmation redirect when there is one
fn sign_up_path(email_redirect_to: Option<&str>) -> String {
    match email_redirect_to {
        Some(url) => format!("auth/v1/signup?redirect_to={}", encode(url)),
        None => "auth/v1/signup".to_string(),
    }
}

pub struct HostedAuth {
    http: reqwest::Client,
    config: BackendConfig,
}

impl HostedAuth {
    pub fn new(http: reqwest::Client, config: BackendConfig) -> Self {
        Self { http, config }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
    }

    async fn token(&self, grant: &str, body: &impl Serialize) -> DomainResult<Session> {
        let response = self
            .request(Method::POST, &format!("auth/v1/token?grant_type={}", grant))
            .json(body)
            .send()
            .await?;
        let token: TokenResponse = read_json(response).await?;
        Ok(token.into_session(Utc::now()))
    }
}

#[async_trait(?Send)]
impl IdentityProvider for HostedAuth {
    async fn sign_up(&self, form: &SignUpForm) -> DomainResult<SignUpOutcome> {
        let body = SignUpBody {
            email: &form.email,
            password: &form.password,
            data: SignUpMetadata {
                full_name: &form.full_name,
            },
        };
        let path = sign_up_path(form.email_redirect_to.as_deref());
        let response = self.request(Method::POST, &path).json(&body).send().await?;
        let value: Value = read_json(response).await?;
        decode_sign_up(value, Utc::now())
    }

    async fn sign_in(&self, credentials: &Credentials) -> DomainResult<Session> {
        let grant = PasswordGrant {
            email: &credentials.email,
            password: &credentials.password,
        };
        self.token("password", &grant).await
    }

    async fn current_user(&self, session: &Session) -> DomainResult<User> {
        let response = self
            .request(Method::GET, "auth/v1/user")
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let user: AuthUser = read_json(response).await?;
        Ok(user.into())
    }

    async fn refresh(&self, session: &Session) -> DomainResult<Session> {
        let grant = RefreshGrant {
            refresh_token: &session.refresh_token,
        };
        self.token("refresh_token", &grant).await
    }

    async fn sign_out(&self, session: &Session) -> DomainResult<()> {
        let response = self
            .request(Method::POST, "auth/v1/logout")
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_ID: &str = "c9f0f895-fb98-4b91-8e3f-2a1d5c1b7e22";

    #[test]
    fn test_token_response_to_session() {
        let json = format!(
            r#"{{"access_token":"jwt","token_type":"bearer","expires_in":3600,"expires_at":1750000000,
                "refresh_token":"r1","user":{{"id":"{}","email":"ana@example.com","user_metadata":{{"full_name":"Ana"}}}}}}"#,
            USER_ID
        );
        let token: TokenResponse = serde_json::from_str(&json).unwrap();
        let session = token.into_session(Utc::now());
        assert_eq!(session.access_token, "jwt");
        assert_eq!(session.expires_at.timestamp(), 1750000000);
        assert_eq!(session.user.full_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_expiry_falls_back_to_expires_in() {
        let json = format!(
            r#"{{"access_token":"jwt","expires_in":60,"refresh_token":"r1","user":{{"id":"{}","email":null}}}}"#,
            USER_ID
        );
        let token: TokenResponse = serde_json::from_str(&json).unwrap();
        let now = Utc::now();
        assert_eq!(token.into_session(now).expires_at, now + Duration::seconds(60));
    }

    #[test]
    fn test_sign_up_requiring_confirmation() {
        let value: Value = serde_json::from_str(&format!(
            r#"{{"id":"{}","email":"ana@example.com","confirmation_sent_at":"2025-05-01T10:00:00Z"}}"#,
            USER_ID
        ))
        .unwrap();
        let outcome = decode_sign_up(value, Utc::now()).unwrap();
        assert!(outcome.needs_confirmation());
        assert_eq!(outcome.user.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn test_sign_up_path_carries_redirect() {
        assert_eq!(sign_up_path(None), "auth/v1/signup");
        assert_eq!(
            sign_up_path(Some("https://gifts.example.com/dashboard?from=mail")),
            "auth/v1/signup?redirect_to=https://gifts.example.com/dashboard%3Ffrom%3Dmail"
        );
    }
}
