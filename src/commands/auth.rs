//! Auth Commands

use registry_core::commands as core;
use registry_core::domain::{Credentials, DomainResult, Session, SignUpForm, SignUpOutcome, User};

use super::backend;

pub async fn sign_up(form: SignUpForm) -> DomainResult<SignUpOutcome> {
    core::sign_up(&backend()?.identity(), form).await
}

pub async fn sign_in(credentials: Credentials) -> DomainResult<Session> {
    core::sign_in(&backend()?.identity(), credentials).await
}

/// Validate the stored session, refreshing it if it expired
pub async fn active_session(current: Option<Session>) -> DomainResult<Session> {
    core::require_session(&backend()?.identity(), current.as_ref()).await
}

pub async fn current_user(session: &Session) -> DomainResult<User> {
    core::current_user(&backend()?.identity(), session).await
}

pub async fn sign_out(session: &Session) -> DomainResult<()> {
    core::sign_out(&backend()?.identity(), session).await
}
