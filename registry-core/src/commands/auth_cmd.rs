//! Authentication Commands

use chrono::Utc;

use crate::domain::{Credentials, DomainError, DomainResult, Session, SignUpForm, SignUpOutcome, User};
use crate::repository::IdentityProvider;

pub async fn sign_up(identity: &dyn IdentityProvider, form: SignUpForm) -> DomainResult<SignUpOutcome> {
    let form = form.normalized()?;
    let outcome = identity.sign_up(&form).await?;
    log::info!("Signed up {}", outcome.user.id);
    Ok(outcome)
}

pub async fn sign_in(identity: &dyn IdentityProvider, credentials: Credentials) -> DomainResult<Session> {
    let credentials = credentials.normalized()?;
    let session = identity.sign_in(&credentials).await?;
    log::info!("Signed in {}", session.user_id());
    Ok(session)
}

/// The session to use for an authenticated call, refreshed if it expired
pub async fn require_session(identity: &dyn IdentityProvider, session: Option<&Session>) -> DomainResult<Session> {
    let session = session.ok_or(DomainError::Unauthenticated)?;
    if !session.is_expired(Utc::now()) {
        return Ok(session.clone());
    }
    log::debug!("Refreshing session for {}", session.user_id());
    identity.refresh(session).await.map_err(|e| match e {
        DomainError::InvalidInput(_) => DomainError::Unauthenticated,
        other => other,
    })
}

/// Ask the provider who the session belongs to; fails with
/// `Unauthenticated` once the session has been revoked
pub async fn current_user(identity: &dyn IdentityProvider, session: &Session) -> DomainResult<User> {
    identity.current_user(session).await
}

pub async fn sign_out(identity: &dyn IdentityProvider, session: &Session) -> DomainResult<()> {
    identity.sign_out(session).await?;
    log::info!("Signed out {}", session.user_id());
    Ok(())
}
