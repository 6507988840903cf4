//! Application Context
//!
//! Shared state provided via Leptos Context API: the signed-in session
//! (persisted to localStorage) and transient notifications.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use registry_core::domain::{DomainError, DomainResult, FormState, Session};

use crate::commands;

const SESSION_KEY: &str = "gift-registry.session";
const NOTICE_MILLIS: u32 = 5_000;

/// A dismissible message shown in the corner of the page
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
}

/// Issues notice ids. Ids are never reused, so the dismiss timer of an
/// old notice cannot remove a newer one.
#[derive(Debug, Default)]
pub struct NoticeIds {
    next: u64,
}

impl NoticeIds {
    pub fn issue(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Scheme, host and port of the running app, e.g. `https://gifts.example.com`
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn load_session() -> Option<Session> {
    let raw = local_storage()?.get_item(SESSION_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("Discarding stored session: {}", e);
            None
        }
    }
}

fn store_session(session: Option<&Session>) {
    let Some(storage) = local_storage() else {
        return;
    };
    let result = match session.map(serde_json::to_string) {
        Some(Ok(raw)) => storage.set_item(SESSION_KEY, &raw),
        Some(Err(e)) => {
            log::error!("Failed to encode session: {}", e);
            return;
        }
        None => storage.remove_item(SESSION_KEY),
    };
    if result.is_err() {
        log::warn!("localStorage is not writable");
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Signed-in session - read
    pub session: ReadSignal<Option<Session>>,
    /// Signed-in session - write
    set_session: WriteSignal<Option<Session>>,
    /// Notifications - read
    pub notices: ReadSignal<Vec<Notice>>,
    /// Notifications - write
    set_notices: WriteSignal<Vec<Notice>>,
    notice_ids: StoredValue<NoticeIds>,
    /// Route requested outside a component - read
    pub redirect_to: ReadSignal<Option<String>>,
    /// Route requested outside a component - write
    set_redirect_to: WriteSignal<Option<String>>,
}

impl AppContext {
    /// Restore the session saved by a previous visit
    pub fn new() -> Self {
        let (session, set_session) = signal(load_session());
        let (notices, set_notices) = signal(Vec::new());
        let (redirect_to, set_redirect_to) = signal(None);
        Self {
            session,
            set_session,
            notices,
            set_notices,
            redirect_to,
            set_redirect_to,
            notice_ids: StoredValue::new(NoticeIds::default()),
        }
    }

    pub fn set_session(&self, session: Option<Session>) {
        store_session(session.as_ref());
        self.set_session.set(session);
    }

    /// The session for an authenticated call, refreshed and saved if it expired
    pub async fn active_session(&self) -> DomainResult<Session> {
        let current = self.session.get_untracked();
        let session = commands::active_session(current.clone()).await?;
        if current.as_ref() != Some(&session) {
            self.set_session(Some(session.clone()));
        }
        Ok(session)
    }

    /// Drop a stored session the provider no longer accepts
    pub async fn verify_session(&self) {
        if self.session.get_untracked().is_none() {
            return;
        }
        let result = async {
            let session = self.active_session().await?;
            commands::current_user(&session).await
        }
        .await;
        match result {
            Ok(user) => log::debug!("Session belongs to {}", user.id),
            Err(DomainError::Unauthenticated) => {
                log::info!("Stored session was revoked");
                self.set_session(None);
            }
            Err(e) => log::warn!("Could not verify session: {}", e),
        }
    }

    /// Show a notification; it dismisses itself after a few seconds
    pub fn notify(&self, message: impl Into<String>) {
        let Some(id) = self.notice_ids.try_update_value(NoticeIds::issue) else {
            return;
        };
        let message = message.into();
        self.set_notices.update(|list| list.push(Notice { id, message }));

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_MILLIS).await;
            ctx.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.set_notices.update(|list| list.retain(|n| n.id != id));
    }

    /// Ask the router to navigate; handled by the app's redirect listener
    pub fn redirect(&self, path: impl Into<String>) {
        self.set_redirect_to.set(Some(path.into()));
    }

    pub fn clear_redirect(&self) {
        self.set_redirect_to.set(None);
    }

    /// Report a failed call: back to the login page when signed out, to
    /// the dashboard when the record cannot be seen, otherwise a notification.
    pub fn fail(&self, err: &DomainError) {
        log::warn!("{}", err);
        if err.is_auth_failure() {
            self.set_session(None);
            self.redirect("/auth/login");
            return;
        }
        self.notify(err.user_message());
        if err.is_access_failure() {
            self.redirect("/dashboard");
        }
    }

    /// Report a failed form submission. Validation and availability errors
    /// stay inline on the form; everything else also goes through `fail`.
    pub fn form_failed(&self, form: RwSignal<FormState>, err: &DomainError) {
        form.update(|f| f.fail(err.user_message()));
        match err {
            DomainError::InvalidInput(_) | DomainError::Conflict(_) => log::debug!("{}", err),
            _ => self.fail(err),
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_ids_not_reused_after_dismiss() {
        let mut ids = NoticeIds::default();
        let mut notices = vec![
            Notice { id: ids.issue(), message: "first".into() },
            Notice { id: ids.issue(), message: "second".into() },
        ];
        // Dismiss the newest, then raise another notice
        let newest = notices.pop().map(|n| n.id);
        let fresh = ids.issue();
        assert_ne!(Some(fresh), newest);
        assert!(notices.iter().all(|n| n.id != fresh));
        assert_eq!(fresh, 2);
    }
}
