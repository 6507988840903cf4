//! Dashboard Header Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;

/// Top bar of the signed-in pages with the user's email and sign-out
#[component]
pub fn DashboardHeader() -> impl IntoView {
    let ctx = use_app_context();

    let email = move || {
        ctx.session
            .get()
            .and_then(|s| s.user.email)
            .unwrap_or_default()
    };

    let sign_out = move |_| {
        spawn_local(async move {
            if let Some(session) = ctx.session.get_untracked() {
                // The local session is dropped even if revocation fails
                if let Err(e) = commands::sign_out(&session).await {
                    log::warn!("Sign-out request failed: {}", e);
                }
            }
            ctx.set_session(None);
            ctx.redirect("/");
        });
    };

    view! {
        <header class="dashboard-header">
            <a href="/dashboard" class="brand">"Gift Registry"</a>
            <div class="header-user">
                <span class="user-email">{email}</span>
                <button type="button" class="secondary-btn" on:click=sign_out>"Sign out"</button>
            </div>
        </header>
    }
}
