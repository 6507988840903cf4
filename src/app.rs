//! Gift Registry Frontend App
//!
//! Router, shared context and the page routes.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::path;
use reactive_stores::Store;

use crate::components::Notifications;
use crate::context::{use_app_context, AppContext};
use crate::pages::{
    DashboardPage, HomePage, ListDetailPage, LoginPage, NewListPage, NotFoundPage, PublicListPage,
    SignUpPage, SignUpSuccessPage,
};
use crate::store::RegistryState;

#[component]
pub fn App() -> impl IntoView {
    // Provide context to all children
    let ctx = AppContext::new();
    provide_context(ctx);
    provide_context(Store::new(RegistryState::default()));

    // Check a session restored from a previous visit
    Effect::new(move |_| {
        spawn_local(async move { ctx.verify_session().await });
    });

    view! {
        <Router>
            <RedirectListener />
            <Notifications />
            <main class="app">
                <Routes fallback=|| view! { <NotFoundPage /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/auth/login") view=LoginPage />
                    <Route path=path!("/auth/sign-up") view=SignUpPage />
                    <Route path=path!("/auth/sign-up-success") view=SignUpSuccessPage />
                    <Route path=path!("/dashboard") view=DashboardPage />
                    <Route path=path!("/dashboard/new") view=NewListPage />
                    <Route path=path!("/dashboard/:list_id") view=ListDetailPage />
                    <Route path=path!("/list/:slug") view=PublicListPage />
                </Routes>
            </main>
        </Router>
    }
}

/// Performs navigation requested through `AppContext::redirect`
#[component]
fn RedirectListener() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if let Some(path) = ctx.redirect_to.get() {
            log::debug!("[APP] Redirecting to {}", path);
            ctx.clear_redirect();
            navigate(&path, Default::default());
        }
    });
}
