//! Landing Page

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_app_context();
    let signed_in = move || ctx.session.get().is_some();

    view! {
        <section class="hero">
            <h1>"Gift Registry"</h1>
            <p>"Create a gift list for any occasion, share one link, and let friends reserve what they will bring."</p>
            <Show
                when=signed_in
                fallback=|| view! {
                    <div class="hero-actions">
                        <a class="primary-link" href="/auth/sign-up">"Get started"</a>
                        <a class="secondary-link" href="/auth/login">"Sign in"</a>
                    </div>
                }
            >
                <div class="hero-actions">
                    <a class="primary-link" href="/dashboard">"Go to my lists"</a>
                </div>
            </Show>
        </section>
    }
}
