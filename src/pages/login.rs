//! Sign-In Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use registry_core::domain::{Credentials, FormState};

use crate::commands;
use crate::components::FormError;
use crate::context::use_app_context;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let form = RwSignal::new(FormState::Idle);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.try_update(|f| f.begin()).unwrap_or(false) {
            return;
        }
        let credentials = Credentials {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        spawn_local(async move {
            match commands::sign_in(credentials).await {
                Ok(session) => {
                    form.update(|f| f.succeed());
                    ctx.set_session(Some(session));
                    ctx.redirect("/dashboard");
                }
                Err(e) => ctx.form_failed(form, &e),
            }
        });
    };

    view! {
        <section class="auth-page">
            <form class="auth-card" on:submit=submit>
                <h1>"Sign in"</h1>
                <label class="field">
                    <span>"Email"</span>
                    <input
                        type="email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span>"Password"</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <FormError form=form />
                <button type="submit" disabled=move || form.with(|f| f.is_submitting())>
                    {move || form.with(|f| f.label("Sign in", "Signing in...").to_string())}
                </button>
                <p class="hint">"No account yet? " <a href="/auth/sign-up">"Sign up"</a></p>
            </form>
        </section>
    }
}
