//! Sign-Up Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use registry_core::domain::{FormState, SignUpForm, MIN_PASSWORD_LEN};

use crate::commands;
use crate::components::FormError;
use crate::context::{page_origin, use_app_context};

#[component]
pub fn SignUpPage() -> impl IntoView {
    let ctx = use_app_context();
    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let repeat_password = RwSignal::new(String::new());
    let form = RwSignal::new(FormState::Idle);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.try_update(|f| f.begin()).unwrap_or(false) {
            return;
        }
        let sign_up_form = SignUpForm {
            full_name: full_name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            repeat_password: repeat_password.get_untracked(),
            email_redirect_to: Some(format!("{}/dashboard", page_origin())),
        };
        spawn_local(async move {
            match commands::sign_up(sign_up_form).await {
                Ok(outcome) => {
                    form.update(|f| f.succeed());
                    if let Some(session) = outcome.session {
                        ctx.set_session(Some(session));
                    }
                    ctx.redirect("/auth/sign-up-success");
                }
                Err(e) => ctx.form_failed(form, &e),
            }
        });
    };

    view! {
        <section class="auth-page">
            <form class="auth-card" on:submit=submit>
                <h1>"Create an account"</h1>
                <label class="field">
                    <span>"Full name"</span>
                    <input
                        type="text"
                        autocomplete="name"
                        prop:value=move || full_name.get()
                        on:input=move |ev| full_name.set(event_target_value(&ev))
                    />
                </label>
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
                        autocomplete="new-password"
                        placeholder=format!("At least {} characters", MIN_PASSWORD_LEN)
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span>"Repeat password"</span>
                    <input
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || repeat_password.get()
                        on:input=move |ev| repeat_password.set(event_target_value(&ev))
                    />
                </label>
                <FormError form=form />
                <button type="submit" disabled=move || form.with(|f| f.is_submitting())>
                    {move || form.with(|f| f.label("Sign up", "Creating account...").to_string())}
                </button>
                <p class="hint">"Already registered? " <a href="/auth/login">"Sign in"</a></p>
            </form>
        </section>
    }
}
