//! Sign-Up Confirmation Page

use leptos::prelude::*;

#[component]
pub fn SignUpSuccessPage() -> impl IntoView {
    view! {
        <section class="auth-page">
            <div class="auth-card">
                <h1>"Thanks for signing up!"</h1>
                <p>"Check your email to confirm your account, then sign in to start your first list."</p>
                <a class="primary-link" href="/auth/login">"Go to sign in"</a>
            </div>
        </section>
    }
}
