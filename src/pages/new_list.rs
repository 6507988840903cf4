//! New List Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use registry_core::domain::{FormState, ListDraft};

use crate::commands;
use crate::components::{DashboardHeader, FormError, ListFields};
use crate::context::use_app_context;

#[component]
pub fn NewListPage() -> impl IntoView {
    let ctx = use_app_context();
    let draft = RwSignal::new(ListDraft::default());
    let form = RwSignal::new(FormState::Idle);

    Effect::new(move |_| {
        if ctx.session.get_untracked().is_none() {
            ctx.redirect("/auth/login");
        }
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.try_update(|f| f.begin()).unwrap_or(false) {
            return;
        }
        let new_list = draft.get_untracked();
        spawn_local(async move {
            let result = async {
                let session = ctx.active_session().await?;
                commands::create_list(&session, new_list).await
            }
            .await;
            match result {
                Ok(list) => {
                    form.update(|f| f.succeed());
                    ctx.redirect(format!("/dashboard/{}", list.id));
                }
                Err(e) => ctx.form_failed(form, &e),
            }
        });
    };

    view! {
        <DashboardHeader />
        <section class="new-list">
            <form class="card" on:submit=submit>
                <h1>"New list"</h1>
                <ListFields draft=draft />
                <label class="field">
                    <span>"Cover image URL"</span>
                    <input
                        type="url"
                        placeholder="https://example.com/cover.jpg"
                        prop:value=move || draft.with(|d| d.cover_image.clone().unwrap_or_default())
                        on:input=move |ev| draft.update(|d| d.cover_image = Some(event_target_value(&ev)))
                    />
                </label>
                {move || draft.with(|d| d.cover_image.clone()).filter(|src| !src.trim().is_empty()).map(|src| view! {
                    <img class="cover-preview" src=src alt="" />
                })}
                <FormError form=form />
                <div class="dialog-actions">
                    <a class="secondary-link" href="/dashboard">"Cancel"</a>
                    <button type="submit" disabled=move || form.with(|f| f.is_submitting())>
                        {move || form.with(|f| f.label("Create list", "Creating...").to_string())}
                    </button>
                </div>
            </form>
        </section>
    }
}
