//! Edit List Dialog Component
//!
//! Modal form for a list's details and cover image. Removing the cover
//! takes effect when the changes are saved.

use leptos::prelude::*;
use leptos::task::spawn_local;
use registry_core::domain::{FormState, GiftList, ListDraft};

use crate::commands;
use crate::components::{FormError, ListFields};
use crate::context::use_app_context;
use crate::store::{store_update_list, use_registry_store};

#[component]
pub fn EditListDialog(list: GiftList, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_registry_store();
    let list_id = list.id;

    let draft = RwSignal::new(ListDraft::from_list(&list));
    let form = RwSignal::new(FormState::Idle);
    let upload = RwSignal::new(FormState::Idle);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.try_update(|f| f.begin()).unwrap_or(false) {
            return;
        }
        let changes = draft.get_untracked();
        spawn_local(async move {
            let result = async {
                let session = ctx.active_session().await?;
                commands::update_list(&session, list_id, changes).await
            }
            .await;
            match result {
                Ok(updated) => {
                    form.update(|f| f.succeed());
                    store_update_list(&store, updated);
                    on_close.run(());
                }
                Err(e) => ctx.form_failed(form, &e),
            }
        });
    };

    let pick_cover = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        if !upload.try_update(|f| f.begin()).unwrap_or(false) {
            return;
        }
        log::debug!("[COVER] Uploading {} ({} bytes)", file.name(), file.size());
        spawn_local(async move {
            let result = async {
                let cover = commands::read_cover_file(file).await?;
                let session = ctx.active_session().await?;
                commands::upload_cover_image(&session, list_id, cover).await
            }
            .await;
            match result {
                Ok(updated) => {
                    upload.update(|f| f.succeed());
                    draft.update(|d| d.cover_image = updated.cover_image.clone());
                    store_update_list(&store, updated);
                }
                Err(e) => ctx.form_failed(upload, &e),
            }
        });
    };

    view! {
        <div class="dialog-backdrop">
            <form class="dialog" on:submit=submit>
                <h2>"Edit list"</h2>
                <ListFields draft=draft />
                <div class="field">
                    <span>"Cover image"</span>
                    {move || draft.with(|d| d.cover_image.clone()).map(|src| view! {
                        <img class="cover-preview" src=src alt="" />
                        <button
                            type="button"
                            class="secondary-btn"
                            disabled=move || upload.with(|f| f.is_submitting())
                            on:click=move |_| draft.update(|d| d.cover_image = None)
                        >
                            "Remove cover"
                        </button>
                    })}
                    <input
                        type="file"
                        accept="image/*"
                        disabled=move || upload.with(|f| f.is_submitting())
                        on:change=pick_cover
                    />
                    <Show when=move || upload.with(|f| f.is_submitting())>
                        <span class="hint">"Uploading..."</span>
                    </Show>
                    <FormError form=upload />
                </div>
                <FormError form=form />
                <div class="dialog-actions">
                    <button type="button" class="secondary-btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" disabled=move || form.with(|f| f.is_submitting())>
                        {move || form.with(|f| f.label("Save changes", "Saving...").to_string())}
                    </button>
                </div>
            </form>
        </div>
    }
}
