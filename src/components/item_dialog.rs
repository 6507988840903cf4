//! Item Dialog Component
//!
//! Modal form for adding an item to a list or editing an existing one.

use leptos::prelude::*;
use leptos::task::spawn_local;
use registry_core::domain::{coerce_quantity, FormState, Item, ItemDraft};
use uuid::Uuid;

use crate::commands;
use crate::components::FormError;
use crate::context::use_app_context;
use crate::store::{store_add_item, store_update_item, use_registry_store};

#[derive(Debug, Clone, PartialEq)]
pub enum ItemDialogMode {
    Add,
    Edit(Item),
}

#[component]
pub fn ItemDialog(
    list_id: Uuid,
    mode: ItemDialogMode,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_registry_store();

    let (initial, editing) = match &mode {
        ItemDialogMode::Add => (ItemDraft::default(), None),
        ItemDialogMode::Edit(item) => (ItemDraft::from_item(item), Some(item.id)),
    };
    let (title, idle_label, busy_label) = match editing {
        None => ("Add item", "Add item", "Adding..."),
        Some(_) => ("Edit item", "Save changes", "Saving..."),
    };

    let name = RwSignal::new(initial.name);
    let description = RwSignal::new(initial.description.unwrap_or_default());
    let link = RwSignal::new(initial.link.unwrap_or_default());
    let image_url = RwSignal::new(initial.image_url.unwrap_or_default());
    let quantity = RwSignal::new(initial.quantity.to_string());
    let priority = RwSignal::new(initial.priority.to_string());
    let form = RwSignal::new(FormState::Idle);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.try_update(|f| f.begin()).unwrap_or(false) {
            return;
        }
        let draft = ItemDraft {
            name: name.get_untracked(),
            description: Some(description.get_untracked()),
            link: Some(link.get_untracked()),
            image_url: Some(image_url.get_untracked()),
            quantity: coerce_quantity(&quantity.get_untracked()),
            priority: priority.get_untracked().trim().parse().unwrap_or(0),
        };

        spawn_local(async move {
            let result = async {
                let session = ctx.active_session().await?;
                match editing {
                    Some(item_id) => commands::update_item(&session, item_id, draft).await,
                    None => commands::add_item(&session, list_id, draft).await,
                }
            }
            .await;

            match result {
                Ok(item) => {
                    form.update(|f| f.succeed());
                    if editing.is_some() {
                        store_update_item(&store, item);
                    } else {
                        store_add_item(&store, item);
                    }
                    on_close.run(());
                }
                Err(e) => ctx.form_failed(form, &e),
            }
        });
    };

    view! {
        <div class="dialog-backdrop">
            <form class="dialog" on:submit=submit>
                <h2>{title}</h2>
                <label class="field">
                    <span>"Name"</span>
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span>"Description"</span>
                    <textarea
                        rows="2"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <label class="field">
                    <span>"Link"</span>
                    <input
                        type="url"
                        placeholder="https://"
                        prop:value=move || link.get()
                        on:input=move |ev| link.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span>"Image URL"</span>
                    <input
                        type="url"
                        placeholder="https://"
                        prop:value=move || image_url.get()
                        on:input=move |ev| image_url.set(event_target_value(&ev))
                    />
                </label>
                <div class="field-row">
                    <label class="field">
                        <span>"Quantity"</span>
                        <input
                            type="number"
                            min="1"
                            prop:value=move || quantity.get()
                            on:input=move |ev| quantity.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        <span>"Priority"</span>
                        <input
                            type="number"
                            prop:value=move || priority.get()
                            on:input=move |ev| priority.set(event_target_value(&ev))
                        />
                    </label>
                </div>
                <FormError form=form />
                <div class="dialog-actions">
                    <button type="button" class="secondary-btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" disabled=move || form.with(|f| f.is_submitting())>
                        {move || form.with(|f| f.label(idle_label, busy_label).to_string())}
                    </button>
                </div>
            </form>
        </div>
    }
}
