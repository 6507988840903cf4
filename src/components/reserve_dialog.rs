//! Reserve Dialog Component
//!
//! Visitor form for reserving units of an item. On success it shows a
//! confirmation, then closes itself and asks the page to reload.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use registry_core::domain::{coerce_quantity, FormState, Item, NewReservation};

use crate::commands;
use crate::components::FormError;
use crate::context::use_app_context;

/// How long the confirmation stays up before the dialog closes
const CONFIRM_MILLIS: u32 = 2_000;

#[component]
pub fn ReserveDialog(
    item: Item,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_reserved: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let available = item.display_available();
    let item_name = item.name.clone();
    let snapshot = StoredValue::new(item);

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let quantity = RwSignal::new("1".to_string());
    let message = RwSignal::new(String::new());
    let form = RwSignal::new(FormState::Idle);

    let reset = move || {
        name.try_set(String::new());
        email.try_set(String::new());
        quantity.try_set("1".to_string());
        message.try_set(String::new());
        form.try_set(FormState::Idle);
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.try_update(|f| f.begin()).unwrap_or(false) {
            return;
        }
        let item = snapshot.get_value();
        let mut draft = NewReservation::new(item.id, &name.get_untracked(), coerce_quantity(&quantity.get_untracked()));
        draft.reserver_email = Some(email.get_untracked());
        draft.message = Some(message.get_untracked());

        spawn_local(async move {
            match commands::reserve_item(&item, draft).await {
                Ok(reservation) => {
                    log::info!("[RESERVE] {} unit(s) of {}", reservation.quantity, item.name);
                    form.update(|f| f.succeed());
                    TimeoutFuture::new(CONFIRM_MILLIS).await;
                    reset();
                    on_close.run(());
                    on_reserved.run(());
                }
                Err(e) => ctx.form_failed(form, &e),
            }
        });
    };

    view! {
        <div class="dialog-backdrop">
            <Show
                when=move || form.with(|f| f.is_success())
                fallback=move || {
                    let item_name = item_name.clone();
                    view! {
                        <form class="dialog" on:submit=submit>
                            <h2>{format!("Reserve {}", item_name)}</h2>
                            <p class="hint">{format!("{} available", available)}</p>
                            <label class="field">
                                <span>"Your name"</span>
                                <input
                                    type="text"
                                    prop:value=move || name.get()
                                    on:input=move |ev| name.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="field">
                                <span>"Email (optional)"</span>
                                <input
                                    type="email"
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="field">
                                <span>"Quantity"</span>
                                <input
                                    type="number"
                                    min="1"
                                    max=available.to_string()
                                    prop:value=move || quantity.get()
                                    on:input=move |ev| quantity.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="field">
                                <span>"Message (optional)"</span>
                                <textarea
                                    rows="2"
                                    prop:value=move || message.get()
                                    on:input=move |ev| message.set(event_target_value(&ev))
                                ></textarea>
                            </label>
                            <FormError form=form />
                            <div class="dialog-actions">
                                <button type="button" class="secondary-btn" on:click=move |_| on_close.run(())>
                                    "Cancel"
                                </button>
                                <button
                                    type="submit"
                                    disabled=move || {
                                        let requested = coerce_quantity(&quantity.get());
                                        form.with(|f| f.is_submitting())
                                            || !snapshot.with_value(|item| item.can_reserve(requested))
                                    }
                                >
                                    {move || form.with(|f| f.label("Reserve", "Reserving...").to_string())}
                                </button>
                            </div>
                        </form>
                    }
                }
            >
                <div class="dialog confirmation">
                    <h2>"Thank you!"</h2>
                    <p>"Your reservation is saved."</p>
                </div>
            </Show>
        </div>
    }
}
