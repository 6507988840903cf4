//! List Form Fields
//!
//! Title, description, event date and theme inputs shared by the
//! new-list page and the edit dialog.

use chrono::NaiveDate;
use leptos::prelude::*;
use registry_core::domain::ListDraft;

use crate::components::ThemePicker;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[component]
pub fn ListFields(draft: RwSignal<ListDraft>) -> impl IntoView {
    let theme = Signal::derive(move || draft.with(|d| d.theme_color.clone()));

    view! {
        <label class="field">
            <span>"Title"</span>
            <input
                type="text"
                placeholder="Baby Shower"
                prop:value=move || draft.with(|d| d.title.clone())
                on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
            />
        </label>
        <label class="field">
            <span>"Description"</span>
            <textarea
                rows="3"
                prop:value=move || draft.with(|d| d.description.clone().unwrap_or_default())
                on:input=move |ev| draft.update(|d| d.description = Some(event_target_value(&ev)))
            ></textarea>
        </label>
        <label class="field">
            <span>"Event date"</span>
            <input
                type="date"
                prop:value=move || draft.with(|d| {
                    d.event_date.map(|date| date.format(DATE_FORMAT).to_string()).unwrap_or_default()
                })
                on:input=move |ev| {
                    let date = NaiveDate::parse_from_str(&event_target_value(&ev), DATE_FORMAT).ok();
                    draft.update(|d| d.event_date = date);
                }
            />
        </label>
        <div class="field">
            <span>"Theme"</span>
            <ThemePicker
                value=theme
                on_pick=move |color: String| draft.update(|d| d.theme_color = color)
            />
        </div>
    }
}
