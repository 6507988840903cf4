//! Notifications Component

use leptos::prelude::*;

use crate::context::use_app_context;

/// Transient error and status messages, newest at the bottom
#[component]
pub fn Notifications() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="notifications">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class="notice">
                            <span>{notice.message}</span>
                            <button class="notice-dismiss" on:click=move |_| ctx.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
