//! Share List Card Component

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use registry_core::domain::share_url;

use crate::commands;
use crate::context::{page_origin, use_app_context};

/// How long the "Copied" confirmation stays visible
const COPIED_MILLIS: u32 = 2_000;

/// Public link to a list with a copy-to-clipboard button
#[component]
pub fn ShareListCard(#[prop(into)] slug: String) -> impl IntoView {
    let ctx = use_app_context();
    let url = share_url(&page_origin(), &slug);
    let (copied, set_copied) = signal(false);

    let copy_url = url.clone();
    let copy = move |_| {
        let url = copy_url.clone();
        spawn_local(async move {
            match commands::copy_text(&url).await {
                Ok(()) => {
                    set_copied.set(true);
                    TimeoutFuture::new(COPIED_MILLIS).await;
                    set_copied.try_set(false);
                }
                Err(e) => {
                    log::warn!("{}", e);
                    ctx.notify("Could not copy the link");
                }
            }
        });
    };

    view! {
        <div class="share-card">
            <h3>"Share your list"</h3>
            <p class="hint">"Anyone with this link can view the list and reserve gifts."</p>
            <div class="share-row">
                <input type="text" readonly prop:value=url.clone() />
                <button type="button" on:click=copy>
                    {move || if copied.get() { "Copied!" } else { "Copy link" }}
                </button>
            </div>
            <a href=url target="_blank" rel="noopener noreferrer">"Open public page"</a>
        </div>
    }
}
