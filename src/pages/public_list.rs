//! Public List Page
//!
//! What visitors see behind a share link. No session is needed.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use registry_core::domain::{DomainError, PublicList};

use crate::commands;
use crate::components::PublicGiftItem;
use crate::context::use_app_context;

#[component]
pub fn PublicListPage() -> impl IntoView {
    let ctx = use_app_context();
    let params = use_params_map();
    let slug = Memo::new(move |_| params.read().get("slug").unwrap_or_default());

    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let public = RwSignal::new(None::<PublicList>);
    let (missing, set_missing) = signal(false);

    // Load when the slug changes or after a reservation
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        let slug = slug.get();
        log::debug!("[PUBLIC] Loading {}, trigger={}", slug, trigger);
        spawn_local(async move {
            match commands::get_public_list(&slug).await {
                Ok(list) => {
                    set_missing.set(false);
                    public.set(Some(list));
                }
                Err(DomainError::NotFound(_)) => set_missing.set(true),
                Err(e) => {
                    log::error!("Failed to load list {}: {}", slug, e);
                    ctx.notify(e.user_message());
                }
            }
        });
    });

    let reload = move |_: ()| set_reload_trigger.update(|n| *n += 1);

    view! {
        <section class="public-list">
            {move || {
                if missing.get() {
                    return view! {
                        <div class="not-found">
                            <h1>"List not found"</h1>
                            <p>"This list may have been deleted, or the link is mistyped."</p>
                        </div>
                    }
                    .into_any();
                }
                let Some(list) = public.get() else {
                    return view! { <p class="loading">"Loading..."</p> }.into_any();
                };
                let header_style = format!("background-color: {}", list.list.theme_color);
                let stats = format!(
                    "{} gift(s) · {} reserved · {} still available",
                    list.total_items(),
                    list.total_reserved(),
                    list.total_available()
                );
                view! {
                    <header class="public-header" style=header_style>
                        {list.list.cover_image.clone().map(|src| view! { <img class="list-cover" src=src alt="" /> })}
                        <h1>{list.list.title.clone()}</h1>
                        {list.list.description.clone().map(|d| view! { <p>{d}</p> })}
                        {list.list.event_date.map(|date| view! {
                            <p class="event-date">{date.format("%A, %B %-d, %Y").to_string()}</p>
                        })}
                        <p class="list-stats">{stats}</p>
                    </header>
                    <div class="item-grid">
                        {list.items.into_iter().map(|item| view! {
                            <PublicGiftItem item=item on_reserved=reload />
                        }).collect_view()}
                    </div>
                }
                .into_any()
            }}
        </section>
    }
}
