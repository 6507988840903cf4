//! Dashboard Page
//!
//! The signed-in user's lists.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{DashboardHeader, ListCard};
use crate::context::use_app_context;
use crate::store::{store_set_lists, use_registry_store, RegistryStateStoreFields};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_registry_store();
    let (loading, set_loading) = signal(true);

    // Load lists on mount
    Effect::new(move |_| {
        spawn_local(async move {
            let result = async {
                let session = ctx.active_session().await?;
                commands::list_my_lists(&session).await
            }
            .await;
            match result {
                Ok(lists) => {
                    log::debug!("[DASHBOARD] Loaded {} lists", lists.len());
                    store_set_lists(&store, lists);
                }
                Err(e) => ctx.fail(&e),
            }
            set_loading.try_set(false);
        });
    });

    view! {
        <DashboardHeader />
        <section class="dashboard">
            <div class="section-head">
                <h1>"My lists"</h1>
                <a class="primary-link" href="/dashboard/new">"New list"</a>
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Loading..."</p> }>
                <Show
                    when=move || !store.lists().read().is_empty()
                    fallback=|| view! {
                        <div class="empty">
                            <p>"You have no lists yet."</p>
                            <a href="/dashboard/new">"Create your first list"</a>
                        </div>
                    }
                >
                    <div class="list-grid">
                        <For
                            each=move || store.lists().get()
                            key=|summary| (summary.list.id, summary.list.updated_at, summary.item_count)
                            children=move |summary| view! { <ListCard summary=summary /> }
                        />
                    </div>
                </Show>
            </Show>
        </section>
    }
}
