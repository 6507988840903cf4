//! List Detail Page
//!
//! Owner's view of one list: details, items, sharing and reservations.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use registry_core::domain::{reserved_units, DomainError, Item};
use uuid::Uuid;

use crate::commands;
use crate::components::{
    DashboardHeader, DeleteConfirmButton, EditListDialog, GiftItemCard, ItemDialog, ItemDialogMode,
    ReservationsCard, ShareListCard,
};
use crate::context::use_app_context;
use crate::store::{
    store_close_list, store_open_list, store_remove_list, use_registry_store, RegistryStateStoreFields,
};

#[component]
pub fn ListDetailPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_registry_store();
    let params = use_params_map();
    let list_id = Memo::new(move |_| {
        params
            .read()
            .get("list_id")
            .and_then(|raw| Uuid::parse_str(&raw).ok())
    });

    let item_dialog = RwSignal::new(None::<ItemDialogMode>);
    let editing_list = RwSignal::new(false);

    // Load the list, its items and reservations when the route changes
    Effect::new(move |_| {
        let Some(id) = list_id.get() else {
            ctx.notify("That list does not exist");
            ctx.redirect("/dashboard");
            return;
        };
        store_close_list(&store);
        spawn_local(async move {
            let result = async {
                let session = ctx.active_session().await?;
                let detail = commands::get_owned_list(&session, id).await?;
                let reservations = commands::list_reservations(&session, id).await?;
                Ok::<_, DomainError>((detail, reservations))
            }
            .await;
            match result {
                Ok((detail, reservations)) => store_open_list(&store, detail.list, detail.items, reservations),
                Err(e) => ctx.fail(&e),
            }
        });
    });

    on_cleanup(move || store_close_list(&store));

    let delete_list = move |_: ()| {
        let Some(id) = list_id.get_untracked() else {
            return;
        };
        spawn_local(async move {
            let result = async {
                let session = ctx.active_session().await?;
                commands::delete_list(&session, id).await
            }
            .await;
            match result {
                Ok(()) => {
                    store_remove_list(&store, id);
                    ctx.notify("List deleted");
                    ctx.redirect("/dashboard");
                }
                Err(e) => ctx.fail(&e),
            }
        });
    };

    let total_items = move || store.items().read().len();
    let total_reserved = move || reserved_units(&store.items().read());

    view! {
        <DashboardHeader />
        <section class="list-detail">
            {move || match store.current_list().get() {
                None => view! { <p class="loading">"Loading..."</p> }.into_any(),
                Some(list) => view! {
                    <div class="list-header" style=format!("border-color: {}", list.theme_color)>
                        {list.cover_image.clone().map(|src| view! { <img class="list-cover" src=src alt="" /> })}
                        <h1>{list.title.clone()}</h1>
                        {list.description.clone().map(|d| view! { <p>{d}</p> })}
                        {list.event_date.map(|date| view! {
                            <p class="event-date">{date.format("%A, %B %-d, %Y").to_string()}</p>
                        })}
                        <div class="list-actions">
                            <button type="button" class="secondary-btn" on:click=move |_| editing_list.set(true)>
                                "Edit list"
                            </button>
                            <DeleteConfirmButton
                                label="Delete list"
                                prompt="Delete this list, its items and reservations?"
                                on_confirm=delete_list
                            />
                        </div>
                    </div>
                    <ShareListCard slug=list.slug.clone() />
                }.into_any(),
            }}

            <div class="list-stats">
                <span>{move || format!("{} item(s)", total_items())}</span>
                <span>{move || format!("{} reserved", total_reserved())}</span>
            </div>

            <div class="section-head">
                <h2>"Items"</h2>
                <button type="button" on:click=move |_| item_dialog.set(Some(ItemDialogMode::Add))>
                    "Add item"
                </button>
            </div>
            <Show
                when=move || !store.items().read().is_empty()
                fallback=|| view! { <p class="empty">"No items yet. Add the first gift idea."</p> }
            >
                <div class="item-grid">
                    <For
                        each=move || store.items().get()
                        key=|item| (item.id, item.updated_at, item.reserved_count)
                        children=move |item| view! {
                            <GiftItemCard
                                item=item
                                on_edit=move |item: Item| item_dialog.set(Some(ItemDialogMode::Edit(item)))
                            />
                        }
                    />
                </div>
            </Show>

            <ReservationsCard />
        </section>

        {move || {
            let id = list_id.get()?;
            let mode = item_dialog.get()?;
            Some(view! {
                <ItemDialog list_id=id mode=mode on_close=move |_: ()| item_dialog.set(None) />
            })
        }}
        {move || {
            if !editing_list.get() {
                return None;
            }
            let list = store.current_list().get()?;
            Some(view! {
                <EditListDialog list=list on_close=move |_: ()| editing_list.set(false) />
            })
        }}
    }
}
