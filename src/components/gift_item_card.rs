//! Gift Item Card Component
//!
//! Owner's view of one item with edit and delete actions.

use leptos::prelude::*;
use leptos::task::spawn_local;
use registry_core::domain::Item;

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::store::{store_remove_item, use_registry_store};

#[component]
pub fn GiftItemCard(item: Item, #[prop(into)] on_edit: Callback<Item>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_registry_store();
    let item_id = item.id;

    let delete = move |_: ()| {
        spawn_local(async move {
            let result = async {
                let session = ctx.active_session().await?;
                commands::delete_item(&session, item_id).await
            }
            .await;
            match result {
                Ok(()) => store_remove_item(&store, item_id),
                Err(e) => ctx.fail(&e),
            }
        });
    };

    let stats = format!(
        "Quantity {} · Reserved {} · Available {}",
        item.quantity,
        item.reserved_count,
        item.display_available()
    );
    let card_class = if item.is_fully_reserved() {
        "gift-item-card reserved"
    } else {
        "gift-item-card"
    };
    let edit_item = item.clone();

    view! {
        <div class=card_class>
            {item.image_url.clone().map(|src| view! { <img class="gift-item-image" src=src alt="" /> })}
            <div class="gift-item-body">
                <h3>{item.name.clone()}</h3>
                {item.description.clone().map(|d| view! { <p class="gift-item-description">{d}</p> })}
                {item.link.clone().map(|href| view! {
                    <a href=href target="_blank" rel="noopener noreferrer">"View product"</a>
                })}
                <p class="gift-item-stats">{stats}</p>
                {(item.priority != 0).then(|| view! { <span class="badge">{format!("Priority {}", item.priority)}</span> })}
            </div>
            <div class="gift-item-actions">
                <button type="button" class="secondary-btn" on:click=move |_| on_edit.run(edit_item.clone())>
                    "Edit"
                </button>
                <DeleteConfirmButton label="Delete" prompt="Delete this item?" on_confirm=delete />
            </div>
        </div>
    }
}
