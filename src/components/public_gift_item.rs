//! Public Gift Item Component
//!
//! Visitor's view of one item with its availability and a reserve action.

use leptos::prelude::*;
use registry_core::domain::Item;

use crate::components::ReserveDialog;

#[component]
pub fn PublicGiftItem(item: Item, #[prop(into)] on_reserved: Callback<()>) -> impl IntoView {
    let (reserving, set_reserving) = signal(false);
    let fully_reserved = item.is_fully_reserved();
    let availability = if fully_reserved {
        "Fully reserved".to_string()
    } else {
        format!("{} of {} available", item.display_available(), item.quantity)
    };
    let dialog_item = StoredValue::new(item.clone());

    view! {
        <div class=if fully_reserved { "public-item reserved" } else { "public-item" }>
            {item.image_url.clone().map(|src| view! { <img class="gift-item-image" src=src alt="" /> })}
            <div class="gift-item-body">
                <h3>{item.name.clone()}</h3>
                {item.description.clone().map(|d| view! { <p class="gift-item-description">{d}</p> })}
                {item.link.clone().map(|href| view! {
                    <a href=href target="_blank" rel="noopener noreferrer">"View product"</a>
                })}
                <span class=if fully_reserved { "badge muted" } else { "badge" }>{availability}</span>
            </div>
            <button
                type="button"
                disabled=fully_reserved
                on:click=move |_| set_reserving.set(true)
            >
                "Reserve"
            </button>
            <Show when=move || reserving.get()>
                <ReserveDialog
                    item=dialog_item.get_value()
                    on_close=move |_: ()| set_reserving.set(false)
                    on_reserved=move |_: ()| on_reserved.run(())
                />
            </Show>
        </div>
    }
}
