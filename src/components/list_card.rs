//! List Card Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use registry_core::domain::ListSummary;

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::store::{store_remove_list, use_registry_store};

/// Dashboard tile linking to a list's detail page, with shortcuts to the
/// public page and to deleting the list
#[component]
pub fn ListCard(summary: ListSummary) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_registry_store();
    let list = summary.list;
    let list_id = list.id;
    let href = format!("/dashboard/{}", list.id);
    let public_href = format!("/list/{}", list.slug);
    let style = format!("border-top-color: {}", list.theme_color);
    let items = match summary.item_count {
        1 => "1 item".to_string(),
        n => format!("{} items", n),
    };

    let delete = move |_: ()| {
        spawn_local(async move {
            let result = async {
                let session = ctx.active_session().await?;
                commands::delete_list(&session, list_id).await
            }
            .await;
            match result {
                Ok(()) => {
                    store_remove_list(&store, list_id);
                    ctx.notify("List deleted");
                }
                Err(e) => ctx.fail(&e),
            }
        });
    };

    view! {
        <div class="list-card" style=style>
            <a href=href class="list-card-link">
                {list.cover_image.map(|src| view! { <img class="list-card-cover" src=src alt="" /> })}
                <h3>{list.title}</h3>
                {list.description.map(|d| view! { <p class="list-card-description">{d}</p> })}
                <div class="list-card-meta">
                    <span>{items}</span>
                    {list.event_date.map(|date| view! { <span>{date.format("%B %-d, %Y").to_string()}</span> })}
                </div>
            </a>
            <div class="list-card-actions">
                <a class="secondary-link" href=public_href target="_blank" rel="noopener">
                    "View public page"
                </a>
                <DeleteConfirmButton
                    label="Delete"
                    prompt="Delete this list and all its items?"
                    on_confirm=delete
                />
            </div>
        </div>
    }
}
