//! Item Commands

use chrono::Utc;
use uuid::Uuid;

use super::{owned_item, owned_list};
use crate::domain::{DomainError, DomainResult, Item, ItemDraft, Session};
use crate::repository::Registry;

pub async fn add_item(registry: &Registry, session: &Session, list_id: Uuid, draft: ItemDraft) -> DomainResult<Item> {
    let draft = draft.normalized()?;
    owned_list(registry, session, list_id).await?;
    let item = Item::new(list_id, draft, Utc::now());
    let created = registry.items.create(&item).await?;
    log::info!("Added item {} to list {}", created.id, list_id);
    Ok(created)
}

/// Edit an item. `reserved_count` is left as stored.
pub async fn update_item(registry: &Registry, session: &Session, item_id: Uuid, draft: ItemDraft) -> DomainResult<Item> {
    let draft = draft.normalized()?;
    let mut item = owned_item(registry, session, item_id).await?;
    item.apply(draft, Utc::now())?;
    let updated = registry.items.update(&item).await?;
    log::info!("Updated item {}", item_id);
    Ok(updated)
}

/// Delete an item; one that is already gone counts as deleted
pub async fn delete_item(registry: &Registry, session: &Session, item_id: Uuid) -> DomainResult<()> {
    match owned_item(registry, session, item_id).await {
        Ok(_) => {}
        Err(DomainError::NotFound(_)) => {
            log::debug!("Item {} already deleted", item_id);
            return Ok(());
        }
        Err(e) => return Err(e),
    }
    registry.items.delete(item_id).await?;
    log::info!("Deleted item {}", item_id);
    Ok(())
}
