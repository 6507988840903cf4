//! Item Commands

use registry_core::commands as core;
use registry_core::domain::{DomainResult, Item, ItemDraft, Session};
use uuid::Uuid;

use super::backend;

pub async fn add_item(session: &Session, list_id: Uuid, draft: ItemDraft) -> DomainResult<Item> {
    let registry = backend()?.registry(Some(session));
    core::add_item(&registry, session, list_id, draft).await
}

pub async fn update_item(session: &Session, item_id: Uuid, draft: ItemDraft) -> DomainResult<Item> {
    let registry = backend()?.registry(Some(session));
    core::update_item(&registry, session, item_id, draft).await
}

pub async fn delete_item(session: &Session, item_id: Uuid) -> DomainResult<()> {
    let registry = backend()?.registry(Some(session));
    core::delete_item(&registry, session, item_id).await
}
