//! List Commands
//!
//! Create, edit, delete and browse the caller's gift lists.

use chrono::Utc;
use uuid::Uuid;

use super::owned_list;
use crate::domain::{generate_slug, DomainError, DomainResult, GiftList, ListDetail, ListDraft, ListSummary, Session};
use crate::repository::{ItemOrder, Registry};

/// Create a list owned by the session's user with a fresh slug
pub async fn create_list(registry: &Registry, session: &Session, draft: ListDraft) -> DomainResult<GiftList> {
    let draft = draft.normalized()?;
    let slug = generate_slug(&draft.title);
    let list = GiftList::new(session.user_id(), draft, slug, Utc::now());
    let created = registry.lists.create(&list).await?;
    log::info!("Created list {} with slug {}", created.id, created.slug);
    Ok(created)
}

/// Edit a list's fields. The slug never changes.
pub async fn update_list(
    registry: &Registry,
    session: &Session,
    list_id: Uuid,
    draft: ListDraft,
) -> DomainResult<GiftList> {
    let draft = draft.normalized()?;
    let mut list = owned_list(registry, session, list_id).await?;
    list.apply(draft, Utc::now());
    let updated = registry.lists.update(&list).await?;
    log::info!("Updated list {}", list_id);
    Ok(updated)
}

/// Delete a list along with its items and reservations.
/// A list that is already gone counts as deleted.
pub async fn delete_list(registry: &Registry, session: &Session, list_id: Uuid) -> DomainResult<()> {
    match owned_list(registry, session, list_id).await {
        Ok(_) => {}
        Err(DomainError::NotFound(_)) => {
            log::debug!("List {} already deleted", list_id);
            return Ok(());
        }
        Err(e) => return Err(e),
    }
    registry.lists.delete(list_id).await?;
    log::info!("Deleted list {}", list_id);
    Ok(())
}

pub async fn list_my_lists(registry: &Registry, session: &Session) -> DomainResult<Vec<ListSummary>> {
    registry.lists.list_by_owner(session.user_id()).await
}

/// The owner's view: the list and its items, newest first
pub async fn get_owned_list(registry: &Registry, session: &Session, list_id: Uuid) -> DomainResult<ListDetail> {
    let list = owned_list(registry, session, list_id).await?;
    let items = registry.items.list_by_list(list_id, ItemOrder::Newest).await?;
    Ok(ListDetail { list, items })
}
