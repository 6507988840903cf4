//! Commands Layer
//!
//! Application operations bridging the frontend to the repositories.
//! Every authenticated operation takes the caller's `Session` explicitly.

mod auth_cmd;
mod item_cmd;
mod list_cmd;
mod reservation_cmd;
mod upload_cmd;

#[cfg(all(test, feature = "local"))]
mod tests;

pub use auth_cmd::*;
pub use item_cmd::*;
pub use list_cmd::*;
pub use reservation_cmd::*;
pub use upload_cmd::*;

use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, GiftList, Item, Session};
use crate::repository::Registry;

/// Load a list and check that the session's user owns it
pub(crate) async fn owned_list(registry: &Registry, session: &Session, list_id: Uuid) -> DomainResult<GiftList> {
    let list = registry
        .lists
        .find_by_id(list_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("List {}", list_id)))?;
    if !list.is_owned_by(session.user_id()) {
        log::warn!("User {} tried to access list {}", session.user_id(), list_id);
        return Err(DomainError::Forbidden(format!("List {}", list_id)));
    }
    Ok(list)
}

/// Load an item and check ownership through its parent list
pub(crate) async fn owned_item(registry: &Registry, session: &Session, item_id: Uuid) -> DomainResult<Item> {
    let item = registry
        .items
        .find_by_id(item_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Item {}", item_id)))?;
    owned_list(registry, session, item.list_id).await?;
    Ok(item)
}
