//! Public Page and Reservation Commands
//!
//! Visitors need no session: they read a list by slug and reserve items.
//! Only the owner reads the reservations back.

use uuid::Uuid;

use super::owned_list;
use crate::domain::{DomainError, DomainResult, Item, NewReservation, PublicList, Reservation, ReservationEntry, Session};
use crate::repository::{ItemOrder, Registry};

/// A list by slug with its items, highest priority first
pub async fn get_public_list(registry: &Registry, slug: &str) -> DomainResult<PublicList> {
    let list = registry
        .lists
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("List {}", slug)))?;
    let items = registry.items.list_by_list(list.id, ItemOrder::Priority).await?;
    Ok(PublicList { list, items })
}

/// Reserve units of an item.
///
/// `snapshot` is the item as the visitor last saw it. Overcommits visible in
/// the snapshot are rejected without writing; the storage layer re-checks
/// availability atomically, so a stale snapshot can still fail with `Conflict`.
pub async fn reserve_item(registry: &Registry, snapshot: &Item, draft: NewReservation) -> DomainResult<Reservation> {
    let draft = draft.normalized()?;
    draft.check_against(snapshot)?;
    let reservation = registry.reservations.reserve(&draft).await.map_err(|e| {
        if let DomainError::Conflict(msg) = &e {
            log::warn!("Reservation of item {} rejected: {}", draft.item_id, msg);
        }
        e
    })?;
    log::info!("Reserved {} unit(s) of item {}", reservation.quantity, reservation.item_id);
    Ok(reservation)
}

/// Reservations against the owner's list, newest first
pub async fn list_reservations(
    registry: &Registry,
    session: &Session,
    list_id: Uuid,
) -> DomainResult<Vec<ReservationEntry>> {
    owned_list(registry, session, list_id).await?;
    registry.reservations.list_by_list(list_id).await
}
