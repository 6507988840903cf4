//! Public List and Reservation Commands
//!
//! Visitors call these anonymously; only `list_reservations` needs a session.

use registry_core::commands as core;
use registry_core::domain::{DomainResult, Item, NewReservation, PublicList, Reservation, ReservationEntry, Session};
use uuid::Uuid;

use super::backend;

pub async fn get_public_list(slug: &str) -> DomainResult<PublicList> {
    let registry = backend()?.registry(None);
    core::get_public_list(&registry, slug).await
}

pub async fn reserve_item(snapshot: &Item, draft: NewReservation) -> DomainResult<Reservation> {
    let registry = backend()?.registry(None);
    core::reserve_item(&registry, snapshot, draft).await
}

pub async fn list_reservations(session: &Session, list_id: Uuid) -> DomainResult<Vec<ReservationEntry>> {
    let registry = backend()?.registry(Some(session));
    core::list_reservations(&registry, session, list_id).await
}
