//! List Commands

use registry_core::commands as core;
use registry_core::domain::{DomainResult, GiftList, ListDetail, ListDraft, ListSummary, Session};
use uuid::Uuid;

use super::backend;

pub async fn create_list(session: &Session, draft: ListDraft) -> DomainResult<GiftList> {
    let registry = backend()?.registry(Some(session));
    core::create_list(&registry, session, draft).await
}

pub async fn update_list(session: &Session, list_id: Uuid, draft: ListDraft) -> DomainResult<GiftList> {
    let registry = backend()?.registry(Some(session));
    core::update_list(&registry, session, list_id, draft).await
}

pub async fn delete_list(session: &Session, list_id: Uuid) -> DomainResult<()> {
    let registry = backend()?.registry(Some(session));
    core::delete_list(&registry, session, list_id).await
}

pub async fn list_my_lists(session: &Session) -> DomainResult<Vec<ListSummary>> {
    let registry = backend()?.registry(Some(session));
    core::list_my_lists(&registry, session).await
}

pub async fn get_owned_list(session: &Session, list_id: Uuid) -> DomainResult<ListDetail> {
    let registry = backend()?.registry(Some(session));
    core::get_owned_list(&registry, session, list_id).await
}
