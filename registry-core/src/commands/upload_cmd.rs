//! Cover Image Upload Command

use chrono::Utc;
use uuid::Uuid;

use super::owned_list;
use crate::domain::{cover_object_path, CoverUpload, DomainResult, GiftList, Session};
use crate::repository::{ObjectStore, Registry};

/// Validate, upload and attach a cover image to a list.
///
/// Invalid files are rejected before the store is contacted.
pub async fn upload_cover_image(
    registry: &Registry,
    store: &dyn ObjectStore,
    session: &Session,
    list_id: Uuid,
    cover_prefix: &str,
    upload: CoverUpload,
) -> DomainResult<GiftList> {
    upload.validate()?;
    let mut list = owned_list(registry, session, list_id).await?;

    let now = Utc::now();
    let path = cover_object_path(
        cover_prefix,
        list_id,
        now.timestamp_millis(),
        &upload.file_name,
        &upload.content_type,
    );
    store.upload(&path, &upload.bytes, &upload.content_type).await?;

    list.cover_image = Some(store.public_url(&path));
    list.updated_at = now;
    let updated = registry.lists.update(&list).await?;
    log::info!("Attached cover {} to list {}", path, list_id);
    Ok(updated)
}
