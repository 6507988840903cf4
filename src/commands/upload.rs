//! Cover Upload Commands

use registry_core::commands as core;
use registry_core::domain::{validate_image, CoverUpload, DomainError, DomainResult, GiftList, Session};
use uuid::Uuid;
use wasm_bindgen_futures::JsFuture;

use super::backend;

/// Read a picked file into memory. Files that would be rejected anyway
/// are refused before their bytes are read.
pub async fn read_cover_file(file: web_sys::File) -> DomainResult<CoverUpload> {
    validate_image(&file.type_(), file.size() as usize)?;
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| DomainError::Internal(format!("Failed to read {}: {:?}", file.name(), e)))?;
    Ok(CoverUpload {
        file_name: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

pub async fn upload_cover_image(session: &Session, list_id: Uuid, upload: CoverUpload) -> DomainResult<GiftList> {
    let backend = backend()?;
    let registry = backend.registry(Some(session));
    let storage = backend.storage(session);
    core::upload_cover_image(
        &registry,
        &storage,
        session,
        list_id,
        &backend.config().cover_prefix,
        upload,
    )
    .await
}
