//! Backend Command Wrappers
//!
//! Frontend bindings to the registry-core commands over the hosted
//! backend, organized by domain.

mod auth;
mod clipboard;
mod items;
mod lists;
mod reservations;
mod upload;

use registry_core::{DomainResult, HostedBackend};

thread_local! {
    static BACKEND: DomainResult<HostedBackend> = crate::config::load().and_then(HostedBackend::new);
}

/// The configured backend, or the configuration error
fn backend() -> DomainResult<HostedBackend> {
    BACKEND.with(|backend| backend.clone())
}

// Re-export all public items
pub use auth::*;
pub use clipboard::*;
pub use items::*;
pub use lists::*;
pub use reservations::*;
pub use upload::*;
