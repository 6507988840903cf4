//! Gift Registry Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and the SQLite/filesystem implementations
//! - hosted: HTTP implementations against the hosted backend
//! - commands: Application operations used by the frontend

pub mod commands;
pub mod config;
pub mod domain;
pub mod hosted;
pub mod repository;

pub use config::BackendConfig;
pub use domain::{DomainError, DomainResult};
pub use hosted::HostedBackend;
pub use repository::Registry;
