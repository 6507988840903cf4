//! Frontend Configuration
//!
//! `registry.toml` is embedded at build time; `REGISTRY_BACKEND_URL` and
//! `REGISTRY_ANON_KEY` in the build environment override it.

use registry_core::{BackendConfig, DomainResult};

const REGISTRY_TOML: &str = include_str!("../registry.toml");

pub fn load() -> DomainResult<BackendConfig> {
    let config = BackendConfig::from_toml_str(REGISTRY_TOML)?
        .with_overrides(option_env!("REGISTRY_BACKEND_URL"), option_env!("REGISTRY_ANON_KEY"));
    config.validate()?;
    Ok(config)
}
