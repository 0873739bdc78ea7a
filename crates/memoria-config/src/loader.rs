// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./memoria.toml` > `~/.config/memoria/memoria.toml`
//! > `/etc/memoria/memoria.toml` with environment variable overrides via the
//! `MEMORIA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MemoriaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/memoria/memoria.toml` (system-wide)
/// 3. `~/.config/memoria/memoria.toml` (user XDG config)
/// 4. `./memoria.toml` (local directory)
/// 5. `MEMORIA_*` environment variables
pub fn load_config() -> Result<MemoriaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MemoriaConfig::default()))
        .merge(Toml::file("/etc/memoria/memoria.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("memoria/memoria.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("memoria.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<MemoriaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MemoriaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MemoriaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MemoriaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `MEMORIA_OPENAI_API_KEY` must map to
/// `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("MEMORIA_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("retrieval_", "retrieval.", 1)
            .replacen("gate_", "gate.", 1)
            .replacen("ingestion_", "ingestion.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
