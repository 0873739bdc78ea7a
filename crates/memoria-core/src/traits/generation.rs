// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation adapter trait for text-completion providers.

use async_trait::async_trait;

use crate::error::MemoriaError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for opaque text-completion capability.
///
/// The memory ingestion pipeline uses this to turn source artifacts into
/// natural-language memory narratives. Request/response only; streaming is
/// a concern of other collaborators and not required here.
#[async_trait]
pub trait GenerationAdapter: PluginAdapter {
    /// Sends a single prompt and returns the completed text.
    async fn generate(&self, prompt: &str) -> Result<String, MemoriaError>;
}
