// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for Memoria's pluggable collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod embedding;
pub mod generation;

pub use adapter::PluginAdapter;
pub use embedding::EmbeddingAdapter;
pub use generation::GenerationAdapter;
