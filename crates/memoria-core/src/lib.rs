// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Memoria memorial service.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Memoria workspace. The embedding gateway,
//! text-generation provider, and storage collaborators all implement traits
//! defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MemoriaError;
pub use types::{AdapterType, EmbeddingInput, EmbeddingOutput, HealthStatus, OwnerKey};

// Re-export all adapter traits at crate root.
pub use traits::{EmbeddingAdapter, GenerationAdapter, PluginAdapter};
