// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI adapters for the Memoria memorial service.
//!
//! Implements the `EmbeddingAdapter` and `GenerationAdapter` traits over the
//! OpenAI HTTP API, with a shared client handling authentication and
//! transient error retry.

pub mod client;
pub mod embeddings;
pub mod generation;
pub mod types;

pub use client::OpenAiClient;
pub use embeddings::OpenAiEmbedder;
pub use generation::OpenAiGenerator;
