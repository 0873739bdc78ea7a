// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composition root for the Memoria memorial service.
//!
//! Exposes [`MemoryService`], the single assembly point for storage, the
//! OpenAI adapters, and the retrieval pipeline. The `memoria` binary is a
//! thin administrative CLI over it.

pub mod service;

pub use service::MemoryService;
