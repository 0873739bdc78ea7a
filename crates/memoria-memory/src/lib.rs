// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory retrieval, ranking, and ingestion for the Memoria memorial service.
//!
//! The crate is organized around one retrieval pipeline:
//!
//! - [`gate`] decides whether a chat turn warrants a search at all
//! - [`cache`] reuses recent results for near-duplicate questions
//! - [`partition`] holds the per-category vector stores
//! - [`ranker`] filters by relevance threshold and applies tag boosts
//! - [`search`] orchestrates the fan-out with a shared deadline
//!
//! and one write path: [`ingest`] narrates artifacts into memories via the
//! generation provider, with [`summarizer`] batching the daily dialogue case.

pub mod cache;
pub mod gate;
pub mod ingest;
pub mod partition;
pub mod prompts;
pub mod ranker;
pub mod search;
pub mod summarizer;
pub mod tags;
pub mod types;

pub use cache::SearchCache;
pub use gate::SearchGate;
pub use ingest::IngestionPipeline;
pub use partition::{Partition, SqlitePartition};
pub use ranker::RelevanceRanker;
pub use search::SearchOrchestrator;
pub use summarizer::DailySummarizer;
pub use types::{
    MemoryCategory, MemoryRecord, ScoredMemory, SourceArtifact, SourceType,
};
