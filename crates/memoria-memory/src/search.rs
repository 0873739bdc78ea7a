// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search orchestration.
//!
//! Runs the full retrieval pipeline for a chat turn: gate, cache, one query
//! embedding, a fan-out over all partitions with a shared deadline, ranking,
//! and a bounded merge. Retrieval faults never surface to the caller; a
//! failed or timed-out partition simply contributes nothing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use memoria_config::RetrievalConfig;
use memoria_core::{EmbeddingAdapter, EmbeddingInput, OwnerKey};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::SearchCache;
use crate::gate::SearchGate;
use crate::partition::Partition;
use crate::ranker::RelevanceRanker;
use crate::types::ScoredMemory;

/// Orchestrates memory search across all partitions.
pub struct SearchOrchestrator {
    partitions: Vec<Arc<dyn Partition>>,
    embedder: Arc<dyn EmbeddingAdapter>,
    ranker: RelevanceRanker,
    gate: SearchGate,
    cache: Mutex<SearchCache>,
    fetch_limit: usize,
    default_limit: usize,
    max_limit: usize,
    budget: Duration,
    short_budget: Duration,
    short_query_max_chars: usize,
}

impl SearchOrchestrator {
    pub fn new(
        partitions: Vec<Arc<dyn Partition>>,
        embedder: Arc<dyn EmbeddingAdapter>,
        ranker: RelevanceRanker,
        gate: SearchGate,
        cache: SearchCache,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            partitions,
            embedder,
            ranker,
            gate,
            cache: Mutex::new(cache),
            fetch_limit: config.partition_fetch_limit,
            default_limit: config.default_result_limit,
            max_limit: config.max_result_limit,
            budget: Duration::from_secs(config.search_timeout_secs),
            short_budget: Duration::from_secs(config.short_query_timeout_secs),
            short_query_max_chars: config.short_query_max_chars,
        }
    }

    /// Search an owner's memories for a chat turn.
    ///
    /// Returns an empty list when the gate skips the query, when the history
    /// already covers it, or when retrieval fails outright. Partitions that
    /// beat the deadline still contribute when others time out.
    pub async fn search(
        &self,
        owner: &OwnerKey,
        query: &str,
        limit: Option<usize>,
    ) -> Vec<ScoredMemory> {
        if !self.gate.should_search(query) {
            return Vec::new();
        }

        let started = Instant::now();
        {
            let cache = self.cache.lock().await;
            if let Some(entry) = cache.fresh_entry(owner, started) {
                if self.gate.is_near_duplicate(query, &entry.query) {
                    debug!(owner = %owner, "near-duplicate query, serving cached results");
                    return entry.results.clone();
                }
                if let Some(reply) = &entry.last_reply {
                    if self.gate.is_near_duplicate(query, reply) {
                        debug!(owner = %owner, "query covered by last reply, skipping search");
                        return Vec::new();
                    }
                }
            }
        }

        let budget = if query.trim().chars().count() <= self.short_query_max_chars {
            self.short_budget
        } else {
            self.budget
        };
        let deadline = started + budget;

        let query_embedding = match tokio::time::timeout(
            deadline.saturating_duration_since(Instant::now()),
            self.embedder.embed(EmbeddingInput {
                texts: vec![query.to_string()],
            }),
        )
        .await
        {
            Ok(Ok(output)) => match output.embeddings.into_iter().next() {
                Some(embedding) => embedding,
                None => {
                    warn!("embedding returned no vectors, skipping search");
                    return Vec::new();
                }
            },
            Ok(Err(e)) => {
                warn!(error = %e, "query embedding failed, skipping search");
                return Vec::new();
            }
            Err(_) => {
                warn!("query embedding timed out, skipping search");
                return Vec::new();
            }
        };

        // Fan out with a shared deadline; slow partitions are dropped, not
        // waited for.
        let queries = self.partitions.iter().map(|partition| {
            let partition = Arc::clone(partition);
            let embedding = query_embedding.clone();
            let owner = owner.clone();
            let remaining = deadline.saturating_duration_since(Instant::now());
            let fetch_limit = self.fetch_limit;
            async move {
                let result = tokio::time::timeout(
                    remaining,
                    partition.query(&owner, &embedding, fetch_limit),
                )
                .await;
                (partition.category(), result)
            }
        });

        let mut merged: Vec<ScoredMemory> = Vec::new();
        for (category, outcome) in join_all(queries).await {
            match outcome {
                Ok(Ok(candidates)) => {
                    merged.extend(self.ranker.rank(query, candidates));
                }
                Ok(Err(e)) => {
                    warn!(category = category.as_str(), error = %e, "partition query failed");
                }
                Err(_) => {
                    warn!(category = category.as_str(), "partition query timed out");
                }
            }
        }

        merged.sort_by(|a, b| {
            b.boosted
                .partial_cmp(&a.boosted)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    b.similarity
                        .partial_cmp(&a.similarity)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });
        let limit = limit.unwrap_or(self.default_limit).clamp(1, self.max_limit);
        merged.truncate(limit);

        debug!(
            owner = %owner,
            results = merged.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search complete"
        );

        let mut cache = self.cache.lock().await;
        cache.store(owner, query, merged.clone(), Instant::now());
        merged
    }

    /// Record the assistant's reply so the next turn can be checked for
    /// redundancy against it.
    pub async fn note_assistant_reply(&self, owner: &OwnerKey, reply: &str) {
        let mut cache = self.cache.lock().await;
        cache.note_reply(owner, reply);
    }
}
