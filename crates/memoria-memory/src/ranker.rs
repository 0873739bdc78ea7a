// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relevance ranking with tag boosting.
//!
//! Candidates arrive from a partition already paired with raw cosine
//! similarity. The ranker drops everything under the relevance threshold,
//! adds tag boosts, and keeps the per-partition top k.

use memoria_config::RetrievalConfig;
use tracing::debug;

use crate::types::{format_date_relative, MemoryRecord, ScoredMemory};

/// Ranks partition candidates into final per-partition results.
#[derive(Debug, Clone)]
pub struct RelevanceRanker {
    threshold: f32,
    exact_boost: f32,
    partial_boost: f32,
    top_k: usize,
}

impl RelevanceRanker {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            threshold: config.similarity_threshold as f32,
            exact_boost: config.exact_tag_boost as f32,
            partial_boost: config.partial_tag_boost as f32,
            top_k: config.partition_top_k,
        }
    }

    /// Rank candidates for one partition.
    ///
    /// The threshold applies to raw similarity before boosting; a boost can
    /// reorder results but never rescue an irrelevant one. Each tag
    /// contributes at most one boost, exact match winning over partial.
    pub fn rank(&self, query: &str, candidates: Vec<(MemoryRecord, f32)>) -> Vec<ScoredMemory> {
        let mut scored: Vec<ScoredMemory> = candidates
            .into_iter()
            .filter(|(_, similarity)| *similarity >= self.threshold)
            .map(|(record, similarity)| {
                let boost = self.tag_boost(query, &record.tags);
                let occurred_date_display = format_date_relative(&record.occurred_date);
                ScoredMemory {
                    boosted: similarity + boost,
                    similarity,
                    record,
                    occurred_date_display,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.boosted
                .partial_cmp(&a.boosted)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    b.similarity
                        .partial_cmp(&a.similarity)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| b.record.created_at.cmp(&a.record.created_at))
        });
        scored.truncate(self.top_k);

        debug!(results = scored.len(), "partition candidates ranked");
        scored
    }

    /// Additive boost over all tags; one contribution per tag.
    fn tag_boost(&self, query: &str, tags: &[String]) -> f32 {
        let mut boost = 0.0;
        for tag in tags {
            let tag = tag.trim();
            if tag.is_empty() {
                continue;
            }
            if query.contains(tag) {
                boost += self.exact_boost;
            } else if let Some(bigram) = leading_bigram(tag) {
                if query.contains(&bigram) {
                    boost += self.partial_boost;
                }
            }
        }
        boost
    }
}

/// First two characters of a tag, if it has at least two.
fn leading_bigram(tag: &str) -> Option<String> {
    let mut chars = tag.chars();
    let first = chars.next()?;
    let second = chars.next()?;
    Some(format!("{first}{second}"))
}
