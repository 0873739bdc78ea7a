// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pre-search gating.
//!
//! Cheap checks that run before any embedding call. A skipped search is not
//! an error; the conversation simply proceeds without recalled memories.

use memoria_config::GateConfig;
use tracing::debug;

/// Decides whether a chat message warrants a memory search at all.
#[derive(Debug, Clone)]
pub struct SearchGate {
    min_query_chars: usize,
    duplicate_overlap_ratio: f64,
    filler_phrases: Vec<String>,
}

impl SearchGate {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            min_query_chars: config.min_query_chars,
            duplicate_overlap_ratio: config.duplicate_overlap_ratio,
            filler_phrases: config.filler_phrases.clone(),
        }
    }

    /// Stateless check on the message alone.
    ///
    /// Returns false for messages too short to carry intent and for
    /// conversational fillers (greetings, thanks, simple affect words).
    /// The filler check only fires on one- or two-word messages; containment
    /// alone would catch affect words inside real questions.
    pub fn should_search(&self, query: &str) -> bool {
        let trimmed = query.trim();
        if trimmed.chars().count() <= self.min_query_chars {
            debug!("gate: query too short, skipping search");
            return false;
        }

        if trimmed.split_whitespace().count() <= 2
            && self.filler_phrases.iter().any(|p| trimmed.contains(p.as_str()))
        {
            debug!("gate: filler phrase, skipping search");
            return false;
        }

        true
    }

    /// Whether a query is a near-duplicate of earlier text (the previous
    /// query or the assistant's last reply).
    pub fn is_near_duplicate(&self, query: &str, previous: &str) -> bool {
        word_overlap(query, previous) >= self.duplicate_overlap_ratio
    }
}

/// Ratio of shared words over the smaller of the two word sets.
///
/// Returns 0.0 when either side has no words, so an empty history never
/// suppresses a search.
pub fn word_overlap(a: &str, b: &str) -> f64 {
    let words_a: std::collections::HashSet<&str> = a.split_whitespace().collect();
    let words_b: std::collections::HashSet<&str> = b.split_whitespace().collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }
    let shared = words_a.intersection(&words_b).count();
    shared as f64 / words_a.len().min(words_b.len()) as f64
}
