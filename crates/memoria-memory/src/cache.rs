// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded per-owner search session cache.
//!
//! Holds the most recent search per owner for a short freshness window, so
//! rapid-fire near-duplicate questions reuse results instead of re-running
//! the embed+query pipeline. Capacity-bounded; the stalest owner is evicted
//! when full.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use memoria_config::RetrievalConfig;
use memoria_core::OwnerKey;
use tracing::debug;

use crate::types::ScoredMemory;

/// One owner's most recent search session.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    /// The query that produced the cached results.
    pub query: String,
    /// When the search ran.
    pub at: Instant,
    /// The results it produced.
    pub results: Vec<ScoredMemory>,
    /// The assistant's reply that followed, once known.
    pub last_reply: Option<String>,
}

/// Bounded cache of recent search sessions, keyed by owner.
#[derive(Debug)]
pub struct SearchCache {
    window: Duration,
    capacity: usize,
    sessions: HashMap<String, SessionEntry>,
}

impl SearchCache {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            window: Duration::from_secs(config.cache_window_secs),
            capacity: config.cache_capacity,
            sessions: HashMap::new(),
        }
    }

    /// The owner's session entry, if it is still inside the freshness window.
    pub fn fresh_entry(&self, owner: &OwnerKey, now: Instant) -> Option<&SessionEntry> {
        self.sessions
            .get(owner.as_str())
            .filter(|entry| now.duration_since(entry.at) <= self.window)
    }

    /// Record a completed search for an owner.
    pub fn store(
        &mut self,
        owner: &OwnerKey,
        query: &str,
        results: Vec<ScoredMemory>,
        now: Instant,
    ) {
        if !self.sessions.contains_key(owner.as_str()) && self.sessions.len() >= self.capacity {
            self.evict_stalest();
        }
        self.sessions.insert(
            owner.as_str().to_string(),
            SessionEntry {
                query: query.to_string(),
                at: now,
                results,
                last_reply: None,
            },
        );
    }

    /// Attach the assistant's reply to the owner's current session, so the
    /// next query can be checked against it for redundancy.
    pub fn note_reply(&mut self, owner: &OwnerKey, reply: &str) {
        if let Some(entry) = self.sessions.get_mut(owner.as_str()) {
            entry.last_reply = Some(reply.to_string());
        }
    }

    fn evict_stalest(&mut self) {
        let stalest = self
            .sessions
            .iter()
            .min_by_key(|(_, entry)| entry.at)
            .map(|(owner, _)| owner.clone());
        if let Some(owner) = stalest {
            debug!(owner, "cache full, evicting stalest session");
            self.sessions.remove(&owner);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }
}
