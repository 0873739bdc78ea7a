// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily dialogue summarization.
//!
//! Walks every owner's dialogue for one calendar date and ingests a daily
//! summary memory per owner that talked. One owner's failure never blocks
//! the rest of the batch.

use std::sync::Arc;

use memoria_core::{MemoriaError, OwnerKey};
use memoria_storage::queries::{dialogue, owners};
use memoria_storage::Database;
use tracing::{debug, info, warn};

use crate::ingest::IngestionPipeline;
use crate::types::SourceArtifact;

/// Summarizes one day of dialogue into daily memories.
pub struct DailySummarizer {
    db: Database,
    pipeline: Arc<IngestionPipeline>,
}

impl DailySummarizer {
    pub fn new(db: Database, pipeline: Arc<IngestionPipeline>) -> Self {
        Self { db, pipeline }
    }

    /// Summarize every owner's dialogue for `date` (`YYYY-MM-DD`).
    ///
    /// Returns the number of owners whose summaries were ingested. Owners
    /// with no dialogue that day are skipped silently; per-owner ingestion
    /// failures are logged and counted out.
    pub async fn run_for_date(&self, date: &str) -> Result<usize, MemoriaError> {
        let owner_keys = owners::list_owner_keys(&self.db).await?;
        let mut ingested = 0;

        for key in owner_keys {
            let owner = OwnerKey(key);
            let turns = dialogue::get_dialogue_by_date(&self.db, owner.as_str(), date).await?;
            if turns.is_empty() {
                debug!(owner = %owner, date, "no dialogue, skipping");
                continue;
            }

            let transcript = turns
                .iter()
                .map(|t| format!("{}: {}", t.sender, t.message))
                .collect::<Vec<_>>()
                .join("\n");

            let artifact = SourceArtifact::DailyDialogue {
                date: date.to_string(),
                transcript,
            };
            match self.pipeline.ingest(&owner, &artifact).await {
                Ok(_) => ingested += 1,
                Err(e) => {
                    warn!(owner = %owner, date, error = %e, "daily summary ingestion failed");
                }
            }
        }

        info!(date, ingested, "daily summarization complete");
        Ok(ingested)
    }
}
