// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory ingestion pipeline.
//!
//! Turns a source artifact into a stored memory: narrate via the generation
//! provider, parse tags, embed the tag-augmented narrative, and upsert into
//! the partition the source maps to. Generation and embedding failures abort
//! ingestion; a missing tag line does not.

use std::sync::Arc;

use chrono::Utc;
use memoria_config::IngestionConfig;
use memoria_core::{EmbeddingAdapter, EmbeddingInput, GenerationAdapter, MemoriaError, OwnerKey};
use tracing::{debug, info};
use uuid::Uuid;

use crate::partition::Partition;
use crate::prompts::ingestion_prompt;
use crate::tags::parse_narrative;
use crate::types::{MemoryRecord, SourceArtifact, SourceType};

/// Ingests source artifacts into partitioned memory storage.
pub struct IngestionPipeline {
    partitions: Vec<Arc<dyn Partition>>,
    embedder: Arc<dyn EmbeddingAdapter>,
    generator: Arc<dyn GenerationAdapter>,
    max_tags: usize,
    item_suffix_len: usize,
}

impl IngestionPipeline {
    pub fn new(
        partitions: Vec<Arc<dyn Partition>>,
        embedder: Arc<dyn EmbeddingAdapter>,
        generator: Arc<dyn GenerationAdapter>,
        config: &IngestionConfig,
    ) -> Self {
        Self {
            partitions,
            embedder,
            generator,
            max_tags: config.max_tags,
            item_suffix_len: config.item_suffix_len,
        }
    }

    /// Ingest one artifact for an owner, returning the stored record.
    pub async fn ingest(
        &self,
        owner: &OwnerKey,
        artifact: &SourceArtifact,
    ) -> Result<MemoryRecord, MemoriaError> {
        let source_type = artifact.source_type();
        let partition = self.partition_for(source_type)?;

        let prompt = ingestion_prompt(artifact);
        let generated = self.generator.generate(&prompt).await?;
        let parsed = parse_narrative(&generated, self.max_tags);
        debug!(tags = parsed.tags.len(), "narrative generated");

        // Tags participate in the embedding so tag-heavy queries land near
        // the memory, but the stored narrative stays clean for display.
        let embed_text = if parsed.tags.is_empty() {
            parsed.narrative.clone()
        } else {
            format!("[{}] {}", parsed.tags.join(", "), parsed.narrative)
        };
        let output = self
            .embedder
            .embed(EmbeddingInput {
                texts: vec![embed_text],
            })
            .await?;
        let embedding = output
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| MemoriaError::Embedding {
                message: "embedding returned no vectors".to_string(),
                source: None,
            })?;

        let occurred_date = normalize_date(artifact.occurred_date());
        let record = MemoryRecord {
            id: Uuid::new_v4().to_string(),
            owner_key: owner.as_str().to_string(),
            category: source_type.category(),
            source_type,
            item_id: self.item_id(source_type, &occurred_date),
            tags: parsed.tags,
            occurred_date,
            created_at: Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            content: parsed.narrative,
            embedding,
        };

        partition.upsert(&record).await?;
        info!(
            owner = %owner,
            item_id = %record.item_id,
            source = source_type.as_str(),
            "memory ingested"
        );
        Ok(record)
    }

    /// Remove every memory produced by one source item.
    ///
    /// Daily summaries are regenerated, not user-owned; purging them is
    /// rejected. Returns the number of records removed.
    pub async fn purge(
        &self,
        owner: &OwnerKey,
        source_type: SourceType,
        item_id: &str,
    ) -> Result<usize, MemoriaError> {
        if source_type == SourceType::DailySummary {
            return Err(MemoriaError::Forbidden(
                "daily summary memories cannot be purged".to_string(),
            ));
        }

        let partition = self.partition_for(source_type)?;
        let removed = partition.delete_item(owner, source_type, item_id).await?;
        info!(owner = %owner, item_id, removed, "memories purged");
        Ok(removed)
    }

    fn partition_for(&self, source_type: SourceType) -> Result<&Arc<dyn Partition>, MemoriaError> {
        let category = source_type.category();
        self.partitions
            .iter()
            .find(|p| p.category() == category)
            .ok_or_else(|| {
                MemoriaError::Internal(format!("no partition for category {}", category.as_str()))
            })
    }

    fn item_id(&self, source_type: SourceType, date: &str) -> String {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(self.item_suffix_len)
            .collect();
        format!("{}_{}_{}", source_type.as_str(), date, suffix)
    }
}

/// Artifacts without a usable date fall back to today.
fn normalize_date(date: &str) -> String {
    let trimmed = date.trim();
    if chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok() {
        trimmed.to_string()
    } else {
        Utc::now().format("%Y-%m-%d").to_string()
    }
}
