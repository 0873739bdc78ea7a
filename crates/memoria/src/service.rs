// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composition root wiring storage, adapters, and the retrieval pipeline.
//!
//! All collaborators are constructed here and injected explicitly; nothing
//! in the workspace reaches for global state.

use std::sync::Arc;
use std::time::Duration;

use memoria_config::MemoriaConfig;
use memoria_core::{MemoriaError, OwnerKey};
use memoria_memory::{
    DailySummarizer, IngestionPipeline, MemoryCategory, MemoryRecord, Partition, RelevanceRanker,
    ScoredMemory, SearchCache, SearchGate, SearchOrchestrator, SourceArtifact, SourceType,
    SqlitePartition,
};
use memoria_openai::{OpenAiClient, OpenAiEmbedder, OpenAiGenerator};
use memoria_storage::queries::artifacts;
use memoria_storage::{Artifact, ArtifactKind, Database};
use tracing::info;

/// The assembled memory service.
pub struct MemoryService {
    db: Database,
    orchestrator: SearchOrchestrator,
    pipeline: Arc<IngestionPipeline>,
    summarizer: DailySummarizer,
}

impl MemoryService {
    /// Open storage and wire up every collaborator from configuration.
    pub async fn connect(config: &MemoriaConfig) -> Result<Self, MemoriaError> {
        let db = Database::open(&config.storage.database_path).await?;

        let client = OpenAiClient::new(
            &config.openai.api_key,
            &config.openai.base_url,
            Duration::from_secs(config.openai.request_timeout_secs),
        )?;
        let embedder = Arc::new(OpenAiEmbedder::new(client.clone(), &config.openai));
        let generator = Arc::new(OpenAiGenerator::new(client, &config.openai));

        let partitions: Vec<Arc<dyn Partition>> = MemoryCategory::all()
            .into_iter()
            .map(|cat| Arc::new(SqlitePartition::new(db.clone(), cat)) as Arc<dyn Partition>)
            .collect();

        let orchestrator = SearchOrchestrator::new(
            partitions.clone(),
            embedder.clone(),
            RelevanceRanker::new(&config.retrieval),
            SearchGate::new(&config.gate),
            SearchCache::new(&config.retrieval),
            &config.retrieval,
        );

        let pipeline = Arc::new(IngestionPipeline::new(
            partitions,
            embedder,
            generator,
            &config.ingestion,
        ));
        let summarizer = DailySummarizer::new(db.clone(), pipeline.clone());

        info!(database = %config.storage.database_path, "memory service ready");
        Ok(Self {
            db,
            orchestrator,
            pipeline,
            summarizer,
        })
    }

    /// Search an owner's memories for a chat turn.
    pub async fn search(
        &self,
        owner: &OwnerKey,
        query: &str,
        limit: Option<usize>,
    ) -> Vec<ScoredMemory> {
        self.orchestrator.search(owner, query, limit).await
    }

    /// Record the assistant's reply for redundancy gating on the next turn.
    pub async fn note_assistant_reply(&self, owner: &OwnerKey, reply: &str) {
        self.orchestrator.note_assistant_reply(owner, reply).await;
    }

    /// Ingest one source artifact into the owner's memories.
    pub async fn ingest(
        &self,
        owner: &OwnerKey,
        artifact: &SourceArtifact,
    ) -> Result<MemoryRecord, MemoriaError> {
        self.pipeline.ingest(owner, artifact).await
    }

    /// Ingest an artifact already registered in storage, by its id.
    pub async fn ingest_stored(
        &self,
        owner: &OwnerKey,
        artifact_id: &str,
    ) -> Result<MemoryRecord, MemoriaError> {
        let stored = artifacts::get_artifact(&self.db, owner.as_str(), artifact_id)
            .await?
            .ok_or_else(|| MemoriaError::NotFound {
                kind: "artifact".to_string(),
                id: artifact_id.to_string(),
            })?;
        let artifact = stored_to_source(&stored)?;
        self.pipeline.ingest(owner, &artifact).await
    }

    /// Remove every memory produced by one source item.
    pub async fn purge(
        &self,
        owner: &OwnerKey,
        source_type: SourceType,
        item_id: &str,
    ) -> Result<usize, MemoriaError> {
        self.pipeline.purge(owner, source_type, item_id).await
    }

    /// Summarize every owner's dialogue for one calendar date.
    pub async fn summarize_date(&self, date: &str) -> Result<usize, MemoriaError> {
        self.summarizer.run_for_date(date).await
    }

    /// Direct access to storage, for administration.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Flush and close storage.
    pub async fn close(self) -> Result<(), MemoriaError> {
        self.db.close().await
    }
}

/// Map a stored artifact row onto the ingestion pipeline's input.
///
/// Letter rows keep the received letter in `description` and the sent reply
/// in `story`.
fn stored_to_source(stored: &Artifact) -> Result<SourceArtifact, MemoriaError> {
    let kind = ArtifactKind::from_str_value(&stored.kind).ok_or_else(|| {
        MemoriaError::Internal(format!("unknown artifact kind: {}", stored.kind))
    })?;
    let date = stored.occurred_date.clone().unwrap_or_default();
    Ok(match kind {
        ArtifactKind::Keepsake => SourceArtifact::Keepsake {
            name: stored.title.clone(),
            description: stored.description.clone().unwrap_or_default(),
            story: stored.story.clone().unwrap_or_default(),
            acquired: date,
        },
        ArtifactKind::Photo => SourceArtifact::Photo {
            title: stored.title.clone(),
            date,
            description: stored.description.clone().unwrap_or_default(),
        },
        ArtifactKind::Letter => SourceArtifact::Letter {
            text: stored.description.clone().unwrap_or_default(),
            reply: stored.story.clone().unwrap_or_default(),
            date,
        },
    })
}
