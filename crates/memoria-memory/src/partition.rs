// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partitioned memory stores.
//!
//! One partition per [`MemoryCategory`]. Rows are scoped to an owner in SQL
//! before any similarity work happens; a partition never loads another
//! owner's vectors.

use async_trait::async_trait;
use memoria_core::{MemoriaError, OwnerKey};
use memoria_storage::models::MemoryRow;
use memoria_storage::queries::memories;
use memoria_storage::Database;

use crate::types::{
    blob_to_vec, cosine_similarity, vec_to_blob, MemoryCategory, MemoryRecord, SourceType,
};

/// A searchable memory partition.
///
/// Abstracted as a trait so the search orchestrator can be exercised against
/// in-memory fakes (slow partitions, failing partitions) in tests.
#[async_trait]
pub trait Partition: Send + Sync {
    /// Which category this partition holds.
    fn category(&self) -> MemoryCategory;

    /// Insert or replace one memory record.
    async fn upsert(&self, record: &MemoryRecord) -> Result<(), MemoriaError>;

    /// Return up to `fetch_limit` candidates for an owner, most similar
    /// first, each paired with its raw cosine similarity.
    async fn query(
        &self,
        owner: &OwnerKey,
        query_embedding: &[f32],
        fetch_limit: usize,
    ) -> Result<Vec<(MemoryRecord, f32)>, MemoriaError>;

    /// Delete all records produced by one source item. Returns rows removed.
    async fn delete_item(
        &self,
        owner: &OwnerKey,
        source_type: SourceType,
        item_id: &str,
    ) -> Result<usize, MemoriaError>;
}

/// SQLite-backed partition over the shared `memories` table.
pub struct SqlitePartition {
    db: Database,
    category: MemoryCategory,
}

impl SqlitePartition {
    pub fn new(db: Database, category: MemoryCategory) -> Self {
        Self { db, category }
    }
}

#[async_trait]
impl Partition for SqlitePartition {
    fn category(&self) -> MemoryCategory {
        self.category
    }

    async fn upsert(&self, record: &MemoryRecord) -> Result<(), MemoriaError> {
        let row = record_to_row(record);
        memories::upsert_memory(&self.db, &row).await
    }

    async fn query(
        &self,
        owner: &OwnerKey,
        query_embedding: &[f32],
        fetch_limit: usize,
    ) -> Result<Vec<(MemoryRecord, f32)>, MemoriaError> {
        let rows = memories::get_memories(&self.db, owner.as_str(), self.category.as_str()).await?;

        let mut scored: Vec<(MemoryRecord, f32)> = rows
            .into_iter()
            .filter_map(row_to_record)
            .map(|record| {
                let similarity = cosine_similarity(query_embedding, &record.embedding);
                (record, similarity)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(fetch_limit);
        Ok(scored)
    }

    async fn delete_item(
        &self,
        owner: &OwnerKey,
        source_type: SourceType,
        item_id: &str,
    ) -> Result<usize, MemoriaError> {
        memories::delete_memories(&self.db, owner.as_str(), source_type.as_str(), item_id).await
    }
}

fn record_to_row(record: &MemoryRecord) -> MemoryRow {
    MemoryRow {
        id: record.id.clone(),
        owner_key: record.owner_key.clone(),
        category: record.category.as_str().to_string(),
        source_type: record.source_type.as_str().to_string(),
        item_id: record.item_id.clone(),
        tags: record.tags.clone(),
        occurred_date: record.occurred_date.clone(),
        created_at: record.created_at.clone(),
        content: record.content.clone(),
        embedding: vec_to_blob(&record.embedding),
    }
}

/// Rows with an unrecognized category or source type are skipped rather
/// than failing the whole query.
fn row_to_record(row: MemoryRow) -> Option<MemoryRecord> {
    Some(MemoryRecord {
        category: MemoryCategory::from_str_value(&row.category)?,
        source_type: SourceType::from_str_value(&row.source_type)?,
        id: row.id,
        owner_key: row.owner_key,
        item_id: row.item_id,
        tags: row.tags,
        occurred_date: row.occurred_date,
        created_at: row.created_at,
        content: row.content,
        embedding: blob_to_vec(&row.embedding),
    })
}
