// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory row operations.
//!
//! Rows are always addressed by `(owner_key, category)`; owner scoping
//! happens in SQL, never in application code after the fact.

use memoria_core::MemoriaError;
use rusqlite::params;

use crate::database::Database;
use crate::models::MemoryRow;

/// Insert or replace a memory row by id.
pub async fn upsert_memory(db: &Database, row: &MemoryRow) -> Result<(), MemoriaError> {
    let row = row.clone();
    db.connection()
        .call(move |conn| {
            let tags = serde_json::to_string(&row.tags)
                .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
            conn.execute(
                "INSERT OR REPLACE INTO memories
                     (id, owner_key, category, source_type, item_id, tags,
                      occurred_date, created_at, content, embedding)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    row.id,
                    row.owner_key,
                    row.category,
                    row.source_type,
                    row.item_id,
                    tags,
                    row.occurred_date,
                    row.created_at,
                    row.content,
                    row.embedding,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch every memory row for one owner and category.
pub async fn get_memories(
    db: &Database,
    owner_key: &str,
    category: &str,
) -> Result<Vec<MemoryRow>, MemoriaError> {
    let owner_key = owner_key.to_string();
    let category = category.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_key, category, source_type, item_id, tags,
                        occurred_date, created_at, content, embedding
                 FROM memories WHERE owner_key = ?1 AND category = ?2",
            )?;
            let rows = stmt.query_map(params![owner_key, category], |row| {
                let tags_json: String = row.get(5)?;
                Ok(MemoryRow {
                    id: row.get(0)?,
                    owner_key: row.get(1)?,
                    category: row.get(2)?,
                    source_type: row.get(3)?,
                    item_id: row.get(4)?,
                    tags: serde_json::from_str(&tags_json).unwrap_or_default(),
                    occurred_date: row.get(6)?,
                    created_at: row.get(7)?,
                    content: row.get(8)?,
                    embedding: row.get(9)?,
                })
            })?;
            let mut memories = Vec::new();
            for row in rows {
                memories.push(row?);
            }
            Ok(memories)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete memory rows by source item, scoped to one owner.
///
/// Returns the number of rows removed.
pub async fn delete_memories(
    db: &Database,
    owner_key: &str,
    source_type: &str,
    item_id: &str,
) -> Result<usize, MemoriaError> {
    let owner_key = owner_key.to_string();
    let source_type = source_type.to_string();
    let item_id = item_id.to_string();
    db.connection()
        .call(move |conn| {
            let removed = conn.execute(
                "DELETE FROM memories
                 WHERE owner_key = ?1 AND source_type = ?2 AND item_id = ?3",
                params![owner_key, source_type, item_id],
            )?;
            Ok(removed)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_row(id: &str, owner: &str, category: &str) -> MemoryRow {
        MemoryRow {
            id: id.to_string(),
            owner_key: owner.to_string(),
            category: category.to_string(),
            source_type: "keepsake".to_string(),
            item_id: "keepsake_2026-01-01_abcd1234".to_string(),
            tags: vec!["생일".to_string(), "미역국".to_string()],
            occurred_date: "2026-01-01".to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            content: "생일 아침에 미역국을 끓여 주셨지.".to_string(),
            embedding: vec![0u8; 16],
        }
    }

    #[tokio::test]
    async fn upsert_replaces_by_id() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("t.db").to_str().unwrap())
            .await
            .unwrap();

        upsert_memory(&db, &make_row("m1", "owner-1", "object"))
            .await
            .unwrap();
        let mut updated = make_row("m1", "owner-1", "object");
        updated.content = "수정된 기억".to_string();
        upsert_memory(&db, &updated).await.unwrap();

        let rows = get_memories(&db, "owner-1", "object").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content, "수정된 기억");
        assert_eq!(rows[0].tags, vec!["생일", "미역국"]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_memories_scopes_owner_and_category() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("t.db").to_str().unwrap())
            .await
            .unwrap();

        upsert_memory(&db, &make_row("m1", "owner-1", "object"))
            .await
            .unwrap();
        upsert_memory(&db, &make_row("m2", "owner-1", "daily"))
            .await
            .unwrap();
        upsert_memory(&db, &make_row("m3", "owner-2", "object"))
            .await
            .unwrap();

        let rows = get_memories(&db, "owner-1", "object").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "m1");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_memories_respects_owner() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("t.db").to_str().unwrap())
            .await
            .unwrap();

        upsert_memory(&db, &make_row("m1", "owner-1", "object"))
            .await
            .unwrap();
        upsert_memory(&db, &make_row("m2", "owner-2", "object"))
            .await
            .unwrap();

        let removed = delete_memories(&db, "owner-1", "keepsake", "keepsake_2026-01-01_abcd1234")
            .await
            .unwrap();
        assert_eq!(removed, 1);

        // owner-2's row survives.
        let rows = get_memories(&db, "owner-2", "object").await.unwrap();
        assert_eq!(rows.len(), 1);

        db.close().await.unwrap();
    }
}
