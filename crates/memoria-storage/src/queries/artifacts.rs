// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Artifact CRUD operations.

use memoria_core::MemoriaError;
use rusqlite::params;

use crate::database::Database;
use crate::models::Artifact;

/// Insert a new artifact.
pub async fn insert_artifact(db: &Database, artifact: &Artifact) -> Result<(), MemoriaError> {
    let artifact = artifact.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO artifacts (id, owner_key, kind, title, description, story,
                                        occurred_date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    artifact.id,
                    artifact.owner_key,
                    artifact.kind,
                    artifact.title,
                    artifact.description,
                    artifact.story,
                    artifact.occurred_date,
                    artifact.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch one artifact by id, scoped to its owner.
pub async fn get_artifact(
    db: &Database,
    owner_key: &str,
    id: &str,
) -> Result<Option<Artifact>, MemoriaError> {
    let owner_key = owner_key.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_key, kind, title, description, story, occurred_date, created_at
                 FROM artifacts WHERE owner_key = ?1 AND id = ?2",
            )?;
            let mut rows = stmt.query_map(params![owner_key, id], |row| {
                Ok(Artifact {
                    id: row.get(0)?,
                    owner_key: row.get(1)?,
                    kind: row.get(2)?,
                    title: row.get(3)?,
                    description: row.get(4)?,
                    story: row.get(5)?,
                    occurred_date: row.get(6)?,
                    created_at: row.get(7)?,
                })
            })?;
            match rows.next() {
                Some(row) => Ok(Some(row?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List artifacts of one kind for an owner, newest first.
pub async fn list_artifacts(
    db: &Database,
    owner_key: &str,
    kind: &str,
) -> Result<Vec<Artifact>, MemoriaError> {
    let owner_key = owner_key.to_string();
    let kind = kind.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_key, kind, title, description, story, occurred_date, created_at
                 FROM artifacts WHERE owner_key = ?1 AND kind = ?2
                 ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map(params![owner_key, kind], |row| {
                Ok(Artifact {
                    id: row.get(0)?,
                    owner_key: row.get(1)?,
                    kind: row.get(2)?,
                    title: row.get(3)?,
                    description: row.get(4)?,
                    story: row.get(5)?,
                    occurred_date: row.get(6)?,
                    created_at: row.get(7)?,
                })
            })?;
            let mut artifacts = Vec::new();
            for row in rows {
                artifacts.push(row?);
            }
            Ok(artifacts)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_artifact(id: &str, owner: &str, kind: &str) -> Artifact {
        Artifact {
            id: id.to_string(),
            owner_key: owner.to_string(),
            kind: kind.to_string(),
            title: "어머니의 목도리".to_string(),
            description: Some("겨울마다 두르시던 빨간 목도리".to_string()),
            story: Some("마지막 겨울에 직접 떠 주셨다".to_string()),
            occurred_date: Some("2024-12-25".to_string()),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_get_artifact() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("t.db").to_str().unwrap())
            .await
            .unwrap();

        insert_artifact(&db, &make_artifact("a1", "owner-1", "keepsake"))
            .await
            .unwrap();
        let found = get_artifact(&db, "owner-1", "a1").await.unwrap().unwrap();
        assert_eq!(found.title, "어머니의 목도리");

        // Another owner must not see it.
        assert!(get_artifact(&db, "owner-2", "a1").await.unwrap().is_none());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_artifacts_filters_by_kind() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("t.db").to_str().unwrap())
            .await
            .unwrap();

        insert_artifact(&db, &make_artifact("a1", "owner-1", "keepsake"))
            .await
            .unwrap();
        insert_artifact(&db, &make_artifact("a2", "owner-1", "photo"))
            .await
            .unwrap();

        let keepsakes = list_artifacts(&db, "owner-1", "keepsake").await.unwrap();
        assert_eq!(keepsakes.len(), 1);
        assert_eq!(keepsakes[0].id, "a1");

        db.close().await.unwrap();
    }
}
