// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owner profile operations.

use memoria_core::MemoriaError;
use rusqlite::params;

use crate::database::Database;
use crate::models::OwnerProfile;

/// Insert or update an owner profile.
pub async fn upsert_owner(db: &Database, profile: &OwnerProfile) -> Result<(), MemoriaError> {
    let profile = profile.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO owners (owner_key, user_name, deceased_name, nickname,
                                     relation_to_user, personality, speaking_style, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(owner_key) DO UPDATE SET
                     user_name = excluded.user_name,
                     deceased_name = excluded.deceased_name,
                     nickname = excluded.nickname,
                     relation_to_user = excluded.relation_to_user,
                     personality = excluded.personality,
                     speaking_style = excluded.speaking_style",
                params![
                    profile.owner_key,
                    profile.user_name,
                    profile.deceased_name,
                    profile.nickname,
                    profile.relation_to_user,
                    profile.personality,
                    profile.speaking_style,
                    profile.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch an owner profile by key.
pub async fn get_owner_profile(
    db: &Database,
    owner_key: &str,
) -> Result<Option<OwnerProfile>, MemoriaError> {
    let owner_key = owner_key.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT owner_key, user_name, deceased_name, nickname,
                        relation_to_user, personality, speaking_style, created_at
                 FROM owners WHERE owner_key = ?1",
            )?;
            let mut rows = stmt.query_map(params![owner_key], |row| {
                Ok(OwnerProfile {
                    owner_key: row.get(0)?,
                    user_name: row.get(1)?,
                    deceased_name: row.get(2)?,
                    nickname: row.get(3)?,
                    relation_to_user: row.get(4)?,
                    personality: row.get(5)?,
                    speaking_style: row.get(6)?,
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

/// List every registered owner key.
pub async fn list_owner_keys(db: &Database) -> Result<Vec<String>, MemoriaError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT owner_key FROM owners ORDER BY owner_key")?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            let mut keys = Vec::new();
            for row in rows {
                keys.push(row?);
            }
            Ok(keys)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_owner(key: &str) -> OwnerProfile {
        OwnerProfile {
            owner_key: key.to_string(),
            user_name: "지우".to_string(),
            deceased_name: "어머니".to_string(),
            nickname: Some("엄마".to_string()),
            relation_to_user: Some("mother".to_string()),
            personality: None,
            speaking_style: None,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn upsert_and_get_owner() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("t.db").to_str().unwrap())
            .await
            .unwrap();

        upsert_owner(&db, &make_owner("owner-1")).await.unwrap();
        let profile = get_owner_profile(&db, "owner-1").await.unwrap().unwrap();
        assert_eq!(profile.deceased_name, "어머니");

        let mut updated = make_owner("owner-1");
        updated.nickname = Some("울엄마".to_string());
        upsert_owner(&db, &updated).await.unwrap();
        let profile = get_owner_profile(&db, "owner-1").await.unwrap().unwrap();
        assert_eq!(profile.nickname.as_deref(), Some("울엄마"));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn missing_owner_returns_none() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("t.db").to_str().unwrap())
            .await
            .unwrap();
        assert!(get_owner_profile(&db, "nope").await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_owner_keys_sorted() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("t.db").to_str().unwrap())
            .await
            .unwrap();
        upsert_owner(&db, &make_owner("owner-b")).await.unwrap();
        upsert_owner(&db, &make_owner("owner-a")).await.unwrap();
        let keys = list_owner_keys(&db).await.unwrap();
        assert_eq!(keys, vec!["owner-a".to_string(), "owner-b".to_string()]);
        db.close().await.unwrap();
    }
}
