// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialogue log operations.

use memoria_core::MemoriaError;
use rusqlite::params;

use crate::database::Database;
use crate::models::DialogueTurn;

/// Append one turn to the dialogue log.
pub async fn append_dialogue(db: &Database, turn: &DialogueTurn) -> Result<(), MemoriaError> {
    let turn = turn.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO dialogue (owner_key, sender, message, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![turn.owner_key, turn.sender, turn.message, turn.created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the most recent `limit` turns for an owner, in chronological order.
pub async fn get_recent_dialogue(
    db: &Database,
    owner_key: &str,
    limit: i64,
) -> Result<Vec<DialogueTurn>, MemoriaError> {
    let owner_key = owner_key.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT owner_key, sender, message, created_at
                 FROM dialogue WHERE owner_key = ?1
                 ORDER BY created_at DESC, id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![owner_key, limit], |row| {
                Ok(DialogueTurn {
                    owner_key: row.get(0)?,
                    sender: row.get(1)?,
                    message: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?;
            let mut turns = Vec::new();
            for row in rows {
                turns.push(row?);
            }
            turns.reverse();
            Ok(turns)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get all turns for an owner on one calendar date (`YYYY-MM-DD`), oldest first.
pub async fn get_dialogue_by_date(
    db: &Database,
    owner_key: &str,
    date: &str,
) -> Result<Vec<DialogueTurn>, MemoriaError> {
    let owner_key = owner_key.to_string();
    let date = date.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT owner_key, sender, message, created_at
                 FROM dialogue WHERE owner_key = ?1 AND date(created_at) = ?2
                 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![owner_key, date], |row| {
                Ok(DialogueTurn {
                    owner_key: row.get(0)?,
                    sender: row.get(1)?,
                    message: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?;
            let mut turns = Vec::new();
            for row in rows {
                turns.push(row?);
            }
            Ok(turns)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_turn(owner: &str, sender: &str, message: &str, at: &str) -> DialogueTurn {
        DialogueTurn {
            owner_key: owner.to_string(),
            sender: sender.to_string(),
            message: message.to_string(),
            created_at: at.to_string(),
        }
    }

    #[tokio::test]
    async fn recent_dialogue_is_chronological() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("t.db").to_str().unwrap())
            .await
            .unwrap();

        for i in 0..5 {
            let turn = make_turn(
                "owner-1",
                if i % 2 == 0 { "user" } else { "assistant" },
                &format!("turn {i}"),
                &format!("2026-01-01T00:00:0{i}.000Z"),
            );
            append_dialogue(&db, &turn).await.unwrap();
        }

        let turns = get_recent_dialogue(&db, "owner-1", 3).await.unwrap();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].message, "turn 2");
        assert_eq!(turns[2].message, "turn 4");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn dialogue_by_date_scopes_owner_and_day() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("t.db").to_str().unwrap())
            .await
            .unwrap();

        append_dialogue(&db, &make_turn("owner-1", "user", "어제 일", "2026-01-01T10:00:00.000Z"))
            .await
            .unwrap();
        append_dialogue(&db, &make_turn("owner-1", "user", "오늘 일", "2026-01-02T10:00:00.000Z"))
            .await
            .unwrap();
        append_dialogue(&db, &make_turn("owner-2", "user", "남의 일", "2026-01-02T10:00:00.000Z"))
            .await
            .unwrap();

        let turns = get_dialogue_by_date(&db, "owner-1", "2026-01-02").await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].message, "오늘 일");

        db.close().await.unwrap();
    }
}
