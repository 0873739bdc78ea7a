// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.

use serde::{Deserialize, Serialize};

/// Profile of one user<->deceased relationship, keyed by owner key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OwnerProfile {
    pub owner_key: String,
    pub user_name: String,
    pub deceased_name: String,
    pub nickname: Option<String>,
    pub relation_to_user: Option<String>,
    pub personality: Option<String>,
    pub speaking_style: Option<String>,
    pub created_at: String,
}

/// Kind of a source artifact awaiting or past ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Keepsake,
    Photo,
    Letter,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Keepsake => "keepsake",
            ArtifactKind::Photo => "photo",
            ArtifactKind::Letter => "letter",
        }
    }

    pub fn from_str_value(s: &str) -> Option<Self> {
        match s {
            "keepsake" => Some(ArtifactKind::Keepsake),
            "photo" => Some(ArtifactKind::Photo),
            "letter" => Some(ArtifactKind::Letter),
            _ => None,
        }
    }
}

/// A user-supplied artifact: keepsake, photo, or letter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    pub id: String,
    pub owner_key: String,
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    pub story: Option<String>,
    pub occurred_date: Option<String>,
    pub created_at: String,
}

/// One turn of recorded conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DialogueTurn {
    pub owner_key: String,
    pub sender: String,
    pub message: String,
    pub created_at: String,
}

/// A stored memory row, embedding included.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRow {
    pub id: String,
    pub owner_key: String,
    pub category: String,
    pub source_type: String,
    pub item_id: String,
    pub tags: Vec<String>,
    pub occurred_date: String,
    pub created_at: String,
    pub content: String,
    pub embedding: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_kind_round_trips() {
        for kind in [ArtifactKind::Keepsake, ArtifactKind::Photo, ArtifactKind::Letter] {
            assert_eq!(ArtifactKind::from_str_value(kind.as_str()), Some(kind));
        }
        assert_eq!(ArtifactKind::from_str_value("chat"), None);
    }
}
