// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Memory domain types for the retrieval system.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Retrieval partition a memory belongs to.
///
/// Each category is searched independently; results are merged after
/// per-partition ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryCategory {
    /// Summaries of day-to-day conversation.
    Daily,
    /// Letters exchanged with the deceased persona.
    Letter,
    /// Keepsakes and photos.
    Object,
}

impl MemoryCategory {
    /// Convert to string for SQLite storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryCategory::Daily => "daily",
            MemoryCategory::Letter => "letter",
            MemoryCategory::Object => "object",
        }
    }

    /// Parse from SQLite string.
    pub fn from_str_value(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(MemoryCategory::Daily),
            "letter" => Some(MemoryCategory::Letter),
            "object" => Some(MemoryCategory::Object),
            _ => None,
        }
    }

    /// All partitions, in merge order.
    pub fn all() -> [MemoryCategory; 3] {
        [
            MemoryCategory::Daily,
            MemoryCategory::Letter,
            MemoryCategory::Object,
        ]
    }
}

/// What kind of source produced a memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    Letter,
    Keepsake,
    Photo,
    DailySummary,
}

impl SourceType {
    /// Convert to string for SQLite storage and item identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Letter => "letter",
            SourceType::Keepsake => "keepsake",
            SourceType::Photo => "photo",
            SourceType::DailySummary => "daily_summary",
        }
    }

    /// Parse from SQLite string.
    pub fn from_str_value(s: &str) -> Option<Self> {
        match s {
            "letter" => Some(SourceType::Letter),
            "keepsake" => Some(SourceType::Keepsake),
            "photo" => Some(SourceType::Photo),
            "daily_summary" => Some(SourceType::DailySummary),
            _ => None,
        }
    }

    /// The partition this source's memories land in.
    pub fn category(&self) -> MemoryCategory {
        match self {
            SourceType::Letter => MemoryCategory::Letter,
            SourceType::Keepsake | SourceType::Photo => MemoryCategory::Object,
            SourceType::DailySummary => MemoryCategory::Daily,
        }
    }
}

/// A single retrievable memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRecord {
    /// Unique identifier for this record.
    pub id: String,
    /// Tenant scope; every read and write is bound to this.
    pub owner_key: String,
    /// Partition the record lives in.
    pub category: MemoryCategory,
    /// What kind of source produced it.
    pub source_type: SourceType,
    /// Identifier of the source item, shared by sibling records.
    pub item_id: String,
    /// Topic tags used for rank boosting.
    pub tags: Vec<String>,
    /// Calendar date the remembered event happened (`YYYY-MM-DD`).
    pub occurred_date: String,
    /// ISO 8601 ingestion timestamp.
    pub created_at: String,
    /// The memory narrative shown to downstream consumers.
    pub content: String,
    /// Embedding of the tag-augmented narrative.
    pub embedding: Vec<f32>,
}

/// A memory with retrieval scores attached.
#[derive(Debug, Clone)]
pub struct ScoredMemory {
    /// The memory itself.
    pub record: MemoryRecord,
    /// Raw cosine similarity against the query.
    pub similarity: f32,
    /// Similarity plus tag boosts; the ranking key.
    pub boosted: f32,
    /// Human phrasing of `occurred_date` relative to today.
    pub occurred_date_display: String,
}

/// A source artifact handed to the ingestion pipeline.
#[derive(Debug, Clone)]
pub enum SourceArtifact {
    Keepsake {
        name: String,
        description: String,
        story: String,
        acquired: String,
    },
    Photo {
        title: String,
        date: String,
        description: String,
    },
    Letter {
        text: String,
        reply: String,
        date: String,
    },
    DailyDialogue {
        date: String,
        transcript: String,
    },
}

impl SourceArtifact {
    /// The source type recorded on memories produced from this artifact.
    pub fn source_type(&self) -> SourceType {
        match self {
            SourceArtifact::Keepsake { .. } => SourceType::Keepsake,
            SourceArtifact::Photo { .. } => SourceType::Photo,
            SourceArtifact::Letter { .. } => SourceType::Letter,
            SourceArtifact::DailyDialogue { .. } => SourceType::DailySummary,
        }
    }

    /// The event date carried by the artifact, if it has one.
    pub fn occurred_date(&self) -> &str {
        match self {
            SourceArtifact::Keepsake { acquired, .. } => acquired,
            SourceArtifact::Photo { date, .. } => date,
            SourceArtifact::Letter { date, .. } => date,
            SourceArtifact::DailyDialogue { date, .. } => date,
        }
    }
}

/// Convert f32 vector to bytes for SQLite BLOB storage.
pub fn vec_to_blob(vec: &[f32]) -> Vec<u8> {
    vec.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert SQLite BLOB back to f32 vector.
pub fn blob_to_vec(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap_or([0; 4])))
        .collect()
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 for mismatched lengths or zero-magnitude inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Phrase an event date relative to today ("yesterday", "3 days ago", ...).
pub fn format_date_relative(date: &str) -> String {
    format_date_relative_on(date, chrono::Local::now().date_naive())
}

/// Phrase an event date relative to a reference day.
///
/// Unparseable dates fall back to "some time ago" rather than failing
/// the whole search.
pub fn format_date_relative_on(date: &str, today: NaiveDate) -> String {
    let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return "some time ago".to_string();
    };
    let days = (today - parsed).num_days();
    match days {
        d if d < 0 && parsed.year() == today.year() => format!("on {}", month_day(parsed)),
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=364 if parsed.year() == today.year() => format!("on {}", month_day(parsed)),
        _ => format!("on {} {}, {}", month_name(parsed), parsed.day(), parsed.year()),
    }
}

fn month_day(date: NaiveDate) -> String {
    format!("{} {}", month_name(date), date.day())
}

fn month_name(date: NaiveDate) -> &'static str {
    match date.month() {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
