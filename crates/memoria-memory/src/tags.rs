// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tag extraction from generated narratives.
//!
//! Generation output is expected to end with a tag line, but models drift.
//! Parsing tries a chain of strategies and degrades to "no tags" instead of
//! failing ingestion.

use tracing::debug;

/// A narrative split from its topic tags.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNarrative {
    /// The memory text with the tag line removed.
    pub narrative: String,
    /// Extracted tags, deduplicated, capped at `max_tags`.
    pub tags: Vec<String>,
}

/// Line prefixes that mark an explicit tag line.
const TAG_MARKERS: [&str; 3] = ["태그:", "Tags:", "tags:"];

/// Split a generated text into narrative and tags.
///
/// Strategies, in order:
/// 1. a line starting with a tag marker ("태그:", "Tags:")
/// 2. a trailing bracketed list ("[생일, 미역국]")
/// 3. fallback: the whole text with no tags
pub fn parse_narrative(text: &str, max_tags: usize) -> ParsedNarrative {
    if let Some(parsed) = parse_marker_line(text, max_tags) {
        return parsed;
    }
    if let Some(parsed) = parse_trailing_brackets(text, max_tags) {
        return parsed;
    }
    debug!("no tag line found in generated narrative");
    ParsedNarrative {
        narrative: text.trim().to_string(),
        tags: Vec::new(),
    }
}

fn parse_marker_line(text: &str, max_tags: usize) -> Option<ParsedNarrative> {
    let mut narrative_lines = Vec::new();
    let mut tags = None;

    for line in text.lines() {
        let trimmed = line.trim();
        let marker = TAG_MARKERS.iter().find(|m| trimmed.starts_with(*m));
        match marker {
            // Last marker line wins if the model emits several.
            Some(m) => tags = Some(split_tags(&trimmed[m.len()..], max_tags)),
            None => narrative_lines.push(line),
        }
    }

    tags.map(|tags| ParsedNarrative {
        narrative: narrative_lines.join("\n").trim().to_string(),
        tags,
    })
}

fn parse_trailing_brackets(text: &str, max_tags: usize) -> Option<ParsedNarrative> {
    let trimmed = text.trim_end();
    let last_line = trimmed.lines().last()?.trim();
    let inner = last_line.strip_prefix('[')?.strip_suffix(']')?;

    let narrative = trimmed
        .strip_suffix(last_line)
        .unwrap_or(trimmed)
        .trim()
        .to_string();
    Some(ParsedNarrative {
        narrative,
        tags: split_tags(inner, max_tags),
    })
}

fn split_tags(raw: &str, max_tags: usize) -> Vec<String> {
    let mut tags = Vec::new();
    for piece in raw.split(',') {
        let tag = piece.trim().trim_matches(|c| c == '#' || c == '"').trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
        if tags.len() == max_tags {
            break;
        }
    }
    tags
}
