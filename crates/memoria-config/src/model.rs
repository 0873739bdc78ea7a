// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Memoria memorial service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Memoria configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoriaConfig {
    /// Memory search and ranking settings.
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Pre-search gating settings.
    #[serde(default)]
    pub gate: GateConfig,

    /// Memory ingestion settings.
    #[serde(default)]
    pub ingestion: IngestionConfig,

    /// OpenAI embedding and generation settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Memory search and ranking configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    /// Minimum cosine similarity for a candidate to count as signal at all.
    /// Candidates below this threshold never appear in ranked output.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Score bonus when a tag appears verbatim in the query text.
    #[serde(default = "default_exact_tag_boost")]
    pub exact_tag_boost: f64,

    /// Score bonus when only a tag's leading bigram appears in the query.
    #[serde(default = "default_partial_tag_boost")]
    pub partial_tag_boost: f64,

    /// Candidates kept per partition after ranking.
    #[serde(default = "default_partition_top_k")]
    pub partition_top_k: usize,

    /// Raw candidates fetched per partition before threshold filtering.
    #[serde(default = "default_partition_fetch_limit")]
    pub partition_fetch_limit: usize,

    /// Result limit used when the caller does not request one (chat turns).
    #[serde(default = "default_result_limit")]
    pub default_result_limit: usize,

    /// Upper bound on any caller-requested result limit.
    #[serde(default = "default_max_result_limit")]
    pub max_result_limit: usize,

    /// Seconds a cached result set stays fresh for near-duplicate queries.
    #[serde(default = "default_cache_window_secs")]
    pub cache_window_secs: u64,

    /// Maximum number of per-owner sessions kept in the result cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Overall budget for the embed+query+rank pipeline, in seconds.
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,

    /// Tighter budget applied to very short queries, in seconds.
    #[serde(default = "default_short_query_timeout_secs")]
    pub short_query_timeout_secs: u64,

    /// Queries at or under this many characters use the short budget.
    #[serde(default = "default_short_query_max_chars")]
    pub short_query_max_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            exact_tag_boost: default_exact_tag_boost(),
            partial_tag_boost: default_partial_tag_boost(),
            partition_top_k: default_partition_top_k(),
            partition_fetch_limit: default_partition_fetch_limit(),
            default_result_limit: default_result_limit(),
            max_result_limit: default_max_result_limit(),
            cache_window_secs: default_cache_window_secs(),
            cache_capacity: default_cache_capacity(),
            search_timeout_secs: default_search_timeout_secs(),
            short_query_timeout_secs: default_short_query_timeout_secs(),
            short_query_max_chars: default_short_query_max_chars(),
        }
    }
}

fn default_similarity_threshold() -> f64 {
    0.3
}

fn default_exact_tag_boost() -> f64 {
    0.10
}

fn default_partial_tag_boost() -> f64 {
    0.05
}

fn default_partition_top_k() -> usize {
    3
}

fn default_partition_fetch_limit() -> usize {
    15
}

fn default_result_limit() -> usize {
    1
}

fn default_max_result_limit() -> usize {
    5
}

fn default_cache_window_secs() -> u64 {
    30
}

fn default_cache_capacity() -> usize {
    100
}

fn default_search_timeout_secs() -> u64 {
    10
}

fn default_short_query_timeout_secs() -> u64 {
    5
}

fn default_short_query_max_chars() -> usize {
    10
}

/// Pre-search gating configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Queries with trimmed length at or under this skip the search entirely.
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Word-overlap ratio (over the smaller word set) at or above which a
    /// query counts as a near-duplicate of a recent one.
    #[serde(default = "default_duplicate_overlap_ratio")]
    pub duplicate_overlap_ratio: f64,

    /// Low-information conversational fillers that never warrant a search.
    /// Matched by containment against the normalized query.
    #[serde(default = "default_filler_phrases")]
    pub filler_phrases: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_query_chars: default_min_query_chars(),
            duplicate_overlap_ratio: default_duplicate_overlap_ratio(),
            filler_phrases: default_filler_phrases(),
        }
    }
}

fn default_min_query_chars() -> usize {
    2
}

fn default_duplicate_overlap_ratio() -> f64 {
    0.6
}

fn default_filler_phrases() -> Vec<String> {
    // Greetings, thanks, and simple affect words from the production corpus.
    [
        "안녕", "고마워", "감사", "사랑해", "보고싶어", "잘자", "안녕히", "괜찮아", "좋아",
        "싫어", "힘들어", "슬퍼", "기뻐",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Memory ingestion configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IngestionConfig {
    /// Maximum number of tags retained per memory record.
    #[serde(default = "default_max_tags")]
    pub max_tags: usize,

    /// Length of the random suffix appended to generated item identifiers.
    #[serde(default = "default_item_suffix_len")]
    pub item_suffix_len: usize,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            max_tags: default_max_tags(),
            item_suffix_len: default_item_suffix_len(),
        }
    }
}

fn default_max_tags() -> usize {
    8
}

fn default_item_suffix_len() -> usize {
    8
}

/// OpenAI embedding and generation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. Usually supplied via `MEMORIA_OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// API base URL. Overridable for tests and proxies.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Embedding model identifier.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Dimensionality of the embedding model's output vectors.
    /// Fixed per deployment; identical across all partitions.
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// Text-generation model identifier.
    #[serde(default = "default_generation_model")]
    pub generation_model: String,

    /// Embedding input longer than this many characters is truncated.
    #[serde(default = "default_max_embed_chars")]
    pub max_embed_chars: usize,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_openai_base_url(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: default_embedding_dimensions(),
            generation_model: default_generation_model(),
            max_embed_chars: default_max_embed_chars(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_embedding_dimensions() -> usize {
    1536
}

fn default_generation_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_embed_chars() -> usize {
    8000
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "memoria.db".to_string()
}
