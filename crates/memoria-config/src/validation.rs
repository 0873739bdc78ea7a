// SPDX-FileCopyrightText: 2026 Memoria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as score ranges and non-zero capacities.

use crate::diagnostic::ConfigError;
use crate::model::MemoriaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &MemoriaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Similarity threshold must be on the cosine scale.
    let threshold = config.retrieval.similarity_threshold;
    if !(-1.0..=1.0).contains(&threshold) {
        errors.push(ConfigError::Validation {
            message: format!(
                "retrieval.similarity_threshold must be within [-1.0, 1.0], got {threshold}"
            ),
        });
    }

    // Boosts are additive bonuses and must not be negative.
    if config.retrieval.exact_tag_boost < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "retrieval.exact_tag_boost must be non-negative, got {}",
                config.retrieval.exact_tag_boost
            ),
        });
    }
    if config.retrieval.partial_tag_boost < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "retrieval.partial_tag_boost must be non-negative, got {}",
                config.retrieval.partial_tag_boost
            ),
        });
    }

    if config.retrieval.partition_top_k == 0 {
        errors.push(ConfigError::Validation {
            message: "retrieval.partition_top_k must be at least 1".to_string(),
        });
    }

    if config.retrieval.cache_capacity == 0 {
        errors.push(ConfigError::Validation {
            message: "retrieval.cache_capacity must be at least 1".to_string(),
        });
    }

    if config.retrieval.default_result_limit == 0
        || config.retrieval.default_result_limit > config.retrieval.max_result_limit
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "retrieval.default_result_limit must be within 1..={}, got {}",
                config.retrieval.max_result_limit, config.retrieval.default_result_limit
            ),
        });
    }

    let overlap = config.gate.duplicate_overlap_ratio;
    if !(0.0..=1.0).contains(&overlap) {
        errors.push(ConfigError::Validation {
            message: format!(
                "gate.duplicate_overlap_ratio must be within [0.0, 1.0], got {overlap}"
            ),
        });
    }

    if config.openai.embedding_dimensions == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.embedding_dimensions must be at least 1".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = MemoriaConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        let mut config = MemoriaConfig::default();
        config.retrieval.similarity_threshold = 1.5;
        let errors = validate_config(&config).expect_err("should fail");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn zero_top_k_rejected() {
        let mut config = MemoriaConfig::default();
        config.retrieval.partition_top_k = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn result_limit_above_max_rejected() {
        let mut config = MemoriaConfig::default();
        config.retrieval.default_result_limit = 10;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_database_path_rejected() {
        let mut config = MemoriaConfig::default();
        config.storage.database_path = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = MemoriaConfig::default();
        config.retrieval.similarity_threshold = -2.0;
        config.retrieval.cache_capacity = 0;
        config.storage.database_path = String::new();
        let errors = validate_config(&config).expect_err("should fail");
        assert_eq!(errors.len(), 3);
    }
}
