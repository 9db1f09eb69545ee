// In: src/config.rs

//! The single source of truth for codec configuration.
//!
//! `CodecConfig` is created once at the application boundary (in code, or from
//! a JSON document) and shared read-only through an `Arc` by every codec
//! instance built from it. The lane width is not part of the configuration: it
//! is a compile-time parameter of `TraceCodec` because it changes the byte
//! stream.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::FpdcError;

//==================================================================================
// I. Execution Strategy
//==================================================================================

/// How chunks are distributed over threads.
///
/// Output is byte-identical across all modes; only throughput differs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Chunks run one after another on the calling thread.
    Sequential,

    /// **Default:** Chunks run on rayon workers. With `threads: None` the global
    /// pool is used; `Some(n)` builds a dedicated pool of `n` threads owned by
    /// the codec.
    Parallel {
        #[serde(default)]
        threads: Option<usize>,
    },
}

impl Default for ExecutionMode {
    fn default() -> Self {
        ExecutionMode::Parallel { threads: None }
    }
}

//==================================================================================
// II. The Unified CodecConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CodecConfig {
    /// Number of round-robin interleaved channels in the trace (D).
    #[serde(default = "default_dimensionality")]
    pub dimensionality: usize,

    /// **Target elements per chunk** for the uniform partitioner. Rounded up to
    /// a multiple of the lane width. Ignored when the caller supplies its own
    /// boundaries.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default)]
    pub execution: ExecutionMode,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            dimensionality: default_dimensionality(),
            chunk_size: default_chunk_size(),
            execution: ExecutionMode::default(),
        }
    }
}

impl CodecConfig {
    pub fn with_dimensionality(dimensionality: usize) -> Self {
        Self {
            dimensionality,
            ..Self::default()
        }
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, FpdcError> {
        let config: CodecConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration document.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, FpdcError> {
        let config: CodecConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FpdcError> {
        if self.dimensionality < 1 {
            return Err(FpdcError::InvalidDimensionality(self.dimensionality));
        }
        if self.chunk_size < 1 {
            return Err(FpdcError::InvalidConfig(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if let ExecutionMode::Parallel { threads: Some(0) } = self.execution {
            return Err(FpdcError::InvalidConfig(
                "a dedicated thread pool needs at least one thread".to_string(),
            ));
        }
        Ok(())
    }
}

/// Helper for `serde` to provide a default for `dimensionality`.
fn default_dimensionality() -> usize {
    1
}

/// Helper for `serde` to provide a default for `chunk_size`.
fn default_chunk_size() -> usize {
    8192
}

//==================================================================================
// III. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = CodecConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.execution, ExecutionMode::Parallel { threads: None });
    }

    #[test]
    fn test_full_document() {
        let json = r#"{
            "dimensionality": 3,
            "chunk_size": 1024,
            "execution": { "mode": "parallel", "threads": 4 }
        }"#;
        let config = CodecConfig::from_json_str(json).unwrap();
        assert_eq!(config.dimensionality, 3);
        assert_eq!(config.chunk_size, 1024);
        assert_eq!(config.execution, ExecutionMode::Parallel { threads: Some(4) });
    }

    #[test]
    fn test_sequential_mode_from_reader() {
        let json = br#"{ "execution": { "mode": "sequential" } }"#;
        let config = CodecConfig::from_json_reader(&json[..]).unwrap();
        assert_eq!(config.execution, ExecutionMode::Sequential);
    }

    #[test]
    fn test_zero_dimensionality_is_rejected() {
        let result = CodecConfig::from_json_str(r#"{ "dimensionality": 0 }"#);
        assert!(matches!(result, Err(FpdcError::InvalidDimensionality(0))));
    }

    #[test]
    fn test_zero_threads_is_rejected() {
        let config = CodecConfig {
            execution: ExecutionMode::Parallel { threads: Some(0) },
            ..CodecConfig::default()
        };
        assert!(matches!(config.validate(), Err(FpdcError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = CodecConfig::from_json_str("{ dimensionality: }");
        assert!(matches!(result, Err(FpdcError::ConfigParse(_))));
    }
}
