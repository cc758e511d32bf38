// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Store configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for opening a persistent store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Database directory (ignored when `temporary` is set)
    pub path: PathBuf,

    /// Page cache size in bytes
    pub cache_capacity_bytes: u64,

    /// Background flush interval; `None` disables periodic flushing
    pub flush_every_ms: Option<u64>,

    /// Delete the store when it is dropped
    pub temporary: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("scanall.db"),
            cache_capacity_bytes: 64 * 1024 * 1024, // 64MB
            flush_every_ms: Some(500),
            temporary: false,
        }
    }
}

impl StoreConfig {
    /// Configuration for a store at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Configuration for a throwaway store, removed on drop
    pub fn temporary() -> Self {
        Self {
            temporary: true,
            flush_every_ms: None,
            ..Self::default()
        }
    }

    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the store cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity_bytes == 0 {
            return Err(Error::Config(
                "cache_capacity_bytes must be greater than zero".to_string(),
            ));
        }
        if self.flush_every_ms == Some(0) {
            return Err(Error::Config(
                "flush_every_ms must be greater than zero (use null to disable)".to_string(),
            ));
        }
        if !self.temporary && self.path.as_os_str().is_empty() {
            return Err(Error::Config("path must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_fills_defaults() {
        let config = StoreConfig::from_json(r#"{"path": "/tmp/issues", "flush_every_ms": null}"#)
            .unwrap();
        assert_eq!(config.path, PathBuf::from("/tmp/issues"));
        assert_eq!(config.flush_every_ms, None);
        assert_eq!(
            config.cache_capacity_bytes,
            StoreConfig::default().cache_capacity_bytes
        );
    }

    #[test]
    fn test_invalid_config() {
        let err = StoreConfig::from_json(r#"{"cache_capacity_bytes": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = StoreConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = StoreConfig::from_json(r#"{"flush_every_ms": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_temporary_skips_path_check() {
        let config = StoreConfig {
            path: PathBuf::new(),
            ..StoreConfig::temporary()
        };
        assert!(config.validate().is_ok());
    }
}
