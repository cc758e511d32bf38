// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for statement execution, row scanning and storage

use thiserror::Error;

/// Main error type for scanall operations
///
/// The first four variants are the ones [`crate::materialize_all`] can return;
/// they are passed through unchanged from the executor and cursor.
#[derive(Error, Debug)]
pub enum Error {
    /// The statement could not be started. No cursor exists.
    #[error("Execution error: {0}")]
    Execution(String),

    /// A row could not be bound into its targets.
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// A fault reported by the cursor after the last row.
    #[error("Cursor error: {0}")]
    Terminal(String),

    /// Releasing the cursor failed.
    #[error("Release error: {0}")]
    Release(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure to bind one row into the record's write targets
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("expected {expected} columns, row has {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("column {column}: {source}")]
    Conversion {
        column: usize,
        #[source]
        source: ConversionError,
    },
}

/// A single value could not be written into a target
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot convert {found} into {expected}{}", detail_suffix(.detail))]
pub struct ConversionError {
    pub expected: &'static str,
    pub found: &'static str,
    pub detail: Option<String>,
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default()
}

impl ConversionError {
    /// Plain type mismatch
    pub fn mismatch(expected: &'static str, found: &'static str) -> Self {
        ConversionError {
            expected,
            found,
            detail: None,
        }
    }

    /// Right type, but the value does not fit (overflow, out of range, ...)
    pub fn out_of_range(expected: &'static str, found: &'static str, detail: String) -> Self {
        ConversionError {
            expected,
            found,
            detail: Some(detail),
        }
    }
}

impl Error {
    /// Check whether this error came out of the per-row scan step
    pub fn is_scan(&self) -> bool {
        matches!(self, Error::Scan(_))
    }
}

#[cfg(feature = "sled-backend")]
impl From<sled::Error> for Error {
    fn from(error: sled::Error) -> Self {
        Error::Storage(error.to_string())
    }
}

#[cfg(feature = "sled-backend")]
impl From<bincode::Error> for Error {
    fn from(error: bincode::Error) -> Self {
        Error::Storage(format!("row encoding: {}", error))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Config(error.to_string())
    }
}

/// Result type alias for scanall operations
pub type Result<T> = std::result::Result<T, Error>;
