// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Persistent storage backends
//!
//! ```text
//! SledStore (StoreConfig)
//!     ↓  table(name)
//! SledTable (one sled tree, rows in insertion order)
//!     ↓  prepare(Select)
//! SledStatement → SledCursor (lazy, decodes rows while advancing)
//! ```

pub mod config;

#[cfg(feature = "sled-backend")]
pub mod sled;

pub use config::StoreConfig;

#[cfg(feature = "sled-backend")]
pub use self::sled::{SledCursor, SledStatement, SledStore, SledTable};
