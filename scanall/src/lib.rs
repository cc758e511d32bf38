// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! scanall - materialize prepared-statement results into caller-owned records
//!
//! Given an already-prepared statement and its bind arguments, [`materialize_all`]
//! executes the statement, walks the row cursor and fills any number of
//! application records. Each record type states its own ordered list of write
//! targets, so no reflection or schema inference is involved.
//!
//! # Quick Start
//!
//! ```no_run
//! use scanall::memory::MemoryTable;
//! use scanall::{materialize_all, params, scannable, Select};
//!
//! #[derive(Debug, Default)]
//! struct Label {
//!     id: i32,
//!     name: String,
//! }
//!
//! scannable!(Label { id, name });
//!
//! # fn main() -> scanall::Result<()> {
//! let table = MemoryTable::new();
//! table.insert(params![1, "bug", "open"]);
//! table.insert(params![2, "feature", "open"]);
//!
//! // SELECT id, name FROM labels WHERE state = ?
//! let stmt = table.prepare(Select::all().columns([0, 1]).filter_eq(2));
//!
//! let mut labels: Vec<Label> = Vec::new();
//! materialize_all(&stmt, &mut labels, &params!["open"])?;
//! assert_eq!(labels.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   Application records                   │
//! │   (SingleScannable / MultiScannable)    │
//! └─────────────────────────────────────────┘
//!                  ▲
//!                  │ scan_targets()
//! ┌─────────────────────────────────────────┐
//! │  materialize_all (this crate)           │
//! │  - execute, advance, scan, release      │
//! └─────────────────────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  StatementExecutor / RowCursor          │
//! │  - memory::MemoryTable                  │
//! │  - storage::sled::SledTable             │
//! │  - any user implementation              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`scannable`] - Record binding and accumulation contracts
//! - [`cursor`] - Statement executor and row cursor contracts
//! - [`materialize`] - The driving procedure
//! - [`target`] - Typed write targets and value conversion
//! - [`value`] - The value model rows are made of
//! - [`select`] - Backend-neutral projection/filter plan
//! - [`memory`] - In-memory backend
//! - [`storage`] - Persistent backends
//! - [`error`] - Error types and handling

pub mod cursor;
pub mod error;
pub mod materialize;
pub mod memory;
pub mod scannable;
pub mod select;
pub mod storage;
pub mod target;
pub mod value;

pub use cursor::{RowCursor, StatementExecutor};
pub use error::{ConversionError, Error, Result, ScanError};
pub use materialize::{collect_all, materialize_all};
pub use scannable::{MultiScannable, SingleScannable};
pub use select::{BoundSelect, Select};
pub use target::{scan_row, FromValue, ScanTarget};
pub use value::Value;

/// scanall version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a `Vec<Value>` of bind arguments (or row values).
///
/// ```no_run
/// use scanall::{params, Value};
///
/// let args = params![42, "open", true];
/// assert_eq!(args[0], Value::Integer(42));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}

/// Build the ordered write-target list for a record, one target per column.
///
/// ```no_run
/// use scanall::{scan_targets, ScanTarget, SingleScannable};
///
/// #[derive(Default)]
/// struct Label { id: i32, name: String }
///
/// impl SingleScannable for Label {
///     fn scan_targets(&mut self) -> Vec<&mut dyn ScanTarget> {
///         scan_targets![self.id, self.name]
///     }
/// }
/// ```
#[macro_export]
macro_rules! scan_targets {
    ($($place:expr),* $(,)?) => {
        ::std::vec![$(&mut $place as &mut dyn $crate::ScanTarget),*]
    };
}

/// Implement [`SingleScannable`] for a struct from an explicit, ordered field list.
///
/// The field order is the column order the statement returns.
#[macro_export]
macro_rules! scannable {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::SingleScannable for $ty {
            fn scan_targets(&mut self) -> ::std::vec::Vec<&mut dyn $crate::ScanTarget> {
                $crate::scan_targets![$(self.$field),+]
            }
        }
    };
}
