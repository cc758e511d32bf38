// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory backend
//!
//! [`MemoryTable`] keeps rows in insertion order behind a `RwLock`. Prepared
//! statements snapshot the matching rows at execute time, so a cursor never
//! holds the table lock while the caller scans.

use crate::cursor::{RowCursor, StatementExecutor};
use crate::error::{Error, Result};
use crate::select::Select;
use crate::target::{scan_row, ScanTarget};
use crate::value::Value;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory table of rows
///
/// Cloning is cheap and clones share the same rows.
#[derive(Clone, Default)]
pub struct MemoryTable {
    rows: Arc<RwLock<Vec<Vec<Value>>>>,
    open_cursors: Arc<AtomicUsize>,
}

impl MemoryTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row
    pub fn insert(&self, row: Vec<Value>) {
        self.rows.write().push(row);
    }

    /// Append several rows, in order
    pub fn insert_all<I: IntoIterator<Item = Vec<Value>>>(&self, rows: I) {
        self.rows.write().extend(rows);
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Remove every row
    pub fn clear(&self) {
        self.rows.write().clear();
    }

    /// Cursors opened on this table and not yet released
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    /// Prepare a statement over this table
    pub fn prepare(&self, select: Select) -> MemoryStatement {
        MemoryStatement {
            table: self.clone(),
            select,
        }
    }
}

/// Prepared statement over a [`MemoryTable`]
pub struct MemoryStatement {
    table: MemoryTable,
    select: Select,
}

impl MemoryStatement {
    /// The plan this statement runs
    pub fn select(&self) -> &Select {
        &self.select
    }
}

impl StatementExecutor for MemoryStatement {
    type Cursor = MemoryCursor;

    fn execute(&self, args: &[Value]) -> Result<MemoryCursor> {
        let bound = self.select.bind(args)?;

        let rows: Vec<Vec<Value>> = self
            .table
            .rows
            .read()
            .iter()
            .filter_map(|row| bound.apply(row))
            .collect();

        log::debug!("Memory statement matched {} row(s)", rows.len());
        self.table.open_cursors.fetch_add(1, Ordering::SeqCst);

        Ok(MemoryCursor {
            rows: rows.into_iter(),
            current: None,
            open_cursors: Some(self.table.open_cursors.clone()),
        })
    }
}

/// Cursor over a snapshot of matching rows
pub struct MemoryCursor {
    rows: std::vec::IntoIter<Vec<Value>>,
    current: Option<Vec<Value>>,
    open_cursors: Option<Arc<AtomicUsize>>,
}

impl MemoryCursor {
    /// Cursor over the given rows, not attached to any table
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        MemoryCursor {
            rows: rows.into_iter(),
            current: None,
            open_cursors: None,
        }
    }
}

impl RowCursor for MemoryCursor {
    fn advance(&mut self) -> bool {
        self.current = self.rows.next();
        self.current.is_some()
    }

    fn scan_into(&mut self, targets: &mut [&mut dyn ScanTarget]) -> Result<()> {
        match &self.current {
            Some(row) => scan_row(row, targets),
            None => Err(Error::Terminal("scan called without a current row".to_string())),
        }
    }

    fn terminal_error(&mut self) -> Option<Error> {
        None
    }

    fn release(&mut self) -> Result<()> {
        if let Some(open_cursors) = self.open_cursors.take() {
            open_cursors.fetch_sub(1, Ordering::SeqCst);
        }
        self.current = None;
        Ok(())
    }
}
