// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result materialization
//!
//! [`materialize_all`] executes a statement and scans every result row into
//! a freshly appended element of a [`MultiScannable`] collection.

use crate::cursor::{RowCursor, StatementExecutor};
use crate::error::Result;
use crate::scannable::{MultiScannable, SingleScannable};
use crate::value::Value;

/// Execute `executor` with `args` and store all result rows in `dst`
///
/// Rows are appended to `dst` in the order the cursor delivers them. The
/// first error stops the walk and is returned unchanged:
///
/// - an execution error leaves `dst` untouched;
/// - a scan error leaves every earlier row in `dst`, plus the element that was
///   allocated for the failing row (it may be only partly written);
/// - a terminal cursor error leaves all scanned rows in `dst`.
///
/// The cursor is released exactly once whenever `execute` succeeded. A
/// release failure is returned only when nothing else failed.
///
/// # Examples
///
/// ```no_run
/// use scanall::memory::MemoryTable;
/// use scanall::{materialize_all, params, scannable, Select};
///
/// #[derive(Default)]
/// struct Label {
///     id: i32,
///     name: String,
/// }
///
/// scannable!(Label { id, name });
///
/// # fn main() -> scanall::Result<()> {
/// let table = MemoryTable::new();
/// table.insert(params![1, "bug"]);
///
/// let stmt = table.prepare(Select::all().filter_eq(0));
/// let mut labels: Vec<Label> = Vec::new();
/// materialize_all(&stmt, &mut labels, &params![1])?;
/// # Ok(())
/// # }
/// ```
pub fn materialize_all<E, M>(executor: &E, dst: &mut M, args: &[Value]) -> Result<()>
where
    E: StatementExecutor + ?Sized,
    M: MultiScannable + ?Sized,
{
    let cursor = executor.execute(args)?;
    let mut guard = CursorGuard::new(cursor);

    let outcome = scan_all(guard.cursor_mut(), dst);
    if let Ok(rows) = &outcome {
        log::debug!("Materialized {} row(s)", rows);
    }

    guard.finish(outcome).map(|_| ())
}

/// Execute `executor` with `args` and collect the rows into a new `Vec<T>`
///
/// On error the partially filled vector is dropped.
pub fn collect_all<T, E>(executor: &E, args: &[Value]) -> Result<Vec<T>>
where
    T: SingleScannable + Default,
    E: StatementExecutor + ?Sized,
{
    let mut rows = Vec::new();
    materialize_all(executor, &mut rows, args)?;
    Ok(rows)
}

fn scan_all<C, M>(cursor: &mut C, dst: &mut M) -> Result<usize>
where
    C: RowCursor,
    M: MultiScannable + ?Sized,
{
    let mut rows = 0usize;

    while cursor.advance() {
        let element = dst.new_element();
        let mut targets = element.scan_targets();
        cursor.scan_into(&mut targets)?;
        rows += 1;
        log::trace!("Scanned row {}", rows);
    }

    match cursor.terminal_error() {
        Some(error) => Err(error),
        None => Ok(rows),
    }
}

/// Releases the wrapped cursor exactly once
///
/// `finish` releases on the normal path and merges the release result with
/// the walk outcome. `Drop` covers unwinding, where the release error can
/// only be logged.
struct CursorGuard<C: RowCursor> {
    cursor: C,
    released: bool,
}

impl<C: RowCursor> CursorGuard<C> {
    fn new(cursor: C) -> Self {
        CursorGuard {
            cursor,
            released: false,
        }
    }

    fn cursor_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        log::trace!("Releasing cursor");
        self.cursor.release()
    }

    fn finish<T>(mut self, outcome: Result<T>) -> Result<T> {
        let released = self.release();

        match (outcome, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(release_error)) => Err(release_error),
            (Err(error), Ok(())) => Err(error),
            (Err(error), Err(release_error)) => {
                log::warn!(
                    "Cursor release failed after an earlier error: {}",
                    release_error
                );
                Err(error)
            }
        }
    }
}

impl<C: RowCursor> Drop for CursorGuard<C> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.release() {
            log::warn!("Failed to release cursor on drop: {}", e);
        }
    }
}
