// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement executor and row cursor contracts
//!
//! These are the capabilities [`crate::materialize_all`] consumes. A backend
//! provides a prepared statement ([`StatementExecutor`]) that, given bind
//! arguments, opens a forward-only [`RowCursor`] over the result rows.

use crate::error::{Error, Result};
use crate::target::ScanTarget;
use crate::value::Value;

/// Forward-only, single-pass stream over the rows of one execution
///
/// The cursor exposes only the current row. `release` is called exactly once
/// by whoever opened the cursor, after which the cursor is not used again.
pub trait RowCursor {
    /// Move to the next row. Returns `false` once the rows are exhausted or
    /// the stream failed; a failure is then reported by `terminal_error`.
    fn advance(&mut self) -> bool;

    /// Scan the current row into `targets`, positionally
    ///
    /// Arity and conversion failures are reported as [`Error::Scan`].
    fn scan_into(&mut self, targets: &mut [&mut dyn ScanTarget]) -> Result<()>;

    /// Deferred error discovered while iterating, if any
    fn terminal_error(&mut self) -> Option<Error>;

    /// Release the resources behind the cursor
    fn release(&mut self) -> Result<()>;
}

/// A prepared statement that can be executed with bind arguments
pub trait StatementExecutor {
    type Cursor: RowCursor;

    /// Run the statement. Fails with [`Error::Execution`] when the statement
    /// cannot be started; no cursor is returned in that case.
    fn execute(&self, args: &[Value]) -> Result<Self::Cursor>;
}

impl<F, C> StatementExecutor for F
where
    F: Fn(&[Value]) -> Result<C>,
    C: RowCursor,
{
    type Cursor = C;

    fn execute(&self, args: &[Value]) -> Result<C> {
        self(args)
    }
}

impl<C: RowCursor + ?Sized> RowCursor for Box<C> {
    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    fn scan_into(&mut self, targets: &mut [&mut dyn ScanTarget]) -> Result<()> {
        (**self).scan_into(targets)
    }

    fn terminal_error(&mut self) -> Option<Error> {
        (**self).terminal_error()
    }

    fn release(&mut self) -> Result<()> {
        (**self).release()
    }
}
