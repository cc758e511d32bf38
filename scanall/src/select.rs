// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Backend-neutral select plan
//!
//! A [`Select`] is what the bundled backends prepare: an optional column
//! projection plus equality filters whose right-hand sides are the bind
//! arguments, in order. It corresponds to
//! `SELECT c1, c2 FROM t WHERE f1 = ? AND f2 = ?`.

use crate::error::{Error, Result};
use crate::value::Value;

static NULL: Value = Value::Null;

/// Projection and filter plan for a table scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    projection: Option<Vec<usize>>,
    filters: Vec<usize>,
}

impl Select {
    /// Select every column of every row
    pub fn all() -> Self {
        Select::default()
    }

    /// Project the given column indexes, in the given order
    pub fn columns<I: IntoIterator<Item = usize>>(mut self, columns: I) -> Self {
        self.projection = Some(columns.into_iter().collect());
        self
    }

    /// Add an equality filter on `column`, compared against the next bind argument
    pub fn filter_eq(mut self, column: usize) -> Self {
        self.filters.push(column);
        self
    }

    /// Number of bind arguments this plan expects
    pub fn parameter_count(&self) -> usize {
        self.filters.len()
    }

    /// Bind arguments to the plan
    ///
    /// Fails with [`Error::Execution`] when the argument count does not match.
    pub fn bind(&self, args: &[Value]) -> Result<BoundSelect> {
        if args.len() != self.filters.len() {
            return Err(Error::Execution(format!(
                "expected {} bind arguments, got {}",
                self.filters.len(),
                args.len()
            )));
        }

        Ok(BoundSelect {
            select: self.clone(),
            args: args.to_vec(),
        })
    }
}

/// A [`Select`] with its bind arguments
#[derive(Debug, Clone)]
pub struct BoundSelect {
    select: Select,
    args: Vec<Value>,
}

impl BoundSelect {
    /// Check a stored row against every equality filter
    pub fn matches(&self, row: &[Value]) -> bool {
        self.select
            .filters
            .iter()
            .zip(&self.args)
            .all(|(&column, arg)| column_value(row, column) == arg)
    }

    /// Build the result row for a stored row
    pub fn project(&self, row: &[Value]) -> Vec<Value> {
        match &self.select.projection {
            Some(columns) => columns
                .iter()
                .map(|&column| column_value(row, column).clone())
                .collect(),
            None => row.to_vec(),
        }
    }

    /// `Some(projected)` when the row passes the filters
    pub fn apply(&self, row: &[Value]) -> Option<Vec<Value>> {
        if self.matches(row) {
            Some(self.project(row))
        } else {
            None
        }
    }
}

fn column_value(row: &[Value], column: usize) -> &Value {
    row.get(column).unwrap_or(&NULL)
}
