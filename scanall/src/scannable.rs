// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Record binding and accumulation contracts
//!
//! - [`SingleScannable`]: one record that a single row is scanned into
//! - [`MultiScannable`]: a collection that grows by one record per row
//!
//! Both are implemented by hand (or with [`crate::scannable!`]) for each
//! record type. The column-to-field binding is always spelled out by the
//! record author, in column order.

use crate::target::ScanTarget;
use std::collections::VecDeque;

/// A record that one result row is scanned into
///
/// # Examples
///
/// ```no_run
/// use scanall::{scan_targets, ScanTarget, SingleScannable};
///
/// #[derive(Default)]
/// struct Label {
///     id: i32,
///     name: String,
/// }
///
/// impl SingleScannable for Label {
///     fn scan_targets(&mut self) -> Vec<&mut dyn ScanTarget> {
///         scan_targets![self.id, self.name]
///     }
/// }
/// ```
pub trait SingleScannable {
    /// Write targets for this record, one per column, in column order
    fn scan_targets(&mut self) -> Vec<&mut dyn ScanTarget>;
}

/// A collection any number of rows can be scanned into
///
/// `new_element` is called once per row. It appends a fresh record and
/// returns it so the row can be scanned into it. A returned element is never
/// handed out again.
pub trait MultiScannable {
    type Element: SingleScannable;

    /// Append a fresh element and return it for scanning
    fn new_element(&mut self) -> &mut Self::Element;
}

impl<T: SingleScannable + ?Sized> SingleScannable for Box<T> {
    fn scan_targets(&mut self) -> Vec<&mut dyn ScanTarget> {
        (**self).scan_targets()
    }
}

impl<T: SingleScannable + Default> MultiScannable for Vec<T> {
    type Element = T;

    fn new_element(&mut self) -> &mut T {
        self.push(T::default());
        let last = self.len() - 1;
        &mut self[last]
    }
}

impl<T: SingleScannable + Default> MultiScannable for VecDeque<T> {
    type Element = T;

    fn new_element(&mut self) -> &mut T {
        self.push_back(T::default());
        let last = self.len() - 1;
        &mut self[last]
    }
}

impl<M: MultiScannable + ?Sized> MultiScannable for &mut M {
    type Element = M::Element;

    fn new_element(&mut self) -> &mut M::Element {
        (**self).new_element()
    }
}
