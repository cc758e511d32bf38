// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Sled storage backend
//!
//! Each table is a sled tree. Rows are bincode-encoded `Vec<Value>` stored
//! under big-endian ids from `Db::generate_id`, so key order is insertion
//! order and a scan returns rows in the order they were written.

use super::config::StoreConfig;
use crate::cursor::{RowCursor, StatementExecutor};
use crate::error::{Error, Result};
use crate::select::{BoundSelect, Select};
use crate::target::{scan_row, ScanTarget};
use crate::value::Value;

const DEFAULT_TREE: &[u8] = b"__sled__default";

/// An open sled database holding any number of tables
pub struct SledStore {
    db: sled::Db,
    config: StoreConfig,
}

impl SledStore {
    /// Open or create the store described by `config`
    pub fn open(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let mut sled_config = sled::Config::new()
            .cache_capacity(config.cache_capacity_bytes)
            .flush_every_ms(config.flush_every_ms)
            .temporary(config.temporary);
        // temporary stores get a unique scratch path from sled
        if !config.temporary {
            sled_config = sled_config.path(&config.path);
        }

        let db = sled_config
            .open()
            .map_err(|e| Error::Storage(format!("Failed to open store: {}", e)))?;

        if config.temporary {
            log::info!("Opened temporary sled store");
        } else {
            log::info!("Opened sled store at {}", config.path.display());
        }

        Ok(SledStore { db, config })
    }

    /// The configuration this store was opened with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Open or create a table
    pub fn table(&self, name: &str) -> Result<SledTable> {
        let tree = self.db.open_tree(name)?;
        Ok(SledTable {
            name: name.to_string(),
            db: self.db.clone(),
            tree,
        })
    }

    /// Names of all tables in the store
    pub fn table_names(&self) -> Vec<String> {
        self.db
            .tree_names()
            .into_iter()
            .filter(|name| &**name != DEFAULT_TREE)
            .map(|name| String::from_utf8_lossy(&name).to_string())
            .collect()
    }

    /// Drop a table and its rows. Returns `false` if it did not exist.
    pub fn drop_table(&self, name: &str) -> Result<bool> {
        Ok(self.db.drop_tree(name.as_bytes())?)
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Direct access to the underlying sled database
    pub fn db(&self) -> &sled::Db {
        &self.db
    }
}

/// One table of a [`SledStore`]
#[derive(Clone)]
pub struct SledTable {
    name: String,
    db: sled::Db,
    tree: sled::Tree,
}

impl SledTable {
    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a row and return its id
    pub fn insert(&self, row: &[Value]) -> Result<u64> {
        let id = self.db.generate_id()?;
        let encoded = bincode::serialize(row)?;
        self.tree.insert(id.to_be_bytes(), encoded)?;
        Ok(id)
    }

    /// Append several rows, in order
    pub fn insert_all<I>(&self, rows: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: AsRef<[Value]>,
    {
        let mut count = 0;
        for row in rows {
            self.insert(row.as_ref())?;
            count += 1;
        }
        Ok(count)
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove every row
    pub fn clear(&self) -> Result<()> {
        self.tree.clear()?;
        Ok(())
    }

    /// Flush pending writes of this table
    pub fn flush(&self) -> Result<()> {
        self.tree.flush()?;
        Ok(())
    }

    /// Prepare a statement over this table
    pub fn prepare(&self, select: Select) -> SledStatement {
        SledStatement {
            table: self.clone(),
            select,
        }
    }
}

/// Prepared statement over a [`SledTable`]
pub struct SledStatement {
    table: SledTable,
    select: Select,
}

impl StatementExecutor for SledStatement {
    type Cursor = SledCursor;

    fn execute(&self, args: &[Value]) -> Result<SledCursor> {
        let bound = self.select.bind(args)?;
        log::debug!("Scanning sled table '{}'", self.table.name);

        Ok(SledCursor {
            table: self.table.name.clone(),
            iter: Some(self.table.tree.iter()),
            bound,
            current: None,
            error: None,
        })
    }
}

/// Lazy cursor over a sled tree
///
/// Rows are read and decoded while advancing. A read or decode failure ends
/// the iteration and is reported by `terminal_error`.
pub struct SledCursor {
    table: String,
    iter: Option<sled::Iter>,
    bound: BoundSelect,
    current: Option<Vec<Value>>,
    error: Option<Error>,
}

impl SledCursor {
    fn fail(&mut self, error: Error) -> bool {
        self.iter = None;
        self.current = None;
        self.error = Some(error);
        false
    }
}

impl RowCursor for SledCursor {
    fn advance(&mut self) -> bool {
        loop {
            let next = match self.iter.as_mut() {
                Some(iter) => iter.next(),
                None => return false,
            };

            let (key, encoded) = match next {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    let error = Error::Terminal(format!("read from '{}': {}", self.table, e));
                    return self.fail(error);
                }
                None => {
                    self.iter = None;
                    self.current = None;
                    return false;
                }
            };

            let row: Vec<Value> = match bincode::deserialize(&encoded) {
                Ok(row) => row,
                Err(e) => {
                    let error = Error::Terminal(format!(
                        "corrupt row {:?} in '{}': {}",
                        &*key,
                        self.table,
                        e
                    ));
                    return self.fail(error);
                }
            };

            if let Some(projected) = self.bound.apply(&row) {
                self.current = Some(projected);
                return true;
            }
        }
    }

    fn scan_into(&mut self, targets: &mut [&mut dyn ScanTarget]) -> Result<()> {
        match &self.current {
            Some(row) => scan_row(row, targets),
            None => Err(Error::Terminal("scan called without a current row".to_string())),
        }
    }

    fn terminal_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    fn release(&mut self) -> Result<()> {
        log::trace!("Releasing cursor on '{}'", self.table);
        self.iter = None;
        self.current = None;
        Ok(())
    }
}
