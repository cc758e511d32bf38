//! Scripted executor and cursor with call counters
//!
//! The script decides whether execute fails, which rows the cursor yields,
//! whether a terminal error follows them, and whether release fails. Every
//! call is counted so tests can check what the driver did.

use scanall::{scan_row, Error, Result, RowCursor, ScanTarget, StatementExecutor, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Calls observed on an executor and the cursors it opened
#[derive(Debug, Default)]
pub struct CallLog {
    pub executions: Cell<usize>,
    pub advances: Cell<usize>,
    pub scans: Cell<usize>,
    pub releases: Cell<usize>,
    pub last_args: RefCell<Vec<Value>>,
}

impl CallLog {
    fn bump(counter: &Cell<usize>) {
        counter.set(counter.get() + 1);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Script {
    pub execute_error: Option<String>,
    pub rows: Vec<Vec<Value>>,
    pub terminal_error: Option<String>,
    pub release_error: Option<String>,
    pub panic_on_scan: Option<usize>,
}

impl Script {
    pub fn rows(rows: Vec<Vec<Value>>) -> Self {
        Script {
            rows,
            ..Default::default()
        }
    }

    pub fn failing_execute(message: &str) -> Self {
        Script {
            execute_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn with_terminal_error(mut self, message: &str) -> Self {
        self.terminal_error = Some(message.to_string());
        self
    }

    pub fn with_release_error(mut self, message: &str) -> Self {
        self.release_error = Some(message.to_string());
        self
    }

    pub fn with_panic_on_scan(mut self, row: usize) -> Self {
        self.panic_on_scan = Some(row);
        self
    }
}

pub struct ScriptedExecutor {
    script: Script,
    log: Rc<CallLog>,
}

impl ScriptedExecutor {
    pub fn new(script: Script) -> Self {
        ScriptedExecutor {
            script,
            log: Rc::new(CallLog::default()),
        }
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }
}

impl StatementExecutor for ScriptedExecutor {
    type Cursor = ScriptedCursor;

    fn execute(&self, args: &[Value]) -> Result<ScriptedCursor> {
        CallLog::bump(&self.log.executions);
        *self.log.last_args.borrow_mut() = args.to_vec();

        if let Some(message) = &self.script.execute_error {
            return Err(Error::Execution(message.clone()));
        }

        Ok(ScriptedCursor {
            script: self.script.clone(),
            log: self.log.clone(),
            position: 0,
        })
    }
}

pub struct ScriptedCursor {
    script: Script,
    log: Rc<CallLog>,
    /// 1-based index of the current row; 0 before the first advance
    position: usize,
}

impl RowCursor for ScriptedCursor {
    fn advance(&mut self) -> bool {
        CallLog::bump(&self.log.advances);
        if self.position < self.script.rows.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn scan_into(&mut self, targets: &mut [&mut dyn ScanTarget]) -> Result<()> {
        CallLog::bump(&self.log.scans);
        if self.script.panic_on_scan == Some(self.position) {
            panic!("scripted panic on row {}", self.position);
        }
        scan_row(&self.script.rows[self.position - 1], targets)
    }

    fn terminal_error(&mut self) -> Option<Error> {
        self.script.terminal_error.take().map(Error::Terminal)
    }

    fn release(&mut self) -> Result<()> {
        CallLog::bump(&self.log.releases);
        match &self.script.release_error {
            Some(message) => Err(Error::Release(message.clone())),
            None => Ok(()),
        }
    }
}
