//! Record types used across the integration tests

use scanall::{scan_targets, scannable, ScanTarget, SingleScannable};

/// Two-column record declared with the `scannable!` macro
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Label {
    pub id: i32,
    pub name: String,
}

scannable!(Label { id, name });

impl Label {
    pub fn new(id: i32, name: &str) -> Self {
        Label {
            id,
            name: name.to_string(),
        }
    }
}

/// Record with a hand-written binder; column order differs from field order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Reading {
    pub sensor: String,
    pub value: f64,
    pub note: Option<String>,
}

impl SingleScannable for Reading {
    fn scan_targets(&mut self) -> Vec<&mut dyn ScanTarget> {
        scan_targets![self.value, self.sensor, self.note]
    }
}
