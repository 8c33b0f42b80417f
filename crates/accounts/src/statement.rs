//! Statement sinks.
//!
//! Accounts hand formatted lines to a [`Printer`]; where the lines end up is
//! the sink's business.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use pbank_core::AccountId;

/// Line-oriented output capability used by statements.
pub trait Printer: Send + Sync {
    /// Emit one line.
    fn print(&self, line: &str);

    /// Number of `print` calls so far (monotonically increasing).
    fn call_count(&self) -> u64;
}

/// Writes every line to stdout.
#[derive(Debug, Default)]
pub struct ConsolePrinter {
    count: AtomicU64,
}

impl ConsolePrinter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Printer for ConsolePrinter {
    fn print(&self, line: &str) {
        println!("{line}");
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    fn call_count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

/// Keeps printed lines in memory.
#[derive(Debug, Default)]
pub struct MemoryPrinter {
    lines: Mutex<Vec<String>>,
    count: AtomicU64,
}

impl MemoryPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every line printed so far, in print order.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Printer for MemoryPrinter {
    fn print(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(line.to_string());
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    fn call_count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

pub(crate) fn header_line(account_id: &AccountId) -> String {
    format!("----- Account {account_id} -----")
}

pub(crate) fn footer_line(activity_count: usize) -> String {
    format!("----- {activity_count} activities -----")
}
