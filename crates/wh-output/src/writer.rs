//! The `OrderLogWriter` trait implemented by per-order log backends.

use crate::{OrderLogRow, OutputResult};

/// Destination for completed-order rows.
///
/// Errors are stored by [`OrderLogObserver`][crate::OrderLogObserver] and
/// retrieved with its `take_error`.
pub trait OrderLogWriter {
    fn write_orders(&mut self, rows: &[OrderLogRow]) -> OutputResult<()>;

    /// Flush underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Keeps rows in memory.  Useful for tests and for post-run analysis without
/// touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryOrderLog {
    pub rows:     Vec<OrderLogRow>,
    pub finished: bool,
}

impl OrderLogWriter for MemoryOrderLog {
    fn write_orders(&mut self, rows: &[OrderLogRow]) -> OutputResult<()> {
        self.rows.extend_from_slice(rows);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.finished = true;
        Ok(())
    }
}
