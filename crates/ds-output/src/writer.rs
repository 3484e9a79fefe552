//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentFrameRow, FrameSummaryRow, OutputResult};

/// Sink for recorded frames.
///
/// Errors surface through [`FrameOutputObserver::take_error`][crate::FrameOutputObserver::take_error]
/// when the writer is driven by the observer.
pub trait OutputWriter {
    fn write_agents(&mut self, rows: &[AgentFrameRow]) -> OutputResult<()>;

    fn write_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
