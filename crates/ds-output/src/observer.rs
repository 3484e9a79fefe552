//! `FrameOutputObserver<W>`: bridges `FrameObserver` to an `OutputWriter`.

use ds_sim::{Frame, FrameObserver};

use crate::row::{AgentFrameRow, FrameSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`FrameObserver`] that records every frame's summary and, every
/// `agent_interval` frames, every agent's state.
///
/// Errors from the writer are stored because observer callbacks cannot fail.
/// Check [`take_error`][Self::take_error] after the run.
pub struct FrameOutputObserver<W: OutputWriter> {
    writer:         W,
    agent_interval: u64,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> FrameOutputObserver<W> {
    /// Record agents on every frame.
    pub fn new(writer: W) -> Self {
        Self { writer, agent_interval: 1, last_error: None }
    }

    /// Record agents only on frames whose index is a multiple of `n`.
    /// `0` disables agent rows.
    pub fn agent_interval(mut self, n: u64) -> Self {
        self.agent_interval = n;
        self
    }

    /// Take the stored write error (if any).  `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> FrameObserver for FrameOutputObserver<W> {
    fn on_frame(&mut self, frame: &Frame) {
        let summary = FrameSummaryRow {
            frame:       frame.index,
            time_ms:     frame.time.0,
            agent_count: frame.agents.len() as u64,
            progress:    frame.progress,
        };
        let result = self.writer.write_summary(&summary);
        self.store_err(result);

        if self.agent_interval > 0
            && frame.index.is_multiple_of(self.agent_interval)
            && !frame.agents.is_empty()
        {
            let rows: Vec<AgentFrameRow> = frame
                .agents
                .iter()
                .map(|a| AgentFrameRow::new(frame.index, a))
                .collect();
            let result = self.writer.write_agents(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _frames: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
