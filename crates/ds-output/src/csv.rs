//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_frames.csv`
//! - `frame_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentFrameRow, FrameSummaryRow, OutputResult};

pub const AGENT_FRAMES_FILE: &str = "agent_frames.csv";
pub const FRAME_SUMMARIES_FILE: &str = "frame_summaries.csv";

/// Writes recorded frames to two CSV files.
pub struct CsvWriter {
    agents:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files, and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut agents = Writer::from_path(dir.join(AGENT_FRAMES_FILE))?;
        agents.write_record(["frame", "agent_id", "lat", "lon", "bearing", "speed"])?;

        let mut summaries = Writer::from_path(dir.join(FRAME_SUMMARIES_FILE))?;
        summaries.write_record(["frame", "time_ms", "agent_count", "progress"])?;

        Ok(Self { agents, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_agents(&mut self, rows: &[AgentFrameRow]) -> OutputResult<()> {
        for row in rows {
            self.agents.write_record(&[
                row.frame.to_string(),
                row.agent_id.to_string(),
                row.lat.to_string(),
                row.lon.to_string(),
                row.bearing.to_string(),
                row.speed.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.frame.to_string(),
            row.time_ms.to_string(),
            row.agent_count.to_string(),
            row.progress.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.agents.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
