//! `ds-output`: frame recorders for the driver-sim engine.
//!
//! | Backend | Files created                                  |
//! |---------|------------------------------------------------|
//! | CSV     | `agent_frames.csv`, `frame_summaries.csv`      |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`FrameOutputObserver`], which implements `ds_sim::FrameObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ds_output::{CsvWriter, FrameOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = FrameOutputObserver::new(writer);
//! sim.run_frames(600, &mut clock, &mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::FrameOutputObserver;
pub use row::{AgentFrameRow, FrameSummaryRow};
pub use writer::OutputWriter;
