//! The render sink.

use std::sync::Arc;

use ds_core::FrameInstant;
use ds_mobility::Agent;

/// Everything a renderer needs for one frame.
///
/// `agents` is the published snapshot; holding it past the next frame is
/// safe and never observes later updates.
#[derive(Clone, Debug)]
pub struct Frame {
    pub index:    u64,
    pub time:     FrameInstant,
    pub agents:   Arc<[Agent]>,
    pub progress: f64,
}

/// Callbacks invoked by [`Sim::tick`][crate::Sim::tick] and
/// [`Sim::run_frames`][crate::Sim::run_frames].
///
/// All methods default to no-ops.
pub trait FrameObserver {
    /// Called once per frame after the agent set has been published.
    fn on_frame(&mut self, _frame: &Frame) {}

    /// Called once when `run_frames` finishes, with the number of frames the
    /// sim has produced so far.
    fn on_run_end(&mut self, _frames: u64) {}
}

/// A [`FrameObserver`] that does nothing.
pub struct NoopObserver;

impl FrameObserver for NoopObserver {}
