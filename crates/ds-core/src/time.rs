//! Frame time model.
//!
//! # Design
//!
//! The engine is driven by a display-refresh cadence, not by a fixed tick
//! counter.  Each frame carries a monotonic timestamp in milliseconds
//! ([`FrameInstant`]), the same unit a browser's animation callback or a
//! game loop hands out.  The kinematics step consumes the delta between two
//! frames; the trail clock consumes the distance from its start instant.
//!
//! Where the timestamps come from is pluggable through [`FrameClock`]:
//! [`SystemFrameClock`] reads `std::time::Instant`, [`ManualFrameClock`] is
//! stepped explicitly for tests and deterministic replays.

use std::fmt;
use std::time::Instant;

// ── FrameInstant ──────────────────────────────────────────────────────────────

/// A monotonic timestamp in milliseconds since an arbitrary origin.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameInstant(pub f64);

impl FrameInstant {
    pub const ZERO: FrameInstant = FrameInstant(0.0);

    /// Milliseconds elapsed from `earlier` to `self`, floored at zero so a
    /// clock that jitters backwards never produces negative time.
    #[inline]
    pub fn since(self, earlier: FrameInstant) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    /// The instant `ms` milliseconds after `self`.
    #[inline]
    pub fn offset(self, ms: f64) -> FrameInstant {
        FrameInstant(self.0 + ms)
    }
}

impl fmt::Display for FrameInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}ms", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Source of frame timestamps.
pub trait FrameClock {
    /// The current instant.
    fn now(&self) -> FrameInstant;

    /// Block (or step) until the next frame, returning its instant.
    ///
    /// `frame_ms` is the nominal frame length; real-time clocks may sleep
    /// for it, manual clocks simply advance by it.
    fn next_frame(&mut self, frame_ms: f64) -> FrameInstant;
}

/// Wall-clock frames measured from construction.
#[derive(Debug, Clone)]
pub struct SystemFrameClock {
    origin: Instant,
}

impl SystemFrameClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemFrameClock {
    fn now(&self) -> FrameInstant {
        FrameInstant(self.origin.elapsed().as_secs_f64() * 1_000.0)
    }

    fn next_frame(&mut self, frame_ms: f64) -> FrameInstant {
        if frame_ms > 0.0 && frame_ms.is_finite() {
            std::thread::sleep(std::time::Duration::from_secs_f64(frame_ms / 1_000.0));
        }
        self.now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameClock {
    pub current: FrameInstant,
}

impl ManualFrameClock {
    pub fn new(start: FrameInstant) -> Self {
        Self { current: start }
    }

    /// Move the clock forward by `ms` milliseconds.
    #[inline]
    pub fn advance(&mut self, ms: f64) {
        self.current = self.current.offset(ms);
    }
}

impl FrameClock for ManualFrameClock {
    fn now(&self) -> FrameInstant {
        self.current
    }

    fn next_frame(&mut self, frame_ms: f64) -> FrameInstant {
        self.advance(frame_ms);
        self.current
    }
}
