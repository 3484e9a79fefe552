//! The trail clock: wall time → route playback progress.
//!
//! ```text
//!            bind(non-empty route, now)
//!   Idle ────────────────────────────────► Running { start = now }
//!    ▲                                        │
//!    └────── clear() / bind(empty route) ─────┘
//! ```
//!
//! Progress is `(now - start) × speed / 1000`, in seconds of trail time.
//! Binding a new route always restarts from zero.

use ds_core::FrameInstant;

use crate::Route;

/// How progress behaves once it passes the end of the route.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlaybackMode {
    /// Uncapped; the renderer decides what to show past the end.
    #[default]
    OneShot,
    /// Wraps modulo the route's vertex count.
    Loop,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrailClock {
    start:       Option<FrameInstant>,
    loop_length: f64,
    speed:       f64,
    mode:        PlaybackMode,
}

impl TrailClock {
    pub fn new(speed: f64, mode: PlaybackMode) -> Self {
        Self { start: None, loop_length: 0.0, speed, mode }
    }

    /// Start playing `route` from `now`.  An empty route idles the clock.
    pub fn bind(&mut self, route: &Route, now: FrameInstant) {
        if route.is_empty() {
            self.clear();
        } else {
            self.start = Some(now);
            self.loop_length = route.len() as f64;
        }
    }

    pub fn clear(&mut self) {
        self.start = None;
        self.loop_length = 0.0;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.start.is_some()
    }

    pub fn progress(&self, now: FrameInstant) -> f64 {
        let Some(start) = self.start else {
            return 0.0;
        };
        let p = now.since(start) * self.speed / 1000.0;
        match self.mode {
            PlaybackMode::OneShot => p,
            PlaybackMode::Loop => p % self.loop_length,
        }
    }
}
