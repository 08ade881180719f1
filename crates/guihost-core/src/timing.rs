//! Per-frame timing.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of frames the frame-rate average spans.
pub const FRAMERATE_WINDOW: usize = 60;

/// Timing information handed to each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTiming {
    /// Time since the previous frame.
    pub delta: Duration,
    /// Time since the first frame.
    pub total: Duration,
    /// Rolling-average frames per second (0 until a delta is known).
    pub framerate: f32,
}

impl FrameTiming {
    /// Average milliseconds per frame, 0 when no frame rate is known yet.
    pub fn ms_per_frame(&self) -> f32 {
        if self.framerate > 0.0 {
            1000.0 / self.framerate
        } else {
            0.0
        }
    }

    /// The text shown by the frame-rate readout.
    pub fn readout(&self) -> String {
        format!(
            "Application average {:.3} ms/frame ({:.1} FPS)",
            self.ms_per_frame(),
            self.framerate
        )
    }
}

/// Measures frame deltas and a rolling-average frame rate.
#[derive(Debug, Default)]
pub struct FrameClock {
    start: Option<Instant>,
    last: Option<Instant>,
    deltas: VecDeque<Duration>,
    sum: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame at `now` and returns its timing.
    pub fn tick(&mut self, now: Instant) -> FrameTiming {
        let start = *self.start.get_or_insert(now);
        let delta = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);

        if !delta.is_zero() {
            self.deltas.push_back(delta);
            self.sum += delta;
            if self.deltas.len() > FRAMERATE_WINDOW {
                if let Some(oldest) = self.deltas.pop_front() {
                    self.sum -= oldest;
                }
            }
        }

        FrameTiming {
            delta,
            total: now.saturating_duration_since(start),
            framerate: self.framerate(),
        }
    }

    /// Current rolling-average frame rate.
    pub fn framerate(&self) -> f32 {
        if self.deltas.is_empty() || self.sum.is_zero() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let frames = self.deltas.len() as f32;
        frames / self.sum.as_secs_f32()
    }
}
