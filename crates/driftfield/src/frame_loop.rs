//! # Frame Loop
//!
//! The self-rescheduling animation callback, made explicit:
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. BEGIN FRAME                                                      │
//! │    ├─ Reject tokens we did not arm (stale or cancelled)             │
//! │    └─ Read the clock, clamp the delta                               │
//! │                                                                     │
//! │ 2. WORK (caller)                                                    │
//! │    └─ Signals, timers, step, present                                │
//! │                                                                     │
//! │ 3. END FRAME                                                        │
//! │    └─ Record stats                                                  │
//! │                                                                     │
//! │ 4. ARM                                                              │
//! │    └─ Request exactly one next frame                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Clock and scheduler are injected, so tests drive frames one at a time.

use std::time::Duration;

use driftfield_core::StepReport;

use crate::host::{Clock, FrameScheduler, FrameToken};

/// Largest delta handed to time-based animation.
pub const MAX_DELTA: Duration = Duration::from_millis(100);

/// Why a frame did not step the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// A scroll gesture is in progress.
    Scrolling,
    /// A page entrance animation is playing.
    PagePause,
}

/// Per-frame statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// Clamped time since the previous frame.
    pub delta: Duration,
    /// Set when the field was not stepped.
    pub skipped: Option<SkipReason>,
    /// What the step did, zero when skipped.
    pub report: StepReport,
    /// Draw commands presented.
    pub commands: usize,
    /// Signals drained at the top of the frame.
    pub signals: usize,
}

/// Timing for one accepted frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameContext {
    /// Frame number.
    pub frame: u64,
    /// Clock reading at frame start.
    pub now: Duration,
    /// Clamped time since the previous frame. Zero for the first frame.
    pub delta: Duration,
}

impl FrameContext {
    /// Starts a stats record for this frame.
    #[must_use]
    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frame: self.frame,
            delta: self.delta,
            ..FrameStats::default()
        }
    }
}

/// Drives one chain of frame callbacks.
#[derive(Debug, Default)]
pub struct FrameLoop {
    /// The one frame we are waiting for.
    pending: Option<FrameToken>,
    /// Frames accepted so far.
    frame_count: u64,
    /// Clock reading of the last accepted frame.
    last_frame: Option<Duration>,
    /// Accumulated statistics.
    stats: FrameStatsAccumulator,
}

impl FrameLoop {
    /// Creates an idle loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the next frame unless one is already pending.
    pub fn arm<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> FrameToken {
        if let Some(token) = self.pending {
            return token;
        }
        let token = scheduler.request_frame();
        self.pending = Some(token);
        token
    }

    /// Accepts `token` if it is the pending frame.
    ///
    /// Returns `None` for anything else; the pending frame stays armed.
    pub fn begin_frame<C: Clock + ?Sized>(&mut self, token: FrameToken, clock: &C) -> Option<FrameContext> {
        if self.pending != Some(token) {
            tracing::trace!(?token, pending = ?self.pending, "ignoring stale frame");
            return None;
        }
        self.pending = None;

        let now = clock.now();
        let delta = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_sub(last))
            .min(MAX_DELTA);
        self.last_frame = Some(now);

        Some(FrameContext {
            frame: self.frame_count,
            now,
            delta,
        })
    }

    /// Records a finished frame.
    pub fn end_frame(&mut self, stats: FrameStats) {
        self.frame_count += 1;
        self.stats.record(&stats);
    }

    /// Cancels the pending frame, if any.
    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(token) = self.pending.take() {
            scheduler.cancel_frame(token);
        }
    }

    /// The frame we are waiting for.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// True while a frame is pending.
    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the number of finished frames.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the accumulated statistics.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug, Default)]
pub struct FrameStatsAccumulator {
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Frames that stepped the field.
    pub frames_stepped: u64,
    /// Frames skipped while scrolling.
    pub frames_skipped_scrolling: u64,
    /// Frames skipped during a page pause.
    pub frames_skipped_paused: u64,
    /// Sum of particles drawn.
    pub drawn_sum: u64,
    /// Sum of lines drawn.
    pub lines_sum: u64,
    /// Largest clamped delta seen.
    pub max_delta: Duration,
}

impl FrameStatsAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame's statistics.
    pub fn record(&mut self, stats: &FrameStats) {
        self.frames_recorded += 1;
        match stats.skipped {
            None => self.frames_stepped += 1,
            Some(SkipReason::Scrolling) => self.frames_skipped_scrolling += 1,
            Some(SkipReason::PagePause) => self.frames_skipped_paused += 1,
        }
        self.drawn_sum += stats.report.drawn as u64;
        self.lines_sum += stats.report.lines as u64;
        self.max_delta = self.max_delta.max(stats.delta);
    }

    /// Average particles drawn per stepped frame.
    #[must_use]
    pub fn avg_drawn(&self) -> f64 {
        if self.frames_stepped == 0 {
            return 0.0;
        }
        self.drawn_sum as f64 / self.frames_stepped as f64
    }

    /// Fraction of frames that did not step the field.
    #[must_use]
    pub fn skip_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.frames_recorded - self.frames_stepped) as f64 / self.frames_recorded as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        next: u64,
        cancelled: Vec<FrameToken>,
    }

    impl FrameScheduler for Counter {
        fn request_frame(&mut self) -> FrameToken {
            self.next += 1;
            FrameToken(self.next)
        }

        fn cancel_frame(&mut self, token: FrameToken) {
            self.cancelled.push(token);
        }
    }

    struct At(Duration);

    impl Clock for At {
        fn now(&self) -> Duration {
            self.0
        }
    }

    fn counter() -> Counter {
        Counter {
            next: 0,
            cancelled: Vec::new(),
        }
    }

    #[test]
    fn test_arm_is_idempotent() {
        let mut scheduler = counter();
        let mut frames = FrameLoop::new();

        let first = frames.arm(&mut scheduler);
        let second = frames.arm(&mut scheduler);
        assert_eq!(first, second);
        assert_eq!(scheduler.next, 1);
    }

    #[test]
    fn test_stale_token_rejected() {
        let mut scheduler = counter();
        let mut frames = FrameLoop::new();
        let token = frames.arm(&mut scheduler);

        assert!(frames.begin_frame(FrameToken(99), &At(Duration::ZERO)).is_none());
        assert!(frames.is_armed());

        let ctx = frames.begin_frame(token, &At(Duration::ZERO)).unwrap();
        assert_eq!(ctx.frame, 0);
        assert_eq!(ctx.delta, Duration::ZERO);
        assert!(frames.begin_frame(token, &At(Duration::ZERO)).is_none());
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut scheduler = counter();
        let mut frames = FrameLoop::new();

        let token = frames.arm(&mut scheduler);
        let ctx = frames.begin_frame(token, &At(Duration::from_millis(0))).unwrap();
        frames.end_frame(ctx.stats());

        let token = frames.arm(&mut scheduler);
        let ctx = frames.begin_frame(token, &At(Duration::from_millis(16))).unwrap();
        assert_eq!(ctx.delta, Duration::from_millis(16));
        frames.end_frame(ctx.stats());

        let token = frames.arm(&mut scheduler);
        let ctx = frames.begin_frame(token, &At(Duration::from_secs(5))).unwrap();
        assert_eq!(ctx.delta, MAX_DELTA);
        assert_eq!(ctx.frame, 2);
    }

    #[test]
    fn test_cancel_rejects_pending() {
        let mut scheduler = counter();
        let mut frames = FrameLoop::new();
        let token = frames.arm(&mut scheduler);

        frames.cancel(&mut scheduler);
        assert_eq!(scheduler.cancelled, vec![token]);
        assert!(frames.begin_frame(token, &At(Duration::ZERO)).is_none());
    }

    #[test]
    fn test_accumulator() {
        let mut acc = FrameStatsAccumulator::new();
        acc.record(&FrameStats {
            report: StepReport {
                updated: 10,
                drawn: 4,
                lines: 1,
            },
            ..FrameStats::default()
        });
        acc.record(&FrameStats {
            skipped: Some(SkipReason::Scrolling),
            ..FrameStats::default()
        });

        assert_eq!(acc.frames_recorded, 2);
        assert_eq!(acc.frames_skipped_scrolling, 1);
        assert!((acc.avg_drawn() - 4.0).abs() < f64::EPSILON);
        assert!((acc.skip_ratio() - 0.5).abs() < f64::EPSILON);
    }
}
