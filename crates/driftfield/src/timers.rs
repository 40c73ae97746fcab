//! The two skip conditions evaluated at the top of every frame.
//!
//! Neither stops the frame loop. Both are plain deadlines compared against
//! the host clock, so they advance exactly as fast as the injected clock.

use std::time::Duration;

/// Scroll-settle debounce.
///
/// Every scroll sets the flag and pushes the deadline out by the quiet
/// window. The first poll at or past the deadline clears the flag and
/// reports that the debounce fired.
#[derive(Debug, Clone)]
pub struct ScrollDebounce {
    window: Duration,
    deadline: Option<Duration>,
}

impl ScrollDebounce {
    /// Creates an idle debounce with the given quiet window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Records a scroll at `now`, restarting the quiet window.
    pub fn on_scroll(&mut self, now: Duration) {
        self.deadline = Some(now + self.window);
    }

    /// Returns `true` exactly once, on the first poll after the quiet window.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// True from the first scroll until the debounce fires.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drops any pending deadline without firing.
    pub fn clear(&mut self) {
        self.deadline = None;
    }
}

/// Page-entry pause.
///
/// While active the field is neither stepped nor drawn. The surface is
/// cleared exactly once, on the first frame of the window.
#[derive(Debug, Clone, Default)]
pub struct PauseWindow {
    until: Option<Duration>,
    cleared: bool,
}

impl PauseWindow {
    /// Creates an inactive window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a window of `length` at `now`. A zero length ends any
    /// running window instead.
    pub fn start(&mut self, now: Duration, length: Duration) {
        self.until = if length.is_zero() { None } else { Some(now + length) };
        self.cleared = false;
    }

    /// True while `now` is before the end of the window.
    #[must_use]
    pub fn is_active(&self, now: Duration) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Returns `true` the first time it is called in each window.
    pub fn take_clear(&mut self) -> bool {
        !std::mem::replace(&mut self.cleared, true)
    }

    /// Ends the window immediately.
    pub fn clear(&mut self) {
        self.until = None;
    }
}
