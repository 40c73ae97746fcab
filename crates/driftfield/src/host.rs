//! The rendering environment, as seen by the particle background.
//!
//! A browser page, a native window and the headless test host all provide
//! the same handful of capabilities: a monotonic clock, a once-per-refresh
//! frame scheduler, event listener registration, layout queries and
//! (maybe) a drawing surface.

use std::time::Duration;

use driftfield_core::LayoutSource;
use driftfield_ui::{Surface, Viewport};

use crate::events::SignalSender;

/// Handle for one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(pub u64);

/// Handle for one registered event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Host events the background listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Viewport resize.
    Resize,
    /// Pointer movement.
    PointerMove,
    /// Page scroll.
    Scroll,
}

impl ListenerKind {
    /// Every kind the background registers on mount.
    pub const ALL: [Self; 3] = [Self::Resize, Self::PointerMove, Self::Scroll];
}

/// Monotonic time source.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Once-per-refresh callback scheduling.
pub trait FrameScheduler {
    /// Schedules one frame callback and returns its token.
    fn request_frame(&mut self) -> FrameToken;

    /// Cancels a scheduled callback. Unknown tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Event listener registration.
pub trait EventTarget {
    /// Registers a listener that forwards `kind` events into `sender`.
    fn listen(&mut self, kind: ListenerKind, sender: SignalSender) -> ListenerId;

    /// Removes a listener. Unknown ids are ignored.
    fn unlisten(&mut self, id: ListenerId);

    /// Number of listeners currently registered.
    fn listener_count(&self) -> usize;
}

/// Everything the particle background needs from its environment.
pub trait Host: Clock + FrameScheduler + EventTarget + LayoutSource {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// The drawing surface, or `None` if the environment cannot draw.
    fn surface(&mut self) -> Option<&mut dyn Surface>;
}
