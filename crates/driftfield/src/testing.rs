//! Deterministic host doubles.
//!
//! [`HeadlessHost`] implements [`Host`] with a manual clock, a spy
//! scheduler, a recording surface and a fake layout, so a test can mount
//! the background and single-step frames:
//!
//! ```rust
//! use std::time::Duration;
//! use driftfield::testing::HeadlessHost;
//! use driftfield::{BackgroundConfig, ParticleBackground};
//! use driftfield_ui::{ThemeMode, Viewport};
//!
//! let mut host = HeadlessHost::new(Viewport::new(400, 300));
//! let mut background =
//!     ParticleBackground::mount(BackgroundConfig::default(), &mut host, "/", false, ThemeMode::Dark)
//!         .unwrap();
//!
//! for token in host.advance(Duration::from_millis(16)) {
//!     background.on_frame(&mut host, token);
//! }
//! assert_eq!(host.recording().unwrap().frame_count(), 1);
//! ```

use std::sync::Arc;
use std::time::Duration;

use driftfield_core::{ElementHandle, LayoutSource};
use driftfield_ui::{DrawCommand, Rect, Surface, Viewport};
use parking_lot::Mutex;

use crate::events::{FieldSignal, SignalSender};
use crate::host::{Clock, EventTarget, FrameScheduler, FrameToken, Host, ListenerId, ListenerKind};

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Creates a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }
}

#[derive(Debug, Default)]
struct SchedulerLog {
    next: u64,
    pending: Vec<FrameToken>,
    requested: usize,
    cancelled: usize,
}

/// Frame scheduler that records every call. Clones share the same log, so
/// a test can keep a spy after handing the host away.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    log: Arc<Mutex<SchedulerLog>>,
}

impl ManualScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total `request_frame` calls.
    #[must_use]
    pub fn requested_count(&self) -> usize {
        self.log.lock().requested
    }

    /// `cancel_frame` calls that removed a pending frame.
    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.log.lock().cancelled
    }

    /// Frames requested and neither cancelled nor taken.
    #[must_use]
    pub fn pending(&self) -> Vec<FrameToken> {
        self.log.lock().pending.clone()
    }

    /// Takes every pending frame, as a display refresh would.
    pub fn take_due(&self) -> Vec<FrameToken> {
        std::mem::take(&mut self.log.lock().pending)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let mut log = self.log.lock();
        log.next += 1;
        log.requested += 1;
        let token = FrameToken(log.next);
        log.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let mut log = self.log.lock();
        if let Some(index) = log.pending.iter().position(|&pending| pending == token) {
            log.pending.remove(index);
            log.cancelled += 1;
        }
    }
}

/// Surface that keeps every presented frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: (u32, u32),
    frames: Vec<Vec<DrawCommand>>,
}

impl RecordingSurface {
    /// Creates a surface of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            frames: Vec::new(),
        }
    }

    /// Resizes the backing store.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Every presented frame, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[Vec<DrawCommand>] {
        &self.frames
    }

    /// Number of presented frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The most recent frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&[DrawCommand]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Clear commands across all frames.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.frames
            .iter()
            .flatten()
            .filter(|command| matches!(command, DrawCommand::Clear { .. }))
            .count()
    }

    /// Forgets every recorded frame.
    pub fn reset(&mut self) {
        self.frames.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn present(&mut self, commands: &[DrawCommand]) {
        self.frames.push(commands.to_vec());
    }
}

/// A complete in-memory host.
#[derive(Debug)]
pub struct HeadlessHost {
    clock: ManualClock,
    scheduler: ManualScheduler,
    viewport: Viewport,
    surface: Option<RecordingSurface>,
    /// Element boxes, indexed by handle. `None` once removed.
    elements: Vec<Option<Rect>>,
    listeners: Vec<(ListenerId, ListenerKind, SignalSender)>,
    next_listener: u64,
}

impl HeadlessHost {
    /// Creates a host with a recording surface the size of `viewport`.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let mut host = Self::without_surface(viewport);
        host.surface = Some(RecordingSurface::new(viewport.width, viewport.height));
        host
    }

    /// Creates a host that cannot draw.
    #[must_use]
    pub fn without_surface(viewport: Viewport) -> Self {
        Self {
            clock: ManualClock::new(),
            scheduler: ManualScheduler::new(),
            viewport,
            surface: None,
            elements: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// The clock. Clone it to keep a handle.
    #[must_use]
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// The scheduler spy. Clone it to keep a handle.
    #[must_use]
    pub fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }

    /// The recording surface, if the host has one.
    #[must_use]
    pub fn recording(&self) -> Option<&RecordingSurface> {
        self.surface.as_ref()
    }

    /// Marks a new content element as an exclusion zone.
    pub fn add_element(&mut self, rect: Rect) -> ElementHandle {
        self.elements.push(Some(rect));
        ElementHandle((self.elements.len() - 1) as u32)
    }

    /// Moves an element. Listeners are not notified; layout changes are
    /// only picked up on resize or after scrolling.
    pub fn move_element(&mut self, element: ElementHandle, rect: Rect) {
        if let Some(slot) = self.elements.get_mut(element.0 as usize) {
            *slot = Some(rect);
        }
    }

    /// Takes an element out of the layout.
    pub fn remove_element(&mut self, element: ElementHandle) {
        if let Some(slot) = self.elements.get_mut(element.0 as usize) {
            *slot = None;
        }
    }

    /// Resizes the viewport and the surface, then notifies listeners.
    pub fn resize(&mut self, width: u32, height: u32) -> usize {
        self.viewport = Viewport::new(width, height);
        if let Some(surface) = self.surface.as_mut() {
            surface.set_size(width, height);
        }
        self.dispatch(ListenerKind::Resize, FieldSignal::Resize { width, height })
    }

    /// Moves the pointer and notifies listeners.
    pub fn move_pointer(&mut self, x: f32, y: f32) -> usize {
        self.dispatch(ListenerKind::PointerMove, FieldSignal::PointerMoved { x, y })
    }

    /// Scrolls the page down by `dy`, moving every element up, and notifies
    /// listeners.
    pub fn scroll_by(&mut self, dy: f32) -> usize {
        for rect in self.elements.iter_mut().flatten() {
            rect.y -= dy;
        }
        self.dispatch(ListenerKind::Scroll, FieldSignal::Scroll)
    }

    /// Sends `signal` to every listener of `kind`. Returns how many
    /// accepted it.
    pub fn dispatch(&self, kind: ListenerKind, signal: FieldSignal) -> usize {
        self.listeners
            .iter()
            .filter(|(_, listening, _)| *listening == kind)
            .filter(|(_, _, sender)| sender.send(signal))
            .count()
    }

    /// Advances the clock and returns the frames now due.
    pub fn advance(&mut self, by: Duration) -> Vec<FrameToken> {
        self.clock.advance(by);
        self.scheduler.take_due()
    }
}

impl Clock for HeadlessHost {
    fn now(&self) -> Duration {
        self.clock.now()
    }
}

impl FrameScheduler for HeadlessHost {
    fn request_frame(&mut self) -> FrameToken {
        self.scheduler.request_frame()
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.scheduler.cancel_frame(token);
    }
}

impl EventTarget for HeadlessHost {
    fn listen(&mut self, kind: ListenerKind, sender: SignalSender) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push((id, kind, sender));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener, _, _)| *listener != id);
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl LayoutSource for HeadlessHost {
    fn exclusion_elements(&self) -> Vec<ElementHandle> {
        (0..self.elements.len() as u32).map(ElementHandle).collect()
    }

    fn bounding_rect(&self, element: ElementHandle) -> Option<Rect> {
        self.elements.get(element.0 as usize).copied().flatten()
    }
}

impl Host for HeadlessHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn surface(&mut self) -> Option<&mut dyn Surface> {
        self.surface.as_mut().map(|surface| surface as &mut dyn Surface)
    }
}
