//! # The Particle Background
//!
//! Binds a [`ParticleField`] to a [`Host`]. One instance lives from
//! [`ParticleBackground::mount`] to [`ParticleBackground::unmount`]; every
//! frame goes through [`ParticleBackground::on_frame`]:
//!
//! ```text
//! on_frame(token)
//!   │
//!   ├─ stale token? ─────────────────────────────> ignore
//!   ├─ drain signals (resize, pointer, scroll, theme)
//!   ├─ scroll quiet long enough? ──> refresh exclusion rects
//!   ├─ advance theme blend
//!   ├─ page pause? ──> clear once, skip ────────┐
//!   ├─ clear                                    │
//!   ├─ scrolling? ──> skip ─────────────────────┤
//!   ├─ step field                               │
//!   └─ present, re-arm <────────────────────────┘
//! ```

use std::time::Duration;

use driftfield_core::{ExclusionZones, ParticleField, StepInputs};
use driftfield_ui::{Crossfade, Easing, FrameRecorder, Palette, PointerState, Rect, ThemeMode, Viewport};

use crate::config::BackgroundConfig;
use crate::events::{FieldSignal, SignalBus, SignalReceiver, SignalSender};
use crate::frame_loop::{FrameLoop, FrameStats, FrameStatsAccumulator, SkipReason};
use crate::host::{FrameToken, Host, ListenerId, ListenerKind};
use crate::timers::{PauseWindow, ScrollDebounce};

/// A mounted particle background.
pub struct ParticleBackground {
    /// Configuration it was mounted with.
    config: BackgroundConfig,
    /// The simulation.
    field: ParticleField,
    /// Protected content boxes.
    zones: ExclusionZones,
    /// Last pointer position.
    pointer: PointerState,
    /// Commands for the current frame.
    recorder: FrameRecorder,
    /// Handed to every listener.
    sender: SignalSender,
    /// Drained at frame start.
    receiver: SignalReceiver,
    /// Scratch buffer for drained signals.
    signals: Vec<FieldSignal>,
    /// Every listener registered on mount.
    listeners: Vec<ListenerId>,
    /// Frame scheduling.
    frame_loop: FrameLoop,
    /// Scroll-settle debounce.
    scroll: ScrollDebounce,
    /// Page-entry pause.
    pause: PauseWindow,
    /// Light (0) to dark (1) palette blend.
    theme: Crossfade,
}

impl ParticleBackground {
    /// Mounts the background on `host`.
    ///
    /// Returns `None` and registers nothing when the host has no drawing
    /// surface. Otherwise the first frame is already requested.
    pub fn mount<H: Host>(
        config: BackgroundConfig,
        host: &mut H,
        route: &str,
        animate_entrance: bool,
        theme: ThemeMode,
    ) -> Option<Self> {
        if host.surface().is_none() {
            tracing::debug!(route, "no drawing surface, particle background disabled");
            return None;
        }

        let bus = SignalBus::new(config.timing.signal_capacity);
        let mut zones = ExclusionZones::new(config.field.exclusion_padding);
        zones.cache_elements(&*host);
        zones.refresh(&*host);

        let mut field = ParticleField::new(config.field.clone());
        field.rebuild(host.viewport());

        let listeners = ListenerKind::ALL
            .iter()
            .map(|&kind| host.listen(kind, bus.sender()))
            .collect();

        let blend = Crossfade::new(
            theme.blend_target(),
            config.timing.theme_transition(),
            Easing::ExponentialInOut,
        );

        let mut background = Self {
            scroll: ScrollDebounce::new(config.timing.scroll_debounce()),
            recorder: FrameRecorder::with_capacity(field.len() + 1),
            sender: bus.sender(),
            receiver: bus.receiver(),
            signals: Vec::new(),
            pointer: PointerState::new(),
            pause: PauseWindow::new(),
            frame_loop: FrameLoop::new(),
            theme: blend,
            listeners,
            field,
            zones,
            config,
        };

        background.begin_page(route, animate_entrance, &*host);
        background.frame_loop.arm(&mut *host);

        tracing::info!(
            route,
            particles = background.field.len(),
            exclusions = background.zones.rects().len(),
            "particle background mounted"
        );
        Some(background)
    }

    /// Starts the pause window for a newly shown page.
    ///
    /// The window is the route's configured pause when its entrance
    /// animation plays and zero otherwise.
    pub fn begin_page<H: Host>(&mut self, route: &str, animate_entrance: bool, host: &H) {
        let length = if animate_entrance {
            self.config.pages.pause_for(route)
        } else {
            Duration::ZERO
        };
        self.pause.start(host.now(), length);
        tracing::debug!(route, animate_entrance, pause_ms = length.as_millis() as u64, "page shown");
    }

    /// Runs one frame.
    ///
    /// Returns `None` if `token` is not the frame this background armed.
    pub fn on_frame<H: Host>(&mut self, host: &mut H, token: FrameToken) -> Option<FrameStats> {
        let ctx = self.frame_loop.begin_frame(token, &*host)?;
        let mut stats = ctx.stats();

        stats.signals = self.apply_signals(&*host, ctx.now);

        if self.scroll.poll(ctx.now) {
            self.zones.refresh(&*host);
        }

        self.theme.advance(ctx.delta);

        let viewport = self.field.viewport();
        let (width, height) = (viewport.width as f32, viewport.height as f32);
        self.recorder.begin_frame();

        if self.pause.is_active(ctx.now) {
            if self.pause.take_clear() {
                self.recorder.clear(width, height);
            }
            stats.skipped = Some(SkipReason::PagePause);
        } else {
            self.recorder.clear(width, height);
            if self.scroll.is_scrolling() {
                stats.skipped = Some(SkipReason::Scrolling);
            } else {
                let palette = Palette::blend(self.theme.value());
                let inputs = StepInputs {
                    pointer: self.pointer,
                    exclusions: self.zones.rects(),
                    palette: &palette,
                };
                stats.report = self.field.step(&inputs, &mut self.recorder);
            }
        }

        if !self.recorder.is_empty() {
            if let Some(surface) = host.surface() {
                surface.present(self.recorder.end_frame());
            }
        }
        stats.commands = self.recorder.command_count();

        tracing::trace!(
            frame = stats.frame,
            skipped = ?stats.skipped,
            drawn = stats.report.drawn,
            lines = stats.report.lines,
            "frame"
        );

        self.frame_loop.end_frame(stats);
        self.frame_loop.arm(&mut *host);
        Some(stats)
    }

    /// Retargets the palette blend. The cross-fade runs over the next frames.
    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme.retarget(mode.blend_target());
    }

    /// Tears everything down: the pending frame, the scroll debounce and
    /// every listener registered on mount.
    pub fn unmount<H: Host>(mut self, host: &mut H) {
        self.frame_loop.cancel(&mut *host);
        self.scroll.clear();
        self.pause.clear();
        for id in self.listeners.drain(..) {
            host.unlisten(id);
        }
        self.zones.clear();
        tracing::info!(frames = self.frame_loop.frame_count(), "particle background unmounted");
    }

    fn apply_signals<H: Host>(&mut self, host: &H, now: Duration) -> usize {
        let mut signals = std::mem::take(&mut self.signals);
        let count = self.receiver.drain_into(&mut signals);
        let mut resized = None;

        for signal in signals.drain(..) {
            match signal {
                FieldSignal::Resize { width, height } => resized = Some(Viewport::new(width, height)),
                FieldSignal::PointerMoved { x, y } => self.pointer.set(x, y),
                FieldSignal::Scroll => self.scroll.on_scroll(now),
                FieldSignal::ThemeChanged(mode) => self.theme.retarget(mode.blend_target()),
            }
        }
        self.signals = signals;

        // Bursts of resizes collapse into one rebuild at the final size.
        if let Some(viewport) = resized {
            self.zones.refresh(host);
            self.field.rebuild(viewport);
        }
        count
    }

    /// A sender into this background's signal channel.
    #[must_use]
    pub fn signal_sender(&self) -> SignalSender {
        self.sender.clone()
    }

    /// The simulation.
    #[must_use]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Last known pointer position.
    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Current padded exclusion rectangles.
    #[must_use]
    pub fn exclusion_rects(&self) -> &[Rect] {
        self.zones.rects()
    }

    /// True from the first scroll until the debounce fires.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    /// True while a page pause is running at `now`.
    #[must_use]
    pub fn is_paused(&self, now: Duration) -> bool {
        self.pause.is_active(now)
    }

    /// Current palette blend: 0 is light, 1 is dark.
    #[must_use]
    pub fn theme_blend(&self) -> f32 {
        self.theme.value()
    }

    /// The frame this background is waiting for.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.frame_loop.pending()
    }

    /// Number of listeners registered on mount.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Accumulated frame statistics.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsAccumulator {
        self.frame_loop.stats()
    }
}
