//! # Signal Bus
//!
//! Host event handlers never touch the field directly. They push a
//! [`FieldSignal`] into a bounded channel and the frame callback drains it:
//!
//! ```text
//! ┌─────────────┐  resize   ┌─────────────┐  drain at  ┌──────────────────┐
//! │    Host     │──pointer─>│   Signal    │──frame ───>│ ParticleBackground│
//! │  listeners  │  scroll   │   Channel   │   start    │   (on_frame)     │
//! └─────────────┘           └─────────────┘            └──────────────────┘
//!        ^                                                      │
//!        └──────────── theme changes from the shell ────────────┘
//! ```
//!
//! Sends never block. When the channel is full, the signal is latched
//! instead: the newest resize, pointer position and theme are kept, and a
//! scroll is remembered as a flag. The next drain delivers the latched
//! signals after the queued ones, so state signals are never lost.

use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use driftfield_ui::ThemeMode;
use parking_lot::Mutex;

/// One external signal for the particle background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldSignal {
    /// The viewport changed size.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },

    /// The pointer moved, in viewport coordinates.
    PointerMoved {
        /// Pointer X.
        x: f32,
        /// Pointer Y.
        y: f32,
    },

    /// The page scrolled.
    Scroll,

    /// The page theme changed.
    ThemeChanged(ThemeMode),
}

/// Newest value of each signal that overflowed the channel.
#[derive(Debug, Default)]
struct Overflow {
    resize: Option<FieldSignal>,
    pointer: Option<FieldSignal>,
    scrolled: bool,
    theme: Option<FieldSignal>,
}

impl Overflow {
    fn latch(&mut self, signal: FieldSignal) {
        match signal {
            FieldSignal::Resize { .. } => self.resize = Some(signal),
            FieldSignal::PointerMoved { .. } => self.pointer = Some(signal),
            FieldSignal::Scroll => self.scrolled = true,
            FieldSignal::ThemeChanged(_) => self.theme = Some(signal),
        }
    }

    fn len(&self) -> usize {
        usize::from(self.resize.is_some())
            + usize::from(self.pointer.is_some())
            + usize::from(self.scrolled)
            + usize::from(self.theme.is_some())
    }

    fn take_into(&mut self, out: &mut Vec<FieldSignal>) {
        let Self {
            resize,
            pointer,
            scrolled,
            theme,
        } = std::mem::take(self);
        out.extend(resize);
        out.extend(pointer);
        if scrolled {
            out.push(FieldSignal::Scroll);
        }
        out.extend(theme);
    }
}

/// Bounded channel carrying [`FieldSignal`]s.
pub struct SignalBus {
    /// Sender end - cloned into every listener.
    sender: Sender<FieldSignal>,
    /// Receiver end - drained by the frame callback.
    receiver: Receiver<FieldSignal>,
    /// Signals that did not fit.
    overflow: Arc<Mutex<Overflow>>,
}

impl SignalBus {
    /// Creates a bus that queues at most `capacity` undelivered signals
    /// before it starts latching.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self {
            sender,
            receiver,
            overflow: Arc::default(),
        }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> SignalSender {
        SignalSender {
            sender: self.sender.clone(),
            overflow: Arc::clone(&self.overflow),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> SignalReceiver {
        SignalReceiver {
            receiver: self.receiver.clone(),
            overflow: Arc::clone(&self.overflow),
        }
    }
}

/// Handle for sending signals.
#[derive(Clone, Debug)]
pub struct SignalSender {
    sender: Sender<FieldSignal>,
    overflow: Arc<Mutex<Overflow>>,
}

impl SignalSender {
    /// Sends a signal without blocking.
    ///
    /// A full channel latches the signal for the next drain. Returns `false`
    /// only when the receiver is gone.
    #[inline]
    pub fn send(&self, signal: FieldSignal) -> bool {
        match self.sender.try_send(signal) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::trace!(?signal, "signal channel full, latching");
                self.overflow.lock().latch(signal);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for receiving signals.
#[derive(Clone, Debug)]
pub struct SignalReceiver {
    receiver: Receiver<FieldSignal>,
    overflow: Arc<Mutex<Overflow>>,
}

impl SignalReceiver {
    /// Moves every pending signal into `out`: queued signals oldest first,
    /// then any latched overflow.
    ///
    /// Returns the number of signals moved.
    #[inline]
    pub fn drain_into(&self, out: &mut Vec<FieldSignal>) -> usize {
        let before = out.len();
        out.extend(self.receiver.try_iter());
        self.overflow.lock().take_into(out);
        out.len() - before
    }

    /// Returns the number of pending signals.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len() + self.overflow.lock().len()
    }

    /// Checks if there are pending signals.
    #[inline]
    #[must_use]
    pub fn has_signals(&self) -> bool {
        self.pending_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signals_arrive_in_order() {
        let bus = SignalBus::new(8);
        let sender = bus.sender();
        let receiver = bus.receiver();

        assert!(sender.send(FieldSignal::Scroll));
        assert!(sender.send(FieldSignal::PointerMoved { x: 1.0, y: 2.0 }));
        assert_eq!(receiver.pending_count(), 2);

        let mut out = Vec::new();
        assert_eq!(receiver.drain_into(&mut out), 2);
        assert_eq!(
            out,
            vec![FieldSignal::Scroll, FieldSignal::PointerMoved { x: 1.0, y: 2.0 }]
        );
        assert!(!receiver.has_signals());
    }

    #[test]
    fn test_full_channel_latches_newest_state() {
        let bus = SignalBus::new(1);
        let sender = bus.sender();
        let receiver = bus.receiver();

        assert!(sender.send(FieldSignal::PointerMoved { x: 0.0, y: 0.0 }));
        for n in 1..=50 {
            assert!(sender.send(FieldSignal::PointerMoved { x: n as f32, y: 0.0 }));
        }
        assert!(sender.send(FieldSignal::Resize { width: 640, height: 480 }));
        assert!(sender.send(FieldSignal::Resize { width: 1000, height: 800 }));
        assert!(sender.send(FieldSignal::Scroll));
        assert!(sender.send(FieldSignal::Scroll));
        assert_eq!(receiver.pending_count(), 4);

        let mut out = Vec::new();
        assert_eq!(receiver.drain_into(&mut out), 4);
        assert_eq!(
            out,
            vec![
                FieldSignal::PointerMoved { x: 0.0, y: 0.0 },
                FieldSignal::Resize { width: 1000, height: 800 },
                FieldSignal::PointerMoved { x: 50.0, y: 0.0 },
                FieldSignal::Scroll,
            ]
        );
        assert!(!receiver.has_signals());
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let bus = SignalBus::new(4);
        let sender = bus.sender();
        drop(bus);

        assert!(!sender.send(FieldSignal::ThemeChanged(ThemeMode::Dark)));
    }
}
