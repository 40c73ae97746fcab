//! # DRIFTFIELD
//!
//! A content-aware particle background for a single-page site.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                             AppShell                                │
//! │   theme ─── PageAnimationRegistry ─── route                         │
//! │                         │                                           │
//! │                ParticleBackground                                   │
//! │   ┌──────────────┬──────┴───────┬───────────────┬──────────────┐    │
//! │   │ SignalBus    │ FrameLoop    │ ScrollDebounce│ PauseWindow  │    │
//! │   │ (crossbeam)  │ (tokens)     │               │              │    │
//! │   └──────────────┴──────┬───────┴───────────────┴──────────────┘    │
//! │                  driftfield_core::ParticleField                     │
//! └─────────────────────────┬───────────────────────────────────────────┘
//!                           │ Host (clock, scheduler, listeners,
//!                           │       layout, surface)
//!                   browser / native window / HeadlessHost
//! ```
//!
//! The host pushes signals, the background drains them once per frame, and
//! the field step stays a pure function of its inputs.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod background;
pub mod config;
pub mod events;
pub mod frame_loop;
pub mod host;
pub mod page_animation;
pub mod shell;
pub mod testing;
pub mod timers;

pub use background::ParticleBackground;
pub use config::{BackgroundConfig, PageConfig, TimingConfig};
pub use events::{FieldSignal, SignalBus, SignalReceiver, SignalSender};
pub use frame_loop::{FrameContext, FrameLoop, FrameStats, FrameStatsAccumulator, SkipReason, MAX_DELTA};
pub use host::{Clock, EventTarget, FrameScheduler, FrameToken, Host, ListenerId, ListenerKind};
pub use page_animation::PageAnimationRegistry;
pub use shell::AppShell;
pub use timers::{PauseWindow, ScrollDebounce};
