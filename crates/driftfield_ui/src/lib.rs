//! # DRIFTFIELD UI Primitives
//!
//! Everything the particle background needs to talk about the screen
//! without knowing what the screen is:
//! - Geometry in CSS pixels (`Rect`, `Viewport`)
//! - Colour (`Color`, `Hsla`) and the light/dark `Palette`
//! - Easing for the theme cross-fade
//! - Draw commands, recorded per frame and handed to a `Surface`
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      FRAME PIPELINE                        │
//! ├───────────────────────────────────────────────────────────┤
//! │  Pointer/Layout → Field Step → FrameRecorder → Surface    │
//! │        ↓               ↓              ↓            ↓      │
//! │  PointerState     Palette blend   DrawCommand   present() │
//! └───────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod input;
pub mod layout;
pub mod render;
pub mod style;

pub use animation::{Crossfade, Easing};
pub use input::PointerState;
pub use layout::{Rect, Viewport};
pub use render::{CircleInstance, DrawCommand, FrameRecorder, Glow, Surface};
pub use style::{Color, Hsla, Palette, ThemeMode};
