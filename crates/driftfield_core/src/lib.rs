//! # DRIFTFIELD Core
//!
//! The particle field behind the page: a jittered grid of particles that
//! fade in near the pointer, get pushed out of protected content, drift back
//! to rest and draw faint lines between bright neighbours.
//!
//! ## Design Principles
//!
//! 1. **Pure step** - `ParticleField::step` reads `StepInputs` and writes draw
//!    commands; it never touches a host, clock or scheduler
//! 2. **Full rebuild on resize** - no incremental grid surgery
//! 3. **Layout reads are rare** - exclusion boxes are refreshed on resize
//!    and after scrolling settles, never per frame
//! 4. **Deterministic jitter** - seeded `ChaCha8`, same seed = same grid
//!
//! ## Example
//!
//! ```rust
//! use driftfield_core::{FieldConfig, ParticleField, StepInputs};
//! use driftfield_ui::{FrameRecorder, Palette, PointerState, Viewport};
//!
//! let mut field = ParticleField::new(FieldConfig::default());
//! field.rebuild(Viewport::new(1000, 800));
//! assert_eq!(field.len(), 2000);
//!
//! let mut recorder = FrameRecorder::new();
//! let report = field.step(
//!     &StepInputs {
//!         pointer: PointerState::at(500.0, 400.0),
//!         exclusions: &[],
//!         palette: &Palette::DARK,
//!     },
//!     &mut recorder,
//! );
//! assert_eq!(report.updated, 2000);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod exclusion;
pub mod field;
pub mod particle;

pub use config::FieldConfig;
pub use error::{FieldError, FieldResult};
pub use exclusion::{repulsion, ElementHandle, ExclusionZones, LayoutSource};
pub use field::{ParticleField, StepInputs, StepReport};
pub use particle::Particle;
