//! # The Particle Field
//!
//! ```text
//! rebuild(viewport)                 step(inputs, recorder)
//! ┌──────────────────────┐          ┌────────────────────────────────────┐
//! │ ceil(W/s) × ceil(H/s)│          │ PHYSICS (every particle)           │
//! │ grid, column-major   │          │  a. pointer: target opacity + push │
//! │ + jitter [0, j)      │          │  b. exclusion zones: push out      │
//! │ + random size/phase  │          │  c. friction, integrate            │
//! └──────────────────────┘          │  d. spring back to rest            │
//!                                   │  e. ease opacity                   │
//!                                   │  f. advance shimmer                │
//!                                   │ DRAW (reads this frame's positions)│
//!                                   │  g. circles above draw threshold   │
//!                                   │  h. lines between bright neighbours│
//!                                   └────────────────────────────────────┘
//! ```
//!
//! The step is a pure function of the particle array and `StepInputs`.
//! Clearing the surface and deciding whether to step at all (scrolling,
//! page pause) is the caller's business.

use std::f32::consts::TAU;

use driftfield_ui::{DrawCommand, FrameRecorder, Palette, PointerState, Rect, Viewport};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::FieldConfig;
use crate::exclusion::repulsion;
use crate::particle::Particle;

/// Everything outside the particle array that one step reads.
#[derive(Debug, Clone, Copy)]
pub struct StepInputs<'a> {
    /// Pointer position (off-screen sentinel if it never moved).
    pub pointer: PointerState,
    /// Padded exclusion rectangles.
    pub exclusions: &'a [Rect],
    /// Palette for this frame (already blended between themes).
    pub palette: &'a Palette,
}

/// What one step did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Particles whose physics was advanced.
    pub updated: usize,
    /// Particles drawn.
    pub drawn: usize,
    /// Connecting lines drawn.
    pub lines: usize,
}

/// The grid of particles and the step that animates it.
pub struct ParticleField {
    /// Tuning constants.
    config: FieldConfig,
    /// All particles, column-major.
    particles: Vec<Particle>,
    /// Viewport the grid was built for.
    viewport: Viewport,
    /// Grid columns.
    columns: usize,
    /// Grid rows.
    rows: usize,
    /// Jitter source.
    rng: ChaCha8Rng,
    /// Scratch: indices of particles bright enough to connect.
    bright: Vec<usize>,
}

impl ParticleField {
    /// Creates an empty field. Call [`ParticleField::rebuild`] before stepping.
    #[must_use]
    pub fn new(config: FieldConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            particles: Vec::new(),
            viewport: Viewport::default(),
            columns: 0,
            rows: 0,
            rng,
            bright: Vec::new(),
        }
    }

    /// Grid size for a viewport: `(ceil(W / spacing), ceil(H / spacing))`.
    #[must_use]
    ///
    /// Spacing below [`FieldConfig::MIN_SPACING`] (or NaN) yields an empty grid.
    pub fn grid_dimensions(viewport: Viewport, spacing: f32) -> (usize, usize) {
        if spacing.is_nan() || spacing < FieldConfig::MIN_SPACING || viewport.is_empty() {
            return (0, 0);
        }
        let columns = (viewport.width as f32 / spacing).ceil() as usize;
        let rows = (viewport.height as f32 / spacing).ceil() as usize;
        (columns, rows)
    }

    /// Discards every particle and lays out a fresh grid for `viewport`.
    ///
    /// Jitter keeps drawing from the same generator, so rebuilding twice for
    /// the same viewport gives the same count but different positions.
    pub fn rebuild(&mut self, viewport: Viewport) {
        let (columns, rows) = Self::grid_dimensions(viewport, self.config.spacing);
        let spacing = self.config.spacing;
        let jitter = self.config.jitter;
        let size_span = self.config.size_max - self.config.size_min;

        self.particles.clear();
        self.particles.reserve(columns * rows);

        for column in 0..columns {
            for row in 0..rows {
                let x = column as f32 * spacing + self.rng.gen::<f32>() * jitter;
                let y = row as f32 * spacing + self.rng.gen::<f32>() * jitter;
                let size = self.config.size_min + self.rng.gen::<f32>() * size_span;
                let phase = self.rng.gen::<f32>() * TAU;
                self.particles.push(Particle::at_rest(x, y, size, phase));
            }
        }

        self.viewport = viewport;
        self.columns = columns;
        self.rows = rows;
        self.bright.clear();
        self.bright.reserve(self.particles.len());

        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            columns,
            rows,
            count = self.particles.len(),
            "rebuilt particle grid"
        );
    }

    /// Advances every particle by one frame and records the drawing.
    pub fn step(&mut self, inputs: &StepInputs<'_>, recorder: &mut FrameRecorder) -> StepReport {
        self.integrate(inputs);
        let (drawn, lines) = self.draw(inputs.palette, recorder);

        let report = StepReport {
            updated: self.particles.len(),
            drawn,
            lines,
        };
        tracing::trace!(?report, "field step");
        report
    }

    /// Physics only: items a-f for every particle.
    fn integrate(&mut self, inputs: &StepInputs<'_>) {
        let cfg = &self.config;
        let radius = cfg.interaction_radius;
        let radius_sq = radius * radius;
        let (px, py) = inputs.pointer.position();

        for p in &mut self.particles {
            let dx = px - p.x;
            let dy = py - p.y;
            let dist_sq = dx * dx + dy * dy;

            if dist_sq < radius_sq {
                let dist = dist_sq.sqrt();
                p.target_opacity = (1.0 - dist / radius) * cfg.max_opacity;

                let force = (radius - dist) / radius * cfg.pointer_strength;
                // Dead centre has no direction; push along -x.
                let (ux, uy) = if dist > f32::EPSILON {
                    (dx / dist, dy / dist)
                } else {
                    (1.0, 0.0)
                };
                p.vx -= ux * force;
                p.vy -= uy * force;
            } else {
                p.target_opacity = 0.0;
            }

            for rect in inputs.exclusions {
                if let Some((ix, iy)) = repulsion(
                    rect,
                    p.x,
                    p.y,
                    cfg.exclusion_radius,
                    cfg.exclusion_strength,
                ) {
                    p.vx += ix;
                    p.vy += iy;
                }
            }

            p.vx *= cfg.friction;
            p.vy *= cfg.friction;
            p.x += p.vx;
            p.y += p.vy;

            p.x += (p.base_x - p.x) * cfg.spring_back;
            p.y += (p.base_y - p.y) * cfg.spring_back;

            p.opacity += (p.target_opacity - p.opacity) * cfg.opacity_easing;

            p.shimmer_phase = (p.shimmer_phase + cfg.shimmer_step).rem_euclid(TAU);
        }
    }

    /// Drawing only: items g-h. Returns `(circles, lines)`.
    fn draw(&mut self, palette: &Palette, recorder: &mut FrameRecorder) -> (usize, usize) {
        let cfg = &self.config;
        let mut drawn = 0;
        self.bright.clear();

        for (index, p) in self.particles.iter().enumerate() {
            if p.opacity <= cfg.draw_threshold {
                continue;
            }

            recorder.push(DrawCommand::Circle {
                x: p.x,
                y: p.y,
                radius: p.size,
                color: palette.particle_fill(p.opacity, p.shimmer()),
                glow: palette.particle_glow(p.opacity),
            });
            drawn += 1;

            if p.opacity > cfg.connection_threshold {
                self.bright.push(index);
            }
        }

        let reach = cfg.connection_radius;
        let reach_sq = reach * reach;
        let mut lines = 0;

        for (i, &a) in self.bright.iter().enumerate() {
            let pa = &self.particles[a];
            for &b in &self.bright[i + 1..] {
                let pb = &self.particles[b];
                let dist_sq = pa.distance_sq_to(pb.x, pb.y);
                if dist_sq >= reach_sq {
                    continue;
                }

                let alpha = (1.0 - dist_sq.sqrt() / reach) * pa.opacity.min(pb.opacity);
                recorder.push(DrawCommand::Line {
                    from: (pa.x, pa.y),
                    to: (pb.x, pb.y),
                    color: palette.line_color(alpha),
                    width: cfg.line_width,
                });
                lines += 1;
            }
        }

        (drawn, lines)
    }

    /// Returns the particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Returns the particles for direct manipulation.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Returns the particle array as raw bytes for GPU upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    /// Returns the particle count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if the grid is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Returns `(columns, rows)` of the current grid.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Returns the viewport the grid was built for.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}
