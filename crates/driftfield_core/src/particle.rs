//! The particle record.

use bytemuck::{Pod, Zeroable};

/// One grid particle.
///
/// Plain old data so a renderer can upload the whole field with
/// `bytemuck::cast_slice` if it wants to draw on the GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Current X position.
    pub x: f32,
    /// Current Y position.
    pub y: f32,
    /// Rest X position.
    pub base_x: f32,
    /// Rest Y position.
    pub base_y: f32,
    /// X velocity, pixels per frame.
    pub vx: f32,
    /// Y velocity, pixels per frame.
    pub vy: f32,
    /// Radius.
    pub size: f32,
    /// Rendered alpha (0-1).
    pub opacity: f32,
    /// Alpha the particle is easing towards.
    pub target_opacity: f32,
    /// Shimmer angle in radians. Only ever increases.
    pub shimmer_phase: f32,
}

impl Particle {
    /// Size of a particle in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Creates an invisible particle resting at `(x, y)`.
    #[must_use]
    pub const fn at_rest(x: f32, y: f32, size: f32, shimmer_phase: f32) -> Self {
        Self {
            x,
            y,
            base_x: x,
            base_y: y,
            vx: 0.0,
            vy: 0.0,
            size,
            opacity: 0.0,
            target_opacity: 0.0,
            shimmer_phase,
        }
    }

    /// Shimmer brightness in 0..=1.
    #[inline]
    #[must_use]
    pub fn shimmer(&self) -> f32 {
        (self.shimmer_phase.sin() + 1.0) * 0.5
    }

    /// Squared distance to a point.
    #[inline]
    #[must_use]
    pub fn distance_sq_to(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.x;
        let dy = y - self.y;
        dx * dx + dy * dy
    }
}
