//! Pointer tracking.

/// Last known pointer position.
///
/// Starts parked far off-screen so that no particle is ever near a pointer
/// that has not moved yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Pointer X position.
    pub x: f32,
    /// Pointer Y position.
    pub y: f32,
}

impl PointerState {
    /// Off-screen sentinel coordinate, used for both axes.
    pub const OFFSCREEN: f32 = -1000.0;

    /// Creates a pointer parked at the sentinel.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            x: Self::OFFSCREEN,
            y: Self::OFFSCREEN,
        }
    }

    /// Creates a pointer at a known position.
    #[must_use]
    pub const fn at(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Records a pointer move.
    pub fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Returns the position.
    #[must_use]
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Returns true once the pointer has left the sentinel.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.x != Self::OFFSCREEN || self.y != Self::OFFSCREEN
    }

    /// Parks the pointer at the sentinel again.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}
