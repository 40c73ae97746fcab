//! Eased cross-fades.
//!
//! Drives the light/dark palette blend so a theme toggle fades over a few
//! hundred milliseconds instead of popping.

use std::time::Duration;

/// Shape of a cross-fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant rate.
    Linear,
    /// Exponential ease-in-out: gentle at both ends.
    #[default]
    ExponentialInOut,
}

impl Easing {
    /// Maps linear progress `t` in 0..=1 onto the curve.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::ExponentialInOut if t <= 0.0 || t >= 1.0 => t,
            Self::ExponentialInOut if t < 0.5 => 0.5 * (20.0 * t - 10.0).exp2(),
            Self::ExponentialInOut => 1.0 - 0.5 * (10.0 - 20.0 * t).exp2(),
        }
    }
}

/// A scalar fading from one value to another over a fixed duration.
#[derive(Debug, Clone)]
pub struct Crossfade {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Crossfade {
    /// Creates a fade resting at `value`.
    #[must_use]
    pub fn new(value: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: duration,
            duration,
            easing,
        }
    }

    /// The value right now.
    #[must_use]
    pub fn value(&self) -> f32 {
        if self.is_settled() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// The value the fade ends at.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// True once the fade has reached its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Starts fading towards `target` from wherever the value is now, so a
    /// double toggle reverses smoothly. Retargeting to the current target
    /// does nothing.
    pub fn retarget(&mut self, target: f32) {
        if (target - self.to).abs() > 1e-4 {
            self.from = self.value();
            self.to = target;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Moves the fade forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}
