//! Colour and theming for the particle field.
//!
//! Particles are specified in HSL because both palettes differ mostly in
//! hue and lightness; the theme cross-fade interpolates in HSL and converts
//! to RGBA only when a draw command is recorded.

use serde::{Deserialize, Serialize};

use crate::render::Glow;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Colour in CSS `hsla()` terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    /// Hue in degrees.
    pub h: f32,
    /// Saturation in percent (0-100).
    pub s: f32,
    /// Lightness in percent (0-100).
    pub l: f32,
    /// Alpha (0-1).
    pub a: f32,
}

impl Hsla {
    /// Creates an HSLA colour.
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Creates an opaque HSL colour.
    #[must_use]
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::new(h, s, l, 1.0)
    }

    /// Interpolates towards `other`, taking the shorter way around the hue circle.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let mut dh = other.h - self.h;
        if dh > 180.0 {
            dh -= 360.0;
        } else if dh < -180.0 {
            dh += 360.0;
        }

        Self {
            h: (self.h + dh * t).rem_euclid(360.0),
            s: self.s + (other.s - self.s) * t,
            l: self.l + (other.l - self.l) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Converts to RGBA.
    #[must_use]
    pub fn to_color(self) -> Color {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);
        let a = self.a.clamp(0.0, 1.0);

        if s <= f32::EPSILON {
            return Color::rgba(l, l, l, a);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Color::rgba(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
            a,
        )
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Light or dark page theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light background, dark particles.
    #[default]
    Light,
    /// Dark background, glowing particles.
    Dark,
}

impl ThemeMode {
    /// Returns the other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Palette blend factor for this theme: 0 is light, 1 is dark.
    #[must_use]
    pub const fn blend_target(self) -> f32 {
        match self {
            Self::Light => 0.0,
            Self::Dark => 1.0,
        }
    }
}

/// Colours and alpha curves used to draw particles and their connections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Particle fill (alpha ignored, computed per particle).
    pub particle: Hsla,
    /// Fill alpha at zero shimmer, multiplied by particle opacity.
    pub base_alpha: f32,
    /// Extra fill alpha at full shimmer.
    pub shimmer_alpha: f32,
    /// Glow colour (alpha ignored).
    pub glow: Hsla,
    /// Glow blur radius at full opacity. Zero disables the glow.
    pub glow_blur: f32,
    /// Glow alpha at full opacity.
    pub glow_alpha: f32,
    /// Connection line colour (alpha ignored).
    pub line: Hsla,
    /// Multiplier applied to every line alpha.
    pub line_alpha_scale: f32,
}

impl Palette {
    /// Subtle grey-blue particles, no glow.
    pub const LIGHT: Self = Self {
        particle: Hsla::hsl(210.0, 20.0, 30.0),
        base_alpha: 0.4,
        shimmer_alpha: 0.2,
        glow: Hsla::hsl(210.0, 20.0, 30.0),
        glow_blur: 0.0,
        glow_alpha: 0.0,
        line: Hsla::hsl(210.0, 30.0, 40.0),
        line_alpha_scale: 0.12,
    };

    /// Blue-white glowing particles.
    pub const DARK: Self = Self {
        particle: Hsla::hsl(200.0, 100.0, 80.0),
        base_alpha: 0.3,
        shimmer_alpha: 0.2,
        glow: Hsla::hsl(200.0, 100.0, 60.0),
        glow_blur: 8.0,
        glow_alpha: 0.5,
        line: Hsla::hsl(200.0, 40.0, 70.0),
        line_alpha_scale: 0.2,
    };

    /// Palette `t` of the way from light (0) to dark (1).
    #[must_use]
    pub fn blend(t: f32) -> Self {
        Self::LIGHT.lerp(&Self::DARK, t.clamp(0.0, 1.0))
    }

    /// Interpolates every field towards `other`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            particle: self.particle.lerp(other.particle, t),
            base_alpha: mix(self.base_alpha, other.base_alpha),
            shimmer_alpha: mix(self.shimmer_alpha, other.shimmer_alpha),
            glow: self.glow.lerp(other.glow, t),
            glow_blur: mix(self.glow_blur, other.glow_blur),
            glow_alpha: mix(self.glow_alpha, other.glow_alpha),
            line: self.line.lerp(other.line, t),
            line_alpha_scale: mix(self.line_alpha_scale, other.line_alpha_scale),
        }
    }

    /// Fill colour for a particle at `opacity` with shimmer brightness `shimmer` (0-1).
    #[must_use]
    pub fn particle_fill(&self, opacity: f32, shimmer: f32) -> Color {
        let alpha = opacity * (self.base_alpha + shimmer * self.shimmer_alpha);
        self.particle.to_color().with_alpha(alpha.clamp(0.0, 1.0))
    }

    /// Glow for a particle at `opacity`, if this palette glows at all.
    #[must_use]
    pub fn particle_glow(&self, opacity: f32) -> Option<Glow> {
        let blur = self.glow_blur * opacity;
        if blur < 0.01 {
            return None;
        }
        Some(Glow {
            blur,
            color: self
                .glow
                .to_color()
                .with_alpha((opacity * self.glow_alpha).clamp(0.0, 1.0)),
        })
    }

    /// Colour for a connection line with the given raw alpha.
    #[must_use]
    pub fn line_color(&self, alpha: f32) -> Color {
        self.line
            .to_color()
            .with_alpha((alpha * self.line_alpha_scale).clamp(0.0, 1.0))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::LIGHT
    }
}
