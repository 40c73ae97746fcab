//! Field tuning constants.
//!
//! Every constant the step uses lives here so a site can retune density and
//! feel from a TOML file without a rebuild:
//!
//! ```toml
//! spacing = 24.0
//! interaction_radius = 200.0
//! friction = 0.9
//! ```
//!
//! Missing keys fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};

/// Configuration for the particle field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Grid spacing in pixels. Smaller means more particles.
    pub spacing: f32,
    /// Maximum random offset added to each rest position, per axis.
    pub jitter: f32,
    /// Smallest particle radius.
    pub size_min: f32,
    /// Largest particle radius (exclusive).
    pub size_max: f32,
    /// Pointer influence distance.
    pub interaction_radius: f32,
    /// Target opacity of a particle directly under the pointer.
    pub max_opacity: f32,
    /// Scale of the pointer repulsion impulse.
    pub pointer_strength: f32,
    /// Margin added around every protected content element.
    pub exclusion_padding: f32,
    /// Distance outside a padded rectangle at which repulsion starts.
    pub exclusion_radius: f32,
    /// Scale of the exclusion repulsion impulse.
    pub exclusion_strength: f32,
    /// Maximum distance for connecting lines.
    pub connection_radius: f32,
    /// Velocity multiplier applied every frame.
    pub friction: f32,
    /// Fraction of the distance to the rest position recovered every frame.
    pub spring_back: f32,
    /// Fraction of the distance to the target opacity recovered every frame.
    pub opacity_easing: f32,
    /// Shimmer phase advance per frame, in radians.
    pub shimmer_step: f32,
    /// Opacity above which a particle is drawn.
    pub draw_threshold: f32,
    /// Opacity above which a particle takes part in connecting lines.
    pub connection_threshold: f32,
    /// Stroke width of connecting lines.
    pub line_width: f32,
    /// Seed for the jitter generator.
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            spacing: 20.0,
            jitter: 5.0,
            size_min: 1.0,
            size_max: 2.5,
            interaction_radius: 180.0,
            max_opacity: 0.8,
            pointer_strength: 0.15,
            exclusion_padding: 30.0,
            exclusion_radius: 40.0,
            exclusion_strength: 0.3,
            connection_radius: 50.0,
            friction: 0.92,
            spring_back: 0.05,
            opacity_easing: 0.2,
            shimmer_step: 0.02,
            draw_threshold: 0.01,
            connection_threshold: 0.2,
            line_width: 0.5,
            seed: 0x5EED_F1E1D,
        }
    }
}

impl FieldConfig {
    /// Smallest accepted grid spacing, in pixels.
    pub const MIN_SPACING: f32 = 1.0;

    /// Parses a configuration from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ConfigParse`] for malformed TOML or unknown keys,
    /// and [`FieldError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> FieldResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ConfigIo`] if the file cannot be read, otherwise
    /// the same errors as [`FieldConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> FieldResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| FieldError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks every value for range and consistency.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> FieldResult<()> {
        if !self.spacing.is_finite() || self.spacing < Self::MIN_SPACING {
            return Err(FieldError::InvalidConfig(format!(
                "spacing must be >= {}, got {}",
                Self::MIN_SPACING,
                self.spacing
            )));
        }
        positive("interaction_radius", self.interaction_radius)?;
        positive("exclusion_radius", self.exclusion_radius)?;
        positive("connection_radius", self.connection_radius)?;
        non_negative("jitter", self.jitter)?;
        non_negative("exclusion_padding", self.exclusion_padding)?;
        non_negative("pointer_strength", self.pointer_strength)?;
        non_negative("exclusion_strength", self.exclusion_strength)?;
        non_negative("shimmer_step", self.shimmer_step)?;
        non_negative("line_width", self.line_width)?;
        unit("max_opacity", self.max_opacity)?;
        unit("friction", self.friction)?;
        unit("spring_back", self.spring_back)?;
        unit("opacity_easing", self.opacity_easing)?;
        unit("draw_threshold", self.draw_threshold)?;
        unit("connection_threshold", self.connection_threshold)?;

        if !(self.size_min > 0.0 && self.size_min <= self.size_max) {
            return Err(FieldError::InvalidConfig(format!(
                "size range {}..{} must be positive and ordered",
                self.size_min, self.size_max
            )));
        }
        if self.connection_threshold < self.draw_threshold {
            return Err(FieldError::InvalidConfig(format!(
                "connection_threshold {} is below draw_threshold {}",
                self.connection_threshold, self.draw_threshold
            )));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> FieldResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidConfig(format!("{name} must be > 0, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> FieldResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidConfig(format!("{name} must be >= 0, got {value}")))
    }
}

fn unit(name: &str, value: f32) -> FieldResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FieldError::InvalidConfig(format!("{name} must be within 0..=1, got {value}")))
    }
}
