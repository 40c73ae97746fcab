//! Component configuration.
//!
//! One TOML file covers the field constants, the timers and the per-route
//! pause windows:
//!
//! ```toml
//! [field]
//! spacing = 24.0
//!
//! [timing]
//! scroll_debounce_ms = 200
//!
//! [pages]
//! default_pause_ms = 0
//!
//! [pages.routes]
//! "/" = 1200
//! "/logs" = 600
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use driftfield_core::{FieldConfig, FieldError, FieldResult};
use serde::{Deserialize, Serialize};

/// Full configuration of the particle background.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    /// Simulation constants.
    pub field: FieldConfig,
    /// Timers and channel sizing.
    pub timing: TimingConfig,
    /// Per-route pause windows.
    pub pages: PageConfig,
}

/// Timers and channel sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Quiet period after the last scroll before physics resumes.
    pub scroll_debounce_ms: u64,
    /// Duration of the light/dark palette cross-fade.
    pub theme_transition_ms: u64,
    /// Signals buffered between two frames before new ones are dropped.
    pub signal_capacity: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scroll_debounce_ms: 150,
            theme_transition_ms: 600,
            signal_capacity: 256,
        }
    }
}

impl TimingConfig {
    /// Scroll quiet period.
    #[must_use]
    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }

    /// Theme cross-fade duration.
    #[must_use]
    pub fn theme_transition(&self) -> Duration {
        Duration::from_millis(self.theme_transition_ms)
    }
}

/// How long particles stay hidden while a page plays its entrance animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Pause for routes missing from `routes`.
    pub default_pause_ms: u64,
    /// Pause per route path.
    pub routes: BTreeMap<String, u64>,
}

impl Default for PageConfig {
    fn default() -> Self {
        let routes = [("/", 1200), ("/logs", 600), ("/about", 600)]
            .into_iter()
            .map(|(route, ms)| (route.to_owned(), ms))
            .collect();

        Self {
            default_pause_ms: 300,
            routes,
        }
    }
}

impl PageConfig {
    /// Pause window for `route` when its entrance animation plays.
    #[must_use]
    pub fn pause_for(&self, route: &str) -> Duration {
        let ms = self.routes.get(route).copied().unwrap_or(self.default_pause_ms);
        Duration::from_millis(ms)
    }
}

impl BackgroundConfig {
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
    /// the same errors as [`BackgroundConfig::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> FieldResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| FieldError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks the field constants and the channel size.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> FieldResult<()> {
        self.field.validate()?;
        if self.timing.signal_capacity == 0 {
            return Err(FieldError::InvalidConfig(
                "signal_capacity must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BackgroundConfig::default();
        config.validate().unwrap();

        assert_eq!(config.timing.scroll_debounce(), Duration::from_millis(150));
        assert_eq!(config.timing.theme_transition(), Duration::from_millis(600));
        assert_eq!(config.pages.pause_for("/"), Duration::from_millis(1200));
        assert_eq!(config.pages.pause_for("/nowhere"), Duration::from_millis(300));
    }

    #[test]
    fn test_sections_parse() {
        let config = BackgroundConfig::from_toml_str(
            r#"
            [field]
            spacing = 24.0

            [timing]
            scroll_debounce_ms = 200

            [pages]
            default_pause_ms = 0

            [pages.routes]
            "/projects" = 900
            "#,
        )
        .unwrap();

        assert_eq!(config.field.spacing, 24.0);
        assert_eq!(config.field.friction, 0.92);
        assert_eq!(config.timing.scroll_debounce_ms, 200);
        assert_eq!(config.timing.signal_capacity, 256);
        assert_eq!(config.pages.pause_for("/projects"), Duration::from_millis(900));
        assert_eq!(config.pages.pause_for("/"), Duration::ZERO);
    }

    #[test]
    fn test_field_errors_surface() {
        let err = BackgroundConfig::from_toml_str("[field]\nspacing = -1.0").unwrap_err();
        assert!(matches!(err, FieldError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = BackgroundConfig::from_toml_str("[timing]\nsignal_capacity = 0").unwrap_err();
        assert!(err.to_string().contains("signal_capacity"));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = BackgroundConfig::from_toml_str("[sparkles]\non = true").unwrap_err();
        assert!(matches!(err, FieldError::ConfigParse(_)));
    }
}
