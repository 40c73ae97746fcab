//! The application shell.
//!
//! Owns what outlives any single page: the theme, the page-animation
//! registry and the (optional) particle background. Routes are plain path
//! strings.

use driftfield_ui::ThemeMode;

use crate::background::ParticleBackground;
use crate::config::BackgroundConfig;
use crate::frame_loop::FrameStats;
use crate::host::{FrameToken, Host};
use crate::page_animation::PageAnimationRegistry;

/// Top-level application state.
pub struct AppShell {
    config: BackgroundConfig,
    registry: PageAnimationRegistry,
    theme: ThemeMode,
    route: String,
    background: Option<ParticleBackground>,
}

impl AppShell {
    /// Creates a shell that has not shown any page yet.
    #[must_use]
    pub fn new(config: BackgroundConfig, theme: ThemeMode) -> Self {
        Self {
            config,
            registry: PageAnimationRegistry::new(),
            theme,
            route: String::new(),
            background: None,
        }
    }

    /// Shows the first page and mounts the background.
    ///
    /// Returns `true` if the background mounted. A host without a drawing
    /// surface still gets a working shell, just no particles.
    pub fn start<H: Host>(&mut self, host: &mut H, route: &str) -> bool {
        if let Some(previous) = self.background.take() {
            previous.unmount(&mut *host);
        }

        self.route = route.to_owned();
        let animate = self.registry.should_animate(route);
        self.background = ParticleBackground::mount(self.config.clone(), &mut *host, route, animate, self.theme);
        self.background.is_some()
    }

    /// Soft navigation. The background stays mounted; only the page pause
    /// restarts, and only if the new page animates its entrance.
    ///
    /// Returns whether the page plays its entrance animation.
    pub fn navigate<H: Host>(&mut self, host: &mut H, route: &str) -> bool {
        let animate = self.registry.should_animate(route);
        self.route = route.to_owned();
        if let Some(background) = self.background.as_mut() {
            background.begin_page(route, animate, &*host);
        }
        tracing::debug!(route, animate, "navigated");
        animate
    }

    /// Full reload: every page animates again and the background is
    /// remounted from scratch.
    pub fn reload<H: Host>(&mut self, host: &mut H) -> bool {
        self.registry.reset();
        let route = std::mem::take(&mut self.route);
        self.start(&mut *host, &route)
    }

    /// Sets the theme. A mounted background cross-fades to it.
    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme = mode;
        if let Some(background) = self.background.as_mut() {
            background.set_theme(mode);
        }
    }

    /// Switches between light and dark and returns the new theme.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        let mode = self.theme.toggled();
        self.set_theme(mode);
        mode
    }

    /// Runs the frames for `tokens`, in order.
    ///
    /// Returns the stats of every frame that actually ran. Stale tokens are
    /// skipped.
    pub fn pump<H: Host>(&mut self, host: &mut H, tokens: impl IntoIterator<Item = FrameToken>) -> Vec<FrameStats> {
        let Some(background) = self.background.as_mut() else {
            return Vec::new();
        };
        tokens
            .into_iter()
            .filter_map(|token| background.on_frame(&mut *host, token))
            .collect()
    }

    /// Unmounts the background. The shell can be started again.
    pub fn shutdown<H: Host>(&mut self, host: &mut H) {
        if let Some(background) = self.background.take() {
            background.unmount(&mut *host);
        }
    }

    /// Current theme.
    #[must_use]
    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// Current route.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// The mounted background, if any.
    #[must_use]
    pub fn background(&self) -> Option<&ParticleBackground> {
        self.background.as_ref()
    }

    /// The page-animation registry.
    #[must_use]
    pub fn registry(&self) -> &PageAnimationRegistry {
        &self.registry
    }
}
