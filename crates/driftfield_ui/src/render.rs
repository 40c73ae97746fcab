//! Draw command recording.
//!
//! The field step never touches a drawing context directly. It records
//! commands into a `FrameRecorder`, and the component hands the finished
//! frame to whatever `Surface` the host provides (a 2D canvas, a WebGL
//! instanced renderer, or a recording double in tests).

use crate::style::Color;

/// Soft shadow drawn behind a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Blur radius in pixels.
    pub blur: f32,
    /// Shadow colour.
    pub color: Color,
}

/// A single draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface.
    Clear {
        /// Width of the cleared area.
        width: f32,
        /// Height of the cleared area.
        height: f32,
    },
    /// Filled circle.
    Circle {
        /// Center X.
        x: f32,
        /// Center Y.
        y: f32,
        /// Radius.
        radius: f32,
        /// Fill colour.
        color: Color,
        /// Optional glow.
        glow: Option<Glow>,
    },
    /// Straight line segment.
    Line {
        /// Start point.
        from: (f32, f32),
        /// End point.
        to: (f32, f32),
        /// Stroke colour.
        color: Color,
        /// Stroke width.
        width: f32,
    },
}

/// Where finished frames go.
pub trait Surface {
    /// Current backing size in pixels.
    fn size(&self) -> (u32, u32);

    /// Draws one frame's worth of commands, in order.
    fn present(&mut self, commands: &[DrawCommand]);
}

/// Per-circle record for instanced GPU upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CircleInstance {
    /// Center (x, y).
    pub center: [f32; 2],
    /// Radius and glow blur.
    pub radius_blur: [f32; 2],
    /// Fill colour (RGBA).
    pub color: [f32; 4],
    /// Glow colour (RGBA), transparent when there is no glow.
    pub glow_color: [f32; 4],
}

/// Collects the commands for one frame.
pub struct FrameRecorder {
    /// Commands recorded this frame.
    commands: Vec<DrawCommand>,
    /// Circles recorded this frame.
    circles: usize,
    /// Lines recorded this frame.
    lines: usize,
}

impl FrameRecorder {
    /// Creates a recorder with room for `capacity` commands.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
            circles: 0,
            lines: 0,
        }
    }

    /// Creates a new recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Begins a new frame, dropping whatever was recorded before.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.circles = 0;
        self.lines = 0;
    }

    /// Records a command.
    pub fn push(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Circle { .. } => self.circles += 1,
            DrawCommand::Line { .. } => self.lines += 1,
            DrawCommand::Clear { .. } => {}
        }
        self.commands.push(command);
    }

    /// Records a full-surface clear.
    pub fn clear(&mut self, width: f32, height: f32) {
        self.push(DrawCommand::Clear { width, height });
    }

    /// Returns the recorded commands.
    #[must_use]
    pub fn end_frame(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Returns the number of circles recorded this frame.
    #[must_use]
    pub fn circle_count(&self) -> usize {
        self.circles
    }

    /// Returns the number of lines recorded this frame.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Packs this frame's circles for instanced rendering.
    #[must_use]
    pub fn circle_instances(&self) -> Vec<CircleInstance> {
        self.commands
            .iter()
            .filter_map(|command| match *command {
                DrawCommand::Circle {
                    x,
                    y,
                    radius,
                    color,
                    glow,
                } => Some(CircleInstance {
                    center: [x, y],
                    radius_blur: [radius, glow.map_or(0.0, |g| g.blur)],
                    color: color.to_array(),
                    glow_color: glow.map_or(Color::TRANSPARENT, |g| g.color).to_array(),
                }),
                _ => None,
            })
            .collect()
    }
}

impl Default for FrameRecorder {
    fn default() -> Self {
        Self::new()
    }
}
