use crate::drawing::color::{ColorField, DEFAULT_PRESET};
use crate::drawing::entry::{CircleProps, DrawingEntry, ToolKind};
use crate::foundation::core::Point;
use crate::foundation::error::FramemarkResult;
use crate::render::paint::Ghost;
use crate::tools::{PointerEvent, ToolOutcome, ToolSession, Workspace};

/// Stateless ring tool: every move previews, every click commits.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleTool {
    pub outer_color: ColorField,
    pub inner_color: ColorField,
    radius: f64,
    glow_radius: f64,
    tilt_deg: f64,
    scale: f64,
}

impl Default for CircleTool {
    fn default() -> Self {
        Self {
            outer_color: ColorField::new(DEFAULT_PRESET),
            inner_color: ColorField::new("#FFD700"),
            radius: 80.0,
            glow_radius: 20.0,
            tilt_deg: 0.0,
            scale: 1.0,
        }
    }
}

impl CircleTool {
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, v: f64) {
        self.radius = v.clamp(30.0, 150.0);
    }

    pub fn glow_radius(&self) -> f64 {
        self.glow_radius
    }

    pub fn set_glow_radius(&mut self, v: f64) {
        self.glow_radius = v.clamp(0.0, 50.0);
    }

    pub fn tilt_deg(&self) -> f64 {
        self.tilt_deg
    }

    pub fn set_tilt_deg(&mut self, v: f64) {
        self.tilt_deg = v.clamp(-90.0, 90.0);
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, v: f64) {
        self.scale = v.clamp(0.5, 2.0);
    }

    /// The entry a click at `center` would commit.
    pub fn entry_at(&self, center: Point) -> CircleProps {
        CircleProps {
            center,
            radius: self.radius,
            outer_color: self.outer_color.text().to_string(),
            inner_color: self.inner_color.text().to_string(),
            glow_radius: self.glow_radius,
            tilt_deg: self.tilt_deg,
            scale: self.scale,
        }
    }
}

impl ToolSession for CircleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Circle
    }

    fn handle(
        &mut self,
        event: PointerEvent,
        ws: &mut Workspace<'_>,
    ) -> FramemarkResult<ToolOutcome> {
        match event {
            PointerEvent::Move(p) => {
                ws.preview(&Ghost::Entry(DrawingEntry::Circle(self.entry_at(p))))?;
                Ok(ToolOutcome::Previewed)
            }
            PointerEvent::Click { at, .. } => {
                ws.commit(DrawingEntry::Circle(self.entry_at(at)))?;
                Ok(ToolOutcome::Committed)
            }
            PointerEvent::Secondary => Ok(ToolOutcome::Ignored),
        }
    }

    fn apply_preset(&mut self, color: &str) {
        self.outer_color.set_text(color);
    }

    fn reset(&mut self) {}
}
