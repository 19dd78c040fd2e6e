use crate::drawing::entry::{DrawingEntry, SpotlightProps, ToolKind};
use crate::foundation::core::Point;
use crate::foundation::error::FramemarkResult;
use crate::render::paint::Ghost;
use crate::tools::{PointerEvent, ToolOutcome, ToolSession, Workspace};

/// Stateless highlight tool. Particle positions are laid out when the entry is built and
/// travel with it from then on.
#[derive(Clone, Debug, PartialEq)]
pub struct SpotlightTool {
    beam_radius: f64,
    intensity: f64,
    depth_squash: f64,
}

impl Default for SpotlightTool {
    fn default() -> Self {
        Self {
            beam_radius: 90.0,
            intensity: 0.8,
            depth_squash: 0.6,
        }
    }
}

impl SpotlightTool {
    pub fn beam_radius(&self) -> f64 {
        self.beam_radius
    }

    pub fn set_beam_radius(&mut self, v: f64) {
        self.beam_radius = v.clamp(30.0, 150.0);
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn set_intensity(&mut self, v: f64) {
        self.intensity = v.clamp(0.1, 1.0);
    }

    pub fn depth_squash(&self) -> f64 {
        self.depth_squash
    }

    pub fn set_depth_squash(&mut self, v: f64) {
        self.depth_squash = v.clamp(0.2, 1.0);
    }

    pub fn entry_at(&self, center: Point) -> SpotlightProps {
        SpotlightProps::new(center, self.beam_radius, self.intensity, self.depth_squash)
    }
}

impl ToolSession for SpotlightTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Spotlight
    }

    fn handle(
        &mut self,
        event: PointerEvent,
        ws: &mut Workspace<'_>,
    ) -> FramemarkResult<ToolOutcome> {
        match event {
            PointerEvent::Move(p) => {
                ws.preview(&Ghost::Entry(DrawingEntry::Spotlight(self.entry_at(p))))?;
                Ok(ToolOutcome::Previewed)
            }
            PointerEvent::Click { at, .. } => {
                ws.commit(DrawingEntry::Spotlight(self.entry_at(at)))?;
                Ok(ToolOutcome::Committed)
            }
            PointerEvent::Secondary => Ok(ToolOutcome::Ignored),
        }
    }

    fn apply_preset(&mut self, _color: &str) {}

    fn reset(&mut self) {}
}
