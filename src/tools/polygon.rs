use std::time::Duration;

use crate::drawing::color::{ColorField, DEFAULT_PRESET};
use crate::drawing::entry::{DrawingEntry, PolygonProps, ToolKind};
use crate::foundation::core::Point;
use crate::foundation::error::FramemarkResult;
use crate::render::paint::Ghost;
use crate::tools::{PointerEvent, ToolOutcome, ToolSession, Workspace};

/// Two clicks closer together than this finish the polygon.
pub const FINALIZE_WINDOW: Duration = Duration::from_millis(200);

const MIN_VERTICES: usize = 3;

/// Click-to-place polygon, finished by a quick second click.
///
/// A finishing click neither adds a vertex nor becomes the new "previous click": the
/// window is always measured from the last click that placed a vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonTool {
    pub border_color: ColorField,
    pub fill_color: ColorField,
    border_thickness: f64,
    dashed: bool,
    fill_opacity_percent: f64,
    marker_radius: f64,
    staged: Vec<Point>,
    last_click: Option<Duration>,
}

impl Default for PolygonTool {
    fn default() -> Self {
        Self {
            border_color: ColorField::new(DEFAULT_PRESET),
            fill_color: ColorField::new(DEFAULT_PRESET),
            border_thickness: 3.0,
            dashed: false,
            fill_opacity_percent: 30.0,
            marker_radius: 6.0,
            staged: Vec::new(),
            last_click: None,
        }
    }
}

impl PolygonTool {
    pub fn staged(&self) -> &[Point] {
        &self.staged
    }

    pub fn border_thickness(&self) -> f64 {
        self.border_thickness
    }

    pub fn set_border_thickness(&mut self, v: f64) {
        self.border_thickness = v.clamp(1.0, 10.0);
    }

    pub fn dashed(&self) -> bool {
        self.dashed
    }

    pub fn set_dashed(&mut self, on: bool) {
        self.dashed = on;
    }

    pub fn fill_opacity_percent(&self) -> f64 {
        self.fill_opacity_percent
    }

    pub fn set_fill_opacity_percent(&mut self, v: f64) {
        self.fill_opacity_percent = v.clamp(0.0, 100.0);
    }

    pub fn marker_radius(&self) -> f64 {
        self.marker_radius
    }

    pub fn set_marker_radius(&mut self, v: f64) {
        self.marker_radius = v.clamp(3.0, 10.0);
    }

    fn style(&self, vertices: Vec<Point>) -> PolygonProps {
        PolygonProps {
            vertices,
            border_color: self.border_color.text().to_string(),
            border_thickness: self.border_thickness,
            dashed: self.dashed,
            fill_color: self.fill_color.text().to_string(),
            fill_opacity_percent: self.fill_opacity_percent,
            marker_radius: self.marker_radius,
        }
    }

    /// Commit the staged vertices. Fewer than three is a silent no-op.
    pub fn finish(&mut self, ws: &mut Workspace<'_>) -> FramemarkResult<ToolOutcome> {
        if self.staged.len() < MIN_VERTICES {
            return Ok(ToolOutcome::Ignored);
        }
        ws.commit(DrawingEntry::Polygon(self.style(self.staged.clone())))?;
        self.staged.clear();
        Ok(ToolOutcome::Committed)
    }

    fn is_finishing_click(&self, time: Duration) -> bool {
        match self.last_click {
            Some(last) => {
                time.saturating_sub(last) < FINALIZE_WINDOW && self.staged.len() >= MIN_VERTICES
            }
            None => false,
        }
    }
}

impl ToolSession for PolygonTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Polygon
    }

    fn handle(
        &mut self,
        event: PointerEvent,
        ws: &mut Workspace<'_>,
    ) -> FramemarkResult<ToolOutcome> {
        match event {
            PointerEvent::Click { at, time } => {
                if self.is_finishing_click(time) {
                    return self.finish(ws);
                }
                self.staged.push(at);
                self.last_click = Some(time);
                Ok(ToolOutcome::Staged)
            }
            PointerEvent::Move(cursor) => {
                if self.staged.is_empty() {
                    return Ok(ToolOutcome::Ignored);
                }
                let ghost = Ghost::PolygonOutline {
                    style: self.style(self.staged.clone()),
                    cursor,
                };
                ws.preview(&ghost)?;
                Ok(ToolOutcome::Previewed)
            }
            PointerEvent::Secondary => {
                self.staged.clear();
                ws.redraw()?;
                Ok(ToolOutcome::Cancelled)
            }
        }
    }

    fn apply_preset(&mut self, color: &str) {
        self.border_color.set_text(color);
        self.fill_color.set_text(color);
    }

    fn reset(&mut self) {
        self.staged.clear();
        self.last_click = None;
    }
}
