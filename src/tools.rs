//! Per-tool input state machines.
//!
//! A tool turns pointer events into ghosts and committed entries. Staging data (an arrow's
//! start point, a polygon's vertices) stays inside the tool until the commit that turns it
//! into a [`DrawingEntry`].

pub(crate) mod arrow;
pub(crate) mod circle;
pub(crate) mod polygon;
pub(crate) mod spotlight;

use std::time::Duration;

pub use arrow::{ArrowState, ArrowTool};
pub use circle::CircleTool;
pub use polygon::{FINALIZE_WINDOW, PolygonTool};
pub use spotlight::SpotlightTool;

use crate::drawing::entry::{DrawingEntry, ToolKind};
use crate::drawing::model::DrawingModel;
use crate::foundation::core::Point;
use crate::foundation::error::FramemarkResult;
use crate::render::compositor::Stage;
use crate::render::paint::Ghost;

/// Pointer input in frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move(Point),
    /// Primary click. `time` is a monotonic timestamp supplied by the caller.
    Click { at: Point, time: Duration },
    /// Secondary click (context menu); cancels staging where a tool has any.
    Secondary,
}

/// What a tool did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolOutcome {
    Ignored,
    Previewed,
    /// Staging data changed; nothing was committed.
    Staged,
    Committed,
    Cancelled,
}

/// The committed scene as seen by a tool: the drawing log plus the surface it renders to.
pub struct Workspace<'a> {
    model: &'a mut DrawingModel,
    stage: &'a mut Stage,
}

impl<'a> Workspace<'a> {
    pub fn new(model: &'a mut DrawingModel, stage: &'a mut Stage) -> Self {
        Self { model, stage }
    }

    pub fn entries(&self) -> &[DrawingEntry] {
        self.model.entries()
    }

    pub fn redraw(&mut self) -> FramemarkResult<()> {
        self.stage.redraw(self.model.entries())
    }

    pub fn preview(&mut self, ghost: &Ghost) -> FramemarkResult<()> {
        self.stage.preview(self.model.entries(), ghost)
    }

    /// Show the scene with `entry` added, then append it to the log.
    ///
    /// A failed redraw leaves the log untouched, so an `Err` always means nothing was
    /// committed.
    pub fn commit(&mut self, entry: DrawingEntry) -> FramemarkResult<()> {
        let mut next = self.model.entries().to_vec();
        next.push(entry);
        self.stage.redraw(&next)?;
        if let Some(entry) = next.pop() {
            self.model.append(entry);
        }
        Ok(())
    }
}

/// One tool's input state machine.
pub trait ToolSession {
    fn kind(&self) -> ToolKind;

    /// React to one pointer event. A commit that fails leaves the log and staging as they were.
    fn handle(
        &mut self,
        event: PointerEvent,
        ws: &mut Workspace<'_>,
    ) -> FramemarkResult<ToolOutcome>;

    /// Apply a palette color to whichever of this tool's colors follow the palette.
    fn apply_preset(&mut self, color: &str);

    /// Drop staging data without touching the log.
    fn reset(&mut self);
}

/// The tool currently receiving pointer input.
#[derive(Clone, Debug, PartialEq)]
pub enum ActiveTool {
    Circle(CircleTool),
    Arrow(ArrowTool),
    Polygon(PolygonTool),
    Spotlight(SpotlightTool),
}

impl ActiveTool {
    /// A tool of `kind` with default configuration.
    pub fn new(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Circle => Self::Circle(CircleTool::default()),
            ToolKind::Arrow => Self::Arrow(ArrowTool::default()),
            ToolKind::Polygon => Self::Polygon(PolygonTool::default()),
            ToolKind::Spotlight => Self::Spotlight(SpotlightTool::default()),
        }
    }

    fn session_mut(&mut self) -> &mut dyn ToolSession {
        match self {
            Self::Circle(t) => t,
            Self::Arrow(t) => t,
            Self::Polygon(t) => t,
            Self::Spotlight(t) => t,
        }
    }

    fn session(&self) -> &dyn ToolSession {
        match self {
            Self::Circle(t) => t,
            Self::Arrow(t) => t,
            Self::Polygon(t) => t,
            Self::Spotlight(t) => t,
        }
    }
}

impl ToolSession for ActiveTool {
    fn kind(&self) -> ToolKind {
        self.session().kind()
    }

    fn handle(
        &mut self,
        event: PointerEvent,
        ws: &mut Workspace<'_>,
    ) -> FramemarkResult<ToolOutcome> {
        self.session_mut().handle(event, ws)
    }

    fn apply_preset(&mut self, color: &str) {
        self.session_mut().apply_preset(color);
    }

    fn reset(&mut self) {
        self.session_mut().reset();
    }
}

#[cfg(test)]
#[path = "../tests/unit/tools/session.rs"]
mod tests;
