use crate::drawing::color::{ColorField, DEFAULT_PRESET};
use crate::drawing::entry::{ArrowProps, ArrowShadow, DrawingEntry, ToolKind};
use crate::foundation::core::Point;
use crate::foundation::error::FramemarkResult;
use crate::render::paint::Ghost;
use crate::tools::{PointerEvent, ToolOutcome, ToolSession, Workspace};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ArrowState {
    #[default]
    Idle,
    AwaitingEnd {
        start: Point,
    },
}

/// Two-click arrow: the first click anchors the tail, the second places the head.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowTool {
    pub color: ColorField,
    pub shadow_color: ColorField,
    thickness: f64,
    head_size: f64,
    dashed: bool,
    arc_height: f64,
    bend_enabled: bool,
    shadow_enabled: bool,
    shadow_offset_y: f64,
    shadow_blur: f64,
    state: ArrowState,
}

impl Default for ArrowTool {
    fn default() -> Self {
        Self {
            color: ColorField::new(DEFAULT_PRESET),
            shadow_color: ColorField::new("#808080"),
            thickness: 7.0,
            head_size: 20.0,
            dashed: false,
            arc_height: 50.0,
            bend_enabled: true,
            shadow_enabled: true,
            shadow_offset_y: 10.0,
            shadow_blur: 10.0,
            state: ArrowState::Idle,
        }
    }
}

impl ArrowTool {
    pub fn state(&self) -> ArrowState {
        self.state
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn set_thickness(&mut self, v: f64) {
        self.thickness = v.clamp(2.0, 30.0);
    }

    pub fn head_size(&self) -> f64 {
        self.head_size
    }

    pub fn set_head_size(&mut self, v: f64) {
        self.head_size = v.clamp(5.0, 40.0);
    }

    pub fn dashed(&self) -> bool {
        self.dashed
    }

    pub fn set_dashed(&mut self, on: bool) {
        self.dashed = on;
    }

    pub fn arc_height(&self) -> f64 {
        self.arc_height
    }

    pub fn set_arc_height(&mut self, v: f64) {
        self.arc_height = v.clamp(0.0, 100.0);
    }

    pub fn bend_enabled(&self) -> bool {
        self.bend_enabled
    }

    pub fn set_bend_enabled(&mut self, on: bool) {
        self.bend_enabled = on;
    }

    pub fn shadow_enabled(&self) -> bool {
        self.shadow_enabled
    }

    pub fn set_shadow_enabled(&mut self, on: bool) {
        self.shadow_enabled = on;
    }

    pub fn shadow_offset_y(&self) -> f64 {
        self.shadow_offset_y
    }

    pub fn set_shadow_offset_y(&mut self, v: f64) {
        self.shadow_offset_y = v.clamp(0.0, 50.0);
    }

    pub fn shadow_blur(&self) -> f64 {
        self.shadow_blur
    }

    pub fn set_shadow_blur(&mut self, v: f64) {
        self.shadow_blur = v.clamp(0.0, 20.0);
    }

    /// The entry for an arrow from `start` to `end` under the current configuration.
    pub fn entry_between(&self, start: Point, end: Point) -> ArrowProps {
        ArrowProps {
            start,
            end,
            color: self.color.text().to_string(),
            thickness: self.thickness,
            head_size: self.head_size,
            dashed: self.dashed,
            arc_height: if self.bend_enabled { self.arc_height } else { 0.0 },
            shadow: ArrowShadow {
                enabled: self.shadow_enabled,
                color: self.shadow_color.text().to_string(),
                offset_y: self.shadow_offset_y,
                blur: self.shadow_blur,
            },
        }
    }
}

impl ToolSession for ArrowTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Arrow
    }

    fn handle(
        &mut self,
        event: PointerEvent,
        ws: &mut Workspace<'_>,
    ) -> FramemarkResult<ToolOutcome> {
        match (self.state, event) {
            (ArrowState::Idle, PointerEvent::Click { at, .. }) => {
                self.state = ArrowState::AwaitingEnd { start: at };
                Ok(ToolOutcome::Staged)
            }
            (ArrowState::Idle, PointerEvent::Move(_)) => Ok(ToolOutcome::Ignored),
            (ArrowState::AwaitingEnd { start }, PointerEvent::Move(cursor)) => {
                let ghost = DrawingEntry::Arrow(self.entry_between(start, cursor));
                ws.preview(&Ghost::Entry(ghost))?;
                Ok(ToolOutcome::Previewed)
            }
            (ArrowState::AwaitingEnd { start }, PointerEvent::Click { at, .. }) => {
                ws.commit(DrawingEntry::Arrow(self.entry_between(start, at)))?;
                self.state = ArrowState::Idle;
                Ok(ToolOutcome::Committed)
            }
            (state, PointerEvent::Secondary) => {
                self.state = ArrowState::Idle;
                ws.redraw()?;
                Ok(match state {
                    ArrowState::Idle => ToolOutcome::Ignored,
                    ArrowState::AwaitingEnd { .. } => ToolOutcome::Cancelled,
                })
            }
        }
    }

    fn apply_preset(&mut self, color: &str) {
        self.color.set_text(color);
    }

    fn reset(&mut self) {
        self.state = ArrowState::Idle;
    }
}
