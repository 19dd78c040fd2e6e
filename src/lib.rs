//! Framemark draws vector annotations over a frozen video frame.
//!
//! The engine is built from a few small pieces:
//!
//! - A [`DrawingModel`]: the ordered, append-only log of committed shapes
//! - [`render_full`]: deterministic compositing of a [`BaseRaster`] and that log
//! - One [`ToolSession`] state machine per tool, previewing through a [`Stage`]
//! - [`AnnotationDocument`] and an [`AnnotationStore`] for persistence
//!
//! [`AnnotationSession`] ties them together for a single editing pass.
#![forbid(unsafe_code)]

mod document;
mod drawing;
mod foundation;
mod render;
mod session;
mod tools;

pub use crate::foundation::config::Settings;
pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rgba8Premul, Vec2};
pub use crate::foundation::error::{FramemarkError, FramemarkResult};

pub use crate::drawing::color::{ColorField, DEFAULT_PRESET, PRESET_COLORS, Rgba8};
pub use crate::drawing::entry::{
    ARROW_HEAD_SAMPLE_T, ArrowProps, ArrowShadow, CircleProps, DrawingEntry, Particle,
    PolygonProps, SPOTLIGHT_PARTICLES, SpotlightProps, ToolKind, particle_ring,
};
pub use crate::drawing::model::DrawingModel;

pub use crate::render::compositor::{GHOST_OPACITY, Stage, paint_ghost, render_full};
pub use crate::render::paint::Ghost;
pub use crate::render::raster::{BaseRaster, FrameRGBA};

pub use crate::tools::{
    ActiveTool, ArrowState, ArrowTool, CircleTool, FINALIZE_WINDOW, PointerEvent, PolygonTool,
    SpotlightTool, ToolOutcome, ToolSession, Workspace,
};

pub use crate::document::model::{
    AnnotationDocument, AnnotationDraft, DURATION_DEFAULT_S, DURATION_MAX_S, DURATION_MIN_S,
    DURATION_STEP_S, MIXED_TYPE, UNTITLED_VIDEO, primary_type, snap_duration,
};
pub use crate::document::store::{AnnotationStore, JsonDirStore, MemoryStore};
pub use crate::document::thumbnail::{jpeg_data_url, thumbnail_for};

pub use crate::session::editor::AnnotationSession;
pub use crate::session::listing::{AnnotationIndex, format_time, marker_position};
