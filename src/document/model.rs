use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::drawing::color::DEFAULT_PRESET;
use crate::drawing::entry::{DrawingEntry, ToolKind};
use crate::drawing::model::DrawingModel;
use crate::foundation::error::{FramemarkError, FramemarkResult};

/// Video name recorded when the caller has none.
pub const UNTITLED_VIDEO: &str = "Untitled Video";
/// Primary type of a document saved with no active tool.
pub const MIXED_TYPE: &str = "mixed";

pub const DURATION_MIN_S: f64 = 2.0;
pub const DURATION_MAX_S: f64 = 5.0;
pub const DURATION_STEP_S: f64 = 0.5;
pub const DURATION_DEFAULT_S: f64 = 3.0;

/// Clamp a display duration into range and snap it to the step grid.
pub fn snap_duration(seconds: f64) -> f64 {
    if !seconds.is_finite() {
        return DURATION_DEFAULT_S;
    }
    let clamped = seconds.clamp(DURATION_MIN_S, DURATION_MAX_S);
    (clamped / DURATION_STEP_S).round() * DURATION_STEP_S
}

/// The `type` recorded for a save made while `active` was selected.
pub fn primary_type(active: Option<ToolKind>) -> String {
    active.map_or(MIXED_TYPE, ToolKind::as_str).to_string()
}

/// A persisted annotation: one frozen moment of a video with its drawings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnnotationDocument {
    pub id: Uuid,
    pub video_name: String,
    /// Seconds into the video where the frame was frozen.
    pub timestamp: f64,
    #[serde(rename = "type")]
    pub primary_type: String,
    pub drawings: Vec<DrawingEntry>,
    pub fade_in: bool,
    pub fade_out: bool,
    pub duration: f64,
    /// Representative color; a `#RRGGBB` string.
    pub color: String,
    /// `data:image/jpeg;base64,...`
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Document content as produced by an editing session, before the store assigns identity
/// and timestamps.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnnotationDraft {
    pub video_name: String,
    pub timestamp: f64,
    #[serde(rename = "type")]
    pub primary_type: String,
    pub drawings: Vec<DrawingEntry>,
    pub fade_in: bool,
    pub fade_out: bool,
    pub duration: f64,
    pub color: String,
    pub thumbnail: Option<String>,
}

impl Default for AnnotationDraft {
    fn default() -> Self {
        Self {
            video_name: UNTITLED_VIDEO.to_string(),
            timestamp: 0.0,
            primary_type: MIXED_TYPE.to_string(),
            drawings: Vec::new(),
            fade_in: true,
            fade_out: true,
            duration: DURATION_DEFAULT_S,
            color: DEFAULT_PRESET.to_string(),
            thumbnail: None,
        }
    }
}

impl AnnotationDraft {
    /// Capture the current log; later edits to `model` do not reach the draft.
    pub fn from_model(model: &DrawingModel) -> Self {
        Self {
            drawings: model.snapshot(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> FramemarkResult<()> {
        if self.drawings.is_empty() {
            return Err(FramemarkError::validation(
                "an annotation needs at least one drawing",
            ));
        }
        if !self.timestamp.is_finite() || self.timestamp < 0.0 {
            return Err(FramemarkError::validation(format!(
                "timestamp must be a non-negative number of seconds, got {}",
                self.timestamp
            )));
        }
        if !(DURATION_MIN_S..=DURATION_MAX_S).contains(&self.duration) {
            return Err(FramemarkError::validation(format!(
                "duration must be within {DURATION_MIN_S}..={DURATION_MAX_S} seconds, got {}",
                self.duration
            )));
        }
        Ok(())
    }

    /// A new document with a fresh id, created and updated `now`.
    pub fn into_document(self, now: DateTime<Utc>) -> AnnotationDocument {
        AnnotationDocument {
            id: Uuid::now_v7(),
            video_name: self.video_name,
            timestamp: self.timestamp,
            primary_type: self.primary_type,
            drawings: self.drawings,
            fade_in: self.fade_in,
            fade_out: self.fade_out,
            duration: self.duration,
            color: self.color,
            thumbnail: self.thumbnail,
            created_at: now,
            updated_at: now,
        }
    }
}

impl AnnotationDocument {
    /// Replace the content with `draft`, keeping identity and creation time.
    pub fn apply(&mut self, draft: AnnotationDraft, now: DateTime<Utc>) {
        self.video_name = draft.video_name;
        self.timestamp = draft.timestamp;
        self.primary_type = draft.primary_type;
        self.drawings = draft.drawings;
        self.fade_in = draft.fade_in;
        self.fade_out = draft.fade_out;
        self.duration = draft.duration;
        self.color = draft.color;
        self.thumbnail = draft.thumbnail;
        self.updated_at = now;
    }

    /// A fresh drawing log seeded from this document, in stored order.
    pub fn to_model(&self) -> DrawingModel {
        DrawingModel::from_entries(self.drawings.clone())
    }

    pub fn from_json(s: &str) -> FramemarkResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| FramemarkError::serde(format!("parse annotation JSON: {e}")))
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> FramemarkResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FramemarkError::serde(format!("parse annotation JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> FramemarkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FramemarkError::store(format!("open annotation JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> FramemarkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
