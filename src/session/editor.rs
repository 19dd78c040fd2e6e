use crate::document::model::{
    AnnotationDocument, AnnotationDraft, DURATION_DEFAULT_S, UNTITLED_VIDEO, primary_type,
    snap_duration,
};
use crate::document::store::AnnotationStore;
use crate::document::thumbnail::thumbnail_for;
use crate::drawing::color::{DEFAULT_PRESET, Rgba8};
use crate::drawing::entry::ToolKind;
use crate::drawing::model::DrawingModel;
use crate::foundation::config::Settings;
use crate::foundation::error::{FramemarkError, FramemarkResult};
use crate::render::compositor::Stage;
use crate::render::raster::{BaseRaster, FrameRGBA};
use crate::tools::{ActiveTool, PointerEvent, ToolOutcome, ToolSession, Workspace};

/// One editing pass over a frozen frame.
///
/// Owns the drawing log, the display surface and the active tool, plus the metadata that
/// ends up in the saved document.
#[derive(Clone, Debug)]
pub struct AnnotationSession {
    model: DrawingModel,
    stage: Stage,
    tool: Option<ActiveTool>,
    /// `None` while the palette is in custom mode: tools keep their own colors.
    preset: Option<String>,
    video_name: String,
    timestamp: f64,
    fade_in: bool,
    fade_out: bool,
    duration: f64,
    editing: Option<AnnotationDocument>,
    settings: Settings,
}

impl AnnotationSession {
    /// A blank session for the frame frozen at `timestamp` seconds into `video_name`.
    pub fn new(video_name: impl Into<String>, timestamp: f64) -> Self {
        let video_name = video_name.into();
        Self {
            model: DrawingModel::new(),
            stage: Stage::new(),
            tool: None,
            preset: Some(DEFAULT_PRESET.to_string()),
            video_name: if video_name.trim().is_empty() {
                UNTITLED_VIDEO.to_string()
            } else {
                video_name
            },
            timestamp,
            fade_in: true,
            fade_out: true,
            duration: DURATION_DEFAULT_S,
            editing: None,
            settings: Settings::default(),
        }
    }

    /// Reopen a stored document. Saving updates it in place.
    pub fn edit(doc: AnnotationDocument) -> Self {
        let mut session = Self::new(doc.video_name.clone(), doc.timestamp);
        session.model = doc.to_model();
        session.fade_in = doc.fade_in;
        session.fade_out = doc.fade_out;
        session.duration = snap_duration(doc.duration);
        if !doc.color.is_empty() {
            session.preset = Some(doc.color.clone());
        }
        session.editing = Some(doc);
        session
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Install the decoded frame and draw the committed scene on it.
    pub fn set_base(&mut self, base: BaseRaster) -> FramemarkResult<()> {
        self.stage.set_base(base);
        self.stage.redraw(self.model.entries())
    }

    pub fn model(&self) -> &DrawingModel {
        &self.model
    }

    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.stage.frame()
    }

    pub fn tool(&self) -> Option<&ActiveTool> {
        self.tool.as_ref()
    }

    /// The active tool, for adjusting its configuration.
    pub fn tool_mut(&mut self) -> Option<&mut ActiveTool> {
        self.tool.as_mut()
    }

    pub fn active_kind(&self) -> Option<ToolKind> {
        self.tool.as_ref().map(ToolSession::kind)
    }

    pub fn preset(&self) -> Option<&str> {
        self.preset.as_deref()
    }

    pub fn editing(&self) -> Option<&AnnotationDocument> {
        self.editing.as_ref()
    }

    pub fn fade_in(&self) -> bool {
        self.fade_in
    }

    pub fn fade_out(&self) -> bool {
        self.fade_out
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Switch tools. The new tool starts from its defaults with the current preset applied;
    /// whatever the previous tool had staged is dropped.
    pub fn select_tool(&mut self, kind: Option<ToolKind>) -> FramemarkResult<()> {
        self.tool = kind.map(|kind| {
            let mut tool = ActiveTool::new(kind);
            if let Some(color) = &self.preset {
                tool.apply_preset(color);
            }
            tool
        });
        tracing::debug!(tool = ?kind, "tool selected");
        self.stage.redraw(self.model.entries())
    }

    pub fn pointer(&mut self, event: PointerEvent) -> FramemarkResult<ToolOutcome> {
        let Some(tool) = self.tool.as_mut() else {
            return Ok(ToolOutcome::Ignored);
        };
        let mut ws = Workspace::new(&mut self.model, &mut self.stage);
        tool.handle(event, &mut ws)
    }

    pub fn undo(&mut self) -> FramemarkResult<()> {
        self.model.undo_last();
        self.stage.redraw(self.model.entries())
    }

    pub fn clear(&mut self) -> FramemarkResult<()> {
        self.model.clear();
        self.stage.redraw(self.model.entries())
    }

    /// Pick a palette color and push it into the active tool.
    pub fn select_preset(&mut self, color: &str) {
        self.preset = Some(color.to_string());
        if let Some(tool) = self.tool.as_mut() {
            tool.apply_preset(color);
        }
    }

    /// Custom palette mode: tools keep whatever colors they were given.
    pub fn clear_preset(&mut self) {
        self.preset = None;
    }

    /// Strict `#RRGGBB` palette entry. Anything else is ignored and `false` returned.
    pub fn enter_custom_color(&mut self, text: &str) -> bool {
        if Rgba8::parse_strict(text).is_none() {
            return false;
        }
        self.select_preset(text);
        true
    }

    pub fn set_fade_in(&mut self, on: bool) {
        self.fade_in = on;
    }

    pub fn set_fade_out(&mut self, on: bool) {
        self.fade_out = on;
    }

    pub fn set_duration(&mut self, seconds: f64) {
        self.duration = snap_duration(seconds);
    }

    /// The document content a save would write right now.
    pub fn draft(&self) -> FramemarkResult<AnnotationDraft> {
        let thumbnail = match self.stage.frame() {
            Some(frame) => Some(thumbnail_for(frame, &self.settings)?),
            None => None,
        };
        Ok(AnnotationDraft {
            video_name: self.video_name.clone(),
            timestamp: self.timestamp,
            primary_type: primary_type(self.active_kind()),
            drawings: self.model.snapshot(),
            fade_in: self.fade_in,
            fade_out: self.fade_out,
            duration: self.duration,
            color: self
                .preset
                .clone()
                .unwrap_or_else(|| DEFAULT_PRESET.to_string()),
            thumbnail,
        })
    }

    /// Create or update the document. On failure the session is left exactly as it was.
    #[tracing::instrument(skip_all, fields(video = %self.video_name, entries = self.model.len()))]
    pub fn save(&mut self, store: &mut dyn AnnotationStore) -> FramemarkResult<AnnotationDocument> {
        if self.model.is_empty() {
            return Err(FramemarkError::validation(
                "nothing to save: draw at least one shape",
            ));
        }
        let draft = self.draft()?;
        let result = match &self.editing {
            Some(doc) => store.update(doc.id, draft),
            None => store.create(draft),
        };
        match result {
            Ok(doc) => {
                tracing::info!(id = %doc.id, drawings = doc.drawings.len(), "annotation saved");
                self.editing = Some(doc.clone());
                Ok(doc)
            }
            Err(e) => {
                tracing::warn!(error = %e, "annotation save failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
