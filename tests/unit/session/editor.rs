use std::time::Duration;

use uuid::Uuid;

use super::*;

use crate::document::store::MemoryStore;
use crate::foundation::core::Point;
use crate::render::compositor::render_full;

fn click(x: f64, y: f64, ms: u64) -> PointerEvent {
    PointerEvent::Click {
        at: Point::new(x, y),
        time: Duration::from_millis(ms),
    }
}

fn session_with_frame() -> AnnotationSession {
    let mut s = AnnotationSession::new("match.mp4", 42.5);
    s.set_base(BaseRaster::solid(96, 64, Rgba8::opaque(10, 60, 20)))
        .unwrap();
    s
}

/// Store that rejects every write.
struct OfflineStore;

impl AnnotationStore for OfflineStore {
    fn create(&mut self, _draft: AnnotationDraft) -> FramemarkResult<AnnotationDocument> {
        Err(FramemarkError::store("offline"))
    }
    fn update(&mut self, _id: Uuid, _draft: AnnotationDraft) -> FramemarkResult<AnnotationDocument> {
        Err(FramemarkError::store("offline"))
    }
    fn delete(&mut self, _id: Uuid) -> FramemarkResult<()> {
        Err(FramemarkError::store("offline"))
    }
    fn get(&self, _id: Uuid) -> FramemarkResult<Option<AnnotationDocument>> {
        Ok(None)
    }
    fn list_for_video(&self, _video_name: &str) -> FramemarkResult<Vec<AnnotationDocument>> {
        Ok(Vec::new())
    }
}

#[test]
fn blank_session_defaults() {
    let s = AnnotationSession::new("", 0.0);
    let draft = s.draft().unwrap();
    assert_eq!(draft.video_name, UNTITLED_VIDEO);
    assert_eq!(draft.primary_type, "mixed");
    assert_eq!(draft.color, "#FF3C00");
    assert!(s.fade_in() && s.fade_out());
    assert_eq!(s.duration(), 3.0);
    assert!(draft.thumbnail.is_none());
}

#[test]
fn pointer_without_tool_is_ignored() {
    let mut s = session_with_frame();
    assert_eq!(s.pointer(click(10.0, 10.0, 0)).unwrap(), ToolOutcome::Ignored);
    assert!(s.model().is_empty());
}

#[test]
fn selected_tool_starts_with_the_current_preset() {
    let mut s = session_with_frame();
    s.select_preset("#00FF00");
    s.select_tool(Some(ToolKind::Arrow)).unwrap();
    let Some(ActiveTool::Arrow(arrow)) = s.tool() else {
        panic!("arrow expected");
    };
    assert_eq!(arrow.color.text(), "#00FF00");

    s.select_preset("#0066FF");
    let Some(ActiveTool::Arrow(arrow)) = s.tool() else {
        panic!("arrow expected");
    };
    assert_eq!(arrow.color.text(), "#0066FF");
}

#[test]
fn custom_mode_leaves_tool_colors_alone() {
    let mut s = session_with_frame();
    s.clear_preset();
    s.select_tool(Some(ToolKind::Circle)).unwrap();
    let Some(ActiveTool::Circle(circle)) = s.tool() else {
        panic!("circle expected");
    };
    assert_eq!(circle.outer_color.text(), "#FF3C00");
    assert_eq!(s.draft().unwrap().color, "#FF3C00");
}

#[test]
fn custom_color_entry_is_strict() {
    let mut s = session_with_frame();
    assert!(!s.enter_custom_color("blue"));
    assert!(!s.enter_custom_color("#12345"));
    assert_eq!(s.preset(), Some("#FF3C00"));
    assert!(s.enter_custom_color("#0066ff"));
    assert_eq!(s.preset(), Some("#0066ff"));
}

#[test]
fn duration_is_snapped() {
    let mut s = session_with_frame();
    s.set_duration(4.3);
    assert_eq!(s.duration(), 4.5);
    s.set_duration(1.0);
    assert_eq!(s.duration(), 2.0);
}

#[test]
fn undo_and_clear_redraw_the_committed_scene() {
    let mut s = session_with_frame();
    let base = s.frame().unwrap().clone();
    s.select_tool(Some(ToolKind::Circle)).unwrap();
    s.pointer(click(40.0, 30.0, 0)).unwrap();
    s.pointer(click(60.0, 30.0, 500)).unwrap();
    assert_eq!(s.model().len(), 2);
    assert_ne!(s.frame().unwrap().digest(), base.digest());

    s.undo().unwrap();
    assert_eq!(s.model().len(), 1);
    s.clear().unwrap();
    assert!(s.model().is_empty());
    assert_eq!(s.frame().unwrap().data, base.data);
}

#[test]
fn save_requires_a_drawing() {
    let mut s = session_with_frame();
    let mut store = MemoryStore::new();
    let err = s.save(&mut store).unwrap_err();
    assert!(matches!(err, FramemarkError::Validation(_)));
    assert!(store.is_empty());
}

#[test]
fn save_creates_then_updates_the_same_document() {
    let mut s = session_with_frame();
    let mut store = MemoryStore::new();
    s.select_tool(Some(ToolKind::Spotlight)).unwrap();
    s.pointer(click(20.0, 20.0, 0)).unwrap();

    let created = s.save(&mut store).unwrap();
    assert_eq!(created.primary_type, "spotlight");
    assert_eq!(created.timestamp, 42.5);
    assert!(created.thumbnail.as_deref().unwrap().starts_with("data:image/jpeg;base64,"));
    assert_eq!(s.editing().unwrap().id, created.id);

    s.pointer(click(70.0, 40.0, 900)).unwrap();
    let updated = s.save(&mut store).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.drawings.len(), 2);
    assert_eq!(store.len(), 1);
}

#[test]
fn failed_save_changes_nothing() {
    let mut s = session_with_frame();
    s.select_tool(Some(ToolKind::Circle)).unwrap();
    s.pointer(click(40.0, 30.0, 0)).unwrap();
    let before = s.model().clone();

    assert!(s.save(&mut OfflineStore).is_err());
    assert!(s.editing().is_none());
    assert_eq!(s.model(), &before);

    let mut store = MemoryStore::new();
    assert!(s.save(&mut store).is_ok());
}

#[test]
fn edit_reopens_a_document_for_update() {
    let mut store = MemoryStore::new();
    let mut first = session_with_frame();
    first.select_tool(Some(ToolKind::Circle)).unwrap();
    first.pointer(click(30.0, 30.0, 0)).unwrap();
    first.pointer(click(60.0, 30.0, 500)).unwrap();
    first.set_fade_out(false);
    first.select_preset("#FFFFFF");
    let doc = first.save(&mut store).unwrap();

    let mut second = AnnotationSession::edit(doc.clone());
    second
        .set_base(BaseRaster::solid(96, 64, Rgba8::opaque(10, 60, 20)))
        .unwrap();
    assert_eq!(second.model().entries(), doc.drawings.as_slice());
    assert!(!second.fade_out());
    assert_eq!(second.preset(), Some("#FFFFFF"));
    assert_eq!(second.frame().unwrap().data, first.frame().unwrap().data);
    assert_eq!(
        second.frame().unwrap().digest(),
        render_full(
            &BaseRaster::solid(96, 64, Rgba8::opaque(10, 60, 20)),
            &doc.drawings
        )
        .unwrap()
        .digest()
    );

    second.undo().unwrap();
    let saved = second.save(&mut store).unwrap();
    assert_eq!(saved.id, doc.id);
    assert_eq!(saved.drawings.len(), 1);
    assert_eq!(saved.primary_type, "mixed");
}
