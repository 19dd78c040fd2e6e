use super::*;

use crate::drawing::entry::{CircleProps, SpotlightProps};
use crate::foundation::core::Point;

fn two_entries() -> Vec<DrawingEntry> {
    vec![
        DrawingEntry::Circle(CircleProps {
            center: Point::new(100.0, 80.0),
            radius: 60.0,
            outer_color: "#FF3C00".to_string(),
            inner_color: "#FFD700".to_string(),
            glow_radius: 20.0,
            tilt_deg: 30.0,
            scale: 1.5,
        }),
        DrawingEntry::Spotlight(SpotlightProps::new(Point::new(40.0, 40.0), 90.0, 0.8, 0.6)),
    ]
}

#[test]
fn duration_snaps_and_clamps() {
    assert_eq!(snap_duration(3.0), 3.0);
    assert_eq!(snap_duration(3.2), 3.0);
    assert_eq!(snap_duration(3.3), 3.5);
    assert_eq!(snap_duration(0.0), 2.0);
    assert_eq!(snap_duration(9.0), 5.0);
    assert_eq!(snap_duration(f64::NAN), DURATION_DEFAULT_S);
}

#[test]
fn primary_type_falls_back_to_mixed() {
    assert_eq!(primary_type(None), "mixed");
    assert_eq!(primary_type(Some(ToolKind::Polygon)), "polygon");
}

#[test]
fn draft_defaults_match_a_fresh_editor() {
    let d = AnnotationDraft::default();
    assert_eq!(d.video_name, UNTITLED_VIDEO);
    assert!(d.fade_in && d.fade_out);
    assert_eq!(d.duration, 3.0);
    assert_eq!(d.color, "#FF3C00");
}

#[test]
fn empty_draft_is_rejected() {
    let err = AnnotationDraft::default().validate().unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn out_of_range_duration_is_rejected() {
    let mut d = AnnotationDraft {
        drawings: two_entries(),
        ..AnnotationDraft::default()
    };
    assert!(d.validate().is_ok());
    d.duration = 7.0;
    assert!(matches!(d.validate(), Err(FramemarkError::Validation(_))));
    d.duration = 3.0;
    d.timestamp = -1.0;
    assert!(matches!(d.validate(), Err(FramemarkError::Validation(_))));
}

#[test]
fn draft_snapshot_is_independent_of_the_model() {
    let mut model = DrawingModel::from_entries(two_entries());
    let draft = AnnotationDraft::from_model(&model);
    model.clear();
    assert_eq!(draft.drawings.len(), 2);
}

#[test]
fn document_round_trip_preserves_drawings_in_order() {
    let now = Utc::now();
    let doc = AnnotationDraft {
        video_name: "match.mp4".to_string(),
        timestamp: 12.5,
        drawings: two_entries(),
        ..AnnotationDraft::default()
    }
    .into_document(now);

    let json = doc.to_json_pretty().unwrap();
    let back = AnnotationDocument::from_json(&json).unwrap();
    assert_eq!(back, doc);
    assert_eq!(back.to_model().entries(), two_entries().as_slice());
}

#[test]
fn document_json_uses_stored_field_names() {
    let doc = AnnotationDraft {
        drawings: two_entries(),
        ..AnnotationDraft::default()
    }
    .into_document(Utc::now());
    let v: serde_json::Value = serde_json::to_value(&doc).unwrap();
    assert_eq!(v["type"], "mixed");
    assert_eq!(v["fade_in"], true);
    assert_eq!(v["drawings"][0]["tool"], "circle");
    assert!(v.get("primary_type").is_none());
}

#[test]
fn apply_keeps_identity_and_creation_time() {
    let created = Utc::now();
    let mut doc = AnnotationDraft {
        drawings: two_entries(),
        ..AnnotationDraft::default()
    }
    .into_document(created);
    let id = doc.id;

    let later = created + chrono::Duration::seconds(5);
    let mut draft = AnnotationDraft::from_model(&doc.to_model());
    draft.drawings.pop();
    draft.fade_out = false;
    doc.apply(draft, later);

    assert_eq!(doc.id, id);
    assert_eq!(doc.created_at, created);
    assert_eq!(doc.updated_at, later);
    assert_eq!(doc.drawings.len(), 1);
    assert!(!doc.fade_out);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = AnnotationDocument::from_json("{ not json").unwrap_err();
    assert!(matches!(err, FramemarkError::Serde(_)));
}
