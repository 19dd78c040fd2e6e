use super::*;

use crate::drawing::color::Rgba8;
use crate::drawing::entry::{CircleProps, PolygonProps, SpotlightProps};
use crate::drawing::model::DrawingModel;
use crate::foundation::core::Point;

fn base() -> BaseRaster {
    BaseRaster::solid(120, 90, Rgba8::opaque(20, 40, 60))
}

fn circle_at(x: f64, y: f64, color: &str) -> DrawingEntry {
    DrawingEntry::Circle(CircleProps {
        center: Point::new(x, y),
        radius: 30.0,
        outer_color: color.to_string(),
        inner_color: "#FFD700".to_string(),
        glow_radius: 0.0,
        tilt_deg: 0.0,
        scale: 1.0,
    })
}

fn block(color: &str) -> DrawingEntry {
    DrawingEntry::Polygon(PolygonProps {
        vertices: vec![
            Point::new(20.0, 20.0),
            Point::new(100.0, 20.0),
            Point::new(100.0, 70.0),
            Point::new(20.0, 70.0),
        ],
        border_color: color.to_string(),
        border_thickness: 3.0,
        dashed: false,
        fill_color: color.to_string(),
        fill_opacity_percent: 100.0,
        marker_radius: 6.0,
    })
}

#[test]
fn empty_log_renders_the_base() {
    let b = base();
    let frame = render_full(&b, &[]).unwrap();
    assert_eq!(frame.data, b.rgba8_premul.as_ref().clone());
    assert!(frame.premultiplied);
}

#[test]
fn render_is_deterministic() {
    let entries = vec![
        circle_at(60.0, 45.0, "#FF3C00"),
        DrawingEntry::Spotlight(SpotlightProps::new(Point::new(40.0, 40.0), 30.0, 0.8, 0.6)),
    ];
    let a = render_full(&base(), &entries).unwrap();
    let b = render_full(&base(), &entries).unwrap();
    assert_eq!(a.digest(), b.digest());
    assert_eq!(a.data, b.data);
}

#[test]
fn later_entries_paint_over_earlier_ones() {
    let red_then_blue = render_full(&base(), &[block("#FF0000"), block("#0000FF")]).unwrap();
    let blue_then_red = render_full(&base(), &[block("#0000FF"), block("#FF0000")]).unwrap();
    assert_eq!(red_then_blue.pixel(60, 45).unwrap(), [0, 0, 255, 255]);
    assert_eq!(blue_then_red.pixel(60, 45).unwrap(), [255, 0, 0, 255]);
}

#[test]
fn undo_restores_the_previous_render() {
    let mut model = DrawingModel::new();
    model.append(circle_at(50.0, 40.0, "#FF3C00"));
    let before = render_full(&base(), model.entries()).unwrap();

    model.append(block("#00FF00"));
    let after = render_full(&base(), model.entries()).unwrap();
    assert_ne!(before.digest(), after.digest());

    model.undo_last();
    let undone = render_full(&base(), model.entries()).unwrap();
    assert_eq!(undone.data, before.data);
}

#[test]
fn stage_without_base_ignores_redraws() {
    let mut stage = Stage::new();
    stage.redraw(&[block("#FF0000")]).unwrap();
    stage
        .preview(&[], &Ghost::Entry(block("#FF0000")))
        .unwrap();
    assert!(stage.frame().is_none());
}

#[test]
fn preview_paints_ghost_without_touching_entries() {
    let entries = vec![circle_at(60.0, 45.0, "#FF3C00")];
    let mut stage = Stage::with_base(base());

    stage.redraw(&entries).unwrap();
    let committed = stage.frame().unwrap().clone();

    stage
        .preview(&entries, &Ghost::Entry(block("#FFFFFF")))
        .unwrap();
    let ghosted = stage.frame().unwrap().clone();
    assert_ne!(ghosted.digest(), committed.digest());
    // White at half strength over (20,40,60).
    let px = ghosted.pixel(60, 45).unwrap();
    assert!(px[0].abs_diff(138) <= 2, "{px:?}");

    stage.redraw(&entries).unwrap();
    assert_eq!(stage.frame().unwrap().data, committed.data);
}

#[test]
fn set_base_blanks_until_redraw() {
    let mut stage = Stage::with_base(base());
    stage.redraw(&[]).unwrap();
    assert!(stage.frame().is_some());

    stage.set_base(BaseRaster::solid(10, 10, Rgba8::WHITE));
    assert!(stage.frame().is_none());
    stage.redraw(&[]).unwrap();
    assert_eq!(stage.frame().unwrap().width, 10);
}
