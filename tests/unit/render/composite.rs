use super::*;

fn blend_px(dst: [u8; 4], src: [u8; 4], opacity: f32) -> [u8; 4] {
    let mut out = dst.to_vec();
    blend_layer(&mut out, &src, opacity).unwrap();
    [out[0], out[1], out[2], out[3]]
}

#[test]
fn zero_opacity_layer_leaves_frame_alone() {
    assert_eq!(blend_px([1, 2, 3, 4], [200, 200, 200, 200], 0.0), [1, 2, 3, 4]);
}

#[test]
fn transparent_layer_pixel_leaves_frame_alone() {
    assert_eq!(blend_px([10, 20, 30, 40], [255, 255, 255, 0], 1.0), [10, 20, 30, 40]);
}

#[test]
fn opaque_layer_pixel_replaces_frame() {
    assert_eq!(blend_px([0, 0, 0, 255], [255, 0, 0, 255], 1.0), [255, 0, 0, 255]);
}

#[test]
fn half_opacity_mixes_evenly() {
    assert_eq!(
        blend_px([0, 0, 0, 255], [255, 255, 255, 255], 0.5),
        [128, 128, 128, 255]
    );
}

#[test]
fn blend_rejects_mismatched_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(blend_layer(&mut dst, &[0u8; 4], 1.0).is_err());
}

#[test]
fn shade_coverage_applies_paint_by_position() {
    let canvas = Canvas::new(2, 1);
    let mut layer = vec![0, 0, 0, 255, 0, 0, 0, 0];
    shade_coverage(&mut layer, canvas, |x, _| {
        if x == 0 {
            Rgba8Premul::from_straight_rgba(255, 0, 0, 255)
        } else {
            Rgba8Premul::from_straight_rgba(0, 255, 0, 255)
        }
    });
    assert_eq!(layer, vec![255, 0, 0, 255, 0, 0, 0, 0]);
}

#[test]
fn shadow_visibility_rules() {
    let color = Rgba8Premul::from_straight_rgba(128, 128, 128, 255);
    let s = |offset_y, blur| ShadowSpec {
        color,
        offset_y,
        blur,
    };
    assert!(!s(0.0, 0.0).is_visible());
    assert!(s(3.0, 0.0).is_visible());
    assert!(s(0.0, 2.0).is_visible());
    assert!(
        !ShadowSpec {
            color: Rgba8Premul::transparent(),
            offset_y: 4.0,
            blur: 4.0
        }
        .is_visible()
    );
}

#[test]
fn hard_shadow_is_shifted_silhouette() {
    let canvas = Canvas::new(3, 3);
    let mut layer = vec![0u8; canvas.byte_len()];
    layer[16..20].copy_from_slice(&[255, 255, 255, 255]);
    let shadow = ShadowSpec {
        color: Rgba8Premul::from_straight_rgba(0, 0, 255, 255),
        offset_y: 1.0,
        blur: 0.0,
    };
    let out = cast_shadow(&layer, canvas, &shadow).unwrap();
    assert_eq!(&out[28..32], &[0, 0, 255, 255]);
    assert_eq!(out.chunks_exact(4).filter(|px| px[3] != 0).count(), 1);
}

#[test]
fn blurred_shadow_spreads_beyond_silhouette() {
    let canvas = Canvas::new(15, 15);
    let mut layer = vec![0u8; canvas.byte_len()];
    let center = (7 * 15 + 7) * 4;
    layer[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);
    let shadow = ShadowSpec {
        color: Rgba8Premul::from_straight_rgba(255, 255, 255, 255),
        offset_y: 0.0,
        blur: 2.0,
    };
    let out = cast_shadow(&layer, canvas, &shadow).unwrap();
    assert!(out.chunks_exact(4).filter(|px| px[3] != 0).count() > 1);
    assert_eq!(out[3], 0);
}

#[test]
fn oversized_blur_and_offset_stay_within_the_canvas() {
    let canvas = Canvas::new(9, 7);
    let mut layer = vec![0u8; canvas.byte_len()];
    let center = (3 * 9 + 4) * 4;
    layer[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);
    let white = Rgba8Premul::from_straight_rgba(255, 255, 255, 255);

    let spread = cast_shadow(
        &layer,
        canvas,
        &ShadowSpec {
            color: white,
            offset_y: 0.0,
            blur: 1e10,
        },
    )
    .unwrap();
    assert_eq!(spread.len(), canvas.byte_len());
    assert!(spread.chunks_exact(4).filter(|px| px[3] != 0).count() > 1);

    let gone = cast_shadow(
        &layer,
        canvas,
        &ShadowSpec {
            color: white,
            offset_y: -1e30,
            blur: 0.0,
        },
    )
    .unwrap();
    assert!(gone.iter().all(|&b| b == 0));
}
