use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{FramemarkError, FramemarkResult};
use crate::foundation::math::{mul_div255_u8, unit_to_u8};
use crate::render::blur::ShadowKernel;

/// Source-over a premultiplied layer onto `dst`, scaling the layer by `opacity` first.
pub(crate) fn blend_layer(dst: &mut [u8], layer: &[u8], opacity: f32) -> FramemarkResult<()> {
    if dst.len() != layer.len() {
        return Err(FramemarkError::render("layer and frame sizes differ"));
    }
    let k = u16::from(unit_to_u8(f64::from(opacity)));
    if k == 0 {
        return Ok(());
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(layer.chunks_exact(4)) {
        let sa = mul_div255_u8(u16::from(s[3]), k);
        if sa == 0 {
            continue;
        }
        let keep = 255 - u16::from(sa);
        for c in 0..3 {
            let src = mul_div255_u8(u16::from(s[c]), k);
            d[c] = src.saturating_add(mul_div255_u8(u16::from(d[c]), keep));
        }
        d[3] = sa.saturating_add(mul_div255_u8(u16::from(d[3]), keep));
    }
    Ok(())
}

/// Replace the color of every covered pixel with `paint(x, y)`, keeping coverage.
///
/// `layer` holds shape coverage in its alpha channel; the result is `paint * coverage`.
pub(crate) fn shade_coverage(
    layer: &mut [u8],
    canvas: Canvas,
    paint: impl Fn(u32, u32) -> Rgba8Premul,
) {
    let w = canvas.width.max(1) as usize;
    for (i, px) in layer.chunks_exact_mut(4).enumerate() {
        let coverage = u16::from(px[3]);
        if coverage == 0 {
            continue;
        }
        let c = paint((i % w) as u32, (i / w) as u32);
        px[0] = mul_div255_u8(u16::from(c.r), coverage);
        px[1] = mul_div255_u8(u16::from(c.g), coverage);
        px[2] = mul_div255_u8(u16::from(c.b), coverage);
        px[3] = mul_div255_u8(u16::from(c.a), coverage);
    }
}

/// Drop shadow parameters in the canvas sense: a blurred, offset silhouette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShadowSpec {
    pub color: Rgba8Premul,
    pub offset_y: f64,
    pub blur: f64,
}

impl ShadowSpec {
    /// A shadow only shows when it is visible and either blurred or displaced.
    pub(crate) fn is_visible(&self) -> bool {
        self.color.a > 0 && (self.blur > 0.0 || self.offset_y != 0.0)
    }
}

/// Silhouette of `layer` in the shadow color, shifted and blurred.
pub(crate) fn cast_shadow(
    layer: &[u8],
    canvas: Canvas,
    shadow: &ShadowSpec,
) -> FramemarkResult<Vec<u8>> {
    if layer.len() != canvas.byte_len() {
        return Err(FramemarkError::render("shadow layer size mismatch"));
    }
    let (w, h) = (canvas.width as i64, canvas.height as i64);
    let dy = shadow.offset_y.clamp(-(h as f64), h as f64).round() as i64;
    let c = shadow.color;

    let mut out = vec![0u8; layer.len()];
    let mut bounds: Option<(i64, i64, i64, i64)> = None;
    for y in 0..h {
        let sy = y - dy;
        if sy < 0 || sy >= h {
            continue;
        }
        for x in 0..w {
            let a = u16::from(layer[((sy * w + x) as usize) * 4 + 3]);
            if a == 0 {
                continue;
            }
            let idx = ((y * w + x) as usize) * 4;
            out[idx] = mul_div255_u8(u16::from(c.r), a);
            out[idx + 1] = mul_div255_u8(u16::from(c.g), a);
            out[idx + 2] = mul_div255_u8(u16::from(c.b), a);
            out[idx + 3] = mul_div255_u8(u16::from(c.a), a);
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }

    let Some((x0, y0, x1, y1)) = bounds else {
        return Ok(out);
    };
    let max_reach = canvas.width.max(canvas.height);
    let Some(kernel) = ShadowKernel::for_blur(shadow.blur, max_reach) else {
        return Ok(out);
    };

    // Blur only the silhouette's neighbourhood; everything further out stays transparent.
    let r = kernel.reach() as i64;
    let (bx0, by0) = ((x0 - r).max(0), (y0 - r).max(0));
    let (bx1, by1) = ((x1 + r).min(w - 1), (y1 + r).min(h - 1));
    let (bw, bh) = ((bx1 - bx0 + 1) as usize, (by1 - by0 + 1) as usize);

    let mut region = Vec::with_capacity(bw * bh * 4);
    for y in by0..=by1 {
        let start = ((y * w + bx0) as usize) * 4;
        region.extend_from_slice(&out[start..start + bw * 4]);
    }
    kernel.apply(&mut region, bw, bh);
    for (row, y) in (by0..=by1).enumerate() {
        let start = ((y * w + bx0) as usize) * 4;
        out[start..start + bw * 4].copy_from_slice(&region[row * bw * 4..(row + 1) * bw * 4]);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
