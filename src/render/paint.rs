//! Shape paint routines.
//!
//! Every drawing operation is rasterized with `vello_cpu` into its own transparent layer the
//! size of the frame, then composited onto the frame with source-over. Working in layers keeps
//! canvas-style effects exact: a layer's alpha is a global opacity, and its silhouette is what
//! a drop shadow or glow is cast from.

use kurbo::Shape as _;

use crate::drawing::color::Rgba8;
use crate::drawing::entry::{ArrowProps, CircleProps, DrawingEntry, PolygonProps, SpotlightProps};
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rgba8Premul};
use crate::foundation::error::{FramemarkError, FramemarkResult};
use crate::foundation::math::{mul_div255_u8, unit_to_u8};
use crate::render::composite::{ShadowSpec, blend_layer, cast_shadow, shade_coverage};
use crate::render::raster::FrameRGBA;

const CURVE_TOLERANCE: f64 = 0.1;

const CIRCLE_OUTER_WIDTH: f64 = 11.0;
const CIRCLE_OUTER_DASH: [f64; 2] = [28.0, 12.0];
const CIRCLE_INNER_WIDTH: f64 = 6.0;
const CIRCLE_INNER_DASH: [f64; 2] = [20.0, 10.0];
const CIRCLE_INNER_RATIO: f64 = 0.7;

const LINE_DASH: [f64; 2] = [10.0, 5.0];
const ARROW_TAIL_ALPHA: u8 = 0x4D;
const ARROW_OUTLINE_WIDTH: f64 = 2.0;
const ARROW_OUTLINE_SHIFT: i16 = -20;

const MARKER_GLOW_BLUR: f64 = 4.0;

const SPOTLIGHT_RING_RATIO: f64 = 0.9;
const SPOTLIGHT_RING_WIDTH: f64 = 3.0;

/// Uncommitted shape painted over the committed scene while a tool is in use.
#[derive(Clone, Debug, PartialEq)]
pub enum Ghost {
    /// What the entry would look like if committed now.
    Entry(DrawingEntry),
    /// Open outline through the staged polygon vertices and on to the cursor.
    PolygonOutline { style: PolygonProps, cursor: Point },
}

pub(crate) struct Painter<'a> {
    frame: &'a mut FrameRGBA,
    opacity: f32,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(frame: &'a mut FrameRGBA, opacity: f32) -> Self {
        Self {
            frame,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    pub(crate) fn paint_entry(&mut self, entry: &DrawingEntry) -> FramemarkResult<()> {
        if self.frame.canvas().is_empty() {
            return Ok(());
        }
        match entry {
            DrawingEntry::Circle(c) => self.circle(c),
            DrawingEntry::Arrow(a) => self.arrow(a),
            DrawingEntry::Polygon(p) => self.polygon(p),
            DrawingEntry::Spotlight(s) => self.spotlight(s),
        }
    }

    pub(crate) fn paint_ghost(&mut self, ghost: &Ghost) -> FramemarkResult<()> {
        match ghost {
            Ghost::Entry(entry) => self.paint_entry(entry),
            Ghost::PolygonOutline { style, cursor } => {
                if self.frame.canvas().is_empty() {
                    return Ok(());
                }
                self.polygon_outline(style, *cursor)
            }
        }
    }

    fn circle(&mut self, c: &CircleProps) -> FramemarkResult<()> {
        let xf = Affine::translate(c.center.to_vec2())
            * Affine::scale(c.scale)
            * Affine::scale_non_uniform(1.0, c.vertical_squash());
        let outer = Rgba8::from_text(&c.outer_color);
        let inner = Rgba8::from_text(&c.inner_color);
        let glow = ShadowSpec {
            color: premul(outer),
            offset_y: 0.0,
            blur: c.glow_radius,
        };
        let glow = (c.glow_radius > 0.0).then_some(glow);

        let rings = [
            (c.radius, CIRCLE_OUTER_WIDTH, CIRCLE_OUTER_DASH, outer),
            (
                c.radius * CIRCLE_INNER_RATIO,
                CIRCLE_INNER_WIDTH,
                CIRCLE_INNER_DASH,
                inner,
            ),
        ];
        for (radius, width, dash, color) in rings {
            let ring = circle_path(Point::ORIGIN, radius);
            let layer = self.rasterize(|ctx| {
                ctx.set_transform(affine_to_cpu(xf));
                ctx.set_paint(color_to_cpu(color));
                ctx.set_stroke(stroke(width, Some(dash)));
                ctx.stroke_path(&bezpath_to_cpu(&ring));
            })?;
            self.composite(&layer, 1.0, glow.as_ref())?;
        }
        Ok(())
    }

    fn arrow(&mut self, a: &ArrowProps) -> FramemarkResult<()> {
        let canvas = self.frame.canvas();
        let color = Rgba8::from_text(&a.color);
        let shadow = ShadowSpec {
            color: premul(Rgba8::from_text(&a.shadow.color)),
            offset_y: a.shadow.offset_y,
            blur: a.shadow.blur,
        };
        let shadow = (a.shadow.enabled && shadow.is_visible()).then_some(shadow);

        let mut curve = BezPath::new();
        curve.move_to(a.start);
        curve.quad_to(a.control_point(), a.end);
        let body = stroke(a.thickness, a.dashed.then_some(LINE_DASH));
        let mut layer = self.rasterize(|ctx| {
            ctx.set_paint(color_to_cpu(Rgba8::WHITE));
            ctx.set_stroke(body);
            ctx.stroke_path(&bezpath_to_cpu(&curve));
        })?;
        let from = premul(color);
        let tail_alpha = mul_div255_u8(u16::from(color.a), u16::from(ARROW_TAIL_ALPHA));
        let to = premul(color.with_alpha(tail_alpha));
        shade_coverage(&mut layer, canvas, |x, y| {
            linear_gradient_at(a.start, a.end, from, to, pixel_center(x, y))
        });
        self.composite(&layer, 1.0, shadow.as_ref())?;

        let [tip, wing_a, wing_b] = a.head();
        let mut head = BezPath::new();
        head.move_to(tip);
        head.line_to(wing_a);
        head.line_to(wing_b);
        head.close_path();
        let outline = color.adjust_brightness(ARROW_OUTLINE_SHIFT);
        let layer = self.rasterize(|ctx| {
            let head = bezpath_to_cpu(&head);
            ctx.set_paint(color_to_cpu(color));
            ctx.fill_path(&head);
            ctx.set_paint(color_to_cpu(outline));
            ctx.set_stroke(stroke(ARROW_OUTLINE_WIDTH, None));
            ctx.stroke_path(&head);
        })?;
        self.composite(&layer, 1.0, shadow.as_ref())
    }

    fn polygon(&mut self, p: &PolygonProps) -> FramemarkResult<()> {
        if p.vertices.len() < 2 {
            return Ok(());
        }
        let mut outline = polyline(&p.vertices);
        outline.close_path();
        let border = Rgba8::from_text(&p.border_color);
        let fill = Rgba8::from_text(&p.fill_color);

        let layer = self.rasterize(|ctx| {
            ctx.set_paint(color_to_cpu(fill));
            ctx.fill_path(&bezpath_to_cpu(&outline));
        })?;
        let fill_alpha = (p.fill_opacity_percent / 100.0).clamp(0.0, 1.0) as f32;
        self.composite(&layer, fill_alpha, None)?;

        let edge = stroke(p.border_thickness, p.dashed.then_some(LINE_DASH));
        let layer = self.rasterize(|ctx| {
            ctx.set_paint(color_to_cpu(border));
            ctx.set_stroke(edge);
            ctx.stroke_path(&bezpath_to_cpu(&outline));
        })?;
        self.composite(&layer, 1.0, None)?;

        self.markers(&p.vertices, p.marker_radius, border)
    }

    fn polygon_outline(&mut self, p: &PolygonProps, cursor: Point) -> FramemarkResult<()> {
        if p.vertices.is_empty() {
            return Ok(());
        }
        let mut path = polyline(&p.vertices);
        path.line_to(cursor);
        let border = Rgba8::from_text(&p.border_color);
        let edge = stroke(p.border_thickness, p.dashed.then_some(LINE_DASH));
        let layer = self.rasterize(|ctx| {
            ctx.set_paint(color_to_cpu(border));
            ctx.set_stroke(edge);
            ctx.stroke_path(&bezpath_to_cpu(&path));
        })?;
        self.composite(&layer, 1.0, None)?;

        self.markers(&p.vertices, p.marker_radius, border)
    }

    fn markers(&mut self, vertices: &[Point], radius: f64, color: Rgba8) -> FramemarkResult<()> {
        if radius <= 0.0 || vertices.is_empty() {
            return Ok(());
        }
        let layer = self.rasterize(|ctx| {
            ctx.set_paint(color_to_cpu(color));
            for &v in vertices {
                ctx.fill_path(&bezpath_to_cpu(&circle_path(v, radius)));
            }
        })?;
        let glow = ShadowSpec {
            color: premul(Rgba8::WHITE),
            offset_y: 0.0,
            blur: MARKER_GLOW_BLUR,
        };
        self.composite(&layer, 1.0, Some(&glow))
    }

    fn spotlight(&mut self, s: &SpotlightProps) -> FramemarkResult<()> {
        let canvas = self.frame.canvas();
        let intensity = s.intensity.clamp(0.0, 1.0);
        let squash = s.depth_squash;

        // The beam fades to nothing at its rim, so it needs no clip path.
        if s.beam_radius > 0.0 && squash.abs() > f64::EPSILON {
            let stops = [(0.0, intensity), (0.5, intensity * 0.5), (1.0, 0.0)];
            let width = canvas.width as usize;
            let mut layer = vec![0u8; canvas.byte_len()];
            for (i, px) in layer.chunks_exact_mut(4).enumerate() {
                let p = pixel_center((i % width) as u32, (i / width) as u32);
                let dx = p.x - s.center.x;
                let dy = (p.y - s.center.y) / squash;
                let t = dx.hypot(dy) / s.beam_radius;
                if t >= 1.0 {
                    continue;
                }
                let a = unit_to_u8(sample_stops(&stops, t));
                px.copy_from_slice(&[a, a, a, a]);
            }
            self.composite(&layer, 1.0, None)?;
        }

        let xf = Affine::translate(s.center.to_vec2()) * Affine::scale_non_uniform(1.0, squash);
        let ring = circle_path(Point::ORIGIN, s.beam_radius * SPOTLIGHT_RING_RATIO);
        let ring_color = Rgba8::WHITE.with_alpha(unit_to_u8(intensity * 0.8));
        let particle_color = Rgba8::WHITE.with_alpha(unit_to_u8(intensity * 0.6));
        let layer = self.rasterize(|ctx| {
            ctx.set_transform(affine_to_cpu(xf));
            ctx.set_paint(color_to_cpu(ring_color));
            ctx.set_stroke(stroke(SPOTLIGHT_RING_WIDTH, None));
            ctx.stroke_path(&bezpath_to_cpu(&ring));
            ctx.set_paint(color_to_cpu(particle_color));
            for particle in &s.particles {
                let disc = circle_path(Point::ORIGIN + particle.offset, particle.size);
                ctx.fill_path(&bezpath_to_cpu(&disc));
            }
        })?;
        self.composite(&layer, 1.0, None)
    }

    fn rasterize(
        &self,
        draw: impl FnOnce(&mut vello_cpu::RenderContext),
    ) -> FramemarkResult<Vec<u8>> {
        let (w, h) = surface_dims(self.frame.canvas())?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        draw(&mut ctx);
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }

    fn composite(
        &mut self,
        layer: &[u8],
        alpha: f32,
        shadow: Option<&ShadowSpec>,
    ) -> FramemarkResult<()> {
        let alpha = alpha * self.opacity;
        if let Some(shadow) = shadow {
            let cast = cast_shadow(layer, self.frame.canvas(), shadow)?;
            blend_layer(&mut self.frame.data, &cast, alpha)?;
        }
        blend_layer(&mut self.frame.data, layer, alpha)
    }
}

/// Linear interpolation over `(offset, value)` stops sorted by offset.
fn sample_stops(stops: &[(f64, f64)], t: f64) -> f64 {
    let Some(&(first_t, first_v)) = stops.first() else {
        return 0.0;
    };
    if t <= first_t {
        return first_v;
    }
    for pair in stops.windows(2) {
        let ((t0, v0), (t1, v1)) = (pair[0], pair[1]);
        if t <= t1 {
            let span = t1 - t0;
            let k = if span > 0.0 { (t - t0) / span } else { 1.0 };
            return v0 + (v1 - v0) * k;
        }
    }
    stops.last().map(|&(_, v)| v).unwrap_or(first_v)
}

/// Two-stop linear gradient along `start -> end`, interpolated in premultiplied space.
fn linear_gradient_at(
    start: Point,
    end: Point,
    from: Rgba8Premul,
    to: Rgba8Premul,
    p: Point,
) -> Rgba8Premul {
    let axis = end - start;
    let len2 = axis.hypot2();
    let t = if len2 > 0.0 {
        ((p - start).dot(axis) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Rgba8Premul {
        r: lerp(from.r, to.r),
        g: lerp(from.g, to.g),
        b: lerp(from.b, to.b),
        a: lerp(from.a, to.a),
    }
}

fn pixel_center(x: u32, y: u32) -> Point {
    Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)
}

fn premul(c: Rgba8) -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(c.r, c.g, c.b, c.a)
}

fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((&first, rest)) = points.split_first() {
        path.move_to(first);
        for &p in rest {
            path.line_to(p);
        }
    }
    path
}

fn circle_path(center: Point, radius: f64) -> BezPath {
    kurbo::Circle::new(center, radius.max(0.0)).to_path(CURVE_TOLERANCE)
}

/// Canvas-like stroke style: butt caps, miter joins.
fn stroke(width: f64, dash: Option<[f64; 2]>) -> vello_cpu::kurbo::Stroke {
    let s = vello_cpu::kurbo::Stroke::new(width.max(0.0))
        .with_caps(vello_cpu::kurbo::Cap::Butt)
        .with_join(vello_cpu::kurbo::Join::Miter)
        .with_miter_limit(10.0);
    match dash {
        Some(pattern) => s.with_dashes(0.0, pattern),
        None => s,
    }
}

fn surface_dims(canvas: Canvas) -> FramemarkResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| FramemarkError::render("frame width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| FramemarkError::render("frame height exceeds u16"))?;
    Ok((w, h))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
