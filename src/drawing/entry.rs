use std::f64::consts::{FRAC_PI_6, PI};

use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::quad_point;

/// Parameter at which the arrowhead direction is sampled.
pub const ARROW_HEAD_SAMPLE_T: f64 = 0.99;

/// Number of particles frozen into a spotlight.
pub const SPOTLIGHT_PARTICLES: usize = 8;

/// The annotation tools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Circle,
    Arrow,
    Polygon,
    Spotlight,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Circle,
        ToolKind::Arrow,
        ToolKind::Polygon,
        ToolKind::Spotlight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Circle => "circle",
            ToolKind::Arrow => "arrow",
            ToolKind::Polygon => "polygon",
            ToolKind::Spotlight => "spotlight",
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One committed annotation. Entries are values: once in the log they never change.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "tool", content = "properties", rename_all = "lowercase")]
pub enum DrawingEntry {
    Circle(CircleProps),
    Arrow(ArrowProps),
    Polygon(PolygonProps),
    Spotlight(SpotlightProps),
}

impl DrawingEntry {
    pub fn kind(&self) -> ToolKind {
        match self {
            DrawingEntry::Circle(_) => ToolKind::Circle,
            DrawingEntry::Arrow(_) => ToolKind::Arrow,
            DrawingEntry::Polygon(_) => ToolKind::Polygon,
            DrawingEntry::Spotlight(_) => ToolKind::Spotlight,
        }
    }
}

/// Dashed double ring, optionally tilted to read as lying on the ground plane.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CircleProps {
    pub center: Point,
    pub radius: f64,
    pub outer_color: String,
    pub inner_color: String,
    pub glow_radius: f64,
    /// Degrees; the ring is squashed vertically by `cos(tilt)`.
    pub tilt_deg: f64,
    pub scale: f64,
}

impl CircleProps {
    pub fn vertical_squash(&self) -> f64 {
        (self.tilt_deg * PI / 180.0).cos()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArrowShadow {
    pub enabled: bool,
    pub color: String,
    pub offset_y: f64,
    pub blur: f64,
}

/// Curved arrow: a quadratic Bezier from `start` to `end` with a filled head.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArrowProps {
    pub start: Point,
    pub end: Point,
    pub color: String,
    pub thickness: f64,
    pub head_size: f64,
    pub dashed: bool,
    pub arc_height: f64,
    pub shadow: ArrowShadow,
}

impl ArrowProps {
    /// Control point of the curve.
    ///
    /// The y coordinate is lifted from the higher endpoint, not from the segment midpoint, so
    /// a flat (`arc_height == 0`) arrow between endpoints at different heights still bows.
    pub fn control_point(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            self.start.y.min(self.end.y) - self.arc_height,
        )
    }

    /// Head triangle as `[tip, wing_a, wing_b]`.
    ///
    /// The direction is the chord from the curve at `t = 0.99` to the tip; the wings sit
    /// `head_size` back from the tip at ±30° around it.
    pub fn head(&self) -> [Point; 3] {
        let control = self.control_point();
        let near_end = quad_point(self.start, control, self.end, ARROW_HEAD_SAMPLE_T);
        let dir = self.end - near_end;
        let angle = dir.y.atan2(dir.x);
        let wing = |a: f64| {
            Point::new(
                self.end.x - self.head_size * a.cos(),
                self.end.y - self.head_size * a.sin(),
            )
        };
        [self.end, wing(angle - FRAC_PI_6), wing(angle + FRAC_PI_6)]
    }
}

/// Closed polygon with a translucent fill and vertex markers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PolygonProps {
    pub vertices: Vec<Point>,
    pub border_color: String,
    pub border_thickness: f64,
    pub dashed: bool,
    pub fill_color: String,
    pub fill_opacity_percent: f64,
    pub marker_radius: f64,
}

/// A particle disc, positioned relative to the spotlight center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Particle {
    pub offset: Vec2,
    pub size: f64,
}

/// Soft radial highlight with a ring of particles.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpotlightProps {
    pub center: Point,
    pub beam_radius: f64,
    pub intensity: f64,
    pub depth_squash: f64,
    pub particles: Vec<Particle>,
}

impl SpotlightProps {
    /// Build a spotlight whose particles are laid out from the given beam and squash.
    pub fn new(center: Point, beam_radius: f64, intensity: f64, depth_squash: f64) -> Self {
        Self {
            center,
            beam_radius,
            intensity,
            depth_squash,
            particles: particle_ring(beam_radius, depth_squash),
        }
    }
}

/// Evenly spaced particles at 80% of the beam radius.
pub fn particle_ring(beam_radius: f64, depth_squash: f64) -> Vec<Particle> {
    let distance = beam_radius * 0.8;
    (0..SPOTLIGHT_PARTICLES)
        .map(|i| {
            let angle = 2.0 * PI * (i as f64) / (SPOTLIGHT_PARTICLES as f64);
            Particle {
                offset: Vec2::new(
                    angle.cos() * distance,
                    angle.sin() * distance * depth_squash,
                ),
                size: 3.0,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/drawing/entry.rs"]
mod tests;
