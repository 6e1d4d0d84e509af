//! Parametric shapes that place a fixture's pixels in patch space.
//!
//! Evaluation is pure: `(shape, range, index, count) -> position`. The built-in shapes are
//! [`Line`] and [`Circle`]; anything else plugs in through [`PixelCurve`] and
//! [`Shape::Custom`] without the position updater needing to know about it.
use std::{f64::consts::TAU, fmt, sync::Arc};

use crate::foundation::core::{Point, Vec2};

/// A curve that pixels can be sampled along.
///
/// `range` is `index / (count - 1)` (0 for single-pixel fixtures); implementations may use
/// whichever parameterization suits their topology.
pub trait PixelCurve: fmt::Debug + Send + Sync {
    /// Position of pixel `index` out of `count`.
    fn point_at(&self, range: f64, index: usize, count: usize) -> Point;

    /// Short human-readable kind name ("line", "circle", ...).
    fn kind(&self) -> &'static str;
}

/// Straight segment; pixels are spread evenly from `start` to `end` inclusive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    /// Position of the first pixel.
    pub start: Point,
    /// Position of the last pixel.
    pub end: Point,
}

impl Line {
    /// Segment from `start` to `end`.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

impl PixelCurve for Line {
    fn point_at(&self, range: f64, _index: usize, _count: usize) -> Point {
        self.start + (self.end - self.start) * range
    }

    fn kind(&self) -> &'static str {
        "line"
    }
}

/// Circle; pixels are spread over a full turn starting at angle 0.
///
/// The step is `TAU / count`, so the last pixel stops one step short of the first: the ring is
/// open, unlike [`Line`] which lands on both endpoints.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    /// Center of the ring.
    pub center: Point,
    /// Ring radius.
    pub radius: f64,
}

impl Circle {
    /// Ring around `center`.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Drag-handle position used by editors to resize the circle.
    pub fn radius_handle(&self) -> Point {
        self.center + Vec2::new(self.radius, 0.0)
    }

    /// Set the radius from a dragged handle position.
    pub fn set_radius_handle(&mut self, handle: Point) {
        self.radius = self.center.distance(handle);
    }
}

impl PixelCurve for Circle {
    fn point_at(&self, _range: f64, index: usize, count: usize) -> Point {
        let angle = if count == 0 {
            0.0
        } else {
            index as f64 / count as f64 * TAU
        };
        Point::new(
            self.center.x + angle.cos() * self.radius,
            self.center.y + angle.sin() * self.radius,
        )
    }

    fn kind(&self) -> &'static str {
        "circle"
    }
}

/// The geometric shape attached to a fixture. A fixture carries at most one.
#[derive(Clone, Debug)]
pub enum Shape {
    /// Pixels spread along a segment.
    Line(Line),
    /// Pixels spread around a ring.
    Circle(Circle),
    /// Host-provided curve.
    Custom(Arc<dyn PixelCurve>),
}

impl Shape {
    /// Shorthand for `Shape::Line(Line::new(start, end))`.
    pub fn line(start: Point, end: Point) -> Self {
        Self::Line(Line::new(start, end))
    }

    /// Shorthand for `Shape::Circle(Circle::new(center, radius))`.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::Circle(Circle::new(center, radius))
    }

    /// Wrap a host curve.
    pub fn custom(curve: impl PixelCurve + 'static) -> Self {
        Self::Custom(Arc::new(curve))
    }

    fn curve(&self) -> &dyn PixelCurve {
        match self {
            Self::Line(l) => l,
            Self::Circle(c) => c,
            Self::Custom(c) => c.as_ref(),
        }
    }

    /// Position of pixel `index` out of `count` given its range fraction.
    pub fn evaluate(&self, range: f64, index: usize, count: usize) -> Point {
        self.curve().point_at(range, index, count)
    }

    /// Kind name of the underlying curve.
    pub fn kind(&self) -> &'static str {
        self.curve().kind()
    }
}

impl From<Line> for Shape {
    fn from(l: Line) -> Self {
        Self::Line(l)
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

/// Free-function form of [`Shape::evaluate`].
pub fn evaluate(shape: &Shape, range: f64, index: usize, count: usize) -> Point {
    shape.evaluate(range, index, count)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shape.rs"]
mod tests;
