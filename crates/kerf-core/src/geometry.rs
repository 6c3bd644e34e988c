//! Basic planar geometry types
//!
//! All coordinates are in user units on the XY plane. Angles follow the
//! mathematical convention: counter-clockwise positive, measured from +X.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Base coincidence tolerance at `units = 1.0`.
///
/// Callers working in other unit systems scale this as `0.002 / units`.
pub const POINT_TOLERANCE: f64 = 0.002;

/// 2D point / vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dist(&self, other: &Self) -> f64 {
        (*other - *self).length()
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product of the two vectors.
    pub fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 1e-10 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            *self
        }
    }

    /// Rotate about the origin by an angle given as `(cos, sin)`.
    pub fn rotated(&self, cos_a: f64, sin_a: f64) -> Self {
        Self {
            x: self.x * cos_a - self.y * sin_a,
            y: self.x * sin_a + self.y * cos_a,
        }
    }

    /// Coordinate-wise coincidence within `tol` on both axes.
    pub fn coincident(&self, other: &Self, tol: f64) -> bool {
        (self.x - other.x).abs() < tol && (self.y - other.y).abs() < tol
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Kind of the segment ending at a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SpanKind {
    /// Straight segment from the predecessor vertex.
    #[default]
    Line,
    /// Counter-clockwise circular arc.
    ArcCcw,
    /// Clockwise circular arc.
    ArcCw,
}

impl SpanKind {
    pub fn is_arc(&self) -> bool {
        !matches!(self, SpanKind::Line)
    }

    /// The same segment traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        match self {
            SpanKind::Line => SpanKind::Line,
            SpanKind::ArcCcw => SpanKind::ArcCw,
            SpanKind::ArcCw => SpanKind::ArcCcw,
        }
    }
}

/// One node of a curve
///
/// A vertex describes the segment arriving at `p` from the predecessor
/// vertex. The first vertex of a curve is a pure seed point: its kind and
/// center are ignored by geometric operations but preserved by transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub kind: SpanKind,
    /// End point of the segment/arc.
    pub p: Point,
    /// Arc center (meaningless for `Line`).
    pub c: Point,
    /// Opaque caller tag, preserved through transforms.
    pub user_data: Option<i64>,
}

impl Vertex {
    pub fn line(p: Point) -> Self {
        Self {
            kind: SpanKind::Line,
            p,
            c: Point::ZERO,
            user_data: None,
        }
    }

    pub fn arc_ccw(p: Point, c: Point) -> Self {
        Self {
            kind: SpanKind::ArcCcw,
            p,
            c,
            user_data: None,
        }
    }

    pub fn arc_cw(p: Point, c: Point) -> Self {
        Self {
            kind: SpanKind::ArcCw,
            p,
            c,
            user_data: None,
        }
    }

    pub fn with_user_data(mut self, tag: i64) -> Self {
        self.user_data = Some(tag);
        self
    }
}

/// One segment of a curve, with its resolved start point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// Start point of the segment.
    pub start: Point,
    /// Vertex carrying the segment kind, end point and arc center.
    pub v: Vertex,
    /// True for the first segment of the curve.
    pub start_span: bool,
}

impl Span {
    pub fn new(start: Point, v: Vertex, start_span: bool) -> Self {
        Self {
            start,
            v,
            start_span,
        }
    }

    pub fn radius(&self) -> f64 {
        self.v.c.dist(&self.v.p)
    }

    /// Signed sweep angle of an arc span, positive CCW.
    ///
    /// A zero-chord arc is treated as a full circle. Returns 0 for lines.
    pub fn sweep(&self) -> f64 {
        use std::f64::consts::TAU;
        match self.v.kind {
            SpanKind::Line => 0.0,
            SpanKind::ArcCcw => {
                let a0 = angle_of(self.start, self.v.c);
                let a1 = angle_of(self.v.p, self.v.c);
                let mut sweep = a1 - a0;
                if sweep <= 1e-12 {
                    sweep += TAU;
                }
                sweep
            }
            SpanKind::ArcCw => {
                let a0 = angle_of(self.start, self.v.c);
                let a1 = angle_of(self.v.p, self.v.c);
                let mut sweep = a1 - a0;
                if sweep >= -1e-12 {
                    sweep -= TAU;
                }
                sweep
            }
        }
    }

    pub fn length(&self) -> f64 {
        match self.v.kind {
            SpanKind::Line => self.start.dist(&self.v.p),
            _ => self.radius() * self.sweep().abs(),
        }
    }

    /// Closest point on the span to `p`.
    pub fn nearest_point(&self, p: &Point) -> Point {
        match self.v.kind {
            SpanKind::Line => {
                let d = self.v.p - self.start;
                let len2 = d.dot(&d);
                if len2 < 1e-20 {
                    return self.start;
                }
                let t = ((*p - self.start).dot(&d) / len2).clamp(0.0, 1.0);
                self.start + d * t
            }
            _ => {
                let r = self.radius();
                let v = *p - self.v.c;
                if v.length() < 1e-12 {
                    return self.start;
                }
                let on_circle = self.v.c + v.normalize() * r;
                if self.angle_on_span(angle_of(on_circle, self.v.c)) {
                    on_circle
                } else if self.start.dist(p) < self.v.p.dist(p) {
                    self.start
                } else {
                    self.v.p
                }
            }
        }
    }

    /// Extend `bounds` by the span's endpoints and arc axis extrema.
    pub fn extend_box(&self, bounds: &mut BoundingBox) {
        use std::f64::consts::FRAC_PI_2;
        bounds.insert(self.start);
        bounds.insert(self.v.p);
        if self.v.kind.is_arc() {
            let r = self.radius();
            for quadrant in 0..4 {
                let a = quadrant as f64 * FRAC_PI_2;
                if self.angle_on_span(a) {
                    bounds.insert(self.v.c + Point::new(a.cos(), a.sin()) * r);
                }
            }
        }
    }

    /// True when the circle angle `a` lies within the arc's sweep.
    fn angle_on_span(&self, a: f64) -> bool {
        use std::f64::consts::TAU;
        let sweep = self.sweep();
        let a0 = angle_of(self.start, self.v.c);
        let mut rel = a - a0;
        if sweep >= 0.0 {
            while rel < 0.0 {
                rel += TAU;
            }
            rel <= sweep
        } else {
            while rel > 0.0 {
                rel -= TAU;
            }
            rel >= sweep
        }
    }
}

/// Polar angle of `p` about `c`.
pub(crate) fn angle_of(p: Point, c: Point) -> f64 {
    (p.y - c.y).atan2(p.x - c.x)
}

/// Axis-aligned bounding rectangle with running min/max accumulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// An empty box; any `insert` makes it valid.
    pub fn new() -> Self {
        Self {
            min: Point::new(f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn insert(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// True when `other` lies entirely inside this box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}
