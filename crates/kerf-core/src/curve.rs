//! Curves: ordered vertex chains of line and arc segments
//!
//! A curve with N vertices describes N-1 segments. The first vertex is a
//! seed point; each following vertex carries the segment arriving at it.

use serde::{Deserialize, Serialize};

use crate::geometry::{angle_of, BoundingBox, Point, Span, Vertex, POINT_TOLERANCE};

/// Ordered sequence of vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Curve {
    pub vertices: Vec<Vertex>,
}

impl Curve {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Build a polyline curve from a point list (line segments only).
    pub fn from_points(points: &[Point]) -> Self {
        Self {
            vertices: points.iter().map(|p| Vertex::line(*p)).collect(),
        }
    }

    pub fn append(&mut self, v: Vertex) {
        self.vertices.push(v);
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn start_point(&self) -> Option<Point> {
        self.vertices.first().map(|v| v.p)
    }

    pub fn end_point(&self) -> Option<Point> {
        self.vertices.last().map(|v| v.p)
    }

    /// Endpoint coincidence at the default unit scale.
    pub fn is_closed(&self) -> bool {
        self.is_closed_within(POINT_TOLERANCE)
    }

    pub fn is_closed_within(&self, tol: f64) -> bool {
        match (self.start_point(), self.end_point()) {
            (Some(s), Some(e)) => self.vertices.len() > 1 && s.coincident(&e, tol),
            _ => false,
        }
    }

    /// Sign of the enclosed area; only meaningful for closed curves.
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Signed enclosed area: shoelace terms plus exact circular-segment
    /// corrections for arc spans. Positive for counter-clockwise curves.
    pub fn signed_area(&self) -> f64 {
        let mut area = 0.0;
        for span in self.spans() {
            area += 0.5 * (span.start.x + span.v.p.x) * (span.v.p.y - span.start.y);
            if span.v.kind.is_arc() {
                let r = span.radius();
                let sweep = span.sweep();
                area += 0.5 * r * r * (sweep - sweep.sin());
            }
        }
        area
    }

    /// Reverse the traversal order, flipping every arc direction.
    pub fn reverse(&mut self) {
        let n = self.vertices.len();
        if n < 2 {
            return;
        }
        let old = std::mem::take(&mut self.vertices);
        let mut out = Vec::with_capacity(n);
        let mut seed = Vertex::line(old[n - 1].p);
        seed.user_data = old[n - 1].user_data;
        out.push(seed);
        for i in (1..n).rev() {
            let mut v = old[i];
            v.kind = v.kind.reversed();
            v.p = old[i - 1].p;
            out.push(v);
        }
        self.vertices = out;
    }

    /// Extend `bounds` by every vertex endpoint and arc extremum.
    pub fn extend_box(&self, bounds: &mut BoundingBox) {
        if let Some(v) = self.vertices.first() {
            bounds.insert(v.p);
        }
        for span in self.spans() {
            span.extend_box(bounds);
        }
    }

    /// Closest point on the curve to `p`; `None` for a vertex-less curve.
    pub fn nearest_point(&self, p: &Point) -> Option<Point> {
        if self.vertices.len() < 2 {
            return self.start_point();
        }
        let mut best: Option<(f64, Point)> = None;
        for span in self.spans() {
            let near = span.nearest_point(p);
            let dist = near.dist(p);
            if best.map_or(true, |(d, _)| dist < d) {
                best = Some((dist, near));
            }
        }
        best.map(|(_, near)| near)
    }

    /// One `Span` per segment, with resolved start points.
    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.vertices
            .windows(2)
            .enumerate()
            .map(|(i, w)| Span::new(w[0].p, w[1], i == 0))
    }

    /// Total path length over all spans.
    pub fn length(&self) -> f64 {
        self.spans().map(|s| s.length()).sum()
    }

    /// Coalesce runs of colinear segments and runs of co-circular line
    /// segments into single line/arc spans, within `accuracy`.
    ///
    /// Endpoints and closure are preserved; existing arc spans are kept.
    pub fn fit_arcs(&mut self, accuracy: f64) {
        if self.vertices.len() < 3 {
            return;
        }
        let old = std::mem::take(&mut self.vertices);
        let mut out: Vec<Vertex> = Vec::with_capacity(old.len());
        out.push(old[0]);
        let mut run: Vec<Point> = vec![old[0].p];
        for v in &old[1..] {
            if v.kind.is_arc() {
                flush_run(&mut out, &run, accuracy);
                out.push(*v);
                run.clear();
                run.push(v.p);
            } else {
                run.push(v.p);
            }
        }
        flush_run(&mut out, &run, accuracy);
        self.vertices = out;
    }
}

/// Emit fitted vertices covering `pts[1..]` (`pts[0]` is already emitted).
///
/// At each position the longest colinear prefix and the longest
/// co-circular prefix (four points minimum, so a fourth point confirms
/// the circle) compete; the one reaching further wins, lines on ties.
fn flush_run(out: &mut Vec<Vertex>, pts: &[Point], accuracy: f64) {
    let mut i = 0;
    while i + 1 < pts.len() {
        let mut j_line = i + 1;
        while j_line + 1 < pts.len() && fits_line(&pts[i..=j_line + 1], accuracy) {
            j_line += 1;
        }
        let mut arc: Option<(usize, Point, bool)> = None;
        if i + 3 < pts.len() {
            let mut j_arc = i + 3;
            while let Some((c, ccw)) = fits_arc(&pts[i..=j_arc], accuracy) {
                arc = Some((j_arc, c, ccw));
                if j_arc + 1 >= pts.len() {
                    break;
                }
                j_arc += 1;
            }
        }
        match arc {
            Some((j, c, ccw)) if j > j_line => {
                if ccw {
                    out.push(Vertex::arc_ccw(pts[j], c));
                } else {
                    out.push(Vertex::arc_cw(pts[j], c));
                }
                i = j;
            }
            _ => {
                out.push(Vertex::line(pts[j_line]));
                i = j_line;
            }
        }
    }
}

fn fits_line(pts: &[Point], accuracy: f64) -> bool {
    let first = pts[0];
    let last = pts[pts.len() - 1];
    let dir = last - first;
    let len = dir.length();
    if len < 1e-12 {
        return false;
    }
    pts[1..pts.len() - 1].iter().all(|p| {
        let offset = *p - first;
        // perpendicular distance to the chord, plus projection inside it
        let t = offset.dot(&dir) / (len * len);
        (dir.cross(&offset) / len).abs() <= accuracy && (-1e-9..=1.0 + 1e-9).contains(&t)
    })
}

/// Circle through first, middle and last point, accepted when every point
/// lies within `accuracy` of it and the angular walk is monotone.
fn fits_arc(pts: &[Point], accuracy: f64) -> Option<(Point, bool)> {
    let c = circumcenter(pts[0], pts[pts.len() / 2], pts[pts.len() - 1])?;
    let r = c.dist(&pts[0]);
    if r > 1e6 {
        return None;
    }
    if pts.iter().any(|p| (c.dist(p) - r).abs() > accuracy) {
        return None;
    }
    // chord midpoints must hug the circle too, or the run is a polygon
    // that merely has concyclic corners (sagitta check)
    let sagitta_ok = pts.windows(2).all(|w| {
        let mid = w[0] + (w[1] - w[0]) * 0.5;
        (c.dist(&mid) - r).abs() <= accuracy
    });
    if !sagitta_ok {
        return None;
    }
    // monotone angular progression in one direction, under one revolution
    let ccw = (pts[1] - pts[0]).cross(&(pts[2] - pts[1])) > 0.0;
    let mut total = 0.0;
    let mut prev = angle_of(pts[0], c);
    for p in &pts[1..] {
        let a = angle_of(*p, c);
        let mut delta = a - prev;
        if ccw {
            while delta < 0.0 {
                delta += std::f64::consts::TAU;
            }
        } else {
            while delta > 0.0 {
                delta -= std::f64::consts::TAU;
            }
        }
        total += delta;
        prev = a;
    }
    if total.abs() >= std::f64::consts::TAU {
        return None;
    }
    Some((c, ccw))
}

/// Center of the circle through three points; `None` when colinear.
fn circumcenter(a: Point, b: Point, c: Point) -> Option<Point> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-12 {
        return None;
    }
    let a2 = a.dot(&a);
    let b2 = b.dot(&b);
    let c2 = c.dot(&c);
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    Some(Point::new(ux, uy))
}
