//! Areas: planar regions bounded by closed curves
//!
//! An area owns an unordered list of closed curves forming outers and holes
//! under even-odd fill. Boolean operations and offsetting are delegated to
//! the clipping facade over `cavalier_contours`.

use serde::{Deserialize, Serialize};

use crate::clip;
use crate::curve::Curve;
use crate::geometry::{BoundingBox, Point, POINT_TOLERANCE};

/// Planar region held as a list of boundary curves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Area {
    pub curves: Vec<Curve>,
}

impl Area {
    pub fn new() -> Self {
        Self { curves: Vec::new() }
    }

    pub fn from_curves(curves: Vec<Curve>) -> Self {
        Self { curves }
    }

    pub fn append(&mut self, curve: Curve) {
        self.curves.push(curve);
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Sum of curve areas: signed, or of absolute values when `always_add`.
    pub fn area(&self, always_add: bool) -> f64 {
        self.curves
            .iter()
            .map(|c| {
                let a = c.signed_area();
                if always_add {
                    a.abs()
                } else {
                    a
                }
            })
            .sum()
    }

    pub fn extend_box(&self, bounds: &mut BoundingBox) {
        for curve in &self.curves {
            curve.extend_box(bounds);
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut bounds = BoundingBox::new();
        self.extend_box(&mut bounds);
        bounds
    }

    /// Closest point on any curve to `p`.
    pub fn nearest_point(&self, p: &Point) -> Option<Point> {
        let mut best: Option<(f64, Point)> = None;
        for curve in &self.curves {
            if let Some(near) = curve.nearest_point(p) {
                let dist = near.dist(p);
                if best.map_or(true, |(d, _)| dist < d) {
                    best = Some((dist, near));
                }
            }
        }
        best.map(|(_, near)| near)
    }

    /// Refit arcs over every curve.
    pub fn fit_arcs(&mut self, accuracy: f64) {
        for curve in &mut self.curves {
            curve.fit_arcs(accuracy);
        }
    }

    /// Offset every boundary by `d`: positive deflates inward, negative
    /// inflates. Regions that collapse are removed.
    pub fn offset(&mut self, d: f64) {
        *self = clip::offset(self, d);
    }

    /// Replace self with self ∩ other.
    pub fn intersect(&mut self, other: &Area) {
        *self = clip::intersect(self, other);
    }

    /// Replace self with self ∖ other.
    pub fn subtract(&mut self, other: &Area) {
        *self = clip::subtract(self, other);
    }

    /// True when any curve stitches a hole to its outer through a
    /// zero-width bridge (a repeated interior point on the ring).
    pub fn holes_linked(&self) -> bool {
        self.curves.iter().any(curve_self_touches)
    }
}

fn curve_self_touches(curve: &Curve) -> bool {
    let n = curve.vertices.len();
    if n < 4 {
        return false;
    }
    // ring positions exclude the closing duplicate of a closed curve
    let ring = if curve.is_closed() { n - 1 } else { n };
    for i in 0..ring {
        for j in (i + 1)..ring {
            if curve.vertices[i]
                .p
                .coincident(&curve.vertices[j].p, POINT_TOLERANCE)
            {
                return true;
            }
        }
    }
    false
}
