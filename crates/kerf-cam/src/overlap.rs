//! Containment classification between areas
//!
//! Relationships are inferred from boolean operations alone: a short-circuit
//! chain of subtract/intersect probes, each on a working copy.

use kerf_core::{Area, Curve, Point, Vertex};

/// How two areas relate to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// First area lies inside (or equals) the second.
    Inside,
    /// Second area lies inside the first.
    Outside,
    /// Disjoint regions.
    Siblings,
    /// Boundaries cross.
    Crossing,
}

/// Classify the relationship of `a1` to `a2`.
///
/// Equal areas classify as `Inside`: the subtraction probe wins before the
/// disjointness probe runs.
pub fn overlap(a1: &Area, a2: &Area) -> Overlap {
    let mut probe = a1.clone();
    probe.subtract(a2);
    if probe.is_empty() {
        return Overlap::Inside;
    }

    let mut probe = a2.clone();
    probe.subtract(a1);
    if probe.is_empty() {
        return Overlap::Outside;
    }

    let mut probe = a1.clone();
    probe.intersect(a2);
    if probe.is_empty() {
        return Overlap::Siblings;
    }

    Overlap::Crossing
}

/// Classify two closed curves as singleton areas.
pub fn overlap_curves(c1: &Curve, c2: &Curve) -> Overlap {
    overlap(
        &Area::from_curves(vec![c1.clone()]),
        &Area::from_curves(vec![c2.clone()]),
    )
}

/// Side of the probe square used for point containment tests.
const PROBE_HALF_SIZE: f64 = 0.01;

/// Minimum probe intersection area for a point to count as inside. A fully
/// contained probe covers exactly 4e-4; the slack absorbs kernel rounding.
const PROBE_AREA_THRESHOLD: f64 = 4e-4 - 1e-9;

/// Point-in-area test via a small square probe.
///
/// A 0.02 x 0.02 square centered on `p` is intersected with the area; the
/// point is inside iff the overlap area exceeds the threshold. Points on
/// the boundary keep about half the probe and classify as outside.
pub fn is_inside(p: &Point, area: &Area) -> bool {
    let mut probe = Area::from_curves(vec![probe_square(p)]);
    probe.intersect(area);
    probe.area(false).abs() >= PROBE_AREA_THRESHOLD
}

/// Point-in-curve test; wraps the curve as a singleton area.
pub fn is_inside_curve(p: &Point, curve: &Curve) -> bool {
    is_inside(p, &Area::from_curves(vec![curve.clone()]))
}

fn probe_square(p: &Point) -> Curve {
    let h = PROBE_HALF_SIZE;
    let corners = [
        Point::new(p.x - h, p.y - h),
        Point::new(p.x + h, p.y - h),
        Point::new(p.x + h, p.y + h),
        Point::new(p.x - h, p.y + h),
        Point::new(p.x - h, p.y - h),
    ];
    let mut c = Curve::new();
    for corner in corners {
        c.append(Vertex::line(corner));
    }
    c
}
