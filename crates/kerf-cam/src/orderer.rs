//! Curve orientation and hole nesting
//!
//! Curves may arrive in any order with any winding. The orderer builds a
//! containment tree from point-in-curve probes and rewrites the area so
//! that outers run counter-clockwise and holes clockwise, each hole listed
//! directly after its enclosing outer.
//!
//! Crossing (neither nested nor disjoint) curves are not supported here;
//! such input should be sanitized through the boolean engine first.

use kerf_core::{Area, Curve};

use crate::context::JobContext;
use crate::overlap::is_inside_curve;

/// Reorient `area` in place: outers CCW, holes CW, holes nested under
/// their smallest enclosing outer.
///
/// Duplicate curves collapse to the first-inserted copy; when a sample
/// point lies in several siblings, the first-inserted one wins.
pub fn reorder(area: &mut Area, ctx: &JobContext) {
    let curves = std::mem::take(&mut area.curves);
    let count = curves.len().max(1);
    let mut roots: Vec<Node> = Vec::new();
    for curve in curves {
        insert(&mut roots, curve, ctx.point_tolerance());
        if ctx.set_processing_length_in_split {
            ctx.add_progress(ctx.split_processing_length / count as f64);
        }
    }
    for root in roots {
        flatten(root, 0, &mut area.curves);
    }
}

struct Node {
    curve: Curve,
    children: Vec<Node>,
}

fn insert(siblings: &mut Vec<Node>, curve: Curve, tol: f64) {
    let Some(sample) = curve.start_point() else {
        return;
    };
    for node in siblings.iter_mut() {
        if curves_equal(&node.curve, &curve, tol) {
            return;
        }
        if is_inside_curve(&sample, &node.curve) {
            insert(&mut node.children, curve, tol);
            return;
        }
    }
    // not contained by any sibling: adopt the siblings it contains
    let mut node = Node {
        curve,
        children: Vec::new(),
    };
    let mut i = 0;
    while i < siblings.len() {
        let contained = siblings[i]
            .curve
            .start_point()
            .map_or(false, |p| is_inside_curve(&p, &node.curve));
        if contained {
            node.children.push(siblings.remove(i));
        } else {
            i += 1;
        }
    }
    siblings.push(node);
}

fn flatten(node: Node, depth: usize, out: &mut Vec<Curve>) {
    let mut curve = node.curve;
    let want_clockwise = depth % 2 == 1;
    if curve.is_clockwise() != want_clockwise {
        curve.reverse();
    }
    out.push(curve);
    for child in node.children {
        flatten(child, depth + 1, out);
    }
}

/// Ring equality up to rotation and direction, point-wise within `tol`.
fn curves_equal(a: &Curve, b: &Curve, tol: f64) -> bool {
    let ra = ring_points(a);
    let rb = ring_points(b);
    let n = ra.len();
    if n == 0 || n != rb.len() {
        return false;
    }
    for offset in 0..n {
        if !rb[offset].coincident(&ra[0], tol) {
            continue;
        }
        let forward = (0..n).all(|i| ra[i].coincident(&rb[(offset + i) % n], tol));
        let backward = (0..n).all(|i| ra[i].coincident(&rb[(offset + n - i) % n], tol));
        if forward || backward {
            return true;
        }
    }
    false
}

fn ring_points(curve: &Curve) -> Vec<kerf_core::Point> {
    let n = curve.vertices.len();
    let take = if curve.is_closed() { n.saturating_sub(1) } else { n };
    curve.vertices[..take].iter().map(|v| v.p).collect()
}
