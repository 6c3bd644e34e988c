//! Clipping facade over the `cavalier_contours` kernel
//!
//! Curves convert losslessly to bulge polylines (arcs map to bulges, no
//! densification), so offsets and booleans preserve arc spans exactly.
//!
//! Loop bookkeeping follows even-odd fill: results are flattened into
//! counter-clockwise outer loops and clockwise hole loops.

use cavalier_contours::core::math::Vector2;
use cavalier_contours::polyline::{BooleanOp, PlineSource, PlineSourceMut, Polyline};
use cavalier_contours::shape_algorithms::{Shape, ShapeOffsetOptions};

use crate::area::Area;
use crate::curve::Curve;
use crate::geometry::{Point, SpanKind, Vertex};

/// Loops with region area below this are treated as collapsed and dropped.
const MIN_LOOP_AREA: f64 = 1e-10;

/// Offset every boundary of `area` by `d`; positive deflates inward.
pub fn offset(area: &Area, d: f64) -> Area {
    if d == 0.0 {
        return area.clone();
    }
    let loops = grouped_loops(area);
    let mut plines = Vec::with_capacity(loops.len());
    for (mut pl, is_hole) in loops {
        // the shape kernel reads fill from orientation: outers CCW, holes CW
        set_orientation(&mut pl, !is_hole);
        plines.push(pl);
    }
    let shape = Shape::from_plines(plines);
    let result = shape.parallel_offset(d, ShapeOffsetOptions::new());
    let mut out = Area::new();
    for indexed in &result.ccw_plines {
        push_loop(&mut out, &indexed.polyline);
    }
    for indexed in &result.cw_plines {
        push_loop(&mut out, &indexed.polyline);
    }
    out
}

/// a ∩ b
pub fn intersect(a: &Area, b: &Area) -> Area {
    let a_loops = grouped_loops(a);
    let (b_outers, b_holes) = split_outers_holes(grouped_loops(b));

    // clip every loop of `a` to the union of b's outers
    let mut pieces: Vec<(Polyline<f64>, bool)> = Vec::new();
    for (pl, is_hole) in &a_loops {
        for ob in &b_outers {
            for (piece, flipped) in pline_boolean(pl, ob, BooleanOp::And) {
                pieces.push((piece, *is_hole != flipped));
            }
        }
    }
    // carve b's holes out of the surviving material
    for hb in &b_holes {
        pieces = carve(pieces, hb);
    }
    collect(pieces)
}

/// a ∖ b
pub fn subtract(a: &Area, b: &Area) -> Area {
    let b_subareas = subareas(grouped_loops(b));

    let mut pieces: Vec<(Polyline<f64>, bool)> = grouped_loops(a);
    for (ob, hbs) in &b_subareas {
        let mut next = Vec::new();
        for (pl, is_hole) in &pieces {
            // X ∖ (outer ∖ holes)  =  (X ∖ outer) ∪ ⋃ (X ∩ hole)
            for (piece, flipped) in pline_boolean(pl, ob, BooleanOp::Not) {
                next.push((piece, *is_hole != flipped));
            }
            for hb in hbs {
                for (piece, flipped) in pline_boolean(pl, hb, BooleanOp::And) {
                    next.push((piece, *is_hole != flipped));
                }
            }
        }
        pieces = next;
    }
    collect(pieces)
}

/// Subtract the CCW region `clip` from every non-hole piece.
fn carve(
    pieces: Vec<(Polyline<f64>, bool)>,
    clip: &Polyline<f64>,
) -> Vec<(Polyline<f64>, bool)> {
    let mut next = Vec::new();
    for (pl, is_hole) in &pieces {
        if *is_hole {
            next.push((pl.clone(), true));
            continue;
        }
        for (piece, flipped) in pline_boolean(pl, clip, BooleanOp::Not) {
            next.push((piece, flipped));
        }
    }
    next
}

/// Pairwise boolean between two CCW-normalized closed loops.
///
/// Returns result loops as CCW polylines plus a parity flag: `false` for
/// filled pieces, `true` for holes punched into them.
fn pline_boolean(
    subject: &Polyline<f64>,
    clip: &Polyline<f64>,
    op: BooleanOp,
) -> Vec<(Polyline<f64>, bool)> {
    if degenerate(subject) {
        return Vec::new();
    }
    if degenerate(clip) {
        return match op {
            BooleanOp::Not => vec![(subject.clone(), false)],
            _ => Vec::new(),
        };
    }
    let result = subject.boolean(clip, op);
    let mut out = Vec::new();
    for r in result.pos_plines {
        if !degenerate(&r.pline) {
            out.push((r.pline, false));
        }
    }
    for r in result.neg_plines {
        if !degenerate(&r.pline) {
            out.push((r.pline, true));
        }
    }
    out
}

fn degenerate(pl: &Polyline<f64>) -> bool {
    pl.vertex_count() < 2 || pl.area().abs() < MIN_LOOP_AREA
}

/// Convert, normalize to CCW, and classify each loop by nesting parity:
/// even depth ⇒ outer (`false`), odd depth ⇒ hole (`true`).
fn grouped_loops(area: &Area) -> Vec<(Polyline<f64>, bool)> {
    let mut plines: Vec<Polyline<f64>> = area
        .curves
        .iter()
        .filter_map(curve_to_pline)
        .filter(|pl| !degenerate(pl))
        .collect();
    for pl in &mut plines {
        set_orientation(pl, true);
    }
    let depths: Vec<usize> = (0..plines.len())
        .map(|i| {
            let sample = plines[i].at(0);
            plines
                .iter()
                .enumerate()
                .filter(|(j, other)| {
                    *j != i && other.winding_number(Vector2::new(sample.x, sample.y)) != 0
                })
                .count()
        })
        .collect();
    plines
        .into_iter()
        .zip(depths)
        .map(|(pl, depth)| (pl, depth % 2 == 1))
        .collect()
}

fn split_outers_holes(
    loops: Vec<(Polyline<f64>, bool)>,
) -> (Vec<Polyline<f64>>, Vec<Polyline<f64>>) {
    let mut outers = Vec::new();
    let mut holes = Vec::new();
    for (pl, is_hole) in loops {
        if is_hole {
            holes.push(pl);
        } else {
            outers.push(pl);
        }
    }
    (outers, holes)
}

/// Attach each hole to its smallest enclosing outer.
fn subareas(loops: Vec<(Polyline<f64>, bool)>) -> Vec<(Polyline<f64>, Vec<Polyline<f64>>)> {
    let (outers, holes) = split_outers_holes(loops);
    let mut out: Vec<(Polyline<f64>, Vec<Polyline<f64>>)> =
        outers.into_iter().map(|o| (o, Vec::new())).collect();
    for hole in holes {
        let sample = hole.at(0);
        let owner = out
            .iter_mut()
            .filter(|(o, _)| o.winding_number(Vector2::new(sample.x, sample.y)) != 0)
            .min_by(|(a, _), (b, _)| {
                a.area()
                    .abs()
                    .partial_cmp(&b.area().abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        if let Some((_, hbs)) = owner {
            hbs.push(hole);
        }
    }
    out
}

/// Flatten flagged pieces into an area: outers CCW, holes CW.
fn collect(pieces: Vec<(Polyline<f64>, bool)>) -> Area {
    let mut out = Area::new();
    for (mut pl, is_hole) in pieces {
        set_orientation(&mut pl, !is_hole);
        push_loop(&mut out, &pl);
    }
    out
}

fn push_loop(out: &mut Area, pl: &Polyline<f64>) {
    if !degenerate(pl) {
        out.append(pline_to_curve(pl));
    }
}

fn set_orientation(pl: &mut Polyline<f64>, ccw: bool) {
    if (pl.area() > 0.0) != ccw {
        pl.invert_direction_mut();
    }
}

/// Closed curve → closed bulge polyline. `None` for curves that cannot
/// form a loop (fewer than three vertices).
pub(crate) fn curve_to_pline(curve: &Curve) -> Option<Polyline<f64>> {
    let n = curve.vertices.len();
    if n < 3 {
        return None;
    }
    let mut pl = Polyline::new_closed();
    for (i, v) in curve.vertices[..n - 1].iter().enumerate() {
        let outgoing = &curve.vertices[i + 1];
        let bulge = match outgoing.kind {
            SpanKind::Line => 0.0,
            _ => {
                let span = crate::geometry::Span::new(v.p, *outgoing, false);
                (span.sweep() / 4.0).tan()
            }
        };
        pl.add(v.p.x, v.p.y, bulge);
    }
    Some(pl)
}

/// Closed bulge polyline → closed curve, reconstructing arc centers.
pub(crate) fn pline_to_curve(pl: &Polyline<f64>) -> Curve {
    let n = pl.vertex_count();
    let mut curve = Curve::new();
    if n == 0 {
        return curve;
    }
    let at = |i: usize| {
        let v = pl.at(i % n);
        (Point::new(v.x, v.y), v.bulge)
    };
    curve.append(Vertex::line(at(0).0));
    for i in 0..n {
        let (start, bulge) = at(i);
        let (end, _) = at(i + 1);
        curve.append(bulge_vertex(start, end, bulge));
    }
    curve
}

fn bulge_vertex(start: Point, end: Point, bulge: f64) -> Vertex {
    if bulge.abs() < 1e-12 {
        return Vertex::line(end);
    }
    let chord = end - start;
    let d = chord.length();
    let mid = start + chord * 0.5;
    // perpendicular distance from chord midpoint to the arc center
    let s = d * (1.0 - bulge * bulge) / (4.0 * bulge);
    let u = chord.normalize();
    let c = mid + Point::new(-u.y, u.x) * s;
    if bulge > 0.0 {
        Vertex::arc_ccw(end, c)
    } else {
        Vertex::arc_cw(end, c)
    }
}
