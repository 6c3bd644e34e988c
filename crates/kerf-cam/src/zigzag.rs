//! Zig-zag pocketing engine
//!
//! The area is rotated so scan lines are horizontal, cut into stepover-high
//! bands, and each band intersection is walked to extract a cutting "zig"
//! along with its along-boundary "zag" connector. Pairs are then stitched
//! into continuous serpentine paths.
//!
//! All per-call scratch lives in a [`ZigZagSession`] created per call.

use kerf_core::{Area, Curve, Point, Vertex};
use tracing::trace;

use crate::context::JobContext;
use crate::pocket::PocketParams;

/// Run the zig-zag engine over a pre-offset area, appending open toolpath
/// curves to `sink`.
pub(crate) fn run(area: &Area, sink: &mut Vec<Curve>, params: &PocketParams, ctx: &JobContext) {
    ZigZagSession::new(params, ctx, sink).run(area, ctx);
}

struct ZigZagPair {
    zig: Curve,
    zag: Curve,
}

/// Per-call scratch: rotation parameters, band state and collected pairs.
struct ZigZagSession<'a> {
    sink: &'a mut Vec<Curve>,
    stepover: f64,
    tol: f64,
    // into the working frame (rotate by -zig_angle) and back out
    sin_rot: f64,
    cos_rot: f64,
    sin_unrot: f64,
    cos_unrot: f64,
    rightward: bool,
    pairs: Vec<ZigZagPair>,
}

impl<'a> ZigZagSession<'a> {
    fn new(params: &PocketParams, ctx: &JobContext, sink: &'a mut Vec<Curve>) -> Self {
        let radians = params.zig_angle.to_radians();
        Self {
            sink,
            stepover: params.stepover,
            tol: ctx.point_tolerance(),
            sin_rot: (-radians).sin(),
            cos_rot: (-radians).cos(),
            sin_unrot: radians.sin(),
            cos_unrot: radians.cos(),
            rightward: true,
            pairs: Vec::new(),
        }
    }

    fn run(&mut self, area: &Area, ctx: &JobContext) {
        if area.is_empty() {
            ctx.add_progress(ctx.single_area_processing_length);
            return;
        }

        let mut a = area.clone();
        self.rotate_area(&mut a);

        let bounds = a.bounding_box();
        // stretch the bands past the boundary so every scan line crosses it
        let x0 = bounds.min.x - 1.0;
        let x1 = bounds.max.x + 1.0;
        let num_steps = (bounds.height() / self.stepover).ceil() as usize + 1;
        let mut y = bounds.min.y;
        self.rightward = true;

        if ctx.aborted() {
            return;
        }
        let step_increment = 0.8 * ctx.single_area_processing_length / num_steps as f64;

        for band in 0..num_steps {
            if ctx.aborted() {
                return;
            }
            let y0 = y;
            y += self.stepover;
            let mut slice = Area::from_curves(vec![band_rect(x0, x1, y0, y)]);
            slice.intersect(&a);
            trace!(band, pieces = slice.curves.len(), "band intersected");
            for curve in &slice.curves {
                self.make_zig_curve(curve, y0, y);
            }
            self.rightward = !self.rightward;
            ctx.add_progress(step_increment);
        }

        self.reorder_zigs();
        ctx.add_progress(0.2 * ctx.single_area_processing_length);
    }

    /// Extract the zig/zag pair of one closed band sub-curve.
    fn make_zig_curve(&mut self, input: &Curve, y0: f64, y1: f64) {
        let mut curve = input.clone();
        if self.rightward == curve.is_clockwise() {
            curve.reverse();
        }

        let verts = &curve.vertices;
        let n = verts.len();
        if n < 3 {
            return;
        }
        let ring = n - 1;

        // extreme-x vertices on the top and bottom scan rows
        let mut top_left: Option<usize> = None;
        let mut top_right: Option<usize> = None;
        let mut bottom_left: Option<usize> = None;
        for (i, v) in verts.iter().enumerate() {
            self.test_row_point(verts, i, v.p, y1, !self.rightward, &mut top_right);
            self.test_row_point(verts, i, v.p, y1, self.rightward, &mut top_left);
            self.test_row_point(verts, i, v.p, y0, self.rightward, &mut bottom_left);
        }

        let Some(start) = bottom_left.or(top_left) else {
            return;
        };
        let (mut end, mut zag_end) = match top_right {
            Some(tr) => (tr, top_left.unwrap_or(tr)),
            None => match bottom_left {
                Some(bl) => (bl, bl),
                None => return,
            },
        };
        if end <= start {
            end += ring;
        }
        if zag_end <= start {
            zag_end += ring;
        }

        // cyclic walk over the ring; indices past n wrap skipping the seed
        let at = |k: usize| {
            if k < n {
                verts[k]
            } else {
                verts[k - ring]
            }
        };

        let mut zig = Curve::new();
        for k in start..=end {
            zig.append(self.unrotated_vertex(&at(k)));
        }
        let mut zag = Curve::new();
        if zag_end > end {
            for k in end..=zag_end {
                zag.append(self.unrotated_vertex(&at(k)));
            }
        }
        self.pairs.push(ZigZagPair { zig, zag });
    }

    /// Track the extreme-x vertex on the scan row at `row_y`.
    fn test_row_point(
        &self,
        verts: &[Vertex],
        i: usize,
        p: Point,
        row_y: f64,
        left_not_right: bool,
        best: &mut Option<usize>,
    ) {
        if (p.y - row_y).abs() >= self.tol {
            return;
        }
        match best {
            None => *best = Some(i),
            Some(j) => {
                let bx = verts[*j].p.x;
                if (left_not_right && p.x < bx) || (!left_not_right && p.x > bx) {
                    *best = Some(i);
                }
            }
        }
    }

    /// Stitch collected pairs into chains and flatten them into the sink.
    fn reorder_zigs(&mut self) {
        let pairs = std::mem::take(&mut self.pairs);
        let mut chains: Vec<Vec<ZigZagPair>> = Vec::new();

        for mut pair in pairs {
            // a zag starting on an earlier zig is internal to an emitted path
            if pair.zag.vertices.len() > 1 {
                let zag_start = pair.zag.vertices[0].p;
                let internal = chains.iter().flatten().any(|z| {
                    z.zig
                        .vertices
                        .iter()
                        .any(|v| v.p.coincident(&zag_start, self.tol))
                });
                if internal {
                    pair.zag.vertices.clear();
                }
            }

            let zig_start = pair.zig.start_point();
            let target = zig_start.and_then(|zs| {
                chains.iter().position(|chain| {
                    chain
                        .last()
                        .and_then(|p| p.zig.end_point())
                        .map_or(false, |e| e.coincident(&zs, self.tol))
                })
            });
            match target {
                Some(i) => chains[i].push(pair),
                None => chains.push(vec![pair]),
            }
        }

        for chain in chains {
            if chain.is_empty() {
                continue;
            }
            let mut path = Curve::new();
            let last = chain.len() - 1;
            for (i, pair) in chain.iter().enumerate() {
                for (j, v) in pair.zig.vertices.iter().enumerate() {
                    if j == 0 && i != 0 {
                        continue;
                    }
                    path.append(*v);
                }
                if i == last {
                    for v in pair.zag.vertices.iter().skip(1) {
                        path.append(*v);
                    }
                }
            }
            self.sink.push(path);
        }
    }

    fn rotate_area(&self, area: &mut Area) {
        for curve in &mut area.curves {
            for v in &mut curve.vertices {
                *v = rotated(v, self.cos_rot, self.sin_rot);
            }
        }
    }

    fn unrotated_vertex(&self, v: &Vertex) -> Vertex {
        rotated(v, self.cos_unrot, self.sin_unrot)
    }
}

fn rotated(v: &Vertex, cos_a: f64, sin_a: f64) -> Vertex {
    let mut out = *v;
    out.p = v.p.rotated(cos_a, sin_a);
    if v.kind.is_arc() {
        out.c = v.c.rotated(cos_a, sin_a);
    } else {
        out.c = Point::ZERO;
    }
    out
}

fn band_rect(x0: f64, x1: f64, y0: f64, y1: f64) -> Curve {
    Curve::from_points(&[
        Point::new(x0, y0),
        Point::new(x0, y1),
        Point::new(x1, y1),
        Point::new(x1, y0),
        Point::new(x0, y0),
    ])
}
