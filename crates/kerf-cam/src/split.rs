//! Decomposition of an area into simple sub-areas
//!
//! A simple sub-area has exactly one outer boundary and zero or more holes.

use kerf_core::Area;
use tracing::debug;

use crate::context::JobContext;
use crate::orderer::reorder;

/// Split `area` into simple one-outer sub-areas.
///
/// When the representation links holes to outers through zero-width
/// bridges, every curve already bounds a simple region and is emitted
/// verbatim as its own sub-area. Otherwise the area is reordered and
/// walked in list order: each CCW curve opens a sub-area, each following
/// CW curve joins the current one as a hole. A hole arriving before any
/// outer is ill-formed and dropped.
pub fn split(area: &Area, ctx: &JobContext) -> Vec<Area> {
    if area.holes_linked() {
        debug!(
            curves = area.curves.len(),
            "holes linked; emitting curves verbatim"
        );
        return area
            .curves
            .iter()
            .map(|c| Area::from_curves(vec![c.clone()]))
            .collect();
    }

    let mut copy = area.clone();
    reorder(&mut copy, ctx);
    if ctx.aborted() {
        return Vec::new();
    }

    let mut out: Vec<Area> = Vec::new();
    for curve in copy.curves {
        if curve.is_clockwise() {
            if let Some(last) = out.last_mut() {
                last.append(curve);
            }
        } else {
            out.push(Area::from_curves(vec![curve]));
        }
    }
    debug!(sub_areas = out.len(), "split complete");
    out
}
