//! Spiral pocketing by recursive inward offsetting
//!
//! Each recursion level offsets the boundary inward by the stepover and
//! descends into every resulting loop until the region collapses. The
//! accumulated contours flatten into the toolpath outer-first, or
//! inner-first when cutting from the center.

use std::collections::VecDeque;

use kerf_core::{Area, Curve};
use tracing::trace;

use crate::context::JobContext;
use crate::pocket::PocketParams;
use crate::Result;

/// Generate a spiral pocket toolpath for `area`.
///
/// The area is first offset inward by `tool_radius + extra_offset`, then
/// recursively offset by `stepover`; every contour visited is emitted as
/// one closed toolpath curve.
pub fn recursive_pocket(
    area: &Area,
    toolpath: &mut Vec<Curve>,
    params: &PocketParams,
    ctx: &JobContext,
) -> Result<()> {
    params.validate()?;
    let mut offs = area.clone();
    offs.offset(params.tool_radius + params.extra_offset);

    let mut contours = VecDeque::new();
    pocket_recursion(&offs, &mut contours, params, ctx, 0);

    for a in contours {
        toolpath.extend(a.curves);
    }
    Ok(())
}

/// Spiral contour emitter for one simple (already offset) sub-area.
pub fn make_one_pocket_curve(
    area: &Area,
    toolpath: &mut Vec<Curve>,
    params: &PocketParams,
    ctx: &JobContext,
) {
    let mut contours = VecDeque::new();
    pocket_recursion(area, &mut contours, params, ctx, 0);
    for a in contours {
        toolpath.extend(a.curves);
    }
}

fn pocket_recursion(
    area: &Area,
    contours: &mut VecDeque<Area>,
    params: &PocketParams,
    ctx: &JobContext,
    depth: usize,
) {
    trace!(depth, loops = area.curves.len(), "spiral descent");
    if params.from_center {
        contours.push_front(area.clone());
    } else {
        contours.push_back(area.clone());
    }

    let mut offs = area.clone();
    offs.offset(params.stepover);

    for curve in offs.curves {
        if ctx.aborted() {
            return;
        }
        let sub = Area::from_curves(vec![curve]);
        pocket_recursion(&sub, contours, params, ctx, depth + 1);
    }
}
