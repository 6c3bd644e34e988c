//! Pocket toolpath driver
//!
//! Composes the splitter, the zig-zag engine and the spiral engine into
//! the two public entry points: [`make_pocket`] for one area and
//! [`split_and_make_pocket`] for multi-loop input.

use kerf_core::{Area, Curve};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::JobContext;
use crate::spiral::make_one_pocket_curve;
use crate::split::split;
use crate::zigzag;
use crate::{CamError, Result};

/// Material removal strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PocketMode {
    /// Nested inward-offset contours.
    Spiral,
    /// Serpentine scan-line passes.
    ZigZag,
    /// The offset boundary only.
    SingleOffset,
    /// Scan-line passes followed by a boundary finishing pass.
    ZigZagThenSingleOffset,
}

/// Immutable pocketing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketParams {
    /// Cutter radius; combined with `extra_offset` for the initial inset.
    pub tool_radius: f64,
    /// Additional inward offset beyond the tool radius.
    pub extra_offset: f64,
    /// Scan-line spacing, or spiral step, between passes.
    pub stepover: f64,
    /// Scan direction in degrees CCW from +X (zig-zag modes).
    pub zig_angle: f64,
    /// Spiral mode: emit contours inner-first instead of outer-first.
    pub from_center: bool,
    pub mode: PocketMode,
}

impl PocketParams {
    pub fn new(tool_radius: f64, stepover: f64, mode: PocketMode) -> Self {
        Self {
            tool_radius,
            extra_offset: 0.0,
            stepover,
            zig_angle: 0.0,
            from_center: false,
            mode,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.stepover.is_finite() || self.stepover <= 0.0 {
            return Err(CamError::InvalidParameter(format!(
                "stepover must be positive, got {}",
                self.stepover
            )));
        }
        if !self.tool_radius.is_finite() || self.tool_radius < 0.0 {
            return Err(CamError::InvalidParameter(format!(
                "tool radius must be non-negative, got {}",
                self.tool_radius
            )));
        }
        if !self.extra_offset.is_finite() || self.extra_offset < 0.0 {
            return Err(CamError::InvalidParameter(format!(
                "extra offset must be non-negative, got {}",
                self.extra_offset
            )));
        }
        if !self.zig_angle.is_finite() {
            return Err(CamError::InvalidParameter(
                "zig angle must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Split a multi-loop area into simple sub-areas and pocket each one.
///
/// The split phase owns the first half of the progress budget, the
/// per-area pocketing the second half. Unit scaling is suspended for the
/// duration of the split.
pub fn split_and_make_pocket(
    area: &Area,
    curve_list: &mut Vec<Curve>,
    params: &PocketParams,
    ctx: &mut JobContext,
) -> Result<()> {
    params.validate()?;
    debug!("splitting area into simple sub-areas");
    ctx.set_progress(0.0);

    let save_units = ctx.units;
    ctx.units = 1.0;
    // jump to 50 percent after the split
    ctx.split_processing_length = 50.0;
    ctx.set_processing_length_in_split = true;
    let areas = split(area, ctx);
    ctx.set_processing_length_in_split = false;
    ctx.set_progress(ctx.split_processing_length);
    ctx.units = save_units;

    if areas.is_empty() {
        return Ok(());
    }

    let single_area_length = 50.0 / areas.len() as f64;
    debug!(areas = areas.len(), "pocketing sub-areas");
    for ar in &areas {
        if ctx.aborted() {
            return Ok(());
        }
        ctx.single_area_processing_length = single_area_length;
        make_pocket(ar, curve_list, params, ctx)?;
    }
    Ok(())
}

/// Generate the pocket toolpath for one area, appending to `curve_list`.
pub fn make_pocket(
    area: &Area,
    curve_list: &mut Vec<Curve>,
    params: &PocketParams,
    ctx: &mut JobContext,
) -> Result<()> {
    params.validate()?;
    debug!(mode = ?params.mode, "generating pocket toolpath");

    let mut offs = area.clone();
    offs.offset(params.tool_radius + params.extra_offset);

    let emitted_from = curve_list.len();

    match params.mode {
        PocketMode::ZigZag | PocketMode::ZigZagThenSingleOffset => {
            zigzag::run(&offs, curve_list, params, ctx);
        }
        PocketMode::Spiral => {
            let sub_areas = split(&offs, ctx);
            if ctx.aborted() {
                return Ok(());
            }
            if sub_areas.is_empty() {
                ctx.add_progress(ctx.single_area_processing_length);
                return Ok(());
            }
            ctx.single_area_processing_length /= sub_areas.len() as f64;
            for sub in &sub_areas {
                if ctx.aborted() {
                    return Ok(());
                }
                make_one_pocket_curve(sub, curve_list, params, ctx);
            }
        }
        PocketMode::SingleOffset => {}
    }

    if matches!(
        params.mode,
        PocketMode::SingleOffset | PocketMode::ZigZagThenSingleOffset
    ) {
        curve_list.extend(offs.curves.iter().cloned());
    }

    if ctx.fit_arcs {
        for curve in &mut curve_list[emitted_from..] {
            curve.fit_arcs(ctx.accuracy);
        }
    }
    Ok(())
}
