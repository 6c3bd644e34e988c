//! End-to-end pocket driver tests

use kerf_cam::{
    make_pocket, recursive_pocket, split_and_make_pocket, CamError, JobContext, PocketMode,
    PocketParams,
};
use kerf_core::{Area, BoundingBox, Curve, Point};

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Curve {
    Curve::from_points(&[
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
        Point::new(x0, y0),
    ])
}

fn unit_square_area() -> Area {
    Area::from_curves(vec![square(0.0, 0.0, 1.0, 1.0)])
}

fn curve_box(c: &Curve) -> BoundingBox {
    let mut b = BoundingBox::new();
    c.extend_box(&mut b);
    b
}

// ============================================================
// Spiral Pocketing
// ============================================================

#[test]
fn spiral_unit_square_emits_two_nested_contours() {
    let mut params = PocketParams::new(0.1, 0.2, PocketMode::Spiral);
    params.from_center = false;

    let mut toolpath = Vec::new();
    recursive_pocket(&unit_square_area(), &mut toolpath, &params, &JobContext::new()).unwrap();

    // insets at 0.1 and 0.3; the 0.5 inset collapses and is dropped
    assert_eq!(toolpath.len(), 2);
    for contour in &toolpath {
        assert!(contour.is_closed());
        assert!(contour.signed_area() > 0.0);
    }
    let outer = curve_box(&toolpath[0]);
    let inner = curve_box(&toolpath[1]);
    assert!(outer.contains(&inner));
    assert!((outer.min.x - 0.1).abs() < 1e-6);
    assert!((inner.min.x - 0.3).abs() < 1e-6);
}

#[test]
fn spiral_from_center_reverses_contour_order() {
    let mut params = PocketParams::new(0.1, 0.2, PocketMode::Spiral);
    params.from_center = true;

    let mut toolpath = Vec::new();
    recursive_pocket(&unit_square_area(), &mut toolpath, &params, &JobContext::new()).unwrap();

    assert_eq!(toolpath.len(), 2);
    let first = curve_box(&toolpath[0]);
    let second = curve_box(&toolpath[1]);
    assert!(second.contains(&first), "inner contour must come first");
}

#[test]
fn spiral_through_driver_matches_recursive_pocket() {
    let params = PocketParams::new(0.1, 0.2, PocketMode::Spiral);

    let mut via_driver = Vec::new();
    let mut ctx = JobContext::new();
    make_pocket(&unit_square_area(), &mut via_driver, &params, &mut ctx).unwrap();

    let mut direct = Vec::new();
    recursive_pocket(&unit_square_area(), &mut direct, &params, &JobContext::new()).unwrap();

    assert_eq!(via_driver.len(), direct.len());
    assert_eq!(via_driver.len(), 2);
}

#[test]
fn spiral_collapsed_region_emits_nothing() {
    // the tool does not fit at all
    let params = PocketParams::new(0.6, 0.2, PocketMode::Spiral);
    let mut toolpath = Vec::new();
    recursive_pocket(&unit_square_area(), &mut toolpath, &params, &JobContext::new()).unwrap();
    assert!(toolpath.is_empty());
}

// ============================================================
// Single Offset and Combined Modes
// ============================================================

#[test]
fn single_offset_emits_the_boundary() {
    let params = PocketParams::new(0.1, 0.2, PocketMode::SingleOffset);
    let mut curves = Vec::new();
    let mut ctx = JobContext::new();
    make_pocket(&unit_square_area(), &mut curves, &params, &mut ctx).unwrap();

    assert_eq!(curves.len(), 1);
    assert!(curves[0].is_closed());
    let bounds = curve_box(&curves[0]);
    assert!((bounds.min.x - 0.1).abs() < 1e-6);
    assert!((bounds.max.x - 0.9).abs() < 1e-6);
}

#[test]
fn zigzag_then_single_offset_appends_boundary_last() {
    let mut params = PocketParams::new(0.0, 0.25, PocketMode::ZigZagThenSingleOffset);
    params.zig_angle = 0.0;
    let mut curves = Vec::new();
    let mut ctx = JobContext::new();
    make_pocket(&unit_square_area(), &mut curves, &params, &mut ctx).unwrap();

    assert!(curves.len() >= 2);
    let boundary = curves.last().unwrap();
    assert!(boundary.is_closed());
    assert!((boundary.length() - 4.0).abs() < 1e-6);
}

// ============================================================
// Split Driver and Progress
// ============================================================

#[test]
fn split_and_make_pocket_covers_disjoint_regions() {
    let area = Area::from_curves(vec![
        square(0.0, 0.0, 1.0, 1.0),
        square(5.0, 0.0, 6.0, 1.0),
    ]);
    let params = PocketParams::new(0.0, 0.25, PocketMode::ZigZag);
    let mut curves = Vec::new();
    let mut ctx = JobContext::new();
    split_and_make_pocket(&area, &mut curves, &params, &mut ctx).unwrap();

    assert!(curves.len() >= 2);
    let handle = ctx.handle();
    assert!((handle.done() - 100.0).abs() < 0.5);
}

#[test]
fn progress_reaches_full_for_zigzag_job() {
    let area = Area::from_curves(vec![square(0.0, 0.0, 10.0, 10.0)]);
    let params = PocketParams::new(0.5, 1.0, PocketMode::ZigZag);
    let mut curves = Vec::new();
    let mut ctx = JobContext::new();
    split_and_make_pocket(&area, &mut curves, &params, &mut ctx).unwrap();
    assert!((ctx.handle().done() - 100.0).abs() < 0.5);
}

#[test]
fn empty_input_is_a_clean_no_op() {
    let params = PocketParams::new(0.1, 0.2, PocketMode::ZigZag);
    let mut curves = Vec::new();
    let mut ctx = JobContext::new();
    split_and_make_pocket(&Area::new(), &mut curves, &params, &mut ctx).unwrap();
    assert!(curves.is_empty());
}

// ============================================================
// Cancellation
// ============================================================

#[test]
fn abort_before_start_yields_empty_output() {
    let params = PocketParams::new(0.0, 0.25, PocketMode::ZigZag);
    let mut curves = Vec::new();
    let mut ctx = JobContext::new();
    ctx.handle().abort();
    make_pocket(&unit_square_area(), &mut curves, &params, &mut ctx).unwrap();
    assert!(curves.is_empty());
    assert_eq!(ctx.handle().done(), 0.0);
}

#[test]
fn abort_mid_run_returns_promptly_with_partial_output() {
    let area = Area::from_curves(vec![square(0.0, 0.0, 100.0, 100.0)]);
    let params = PocketParams::new(0.0, 0.1, PocketMode::ZigZag);
    let mut curves = Vec::new();
    let mut ctx = JobContext::new();

    let handle = ctx.handle();
    let aborter = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(10));
        handle.abort();
    });

    make_pocket(&area, &mut curves, &params, &mut ctx).unwrap();
    aborter.join().unwrap();

    assert!(ctx.aborted());
    // only chains completed before the abort survive
    assert!(curves.len() <= 1);
    assert!(ctx.handle().done() <= 100.0 + 1e-6);
}

// ============================================================
// Parameter Validation
// ============================================================

#[test]
fn rejects_non_positive_stepover() {
    let params = PocketParams::new(0.1, 0.0, PocketMode::ZigZag);
    let mut curves = Vec::new();
    let mut ctx = JobContext::new();
    let err = make_pocket(&unit_square_area(), &mut curves, &params, &mut ctx).unwrap_err();
    assert!(matches!(err, CamError::InvalidParameter(_)));
}

#[test]
fn rejects_negative_tool_radius() {
    let params = PocketParams::new(-1.0, 0.2, PocketMode::Spiral);
    let mut toolpath = Vec::new();
    let err =
        recursive_pocket(&unit_square_area(), &mut toolpath, &params, &JobContext::new())
            .unwrap_err();
    assert!(matches!(err, CamError::InvalidParameter(_)));
}

#[test]
fn params_serde_round_trip() {
    let params = PocketParams {
        tool_radius: 1.5,
        extra_offset: 0.25,
        stepover: 0.75,
        zig_angle: 30.0,
        from_center: true,
        mode: PocketMode::ZigZagThenSingleOffset,
    };
    let json = serde_json::to_string(&params).unwrap();
    let back: PocketParams = serde_json::from_str(&json).unwrap();
    assert_eq!(params, back);
}
