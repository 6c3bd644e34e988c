//! Tests for curve reordering and hole nesting

use kerf_cam::{reorder, JobContext};
use kerf_core::{Area, Curve, Point};
use pretty_assertions::assert_eq;

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Curve {
    Curve::from_points(&[
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
        Point::new(x0, y0),
    ])
}

fn reversed(mut c: Curve) -> Curve {
    c.reverse();
    c
}

// ============================================================
// Orientation
// ============================================================

#[test]
fn fixes_wrong_windings() {
    // outer handed in clockwise, hole counter-clockwise: both wrong
    let mut area = Area::from_curves(vec![
        reversed(square(0.0, 0.0, 10.0, 10.0)),
        square(3.0, 3.0, 7.0, 7.0),
    ]);
    reorder(&mut area, &JobContext::new());

    assert_eq!(area.curves.len(), 2);
    assert!(area.curves[0].signed_area() > 0.0, "outer must be CCW");
    assert!(area.curves[1].is_clockwise(), "hole must be CW");
    assert!((area.area(false) - 84.0).abs() < 1e-9);
}

#[test]
fn reorder_is_idempotent() {
    let mut area = Area::from_curves(vec![
        square(3.0, 3.0, 7.0, 7.0),
        reversed(square(0.0, 0.0, 10.0, 10.0)),
    ]);
    let ctx = JobContext::new();
    reorder(&mut area, &ctx);
    let once = area.clone();
    reorder(&mut area, &ctx);
    assert_eq!(once, area);
}

// ============================================================
// Nesting
// ============================================================

#[test]
fn hole_listed_after_its_outer() {
    // hole inserted before its container: the outer must adopt it
    let mut area = Area::from_curves(vec![
        square(3.0, 3.0, 7.0, 7.0),
        square(0.0, 0.0, 10.0, 10.0),
    ]);
    reorder(&mut area, &JobContext::new());

    assert_eq!(area.curves.len(), 2);
    let outer_box = {
        let mut b = kerf_core::BoundingBox::new();
        area.curves[0].extend_box(&mut b);
        b
    };
    let hole_box = {
        let mut b = kerf_core::BoundingBox::new();
        area.curves[1].extend_box(&mut b);
        b
    };
    assert!(outer_box.contains(&hole_box));
}

#[test]
fn two_outers_each_with_hole() {
    let mut area = Area::from_curves(vec![
        square(0.0, 0.0, 10.0, 10.0),
        square(3.0, 3.0, 7.0, 7.0),
        square(20.0, 0.0, 30.0, 10.0),
        square(23.0, 3.0, 27.0, 7.0),
    ]);
    reorder(&mut area, &JobContext::new());

    assert_eq!(area.curves.len(), 4);
    // pre-order: outer, its hole, outer, its hole
    assert!(!area.curves[0].is_clockwise());
    assert!(area.curves[1].is_clockwise());
    assert!(!area.curves[2].is_clockwise());
    assert!(area.curves[3].is_clockwise());
    assert!((area.area(false) - 168.0).abs() < 1e-9);
}

#[test]
fn island_inside_hole_is_an_outer_again() {
    let mut area = Area::from_curves(vec![
        square(0.0, 0.0, 10.0, 10.0),
        square(2.0, 2.0, 8.0, 8.0),
        square(4.0, 4.0, 6.0, 6.0),
    ]);
    reorder(&mut area, &JobContext::new());

    assert_eq!(area.curves.len(), 3);
    assert!(!area.curves[0].is_clockwise());
    assert!(area.curves[1].is_clockwise());
    assert!(!area.curves[2].is_clockwise(), "depth two is an outer again");
}

// ============================================================
// Degenerate Input
// ============================================================

#[test]
fn duplicate_curves_collapse() {
    let mut area = Area::from_curves(vec![
        square(0.0, 0.0, 10.0, 10.0),
        square(0.0, 0.0, 10.0, 10.0),
    ]);
    reorder(&mut area, &JobContext::new());
    assert_eq!(area.curves.len(), 1);
}

#[test]
fn duplicate_with_opposite_winding_collapses() {
    let mut area = Area::from_curves(vec![
        square(0.0, 0.0, 10.0, 10.0),
        reversed(square(0.0, 0.0, 10.0, 10.0)),
    ]);
    reorder(&mut area, &JobContext::new());
    assert_eq!(area.curves.len(), 1);
    assert!(!area.curves[0].is_clockwise());
}

#[test]
fn empty_area_is_untouched() {
    let mut area = Area::new();
    reorder(&mut area, &JobContext::new());
    assert!(area.is_empty());
}
