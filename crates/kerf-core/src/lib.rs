//! # Kerf Core
//!
//! Planar geometry for the kerf CAM toolkit: points, vertices, spans,
//! curves of line/arc segments, and areas with boolean operations.
//!
//! This crate is kernel-thin: curves and areas are plain owned data, and
//! boolean operations (offset, intersect, subtract) are delegated to the
//! `cavalier_contours` clipping kernel through the [`clip`] facade.
//!
//! ## Modules
//!
//! - [`geometry`] - Basic geometric types (Point, Vertex, Span, BoundingBox)
//! - [`curve`] - Ordered vertex chains with closure/orientation/area ops
//! - [`area`] - Curve collections with boolean operations and offsetting

pub mod area;
pub mod clip;
pub mod curve;
pub mod geometry;

pub use area::Area;
pub use curve::Curve;
pub use geometry::{BoundingBox, Point, Span, SpanKind, Vertex, POINT_TOLERANCE};
