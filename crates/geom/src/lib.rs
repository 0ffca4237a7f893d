#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Simple geometric primitives on top of euclid.
//!
//! This crate is reexported in [pathmesh](../pathmesh/index.html).
//!
//! # Overview.
//!
//! This crate implements the maths needed to turn resolution-independent drawing
//! instructions into point sequences:
//!
//! - points and vectors (three dimensional, most operations happen in the XY plane),
//! - polylines (ordered point sequences that may be closed),
//! - quadratic and cubic bézier curves,
//! - Catmull-Rom segments,
//! - elliptic arcs.
//!
//! # Subdivision
//!
//! Curves are approximated with a fixed number of straight segments rather than with
//! a tolerance threshold. The number of segments is chosen by the caller (the "curve
//! resolution" for curves and the "circle resolution" for arcs, where a full turn uses
//! that many segments and partial arcs use a proportional fraction).
//!
//! ```
//! use pathmesh_geom::{point, CubicBezierSegment, Segment};
//!
//! let curve = CubicBezierSegment {
//!     from: point(0.0, 0.0),
//!     ctrl1: point(1.0, 2.0),
//!     ctrl2: point(3.0, 2.0),
//!     to: point(4.0, 0.0),
//! };
//!
//! let mut points = Vec::new();
//! curve.for_each_subdivision(8, &mut |p| points.push(p));
//!
//! assert_eq!(points.len(), 8);
//! assert_eq!(points[7], point(4.0, 0.0));
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

#[macro_use]
mod segment;
pub mod arc;
mod catmull_rom;
mod cubic_bezier;
pub mod polyline;
mod quadratic_bezier;

#[doc(inline)]
pub use crate::arc::{Arc, SweepDirection};
#[doc(inline)]
pub use crate::catmull_rom::CatmullRomSegment;
#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::polyline::Polyline;
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;
#[doc(inline)]
pub use crate::segment::Segment;

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Alias for ```euclid::default::Point3D<f32>```.
pub type Point = euclid::default::Point3D<f32>;

/// Alias for ```euclid::default::Vector3D<f32>```.
pub type Vector = euclid::default::Vector3D<f32>;

/// Alias for ```euclid::default::Vector2D<f32>```, used for the radii of ellipses.
pub type Radii = euclid::default::Vector2D<f32>;

/// Alias for ```euclid::default::Box3D<f32>```.
pub type Box3D = euclid::default::Box3D<f32>;

/// Alias for ```euclid::default::Rotation3D<f32>```.
pub type Rotation = euclid::default::Rotation3D<f32>;

/// An angle in radians (f32).
pub type Angle = euclid::Angle<f32>;

/// Shorthand for `Point::new(x, y, 0.0)`.
#[inline]
pub fn point(x: f32, y: f32) -> Point {
    Point::new(x, y, 0.0)
}

/// Shorthand for `Point::new(x, y, z)`.
#[inline]
pub fn point3(x: f32, y: f32, z: f32) -> Point {
    Point::new(x, y, z)
}

/// Shorthand for `Vector::new(x, y, 0.0)`.
#[inline]
pub fn vector(x: f32, y: f32) -> Vector {
    Vector::new(x, y, 0.0)
}

/// Shorthand for `Vector::new(x, y, z)`.
#[inline]
pub fn vector3(x: f32, y: f32, z: f32) -> Vector {
    Vector::new(x, y, z)
}

/// Returns true if the two points are equal up to a relative tolerance of `1e-6`.
///
/// Used to avoid emitting a duplicate point when a curve starts exactly where
/// the previous one ended.
#[inline]
pub fn points_are_close(a: Point, b: Point) -> bool {
    let scale = 1.0f32.max(a.x.abs()).max(a.y.abs()).max(a.z.abs());
    let epsilon = scale * 1e-6;
    (a.x - b.x).abs() <= epsilon && (a.y - b.y).abs() <= epsilon && (a.z - b.z).abs() <= epsilon
}

#[test]
fn close_points() {
    assert!(points_are_close(point(1.0, 2.0), point(1.0, 2.0)));
    assert!(points_are_close(point(1000.0, 0.0), point(1000.0001, 0.0)));
    assert!(!points_are_close(point(0.0, 0.0), point(0.001, 0.0)));
    let above = point3(0.0, 0.0, 1.0);
    assert!(!points_are_close(point3(0.0, 0.0, 0.0), above));
}
