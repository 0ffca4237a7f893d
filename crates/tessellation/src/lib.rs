#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]
#![no_std]

//! Triangulation of filled polylines.
//!
//! This crate is reexported in [pathmesh](../pathmesh/index.html).
//!
//! ## Overview
//!
//! The most interesting types and traits of this crate are:
//!
//! * [FillTessellator](struct.FillTessellator.html) - Turns a set of polylines into a
//!   triangle mesh covering the region selected by a [`FillRule`].
//! * [`GeometryBuilder`](geometry_builder/trait.GeometryBuilder.html) - (See the documentation
//!   of the [geometry_builder module](geometry_builder/index.html)) which the tessellator is
//!   built on. This trait provides an interface for types that help with building and assembling
//!   the vertices and triangles that form the tessellation, usually in the form of arbitrary
//!   vertex and index buffers.
//!
//! ## The tessellation pipeline
//!
//! Shapes are first flattened into polylines (see the `pathmesh_path` crate), then handed to
//! the tessellator. Every polyline is considered closed for the purpose of filling, whether it
//! was explicitly closed or not.
//!
//! The tessellator computes the winding number of every region of the plane: each contour
//! that goes around a point counter-clockwise (with the y axis pointing up) adds one, each
//! contour going around it clockwise subtracts one. The fill rule then decides, from that
//! number, which regions are inside.
//!
//! ## Examples
//!
//! ```
//! use pathmesh_tessellation::{FillTessellator, FillOptions, FillRule, VertexBuffers};
//! use pathmesh_tessellation::geometry_builder::simple_builder;
//! use pathmesh_tessellation::geom::Polyline;
//! use pathmesh_tessellation::math::{point, Point};
//!
//! // A square with a square hole, both drawn in the same direction.
//! let outer = Polyline::from_points(
//!     vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)],
//!     true,
//! );
//! let inner = Polyline::from_points(
//!     vec![point(2.0, 2.0), point(8.0, 2.0), point(8.0, 8.0), point(2.0, 8.0)],
//!     true,
//! );
//!
//! let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
//! let mut tessellator = FillTessellator::new();
//!
//! tessellator.tessellate(
//!     &[outer, inner],
//!     &FillOptions::odd(),
//!     &mut simple_builder(&mut buffers),
//! ).unwrap();
//!
//! // The hole is not covered.
//! assert!(!buffers.indices.is_empty());
//! assert_eq!(buffers.indices.len() % 3, 0);
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use pathmesh_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
mod fill;
pub mod geometry_builder;
#[cfg(feature = "std")]
mod pool;

#[cfg(test)]
mod fill_tests;

pub use crate::path::math;

pub use crate::path::geom;

#[doc(inline)]
pub use crate::fill::*;

#[doc(inline)]
pub use crate::geometry_builder::{
    BuffersBuilder, FillGeometryBuilder, FillVertexConstructor, GeometryBuilder, NoOutput,
    VertexBuffers,
};

#[doc(inline)]
pub use crate::error::*;

#[cfg(feature = "std")]
#[doc(inline)]
pub use crate::pool::{PooledTessellator, TessellatorPool};

pub use crate::path::FillRule;

use crate::math::Point;
use core::ops::Add;

/// Parameters for the fill tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FillOptions {
    /// Set the fill rule.
    ///
    /// Default value: `Odd`.
    pub fill_rule: FillRule,
}

impl FillOptions {
    /// Default Fill rule.
    pub const DEFAULT_FILL_RULE: FillRule = FillRule::Odd;

    pub const DEFAULT: Self = FillOptions {
        fill_rule: Self::DEFAULT_FILL_RULE,
    };

    #[inline]
    pub fn odd() -> Self {
        Self::DEFAULT
    }

    #[inline]
    pub fn non_zero() -> Self {
        Self::DEFAULT.with_fill_rule(FillRule::NonZero)
    }

    #[inline]
    pub const fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Extra vertex information from the `FillTessellator`, accessible when building vertices.
///
/// Every vertex produced by the tessellator lies on an edge of the input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FillVertex {
    pub(crate) position: Point,
    pub(crate) polyline: u32,
    pub(crate) segment: u32,
}

impl FillVertex {
    pub fn position(&self) -> Point {
        self.position
    }

    /// Index of the polyline the vertex was generated from.
    pub fn polyline_index(&self) -> u32 {
        self.polyline
    }

    /// Index of the polyline segment the vertex lies on.
    ///
    /// Segment `i` goes from point `i` to point `i + 1`, the last one wrapping around to
    /// the first point.
    pub fn segment_index(&self) -> u32 {
        self.segment
    }
}

type Index = u32;

/// A virtual vertex offset in a geometry.
///
/// The `VertexId`s are only valid between `GeometryBuilder::begin_geometry` and
/// `GeometryBuilder::end_geometry`. `GeometryBuilder` implementations typically translate
/// the ids internally so that first `VertexId` after `begin_geometry` is zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexId(pub Index);

impl VertexId {
    pub const INVALID: VertexId = VertexId(u32::MAX);
}

impl Add<u32> for VertexId {
    type Output = Self;
    fn add(self, rhs: u32) -> Self {
        VertexId(self.0 + rhs)
    }
}

impl From<VertexId> for u16 {
    fn from(v: VertexId) -> Self {
        v.0 as u16
    }
}
impl From<VertexId> for u32 {
    fn from(v: VertexId) -> Self {
        v.0
    }
}
impl From<VertexId> for usize {
    fn from(v: VertexId) -> Self {
        v.0 as usize
    }
}

#[test]
fn fill_options() {
    assert_eq!(FillOptions::default().fill_rule, FillRule::Odd);
    assert_eq!(FillOptions::non_zero().fill_rule, FillRule::NonZero);
    assert_eq!(
        FillOptions::odd()
            .with_fill_rule(FillRule::AbsGeqTwo)
            .fill_rule,
        FillRule::AbsGeqTwo
    );
}
