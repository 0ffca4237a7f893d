#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Vector paths with cached outlines and fill meshes.
//!
//! This crate is reexported in [pathmesh](../pathmesh/index.html).
//!
//! A [`Path`] records drawing calls and lazily derives two artifacts from them:
//! its outline (one polyline per sub-shape, see `pathmesh_path`) and its fill mesh
//! (see `pathmesh_tessellation`). Both are cached; [`CacheState`] tracks what a
//! change invalidates so that querying an unchanged path does no work.
//!
//! ## Examples
//!
//! ```
//! use pathmesh_shape::{Path, FillRule};
//! use pathmesh_shape::math::point;
//!
//! let mut path = Path::new();
//! path.set_fill_rule(FillRule::NonZero);
//! path.move_to(point(0.0, 0.0));
//! path.line_to(point(10.0, 0.0));
//! path.line_to(point(10.0, 10.0));
//! path.close();
//!
//! assert_eq!(path.outline()[0].len(), 3);
//! assert_eq!(path.tessellation().indices.len(), 3);
//!
//! // Nothing is regenerated when the path did not change.
//! let stats = path.generation_stats();
//! path.tessellation();
//! assert_eq!(path.generation_stats(), stats);
//! ```

pub use pathmesh_tessellation as tessellation;

pub use crate::tessellation::geom;
pub use crate::tessellation::math;
pub use crate::tessellation::path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod cache;
mod shape;
mod style;

#[cfg(test)]
mod path_tests;

#[doc(inline)]
pub use crate::cache::CacheState;
#[doc(inline)]
pub use crate::shape::{GenerationStats, Mesh, Path, Renderer};
#[doc(inline)]
pub use crate::style::{Color, Mode, Style};

pub use crate::path::{Command, FillRule, Resolution, ShapeBuilder};
