#![deny(bare_trait_objects)]

//! Vector paths turned into outlines and triangle meshes.
//!
//! # Crates
//!
//! This meta-crate (`pathmesh`) reexports the following sub-crates for convenience:
//!
//! * **pathmesh_geom** - Points, polylines, bézier and Catmull-Rom segments, elliptic arcs.
//! * **pathmesh_path** - Drawing commands and their conversion into polylines.
//! * **pathmesh_tessellation** - Triangulation of polylines under a fill rule.
//! * **pathmesh_shape** - Paths caching their outline and fill mesh.
//!
//! Each `pathmesh_<name>` crate is reexported as a `<name>` module in `pathmesh`. For example:
//!
//! ```ignore
//! extern crate pathmesh_tessellation;
//! use pathmesh_tessellation::FillTessellator;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate pathmesh;
//! use pathmesh::tessellation::FillTessellator;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Filling a rounded rectangle with a hole
//!
//! ```
//! use pathmesh::math::point;
//! use pathmesh::shape::{FillRule, Path};
//!
//! let mut path = Path::new();
//! path.set_fill_rule(FillRule::Odd);
//! path.rect_rounded(point(0.0, 0.0), 200.0, 100.0, 10.0);
//! path.circle(point(100.0, 50.0), 20.0);
//!
//! // One polyline per sub-shape.
//! assert_eq!(path.outline().len(), 2);
//!
//! // The circle is a hole in the mesh.
//! let mesh = path.tessellation();
//! println!(
//!     " -- {} vertices {} indices",
//!     mesh.vertices.len(),
//!     mesh.indices.len()
//! );
//! ```
//!
//! ## Using the pipeline stages directly
//!
//! ```
//! use pathmesh::math::{point, Point};
//! use pathmesh::path::{CommandBuffer, PolylineGenerator, Resolution, ShapeBuilder};
//! use pathmesh::tessellation::{FillOptions, FillTessellator, VertexBuffers};
//! use pathmesh::tessellation::geometry_builder::simple_builder;
//!
//! let mut commands = CommandBuffer::new();
//! commands.ellipse(point(0.0, 0.0), 10.0, 5.0);
//!
//! let mut polylines = Vec::new();
//! PolylineGenerator::new(Resolution::DEFAULT).generate(commands.as_slice(), &mut polylines);
//!
//! let mut geometry: VertexBuffers<Point, u32> = VertexBuffers::new();
//! FillTessellator::new().tessellate(
//!     &polylines,
//!     &FillOptions::non_zero(),
//!     &mut simple_builder(&mut geometry),
//! ).unwrap();
//!
//! assert!(!geometry.indices.is_empty());
//! ```

pub extern crate pathmesh_shape;

pub use pathmesh_shape as shape;
pub use shape::tessellation;
pub use tessellation::geom;
pub use tessellation::path;

pub use path::math;
