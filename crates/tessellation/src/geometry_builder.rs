//! Tools to help with generating vertex and index buffers.
//!
//! ## Overview
//!
//! The tessellator does not write vertex and index buffers itself. It hands every vertex
//! and triangle to a geometry builder, so that users can produce their own vertex layout
//! without converting the output afterwards.
//!
//! See:
//!
//! * [`GeometryBuilder`](trait.GeometryBuilder.html)
//! * [`FillGeometryBuilder`](trait.FillGeometryBuilder.html)
//!
//! It is very common to push vertices and indices into a pair of vectors, so to facilitate
//! this pattern this module also provides:
//!
//! * The struct [`VertexBuffers`](struct.VertexBuffers.html) is a simple pair of vectors of
//!   indices and vertices (generic parameters).
//! * The struct [`BuffersBuilder`](struct.BuffersBuilder.html) which writes into a
//!   [`VertexBuffers`](struct.VertexBuffers.html) and implements the geometry builder
//!   traits. It takes care of filling the buffers while producing vertices is delegated
//!   to a vertex constructor.
//! * The trait [`FillVertexConstructor`](trait.FillVertexConstructor.html) in order to
//!   generate any vertex type. The [`Positions`](struct.Positions.html) constructor just
//!   returns the vertex position untransformed.
//!
//! ## Examples
//!
//! ```
//! use pathmesh_tessellation::{FillVertexConstructor, VertexBuffers, BuffersBuilder};
//! use pathmesh_tessellation::{FillOptions, FillTessellator, FillVertex};
//! use pathmesh_tessellation::geom::Polyline;
//! use pathmesh_tessellation::math::point;
//!
//! // Our custom vertex.
//! #[derive(Copy, Clone, Debug)]
//! pub struct MyVertex {
//!   position: [f32; 2],
//!   color: [f32; 4],
//! }
//!
//! // The vertex constructor. This is the object that will be used to create the custom
//! // vertices from the information provided by the tessellator.
//! struct WithColor([f32; 4]);
//!
//! impl FillVertexConstructor<MyVertex> for WithColor {
//!     fn new_vertex(&mut self, vertex: FillVertex) -> MyVertex {
//!         let p = vertex.position();
//!         MyVertex {
//!             position: [p.x, p.y],
//!             color: self.0,
//!         }
//!     }
//! }
//!
//! let triangle = Polyline::from_points(
//!     vec![point(0.0, 0.0), point(10.0, 0.0), point(5.0, 5.0)],
//!     true,
//! );
//!
//! let mut output: VertexBuffers<MyVertex, u16> = VertexBuffers::new();
//! let mut tessellator = FillTessellator::new();
//! tessellator.tessellate_polyline(
//!     &triangle,
//!     &FillOptions::default(),
//!     &mut BuffersBuilder::new(&mut output, WithColor([1.0, 0.0, 0.0, 1.0])),
//! ).unwrap();
//!
//! assert_eq!(output.indices.len(), 3);
//! ```

pub use crate::error::GeometryBuilderError;
use crate::math::Point;
use crate::{FillVertex, Index, VertexId};

use alloc::vec::Vec;
use core::convert::From;
use core::ops::Add;

/// An interface separating tessellators and other geometry generation algorithms from the
/// actual vertex construction.
///
/// See the [`geometry_builder`](index.html) module documentation for more detailed explanation.
pub trait GeometryBuilder {
    /// Called at the beginning of a generation.
    ///
    /// end_geometry must be called before begin_geometry is called again.
    fn begin_geometry(&mut self) {}

    /// Called at the end of a generation.
    fn end_geometry(&mut self) {}

    /// Insert a triangle made of vertices that were added after the last call to begin_geometry.
    ///
    /// This method can only be called between begin_geometry and end_geometry.
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId);

    /// abort_geometry is called instead of end_geometry if an error occurred while producing
    /// the geometry and we won't be able to finish.
    ///
    /// The implementation is expected to discard the geometry that was generated since the last
    /// time begin_geometry was called, and to remain in a usable state.
    fn abort_geometry(&mut self) {}
}

/// A Geometry builder to interface with the [`FillTessellator`](../struct.FillTessellator.html).
///
/// Types implementing this trait must also implement the
/// [`GeometryBuilder`](trait.GeometryBuilder.html) trait.
pub trait FillGeometryBuilder: GeometryBuilder {
    /// Inserts a vertex and returns its id.
    ///
    /// The id is only valid between begin_geometry and end_geometry.
    fn add_fill_vertex(&mut self, vertex: FillVertex) -> Result<VertexId, GeometryBuilderError>;
}

/// Structure that holds the vertex and index data.
///
/// Usually written into though temporary `BuffersBuilder` objects.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexBuffers<OutputVertex, OutputIndex> {
    pub vertices: Vec<OutputVertex>,
    pub indices: Vec<OutputIndex>,
}

impl<OutputVertex, OutputIndex> VertexBuffers<OutputVertex, OutputIndex> {
    /// Constructor
    pub fn new() -> Self {
        VertexBuffers::with_capacity(0, 0)
    }

    /// Constructor
    pub fn with_capacity(num_vertices: usize, num_indices: usize) -> Self {
        VertexBuffers {
            vertices: Vec::with_capacity(num_vertices),
            indices: Vec::with_capacity(num_indices),
        }
    }

    /// Empty the buffers without freeing memory, for reuse without reallocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A temporary view on a `VertexBuffers` object which facilitate the population of vertex and index
/// data.
///
/// `BuffersBuilders` record the vertex offset from when they are created so that algorithms using
/// them don't need to worry about offsetting indices if some geometry was added beforehand.
///
/// The `FillVertexConstructor` does the translation from `FillVertex` to `OutputVertex`.
pub struct BuffersBuilder<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor> {
    buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>,
    first_vertex: Index,
    first_index: Index,
    vertex_offset: Index,
    vertex_constructor: Ctor,
}

impl<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor>
    BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
{
    pub fn new(buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>, ctor: Ctor) -> Self {
        let first_vertex = buffers.vertices.len() as Index;
        let first_index = buffers.indices.len() as Index;
        BuffersBuilder {
            buffers,
            first_vertex,
            first_index,
            vertex_offset: first_vertex,
            vertex_constructor: ctor,
        }
    }

    pub fn buffers<'a, 'b: 'a>(&'b self) -> &'a VertexBuffers<OutputVertex, OutputIndex> {
        self.buffers
    }
}

/// A trait specifying how to create vertex values.
pub trait FillVertexConstructor<OutputVertex> {
    fn new_vertex(&mut self, vertex: FillVertex) -> OutputVertex;
}

/// A simple vertex constructor that just takes the position.
pub struct Positions;

impl FillVertexConstructor<Point> for Positions {
    fn new_vertex(&mut self, vertex: FillVertex) -> Point {
        vertex.position()
    }
}

impl<F, OutputVertex> FillVertexConstructor<OutputVertex> for F
where
    F: Fn(FillVertex) -> OutputVertex,
{
    fn new_vertex(&mut self, vertex: FillVertex) -> OutputVertex {
        self(vertex)
    }
}

/// A `BuffersBuilder` that takes the actual vertex type as input.
pub type SimpleBuffersBuilder<'l> = BuffersBuilder<'l, Point, u32, Positions>;

/// Creates a `SimpleBuffersBuilder`.
pub fn simple_builder(buffers: &mut VertexBuffers<Point, u32>) -> SimpleBuffersBuilder {
    BuffersBuilder::new(buffers, Positions)
}

impl<'l, OutputVertex, OutputIndex, Ctor> GeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
{
    fn begin_geometry(&mut self) {
        self.first_vertex = self.buffers.vertices.len() as Index;
        self.first_index = self.buffers.indices.len() as Index;
        self.vertex_offset = self.first_vertex;
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
        debug_assert!(a != VertexId::INVALID);
        debug_assert!(b != VertexId::INVALID);
        debug_assert!(c != VertexId::INVALID);
        self.buffers.indices.push((a + self.vertex_offset).into());
        self.buffers.indices.push((b + self.vertex_offset).into());
        self.buffers.indices.push((c + self.vertex_offset).into());
    }

    fn abort_geometry(&mut self) {
        self.buffers.vertices.truncate(self.first_vertex as usize);
        self.buffers.indices.truncate(self.first_index as usize);
    }
}

impl<'l, OutputVertex, OutputIndex, Ctor> FillGeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
    Ctor: FillVertexConstructor<OutputVertex>,
{
    fn add_fill_vertex(&mut self, vertex: FillVertex) -> Result<VertexId, GeometryBuilderError> {
        let len = self.buffers.vertices.len();
        if len >= OutputIndex::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.buffers
            .vertices
            .push(self.vertex_constructor.new_vertex(vertex));

        Ok(VertexId((len - self.first_vertex as usize) as Index))
    }
}

/// A geometry builder that does not output any geometry.
///
/// Mostly useful for testing.
pub struct NoOutput {
    next_vertex: u32,
}

impl NoOutput {
    pub fn new() -> Self {
        NoOutput { next_vertex: 0 }
    }
}

impl Default for NoOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryBuilder for NoOutput {
    fn begin_geometry(&mut self) {
        self.next_vertex = 0;
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
    }
}

impl FillGeometryBuilder for NoOutput {
    fn add_fill_vertex(&mut self, _vertex: FillVertex) -> Result<VertexId, GeometryBuilderError> {
        if self.next_vertex == u32::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.next_vertex += 1;
        Ok(VertexId(self.next_vertex - 1))
    }
}

/// Provides the maximum value of an index.
///
/// This should be the maximum value representable by the index type up
/// to u32::MAX because the tessellator can't internally represent more
/// than u32::MAX indices.
pub trait MaxIndex {
    const MAX: usize;
}

impl MaxIndex for u16 {
    const MAX: usize = u16::MAX as usize;
}
impl MaxIndex for u32 {
    const MAX: usize = u32::MAX as usize;
}
impl MaxIndex for usize {
    const MAX: usize = u32::MAX as usize;
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn vertex(x: f32, y: f32) -> FillVertex {
    FillVertex {
        position: point(x, y),
        polyline: 0,
        segment: 0,
    }
}

#[test]
fn buffers_builder_offsets_indices() {
    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    buffers.vertices.push(point(-1.0, -1.0));

    let mut builder = simple_builder(&mut buffers);
    builder.begin_geometry();
    let a = builder.add_fill_vertex(vertex(0.0, 0.0)).unwrap();
    let b = builder.add_fill_vertex(vertex(1.0, 0.0)).unwrap();
    let c = builder.add_fill_vertex(vertex(0.0, 1.0)).unwrap();
    assert_eq!((a, b, c), (VertexId(0), VertexId(1), VertexId(2)));
    builder.add_triangle(a, b, c);
    builder.end_geometry();

    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices, &[1, 2, 3]);
    assert_eq!(buffers.num_triangles(), 1);
}

#[test]
fn abort_discards_geometry() {
    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    {
        let mut builder = simple_builder(&mut buffers);
        builder.begin_geometry();
        let a = builder.add_fill_vertex(vertex(0.0, 0.0)).unwrap();
        let b = builder.add_fill_vertex(vertex(1.0, 0.0)).unwrap();
        let c = builder.add_fill_vertex(vertex(0.0, 1.0)).unwrap();
        builder.add_triangle(a, b, c);
        builder.abort_geometry();
    }

    assert!(buffers.is_empty());
    assert!(buffers.vertices.is_empty());
}

#[test]
fn too_many_vertices() {
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    buffers.vertices.resize(u16::MAX as usize, point(0.0, 0.0));

    let mut builder = BuffersBuilder::new(&mut buffers, Positions);
    builder.begin_geometry();
    assert_eq!(
        builder.add_fill_vertex(vertex(0.0, 0.0)),
        Err(GeometryBuilderError::TooManyVertices)
    );
}
