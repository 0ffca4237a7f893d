use crate::geom::euclid::default::Point3D;
use crate::geom::Polyline;
use crate::geometry_builder::{FillGeometryBuilder, GeometryBuilderError};
use crate::path::FillRule;
use crate::{FillOptions, FillVertex, TessellationResult, VertexId};

use alloc::vec::Vec;
use core::slice;

#[cfg(not(feature = "std"))]
use num_traits::Float;

type DPoint = Point3D<f64>;

/// Slab boundaries closer than this (relative to their magnitude) are merged.
const MERGE_THRESHOLD: f64 = 1e-9;

const NO_SLAB: u32 = u32::MAX;

#[cfg(all(debug_assertions, feature = "std"))]
macro_rules! tess_log {
    ($obj:ident, $fmt:expr) => (
        if $obj.log {
            std::println!($fmt);
        }
    );
    ($obj:ident, $fmt:expr, $($arg:tt)*) => (
        if $obj.log {
            std::println!($fmt, $($arg)*);
        }
    );
}

#[cfg(not(all(debug_assertions, feature = "std")))]
macro_rules! tess_log {
    ($obj:ident, $fmt:expr) => {};
    ($obj:ident, $fmt:expr, $($arg:tt)*) => {};
}

/// A non-horizontal edge of the input, oriented from top (smaller y) to bottom.
#[derive(Copy, Clone, Debug)]
struct Edge {
    upper: DPoint,
    lower: DPoint,
    /// Contribution to the winding number of the regions on its right.
    winding: i32,
    polyline: u32,
    segment: u32,
    /// Vertices already generated on this edge, keyed by slab boundary index.
    ///
    /// Consecutive boundaries use different slots.
    vertices: [(u32, VertexId); 2],
}

impl Edge {
    fn point_at(&self, y: f64) -> DPoint {
        let t = (y - self.upper.y) / (self.lower.y - self.upper.y);
        self.upper.lerp(self.lower, t.max(0.0).min(1.0))
    }

    fn x_at(&self, y: f64) -> f64 {
        self.point_at(y).x
    }
}

/// Active edge in a slab, sorted by `x`.
#[derive(Copy, Clone, Debug)]
struct ActiveEdge {
    x: f64,
    edge: usize,
}

/// A Context object that can tessellate fill operations for polylines.
///
/// ## Overview
///
/// The fill tessellation algorithm cuts the plane into horizontal slabs: every y
/// coordinate of an input point or of an intersection between two edges is the boundary
/// of a slab, so that no two edges cross inside a slab. In each slab the edges are sorted
/// from left to right and their winding contributions are accumulated; each run of regions
/// that the fill rule selects becomes a trapezoid, emitted as two triangles.
///
/// The tessellator is meant to be reused: it keeps its internal buffers between calls so
/// that repeated tessellations do not allocate once the buffers have grown.
///
/// ## Input
///
/// Every polyline is treated as a closed contour regardless of its closed flag. Polylines
/// with fewer than three points, horizontal or zero-length edges and points with non-finite
/// coordinates do not contribute to the output. Self-intersections, overlapping contours,
/// duplicated points and collinear edges are supported.
///
/// ## Output
///
/// Triangles are counter-clockwise with y pointing up. Vertices lie on the input edges and
/// their z coordinate is interpolated along the edge they were generated on. Vertices are
/// shared between the triangles of a column of trapezoids along the same edge but not across
/// edges, so a point of the input can be emitted several times.
///
/// ## Examples
///
/// ```
/// use pathmesh_tessellation::{FillTessellator, FillOptions, FillRule, VertexBuffers};
/// use pathmesh_tessellation::geometry_builder::simple_builder;
/// use pathmesh_tessellation::geom::Polyline;
/// use pathmesh_tessellation::math::{point, Point};
///
/// // A self-intersecting "bow tie".
/// let polyline = Polyline::from_points(
///     vec![point(0.0, 0.0), point(2.0, 2.0), point(2.0, 0.0), point(0.0, 2.0)],
///     true,
/// );
///
/// let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
/// let mut tessellator = FillTessellator::new();
/// tessellator.tessellate_polyline(
///     &polyline,
///     &FillOptions::non_zero(),
///     &mut simple_builder(&mut buffers),
/// ).unwrap();
///
/// // Each of the two lobes is cut in two triangles at the crossing.
/// assert_eq!(buffers.indices.len(), 4 * 3);
/// ```
pub struct FillTessellator {
    edges: Vec<Edge>,
    /// Edge indices sorted by the y coordinate of their upper point.
    sorted: Vec<usize>,
    slabs: Vec<f64>,
    active: Vec<usize>,
    scan: Vec<ActiveEdge>,
    points: Vec<DPoint>,
    pub(crate) log: bool,
}

impl Default for FillTessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl FillTessellator {
    /// Constructor.
    pub fn new() -> Self {
        #[cfg(all(debug_assertions, feature = "std"))]
        let log = std::env::var("PATHMESH_FORCE_LOGGING").is_ok();
        #[cfg(not(all(debug_assertions, feature = "std")))]
        let log = false;

        FillTessellator {
            edges: Vec::new(),
            sorted: Vec::new(),
            slabs: Vec::new(),
            active: Vec::new(),
            scan: Vec::new(),
            points: Vec::new(),
            log,
        }
    }

    /// Compute the tessellation of a set of polylines.
    ///
    /// The result is written into `output` between a `begin_geometry` and an `end_geometry`
    /// call. On error, `abort_geometry` is called instead.
    pub fn tessellate(
        &mut self,
        polylines: &[Polyline],
        options: &FillOptions,
        output: &mut dyn FillGeometryBuilder,
    ) -> TessellationResult {
        self.build_edges(polylines);
        self.build_slabs();

        tess_log!(
            self,
            "tessellating {} polylines: {} edges, {} slab boundaries, fill rule {:?}",
            polylines.len(),
            self.edges.len(),
            self.slabs.len(),
            options.fill_rule
        );

        output.begin_geometry();

        match self.sweep(options.fill_rule, output) {
            Ok(()) => {
                output.end_geometry();
                Ok(())
            }
            Err(e) => {
                tess_log!(self, "tessellation failed: {:?}", e);
                output.abort_geometry();
                Err(e.into())
            }
        }
    }

    /// Tessellate a single polyline.
    pub fn tessellate_polyline(
        &mut self,
        polyline: &Polyline,
        options: &FillOptions,
        output: &mut dyn FillGeometryBuilder,
    ) -> TessellationResult {
        self.tessellate(slice::from_ref(polyline), options, output)
    }

    /// Enable/disable some verbose logging during the tessellation, for
    /// debugging purposes.
    pub fn set_logging(&mut self, is_enabled: bool) {
        #[cfg(all(debug_assertions, feature = "std"))]
        let forced = std::env::var("PATHMESH_FORCE_LOGGING").is_ok();

        #[cfg(not(all(debug_assertions, feature = "std")))]
        let forced = false;

        self.log = is_enabled || forced;
    }

    fn build_edges(&mut self, polylines: &[Polyline]) {
        self.edges.clear();

        for (polyline_idx, polyline) in polylines.iter().enumerate() {
            // Points with non-finite coordinates are skipped so that the contour stays closed.
            self.points.clear();
            self.points.extend(
                polyline
                    .iter()
                    .filter(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
                    .map(|p| p.cast::<f64>()),
            );

            let n = self.points.len();
            if n < 3 {
                continue;
            }

            for i in 0..n {
                let from = self.points[i];
                let to = self.points[(i + 1) % n];
                if from.y == to.y {
                    continue;
                }

                let (upper, lower, winding) = if from.y < to.y {
                    (from, to, -1)
                } else {
                    (to, from, 1)
                };

                self.edges.push(Edge {
                    upper,
                    lower,
                    winding,
                    polyline: polyline_idx as u32,
                    segment: i as u32,
                    vertices: [(NO_SLAB, VertexId::INVALID); 2],
                });
            }
        }

        self.sorted.clear();
        self.sorted.extend(0..self.edges.len());
        let edges = &self.edges;
        self.sorted
            .sort_by(|a, b| edges[*a].upper.y.total_cmp(&edges[*b].upper.y));
    }

    fn build_slabs(&mut self) {
        self.slabs.clear();

        for edge in &self.edges {
            self.slabs.push(edge.upper.y);
            self.slabs.push(edge.lower.y);
        }

        // Edges are sorted by their upper y, so only the edges that start before the
        // current one ends can intersect it.
        for (i, &a) in self.sorted.iter().enumerate() {
            let edge_a = &self.edges[a];
            for &b in &self.sorted[i + 1..] {
                let edge_b = &self.edges[b];
                if edge_b.upper.y >= edge_a.lower.y {
                    break;
                }

                if let Some(y) = intersection_y(edge_a, edge_b) {
                    self.slabs.push(y);
                }
            }
        }

        self.slabs.sort_by(|a, b| a.total_cmp(b));
        self.slabs.dedup_by(|y, prev| {
            *y - *prev <= MERGE_THRESHOLD * prev.abs().max(1.0)
        });
    }

    fn sweep(
        &mut self,
        fill_rule: FillRule,
        output: &mut dyn FillGeometryBuilder,
    ) -> Result<(), GeometryBuilderError> {
        self.active.clear();
        let mut next_edge = 0;

        for slab in 1..self.slabs.len() {
            let y0 = self.slabs[slab - 1];
            let y1 = self.slabs[slab];
            let mid = (y0 + y1) * 0.5;

            while next_edge < self.sorted.len()
                && self.edges[self.sorted[next_edge]].upper.y < mid
            {
                self.active.push(self.sorted[next_edge]);
                next_edge += 1;
            }

            let edges = &self.edges;
            self.active.retain(|&e| edges[e].lower.y > mid);

            self.scan.clear();
            for &edge in &self.active {
                self.scan.push(ActiveEdge {
                    x: edges[edge].x_at(mid),
                    edge,
                });
            }
            self.scan.sort_by(|a, b| a.x.total_cmp(&b.x));

            let mut winding = 0;
            let mut span_start = None;
            for i in 0..self.scan.len() {
                let edge = self.scan[i].edge;
                winding += self.edges[edge].winding;
                let inside = fill_rule.is_in(winding);

                match span_start {
                    None if inside => {
                        span_start = Some(edge);
                    }
                    Some(left) if !inside => {
                        span_start = None;
                        let slab_top = (slab - 1) as u32;
                        self.fill_span(left, edge, slab_top, y0, y1, output)?;
                    }
                    _ => {}
                }
            }

            debug_assert!(span_start.is_none());
        }

        Ok(())
    }

    /// Emits the trapezoid between two edges of a slab.
    fn fill_span(
        &mut self,
        left: usize,
        right: usize,
        slab_top: u32,
        y0: f64,
        y1: f64,
        output: &mut dyn FillGeometryBuilder,
    ) -> Result<(), GeometryBuilderError> {
        let top_width = self.edges[right].x_at(y0) - self.edges[left].x_at(y0);
        let bottom_width = self.edges[right].x_at(y1) - self.edges[left].x_at(y1);

        if top_width > 0.0 {
            let l0 = self.vertex(left, slab_top, y0, output)?;
            let r0 = self.vertex(right, slab_top, y0, output)?;
            let r1 = self.vertex(right, slab_top + 1, y1, output)?;
            output.add_triangle(l0, r0, r1);
        }

        if bottom_width > 0.0 {
            let l0 = self.vertex(left, slab_top, y0, output)?;
            let r1 = self.vertex(right, slab_top + 1, y1, output)?;
            let l1 = self.vertex(left, slab_top + 1, y1, output)?;
            output.add_triangle(l0, r1, l1);
        }

        Ok(())
    }

    fn vertex(
        &mut self,
        edge_idx: usize,
        slab: u32,
        y: f64,
        output: &mut dyn FillGeometryBuilder,
    ) -> Result<VertexId, GeometryBuilderError> {
        let edge = &mut self.edges[edge_idx];
        let slot = (slab & 1) as usize;
        if edge.vertices[slot].0 == slab {
            return Ok(edge.vertices[slot].1);
        }

        let id = output.add_fill_vertex(FillVertex {
            position: edge.point_at(y).cast::<f32>(),
            polyline: edge.polyline,
            segment: edge.segment,
        })?;
        edge.vertices[slot] = (slab, id);

        Ok(id)
    }
}

/// Returns the y coordinate where the two edges cross, if they cross at a point that
/// is strictly inside both of them.
fn intersection_y(a: &Edge, b: &Edge) -> Option<f64> {
    let r = a.lower - a.upper;
    let s = b.lower - b.upper;
    let denom = r.x * s.y - r.y * s.x;
    if denom == 0.0 {
        return None;
    }

    let qp = b.upper - a.upper;
    let t = (qp.x * s.y - qp.y * s.x) / denom;
    let u = (qp.x * r.y - qp.y * r.x) / denom;

    if t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0 {
        Some(a.upper.y + t * r.y)
    } else {
        None
    }
}

#[test]
fn edge_interpolation() {
    let edge = Edge {
        upper: DPoint::new(0.0, 0.0, 0.0),
        lower: DPoint::new(4.0, 2.0, 8.0),
        winding: 1,
        polyline: 0,
        segment: 0,
        vertices: [(NO_SLAB, VertexId::INVALID); 2],
    };

    assert_eq!(edge.point_at(1.0), DPoint::new(2.0, 1.0, 4.0));
    assert_eq!(edge.point_at(2.0), edge.lower);
    // Clamped to the edge.
    assert_eq!(edge.point_at(-1.0), edge.upper);
    assert_eq!(edge.x_at(3.0), 4.0);
}

#[test]
fn crossing_edges() {
    let edge = |x0: f64, y0: f64, x1: f64, y1: f64| Edge {
        upper: DPoint::new(x0, y0, 0.0),
        lower: DPoint::new(x1, y1, 0.0),
        winding: 1,
        polyline: 0,
        segment: 0,
        vertices: [(NO_SLAB, VertexId::INVALID); 2],
    };

    let a = edge(0.0, 0.0, 2.0, 2.0);
    let b = edge(2.0, 0.0, 0.0, 2.0);
    assert_eq!(intersection_y(&a, &b), Some(1.0));

    // Parallel.
    let c = edge(1.0, 0.0, 3.0, 2.0);
    assert_eq!(intersection_y(&a, &c), None);

    // Touching at an endpoint.
    let d = edge(2.0, 2.0, 5.0, 3.0);
    assert_eq!(intersection_y(&a, &d), None);

    // Lines cross outside of the segments.
    let e = edge(3.0, 0.0, 4.0, 1.0);
    let f = edge(10.0, 0.0, 9.0, 1.0);
    assert_eq!(intersection_y(&e, &f), None);
}
