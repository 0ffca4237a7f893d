use crate::geom::Polyline;
use crate::geometry_builder::{simple_builder, BuffersBuilder, NoOutput, Positions};
use crate::math::{point, point3, Point};
use crate::{
    FillOptions, FillRule, FillTessellator, FillVertex, GeometryBuilderError, TessellationError,
    VertexBuffers,
};

use alloc::vec::Vec;

const ALL_RULES: [FillRule; 5] = [
    FillRule::Odd,
    FillRule::NonZero,
    FillRule::Positive,
    FillRule::Negative,
    FillRule::AbsGeqTwo,
];

fn polygon(points: &[(f32, f32)]) -> Polyline {
    Polyline::from_points(points.iter().map(|&(x, y)| point(x, y)).collect(), true)
}

/// Counter-clockwise (with y pointing up) axis-aligned rectangle.
fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Polyline {
    polygon(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
}

fn reversed(polyline: &Polyline) -> Polyline {
    let mut points = polyline.points().to_vec();
    points.reverse();
    Polyline::from_points(points, true)
}

fn tessellate(polylines: &[Polyline], fill_rule: FillRule) -> VertexBuffers<Point, u32> {
    let mut buffers = VertexBuffers::new();
    let mut tess = FillTessellator::new();
    tess.tessellate(
        polylines,
        &FillOptions::default().with_fill_rule(fill_rule),
        &mut simple_builder(&mut buffers),
    )
    .unwrap();

    buffers
}

fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    let ab = (b - a).cast::<f64>();
    let ac = (c - a).cast::<f64>();
    0.5 * (ab.x * ac.y - ab.y * ac.x)
}

/// Sum of the signed areas of the triangles.
///
/// Also checks that no triangle is clockwise.
fn mesh_area(buffers: &VertexBuffers<Point, u32>) -> f64 {
    assert_eq!(buffers.indices.len() % 3, 0);

    let mut area = 0.0;
    for tri in buffers.indices.chunks(3) {
        let a = buffers.vertices[tri[0] as usize];
        let b = buffers.vertices[tri[1] as usize];
        let c = buffers.vertices[tri[2] as usize];
        let tri_area = triangle_area(a, b, c);
        assert!(
            tri_area >= 0.0,
            "clockwise triangle {:?} {:?} {:?}",
            a,
            b,
            c
        );
        area += tri_area;
    }

    area
}

fn fill_area(polylines: &[Polyline], fill_rule: FillRule) -> f64 {
    mesh_area(&tessellate(polylines, fill_rule))
}

#[test]
fn simple_rectangle() {
    let r = rect(0.0, 0.0, 2.0, 3.0);
    assert_eq!(r.signed_area(), 6.0);

    let expected = [6.0, 6.0, 6.0, 0.0, 0.0];
    for (rule, area) in ALL_RULES.iter().zip(expected.iter()) {
        assert_eq!(fill_area(&[r.clone()], *rule), *area, "{:?}", rule);
    }

    let buffers = tessellate(&[r], FillRule::NonZero);
    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices.len(), 6);
}

#[test]
fn clockwise_rectangle() {
    let r = reversed(&rect(1.0, 1.0, 3.0, 4.0));
    assert_eq!(r.signed_area(), -6.0);

    let expected = [6.0, 6.0, 0.0, 6.0, 0.0];
    for (rule, area) in ALL_RULES.iter().zip(expected.iter()) {
        assert_eq!(fill_area(&[r.clone()], *rule), *area, "{:?}", rule);
    }
}

#[test]
fn nested_rectangles_same_direction() {
    let shapes = [rect(0.0, 0.0, 10.0, 10.0), rect(2.0, 2.0, 8.0, 8.0)];

    assert_eq!(fill_area(&shapes, FillRule::NonZero), 100.0);
    assert_eq!(fill_area(&shapes, FillRule::Positive), 100.0);
    assert_eq!(fill_area(&shapes, FillRule::Odd), 64.0);
    assert_eq!(fill_area(&shapes, FillRule::AbsGeqTwo), 36.0);
    assert_eq!(fill_area(&shapes, FillRule::Negative), 0.0);
}

#[test]
fn nested_rectangles_opposite_direction() {
    let shapes = [rect(0.0, 0.0, 10.0, 10.0), reversed(&rect(2.0, 2.0, 8.0, 8.0))];

    assert_eq!(fill_area(&shapes, FillRule::Odd), 64.0);
    assert_eq!(fill_area(&shapes, FillRule::NonZero), 64.0);
    assert_eq!(fill_area(&shapes, FillRule::Positive), 64.0);
    assert_eq!(fill_area(&shapes, FillRule::AbsGeqTwo), 0.0);
}

#[test]
fn overlapping_rectangles() {
    let shapes = [rect(0.0, 0.0, 4.0, 4.0), rect(2.0, 2.0, 6.0, 6.0)];

    assert_eq!(fill_area(&shapes, FillRule::NonZero), 28.0);
    assert_eq!(fill_area(&shapes, FillRule::Odd), 24.0);
    assert_eq!(fill_area(&shapes, FillRule::AbsGeqTwo), 4.0);
}

#[test]
fn bow_tie() {
    let shape = [polygon(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)])];

    assert_eq!(fill_area(&shape, FillRule::NonZero), 2.0);
    assert_eq!(fill_area(&shape, FillRule::Odd), 2.0);
    assert_eq!(fill_area(&shape, FillRule::Positive), 1.0);
    assert_eq!(fill_area(&shape, FillRule::Negative), 1.0);
    assert_eq!(fill_area(&shape, FillRule::AbsGeqTwo), 0.0);
}

#[test]
fn pentagram() {
    use core::f32::consts::PI;

    let mut points = Vec::new();
    for i in 0..5 {
        let angle = PI / 2.0 + (i * 2) as f32 * 2.0 * PI / 5.0;
        points.push(point(100.0 * angle.cos(), 100.0 * angle.sin()));
    }
    let star = [Polyline::from_points(points, true)];

    let non_zero = fill_area(&star, FillRule::NonZero);
    let odd = fill_area(&star, FillRule::Odd);
    let center = fill_area(&star, FillRule::AbsGeqTwo);

    // The central pentagon has a winding number of two.
    assert!(center > 0.0);
    assert!((non_zero - odd - center).abs() < 0.1);
}

#[test]
fn regular_polygon_area() {
    use core::f32::consts::PI;

    let n = 64;
    let mut points = Vec::new();
    for i in 0..n {
        let angle = i as f32 * 2.0 * PI / n as f32;
        points.push(point(10.0 + 5.0 * angle.cos(), -3.0 + 5.0 * angle.sin()));
    }
    let polygon = Polyline::from_points(points, true);
    let expected = polygon.signed_area() as f64;

    for rule in &[FillRule::Odd, FillRule::NonZero, FillRule::Positive] {
        let area = fill_area(&[polygon.clone()], *rule);
        assert!(
            (area - expected).abs() < 1e-2,
            "{:?}: {} != {}",
            rule,
            area,
            expected
        );
    }

    // Within 1% of the area of the circle.
    let circle = PI as f64 * 25.0;
    assert!((expected - circle).abs() < circle * 0.01);
}

#[test]
fn degenerate_input() {
    let nan = f32::NAN;
    let inf = f32::INFINITY;

    let cases: Vec<Vec<Polyline>> = alloc::vec![
        alloc::vec![],
        alloc::vec![Polyline::new()],
        alloc::vec![polygon(&[(1.0, 1.0)])],
        alloc::vec![polygon(&[(0.0, 0.0), (1.0, 1.0)])],
        // Collinear.
        alloc::vec![polygon(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])],
        // Horizontal.
        alloc::vec![polygon(&[(0.0, 0.0), (1.0, 0.0), (5.0, 0.0)])],
        // Same point repeated.
        alloc::vec![polygon(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)])],
        alloc::vec![polygon(&[(nan, nan), (nan, 0.0), (0.0, nan)])],
        alloc::vec![polygon(&[(inf, 0.0), (0.0, -inf), (1.0, 1.0)])],
    ];

    for polylines in &cases {
        for rule in &ALL_RULES {
            assert_eq!(fill_area(polylines, *rule), 0.0);
        }
    }
}

#[test]
fn non_finite_points_are_skipped() {
    let shape = [polygon(&[
        (0.0, 0.0),
        (4.0, 0.0),
        (f32::NAN, 2.0),
        (4.0, 4.0),
        (0.0, 4.0),
    ])];

    assert_eq!(fill_area(&shape, FillRule::NonZero), 16.0);
}

#[test]
fn duplicate_points() {
    let shape = [polygon(&[
        (0.0, 0.0),
        (0.0, 0.0),
        (4.0, 0.0),
        (4.0, 4.0),
        (4.0, 4.0),
        (4.0, 4.0),
        (0.0, 4.0),
        (0.0, 0.0),
    ])];

    assert_eq!(fill_area(&shape, FillRule::Odd), 16.0);
}

#[test]
fn open_polylines_are_filled_as_closed() {
    let mut open = rect(0.0, 0.0, 3.0, 3.0);
    open.set_closed(false);

    assert_eq!(fill_area(&[open], FillRule::Odd), 9.0);
}

#[test]
fn interpolated_z() {
    let shape = [Polyline::from_points(
        alloc::vec![
            point3(0.0, 0.0, 0.0),
            point3(4.0, 0.0, 0.0),
            point3(4.0, 4.0, 8.0),
            point3(2.0, 2.0, 4.0),
            point3(0.0, 4.0, 8.0),
        ],
        true,
    )];

    let buffers = tessellate(&shape, FillRule::NonZero);
    assert!(!buffers.indices.is_empty());
    for v in &buffers.vertices {
        assert!((v.z - 2.0 * v.y).abs() < 1e-4, "{:?}", v);
    }
}

#[test]
fn vertex_sources() {
    let shapes = [rect(0.0, 0.0, 1.0, 1.0), rect(5.0, 0.0, 6.0, 1.0)];

    let mut buffers: VertexBuffers<(Point, u32), u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate(
            &shapes,
            &FillOptions::default(),
            &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| {
                (v.position(), v.polyline_index())
            }),
        )
        .unwrap();

    assert_eq!(buffers.vertices.len(), 8);
    for (position, polyline) in &buffers.vertices {
        let expected = if position.x < 3.0 { 0 } else { 1 };
        assert_eq!(*polyline, expected);
    }
}

#[test]
fn reuse_tessellator() {
    let shapes = [rect(0.0, 0.0, 10.0, 10.0), rect(2.0, 2.0, 8.0, 8.0)];
    let options = FillOptions::odd();

    let mut tess = FillTessellator::new();
    tess.set_logging(true);

    let mut first = VertexBuffers::new();
    let mut second = VertexBuffers::new();
    tess.tessellate(&shapes, &options, &mut simple_builder(&mut first))
        .unwrap();
    let other = [rect(-1.0, -1.0, 1.0, 1.0)];
    tess.tessellate(&other, &options, &mut NoOutput::new())
        .unwrap();
    tess.tessellate(&shapes, &options, &mut simple_builder(&mut second))
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn appends_after_existing_geometry() {
    let mut buffers = VertexBuffers::new();
    let mut tess = FillTessellator::new();
    let options = FillOptions::default();

    tess.tessellate_polyline(
        &rect(0.0, 0.0, 1.0, 1.0),
        &options,
        &mut simple_builder(&mut buffers),
    )
    .unwrap();
    tess.tessellate_polyline(
        &rect(2.0, 0.0, 3.0, 1.0),
        &options,
        &mut simple_builder(&mut buffers),
    )
    .unwrap();

    assert_eq!(buffers.vertices.len(), 8);
    assert_eq!(mesh_area(&buffers), 2.0);
    assert!(buffers.indices[6..].iter().all(|&i| i >= 4));
}

#[test]
fn too_many_vertices() {
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    buffers.vertices.resize(u16::MAX as usize - 2, point(0.0, 0.0));

    let result = FillTessellator::new().tessellate_polyline(
        &rect(0.0, 0.0, 1.0, 1.0),
        &FillOptions::default(),
        &mut BuffersBuilder::new(&mut buffers, Positions),
    );

    let expected = TessellationError::GeometryBuilder(GeometryBuilderError::TooManyVertices);
    assert_eq!(result, Err(expected));
    // The partial output is discarded.
    assert_eq!(buffers.vertices.len(), u16::MAX as usize - 2);
    assert!(buffers.indices.is_empty());
}
