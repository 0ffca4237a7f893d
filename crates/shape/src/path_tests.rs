use crate::geom::Polyline;
use crate::math::{point, vector, vector3, Point, Vector};
use crate::tessellation::{FillTessellator, TessellatorPool};
use crate::{Color, FillRule, Mesh, Mode, Path, Renderer};

use std::f32::consts::PI;
use std::vec::Vec;

/// Sum of the signed areas of the triangles of a mesh.
fn mesh_area(mesh: &Mesh) -> f64 {
    mesh.indices
        .chunks(3)
        .map(|tri| {
            let a = mesh.vertices[tri[0] as usize];
            let b = mesh.vertices[tri[1] as usize];
            let c = mesh.vertices[tri[2] as usize];
            let ab = (b - a).cast::<f64>();
            let ac = (c - a).cast::<f64>();
            0.5 * (ab.x * ac.y - ab.y * ac.x)
        })
        .sum()
}

fn fill_area(path: &mut Path, rule: FillRule) -> f64 {
    path.set_fill_rule(rule);
    mesh_area(path.tessellation())
}

fn curvy_path() -> Path {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0));
    path.curve_to(point(10.0, 5.0));
    path.curve_to(point(20.0, 0.0));
    path.curve_to(point(30.0, 10.0));
    path.bezier_to(point(30.0, 20.0), point(20.0, 30.0), point(10.0, 30.0));
    path.quad_bezier_to(point(10.0, 30.0), point(0.0, 30.0), point(0.0, 20.0));
    path.arc_negative(point(0.0, 10.0), 10.0, 10.0, 90.0, 270.0);
    path.close();
    path.ellipse(point(50.0, 50.0), 20.0, 10.0);
    path
}

#[test]
fn regeneration_is_idempotent() {
    let mut path = curvy_path();

    let outline = path.outline().to_vec();
    let mesh = path.tessellation().clone();
    assert_eq!(outline.len(), 2);
    assert!(!mesh.indices.is_empty());

    path.flag_shape_changed();
    assert_eq!(path.outline(), &outline[..]);
    assert_eq!(path.tessellation(), &mesh);
    assert_eq!(path.generation_stats().polylines, 2);
    assert_eq!(path.generation_stats().tessellations, 2);
}

#[test]
fn simple_polygon_area() {
    let ccw = [point(0.0, 0.0), point(6.0, 0.0), point(6.0, 2.0), point(3.0, 5.0), point(0.0, 2.0)];
    let expected = 6.0 * 2.0 + 0.5 * 6.0 * 3.0;

    let mut path = Path::new();
    path.move_to(ccw[0]);
    for &p in &ccw[1..] {
        path.line_to(p);
    }
    path.close();

    assert_eq!(path.outline()[0].signed_area() as f64, expected);
    for rule in &[FillRule::Odd, FillRule::NonZero, FillRule::Positive] {
        assert!(
            (fill_area(&mut path, *rule) - expected).abs() < 1e-4,
            "{:?}",
            rule
        );
    }
    assert_eq!(fill_area(&mut path, FillRule::Negative), 0.0);
    assert_eq!(fill_area(&mut path, FillRule::AbsGeqTwo), 0.0);

    let mut path = Path::new();
    path.move_to(ccw[0]);
    for &p in ccw[1..].iter().rev() {
        path.line_to(p);
    }
    path.close();

    for rule in &[FillRule::Odd, FillRule::NonZero, FillRule::Negative] {
        assert!(
            (fill_area(&mut path, *rule) - expected).abs() < 1e-4,
            "{:?}",
            rule
        );
    }
    assert_eq!(fill_area(&mut path, FillRule::Positive), 0.0);
}

#[test]
fn circle_resolution() {
    let mut path = Path::new();
    path.set_circle_resolution(64);
    path.arc(point(0.0, 0.0), 10.0, 10.0, 0.0, 360.0);
    path.close();

    let outline = path.outline();
    assert_eq!(outline.len(), 1);
    // The arc starts the sub-shape at its first point, the last one is dropped by
    // the close since it is at the same position.
    assert_eq!(outline[0].len(), 64);

    let area = mesh_area(path.tessellation());
    let circle = (PI * 100.0) as f64;
    assert!((area - circle).abs() < circle * 0.01);
}

#[test]
fn rectangle() {
    let mut path = Path::new();
    path.rectangle(point(1.0, 2.0), 3.0, 4.0);

    let outline = path.outline();
    assert_eq!(outline.len(), 1);
    assert!(outline[0].is_closed());
    assert_eq!(
        outline[0].points(),
        &[point(1.0, 2.0), point(4.0, 2.0), point(4.0, 6.0), point(1.0, 6.0)]
    );

    for rule in &[FillRule::Odd, FillRule::NonZero, FillRule::Positive] {
        assert_eq!(fill_area(&mut path, *rule), 12.0);
    }
}

#[test]
fn nested_rectangles() {
    let mut path = Path::new();
    path.rectangle(point(0.0, 0.0), 100.0, 100.0);
    path.rectangle(point(25.0, 25.0), 50.0, 50.0);

    assert_eq!(fill_area(&mut path, FillRule::NonZero), 10000.0);
    assert_eq!(fill_area(&mut path, FillRule::Odd), 7500.0);
    assert_eq!(fill_area(&mut path, FillRule::AbsGeqTwo), 2500.0);

    // Hole drawn in the opposite direction.
    let mut path = Path::new();
    path.rectangle(point(0.0, 0.0), 100.0, 100.0);
    path.move_to(point(25.0, 25.0));
    path.line_to(point(25.0, 75.0));
    path.line_to(point(75.0, 75.0));
    path.line_to(point(75.0, 25.0));
    path.close();

    assert_eq!(fill_area(&mut path, FillRule::Odd), 7500.0);
    assert_eq!(fill_area(&mut path, FillRule::NonZero), 7500.0);
}

#[test]
fn outline_is_cached() {
    let mut path = Path::new();
    assert!(path.cache_state().needs_polylines());

    path.move_to(point(0.0, 0.0));
    path.line_to(point(1.0, 0.0));
    assert!(path.cache_state().needs_polylines());

    path.outline();
    assert!(!path.cache_state().needs_polylines());
    assert_eq!(path.generation_stats().polylines, 1);

    path.outline();
    path.outline();
    assert_eq!(path.generation_stats().polylines, 1);

    path.line_to(point(1.0, 1.0));
    assert!(path.cache_state().needs_polylines());
    assert_eq!(path.outline()[0].len(), 3);
    assert_eq!(path.generation_stats().polylines, 2);
}

#[test]
fn mesh_is_cached() {
    let mut path = Path::new();
    path.triangle(point(0.0, 0.0), point(1.0, 0.0), point(0.0, 1.0));

    // Requesting the mesh regenerates the polylines first.
    path.tessellation();
    assert!(path.cache_state().is_clean());
    assert_eq!(path.generation_stats().polylines, 1);
    assert_eq!(path.generation_stats().tessellations, 1);

    path.tessellation();
    path.outline();
    assert_eq!(path.generation_stats().polylines, 1);
    assert_eq!(path.generation_stats().tessellations, 1);

    // Only the mesh depends on the fill rule.
    path.set_fill_rule(FillRule::NonZero);
    assert!(!path.cache_state().needs_polylines());
    assert!(path.cache_state().needs_tessellation());
    path.tessellation();
    assert_eq!(path.generation_stats().polylines, 1);
    assert_eq!(path.generation_stats().tessellations, 2);

    // Setting the same value again is not a change.
    path.set_fill_rule(FillRule::NonZero);
    path.set_filled(true);
    assert!(path.cache_state().is_clean());

    // Neither are the colors.
    path.set_hex_color(0xFF0000);
    path.set_stroke_width(3.0);
    assert!(path.cache_state().is_clean());
}

#[test]
fn fill_flag() {
    let mut path = Path::new();
    path.rectangle(point(0.0, 0.0), 10.0, 10.0);
    assert!(!path.tessellation().is_empty());

    path.set_filled(false);
    assert!(!path.cache_state().needs_polylines());
    assert!(path.cache_state().needs_tessellation());
    assert!(path.tessellation().is_empty());
    // The outline is still there.
    assert_eq!(path.outline().len(), 1);

    path.set_filled(true);
    assert_eq!(mesh_area(path.tessellation()), 100.0);
}

#[test]
fn resolution_changes() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0));
    path.bezier_to(point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0));
    assert_eq!(path.outline()[0].len(), 21);

    path.set_curve_resolution(20);
    path.set_circle_resolution(20);
    assert!(!path.cache_state().needs_polylines());
    assert_eq!(path.generation_stats().polylines, 1);

    path.set_curve_resolution(5);
    assert!(path.cache_state().needs_polylines());
    assert_eq!(path.outline()[0].len(), 6);
    assert_eq!(path.curve_resolution(), 5);
    assert_eq!(path.circle_resolution(), 20);
}

#[test]
fn clear() {
    let mut path = curvy_path();
    path.set_fill_color(Color::from_hex(0x00FF00));
    path.set_fill_rule(FillRule::NonZero);
    assert!(!path.outline().is_empty());
    assert!(!path.tessellation().is_empty());

    path.clear();
    assert!(path.commands().is_empty());
    assert!(path.outline().is_empty());
    assert!(path.tessellation().is_empty());

    assert_eq!(path.fill_color(), Color::from_hex(0x00FF00));
    assert_eq!(path.fill_rule(), FillRule::NonZero);

    // Drawing after a clear starts from the origin.
    path.line_to(point(1.0, 0.0));
    assert_eq!(
        path.outline()[0].points(),
        &[point(0.0, 0.0), point(1.0, 0.0)]
    );
}

#[test]
fn direct_geometry_edits() {
    let mut path = Path::new();
    path.rectangle(point(0.0, 0.0), 2.0, 2.0);
    path.tessellation();
    let stats = path.generation_stats();

    path.translate(vector(10.0, 0.0));
    assert!(!path.cache_state().needs_polylines());
    assert!(path.cache_state().needs_tessellation());
    assert_eq!(path.outline()[0].first(), Some(point(10.0, 0.0)));

    let mesh = path.tessellation();
    assert!(mesh.vertices.iter().all(|v| v.x >= 10.0));
    assert_eq!(path.generation_stats().polylines, stats.polylines);
    assert_eq!(
        path.generation_stats().tessellations,
        stats.tessellations + 1
    );

    path.scale(2.0, 3.0);
    assert_eq!(path.outline()[0][2], point(24.0, 6.0));
    assert_eq!(mesh_area(path.tessellation()), 24.0);

    // The commands are untouched, regenerating from them discards the edits.
    path.line_to(point(0.0, 5.0));
    let outline = path.outline();
    assert_eq!(outline[0].first(), Some(point(0.0, 0.0)));
    assert_eq!(outline[1].points(), &[point(0.0, 0.0), point(0.0, 5.0)]);
}

#[test]
fn rotate_and_simplify() {
    let mut path = Path::new();
    path.move_to(point(1.0, 0.0));
    path.line_to(point(2.0, 0.0));
    path.line_to(point(3.0, 0.001));
    path.line_to(point(4.0, 0.0));

    path.simplify(0.3);
    assert_eq!(
        path.outline()[0].points(),
        &[point(1.0, 0.0), point(4.0, 0.0)]
    );

    path.rotate_z(90.0);
    let p = path.outline()[0][1];
    assert!(p.x.abs() < 1e-5 && (p.y - 4.0).abs() < 1e-5);

    path.rotate(180.0, vector3(0.0, 1.0, 0.0));
    let p = path.outline()[0][1];
    assert!(p.x.abs() < 1e-5 && (p.y - 4.0).abs() < 1e-5);

    // A zero axis does nothing.
    path.rotate(45.0, vector3(0.0, 0.0, 0.0));
    assert_eq!(path.outline()[0][1], p);
}

#[test]
fn polyline_mode() {
    let mut path = Path::new();
    path.set_mode(Mode::Polylines);
    assert_eq!(path.mode(), Mode::Polylines);

    path.move_to(point(0.0, 0.0));
    path.line_to(point(1.0, 0.0));
    path.new_sub_path();
    path.line_to(point(1.0, 1.0));
    path.circle(point(5.0, 5.0), 1.0);

    assert!(path.commands().is_empty());

    let outline = path.outline();
    assert_eq!(outline.len(), 3);
    assert_eq!(outline[0].points(), &[point(0.0, 0.0), point(1.0, 0.0)]);
    assert_eq!(outline[1].points(), &[point(1.0, 0.0), point(1.0, 1.0)]);
    assert!(outline[2].is_closed());
    assert_eq!(outline[2].len(), 20);

    // External edits.
    path.polylines_mut().push(Polyline::from_points(
        vec![point(10.0, 10.0), point(12.0, 10.0), point(12.0, 12.0)],
        true,
    ));
    path.flag_shape_changed();
    assert_eq!(path.outline().len(), 4);
    assert!(path.cache_state().needs_tessellation());
}

#[test]
fn polyline_mode_curves() {
    let mut path = Path::new();
    path.set_mode(Mode::Polylines);
    path.set_curve_resolution(4);

    path.move_to(point(0.0, 0.0));
    path.curve_to(point(10.0, 10.0));
    path.curve_to(point(20.0, 0.0));
    path.curve_to(point(30.0, 10.0));

    // The last span is emitted when the outline is read.
    let mut commands = Path::new();
    commands.set_curve_resolution(4);
    commands.move_to(point(0.0, 0.0));
    commands.curve_to(point(10.0, 10.0));
    commands.curve_to(point(20.0, 0.0));
    commands.curve_to(point(30.0, 10.0));

    assert_eq!(path.outline(), commands.outline());
}

#[test]
fn sub_paths_match_in_both_modes() {
    let draw = |path: &mut Path| {
        path.move_to(point(0.0, 0.0));
        path.line_to(point(10.0, 0.0));
        path.new_sub_path();
        path.line_to(point(10.0, 10.0));
    };

    let mut commands = Path::new();
    draw(&mut commands);
    assert_eq!(commands.commands().len(), 4);

    let mut polylines = Path::new();
    polylines.set_mode(Mode::Polylines);
    draw(&mut polylines);

    assert_eq!(commands.outline().len(), 2);
    assert_eq!(commands.outline(), polylines.outline());
    assert_eq!(
        commands.outline()[1].points(),
        &[point(10.0, 0.0), point(10.0, 10.0)]
    );
}

#[test]
fn reading_a_pending_curve_does_not_change_it() {
    let knots = [point(10.0, 10.0), point(20.0, 0.0), point(30.0, 10.0)];

    let mut untouched = Path::new();
    untouched.set_mode(Mode::Polylines);
    let mut read = Path::new();
    read.set_mode(Mode::Polylines);

    untouched.move_to(point(0.0, 0.0));
    read.move_to(point(0.0, 0.0));
    for &knot in &knots {
        untouched.curve_to(knot);
        read.curve_to(knot);
        read.outline();
        read.tessellation();
    }

    assert_eq!(read.outline(), untouched.outline());
    assert_eq!(read.outline()[0].len(), 1 + 3 * 20);

    // A direct edit ends the run: the next knot starts a new curve.
    read.translate(vector(0.0, 0.0));
    untouched.translate(vector(0.0, 0.0));
    read.curve_to(point(40.0, 0.0));
    untouched.curve_to(point(40.0, 0.0));
    assert_eq!(read.outline(), untouched.outline());
}

#[test]
fn switching_modes() {
    let mut path = Path::new();
    path.rectangle(point(0.0, 0.0), 4.0, 4.0);

    // The outline carries over to polyline mode.
    path.set_mode(Mode::Polylines);
    assert_eq!(path.outline().len(), 1);
    assert_eq!(mesh_area(path.tessellation()), 16.0);

    path.rectangle(point(10.0, 0.0), 1.0, 1.0);
    assert_eq!(path.outline().len(), 2);
    assert_eq!(path.commands().len(), 5);

    // Back to the recorded commands.
    path.set_mode(Mode::Commands);
    assert_eq!(path.outline().len(), 1);
    assert_eq!(mesh_area(path.tessellation()), 16.0);
}

#[test]
fn has_changed() {
    let mut path = Path::new();
    assert!(path.has_changed());
    assert!(!path.has_changed());

    path.line_to(point(1.0, 1.0));
    assert!(path.has_changed());
    assert!(!path.has_changed());

    path.set_color(Color::BLACK);
    path.outline();
    assert!(!path.has_changed());

    path.flag_shape_changed();
    assert!(path.has_changed());

    path.translate(vector(1.0, 0.0));
    assert!(path.has_changed());
}

#[test]
fn style_accessors() {
    let mut path = Path::new();
    assert!(path.is_filled());
    assert!(!path.has_outline());
    assert!(path.use_shape_color());
    assert_eq!(path.fill_rule(), FillRule::Odd);
    assert_eq!(path.fill_color(), Color::WHITE);
    assert_eq!(path.stroke_color(), Color::WHITE);

    path.set_stroke_width(1.5);
    assert!(path.has_outline());
    assert_eq!(path.stroke_width(), 1.5);

    path.set_hex_color(0x112233);
    assert_eq!(path.fill_color(), Color::new(0x11, 0x22, 0x33, 255));
    assert_eq!(path.stroke_color(), Color::new(0x11, 0x22, 0x33, 255));

    path.set_fill_hex_color(0xFF0000);
    path.set_stroke_hex_color(0x0000FF);
    assert_eq!(path.fill_color(), Color::new(255, 0, 0, 255));
    assert_eq!(path.stroke_color(), Color::new(0, 0, 255, 255));

    let style = path
        .style()
        .with_filled(false)
        .with_fill_rule(FillRule::Negative);
    path.set_style(style);
    assert!(!path.is_filled());
    assert_eq!(path.fill_rule(), FillRule::Negative);
}

#[derive(Default)]
struct RecordingRenderer {
    fills: Vec<(usize, Option<Color>, Vector)>,
    strokes: Vec<(usize, Option<Color>, f32, Vector)>,
}

impl Renderer for RecordingRenderer {
    fn fill(&mut self, mesh: &Mesh, color: Option<Color>, offset: Vector) {
        self.fills.push((mesh.indices.len() / 3, color, offset));
    }

    fn stroke(
        &mut self,
        outline: &[Polyline],
        color: Option<Color>,
        line_width: f32,
        offset: Vector,
    ) {
        self.strokes.push((outline.len(), color, line_width, offset));
    }
}

#[test]
fn draw() {
    let mut path = Path::new();
    path.rectangle(point(0.0, 0.0), 1.0, 1.0);

    let mut renderer = RecordingRenderer::default();
    path.draw(&mut renderer);
    assert_eq!(
        renderer.fills,
        vec![(2, Some(Color::WHITE), vector(0.0, 0.0))]
    );
    assert!(renderer.strokes.is_empty());
    assert!(path.cache_state().is_clean());

    let mut renderer = RecordingRenderer::default();
    path.set_stroke_width(2.0);
    path.set_stroke_color(Color::BLACK);
    path.set_use_shape_color(false);
    path.draw_at(5.0, 6.0, &mut renderer);
    assert_eq!(renderer.fills, vec![(2, None, vector(5.0, 6.0))]);
    assert_eq!(renderer.strokes, vec![(1, None, 2.0, vector(5.0, 6.0))]);

    let mut renderer = RecordingRenderer::default();
    path.set_filled(false);
    path.set_use_shape_color(true);
    path.draw(&mut renderer);
    assert!(renderer.fills.is_empty());
    assert_eq!(
        renderer.strokes,
        vec![(1, Some(Color::BLACK), 2.0, vector(0.0, 0.0))]
    );
}

#[test]
fn explicit_tessellators() {
    let mut reference = curvy_path();
    let expected = reference.tessellation().clone();

    let mut tessellator = FillTessellator::new();
    let mut path = curvy_path();
    assert_eq!(path.tessellation_with(&mut tessellator), &expected);
    assert_eq!(
        path.try_tessellation_with(&mut tessellator).unwrap(),
        &expected
    );

    let pool = TessellatorPool::new();
    let mut path = curvy_path();
    assert_eq!(path.tessellation_pooled(&pool), &expected);
    assert_eq!(pool.idle_count(), 1);
    assert_eq!(path.try_tessellation().unwrap(), &expected);
    assert_eq!(path.generation_stats().tessellations, 1);
}

#[test]
fn shape_builder_sugar() {
    let mut path = Path::new();
    path.set_circle_resolution(16);
    path.rect_rounded(point(0.0, 0.0), 10.0, 10.0, 2.0);
    path.rect_rounded_corners(point(20.0, 0.0), 10.0, 10.0, 0.0, 0.0, 0.0, 0.0);
    path.ellipse(point(50.0, 5.0), 10.0, 6.0);
    path.circle(point(70.0, 5.0), 3.0);
    path.triangle(point(80.0, 0.0), point(90.0, 0.0), point(85.0, 5.0));

    let outline = path.outline();
    assert_eq!(outline.len(), 5);
    assert!(outline.iter().all(|p| p.is_closed()));
    assert_eq!(outline[1].len(), 4);
    assert_eq!(outline[2].len(), 16);
    assert_eq!(outline[3].len(), 16);
    assert_eq!(outline[4].len(), 3);

    let bounds = outline[2].bounding_box();
    assert!((bounds.max.x - 55.0).abs() < 1e-4);
    assert!((bounds.max.y - 8.0).abs() < 1e-4);
}

#[test]
fn arcs_with_direction() {
    let mut positive = Path::new();
    positive.set_circle_resolution(8);
    positive.arc_with_direction(point(0.0, 0.0), 1.0, 1.0, 0.0, 90.0, true);

    let mut negative = Path::new();
    negative.set_circle_resolution(8);
    negative.arc_with_direction(point(0.0, 0.0), 1.0, 1.0, 0.0, 90.0, false);

    // A quarter turn one way, three quarters the other way.
    assert_eq!(positive.outline()[0].len(), 3);
    assert_eq!(negative.outline()[0].len(), 7);

    let p = negative.outline()[0][1];
    assert!(p.y < 0.0);
}

#[test]
fn path_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Path>();
}

#[test]
fn points_keep_their_z() {
    let mut path = Path::new();
    path.rectangle(Point::new(0.0, 0.0, 3.0), 1.0, 1.0);

    assert!(path.outline()[0].iter().all(|p| p.z == 3.0));
    assert!(path.tessellation().vertices.iter().all(|p| p.z == 3.0));
}
