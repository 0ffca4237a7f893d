//! Common shapes expressed with the primitive drawing commands.
//!
//! Every shape starts a new sub-shape with a move and ends with a close, so
//! consecutive shapes never connect to each other.

use crate::commands::CommandBuffer;
use crate::math::{point3, Point};

/// Radii below this are treated as zero by the rounded rectangles.
const MIN_CORNER_RADIUS: f32 = 1e-5;

/// Builds common shapes out of moves, lines, arcs and closes.
///
/// Implementors only provide the four primitives.
pub trait ShapeBuilder {
    fn move_to(&mut self, to: Point);

    fn line_to(&mut self, to: Point);

    /// Appends an elliptic arc travelling towards increasing angles (in degrees).
    fn arc(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        angle_begin: f32,
        angle_end: f32,
    );

    fn close(&mut self);

    /// Axis-aligned rectangle going through `(x, y)`, `(x + w, y)`, `(x + w, y + h)`
    /// and `(x, y + h)` in that order.
    fn rectangle(&mut self, origin: Point, w: f32, h: f32) {
        let Point { x, y, z, .. } = origin;
        self.move_to(origin);
        self.line_to(point3(x + w, y, z));
        self.line_to(point3(x + w, y + h, z));
        self.line_to(point3(x, y + h, z));
        self.close();
    }

    /// Rectangle with the same radius at every corner.
    fn rect_rounded(&mut self, origin: Point, w: f32, h: f32, radius: f32) {
        self.rect_rounded_corners(origin, w, h, radius, radius, radius, radius);
    }

    /// Rectangle with an independent radius per corner.
    ///
    /// Negative sizes are normalized so that `origin` may be any corner. Radii are
    /// clamped to half the smaller side; when they are all zero this is a plain
    /// rectangle.
    #[allow(clippy::too_many_arguments)]
    fn rect_rounded_corners(
        &mut self,
        origin: Point,
        w: f32,
        h: f32,
        top_left: f32,
        top_right: f32,
        bottom_right: f32,
        bottom_left: f32,
    ) {
        let Point { x, y, z, .. } = origin;
        let (left, right) = if w < 0.0 { (x + w, x) } else { (x, x + w) };
        let (top, bottom) = if h < 0.0 { (y + h, y) } else { (y, y + h) };
        let w = right - left;
        let h = bottom - top;

        let max_radius = 0.5 * w.min(h);
        let clamp = |r: f32| {
            if r > MIN_CORNER_RADIUS {
                r.min(max_radius)
            } else {
                0.0
            }
        };
        let tl = clamp(top_left);
        let tr = clamp(top_right);
        let br = clamp(bottom_right);
        let bl = clamp(bottom_left);

        if tl == 0.0 && tr == 0.0 && br == 0.0 && bl == 0.0 {
            self.rectangle(point3(left, top, z), w, h);
            return;
        }

        self.move_to(point3(left + tl, top, z));

        self.line_to(point3(right - tr, top, z));
        if tr > 0.0 {
            self.arc(point3(right - tr, top + tr, z), tr, tr, 270.0, 360.0);
        }

        self.line_to(point3(right, bottom - br, z));
        if br > 0.0 {
            self.arc(point3(right - br, bottom - br, z), br, br, 0.0, 90.0);
        }

        self.line_to(point3(left + bl, bottom, z));
        if bl > 0.0 {
            self.arc(point3(left + bl, bottom - bl, z), bl, bl, 90.0, 180.0);
        }

        self.line_to(point3(left, top + tl, z));
        if tl > 0.0 {
            self.arc(point3(left + tl, top + tl, z), tl, tl, 180.0, 270.0);
        }

        self.close();
    }

    fn circle(&mut self, center: Point, radius: f32) {
        self.ellipse(center, radius * 2.0, radius * 2.0);
    }

    /// Ellipse of total width `w` and height `h` centered on `center`.
    fn ellipse(&mut self, center: Point, w: f32, h: f32) {
        let rx = w * 0.5;
        let ry = h * 0.5;
        self.move_to(point3(center.x + rx, center.y, center.z));
        self.arc(center, rx, ry, 0.0, 360.0);
        self.close();
    }

    fn triangle(&mut self, a: Point, b: Point, c: Point) {
        self.move_to(a);
        self.line_to(b);
        self.line_to(c);
        self.close();
    }
}

impl ShapeBuilder for CommandBuffer {
    fn move_to(&mut self, to: Point) {
        CommandBuffer::move_to(self, to);
    }

    fn line_to(&mut self, to: Point) {
        CommandBuffer::line_to(self, to);
    }

    fn arc(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        angle_begin: f32,
        angle_end: f32,
    ) {
        CommandBuffer::arc(self, center, radius_x, radius_y, angle_begin, angle_end);
    }

    fn close(&mut self) {
        CommandBuffer::close(self);
    }
}

#[cfg(test)]
use crate::{geom::Polyline, math::point, Command, PolylineGenerator, Resolution};

#[cfg(test)]
fn polylines(cmds: &CommandBuffer, resolution: Resolution) -> alloc::vec::Vec<Polyline> {
    let mut output = alloc::vec::Vec::new();
    PolylineGenerator::new(resolution)
        .generate(cmds.as_slice(), &mut output);
    output
}

#[test]
fn rectangle_outline() {
    let mut cmds = CommandBuffer::new();
    cmds.rectangle(point(1.0, 2.0), 3.0, 4.0);

    assert_eq!(cmds.len(), 5);
    assert_eq!(cmds.last(), Some(&Command::Close));

    let out = polylines(&cmds, Resolution::DEFAULT);
    assert_eq!(out.len(), 1);
    assert!(out[0].is_closed());
    assert_eq!(
        out[0].points(),
        &[point(1.0, 2.0), point(4.0, 2.0), point(4.0, 6.0), point(1.0, 6.0)]
    );
    assert_eq!(out[0].signed_area(), 12.0);
}

#[test]
fn rounded_rectangle() {
    let mut cmds = CommandBuffer::new();
    // The radius is clamped to 5.
    cmds.rect_rounded(point(0.0, 0.0), 20.0, 10.0, 8.0);

    let out = polylines(&cmds, Resolution::DEFAULT.with_circle(40));
    assert_eq!(out.len(), 1);
    let outline = &out[0];
    // The move, four lines and four corners of ten segments each. The end of the
    // last corner is dropped by the close. Once the radius is clamped the short
    // sides have zero length.
    assert_eq!(outline.len(), 1 + 4 + 4 * 10 - 1);

    let bounds = outline.bounding_box();
    assert!(bounds.min.x.abs() < 1e-4 && bounds.min.y.abs() < 1e-4);
    assert!((bounds.max.x - 20.0).abs() < 1e-4);
    assert!((bounds.max.y - 10.0).abs() < 1e-4);

    // Area of the rectangle minus the corners cut by quarter circles, flattened.
    let area = outline.signed_area();
    let exact = 200.0 - (4.0 - core::f32::consts::PI) * 25.0;
    assert!(area < exact && area > exact - 0.5);
}

#[test]
fn rounded_rectangle_without_radius() {
    let mut a = CommandBuffer::new();
    a.rect_rounded(point(5.0, 5.0), -4.0, 2.0, 0.0);
    let mut b = CommandBuffer::new();
    b.rectangle(point(1.0, 5.0), 4.0, 2.0);

    assert_eq!(a, b);
}

#[test]
fn rounded_rectangle_mixed_corners() {
    let mut cmds = CommandBuffer::new();
    cmds.rect_rounded_corners(point(0.0, 0.0), 10.0, 10.0, 0.0, 2.0, 0.0, 0.0);

    let arcs = cmds.iter().filter(|cmd| cmd.is_arc()).count();
    assert_eq!(arcs, 1);

    let out = polylines(&cmds, Resolution::DEFAULT.with_circle(8));
    // Two points for the rounded corner, four for the sharp ones and the start of the arc.
    assert_eq!(out[0].len(), 2 + 4);
    assert_eq!(out[0][1], point(8.0, 0.0));
}

#[test]
fn circles_and_ellipses() {
    let mut cmds = CommandBuffer::new();
    cmds.circle(point(0.0, 0.0), 1.0);
    cmds.ellipse(point(10.0, 0.0), 4.0, 2.0);

    let out = polylines(&cmds, Resolution::DEFAULT.with_circle(16));
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].len(), 16);
    assert_eq!(out[1].len(), 16);

    let bounds = out[1].bounding_box();
    assert!((bounds.min.x - 8.0).abs() < 1e-4);
    assert!((bounds.max.y - 1.0).abs() < 1e-4);
}

#[test]
fn triangle_outline() {
    let mut cmds = CommandBuffer::new();
    cmds.triangle(point(0.0, 0.0), point(2.0, 0.0), point(0.0, 2.0));

    let out = polylines(&cmds, Resolution::DEFAULT);
    assert_eq!(out[0].len(), 3);
    assert!(out[0].is_closed());
    assert_eq!(out[0].signed_area(), 2.0);
}
