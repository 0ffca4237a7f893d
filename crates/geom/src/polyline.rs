//! Ordered point sequences.

use crate::{Angle, Box3D, Point, Rotation, Vector};

use alloc::vec::Vec;
use core::ops::Index;

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// An ordered sequence of points, optionally closed.
///
/// When a polyline is closed its last point is implicitly connected to its first
/// point; the first point is not repeated at the end.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Polyline {
    points: Vec<Point>,
    closed: bool,
}

impl Polyline {
    /// Creates an empty, open polyline.
    pub fn new() -> Self {
        Polyline {
            points: Vec::new(),
            closed: false,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Polyline {
            points: Vec::with_capacity(capacity),
            closed: false,
        }
    }

    pub fn from_points(points: Vec<Point>, closed: bool) -> Self {
        Polyline { points, closed }
    }

    /// Appends a point at the end of the polyline.
    #[inline]
    pub fn add_vertex(&mut self, p: Point) {
        self.points.push(p);
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Mutable access to the point positions.
    ///
    /// The number of points can't be changed through this slice.
    #[inline]
    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<Point> {
        self.points.first().cloned()
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.points.last().cloned()
    }

    pub fn iter(&self) -> core::slice::Iter<Point> {
        self.points.iter()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Marks the polyline as closed.
    ///
    /// A trailing point equal to the first one is removed since closing the
    /// polyline already connects them.
    pub fn close(&mut self) {
        if self.points.len() > 1 {
            if let (Some(first), Some(last)) = (self.first(), self.last()) {
                if crate::points_are_close(first, last) {
                    self.points.pop();
                }
            }
        }
        self.closed = true;
    }

    /// Keeps the first `len` points.
    pub fn truncate(&mut self, len: usize) {
        self.points.truncate(len);
    }

    /// Removes all points and re-opens the polyline.
    pub fn clear(&mut self) {
        self.points.clear();
        self.closed = false;
    }

    /// Iterates over the segments of the polyline, including the closing segment
    /// if the polyline is closed.
    pub fn segments(&self) -> Segments {
        Segments {
            points: &self.points,
            idx: 0,
            closed: self.closed,
        }
    }

    /// Signed area of the projection of the polyline on the XY plane, treating it
    /// as closed.
    ///
    /// Counter-clockwise polylines (with y pointing up) have a positive area.
    pub fn signed_area(&self) -> f32 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }

        let mut double_area = 0.0;
        let mut prev = self.points[n - 1];
        for &p in &self.points {
            double_area += prev.x * p.y - p.x * prev.y;
            prev = p;
        }

        double_area * 0.5
    }

    /// Sum of the segment lengths.
    pub fn perimeter(&self) -> f32 {
        self.segments().map(|(a, b)| (b - a).length()).sum()
    }

    /// Returns the smallest box containing all points, or an empty box at the
    /// origin for an empty polyline.
    pub fn bounding_box(&self) -> Box3D {
        if self.points.is_empty() {
            return Box3D::zero();
        }

        Box3D::from_points(self.points.iter())
    }

    pub fn translate(&mut self, v: Vector) {
        for p in &mut self.points {
            *p += v;
        }
    }

    /// Rotates every point around `axis` (passing through the origin).
    ///
    /// A zero axis leaves the points untouched.
    pub fn rotate(&mut self, angle: Angle, axis: Vector) {
        if axis.square_length() == 0.0 {
            return;
        }

        let rotation = Rotation::around_axis(axis, angle);
        for p in &mut self.points {
            *p = rotation.transform_point3d(*p);
        }
    }

    /// Scales the x and y coordinates of every point.
    pub fn scale(&mut self, x: f32, y: f32) {
        for p in &mut self.points {
            p.x *= x;
            p.y *= y;
        }
    }

    /// Removes points that deviate by less than `tolerance` from the simplified
    /// shape, using the Ramer-Douglas-Peucker algorithm.
    ///
    /// The first and last points are always kept.
    pub fn simplify(&mut self, tolerance: f32) {
        let n = self.points.len();
        if n < 3 || !(tolerance > 0.0) {
            return;
        }

        let mut keep = alloc::vec![false; n];
        keep[0] = true;
        keep[n - 1] = true;

        let tolerance_sq = tolerance * tolerance;
        let mut stack = Vec::new();
        stack.push((0, n - 1));

        while let Some((start, end)) = stack.pop() {
            if end <= start + 1 {
                continue;
            }

            let a = self.points[start];
            let b = self.points[end];

            let mut max_dist_sq = -1.0;
            let mut max_idx = start;
            for (i, p) in self.points.iter().enumerate().take(end).skip(start + 1) {
                let d = square_distance_to_segment(*p, a, b);
                if d > max_dist_sq {
                    max_dist_sq = d;
                    max_idx = i;
                }
            }

            if max_dist_sq > tolerance_sq {
                keep[max_idx] = true;
                stack.push((start, max_idx));
                stack.push((max_idx, end));
            }
        }

        let mut idx = 0;
        self.points.retain(|_| {
            let k = keep[idx];
            idx += 1;
            k
        });
    }
}

impl Index<usize> for Polyline {
    type Output = Point;
    fn index(&self, idx: usize) -> &Point {
        &self.points[idx]
    }
}

impl<'l> IntoIterator for &'l Polyline {
    type Item = &'l Point;
    type IntoIter = core::slice::Iter<'l, Point>;
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Polyline::from_points(points, false)
    }
}

/// Iterator over the segments of a `Polyline`.
pub struct Segments<'l> {
    points: &'l [Point],
    idx: usize,
    closed: bool,
}

impl<'l> Iterator for Segments<'l> {
    type Item = (Point, Point);
    fn next(&mut self) -> Option<(Point, Point)> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }

        let i = self.idx;
        if i + 1 < n {
            self.idx += 1;
            return Some((self.points[i], self.points[i + 1]));
        }

        if self.closed && i + 1 == n {
            self.idx += 1;
            return Some((self.points[i], self.points[0]));
        }

        None
    }
}

fn square_distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let ap = p - a;
    let len_sq = ab.square_length();
    if len_sq == 0.0 {
        return ap.square_length();
    }

    let t = (ap.dot(ab) / len_sq).max(0.0).min(1.0);
    (ap - ab * t).square_length()
}

#[cfg(test)]
use crate::{point, point3, vector, vector3};

#[cfg(test)]
fn unit_square() -> Polyline {
    Polyline::from_points(
        alloc::vec![
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(1.0, 1.0),
            point(0.0, 1.0),
        ],
        true,
    )
}

#[test]
fn area_and_perimeter() {
    let square = unit_square();
    assert_eq!(square.signed_area(), 1.0);
    assert_eq!(square.perimeter(), 4.0);

    let mut reversed = square.clone().into_points();
    reversed.reverse();
    assert_eq!(Polyline::from_points(reversed, true).signed_area(), -1.0);

    let mut open = square.clone();
    open.set_closed(false);
    assert_eq!(open.perimeter(), 3.0);
    assert_eq!(open.segments().count(), 3);
    assert_eq!(square.segments().count(), 4);
}

#[test]
fn close_drops_duplicate_end() {
    let mut p = Polyline::new();
    p.add_vertex(point(0.0, 0.0));
    p.add_vertex(point(1.0, 0.0));
    p.add_vertex(point(0.0, 1.0));
    p.add_vertex(point(0.0, 0.0));
    p.close();
    assert!(p.is_closed());
    assert_eq!(p.len(), 3);

    let mut single = Polyline::new();
    single.add_vertex(point(2.0, 2.0));
    single.close();
    assert_eq!(single.len(), 1);
}

#[test]
fn transforms() {
    let mut p = unit_square();
    p.translate(vector(2.0, 3.0));
    assert_eq!(p[0], point(2.0, 3.0));

    p.scale(2.0, -1.0);
    assert_eq!(p[2], point(6.0, -4.0));

    let mut q = Polyline::from_points(alloc::vec![point(1.0, 0.0)], false);
    q.rotate(Angle::degrees(90.0), vector3(0.0, 0.0, 1.0));
    assert!(q[0].x.abs() < 1e-6);
    assert!((q[0].y - 1.0).abs() < 1e-6);

    // Zero axis is ignored.
    q.rotate(Angle::degrees(90.0), vector3(0.0, 0.0, 0.0));
    assert!((q[0].y - 1.0).abs() < 1e-6);

    let bounds = unit_square().bounding_box();
    assert_eq!(bounds.min, point3(0.0, 0.0, 0.0));
    assert_eq!(bounds.max, point3(1.0, 1.0, 0.0));
}

#[test]
fn simplify_collinear_points() {
    let mut p = Polyline::new();
    for i in 0..11 {
        p.add_vertex(point(i as f32, 0.0));
    }
    p.add_vertex(point(10.0, 5.0));
    p.simplify(0.1);

    assert_eq!(
        p.points(),
        &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 5.0)]
    );
}

#[test]
fn simplify_keeps_features_above_tolerance() {
    let mut p = Polyline::new();
    p.add_vertex(point(0.0, 0.0));
    p.add_vertex(point(5.0, 0.05));
    p.add_vertex(point(10.0, 0.0));
    p.add_vertex(point(15.0, 3.0));
    p.add_vertex(point(20.0, 0.0));
    p.simplify(0.3);

    assert_eq!(
        p.points(),
        &[point(0.0, 0.0), point(10.0, 0.0), point(15.0, 3.0), point(20.0, 0.0)]
    );

    // Non-positive or NaN tolerances are ignored.
    let before = p.clone();
    p.simplify(0.0);
    p.simplify(f32::NAN);
    assert_eq!(p, before);
}
