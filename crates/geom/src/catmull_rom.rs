use crate::segment::Segment;
use crate::Point;

/// One span of a uniform Catmull-Rom spline.
///
/// The curve goes from `from` to `to`; the tangents at these points are derived
/// from the neighbouring knots `before` and `after`. At the ends of a spline the
/// missing neighbour is usually replaced by the end point itself, which clamps the
/// tangent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CatmullRomSegment {
    pub before: Point,
    pub from: Point,
    pub to: Point,
    pub after: Point,
}

impl CatmullRomSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;

        let p0 = self.before.to_vector();
        let p1 = self.from.to_vector();
        let p2 = self.to.to_vector();
        let p3 = self.after.to_vector();

        let v = (p1 * 2.0
            + (p2 - p0) * t
            + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
            + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
            * 0.5;

        v.to_point()
    }
}

impl Segment for CatmullRomSegment {
    impl_segment!();
}

#[test]
fn interpolates_knots() {
    use crate::point;

    let s = CatmullRomSegment {
        before: point(0.0, 0.0),
        from: point(1.0, 1.0),
        to: point(2.0, 1.0),
        after: point(3.0, 0.0),
    };

    assert_eq!(s.sample(0.0), s.from);
    assert_eq!(s.sample(1.0), s.to);
    // Symmetric knots give a symmetric curve.
    let mid = s.sample(0.5);
    assert!((mid.x - 1.5).abs() < 1e-6);
    assert!(mid.y > 1.0);
}

#[test]
fn collinear_knots_stay_on_the_line() {
    use crate::point;

    let s = CatmullRomSegment {
        before: point(0.0, 0.0),
        from: point(0.0, 0.0),
        to: point(4.0, 4.0),
        after: point(4.0, 4.0),
    };

    let mut count = 0;
    s.for_each_subdivision(10, &mut |p| {
        count += 1;
        assert!((p.x - p.y).abs() < 1e-5);
    });
    assert_eq!(count, 10);
}
