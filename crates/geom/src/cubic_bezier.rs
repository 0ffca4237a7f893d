use crate::segment::Segment;
use crate::{Point, Vector};

/// A curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * 3.0 * one_t2 * t
            + self.ctrl2.to_vector() * 3.0 * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f32) -> Vector {
        let t2 = t * t;
        let c0 = -3.0 * t2 + 6.0 * t - 3.0;
        let c1 = 9.0 * t2 - 12.0 * t + 3.0;
        let c2 = -9.0 * t2 + 6.0 * t;
        let c3 = 3.0 * t2;

        self.from.to_vector() * c0
            + self.ctrl1.to_vector() * c1
            + self.ctrl2.to_vector() * c2
            + self.to.to_vector() * c3
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }
}

impl Segment for CubicBezierSegment {
    impl_segment!();
}

#[cfg(test)]
use crate::point;

#[test]
fn sample_end_points() {
    let c = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 1.0),
        ctrl2: point(2.0, 1.0),
        to: point(3.0, 0.0),
    };

    assert_eq!(c.sample(0.0), c.from);
    assert_eq!(c.sample(1.0), c.to);
    assert_eq!(c.sample(0.5), point(1.5, 0.75));
}

#[test]
fn derivative_at_end_points() {
    let c = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 1.0),
        ctrl2: point(2.0, 1.0),
        to: point(3.0, 0.0),
    };

    assert_eq!(c.derivative(0.0), (c.ctrl1 - c.from) * 3.0);
    assert_eq!(c.derivative(1.0), (c.to - c.ctrl2) * 3.0);
}

#[test]
fn subdivision() {
    let c = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 10.0),
        ctrl2: point(10.0, 10.0),
        to: point(10.0, 0.0),
    };

    let mut points = std::vec::Vec::new();
    c.for_each_subdivision(4, &mut |p| points.push(p));

    assert_eq!(points.len(), 4);
    assert_eq!(points[1], c.sample(0.5));
    assert_eq!(points[3], c.to);

    let mut count = 0;
    c.flip().for_each_subdivision(0, &mut |p| {
        count += 1;
        assert_eq!(p, c.from);
    });
    assert_eq!(count, 1);
}
