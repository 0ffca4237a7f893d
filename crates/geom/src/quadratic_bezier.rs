use crate::segment::Segment;
use crate::{Point, Vector};

/// A curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadraticBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * 2.0 * one_t * t + self.to.to_vector() * t2
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f32) -> Vector {
        (self.ctrl - self.from) * (2.0 * (1.0 - t)) + (self.to - self.ctrl) * (2.0 * t)
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        QuadraticBezierSegment {
            from: self.to,
            ctrl: self.ctrl,
            to: self.from,
        }
    }
}

impl Segment for QuadraticBezierSegment {
    impl_segment!();
}

#[test]
fn sample_and_derivative() {
    use crate::{point, vector};

    let q = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(2.0, 4.0),
        to: point(4.0, 0.0),
    };

    assert_eq!(q.sample(0.0), q.from);
    assert_eq!(q.sample(1.0), q.to);
    assert_eq!(q.sample(0.5), point(2.0, 2.0));
    assert_eq!(q.derivative(0.0), vector(4.0, 8.0));
    assert_eq!(q.flip().sample(0.25), q.sample(0.75));
}
