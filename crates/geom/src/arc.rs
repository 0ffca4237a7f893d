//! Elliptic arc related maths and tools.

use crate::segment::Segment;
use crate::{point3, Angle, Point, Radii};

use core::f32::consts::PI;

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Which way an arc travels from its start angle to its end angle.
///
/// Angles grow from the positive x axis towards the positive y axis. With y
/// pointing down (screen coordinates) increasing angles appear clockwise, which
/// is why the drawing API calls this direction "clockwise".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SweepDirection {
    Increasing,
    Decreasing,
}

impl SweepDirection {
    pub fn from_clockwise(clockwise: bool) -> Self {
        if clockwise {
            SweepDirection::Increasing
        } else {
            SweepDirection::Decreasing
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            SweepDirection::Increasing => 1.0,
            SweepDirection::Decreasing => -1.0,
        }
    }
}

/// An elliptic arc curve segment in the XY plane.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Arc {
    pub center: Point,
    pub radii: Radii,
    pub start_angle: Angle,
    /// Signed: negative values sweep towards decreasing angles.
    pub sweep_angle: Angle,
}

/// Sweep differences smaller than this are treated as zero.
const FULL_TURN_THRESHOLD: f32 = 1e-4;

/// Minimum number of segments per full turn, below which a closed ellipse would
/// collapse into a flat shape.
const MIN_FULL_TURN_SEGMENTS: u32 = 3;

/// Minimum number of segments for any arc.
const MIN_ARC_SEGMENTS: u32 = 2;

fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

impl Arc {
    /// Builds an arc from angles expressed in degrees.
    ///
    /// Both angles are wrapped into `[0, 360)`. The arc starts at `angle_begin`
    /// and travels in `direction` until it reaches `angle_end`, so the amount
    /// of sweep is always in `(0, 360]`. Equal angles (for example `0` and `360`)
    /// describe a full ellipse.
    pub fn from_degrees(
        center: Point,
        radius_x: f32,
        radius_y: f32,
        angle_begin: f32,
        angle_end: f32,
        direction: SweepDirection,
    ) -> Self {
        let begin = wrap_degrees(angle_begin);
        let end = wrap_degrees(angle_end);

        let mut sweep = match direction {
            SweepDirection::Increasing => end - begin,
            SweepDirection::Decreasing => begin - end,
        };
        if sweep < 0.0 {
            sweep += 360.0;
        }
        if sweep.abs() < FULL_TURN_THRESHOLD {
            sweep = 360.0;
        }

        Arc {
            center,
            radii: Radii::new(radius_x, radius_y),
            start_angle: Angle::degrees(begin),
            sweep_angle: Angle::degrees(sweep * direction.sign()),
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let angle = self.start_angle.radians + self.sweep_angle.radians * t;
        self.point_at_angle(angle)
    }

    /// Start of the arc.
    pub fn from(&self) -> Point {
        self.sample(0.0)
    }

    /// End of the arc.
    pub fn to(&self) -> Point {
        self.sample(1.0)
    }

    /// Whether the arc goes all the way around the ellipse.
    pub fn is_full_turn(&self) -> bool {
        (self.sweep_angle.radians.abs() - 2.0 * PI).abs() < FULL_TURN_THRESHOLD
    }

    /// Number of segments used to approximate this arc when a full turn is
    /// approximated with `circle_resolution` segments.
    ///
    /// Partial arcs use the proportional fraction, rounded up, with a minimum of
    /// two segments. Resolutions lower than three are raised to three so that a
    /// full ellipse never degenerates into a flat shape.
    pub fn num_segments(&self, circle_resolution: u32) -> u32 {
        let resolution = circle_resolution.max(MIN_FULL_TURN_SEGMENTS);
        if self.is_full_turn() {
            return resolution;
        }

        let fraction = self.sweep_angle.radians.abs() / (2.0 * PI);
        // The degrees to radians round trip can push exact fractions slightly up.
        let n = (resolution as f32 * fraction - 1e-3).ceil();
        // Casting NaN to an integer produces zero.
        (n as u32).min(resolution).max(MIN_ARC_SEGMENTS)
    }

    /// Approximates the arc with `self.num_segments(circle_resolution)` segments.
    ///
    /// Like `Segment::for_each_subdivision`, the start point is not emitted.
    pub fn for_each_flattened<F: FnMut(Point)>(&self, circle_resolution: u32, callback: &mut F) {
        self.for_each_subdivision(self.num_segments(circle_resolution), callback);
    }

    fn point_at_angle(&self, angle: f32) -> Point {
        let (sin, cos) = angle.sin_cos();
        point3(
            self.center.x + self.radii.x * cos,
            self.center.y + self.radii.y * sin,
            self.center.z,
        )
    }
}

impl Segment for Arc {
    fn from(&self) -> Point {
        self.from()
    }
    fn to(&self) -> Point {
        self.to()
    }
    fn sample(&self, t: f32) -> Point {
        self.sample(t)
    }
}

#[cfg(test)]
use crate::point;

#[test]
fn full_turn_from_equal_angles() {
    let a = Arc::from_degrees(
        point(0.0, 0.0),
        1.0,
        1.0,
        0.0,
        360.0,
        SweepDirection::Increasing,
    );
    assert!(a.is_full_turn());
    assert_eq!(a.num_segments(64), 64);

    let b = Arc::from_degrees(
        point(0.0, 0.0),
        1.0,
        1.0,
        90.0,
        90.0,
        SweepDirection::Decreasing,
    );
    assert!(b.is_full_turn());
    assert_eq!(b.num_segments(2), 3);
}

#[test]
fn partial_sweeps() {
    let quarter = Arc::from_degrees(
        point(0.0, 0.0),
        2.0,
        2.0,
        270.0,
        360.0,
        SweepDirection::Increasing,
    );
    assert!((quarter.sweep_angle.to_degrees() - 90.0).abs() < 1e-4);
    assert_eq!(quarter.num_segments(20), 5);
    assert!((quarter.from().y + 2.0).abs() < 1e-5);
    assert!((quarter.to().x - 2.0).abs() < 1e-5);

    // Same angles travelled the other way around.
    let rest = Arc::from_degrees(
        point(0.0, 0.0),
        2.0,
        2.0,
        270.0,
        360.0,
        SweepDirection::Decreasing,
    );
    assert!((rest.sweep_angle.to_degrees() + 270.0).abs() < 1e-4);
    assert_eq!(rest.num_segments(20), 15);

    // Begin > end with an increasing sweep goes through 360.
    let wrap = Arc::from_degrees(
        point(0.0, 0.0),
        1.0,
        1.0,
        300.0,
        60.0,
        SweepDirection::Increasing,
    );
    assert!((wrap.sweep_angle.to_degrees() - 120.0).abs() < 1e-4);

    // Tiny arcs still get two segments.
    let tiny = Arc::from_degrees(
        point(0.0, 0.0),
        1.0,
        1.0,
        0.0,
        1.0,
        SweepDirection::Increasing,
    );
    assert_eq!(tiny.num_segments(20), 2);
}

#[test]
fn elliptic_points() {
    let a = Arc::from_degrees(
        point3(10.0, 20.0, 5.0),
        4.0,
        2.0,
        0.0,
        180.0,
        SweepDirection::Increasing,
    );
    let mut points = std::vec::Vec::new();
    a.for_each_flattened(8, &mut |p| points.push(p));

    assert_eq!(points.len(), 4);
    let top = points[1];
    assert!((top.x - 10.0).abs() < 1e-4);
    assert!((top.y - 22.0).abs() < 1e-4);
    assert_eq!(top.z, 5.0);
    let last = points[3];
    assert!((last.x - 6.0).abs() < 1e-4);
    assert!((last.y - 20.0).abs() < 1e-4);
}

#[test]
fn degenerate_input_does_not_panic() {
    let a = Arc::from_degrees(
        point(0.0, 0.0),
        -1.0,
        0.0,
        f32::NAN,
        90.0,
        SweepDirection::Increasing,
    );
    let mut count = 0;
    a.for_each_flattened(16, &mut |_| count += 1);
    assert_eq!(count, 2);
}
