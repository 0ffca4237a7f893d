use crate::Point;

/// Common APIs to segment types.
pub trait Segment: Copy + Sized {
    /// Start of the curve.
    fn from(&self) -> Point;

    /// End of the curve.
    fn to(&self) -> Point;

    /// Sample the curve at t (expecting t between 0 and 1).
    fn sample(&self, t: f32) -> Point;

    /// Approximates the curve with `steps` line segments of equal parameter length.
    ///
    /// The callback receives the end point of each segment, in order. The start of
    /// the curve is not emitted (it is expected to already be the last point of the
    /// polyline being built) and the last emitted point is exactly `self.to()` so
    /// that floating point drift does not accumulate from one curve to the next.
    ///
    /// A step count of zero is treated as one.
    fn for_each_subdivision<F: FnMut(Point)>(&self, steps: u32, callback: &mut F) {
        let steps = steps.max(1);
        let step = 1.0 / steps as f32;
        for i in 1..steps {
            callback(self.sample(i as f32 * step));
        }
        callback(self.to());
    }
}

macro_rules! impl_segment {
    () => {
        fn from(&self) -> Point {
            self.from
        }
        fn to(&self) -> Point {
            self.to
        }
        fn sample(&self, t: f32) -> Point {
            self.sample(t)
        }
    };
}
