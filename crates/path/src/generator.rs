//! Conversion of drawing commands into polylines.

use crate::commands::Command;
use crate::geom::arrayvec::ArrayVec;
use crate::geom::{
    points_are_close, Arc, CatmullRomSegment, CubicBezierSegment, Polyline, QuadraticBezierSegment,
    Segment, SweepDirection,
};
use crate::math::{point, Point};

use alloc::vec::Vec;

/// Number of straight segments used to approximate curves and arcs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Resolution {
    /// Segments per bézier curve or Catmull-Rom span.
    ///
    /// Zero is treated as one.
    pub curve: u32,
    /// Segments per full turn of an arc.
    ///
    /// Values lower than three are treated as three.
    pub circle: u32,
}

impl Resolution {
    pub const DEFAULT_CURVE_RESOLUTION: u32 = 20;
    pub const DEFAULT_CIRCLE_RESOLUTION: u32 = 20;

    pub const DEFAULT: Self = Resolution {
        curve: Self::DEFAULT_CURVE_RESOLUTION,
        circle: Self::DEFAULT_CIRCLE_RESOLUTION,
    };

    #[inline]
    pub const fn with_curve(mut self, curve: u32) -> Self {
        self.curve = curve;
        self
    }

    #[inline]
    pub const fn with_circle(mut self, circle: u32) -> Self {
        self.circle = circle;
        self
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Replays drawing commands into one polyline per sub-shape.
///
/// The generator keeps a cursor (where the next segment starts), the index of the
/// sub-shape being built in the output vector and the pending knots of a
/// Catmull-Rom run. It can replay a whole command log at once with `generate`
/// or be fed one command at a time with `add`. When fed incrementally, the last
/// span of a pending Catmull-Rom run is only emitted by `flush`, which ends the
/// run, or by `preview`, which emits it provisionally and takes it back when the
/// next command arrives.
///
/// Rules:
///
/// - `MoveTo` starts a new sub-shape unless the current one has no point.
/// - Lines and curves issued while no sub-shape is open start a new one at the
///   cursor. Arcs start a new sub-shape at their own first point instead.
/// - `Close` closes and finalizes the current sub-shape and moves the cursor
///   back to its first point. It has no effect when no sub-shape is open.
/// - `NewSubPath` finalizes the current sub-shape without closing it.
///
/// ```
/// use pathmesh_path::{Command, PolylineGenerator, Resolution};
/// use pathmesh_path::math::point;
///
/// let mut generator = PolylineGenerator::new(Resolution::DEFAULT.with_circle(8));
/// let mut polylines = Vec::new();
/// generator.generate(
///     &[
///         Command::MoveTo { to: point(1.0, 0.0) },
///         Command::Arc {
///             center: point(0.0, 0.0),
///             radius_x: 1.0,
///             radius_y: 1.0,
///             angle_begin: 0.0,
///             angle_end: 360.0,
///             clockwise: true,
///         },
///         Command::Close,
///     ],
///     &mut polylines,
/// );
///
/// assert_eq!(polylines.len(), 1);
/// assert_eq!(polylines[0].len(), 8);
/// ```
#[derive(Clone, Debug)]
pub struct PolylineGenerator {
    resolution: Resolution,
    cursor: Point,
    current: Option<usize>,
    knots: ArrayVec<Point, 4>,
    // Polyline index and length before the provisional span.
    preview: Option<(usize, usize)>,
}

impl PolylineGenerator {
    pub fn new(resolution: Resolution) -> Self {
        PolylineGenerator {
            resolution,
            cursor: point(0.0, 0.0),
            current: None,
            knots: ArrayVec::new(),
            preview: None,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
    }

    /// Position where the next segment starts.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Index in the output of the sub-shape being built, if any.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Forgets the cursor, the current sub-shape and pending knots.
    pub fn reset(&mut self) {
        self.cursor = point(0.0, 0.0);
        self.current = None;
        self.knots.clear();
        self.preview = None;
    }

    /// Replaces the content of `output` with the polylines described by `commands`.
    pub fn generate(&mut self, commands: &[Command], output: &mut Vec<Polyline>) {
        self.reset();
        output.clear();

        for cmd in commands {
            self.add(cmd, output);
        }

        self.flush(output);
    }

    /// Applies a single command to `output`.
    pub fn add(&mut self, cmd: &Command, output: &mut Vec<Polyline>) {
        self.retract_preview(output);

        if let Command::CurveTo { to } = *cmd {
            self.curve_to(to, output);
            return;
        }

        self.flush(output);

        match *cmd {
            Command::MoveTo { to } => self.move_to(to, output),
            Command::LineTo { to } => {
                self.open(output, true).add_vertex(to);
                self.cursor = to;
            }
            Command::BezierTo { to, ctrl1, ctrl2 } => {
                let segment = CubicBezierSegment {
                    from: self.cursor,
                    ctrl1,
                    ctrl2,
                    to,
                };
                let steps = self.resolution.curve;
                let polyline = self.open(output, true);
                segment.for_each_subdivision(steps, &mut |p| polyline.add_vertex(p));
                self.cursor = to;
            }
            Command::QuadBezierTo { to, ctrl1, ctrl2 } => {
                let segment = QuadraticBezierSegment {
                    from: ctrl1,
                    ctrl: ctrl2,
                    to,
                };
                let steps = self.resolution.curve;
                let cursor = self.cursor;
                let polyline = self.open(output, true);
                if !points_are_close(cursor, ctrl1) {
                    polyline.add_vertex(ctrl1);
                }
                segment.for_each_subdivision(steps, &mut |p| polyline.add_vertex(p));
                self.cursor = to;
            }
            Command::Arc {
                center,
                radius_x,
                radius_y,
                angle_begin,
                angle_end,
                clockwise,
            } => {
                let direction = SweepDirection::from_clockwise(clockwise);
                let arc = Arc::from_degrees(
                    center,
                    radius_x,
                    radius_y,
                    angle_begin,
                    angle_end,
                    direction,
                );
                self.arc(&arc, output);
            }
            Command::ArcNegative {
                center,
                radius_x,
                radius_y,
                angle_begin,
                angle_end,
                clockwise,
            } => {
                let direction = SweepDirection::from_clockwise(!clockwise);
                let arc = Arc::from_degrees(
                    center,
                    radius_x,
                    radius_y,
                    angle_begin,
                    angle_end,
                    direction,
                );
                self.arc(&arc, output);
            }
            Command::Close => self.close(output),
            Command::NewSubPath => self.current = None,
            Command::CurveTo { .. } => {}
        }
    }

    /// Emits the last span of a pending Catmull-Rom run, if any, and ends the run.
    pub fn flush(&mut self, output: &mut Vec<Polyline>) {
        self.retract_preview(output);

        if self.knots.len() < 3 {
            self.knots.clear();
            return;
        }

        // Clamp the end tangent.
        if let Some(&last) = self.knots.last() {
            self.push_knot(last, output);
        }

        if let Some(&last) = self.knots.last() {
            self.cursor = last;
        }
        self.knots.clear();
    }

    /// Emits the last span of a pending Catmull-Rom run without ending the run.
    ///
    /// The provisional points are removed from `output` by the next call to `add`,
    /// `flush` or `preview`, so reading the output between two `curve_to` commands
    /// does not change the final curve. They must not be edited in the meantime.
    pub fn preview(&mut self, output: &mut Vec<Polyline>) {
        self.retract_preview(output);

        if self.knots.len() < 3 {
            return;
        }

        let idx = match self.current {
            Some(idx) if idx < output.len() => idx,
            _ => return,
        };

        // Same span as `flush` emits, with the end tangent clamped.
        let segment = CatmullRomSegment {
            before: self.knots[0],
            from: self.knots[1],
            to: self.knots[2],
            after: self.knots[2],
        };

        let polyline = &mut output[idx];
        self.preview = Some((idx, polyline.len()));
        let steps = self.resolution.curve;
        segment.for_each_subdivision(steps, &mut |p| polyline.add_vertex(p));
    }

    /// Finalizes the current sub-shape without closing it.
    ///
    /// The next line or curve starts a new sub-shape at the cursor.
    pub fn new_sub_path(&mut self, output: &mut Vec<Polyline>) {
        self.add(&Command::NewSubPath, output);
    }

    fn retract_preview(&mut self, output: &mut Vec<Polyline>) {
        if let Some((idx, len)) = self.preview.take() {
            if let Some(polyline) = output.get_mut(idx) {
                polyline.truncate(len);
            }
        }
    }

    fn move_to(&mut self, to: Point, output: &mut Vec<Polyline>) {
        let reuse = match self.current {
            Some(idx) => output.get(idx).map_or(false, |p| p.is_empty()),
            None => false,
        };

        if !reuse {
            self.current = None;
        }

        self.cursor = to;
        self.open(output, false).add_vertex(to);
    }

    fn curve_to(&mut self, to: Point, output: &mut Vec<Polyline>) {
        if self.knots.is_empty() {
            // Clamp the start tangent.
            self.open(output, true);
            self.knots.push(self.cursor);
            self.knots.push(self.cursor);
        }

        self.push_knot(to, output);
    }

    fn push_knot(&mut self, knot: Point, output: &mut Vec<Polyline>) {
        self.knots.push(knot);
        if self.knots.len() < 4 {
            return;
        }

        let segment = CatmullRomSegment {
            before: self.knots[0],
            from: self.knots[1],
            to: self.knots[2],
            after: self.knots[3],
        };
        self.knots.remove(0);

        let steps = self.resolution.curve;
        let polyline = self.open(output, true);
        segment.for_each_subdivision(steps, &mut |p| polyline.add_vertex(p));
    }

    fn arc(&mut self, arc: &Arc, output: &mut Vec<Polyline>) {
        let resolution = self.resolution.circle;
        let start = arc.from();
        let polyline = self.open(output, false);
        let connected = polyline
            .last()
            .map_or(false, |last| points_are_close(last, start));
        if !connected {
            polyline.add_vertex(start);
        }

        arc.for_each_flattened(resolution, &mut |p| polyline.add_vertex(p));

        self.cursor = arc.to();
    }

    fn close(&mut self, output: &mut Vec<Polyline>) {
        let current = self.current.take();
        let polyline = match current.and_then(|idx| output.get_mut(idx)) {
            Some(polyline) => polyline,
            None => return,
        };

        polyline.close();
        if let Some(first) = polyline.first() {
            self.cursor = first;
        }
    }

    /// Returns the sub-shape being built, starting a new one if needed.
    ///
    /// A new sub-shape starts with the cursor when `from_cursor` is true.
    fn open<'l>(
        &mut self,
        output: &'l mut Vec<Polyline>,
        from_cursor: bool,
    ) -> &'l mut Polyline {
        let idx = match self.current {
            Some(idx) if idx < output.len() => idx,
            _ => {
                let mut polyline = Polyline::new();
                if from_cursor {
                    polyline.add_vertex(self.cursor);
                }
                output.push(polyline);
                let idx = output.len() - 1;
                self.current = Some(idx);
                idx
            }
        };

        &mut output[idx]
    }
}

impl Default for PolylineGenerator {
    fn default() -> Self {
        PolylineGenerator::new(Resolution::DEFAULT)
    }
}

#[cfg(test)]
use crate::math::point3;

#[cfg(test)]
fn generate(resolution: Resolution, commands: &[Command]) -> Vec<Polyline> {
    let mut output = Vec::new();
    PolylineGenerator::new(resolution).generate(commands, &mut output);
    output
}

#[test]
fn empty_log() {
    assert!(generate(Resolution::DEFAULT, &[]).is_empty());
    // Closing nothing is a no-op.
    let closes = [Command::Close, Command::Close];
    assert!(generate(Resolution::DEFAULT, &closes).is_empty());
}

#[test]
fn lines_and_sub_shapes() {
    let polylines = generate(
        Resolution::DEFAULT,
        &[
            Command::MoveTo {
                to: point(0.0, 0.0),
            },
            Command::LineTo {
                to: point(1.0, 0.0),
            },
            Command::LineTo {
                to: point(1.0, 1.0),
            },
            Command::LineTo {
                to: point(0.0, 0.0),
            },
            Command::Close,
            // Starts at the first point of the closed sub-shape.
            Command::LineTo {
                to: point(5.0, 5.0),
            },
            Command::MoveTo {
                to: point(7.0, 7.0),
            },
            Command::LineTo {
                to: point(8.0, 7.0),
            },
        ],
    );

    assert_eq!(polylines.len(), 3);
    assert!(polylines[0].is_closed());
    assert_eq!(
        polylines[0].points(),
        &[point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)]
    );
    assert!(!polylines[1].is_closed());
    assert_eq!(polylines[1].points(), &[point(0.0, 0.0), point(5.0, 5.0)]);
    assert_eq!(polylines[2].points(), &[point(7.0, 7.0), point(8.0, 7.0)]);
}

#[test]
fn line_without_move_starts_at_origin() {
    let line = Command::LineTo {
        to: point(3.0, 4.0),
    };
    let polylines = generate(Resolution::DEFAULT, &[line]);
    assert_eq!(polylines.len(), 1);
    assert_eq!(polylines[0].points(), &[point(0.0, 0.0), point(3.0, 4.0)]);
}

#[test]
fn bezier_subdivision() {
    let to = point3(3.0, 0.0, 1.0);
    let polylines = generate(
        Resolution::DEFAULT.with_curve(10),
        &[
            Command::MoveTo {
                to: point(0.0, 0.0),
            },
            Command::BezierTo {
                to,
                ctrl1: point(1.0, 2.0),
                ctrl2: point(2.0, 2.0),
            },
        ],
    );

    assert_eq!(polylines[0].len(), 11);
    assert_eq!(polylines[0].last(), Some(to));

    // A resolution of zero behaves like one.
    let polylines = generate(
        Resolution::DEFAULT.with_curve(0),
        &[
            Command::MoveTo {
                to: point(0.0, 0.0),
            },
            Command::BezierTo {
                to,
                ctrl1: point(1.0, 2.0),
                ctrl2: point(2.0, 2.0),
            },
        ],
    );
    assert_eq!(polylines[0].points(), &[point(0.0, 0.0), to]);
}

#[test]
fn quadratic_starts_at_first_control_point() {
    let cmds = [
        Command::MoveTo {
            to: point(0.0, 0.0),
        },
        Command::QuadBezierTo {
            to: point(4.0, 0.0),
            ctrl1: point(0.0, 0.0),
            ctrl2: point(2.0, 4.0),
        },
    ];
    let polylines = generate(Resolution::DEFAULT.with_curve(4), &cmds);
    assert_eq!(polylines[0].len(), 5);
    assert_eq!(polylines[0][2], point(2.0, 2.0));

    let cmds = [
        Command::MoveTo {
            to: point(-1.0, 0.0),
        },
        Command::QuadBezierTo {
            to: point(4.0, 0.0),
            ctrl1: point(0.0, 0.0),
            ctrl2: point(2.0, 4.0),
        },
    ];
    let polylines = generate(Resolution::DEFAULT.with_curve(4), &cmds);
    assert_eq!(polylines[0].len(), 6);
    assert_eq!(polylines[0][1], point(0.0, 0.0));
    assert_eq!(polylines[0].last(), Some(point(4.0, 0.0)));
}

#[test]
fn catmull_rom_run() {
    let knots = [point(1.0, 1.0), point(2.0, 0.0), point(3.0, 1.0)];
    let mut cmds = Vec::new();
    cmds.push(Command::MoveTo {
        to: point(0.0, 0.0),
    });
    for &to in &knots {
        cmds.push(Command::CurveTo { to });
    }
    cmds.push(Command::LineTo {
        to: point(3.0, 5.0),
    });

    let polylines = generate(Resolution::DEFAULT.with_curve(5), &cmds);
    assert_eq!(polylines.len(), 1);
    let p = &polylines[0];
    // Start, three spans of five points and the line.
    assert_eq!(p.len(), 1 + 3 * 5 + 1);
    assert_eq!(p[5], knots[0]);
    assert_eq!(p[10], knots[1]);
    assert_eq!(p[15], knots[2]);
    assert_eq!(p[16], point(3.0, 5.0));
}

#[test]
fn catmull_rom_run_at_the_end() {
    let cmds = [
        Command::MoveTo {
            to: point(0.0, 0.0),
        },
        Command::CurveTo {
            to: point(2.0, 2.0),
        },
    ];
    let polylines = generate(Resolution::DEFAULT.with_curve(4), &cmds);
    let p = &polylines[0];
    assert_eq!(p.len(), 5);
    // Both tangents are clamped, so the span is a straight line.
    for point in p.iter() {
        assert!((point.x - point.y).abs() < 1e-5);
    }
    assert_eq!(p.last(), Some(point(2.0, 2.0)));
}

#[test]
fn arc_segments() {
    let circle = [
        Command::Arc {
            center: point(0.0, 0.0),
            radius_x: 2.0,
            radius_y: 2.0,
            angle_begin: 0.0,
            angle_end: 360.0,
            clockwise: true,
        },
        Command::Close,
    ];

    for &n in &[3, 8, 20, 64] {
        let polylines = generate(Resolution::DEFAULT.with_circle(n), &circle);
        assert_eq!(polylines.len(), 1);
        // The end point coincides with the start and is dropped when closing.
        assert_eq!(polylines[0].len(), n as usize);
        assert_eq!(polylines[0].segments().count(), n as usize);
        assert!(polylines[0].is_closed());
    }

    // Low resolutions are raised to three.
    let polylines = generate(Resolution::DEFAULT.with_circle(1), &circle);
    assert_eq!(polylines[0].len(), 3);
}

#[test]
fn arc_joins_previous_point() {
    let cmds = [
        Command::MoveTo {
            to: point(0.0, -1.0),
        },
        Command::Arc {
            center: point(0.0, 0.0),
            radius_x: 1.0,
            radius_y: 1.0,
            angle_begin: 270.0,
            angle_end: 360.0,
            clockwise: true,
        },
        Command::LineTo {
            to: point(1.0, 5.0),
        },
    ];
    let polylines = generate(Resolution::DEFAULT, &cmds);
    let p = &polylines[0];
    // Move, five arc segments, line.
    assert_eq!(p.len(), 1 + 5 + 1);
    assert!((p[5].x - 1.0).abs() < 1e-5);
    assert!(p[5].y.abs() < 1e-5);
}

#[test]
fn negative_arcs() {
    let arc = |clockwise| Command::Arc {
        center: point(0.0, 0.0),
        radius_x: 1.0,
        radius_y: 1.0,
        angle_begin: 0.0,
        angle_end: 90.0,
        clockwise,
    };
    let negative = |clockwise| Command::ArcNegative {
        center: point(0.0, 0.0),
        radius_x: 1.0,
        radius_y: 1.0,
        angle_begin: 0.0,
        angle_end: 90.0,
        clockwise,
    };

    let res = Resolution::DEFAULT.with_circle(4);
    // A quarter turn at this resolution is raised to two segments.
    assert_eq!(generate(res, &[arc(true)])[0].len(), 3);
    assert_eq!(generate(res, &[arc(false)])[0].len(), 4);

    // The flag has the opposite meaning for negative arcs.
    let polylines = generate(res, &[negative(true)]);
    assert_eq!(polylines[0].len(), 4);
    // Goes through 270 degrees.
    assert!(polylines[0][1].x.abs() < 1e-5);
    assert!((polylines[0][1].y + 1.0).abs() < 1e-5);

    assert_eq!(
        generate(res, &[negative(false)]),
        generate(res, &[arc(true)])
    );
}

#[test]
fn regeneration_is_idempotent() {
    let cmds = [
        Command::MoveTo {
            to: point(0.0, 0.0),
        },
        Command::CurveTo {
            to: point(1.0, 3.0),
        },
        Command::CurveTo {
            to: point(4.0, 2.0),
        },
        Command::BezierTo {
            to: point(6.0, 0.0),
            ctrl1: point(5.0, 1.0),
            ctrl2: point(5.5, 0.5),
        },
        Command::Arc {
            center: point(3.0, 0.0),
            radius_x: 3.0,
            radius_y: 2.0,
            angle_begin: 0.0,
            angle_end: 180.0,
            clockwise: true,
        },
        Command::Close,
    ];

    let mut generator = PolylineGenerator::default();
    let mut first = Vec::new();
    let mut second = Vec::new();
    generator.generate(&cmds, &mut first);
    generator.generate(&cmds, &mut second);

    assert_eq!(first, second);
}

#[test]
fn incremental_matches_replay() {
    let cmds = [
        Command::MoveTo {
            to: point(0.0, 0.0),
        },
        Command::LineTo {
            to: point(2.0, 0.0),
        },
        Command::CurveTo {
            to: point(3.0, 1.0),
        },
        Command::CurveTo {
            to: point(2.0, 2.0),
        },
        Command::Close,
        Command::MoveTo {
            to: point(5.0, 5.0),
        },
        Command::LineTo {
            to: point(6.0, 5.0),
        },
    ];

    let mut generator = PolylineGenerator::default();
    let mut incremental = Vec::new();
    for cmd in &cmds {
        generator.add(cmd, &mut incremental);
    }
    generator.flush(&mut incremental);

    assert_eq!(incremental, generate(Resolution::DEFAULT, &cmds));
    assert_eq!(generator.current_index(), Some(1));
}

#[test]
fn new_sub_path_command() {
    let polylines = generate(
        Resolution::DEFAULT,
        &[
            Command::MoveTo {
                to: point(0.0, 0.0),
            },
            Command::LineTo {
                to: point(10.0, 0.0),
            },
            Command::NewSubPath,
            Command::LineTo {
                to: point(10.0, 10.0),
            },
            // Nothing to end.
            Command::NewSubPath,
            Command::NewSubPath,
        ],
    );

    assert_eq!(polylines.len(), 2);
    assert!(!polylines[0].is_closed());
    assert_eq!(polylines[0].points(), &[point(0.0, 0.0), point(10.0, 0.0)]);
    assert_eq!(
        polylines[1].points(),
        &[point(10.0, 0.0), point(10.0, 10.0)]
    );
}

#[test]
fn preview_keeps_the_run_open() {
    let cmds = [
        Command::MoveTo {
            to: point(0.0, 0.0),
        },
        Command::CurveTo {
            to: point(10.0, 10.0),
        },
        Command::CurveTo {
            to: point(20.0, 0.0),
        },
        Command::CurveTo {
            to: point(30.0, 10.0),
        },
    ];
    let res = Resolution::DEFAULT.with_curve(4);

    let mut generator = PolylineGenerator::new(res);
    let mut output = Vec::new();
    for (i, cmd) in cmds.iter().enumerate() {
        generator.add(cmd, &mut output);
        generator.preview(&mut output);
        // Previewing twice is the same as once.
        generator.preview(&mut output);
        if i > 0 {
            assert_eq!(output, generate(res, &cmds[..=i]));
        }
    }
    generator.flush(&mut output);

    assert_eq!(output, generate(res, &cmds));
    assert_eq!(output[0].len(), 1 + 3 * 4);
}

#[test]
fn new_sub_path_starts_from_cursor() {
    let move_to = |to| Command::MoveTo { to };
    let line_to = |to| Command::LineTo { to };

    let mut generator = PolylineGenerator::default();
    let mut output = Vec::new();
    generator.add(&move_to(point(1.0, 1.0)), &mut output);
    generator.add(&line_to(point(2.0, 1.0)), &mut output);
    generator.new_sub_path(&mut output);
    generator.add(&line_to(point(3.0, 1.0)), &mut output);

    assert_eq!(output.len(), 2);
    assert_eq!(output[1].points(), &[point(2.0, 1.0), point(3.0, 1.0)]);
}
