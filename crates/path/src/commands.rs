//! The drawing command log.
//!
//! Commands are recorded verbatim: nothing is validated or simplified when a
//! command is appended. Degenerate input (zero radii, coincident points, ...) is
//! dealt with when the commands are turned into polylines.

use crate::math::Point;

use alloc::vec::Vec;
use core::slice;

/// A single drawing instruction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Command {
    /// Starts a new sub-shape at `to`.
    MoveTo { to: Point },
    /// Straight line from the cursor to `to`.
    LineTo { to: Point },
    /// Knot of a Catmull-Rom spline starting at the cursor.
    CurveTo { to: Point },
    /// Cubic bézier curve from the cursor to `to`.
    BezierTo {
        to: Point,
        ctrl1: Point,
        ctrl2: Point,
    },
    /// Quadratic bézier curve from `ctrl1` to `to`, with `ctrl2` as its control
    /// point.
    QuadBezierTo {
        to: Point,
        ctrl1: Point,
        ctrl2: Point,
    },
    /// Elliptic arc, angles in degrees.
    Arc {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        angle_begin: f32,
        angle_end: f32,
        clockwise: bool,
    },
    /// Elliptic arc with the opposite sweep convention of `Arc`: it travels towards
    /// decreasing angles when `clockwise` is true. Angles in degrees.
    ArcNegative {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        angle_begin: f32,
        angle_end: f32,
        clockwise: bool,
    },
    /// Closes the current sub-shape.
    Close,
    /// Ends the current sub-shape without closing it.
    NewSubPath,
}

impl Command {
    /// The position the command explicitly moves the cursor to, if any.
    ///
    /// Arcs, `Close` and `NewSubPath` return `None`.
    pub fn to(&self) -> Option<Point> {
        match *self {
            Command::MoveTo { to }
            | Command::LineTo { to }
            | Command::CurveTo { to }
            | Command::BezierTo { to, .. }
            | Command::QuadBezierTo { to, .. } => Some(to),
            _ => None,
        }
    }

    pub fn is_arc(&self) -> bool {
        match self {
            Command::Arc { .. } | Command::ArcNegative { .. } => true,
            _ => false,
        }
    }
}

/// An ordered, append-only log of drawing commands.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CommandBuffer {
    cmds: Vec<Command>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        CommandBuffer { cmds: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        CommandBuffer {
            cmds: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, cmd: Command) {
        self.cmds.push(cmd);
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    #[inline]
    pub fn as_slice(&self) -> &[Command] {
        &self.cmds
    }

    pub fn iter(&self) -> slice::Iter<Command> {
        self.cmds.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn last(&self) -> Option<&Command> {
        self.cmds.last()
    }

    pub fn move_to(&mut self, to: Point) {
        self.push(Command::MoveTo { to });
    }

    pub fn line_to(&mut self, to: Point) {
        self.push(Command::LineTo { to });
    }

    pub fn curve_to(&mut self, to: Point) {
        self.push(Command::CurveTo { to });
    }

    pub fn bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.push(Command::BezierTo { to, ctrl1, ctrl2 });
    }

    pub fn quad_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.push(Command::QuadBezierTo { to, ctrl1, ctrl2 });
    }

    /// Appends an arc travelling towards increasing angles.
    pub fn arc(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        angle_begin: f32,
        angle_end: f32,
    ) {
        self.push(Command::Arc {
            center,
            radius_x,
            radius_y,
            angle_begin,
            angle_end,
            clockwise: true,
        });
    }

    /// Appends an arc travelling towards decreasing angles.
    pub fn arc_negative(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        angle_begin: f32,
        angle_end: f32,
    ) {
        self.push(Command::ArcNegative {
            center,
            radius_x,
            radius_y,
            angle_begin,
            angle_end,
            clockwise: true,
        });
    }

    pub fn close(&mut self) {
        self.push(Command::Close);
    }

    pub fn new_sub_path(&mut self) {
        self.push(Command::NewSubPath);
    }
}

impl<'l> IntoIterator for &'l CommandBuffer {
    type Item = &'l Command;
    type IntoIter = slice::Iter<'l, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Command> for CommandBuffer {
    fn extend<T: IntoIterator<Item = Command>>(&mut self, iter: T) {
        self.cmds.extend(iter);
    }
}

#[test]
fn append_only_log() {
    use crate::math::point;

    let mut cmds = CommandBuffer::new();
    assert!(cmds.is_empty());

    cmds.move_to(point(1.0, 2.0));
    cmds.arc(point(0.0, 0.0), 0.0, 0.0, 0.0, 0.0);
    cmds.bezier_to(point(1.0, 0.0), point(2.0, 0.0), point(3.0, 3.0));
    cmds.close();

    assert_eq!(cmds.len(), 4);
    assert_eq!(cmds.as_slice()[0].to(), Some(point(1.0, 2.0)));
    // Degenerate arcs are stored as-is.
    assert!(cmds.as_slice()[1].is_arc());
    assert_eq!(cmds.as_slice()[1].to(), None);
    assert_eq!(
        cmds.as_slice()[2],
        Command::BezierTo {
            to: point(3.0, 3.0),
            ctrl1: point(1.0, 0.0),
            ctrl2: point(2.0, 0.0),
        }
    );
    assert_eq!(cmds.last(), Some(&Command::Close));
    assert_eq!(cmds.iter().count(), 4);

    cmds.clear();
    assert!(cmds.is_empty());
}
