#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]
#![no_std]

//! Drawing commands and their conversion into polylines.
//!
//! A shape is described as an ordered log of [`Command`]s (move, line, curve,
//! arc, close) stored in a [`CommandBuffer`]. The [`PolylineGenerator`] replays
//! the log and approximates every curve and arc with straight segments,
//! producing one [`Polyline`](geom::Polyline) per sub-shape.
//!
//! This crate is reexported in [pathmesh](../pathmesh/index.html).
//!
//! # Examples
//!
//! ```
//! use pathmesh_path::{CommandBuffer, PolylineGenerator, Resolution};
//! use pathmesh_path::math::point;
//!
//! let mut commands = CommandBuffer::new();
//! commands.move_to(point(0.0, 0.0));
//! commands.line_to(point(10.0, 0.0));
//! commands.bezier_to(point(10.0, 5.0), point(0.0, 5.0), point(0.0, 10.0));
//! commands.close();
//!
//! let mut polylines = Vec::new();
//! let mut generator = PolylineGenerator::new(Resolution::DEFAULT);
//! generator.generate(commands.as_slice(), &mut polylines);
//!
//! assert_eq!(polylines.len(), 1);
//! assert!(polylines[0].is_closed());
//! // The move, the line and twenty points for the curve.
//! assert_eq!(polylines[0].len(), 22);
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use pathmesh_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod commands;
pub mod generator;
pub mod shapes;

#[doc(inline)]
pub use crate::commands::{Command, CommandBuffer};
#[doc(inline)]
pub use crate::generator::{PolylineGenerator, Resolution};
#[doc(inline)]
pub use crate::shapes::ShapeBuilder;

use core::str::FromStr;

pub mod math {
    //! f32 version of the pathmesh_geom types used everywhere. Most other pathmesh
    //! crates reexport them.

    pub use crate::geom::{point, point3, vector, vector3};
    pub use crate::geom::{Angle, Box3D, Point, Rotation, Vector};
}

/// The fill rule defines how to determine what is inside and what is outside of the shape
/// from the winding number of a point.
///
/// The winding number of a point counts how many times the contours wind around it:
/// counter-clockwise contours (with y pointing up) count positively, clockwise ones
/// negatively.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillRule {
    /// Inside when the winding number is odd.
    Odd,
    /// Inside when the winding number is not zero.
    NonZero,
    /// Inside when the winding number is strictly positive.
    Positive,
    /// Inside when the winding number is strictly negative.
    Negative,
    /// Inside when the absolute value of the winding number is at least two.
    AbsGeqTwo,
}

impl FillRule {
    pub const DEFAULT: Self = FillRule::Odd;

    #[inline]
    pub fn is_in(&self, winding_number: i32) -> bool {
        match *self {
            FillRule::Odd => winding_number % 2 != 0,
            FillRule::NonZero => winding_number != 0,
            FillRule::Positive => winding_number > 0,
            FillRule::Negative => winding_number < 0,
            FillRule::AbsGeqTwo => winding_number.abs() >= 2,
        }
    }

    /// Converts an integer code into a fill rule.
    ///
    /// Codes follow the declaration order starting at zero; anything else is `Odd`.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => FillRule::NonZero,
            2 => FillRule::Positive,
            3 => FillRule::Negative,
            4 => FillRule::AbsGeqTwo,
            _ => FillRule::Odd,
        }
    }

    pub fn to_code(self) -> i32 {
        match self {
            FillRule::Odd => 0,
            FillRule::NonZero => 1,
            FillRule::Positive => 2,
            FillRule::Negative => 3,
            FillRule::AbsGeqTwo => 4,
        }
    }
}

impl Default for FillRule {
    fn default() -> Self {
        FillRule::DEFAULT
    }
}

impl From<i32> for FillRule {
    fn from(code: i32) -> Self {
        FillRule::from_code(code)
    }
}

impl FromStr for FillRule {
    type Err = core::convert::Infallible;

    /// Parses a fill rule name, ignoring case, dashes and underscores.
    ///
    /// Unknown names parse as `Odd`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut buffer = [0u8; 16];
        let mut len = 0;
        for b in s.trim().bytes() {
            if b == b'-' || b == b'_' || b == b' ' {
                continue;
            }
            if len == buffer.len() {
                return Ok(FillRule::Odd);
            }
            buffer[len] = b.to_ascii_lowercase();
            len += 1;
        }

        Ok(match &buffer[..len] {
            b"nonzero" => FillRule::NonZero,
            b"positive" => FillRule::Positive,
            b"negative" => FillRule::Negative,
            b"absgeqtwo" => FillRule::AbsGeqTwo,
            _ => FillRule::Odd,
        })
    }
}

#[test]
fn fill_rules() {
    let rules = [
        FillRule::Odd,
        FillRule::NonZero,
        FillRule::Positive,
        FillRule::Negative,
        FillRule::AbsGeqTwo,
    ];
    let expected: [[bool; 5]; 5] = [
        // winding: -2     -1     0      1      2
        [false, true, false, true, false],
        [true, true, false, true, true],
        [false, false, false, true, true],
        [true, true, false, false, false],
        [true, false, false, false, true],
    ];

    for (rule, row) in rules.iter().zip(expected.iter()) {
        for (winding, inside) in (-2..=2).zip(row.iter()) {
            assert_eq!(rule.is_in(winding), *inside, "{:?} {}", rule, winding);
        }
        assert_eq!(FillRule::from_code(rule.to_code()), *rule);
    }
}

#[test]
fn parse_fill_rules() {
    assert_eq!("nonzero".parse::<FillRule>(), Ok(FillRule::NonZero));
    assert_eq!("Non-Zero".parse::<FillRule>(), Ok(FillRule::NonZero));
    assert_eq!("ABS_GEQ_TWO".parse::<FillRule>(), Ok(FillRule::AbsGeqTwo));
    assert_eq!("negative".parse::<FillRule>(), Ok(FillRule::Negative));
    assert_eq!("evenodd".parse::<FillRule>(), Ok(FillRule::Odd));
    assert_eq!(
        "a rather long unknown rule".parse::<FillRule>(),
        Ok(FillRule::Odd)
    );
    assert_eq!(FillRule::from(-1), FillRule::Odd);
    assert_eq!(FillRule::from(42), FillRule::Odd);
    assert_eq!(FillRule::from(3), FillRule::Negative);
}
