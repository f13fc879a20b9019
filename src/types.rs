//! Numeric primitives shared by the converters and the geometry engine.
//!
//! Coordinates stay plain `f64` pairs (they come straight out of HTML
//! attributes), but every size the engine divides by goes through a validated
//! constructor so a zero or NaN dimension never reaches the math.

use std::fmt;

use glam::DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Accept finite values that are zero or greater.
pub fn non_negative(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Accept finite values strictly greater than zero.
pub fn positive(val: f64) -> Result<f64, NumericError> {
    let val = non_negative(val)?;
    if val == 0.0 {
        Err(NumericError::Zero)
    } else {
        Ok(val)
    }
}

/// A point of an area, in reference or rendered pixels depending on the stage.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> DVec2 {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Point {
        Point { x: v.x, y: v.y }
    }
}

/// Width and height of an element on the page.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const ZERO: Size = Size { w: 0.0, h: 0.0 };

    /// Create a size without validation.
    pub const fn new(w: f64, h: f64) -> Self {
        Size { w, h }
    }

    /// Create a size whose sides are finite and non-negative.
    pub fn try_new(w: f64, h: f64) -> Result<Self, NumericError> {
        Ok(Size {
            w: non_negative(w)?,
            h: non_negative(h)?,
        })
    }

    /// Create a size whose sides are finite and strictly positive.
    pub fn try_positive(w: f64, h: f64) -> Result<Self, NumericError> {
        Ok(Size {
            w: positive(w)?,
            h: positive(h)?,
        })
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.w, self.h)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.w, self.h)
    }
}

/// A position expressed as percentages of a container, the way CSS `top`/`left`
/// place an absolutely positioned indicator.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Percent {
    pub top: f64,
    pub left: f64,
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "top {}%, left {}%", self.top, self.left)
    }
}
