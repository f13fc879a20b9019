//! Coordinate converters: `coords` attribute string <-> list of points.
//!
//! Each shape family has its own converter type implementing
//! [`CoordsConverter`]; [`Converter`] closes over them with `enum_dispatch`.
//! Only rectangles are fully implemented. Circle and polygon parsing are
//! placeholders that yield no points, which makes the engine skip those areas.

use enum_dispatch::enum_dispatch;

use crate::defaults::COORDS_DELIMITER;
use crate::shape::ShapeKind;
use crate::types::Point;

/// Both directions of the conversion for one shape family.
#[enum_dispatch]
pub trait CoordsConverter {
    /// Turn an authored coordinate string into points.
    /// Anything the converter cannot make sense of yields an empty list.
    fn parse(&self, coords: &str) -> Vec<Point>;

    /// Turn points back into a coordinate string.
    /// An empty string means "no coordinates".
    fn serialize(&self, points: &[Point]) -> String;
}

/// `left,top,right,bottom`, expanded to four clockwise corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectConverter;

/// Placeholder, see module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CircleConverter;

/// Serializes `x1,y1,x2,y2,...`; parsing is a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolyConverter;

/// The `default` shape covers the whole image and never has coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultConverter;

#[enum_dispatch(CoordsConverter)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    Rect(RectConverter),
    Circle(CircleConverter),
    Poly(PolyConverter),
    Default(DefaultConverter),
}

impl CoordsConverter for RectConverter {
    fn parse(&self, coords: &str) -> Vec<Point> {
        // Flipped rects (right < left, bottom < top) are valid and kept as given.
        // A token without digits reads as NaN, which the engine hides.
        let values: Vec<f64> = coords.split(COORDS_DELIMITER).map(parse_integer).collect();
        match values[..] {
            [left, top, right, bottom] => vec![
                Point::new(left, top),
                Point::new(right, top),
                Point::new(right, bottom),
                Point::new(left, bottom),
            ],
            _ => Vec::new(),
        }
    }

    fn serialize(&self, points: &[Point]) -> String {
        // First and third corners are diagonally opposite.
        match points {
            [first, _, third, _] => join_numbers(&[first.x, first.y, third.x, third.y]),
            _ => String::new(),
        }
    }
}

impl CoordsConverter for CircleConverter {
    fn parse(&self, _coords: &str) -> Vec<Point> {
        Vec::new()
    }

    fn serialize(&self, _points: &[Point]) -> String {
        String::new()
    }
}

impl CoordsConverter for PolyConverter {
    fn parse(&self, _coords: &str) -> Vec<Point> {
        Vec::new()
    }

    fn serialize(&self, points: &[Point]) -> String {
        let values: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
        join_numbers(&values)
    }
}

impl CoordsConverter for DefaultConverter {
    fn parse(&self, _coords: &str) -> Vec<Point> {
        Vec::new()
    }

    fn serialize(&self, _points: &[Point]) -> String {
        String::new()
    }
}

/// Maps shape kinds to their converters.
///
/// Holds no state; it exists so the engine receives its conversion rules
/// explicitly instead of reaching for a global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConverterTable;

impl ConverterTable {
    pub const fn new() -> Self {
        ConverterTable
    }

    /// `None` for unknown kinds; callers treat that as "leave the area alone".
    pub fn converter(&self, kind: &ShapeKind) -> Option<Converter> {
        match kind {
            ShapeKind::Rectangle => Some(RectConverter.into()),
            ShapeKind::Circle => Some(CircleConverter.into()),
            ShapeKind::Polygon => Some(PolyConverter.into()),
            ShapeKind::Default => Some(DefaultConverter.into()),
            ShapeKind::Unknown(_) => None,
        }
    }

    /// Parse with the converter for `kind`, or return no points.
    pub fn parse(&self, kind: &ShapeKind, coords: &str) -> Vec<Point> {
        self.converter(kind).map(|c| c.parse(coords)).unwrap_or_default()
    }

    /// Serialize with the converter for `kind`, or return an empty string.
    pub fn serialize(&self, kind: &ShapeKind, points: &[Point]) -> String {
        self.converter(kind)
            .map(|c| c.serialize(points))
            .unwrap_or_default()
    }
}

/// Integer parse the way browsers read integer attributes: leading
/// whitespace, an optional sign, an optional `0x` prefix, then as many digits
/// as there are. Whatever follows the digits (`.7`, `px`, ...) is ignored.
///
/// No digits at all gives NaN. Digit runs too long for an integer type still
/// parse; clamping bounds them later.
fn parse_integer(token: &str) -> f64 {
    let token = token.trim_start();
    let (sign, rest) = match token.as_bytes().first() {
        Some(b'-') => (-1.0, &token[1..]),
        Some(b'+') => (1.0, &token[1..]),
        _ => (1.0, token),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return f64::NAN;
    }
    let digits = &digits[..end];
    let value = if radix == 10 {
        digits.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
    };
    sign * value
}

/// Format a coordinate the way it goes back into the attribute:
/// shortest decimal form, no trailing `.0`, never `-0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

pub(crate) fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_number(*v))
        .collect::<Vec<_>>()
        .join(&COORDS_DELIMITER.to_string())
}
