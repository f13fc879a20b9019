//! Shape kinds as they appear in the `shape` attribute of an `<area>`.

use std::fmt;

/// The geometry family an area belongs to.
///
/// HTML allows two spellings for rectangles, circles and polygons; both
/// spellings select the same variant. Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// `rect` or `rectangle`
    Rectangle,
    /// `circle` or `circ`
    Circle,
    /// `poly` or `polygon`
    Polygon,
    /// `default`: the whole image, no coordinates
    Default,
    /// Anything else, kept verbatim so callers can report it
    Unknown(String),
}

impl ShapeKind {
    /// Classify a `shape` attribute value.
    pub fn from_attr(attr: &str) -> Self {
        match attr {
            "rect" | "rectangle" => ShapeKind::Rectangle,
            "circle" | "circ" => ShapeKind::Circle,
            "poly" | "polygon" => ShapeKind::Polygon,
            "default" => ShapeKind::Default,
            other => ShapeKind::Unknown(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ShapeKind::Unknown(_))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Rectangle => write!(f, "rect"),
            ShapeKind::Circle => write!(f, "circle"),
            ShapeKind::Polygon => write!(f, "poly"),
            ShapeKind::Default => write!(f, "default"),
            ShapeKind::Unknown(s) => write!(f, "{}", s),
        }
    }
}

/// A declarative area shape: a kind plus the authored coordinate string.
///
/// Coordinates are borrowed; the engine parses them fresh on every recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape<'a> {
    pub kind: ShapeKind,
    pub coords: &'a str,
}

impl<'a> Shape<'a> {
    pub fn new(kind: ShapeKind, coords: &'a str) -> Self {
        Shape { kind, coords }
    }

    /// Build a shape straight from the `shape` and `coords` attribute values.
    pub fn from_attrs(shape: &str, coords: &'a str) -> Self {
        Shape { kind: ShapeKind::from_attr(shape), coords }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_select_the_same_kind() {
        assert_eq!(ShapeKind::from_attr("rect"), ShapeKind::from_attr("rectangle"));
        assert_eq!(ShapeKind::from_attr("circle"), ShapeKind::from_attr("circ"));
        assert_eq!(ShapeKind::from_attr("poly"), ShapeKind::from_attr("polygon"));
        assert_eq!(ShapeKind::from_attr("default"), ShapeKind::Default);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(ShapeKind::from_attr("RECT"), ShapeKind::Unknown("RECT".to_string()));
        assert!(!ShapeKind::from_attr("Poly").is_known());
    }

    #[test]
    fn unknown_kind_keeps_its_spelling() {
        let kind = ShapeKind::from_attr("ellipse");
        assert_eq!(kind.to_string(), "ellipse");
        assert!(!kind.is_known());
    }
}
