//! Default settings shared by the engine and the description format

/// Separator between tokens of an `<area coords="...">` attribute.
pub const COORDS_DELIMITER: char = ',';

/// Reference width used when a map does not say what its coordinates were
/// authored against. A value of 1 means "coordinates are fractions of the width".
pub const REFERENCE_WIDTH: f64 = 1.0;

/// Ratio name used on init when the image carries no ratio of its own.
pub const FALLBACK_RATIO: &str = "uncropped";

/// Fewer points than this cannot describe a drawable area.
pub const MIN_POINTS: usize = 3;
