//! The shape coordinate engine.
//!
//! `recompute` is a pure function of a shape and a viewport. It parses the
//! authored coordinates, scales and clamps them into the rendered image,
//! decides whether the hotzone can be shown, and says what the caller should
//! write back. It never fails: unknown kinds, unparsable coordinates and
//! degenerate geometry all come out as [`Recompute::Skipped`] or
//! [`Recompute::Hidden`].

use crate::converter::{ConverterTable, CoordsConverter, join_numbers};
use crate::defaults::MIN_POINTS;
use crate::geometry::{HotzoneIndicatorBox, calculate_bounding_box, scale_points};
use crate::log::{debug, trace, warn};
use crate::shape::{Shape, ShapeKind};
use crate::types::{Percent, Point};
use crate::viewport::Viewport;

/// What to do with an area's `coords` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordsUpdate {
    /// Write this value.
    Set(String),
    /// Drop the attribute instead of writing an empty value.
    Remove,
}

/// Outcome of recomputing one area.
#[derive(Debug, Clone, PartialEq)]
pub enum Recompute {
    /// Fewer than three points came out of the coordinates (unknown kind,
    /// unparsable string, or a kind without geometry). Leave the area as is.
    Skipped,
    /// The area is shown: update its coordinates and center the indicator at
    /// `center`, given in percent of the wrapper.
    Visible {
        coords: CoordsUpdate,
        center: Percent,
    },
    /// The area is empty, a coordinate could not be read, or its indicator
    /// does not fit. `coords` places it outside the wrapper; the indicator is
    /// to be disabled and moved out of view.
    Hidden { coords: String },
}

impl Recompute {
    pub fn is_visible(&self) -> bool {
        matches!(self, Recompute::Visible { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Recompute::Skipped)
    }

    /// Whether the indicator ends up disabled; `None` when nothing was decided.
    pub fn indicator_disabled(&self) -> Option<bool> {
        match self {
            Recompute::Skipped => None,
            Recompute::Visible { .. } => Some(false),
            Recompute::Hidden { .. } => Some(true),
        }
    }
}

/// Recomputes areas against a viewport using an explicit converter table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    converters: ConverterTable,
}

impl Engine {
    pub fn new(converters: ConverterTable) -> Self {
        Engine { converters }
    }

    pub fn converters(&self) -> &ConverterTable {
        &self.converters
    }

    /// Parse `shape` and recompute it for `viewport`.
    pub fn recompute(&self, shape: &Shape<'_>, viewport: &Viewport) -> Recompute {
        if !shape.kind.is_known() {
            warn!(shape = %shape.kind, "unknown shape kind, area left untouched");
            return Recompute::Skipped;
        }
        let points = self.converters.parse(&shape.kind, shape.coords);
        self.recompute_points(&shape.kind, &points, viewport)
    }

    /// Recompute already parsed points, in authored (reference) coordinates.
    pub fn recompute_points(
        &self,
        kind: &ShapeKind,
        points: &[Point],
        viewport: &Viewport,
    ) -> Recompute {
        if points.len() < MIN_POINTS {
            debug!(%kind, points = points.len(), "not enough points to draw, skipping");
            return Recompute::Skipped;
        }
        if points.iter().any(|p| p.x.is_nan() || p.y.is_nan()) {
            debug!(%kind, "unreadable coordinate, hiding");
            return hidden(viewport);
        }

        let image = viewport.image();
        let scaled = scale_points(points, viewport.fraction(), image);

        let Some(bbox) = calculate_bounding_box(&scaled) else {
            return Recompute::Skipped;
        };
        let center = bbox.center();
        let indicator = HotzoneIndicatorBox::centered(center, viewport.indicator());
        let visible = bbox.area() > 0.0 && indicator.fits_within(image);
        trace!(?bbox, ?indicator, visible, "hotzone");

        if !visible {
            return hidden(viewport);
        }

        let serialized = self
            .converters
            .converter(kind)
            .map(|c| c.serialize(&scaled))
            .unwrap_or_default();
        let coords = if serialized.is_empty() {
            CoordsUpdate::Remove
        } else {
            CoordsUpdate::Set(serialized)
        };

        let wrapper = viewport.wrapper();
        let center = Percent {
            top: center.y * 100.0 / wrapper.h,
            left: center.x * 100.0 / wrapper.w,
        };
        Recompute::Visible { coords, center }
    }
}

/// Park the area on the bottom right corner of the wrapper.
fn hidden(viewport: &Viewport) -> Recompute {
    let wrapper = viewport.wrapper();
    Recompute::Hidden {
        coords: join_numbers(&[wrapper.w, wrapper.h, wrapper.w, wrapper.h]),
    }
}
