//! Responsive HTML image maps.
//!
//! `<area>` coordinates are authored against one reference width, but the
//! image they sit on is rendered at whatever width the page gives it. The
//! [`Engine`] rescales each area to the rendered size, clamps it into the
//! image, and decides whether its hotzone indicator can be shown. The
//! [`ImageMap`] model applies those outcomes across a map and across layout
//! events (resize, ratio switch, responsive source swap).
//!
//! ```
//! use imagemap::{Engine, Recompute, Shape, Size, Viewport};
//!
//! let viewport = Viewport::for_image(Size::new(200.0, 200.0))?
//!     .with_reference_width(100.0)?;
//! let outcome = Engine::default().recompute(&Shape::from_attrs("rect", "0,0,100,100"), &viewport);
//! assert!(outcome.is_visible());
//! # Ok::<(), imagemap::ViewportError>(())
//! ```

pub mod converter;
pub mod defaults;
pub mod document;
pub mod engine;
pub mod errors;
pub mod geometry;
pub mod imagemap;
pub mod log;
pub mod report;
pub mod shape;
pub mod types;
pub mod viewport;

pub use converter::{ConverterTable, CoordsConverter};
pub use document::{Document, Event, Step, parse_document};
pub use engine::{CoordsUpdate, Engine, Recompute};
pub use errors::{DocumentError, ViewportError};
pub use geometry::{BoundingBox, HotzoneIndicatorBox, calculate_bounding_box};
pub use imagemap::{Area, ImageMap, Indicator, Placement, UpdateSummary};
pub use shape::{Shape, ShapeKind};
pub use types::{NumericError, Percent, Point, Size};
pub use viewport::Viewport;

/// Run an `.imagemap` description and render the resulting states.
///
/// Returns the report on success, or a diagnostic pointing into `source`.
pub fn run(source: &str) -> Result<String, miette::Report> {
    run_named("<input>", source)
}

/// Like [`run`], naming the source in diagnostics.
pub fn run_named(name: &str, source: &str) -> Result<String, miette::Report> {
    let document = parse_document(name, source)?;
    let steps = document.run(&Engine::default());
    Ok(report::render(&steps))
}
