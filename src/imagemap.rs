//! Image map state: areas, their authored coordinates per ratio, and the
//! hotzone indicators that go with them.
//!
//! This is the caller side of the engine. It owns the per-ratio lookup and the
//! "current coordinates" memory between updates, and applies each
//! [`Recompute`] outcome the way a page would apply it to its `<area>` and
//! indicator elements.

use std::collections::BTreeMap;

use crate::defaults::FALLBACK_RATIO;
use crate::engine::{CoordsUpdate, Engine, Recompute};
use crate::log::debug;
use crate::shape::Shape;
use crate::types::Percent;
use crate::viewport::Viewport;

/// Where an indicator currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Placement {
    /// Never positioned by an update.
    #[default]
    Unplaced,
    /// Centered on its area, in percent of the wrapper.
    At(Percent),
    /// Pushed past the bottom right corner of the wrapper (top/left 100%).
    OutOfView,
}

/// The marker drawn on top of an area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Indicator {
    /// Set when the area could not be shown. A disabled indicator is
    /// re-placed by the next update that finds the area visible.
    pub disabled: bool,
    pub placement: Placement,
    /// Hidden while a responsive image is swapping its source.
    pub hidden: bool,
}

/// One `<area>` of the map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Area {
    shape: String,
    coords_by_ratio: BTreeMap<String, String>,
    current_coords: Option<String>,
    coords_attr: Option<String>,
    indicator: Indicator,
}

impl Area {
    /// `shape` is the raw attribute value; unknown kinds are kept and skipped.
    pub fn new(shape: impl Into<String>) -> Self {
        Area {
            shape: shape.into(),
            ..Default::default()
        }
    }

    /// Add the authored coordinates for one ratio.
    pub fn with_coords(mut self, ratio: impl Into<String>, coords: impl Into<String>) -> Self {
        self.coords_by_ratio.insert(ratio.into(), coords.into());
        self
    }

    pub fn shape(&self) -> &str {
        &self.shape
    }

    pub fn coords_by_ratio(&self) -> &BTreeMap<String, String> {
        &self.coords_by_ratio
    }

    /// Authored coordinates the next ratio-less update will start from.
    pub fn current_coords(&self) -> Option<&str> {
        self.current_coords.as_deref()
    }

    /// The rendered `coords` attribute, `None` when absent.
    pub fn coords_attr(&self) -> Option<&str> {
        self.coords_attr.as_deref()
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    fn update(
        &mut self,
        engine: &Engine,
        viewport: &Viewport,
        new_ratio: Option<&str>,
    ) -> Recompute {
        if let Some(ratio) = new_ratio {
            self.current_coords = self.coords_by_ratio.get(ratio).cloned();
        }
        let Some(coords) = self.current_coords.as_deref().filter(|c| !c.is_empty()) else {
            debug!(shape = %self.shape, ?new_ratio, "no coordinates to recompute");
            return Recompute::Skipped;
        };

        let outcome = engine.recompute(&Shape::from_attrs(&self.shape, coords), viewport);
        match &outcome {
            Recompute::Skipped => {}
            Recompute::Visible { coords, center } => {
                self.coords_attr = match coords {
                    CoordsUpdate::Set(value) => Some(value.clone()),
                    CoordsUpdate::Remove => None,
                };
                // Only a ratio switch or a previously disabled indicator moves it.
                if new_ratio.is_some() || self.indicator.disabled {
                    self.indicator.disabled = false;
                    self.indicator.placement = Placement::At(*center);
                }
            }
            Recompute::Hidden { coords } => {
                self.coords_attr = Some(coords.clone());
                self.indicator.disabled = true;
                self.indicator.placement = Placement::OutOfView;
            }
        }
        outcome
    }
}

/// How many areas each update showed, hid or left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSummary {
    pub visible: usize,
    pub hidden: usize,
    pub skipped: usize,
}

/// A whole image map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageMap {
    areas: Vec<Area>,
    responsive: bool,
}

impl ImageMap {
    pub fn new(areas: Vec<Area>) -> Self {
        ImageMap { areas, responsive: false }
    }

    /// A responsive image picks its ratio when its source loads, so `init`
    /// leaves the areas alone and waits for [`ImageMap::src_changed`].
    pub fn responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    pub fn is_responsive(&self) -> bool {
        self.responsive
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Recompute every area for `viewport`.
    ///
    /// With `new_ratio`, each area first switches to its coordinates for that
    /// ratio (areas without them are skipped from now on). Without it, areas
    /// recompute from the coordinates they last switched to. An empty ratio
    /// name counts as no ratio.
    pub fn update(
        &mut self,
        engine: &Engine,
        viewport: &Viewport,
        new_ratio: Option<&str>,
    ) -> UpdateSummary {
        let new_ratio = new_ratio.filter(|r| !r.is_empty());
        let mut summary = UpdateSummary::default();
        for area in &mut self.areas {
            match area.update(engine, viewport, new_ratio) {
                Recompute::Skipped => summary.skipped += 1,
                Recompute::Visible { .. } => summary.visible += 1,
                Recompute::Hidden { .. } => summary.hidden += 1,
            }
        }
        debug!(
            ?new_ratio,
            visible = summary.visible,
            hidden = summary.hidden,
            skipped = summary.skipped,
            "image map updated"
        );
        summary
    }

    /// First layout of the map. A non-responsive image updates with its own
    /// ratio, or the fallback ratio when it has none. Returns `None` for
    /// responsive images, which wait for their source.
    pub fn init(
        &mut self,
        engine: &Engine,
        viewport: &Viewport,
        image_ratio: Option<&str>,
    ) -> Option<UpdateSummary> {
        if self.responsive {
            return None;
        }
        let ratio = image_ratio
            .filter(|r| !r.is_empty())
            .unwrap_or(FALLBACK_RATIO);
        Some(self.update(engine, viewport, Some(ratio)))
    }

    /// A responsive image started loading a new source: hide all indicators.
    pub fn src_changing(&mut self) {
        for area in &mut self.areas {
            area.indicator.hidden = true;
        }
    }

    /// The new source is loaded: show the indicators again and update for the
    /// ratio the source was picked for.
    pub fn src_changed(
        &mut self,
        engine: &Engine,
        viewport: &Viewport,
        ratio: Option<&str>,
    ) -> UpdateSummary {
        for area in &mut self.areas {
            area.indicator.hidden = false;
        }
        self.update(engine, viewport, ratio)
    }
}
