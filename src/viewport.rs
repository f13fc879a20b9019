//! The rendered context an area is recomputed against.

use crate::defaults;
use crate::errors::ViewportError;
use crate::types::{Size, non_negative, positive};

/// Rendered image size, the wrapper the indicators are positioned in, the
/// width the coordinates were authored against, and the indicator footprint.
///
/// Built through validated constructors, so the engine can divide by the
/// reference width and the wrapper size without checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    image: Size,
    wrapper: Size,
    reference_width: f64,
    indicator: Size,
}

impl Viewport {
    /// Image size may be zero (an image that has not loaded yet hides every
    /// area); the wrapper must have a positive size.
    pub fn try_new(image: Size, wrapper: Size) -> Result<Self, ViewportError> {
        let image = Size::try_new(image.w, image.h).map_err(ViewportError::Image)?;
        let wrapper = Size::try_positive(wrapper.w, wrapper.h).map_err(ViewportError::Wrapper)?;
        Ok(Viewport {
            image,
            wrapper,
            reference_width: defaults::REFERENCE_WIDTH,
            indicator: Size::ZERO,
        })
    }

    /// Convenience for images that are their own wrapper.
    pub fn for_image(image: Size) -> Result<Self, ViewportError> {
        Self::try_new(image, image)
    }

    pub fn with_reference_width(mut self, width: f64) -> Result<Self, ViewportError> {
        self.reference_width = positive(width).map_err(ViewportError::ReferenceWidth)?;
        Ok(self)
    }

    /// Any finite indicator size is accepted; its sign is ignored by the fit test.
    pub fn with_indicator(mut self, indicator: Size) -> Result<Self, ViewportError> {
        non_negative(indicator.w.abs()).map_err(ViewportError::Indicator)?;
        non_negative(indicator.h.abs()).map_err(ViewportError::Indicator)?;
        self.indicator = indicator;
        Ok(self)
    }

    pub fn image(&self) -> Size {
        self.image
    }

    pub fn wrapper(&self) -> Size {
        self.wrapper
    }

    pub fn reference_width(&self) -> f64 {
        self.reference_width
    }

    pub fn indicator(&self) -> Size {
        self.indicator
    }

    /// Uniform scale from authored to rendered coordinates, derived from widths only.
    pub fn fraction(&self) -> f64 {
        self.image.w / self.reference_width
    }
}
