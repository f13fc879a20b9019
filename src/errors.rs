//! Error types with rich diagnostics using miette
//!
//! The geometry engine itself never fails; these cover building a viewport
//! from caller-supplied sizes and reading `.imagemap` descriptions.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Viewport Errors
// ============================================================================

/// A dimension handed to the viewport was unusable
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ViewportError {
    #[error("invalid image size: {0}")]
    #[diagnostic(code(imagemap::viewport::image))]
    Image(NumericError),

    #[error("invalid wrapper size: {0}")]
    #[diagnostic(
        code(imagemap::viewport::wrapper),
        help("indicator positions are percentages of the wrapper, so it needs a non-zero size")
    )]
    Wrapper(NumericError),

    #[error("invalid indicator size: {0}")]
    #[diagnostic(code(imagemap::viewport::indicator))]
    Indicator(NumericError),

    #[error("invalid reference width: {0}")]
    #[diagnostic(
        code(imagemap::viewport::reference_width),
        help("the reference width is the width the coordinates were authored against")
    )]
    ReferenceWidth(NumericError),
}

// ============================================================================
// Description Errors
// ============================================================================

/// Errors that occur while reading an `.imagemap` description
#[derive(Error, Diagnostic, Debug)]
pub enum DocumentError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(imagemap::document::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {message}")]
    #[diagnostic(code(imagemap::document::invalid_number))]
    InvalidNumber {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid number")]
        span: SourceSpan,
    },

    #[error("invalid viewport: {source}")]
    #[diagnostic(code(imagemap::document::viewport))]
    Viewport {
        #[source]
        source: ViewportError,
        #[source_code]
        src: NamedSource<String>,
        #[label("this size is not usable")]
        span: SourceSpan,
    },

    #[error("ratio `{ratio}` is given twice")]
    #[diagnostic(
        code(imagemap::document::duplicate_ratio),
        help("each ratio name may appear once per area")
    )]
    DuplicateRatio {
        ratio: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("first here")]
        first: SourceSpan,
        #[label("again here")]
        second: SourceSpan,
    },

    #[error("missing `image` statement")]
    #[diagnostic(
        code(imagemap::document::missing_image),
        help("add a line like `image 200 x 100` giving the rendered image size")
    )]
    MissingImage {
        #[source_code]
        src: NamedSource<String>,
    },
}
