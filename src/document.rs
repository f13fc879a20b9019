//! `.imagemap` descriptions: an image map plus a scripted sequence of layout
//! events, used by the fixture tests and `cargo xtask`.
//!
//! ```text
//! image 200 x 100
//! base-width 100
//! indicator 20 x 20
//! area rect {
//!   uncropped: "0,0,100,50"
//! }
//! event resize image 100 x 50
//! ```

use std::collections::BTreeMap;
use std::fmt;

use miette::SourceSpan;
use pest::Parser;
use pest::iterators::{Pair, Pairs};
use pest_derive::Parser;

use crate::defaults::{FALLBACK_RATIO, REFERENCE_WIDTH};
use crate::engine::Engine;
use crate::errors::{DocumentError, SourceContext, ViewportError};
use crate::imagemap::{Area, ImageMap, UpdateSummary};
use crate::log::debug;
use crate::types::{NumericError, Size, positive};
use crate::viewport::Viewport;

#[derive(Parser)]
#[grammar = "imagemap.pest"]
pub struct DocumentParser;

/// Something that happens to the page after the map is first laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The image (and its wrapper) changed size.
    Resize(Viewport),
    /// The page switched the image to another ratio.
    Ratio(String),
    /// A responsive image started loading a new source.
    SrcChanging,
    /// A responsive image finished loading, possibly for a new ratio.
    SrcChanged(Option<String>),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Resize(vp) => write!(f, "resize image {} wrapper {}", vp.image(), vp.wrapper()),
            Event::Ratio(ratio) => write!(f, "ratio {}", ratio),
            Event::SrcChanging => write!(f, "src-changing"),
            Event::SrcChanged(Some(ratio)) => write!(f, "src-changed {}", ratio),
            Event::SrcChanged(None) => write!(f, "src-changed"),
        }
    }
}

/// A parsed description.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub viewport: Viewport,
    /// Ratio the image declares for `init`.
    pub ratio: Option<String>,
    pub responsive: bool,
    pub areas: Vec<Area>,
    pub events: Vec<Event>,
}

/// Map state captured after `init` or an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub label: String,
    pub summary: Option<UpdateSummary>,
    pub areas: Vec<Area>,
}

impl Document {
    /// Lay the map out, then play every event, capturing the state after each.
    pub fn run(&self, engine: &Engine) -> Vec<Step> {
        let mut map = ImageMap::new(self.areas.clone()).responsive(self.responsive);
        let mut viewport = self.viewport;
        let mut steps = Vec::with_capacity(self.events.len() + 1);

        let summary = map.init(engine, &viewport, self.ratio.as_deref());
        let label = if self.responsive {
            "init (responsive, waiting for source)".to_string()
        } else {
            format!("init (ratio {})", self.ratio.as_deref().unwrap_or(FALLBACK_RATIO))
        };
        steps.push(Step { label, summary, areas: map.areas().to_vec() });

        for event in &self.events {
            debug!(%event, "playing event");
            let summary = match event {
                Event::Resize(resized) => {
                    viewport = *resized;
                    Some(map.update(engine, &viewport, None))
                }
                Event::Ratio(ratio) => Some(map.update(engine, &viewport, Some(ratio))),
                Event::SrcChanging => {
                    map.src_changing();
                    None
                }
                Event::SrcChanged(ratio) => {
                    Some(map.src_changed(engine, &viewport, ratio.as_deref()))
                }
            };
            steps.push(Step {
                label: event.to_string(),
                summary,
                areas: map.areas().to_vec(),
            });
        }
        steps
    }
}

/// Header values collected before the viewport can be built.
struct Header {
    image: Option<(Size, SourceSpan)>,
    wrapper: Option<Size>,
    reference_width: f64,
    indicator: Size,
}

/// Parse a description. `name` is only used in diagnostics.
pub fn parse_document(name: &str, source: &str) -> Result<Document, DocumentError> {
    let ctx = SourceContext::new(name, source);
    let mut pairs =
        DocumentParser::parse(Rule::document, source).map_err(|e| syntax_error(&ctx, e))?;
    let Some(document) = pairs.next() else {
        return Err(DocumentError::MissingImage {
            src: ctx.named_source(),
        });
    };

    let mut header = Header {
        image: None,
        wrapper: None,
        reference_width: REFERENCE_WIDTH,
        indicator: Size::ZERO,
    };
    let mut ratio = None;
    let mut responsive = false;
    let mut areas = Vec::new();
    // Events are validated once the header is known, since a resize keeps the
    // reference width and indicator of the map.
    let mut pending_events = Vec::new();

    for pair in document.into_inner() {
        match pair.as_rule() {
            Rule::image_stmt => {
                let span = span_of(&pair);
                let size = parse_size(&ctx, first_inner(&ctx, pair)?)?;
                let size = Size::try_new(size.w, size.h)
                    .map_err(|e| viewport_error(&ctx, ViewportError::Image(e), span))?;
                header.image = Some((size, span));
            }
            Rule::wrapper_stmt => {
                let span = span_of(&pair);
                let size = parse_size(&ctx, first_inner(&ctx, pair)?)?;
                let size = Size::try_positive(size.w, size.h)
                    .map_err(|e| viewport_error(&ctx, ViewportError::Wrapper(e), span))?;
                header.wrapper = Some(size);
            }
            Rule::base_width_stmt => {
                let span = span_of(&pair);
                let width = parse_number(&ctx, first_inner(&ctx, pair)?)?;
                header.reference_width = positive(width)
                    .map_err(|e| viewport_error(&ctx, ViewportError::ReferenceWidth(e), span))?;
            }
            Rule::indicator_stmt => {
                header.indicator = parse_size(&ctx, first_inner(&ctx, pair)?)?;
            }
            Rule::ratio_stmt => {
                ratio = Some(first_inner(&ctx, pair)?.as_str().to_string());
            }
            Rule::responsive_stmt => responsive = true,
            Rule::area_stmt => areas.push(parse_area(&ctx, pair)?),
            Rule::event_stmt => pending_events.push(first_inner(&ctx, pair)?),
            Rule::EOI => {}
            other => return Err(unexpected(&ctx, other, span_of(&pair))),
        }
    }

    let Some((image, image_span)) = header.image else {
        return Err(DocumentError::MissingImage { src: ctx.named_source() });
    };
    let viewport = build_viewport(&ctx, &header, image, header.wrapper, image_span)?;

    let mut events = Vec::with_capacity(pending_events.len());
    for pair in pending_events {
        events.push(parse_event(&ctx, &header, pair)?);
    }

    debug!(areas = areas.len(), events = events.len(), "parsed image map description");
    Ok(Document { viewport, ratio, responsive, areas, events })
}

fn build_viewport(
    ctx: &SourceContext,
    header: &Header,
    image: Size,
    wrapper: Option<Size>,
    span: SourceSpan,
) -> Result<Viewport, DocumentError> {
    Viewport::try_new(image, wrapper.unwrap_or(image))
        .and_then(|vp| vp.with_reference_width(header.reference_width))
        .and_then(|vp| vp.with_indicator(header.indicator))
        .map_err(|e| viewport_error(ctx, e, span))
}

fn parse_area(ctx: &SourceContext, pair: Pair<'_, Rule>) -> Result<Area, DocumentError> {
    let mut inner = pair.into_inner();
    let shape = next_inner(ctx, &mut inner, Rule::shape_name)?;
    let mut area = Area::new(shape.as_str());

    let Some(body) = inner.next() else {
        return Ok(area);
    };
    let mut seen: BTreeMap<String, SourceSpan> = BTreeMap::new();
    for entry in body.into_inner() {
        let entry_span = span_of(&entry);
        let mut parts = entry.into_inner();
        let ratio = next_inner(ctx, &mut parts, Rule::name)?.as_str().to_string();
        let string = next_inner(ctx, &mut parts, Rule::string)?;
        let coords = string.into_inner().next().map(|p| p.as_str()).unwrap_or("");

        if let Some(first) = seen.get(&ratio) {
            return Err(DocumentError::DuplicateRatio {
                ratio,
                src: ctx.named_source(),
                first: *first,
                second: entry_span,
            });
        }
        seen.insert(ratio.clone(), entry_span);
        area = area.with_coords(ratio, coords);
    }
    Ok(area)
}

fn parse_event(
    ctx: &SourceContext,
    header: &Header,
    pair: Pair<'_, Rule>,
) -> Result<Event, DocumentError> {
    let span = span_of(&pair);
    let rule = pair.as_rule();
    let mut inner = pair.into_inner();
    match rule {
        Rule::resize_event => {
            let image = parse_size(ctx, next_inner(ctx, &mut inner, Rule::size)?)?;
            let wrapper = inner.next().map(|p| parse_size(ctx, p)).transpose()?;
            let viewport = build_viewport(ctx, header, image, wrapper, span)?;
            Ok(Event::Resize(viewport))
        }
        Rule::ratio_event => {
            let ratio = next_inner(ctx, &mut inner, Rule::name)?;
            Ok(Event::Ratio(ratio.as_str().to_string()))
        }
        Rule::src_changing_event => Ok(Event::SrcChanging),
        Rule::src_changed_event => {
            let ratio = inner.next().map(|p| p.as_str().to_string());
            Ok(Event::SrcChanged(ratio))
        }
        other => Err(unexpected(ctx, other, span)),
    }
}

fn parse_size(ctx: &SourceContext, pair: Pair<'_, Rule>) -> Result<Size, DocumentError> {
    let mut inner = pair.into_inner();
    let w = parse_number(ctx, next_inner(ctx, &mut inner, Rule::number)?)?;
    let h = parse_number(ctx, next_inner(ctx, &mut inner, Rule::number)?)?;
    Ok(Size::new(w, h))
}

fn parse_number(ctx: &SourceContext, pair: Pair<'_, Rule>) -> Result<f64, DocumentError> {
    let span = span_of(&pair);
    let invalid = |message: String| DocumentError::InvalidNumber {
        message,
        src: ctx.named_source(),
        span,
    };
    let value: f64 = pair
        .as_str()
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
    if !value.is_finite() {
        return Err(invalid(NumericError::Infinite.to_string()));
    }
    Ok(value)
}

fn first_inner<'a>(
    ctx: &SourceContext,
    pair: Pair<'a, Rule>,
) -> Result<Pair<'a, Rule>, DocumentError> {
    let span = span_of(&pair);
    let rule = pair.as_rule();
    pair.into_inner().next().ok_or_else(|| unexpected(ctx, rule, span))
}

fn next_inner<'a>(
    ctx: &SourceContext,
    pairs: &mut Pairs<'a, Rule>,
    expected: Rule,
) -> Result<Pair<'a, Rule>, DocumentError> {
    match pairs.next() {
        Some(pair) if pair.as_rule() == expected => Ok(pair),
        Some(pair) => Err(unexpected(ctx, pair.as_rule(), span_of(&pair))),
        None => Err(DocumentError::Syntax {
            message: format!("expected {:?}", expected),
            src: ctx.named_source(),
            span: (ctx.source.len(), 0).into(),
        }),
    }
}

fn span_of(pair: &Pair<'_, Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

fn unexpected(ctx: &SourceContext, rule: Rule, span: SourceSpan) -> DocumentError {
    DocumentError::Syntax {
        message: format!("unexpected {:?}", rule),
        src: ctx.named_source(),
        span,
    }
}

fn viewport_error(ctx: &SourceContext, source: ViewportError, span: SourceSpan) -> DocumentError {
    DocumentError::Viewport {
        source,
        src: ctx.named_source(),
        span,
    }
}

fn syntax_error(ctx: &SourceContext, err: pest::error::Error<Rule>) -> DocumentError {
    let span: SourceSpan = match err.location {
        pest::error::InputLocation::Pos(pos) => (pos, 0).into(),
        pest::error::InputLocation::Span((start, end)) => (start, end - start).into(),
    };
    DocumentError::Syntax {
        message: err.variant.message().into_owned(),
        src: ctx.named_source(),
        span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imagemap::Placement;
    use crate::types::Percent;

    const BASIC: &str = r#"
# two areas
image 200 x 100
wrapper 400 x 200   # wider than the image
base-width 100
indicator 10 x 10
ratio portrait

area rect {
  portrait: "0,0,50,50"
  uncropped: "0,0,100,50"
}
area default

event resize image 100 x 50
event ratio uncropped
event src-changing
event src-changed
"#;

    #[test]
    fn parses_header_and_areas() {
        let doc = parse_document("basic.imagemap", BASIC).unwrap();
        assert_eq!(doc.viewport.image(), Size::new(200.0, 100.0));
        assert_eq!(doc.viewport.wrapper(), Size::new(400.0, 200.0));
        assert_eq!(doc.viewport.reference_width(), 100.0);
        assert_eq!(doc.viewport.indicator(), Size::new(10.0, 10.0));
        assert_eq!(doc.ratio.as_deref(), Some("portrait"));
        assert!(!doc.responsive);

        assert_eq!(doc.areas.len(), 2);
        assert_eq!(doc.areas[0].shape(), "rect");
        let portrait = doc.areas[0].coords_by_ratio().get("portrait");
        assert_eq!(portrait.map(String::as_str), Some("0,0,50,50"));
        assert_eq!(doc.areas[1].shape(), "default");
        assert!(doc.areas[1].coords_by_ratio().is_empty());
    }

    #[test]
    fn parses_events() {
        let doc = parse_document("basic.imagemap", BASIC).unwrap();
        assert_eq!(doc.events.len(), 4);
        match &doc.events[0] {
            Event::Resize(vp) => {
                assert_eq!(vp.image(), Size::new(100.0, 50.0));
                // No wrapper given: the image is its own wrapper.
                assert_eq!(vp.wrapper(), Size::new(100.0, 50.0));
                // Header settings carry over.
                assert_eq!(vp.reference_width(), 100.0);
                assert_eq!(vp.indicator(), Size::new(10.0, 10.0));
            }
            other => panic!("expected resize, got {:?}", other),
        }
        assert_eq!(doc.events[1], Event::Ratio("uncropped".to_string()));
        assert_eq!(doc.events[2], Event::SrcChanging);
        assert_eq!(doc.events[3], Event::SrcChanged(None));
    }

    #[test]
    fn events_display_like_their_source() {
        let doc = parse_document("basic.imagemap", BASIC).unwrap();
        let labels: Vec<String> = doc.events.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            [
                "resize image 100 x 50 wrapper 100 x 50",
                "ratio uncropped",
                "src-changing",
                "src-changed",
            ]
        );
    }

    #[test]
    fn run_captures_every_step() {
        let doc = parse_document("basic.imagemap", BASIC).unwrap();
        let steps = doc.run(&Engine::default());
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].label, "init (ratio portrait)");

        let area = &steps[0].areas[0];
        assert_eq!(area.coords_attr(), Some("0,0,100,100"));
        assert_eq!(
            area.indicator().placement,
            Placement::At(Percent {
                top: 25.0,
                left: 12.5,
            })
        );

        // src-changing only hides indicators.
        assert_eq!(steps[3].summary, None);
        assert!(steps[3].areas[0].indicator().hidden);
        assert!(!steps[4].areas[0].indicator().hidden);
    }

    #[test]
    fn missing_image_is_an_error() {
        let err = parse_document("x", "base-width 10\n").unwrap_err();
        assert!(matches!(err, DocumentError::MissingImage { .. }));
    }

    #[test]
    fn zero_base_width_points_at_the_statement() {
        let source = "image 10 x 10\nbase-width 0\n";
        let err = parse_document("x", source).unwrap_err();
        match err {
            DocumentError::Viewport { span, .. } => {
                assert_eq!(&source[span.offset()..span.offset() + span.len()], "base-width 0");
            }
            other => panic!("expected viewport error, got {:?}", other),
        }
    }

    #[test]
    fn zero_wrapper_is_rejected() {
        let err = parse_document("x", "image 10 x 10\nwrapper 0 x 10\n").unwrap_err();
        assert!(matches!(err, DocumentError::Viewport { .. }));
    }

    #[test]
    fn duplicate_ratio_is_rejected() {
        let source = "image 10 x 10\narea rect {\n  a: \"1,1,2,2\"\n  a: \"3,3,4,4\"\n}\n";
        let err = parse_document("x", source).unwrap_err();
        match err {
            DocumentError::DuplicateRatio { ratio, .. } => assert_eq!(ratio, "a"),
            other => panic!("expected duplicate ratio, got {:?}", other),
        }
    }

    #[test]
    fn syntax_errors_are_reported() {
        let err = parse_document("x", "image 10 by 10\n").unwrap_err();
        assert!(matches!(err, DocumentError::Syntax { .. }));
    }

    #[test]
    fn empty_coordinates_and_unknown_shapes_parse() {
        let source = "image 10 x 10\narea ellipse {\n  uncropped: \"\"\n}";
        let doc = parse_document("x", source).unwrap();
        assert_eq!(doc.areas[0].shape(), "ellipse");
        let uncropped = doc.areas[0].coords_by_ratio().get("uncropped");
        assert_eq!(uncropped.map(String::as_str), Some(""));
    }

    #[test]
    fn responsive_init_waits() {
        let doc = parse_document("x", "image 10 x 10\nresponsive\n").unwrap();
        let steps = doc.run(&Engine::default());
        assert_eq!(steps[0].label, "init (responsive, waiting for source)");
        assert_eq!(steps[0].summary, None);
    }
}
