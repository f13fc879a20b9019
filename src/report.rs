//! Plain-text rendering of image map state, one line per area.

use std::fmt::Write;

use crate::document::Step;
use crate::imagemap::{Area, Indicator, Placement};

/// Render every step: a `== label` header, then each area.
pub fn render(steps: &[Step]) -> String {
    let mut out = String::new();
    for step in steps {
        out.push_str("== ");
        out.push_str(&step.label);
        if let Some(summary) = step.summary {
            let _ = write!(
                out,
                ": {} visible, {} hidden, {} skipped",
                summary.visible, summary.hidden, summary.skipped
            );
        }
        out.push('\n');
        for (index, area) in step.areas.iter().enumerate() {
            out.push_str(&render_area(index + 1, area));
            out.push('\n');
        }
    }
    out
}

/// `area 1 rect coords="0,0,200,200" indicator=enabled@(top 50%, left 50%)`
pub fn render_area(number: usize, area: &Area) -> String {
    let coords = match area.coords_attr() {
        Some(coords) => format!("\"{}\"", coords),
        None => "-".to_string(),
    };
    format!(
        "area {} {} coords={} indicator={}",
        number,
        area.shape(),
        coords,
        render_indicator(area.indicator())
    )
}

fn render_indicator(indicator: &Indicator) -> String {
    let state = if indicator.disabled {
        "disabled"
    } else {
        "enabled"
    };
    let placement = match indicator.placement {
        Placement::Unplaced => "unplaced".to_string(),
        Placement::At(center) => format!("({})", center),
        Placement::OutOfView => "out-of-view".to_string(),
    };
    let hidden = if indicator.hidden { " hidden" } else { "" };
    format!("{}@{}{}", state, placement, hidden)
}
