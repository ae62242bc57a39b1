//! Layout engine: places each cassette's promoter, gene and terminator left to
//! right along a single horizontal baseline.
//!
//! All coordinates are in layout units. The baseline sits at `y = 0`; symbols
//! rise above it (promoter and terminator marks) or straddle it (gene arrows).
//! Only the horizontal axis is computed here; symbol heights belong to the
//! renderer.

use serde::Serialize;

use super::ast::Construct;
use super::palette;

// Layout constants (layout units).
pub const LEFT_MARGIN: f64 = 1.0;
pub const RIGHT_MARGIN: f64 = 1.0;
/// Extra room to the left of the first promoter for its label.
pub const BOUNDS_EPSILON: f64 = 0.75;
pub const PROMOTER_WIDTH: f64 = 0.2;
pub const GENE_WIDTH: f64 = 0.7;
pub const TERMINATOR_GAP: f64 = 0.3;
pub const TERMINATOR_WIDTH: f64 = 0.2;
pub const CASSETTE_GAP: f64 = 0.3;
pub const Y_MIN: f64 = -1.0;
pub const Y_MAX: f64 = 2.0;

const TITLE_PREFIX: &str = "Gene Circuit: ";

/// The drawable primitive an element stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Promoter,
    Gene,
    Terminator,
}

/// A positioned, sized, labeled primitive on the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutElement {
    pub kind: ElementKind,
    pub label: String,
    pub x: f64,
    pub width: f64,
    /// Index of the owning cassette within the construct.
    pub cassette: usize,
    /// Palette slot shared by all elements of the owning cassette.
    pub color_index: usize,
}

impl LayoutElement {
    /// Right edge of the element's footprint.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.x + self.width
    }
}

/// Visible region of the layout, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl CanvasBounds {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Result of laying out one construct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub elements: Vec<LayoutElement>,
    pub bounds: CanvasBounds,
    /// Baseline segment: first promoter start to last terminator end.
    pub baseline: (f64, f64),
}

/// Lay out a construct's cassettes.
///
/// Produces exactly three elements per cassette in promoter, gene, terminator
/// order. The cursor starts at [`LEFT_MARGIN`]; the inter-cassette gap is only
/// applied between cassettes, never after the last one.
#[must_use]
pub fn layout(construct: &Construct) -> Layout {
    let cassettes = construct.cassettes();
    let colors = palette::sample(cassettes.len());
    let mut elements = Vec::with_capacity(cassettes.len() * 3);
    let mut x = LEFT_MARGIN;

    for (i, (cassette, &color_index)) in cassettes.iter().zip(&colors).enumerate() {
        let mut place = |kind: ElementKind, label: &str, at: f64, width: f64| {
            elements.push(LayoutElement { kind, label: label.to_owned(), x: at, width, cassette: i, color_index });
        };

        place(ElementKind::Promoter, &cassette.promoter, x, PROMOTER_WIDTH);
        x += PROMOTER_WIDTH;

        place(ElementKind::Gene, &cassette.gene, x, GENE_WIDTH);
        x += GENE_WIDTH;

        place(ElementKind::Terminator, &cassette.terminator, x + TERMINATOR_GAP, TERMINATOR_WIDTH);
        x += TERMINATOR_GAP + TERMINATOR_WIDTH;

        if i + 1 < cassettes.len() {
            x += CASSETTE_GAP;
        }
    }

    // A construct always has at least one cassette, so `elements` is non-empty.
    let baseline_end = elements.last().map_or(x, LayoutElement::end);

    Layout {
        title: title(construct.name()),
        elements,
        bounds: CanvasBounds {
            x_min: LEFT_MARGIN - BOUNDS_EPSILON,
            x_max: x + RIGHT_MARGIN,
            y_min: Y_MIN,
            y_max: Y_MAX,
        },
        baseline: (LEFT_MARGIN, baseline_end),
    }
}

/// Figure title for a construct.
#[must_use]
pub fn title(name: &str) -> String {
    format!("{TITLE_PREFIX}{name}")
}
