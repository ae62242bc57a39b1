//! SVG figure generation.
//!
//! The figure is sized in points (1/72 inch). Layout bounds are mapped onto an
//! axes rectangle inset from the figure edges, leaving a band above it for the
//! title. The two axes are scaled independently, so symbol heights stay fixed
//! while the horizontal scale follows the construct length.

use crate::circuit::palette;
use crate::circuit::{CanvasBounds, ElementKind, Layout, LayoutElement};
use crate::config::RenderConfig;

const POINTS_PER_INCH: f64 = 72.0;

// Axes rectangle as fractions of the figure, measured from the bottom-left.
const AXES_LEFT: f64 = 0.125;
const AXES_RIGHT: f64 = 0.9;
const AXES_BOTTOM: f64 = 0.11;
const AXES_TOP: f64 = 0.88;

const STROKE: &str = "#000000";
const BACKGROUND: &str = "#ffffff";
const LINE_WIDTH_PT: f64 = 2.0;
const LABEL_FONT_PT: f64 = 10.0;
const TITLE_FONT_PT: f64 = 12.0;
const TITLE_PAD_PT: f64 = 6.0;
const LABEL_ROTATION_DEG: f64 = -45.0;

// Symbol geometry (layout units).
const MARK_HEIGHT: f64 = 0.5;
const LABEL_RISE: f64 = 0.6;
const PROMOTER_SHAFT: f64 = 0.1;
const PROMOTER_HEAD_HALF: f64 = 0.05;
const GENE_BODY_HALF: f64 = 0.25;
const GENE_HEAD_HALF: f64 = 0.35;
const GENE_HEAD_LEN: f64 = 0.2;

/// Figure size and typography.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width_pt: f64,
    pub height_pt: f64,
    pub font_family: String,
}

impl Figure {
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            width_pt: config.figure_width_in * POINTS_PER_INCH,
            height_pt: config.figure_height_in * POINTS_PER_INCH,
            font_family: config.font_family.clone(),
        }
    }
}

/// Maps layout units onto figure points (y grows downward in SVG).
struct Viewport {
    bounds: CanvasBounds,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Viewport {
    fn new(bounds: CanvasBounds, figure: &Figure) -> Self {
        Self {
            bounds,
            left: AXES_LEFT * figure.width_pt,
            right: AXES_RIGHT * figure.width_pt,
            top: (1.0 - AXES_TOP) * figure.height_pt,
            bottom: (1.0 - AXES_BOTTOM) * figure.height_pt,
        }
    }

    fn x(&self, x: f64) -> f64 {
        self.left + (x - self.bounds.x_min) / self.bounds.width() * (self.right - self.left)
    }

    fn y(&self, y: f64) -> f64 {
        self.bottom - (y - self.bounds.y_min) / self.bounds.height() * (self.bottom - self.top)
    }
}

/// Render a layout as a standalone SVG document.
#[must_use]
pub fn render_svg(layout: &Layout, figure: &Figure) -> String {
    let view = Viewport::new(layout.bounds, figure);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.2}\" height=\"{h:.2}\" viewBox=\"0 0 {w:.2} {h:.2}\" font-family=\"{font}\">",
        w = figure.width_pt,
        h = figure.height_pt,
        font = escape_xml(&figure.font_family),
    ));
    svg.push_str(&format!("<rect width=\"100%\" height=\"100%\" fill=\"{BACKGROUND}\"/>"));

    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{TITLE_FONT_PT}\" text-anchor=\"middle\" fill=\"{STROKE}\">{}</text>",
        (view.left + view.right) / 2.0,
        view.top - TITLE_PAD_PT,
        escape_xml(&layout.title),
    ));

    // Baseline first so every symbol draws on top of it.
    let (start, end) = layout.baseline;
    push_line(&mut svg, &view, (start, 0.0), (end, 0.0));

    for element in &layout.elements {
        match element.kind {
            ElementKind::Promoter => draw_promoter(&mut svg, &view, element),
            ElementKind::Gene => draw_gene(&mut svg, &view, element),
            ElementKind::Terminator => draw_terminator(&mut svg, &view, element),
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Bent arrow: stem up from the baseline, then a short arrow pointing right.
fn draw_promoter(svg: &mut String, view: &Viewport, el: &LayoutElement) {
    let x = el.x;
    push_line(svg, view, (x, 0.0), (x, MARK_HEIGHT));
    push_line(svg, view, (x, MARK_HEIGHT), (x + PROMOTER_SHAFT, MARK_HEIGHT));
    push_polygon(
        svg,
        view,
        &[
            (x + PROMOTER_SHAFT, MARK_HEIGHT + PROMOTER_HEAD_HALF),
            (el.end(), MARK_HEIGHT),
            (x + PROMOTER_SHAFT, MARK_HEIGHT - PROMOTER_HEAD_HALF),
        ],
        STROKE,
    );
    push_rotated_label(svg, view, x + PROMOTER_SHAFT, LABEL_RISE, &el.label);
}

/// Block arrow straddling the baseline. The head sits inside the footprint.
fn draw_gene(svg: &mut String, view: &Viewport, el: &LayoutElement) {
    let fill = palette::color(el.color_index).hex();
    let neck = el.end() - GENE_HEAD_LEN;
    push_polygon(
        svg,
        view,
        &[
            (el.x, -GENE_BODY_HALF),
            (neck, -GENE_BODY_HALF),
            (neck, -GENE_HEAD_HALF),
            (el.end(), 0.0),
            (neck, GENE_HEAD_HALF),
            (neck, GENE_BODY_HALF),
            (el.x, GENE_BODY_HALF),
        ],
        &fill,
    );
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{LABEL_FONT_PT}\" text-anchor=\"middle\" dominant-baseline=\"central\" fill=\"{STROKE}\">{}</text>",
        view.x(el.x + el.width / 2.0),
        view.y(0.0),
        escape_xml(&el.label),
    ));
}

/// T-shaped mark: stem up from the baseline capped by a bar across the footprint.
fn draw_terminator(svg: &mut String, view: &Viewport, el: &LayoutElement) {
    let center = el.x + el.width / 2.0;
    push_line(svg, view, (center, 0.0), (center, MARK_HEIGHT));
    push_line(svg, view, (el.x, MARK_HEIGHT), (el.end(), MARK_HEIGHT));
    push_rotated_label(svg, view, center, LABEL_RISE, &el.label);
}

fn push_line(svg: &mut String, view: &Viewport, a: (f64, f64), b: (f64, f64)) {
    svg.push_str(&format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{STROKE}\" stroke-width=\"{LINE_WIDTH_PT}\" stroke-linecap=\"square\"/>",
        view.x(a.0),
        view.y(a.1),
        view.x(b.0),
        view.y(b.1),
    ));
}

fn push_polygon(svg: &mut String, view: &Viewport, points: &[(f64, f64)], fill: &str) {
    let points = points
        .iter()
        .map(|&(x, y)| format!("{:.2},{:.2}", view.x(x), view.y(y)))
        .collect::<Vec<_>>()
        .join(" ");
    svg.push_str(&format!("<polygon points=\"{points}\" fill=\"{fill}\" stroke=\"{fill}\" stroke-linejoin=\"miter\"/>"));
}

fn push_rotated_label(svg: &mut String, view: &Viewport, x: f64, y: f64, label: &str) {
    let (px, py) = (view.x(x), view.y(y));
    svg.push_str(&format!(
        "<text x=\"{px:.2}\" y=\"{py:.2}\" font-size=\"{LABEL_FONT_PT}\" fill=\"{STROKE}\" transform=\"rotate({LABEL_ROTATION_DEG} {px:.2} {py:.2})\">{}</text>",
        escape_xml(label),
    ));
}

/// Escape text for use in XML/HTML content and attribute values.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
#[path = "svg_test.rs"]
mod tests;
