//! Rendering: turns a [`Layout`](crate::circuit::Layout) into an SVG figure and
//! rasterizes it to PNG.
//!
//! SVG is an internal intermediate only. [`svg`] maps layout units onto a
//! fixed-size figure (points), and [`png`] hands that document to `resvg` at
//! the configured DPI.

pub mod png;
pub mod svg;

pub use png::Rasterizer;
pub use svg::{Figure, render_svg};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("generated SVG could not be parsed: {0}")]
    Svg(#[from] resvg::usvg::Error),
    #[error("failed to allocate a {width}x{height} pixmap")]
    Allocate { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
