//! PNG rasterization through `resvg`.
//!
//! The system font database is loaded once when the [`Rasterizer`] is built and
//! shared by every render; loading it per request would dominate render time.

use std::sync::Arc;

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use tracing::debug;

use super::RenderError;
use super::svg::{Figure, render_svg};
use crate::circuit::Layout;
use crate::config::RenderConfig;

const POINTS_PER_INCH: f64 = 72.0;

#[derive(Clone)]
pub struct Rasterizer {
    figure: Figure,
    dpi: u32,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Rasterizer {
    /// Build a rasterizer with the system fonts loaded.
    #[must_use]
    pub fn new(config: &RenderConfig) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        debug!(faces = fontdb.len(), "font database loaded");
        Self::with_fonts(config, Arc::new(fontdb))
    }

    /// Build a rasterizer over an existing font database.
    #[must_use]
    pub fn with_fonts(config: &RenderConfig, fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { figure: Figure::from_config(config), dpi: config.dpi, fontdb }
    }

    /// Output size in pixels for the configured figure and DPI.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        let scale = f64::from(self.dpi) / POINTS_PER_INCH;
        (to_px(self.figure.width_pt * scale), to_px(self.figure.height_pt * scale))
    }

    /// Render a layout straight to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the generated SVG is rejected, the pixmap
    /// cannot be allocated, or PNG encoding fails.
    pub fn render(&self, layout: &Layout) -> Result<Vec<u8>, RenderError> {
        self.rasterize(&render_svg(layout, &self.figure))
    }

    /// Rasterize an SVG document produced by [`render_svg`] to PNG bytes.
    ///
    /// # Errors
    ///
    /// See [`Rasterizer::render`].
    pub fn rasterize(&self, svg: &str) -> Result<Vec<u8>, RenderError> {
        let mut options = usvg::Options::default();
        options.font_family.clone_from(&self.figure.font_family);
        options.fontdb = Arc::clone(&self.fontdb);

        let tree = usvg::Tree::from_str(svg, &options)?;

        let (width, height) = self.pixel_size();
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Allocate { width, height })?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let scale = (f64::from(width) / f64::from(tree.size().width())) as f32;
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        pixmap.encode_png().map_err(|e| RenderError::Encode(e.to_string()))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(value: f64) -> u32 {
    value.round().max(1.0) as u32
}

#[cfg(test)]
#[path = "png_test.rs"]
mod tests;
