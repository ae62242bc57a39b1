use super::*;
use crate::circuit::{layout, parse};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Rasterizer without system fonts; text is skipped but shapes still render.
fn rasterizer(dpi: u32) -> Rasterizer {
    let config = RenderConfig { dpi, ..RenderConfig::default() };
    Rasterizer::with_fonts(&config, Arc::new(usvg::fontdb::Database::new()))
}

/// Width and height from the IHDR chunk, which always follows the signature.
fn png_dimensions(png: &[u8]) -> (u32, u32) {
    let width = u32::from_be_bytes(png[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(png[20..24].try_into().unwrap());
    (width, height)
}

#[test]
fn pixel_size_at_300_dpi() {
    assert_eq!(rasterizer(300).pixel_size(), (3600, 900));
}

#[test]
fn pixel_size_scales_with_dpi() {
    assert_eq!(rasterizer(72).pixel_size(), (864, 216));
    assert_eq!(rasterizer(36).pixel_size(), (432, 108));
}

#[test]
fn render_produces_png_of_configured_size() {
    let construct = parse("pSynBio5000: pTEF1-GFP-tCYC1,pGAL1-RFP-tADH1").unwrap();
    let png = rasterizer(72).render(&layout(&construct)).unwrap();
    assert_eq!(png[..8], PNG_SIGNATURE);
    assert_eq!(png_dimensions(&png), (864, 216));
}

#[test]
fn render_full_resolution_png() {
    let construct = parse("one: pTEF1-GFP-tCYC1").unwrap();
    let png = rasterizer(300).render(&layout(&construct)).unwrap();
    assert_eq!(png_dimensions(&png), (3600, 900));
}

#[test]
fn render_is_deterministic() {
    let construct = parse("c: a-b-c,d-e-f,g-h-i").unwrap();
    let r = rasterizer(36);
    assert_eq!(r.render(&layout(&construct)).unwrap(), r.render(&layout(&construct)).unwrap());
}

#[test]
fn rasterize_rejects_invalid_svg() {
    let err = rasterizer(36).rasterize("<not-svg").unwrap_err();
    assert!(matches!(err, RenderError::Svg(_)));
}
