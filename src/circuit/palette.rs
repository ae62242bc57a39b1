//! Qualitative colour palette for gene arrows.
//!
//! Twelve pastel colours (the `Set3` qualitative scheme). A construct with N
//! cassettes samples the palette at N evenly spaced points over `[0, 1]`, so
//! neighbouring cassettes get visibly different colours and the first and last
//! cassette always land on the two ends of the palette.

use serde::Serialize;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form used by the SVG renderer and the JSON API.
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const SET3: [Rgb; 12] = [
    Rgb(0x8d, 0xd3, 0xc7),
    Rgb(0xff, 0xff, 0xb3),
    Rgb(0xbe, 0xba, 0xda),
    Rgb(0xfb, 0x80, 0x72),
    Rgb(0x80, 0xb1, 0xd3),
    Rgb(0xfd, 0xb4, 0x62),
    Rgb(0xb3, 0xde, 0x69),
    Rgb(0xfc, 0xcd, 0xe5),
    Rgb(0xd9, 0xd9, 0xd9),
    Rgb(0xbc, 0x80, 0xbd),
    Rgb(0xcc, 0xeb, 0xc5),
    Rgb(0xff, 0xed, 0x6f),
];

/// Palette slot for a point `t` in `[0, 1]`. `t = 1.0` maps to the last slot.
#[must_use]
pub fn slot_at(t: f64) -> usize {
    let last = SET3.len() - 1;
    #[allow(clippy::cast_precision_loss)]
    let scaled = t.clamp(0.0, 1.0) * SET3.len() as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let slot = scaled.floor() as usize;
    slot.min(last)
}

/// Palette slots for `count` evenly spaced samples.
///
/// Up to twelve samples the slots are pairwise distinct; beyond that the
/// palette runs out and slots repeat.
#[must_use]
pub fn sample(count: usize) -> Vec<usize> {
    match count {
        0 => Vec::new(),
        1 => vec![slot_at(0.0)],
        _ => (0..count).map(|i| slot_at(fraction(i, count - 1))).collect(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn fraction(index: usize, last: usize) -> f64 {
    index as f64 / last as f64
}

/// Colour for a palette slot.
#[must_use]
pub fn color(slot: usize) -> Rgb {
    SET3[slot % SET3.len()]
}
