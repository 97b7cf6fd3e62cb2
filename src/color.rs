// src/color.rs

//! Defines color-related enums (`NamedColor`, `Color`) and conversion functions.

use log::warn;
use serde::{Deserialize, Serialize};

/// The two named lamp states.
///
/// The lamp rectangle is only ever fully lit or fully dark; these are the
/// sRGB endpoints the signal decoder maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedColor {
    Black,
    White,
}

impl NamedColor {
    /// Returns the `Color::Rgb` representation of this named color.
    pub fn to_rgb_color(&self) -> Color {
        match self {
            NamedColor::Black => Color::Rgb(0, 0, 0),
            NamedColor::White => Color::Rgb(255, 255, 255),
        }
    }
}

/// Represents a color value used for the lamp fill.
/// Can be a default placeholder, one of the two named lamp states, or an
/// RGB true color (as configured overrides).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Default fill, to be resolved by the driver from the configured scheme.
    Default,
    /// One of the two named lamp states.
    Named(NamedColor),
    /// An RGB true color, with each component from 0 to 255.
    Rgb(u8, u8, u8),
}

impl Default for Color {
    fn default() -> Self {
        Color::Default
    }
}

/// Converts an input `Color` to its concrete `Color::Rgb` representation.
/// `Color::Default` is returned as black with a warning, as this function
/// is for resolving to a concrete RGB.
pub fn convert_to_rgb_color(color_input: Color) -> Color {
    match color_input {
        Color::Named(named_color) => named_color.to_rgb_color(),
        Color::Rgb(r, g, b) => Color::Rgb(r, g, b),
        Color::Default => {
            warn!(
                "convert_to_rgb_color received Color::Default. This function expects concrete colors. Returning black."
            );
            Color::Rgb(0, 0, 0)
        }
    }
}

/// Formats a color as a lowercase `#rrggbb` hex string.
///
/// Pure function of the resolved RGB triple; used for log output and by the
/// headless driver to report the applied fill.
pub fn to_hex_string(color: Color) -> String {
    let (r, g, b) = match convert_to_rgb_color(color) {
        Color::Rgb(r, g, b) => (r, g, b),
        // convert_to_rgb_color only returns Rgb
        _ => (0, 0, 0),
    };
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Packs a color into an X11 pixel value for a 24-bit TrueColor visual.
pub fn to_x11_pixel(color: Color) -> u64 {
    let (r, g, b) = match convert_to_rgb_color(color) {
        Color::Rgb(r, g, b) => (r, g, b),
        _ => (0, 0, 0),
    };
    ((r as u64) << 16) | ((g as u64) << 8) | (b as u64)
}
