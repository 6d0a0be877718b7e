//! Color parsing and the fallback color table
//!
//! Supports hex colors in the forms `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.

use image::Rgba;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Fallback color for types missing from the table
pub const DEFAULT_FALLBACK: Rgba<u8> = Rgba([0x88, 0x88, 0x88, 255]);

/// Fixed fallback colors by sprite type.
const FALLBACK_COLORS: [(&str, Rgba<u8>); 4] = [
    ("platform", Rgba([0x8B, 0x45, 0x13, 255])),
    ("player", Rgba([0x00, 0x00, 0xFF, 255])),
    ("enemy", Rgba([0xFF, 0x45, 0x00, 255])),
    ("item", Rgba([0xFF, 0xD7, 0x00, 255])),
];

/// Color drawn in place of a sprite of type `sprite_type` when no art is available.
///
/// ```
/// use sprite_loader::color::{fallback_color, DEFAULT_FALLBACK};
///
/// assert_eq!(fallback_color("enemy"), image::Rgba([0xFF, 0x45, 0x00, 255]));
/// assert_eq!(fallback_color("cloud"), DEFAULT_FALLBACK);
/// ```
pub fn fallback_color(sprite_type: &str) -> Rgba<u8> {
    FALLBACK_COLORS
        .iter()
        .find(|(name, _)| *name == sprite_type)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_FALLBACK)
}

/// Parse a hex color string into an RGBA color.
///
/// - `#RGB` / `#RGBA` - each digit is doubled (e.g., `#F00` -> red)
/// - `#RRGGBB` - alpha defaults to 255 (opaque)
/// - `#RRGGBBAA` - explicit alpha channel
///
/// # Examples
///
/// ```
/// use sprite_loader::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("#00000000").unwrap(), image::Rgba([0, 0, 0, 0]));
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    let digits = hex
        .chars()
        .map(parse_hex_digit)
        .collect::<Result<Vec<u8>, _>>()?;

    match digits.len() {
        3 => Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, 255])),
        4 => Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, digits[3] * 17])),
        6 => Ok(Rgba([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            255,
        ])),
        8 => Ok(Rgba([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            digits[6] * 16 + digits[7],
        ])),
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

/// Format a color as `#RRGGBB` (or `#RRGGBBAA` when not opaque).
pub fn to_hex(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}
