use core::fmt::Write;

use heapless::String;

use crate::color::Rgb;

/// Length of an `RRGGBB` payload
pub const HEX_COLOR_LEN: usize = 6;

/// Parse an `RRGGBB` color. Both hex cases are accepted.
///
/// Returns `None` unless the input is exactly six hex digits.
pub fn parse_hex_rgb(value: &str) -> Option<Rgb> {
    let bytes = value.as_bytes();
    if bytes.len() != HEX_COLOR_LEN {
        return None;
    }

    let r = hex_byte(bytes[0], bytes[1])?;
    let g = hex_byte(bytes[2], bytes[3])?;
    let b = hex_byte(bytes[4], bytes[5])?;
    Some(Rgb { r, g, b })
}

/// Format a color as uppercase `RRGGBB`
pub fn format_hex_rgb(color: Rgb) -> String<HEX_COLOR_LEN> {
    let mut out = String::new();
    // Six hex digits always fit the buffer
    let _ = write!(out, "{:02X}{:02X}{:02X}", color.r, color.g, color.b);
    out
}

const fn hex_byte(high: u8, low: u8) -> Option<u8> {
    match (hex_digit(high), hex_digit(low)) {
        (Some(high), Some(low)) => Some((high << 4) | low),
        _ => None,
    }
}

const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
