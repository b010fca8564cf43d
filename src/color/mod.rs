mod hex;
mod hsv;

use smart_leds::RGB8;

pub use hex::{HEX_COLOR_LEN, format_hex_rgb, parse_hex_rgb};
pub use hsv::{HsvColor, hsv_to_rgb, rgb_to_hsv};

pub type Rgb = RGB8;

/// All components off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Check if any component of the color is lit
pub const fn is_lit(color: Rgb) -> bool {
    color.r != 0 || color.g != 0 || color.b != 0
}
