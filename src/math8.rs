/// Scale an 8-bit value by a brightness (0-255 = 0.0-1.0)
///
/// Result is `value * brightness / 255` truncated, so `255` keeps the value
/// unchanged and `0` turns it off.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn dim8(value: u8, brightness: u8) -> u8 {
    ((value as u16 * brightness as u16) / 255) as u8
}

/// Move `current` one unit toward `target`, never past it
#[inline]
pub const fn step_toward(current: u8, target: u8) -> u8 {
    if current > target {
        current - 1
    } else if current < target {
        current + 1
    } else {
        current
    }
}

/// Largest per-component distance between two colors
#[inline]
pub const fn max_distance(a: [u8; 3], b: [u8; 3]) -> u8 {
    let dr = a[0].abs_diff(b[0]);
    let dg = a[1].abs_diff(b[1]);
    let db = a[2].abs_diff(b[2]);
    let max = if dr > dg { dr } else { dg };
    if max > db { max } else { db }
}
