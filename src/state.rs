//! Per-channel light state

use crate::color::{BLACK, Rgb};
use crate::math8::max_distance;

/// Number of spotlight channels driven by one node (two PCA9685 chips)
pub const CHANNEL_COUNT: usize = 10;

/// Output status of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    On,
    Off,
}

impl Status {
    /// Status from a protocol digit, `1` is on and everything else off
    pub const fn from_digit(digit: u8) -> Self {
        if digit == 1 { Self::On } else { Self::Off }
    }

    pub const fn as_digit(self) -> u8 {
        match self {
            Self::On => 1,
            Self::Off => 0,
        }
    }
}

/// How the current color follows the target color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeMode {
    /// Jump to the target on the next tick
    Normal,
    /// Step each component by one per tick
    Fade,
}

impl FadeMode {
    /// Mode from a protocol digit, `1` is fade and everything else normal
    pub const fn from_digit(digit: u8) -> Self {
        if digit == 1 { Self::Fade } else { Self::Normal }
    }

    pub const fn as_digit(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Fade => 1,
        }
    }
}

/// State of a single spotlight channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotChannel {
    /// Color currently shown
    pub current: Rgb,
    /// Color the channel converges to
    pub target: Rgb,
    /// Undimmed color, scaled by `brightness` into `target`
    pub base: Rgb,
    pub brightness: u8,
    pub status: Status,
    pub mode: FadeMode,
    /// Current color changed during the last fade tick
    pub dirty: bool,
    /// Observers have not seen the latest state yet
    pub pending_publish: bool,
}

impl SpotChannel {
    /// Channel state after power-up: off, black, normal mode, full brightness
    pub const fn new() -> Self {
        Self {
            current: BLACK,
            target: BLACK,
            base: BLACK,
            brightness: 255,
            status: Status::Off,
            mode: FadeMode::Normal,
            dirty: false,
            pending_publish: false,
        }
    }

    /// Check if the current color still differs from the target
    pub fn is_converging(&self) -> bool {
        self.current != self.target
    }

    /// Number of fade ticks left until the current color reaches the target
    pub const fn remaining_fade_ticks(&self) -> u8 {
        max_distance(
            [self.current.r, self.current.g, self.current.b],
            [self.target.r, self.target.g, self.target.b],
        )
    }
}

impl Default for SpotChannel {
    fn default() -> Self {
        Self::new()
    }
}
