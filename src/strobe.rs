//! Hardware strobe through the PWM chips' output-enable line
//!
//! Levels 1 to 25 flash the outputs at roughly that many hertz, assuming the
//! driver is ticked 50 times per second. Level 0 (or anything above 25)
//! keeps the outputs enabled.

/// Ticks per second the driver expects
pub const STROBE_BASE_RATE: u8 = 50;

/// Highest strobe level that still flashes
pub const STROBE_MAX_LEVEL: u8 = STROBE_BASE_RATE / 2;

/// DMX strobe slots are scaled down by this divisor
pub const DMX_STROBE_DIVISOR: u8 = 255 / STROBE_MAX_LEVEL;

/// Command for the output-enable line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableLine {
    /// Hold the outputs enabled
    On,
    /// Flip the current output state
    Toggle,
}

/// Strobe counter state
#[derive(Debug, Clone, Default)]
pub struct StroboDriver {
    counter: u8,
}

impl StroboDriver {
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Ticks between two toggles, `None` when the level does not flash
    ///
    /// Integer division is intended: level 7 toggles every 3 ticks.
    pub const fn toggle_interval(level: u8) -> Option<u8> {
        if level == 0 || level > STROBE_MAX_LEVEL {
            None
        } else {
            Some(STROBE_BASE_RATE / (level * 2))
        }
    }

    pub const fn counter(&self) -> u8 {
        self.counter
    }

    /// Advance one tick
    ///
    /// Returns the line command to issue, `None` if the line keeps its state.
    pub const fn tick(&mut self, level: u8) -> Option<EnableLine> {
        let Some(interval) = Self::toggle_interval(level) else {
            return Some(EnableLine::On);
        };

        let mut line = None;
        if self.counter >= interval {
            line = Some(EnableLine::Toggle);
            self.counter = 0;
        }
        self.counter = (self.counter + 1) % STROBE_BASE_RATE;
        line
    }
}
