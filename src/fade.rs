//! Per-tick convergence of current colors toward their targets

use crate::color::Rgb;
use crate::controller::LightingController;
use crate::math8::step_toward;
use crate::state::{FadeMode, SpotChannel};

/// Fade engine, run once per process tick
#[derive(Debug, Clone, Copy, Default)]
pub struct FadeEngine;

impl FadeEngine {
    pub const fn new() -> Self {
        Self
    }

    /// Advance every channel by one tick
    ///
    /// Returns `true` if any channel changed its current color.
    pub fn tick<const N: usize>(&self, controller: &mut LightingController<N>) -> bool {
        let mut any_dirty = false;
        for channel in controller.channels_mut().iter_mut() {
            any_dirty |= Self::advance(channel);
        }
        if any_dirty {
            controller.mark_changed();
        }
        any_dirty
    }

    fn advance(channel: &mut SpotChannel) -> bool {
        if !channel.is_converging() {
            channel.dirty = false;
            return false;
        }

        channel.current = match channel.mode {
            FadeMode::Normal => channel.target,
            FadeMode::Fade => Rgb {
                r: step_toward(channel.current.r, channel.target.r),
                g: step_toward(channel.current.g, channel.target.g),
                b: step_toward(channel.current.b, channel.target.b),
            },
        };
        channel.dirty = true;
        channel.pending_publish = true;
        true
    }
}
