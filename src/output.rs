//! PWM output stage
//!
//! Converts the current channel colors into 12-bit PWM duties. Switched-off
//! channels are written as black regardless of their color.

use crate::PwmSink;
use crate::controller::LightingController;
use crate::luminance::lookup;
use crate::state::{SpotChannel, Status};

/// PWM duties of one channel
pub const fn channel_duties(channel: &SpotChannel) -> [u16; 3] {
    match channel.status {
        Status::Off => [0; 3],
        Status::On => [
            lookup(channel.current.r),
            lookup(channel.current.g),
            lookup(channel.current.b),
        ],
    }
}

/// Render all channels, three duties per channel
pub fn render_frame<const N: usize>(controller: &LightingController<N>) -> [[u16; 3]; N] {
    core::array::from_fn(|index| channel_duties(&controller.channels()[index]))
}

/// Writes the controller state to a PWM sink when it changed
#[derive(Debug)]
pub struct OutputStage<const N: usize> {
    frame: [[u16; 3]; N],
}

impl<const N: usize> OutputStage<N> {
    pub const fn new() -> Self {
        Self {
            frame: [[0; 3]; N],
        }
    }

    /// Last written duties, flattened in channel order
    pub const fn frame(&self) -> &[u16] {
        self.frame.as_flattened()
    }

    /// Render and write if the controller reports a change
    ///
    /// Returns `true` if the sink was written.
    pub fn flush<S: PwmSink>(&mut self, controller: &mut LightingController<N>, sink: &mut S) -> bool {
        if !controller.take_changed() {
            return false;
        }

        for channel in controller.channels_mut().iter_mut() {
            channel.dirty = false;
        }

        self.frame = render_frame(controller);
        sink.write(self.frame.as_flattened());
        true
    }
}

impl<const N: usize> Default for OutputStage<N> {
    fn default() -> Self {
        Self::new()
    }
}
