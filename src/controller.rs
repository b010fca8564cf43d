//! Lighting controller - the aggregate owning all channel state
//!
//! Every mutation of the spotlight state goes through this type. Mutators
//! accept a [`Destination`] and a `replay` flag: broadcast mutations coming
//! from retained (replayed) messages are ignored so stale broadcast state is
//! not applied again after a reconnect.

use crate::color::{HsvColor, Rgb, hsv_to_rgb};
use crate::hue::HueSource;
use crate::math8::dim8;
use crate::state::{CHANNEL_COUNT, FadeMode, SpotChannel, Status};

/// Channel(s) targeted by a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Every channel
    All,
    /// Single channel, zero-based index
    Channel(usize),
}

impl Destination {
    /// Destination from a protocol channel number
    ///
    /// `0` addresses all channels, `1..=count` a single channel. Anything
    /// above `count` is rejected.
    pub const fn from_protocol(raw: u8, count: usize) -> Option<Self> {
        let raw = raw as usize;
        if raw == 0 {
            Some(Self::All)
        } else if raw <= count {
            Some(Self::Channel(raw - 1))
        } else {
            None
        }
    }

    pub const fn is_broadcast(self) -> bool {
        matches!(self, Self::All)
    }
}

/// Controller with the default channel count
pub type SpotlightController = LightingController<CHANNEL_COUNT>;

/// Owned state of all spotlight channels plus the global strobe level
#[derive(Debug, Clone)]
pub struct LightingController<const N: usize> {
    channels: [SpotChannel; N],
    strobe_level: u8,
    /// At least one channel needs to be written to the PWM outputs
    changed: bool,
}

impl<const N: usize> LightingController<N> {
    /// Create a controller with every channel in power-up state
    pub const fn new() -> Self {
        Self {
            channels: [SpotChannel::new(); N],
            strobe_level: 0,
            changed: false,
        }
    }

    /// Number of channels
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Get a channel by zero-based index
    pub fn channel(&self, index: usize) -> Option<&SpotChannel> {
        self.channels.get(index)
    }

    pub const fn channels(&self) -> &[SpotChannel; N] {
        &self.channels
    }

    pub(crate) const fn channels_mut(&mut self) -> &mut [SpotChannel; N] {
        &mut self.channels
    }

    pub const fn strobe_level(&self) -> u8 {
        self.strobe_level
    }

    pub const fn set_strobe_level(&mut self, level: u8) {
        self.strobe_level = level;
    }

    /// Check if the outputs need to be refreshed
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    pub(crate) const fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Clear the changed flag, returning its previous value
    pub const fn take_changed(&mut self) -> bool {
        let changed = self.changed;
        self.changed = false;
        changed
    }

    /// Set the target color directly, bypassing base color and brightness
    pub fn set_color(&mut self, dest: Destination, color: Rgb, replay: bool) -> bool {
        self.apply(dest, replay, |channel| channel.target = color)
    }

    /// Set the undimmed base color
    pub fn set_base_color(&mut self, dest: Destination, color: Rgb, replay: bool) -> bool {
        self.apply(dest, replay, |channel| {
            channel.base = color;
            channel.pending_publish = true;
        })
    }

    /// Recompute the target color from base color and brightness
    pub fn dim_channel(&mut self, dest: Destination, replay: bool) -> bool {
        self.apply(dest, replay, |channel| {
            let brightness = channel.brightness;
            channel.target = Rgb {
                r: dim8(channel.base.r, brightness),
                g: dim8(channel.base.g, brightness),
                b: dim8(channel.base.b, brightness),
            };
        })
    }

    /// Set brightness. The target color is left untouched until
    /// [`Self::dim_channel`] runs.
    pub fn set_brightness(&mut self, dest: Destination, brightness: u8, replay: bool) -> bool {
        self.apply(dest, replay, |channel| {
            channel.brightness = brightness;
            channel.pending_publish = true;
        })
    }

    pub fn set_mode(&mut self, dest: Destination, mode: FadeMode, replay: bool) -> bool {
        self.apply(dest, replay, |channel| {
            channel.mode = mode;
            channel.pending_publish = true;
        })
    }

    pub fn set_status(&mut self, dest: Destination, status: Status, replay: bool) -> bool {
        let applied = self.apply(dest, replay, |channel| {
            channel.status = status;
            channel.pending_publish = true;
        });
        if applied {
            self.changed = true;
        }
        applied
    }

    /// Pick a random fully saturated hue and apply it as base color
    ///
    /// A single channel keeps its brightness as HSV value, a broadcast uses
    /// full value and draws a separate hue for every channel. Retained
    /// messages must be filtered by the caller.
    pub fn set_random<H: HueSource>(&mut self, dest: Destination, hues: &mut H) -> bool {
        match dest {
            Destination::Channel(index) => {
                let Some(channel) = self.channels.get(index) else {
                    return false;
                };
                let value = f64::from(channel.brightness) / 255.0;
                self.randomize(index, value, hues);
            }
            Destination::All => {
                for index in 0..N {
                    self.randomize(index, 1.0, hues);
                }
            }
        }
        true
    }

    fn randomize<H: HueSource>(&mut self, index: usize, value: f64, hues: &mut H) {
        let color = hsv_to_rgb(HsvColor::new(hues.next_hue(), 1.0, value));
        let dest = Destination::Channel(index);
        self.set_base_color(dest, color, false);
        self.dim_channel(dest, false);
    }

    /// Apply a mutation to the destination
    ///
    /// Returns `false` if the mutation was skipped.
    fn apply(
        &mut self,
        dest: Destination,
        replay: bool,
        mut mutate: impl FnMut(&mut SpotChannel),
    ) -> bool {
        match dest {
            Destination::Channel(index) => match self.channels.get_mut(index) {
                Some(channel) => {
                    mutate(channel);
                    true
                }
                None => false,
            },
            Destination::All if replay => false,
            Destination::All => {
                self.channels.iter_mut().for_each(mutate);
                true
            }
        }
    }
}

impl<const N: usize> Default for LightingController<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_from_protocol() {
        assert_eq!(Destination::from_protocol(0, 10), Some(Destination::All));
        assert_eq!(Destination::from_protocol(1, 10), Some(Destination::Channel(0)));
        assert_eq!(Destination::from_protocol(10, 10), Some(Destination::Channel(9)));
        assert_eq!(Destination::from_protocol(11, 10), None);
    }

    #[test]
    fn status_raises_changed_flag() {
        let mut controller = LightingController::<3>::new();
        assert!(!controller.is_changed());
        controller.set_status(Destination::Channel(1), Status::On, false);
        assert!(controller.take_changed());
        assert!(!controller.is_changed());
    }

    #[test]
    fn replayed_broadcast_status_keeps_flag_clear() {
        let mut controller = LightingController::<3>::new();
        assert!(!controller.set_status(Destination::All, Status::On, true));
        assert!(!controller.is_changed());
    }

    #[test]
    fn random_single_channel_uses_brightness_as_value() {
        let mut controller = LightingController::<2>::new();
        controller.set_brightness(Destination::Channel(0), 255, false);
        let mut hues = || 0.0;
        controller.set_random(Destination::Channel(0), &mut hues);

        let channel = controller.channel(0).unwrap();
        assert_eq!(channel.base, Rgb::new(255, 0, 0));
        assert_eq!(channel.target, Rgb::new(255, 0, 0));
        assert!(channel.pending_publish);
        assert_eq!(controller.channel(1).unwrap(), &SpotChannel::new());
    }

    #[test]
    fn random_broadcast_draws_a_hue_per_channel() {
        let mut controller = LightingController::<3>::new();
        let mut next = 0.0;
        let mut hues = move || {
            let hue = next;
            next += 1.0 / 3.0;
            hue
        };
        controller.set_random(Destination::All, &mut hues);

        let bases: [Rgb; 3] = core::array::from_fn(|i| controller.channel(i).unwrap().base);
        assert_eq!(bases[0], Rgb::new(255, 0, 0));
        assert_eq!(bases[1].g, 255);
        assert_eq!(bases[2].b, 255);
    }
}
