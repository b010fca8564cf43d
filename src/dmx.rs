//! DMX input
//!
//! A universe received by the ArtNet service is handed over through a
//! [`DmxMailbox`] and decoded with a [`DmxLayout`] once per process tick.
//! DMX has no notion of retained messages, so a new frame always overwrites
//! target colors, modes and the strobe level.
//!
//! Slot layout for `N` channels starting at offset `O`:
//!
//! | Slots                    | Meaning                            |
//! |--------------------------|------------------------------------|
//! | `O + 3i .. O + 3i + 2`   | red, green, blue of channel `i`    |
//! | `O + 3N + i`             | mode of channel `i` (0 = normal)   |
//! | `O + 4N`                 | strobe, scaled down by 10          |

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;

use crate::color::Rgb;
use crate::controller::LightingController;
use crate::state::FadeMode;
use crate::strobe::DMX_STROBE_DIVISOR;

/// Slots in a DMX universe
pub const DMX_UNIVERSE_SIZE: usize = 512;

/// Decoder for the spotlight slot layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmxLayout {
    /// First slot used by the node
    pub offset: usize,
}

impl DmxLayout {
    pub const fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// Slot of the red component of channel `index`
    pub const fn color_slot(self, index: usize) -> usize {
        self.offset + index * 3
    }

    pub const fn mode_slot(self, index: usize, channel_count: usize) -> usize {
        self.offset + channel_count * 3 + index
    }

    pub const fn strobe_slot(self, channel_count: usize) -> usize {
        self.offset + channel_count * 4
    }

    /// Overwrite targets, modes and strobe level from a frame
    ///
    /// Slots beyond the end of the frame read as zero.
    pub fn apply<const N: usize>(self, frame: &[u8], controller: &mut LightingController<N>) {
        let slot = |index: usize| frame.get(index).copied().unwrap_or(0);

        for (index, channel) in controller.channels_mut().iter_mut().enumerate() {
            channel.mode = if slot(self.mode_slot(index, N)) == 0 {
                FadeMode::Normal
            } else {
                FadeMode::Fade
            };

            let red = self.color_slot(index);
            channel.target = Rgb {
                r: slot(red),
                g: slot(red + 1),
                b: slot(red + 2),
            };
        }

        controller.set_strobe_level(slot(self.strobe_slot(N)) / DMX_STROBE_DIVISOR);
    }
}

/// Frame did not fit into the mailbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTooLong(pub usize);

#[derive(Debug)]
struct Slot<const SIZE: usize> {
    frame: Vec<u8, SIZE>,
    fresh: bool,
}

/// Latest-value mailbox for DMX frames
///
/// The receiving side stores whole universes, the service takes each one
/// at most once. Older frames that were never taken are overwritten.
/// Access is guarded by critical sections so the writer may run in an
/// interrupt or another executor.
pub struct DmxMailbox<const SIZE: usize = DMX_UNIVERSE_SIZE> {
    inner: Mutex<RefCell<Slot<SIZE>>>,
}

impl<const SIZE: usize> DmxMailbox<SIZE> {
    /// Create an empty mailbox
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Slot {
                frame: Vec::new(),
                fresh: false,
            })),
        }
    }

    /// Store a new frame, replacing any frame not yet taken
    ///
    /// Returns `Err(FrameTooLong(len))` if the frame exceeds the mailbox
    /// size; the previous frame is kept in that case.
    pub fn store(&self, slots: &[u8]) -> Result<(), FrameTooLong> {
        if slots.len() > SIZE {
            return Err(FrameTooLong(slots.len()));
        }
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow(cs).borrow_mut();
            slot.frame.clear();
            // Length was checked above
            let _ = slot.frame.extend_from_slice(slots);
            slot.fresh = true;
        });
        Ok(())
    }

    /// Check if a frame arrived since the last take
    pub fn has_new_values(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().fresh)
    }

    /// Run `read` on the latest frame if it has not been taken yet
    pub fn take<R>(&self, read: impl FnOnce(&[u8]) -> R) -> Option<R> {
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow(cs).borrow_mut();
            if !slot.fresh {
                return None;
            }
            slot.fresh = false;
            Some(read(slot.frame.as_slice()))
        })
    }
}

impl<const SIZE: usize> Default for DmxMailbox<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
