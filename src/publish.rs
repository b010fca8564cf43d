//! Outbound state publishing
//!
//! At most one channel is published per poll. Sending the state of all
//! channels in one go overruns the network stack, so pending channels are
//! drained one by one in index order.

use core::fmt::Write;

use heapless::String;

use crate::color::format_hex_rgb;
use crate::controller::LightingController;
use crate::log::debug;
use crate::state::SpotChannel;
use crate::topic::{
    CapacityError, STATE_BASE_COLOR, STATE_BRIGHTNESS, STATE_COLOR, STATE_MODE, STATE_STATUS,
    WILL_MESSAGE_ONLINE, state_topic, will_topic,
};
use crate::{Transport, TransportError};

/// State messages are retained so late subscribers see the latest value
pub const RETAIN: bool = true;

/// Reasons a publish round was aborted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishError {
    Capacity(CapacityError),
    Transport(TransportError),
}

impl From<CapacityError> for PublishError {
    fn from(err: CapacityError) -> Self {
        Self::Capacity(err)
    }
}

impl From<TransportError> for PublishError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl core::fmt::Display for PublishError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PublishError::Capacity(err) => write!(f, "{}", err),
            PublishError::Transport(err) => write!(f, "{}", err),
        }
    }
}

/// Drains pending channel state into outbound messages
#[derive(Debug, Clone, Default)]
pub struct PublishScheduler {
    /// Online presence message still has to be sent
    online_pending: bool,
}

impl PublishScheduler {
    pub const fn new() -> Self {
        Self {
            online_pending: false,
        }
    }

    /// Broker connection established, announce presence on the next poll
    pub const fn on_connected(&mut self) {
        self.online_pending = true;
    }

    pub const fn is_online_pending(&self) -> bool {
        self.online_pending
    }

    /// Publish the online message and at most one pending channel
    ///
    /// Returns the zero-based index of the published channel.
    pub fn poll<T: Transport, const N: usize>(
        &mut self,
        controller: &mut LightingController<N>,
        prefix: &str,
        transport: &mut T,
    ) -> Option<usize> {
        if !transport.is_connected() {
            return None;
        }

        if self.online_pending {
            match Self::publish_online(prefix, transport) {
                Ok(()) => self.online_pending = false,
                Err(err) => debug!("online message failed: {}", err),
            }
        }

        let (index, channel) = controller
            .channels_mut()
            .iter_mut()
            .enumerate()
            .find(|(_, channel)| channel.pending_publish)?;

        match Self::publish_channel(prefix, index + 1, channel, transport) {
            Ok(()) => {
                channel.pending_publish = false;
                Some(index)
            }
            Err(err) => {
                debug!("publish of channel {} failed: {}", index + 1, err);
                None
            }
        }
    }

    fn publish_online<T: Transport>(prefix: &str, transport: &mut T) -> Result<(), PublishError> {
        let topic = will_topic(prefix)?;
        transport.publish(&topic, WILL_MESSAGE_ONLINE.as_bytes(), RETAIN)?;
        debug!("{}={}", topic, WILL_MESSAGE_ONLINE);
        Ok(())
    }

    fn publish_channel<T: Transport>(
        prefix: &str,
        number: usize,
        channel: &SpotChannel,
        transport: &mut T,
    ) -> Result<(), PublishError> {
        let color = format_hex_rgb(channel.current);
        let base = format_hex_rgb(channel.base);
        let status = decimal(channel.status.as_digit());
        let brightness = decimal(channel.brightness);
        let mode = decimal(channel.mode.as_digit());

        let messages: [(&str, &str); 5] = [
            (STATE_COLOR, color.as_str()),
            (STATE_BASE_COLOR, base.as_str()),
            (STATE_STATUS, status.as_str()),
            (STATE_BRIGHTNESS, brightness.as_str()),
            (STATE_MODE, mode.as_str()),
        ];

        for (attribute, payload) in messages {
            let topic = state_topic(prefix, number, attribute)?;
            transport.publish(&topic, payload.as_bytes(), RETAIN)?;
            debug!("{}={}", topic, payload);
        }
        Ok(())
    }
}

fn decimal(value: u8) -> String<3> {
    let mut out = String::new();
    // u8 has at most three digits
    let _ = write!(out, "{}", value);
    out
}
