//! Service configuration
//!
//! [`SpotlightParams`] holds the persisted node parameters. They are read
//! once at start and turned into a [`ConnectionConfig`] for the MQTT client.

use core::fmt::Write;

use embassy_time::Duration;
use heapless::String;

use crate::publish::RETAIN;
use crate::strobe::STROBE_BASE_RATE;
use crate::topic::{CapacityError, Topic, WILL_MESSAGE_OFFLINE, will_topic};

/// Longest user name or password
pub const VALUE_CAPACITY: usize = 15;
/// Longest topic prefix
pub const PREFIX_CAPACITY: usize = 31;
/// `<host:4>-<mac:12>`
pub const CLIENT_ID_CAPACITY: usize = 17;

/// Persisted spotlight parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotlightParams {
    /// Broker IPv4 address
    pub broker: [u8; 4],
    pub user: String<VALUE_CAPACITY>,
    pub pass: String<VALUE_CAPACITY>,
    /// Topic prefix, e.g. `home/lights`
    pub topic: String<PREFIX_CAPACITY>,
    /// First DMX slot used by the node
    pub dmx_offset: u8,
}

impl SpotlightParams {
    pub fn new(broker: [u8; 4], topic: &str) -> Self {
        Self {
            broker,
            topic: truncated(topic),
            ..Self::default()
        }
    }

    /// Set the user name, cut to [`VALUE_CAPACITY`]
    pub fn set_user(&mut self, user: &str) {
        self.user = truncated(user);
    }

    /// Set the password, cut to [`VALUE_CAPACITY`]
    pub fn set_pass(&mut self, pass: &str) {
        self.pass = truncated(pass);
    }

    /// Set the topic prefix, cut to [`PREFIX_CAPACITY`]
    pub fn set_topic(&mut self, topic: &str) {
        self.topic = truncated(topic);
    }

    #[must_use]
    pub fn with_credentials(mut self, user: &str, pass: &str) -> Self {
        self.set_user(user);
        self.set_pass(pass);
        self
    }

    #[must_use]
    pub const fn with_dmx_offset(mut self, offset: u8) -> Self {
        self.dmx_offset = offset;
        self
    }
}

/// Copy as many whole characters as fit
fn truncated<const N: usize>(value: &str) -> String<N> {
    let mut out = String::new();
    for c in value.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// MQTT connection settings derived from the parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub broker: [u8; 4],
    pub client_id: String<CLIENT_ID_CAPACITY>,
    pub user: String<VALUE_CAPACITY>,
    pub pass: String<VALUE_CAPACITY>,
    pub will_topic: Topic,
    pub will_message: &'static str,
    pub will_qos: u8,
    pub will_retain: bool,
}

impl ConnectionConfig {
    /// Build the connection settings
    ///
    /// The client id is the first four characters of `hostname`, a dash and
    /// the MAC address as uppercase hex.
    pub fn from_params(
        params: &SpotlightParams,
        hostname: &str,
        mac: [u8; 6],
    ) -> Result<Self, CapacityError> {
        let mut client_id = String::new();
        let host_end = hostname
            .char_indices()
            .nth(4)
            .map(|(index, _)| index)
            .unwrap_or(hostname.len());
        write!(
            client_id,
            "{}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            &hostname[..host_end],
            mac[0],
            mac[1],
            mac[2],
            mac[3],
            mac[4],
            mac[5]
        )
        .map_err(|_| CapacityError)?;

        Ok(Self {
            broker: params.broker,
            client_id,
            user: params.user.clone(),
            pass: params.pass.clone(),
            will_topic: will_topic(&params.topic)?,
            will_message: WILL_MESSAGE_OFFLINE,
            will_qos: 0,
            will_retain: RETAIN,
        })
    }
}

/// Process tick matching the strobe base rate
pub const DEFAULT_PROCESS_INTERVAL: Duration =
    Duration::from_millis(1000 / STROBE_BASE_RATE as u64);

/// Default cadence of transport polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runtime options of the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Fade, DMX and strobe cadence
    pub process_interval: Duration,
    /// Subscription and publish cadence
    pub poll_interval: Duration,
    /// Drive the output-enable line from the strobe level
    pub strobe: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            process_interval: DEFAULT_PROCESS_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
            strobe: false,
        }
    }
}
