//! Topic construction for subscriptions and outbound state

use core::fmt::Write;

use heapless::String;

use crate::command::STROBO_SUFFIX;

/// Capacity of a built topic
pub const TOPIC_CAPACITY: usize = 64;

/// Topic suffix of the last-will message
pub const WILL_SUFFIX: &str = "/status/lwt";
pub const WILL_MESSAGE_ONLINE: &str = "online";
pub const WILL_MESSAGE_OFFLINE: &str = "offline";

/// Outbound state attributes, in publish order
pub const STATE_COLOR: &str = "color";
pub const STATE_BASE_COLOR: &str = "bcolor";
pub const STATE_STATUS: &str = "status";
pub const STATE_BRIGHTNESS: &str = "bright";
pub const STATE_MODE: &str = "mode";

pub type Topic = String<TOPIC_CAPACITY>;

/// Topic did not fit into its buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError;

impl core::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "topic exceeds {} bytes", TOPIC_CAPACITY)
    }
}

fn build(args: core::fmt::Arguments<'_>) -> Result<Topic, CapacityError> {
    let mut topic = Topic::new();
    topic.write_fmt(args).map_err(|_| CapacityError)?;
    Ok(topic)
}

/// `<prefix>/get/<number>/<attribute>`, `number` is one-based
pub fn state_topic(prefix: &str, number: usize, attribute: &str) -> Result<Topic, CapacityError> {
    build(format_args!("{}/get/{}/{}", prefix, number, attribute))
}

/// `<prefix>/set/+/<kind>` subscription filter
pub fn command_filter(prefix: &str, kind: &str) -> Result<Topic, CapacityError> {
    build(format_args!("{}/set/+/{}", prefix, kind))
}

/// `<prefix>/set/strobo`
pub fn strobo_topic(prefix: &str) -> Result<Topic, CapacityError> {
    build(format_args!("{}{}", prefix, STROBO_SUFFIX))
}

/// `<prefix>/status/lwt`
pub fn will_topic(prefix: &str) -> Result<Topic, CapacityError> {
    build(format_args!("{}{}", prefix, WILL_SUFFIX))
}
