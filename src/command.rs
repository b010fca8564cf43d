//! Inbound topic and payload parsing
//!
//! Topics follow `<prefix>/set/<channel>/<type>` and `<prefix>/set/strobo`.
//! Parsing produces a typed [`Command`]; applying it to the controller is
//! the job of the [`crate::interpreter::CommandInterpreter`].

use crate::color::{Rgb, parse_hex_rgb};
use crate::controller::Destination;
use crate::state::{FadeMode, Status};

/// Topic segment introducing a command
pub const SET_SEGMENT: &str = "/set/";
/// Topic suffix of the global strobe command
pub const STROBO_SUFFIX: &str = "/set/strobo";

pub const TYPE_COLOR: &str = "color";
pub const TYPE_BASE_COLOR: &str = "bcolor";
pub const TYPE_BRIGHTNESS: &str = "bright";
pub const TYPE_MODE: &str = "mode";
pub const TYPE_SWITCH: &str = "switch";
pub const TYPE_RANDOM: &str = "rand";

/// Decoded inbound command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Set color, base color, full brightness and status in one go
    Color { dest: Destination, color: Rgb },
    /// Set base color and re-dim
    BaseColor { dest: Destination, color: Rgb },
    /// Set brightness and re-dim
    Brightness { dest: Destination, value: u8 },
    Mode { dest: Destination, mode: FadeMode },
    Switch { dest: Destination, status: Status },
    /// Random hue
    Random { dest: Destination },
    /// Global strobe level, `None` for an empty payload
    Strobo { level: Option<u8> },
    /// Well-formed topic with an unknown command type
    Unrecognized,
}

/// Reasons an inbound message is dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Topic does not follow the command grammar
    TopicMismatch,
    /// Channel number above the channel count
    ChannelOutOfRange(u8),
    /// Payload is not valid UTF-8
    NotUtf8,
    /// Payload does not match the format of the command type
    InvalidPayload(&'static str),
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::TopicMismatch => write!(f, "topic does not match command pattern"),
            ParseError::ChannelOutOfRange(channel) => {
                write!(f, "channel {} out of range", channel)
            }
            ParseError::NotUtf8 => write!(f, "payload is not valid utf-8"),
            ParseError::InvalidPayload(kind) => write!(f, "invalid {} payload", kind),
        }
    }
}

/// Parse an inbound message into a command
///
/// `channel_count` bounds the accepted channel numbers, `0` always means
/// broadcast.
pub fn parse_command(
    prefix: &str,
    channel_count: usize,
    topic: &str,
    payload: &[u8],
) -> Result<Command, ParseError> {
    let rest = topic
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(SET_SEGMENT))
        .ok_or(ParseError::TopicMismatch)?;

    if rest == "strobo" {
        let payload = as_str(payload)?;
        if payload.is_empty() {
            return Ok(Command::Strobo { level: None });
        }
        let level = parse_decimal(payload, 3).ok_or(ParseError::InvalidPayload("strobo"))?;
        return Ok(Command::Strobo { level: Some(level) });
    }

    let (channel, kind) = rest.split_once('/').ok_or(ParseError::TopicMismatch)?;
    let channel = parse_channel(channel)?;
    let dest = Destination::from_protocol(channel, channel_count)
        .ok_or(ParseError::ChannelOutOfRange(channel))?;

    let command = match kind {
        TYPE_COLOR => Command::Color {
            dest,
            color: parse_hex_rgb(as_str(payload)?).ok_or(ParseError::InvalidPayload(TYPE_COLOR))?,
        },
        TYPE_BASE_COLOR => Command::BaseColor {
            dest,
            color: parse_hex_rgb(as_str(payload)?)
                .ok_or(ParseError::InvalidPayload(TYPE_BASE_COLOR))?,
        },
        TYPE_BRIGHTNESS => Command::Brightness {
            dest,
            value: parse_decimal(as_str(payload)?, 3)
                .ok_or(ParseError::InvalidPayload(TYPE_BRIGHTNESS))?,
        },
        TYPE_MODE => Command::Mode {
            dest,
            mode: FadeMode::from_digit(
                parse_decimal(as_str(payload)?, 1).ok_or(ParseError::InvalidPayload(TYPE_MODE))?,
            ),
        },
        TYPE_SWITCH => Command::Switch {
            dest,
            status: Status::from_digit(
                parse_decimal(as_str(payload)?, 1)
                    .ok_or(ParseError::InvalidPayload(TYPE_SWITCH))?,
            ),
        },
        TYPE_RANDOM => Command::Random { dest },
        _ => Command::Unrecognized,
    };

    Ok(command)
}

/// Channel segment: empty for broadcast, otherwise one or two digits
fn parse_channel(segment: &str) -> Result<u8, ParseError> {
    if segment.is_empty() {
        return Ok(0);
    }
    parse_decimal(segment, 2).ok_or(ParseError::TopicMismatch)
}

fn as_str(payload: &[u8]) -> Result<&str, ParseError> {
    core::str::from_utf8(payload).map_err(|_| ParseError::NotUtf8)
}

/// Parse `1..=max_digits` ASCII digits into a `u8`
fn parse_decimal(value: &str, max_digits: usize) -> Option<u8> {
    if value.is_empty() || value.len() > max_digits {
        return None;
    }

    let mut result: u8 = 0;
    for c in value.bytes() {
        if !c.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add(c - b'0')?;
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal_limits() {
        assert_eq!(parse_decimal("0", 3), Some(0));
        assert_eq!(parse_decimal("255", 3), Some(255));
        assert_eq!(parse_decimal("007", 3), Some(7));
        assert_eq!(parse_decimal("256", 3), None);
        assert_eq!(parse_decimal("1000", 3), None);
        assert_eq!(parse_decimal("12", 1), None);
        assert_eq!(parse_decimal("-1", 3), None);
        assert_eq!(parse_decimal("", 3), None);
    }

    #[test]
    fn parse_channel_segment() {
        assert_eq!(parse_channel(""), Ok(0));
        assert_eq!(parse_channel("7"), Ok(7));
        assert_eq!(parse_channel("10"), Ok(10));
        assert_eq!(parse_channel("100"), Err(ParseError::TopicMismatch));
        assert_eq!(parse_channel("a"), Err(ParseError::TopicMismatch));
    }
}
