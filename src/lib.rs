#![no_std]

pub mod color;
pub mod command;
pub mod config;
pub mod controller;
pub mod dmx;
pub mod fade;
pub mod hue;
pub mod interpreter;
pub mod luminance;
pub mod math8;
pub mod output;
pub mod publish;
pub mod scheduler;
pub mod service;
pub mod state;
pub mod strobe;
pub mod subscription;
pub mod topic;
pub mod usb;

mod log;

pub use embassy_time::{Duration, Instant};

pub use color::{HsvColor, Rgb, hsv_to_rgb, rgb_to_hsv};
pub use command::{Command, ParseError, parse_command};
pub use config::{ConnectionConfig, ServiceConfig, SpotlightParams};
pub use controller::{Destination, LightingController, SpotlightController};
pub use dmx::{DmxLayout, DmxMailbox};
pub use fade::FadeEngine;
pub use hue::{HueSource, SplitMixHue};
pub use interpreter::CommandInterpreter;
pub use output::OutputStage;
pub use publish::PublishScheduler;
pub use scheduler::{ServiceScheduler, TickResult};
pub use service::SpotlightService;
pub use state::{CHANNEL_COUNT, FadeMode, SpotChannel, Status};
pub use strobe::{EnableLine, StroboDriver};

/// PWM output driver
///
/// Implement this trait for the PWM chips driving the spotlights.
/// Duties are 12-bit, three per channel in red, green, blue order.
pub trait PwmSink {
    /// Write duties for all channels
    fn write(&mut self, duties: &[u16]);
}

/// Output-enable line of the PWM chips, used for the hardware strobe
pub trait OutputEnable {
    fn set(&mut self, line: EnableLine);
}

/// Message broker client
///
/// Implementations wrap the MQTT stack. Calls are only made while
/// [`Transport::is_connected`] reports a live connection.
pub trait Transport {
    /// Check if the broker connection is established
    fn is_connected(&self) -> bool;

    /// Queue a publish packet
    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> Result<(), TransportError>;

    /// Queue a subscribe packet
    fn subscribe(&mut self, filter: &str) -> Result<(), TransportError>;
}

/// Error returned by a [`Transport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// No broker connection
    Disconnected,
    /// Outgoing buffer is full
    BufferFull,
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransportError::Disconnected => write!(f, "transport disconnected"),
            TransportError::BufferFull => write!(f, "transport buffer full"),
        }
    }
}
