//! Command interpreter
//!
//! Turns inbound MQTT messages into controller mutations. Malformed input is
//! logged and dropped here; nothing past this point sees a parse error.

use crate::color::is_lit;
use crate::command::{Command, ParseError, parse_command};
use crate::controller::LightingController;
use crate::hue::HueSource;
use crate::log::debug;
use crate::state::Status;

/// Applies inbound commands to a [`LightingController`]
pub struct CommandInterpreter<H: HueSource> {
    hues: H,
}

impl<H: HueSource> CommandInterpreter<H> {
    /// Create a new interpreter drawing random hues from `hues`
    pub const fn new(hues: H) -> Self {
        Self { hues }
    }

    /// Handle one inbound message
    ///
    /// `retained` marks messages replayed from the broker's last-value store.
    /// Returns the applied command, or `None` if the message was dropped.
    pub fn handle<const N: usize>(
        &mut self,
        controller: &mut LightingController<N>,
        prefix: &str,
        topic: &str,
        payload: &[u8],
        retained: bool,
    ) -> Option<Command> {
        debug!("MQTT Received ({}):{}", retained, topic);

        match parse_command(prefix, N, topic, payload) {
            Ok(command) => self.apply(controller, command, retained).then_some(command),
            Err(ParseError::TopicMismatch) => {
                debug!("MQTT set type unknown");
                None
            }
            Err(err) => {
                debug!("MQTT dropped {}: {}", topic, err);
                None
            }
        }
    }

    /// Apply a parsed command
    ///
    /// Returns `false` if the command had no effect on the controller.
    pub fn apply<const N: usize>(
        &mut self,
        controller: &mut LightingController<N>,
        command: Command,
        retained: bool,
    ) -> bool {
        match command {
            Command::Color { dest, color } => {
                debug!("MQTT set color:{},{},{}", color.r, color.g, color.b);
                let status = if is_lit(color) { Status::On } else { Status::Off };
                controller.set_color(dest, color, retained)
                    && controller.set_base_color(dest, color, retained)
                    && controller.set_brightness(dest, 255, retained)
                    && controller.set_status(dest, status, retained)
            }
            Command::BaseColor { dest, color } => {
                debug!("MQTT set base color:{},{},{}", color.r, color.g, color.b);
                controller.set_base_color(dest, color, retained)
                    && controller.dim_channel(dest, retained)
            }
            Command::Brightness { dest, value } => {
                debug!("MQTT set brightness:{}", value);
                controller.set_brightness(dest, value, retained)
                    && controller.dim_channel(dest, retained)
            }
            Command::Mode { dest, mode } => {
                debug!("MQTT set mode:{}", mode.as_digit());
                controller.set_mode(dest, mode, retained)
            }
            Command::Switch { dest, status } => {
                debug!("MQTT set status:{}", status.as_digit());
                controller.set_status(dest, status, retained)
            }
            Command::Random { dest } => {
                if retained {
                    debug!("MQTT ignored retained random");
                    return false;
                }
                debug!("MQTT set random");
                controller.set_random(dest, &mut self.hues)
                    && controller.set_status(dest, Status::On, false)
            }
            Command::Strobo { level: Some(level) } => {
                debug!("MQTT set STROBO:{}", level);
                controller.set_strobe_level(level);
                true
            }
            Command::Strobo { level: None } => {
                debug!("MQTT strobo unknown");
                false
            }
            Command::Unrecognized => {
                debug!("MQTT set type unknown");
                false
            }
        }
    }
}
