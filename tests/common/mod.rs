//! Shared test doubles for spotlight-node integration tests

#![allow(dead_code)] // Not every test file uses every helper

use spotlight_node::{EnableLine, OutputEnable, PwmSink, Transport, TransportError};

/// Message published through [`MockTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub topic: String,
    pub payload: String,
    pub retain: bool,
}

/// Broker stand-in recording everything sent through it
#[derive(Debug, Default)]
pub struct MockTransport {
    pub connected: bool,
    /// Fail every publish after this many accepted ones
    pub publish_budget: Option<usize>,
    pub published: Vec<Published>,
    pub subscribed: Vec<String>,
}

impl MockTransport {
    pub fn connected() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    pub fn payload_of(&self, topic: &str) -> Option<&str> {
        self.published
            .iter()
            .rev()
            .find(|message| message.topic == topic)
            .map(|message| message.payload.as_str())
    }

    pub fn clear(&mut self) {
        self.published.clear();
        self.subscribed.clear();
    }
}

impl Transport for MockTransport {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::Disconnected);
        }
        if let Some(budget) = self.publish_budget.as_mut() {
            if *budget == 0 {
                return Err(TransportError::BufferFull);
            }
            *budget -= 1;
        }
        self.published.push(Published {
            topic: topic.to_string(),
            payload: String::from_utf8(payload.to_vec()).unwrap(),
            retain,
        });
        Ok(())
    }

    fn subscribe(&mut self, filter: &str) -> Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::Disconnected);
        }
        self.subscribed.push(filter.to_string());
        Ok(())
    }
}

/// PWM sink keeping every written frame
#[derive(Debug, Default)]
pub struct MockSink {
    pub frames: Vec<Vec<u16>>,
}

impl MockSink {
    pub fn last(&self) -> Option<&[u16]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl PwmSink for MockSink {
    fn write(&mut self, duties: &[u16]) {
        self.frames.push(duties.to_vec());
    }
}

/// Output-enable line recording the issued commands
#[derive(Debug, Default)]
pub struct MockEnable {
    pub lines: Vec<EnableLine>,
}

impl OutputEnable for MockEnable {
    fn set(&mut self, line: EnableLine) {
        self.lines.push(line);
    }
}

/// Hue source returning the given hues in a loop
pub fn fixed_hues(hues: &'static [f64]) -> impl FnMut() -> f64 {
    let mut index = 0;
    move || {
        let hue = hues[index % hues.len()];
        index += 1;
        hue
    }
}
