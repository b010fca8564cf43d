//! Spotlight service
//!
//! Owns the controller and every stage working on it. The hosting firmware
//! forwards transport events to the `on_*` methods and calls
//! [`SpotlightService::process`], [`SpotlightService::poll`] and
//! [`SpotlightService::flush`] from its main loop, usually through a
//! [`crate::scheduler::ServiceScheduler`].

use embassy_time::Instant;

use crate::command::Command;
use crate::config::{ServiceConfig, SpotlightParams};
use crate::controller::LightingController;
use crate::dmx::{DmxLayout, DmxMailbox};
use crate::fade::FadeEngine;
use crate::hue::HueSource;
use crate::interpreter::CommandInterpreter;
use crate::log::debug;
use crate::output::OutputStage;
use crate::publish::PublishScheduler;
use crate::strobe::StroboDriver;
use crate::subscription::SubscriptionPlan;
use crate::{OutputEnable, PwmSink, Transport};

/// Spotlight service for `N` channels
pub struct SpotlightService<'a, H: HueSource, const N: usize> {
    // Configuration
    params: SpotlightParams,
    config: ServiceConfig,
    dmx: Option<&'a DmxMailbox>,

    // State
    controller: LightingController<N>,

    // Stages
    interpreter: CommandInterpreter<H>,
    fade: FadeEngine,
    publisher: PublishScheduler,
    subscriptions: SubscriptionPlan,
    strobe: Option<StroboDriver>,
    output: OutputStage<N>,
}

impl<'a, H: HueSource, const N: usize> SpotlightService<'a, H, N> {
    /// Create a service with all channels in power-up state
    pub fn new(params: SpotlightParams, config: ServiceConfig, hues: H) -> Self {
        debug!("MqTT Init");
        Self {
            strobe: config.strobe.then(StroboDriver::new),
            params,
            config,
            dmx: None,
            controller: LightingController::new(),
            interpreter: CommandInterpreter::new(hues),
            fade: FadeEngine::new(),
            publisher: PublishScheduler::new(),
            subscriptions: SubscriptionPlan::new(),
            output: OutputStage::new(),
        }
    }

    /// Read DMX frames from `mailbox` on every process tick
    #[must_use]
    pub fn with_dmx(mut self, mailbox: &'a DmxMailbox) -> Self {
        debug!("Connection to dmx-storage established!");
        self.dmx = Some(mailbox);
        self
    }

    pub const fn params(&self) -> &SpotlightParams {
        &self.params
    }

    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub const fn controller(&self) -> &LightingController<N> {
        &self.controller
    }

    pub const fn controller_mut(&mut self) -> &mut LightingController<N> {
        &mut self.controller
    }

    pub const fn dmx_layout(&self) -> DmxLayout {
        DmxLayout::new(self.params.dmx_offset as usize)
    }

    /// Last duties written to the PWM sink
    pub const fn output_frame(&self) -> &[u16] {
        self.output.frame()
    }

    /// Broker acknowledged the connection
    pub fn on_connack(&mut self, now: Instant) {
        self.subscriptions.schedule(now);
        self.publisher.on_connected();
    }

    /// Inbound message from the broker
    pub fn on_publish(&mut self, topic: &str, payload: &[u8], retained: bool) -> Option<Command> {
        self.interpreter.handle(
            &mut self.controller,
            &self.params.topic,
            topic,
            payload,
            retained,
        )
    }

    /// Transport poll: due subscriptions and at most one state publish
    ///
    /// Returns the zero-based index of the published channel.
    pub fn poll<T: Transport>(&mut self, now: Instant, transport: &mut T) -> Option<usize> {
        self.subscriptions.poll(now, &self.params.topic, transport);
        self.publisher
            .poll(&mut self.controller, &self.params.topic, transport)
    }

    /// Process tick: DMX input, fade step and strobe
    pub fn process<E: OutputEnable>(&mut self, enable: &mut E) {
        if let Some(mailbox) = self.dmx {
            let layout = self.dmx_layout();
            let controller = &mut self.controller;
            mailbox.take(|frame| layout.apply(frame, controller));
        }

        self.fade.tick(&mut self.controller);

        if let Some(strobe) = &mut self.strobe {
            if let Some(line) = strobe.tick(self.controller.strobe_level()) {
                enable.set(line);
            }
        }
    }

    /// Write the outputs if anything changed since the last flush
    pub fn flush<S: PwmSink>(&mut self, sink: &mut S) -> bool {
        self.output.flush(&mut self.controller, sink)
    }
}
