//! Tick scheduling for the spotlight service
//!
//! Provides portable pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping between ticks.

use embassy_time::{Duration, Instant};

use crate::hue::HueSource;
use crate::service::SpotlightService;
use crate::{OutputEnable, PwmSink, Transport};

/// Result of a scheduler tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// Process step ran during this tick.
    pub processed: bool,
    /// Transport poll ran during this tick.
    pub polled: bool,
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Periodic deadline with drift correction
#[derive(Debug, Clone, Copy)]
struct Cadence {
    next: Instant,
    period: Duration,
}

impl Cadence {
    const fn new(period: Duration) -> Self {
        Self {
            next: Instant::from_millis(0),
            period,
        }
    }

    /// Check if the deadline passed and advance it
    ///
    /// If we've fallen behind by more than two periods the backlog is
    /// skipped instead of caught up.
    fn fire(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        let max_drift = Duration::from_millis(self.period.as_millis() * 2);
        if now.as_millis() > self.next.as_millis() + max_drift.as_millis() {
            self.next = now;
        }
        self.next += self.period;
        true
    }
}

/// Drives a [`SpotlightService`] at its process and poll cadences.
///
/// Every tick:
/// - runs the process step (DMX, fade, strobe) when its deadline passed
/// - polls the transport when its deadline passed
/// - flushes changed output to the PWM sink
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = ServiceScheduler::new(service);
///
/// loop {
///     let now = Instant::from_millis(get_current_time_ms());
///     let result = scheduler.tick(now, &mut mqtt, &mut pca9685, &mut output_enable);
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct ServiceScheduler<'a, H: HueSource, const N: usize> {
    service: SpotlightService<'a, H, N>,
    process: Cadence,
    poll: Cadence,
}

impl<'a, H: HueSource, const N: usize> ServiceScheduler<'a, H, N> {
    /// Create a new scheduler using the cadences from the service config.
    pub fn new(service: SpotlightService<'a, H, N>) -> Self {
        let config = *service.config();
        Self {
            service,
            process: Cadence::new(config.process_interval),
            poll: Cadence::new(config.poll_interval),
        }
    }

    /// Run whatever is due and return timing information.
    pub fn tick<T: Transport, S: PwmSink, E: OutputEnable>(
        &mut self,
        now: Instant,
        transport: &mut T,
        sink: &mut S,
        enable: &mut E,
    ) -> TickResult {
        let processed = self.process.fire(now);
        if processed {
            self.service.process(enable);
        }

        let polled = self.poll.fire(now);
        if polled {
            self.service.poll(now, transport);
        }

        self.service.flush(sink);

        let next_deadline = self.process.next.min(self.poll.next);
        let sleep_duration = if next_deadline > now {
            next_deadline - now
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            processed,
            polled,
            next_deadline,
            sleep_duration,
        }
    }

    /// Get a reference to the service.
    pub const fn service(&self) -> &SpotlightService<'a, H, N> {
        &self.service
    }

    /// Get a mutable reference to the service.
    pub const fn service_mut(&mut self) -> &mut SpotlightService<'a, H, N> {
        &mut self.service
    }
}
