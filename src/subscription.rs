//! Staggered topic subscriptions
//!
//! After the broker acknowledges a connection the command topics are
//! subscribed in groups, a few seconds apart, so the retained messages
//! replayed for each group arrive in small batches.

use embassy_time::{Duration, Instant};

use crate::Transport;
use crate::command::{
    TYPE_BASE_COLOR, TYPE_BRIGHTNESS, TYPE_COLOR, TYPE_MODE, TYPE_RANDOM, TYPE_SWITCH,
};
use crate::log::debug;
use crate::topic::{CapacityError, Topic, command_filter, strobo_topic};

/// Topic subscribed by a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscription {
    /// `<prefix>/set/+/<kind>`
    Command(&'static str),
    /// `<prefix>/set/strobo`
    Strobo,
}

impl Subscription {
    pub fn topic(self, prefix: &str) -> Result<Topic, CapacityError> {
        match self {
            Self::Command(kind) => command_filter(prefix, kind),
            Self::Strobo => strobo_topic(prefix),
        }
    }
}

/// Subscriptions issued together after a delay
#[derive(Debug, Clone, Copy)]
pub struct SubscriptionGroup {
    pub delay: Duration,
    pub topics: &'static [Subscription],
}

pub const SUBSCRIPTION_GROUPS: [SubscriptionGroup; 4] = [
    SubscriptionGroup {
        delay: Duration::from_secs(5),
        topics: &[Subscription::Command(TYPE_COLOR), Subscription::Command(TYPE_BASE_COLOR)],
    },
    SubscriptionGroup {
        delay: Duration::from_secs(10),
        topics: &[
            Subscription::Command(TYPE_BRIGHTNESS),
            Subscription::Command(TYPE_MODE),
            Subscription::Strobo,
        ],
    },
    SubscriptionGroup {
        delay: Duration::from_secs(15),
        topics: &[Subscription::Command(TYPE_SWITCH)],
    },
    SubscriptionGroup {
        delay: Duration::from_secs(20),
        topics: &[Subscription::Command(TYPE_RANDOM)],
    },
];

/// Pending subscription deadlines
#[derive(Debug, Clone, Default)]
pub struct SubscriptionPlan {
    deadlines: [Option<Instant>; SUBSCRIPTION_GROUPS.len()],
}

impl SubscriptionPlan {
    pub const fn new() -> Self {
        Self {
            deadlines: [None; SUBSCRIPTION_GROUPS.len()],
        }
    }

    /// (Re)schedule all groups relative to `now`, dropping earlier plans
    pub fn schedule(&mut self, now: Instant) {
        for (deadline, group) in self.deadlines.iter_mut().zip(SUBSCRIPTION_GROUPS.iter()) {
            *deadline = Some(now + group.delay);
        }
    }

    /// Check if any group is still waiting
    pub fn is_pending(&self) -> bool {
        self.deadlines.iter().any(Option::is_some)
    }

    /// Subscribe every group whose deadline has passed
    ///
    /// A group falling due while the transport is disconnected is dropped.
    /// Returns the number of subscriptions issued.
    pub fn poll<T: Transport>(&mut self, now: Instant, prefix: &str, transport: &mut T) -> usize {
        let mut issued = 0;
        for (deadline, group) in self.deadlines.iter_mut().zip(SUBSCRIPTION_GROUPS.iter()) {
            if !deadline.is_some_and(|at| at <= now) {
                continue;
            }
            *deadline = None;

            if !transport.is_connected() {
                continue;
            }

            for subscription in group.topics {
                let topic = match subscription.topic(prefix) {
                    Ok(topic) => topic,
                    Err(err) => {
                        debug!("MqTT Subscribe failed: {}", err);
                        continue;
                    }
                };
                debug!("MqTT Subscribe: {}", topic);
                match transport.subscribe(&topic) {
                    Ok(()) => issued += 1,
                    Err(err) => debug!("MqTT Subscribe {} failed: {}", topic, err),
                }
            }
        }
        issued
    }
}
