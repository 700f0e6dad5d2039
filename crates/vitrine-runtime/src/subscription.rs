#![forbid(unsafe_code)]

//! Declarative interval timers.
//!
//! A model lists the intervals that should be running for its current state
//! through [`Model::subscriptions`](crate::Model::subscriptions). After each
//! update the runtime reconciles that list against the running set:
//!
//! 1. Subscriptions whose [`SubId`] is new are started; the first tick comes
//!    one interval after the reconcile.
//! 2. Running subscriptions missing from the list are stopped.
//! 3. Subscriptions present in both keep their phase. Their message factory
//!    is refreshed so it can capture current state.
//!
//! Nothing here spawns threads; ticks are produced by the host-driven
//! [`TimerQueue`](crate::timer::TimerQueue).

use std::collections::BTreeMap;
use std::time::Duration;

use crate::timer::TimerQueue;

/// Identity of an interval subscription, scoped to one program.
pub type SubId = u64;

/// Repeating timer delivering a message every `interval`.
pub struct Every<M> {
    id: SubId,
    interval: Duration,
    make_msg: Box<dyn Fn() -> M>,
}

impl<M> Every<M> {
    /// Interval subscription identified by the interval length.
    ///
    /// Two `Every`s with the same interval are treated as the same
    /// subscription; use [`with_id`](Self::with_id) to run several.
    pub fn new(interval: Duration, make_msg: impl Fn() -> M + 'static) -> Self {
        let id = interval.as_nanos() as u64 ^ 0x5449_434B;
        Self::with_id(id, interval, make_msg)
    }

    /// Interval subscription with an explicit identity.
    pub fn with_id(id: SubId, interval: Duration, make_msg: impl Fn() -> M + 'static) -> Self {
        Self {
            id,
            interval,
            make_msg: Box::new(make_msg),
        }
    }

    /// Subscription identity.
    #[must_use]
    pub fn id(&self) -> SubId {
        self.id
    }

    /// Tick period.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Produce one tick message.
    pub fn tick(&self) -> M {
        (self.make_msg)()
    }
}

impl<M> std::fmt::Debug for Every<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Every")
            .field("id", &self.id)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

/// Key space shared by one-shot and interval timers of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerSlot {
    Once(crate::program::TimerId),
    Every(SubId),
}

/// Running interval subscriptions of one program.
pub(crate) struct SubscriptionSet<M> {
    active: BTreeMap<SubId, Every<M>>,
}

impl<M> Default for SubscriptionSet<M> {
    fn default() -> Self {
        Self {
            active: BTreeMap::new(),
        }
    }
}

impl<M> SubscriptionSet<M> {
    /// Reconcile against the model's declared subscriptions. `now` is the
    /// logical time new subscriptions start counting from.
    pub(crate) fn reconcile<V>(
        &mut self,
        declared: Vec<Every<M>>,
        now: Duration,
        timers: &mut TimerQueue<TimerSlot, V>,
    ) {
        let mut next = BTreeMap::new();
        for sub in declared {
            let id = sub.id;
            if !self.active.contains_key(&id) && !next.contains_key(&id) {
                tracing::debug!(sub_id = id, interval_ms = sub.interval.as_millis() as u64, "subscription started");
                timers.schedule_every(TimerSlot::Every(id), now + sub.interval, sub.interval);
            }
            next.insert(id, sub);
        }
        for id in self.active.keys() {
            if !next.contains_key(id) {
                tracing::debug!(sub_id = *id, "subscription stopped");
                timers.cancel(TimerSlot::Every(*id));
            }
        }
        self.active = next;
    }

    /// Tick message for `id`, if it is still running.
    pub(crate) fn tick(&self, id: SubId) -> Option<M> {
        self.active.get(&id).map(Every::tick)
    }

    /// Number of running subscriptions.
    pub(crate) fn len(&self) -> usize {
        self.active.len()
    }
}
