#![forbid(unsafe_code)]

//! Controller contract: the [`Model`] trait and the [`Cmd`] side-effect type.
//!
//! A controller is an Elm-style state machine:
//!
//! - [`Model::on_event`] maps a host trigger to a message (or ignores it).
//! - [`Model::update`] advances state and returns side effects as a [`Cmd`].
//! - [`Model::view`] writes the whole presentation into a
//!   [`Frame`](vitrine_render::Frame); the runtime presents only what changed.
//! - [`Model::subscriptions`] declares the interval timers that should be
//!   running for the current state.
//!
//! Controllers never touch the document or the clock. Everything that does
//! (timers, geometry reads, scrolling, visibility observation) goes through a
//! command, so a controller can be driven deterministically in tests.
//!
//! # Example
//!
//! ```
//! use vitrine_core::{ElementKey, Event};
//! use vitrine_render::Frame;
//! use vitrine_runtime::program::{Cmd, Model};
//!
//! const BUTTON: ElementKey = ElementKey::new("button");
//!
//! struct Clicks(u32);
//!
//! impl Model for Clicks {
//!     type Message = ();
//!
//!     fn on_event(&self, event: &Event) -> Option<()> {
//!         (*event == Event::Click(BUTTON)).then_some(())
//!     }
//!
//!     fn update(&mut self, _: ()) -> Cmd<()> {
//!         self.0 += 1;
//!         Cmd::none()
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         frame.set_text(BUTTON, self.0.to_string());
//!     }
//! }
//! ```

use std::time::Duration;

use vitrine_core::{ElementKey, Event, ScrollMetrics};
use vitrine_render::Frame;

use crate::subscription::Every;

/// Identifier of a one-shot timer armed with [`Cmd::After`].
///
/// Identifiers are scoped to a single program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

impl TimerId {
    /// Timer identifier from a raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

/// A presentation controller.
pub trait Model {
    /// Messages driving [`update`](Model::update).
    type Message;

    /// Commands to run once, before the first render.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Translate a host trigger into a message. Triggers that do not concern
    /// this controller map to `None`.
    fn on_event(&self, event: &Event) -> Option<Self::Message>;

    /// Apply a message.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Write the complete presentation for the current state.
    fn view(&self, frame: &mut Frame);

    /// Interval timers that should run in the current state.
    ///
    /// Called after every update. Timers are matched by
    /// [`SubId`](crate::SubId): new ones start, missing ones stop, and
    /// unchanged ones keep their phase.
    fn subscriptions(&self) -> Vec<Every<Self::Message>> {
        Vec::new()
    }
}

/// Side effects requested by [`Model::update`].
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Run several commands in order.
    Batch(Vec<Cmd<M>>),
    /// Deliver a message immediately.
    Msg(M),
    /// Deliver `msg` after `delay`. Re-arming a pending `timer` replaces it.
    After {
        /// Timer identity.
        timer: TimerId,
        /// Delay from the moment the command runs.
        delay: Duration,
        /// Message delivered when the timer fires.
        msg: M,
    },
    /// Disarm a pending one-shot timer. No-op if it is not armed.
    Cancel(TimerId),
    /// Read the scroll geometry of `target` and deliver it as a message.
    Measure {
        /// Element to measure.
        target: ElementKey,
        /// Wraps the measurement (`None` when the element is absent).
        then: fn(Option<ScrollMetrics>) -> M,
    },
    /// Scroll `target` horizontally by `dx` pixels.
    ScrollBy {
        /// Element to scroll.
        target: ElementKey,
        /// Horizontal offset in CSS pixels.
        dx: f64,
        /// Animate the scroll.
        smooth: bool,
    },
    /// Report viewport intersections of `target` at `threshold`. When the
    /// host cannot observe, `fallback` is delivered immediately instead.
    Observe {
        /// Element to observe.
        target: ElementKey,
        /// Visible fraction that counts as intersecting.
        threshold: f64,
        /// Message delivered if observation is unavailable.
        fallback: M,
    },
    /// Stop observing `target`.
    Unobserve(ElementKey),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::After { timer, delay, msg } => f
                .debug_struct("After")
                .field("timer", timer)
                .field("delay", delay)
                .field("msg", msg)
                .finish(),
            Self::Cancel(timer) => f.debug_tuple("Cancel").field(timer).finish(),
            Self::Measure { target, .. } => f.debug_struct("Measure").field("target", target).finish(),
            Self::ScrollBy { target, dx, smooth } => f
                .debug_struct("ScrollBy")
                .field("target", target)
                .field("dx", dx)
                .field("smooth", smooth)
                .finish(),
            Self::Observe {
                target, threshold, ..
            } => f
                .debug_struct("Observe")
                .field("target", target)
                .field("threshold", threshold)
                .finish(),
            Self::Unobserve(target) => f.debug_tuple("Unobserve").field(target).finish(),
        }
    }
}

impl<M> Cmd<M> {
    /// No operation.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Run commands in order. `None` entries are dropped; a single remaining
    /// command is returned unwrapped.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }

    /// Deliver a message immediately.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Deliver `msg` after `delay` under `timer`.
    #[inline]
    pub fn after(timer: TimerId, delay: Duration, msg: M) -> Self {
        Self::After { timer, delay, msg }
    }

    /// Disarm `timer`.
    #[inline]
    pub fn cancel(timer: TimerId) -> Self {
        Self::Cancel(timer)
    }

    /// Measure `target` and deliver the result through `then`.
    #[inline]
    pub fn measure(target: ElementKey, then: fn(Option<ScrollMetrics>) -> M) -> Self {
        Self::Measure { target, then }
    }

    /// Scroll `target` horizontally by `dx`.
    #[inline]
    pub fn scroll_by(target: ElementKey, dx: f64, smooth: bool) -> Self {
        Self::ScrollBy { target, dx, smooth }
    }

    /// Observe `target` at `threshold`, falling back to `fallback`.
    #[inline]
    pub fn observe(target: ElementKey, threshold: f64, fallback: M) -> Self {
        Self::Observe {
            target,
            threshold,
            fallback,
        }
    }

    /// Stop observing `target`.
    #[inline]
    pub fn unobserve(target: ElementKey) -> Self {
        Self::Unobserve(target)
    }

    /// Whether this is [`Cmd::None`].
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Number of leaf commands (batches are flattened, `None` counts zero).
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Batch(cmds) => cmds.iter().map(Self::count).sum(),
            _ => 1,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Batch(_) => "Batch",
            Self::Msg(_) => "Msg",
            Self::After { .. } => "After",
            Self::Cancel(_) => "Cancel",
            Self::Measure { .. } => "Measure",
            Self::ScrollBy { .. } => "ScrollBy",
            Self::Observe { .. } => "Observe",
            Self::Unobserve(_) => "Unobserve",
        }
    }
}
