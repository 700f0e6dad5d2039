#![forbid(unsafe_code)]

//! Step-based program runner.
//!
//! [`StepProgram`] drives a [`Model`] through trigger / update / view /
//! present cycles without threads or blocking. The host controls the loop:
//!
//! 1. Push triggers via [`StepProgram::push_event`].
//! 2. Advance time via [`StepProgram::advance_time`] or
//!    [`StepProgram::set_time`].
//! 3. Call [`StepProgram::step`] to process queued triggers, fire due timers,
//!    and present the changed part of the view.
//!
//! Timers fire at their due time, not at the time the host polls: a message
//! delivered by a timer due at 150 ms schedules follow-up timers relative to
//! 150 ms even if the host only stepped at 1 s. Large clock jumps therefore
//! behave like many small steps.
//!
//! The backend is passed into every call rather than owned, so several
//! programs can share one document.
//!
//! # Example
//!
//! ```ignore
//! let mut prog = StepProgram::new(StepperController::from_markup(&markup));
//! prog.init(&mut backend)?;
//!
//! // Host-driven frame loop
//! prog.push_event(Event::Click(ElementKey::new("slide-next")));
//! prog.advance_time(Duration::from_millis(16));
//! let result = prog.step(&mut backend)?;
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use vitrine_core::Event;
use vitrine_render::{Frame, FrameDiff};

use crate::backend::Backend;
use crate::program::{Cmd, Model};
use crate::subscription::{SubscriptionSet, TimerSlot};
use crate::timer::TimerQueue;

/// Deepest chain of messages delivered by `Cmd::Msg` from inside `update`.
const MAX_DISPATCH_DEPTH: u32 = 256;

/// Failure while driving a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError<E> {
    /// [`StepProgram::init`] was called twice.
    AlreadyInitialized,
    /// A step was requested before [`StepProgram::init`].
    NotInitialized,
    /// `update` kept returning `Cmd::Msg` past the nesting limit.
    DispatchDepth(u32),
    /// The backend failed to present a frame.
    Present(E),
}

impl<E: fmt::Display> fmt::Display for RuntimeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized => write!(f, "program already initialized"),
            Self::NotInitialized => write!(f, "program not initialized"),
            Self::DispatchDepth(n) => write!(f, "message chain deeper than {n}"),
            Self::Present(e) => write!(f, "present failed: {e}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for RuntimeError<E> {}

/// Host-controlled monotonic clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Clock at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current time since the clock's origin.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Move forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Jump to `now`. Moving backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

/// Result of a single [`StepProgram::step`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepResult {
    /// Whether a frame was rendered.
    pub rendered: bool,
    /// Triggers taken from the queue.
    pub events_processed: u32,
    /// Timers (one-shot and interval) that fired.
    pub timers_fired: u32,
    /// Patches handed to the backend.
    pub patches_applied: usize,
    /// Frames rendered so far.
    pub frame_idx: u64,
}

/// Host-driven, non-blocking runner for one controller.
pub struct StepProgram<M: Model> {
    model: M,
    clock: DeterministicClock,
    /// Time commands are scheduled against. Trails the clock while overdue
    /// timers are being replayed.
    logical_now: Duration,
    timers: TimerQueue<TimerSlot, M::Message>,
    subscriptions: SubscriptionSet<M::Message>,
    pending: VecDeque<Event>,
    initialized: bool,
    dirty: bool,
    depth: u32,
    frame_idx: u64,
    prev_frame: Option<Frame>,
}

impl<M: Model> StepProgram<M> {
    /// Program for `model` with its clock at zero.
    #[must_use]
    pub fn new(model: M) -> Self {
        Self {
            model,
            clock: DeterministicClock::new(),
            logical_now: Duration::ZERO,
            timers: TimerQueue::new(),
            subscriptions: SubscriptionSet::default(),
            pending: VecDeque::new(),
            initialized: false,
            dirty: true,
            depth: 0,
            frame_idx: 0,
            prev_frame: None,
        }
    }

    /// Run `Model::init`, execute its commands, start subscriptions, and
    /// present the first frame in full.
    pub fn init<B: Backend>(&mut self, backend: &mut B) -> Result<StepResult, RuntimeError<B::Error>> {
        if self.initialized {
            return Err(RuntimeError::AlreadyInitialized);
        }
        self.initialized = true;
        self.logical_now = self.clock.now();
        let cmd = self.model.init();
        self.execute_cmd(cmd, backend)?;
        self.reconcile_subscriptions();
        let patches_applied = self.render(backend)?;
        Ok(StepResult {
            rendered: true,
            patches_applied,
            frame_idx: self.frame_idx,
            ..StepResult::default()
        })
    }

    /// Queue a trigger for the next step.
    pub fn push_event(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    /// Advance the clock by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Set the clock to `now` (monotonic: earlier values are ignored).
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Process queued triggers, fire due timers, and present if anything
    /// changed.
    pub fn step<B: Backend>(&mut self, backend: &mut B) -> Result<StepResult, RuntimeError<B::Error>> {
        if !self.initialized {
            return Err(RuntimeError::NotInitialized);
        }
        let mut result = StepResult::default();

        self.logical_now = self.clock.now();
        while let Some(event) = self.pending.pop_front() {
            result.events_processed += 1;
            if let Some(msg) = self.model.on_event(&event) {
                self.dispatch(msg, backend)?;
            }
        }

        let now = self.clock.now();
        while let Some(fired) = self.timers.pop_due(now) {
            result.timers_fired += 1;
            self.logical_now = fired.due;
            let msg = match fired.key {
                TimerSlot::Once(_) => fired.value,
                TimerSlot::Every(id) => self.subscriptions.tick(id),
            };
            if let Some(msg) = msg {
                self.dispatch(msg, backend)?;
            }
        }
        self.logical_now = now;

        if self.dirty {
            result.patches_applied = self.render(backend)?;
            result.rendered = true;
        }
        result.frame_idx = self.frame_idx;
        Ok(result)
    }

    /// Deliver `msg` directly, bypassing `on_event`. Does not render.
    pub fn send<B: Backend>(&mut self, msg: M::Message, backend: &mut B) -> Result<(), RuntimeError<B::Error>> {
        if !self.initialized {
            return Err(RuntimeError::NotInitialized);
        }
        self.logical_now = self.clock.now();
        self.dispatch(msg, backend)
    }

    /// The controller.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the controller.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Current clock reading.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Earliest pending timer, for hosts that sleep until the next deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    /// Whether the view changed since the last present.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether [`init`](Self::init) has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    /// Number of pending one-shot and interval timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of running interval subscriptions.
    #[must_use]
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    /// The last presented frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&Frame> {
        self.prev_frame.as_ref()
    }

    fn dispatch<B: Backend>(&mut self, msg: M::Message, backend: &mut B) -> Result<(), RuntimeError<B::Error>> {
        if self.depth >= MAX_DISPATCH_DEPTH {
            return Err(RuntimeError::DispatchDepth(MAX_DISPATCH_DEPTH));
        }
        self.depth += 1;
        let cmd = self.model.update(msg);
        self.dirty = true;
        let result = self.execute_cmd(cmd, backend);
        self.depth -= 1;
        result?;
        self.reconcile_subscriptions();
        Ok(())
    }

    fn execute_cmd<B: Backend>(&mut self, cmd: Cmd<M::Message>, backend: &mut B) -> Result<(), RuntimeError<B::Error>> {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_cmd(cmd, backend)?;
                }
            }
            Cmd::Msg(m) => self.dispatch(m, backend)?,
            Cmd::After { timer, delay, msg } => {
                let due = self.logical_now.saturating_add(delay);
                tracing::trace!(timer = timer.0, due_ms = due.as_millis() as u64, "timer armed");
                self.timers.schedule_once(TimerSlot::Once(timer), due, msg);
            }
            Cmd::Cancel(timer) => {
                if self.timers.cancel(TimerSlot::Once(timer)) {
                    tracing::trace!(timer = timer.0, "timer cancelled");
                }
            }
            Cmd::Measure { target, then } => {
                let metrics = backend.measure(target);
                self.dispatch(then(metrics), backend)?;
            }
            Cmd::ScrollBy { target, dx, smooth } => {
                if let Err(e) = backend.scroll_by(target, dx, smooth) {
                    tracing::warn!(%target, error = %e, "scroll failed");
                }
            }
            Cmd::Observe {
                target,
                threshold,
                fallback,
            } => match backend.observe(target, threshold) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(%target, "intersection unavailable, using fallback");
                    self.dispatch(fallback, backend)?;
                }
                Err(e) => {
                    tracing::warn!(%target, error = %e, "observe failed, using fallback");
                    self.dispatch(fallback, backend)?;
                }
            },
            Cmd::Unobserve(target) => backend.unobserve(target),
        }
        Ok(())
    }

    fn reconcile_subscriptions(&mut self) {
        let declared = self.model.subscriptions();
        self.subscriptions
            .reconcile(declared, self.logical_now, &mut self.timers);
    }

    fn render<B: Backend>(&mut self, backend: &mut B) -> Result<usize, RuntimeError<B::Error>> {
        let mut frame = Frame::new();
        self.model.view(&mut frame);
        let diff = self
            .prev_frame
            .as_ref()
            .map(|prev| FrameDiff::compute(prev, &frame));
        let applied = backend
            .present(&frame, diff.as_ref())
            .map_err(RuntimeError::Present)?;
        self.prev_frame = Some(frame);
        self.dirty = false;
        self.frame_idx += 1;
        tracing::trace!(frame = self.frame_idx, patches = applied, "frame presented");
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::program::TimerId;
    use crate::subscription::Every;
    use vitrine_core::ElementKey;
    use vitrine_render::VirtualPage;

    const LABEL: ElementKey = ElementKey::new("label");
    const BUTTON: ElementKey = ElementKey::new("button");
    const DELAYED: TimerId = TimerId::new(1);
    const MS: fn(u64) -> Duration = Duration::from_millis;

    #[derive(Debug)]
    enum Msg {
        Click,
        Delayed,
        Tick,
        Chain(u32),
    }

    #[derive(Default)]
    struct Dummy {
        clicks: u32,
        delayed_at: Vec<u32>,
        ticks: u32,
        ticking: bool,
        chain: u32,
    }

    impl Model for Dummy {
        type Message = Msg;

        fn on_event(&self, event: &Event) -> Option<Msg> {
            (*event == Event::Click(BUTTON)).then_some(Msg::Click)
        }

        fn update(&mut self, msg: Msg) -> Cmd<Msg> {
            match msg {
                Msg::Click => {
                    self.clicks += 1;
                    self.ticking = true;
                    Cmd::after(DELAYED, MS(150), Msg::Delayed)
                }
                Msg::Delayed => {
                    self.delayed_at.push(self.ticks);
                    Cmd::none()
                }
                Msg::Tick => {
                    self.ticks += 1;
                    if self.ticks == 3 {
                        self.ticking = false;
                    }
                    Cmd::none()
                }
                Msg::Chain(n) => {
                    self.chain += 1;
                    Cmd::msg(Msg::Chain(n + 1))
                }
            }
        }

        fn view(&self, frame: &mut Frame) {
            frame.set_text(LABEL, format!("{}/{}", self.clicks, self.ticks));
        }

        fn subscriptions(&self) -> Vec<Every<Msg>> {
            if self.ticking {
                vec![Every::new(MS(100), || Msg::Tick)]
            } else {
                Vec::new()
            }
        }
    }

    fn backend() -> HeadlessBackend {
        HeadlessBackend::new(VirtualPage::new().with(LABEL, &[]))
    }

    #[test]
    fn init_presents_first_frame() {
        let mut b = backend();
        let mut prog = StepProgram::new(Dummy::default());
        let r = prog.init(&mut b).unwrap();
        assert!(r.rendered);
        assert_eq!(b.page().text(LABEL), Some("0/0"));
        assert_eq!(prog.init(&mut b), Err(RuntimeError::AlreadyInitialized));
    }

    #[test]
    fn step_before_init_fails() {
        let mut b = backend();
        let mut prog = StepProgram::new(Dummy::default());
        assert_eq!(prog.step(&mut b), Err(RuntimeError::NotInitialized));
    }

    #[test]
    fn idle_step_does_not_render() {
        let mut b = backend();
        let mut prog = StepProgram::new(Dummy::default());
        prog.init(&mut b).unwrap();
        let r = prog.step(&mut b).unwrap();
        assert!(!r.rendered);
        assert_eq!(r.frame_idx, 1);
    }

    #[test]
    fn timers_fire_at_due_time_in_order() {
        let mut b = backend();
        let mut prog = StepProgram::new(Dummy::default());
        prog.init(&mut b).unwrap();
        prog.push_event(Event::Click(BUTTON));
        prog.step(&mut b).unwrap();
        assert_eq!(prog.active_subscriptions(), 1);

        // One jump covers ticks at 100/200/300 and the delayed message at 150.
        prog.advance_time(MS(1000));
        let r = prog.step(&mut b).unwrap();
        assert_eq!(r.timers_fired, 4);
        assert_eq!(prog.model().delayed_at, vec![1]);
        assert_eq!(prog.model().ticks, 3);
        assert_eq!(prog.active_subscriptions(), 0);
        assert_eq!(b.page().text(LABEL), Some("1/3"));
    }

    #[test]
    fn rearming_replaces_pending_timer() {
        let mut b = backend();
        let mut prog = StepProgram::new(Dummy::default());
        prog.init(&mut b).unwrap();
        prog.push_event(Event::Click(BUTTON));
        prog.step(&mut b).unwrap();
        prog.advance_time(MS(100));
        prog.push_event(Event::Click(BUTTON));
        prog.step(&mut b).unwrap();
        prog.advance_time(MS(100));
        prog.step(&mut b).unwrap();
        assert!(prog.model().delayed_at.is_empty());
        prog.advance_time(MS(50));
        prog.step(&mut b).unwrap();
        assert_eq!(prog.model().delayed_at.len(), 1);
    }

    #[test]
    fn unchanged_view_presents_nothing() {
        let mut b = backend();
        let mut prog = StepProgram::new(Dummy::default());
        prog.init(&mut b).unwrap();
        let before = b.page().applied();
        prog.send(Msg::Delayed, &mut b).unwrap();
        let r = prog.step(&mut b).unwrap();
        assert!(r.rendered);
        assert_eq!(r.patches_applied, 0);
        assert_eq!(b.page().applied(), before);
    }

    #[test]
    fn runaway_message_chains_are_bounded() {
        let mut b = backend();
        let mut prog = StepProgram::new(Dummy::default());
        prog.init(&mut b).unwrap();
        let err = prog.send(Msg::Chain(0), &mut b).unwrap_err();
        assert_eq!(err, RuntimeError::DispatchDepth(MAX_DISPATCH_DEPTH));
    }
}
