#![forbid(unsafe_code)]

//! Deterministic program simulator for testing.
//!
//! `ProgramSimulator` runs a [`Model`] against a [`HeadlessBackend`], so a
//! controller can be exercised end to end (triggers, timers, geometry,
//! presentation) without a browser.
//!
//! # Example
//!
//! ```ignore
//! use vitrine_runtime::simulator::ProgramSimulator;
//!
//! let mut sim = ProgramSimulator::new(NavChrome::from_markup(&markup), page);
//! sim.init();
//! sim.inject(Event::Scroll { target: ElementKey::WINDOW, metrics: ScrollMetrics::vertical(21.0) });
//! assert!(sim.page().has_class(NAV, "shadow-md"));
//! ```

use std::time::Duration;

use vitrine_core::{ElementKey, Event, ScrollMetrics};
use vitrine_render::{Frame, VirtualPage};

use crate::backend::HeadlessBackend;
use crate::program::Model;
use crate::step_program::{StepProgram, StepResult};

/// Deterministic simulator for [`Model`] testing.
///
/// Every call that can change state steps the program once, so the page
/// always reflects the model afterwards.
pub struct ProgramSimulator<M: Model> {
    program: StepProgram<M>,
    backend: HeadlessBackend,
    steps: Vec<StepResult>,
}

impl<M: Model> ProgramSimulator<M> {
    /// Simulator presenting `model` into `page`.
    ///
    /// The model is not initialized until [`init`](Self::init) is called.
    pub fn new(model: M, page: VirtualPage) -> Self {
        Self::with_backend(model, HeadlessBackend::new(page))
    }

    /// Simulator over a preconfigured backend (geometry, intersection
    /// support).
    pub fn with_backend(model: M, backend: HeadlessBackend) -> Self {
        Self {
            program: StepProgram::new(model),
            backend,
            steps: Vec::new(),
        }
    }

    /// Initialize the model and present the first frame.
    pub fn init(&mut self) {
        let result = match self.program.init(&mut self.backend) {
            Ok(r) => r,
            Err(e) => panic!("simulated init failed: {e}"),
        };
        self.steps.push(result);
    }

    /// Deliver one trigger and step.
    pub fn inject(&mut self, event: Event) -> StepResult {
        self.program.push_event(event);
        self.step()
    }

    /// Deliver several triggers in one step.
    pub fn inject_all(&mut self, events: impl IntoIterator<Item = Event>) -> StepResult {
        for event in events {
            self.program.push_event(event);
        }
        self.step()
    }

    /// Deliver a message directly and step.
    pub fn send(&mut self, msg: M::Message) -> StepResult {
        if let Err(e) = self.program.send(msg, &mut self.backend) {
            panic!("simulated send failed: {e}");
        }
        self.step()
    }

    /// Advance the clock by `dt` and step once.
    pub fn advance(&mut self, dt: Duration) -> StepResult {
        self.program.advance_time(dt);
        self.step()
    }

    /// Advance the clock in `frame`-sized steps until `total` has elapsed,
    /// stepping after each one (a host animation-frame loop).
    pub fn run_frames(&mut self, total: Duration, frame: Duration) {
        let frame = frame.max(Duration::from_millis(1));
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            let dt = frame.min(total - elapsed);
            self.advance(dt);
            elapsed += dt;
        }
    }

    /// Step without delivering anything new.
    pub fn step(&mut self) -> StepResult {
        let result = match self.program.step(&mut self.backend) {
            Ok(r) => r,
            Err(e) => panic!("simulated step failed: {e}"),
        };
        self.steps.push(result);
        result
    }

    /// Set the geometry the backend reports for `target`.
    pub fn set_metrics(&mut self, target: ElementKey, metrics: ScrollMetrics) {
        self.backend.set_metrics(target, metrics);
    }

    /// The model.
    pub fn model(&self) -> &M {
        self.program.model()
    }

    /// The presented page.
    pub fn page(&self) -> &VirtualPage {
        self.backend.page()
    }

    /// The backend.
    pub fn backend(&self) -> &HeadlessBackend {
        &self.backend
    }

    /// The program.
    pub fn program(&self) -> &StepProgram<M> {
        &self.program
    }

    /// Last presented frame.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.program.last_frame()
    }

    /// Results of every step so far, `init` first.
    pub fn steps(&self) -> &[StepResult] {
        &self.steps
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.program.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Cmd;
    use crate::subscription::Every;

    const OUT: ElementKey = ElementKey::new("out");

    struct Countdown(u32);

    impl Model for Countdown {
        type Message = ();

        fn on_event(&self, _: &Event) -> Option<()> {
            None
        }

        fn update(&mut self, _: ()) -> Cmd<()> {
            self.0 = self.0.saturating_sub(1);
            Cmd::none()
        }

        fn view(&self, frame: &mut Frame) {
            frame.set_text(OUT, self.0.to_string());
        }

        fn subscriptions(&self) -> Vec<Every<()>> {
            if self.0 > 0 {
                vec![Every::new(Duration::from_millis(16), || ())]
            } else {
                Vec::new()
            }
        }
    }

    #[test]
    fn frame_loop_runs_to_completion() {
        let mut sim = ProgramSimulator::new(Countdown(5), VirtualPage::new().with(OUT, &[]));
        sim.init();
        assert_eq!(sim.page().text(OUT), Some("5"));
        sim.run_frames(Duration::from_millis(200), Duration::from_millis(16));
        assert_eq!(sim.page().text(OUT), Some("0"));
        assert_eq!(sim.program().active_subscriptions(), 0);
        assert_eq!(sim.now(), Duration::from_millis(200));
    }

    #[test]
    fn send_steps_and_renders() {
        let mut sim = ProgramSimulator::new(Countdown(2), VirtualPage::new().with(OUT, &[]));
        sim.init();
        let r = sim.send(());
        assert!(r.rendered);
        assert_eq!(sim.page().text(OUT), Some("1"));
        assert_eq!(sim.steps().len(), 2);
    }
}
