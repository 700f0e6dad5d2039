#![forbid(unsafe_code)]

//! Page assembly: every controller the markup supports, on one backend.
//!
//! A [`Page`] mounts each controller whose required elements exist and gives
//! it its own [`StepProgram`]. All programs present into the same backend;
//! their element sets are disjoint, so the order they present in does not
//! matter. Host triggers are fanned out to every program, and every program
//! shares the page clock.
//!
//! A controller that fails is logged and counted in [`PageStep::failed`];
//! the other controllers still run.
//!
//! ```
//! use std::time::Duration;
//! use vitrine_core::markup::StaticMarkup;
//! use vitrine_core::ElementKey;
//! use vitrine_render::VirtualPage;
//! use vitrine_web::config::PageConfig;
//! use vitrine_web::page::Page;
//! use vitrine_widgets::Stepper;
//!
//! let bar = ElementKey::new("lifecycle-progress-mobile");
//! let markup = StaticMarkup::new().with(bar);
//! let mut page = Page::headless(&markup, &PageConfig::default(), VirtualPage::new().with(bar, &[]));
//! page.init();
//! page.advance(Duration::from_millis(3500));
//! page.step();
//! assert_eq!(page.controller::<Stepper>().unwrap().active(), 1);
//! ```

use std::any::Any;
use std::time::Duration;

use vitrine_core::Event;
use vitrine_core::markup::MarkupSource;
use vitrine_render::VirtualPage;
use vitrine_runtime::{Backend, HeadlessBackend, Model, StepProgram, StepResult};
use vitrine_widgets::{
    CounterGroup, HoverMenu, NavChrome, ServicePanel, Showcase, SlideStack, Stepper, ToggleMenu,
};

use crate::config::PageConfig;
use crate::error::WebError;

/// Aggregate of one [`Page::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageStep {
    /// Controllers that rendered a frame.
    pub rendered: u32,
    /// Triggers taken from the queues, summed over controllers.
    pub events_processed: u32,
    /// Timers fired, summed over controllers.
    pub timers_fired: u32,
    /// Patches handed to the backend.
    pub patches_applied: usize,
    /// Controllers whose program returned an error.
    pub failed: u32,
}

impl PageStep {
    fn absorb(&mut self, r: StepResult) {
        self.rendered += u32::from(r.rendered);
        self.events_processed += r.events_processed;
        self.timers_fired += r.timers_fired;
        self.patches_applied += r.patches_applied;
    }

    fn record(&mut self, controller: &'static str, r: Result<StepResult, WebError>) {
        match r {
            Ok(r) => self.absorb(r),
            Err(e) => {
                tracing::warn!(controller, error = %e, "controller failed");
                self.failed += 1;
            }
        }
    }
}

/// Object-safe view of a mounted program.
trait Mounted<B: Backend> {
    fn name(&self) -> &'static str;
    fn init(&mut self, backend: &mut B) -> Result<StepResult, WebError>;
    fn push_event(&mut self, event: &Event);
    fn step(&mut self, now: Duration, backend: &mut B) -> Result<StepResult, WebError>;
    fn next_deadline(&self) -> Option<Duration>;
    fn as_any(&self) -> &dyn Any;
}

struct Slot<M: Model> {
    name: &'static str,
    program: StepProgram<M>,
}

impl<M, B> Mounted<B> for Slot<M>
where
    M: Model + 'static,
    B: Backend,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn init(&mut self, backend: &mut B) -> Result<StepResult, WebError> {
        self.program.init(backend).map_err(|e| runtime(self.name, e))
    }

    fn push_event(&mut self, event: &Event) {
        self.program.push_event(event.clone());
    }

    fn step(&mut self, now: Duration, backend: &mut B) -> Result<StepResult, WebError> {
        self.program.set_time(now);
        self.program.step(backend).map_err(|e| runtime(self.name, e))
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.program.next_deadline()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn runtime(controller: &'static str, err: impl std::fmt::Display) -> WebError {
    WebError::Runtime {
        controller,
        message: err.to_string(),
    }
}

/// All controllers of one document.
pub struct Page<B: Backend = HeadlessBackend> {
    backend: B,
    mounted: Vec<Box<dyn Mounted<B>>>,
    now: Duration,
}

impl<B: Backend + 'static> Page<B> {
    /// Mount every controller `markup` supports, configured from `config`.
    pub fn new(markup: &impl MarkupSource, config: &PageConfig, backend: B) -> Self {
        let t = &config.timings;
        let mut page = Self {
            backend,
            mounted: Vec::new(),
            now: Duration::ZERO,
        };
        page.mount("nav-chrome", NavChrome::from_markup(markup).map(|m| m.threshold(t.nav_threshold)));
        page.mount("hover-menu", HoverMenu::from_markup(markup).map(|m| m.close_delay(t.close_delay())));
        page.mount("toggle-menu", ToggleMenu::from_markup(markup));
        page.mount(
            "counters",
            CounterGroup::from_markup(markup)
                .map(|m| m.timing(t.counter_duration(), t.counter_fps).threshold(t.counter_threshold)),
        );
        page.mount("stepper", Stepper::from_markup(markup).map(|m| m.interval(t.stepper_interval())));
        page.mount(
            "showcase",
            Showcase::from_markup(markup).map(|m| {
                m.settle(t.showcase_settle())
                    .slack(t.arrow_slack)
                    .scroll_fraction(t.scroll_fraction)
            }),
        );
        page.mount(
            "slide-stack",
            SlideStack::from_markup(markup).map(|m| m.interval(t.slide_interval()).settle(t.slide_settle())),
        );
        page.mount("service-panel", ServicePanel::from_markup(markup));
        page
    }

    fn mount<M: Model + 'static>(&mut self, name: &'static str, model: Option<M>) {
        match model {
            Some(model) => {
                tracing::debug!(controller = name, "mounted");
                self.mounted.push(Box::new(Slot {
                    name,
                    program: StepProgram::new(model),
                }));
            }
            None => tracing::debug!(controller = name, "skipped: required elements missing"),
        }
    }

    /// Run every controller's `init` and first render.
    pub fn init(&mut self) -> PageStep {
        let mut out = PageStep::default();
        for m in &mut self.mounted {
            out.record(m.name(), m.init(&mut self.backend));
        }
        out
    }

    /// Queue a host trigger for every controller. Each one decides whether
    /// the trigger concerns it when it is processed.
    pub fn push_event(&mut self, event: Event) {
        for m in &mut self.mounted {
            m.push_event(&event);
        }
    }

    /// Move the page clock forward.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Jump the page clock. Moving backwards is ignored.
    pub fn set_time(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Process queued triggers and due timers in every controller, then
    /// present what changed.
    pub fn step(&mut self) -> PageStep {
        let mut out = PageStep::default();
        for m in &mut self.mounted {
            out.record(m.name(), m.step(self.now, &mut self.backend));
        }
        tracing::trace!(
            now_ms = self.now.as_millis() as u64,
            rendered = out.rendered,
            patches = out.patches_applied,
            "page step"
        );
        out
    }

    /// Push `event` and step.
    pub fn handle(&mut self, event: Event) -> PageStep {
        self.push_event(event);
        self.step()
    }

    /// Model of the mounted controller of type `M`.
    #[must_use]
    pub fn controller<M: Model + 'static>(&self) -> Option<&M> {
        self.mounted
            .iter()
            .find_map(|m| m.as_any().downcast_ref::<Slot<M>>())
            .map(|slot| slot.program.model())
    }

    /// Names of the mounted controllers, in mount order.
    #[must_use]
    pub fn controllers(&self) -> Vec<&'static str> {
        self.mounted.iter().map(|m| m.name()).collect()
    }

    /// Earliest pending timer across controllers.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.mounted.iter().filter_map(|m| m.next_deadline()).min()
    }

    /// Page clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Shared backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Shared backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl Page<HeadlessBackend> {
    /// Page presenting into an in-memory document.
    pub fn headless(markup: &impl MarkupSource, config: &PageConfig, page: VirtualPage) -> Self {
        Self::new(markup, config, HeadlessBackend::new(page))
    }

    /// The in-memory document.
    #[must_use]
    pub fn document(&self) -> &VirtualPage {
        self.backend.page()
    }
}

impl<B: Backend> std::fmt::Debug for Page<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("controllers", &self.mounted.iter().map(|m| m.name()).collect::<Vec<_>>())
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}
