#![forbid(unsafe_code)]

//! Auto-advancing lifecycle stepper.
//!
//! A fixed number of steps (four on the page) is cycled on an interval. Each
//! step element declares its position in `data-lifecycle-step` and renders
//! one of three roles derived from that position:
//!
//! | role    | condition         | circle                           | title          | description     |
//! |---------|-------------------|----------------------------------|----------------|-----------------|
//! | active  | `idx == active`   | filled, glowing, scaled up       | `text-primary` | `text-navy`     |
//! | past    | `idx < active`    | filled                           | `text-navy`    | `text-gray-400` |
//! | pending | `idx > active`    | white with an orange outline     | `text-navy`    | `text-gray-400` |
//!
//! Two progress bars share one percentage, `active / (N - 1) * 100`: the
//! vertical bar uses it as its height, the horizontal bar uses three
//! quarters of it as its width (its track spans 75% of the container).

use std::time::Duration;

use vitrine_core::markup::{MarkupSource, parse_index};
use vitrine_core::number::to_display;
use vitrine_core::{ElementKey, Event};
use vitrine_render::Frame;
use vitrine_runtime::{Cmd, Every, Model};

use crate::cyclic;

/// Step role (indexed, carries `data-lifecycle-step`).
pub const STEP: &str = "lifecycle-step";
/// Step circle role, indexed like [`STEP`].
pub const CIRCLE: &str = "lifecycle-circle";
/// Step title role, indexed like [`STEP`].
pub const TITLE: &str = "lifecycle-title";
/// Step description role, indexed like [`STEP`].
pub const DESC: &str = "lifecycle-desc";
/// Check glyph role, indexed like [`STEP`].
pub const CHECK: &str = "lifecycle-check";
/// Active dot glyph role, indexed like [`STEP`].
pub const ACTIVE_DOT: &str = "lifecycle-active-dot";
/// Inactive dot glyph role, indexed like [`STEP`].
pub const INACTIVE_DOT: &str = "lifecycle-inactive-dot";
/// Horizontal progress bar.
pub const PROGRESS_DESKTOP: ElementKey = ElementKey::new("lifecycle-progress-desktop");
/// Vertical progress bar.
pub const PROGRESS_MOBILE: ElementKey = ElementKey::new("lifecycle-progress-mobile");

/// Number of steps in the cycle.
pub const STEP_COUNT: usize = 4;
/// Default interval between advances.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3500);
/// Share of the container the horizontal track spans.
pub const DESKTOP_TRACK_SCALE: f64 = 0.75;

const GLOW: &str = "shadow-[0_0_25px_rgba(255,105,5,0.6)]";
const CIRCLE_STATE: &[&str] = &[
    "bg-primary",
    GLOW,
    "shadow-[0_0_20px_rgba(255,105,5,0.4)]",
    "scale-110",
    "border-2",
    "border-pastel-orange",
    "bg-white",
];

#[derive(Debug, Clone, Copy)]
struct StepParts {
    position: usize,
    circle: bool,
    title: bool,
    desc: bool,
    glyphs: bool,
}

/// Messages for [`Stepper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperMsg {
    /// Interval elapsed.
    Advance,
}

/// Cyclic auto-advance stepper.
#[derive(Debug, Clone)]
pub struct Stepper {
    steps: Vec<StepParts>,
    has_desktop: bool,
    has_mobile: bool,
    active: usize,
    interval: Duration,
}

impl Stepper {
    /// Build from markup. Requires at least one step or progress bar.
    pub fn from_markup(markup: &impl MarkupSource) -> Option<Self> {
        let steps: Vec<StepParts> = (0..markup.count(STEP))
            .map(|i| {
                let has = |role: &'static str| markup.exists(ElementKey::indexed(role, i));
                StepParts {
                    position: parse_index(markup.data(ElementKey::indexed(STEP, i), "lifecycle-step").as_deref()),
                    circle: has(CIRCLE),
                    title: has(TITLE),
                    desc: has(DESC),
                    glyphs: has(CHECK) && has(ACTIVE_DOT) && has(INACTIVE_DOT),
                }
            })
            .collect();
        let has_desktop = markup.exists(PROGRESS_DESKTOP);
        let has_mobile = markup.exists(PROGRESS_MOBILE);
        if steps.is_empty() && !has_desktop && !has_mobile {
            return None;
        }
        Some(Self {
            steps,
            has_desktop,
            has_mobile,
            active: 0,
            interval: DEFAULT_INTERVAL,
        })
    }

    /// Interval between advances.
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Active step.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Progress percentage for the active step.
    #[must_use]
    pub fn progress_pct(&self) -> f64 {
        self.active as f64 / (STEP_COUNT - 1) as f64 * 100.0
    }

    fn render_step(&self, frame: &mut Frame, i: u32, step: StepParts) {
        let active = step.position == self.active;
        let past = step.position < self.active;

        if step.circle {
            let state: &[&'static str] = if active {
                &["bg-primary", GLOW, "scale-110"]
            } else if past {
                &["bg-primary"]
            } else {
                &["bg-white", "border-2", "border-pastel-orange"]
            };
            frame.set_classes(ElementKey::indexed(CIRCLE, i), state, CIRCLE_STATE);
        }
        if step.title {
            frame.switch_classes(ElementKey::indexed(TITLE, i), active, &["text-primary"], &["text-navy"]);
        }
        if step.desc {
            frame.switch_classes(ElementKey::indexed(DESC, i), active, &["text-navy"], &["text-gray-400"]);
        }
        if step.glyphs {
            frame.toggle_class(ElementKey::indexed(CHECK, i), "hidden", !past);
            frame.toggle_class(ElementKey::indexed(ACTIVE_DOT, i), "hidden", !active);
            frame.toggle_class(ElementKey::indexed(INACTIVE_DOT, i), "hidden", active || past);
        }
    }
}

impl Model for Stepper {
    type Message = StepperMsg;

    fn on_event(&self, _event: &Event) -> Option<StepperMsg> {
        None
    }

    fn update(&mut self, msg: StepperMsg) -> Cmd<StepperMsg> {
        match msg {
            StepperMsg::Advance => {
                self.active = cyclic::next(self.active, STEP_COUNT).unwrap_or(0);
                vitrine_core::trace!(active = self.active, "lifecycle step");
            }
        }
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        for (i, step) in (0u32..).zip(&self.steps) {
            self.render_step(frame, i, *step);
        }
        let pct = self.progress_pct();
        if self.has_desktop {
            frame.set_style(PROGRESS_DESKTOP, "width", format!("{}%", to_display(pct * DESKTOP_TRACK_SCALE)));
        }
        if self.has_mobile {
            frame.set_style(PROGRESS_MOBILE, "height", format!("{}%", to_display(pct)));
        }
    }

    fn subscriptions(&self) -> Vec<Every<StepperMsg>> {
        vec![Every::new(self.interval, || StepperMsg::Advance)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vitrine_core::markup::StaticMarkup;
    use vitrine_render::VirtualPage;
    use vitrine_runtime::ProgramSimulator;

    const ROLES: [&str; 6] = [CIRCLE, TITLE, DESC, CHECK, ACTIVE_DOT, INACTIVE_DOT];

    fn markup() -> StaticMarkup {
        let mut m = StaticMarkup::new().with(PROGRESS_DESKTOP).with(PROGRESS_MOBILE);
        for i in 0..4u32 {
            m = m.with_data(ElementKey::indexed(STEP, i), "lifecycle-step", &i.to_string());
            for role in ROLES {
                m = m.with(ElementKey::indexed(role, i));
            }
        }
        m
    }

    fn page() -> VirtualPage {
        let mut page = VirtualPage::new().with(PROGRESS_DESKTOP, &[]).with(PROGRESS_MOBILE, &[]);
        for i in 0..4u32 {
            page.declare(ElementKey::indexed(CIRCLE, i), &["rounded-full", "border-2", "border-pastel-orange", "bg-white"]);
            for role in &ROLES[1..] {
                page.declare(ElementKey::indexed(*role, i), &[]);
            }
        }
        page
    }

    fn sim() -> ProgramSimulator<Stepper> {
        let mut sim = ProgramSimulator::new(Stepper::from_markup(&markup()).unwrap(), page());
        sim.init();
        sim
    }

    fn classes(sim: &ProgramSimulator<Stepper>, key: ElementKey) -> Vec<String> {
        sim.page().element(key).unwrap().classes.iter().cloned().collect()
    }

    #[test]
    fn advances_every_interval_and_wraps() {
        let mut sim = sim();
        for k in 1..=9usize {
            sim.advance(DEFAULT_INTERVAL);
            assert_eq!(sim.model().active(), k % 4);
        }
    }

    #[test]
    fn long_gap_fires_every_missed_tick() {
        let mut sim = sim();
        sim.advance(DEFAULT_INTERVAL * 6);
        assert_eq!(sim.model().active(), 2);
    }

    #[test]
    fn progress_at_last_step() {
        let mut sim = sim();
        assert_eq!(sim.page().style(PROGRESS_DESKTOP, "width"), Some("0%"));
        assert_eq!(sim.page().style(PROGRESS_MOBILE, "height"), Some("0%"));
        sim.advance(DEFAULT_INTERVAL * 3);
        assert_eq!(sim.page().style(PROGRESS_DESKTOP, "width"), Some("75%"));
        assert_eq!(sim.page().style(PROGRESS_MOBILE, "height"), Some("100%"));
    }

    #[test]
    fn progress_at_first_intermediate_step() {
        let mut sim = sim();
        sim.advance(DEFAULT_INTERVAL);
        assert_eq!(sim.page().style(PROGRESS_DESKTOP, "width"), Some("24.999999999999996%"));
        assert_eq!(sim.page().style(PROGRESS_MOBILE, "height"), Some("33.33333333333333%"));
    }

    #[test]
    fn step_roles_follow_active_index() {
        let mut sim = sim();
        sim.advance(DEFAULT_INTERVAL * 2);

        assert_eq!(
            classes(&sim, ElementKey::indexed(CIRCLE, 0)),
            vec!["bg-primary", "rounded-full"]
        );
        assert_eq!(
            classes(&sim, ElementKey::indexed(CIRCLE, 2)),
            vec!["bg-primary", "rounded-full", "scale-110", GLOW]
        );
        assert_eq!(
            classes(&sim, ElementKey::indexed(CIRCLE, 3)),
            vec!["bg-white", "border-2", "border-pastel-orange", "rounded-full"]
        );

        assert!(sim.page().has_class(ElementKey::indexed(TITLE, 2), "text-primary"));
        assert!(sim.page().has_class(ElementKey::indexed(TITLE, 0), "text-navy"));
        assert!(sim.page().has_class(ElementKey::indexed(DESC, 2), "text-navy"));
        assert!(sim.page().has_class(ElementKey::indexed(DESC, 3), "text-gray-400"));

        assert!(!sim.page().has_class(ElementKey::indexed(CHECK, 0), "hidden"));
        assert!(sim.page().has_class(ElementKey::indexed(ACTIVE_DOT, 0), "hidden"));
        assert!(sim.page().has_class(ElementKey::indexed(INACTIVE_DOT, 0), "hidden"));
        assert!(!sim.page().has_class(ElementKey::indexed(ACTIVE_DOT, 2), "hidden"));
        assert!(!sim.page().has_class(ElementKey::indexed(INACTIVE_DOT, 3), "hidden"));
    }

    #[test]
    fn glyphs_need_all_three_slots() {
        let m = StaticMarkup::new()
            .with_data(ElementKey::indexed(STEP, 0), "lifecycle-step", "1")
            .with(ElementKey::indexed(CHECK, 0))
            .with(ElementKey::indexed(ACTIVE_DOT, 0));
        let page = VirtualPage::new().with(ElementKey::indexed(CHECK, 0), &[]);
        let mut sim = ProgramSimulator::new(Stepper::from_markup(&m).unwrap(), page);
        sim.init();
        assert!(!sim.page().has_class(ElementKey::indexed(CHECK, 0), "hidden"));
    }

    #[test]
    fn unparsable_step_index_counts_as_first() {
        let m = StaticMarkup::new().with_data(ElementKey::indexed(STEP, 0), "lifecycle-step", "x");
        let page = VirtualPage::new().with(ElementKey::indexed(TITLE, 0), &[]);
        let m = m.with(ElementKey::indexed(TITLE, 0));
        let mut sim = ProgramSimulator::new(Stepper::from_markup(&m).unwrap(), page);
        sim.init();
        assert!(sim.page().has_class(ElementKey::indexed(TITLE, 0), "text-primary"));
    }
}
