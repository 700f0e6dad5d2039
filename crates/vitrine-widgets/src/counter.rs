#![forbid(unsafe_code)]

//! Count-up statistics that animate once, when first seen.
//!
//! Each counter element declares its final display in `data-counter-value`,
//! e.g. `"98%"`, `"$2.5B"` or `"150+"`. [`CounterSpec::parse`] splits that
//! into a prefix, a number and a suffix; the number keeps as many decimals as
//! the source wrote.
//!
//! The whole group animates together: when the stats region first becomes
//! sufficiently visible (or immediately, if the host cannot observe
//! visibility) a frame timer runs for a fixed number of frames, easing every
//! counter from zero to its target with a quartic ease-out. The last frame
//! shows the target exactly. Observation stops after the first trigger, so
//! the animation never repeats.

use std::time::Duration;

use vitrine_core::animation::{FrameTween, ease_out_quart, frame_period, frames_for};
use vitrine_core::markup::MarkupSource;
use vitrine_core::number::to_fixed;
use vitrine_core::{ElementKey, Event};
use vitrine_render::Frame;
use vitrine_runtime::{Cmd, Every, Model};

/// Region whose visibility starts the animation.
pub const STATS: ElementKey = ElementKey::new("impact-stats");
/// Counter role (indexed, carries `data-counter-value`).
pub const COUNTER: &str = "counter";

/// Default animation length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);
/// Default frame rate.
pub const DEFAULT_FPS: u32 = 60;
/// Default visible fraction that starts the animation.
pub const DEFAULT_THRESHOLD: f64 = 0.2;

/// Parsed `data-counter-value`.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSpec {
    /// Text before the number.
    pub prefix: String,
    /// Final value.
    pub target: f64,
    /// Fractional digits to display.
    pub decimals: usize,
    /// Text after the number.
    pub suffix: String,
}

fn is_numeric(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

impl CounterSpec {
    /// Parse `<prefix><number><suffix>`.
    ///
    /// The prefix and suffix contain no digits or dots; the number is digits
    /// with at most one dot. Anything else (no number, two numeric runs, two
    /// dots, a lone dot) yields a zero target with the whole source as suffix.
    ///
    /// ```
    /// use vitrine_widgets::CounterSpec;
    ///
    /// let spec = CounterSpec::parse("$2.50B");
    /// assert_eq!((spec.prefix.as_str(), spec.target, spec.decimals, spec.suffix.as_str()), ("$", 2.5, 2, "B"));
    ///
    /// let spec = CounterSpec::parse("N/A");
    /// assert_eq!((spec.target, spec.suffix.as_str()), (0.0, "N/A"));
    /// ```
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let start = source.find(is_numeric).unwrap_or(source.len());
        let end = source[start..]
            .find(|c: char| !is_numeric(c))
            .map_or(source.len(), |i| start + i);
        let (prefix, number, suffix) = (&source[..start], &source[start..end], &source[end..]);

        let well_formed = !number.is_empty()
            && !suffix.contains(is_numeric)
            && number.matches('.').count() <= 1
            && number.bytes().any(|b| b.is_ascii_digit());
        let target = number.parse::<f64>().ok().filter(|_| well_formed);
        let Some(target) = target else {
            return Self::literal(source);
        };

        Self {
            prefix: prefix.to_owned(),
            target,
            decimals: number.split_once('.').map_or(0, |(_, frac)| frac.len()),
            suffix: suffix.to_owned(),
        }
    }

    /// Spec that displays `text` after a zero.
    #[must_use]
    pub fn literal(text: &str) -> Self {
        Self {
            prefix: String::new(),
            target: 0.0,
            decimals: 0,
            suffix: text.to_owned(),
        }
    }

    /// Display text for `value`.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        format!("{}{}{}", self.prefix, to_fixed(value, self.decimals), self.suffix)
    }
}

/// Animation phase of the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterPhase {
    /// Waiting for the trigger.
    #[default]
    Idle,
    /// Frame timer running.
    Running,
    /// Final values shown.
    Done,
}

/// Messages for [`CounterGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMsg {
    /// The stats region became visible.
    Visible,
    /// Start without waiting for visibility.
    Start,
    /// One animation frame elapsed.
    Frame,
}

/// Visibility-triggered counter animator.
#[derive(Debug, Clone)]
pub struct CounterGroup {
    specs: Vec<CounterSpec>,
    observe_stats: bool,
    threshold: f64,
    fps: u32,
    tween: FrameTween,
    phase: CounterPhase,
}

impl CounterGroup {
    /// Build from markup. Requires the stats region or at least one counter.
    pub fn from_markup(markup: &impl MarkupSource) -> Option<Self> {
        let specs: Vec<CounterSpec> = (0..markup.count(COUNTER))
            .map(|i| {
                let source = markup
                    .data(ElementKey::indexed(COUNTER, i), "counter-value")
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| "0".to_owned());
                CounterSpec::parse(&source)
            })
            .collect();
        let observe_stats = markup.exists(STATS);
        if specs.is_empty() && !observe_stats {
            return None;
        }
        Some(Self {
            specs,
            observe_stats,
            threshold: DEFAULT_THRESHOLD,
            fps: DEFAULT_FPS,
            tween: FrameTween::new(frames_for(DEFAULT_DURATION, DEFAULT_FPS)).easing(ease_out_quart),
            phase: CounterPhase::Idle,
        })
    }

    /// Animation length and frame rate.
    #[must_use]
    pub fn timing(mut self, duration: Duration, fps: u32) -> Self {
        self.fps = fps.max(1);
        self.tween = FrameTween::new(frames_for(duration, self.fps)).easing(ease_out_quart);
        self
    }

    /// Visible fraction of the stats region that starts the animation.
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Parsed counters in document order.
    #[must_use]
    pub fn specs(&self) -> &[CounterSpec] {
        &self.specs
    }

    /// Animation phase.
    #[must_use]
    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    /// Frames stepped so far.
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.tween.frame()
    }

    fn start(&mut self) {
        if self.phase == CounterPhase::Idle {
            vitrine_core::debug!(counters = self.specs.len(), frames = self.tween.total_frames(), "counters started");
            self.phase = CounterPhase::Running;
        }
    }
}

impl Model for CounterGroup {
    type Message = CounterMsg;

    fn init(&mut self) -> Cmd<CounterMsg> {
        if self.observe_stats {
            Cmd::observe(STATS, self.threshold, CounterMsg::Start)
        } else {
            Cmd::msg(CounterMsg::Start)
        }
    }

    fn on_event(&self, event: &Event) -> Option<CounterMsg> {
        match event {
            Event::Intersection {
                target,
                intersecting: true,
                ..
            } if *target == STATS && self.phase == CounterPhase::Idle => Some(CounterMsg::Visible),
            _ => None,
        }
    }

    fn update(&mut self, msg: CounterMsg) -> Cmd<CounterMsg> {
        match msg {
            CounterMsg::Visible => {
                self.start();
                Cmd::unobserve(STATS)
            }
            CounterMsg::Start => {
                self.start();
                Cmd::none()
            }
            CounterMsg::Frame => {
                if self.phase == CounterPhase::Running && self.tween.advance() {
                    self.phase = CounterPhase::Done;
                }
                Cmd::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        if !self.tween.has_started() {
            return;
        }
        for (i, spec) in (0u32..).zip(&self.specs) {
            let value = self.tween.interpolate(spec.target);
            frame.set_text(ElementKey::indexed(COUNTER, i), spec.format(value));
        }
    }

    fn subscriptions(&self) -> Vec<Every<CounterMsg>> {
        if self.phase == CounterPhase::Running {
            vec![Every::new(frame_period(self.fps), || CounterMsg::Frame)]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vitrine_core::markup::StaticMarkup;
    use vitrine_render::VirtualPage;
    use vitrine_runtime::{HeadlessBackend, ProgramSimulator};

    fn spec(prefix: &str, target: f64, decimals: usize, suffix: &str) -> CounterSpec {
        CounterSpec {
            prefix: prefix.to_owned(),
            target,
            decimals,
            suffix: suffix.to_owned(),
        }
    }

    #[test]
    fn parse_plain_and_affixed() {
        assert_eq!(CounterSpec::parse("150"), spec("", 150.0, 0, ""));
        assert_eq!(CounterSpec::parse("98%"), spec("", 98.0, 0, "%"));
        assert_eq!(CounterSpec::parse("$234.50 Cr"), spec("$", 234.5, 2, " Cr"));
        assert_eq!(CounterSpec::parse("₹ 12.5K+"), spec("₹ ", 12.5, 1, "K+"));
    }

    #[test]
    fn parse_trailing_dot_has_no_decimals() {
        assert_eq!(CounterSpec::parse("12."), spec("", 12.0, 0, ""));
        assert_eq!(CounterSpec::parse(".5x"), spec("", 0.5, 1, "x"));
    }

    #[test]
    fn parse_malformed_falls_back_to_literal() {
        assert_eq!(CounterSpec::parse("N/A"), spec("", 0.0, 0, "N/A"));
        assert_eq!(CounterSpec::parse("$1,234.50 Cr"), spec("", 0.0, 0, "$1,234.50 Cr"));
        assert_eq!(CounterSpec::parse("1.2.3"), spec("", 0.0, 0, "1.2.3"));
        assert_eq!(CounterSpec::parse("v."), spec("", 0.0, 0, "v."));
        assert_eq!(CounterSpec::parse(""), spec("", 0.0, 0, ""));
    }

    #[test]
    fn format_uses_fixed_decimals() {
        let s = spec("$", 2.5, 2, "B");
        assert_eq!(s.format(2.5), "$2.50B");
        assert_eq!(s.format(1.005), "$1.00B");
        assert_eq!(CounterSpec::parse("N/A").format(0.0), "0N/A");
    }

    fn markup(values: &[&str], stats: bool) -> StaticMarkup {
        let mut m = StaticMarkup::new();
        for (i, v) in (0u32..).zip(values) {
            m = m.with_data(ElementKey::indexed(COUNTER, i), "counter-value", v);
        }
        if stats { m.with(STATS) } else { m }
    }

    fn page(n: u32) -> VirtualPage {
        let mut page = VirtualPage::new().with(STATS, &[]);
        for i in 0..n {
            page.declare(ElementKey::indexed(COUNTER, i), &[]);
        }
        page
    }

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn missing_value_counts_to_zero() {
        let m = StaticMarkup::new().with(ElementKey::indexed(COUNTER, 0));
        let group = CounterGroup::from_markup(&m).unwrap();
        assert_eq!(group.specs(), &[spec("", 0.0, 0, "")]);
    }

    #[test]
    fn nothing_to_animate_builds_nothing() {
        assert!(CounterGroup::from_markup(&StaticMarkup::new()).is_none());
    }

    #[test]
    fn waits_for_visibility_then_lands_exactly() {
        let group = CounterGroup::from_markup(&markup(&["100", "4.5K"], true)).unwrap();
        let mut sim = ProgramSimulator::new(group, page(2));
        sim.init();
        assert_eq!(sim.backend().observed(STATS), Some(0.2));
        sim.run_frames(Duration::from_millis(500), FRAME);
        assert_eq!(sim.model().phase(), CounterPhase::Idle);
        assert_eq!(sim.page().text(ElementKey::indexed(COUNTER, 0)), None);

        sim.inject(Event::Intersection {
            target: STATS,
            ratio: 0.3,
            intersecting: true,
        });
        assert_eq!(sim.backend().observed(STATS), None);
        assert_eq!(sim.model().phase(), CounterPhase::Running);

        sim.run_frames(Duration::from_millis(1000), FRAME);
        let midway = sim.page().text(ElementKey::indexed(COUNTER, 0)).unwrap().to_owned();
        assert_ne!(midway, "100");

        sim.run_frames(Duration::from_millis(1500), FRAME);
        assert_eq!(sim.model().phase(), CounterPhase::Done);
        assert_eq!(sim.model().frame(), 120);
        assert_eq!(sim.page().text(ElementKey::indexed(COUNTER, 0)), Some("100"));
        assert_eq!(sim.page().text(ElementKey::indexed(COUNTER, 1)), Some("4.5K"));
        assert_eq!(sim.program().active_subscriptions(), 0);
    }

    #[test]
    fn displayed_values_never_decrease() {
        let group = CounterGroup::from_markup(&markup(&["100"], false)).unwrap();
        let mut sim = ProgramSimulator::new(group, page(1));
        sim.init();
        let mut last = 0u32;
        for _ in 0..130 {
            sim.advance(Duration::from_nanos(16_666_667));
            if let Some(text) = sim.page().text(ElementKey::indexed(COUNTER, 0)) {
                let v: u32 = text.parse().unwrap();
                assert!(v >= last);
                last = v;
            }
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn without_observer_starts_immediately() {
        let group = CounterGroup::from_markup(&markup(&["7"], true)).unwrap();
        let backend = HeadlessBackend::new(page(1)).with_intersection(false);
        let mut sim = ProgramSimulator::with_backend(group, backend);
        sim.init();
        assert_eq!(sim.model().phase(), CounterPhase::Running);
        sim.run_frames(Duration::from_millis(2100), FRAME);
        assert_eq!(sim.page().text(ElementKey::indexed(COUNTER, 0)), Some("7"));
    }

    #[test]
    fn second_visibility_does_not_restart() {
        let group = CounterGroup::from_markup(&markup(&["10"], true)).unwrap();
        let mut sim = ProgramSimulator::new(group, page(1));
        sim.init();
        let visible = Event::Intersection {
            target: STATS,
            ratio: 1.0,
            intersecting: true,
        };
        sim.inject(visible.clone());
        sim.run_frames(Duration::from_millis(2100), FRAME);
        assert_eq!(sim.model().phase(), CounterPhase::Done);
        sim.inject(visible);
        assert_eq!(sim.model().phase(), CounterPhase::Done);
        assert_eq!(sim.program().active_subscriptions(), 0);
    }
}
