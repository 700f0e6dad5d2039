#![forbid(unsafe_code)]

//! Collaborator showcase: category tabs, a logo grid and a scrollable tab
//! strip with edge arrows.
//!
//! Selecting a tab swaps the title and description, rebuilds the tab strip
//! with the selected tab highlighted, and rebuilds the logo grid. The grid
//! always shows the same logos, rotated left by `active % 3` for variety,
//! followed by an "And Others" card.
//!
//! The arrows track the strip's real scroll position: the left arrow shows
//! while content is hidden past the leading edge, the right arrow while
//! content is hidden past the trailing edge (both with a small slack). They
//! are recomputed from measured geometry a short settle delay after each
//! render, whenever the strip scrolls, and on window resize. Clicking an
//! arrow smooth-scrolls the strip by a fraction of its visible width.

use std::time::Duration;

use vitrine_core::markup::MarkupSource;
use vitrine_core::{ElementKey, Event, ScrollMetrics};
use vitrine_render::{Frame, Node};
use vitrine_runtime::{Cmd, Model, TimerId};

use crate::catalog::{CATEGORIES, DESCRIPTIONS, LOGOS, Logo};
use crate::cyclic;

/// Scrollable tab strip (rebuilt on every selection).
pub const STRIP: ElementKey = ElementKey::new("collab-tabs");
/// Category title.
pub const TITLE: ElementKey = ElementKey::new("collab-title");
/// Category description.
pub const DESC: ElementKey = ElementKey::new("collab-desc");
/// Logo grid.
pub const LOGO_GRID: ElementKey = ElementKey::new("collab-logos");
/// Left scroll arrow.
pub const LEFT: ElementKey = ElementKey::new("collab-left");
/// Right scroll arrow.
pub const RIGHT: ElementKey = ElementKey::new("collab-right");
/// Tab button role (indexed by category).
pub const TAB: &str = "collab-tab";

/// Logo rotation window: the grid starts at logo `active % ROTATION_WINDOW`.
pub const ROTATION_WINDOW: usize = 3;
/// Default delay between a render and the arrow measurement.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(50);
/// Default edge slack, in pixels, before an arrow shows.
pub const DEFAULT_SLACK: f64 = 10.0;
/// Default share of the visible strip width one arrow click scrolls.
pub const DEFAULT_SCROLL_FRACTION: f64 = 0.7;

const SETTLE_TIMER: TimerId = TimerId::new(1);

const TAB_BASE: &str = "py-3.5 rounded-full text-xs md:text-sm lg:text-base font-bold transition-all duration-300 border flex-shrink-0 snap-center w-[210px] md:w-auto md:px-8";
const TAB_ACTIVE: &str = "bg-navy text-white border-navy shadow-lg shadow-navy/20 translate-y-[-2px]";
const TAB_INACTIVE: &str = "bg-white text-navy border-navy/20 hover:border-navy/50 hover:bg-navy/5";

const CARD: &str = "group h-24 flex flex-col items-center justify-center p-4 transition-all duration-500 cursor-pointer hover:-translate-y-2 bg-white rounded-2xl hover:bg-pastel-navy/20";
const CAPTION: &str = "text-[9px] md:text-[10px] font-bold uppercase tracking-widest text-navy/30 group-hover:text-primary transition-colors";

const ARROW_SHOWN: &[&str] = &[
    "border-navy",
    "text-navy",
    "hover:bg-navy",
    "hover:text-white",
    "cursor-pointer",
    "shadow-md",
];
const ARROW_HIDDEN: &[&str] = &[
    "border-gray-100",
    "text-gray-200",
    "cursor-not-allowed",
    "opacity-0",
    "invisible",
];

/// Arrow visibility derived from strip geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrows {
    /// Content hidden past the leading edge.
    pub left: bool,
    /// Content hidden past the trailing edge.
    pub right: bool,
}

impl Arrows {
    /// Arrow visibility for `metrics` with `slack` pixels of tolerance.
    #[must_use]
    pub fn from_metrics(metrics: &ScrollMetrics, slack: f64) -> Self {
        Self {
            left: metrics.overflows_start(slack),
            right: metrics.overflows_end(slack),
        }
    }
}

/// Messages for [`Showcase`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowcaseMsg {
    /// A category tab was clicked.
    Select(usize),
    /// The settle delay after a render elapsed.
    Settled,
    /// Strip geometry read back.
    Measured(Option<ScrollMetrics>),
    /// The strip scrolled.
    StripScrolled(ScrollMetrics),
    /// The window was resized.
    Resized,
    /// Left arrow clicked.
    NudgeLeft,
    /// Right arrow clicked.
    NudgeRight,
    /// Strip geometry read back for an arrow click: direction (`-1.0` left,
    /// `1.0` right) and the metrics, `None` if the strip could not be measured.
    NudgeMeasured(f64, Option<ScrollMetrics>),
}

fn nudge_left_measured(metrics: Option<ScrollMetrics>) -> ShowcaseMsg {
    ShowcaseMsg::NudgeMeasured(-1.0, metrics)
}

fn nudge_right_measured(metrics: Option<ScrollMetrics>) -> ShowcaseMsg {
    ShowcaseMsg::NudgeMeasured(1.0, metrics)
}

/// Tabbed carousel with scroll affordances.
#[derive(Debug, Clone)]
pub struct Showcase {
    active: usize,
    arrows: Option<Arrows>,
    has_strip: bool,
    has_title: bool,
    has_desc: bool,
    has_grid: bool,
    has_left: bool,
    has_right: bool,
    settle: Duration,
    slack: f64,
    scroll_fraction: f64,
}

impl Showcase {
    /// Build from markup. Requires at least one of strip, title, description
    /// or grid.
    pub fn from_markup(markup: &impl MarkupSource) -> Option<Self> {
        let showcase = Self {
            active: 0,
            arrows: None,
            has_strip: markup.exists(STRIP),
            has_title: markup.exists(TITLE),
            has_desc: markup.exists(DESC),
            has_grid: markup.exists(LOGO_GRID),
            has_left: markup.exists(LEFT),
            has_right: markup.exists(RIGHT),
            settle: DEFAULT_SETTLE,
            slack: DEFAULT_SLACK,
            scroll_fraction: DEFAULT_SCROLL_FRACTION,
        };
        (showcase.has_strip || showcase.has_title || showcase.has_desc || showcase.has_grid)
            .then_some(showcase)
    }

    /// Delay between a render and the arrow measurement.
    #[must_use]
    pub fn settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Edge slack before an arrow shows.
    #[must_use]
    pub fn slack(mut self, slack: f64) -> Self {
        self.slack = slack;
        self
    }

    /// Share of the visible strip width one arrow click scrolls.
    #[must_use]
    pub fn scroll_fraction(mut self, fraction: f64) -> Self {
        self.scroll_fraction = fraction;
        self
    }

    /// Selected category.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Last computed arrow visibility.
    #[must_use]
    pub fn arrows(&self) -> Option<Arrows> {
        self.arrows
    }

    /// Logos in display order for the selected category.
    #[must_use]
    pub fn display_logos(&self) -> Vec<Logo> {
        cyclic::rotate_left(&LOGOS, self.active % ROTATION_WINDOW)
    }

    fn arrows_enabled(&self) -> bool {
        self.has_strip && self.has_left && self.has_right
    }

    fn schedule_settle(&self) -> Cmd<ShowcaseMsg> {
        if self.has_strip {
            Cmd::after(SETTLE_TIMER, self.settle, ShowcaseMsg::Settled)
        } else {
            Cmd::none()
        }
    }

    fn recompute_arrows(&mut self, metrics: Option<ScrollMetrics>) {
        if !self.arrows_enabled() {
            return;
        }
        if let Some(m) = metrics {
            self.arrows = Some(Arrows::from_metrics(&m, self.slack));
        }
    }

    fn nudge(&self, metrics: Option<ScrollMetrics>, sign: f64) -> Cmd<ShowcaseMsg> {
        match metrics {
            Some(m) => Cmd::scroll_by(STRIP, sign * m.client_width * self.scroll_fraction, true),
            None => Cmd::none(),
        }
    }

    fn tab_nodes(&self) -> Vec<Node> {
        (0u32..)
            .zip(CATEGORIES)
            .map(|(i, label)| {
                let state = if i as usize == self.active { TAB_ACTIVE } else { TAB_INACTIVE };
                Node::new("button")
                    .key(ElementKey::indexed(TAB, i))
                    .class(format!("{TAB_BASE} {state}"))
                    .text(label)
            })
            .collect()
    }

    fn logo_nodes(&self) -> Vec<Node> {
        let mut cards: Vec<Node> = self
            .display_logos()
            .into_iter()
            .map(|logo| {
                Node::new("div").class(CARD).child(
                    Node::new("div")
                        .class("flex flex-col items-center gap-3")
                        .child(
                            Node::new("img")
                                .attr("src", logo.img)
                                .attr("alt", logo.name)
                                .class("max-h-8 md:max-h-10 w-auto object-contain transition-all duration-300 group-hover:scale-110"),
                        )
                        .child(Node::new("span").class(CAPTION).text(logo.name)),
                )
            })
            .collect();
        cards.push(
            Node::new("div").class(CARD).child(
                Node::new("div")
                    .class("flex flex-col items-center gap-2")
                    .child(
                        Node::new("div")
                            .class("w-10 h-10 flex items-center justify-center text-navy/20 group-hover:text-primary transition-colors")
                            .child(
                                Node::new("span")
                                    .class("material-icons-outlined text-3xl md:text-4xl")
                                    .text("more_horiz"),
                            ),
                    )
                    .child(Node::new("span").class(CAPTION).text("And Others")),
            ),
        );
        cards
    }
}

fn render_arrow(frame: &mut Frame, key: ElementKey, show: bool) {
    frame.set_flag(key, "disabled", !show);
    frame.switch_classes(key, show, ARROW_SHOWN, ARROW_HIDDEN);
}

impl Model for Showcase {
    type Message = ShowcaseMsg;

    fn init(&mut self) -> Cmd<ShowcaseMsg> {
        self.schedule_settle()
    }

    fn on_event(&self, event: &Event) -> Option<ShowcaseMsg> {
        match event {
            Event::Click(k) if k.is_role(TAB) => k
                .index()
                .map(|i| i as usize)
                .filter(|i| *i < CATEGORIES.len())
                .map(ShowcaseMsg::Select),
            Event::Click(k) if *k == LEFT && self.has_strip => Some(ShowcaseMsg::NudgeLeft),
            Event::Click(k) if *k == RIGHT && self.has_strip => Some(ShowcaseMsg::NudgeRight),
            Event::Scroll { target, metrics } if *target == STRIP => {
                Some(ShowcaseMsg::StripScrolled(*metrics))
            }
            Event::Resize { .. } if self.has_strip => Some(ShowcaseMsg::Resized),
            _ => None,
        }
    }

    fn update(&mut self, msg: ShowcaseMsg) -> Cmd<ShowcaseMsg> {
        match msg {
            ShowcaseMsg::Select(i) => {
                vitrine_core::debug!(category = i, "showcase tab selected");
                self.active = i;
                self.schedule_settle()
            }
            ShowcaseMsg::Settled | ShowcaseMsg::Resized => Cmd::measure(STRIP, ShowcaseMsg::Measured),
            ShowcaseMsg::Measured(metrics) => {
                self.recompute_arrows(metrics);
                Cmd::none()
            }
            ShowcaseMsg::StripScrolled(metrics) => {
                self.recompute_arrows(Some(metrics));
                Cmd::none()
            }
            ShowcaseMsg::NudgeLeft => Cmd::measure(STRIP, nudge_left_measured),
            ShowcaseMsg::NudgeRight => Cmd::measure(STRIP, nudge_right_measured),
            ShowcaseMsg::NudgeMeasured(sign, metrics) => self.nudge(metrics, sign),
        }
    }

    fn view(&self, frame: &mut Frame) {
        if self.has_title {
            frame.set_text(TITLE, CATEGORIES[self.active]);
        }
        if self.has_desc {
            frame.set_text(DESC, DESCRIPTIONS[self.active]);
        }
        if self.has_strip {
            frame.replace_children(STRIP, self.tab_nodes());
        }
        if self.has_grid {
            frame.replace_children(LOGO_GRID, self.logo_nodes());
        }
        if let (true, Some(arrows)) = (self.arrows_enabled(), self.arrows) {
            render_arrow(frame, LEFT, arrows.left);
            render_arrow(frame, RIGHT, arrows.right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vitrine_core::markup::StaticMarkup;
    use vitrine_render::VirtualPage;
    use vitrine_runtime::ProgramSimulator;

    const MS: fn(u64) -> Duration = Duration::from_millis;

    fn full_markup() -> StaticMarkup {
        [STRIP, TITLE, DESC, LOGO_GRID, LEFT, RIGHT]
            .into_iter()
            .fold(StaticMarkup::new(), StaticMarkup::with)
    }

    fn full_page() -> VirtualPage {
        let mut page = VirtualPage::new();
        for key in [STRIP, TITLE, DESC, LOGO_GRID, LEFT, RIGHT] {
            page.declare(key, &[]);
        }
        page
    }

    fn sim_with_strip(metrics: ScrollMetrics) -> ProgramSimulator<Showcase> {
        let mut sim = ProgramSimulator::new(Showcase::from_markup(&full_markup()).unwrap(), full_page());
        sim.set_metrics(STRIP, metrics);
        sim.init();
        sim
    }

    fn grid_names(sim: &ProgramSimulator<Showcase>) -> Vec<String> {
        sim.page().children(LOGO_GRID).iter().map(Node::deep_text).collect()
    }

    #[test]
    fn initial_render_shows_first_category() {
        let sim = sim_with_strip(ScrollMetrics::horizontal(0.0, 1200.0, 400.0));
        assert_eq!(sim.page().text(TITLE), Some(CATEGORIES[0]));
        assert_eq!(sim.page().text(DESC), Some(DESCRIPTIONS[0]));
        let tabs = sim.page().children(STRIP);
        assert_eq!(tabs.len(), 5);
        assert!(tabs[0].has_class("bg-navy"));
        assert!(tabs[1].has_class("bg-white"));
        assert_eq!(tabs[3].key_of(), Some(ElementKey::indexed(TAB, 3)));
        assert_eq!(grid_names(&sim).len(), LOGOS.len() + 1);
    }

    #[test]
    fn selecting_rotates_by_index_mod_three() {
        let mut sim = sim_with_strip(ScrollMetrics::horizontal(0.0, 1200.0, 400.0));
        sim.inject(Event::Click(ElementKey::indexed(TAB, 4)));
        assert_eq!(sim.model().active(), 4);
        assert_eq!(sim.page().text(TITLE), Some("Global Clients"));
        let names = grid_names(&sim);
        assert_eq!(names[0], LOGOS[1].name);
        assert_eq!(names[LOGOS.len() - 1], LOGOS[0].name);
        assert_eq!(names[LOGOS.len()], "more_horizAnd Others");
        assert!(sim.page().children(STRIP)[4].has_class("translate-y-[-2px]"));
    }

    #[test]
    fn unknown_tab_index_is_ignored() {
        let sim = sim_with_strip(ScrollMetrics::default());
        assert_eq!(sim.model().on_event(&Event::Click(ElementKey::indexed(TAB, 9))), None);
    }

    #[test]
    fn arrows_wait_for_settle_then_track_geometry() {
        let mut sim = sim_with_strip(ScrollMetrics::horizontal(0.0, 1200.0, 400.0));
        assert_eq!(sim.model().arrows(), None);
        assert_eq!(sim.page().attr(LEFT, "disabled"), None);

        sim.advance(MS(50));
        assert_eq!(sim.model().arrows(), Some(Arrows { left: false, right: true }));
        assert_eq!(sim.page().attr(LEFT, "disabled"), Some(""));
        assert!(sim.page().has_class(LEFT, "invisible"));
        assert_eq!(sim.page().attr(RIGHT, "disabled"), None);
        assert!(sim.page().has_class(RIGHT, "cursor-pointer"));

        sim.inject(Event::Scroll {
            target: STRIP,
            metrics: ScrollMetrics::horizontal(800.0, 1200.0, 400.0),
        });
        assert_eq!(sim.model().arrows(), Some(Arrows { left: true, right: false }));
        assert!(sim.page().has_class(RIGHT, "cursor-not-allowed"));
        assert!(!sim.page().has_class(LEFT, "opacity-0"));
    }

    #[test]
    fn arrow_click_scrolls_seventy_percent() {
        let mut sim = sim_with_strip(ScrollMetrics::horizontal(0.0, 1200.0, 400.0));
        sim.inject(Event::Click(RIGHT));
        sim.inject(Event::Click(LEFT));
        let dxs: Vec<f64> = sim.backend().scrolls().iter().map(|s| s.dx).collect();
        assert_eq!(dxs, vec![280.0, -280.0]);
        assert!(sim.backend().scrolls().iter().all(|s| s.smooth && s.target == STRIP));
    }

    #[test]
    fn arrow_click_without_strip_geometry_is_skipped() {
        let markup = full_markup();
        let page = VirtualPage::new().with(LEFT, &[]).with(RIGHT, &[]);
        let mut sim = ProgramSimulator::new(Showcase::from_markup(&markup).unwrap(), page);
        sim.init();
        let r = sim.inject_all([Event::Click(LEFT), Event::Click(RIGHT)]);
        assert_eq!(r.events_processed, 2);
        assert!(sim.backend().scrolls().is_empty());
        assert_eq!(sim.model().arrows(), None);
    }

    #[test]
    fn resize_remeasures() {
        let mut sim = sim_with_strip(ScrollMetrics::horizontal(0.0, 1200.0, 400.0));
        sim.advance(MS(50));
        sim.set_metrics(STRIP, ScrollMetrics::horizontal(0.0, 1200.0, 1200.0));
        sim.inject(Event::Resize {
            width: 1600,
            height: 900,
        });
        assert_eq!(sim.model().arrows(), Some(Arrows { left: false, right: false }));
    }

    #[test]
    fn arrows_need_strip_and_both_buttons() {
        let markup = StaticMarkup::new().with(STRIP).with(LEFT);
        let page = VirtualPage::new().with(STRIP, &[]).with(LEFT, &[]);
        let mut sim = ProgramSimulator::new(Showcase::from_markup(&markup).unwrap(), page);
        sim.set_metrics(STRIP, ScrollMetrics::horizontal(0.0, 1200.0, 400.0));
        sim.init();
        sim.advance(MS(50));
        assert_eq!(sim.model().arrows(), None);
        assert!(sim.page().element(LEFT).unwrap().classes.is_empty());
    }

    #[test]
    fn reselecting_keeps_tab_strip_untouched() {
        let mut sim = sim_with_strip(ScrollMetrics::horizontal(0.0, 1200.0, 400.0));
        sim.advance(MS(50));
        let r = sim.inject(Event::Click(ElementKey::indexed(TAB, 0)));
        assert_eq!(r.patches_applied, 0);
    }
}
