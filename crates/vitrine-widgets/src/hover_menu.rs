#![forbid(unsafe_code)]

//! Dropdown that opens on hover or focus and closes after a short delay.
//!
//! # State machine
//!
//! ```text
//!            enter / focus-in              leave / focus-out
//!  Closed ─────────────────────▶ Open ─────────────────────▶ ClosingPending
//!    ▲                            ▲                                │
//!    │                            └──────── enter / focus-in ──────┤
//!    └──────────────────── close delay elapsed ────────────────────┘
//! ```
//!
//! The close delay runs on a single keyed timer: leaving again re-arms it and
//! entering cancels it, so at most one close is ever pending and a brief
//! excursion outside the menu never closes it.

use std::time::Duration;

use vitrine_core::markup::MarkupSource;
use vitrine_core::{ElementKey, Event};
use vitrine_render::Frame;
use vitrine_runtime::{Cmd, Model, TimerId};

/// Menu trigger region (pointer and focus events).
pub const MENU: ElementKey = ElementKey::new("desktop-menu");
/// Dropdown panel.
pub const PANEL: ElementKey = ElementKey::new("desktop-menu-panel");

/// Default delay between leaving the menu and closing it.
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(150);

const CLOSE_TIMER: TimerId = TimerId::new(1);

const OPEN: &[&str] = &["opacity-100", "scale-100", "translate-y-0", "visible"];
const CLOSED: &[&str] = &["opacity-0", "scale-95", "-translate-y-4", "invisible"];

/// Disclosure state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    /// Panel hidden.
    #[default]
    Closed,
    /// Panel shown.
    Open,
    /// Panel shown, close timer armed.
    ClosingPending,
}

/// Messages for [`HoverMenu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverMsg {
    /// Pointer entered or focus moved into the menu.
    Enter,
    /// Pointer left or focus moved out of the menu.
    Leave,
    /// The close delay elapsed.
    CloseElapsed,
}

/// Hover-intent disclosure controller.
#[derive(Debug, Clone)]
pub struct HoverMenu {
    state: MenuState,
    close_delay: Duration,
}

impl HoverMenu {
    /// Build from markup. Requires the trigger region and the panel.
    pub fn from_markup(markup: &impl MarkupSource) -> Option<Self> {
        (markup.exists(MENU) && markup.exists(PANEL)).then(|| Self {
            state: MenuState::Closed,
            close_delay: DEFAULT_CLOSE_DELAY,
        })
    }

    /// Delay between leaving and closing.
    #[must_use]
    pub fn close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Whether the panel is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != MenuState::Closed
    }
}

impl Model for HoverMenu {
    type Message = HoverMsg;

    fn on_event(&self, event: &Event) -> Option<HoverMsg> {
        match event {
            Event::PointerEnter(k) | Event::FocusIn(k) if *k == MENU => Some(HoverMsg::Enter),
            Event::PointerLeave(k) | Event::FocusOut(k) if *k == MENU => Some(HoverMsg::Leave),
            _ => None,
        }
    }

    fn update(&mut self, msg: HoverMsg) -> Cmd<HoverMsg> {
        match (msg, self.state) {
            (HoverMsg::Enter, _) => {
                self.state = MenuState::Open;
                Cmd::cancel(CLOSE_TIMER)
            }
            (HoverMsg::Leave, MenuState::Closed) => Cmd::none(),
            (HoverMsg::Leave, _) => {
                self.state = MenuState::ClosingPending;
                Cmd::after(CLOSE_TIMER, self.close_delay, HoverMsg::CloseElapsed)
            }
            (HoverMsg::CloseElapsed, MenuState::ClosingPending) => {
                vitrine_core::trace!("desktop menu closed");
                self.state = MenuState::Closed;
                Cmd::none()
            }
            (HoverMsg::CloseElapsed, _) => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        frame.switch_classes(PANEL, self.is_open(), OPEN, CLOSED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::markup::StaticMarkup;
    use vitrine_render::VirtualPage;
    use vitrine_runtime::ProgramSimulator;

    const MS: fn(u64) -> Duration = Duration::from_millis;

    fn sim() -> ProgramSimulator<HoverMenu> {
        let markup = StaticMarkup::new().with(MENU).with(PANEL);
        let page = VirtualPage::new()
            .with(MENU, &[])
            .with(PANEL, &["absolute", "opacity-0", "scale-95", "-translate-y-4", "invisible"]);
        let mut sim = ProgramSimulator::new(HoverMenu::from_markup(&markup).unwrap(), page);
        sim.init();
        sim
    }

    #[test]
    fn requires_panel() {
        assert!(HoverMenu::from_markup(&StaticMarkup::new().with(MENU)).is_none());
    }

    #[test]
    fn enter_opens_immediately() {
        let mut sim = sim();
        sim.inject(Event::PointerEnter(MENU));
        assert_eq!(sim.model().state(), MenuState::Open);
        assert!(sim.page().has_class(PANEL, "visible"));
        assert!(!sim.page().has_class(PANEL, "invisible"));
        assert!(sim.page().has_class(PANEL, "absolute"));
    }

    #[test]
    fn leave_closes_after_delay() {
        let mut sim = sim();
        sim.inject(Event::PointerEnter(MENU));
        sim.inject(Event::PointerLeave(MENU));
        assert_eq!(sim.model().state(), MenuState::ClosingPending);
        sim.advance(MS(149));
        assert!(sim.page().has_class(PANEL, "opacity-100"));
        sim.advance(MS(1));
        assert_eq!(sim.model().state(), MenuState::Closed);
        assert!(sim.page().has_class(PANEL, "opacity-0"));
    }

    #[test]
    fn reentry_cancels_pending_close() {
        let mut sim = sim();
        sim.inject(Event::PointerEnter(MENU));
        sim.inject(Event::PointerLeave(MENU));
        sim.advance(MS(100));
        let r = sim.inject(Event::PointerEnter(MENU));
        assert_eq!(r.patches_applied, 0);
        assert_eq!(sim.program().pending_timers(), 0);
        sim.advance(MS(500));
        assert!(sim.model().is_open());
    }

    #[test]
    fn repeated_leaves_keep_one_timer() {
        let mut sim = sim();
        sim.inject(Event::FocusIn(MENU));
        sim.inject(Event::FocusOut(MENU));
        sim.advance(MS(100));
        sim.inject(Event::PointerLeave(MENU));
        assert_eq!(sim.program().pending_timers(), 1);
        sim.advance(MS(100));
        assert!(sim.model().is_open());
        sim.advance(MS(50));
        assert!(!sim.model().is_open());
    }

    #[test]
    fn leave_while_closed_is_ignored() {
        let mut sim = sim();
        sim.inject(Event::PointerLeave(MENU));
        assert_eq!(sim.program().pending_timers(), 0);
        assert_eq!(sim.model().state(), MenuState::Closed);
    }

    #[test]
    fn other_elements_are_ignored() {
        let mut sim = sim();
        sim.inject(Event::PointerEnter(PANEL));
        assert!(!sim.model().is_open());
    }
}
