#![forbid(unsafe_code)]

//! Click-driven mobile menu.
//!
//! The toggle button flips the menu between open and closed. While open, a
//! pointer press anywhere outside both the menu and its toggle closes it.
//! Every render mirrors the state in the panel classes, the toggle icon glyph
//! (`close` while open, `menu` while closed) and the toggle's
//! `aria-expanded` attribute.

use vitrine_core::markup::MarkupSource;
use vitrine_core::{ElementKey, Event};
use vitrine_render::Frame;
use vitrine_runtime::{Cmd, Model};

/// Toggle button.
pub const TOGGLE: ElementKey = ElementKey::new("mobile-toggle");
/// Glyph inside the toggle button.
pub const TOGGLE_ICON: ElementKey = ElementKey::new("mobile-toggle-icon");
/// Menu panel.
pub const MENU: ElementKey = ElementKey::new("mobile-menu");

const OPEN: &[&str] = &["translate-y-4", "opacity-100", "scale-100"];
const CLOSED: &[&str] = &["translate-y-0", "opacity-0", "scale-95", "pointer-events-none"];

/// Messages for [`ToggleMenu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleMsg {
    /// Toggle button clicked.
    Toggle,
    /// Pointer pressed outside the menu and toggle while open.
    Dismiss,
}

/// Toggle disclosure controller.
#[derive(Debug, Clone, Default)]
pub struct ToggleMenu {
    open: bool,
}

impl ToggleMenu {
    /// Build from markup. Requires toggle, icon and panel.
    pub fn from_markup(markup: &impl MarkupSource) -> Option<Self> {
        (markup.exists(TOGGLE) && markup.exists(TOGGLE_ICON) && markup.exists(MENU))
            .then(Self::default)
    }

    /// Whether the menu is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Model for ToggleMenu {
    type Message = ToggleMsg;

    fn on_event(&self, event: &Event) -> Option<ToggleMsg> {
        match event {
            Event::Click(k) if *k == TOGGLE || *k == TOGGLE_ICON => Some(ToggleMsg::Toggle),
            Event::PointerDown { .. } if self.open => match event.pointer_down_within(&[MENU, TOGGLE]) {
                Some(false) => Some(ToggleMsg::Dismiss),
                _ => None,
            },
            _ => None,
        }
    }

    fn update(&mut self, msg: ToggleMsg) -> Cmd<ToggleMsg> {
        match msg {
            ToggleMsg::Toggle => self.open = !self.open,
            ToggleMsg::Dismiss => self.open = false,
        }
        vitrine_core::debug!(open = self.open, "mobile menu");
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        frame.switch_classes(MENU, self.open, OPEN, CLOSED);
        frame.set_text(TOGGLE_ICON, if self.open { "close" } else { "menu" });
        frame.set_attr(TOGGLE, "aria-expanded", if self.open { "true" } else { "false" });
    }
}
