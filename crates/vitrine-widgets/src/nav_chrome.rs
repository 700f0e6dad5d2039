#![forbid(unsafe_code)]

//! Navigation bar that turns solid once the page scrolls.
//!
//! The bar is either in its transparent overlay state (top of the page) or
//! its solid state. The state is a pure function of the window's vertical
//! offset: solid iff `scroll_top > threshold`. Every scroll recomputes it;
//! presenting an unchanged state is a no-op.
//!
//! Besides the bar itself the controller recolors the nav links and icons and
//! swaps the logo between its light and dark assets, skipping whichever of
//! those the markup does not provide.

use vitrine_core::markup::MarkupSource;
use vitrine_core::{ElementKey, Event, ScrollMetrics};
use vitrine_render::Frame;
use vitrine_runtime::{Cmd, Model};

/// Navigation bar root.
pub const NAV: ElementKey = ElementKey::new("site-nav");
/// Logo image inside the bar.
pub const LOGO: ElementKey = ElementKey::new("nav-logo");
/// Nav link role (indexed).
pub const LINK: &str = "nav-link";
/// Nav icon role (indexed).
pub const ICON: &str = "nav-icon";

/// Default scroll offset past which the bar turns solid.
pub const DEFAULT_THRESHOLD: f64 = 20.0;

const SOLID: &[&str] = &[
    "bg-white/95",
    "backdrop-blur-md",
    "border-gray-100",
    "py-3",
    "shadow-md",
];
const OVERLAY: &[&str] = &["bg-transparent", "border-transparent", "py-5"];

/// Messages for [`NavChrome`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavMsg {
    /// The window scrolled to this vertical offset.
    Scrolled(f64),
    /// Initial window geometry.
    Measured(Option<ScrollMetrics>),
}

/// Scroll-reactive navigation chrome.
#[derive(Debug, Clone)]
pub struct NavChrome {
    threshold: f64,
    scrolled: Option<bool>,
    links: u32,
    icons: u32,
    has_logo: bool,
    logo_light: Option<String>,
    logo_dark: Option<String>,
}

impl NavChrome {
    /// Build from markup. Requires the bar root.
    pub fn from_markup(markup: &impl MarkupSource) -> Option<Self> {
        if !markup.exists(NAV) {
            return None;
        }
        let has_logo = markup.exists(LOGO);
        Some(Self {
            threshold: DEFAULT_THRESHOLD,
            scrolled: None,
            links: markup.count(LINK),
            icons: markup.count(ICON),
            has_logo,
            logo_light: markup.data(LOGO, "logo-light").filter(|s| !s.is_empty()),
            logo_dark: markup.data(LOGO, "logo-dark").filter(|s| !s.is_empty()),
        })
    }

    /// Scroll offset past which the bar turns solid.
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Whether the bar is solid. `false` until the first measurement.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        self.scrolled.unwrap_or(false)
    }

    fn set_offset(&mut self, scroll_top: f64) {
        let solid = scroll_top > self.threshold;
        if self.scrolled != Some(solid) {
            vitrine_core::debug!(solid, scroll_top, "nav chrome state");
        }
        self.scrolled = Some(solid);
    }
}

impl Model for NavChrome {
    type Message = NavMsg;

    fn init(&mut self) -> Cmd<NavMsg> {
        Cmd::measure(ElementKey::WINDOW, NavMsg::Measured)
    }

    fn on_event(&self, event: &Event) -> Option<NavMsg> {
        match event {
            Event::Scroll { target, metrics } if *target == ElementKey::WINDOW => {
                Some(NavMsg::Scrolled(metrics.scroll_top))
            }
            _ => None,
        }
    }

    fn update(&mut self, msg: NavMsg) -> Cmd<NavMsg> {
        match msg {
            NavMsg::Scrolled(y) => self.set_offset(y),
            NavMsg::Measured(metrics) => self.set_offset(metrics.map_or(0.0, |m| m.scroll_top)),
        }
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        let Some(solid) = self.scrolled else {
            return;
        };
        frame.switch_classes(NAV, solid, SOLID, OVERLAY);
        for i in 0..self.links {
            frame.switch_classes(ElementKey::indexed(LINK, i), solid, &["text-navy"], &["text-white"]);
        }
        for i in 0..self.icons {
            frame.switch_classes(ElementKey::indexed(ICON, i), solid, &["text-navy"], &["text-white"]);
        }
        if self.has_logo {
            let src = if solid { &self.logo_light } else { &self.logo_dark };
            if let Some(src) = src {
                frame.set_attr(LOGO, "src", src.as_str());
            }
        }
    }
}
