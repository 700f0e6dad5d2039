#![forbid(unsafe_code)]

//! Page configuration: where each role lives in the document, and the
//! timing constants of every controller.
//!
//! Both halves have defaults matching the shipped page, and both deserialize
//! from JSON with every field optional. Selector overrides are merged into the
//! defaults role by role, so a host only lists what it changes:
//!
//! ```
//! use vitrine_web::config::PageConfig;
//!
//! let config = PageConfig::from_json(r#"{
//!     "selectors": { "site-nav": { "css": "header nav" } },
//!     "timings": { "closeDelayMs": 300 }
//! }"#).unwrap();
//!
//! assert_eq!(config.selectors.get("site-nav").unwrap().css, "header nav");
//! assert_eq!(config.selectors.get("nav-link").unwrap().css, ".nav-link");
//! assert_eq!(config.timings.close_delay().as_millis(), 300);
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::WebError;

/// How a role's elements are found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// First match in the document; the role is singular.
    Document,
    /// Every match in the document, indexed in document order.
    All,
    /// First match inside the element of the named role with the same index.
    Within(String),
}

/// CSS selector for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    /// CSS selector text.
    pub css: String,
    /// Where to look.
    #[serde(default = "Selector::default_scope")]
    pub scope: Scope,
}

impl Selector {
    /// First match in the document.
    #[must_use]
    pub fn id(css: &str) -> Self {
        Self {
            css: css.to_owned(),
            scope: Scope::Document,
        }
    }

    /// All matches in the document.
    #[must_use]
    pub fn all(css: &str) -> Self {
        Self {
            css: css.to_owned(),
            scope: Scope::All,
        }
    }

    /// First match inside `parent`.
    #[must_use]
    pub fn within(parent: &str, css: &str) -> Self {
        Self {
            css: css.to_owned(),
            scope: Scope::Within(parent.to_owned()),
        }
    }

    fn default_scope() -> Scope {
        Scope::Document
    }
}

/// Role name to selector.
///
/// Roles rebuilt by the controllers themselves (tabs, service options) have
/// no selector: the adapter tags those nodes when it creates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Selector>", into = "BTreeMap<String, Selector>")]
pub struct Selectors {
    map: BTreeMap<String, Selector>,
}

impl Default for Selectors {
    fn default() -> Self {
        let entries = [
            ("site-nav", Selector::id("#site-nav")),
            ("nav-logo", Selector::within("site-nav", "img")),
            ("nav-link", Selector::all(".nav-link")),
            ("nav-icon", Selector::all(".nav-icon")),
            ("desktop-menu", Selector::id("#desktop-menu")),
            ("desktop-menu-panel", Selector::id("#desktop-menu-panel")),
            ("mobile-toggle", Selector::id("#mobile-toggle")),
            ("mobile-toggle-icon", Selector::id("#mobile-toggle-icon")),
            ("mobile-menu", Selector::id("#mobile-menu")),
            ("impact-stats", Selector::id("#impact-stats")),
            ("counter", Selector::all("[data-counter-value]")),
            ("lifecycle-step", Selector::all("[data-lifecycle-step]")),
            ("lifecycle-circle", Selector::within("lifecycle-step", "div")),
            ("lifecycle-title", Selector::within("lifecycle-step", "h4")),
            ("lifecycle-desc", Selector::within("lifecycle-step", "p")),
            ("lifecycle-check", Selector::within("lifecycle-step", ".lifecycle-check")),
            ("lifecycle-active-dot", Selector::within("lifecycle-step", ".lifecycle-active-dot")),
            ("lifecycle-inactive-dot", Selector::within("lifecycle-step", ".lifecycle-inactive-dot")),
            ("lifecycle-progress-desktop", Selector::id("#lifecycle-progress-desktop")),
            ("lifecycle-progress-mobile", Selector::id("#lifecycle-progress-mobile")),
            ("collab-tabs", Selector::id("#collab-tabs")),
            ("collab-title", Selector::id("#collab-title")),
            ("collab-desc", Selector::id("#collab-desc")),
            ("collab-logos", Selector::id("#collab-logos")),
            ("collab-left", Selector::id("#collab-left")),
            ("collab-right", Selector::id("#collab-right")),
            ("product-stack", Selector::id("#product-stack")),
            ("product-prev", Selector::id("#product-prev")),
            ("product-next", Selector::id("#product-next")),
            ("product-slide", Selector::all("[data-slide]")),
            ("product-slide-content", Selector::within("product-slide", ".transition-all")),
            ("product-dot", Selector::all("[data-dot]")),
            ("services-list", Selector::id("#services-list")),
            ("services-visual", Selector::id("#services-visual")),
            ("services-overlay", Selector::id("#services-overlay")),
        ];
        Self {
            map: entries
                .into_iter()
                .map(|(role, sel)| (role.to_owned(), sel))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, Selector>> for Selectors {
    fn from(overrides: BTreeMap<String, Selector>) -> Self {
        let mut selectors = Self::default();
        selectors.map.extend(overrides);
        selectors
    }
}

impl From<Selectors> for BTreeMap<String, Selector> {
    fn from(selectors: Selectors) -> Self {
        selectors.map
    }
}

impl Selectors {
    /// Selector for `role`.
    #[must_use]
    pub fn get(&self, role: &str) -> Option<&Selector> {
        self.map.get(role)
    }

    /// Override one role.
    #[must_use]
    pub fn with(mut self, role: &str, selector: Selector) -> Self {
        self.map.insert(role.to_owned(), selector);
        self
    }

    /// Every role and its selector, ordered by role.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selector)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Timing and threshold constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timings {
    /// Window offset past which the nav turns solid.
    pub nav_threshold: f64,
    /// Hover menu close delay.
    pub close_delay_ms: u64,
    /// Counter animation duration.
    pub counter_duration_ms: u64,
    /// Counter frame rate.
    pub counter_fps: u32,
    /// Visible fraction that starts the counters.
    pub counter_threshold: f64,
    /// Stepper advance interval.
    pub stepper_interval_ms: u64,
    /// Delay between a showcase render and the arrow measurement.
    pub showcase_settle_ms: u64,
    /// Edge slack before a showcase arrow shows.
    pub arrow_slack: f64,
    /// Share of the visible strip one arrow click scrolls.
    pub scroll_fraction: f64,
    /// Slide auto-advance interval.
    pub slide_interval_ms: u64,
    /// Slide transition settle time.
    pub slide_settle_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            nav_threshold: 20.0,
            close_delay_ms: 150,
            counter_duration_ms: 2000,
            counter_fps: 60,
            counter_threshold: 0.2,
            stepper_interval_ms: 3500,
            showcase_settle_ms: 50,
            arrow_slack: 10.0,
            scroll_fraction: 0.7,
            slide_interval_ms: 8000,
            slide_settle_ms: 700,
        }
    }
}

impl Timings {
    /// Set the nav threshold.
    #[must_use]
    pub fn nav_threshold(mut self, threshold: f64) -> Self {
        self.nav_threshold = threshold;
        self
    }

    /// Set the hover close delay.
    #[must_use]
    pub fn with_close_delay(mut self, delay: Duration) -> Self {
        self.close_delay_ms = millis(delay);
        self
    }

    /// Set the counter duration and frame rate.
    #[must_use]
    pub fn with_counter(mut self, duration: Duration, fps: u32) -> Self {
        self.counter_duration_ms = millis(duration);
        self.counter_fps = fps;
        self
    }

    /// Set the stepper interval.
    #[must_use]
    pub fn with_stepper_interval(mut self, interval: Duration) -> Self {
        self.stepper_interval_ms = millis(interval);
        self
    }

    /// Set the slide interval and settle time.
    #[must_use]
    pub fn with_slides(mut self, interval: Duration, settle: Duration) -> Self {
        self.slide_interval_ms = millis(interval);
        self.slide_settle_ms = millis(settle);
        self
    }

    /// Hover close delay.
    #[must_use]
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    /// Counter duration.
    #[must_use]
    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    /// Stepper interval.
    #[must_use]
    pub fn stepper_interval(&self) -> Duration {
        Duration::from_millis(self.stepper_interval_ms)
    }

    /// Showcase settle delay.
    #[must_use]
    pub fn showcase_settle(&self) -> Duration {
        Duration::from_millis(self.showcase_settle_ms)
    }

    /// Slide interval.
    #[must_use]
    pub fn slide_interval(&self) -> Duration {
        Duration::from_millis(self.slide_interval_ms)
    }

    /// Slide settle time.
    #[must_use]
    pub fn slide_settle(&self) -> Duration {
        Duration::from_millis(self.slide_settle_ms)
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Complete page configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Role selectors.
    pub selectors: Selectors,
    /// Timing constants.
    pub timings: Timings,
}

impl PageConfig {
    /// Parse a JSON override document. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, WebError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the selectors.
    #[must_use]
    pub fn selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Replace the timings.
    #[must_use]
    pub fn timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }
}
