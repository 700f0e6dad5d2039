#![forbid(unsafe_code)]

//! Host capabilities required by the runtime.
//!
//! A [`Backend`] is a [`Presenter`] that can also answer geometry queries,
//! scroll elements, and observe viewport intersections. The browser adapter
//! implements it over the live document; [`HeadlessBackend`] implements it
//! over a [`VirtualPage`] for native hosts and tests.

use std::collections::BTreeMap;

use vitrine_core::{ElementKey, ScrollMetrics};
use vitrine_render::frame::Patch;
use vitrine_render::presenter::Presenter;
use vitrine_render::VirtualPage;

/// Host services used while executing commands.
pub trait Backend: Presenter {
    /// Current scroll geometry of `target`, or `None` if it is absent.
    fn measure(&self, target: ElementKey) -> Option<ScrollMetrics>;

    /// Scroll `target` horizontally by `dx`. Absent targets are ignored.
    fn scroll_by(&mut self, target: ElementKey, dx: f64, smooth: bool) -> Result<(), Self::Error>;

    /// Start reporting intersections of `target` at `threshold`.
    ///
    /// Returns `Ok(false)` when the host has no intersection support or the
    /// target is absent; the caller then falls back.
    fn observe(&mut self, target: ElementKey, threshold: f64) -> Result<bool, Self::Error>;

    /// Stop reporting intersections of `target`.
    fn unobserve(&mut self, target: ElementKey);
}

/// A scroll request recorded by [`HeadlessBackend`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    /// Scrolled element.
    pub target: ElementKey,
    /// Requested horizontal offset.
    pub dx: f64,
    /// Whether smooth scrolling was requested.
    pub smooth: bool,
}

/// Backend over an in-memory page.
///
/// Geometry is whatever the host last set with
/// [`set_metrics`](Self::set_metrics). Scroll requests are applied instantly
/// (clamped to the scrollable range) and recorded.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    page: VirtualPage,
    metrics: BTreeMap<ElementKey, ScrollMetrics>,
    intersection_supported: bool,
    observed: BTreeMap<ElementKey, f64>,
    scrolls: Vec<ScrollRequest>,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(VirtualPage::new())
    }
}

impl HeadlessBackend {
    /// Backend presenting into `page`, with intersection support.
    #[must_use]
    pub fn new(page: VirtualPage) -> Self {
        Self {
            page,
            metrics: BTreeMap::new(),
            intersection_supported: true,
            observed: BTreeMap::new(),
            scrolls: Vec::new(),
        }
    }

    /// Enable or disable intersection support.
    #[must_use]
    pub fn with_intersection(mut self, supported: bool) -> Self {
        self.intersection_supported = supported;
        self
    }

    /// Set the geometry reported for `target`.
    pub fn set_metrics(&mut self, target: ElementKey, metrics: ScrollMetrics) {
        self.metrics.insert(target, metrics);
    }

    /// The presented page.
    #[must_use]
    pub fn page(&self) -> &VirtualPage {
        &self.page
    }

    /// Mutable access to the page (to declare elements).
    pub fn page_mut(&mut self) -> &mut VirtualPage {
        &mut self.page
    }

    /// Threshold `target` is observed at, if observed.
    #[must_use]
    pub fn observed(&self, target: ElementKey) -> Option<f64> {
        self.observed.get(&target).copied()
    }

    /// Scroll requests received so far.
    #[must_use]
    pub fn scrolls(&self) -> &[ScrollRequest] {
        &self.scrolls
    }
}

impl Presenter for HeadlessBackend {
    type Error = std::convert::Infallible;

    fn apply(&mut self, patch: &Patch) -> Result<(), Self::Error> {
        self.page.apply(patch)
    }
}

impl Backend for HeadlessBackend {
    fn measure(&self, target: ElementKey) -> Option<ScrollMetrics> {
        if let Some(m) = self.metrics.get(&target) {
            return Some(*m);
        }
        // Declared elements without explicit geometry do not scroll.
        self.page.element(target).map(|_| ScrollMetrics::default())
    }

    fn scroll_by(&mut self, target: ElementKey, dx: f64, smooth: bool) -> Result<(), Self::Error> {
        self.scrolls.push(ScrollRequest { target, dx, smooth });
        if let Some(m) = self.metrics.get_mut(&target) {
            m.scroll_left = (m.scroll_left + dx).clamp(0.0, m.max_scroll_left());
        }
        Ok(())
    }

    fn observe(&mut self, target: ElementKey, threshold: f64) -> Result<bool, Self::Error> {
        if !self.intersection_supported || self.page.element(target).is_none() {
            return Ok(false);
        }
        self.observed.insert(target, threshold);
        Ok(true)
    }

    fn unobserve(&mut self, target: ElementKey) {
        self.observed.remove(&target);
    }
}
