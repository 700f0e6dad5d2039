#![forbid(unsafe_code)]

//! Stacked product slides with prev/next arrows, dots and auto-advance.
//!
//! Every way of changing the slide goes through one entry point guarded by
//! an in-flight flag: while a transition is settling, further requests are
//! dropped (not queued). The flag clears on a fixed settle timer.
//!
//! Slides, their inner content blocks and the dots are matched to the active
//! index through their `data-slide` / `data-dot` attributes rather than their
//! document order.

use std::time::Duration;

use vitrine_core::markup::{MarkupSource, parse_index};
use vitrine_core::{ElementKey, Event};
use vitrine_render::Frame;
use vitrine_runtime::{Cmd, Every, Model, TimerId};

use crate::cyclic;

/// Stack root; auto-advance needs it.
pub const STACK: ElementKey = ElementKey::new("product-stack");
/// Previous-slide arrow.
pub const PREV: ElementKey = ElementKey::new("product-prev");
/// Next-slide arrow.
pub const NEXT: ElementKey = ElementKey::new("product-next");
/// Slide role (indexed by document order, carries `data-slide`).
pub const SLIDE: &str = "product-slide";
/// Slide content role, indexed like [`SLIDE`].
pub const SLIDE_CONTENT: &str = "product-slide-content";
/// Dot role (indexed by document order, carries `data-dot`).
pub const DOT: &str = "product-dot";

/// Default auto-advance interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(8000);
/// Default transition settle time.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(700);

const SETTLE_TIMER: TimerId = TimerId::new(1);

const SLIDE_ON: &[&str] = &["opacity-100", "z-10"];
const SLIDE_OFF: &[&str] = &["opacity-0", "z-0"];
const CONTENT_ON: &[&str] = &["translate-y-0", "opacity-100"];
const CONTENT_OFF: &[&str] = &["translate-y-6", "opacity-0"];
const DOT_ON: &[&str] = &["w-8", "bg-primary"];
const DOT_OFF: &[&str] = &["w-2", "bg-navy/10"];

#[derive(Debug, Clone, Copy)]
struct SlideParts {
    index: usize,
    content: bool,
}

/// Messages for [`SlideStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideMsg {
    /// Previous arrow clicked.
    Prev,
    /// Next arrow clicked.
    Next,
    /// Dot clicked; carries the dot's target index.
    Jump(usize),
    /// Auto-advance interval elapsed.
    Auto,
    /// Transition settled.
    Settled,
}

/// Guarded slide stack controller.
#[derive(Debug, Clone)]
pub struct SlideStack {
    slides: Vec<SlideParts>,
    dots: Vec<usize>,
    has_stack: bool,
    active: usize,
    animating: bool,
    interval: Duration,
    settle: Duration,
}

impl SlideStack {
    /// Build from markup. Requires at least one slide, dot, arrow or the root.
    pub fn from_markup(markup: &impl MarkupSource) -> Option<Self> {
        let slides: Vec<SlideParts> = (0..markup.count(SLIDE))
            .map(|i| SlideParts {
                index: parse_index(markup.data(ElementKey::indexed(SLIDE, i), "slide").as_deref()),
                content: markup.exists(ElementKey::indexed(SLIDE_CONTENT, i)),
            })
            .collect();
        let dots: Vec<usize> = (0..markup.count(DOT))
            .map(|i| parse_index(markup.data(ElementKey::indexed(DOT, i), "dot").as_deref()))
            .collect();
        let has_stack = markup.exists(STACK);
        let any = has_stack || !slides.is_empty() || !dots.is_empty() || markup.exists(PREV) || markup.exists(NEXT);
        any.then(|| Self {
            slides,
            dots,
            has_stack,
            active: 0,
            animating: false,
            interval: DEFAULT_INTERVAL,
            settle: DEFAULT_SETTLE,
        })
    }

    /// Auto-advance interval.
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Transition settle time.
    #[must_use]
    pub fn settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Active slide index.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Number of slides.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn go_to(&mut self, target: Option<usize>) -> Cmd<SlideMsg> {
        let Some(target) = target else {
            return Cmd::none();
        };
        if self.animating {
            vitrine_core::trace!(to = target, "slide change dropped while animating");
            return Cmd::none();
        }
        vitrine_core::debug!(from = self.active, to = target, "slide change");
        self.animating = true;
        self.active = target;
        Cmd::after(SETTLE_TIMER, self.settle, SlideMsg::Settled)
    }
}

impl Model for SlideStack {
    type Message = SlideMsg;

    fn on_event(&self, event: &Event) -> Option<SlideMsg> {
        match event {
            Event::Click(k) if *k == PREV => Some(SlideMsg::Prev),
            Event::Click(k) if *k == NEXT => Some(SlideMsg::Next),
            Event::Click(k) if k.is_role(DOT) => k
                .index()
                .and_then(|i| self.dots.get(i as usize))
                .map(|&target| SlideMsg::Jump(target)),
            _ => None,
        }
    }

    fn update(&mut self, msg: SlideMsg) -> Cmd<SlideMsg> {
        let len = self.slides.len();
        match msg {
            SlideMsg::Prev => self.go_to(cyclic::prev(self.active, len)),
            SlideMsg::Next | SlideMsg::Auto => self.go_to(cyclic::next(self.active, len)),
            SlideMsg::Jump(target) => self.go_to(Some(target)),
            SlideMsg::Settled => {
                self.animating = false;
                Cmd::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        for (i, slide) in (0u32..).zip(&self.slides) {
            let on = slide.index == self.active;
            frame.switch_classes(ElementKey::indexed(SLIDE, i), on, SLIDE_ON, SLIDE_OFF);
            if slide.content {
                frame.switch_classes(ElementKey::indexed(SLIDE_CONTENT, i), on, CONTENT_ON, CONTENT_OFF);
            }
        }
        for (i, &dot) in (0u32..).zip(&self.dots) {
            frame.switch_classes(ElementKey::indexed(DOT, i), dot == self.active, DOT_ON, DOT_OFF);
        }
    }

    fn subscriptions(&self) -> Vec<Every<SlideMsg>> {
        if self.has_stack && !self.slides.is_empty() {
            vec![Every::new(self.interval, || SlideMsg::Auto)]
        } else {
            Vec::new()
        }
    }
}
