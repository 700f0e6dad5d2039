#![forbid(unsafe_code)]

//! Canonical trigger types.
//!
//! Hosts translate their native events into [`Event`] values. Every variant
//! names its target by [`ElementKey`], so controllers can decide whether a
//! trigger concerns them without touching the document.
//!
//! # Design Notes
//!
//! - Scroll events carry the geometry read at dispatch time; controllers do
//!   not query the host from inside `update`.
//! - `PointerDown` carries the keyed ancestors of the pointer target, nearest
//!   first, which is all outside-click detection needs.

use crate::geometry::ScrollMetrics;
use crate::key::ElementKey;

/// Canonical trigger delivered to controllers.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `target` scrolled. For [`ElementKey::WINDOW`] only `scroll_top` is set.
    Scroll {
        /// What scrolled.
        target: ElementKey,
        /// Geometry after the scroll.
        metrics: ScrollMetrics,
    },

    /// The viewport was resized.
    Resize {
        /// New viewport width in CSS pixels.
        width: u32,
        /// New viewport height in CSS pixels.
        height: u32,
    },

    /// Pointer entered `target`.
    PointerEnter(ElementKey),

    /// Pointer left `target`.
    PointerLeave(ElementKey),

    /// Focus moved into `target` or one of its descendants.
    FocusIn(ElementKey),

    /// Focus moved out of `target` or one of its descendants.
    FocusOut(ElementKey),

    /// `target` (the nearest keyed element under the pointer) was clicked.
    Click(ElementKey),

    /// Pointer pressed anywhere in the document.
    PointerDown {
        /// Keyed elements containing the press target, nearest first.
        path: Vec<ElementKey>,
    },

    /// Viewport intersection changed for an observed element.
    Intersection {
        /// Observed element.
        target: ElementKey,
        /// Visible fraction in `[0, 1]`.
        ratio: f64,
        /// Whether the host considers the element intersecting.
        intersecting: bool,
    },
}

impl Event {
    /// Whether a pointer press landed inside any of `keys`.
    #[must_use]
    pub fn pointer_down_within(&self, keys: &[ElementKey]) -> Option<bool> {
        match self {
            Self::PointerDown { path } => Some(path.iter().any(|k| keys.contains(k))),
            _ => None,
        }
    }

    /// The element this event is addressed to, if it has one.
    #[must_use]
    pub fn target(&self) -> Option<ElementKey> {
        match self {
            Self::Scroll { target, .. } | Self::Intersection { target, .. } => Some(*target),
            Self::PointerEnter(k)
            | Self::PointerLeave(k)
            | Self::FocusIn(k)
            | Self::FocusOut(k)
            | Self::Click(k) => Some(*k),
            Self::Resize { .. } => Some(ElementKey::WINDOW),
            Self::PointerDown { path } => path.first().copied(),
        }
    }
}
