#![forbid(unsafe_code)]

//! Diff computation between frames.
//!
//! Views rebuild their whole presentation on every render. Presenting only
//! what differs from the previous frame keeps repeated renders cheap and
//! stops the host from rebuilding subtrees (and losing their scroll position)
//! when nothing in them changed.
//!
//! # Algorithm
//!
//! For each patch of the new frame, in order, look up the patch occupying the
//! same [`Slot`](crate::frame::Slot) in the old frame. The patch is a change
//! if the slot was empty or held a different value. Slots present only in the
//! old frame are not reverted.
//!
//! # Usage
//!
//! ```
//! use vitrine_core::ElementKey;
//! use vitrine_render::diff::FrameDiff;
//! use vitrine_render::frame::Frame;
//!
//! const TITLE: ElementKey = ElementKey::new("collab-title");
//! const DESC: ElementKey = ElementKey::new("collab-desc");
//!
//! let mut old = Frame::new();
//! old.set_text(TITLE, "Lenders & Banks");
//! old.set_text(DESC, "Partnering");
//!
//! let mut new = old.clone();
//! new.set_text(TITLE, "Global Clients");
//!
//! let diff = FrameDiff::compute(&old, &new);
//! assert_eq!(diff.len(), 1);
//! ```

use crate::frame::{Frame, Patch};

/// Indices of the patches of a frame that need presenting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameDiff {
    changed: Vec<usize>,
}

impl FrameDiff {
    /// Empty diff.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every patch of `frame` (full repaint).
    #[must_use]
    pub fn full(frame: &Frame) -> Self {
        Self {
            changed: (0..frame.len()).collect(),
        }
    }

    /// Patches of `new` that differ from `old`.
    #[must_use]
    pub fn compute(old: &Frame, new: &Frame) -> Self {
        let changed = new
            .patches()
            .iter()
            .enumerate()
            .filter(|(_, patch)| old.get(patch.slot()) != Some(*patch))
            .map(|(i, _)| i)
            .collect();
        Self { changed }
    }

    /// Number of changed patches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changed.len()
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    /// Indices into the new frame's patch list.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.changed
    }

    /// Iterate the changed patches of `frame` (the frame this diff was
    /// computed for).
    pub fn patches<'a>(&'a self, frame: &'a Frame) -> impl Iterator<Item = &'a Patch> + 'a {
        self.changed
            .iter()
            .filter_map(move |&i| frame.patches().get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use vitrine_core::ElementKey;

    const TABS: ElementKey = ElementKey::new("collab-tabs");
    const LEFT: ElementKey = ElementKey::new("collab-left");

    fn tabs(active: usize) -> Vec<Node> {
        (0..3)
            .map(|i| {
                Node::new("button").class(if i == active { "bg-navy" } else { "bg-white" })
            })
            .collect()
    }

    #[test]
    fn identical_frames_have_empty_diff() {
        let mut f = Frame::new();
        f.replace_children(TABS, tabs(0));
        f.toggle_class(LEFT, "invisible", true);
        assert!(FrameDiff::compute(&f, &f.clone()).is_empty());
    }

    #[test]
    fn changed_subtree_is_reported() {
        let mut a = Frame::new();
        a.replace_children(TABS, tabs(0));
        a.toggle_class(LEFT, "invisible", true);
        let mut b = Frame::new();
        b.replace_children(TABS, tabs(1));
        b.toggle_class(LEFT, "invisible", true);
        let diff = FrameDiff::compute(&a, &b);
        assert_eq!(diff.indices(), &[0]);
        assert!(matches!(
            diff.patches(&b).next(),
            Some(Patch::Children { .. })
        ));
    }

    #[test]
    fn new_slots_are_changes() {
        let a = Frame::new();
        let mut b = Frame::new();
        b.set_text(LEFT, "x");
        assert_eq!(FrameDiff::compute(&a, &b).len(), 1);
    }

    #[test]
    fn full_covers_everything() {
        let mut f = Frame::new();
        f.set_text(LEFT, "x");
        f.set_attr(LEFT, "disabled", "");
        assert_eq!(FrameDiff::full(&f).len(), 2);
    }
}
