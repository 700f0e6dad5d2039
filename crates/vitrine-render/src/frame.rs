#![forbid(unsafe_code)]

//! Frame = ordered presentation patches for one render pass.
//!
//! The `Frame` is the render target that `Model::view()` writes to. Views
//! describe the complete presentation of their state every time; the frame
//! merges repeated writes to the same slot (last write wins) so that a frame
//! holds at most one patch per target and slot.
//!
//! # Usage
//!
//! ```
//! use vitrine_core::ElementKey;
//! use vitrine_render::frame::Frame;
//!
//! const NAV: ElementKey = ElementKey::new("site-nav");
//!
//! let mut frame = Frame::new();
//! frame.set_classes(NAV, &["py-3", "shadow-md"], &["py-5"]);
//! frame.toggle_class(NAV, "shadow-md", false);
//!
//! assert!(frame.class_state(NAV, "py-3") == Some(true));
//! assert!(frame.class_state(NAV, "shadow-md") == Some(false));
//! ```

use smallvec::SmallVec;
use vitrine_core::ElementKey;

use crate::node::Node;

/// Class names touched by one patch.
pub type ClassList = SmallVec<[&'static str; 8]>;

/// One presentation write.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Remove `remove` then add `add` on the target's class list. The two
    /// lists are disjoint.
    Classes {
        /// Target element or group.
        target: ElementKey,
        /// Classes that must be present.
        add: ClassList,
        /// Classes that must be absent.
        remove: ClassList,
    },
    /// Replace text content.
    Text {
        /// Target element.
        target: ElementKey,
        /// New text.
        text: String,
    },
    /// Set (`Some`) or remove (`None`) an attribute.
    Attr {
        /// Target element or group.
        target: ElementKey,
        /// Attribute name.
        name: &'static str,
        /// New value.
        value: Option<String>,
    },
    /// Set an inline style property.
    Style {
        /// Target element.
        target: ElementKey,
        /// CSS property name.
        property: &'static str,
        /// CSS value.
        value: String,
    },
    /// Remove children (all, or only those with tag `only_tag`) and append
    /// `nodes` in order.
    Children {
        /// Container element.
        target: ElementKey,
        /// Restrict removal to children of this tag.
        only_tag: Option<&'static str>,
        /// Replacement subtree roots.
        nodes: Vec<Node>,
    },
}

/// Identity of a patch slot: two patches with the same slot overwrite each
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Class list of an element.
    Classes(ElementKey),
    /// Text content of an element.
    Text(ElementKey),
    /// One attribute of an element.
    Attr(ElementKey, &'static str),
    /// One inline style property of an element.
    Style(ElementKey, &'static str),
    /// Child list of an element.
    Children(ElementKey),
}

impl Patch {
    /// The element this patch writes to.
    #[must_use]
    pub fn target(&self) -> ElementKey {
        match self {
            Self::Classes { target, .. }
            | Self::Text { target, .. }
            | Self::Attr { target, .. }
            | Self::Style { target, .. }
            | Self::Children { target, .. } => *target,
        }
    }

    /// The slot this patch occupies.
    #[must_use]
    pub fn slot(&self) -> Slot {
        match self {
            Self::Classes { target, .. } => Slot::Classes(*target),
            Self::Text { target, .. } => Slot::Text(*target),
            Self::Attr { target, name, .. } => Slot::Attr(*target, *name),
            Self::Style {
                target, property, ..
            } => Slot::Style(*target, *property),
            Self::Children { target, .. } => Slot::Children(*target),
        }
    }
}

/// Presentation patches produced by one `view` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    patches: Vec<Patch>,
}

impl Frame {
    /// Empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `add` present and `remove` absent on `target`.
    ///
    /// Later writes win over earlier ones for the same class.
    pub fn set_classes(&mut self, target: ElementKey, add: &[&'static str], remove: &[&'static str]) {
        let (adds, removes) = self.class_lists(target);
        for &class in remove {
            adds.retain(|c| *c != class);
            if !removes.contains(&class) {
                removes.push(class);
            }
        }
        for &class in add {
            removes.retain(|c| *c != class);
            if !adds.contains(&class) {
                adds.push(class);
            }
        }
    }

    /// Require `class` present when `on`, absent otherwise.
    pub fn toggle_class(&mut self, target: ElementKey, class: &'static str, on: bool) {
        if on {
            self.set_classes(target, &[class], &[]);
        } else {
            self.set_classes(target, &[], &[class]);
        }
    }

    /// Apply `on_set` when `on`, `off_set` otherwise, removing the other set.
    pub fn switch_classes(
        &mut self,
        target: ElementKey,
        on: bool,
        on_set: &[&'static str],
        off_set: &[&'static str],
    ) {
        if on {
            self.set_classes(target, on_set, off_set);
        } else {
            self.set_classes(target, off_set, on_set);
        }
    }

    /// Replace the text content of `target`.
    pub fn set_text(&mut self, target: ElementKey, text: impl Into<String>) {
        self.upsert(Patch::Text {
            target,
            text: text.into(),
        });
    }

    /// Set an attribute on `target`.
    pub fn set_attr(&mut self, target: ElementKey, name: &'static str, value: impl Into<String>) {
        self.upsert(Patch::Attr {
            target,
            name,
            value: Some(value.into()),
        });
    }

    /// Remove an attribute from `target`.
    pub fn remove_attr(&mut self, target: ElementKey, name: &'static str) {
        self.upsert(Patch::Attr {
            target,
            name,
            value: None,
        });
    }

    /// Set a boolean attribute: present (empty value) when `on`.
    pub fn set_flag(&mut self, target: ElementKey, name: &'static str, on: bool) {
        if on {
            self.set_attr(target, name, "");
        } else {
            self.remove_attr(target, name);
        }
    }

    /// Set an inline style property on `target`.
    pub fn set_style(&mut self, target: ElementKey, property: &'static str, value: impl Into<String>) {
        self.upsert(Patch::Style {
            target,
            property,
            value: value.into(),
        });
    }

    /// Rebuild all children of `target`.
    pub fn replace_children(&mut self, target: ElementKey, nodes: Vec<Node>) {
        self.upsert(Patch::Children {
            target,
            only_tag: None,
            nodes,
        });
    }

    /// Remove children of tag `tag` from `target`, then append `nodes`.
    pub fn replace_children_of_tag(&mut self, target: ElementKey, tag: &'static str, nodes: Vec<Node>) {
        self.upsert(Patch::Children {
            target,
            only_tag: Some(tag),
            nodes,
        });
    }

    /// Patches in write order.
    #[must_use]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Number of patches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Whether nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Patch occupying `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&Patch> {
        self.patches.iter().find(|p| p.slot() == slot)
    }

    /// `Some(true)` if this frame requires `class` on `target`, `Some(false)`
    /// if it requires its absence, `None` if it says nothing.
    #[must_use]
    pub fn class_state(&self, target: ElementKey, class: &str) -> Option<bool> {
        match self.get(Slot::Classes(target))? {
            Patch::Classes { add, remove, .. } => {
                if add.iter().any(|c| *c == class) {
                    Some(true)
                } else if remove.iter().any(|c| *c == class) {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Text written to `target`, if any.
    #[must_use]
    pub fn text_of(&self, target: ElementKey) -> Option<&str> {
        match self.get(Slot::Text(target))? {
            Patch::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Take ownership of the patches.
    #[must_use]
    pub fn into_patches(self) -> Vec<Patch> {
        self.patches
    }

    fn upsert(&mut self, patch: Patch) {
        let slot = patch.slot();
        match self.patches.iter_mut().find(|p| p.slot() == slot) {
            Some(existing) => *existing = patch,
            None => self.patches.push(patch),
        }
    }

    fn class_lists(&mut self, target: ElementKey) -> (&mut ClassList, &mut ClassList) {
        let slot = Slot::Classes(target);
        let idx = match self.patches.iter().position(|p| p.slot() == slot) {
            Some(i) => i,
            None => {
                self.patches.push(Patch::Classes {
                    target,
                    add: ClassList::new(),
                    remove: ClassList::new(),
                });
                self.patches.len() - 1
            }
        };
        match &mut self.patches[idx] {
            Patch::Classes { add, remove, .. } => (add, remove),
            _ => unreachable!("slot lookup matched a non-class patch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const A: ElementKey = ElementKey::new("a");

    #[test]
    fn later_class_write_wins() {
        let mut f = Frame::new();
        f.set_classes(A, &[], &["bg-primary", "bg-white"]);
        f.set_classes(A, &["bg-white"], &[]);
        assert_eq!(f.class_state(A, "bg-white"), Some(true));
        assert_eq!(f.class_state(A, "bg-primary"), Some(false));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn switch_classes_is_mutually_exclusive() {
        let mut f = Frame::new();
        f.switch_classes(A, false, &["py-3"], &["py-5"]);
        assert_eq!(f.class_state(A, "py-5"), Some(true));
        assert_eq!(f.class_state(A, "py-3"), Some(false));
    }

    #[test]
    fn same_slot_overwrites() {
        let mut f = Frame::new();
        f.set_text(A, "1");
        f.set_text(A, "2");
        f.set_attr(A, "aria-expanded", "false");
        f.set_attr(A, "aria-expanded", "true");
        assert_eq!(f.len(), 2);
        assert_eq!(f.text_of(A), Some("2"));
    }

    #[test]
    fn flags_map_to_attr_presence() {
        let mut f = Frame::new();
        f.set_flag(A, "disabled", true);
        assert_eq!(
            f.get(Slot::Attr(A, "disabled")),
            Some(&Patch::Attr {
                target: A,
                name: "disabled",
                value: Some(String::new())
            })
        );
        f.set_flag(A, "disabled", false);
        assert_eq!(
            f.get(Slot::Attr(A, "disabled")),
            Some(&Patch::Attr {
                target: A,
                name: "disabled",
                value: None
            })
        );
    }

    #[test]
    fn different_attrs_are_different_slots() {
        let mut f = Frame::new();
        f.set_attr(A, "src", "x");
        f.set_attr(A, "alt", "y");
        f.set_style(A, "width", "10%");
        f.set_style(A, "height", "10%");
        assert_eq!(f.len(), 4);
    }
}
