#![forbid(unsafe_code)]

//! In-memory display for headless hosts and tests.
//!
//! [`VirtualPage`] holds the presentation state of a fixed set of elements
//! and applies patches to it the way a document would: class lists are sets,
//! text and attributes are replaced, child lists are rebuilt. Patches for
//! undeclared elements are ignored, mirroring how controllers skip absent
//! markup.

use std::collections::{BTreeMap, BTreeSet};
use std::convert::Infallible;

use vitrine_core::ElementKey;

use crate::frame::Patch;
use crate::node::Node;
use crate::presenter::Presenter;

/// Presentation state of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    /// Class list.
    pub classes: BTreeSet<String>,
    /// Text content, once written.
    pub text: Option<String>,
    /// Attributes.
    pub attrs: BTreeMap<String, String>,
    /// Inline style properties.
    pub styles: BTreeMap<String, String>,
    /// Child elements.
    pub children: Vec<Node>,
}

impl ElementState {
    /// Whether `class` is in the class list.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// In-memory page.
#[derive(Debug, Clone, Default)]
pub struct VirtualPage {
    elements: BTreeMap<ElementKey, ElementState>,
    applied: usize,
}

impl VirtualPage {
    /// Page with no elements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an element with an initial class list.
    #[must_use]
    pub fn with(mut self, key: ElementKey, classes: &[&str]) -> Self {
        self.declare(key, classes);
        self
    }

    /// Declare an element with an initial class list.
    pub fn declare(&mut self, key: ElementKey, classes: &[&str]) {
        let el = self.elements.entry(key).or_default();
        el.classes.extend(classes.iter().map(|c| (*c).to_owned()));
    }

    /// Declare an element with existing children (e.g. non-image overlays).
    pub fn declare_children(&mut self, key: ElementKey, children: Vec<Node>) {
        self.elements.entry(key).or_default().children = children;
    }

    /// Element state, if declared.
    #[must_use]
    pub fn element(&self, key: ElementKey) -> Option<&ElementState> {
        self.elements.get(&key)
    }

    /// Whether `key` exists and carries `class`.
    #[must_use]
    pub fn has_class(&self, key: ElementKey, class: &str) -> bool {
        self.element(key).is_some_and(|e| e.has_class(class))
    }

    /// Text content of `key`.
    #[must_use]
    pub fn text(&self, key: ElementKey) -> Option<&str> {
        self.element(key)?.text.as_deref()
    }

    /// Attribute of `key`.
    #[must_use]
    pub fn attr(&self, key: ElementKey, name: &str) -> Option<&str> {
        self.element(key)?.attrs.get(name).map(String::as_str)
    }

    /// Inline style property of `key`.
    #[must_use]
    pub fn style(&self, key: ElementKey, property: &str) -> Option<&str> {
        self.element(key)?.styles.get(property).map(String::as_str)
    }

    /// Children of `key` (empty if undeclared).
    #[must_use]
    pub fn children(&self, key: ElementKey) -> &[Node] {
        self.element(key).map_or(&[], |e| e.children.as_slice())
    }

    /// Total patches applied to declared elements.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.applied
    }
}

impl Presenter for VirtualPage {
    type Error = Infallible;

    fn apply(&mut self, patch: &Patch) -> Result<(), Self::Error> {
        let Some(el) = self.elements.get_mut(&patch.target()) else {
            vitrine_core::trace!(element = %patch.target(), "patch skipped: element not declared");
            return Ok(());
        };
        self.applied += 1;
        match patch {
            Patch::Classes { add, remove, .. } => {
                for class in remove {
                    el.classes.remove(*class);
                }
                for class in add {
                    el.classes.insert((*class).to_owned());
                }
            }
            Patch::Text { text, .. } => {
                el.text = Some(text.clone());
                el.children.clear();
            }
            Patch::Attr { name, value, .. } => match value {
                Some(v) => {
                    el.attrs.insert((*name).to_owned(), v.clone());
                }
                None => {
                    el.attrs.remove(*name);
                }
            },
            Patch::Style {
                property, value, ..
            } => {
                el.styles.insert((*property).to_owned(), value.clone());
            }
            Patch::Children {
                only_tag, nodes, ..
            } => {
                match only_tag {
                    Some(tag) => el.children.retain(|c| c.tag_name() != *tag),
                    None => {
                        el.children.clear();
                        el.text = None;
                    }
                }
                el.children.extend(nodes.iter().cloned());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use pretty_assertions::assert_eq;

    const PANEL: ElementKey = ElementKey::new("panel");
    const VISUAL: ElementKey = ElementKey::new("visual");

    #[test]
    fn class_patch_replaces_presentation_set() {
        let mut page = VirtualPage::new().with(PANEL, &["opacity-0", "invisible", "rounded"]);
        let mut f = Frame::new();
        f.switch_classes(PANEL, true, &["opacity-100", "visible"], &["opacity-0", "invisible"]);
        page.present(&f, None).unwrap();
        let el = page.element(PANEL).unwrap();
        let classes: Vec<&str> = el.classes.iter().map(String::as_str).collect();
        assert_eq!(classes, vec!["opacity-100", "rounded", "visible"]);
    }

    #[test]
    fn undeclared_targets_are_skipped() {
        let mut page = VirtualPage::new();
        let mut f = Frame::new();
        f.set_text(PANEL, "hello");
        assert_eq!(page.present(&f, None).unwrap(), 1);
        assert_eq!(page.applied(), 0);
        assert!(page.element(PANEL).is_none());
    }

    #[test]
    fn tag_scoped_rebuild_keeps_other_children() {
        let mut page = VirtualPage::new();
        page.declare_children(
            VISUAL,
            vec![Node::new("div").class("gradient"), Node::new("img")],
        );
        let mut f = Frame::new();
        f.replace_children_of_tag(VISUAL, "img", vec![Node::new("img"), Node::new("img")]);
        page.present(&f, None).unwrap();
        let tags: Vec<&str> = page.children(VISUAL).iter().map(Node::tag_name).collect();
        assert_eq!(tags, vec!["div", "img", "img"]);
    }

    #[test]
    fn attr_removal() {
        let mut page = VirtualPage::new().with(PANEL, &[]);
        let mut f = Frame::new();
        f.set_flag(PANEL, "disabled", true);
        page.present(&f, None).unwrap();
        assert_eq!(page.attr(PANEL, "disabled"), Some(""));
        let mut f = Frame::new();
        f.set_flag(PANEL, "disabled", false);
        page.present(&f, None).unwrap();
        assert_eq!(page.attr(PANEL, "disabled"), None);
    }
}
