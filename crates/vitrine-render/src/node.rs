#![forbid(unsafe_code)]

//! Element trees for full-subtree rebuilds.

use vitrine_core::ElementKey;

/// An element to be created by the host, with its subtree.
///
/// A node with a [`key`](Node::key) is addressable after creation: the host
/// tags it so clicks inside it are reported as
/// [`Event::Click`](vitrine_core::Event::Click) with that key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: &'static str,
    class: String,
    attrs: Vec<(&'static str, String)>,
    text: Option<String>,
    key: Option<ElementKey>,
    children: Vec<Node>,
}

impl Node {
    /// New element with the given tag name.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            class: String::new(),
            attrs: Vec::new(),
            text: None,
            key: None,
            children: Vec::new(),
        }
    }

    /// Set the full class attribute.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Set an attribute, replacing an earlier value of the same name.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Set text content. Text is placed before any children.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Make the node addressable.
    #[must_use]
    pub fn key(mut self, key: ElementKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag_name(&self) -> &'static str {
        self.tag
    }

    /// Class attribute.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class
    }

    /// Whether the class attribute contains `class` as a whole token.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_ascii_whitespace().any(|c| c == class)
    }

    /// Attribute value by name.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in insertion order.
    #[must_use]
    pub fn attrs(&self) -> &[(&'static str, String)] {
        &self.attrs
    }

    /// Own text content.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Routing key, if any.
    #[must_use]
    pub fn key_of(&self) -> Option<ElementKey> {
        self.key
    }

    /// Child nodes.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Concatenated text of this node and its descendants, depth first.
    #[must_use]
    pub fn deep_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(t) = &self.text {
            out.push_str(t);
        }
        for c in &self.children {
            c.collect_text(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_replaces_existing() {
        let n = Node::new("img").attr("src", "a").attr("src", "b");
        assert_eq!(n.get_attr("src"), Some("b"));
        assert_eq!(n.attrs().len(), 1);
    }

    #[test]
    fn has_class_matches_tokens_only() {
        let n = Node::new("div").class("bg-navy text-white");
        assert!(n.has_class("bg-navy"));
        assert!(!n.has_class("navy"));
    }

    #[test]
    fn deep_text_walks_children() {
        let n = Node::new("button")
            .child(Node::new("span").text("icon"))
            .child(Node::new("span").text("Title"));
        assert_eq!(n.deep_text(), "iconTitle");
    }
}
