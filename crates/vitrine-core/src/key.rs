#![forbid(unsafe_code)]

//! Symbolic element addresses.
//!
//! Controllers never hold DOM handles. They name the elements they read from
//! and write to with an [`ElementKey`]: a static role plus an optional
//! position within that role. The host resolves keys to real nodes.

use std::fmt;

/// Address of one element (or one element group) on the page.
///
/// `role` identifies the element kind (`"site-nav"`, `"lifecycle-step"`);
/// `index` distinguishes members of a repeated role in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ElementKey {
    role: &'static str,
    index: Option<u32>,
}

impl ElementKey {
    /// The browsing window itself (scroll offset, resize).
    pub const WINDOW: Self = Self::new("window");

    /// Key for a singular element or element group.
    #[must_use]
    pub const fn new(role: &'static str) -> Self {
        Self { role, index: None }
    }

    /// Key for the `index`-th member of a repeated role.
    #[must_use]
    pub const fn indexed(role: &'static str, index: u32) -> Self {
        Self {
            role,
            index: Some(index),
        }
    }

    /// The role name.
    #[inline]
    #[must_use]
    pub const fn role(&self) -> &'static str {
        self.role
    }

    /// Position within the role, if any.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> Option<u32> {
        self.index
    }

    /// Whether this key belongs to `role`, regardless of index.
    #[inline]
    #[must_use]
    pub fn is_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// Same role, different position.
    #[must_use]
    pub const fn at(&self, index: u32) -> Self {
        Self::indexed(self.role, index)
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}:{i}", self.role),
            None => f.write_str(self.role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_index_only_when_present() {
        assert_eq!(ElementKey::new("site-nav").to_string(), "site-nav");
        assert_eq!(ElementKey::indexed("collab-tab", 3).to_string(), "collab-tab:3");
    }

    #[test]
    fn at_keeps_role() {
        let step = ElementKey::new("lifecycle-step").at(2);
        assert!(step.is_role("lifecycle-step"));
        assert_eq!(step.index(), Some(2));
    }
}
