#![forbid(unsafe_code)]

//! Declarative inputs read from page markup.
//!
//! Controllers are configured from what the page ships: which elements exist,
//! how many members a repeated role has, and the values of their data
//! attributes. [`MarkupSource`] abstracts that read so controllers can be
//! built from a live document or from [`StaticMarkup`] in tests.

use std::collections::BTreeMap;

use crate::key::ElementKey;

/// Read-only view of the page structure a controller is built from.
pub trait MarkupSource {
    /// Whether the element (or element group) addressed by `key` exists.
    fn exists(&self, key: ElementKey) -> bool;

    /// Number of members of a repeated role, in document order.
    fn count(&self, role: &'static str) -> u32;

    /// Value of the `data-{name}` attribute on `key`, if present.
    fn data(&self, key: ElementKey, name: &str) -> Option<String>;
}

/// In-memory markup description.
///
/// ```
/// use vitrine_core::ElementKey;
/// use vitrine_core::markup::{MarkupSource, StaticMarkup};
///
/// let markup = StaticMarkup::new()
///     .with(ElementKey::new("site-nav"))
///     .with_data(ElementKey::indexed("counter", 0), "counter-value", "98%");
/// assert!(markup.exists(ElementKey::new("site-nav")));
/// assert_eq!(markup.count("counter"), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticMarkup {
    elements: BTreeMap<ElementKey, BTreeMap<String, String>>,
}

impl StaticMarkup {
    /// Empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an element with no data attributes.
    #[must_use]
    pub fn with(mut self, key: ElementKey) -> Self {
        self.insert(key);
        self
    }

    /// Declare an element (if needed) and set one data attribute on it.
    #[must_use]
    pub fn with_data(mut self, key: ElementKey, name: &str, value: &str) -> Self {
        self.insert(key).insert(name.to_owned(), value.to_owned());
        self
    }

    /// Declare `count` members of `role` with no attributes.
    #[must_use]
    pub fn with_repeated(mut self, role: &'static str, count: u32) -> Self {
        for i in 0..count {
            self.insert(ElementKey::indexed(role, i));
        }
        self
    }

    fn insert(&mut self, key: ElementKey) -> &mut BTreeMap<String, String> {
        self.elements.entry(key).or_default()
    }
}

impl MarkupSource for StaticMarkup {
    fn exists(&self, key: ElementKey) -> bool {
        self.elements.contains_key(&key)
    }

    fn count(&self, role: &'static str) -> u32 {
        let n = self
            .elements
            .keys()
            .filter(|k| k.is_role(role) && k.index().is_some())
            .count();
        u32::try_from(n).unwrap_or(u32::MAX)
    }

    fn data(&self, key: ElementKey, name: &str) -> Option<String> {
        self.elements.get(&key)?.get(name).cloned()
    }
}

/// Parse an index attribute the way the page markup expects.
///
/// Leading whitespace is skipped and the leading run of ASCII digits is read;
/// trailing garbage is ignored. A missing value, a value without leading
/// digits, a negative value, or one that overflows yields `0`.
#[must_use]
pub fn parse_index(value: Option<&str>) -> usize {
    let Some(raw) = value else {
        return 0;
    };
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_len = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    unsigned[..digits_len].parse().unwrap_or(0)
}
