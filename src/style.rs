use std::collections::HashMap;

/// Opaque tag of a style known to the host's style resolver. Hosts mint
/// these however they like; the engine only passes them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleId(pub usize);

/// Style knowledge the engine consumes: name resolution and the
/// base-style relation. Style filters match a node when its own style
/// equals the named style or derives from it.
pub trait StyleResolver {
    /// Resolve the name written in a `.Style` filter.
    fn resolve(&self, name: &str) -> Option<StyleId>;

    /// True when `style` is `ancestor` or derives from it through the
    /// base-style chain.
    fn derives_from(&self, style: StyleId, ancestor: StyleId) -> bool;
}

/// A plain style catalog with base-style chains.
///
/// # Examples
///
/// ```
/// use sceneq::{StyleResolver, StyleSheet};
///
/// let mut sheet = StyleSheet::new();
/// let base = sheet.define("BaseButton", None);
/// let danger = sheet.define("DangerButton", Some(base));
///
/// assert_eq!(sheet.resolve("DangerButton"), Some(danger));
/// assert!(sheet.derives_from(danger, base));
/// assert!(!sheet.derives_from(base, danger));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    bases: Vec<Option<StyleId>>,
    names: HashMap<String, StyleId>,
}

impl StyleSheet {
    pub fn new() -> Self {
        StyleSheet::default()
    }

    /// Add a style, optionally based on an existing one. Defining a name
    /// twice returns the original id unchanged.
    pub fn define(&mut self, name: &str, based_on: Option<StyleId>) -> StyleId {
        if let Some(id) = self.names.get(name) {
            return *id;
        }
        let id = StyleId(self.bases.len());
        self.bases.push(based_on);
        self.names.insert(name.to_string(), id);
        id
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

impl StyleResolver for StyleSheet {
    fn resolve(&self, name: &str) -> Option<StyleId> {
        self.names.get(name).copied()
    }

    fn derives_from(&self, style: StyleId, ancestor: StyleId) -> bool {
        let mut current = Some(style);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.bases.get(id.0).copied().flatten();
        }
        false
    }
}
