//! Per-category map from window id to [`WindowInfo`].

use teeplatform_bridge::window::WindowInfo;

/// Registered windows of one category, kept in insertion order.
///
/// Re-inserting an id replaces the entry in place, so iteration order stays
/// the order in which ids were first opened.
#[derive(Debug, Default, Clone)]
pub struct WindowRegistry {
    entries: Vec<WindowInfo>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&WindowInfo> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Inserts or overwrites the entry with the same id. Returns the entry
    /// that was replaced, if any.
    pub fn insert(&mut self, info: WindowInfo) -> Option<WindowInfo> {
        match self.entries.iter_mut().find(|entry| entry.id == info.id) {
            Some(slot) => Some(std::mem::replace(slot, info)),
            None => {
                self.entries.push(info);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<WindowInfo> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Ids currently registered, copied out so callers may mutate while
    /// walking them.
    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.id.clone()).collect()
    }

    /// Owned copy of every entry.
    pub fn snapshot(&self) -> Vec<WindowInfo> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowInfo> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use teeplatform_bridge::tags::WindowKind;

    use super::*;

    #[test]
    fn overwrite_keeps_position() {
        let mut registry = WindowRegistry::new();
        registry.insert(WindowInfo::new(WindowKind::Talk, "a"));
        registry.insert(WindowInfo::new(WindowKind::Talk, "b"));

        let replaced = registry.insert(WindowInfo::new(WindowKind::Talk, "a").with_name("renamed"));

        assert!(replaced.is_some_and(|old| old.name.is_none()));
        assert_eq!(registry.ids(), vec!["a", "b"]);
        assert_eq!(registry.get("a").and_then(|w| w.name.as_deref()), Some("renamed"));
    }

    #[test]
    fn remove_missing_is_none() {
        let mut registry = WindowRegistry::new();
        assert!(registry.remove("ghost").is_none());
        assert_eq!(registry.len(), 0);
    }
}
