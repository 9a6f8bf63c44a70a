//! Per-resolution memo of cascade results.

use std::collections::HashMap;

use super::cascade::Cascaded;

/// Cascade results keyed by position in the instance selector and property.
///
/// A cache lives only as long as one top-level resolution, so it never has
/// to be invalidated: the model cannot change while it is borrowed.
#[derive(Debug, Default)]
pub(crate) struct CascadeCache<'a> {
    entries: HashMap<usize, HashMap<String, Option<Cascaded<'a>>>>,
}

impl<'a> CascadeCache<'a> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached cascade result, computing it on a miss.
    pub fn get_or_insert_with(
        &mut self,
        depth: usize,
        property: &str,
        compute: impl FnOnce() -> Option<Cascaded<'a>>,
    ) -> Option<Cascaded<'a>> {
        let by_property = self.entries.entry(depth).or_default();
        if let Some(cached) = by_property.get(property) {
            return *cached;
        }
        let cascaded = compute();
        by_property.insert(property.to_owned(), cascaded);
        cascaded
    }

    /// Get the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }
}
