//! Generated image cache.

use std::collections::HashMap;

use crate::generator::ImageRef;

/// Generated images by search term. Entries are never evicted.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    entries: HashMap<String, ImageRef>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ImageRef> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, image: ImageRef) {
        self.entries.insert(key.into(), image);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
