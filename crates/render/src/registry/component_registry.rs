//! The static component table built into the application.

use blockkit_core::BlockKey;
use std::collections::BTreeMap;
use std::fmt;

use crate::component::ComponentRef;

/// Canonical key → component table.
///
/// This is the table of known block types and variants. A [`BlockRegistry`]
/// is normally bulk-loaded from it once at startup.
///
/// [`BlockRegistry`]: crate::registry::BlockRegistry
#[derive(Default, Clone)]
pub struct ComponentRegistry {
    table: BTreeMap<BlockKey, ComponentRef>,
}

impl ComponentRegistry {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the table of built-in block components.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_many(super::defaults::default_components());
        registry
    }

    /// Returns the component registered under an exact key.
    pub fn get(&self, key: impl Into<BlockKey>) -> Option<ComponentRef> {
        let key = key.into();
        let component = self.table.get(&key).cloned();
        if component.is_none() {
            log::warn!("[ComponentRegistry] Unknown component key: {}", key);
        }
        component
    }

    /// Registers a component, overwriting any existing entry for the key.
    pub fn register(&mut self, key: impl Into<BlockKey>, component: ComponentRef) {
        let key = key.into();
        if self.table.contains_key(&key) {
            log::warn!(
                "[ComponentRegistry] Component \"{}\" already exists, overwriting...",
                key
            );
        }
        self.table.insert(key, component);
    }

    /// Registers every pair in iteration order; later pairs win on collision.
    pub fn register_many<K, I>(&mut self, components: I)
    where
        K: Into<BlockKey>,
        I: IntoIterator<Item = (K, ComponentRef)>,
    {
        for (key, component) in components {
            self.register(key, component);
        }
    }

    /// Returns true when the key is registered.
    pub fn has(&self, key: impl Into<BlockKey>) -> bool {
        self.table.contains_key(&key.into())
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<BlockKey> {
        self.table.keys().cloned().collect()
    }

    /// Snapshot of the whole table.
    pub fn get_all(&self) -> Vec<(BlockKey, ComponentRef)> {
        self.table
            .iter()
            .map(|(key, component)| (key.clone(), component.clone()))
            .collect()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.table.iter().map(|(k, c)| (k.to_string(), c.name().to_string())))
            .finish()
    }
}
