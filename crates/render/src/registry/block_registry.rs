//! Block registry: three-tier resolution of descriptors to components.
//!
//! Priority:
//! 1. `blockType:blockName` (exact)
//! 2. `blockType` (type)
//! 3. `*` (fallback)

use blockkit_core::{BlockDescriptor, BlockKey};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

use super::component_registry::ComponentRegistry;
use super::config::RegistryConfig;
use crate::component::ComponentRef;

/// Which tier satisfied a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    /// `type:name` key found.
    Exact,
    /// `type` key found.
    Type,
    /// Wildcard found.
    Fallback,
    /// Nothing found.
    None,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchKind::Exact => "exact",
            MatchKind::Type => "type",
            MatchKind::Fallback => "fallback",
            MatchKind::None => "none",
        })
    }
}

/// Outcome of matching one descriptor.
#[derive(Clone)]
pub struct MatchResult {
    /// Tier that matched.
    pub kind: MatchKind,
    /// Resolved component, absent for [`MatchKind::None`].
    pub component: Option<ComponentRef>,
    /// Key that satisfied the match.
    pub key: Option<BlockKey>,
}

impl MatchResult {
    fn found(kind: MatchKind, key: BlockKey, component: ComponentRef) -> Self {
        Self {
            kind,
            component: Some(component),
            key: Some(key),
        }
    }

    fn none() -> Self {
        Self {
            kind: MatchKind::None,
            component: None,
            key: None,
        }
    }

    /// Returns true unless nothing matched.
    pub fn is_match(&self) -> bool {
        self.kind != MatchKind::None
    }
}

impl fmt::Debug for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("kind", &self.kind)
            .field("key", &self.key.as_ref().map(ToString::to_string))
            .field("component", &self.component.as_ref().map(|c| c.name()))
            .finish()
    }
}

/// Key → component table with the exact → type → fallback matching algorithm.
///
/// Mutations are visible to the next resolution; nothing is cached.
#[derive(Default, Clone)]
pub struct BlockRegistry {
    entries: BTreeMap<BlockKey, ComponentRef>,
    debug: bool,
    strict_variants: bool,
}

impl BlockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry loaded from a component table.
    pub fn from_components(components: &ComponentRegistry) -> Self {
        let mut registry = Self::new();
        registry.load_components(components);
        registry
    }

    /// Creates a registry with the built-in components and default aliases.
    pub fn with_defaults() -> Self {
        let mut registry = Self::from_components(&ComponentRegistry::with_defaults());
        for alias in RegistryConfig::default_aliases() {
            registry.alias(alias.key(), alias.target());
        }
        registry
    }

    /// Bulk-loads every entry of a component table.
    pub fn load_components(&mut self, components: &ComponentRegistry) {
        self.register_many(components.get_all());
    }

    /// Enables or disables logging of match decisions.
    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    /// Returns whether match decisions are logged.
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Enables or disables warnings for named variants that matched only by type.
    pub fn set_strict_variants(&mut self, enabled: bool) {
        self.strict_variants = enabled;
    }

    /// Applies debug flags and aliases from configuration.
    ///
    /// Returns how many aliases were registered.
    pub fn apply_config(&mut self, config: &RegistryConfig) -> usize {
        self.set_debug(config.debug);
        self.set_strict_variants(config.strict_variants);
        config
            .aliases
            .iter()
            .filter(|alias| self.alias(alias.key(), alias.target()))
            .count()
    }

    /// Registers a component, returning the entry it replaced.
    pub fn register(
        &mut self,
        key: impl Into<BlockKey>,
        component: ComponentRef,
    ) -> Option<ComponentRef> {
        let key = key.into();
        let previous = self.entries.insert(key.clone(), component);
        if let Some(previous) = &previous {
            log::debug!(
                "[BlockRegistry] overwrote `{}` (was {})",
                key,
                previous.name()
            );
        }
        previous
    }

    /// Registers every pair in iteration order; later pairs win on collision.
    pub fn register_many<K, I>(&mut self, entries: I)
    where
        K: Into<BlockKey>,
        I: IntoIterator<Item = (K, ComponentRef)>,
    {
        for (key, component) in entries {
            self.register(key, component);
        }
    }

    /// Registers `alias` with whatever `target` currently resolves to.
    ///
    /// The target goes through the normal matching algorithm, so an exact
    /// target may resolve through its type or the wildcard. Returns false
    /// when nothing resolves. Repeating an alias is harmless.
    pub fn alias(&mut self, alias: impl Into<BlockKey>, target: impl Into<BlockKey>) -> bool {
        let alias = alias.into();
        let target = target.into();
        match self.resolve(&BlockDescriptor::for_key(&target)) {
            Some(component) => {
                self.register(alias, component);
                true
            }
            None => {
                log::warn!(
                    "[BlockRegistry] cannot alias `{}`: `{}` does not resolve",
                    alias,
                    target
                );
                false
            }
        }
    }

    /// Resolves a descriptor to a component, discarding match details.
    pub fn resolve(&self, block: &BlockDescriptor) -> Option<ComponentRef> {
        self.match_block(block).component
    }

    /// Resolves a descriptor with full match details.
    pub fn match_block(&self, block: &BlockDescriptor) -> MatchResult {
        let result = self.find(block);
        if self.debug {
            log::debug!(
                "[BlockRegistry] {} -> {} ({})",
                describe(block),
                result
                    .key
                    .as_ref()
                    .map_or_else(|| "<none>".to_string(), ToString::to_string),
                result.kind
            );
        }
        if self.strict_variants
            && result.kind == MatchKind::Type
            && let (Some(block_type), Some(block_name)) = (block.block_type(), block.block_name())
        {
            log::warn!(
                "[BlockRegistry] no `{}:{}` registered; rendering generic `{}`",
                block_type,
                block_name,
                block_type
            );
        }
        result
    }

    fn find(&self, block: &BlockDescriptor) -> MatchResult {
        // Opaque text only ever matches the wildcard.
        if !block.is_text() {
            let block_type = block.block_type();

            // Keys are built from the `"type:name"` and `"type"` strings, so a
            // `blockType` containing `:` looks up an exact key.
            if let (Some(block_type), Some(block_name)) = (block_type, block.block_name()) {
                let key = BlockKey::exact(block_type, block_name);
                if let Some(component) = self.entries.get(&key) {
                    return MatchResult::found(MatchKind::Exact, key, component.clone());
                }
            }

            if let Some(block_type) = block_type {
                let key = BlockKey::of_type(block_type);
                if let Some(component) = self.entries.get(&key) {
                    return MatchResult::found(MatchKind::Type, key, component.clone());
                }
            }
        }

        match self.entries.get(&BlockKey::Fallback) {
            Some(component) => {
                MatchResult::found(MatchKind::Fallback, BlockKey::Fallback, component.clone())
            }
            None => MatchResult::none(),
        }
    }

    /// Returns true when the key is registered.
    pub fn has(&self, key: impl Into<BlockKey>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<BlockKey> {
        self.entries.keys().cloned().collect()
    }

    /// Number of registered keys.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Removes a key. Returns false when it was not registered.
    pub fn unregister(&mut self, key: impl Into<BlockKey>) -> bool {
        self.entries.remove(&key.into()).is_some()
    }

    /// One line per key: `key [tier] -> component`.
    pub fn dump(&self) -> String {
        let mut out = format!("BlockRegistry ({} entries)\n", self.entries.len());
        for (key, component) in &self.entries {
            writeln!(out, "  {} [{}] -> {}", key, key.tier(), component.name()).ok();
        }
        out
    }

    /// Logs the registry contents at info level.
    pub fn print_registry(&self) {
        log::info!("{}", self.dump().trim_end());
    }
}

impl fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("keys", &self.keys().iter().map(ToString::to_string).collect::<Vec<_>>())
            .field("debug", &self.debug)
            .field("strict_variants", &self.strict_variants)
            .finish()
    }
}

fn describe(block: &BlockDescriptor) -> String {
    match block {
        BlockDescriptor::Text(_) => "text block".to_string(),
        BlockDescriptor::Structured(_) => format!(
            "block(type={}, name={})",
            block.block_type().unwrap_or("-"),
            block.block_name().unwrap_or("-")
        ),
        BlockDescriptor::Malformed(_) => "malformed block".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::component_fn;
    use serde_json::json;

    fn named(name: &'static str) -> ComponentRef {
        component_fn(name, move |_| Ok(name.to_string()))
    }

    fn block(value: serde_json::Value) -> BlockDescriptor {
        BlockDescriptor::from_value(value)
    }

    fn scenario() -> BlockRegistry {
        let mut registry = BlockRegistry::new();
        registry.register("hero:01", named("HeroA"));
        registry.register("hero", named("HeroB"));
        registry.register("*", named("Fallback"));
        registry
    }

    fn matched_name(result: &MatchResult) -> Option<&str> {
        result.component.as_ref().map(|c| c.name())
    }

    #[test]
    fn test_exact_beats_type() {
        let registry = scenario();
        let result = registry.match_block(&block(json!({"blockType": "hero", "blockName": "01"})));
        assert_eq!(result.kind, MatchKind::Exact);
        assert_eq!(result.key, Some(BlockKey::exact("hero", "01")));
        assert_eq!(matched_name(&result), Some("HeroA"));
    }

    #[test]
    fn test_type_tier() {
        let registry = scenario();
        let result = registry.match_block(&block(json!({"blockType": "hero", "blockName": "99"})));
        assert_eq!(result.kind, MatchKind::Type);
        assert_eq!(result.key, Some(BlockKey::of_type("hero")));
        assert_eq!(matched_name(&result), Some("HeroB"));
    }

    #[test]
    fn test_wildcard_tier() {
        let registry = scenario();
        let result = registry.match_block(&block(json!({"blockType": "unknown"})));
        assert_eq!(result.kind, MatchKind::Fallback);
        assert_eq!(result.key, Some(BlockKey::Fallback));
        assert_eq!(matched_name(&result), Some("Fallback"));
    }

    #[test]
    fn test_total_miss() {
        let registry = BlockRegistry::new();
        for descriptor in [
            block(json!({"blockType": "hero", "blockName": "01"})),
            BlockDescriptor::text("plain text"),
            block(json!(null)),
        ] {
            let result = registry.match_block(&descriptor);
            assert_eq!(result.kind, MatchKind::None);
            assert!(result.component.is_none());
            assert!(result.key.is_none());
            assert!(!result.is_match());
        }
    }

    #[test]
    fn test_text_only_matches_wildcard() {
        let mut registry = BlockRegistry::new();
        registry.register("hero", named("Hero"));
        assert_eq!(
            registry.match_block(&BlockDescriptor::text("hero")).kind,
            MatchKind::None
        );

        registry.register("*", named("Fallback"));
        let result = registry.match_block(&BlockDescriptor::text("hero"));
        assert_eq!(result.kind, MatchKind::Fallback);
        assert_eq!(matched_name(&result), Some("Fallback"));
    }

    #[test]
    fn test_name_without_type_skips_to_wildcard() {
        let registry = scenario();
        let result = registry.match_block(&block(json!({"blockName": "01"})));
        assert_eq!(result.kind, MatchKind::Fallback);
    }

    #[test]
    fn test_malformed_goes_to_wildcard() {
        let registry = scenario();
        let result = registry.match_block(&block(json!([1, 2, 3])));
        assert_eq!(result.kind, MatchKind::Fallback);
    }

    #[test]
    fn test_lookup_compares_key_strings() {
        let mut registry = BlockRegistry::new();
        registry.register("hero:01", named("HeroA"));
        registry.register("a:b:c", named("Nested"));

        let result = registry.match_block(&block(json!({"blockType": "hero:01"})));
        assert_eq!(result.kind, MatchKind::Type);
        assert_eq!(result.key.as_ref().map(|k| k.to_string()), Some("hero:01".to_string()));
        assert_eq!(matched_name(&result), Some("HeroA"));

        let result = registry.match_block(&block(json!({"blockType": "a:b", "blockName": "c"})));
        assert_eq!(result.kind, MatchKind::Exact);
        assert_eq!(matched_name(&result), Some("Nested"));

        let result = registry.match_block(&block(json!({"blockType": "a", "blockName": "b:c"})));
        assert_eq!(result.kind, MatchKind::Exact);
    }

    #[test]
    fn test_reregistration_overwrites() {
        let mut registry = BlockRegistry::new();
        assert!(registry.register("faq", named("First")).is_none());
        let previous = registry.register("faq", named("Second"));
        assert_eq!(previous.map(|c| c.name().to_string()), Some("First".to_string()));
        assert!(registry.has("faq"));
        assert_eq!(registry.size(), 1);
        assert_eq!(
            registry.resolve(&block(json!({"blockType": "faq"}))).unwrap().name(),
            "Second"
        );
    }

    #[test]
    fn test_unregister() {
        let mut registry = scenario();
        assert!(registry.unregister("hero"));
        assert!(!registry.has("hero"));
        assert_eq!(registry.size(), 2);

        assert!(!registry.unregister("hero"));
        assert_eq!(registry.size(), 2);
    }

    #[test]
    fn test_mutation_visible_immediately() {
        let mut registry = scenario();
        let descriptor = block(json!({"blockType": "hero", "blockName": "01"}));
        assert_eq!(registry.match_block(&descriptor).kind, MatchKind::Exact);
        registry.unregister("hero:01");
        assert_eq!(registry.match_block(&descriptor).kind, MatchKind::Type);
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.match_block(&descriptor).kind, MatchKind::None);
    }

    #[test]
    fn test_alias_resolves_target() {
        let mut registry = BlockRegistry::new();
        registry.register("features:cards", named("FeaturesCards"));
        assert!(registry.alias("feature:01", "features:cards"));
        assert!(registry.alias("feature:01", "features:cards"));
        assert_eq!(registry.size(), 2);

        let result = registry.match_block(&block(json!({"blockType": "feature", "blockName": "01"})));
        assert_eq!(result.kind, MatchKind::Exact);
        assert_eq!(matched_name(&result), Some("FeaturesCards"));
    }

    #[test]
    fn test_alias_missing_target() {
        let mut registry = BlockRegistry::new();
        assert!(!registry.alias("feature", "features"));
        assert!(!registry.has("feature"));
    }

    #[test]
    fn test_apply_config() {
        let mut registry = BlockRegistry::new();
        registry.register("cta", named("Cta"));
        let config = RegistryConfig::from_json_str(
            r#"{"debug": true, "aliases": [
                {"key": "call-to-action", "target": "cta"},
                {"key": "banner", "target": "missing"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(registry.apply_config(&config), 1);
        assert!(registry.is_debug());
        assert!(registry.has("call-to-action"));
        assert!(!registry.has("banner"));
    }

    #[test]
    fn test_matching_is_deterministic() {
        let mut registry = scenario();
        registry.set_debug(true);
        registry.set_strict_variants(true);
        let descriptor = block(json!({"blockType": "hero", "blockName": "02"}));
        let first = registry.match_block(&descriptor);
        let second = registry.match_block(&descriptor);
        assert_eq!(first.kind, second.kind);
        assert_eq!(first.key, second.key);
    }

    #[test]
    fn test_dump_lists_tiers() {
        let registry = scenario();
        let dump = registry.dump();
        assert!(dump.starts_with("BlockRegistry (3 entries)"));
        assert!(dump.contains("  * [fallback] -> Fallback"));
        assert!(dump.contains("  hero [type] -> HeroB"));
        assert!(dump.contains("  hero:01 [exact] -> HeroA"));
    }

    #[test]
    fn test_default_aliases_add_singular_feature() {
        let components = ComponentRegistry::with_defaults();
        assert!(!components.has("feature:01"));
        assert!(!components.has("feature"));

        let registry = BlockRegistry::with_defaults();
        assert_eq!(registry.size(), components.keys().len() + 2);
        assert!(registry.has("feature:01"));
        assert!(registry.has("feature"));
    }

    #[test]
    fn test_defaults_resolve_cms_spellings() {
        let registry = BlockRegistry::with_defaults();
        let result = registry.match_block(&block(json!({"blockType": "feature", "blockName": "01"})));
        assert_eq!(result.kind, MatchKind::Exact);
        assert_eq!(matched_name(&result), Some("FeaturesCards"));
        let result = registry.match_block(&block(json!({"blockType": "faq", "blockName": "zzz"})));
        assert_eq!(result.kind, MatchKind::Type);
        assert_eq!(matched_name(&result), Some("FaqAccordion"));
        let result = registry.match_block(&block(json!({"blockType": "faq", "blockName": "01"})));
        assert_eq!(matched_name(&result), Some("FaqBasic"));
        let result = registry.match_block(&block(json!({"blockType": "pricing"})));
        assert_eq!(result.kind, MatchKind::None);
    }
}
