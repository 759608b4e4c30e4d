//! Component table, block registry and their configuration.

/// Block registry with three-tier matching.
pub mod block_registry;
/// Static component table.
pub mod component_registry;
/// Registry configuration loading.
pub mod config;
/// Built-in component table.
pub mod defaults;

pub use block_registry::{BlockRegistry, MatchKind, MatchResult};
pub use component_registry::ComponentRegistry;
pub use config::{AliasMapping, FallbackMode, RegistryConfig};
pub use defaults::default_components;
