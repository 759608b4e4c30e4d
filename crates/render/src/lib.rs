#![deny(missing_docs)]
//! blockkit render: component registries, three-tier block resolution, and a
//! renderer that isolates per-block failures.

/// Built-in block components.
pub mod blocks;
/// Component trait and props.
pub mod component;
/// HTML writing helpers.
pub mod html;
/// Deferred component construction.
pub mod lazy;
/// Component table and block registry.
pub mod registry;
/// Block rendering and page assembly.
pub mod renderer;

pub use component::{BlockComponent, BlockProps, ComponentRef, FnComponent, component_fn};
pub use lazy::{LazyComponent, LoadState};
pub use registry::{
    AliasMapping, BlockRegistry, ComponentRegistry, FallbackMode, MatchKind, MatchResult,
    RegistryConfig, default_components,
};
pub use renderer::{
    BlockErrorHook, BlockPhase, BlockRenderer, DEFAULT_CLASS_NAME, DefaultFallback,
    FallbackReason, LOADING_PLACEHOLDER, MINIMAL_FALLBACK, RenderMode, RenderOptions,
    RenderOutcome,
};

pub use blockkit_core::{BlockDescriptor, BlockError, BlockKey, ConfigError, KeyTier};
