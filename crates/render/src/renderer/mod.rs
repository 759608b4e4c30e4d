//! Block renderer: resolves each block, isolates per-block failures and
//! assembles the page.

/// Default and minimal fallback markup.
pub mod fallback;
/// Per-block outcomes and phases.
pub mod outcome;

pub use fallback::{DefaultFallback, LOADING_PLACEHOLDER, MINIMAL_FALLBACK};
pub use outcome::{BlockPhase, FallbackReason, RenderOutcome};

use blockkit_core::{BlockDescriptor, BlockError};
use rayon::prelude::*;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::component::{BlockComponent, BlockProps, ComponentRef};
use crate::html::HtmlWriter;
use crate::registry::{BlockRegistry, FallbackMode, RegistryConfig};

/// Class applied to each block wrapper in boundary mode when none is given.
pub const DEFAULT_CLASS_NAME: &str = "space-y-8";

/// Caller hook invoked once per failed block with the error, the block and
/// its index.
pub type BlockErrorHook = Arc<dyn Fn(&BlockError, &BlockDescriptor, usize) + Send + Sync>;

/// Whether each block gets its own loading boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Each block is preloaded and wrapped in an indexed container.
    #[default]
    Boundary,
    /// Blocks render inline without preloading.
    Simple,
}

/// Options for a render pass.
#[derive(Clone, Default)]
pub struct RenderOptions {
    /// Replaces [`DefaultFallback`].
    pub fallback: Option<ComponentRef>,
    /// Called once for every block whose component fails.
    pub on_block_error: Option<BlockErrorHook>,
    /// Mode of the default fallback.
    pub fallback_mode: FallbackMode,
    /// Class of each block container. Boundary mode defaults to [`DEFAULT_CLASS_NAME`].
    pub class_name: Option<String>,
    /// Class of the outer container in boundary mode.
    pub wrapper_class_name: Option<String>,
}

impl RenderOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options whose fallback mode follows the registry configuration.
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new().with_fallback_mode(config.fallback_mode)
    }

    /// Uses a custom fallback component.
    pub fn with_fallback(mut self, fallback: ComponentRef) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Sets the error hook.
    pub fn on_block_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&BlockError, &BlockDescriptor, usize) + Send + Sync + 'static,
    {
        self.on_block_error = Some(Arc::new(hook));
        self
    }

    /// Sets the default fallback's mode.
    pub fn with_fallback_mode(mut self, mode: FallbackMode) -> Self {
        self.fallback_mode = mode;
        self
    }

    /// Sets the block container class.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets the outer container class.
    pub fn with_wrapper_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.wrapper_class_name = Some(class_name.into());
        self
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("fallback", &self.fallback.as_ref().map(|c| c.name()))
            .field("on_block_error", &self.on_block_error.is_some())
            .field("fallback_mode", &self.fallback_mode)
            .field("class_name", &self.class_name)
            .field("wrapper_class_name", &self.wrapper_class_name)
            .finish()
    }
}

/// Renders block sequences against a registry.
///
/// Every block produces exactly one [`RenderOutcome`]; a failing block is
/// replaced with a fallback and never affects its siblings.
#[derive(Debug, Clone, Copy)]
pub struct BlockRenderer<'r> {
    registry: &'r BlockRegistry,
}

impl<'r> BlockRenderer<'r> {
    /// Creates a renderer over a registry.
    pub fn new(registry: &'r BlockRegistry) -> Self {
        Self { registry }
    }

    /// The registry used for resolution.
    pub fn registry(&self) -> &'r BlockRegistry {
        self.registry
    }

    /// Renders every block in order, preloading each component inside the
    /// block's boundary.
    pub fn render_all(&self, blocks: &[BlockDescriptor], options: &RenderOptions) -> Vec<RenderOutcome> {
        self.render_sequence(blocks, options, RenderMode::Boundary)
    }

    /// Renders every block in order without preloading.
    pub fn render_all_simple(
        &self,
        blocks: &[BlockDescriptor],
        options: &RenderOptions,
    ) -> Vec<RenderOutcome> {
        self.render_sequence(blocks, options, RenderMode::Simple)
    }

    /// Renders blocks concurrently. Outcomes keep input order.
    pub fn render_all_parallel(
        &self,
        blocks: &[BlockDescriptor],
        options: &RenderOptions,
    ) -> Vec<RenderOutcome> {
        blocks
            .par_iter()
            .enumerate()
            .map(|(index, block)| self.render_block(block, index, options, RenderMode::Boundary))
            .collect()
    }

    fn render_sequence(
        &self,
        blocks: &[BlockDescriptor],
        options: &RenderOptions,
        mode: RenderMode,
    ) -> Vec<RenderOutcome> {
        blocks
            .iter()
            .enumerate()
            .map(|(index, block)| self.render_block(block, index, options, mode))
            .collect()
    }

    /// Renders a single block. Never panics because of the component.
    pub fn render_block(
        &self,
        block: &BlockDescriptor,
        index: usize,
        options: &RenderOptions,
        mode: RenderMode,
    ) -> RenderOutcome {
        BlockPhase::Pending.enter(index);
        BlockPhase::Resolving.enter(index);
        let matched = self.registry.match_block(block);
        let (Some(component), Some(key)) = (matched.component, matched.key) else {
            BlockPhase::Unresolved.enter(index);
            return fallback_outcome(block, index, FallbackReason::Unmatched, options);
        };
        BlockPhase::Resolved.enter(index);

        BlockPhase::Rendering.enter(index);
        let props = BlockProps::new(block, index);
        let result = guarded(component.name(), || {
            if mode == RenderMode::Boundary {
                component.preload()?;
            }
            component.render(&props)
        });

        match result {
            Ok(html) => {
                BlockPhase::Rendered.enter(index);
                RenderOutcome::Rendered {
                    index,
                    kind: matched.kind,
                    key,
                    component: component.name().to_string(),
                    html,
                }
            }
            Err(error) => {
                BlockPhase::RenderFailed.enter(index);
                if let Some(hook) = &options.on_block_error {
                    hook(&error, block, index);
                }
                log::error!(
                    "[BlockRenderer] Error rendering block at index {}: {}",
                    index,
                    error
                );
                fallback_outcome(block, index, FallbackReason::RenderFailed(error.to_string()), options)
            }
        }
    }

    /// Joins outcome markup in order.
    ///
    /// Boundary mode wraps each block in `<div class=".." data-block-index="i">`
    /// inside an outer `<div>`; simple mode wraps each block in a plain `<div>`.
    /// No outcomes produce an empty string.
    pub fn assemble(&self, outcomes: &[RenderOutcome], options: &RenderOptions, mode: RenderMode) -> String {
        let parts = outcomes.iter().map(|o| (o.index(), o.html()));
        match mode {
            RenderMode::Boundary => assemble_boundary(parts, options),
            RenderMode::Simple => assemble_simple(parts, options),
        }
    }

    /// Renders and assembles a page in boundary mode.
    pub fn render_page(&self, blocks: &[BlockDescriptor], options: &RenderOptions) -> String {
        let outcomes = self.render_all(blocks, options);
        self.assemble(&outcomes, options, RenderMode::Boundary)
    }

    /// Assembles the page as it looks before deferred components load.
    ///
    /// Blocks whose component is not ready show [`LOADING_PLACEHOLDER`] and
    /// nothing is loaded; the rest render in simple mode.
    pub fn render_shell(&self, blocks: &[BlockDescriptor], options: &RenderOptions) -> String {
        let parts: Vec<(usize, String)> = blocks
            .iter()
            .enumerate()
            .map(|(index, block)| {
                let pending = self
                    .registry
                    .resolve(block)
                    .is_some_and(|component| !component.is_ready());
                let html = if pending {
                    LOADING_PLACEHOLDER.to_string()
                } else {
                    self.render_block(block, index, options, RenderMode::Simple)
                        .into_html()
                };
                (index, html)
            })
            .collect();
        assemble_boundary(parts.iter().map(|(i, html)| (*i, html.as_str())), options)
    }
}

fn assemble_boundary<'a>(
    parts: impl ExactSizeIterator<Item = (usize, &'a str)>,
    options: &RenderOptions,
) -> String {
    if parts.len() == 0 {
        return String::new();
    }
    let class_name = options.class_name.as_deref().unwrap_or(DEFAULT_CLASS_NAME);
    let mut w = HtmlWriter::new();
    match options.wrapper_class_name.as_deref() {
        Some(wrapper) => w.open_class("div", wrapper),
        None => w.open("div", &[]),
    };
    for (index, html) in parts {
        let index = index.to_string();
        w.open("div", &[("class", class_name), ("data-block-index", index.as_str())])
            .raw(html)
            .close("div");
    }
    w.close("div");
    w.finish()
}

fn assemble_simple<'a>(
    parts: impl Iterator<Item = (usize, &'a str)>,
    options: &RenderOptions,
) -> String {
    let mut w = HtmlWriter::new();
    for (_, html) in parts {
        match options.class_name.as_deref() {
            Some(class_name) => w.open_class("div", class_name),
            None => w.open("div", &[]),
        };
        w.raw(html).close("div");
    }
    w.finish()
}

fn fallback_outcome(
    block: &BlockDescriptor,
    index: usize,
    reason: FallbackReason,
    options: &RenderOptions,
) -> RenderOutcome {
    let props = BlockProps::new(block, index);
    let rendered = match &options.fallback {
        Some(fallback) => guarded(fallback.name(), || fallback.render(&props)),
        None => {
            let fallback = DefaultFallback::new(options.fallback_mode);
            guarded(DefaultFallback::NAME, || fallback.render(&props))
        }
    };
    let html = rendered.unwrap_or_else(|error| {
        log::error!(
            "[BlockRenderer] Fallback failed for block at index {}: {}",
            index,
            error
        );
        MINIMAL_FALLBACK.to_string()
    });

    RenderOutcome::Fallback {
        index,
        block_type: block.block_type().map(str::to_string),
        block_name: block.block_name().map(str::to_string),
        reason,
        descriptor: block.clone(),
        html,
    }
}

/// Runs a component call, turning a panic into [`BlockError::Panicked`].
fn guarded<F>(component: &str, f: F) -> Result<String, BlockError>
where
    F: FnOnce() -> Result<String, BlockError>,
{
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(BlockError::panicked(component, panic_message(&*payload))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::component_fn;
    use crate::lazy::{LazyComponent, LoadState};
    use crate::registry::MatchKind;
    use blockkit_core::BlockKey;
    use serde_json::json;
    use std::sync::Mutex;

    fn echo(name: &'static str) -> ComponentRef {
        component_fn(name, move |props| Ok(format!("<{}:{}>", name, props.index())))
    }

    fn registry() -> BlockRegistry {
        let mut registry = BlockRegistry::new();
        registry.register("hero:01", echo("HeroA"));
        registry.register("hero", echo("HeroB"));
        registry.register(
            "broken",
            component_fn("Broken", |_| Err(BlockError::render("Broken", "bad data"))),
        );
        registry.register("panicky", component_fn("Panicky", |_| panic!("kaboom")));
        registry
    }

    fn blocks(values: serde_json::Value) -> Vec<BlockDescriptor> {
        blockkit_core::normalize_blocks(&values)
    }

    #[test]
    fn test_empty_input() {
        let registry = registry();
        let renderer = BlockRenderer::new(&registry);
        let options = RenderOptions::new();
        assert!(renderer.render_all(&[], &options).is_empty());
        assert_eq!(renderer.render_page(&[], &options), "");
    }

    #[test]
    fn test_rendered_outcome_records_match() {
        let registry = registry();
        let renderer = BlockRenderer::new(&registry);
        let outcomes = renderer.render_all(
            &blocks(json!([{"blockType": "hero", "blockName": "01"}, {"blockType": "hero", "blockName": "99"}])),
            &RenderOptions::new(),
        );
        let RenderOutcome::Rendered { kind, key, component, html, .. } = &outcomes[1] else {
            panic!("expected rendered outcome");
        };
        assert_eq!(*kind, MatchKind::Type);
        assert_eq!(*key, BlockKey::of_type("hero"));
        assert_eq!(component, "HeroB");
        assert_eq!(html, "<HeroB:1>");
        assert_eq!(outcomes[0].html(), "<HeroA:0>");
    }

    #[test]
    fn test_unmatched_block_falls_back() {
        let registry = registry();
        let renderer = BlockRenderer::new(&registry);
        let outcomes = renderer.render_all(
            &blocks(json!([{"blockType": "pricing", "blockName": "02"}])),
            &RenderOptions::new().with_fallback_mode(FallbackMode::Production),
        );
        let RenderOutcome::Fallback { block_type, block_name, reason, html, .. } = &outcomes[0] else {
            panic!("expected fallback outcome");
        };
        assert_eq!(block_type.as_deref(), Some("pricing"));
        assert_eq!(block_name.as_deref(), Some("02"));
        assert_eq!(*reason, FallbackReason::Unmatched);
        assert_eq!(html, r#"<div class="block-fallback" role="note" data-block-type="pricing"></div>"#);
        assert_eq!(outcomes[0].phase(), BlockPhase::Unresolved);
    }

    #[test]
    fn test_errors_and_panics_are_isolated() {
        let registry = registry();
        let renderer = BlockRenderer::new(&registry);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let options = RenderOptions::new().on_block_error(move |error, _, index| {
            sink.lock().unwrap().push((index, error.clone()));
        });

        let outcomes = renderer.render_all(
            &blocks(json!([{"blockType": "broken"}, {"blockType": "hero"}, {"blockType": "panicky"}])),
            &options,
        );

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_fallback());
        assert!(outcomes[1].is_rendered());
        assert!(outcomes[2].is_fallback());
        assert_eq!(
            outcomes[2].reason(),
            Some(&FallbackReason::RenderFailed(
                "component `Panicky` panicked: kaboom".to_string()
            ))
        );
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (0, BlockError::render("Broken", "bad data")),
                (2, BlockError::panicked("Panicky", "kaboom")),
            ]
        );
    }

    #[test]
    fn test_failing_fallback_uses_minimal_marker() {
        let registry = BlockRegistry::new();
        let renderer = BlockRenderer::new(&registry);
        let options = RenderOptions::new()
            .with_fallback(component_fn("BadFallback", |_| panic!("fallback broke")));
        let outcomes = renderer.render_all(&blocks(json!(["plain text"])), &options);
        assert!(outcomes[0].is_fallback());
        assert_eq!(outcomes[0].html(), MINIMAL_FALLBACK);
    }

    #[test]
    fn test_boundary_assembly() {
        let registry = registry();
        let renderer = BlockRenderer::new(&registry);
        let options = RenderOptions::new().with_wrapper_class_name("page");
        let html = renderer.render_page(&blocks(json!([{"blockType": "hero"}, {"blockType": "hero", "blockName": "01"}])), &options);
        insta::assert_snapshot!(html, @r#"<div class="page"><div class="space-y-8" data-block-index="0"><HeroB:0></div><div class="space-y-8" data-block-index="1"><HeroA:1></div></div>"#);
    }

    #[test]
    fn test_simple_assembly() {
        let registry = registry();
        let renderer = BlockRenderer::new(&registry);
        let blocks = blocks(json!([{"blockType": "hero"}, {"blockType": "hero"}]));

        let options = RenderOptions::new();
        let outcomes = renderer.render_all_simple(&blocks, &options);
        assert_eq!(
            renderer.assemble(&outcomes, &options, RenderMode::Simple),
            "<div><HeroB:0></div><div><HeroB:1></div>"
        );

        let options = RenderOptions::new().with_class_name("block");
        assert_eq!(
            renderer.assemble(&outcomes, &options, RenderMode::Simple),
            r#"<div class="block"><HeroB:0></div><div class="block"><HeroB:1></div>"#
        );
    }

    #[test]
    fn test_parallel_preserves_order() {
        let registry = registry();
        let renderer = BlockRenderer::new(&registry);
        let input: Vec<_> = (0..64)
            .map(|i| {
                if i % 5 == 0 {
                    BlockDescriptor::typed("broken", None)
                } else {
                    BlockDescriptor::typed("hero", None)
                }
            })
            .collect();
        let options = RenderOptions::new();
        let parallel = renderer.render_all_parallel(&input, &options);
        let sequential = renderer.render_all(&input, &options);
        assert_eq!(parallel.len(), 64);
        for (i, (p, s)) in parallel.iter().zip(&sequential).enumerate() {
            assert_eq!(p.index(), i);
            assert_eq!(p.html(), s.html());
        }
    }

    #[test]
    fn test_boundary_mode_reports_load_failure() {
        let mut registry = BlockRegistry::new();
        registry.register("lazy", LazyComponent::shared("Lazy", || Err("chunk missing".to_string())));
        let renderer = BlockRenderer::new(&registry);
        let outcomes = renderer.render_all(&[BlockDescriptor::typed("lazy", None)], &RenderOptions::new());
        assert_eq!(
            outcomes[0].reason(),
            Some(&FallbackReason::RenderFailed(
                "component `Lazy` failed to load: chunk missing".to_string()
            ))
        );
    }

    #[test]
    fn test_shell_shows_placeholder_without_loading() {
        let lazy = Arc::new(LazyComponent::new("Lazy", || Ok(echo("Loaded"))));
        let mut registry = registry();
        registry.register("lazy", lazy.clone());
        let renderer = BlockRenderer::new(&registry);
        let blocks = blocks(json!([{"blockType": "lazy"}, {"blockType": "hero"}]));
        let options = RenderOptions::new();

        let shell = renderer.render_shell(&blocks, &options);
        assert!(shell.contains(LOADING_PLACEHOLDER));
        assert!(shell.contains("<HeroB:1>"));
        assert_eq!(lazy.state(), LoadState::Loading);

        let page = renderer.render_page(&blocks, &options);
        assert!(page.contains("<Loaded:0>"));
        assert!(!page.contains(LOADING_PLACEHOLDER));
        assert_eq!(lazy.state(), LoadState::Ready);
    }
}
