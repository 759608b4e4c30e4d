use blockkit_core::{BlockDescriptor, normalize_article_blocks, normalize_blocks};
use blockkit_render::{
    BlockRenderer, FallbackMode, MatchKind, RegistryConfig, RenderMode, RenderOptions,
    RenderOutcome,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Render Options
// ============================================================================

/// Render options accepted from JavaScript.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WasmRenderOptions {
    /// Class of each block container.
    pub class_name: Option<String>,
    /// Class of the outer container (boundary mode only).
    pub wrapper_class_name: Option<String>,
    /// `"boundary"` (default) or `"simple"`.
    pub mode: WasmRenderMode,
    /// `"development"` (default) or `"production"`.
    pub fallback_mode: Option<FallbackMode>,
}

/// Renderer mode as spelled in JavaScript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WasmRenderMode {
    /// Preload and wrap each block.
    #[default]
    Boundary,
    /// Render inline.
    Simple,
}

impl WasmRenderOptions {
    fn render_mode(&self) -> RenderMode {
        match self.mode {
            WasmRenderMode::Boundary => RenderMode::Boundary,
            WasmRenderMode::Simple => RenderMode::Simple,
        }
    }

    fn to_render_options(&self) -> RenderOptions {
        RenderOptions {
            fallback_mode: self.fallback_mode.unwrap_or_default(),
            class_name: self.class_name.clone(),
            wrapper_class_name: self.wrapper_class_name.clone(),
            ..RenderOptions::default()
        }
    }
}

/// Match details returned to JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    /// `"exact"`, `"type"`, `"fallback"` or `"none"`.
    pub kind: MatchKind,
    /// Key that satisfied the match.
    pub key: Option<String>,
    /// Name of the resolved component.
    pub component: Option<String>,
}

// ============================================================================
// JSON-level operations
// ============================================================================

fn match_summary(registry: &blockkit_render::BlockRegistry, block: Value) -> MatchSummary {
    let result = registry.match_block(&BlockDescriptor::from_value(block));
    MatchSummary {
        kind: result.kind,
        key: result.key.map(|k| k.to_string()),
        component: result.component.map(|c| c.name().to_string()),
    }
}

fn render_outcomes(
    registry: &blockkit_render::BlockRegistry,
    blocks: &Value,
    options: &WasmRenderOptions,
) -> Vec<RenderOutcome> {
    let blocks = normalize_blocks(blocks);
    let renderer = BlockRenderer::new(registry);
    let render_options = options.to_render_options();
    match options.render_mode() {
        RenderMode::Boundary => renderer.render_all(&blocks, &render_options),
        RenderMode::Simple => renderer.render_all_simple(&blocks, &render_options),
    }
}

fn render_html(
    registry: &blockkit_render::BlockRegistry,
    blocks: &Value,
    options: &WasmRenderOptions,
) -> String {
    let outcomes = render_outcomes(registry, blocks, options);
    BlockRenderer::new(registry).assemble(
        &outcomes,
        &options.to_render_options(),
        options.render_mode(),
    )
}

// ============================================================================
// JS value conversion
// ============================================================================

fn from_js<T: for<'de> Deserialize<'de> + Default>(value: JsValue, what: &str) -> Result<T, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid {}: {}", what, e)))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Block Registry API
// ============================================================================

/// Block registry exposed to JavaScript.
///
/// Components are the built-in HTML components; JavaScript hosts map their
/// own CMS spellings onto them with `alias`.
#[wasm_bindgen(js_name = BlockRegistry)]
pub struct WasmBlockRegistry {
    inner: blockkit_render::BlockRegistry,
}

#[wasm_bindgen(js_class = BlockRegistry)]
impl WasmBlockRegistry {
    /// Creates a registry with the built-in components and default aliases.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::new_without_default)]
    pub fn new() -> WasmBlockRegistry {
        WasmBlockRegistry {
            inner: blockkit_render::BlockRegistry::with_defaults(),
        }
    }

    /// Creates a registry with no entries.
    pub fn empty() -> WasmBlockRegistry {
        WasmBlockRegistry {
            inner: blockkit_render::BlockRegistry::new(),
        }
    }

    /// Registers `alias` with whatever `target` resolves to.
    pub fn alias(&mut self, alias: &str, target: &str) -> bool {
        self.inner.alias(alias, target)
    }

    /// Removes a key.
    pub fn unregister(&mut self, key: &str) -> bool {
        self.inner.unregister(key)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Returns true when the key is registered.
    pub fn has(&self, key: &str) -> bool {
        self.inner.has(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> js_sys::Array {
        self.inner
            .keys()
            .iter()
            .map(|key| JsValue::from_str(&key.to_string()))
            .collect()
    }

    /// Number of registered keys.
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Enables or disables logging of match decisions.
    #[wasm_bindgen(js_name = setDebug)]
    pub fn set_debug(&mut self, enabled: bool) {
        self.inner.set_debug(enabled);
    }

    /// Enables or disables variant downgrade warnings.
    #[wasm_bindgen(js_name = setStrictVariants)]
    pub fn set_strict_variants(&mut self, enabled: bool) {
        self.inner.set_strict_variants(enabled);
    }

    /// Applies a `RegistryConfig` object; returns how many aliases were registered.
    #[wasm_bindgen(js_name = applyConfig)]
    pub fn apply_config(&mut self, config: JsValue) -> Result<usize, JsError> {
        let config: RegistryConfig = from_js(config, "config")?;
        config
            .validate()
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(self.inner.apply_config(&config))
    }

    /// Resolves one block, returning `{ kind, key, component }`.
    #[wasm_bindgen(js_name = matchBlock)]
    pub fn match_block(&self, block: JsValue) -> Result<JsValue, JsError> {
        let block: Value = from_js(block, "block")?;
        to_js(&match_summary(&self.inner, block))
    }

    /// Renders blocks, returning one outcome object per block.
    pub fn render(&self, blocks: JsValue, options: JsValue) -> Result<JsValue, JsError> {
        let blocks: Value = from_js(blocks, "blocks")?;
        let options: WasmRenderOptions = from_js(options, "options")?;
        to_js(&render_outcomes(&self.inner, &blocks, &options))
    }

    /// Renders blocks and assembles the page markup.
    #[wasm_bindgen(js_name = renderHtml)]
    pub fn render_html(&self, blocks: JsValue, options: JsValue) -> Result<String, JsError> {
        let blocks: Value = from_js(blocks, "blocks")?;
        let options: WasmRenderOptions = from_js(options, "options")?;
        Ok(render_html(&self.inner, &blocks, &options))
    }

    /// One line per key with its tier.
    pub fn dump(&self) -> String {
        self.inner.dump()
    }
}

// ============================================================================
// Normalizer API
// ============================================================================

/// Turns a CMS block field (array, single object, null) into a block array.
#[wasm_bindgen(js_name = normalizeBlocks)]
pub fn normalize_blocks_js(value: JsValue) -> Result<JsValue, JsError> {
    let value: Value = from_js(value, "blocks")?;
    to_js(&normalize_blocks(&value))
}

/// Extracts the block array from an article document.
#[wasm_bindgen(js_name = normalizeArticleBlocks)]
pub fn normalize_article_blocks_js(article: JsValue) -> Result<JsValue, JsError> {
    let article: Value = from_js(article, "article")?;
    let blocks = article
        .as_object()
        .map(normalize_article_blocks)
        .unwrap_or_default();
    to_js(&blocks)
}
